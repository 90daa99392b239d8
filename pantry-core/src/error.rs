use thiserror::Error;

/// The only failure the predictor can raise: an input instant that does not parse,
/// or one too close to chrono's calendar limits to shift by whole days.
///
/// Unknown categories are not errors; they resolve to the packaged policy.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExpiryError {
    #[error("malformed timestamp '{input}': {reason}")]
    MalformedTimestamp { input: String, reason: String },
}

impl ExpiryError {
    pub(crate) fn malformed(input: &str, reason: impl Into<String>) -> Self {
        Self::MalformedTimestamp {
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}
