//! Model output cleanup and the no-model fallback text.

use regex::Regex;
use std::sync::OnceLock;

use crate::AdviceRequest;

fn fence_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)^```[A-Za-z0-9_-]*[ \t]*\r?\n(.*?)\r?\n?```$").expect("static regex"))
}

fn blank_run_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\n[ \t]*\n(?:[ \t]*\n)+").expect("static regex"))
}

/// Strip a wrapping code fence, trim, and squeeze runs of blank lines.
pub fn clean_model_output(raw: &str) -> String {
    let trimmed = raw.trim();
    let body = fence_re()
        .captures(trimmed)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
        .unwrap_or(trimmed);
    blank_run_re().replace_all(body.trim(), "\n\n").into_owned()
}

/// Advice shown when no model is configured or the call failed.
pub fn offline_advice(req: &AdviceRequest) -> String {
    let urgency = req.urgency();
    format!(
        "{summary}: {name} ({category}).\n\
Check it before use; when in doubt, throw it out.",
        summary = urgency.summary(req.days_left),
        name = req.name,
        category = req.category,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pantry_core::FoodCategory;

    #[test]
    fn test_strips_fence_with_language_tag() {
        let raw = "```markdown\nUse within 2 days.\n\nEnjoy!\n```";
        assert_eq!(clean_model_output(raw), "Use within 2 days.\n\nEnjoy!");
    }

    #[test]
    fn test_plain_text_only_trimmed() {
        assert_eq!(clean_model_output("  hello\n"), "hello");
        // inner fences are left alone
        let raw = "Recipe:\n```\nstep\n```";
        assert_eq!(clean_model_output(raw), raw);
    }

    #[test]
    fn test_squeezes_blank_runs() {
        assert_eq!(clean_model_output("a\n\n\n\n b"), "a\n\n b");
        assert_eq!(clean_model_output("a\n  \n\t\nb"), "a\n\nb");
    }

    #[test]
    fn test_offline_advice() {
        let req = AdviceRequest {
            name: "Milk".to_string(),
            category: FoodCategory::Dairy,
            days_left: 0,
        };
        assert!(offline_advice(&req).starts_with("Use today: Milk (dairy)."));
    }
}
