//! pantry-advice: prompts and output handling for near-expiry advice
//!
//! No network here. The caller owns the model client and feeds the
//! messages built by [`prompt::advice_messages`] or
//! [`prompt::recipe_messages`] to it.

pub mod output;
pub mod prompt;
pub mod urgency;

pub use output::{clean_model_output, offline_advice};
pub use prompt::{AdviceRequest, ChatMessage, advice_messages, recipe_messages};
pub use urgency::Urgency;
