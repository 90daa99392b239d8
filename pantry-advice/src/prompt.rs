//! Chat messages for the advice model.

use pantry_core::{ExpiryAlert, FoodCategory, TrackedItem};
use serde::{Deserialize, Serialize};

use crate::Urgency;

/// What the model needs to know about one item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdviceRequest {
    pub name: String,
    pub category: FoodCategory,
    pub days_left: i64,
}

impl AdviceRequest {
    pub fn urgency(&self) -> Urgency {
        Urgency::from_days_left(self.days_left)
    }
}

impl From<&TrackedItem> for AdviceRequest {
    fn from(t: &TrackedItem) -> Self {
        Self {
            name: t.item.name.clone(),
            category: t.prediction.category,
            days_left: t.days_left,
        }
    }
}

impl From<&ExpiryAlert> for AdviceRequest {
    fn from(a: &ExpiryAlert) -> Self {
        Self {
            name: a.name.clone(),
            category: a.category,
            days_left: a.days_left,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

const SYSTEM_PROMPT: &str = "\
You are a friendly kitchen assistant helping a household avoid food waste. \
Be warm and concise. Never give advice that could make someone ill: if an \
item may be unsafe, say to discard it.";

/// System + user messages asking for advice on one item.
pub fn advice_messages(req: &AdviceRequest) -> Vec<ChatMessage> {
    let user = format!(
        "\
A grocery item is nearing its safe expiry date.

- Item: {name}
- Category: {category}
- Days left before safe expiry: {days}

Reply with:
1) A one-sentence urgency summary (suggested: \"{summary}\").
2) Two quick recipes using the item, each a title plus 2-4 short steps.
3) One storage tip to keep it fresh longer, if one applies.
4) A short friendly sign-off.",
        name = req.name,
        category = req.category,
        days = req.days_left,
        summary = req.urgency().summary(req.days_left),
    );

    vec![ChatMessage::system(SYSTEM_PROMPT), ChatMessage::user(user)]
}

/// System + user messages asking for recipes that combine several items.
pub fn recipe_messages(reqs: &[AdviceRequest]) -> Vec<ChatMessage> {
    let items: Vec<String> = reqs
        .iter()
        .map(|r| format!("- {} ({}, {} days left)", r.name, r.category, r.days_left))
        .collect();
    let user = format!(
        "\
These groceries are nearing their safe expiry dates:

{items}

Create 2 recipes that use as many of these items as possible:
1) Quick and easy (15-20 minutes).
2) More elaborate but rewarding (30-40 minutes).

For each recipe give a title, an ingredients list marking which items above
it uses, 5-7 clear steps and a serving suggestion.",
        items = items.join("\n"),
    );

    vec![ChatMessage::system(SYSTEM_PROMPT), ChatMessage::user(user)]
}
