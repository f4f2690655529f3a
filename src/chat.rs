//! Keyword-based filter suggestions for the chat endpoint.

use crate::errors::AppError;
use crate::models::{ChatMessage, ChatResponse, FilterSuggestions};

/// A literal substring that, when present, suggests `key = value`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeywordRule {
    /// Lower-case needle.
    pub needle: &'static str,
    pub key: &'static str,
    pub value: &'static str,
}

pub const DEFAULT_RULES: &[KeywordRule] = &[
    KeywordRule {
        needle: "florida",
        key: "state",
        value: "FL",
    },
    KeywordRule {
        needle: "gym",
        key: "category",
        value: "gym",
    },
    KeywordRule {
        needle: "over 10k followers",
        key: "minFollowers",
        value: "10000",
    },
];

pub const FILTERS_FOUND_REPLY: &str =
    "Got it! I've applied filters based on your request. Run the search to see matching leads.";

pub const NO_FILTERS_REPLY: &str = "Got it! Tell me a location, a niche, or a follower count \
     and I'll turn it into search filters.";

/// Applies every rule independently to the lower-cased content.
pub fn suggest_filters(content: &str, rules: &[KeywordRule]) -> FilterSuggestions {
    let content = content.to_lowercase();
    rules
        .iter()
        .filter(|rule| content.contains(rule.needle))
        .map(|rule| (rule.key.to_string(), rule.value.to_string()))
        .collect()
}

/// Builds the chat reply from the most recent message.
pub fn respond(messages: &[ChatMessage], rules: &[KeywordRule]) -> Result<ChatResponse, AppError> {
    let last = messages.last().ok_or_else(|| {
        AppError::BadRequest("messages must contain at least one message".to_string())
    })?;

    let filters = suggest_filters(&last.content, rules);
    let reply = if filters.is_empty() {
        NO_FILTERS_REPLY
    } else {
        FILTERS_FOUND_REPLY
    };

    Ok(ChatResponse {
        reply: reply.to_string(),
        filters,
    })
}
