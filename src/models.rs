use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::collections::BTreeMap;
use utoipa::ToSchema;

// ============ Database Models ============

/// A contact record from the `leads` table.
///
/// Text columns are nullable in the store and surface as JSON `null`.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize, ToSchema)]
pub struct Lead {
    /// Display name.
    pub name: Option<String>,
    /// Social handle.
    pub username: Option<String>,
    /// Niche or business category (e.g. "gym").
    pub category: Option<String>,
    /// Free-text location, usually "City, ST".
    pub location: Option<String>,
    /// Follower count.
    pub followers: Option<i64>,
    /// Contact email.
    pub email: Option<String>,
}

// ============ Chat Models ============

/// One message of a chat transcript.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ChatMessage {
    /// Speaker tag, e.g. "user" or "assistant".
    pub role: String,
    pub content: String,
}

/// Body of `POST /chat`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ChatRequest {
    /// Ordered transcript; only the last message is inspected.
    pub messages: Vec<ChatMessage>,
}

/// Filter name to value, e.g. `state -> FL`.
pub type FilterSuggestions = BTreeMap<String, String>;

/// Response of `POST /chat`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ChatResponse {
    pub reply: String,
    /// Suggested search filters; empty object when nothing matched.
    pub filters: BTreeMap<String, String>,
}
