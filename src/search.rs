//! Lead search query construction.
//!
//! Query parameter names are resolved through [`LeadFilter`], an allow-list
//! that maps each accepted name to a fixed column expression. Values are
//! always bound as parameters.

use crate::errors::AppError;
use sqlx::{Postgres, QueryBuilder};

/// Maximum number of rows returned by a search.
pub const SEARCH_LIMIT: i64 = 50;

const LEAD_PROJECTION: &str = "SELECT name, username, category, location, \
     CAST(followers AS BIGINT) AS followers, email FROM leads";

/// Accepted search parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeadFilter {
    Name,
    Username,
    Category,
    Location,
    Email,
    /// Substring match on the follower count rendered as text.
    Followers,
    /// Chat suggestion key; matched as a whole word in `location`.
    State,
    /// Lower bound on the follower count.
    MinFollowers,
}

impl LeadFilter {
    pub const ALL: [LeadFilter; 8] = [
        LeadFilter::Name,
        LeadFilter::Username,
        LeadFilter::Category,
        LeadFilter::Location,
        LeadFilter::Email,
        LeadFilter::Followers,
        LeadFilter::State,
        LeadFilter::MinFollowers,
    ];

    /// Resolves a query parameter name, `None` when it is not allow-listed.
    pub fn from_param(name: &str) -> Option<Self> {
        match name {
            "name" => Some(LeadFilter::Name),
            "username" => Some(LeadFilter::Username),
            "category" => Some(LeadFilter::Category),
            "location" => Some(LeadFilter::Location),
            "email" => Some(LeadFilter::Email),
            "followers" => Some(LeadFilter::Followers),
            "state" => Some(LeadFilter::State),
            "minFollowers" | "min_followers" => Some(LeadFilter::MinFollowers),
            _ => None,
        }
    }

    /// Canonical parameter name.
    pub fn param(self) -> &'static str {
        match self {
            LeadFilter::Name => "name",
            LeadFilter::Username => "username",
            LeadFilter::Category => "category",
            LeadFilter::Location => "location",
            LeadFilter::Email => "email",
            LeadFilter::Followers => "followers",
            LeadFilter::State => "state",
            LeadFilter::MinFollowers => "minFollowers",
        }
    }

    /// SQL expression the filter applies to. Never derived from input.
    pub fn column(self) -> &'static str {
        match self {
            LeadFilter::Name => "name",
            LeadFilter::Username => "username",
            LeadFilter::Category => "category",
            LeadFilter::Location | LeadFilter::State => "location",
            LeadFilter::Email => "email",
            LeadFilter::Followers => "CAST(followers AS TEXT)",
            LeadFilter::MinFollowers => "followers",
        }
    }
}

/// One `WHERE` clause of a lead search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    /// `column ILIKE pattern`, pattern already wrapped in `%` and escaped.
    Contains {
        column: &'static str,
        pattern: String,
    },
    /// `column ~* pattern`, pattern a case-insensitive whole-word regex.
    MatchesWord {
        column: &'static str,
        pattern: String,
    },
    /// `column >= value`
    AtLeast { column: &'static str, value: i64 },
}

/// A validated lead search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeadQuery {
    conditions: Vec<Condition>,
    limit: i64,
}

impl Default for LeadQuery {
    fn default() -> Self {
        Self {
            conditions: Vec::new(),
            limit: SEARCH_LIMIT,
        }
    }
}

impl LeadQuery {
    /// Validates raw `(name, value)` pairs into a query.
    ///
    /// Unknown names are rejected even when their value is empty. Empty
    /// values are skipped; any other value, whitespace included, is matched
    /// exactly as supplied.
    pub fn from_params<'a, I>(params: I) -> Result<Self, AppError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut query = LeadQuery::default();

        for (name, raw_value) in params {
            let filter = LeadFilter::from_param(name).ok_or_else(|| {
                AppError::BadRequest(format!("Unknown search field '{}'", name))
            })?;

            if raw_value.is_empty() {
                continue;
            }

            let condition = match filter {
                LeadFilter::MinFollowers => {
                    let min = raw_value
                        .trim()
                        .parse::<i64>()
                        .ok()
                        .filter(|n| *n >= 0)
                        .ok_or_else(|| {
                            AppError::BadRequest(format!(
                                "'{}' must be a non-negative integer",
                                filter.param()
                            ))
                        })?;
                    Condition::AtLeast {
                        column: filter.column(),
                        value: min,
                    }
                }
                LeadFilter::State => Condition::MatchesWord {
                    column: filter.column(),
                    pattern: format!("\\y{}\\y", escape_regex(raw_value)),
                },
                _ => Condition::Contains {
                    column: filter.column(),
                    pattern: format!("%{}%", escape_like(raw_value)),
                },
            };

            query.conditions.push(condition);
        }

        Ok(query)
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    pub fn limit(&self) -> i64 {
        self.limit
    }

    pub fn is_unfiltered(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Builds the parameterized statement.
    pub fn to_builder(&self) -> QueryBuilder<'static, Postgres> {
        let mut builder = QueryBuilder::new(LEAD_PROJECTION);

        for (i, condition) in self.conditions.iter().enumerate() {
            builder.push(if i == 0 { " WHERE " } else { " AND " });
            match condition {
                Condition::Contains { column, pattern } => {
                    builder.push(*column);
                    builder.push(" ILIKE ");
                    builder.push_bind(pattern.clone());
                }
                Condition::MatchesWord { column, pattern } => {
                    builder.push(*column);
                    builder.push(" ~* ");
                    builder.push_bind(pattern.clone());
                }
                Condition::AtLeast { column, value } => {
                    builder.push(*column);
                    builder.push(" >= ");
                    builder.push_bind(*value);
                }
            }
        }

        builder.push(" LIMIT ");
        builder.push_bind(self.limit);
        builder
    }
}

/// Escapes `LIKE` metacharacters so the value matches literally.
pub fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Escapes a value for a Postgres regular expression.
///
/// A backslash before a non-alphanumeric character is always a literal, so
/// every ASCII punctuation and space character is prefixed with one.
pub fn escape_regex(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if c.is_ascii() && !c.is_ascii_alphanumeric() {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
