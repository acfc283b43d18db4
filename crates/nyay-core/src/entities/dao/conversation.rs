use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A row in the `conversations` table.
#[derive(Debug, Clone, PartialEq)]
pub struct Conversation {
    pub id: String,
    /// Owner, always trimmed and lower-cased.
    pub user_email: String,
    pub start_time: DateTime<Utc>,
    /// Never earlier than `start_time` or the newest message.
    pub last_updated: DateTime<Utc>,
    pub topic: Option<String>,
}

impl Conversation {
    /// A fresh conversation owned by `user_email`, started at `now`.
    pub fn start(user_email: &str, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_email: normalize_email(user_email),
            start_time: now,
            last_updated: now,
            topic: None,
        }
    }
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
