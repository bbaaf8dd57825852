use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subscriber {
    pub id: i32,
    /// Stored normalized (trimmed, lowercase)
    pub email: String,
    pub subscribed_at: DateTime<Utc>,
    pub active: bool,
}
