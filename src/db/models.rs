use chrono::{DateTime, Utc};
use serde::Serialize;

/// A persisted account row. The hash never leaves the process in responses
/// and is excluded from serialized output.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Account {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}
