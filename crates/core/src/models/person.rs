use serde::{Deserialize, Serialize};

/// Contact card for someone who can be put on standby.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub id: String,
    pub name: String,
    pub initials: String,
    pub avatar: Option<String>,
    pub phone: String,
    pub email: String,
    /// Display colour used by calendar views, e.g. `#3b82f6`
    pub color: String,
}
