use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeRequestStatus {
    Pending,
    Approved,
    Rejected,
}

impl ChangeRequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeRequestStatus::Pending => "pending",
            ChangeRequestStatus::Approved => "approved",
            ChangeRequestStatus::Rejected => "rejected",
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, ChangeRequestStatus::Pending)
    }
}

impl fmt::Display for ChangeRequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChangeRequestStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ChangeRequestStatus::Pending),
            "approved" => Ok(ChangeRequestStatus::Approved),
            "rejected" => Ok(ChangeRequestStatus::Rejected),
            other => Err(format!("unknown change request status '{}'", other)),
        }
    }
}

/// A proposal for `requested_person_id` to take over part of
/// `requester_id`'s standby.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeRequest {
    pub id: Uuid,
    pub requester_id: String,
    pub requested_person_id: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub status: ChangeRequestStatus,
    pub created_at: DateTime<Utc>,
    pub responded_at: Option<DateTime<Utc>>,
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewChangeRequest {
    pub requester_id: String,
    pub requested_person_id: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateChangeRequest {
    pub requester_id: String,
    pub requested_person_id: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RespondChangeRequest {
    pub approved: bool,
}
