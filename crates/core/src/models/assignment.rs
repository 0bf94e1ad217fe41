use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::person::Person;

/// A span of time during which one person is on call.
///
/// Windows are half-open: `start` is covered, `end` is not.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignmentWindow {
    pub id: Uuid,
    pub person_id: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// `true` for the regular weekly rotation, `false` for a daily override
    pub is_full_week: bool,
    pub created_at: DateTime<Utc>,
}

impl AssignmentWindow {
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.start <= at && at < self.end
    }

    pub fn overlaps(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        self.start < end && start < self.end
    }

    pub fn kind(&self) -> WindowKind {
        if self.is_full_week {
            WindowKind::Weekly
        } else {
            WindowKind::Daily
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewAssignmentWindow {
    pub person_id: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub is_full_week: bool,
}

/// Result of inserting a window that must not overlap another of its kind.
#[derive(Debug, Clone, PartialEq)]
pub enum WindowInsert {
    Created(AssignmentWindow),
    /// Nothing was written; this existing window is in the way.
    Overlaps(AssignmentWindow),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WindowKind {
    Weekly,
    Daily,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateWindowRequest {
    pub person_id: String,
    /// Any date inside the target week for weekly windows, the exact day for daily ones
    pub date: NaiveDate,
    pub kind: WindowKind,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReassignWindowRequest {
    pub person_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentStandbyResponse {
    pub at: DateTime<Utc>,
    pub person: Option<Person>,
    pub window: Option<AssignmentWindow>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OnCallHoursResponse {
    pub person_id: String,
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
    pub hours: f64,
}
