use chrono::{DateTime, Utc};
use eyre::{Report, eyre};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use standby_core::models::{
    assignment::AssignmentWindow,
    calendar::CalendarEvent,
    change_request::ChangeRequest,
    notification::Notification,
    person::Person,
};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbPerson {
    pub id: String,
    pub name: String,
    pub initials: String,
    pub avatar: Option<String>,
    pub phone: String,
    pub email: String,
    pub color: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbStandbySchedule {
    pub id: Uuid,
    pub person_id: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub is_full_week: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbExchangeRequest {
    pub id: Uuid,
    pub requester_id: String,
    pub requested_person_id: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub status: String,
    pub message: Option<String>,
    pub created_at: DateTime<Utc>,
    pub responded_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbNotification {
    pub id: Uuid,
    pub user_id: String,
    pub title: String,
    pub message: String,
    pub is_read: bool,
    pub kind: String,
    pub related_request_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbCalendarEvent {
    pub id: Uuid,
    pub window_id: Uuid,
    pub person_id: String,
    pub title: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

impl From<DbPerson> for Person {
    fn from(row: DbPerson) -> Self {
        Person {
            id: row.id,
            name: row.name,
            initials: row.initials,
            avatar: row.avatar,
            phone: row.phone,
            email: row.email,
            color: row.color,
        }
    }
}

impl From<DbStandbySchedule> for AssignmentWindow {
    fn from(row: DbStandbySchedule) -> Self {
        AssignmentWindow {
            id: row.id,
            person_id: row.person_id,
            start: row.start_time,
            end: row.end_time,
            is_full_week: row.is_full_week,
            created_at: row.created_at,
        }
    }
}

impl TryFrom<DbExchangeRequest> for ChangeRequest {
    type Error = Report;

    fn try_from(row: DbExchangeRequest) -> Result<Self, Self::Error> {
        Ok(ChangeRequest {
            id: row.id,
            requester_id: row.requester_id,
            requested_person_id: row.requested_person_id,
            start: row.start_time,
            end: row.end_time,
            status: row.status.parse().map_err(|e: String| eyre!(e))?,
            created_at: row.created_at,
            responded_at: row.responded_at,
            message: row.message,
        })
    }
}

impl TryFrom<DbNotification> for Notification {
    type Error = Report;

    fn try_from(row: DbNotification) -> Result<Self, Self::Error> {
        Ok(Notification {
            id: row.id,
            user_id: row.user_id,
            title: row.title,
            message: row.message,
            is_read: row.is_read,
            created_at: row.created_at,
            kind: row.kind.parse().map_err(|e: String| eyre!(e))?,
            related_request_id: row.related_request_id,
        })
    }
}

impl From<DbCalendarEvent> for CalendarEvent {
    fn from(row: DbCalendarEvent) -> Self {
        CalendarEvent {
            id: row.id,
            window_id: row.window_id,
            person_id: row.person_id,
            title: row.title,
            start: row.start_time,
            end: row.end_time,
        }
    }
}
