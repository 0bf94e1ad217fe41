//! # Repository Traits
//!
//! Storage seams used by [`crate::service::StandbyService`]. The service never
//! reaches into a concrete store; it holds `Arc<dyn ...>` handles so the same
//! workflow runs against PostgreSQL in production and the in-memory store in
//! tests and demos.
//!
//! Implementations report failures as `eyre::Report`, which the service lifts
//! into `StandbyError::Database`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use eyre::Result;
use uuid::Uuid;

use crate::models::{
    assignment::{AssignmentWindow, NewAssignmentWindow, WindowInsert},
    calendar::{CalendarEvent, NewCalendarEvent},
    change_request::{ChangeRequest, ChangeRequestStatus, NewChangeRequest},
    notification::{NewNotification, Notification},
    person::Person,
};

#[async_trait]
pub trait AssignmentRepository: Send + Sync {
    /// Inserts `window` unless a window of the same kind overlaps it.
    ///
    /// The overlap check and the write happen as one step, so two concurrent
    /// inserts for the same span cannot both succeed.
    async fn insert_window(&self, window: NewAssignmentWindow) -> Result<WindowInsert>;

    async fn get_window(&self, id: Uuid) -> Result<Option<AssignmentWindow>>;

    /// Every window, ordered by start then creation time.
    async fn list_windows(&self) -> Result<Vec<AssignmentWindow>>;

    /// Windows intersecting `[start, end)`, ordered by start then creation time.
    async fn windows_overlapping(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<AssignmentWindow>>;

    async fn update_window_person(
        &self,
        id: Uuid,
        person_id: &str,
    ) -> Result<Option<AssignmentWindow>>;

    /// Returns `false` when no window had that id.
    async fn delete_window(&self, id: Uuid) -> Result<bool>;
}

#[async_trait]
pub trait ChangeRequestRepository: Send + Sync {
    async fn insert_request(&self, request: NewChangeRequest) -> Result<ChangeRequest>;

    async fn get_request(&self, id: Uuid) -> Result<Option<ChangeRequest>>;

    async fn delete_request(&self, id: Uuid) -> Result<bool>;

    /// Requests where `person_id` is either side, newest first. `None` lists all.
    async fn list_requests(&self, person_id: Option<String>) -> Result<Vec<ChangeRequest>>;

    /// Moves a pending request to `status`.
    ///
    /// Returns `None` if the request does not exist or is no longer pending.
    async fn resolve_pending(
        &self,
        id: Uuid,
        status: ChangeRequestStatus,
        responded_at: DateTime<Utc>,
    ) -> Result<Option<ChangeRequest>>;
}

#[async_trait]
pub trait NotificationRepository: Send + Sync {
    async fn insert_notification(&self, notification: NewNotification) -> Result<Notification>;

    /// Newest first.
    async fn list_for_user(&self, user_id: &str) -> Result<Vec<Notification>>;

    async fn mark_read(&self, id: Uuid) -> Result<bool>;

    async fn mark_all_read(&self, user_id: &str) -> Result<u64>;
}

#[async_trait]
pub trait PersonDirectory: Send + Sync {
    async fn get_users(&self) -> Result<Vec<Person>>;

    async fn get_user_by_id(&self, id: &str) -> Result<Option<Person>>;
}

/// Shared calendar that mirrors the standby roster.
#[async_trait]
pub trait CalendarStore: Send + Sync {
    async fn add_calendar_event(&self, event: NewCalendarEvent) -> Result<CalendarEvent>;

    async fn update_calendar_event(
        &self,
        window_id: Uuid,
        person_id: &str,
        title: &str,
    ) -> Result<Option<CalendarEvent>>;

    async fn remove_calendar_event(&self, window_id: Uuid) -> Result<bool>;
}
