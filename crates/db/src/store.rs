//! PostgreSQL-backed implementation of the `standby-core` repository traits.
//!
//! Each trait method delegates to the matching function in
//! [`crate::repositories`] and converts rows into domain models.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use eyre::Result;
use standby_core::{
    models::{
        assignment::{AssignmentWindow, NewAssignmentWindow, WindowInsert},
        calendar::{CalendarEvent, NewCalendarEvent},
        change_request::{ChangeRequest, ChangeRequestStatus, NewChangeRequest},
        notification::{NewNotification, Notification},
        person::Person,
    },
    repository::{
        AssignmentRepository, CalendarStore, ChangeRequestRepository, NotificationRepository,
        PersonDirectory,
    },
};
use uuid::Uuid;

use crate::{
    DbPool,
    repositories::{
        calendar, exchange_request, notification, person,
        standby_schedule::{self, CreateWindow},
    },
};

#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

#[async_trait]
impl AssignmentRepository for PgStore {
    async fn insert_window(&self, window: NewAssignmentWindow) -> Result<WindowInsert> {
        let outcome = standby_schedule::create_window(
            &self.pool,
            &window.person_id,
            window.start,
            window.end,
            window.is_full_week,
        )
        .await?;
        Ok(match outcome {
            CreateWindow::Created(row) => WindowInsert::Created(row.into()),
            CreateWindow::Overlaps(row) => WindowInsert::Overlaps(row.into()),
        })
    }

    async fn get_window(&self, id: Uuid) -> Result<Option<AssignmentWindow>> {
        Ok(standby_schedule::get_window_by_id(&self.pool, id).await?.map(Into::into))
    }

    async fn list_windows(&self) -> Result<Vec<AssignmentWindow>> {
        let rows = standby_schedule::get_all_windows(&self.pool).await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn windows_overlapping(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<AssignmentWindow>> {
        let rows = standby_schedule::get_windows_overlapping(&self.pool, start, end).await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn update_window_person(
        &self,
        id: Uuid,
        person_id: &str,
    ) -> Result<Option<AssignmentWindow>> {
        let row = standby_schedule::update_window_person(&self.pool, id, person_id).await?;
        Ok(row.map(Into::into))
    }

    async fn delete_window(&self, id: Uuid) -> Result<bool> {
        standby_schedule::delete_window(&self.pool, id).await
    }
}

#[async_trait]
impl ChangeRequestRepository for PgStore {
    async fn insert_request(&self, request: NewChangeRequest) -> Result<ChangeRequest> {
        let row = exchange_request::create_request(
            &self.pool,
            &request.requester_id,
            &request.requested_person_id,
            request.start,
            request.end,
            request.message.as_deref(),
        )
        .await?;
        row.try_into()
    }

    async fn get_request(&self, id: Uuid) -> Result<Option<ChangeRequest>> {
        exchange_request::get_request_by_id(&self.pool, id)
            .await?
            .map(TryInto::try_into)
            .transpose()
    }

    async fn delete_request(&self, id: Uuid) -> Result<bool> {
        exchange_request::delete_request(&self.pool, id).await
    }

    async fn list_requests(&self, person_id: Option<String>) -> Result<Vec<ChangeRequest>> {
        exchange_request::get_requests(&self.pool, person_id.as_deref())
            .await?
            .into_iter()
            .map(TryInto::try_into)
            .collect()
    }

    async fn resolve_pending(
        &self,
        id: Uuid,
        status: ChangeRequestStatus,
        responded_at: DateTime<Utc>,
    ) -> Result<Option<ChangeRequest>> {
        exchange_request::resolve_pending_request(&self.pool, id, status.as_str(), responded_at)
            .await?
            .map(TryInto::try_into)
            .transpose()
    }
}

#[async_trait]
impl NotificationRepository for PgStore {
    async fn insert_notification(&self, new: NewNotification) -> Result<Notification> {
        let row = notification::create_notification(
            &self.pool,
            &new.user_id,
            &new.title,
            &new.message,
            new.kind.as_str(),
            new.related_request_id,
        )
        .await?;
        row.try_into()
    }

    async fn list_for_user(&self, user_id: &str) -> Result<Vec<Notification>> {
        notification::get_notifications_by_user(&self.pool, user_id)
            .await?
            .into_iter()
            .map(TryInto::try_into)
            .collect()
    }

    async fn mark_read(&self, id: Uuid) -> Result<bool> {
        notification::mark_read(&self.pool, id).await
    }

    async fn mark_all_read(&self, user_id: &str) -> Result<u64> {
        notification::mark_all_read(&self.pool, user_id).await
    }
}

#[async_trait]
impl PersonDirectory for PgStore {
    async fn get_users(&self) -> Result<Vec<Person>> {
        let rows = person::get_persons(&self.pool).await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn get_user_by_id(&self, id: &str) -> Result<Option<Person>> {
        Ok(person::get_person_by_id(&self.pool, id).await?.map(Into::into))
    }
}

#[async_trait]
impl CalendarStore for PgStore {
    async fn add_calendar_event(&self, event: NewCalendarEvent) -> Result<CalendarEvent> {
        let row = calendar::create_event(
            &self.pool,
            event.window_id,
            &event.person_id,
            &event.title,
            event.start,
            event.end,
        )
        .await?;
        Ok(row.into())
    }

    async fn update_calendar_event(
        &self,
        window_id: Uuid,
        person_id: &str,
        title: &str,
    ) -> Result<Option<CalendarEvent>> {
        let row = calendar::update_event_by_window(&self.pool, window_id, person_id, title).await?;
        Ok(row.map(Into::into))
    }

    async fn remove_calendar_event(&self, window_id: Uuid) -> Result<bool> {
        calendar::delete_event_by_window(&self.pool, window_id).await
    }
}
