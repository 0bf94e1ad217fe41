//! In-process implementation of every repository trait.
//!
//! Each collection sits behind its own `RwLock`; guards are only held for the
//! synchronous body of a call and never across an `.await`.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use eyre::{Result, eyre};
use uuid::Uuid;

use crate::{
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
    resolver::sort_windows,
};

#[derive(Debug, Default)]
pub struct MemoryStore {
    persons: RwLock<Vec<Person>>,
    windows: RwLock<Vec<AssignmentWindow>>,
    requests: RwLock<Vec<ChangeRequest>>,
    notifications: RwLock<Vec<Notification>>,
    events: RwLock<Vec<CalendarEvent>>,
}

fn read<T>(lock: &RwLock<T>) -> Result<RwLockReadGuard<'_, T>> {
    lock.read().map_err(|_| eyre!("memory store lock poisoned"))
}

fn write<T>(lock: &RwLock<T>) -> Result<RwLockWriteGuard<'_, T>> {
    lock.write().map_err(|_| eyre!("memory store lock poisoned"))
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_persons(persons: Vec<Person>) -> Self {
        Self {
            persons: RwLock::new(persons),
            ..Self::default()
        }
    }

    /// Calendar entries currently mirrored, in insertion order.
    pub fn calendar_events(&self) -> Result<Vec<CalendarEvent>> {
        Ok(read(&self.events)?.clone())
    }
}

#[async_trait]
impl AssignmentRepository for MemoryStore {
    async fn insert_window(&self, window: NewAssignmentWindow) -> Result<WindowInsert> {
        let mut windows = write(&self.windows)?;
        let clash = windows
            .iter()
            .filter(|w| w.is_full_week == window.is_full_week)
            .filter(|w| w.overlaps(window.start, window.end))
            .min_by_key(|w| (w.start, w.created_at));
        if let Some(existing) = clash {
            return Ok(WindowInsert::Overlaps(existing.clone()));
        }

        let window = AssignmentWindow {
            id: Uuid::new_v4(),
            person_id: window.person_id,
            start: window.start,
            end: window.end,
            is_full_week: window.is_full_week,
            created_at: Utc::now(),
        };
        windows.push(window.clone());
        Ok(WindowInsert::Created(window))
    }

    async fn get_window(&self, id: Uuid) -> Result<Option<AssignmentWindow>> {
        Ok(read(&self.windows)?.iter().find(|w| w.id == id).cloned())
    }

    async fn list_windows(&self) -> Result<Vec<AssignmentWindow>> {
        let mut windows = read(&self.windows)?.clone();
        sort_windows(&mut windows);
        Ok(windows)
    }

    async fn windows_overlapping(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<AssignmentWindow>> {
        let mut windows: Vec<AssignmentWindow> = read(&self.windows)?
            .iter()
            .filter(|w| w.overlaps(start, end))
            .cloned()
            .collect();
        sort_windows(&mut windows);
        Ok(windows)
    }

    async fn update_window_person(
        &self,
        id: Uuid,
        person_id: &str,
    ) -> Result<Option<AssignmentWindow>> {
        let mut windows = write(&self.windows)?;
        Ok(windows.iter_mut().find(|w| w.id == id).map(|w| {
            w.person_id = person_id.to_string();
            w.clone()
        }))
    }

    async fn delete_window(&self, id: Uuid) -> Result<bool> {
        let mut windows = write(&self.windows)?;
        let before = windows.len();
        windows.retain(|w| w.id != id);
        Ok(windows.len() != before)
    }
}

#[async_trait]
impl ChangeRequestRepository for MemoryStore {
    async fn insert_request(&self, request: NewChangeRequest) -> Result<ChangeRequest> {
        let request = ChangeRequest {
            id: Uuid::new_v4(),
            requester_id: request.requester_id,
            requested_person_id: request.requested_person_id,
            start: request.start,
            end: request.end,
            status: ChangeRequestStatus::Pending,
            created_at: Utc::now(),
            responded_at: None,
            message: request.message,
        };
        write(&self.requests)?.push(request.clone());
        Ok(request)
    }

    async fn get_request(&self, id: Uuid) -> Result<Option<ChangeRequest>> {
        Ok(read(&self.requests)?.iter().find(|r| r.id == id).cloned())
    }

    async fn delete_request(&self, id: Uuid) -> Result<bool> {
        let mut requests = write(&self.requests)?;
        let before = requests.len();
        requests.retain(|r| r.id != id);
        Ok(requests.len() != before)
    }

    async fn list_requests(&self, person_id: Option<String>) -> Result<Vec<ChangeRequest>> {
        let mut requests: Vec<ChangeRequest> = read(&self.requests)?
            .iter()
            .filter(|r| {
                person_id
                    .as_deref()
                    .is_none_or(|p| r.requester_id == p || r.requested_person_id == p)
            })
            .cloned()
            .collect();
        requests.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(requests)
    }

    async fn resolve_pending(
        &self,
        id: Uuid,
        status: ChangeRequestStatus,
        responded_at: DateTime<Utc>,
    ) -> Result<Option<ChangeRequest>> {
        let mut requests = write(&self.requests)?;
        Ok(requests
            .iter_mut()
            .find(|r| r.id == id && r.status == ChangeRequestStatus::Pending)
            .map(|r| {
                r.status = status;
                r.responded_at = Some(responded_at);
                r.clone()
            }))
    }
}

#[async_trait]
impl NotificationRepository for MemoryStore {
    async fn insert_notification(&self, notification: NewNotification) -> Result<Notification> {
        let notification = Notification {
            id: Uuid::new_v4(),
            user_id: notification.user_id,
            title: notification.title,
            message: notification.message,
            is_read: false,
            created_at: Utc::now(),
            kind: notification.kind,
            related_request_id: notification.related_request_id,
        };
        write(&self.notifications)?.push(notification.clone());
        Ok(notification)
    }

    async fn list_for_user(&self, user_id: &str) -> Result<Vec<Notification>> {
        let mut notifications: Vec<Notification> = read(&self.notifications)?
            .iter()
            .filter(|n| n.user_id == user_id)
            .cloned()
            .collect();
        notifications.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(notifications)
    }

    async fn mark_read(&self, id: Uuid) -> Result<bool> {
        let mut notifications = write(&self.notifications)?;
        Ok(notifications
            .iter_mut()
            .find(|n| n.id == id)
            .map(|n| n.is_read = true)
            .is_some())
    }

    async fn mark_all_read(&self, user_id: &str) -> Result<u64> {
        let mut notifications = write(&self.notifications)?;
        let mut updated = 0;
        let unread = notifications
            .iter_mut()
            .filter(|n| n.user_id == user_id && !n.is_read);
        for notification in unread {
            notification.is_read = true;
            updated += 1;
        }
        Ok(updated)
    }
}

#[async_trait]
impl PersonDirectory for MemoryStore {
    async fn get_users(&self) -> Result<Vec<Person>> {
        Ok(read(&self.persons)?.clone())
    }

    async fn get_user_by_id(&self, id: &str) -> Result<Option<Person>> {
        Ok(read(&self.persons)?.iter().find(|p| p.id == id).cloned())
    }
}

#[async_trait]
impl CalendarStore for MemoryStore {
    async fn add_calendar_event(&self, event: NewCalendarEvent) -> Result<CalendarEvent> {
        let event = CalendarEvent {
            id: Uuid::new_v4(),
            window_id: event.window_id,
            person_id: event.person_id,
            title: event.title,
            start: event.start,
            end: event.end,
        };
        write(&self.events)?.push(event.clone());
        Ok(event)
    }

    async fn update_calendar_event(
        &self,
        window_id: Uuid,
        person_id: &str,
        title: &str,
    ) -> Result<Option<CalendarEvent>> {
        let mut events = write(&self.events)?;
        Ok(events.iter_mut().find(|e| e.window_id == window_id).map(|e| {
            e.person_id = person_id.to_string();
            e.title = title.to_string();
            e.clone()
        }))
    }

    async fn remove_calendar_event(&self, window_id: Uuid) -> Result<bool> {
        let mut events = write(&self.events)?;
        let before = events.len();
        events.retain(|e| e.window_id != window_id);
        Ok(events.len() != before)
    }
}
