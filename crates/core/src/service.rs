//! # Standby Service
//!
//! Orchestrates the rotation: building windows from dates, answering "who is on
//! call", and running change requests through their lifecycle.
//!
//! ## Change requests
//!
//! ```text
//! pending ──approve──▶ approved ──apply──▶ override window inserted
//!    │
//!    └────reject────▶ rejected
//! ```
//!
//! Approving a request does not touch the roster. Somebody has to call
//! [`StandbyService::apply_change_request`] explicitly, which inserts a daily
//! override for the substitute over the requested span.

use std::sync::Arc;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::{
    errors::{StandbyError, StandbyResult},
    export::{self, ExportRow},
    memory::MemoryStore,
    models::{
        assignment::{AssignmentWindow, NewAssignmentWindow, WindowInsert},
        calendar::NewCalendarEvent,
        change_request::{ChangeRequest, ChangeRequestStatus, CreateChangeRequest, NewChangeRequest},
        notification::{NewNotification, Notification, NotificationKind},
        person::Person,
    },
    repository::{
        AssignmentRepository, CalendarStore, ChangeRequestRepository, NotificationRepository,
        PersonDirectory,
    },
    resolver,
    rotation::RotationPolicy,
};

#[derive(Clone)]
pub struct StandbyService {
    assignments: Arc<dyn AssignmentRepository>,
    requests: Arc<dyn ChangeRequestRepository>,
    notifications: Arc<dyn NotificationRepository>,
    directory: Arc<dyn PersonDirectory>,
    calendar: Arc<dyn CalendarStore>,
    policy: RotationPolicy,
}

impl StandbyService {
    pub fn new(
        assignments: Arc<dyn AssignmentRepository>,
        requests: Arc<dyn ChangeRequestRepository>,
        notifications: Arc<dyn NotificationRepository>,
        directory: Arc<dyn PersonDirectory>,
        calendar: Arc<dyn CalendarStore>,
        policy: RotationPolicy,
    ) -> Self {
        Self {
            assignments,
            requests,
            notifications,
            directory,
            calendar,
            policy,
        }
    }

    /// Service with every seam backed by the same in-memory store.
    pub fn in_memory(store: Arc<MemoryStore>, policy: RotationPolicy) -> Self {
        Self::new(
            store.clone(),
            store.clone(),
            store.clone(),
            store.clone(),
            store,
            policy,
        )
    }

    pub fn policy(&self) -> &RotationPolicy {
        &self.policy
    }

    pub async fn persons(&self) -> StandbyResult<Vec<Person>> {
        Ok(self.directory.get_users().await?)
    }

    pub async fn person(&self, id: &str) -> StandbyResult<Option<Person>> {
        Ok(self.directory.get_user_by_id(id).await?)
    }

    async fn require_person(&self, id: &str) -> StandbyResult<Person> {
        self.person(id)
            .await?
            .ok_or_else(|| StandbyError::NotFound(format!("Person with ID {} not found", id)))
    }

    /// Puts `person_id` on call for the rotation week containing `any_date_in_week`.
    pub async fn create_weekly_assignment(
        &self,
        person_id: &str,
        any_date_in_week: NaiveDate,
    ) -> StandbyResult<AssignmentWindow> {
        let (start, end) = self.policy.weekly_bounds(any_date_in_week)?;
        self.insert_window(NewAssignmentWindow {
            person_id: person_id.to_string(),
            start,
            end,
            is_full_week: true,
        })
        .await
    }

    /// Overrides the weekly rotation for the night starting on `date`.
    pub async fn create_daily_assignment(
        &self,
        person_id: &str,
        date: NaiveDate,
    ) -> StandbyResult<AssignmentWindow> {
        let (start, end) = self.policy.daily_bounds(date)?;
        self.insert_window(NewAssignmentWindow {
            person_id: person_id.to_string(),
            start,
            end,
            is_full_week: false,
        })
        .await
    }

    async fn insert_window(&self, new: NewAssignmentWindow) -> StandbyResult<AssignmentWindow> {
        if new.start >= new.end {
            return Err(StandbyError::Validation(format!(
                "window start {} must be before end {}",
                new.start, new.end
            )));
        }
        let person = self.require_person(&new.person_id).await?;

        let window = match self.assignments.insert_window(new).await? {
            WindowInsert::Created(window) => window,
            WindowInsert::Overlaps(existing) => {
                return Err(StandbyError::Conflict(format!(
                    "overlaps {} window {} held by {} ({} to {})",
                    if existing.is_full_week { "weekly" } else { "daily" },
                    existing.id,
                    existing.person_id,
                    existing.start,
                    existing.end
                )));
            }
        };

        let mirrored = self
            .calendar
            .add_calendar_event(NewCalendarEvent {
                window_id: window.id,
                person_id: window.person_id.clone(),
                title: event_title(&person),
                start: window.start,
                end: window.end,
            })
            .await;
        if let Err(err) = mirrored {
            // Every stored window has a calendar entry.
            if let Err(cleanup) = self.assignments.delete_window(window.id).await {
                warn!(window_id = %window.id, "Failed to remove unmirrored window: {}", cleanup);
            }
            return Err(err.into());
        }

        info!(
            window_id = %window.id,
            person_id = %window.person_id,
            full_week = window.is_full_week,
            "standby window created"
        );
        Ok(window)
    }

    /// Hands an existing window to someone else. `None` if the window is unknown.
    pub async fn reassign_window(
        &self,
        id: Uuid,
        person_id: &str,
    ) -> StandbyResult<Option<AssignmentWindow>> {
        let person = self.require_person(person_id).await?;
        let Some(window) = self.assignments.update_window_person(id, person_id).await? else {
            debug!("Window not found for reassignment: id={}", id);
            return Ok(None);
        };

        self.calendar
            .update_calendar_event(window.id, person_id, &event_title(&person))
            .await?;
        info!(window_id = %id, person_id, "standby window reassigned");
        Ok(Some(window))
    }

    pub async fn remove_window(&self, id: Uuid) -> StandbyResult<bool> {
        let removed = self.assignments.delete_window(id).await?;
        if removed {
            self.calendar.remove_calendar_event(id).await?;
            info!(window_id = %id, "standby window removed");
        }
        Ok(removed)
    }

    /// All windows, or only those intersecting `[from, to)`, in start order.
    pub async fn list_windows(
        &self,
        range: Option<(DateTime<Utc>, DateTime<Utc>)>,
    ) -> StandbyResult<Vec<AssignmentWindow>> {
        let windows = match range {
            Some((from, to)) => self.assignments.windows_overlapping(from, to).await?,
            None => self.assignments.list_windows().await?,
        };
        Ok(windows)
    }

    pub async fn window(&self, id: Uuid) -> StandbyResult<Option<AssignmentWindow>> {
        Ok(self.assignments.get_window(id).await?)
    }

    pub async fn resolve_window(
        &self,
        at: DateTime<Utc>,
    ) -> StandbyResult<Option<AssignmentWindow>> {
        let until = at.checked_add_signed(Duration::microseconds(1)).ok_or_else(|| {
            StandbyError::Validation(format!("{} is outside the supported range", at))
        })?;
        let candidates = self.assignments.windows_overlapping(at, until).await?;
        Ok(resolver::resolve_window(&candidates, at).cloned())
    }

    /// Who is on call at `at`, or `None` when nobody is.
    pub async fn resolve(&self, at: DateTime<Utc>) -> StandbyResult<Option<Person>> {
        match self.resolve_window(at).await? {
            Some(window) => self.person(&window.person_id).await,
            None => Ok(None),
        }
    }

    pub async fn upcoming(
        &self,
        at: DateTime<Utc>,
        count: usize,
    ) -> StandbyResult<Vec<AssignmentWindow>> {
        let windows = self.assignments.list_windows().await?;
        Ok(resolver::upcoming(&windows, at, count))
    }

    /// Hours `person_id` is effectively on call in `[from, to)`.
    pub async fn on_call_hours(
        &self,
        person_id: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> StandbyResult<f64> {
        if from >= to {
            return Err(StandbyError::Validation("'from' must be before 'to'".to_string()));
        }
        let windows = self.assignments.windows_overlapping(from, to).await?;
        let total = resolver::on_call_duration(&windows, person_id, from, to);
        Ok(total.num_seconds() as f64 / 3600.0)
    }

    /// Asks `requested_person_id` to cover part of the requester's standby.
    ///
    /// The requested person is notified. The roster is left untouched.
    pub async fn request_standby_change(
        &self,
        payload: CreateChangeRequest,
    ) -> StandbyResult<ChangeRequest> {
        if payload.start >= payload.end {
            return Err(StandbyError::Validation(
                "change request start must be before end".to_string(),
            ));
        }
        if payload.requester_id == payload.requested_person_id {
            return Err(StandbyError::Validation(
                "cannot request a change with yourself".to_string(),
            ));
        }
        let requester = self.require_person(&payload.requester_id).await?;
        self.require_person(&payload.requested_person_id).await?;

        let request = self
            .requests
            .insert_request(NewChangeRequest {
                requester_id: payload.requester_id,
                requested_person_id: payload.requested_person_id,
                start: payload.start,
                end: payload.end,
                message: payload.message,
            })
            .await?;

        let tz = self.policy.timezone;
        let notified = self
            .notifications
            .insert_notification(NewNotification {
                user_id: request.requested_person_id.clone(),
                title: "Standby change request".to_string(),
                message: format!(
                    "{} asks you to cover standby from {} to {}",
                    requester.name,
                    export::format_date(request.start, tz),
                    export::format_date(request.end, tz)
                ),
                kind: NotificationKind::ChangeRequest,
                related_request_id: Some(request.id),
            })
            .await;
        if let Err(err) = notified {
            if let Err(cleanup) = self.requests.delete_request(request.id).await {
                warn!(
                    request_id = %request.id,
                    "Failed to remove unannounced request: {}", cleanup
                );
            }
            return Err(err.into());
        }

        info!(
            request_id = %request.id,
            requester = %request.requester_id,
            requested = %request.requested_person_id,
            "change request created"
        );
        Ok(request)
    }

    /// Approves or rejects a pending request and tells the requester.
    ///
    /// Unknown ids yield `Ok(None)` and change nothing. A request that was
    /// already decided is a conflict.
    pub async fn respond_to_change_request(
        &self,
        id: Uuid,
        approved: bool,
    ) -> StandbyResult<Option<ChangeRequest>> {
        let Some(existing) = self.requests.get_request(id).await? else {
            debug!("Change request not found: id={}", id);
            return Ok(None);
        };
        if existing.status.is_terminal() {
            return Err(StandbyError::Conflict(format!(
                "change request {} is already {}",
                id, existing.status
            )));
        }

        let status = if approved {
            ChangeRequestStatus::Approved
        } else {
            ChangeRequestStatus::Rejected
        };
        let request = self
            .requests
            .resolve_pending(id, status, Utc::now())
            .await?
            .ok_or_else(|| {
                StandbyError::Conflict(format!("change request {} was decided concurrently", id))
            })?;

        let responder = self
            .person(&request.requested_person_id)
            .await?
            .map_or_else(|| request.requested_person_id.clone(), |p| p.name);
        let (title, verb, kind) = if approved {
            ("Change request approved", "accepted", NotificationKind::ChangeRequestApproved)
        } else {
            ("Change request rejected", "declined", NotificationKind::ChangeRequestRejected)
        };
        self.notifications
            .insert_notification(NewNotification {
                user_id: request.requester_id.clone(),
                title: title.to_string(),
                message: format!("{} {} your standby change request", responder, verb),
                kind,
                related_request_id: Some(request.id),
            })
            .await?;

        info!(request_id = %id, status = %request.status, "change request answered");
        Ok(Some(request))
    }

    /// Writes an approved request into the roster as an override window.
    pub async fn apply_change_request(&self, id: Uuid) -> StandbyResult<Option<AssignmentWindow>> {
        let Some(request) = self.requests.get_request(id).await? else {
            return Ok(None);
        };
        if request.status != ChangeRequestStatus::Approved {
            return Err(StandbyError::Conflict(format!(
                "change request {} is {}, only approved requests can be applied",
                id, request.status
            )));
        }

        let window = self
            .insert_window(NewAssignmentWindow {
                person_id: request.requested_person_id,
                start: request.start,
                end: request.end,
                is_full_week: false,
            })
            .await?;
        Ok(Some(window))
    }

    pub async fn change_requests(
        &self,
        person_id: Option<&str>,
    ) -> StandbyResult<Vec<ChangeRequest>> {
        Ok(self.requests.list_requests(person_id.map(str::to_string)).await?)
    }

    pub async fn change_request(&self, id: Uuid) -> StandbyResult<Option<ChangeRequest>> {
        Ok(self.requests.get_request(id).await?)
    }

    pub async fn notifications_for(&self, user_id: &str) -> StandbyResult<Vec<Notification>> {
        Ok(self.notifications.list_for_user(user_id).await?)
    }

    pub async fn unread_count(&self, user_id: &str) -> StandbyResult<usize> {
        let notifications = self.notifications.list_for_user(user_id).await?;
        Ok(notifications.iter().filter(|n| !n.is_read).count())
    }

    pub async fn mark_notification_read(&self, id: Uuid) -> StandbyResult<bool> {
        Ok(self.notifications.mark_read(id).await?)
    }

    pub async fn mark_all_read(&self, user_id: &str) -> StandbyResult<u64> {
        Ok(self.notifications.mark_all_read(user_id).await?)
    }

    pub async fn export_rows(&self) -> StandbyResult<Vec<ExportRow>> {
        let windows = self.assignments.list_windows().await?;
        let persons = self.directory.get_users().await?;
        Ok(export::rows(&windows, &persons))
    }

    pub async fn export_csv(&self) -> StandbyResult<String> {
        let rows = self.export_rows().await?;
        Ok(export::to_csv(&rows, self.policy.timezone))
    }

    pub async fn export_html(&self) -> StandbyResult<String> {
        let rows = self.export_rows().await?;
        Ok(export::to_html(&rows, self.policy.timezone, Utc::now()))
    }
}

fn event_title(person: &Person) -> String {
    format!("Garde: {}", person.name)
}
