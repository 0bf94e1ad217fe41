use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockall::mock;
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

// Mock repositories for testing
mock! {
    pub AssignmentRepo {}

    #[async_trait]
    impl AssignmentRepository for AssignmentRepo {
        async fn insert_window(&self, window: NewAssignmentWindow) -> eyre::Result<WindowInsert>;

        async fn get_window(&self, id: Uuid) -> eyre::Result<Option<AssignmentWindow>>;

        async fn list_windows(&self) -> eyre::Result<Vec<AssignmentWindow>>;

        async fn windows_overlapping(
            &self,
            start: DateTime<Utc>,
            end: DateTime<Utc>,
        ) -> eyre::Result<Vec<AssignmentWindow>>;

        async fn update_window_person(
            &self,
            id: Uuid,
            person_id: &str,
        ) -> eyre::Result<Option<AssignmentWindow>>;

        async fn delete_window(&self, id: Uuid) -> eyre::Result<bool>;
    }
}

mock! {
    pub ChangeRequestRepo {}

    #[async_trait]
    impl ChangeRequestRepository for ChangeRequestRepo {
        async fn insert_request(&self, request: NewChangeRequest) -> eyre::Result<ChangeRequest>;

        async fn get_request(&self, id: Uuid) -> eyre::Result<Option<ChangeRequest>>;

        async fn delete_request(&self, id: Uuid) -> eyre::Result<bool>;

        async fn list_requests(
            &self,
            person_id: Option<String>,
        ) -> eyre::Result<Vec<ChangeRequest>>;

        async fn resolve_pending(
            &self,
            id: Uuid,
            status: ChangeRequestStatus,
            responded_at: DateTime<Utc>,
        ) -> eyre::Result<Option<ChangeRequest>>;
    }
}

mock! {
    pub NotificationRepo {}

    #[async_trait]
    impl NotificationRepository for NotificationRepo {
        async fn insert_notification(
            &self,
            notification: NewNotification,
        ) -> eyre::Result<Notification>;

        async fn list_for_user(&self, user_id: &str) -> eyre::Result<Vec<Notification>>;

        async fn mark_read(&self, id: Uuid) -> eyre::Result<bool>;

        async fn mark_all_read(&self, user_id: &str) -> eyre::Result<u64>;
    }
}

mock! {
    pub PersonDirectoryRepo {}

    #[async_trait]
    impl PersonDirectory for PersonDirectoryRepo {
        async fn get_users(&self) -> eyre::Result<Vec<Person>>;

        async fn get_user_by_id(&self, id: &str) -> eyre::Result<Option<Person>>;
    }
}

mock! {
    pub CalendarRepo {}

    #[async_trait]
    impl CalendarStore for CalendarRepo {
        async fn add_calendar_event(&self, event: NewCalendarEvent) -> eyre::Result<CalendarEvent>;

        async fn update_calendar_event(
            &self,
            window_id: Uuid,
            person_id: &str,
            title: &str,
        ) -> eyre::Result<Option<CalendarEvent>>;

        async fn remove_calendar_event(&self, window_id: Uuid) -> eyre::Result<bool>;
    }
}
