use crate::models::DbCalendarEvent;
use chrono::{DateTime, Utc};
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn create_event(
    pool: &Pool<Postgres>,
    window_id: Uuid,
    person_id: &str,
    title: &str,
    start_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
) -> Result<DbCalendarEvent> {
    let id = Uuid::new_v4();

    let event = sqlx::query_as::<_, DbCalendarEvent>(
        r#"
        INSERT INTO calendar_events (id, window_id, person_id, title, start_time, end_time)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id, window_id, person_id, title, start_time, end_time
        "#,
    )
    .bind(id)
    .bind(window_id)
    .bind(person_id)
    .bind(title)
    .bind(start_time)
    .bind(end_time)
    .fetch_one(pool)
    .await?;

    Ok(event)
}

pub async fn update_event_by_window(
    pool: &Pool<Postgres>,
    window_id: Uuid,
    person_id: &str,
    title: &str,
) -> Result<Option<DbCalendarEvent>> {
    let event = sqlx::query_as::<_, DbCalendarEvent>(
        r#"
        UPDATE calendar_events
        SET person_id = $2, title = $3
        WHERE window_id = $1
        RETURNING id, window_id, person_id, title, start_time, end_time
        "#,
    )
    .bind(window_id)
    .bind(person_id)
    .bind(title)
    .fetch_optional(pool)
    .await?;

    Ok(event)
}

pub async fn delete_event_by_window(pool: &Pool<Postgres>, window_id: Uuid) -> Result<bool> {
    let result = sqlx::query(
        r#"
        DELETE FROM calendar_events
        WHERE window_id = $1
        "#,
    )
    .bind(window_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}
