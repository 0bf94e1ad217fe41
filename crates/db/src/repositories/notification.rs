use crate::models::DbNotification;
use chrono::Utc;
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn create_notification(
    pool: &Pool<Postgres>,
    user_id: &str,
    title: &str,
    message: &str,
    kind: &str,
    related_request_id: Option<Uuid>,
) -> Result<DbNotification> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    let notification = sqlx::query_as::<_, DbNotification>(
        r#"
        INSERT INTO notifications
            (id, user_id, title, message, is_read, kind, related_request_id, created_at)
        VALUES ($1, $2, $3, $4, FALSE, $5, $6, $7)
        RETURNING id, user_id, title, message, is_read, kind, related_request_id, created_at
        "#,
    )
    .bind(id)
    .bind(user_id)
    .bind(title)
    .bind(message)
    .bind(kind)
    .bind(related_request_id)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(notification)
}

pub async fn get_notifications_by_user(
    pool: &Pool<Postgres>,
    user_id: &str,
) -> Result<Vec<DbNotification>> {
    let notifications = sqlx::query_as::<_, DbNotification>(
        r#"
        SELECT id, user_id, title, message, is_read, kind, related_request_id, created_at
        FROM notifications
        WHERE user_id = $1
        ORDER BY created_at DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(notifications)
}

pub async fn mark_read(pool: &Pool<Postgres>, id: Uuid) -> Result<bool> {
    let result = sqlx::query(
        r#"
        UPDATE notifications
        SET is_read = TRUE
        WHERE id = $1
        "#,
    )
    .bind(id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn mark_all_read(pool: &Pool<Postgres>, user_id: &str) -> Result<u64> {
    let result = sqlx::query(
        r#"
        UPDATE notifications
        SET is_read = TRUE
        WHERE user_id = $1 AND is_read = FALSE
        "#,
    )
    .bind(user_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}
