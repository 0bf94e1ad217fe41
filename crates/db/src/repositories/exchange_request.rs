use crate::models::DbExchangeRequest;
use chrono::{DateTime, Utc};
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn create_request(
    pool: &Pool<Postgres>,
    requester_id: &str,
    requested_person_id: &str,
    start_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
    message: Option<&str>,
) -> Result<DbExchangeRequest> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    tracing::debug!(
        "Creating exchange request: id={}, requester={}, requested={}",
        id, requester_id, requested_person_id
    );

    let request = sqlx::query_as::<_, DbExchangeRequest>(
        r#"
        INSERT INTO standby_exchange_requests
            (id, requester_id, requested_person_id, start_time, end_time, status, message,
             created_at)
        VALUES ($1, $2, $3, $4, $5, 'pending', $6, $7)
        RETURNING id, requester_id, requested_person_id, start_time, end_time,
                  status, message, created_at, responded_at
        "#,
    )
    .bind(id)
    .bind(requester_id)
    .bind(requested_person_id)
    .bind(start_time)
    .bind(end_time)
    .bind(message)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(request)
}

pub async fn get_request_by_id(
    pool: &Pool<Postgres>,
    id: Uuid,
) -> Result<Option<DbExchangeRequest>> {
    let request = sqlx::query_as::<_, DbExchangeRequest>(
        r#"
        SELECT id, requester_id, requested_person_id, start_time, end_time,
               status, message, created_at, responded_at
        FROM standby_exchange_requests
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(request)
}

pub async fn get_requests(
    pool: &Pool<Postgres>,
    person_id: Option<&str>,
) -> Result<Vec<DbExchangeRequest>> {
    let requests = sqlx::query_as::<_, DbExchangeRequest>(
        r#"
        SELECT id, requester_id, requested_person_id, start_time, end_time,
               status, message, created_at, responded_at
        FROM standby_exchange_requests
        WHERE $1::VARCHAR IS NULL OR requester_id = $1 OR requested_person_id = $1
        ORDER BY created_at DESC
        "#,
    )
    .bind(person_id)
    .fetch_all(pool)
    .await?;

    Ok(requests)
}

/// Only rows still `pending` are touched, so two concurrent answers cannot both win.
pub async fn resolve_pending_request(
    pool: &Pool<Postgres>,
    id: Uuid,
    status: &str,
    responded_at: DateTime<Utc>,
) -> Result<Option<DbExchangeRequest>> {
    let request = sqlx::query_as::<_, DbExchangeRequest>(
        r#"
        UPDATE standby_exchange_requests
        SET status = $2, responded_at = $3
        WHERE id = $1 AND status = 'pending'
        RETURNING id, requester_id, requested_person_id, start_time, end_time,
                  status, message, created_at, responded_at
        "#,
    )
    .bind(id)
    .bind(status)
    .bind(responded_at)
    .fetch_optional(pool)
    .await?;

    Ok(request)
}

pub async fn delete_request(pool: &Pool<Postgres>, id: Uuid) -> Result<bool> {
    let result = sqlx::query(
        r#"
        DELETE FROM standby_exchange_requests
        WHERE id = $1
        "#,
    )
    .bind(id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}
