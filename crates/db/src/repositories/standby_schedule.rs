use crate::models::DbStandbySchedule;
use chrono::{DateTime, Utc};
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

// Advisory lock keys, one per window kind.
const WEEKLY_LOCK: i64 = 0x5354_414e_4442_0001;
const DAILY_LOCK: i64 = 0x5354_414e_4442_0002;

pub enum CreateWindow {
    Created(DbStandbySchedule),
    Overlaps(DbStandbySchedule),
}

/// Inserts a window unless one of the same kind overlaps `[start_time, end_time)`.
///
/// The check and the insert share a transaction that holds the advisory lock
/// for the window kind, so concurrent inserts of one kind run one at a time.
pub async fn create_window(
    pool: &Pool<Postgres>,
    person_id: &str,
    start_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
    is_full_week: bool,
) -> Result<CreateWindow> {
    let id = Uuid::new_v4();
    let now = Utc::now();
    let lock = if is_full_week { WEEKLY_LOCK } else { DAILY_LOCK };

    tracing::debug!(
        "Creating standby window: id={}, person_id={}, full_week={}",
        id, person_id, is_full_week
    );

    let mut tx = pool.begin().await?;

    sqlx::query("SELECT pg_advisory_xact_lock($1)")
        .bind(lock)
        .execute(&mut *tx)
        .await?;

    let clash = sqlx::query_as::<_, DbStandbySchedule>(
        r#"
        SELECT id, person_id, start_time, end_time, is_full_week, created_at
        FROM standby_schedules
        WHERE is_full_week = $3 AND start_time < $2 AND end_time > $1
        ORDER BY start_time ASC, created_at ASC
        LIMIT 1
        "#,
    )
    .bind(start_time)
    .bind(end_time)
    .bind(is_full_week)
    .fetch_optional(&mut *tx)
    .await?;

    if let Some(existing) = clash {
        tx.rollback().await?;
        return Ok(CreateWindow::Overlaps(existing));
    }

    let window = sqlx::query_as::<_, DbStandbySchedule>(
        r#"
        INSERT INTO standby_schedules
            (id, person_id, start_time, end_time, is_full_week, created_at)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id, person_id, start_time, end_time, is_full_week, created_at
        "#,
    )
    .bind(id)
    .bind(person_id)
    .bind(start_time)
    .bind(end_time)
    .bind(is_full_week)
    .bind(now)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok(CreateWindow::Created(window))
}

pub async fn get_window_by_id(
    pool: &Pool<Postgres>,
    id: Uuid,
) -> Result<Option<DbStandbySchedule>> {
    let window = sqlx::query_as::<_, DbStandbySchedule>(
        r#"
        SELECT id, person_id, start_time, end_time, is_full_week, created_at
        FROM standby_schedules
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(window)
}

pub async fn get_all_windows(pool: &Pool<Postgres>) -> Result<Vec<DbStandbySchedule>> {
    let windows = sqlx::query_as::<_, DbStandbySchedule>(
        r#"
        SELECT id, person_id, start_time, end_time, is_full_week, created_at
        FROM standby_schedules
        ORDER BY start_time ASC, created_at ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(windows)
}

pub async fn get_windows_overlapping(
    pool: &Pool<Postgres>,
    start_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
) -> Result<Vec<DbStandbySchedule>> {
    let windows = sqlx::query_as::<_, DbStandbySchedule>(
        r#"
        SELECT id, person_id, start_time, end_time, is_full_week, created_at
        FROM standby_schedules
        WHERE start_time < $2 AND end_time > $1
        ORDER BY start_time ASC, created_at ASC
        "#,
    )
    .bind(start_time)
    .bind(end_time)
    .fetch_all(pool)
    .await?;

    Ok(windows)
}

pub async fn update_window_person(
    pool: &Pool<Postgres>,
    id: Uuid,
    person_id: &str,
) -> Result<Option<DbStandbySchedule>> {
    let window = sqlx::query_as::<_, DbStandbySchedule>(
        r#"
        UPDATE standby_schedules
        SET person_id = $2
        WHERE id = $1
        RETURNING id, person_id, start_time, end_time, is_full_week, created_at
        "#,
    )
    .bind(id)
    .bind(person_id)
    .fetch_optional(pool)
    .await?;

    Ok(window)
}

pub async fn delete_window(pool: &Pool<Postgres>, id: Uuid) -> Result<bool> {
    let result = sqlx::query(
        r#"
        DELETE FROM standby_schedules
        WHERE id = $1
        "#,
    )
    .bind(id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}
