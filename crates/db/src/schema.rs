use eyre::Result;
use sqlx::{Executor, Pool, Postgres};
use tracing::info;

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    // Create persons table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS persons (
            id VARCHAR(64) PRIMARY KEY,
            name VARCHAR(255) NOT NULL,
            initials VARCHAR(8) NOT NULL,
            avatar TEXT NULL,
            phone VARCHAR(64) NOT NULL,
            email VARCHAR(255) NOT NULL,
            color VARCHAR(32) NOT NULL
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create standby_schedules table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS standby_schedules (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            person_id VARCHAR(64) NOT NULL REFERENCES persons(id),
            start_time TIMESTAMP WITH TIME ZONE NOT NULL,
            end_time TIMESTAMP WITH TIME ZONE NOT NULL,
            is_full_week BOOLEAN NOT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT valid_time_range CHECK (end_time > start_time)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create standby_exchange_requests table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS standby_exchange_requests (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            requester_id VARCHAR(64) NOT NULL REFERENCES persons(id),
            requested_person_id VARCHAR(64) NOT NULL REFERENCES persons(id),
            start_time TIMESTAMP WITH TIME ZONE NOT NULL,
            end_time TIMESTAMP WITH TIME ZONE NOT NULL,
            status VARCHAR(16) NOT NULL DEFAULT 'pending',
            message TEXT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            responded_at TIMESTAMP WITH TIME ZONE NULL,
            CONSTRAINT valid_request_range CHECK (end_time > start_time),
            CONSTRAINT valid_status CHECK (status IN ('pending', 'approved', 'rejected'))
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create notifications table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS notifications (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            user_id VARCHAR(64) NOT NULL REFERENCES persons(id),
            title VARCHAR(255) NOT NULL,
            message TEXT NOT NULL,
            is_read BOOLEAN NOT NULL DEFAULT FALSE,
            kind VARCHAR(64) NOT NULL,
            related_request_id UUID NULL REFERENCES standby_exchange_requests(id),
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create calendar_events table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS calendar_events (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            window_id UUID NOT NULL UNIQUE,
            person_id VARCHAR(64) NOT NULL REFERENCES persons(id),
            title VARCHAR(255) NOT NULL,
            start_time TIMESTAMP WITH TIME ZONE NOT NULL,
            end_time TIMESTAMP WITH TIME ZONE NOT NULL
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create indexes; several statements, so this goes through the simple query protocol
    pool.execute(
        r#"
        CREATE INDEX IF NOT EXISTS idx_standby_schedules_start_time
            ON standby_schedules(start_time);
        CREATE INDEX IF NOT EXISTS idx_standby_schedules_end_time ON standby_schedules(end_time);
        CREATE INDEX IF NOT EXISTS idx_standby_schedules_person_id ON standby_schedules(person_id);
        CREATE INDEX IF NOT EXISTS idx_exchange_requests_requester
            ON standby_exchange_requests(requester_id);
        CREATE INDEX IF NOT EXISTS idx_exchange_requests_requested
            ON standby_exchange_requests(requested_person_id);
        CREATE INDEX IF NOT EXISTS idx_notifications_user_id ON notifications(user_id);
        "#,
    )
    .await?;

    info!("Database schema initialized successfully.");
    Ok(())
}
