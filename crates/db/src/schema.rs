use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::info;

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    // tstzrange overlap exclusion over a scalar staff_id needs btree_gist
    sqlx::query("CREATE EXTENSION IF NOT EXISTS btree_gist;")
        .execute(pool)
        .await?;

    // Create staff table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS staff (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            display_name VARCHAR(255) NOT NULL,
            active BOOLEAN NOT NULL DEFAULT TRUE,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create services table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS services (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            name VARCHAR(255) NOT NULL,
            description TEXT NULL,
            price_cents BIGINT NOT NULL,
            duration_min INTEGER NOT NULL,
            active BOOLEAN NOT NULL DEFAULT TRUE,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT positive_duration CHECK (duration_min > 0)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create opening_hours table, one row per weekday (0 = Sunday)
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS opening_hours (
            day_of_week SMALLINT PRIMARY KEY,
            open_time TIME NULL,
            close_time TIME NULL,
            is_closed BOOLEAN NOT NULL DEFAULT FALSE,
            CONSTRAINT valid_day CHECK (day_of_week BETWEEN 0 AND 6)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create bookings table. The exclusion constraint is the authoritative
    // overlap check: two non-cancelled bookings for the same staff member
    // can never hold intersecting intervals, no matter what the client's
    // earlier slot computation claimed.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS bookings (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            service_id UUID NOT NULL REFERENCES services(id),
            staff_id UUID NOT NULL REFERENCES staff(id),
            client_name VARCHAR(255) NOT NULL,
            client_email VARCHAR(255) NULL,
            start_time TIMESTAMP WITH TIME ZONE NOT NULL,
            end_time TIMESTAMP WITH TIME ZONE NOT NULL,
            status VARCHAR(32) NOT NULL DEFAULT 'pending',
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT valid_time_range CHECK (end_time > start_time),
            CONSTRAINT no_overlapping_bookings EXCLUDE USING gist (
                staff_id WITH =,
                tstzrange(start_time, end_time) WITH &&
            ) WHERE (status <> 'cancelled')
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create indexes
    for statement in [
        "CREATE INDEX IF NOT EXISTS idx_bookings_staff_id ON bookings(staff_id);",
        "CREATE INDEX IF NOT EXISTS idx_bookings_start_time ON bookings(start_time);",
        "CREATE INDEX IF NOT EXISTS idx_bookings_status ON bookings(status);",
        "CREATE INDEX IF NOT EXISTS idx_services_active ON services(active);",
        "CREATE INDEX IF NOT EXISTS idx_staff_active ON staff(active);",
    ] {
        sqlx::query(statement).execute(pool).await?;
    }

    info!("Database schema initialized successfully.");
    Ok(())
}
