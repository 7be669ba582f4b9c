use crate::models::DbBooking;
use chrono::{DateTime, Utc};
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

/// Insert a new booking with status `pending`.
///
/// Returns `None` when the `no_overlapping_bookings` exclusion constraint
/// rejects the insert (SQLSTATE 23P01): someone else already holds an
/// intersecting interval for this staff member. The earlier slot
/// computation is advisory only; this is the authoritative check.
pub async fn create_booking(
    pool: &Pool<Postgres>,
    service_id: Uuid,
    staff_id: Uuid,
    client_name: &str,
    client_email: Option<&str>,
    start_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
) -> Result<Option<DbBooking>> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    tracing::debug!(
        "Creating booking: id={}, staff_id={}, start={}, end={}",
        id,
        staff_id,
        start_time,
        end_time
    );

    let result = sqlx::query_as::<_, DbBooking>(
        r#"
        INSERT INTO bookings
            (id, service_id, staff_id, client_name, client_email, start_time, end_time, status, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, 'pending', $8)
        RETURNING id, service_id, staff_id, client_name, client_email, start_time, end_time, status, created_at
        "#,
    )
    .bind(id)
    .bind(service_id)
    .bind(staff_id)
    .bind(client_name)
    .bind(client_email)
    .bind(start_time)
    .bind(end_time)
    .bind(now)
    .fetch_one(pool)
    .await;

    match result {
        Ok(booking) => Ok(Some(booking)),
        Err(sqlx::Error::Database(db_err)) if db_err.code().as_deref() == Some("23P01") => {
            tracing::debug!(
                "Booking insert rejected by overlap constraint: staff_id={}, start={}",
                staff_id,
                start_time
            );
            Ok(None)
        }
        Err(err) => Err(err.into()),
    }
}

/// Non-cancelled bookings for one staff member whose interval intersects
/// `[range_start, range_end)`. Cancelled rows never block a slot, so they
/// are filtered here, before the availability computation ever sees them.
pub async fn get_bookings_for_staff_in_range(
    pool: &Pool<Postgres>,
    staff_id: Uuid,
    range_start: DateTime<Utc>,
    range_end: DateTime<Utc>,
) -> Result<Vec<DbBooking>> {
    let bookings = sqlx::query_as::<_, DbBooking>(
        r#"
        SELECT id, service_id, staff_id, client_name, client_email, start_time, end_time, status, created_at
        FROM bookings
        WHERE staff_id = $1
          AND status <> 'cancelled'
          AND start_time < $3
          AND end_time > $2
        ORDER BY start_time ASC
        "#,
    )
    .bind(staff_id)
    .bind(range_start)
    .bind(range_end)
    .fetch_all(pool)
    .await?;

    Ok(bookings)
}

pub async fn get_booking_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbBooking>> {
    let booking = sqlx::query_as::<_, DbBooking>(
        r#"
        SELECT id, service_id, staff_id, client_name, client_email, start_time, end_time, status, created_at
        FROM bookings
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(booking)
}

pub async fn list_bookings(
    pool: &Pool<Postgres>,
    staff_id: Option<Uuid>,
    day: Option<(DateTime<Utc>, DateTime<Utc>)>,
    status: Option<&str>,
) -> Result<Vec<DbBooking>> {
    let (day_start, day_end) = match day {
        Some((start, end)) => (Some(start), Some(end)),
        None => (None, None),
    };

    let bookings = sqlx::query_as::<_, DbBooking>(
        r#"
        SELECT id, service_id, staff_id, client_name, client_email, start_time, end_time, status, created_at
        FROM bookings
        WHERE ($1::uuid IS NULL OR staff_id = $1)
          AND ($2::timestamptz IS NULL OR (start_time >= $2 AND start_time < $3))
          AND ($4::varchar IS NULL OR status = $4)
        ORDER BY start_time ASC
        "#,
    )
    .bind(staff_id)
    .bind(day_start)
    .bind(day_end)
    .bind(status)
    .fetch_all(pool)
    .await?;

    Ok(bookings)
}

/// Set a booking's status.
///
/// Returns `None` when reviving a cancelled booking would collide with an
/// interval booked in the meantime (the exclusion constraint re-fires on
/// UPDATE just as it does on INSERT). Callers must check existence first.
pub async fn update_booking_status(
    pool: &Pool<Postgres>,
    id: Uuid,
    status: &str,
) -> Result<Option<DbBooking>> {
    tracing::debug!("Updating booking status: id={}, status={}", id, status);

    let result = sqlx::query_as::<_, DbBooking>(
        r#"
        UPDATE bookings
        SET status = $2
        WHERE id = $1
        RETURNING id, service_id, staff_id, client_name, client_email, start_time, end_time, status, created_at
        "#,
    )
    .bind(id)
    .bind(status)
    .fetch_optional(pool)
    .await;

    match result {
        Ok(booking) => Ok(booking),
        Err(sqlx::Error::Database(db_err)) if db_err.code().as_deref() == Some("23P01") => {
            Ok(None)
        }
        Err(err) => Err(err.into()),
    }
}
