//! # Availability Handlers
//!
//! This module contains the handler for computing bookable appointment
//! slots. It is the glue around the pure computation in
//! `salonbook_core::availability`: it gathers the three inputs the
//! computation needs and renders its output.
//!
//! ## Request Flow
//!
//! For a given staff member, service, and calendar day:
//!
//! 1. Load the service to obtain its duration in minutes
//! 2. Load the weekday's published opening hours; a closed day (or a day
//!    with no published hours) short-circuits to an empty slot list
//! 3. Load the staff member's non-cancelled bookings intersecting the day
//! 4. Call the slot generator and return its ordered slot list
//!
//! The result is advisory: the authoritative overlap check is re-executed
//! by the database's exclusion constraint when the booking is inserted.

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use salonbook_core::{
    availability::generate_slots,
    errors::BookingError,
    models::opening_hours::OpeningHours,
    models::slot::{AvailabilityResponse, BookedInterval},
};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::{middleware::error_handling::AppError, ApiState};

/// Granularity between candidate slot start times, in minutes.
pub const SLOT_INTERVAL_MINUTES: i64 = 15;

/// Query parameters for the availability endpoint
///
/// # Fields
///
/// * `staff_id` - UUID of the staff member to check
/// * `service_id` - UUID of the requested service (supplies the duration)
/// * `date` - Calendar day to check, "YYYY-MM-DD"
#[derive(Debug, Deserialize)]
pub struct AvailabilityQuery {
    /// Staff member whose booked intervals constrain availability
    pub staff_id: Uuid,

    /// Service whose duration each slot must accommodate
    pub service_id: Uuid,

    /// Calendar day, "YYYY-MM-DD"
    pub date: String,
}

/// Parse the `date` query parameter.
pub fn parse_date(raw: &str) -> Result<NaiveDate, BookingError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
        BookingError::InvalidArgument(format!("Invalid date '{raw}', expected YYYY-MM-DD"))
    })
}

/// Midnight-to-midnight bounds of one calendar day.
pub fn day_bounds(date: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN));
    (start, start + Duration::days(1))
}

/// Weekday index in the opening-hours convention, 0 = Sunday.
pub fn weekday_index(date: NaiveDate) -> i16 {
    date.weekday().num_days_from_sunday() as i16
}

/// Computes the bookable slots for a staff member, service, and day
///
/// # Endpoint
///
/// ```text
/// GET /api/availability?staff_id=<uuid>&service_id=<uuid>&date=2026-03-14
/// ```
///
/// # Returns
///
/// * `Result<Json<AvailabilityResponse>, AppError>` - the ordered slot
///   list, each entry marked available or blocked. An empty list is a
///   valid outcome (closed day, fully booked day, or a duration that does
///   not fit the open window), not an error.
///
/// # Errors
///
/// * `BookingError::InvalidArgument` - malformed date
/// * `BookingError::NotFound` - unknown or inactive service or staff member
/// * `BookingError::Database` - database error
#[axum::debug_handler]
pub async fn get_availability(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<AvailabilityResponse>, AppError> {
    let date = parse_date(&query.date)?;

    // The service supplies the duration every emitted slot must fit
    let service = salonbook_db::repositories::service::get_service_by_id(
        &state.db_pool,
        query.service_id,
    )
    .await
    .map_err(BookingError::Database)?
    .filter(|s| s.active)
    .ok_or_else(|| {
        BookingError::NotFound(format!("Service with ID {} not found", query.service_id))
    })?;

    let staff = salonbook_db::repositories::staff::get_staff_by_id(&state.db_pool, query.staff_id)
        .await
        .map_err(BookingError::Database)?
        .filter(|s| s.active)
        .ok_or_else(|| {
            BookingError::NotFound(format!("Staff member with ID {} not found", query.staff_id))
        })?;

    // A day without published hours, or one flagged closed, has no window
    let hours = salonbook_db::repositories::opening_hours::get_hours_for_day(
        &state.db_pool,
        weekday_index(date),
    )
    .await
    .map_err(BookingError::Database)?;

    let window = hours.and_then(|h| {
        OpeningHours {
            day_of_week: h.day_of_week,
            open_time: h.open_time,
            close_time: h.close_time,
            is_closed: h.is_closed,
        }
        .day_window()
    });

    let Some((open_hour, close_hour)) = window else {
        return Ok(Json(AvailabilityResponse {
            date,
            staff_id: staff.id,
            service_id: service.id,
            slots: Vec::new(),
        }));
    };

    // Only non-cancelled bookings block slots; the repository filters them
    let (range_start, range_end) = day_bounds(date);
    let bookings = salonbook_db::repositories::booking::get_bookings_for_staff_in_range(
        &state.db_pool,
        staff.id,
        range_start,
        range_end,
    )
    .await
    .map_err(BookingError::Database)?;

    let booked: Vec<BookedInterval> = bookings
        .iter()
        .map(|b| BookedInterval {
            start_time: b.start_time,
            end_time: b.end_time,
        })
        .collect();

    let slots = generate_slots(
        date,
        i64::from(service.duration_min),
        &booked,
        open_hour,
        close_hour,
        SLOT_INTERVAL_MINUTES,
    )?;

    Ok(Json(AvailabilityResponse {
        date,
        staff_id: staff.id,
        service_id: service.id,
        slots,
    }))
}
