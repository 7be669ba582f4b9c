//! # Booking Handlers
//!
//! Handlers for creating and managing appointments. Creation resolves the
//! client's chosen day and "HH:MM" slot into concrete start/end timestamps
//! (end = start + service duration) and inserts with status `pending`.
//!
//! The slot list the client saw earlier is advisory only: between that
//! computation and the insert, someone else may take the interval. The
//! `bookings` table's exclusion constraint is the authoritative check, and
//! an insert it rejects surfaces as HTTP 409 so the client can re-fetch
//! availability.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use salonbook_core::{
    errors::BookingError,
    models::booking::{
        BookingStatus, CreateBookingRequest, CreateBookingResponse, GetBookingResponse,
        ListBookingsResponse, UpdateBookingStatusRequest, UpdateBookingStatusResponse,
    },
    models::opening_hours::OpeningHours,
};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    handlers::availability::{day_bounds, parse_date, weekday_index},
    middleware::error_handling::AppError,
    ApiState,
};

/// Resolve a day plus a "HH:MM" slot label into a concrete timestamp.
pub fn resolve_start_time(date: NaiveDate, time: &str) -> Result<DateTime<Utc>, BookingError> {
    let time = NaiveTime::parse_from_str(time, "%H:%M").map_err(|_| {
        BookingError::InvalidArgument(format!("Invalid time '{time}', expected HH:MM"))
    })?;
    Ok(Utc.from_utc_datetime(&date.and_time(time)))
}

fn to_booking_response(row: salonbook_db::models::DbBooking) -> Result<GetBookingResponse, BookingError> {
    Ok(GetBookingResponse {
        id: row.id,
        service_id: row.service_id,
        staff_id: row.staff_id,
        client_name: row.client_name,
        client_email: row.client_email,
        start_time: row.start_time,
        end_time: row.end_time,
        status: BookingStatus::from_db(&row.status)?,
        created_at: row.created_at,
    })
}

/// Creates a new appointment for the chosen slot
///
/// # Endpoint
///
/// ```text
/// POST /api/bookings
/// ```
///
/// # Errors
///
/// * `BookingError::InvalidArgument` - malformed time label
/// * `BookingError::Validation` - empty client name, or a slot outside the
///   weekday's published hours
/// * `BookingError::NotFound` - unknown or inactive service or staff member
/// * `BookingError::Conflict` - the interval was booked in the meantime
#[axum::debug_handler]
pub async fn create_booking(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<CreateBookingRequest>,
) -> Result<Json<CreateBookingResponse>, AppError> {
    if payload.client_name.trim().is_empty() {
        return Err(AppError(BookingError::Validation(
            "Client name must not be empty".to_string(),
        )));
    }

    let start_time = resolve_start_time(payload.date, &payload.time)?;

    let service = salonbook_db::repositories::service::get_service_by_id(
        &state.db_pool,
        payload.service_id,
    )
    .await
    .map_err(BookingError::Database)?
    .filter(|s| s.active)
    .ok_or_else(|| {
        BookingError::NotFound(format!("Service with ID {} not found", payload.service_id))
    })?;

    let staff =
        salonbook_db::repositories::staff::get_staff_by_id(&state.db_pool, payload.staff_id)
            .await
            .map_err(BookingError::Database)?
            .filter(|s| s.active)
            .ok_or_else(|| {
                BookingError::NotFound(format!(
                    "Staff member with ID {} not found",
                    payload.staff_id
                ))
            })?;

    let end_time = start_time + Duration::minutes(i64::from(service.duration_min));

    // The chosen slot must fall inside the weekday's published window;
    // anything else is a stale or hand-crafted request
    let hours = salonbook_db::repositories::opening_hours::get_hours_for_day(
        &state.db_pool,
        weekday_index(payload.date),
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

    let within_hours = window.is_some_and(|(open_hour, close_hour)| {
        let (day_start, _) = day_bounds(payload.date);
        let opening = day_start + Duration::hours(i64::from(open_hour));
        let closing = day_start + Duration::hours(i64::from(close_hour));
        start_time >= opening && end_time <= closing
    });

    if !within_hours {
        return Err(AppError(BookingError::Validation(format!(
            "Requested slot {} is outside opening hours",
            payload.time
        ))));
    }

    let created = salonbook_db::repositories::booking::create_booking(
        &state.db_pool,
        service.id,
        staff.id,
        payload.client_name.trim(),
        payload.client_email.as_deref(),
        start_time,
        end_time,
    )
    .await
    .map_err(BookingError::Database)?
    .ok_or_else(|| {
        BookingError::Conflict(format!(
            "Slot {} on {} is no longer available",
            payload.time, payload.date
        ))
    })?;

    let response = CreateBookingResponse {
        id: created.id,
        service_id: created.service_id,
        staff_id: created.staff_id,
        start_time: created.start_time,
        end_time: created.end_time,
        status: BookingStatus::from_db(&created.status)?,
        created_at: created.created_at,
    };

    Ok(Json(response))
}

#[axum::debug_handler]
pub async fn get_booking(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<GetBookingResponse>, AppError> {
    let booking = salonbook_db::repositories::booking::get_booking_by_id(&state.db_pool, id)
        .await
        .map_err(BookingError::Database)?
        .ok_or_else(|| BookingError::NotFound(format!("Booking with ID {} not found", id)))?;

    Ok(Json(to_booking_response(booking)?))
}

/// Query parameters for the booking listing endpoint
#[derive(Debug, Deserialize)]
pub struct ListBookingsQuery {
    pub staff_id: Option<Uuid>,

    /// Calendar day filter, "YYYY-MM-DD"
    pub date: Option<String>,

    /// Status filter: pending, confirmed, cancelled, or completed
    pub status: Option<String>,
}

#[axum::debug_handler]
pub async fn list_bookings(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<ListBookingsQuery>,
) -> Result<Json<ListBookingsResponse>, AppError> {
    let day = match &query.date {
        Some(raw) => Some(day_bounds(parse_date(raw)?)),
        None => None,
    };

    let status = match &query.status {
        Some(raw) => Some(
            raw.parse::<BookingStatus>()
                .map_err(BookingError::Validation)?,
        ),
        None => None,
    };

    let rows = salonbook_db::repositories::booking::list_bookings(
        &state.db_pool,
        query.staff_id,
        day,
        status.map(|s| s.as_str()),
    )
    .await
    .map_err(BookingError::Database)?;

    let bookings = rows
        .into_iter()
        .map(to_booking_response)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Json(ListBookingsResponse { bookings }))
}

/// Moves a booking to a new status
///
/// Reviving a cancelled booking re-runs the overlap exclusion check; if the
/// interval was taken in the meantime the transition fails with 409.
#[axum::debug_handler]
pub async fn update_booking_status(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateBookingStatusRequest>,
) -> Result<Json<UpdateBookingStatusResponse>, AppError> {
    // Existence first, so a missing row is 404 rather than a conflict
    salonbook_db::repositories::booking::get_booking_by_id(&state.db_pool, id)
        .await
        .map_err(BookingError::Database)?
        .ok_or_else(|| BookingError::NotFound(format!("Booking with ID {} not found", id)))?;

    let updated = salonbook_db::repositories::booking::update_booking_status(
        &state.db_pool,
        id,
        payload.status.as_str(),
    )
    .await
    .map_err(BookingError::Database)?
    .ok_or_else(|| {
        BookingError::Conflict(format!(
            "Booking {} cannot move to {}: the interval is taken",
            id, payload.status
        ))
    })?;

    Ok(Json(UpdateBookingStatusResponse {
        id: updated.id,
        status: BookingStatus::from_db(&updated.status)?,
    }))
}

#[axum::debug_handler]
pub async fn cancel_booking(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<UpdateBookingStatusResponse>, AppError> {
    salonbook_db::repositories::booking::get_booking_by_id(&state.db_pool, id)
        .await
        .map_err(BookingError::Database)?
        .ok_or_else(|| BookingError::NotFound(format!("Booking with ID {} not found", id)))?;

    let updated = salonbook_db::repositories::booking::update_booking_status(
        &state.db_pool,
        id,
        BookingStatus::Cancelled.as_str(),
    )
    .await
    .map_err(BookingError::Database)?
    .ok_or_else(|| BookingError::NotFound(format!("Booking with ID {} not found", id)))?;

    Ok(Json(UpdateBookingStatusResponse {
        id: updated.id,
        status: BookingStatus::from_db(&updated.status)?,
    }))
}
