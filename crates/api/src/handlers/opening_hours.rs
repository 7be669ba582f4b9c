//! # Opening Hours Handlers
//!
//! The persistence half of the opening-hours admin surface: read the weekly
//! hours and replace them wholesale. Days the table does not know yet are
//! filled with the shop's default window so the client always sees seven
//! rows.

use axum::{extract::State, Json};
use chrono::{Duration, NaiveTime};
use salonbook_core::{
    errors::BookingError,
    models::opening_hours::{ListOpeningHoursResponse, OpeningHours, UpdateOpeningHoursRequest},
};
use std::sync::Arc;

use salonbook_db::models::DbOpeningHours;

use crate::{middleware::error_handling::AppError, ApiState};

fn default_hours(day_of_week: i16) -> OpeningHours {
    OpeningHours {
        day_of_week,
        open_time: Some(NaiveTime::MIN + Duration::hours(9)),
        close_time: Some(NaiveTime::MIN + Duration::hours(17)),
        is_closed: false,
    }
}

fn to_core(row: DbOpeningHours) -> OpeningHours {
    OpeningHours {
        day_of_week: row.day_of_week,
        open_time: row.open_time,
        close_time: row.close_time,
        is_closed: row.is_closed,
    }
}

#[axum::debug_handler]
pub async fn list_opening_hours(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<ListOpeningHoursResponse>, AppError> {
    let stored = salonbook_db::repositories::opening_hours::list_opening_hours(&state.db_pool)
        .await
        .map_err(BookingError::Database)?;

    // Merge with defaults so every weekday is present
    let hours = (0..7i16)
        .map(|day| {
            stored
                .iter()
                .find(|row| row.day_of_week == day)
                .cloned()
                .map(to_core)
                .unwrap_or_else(|| default_hours(day))
        })
        .collect();

    Ok(Json(ListOpeningHoursResponse { hours }))
}

#[axum::debug_handler]
pub async fn update_opening_hours(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<UpdateOpeningHoursRequest>,
) -> Result<Json<ListOpeningHoursResponse>, AppError> {
    for entry in &payload.hours {
        if !(0..7i16).contains(&entry.day_of_week) {
            return Err(AppError(BookingError::Validation(format!(
                "day_of_week must be 0..=6, got {}",
                entry.day_of_week
            ))));
        }
    }

    let rows: Vec<DbOpeningHours> = payload
        .hours
        .iter()
        .map(|entry| DbOpeningHours {
            day_of_week: entry.day_of_week,
            open_time: entry.open_time,
            close_time: entry.close_time,
            is_closed: entry.is_closed,
        })
        .collect();

    let saved =
        salonbook_db::repositories::opening_hours::upsert_opening_hours(&state.db_pool, &rows)
            .await
            .map_err(BookingError::Database)?;

    Ok(Json(ListOpeningHoursResponse {
        hours: saved.into_iter().map(to_core).collect(),
    }))
}
