use axum::{extract::State, Json};
use salonbook_core::{
    errors::BookingError,
    models::staff::{ListStaffResponse, StaffResponse},
};
use std::sync::Arc;

use crate::{middleware::error_handling::AppError, ApiState};

#[axum::debug_handler]
pub async fn list_staff(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<ListStaffResponse>, AppError> {
    let rows = salonbook_db::repositories::staff::list_active_staff(&state.db_pool)
        .await
        .map_err(BookingError::Database)?;

    Ok(Json(ListStaffResponse {
        staff: rows
            .into_iter()
            .map(|row| StaffResponse {
                id: row.id,
                display_name: row.display_name,
            })
            .collect(),
    }))
}
