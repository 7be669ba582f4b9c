use axum::{
    extract::{Path, State},
    Json,
};
use salonbook_core::{
    errors::BookingError,
    models::service::{ListServicesResponse, ServiceResponse},
};
use std::sync::Arc;
use uuid::Uuid;

use crate::{middleware::error_handling::AppError, ApiState};

fn to_service_response(row: salonbook_db::models::DbService) -> ServiceResponse {
    ServiceResponse {
        id: row.id,
        name: row.name,
        description: row.description,
        price_cents: row.price_cents,
        duration_min: row.duration_min,
    }
}

#[axum::debug_handler]
pub async fn list_services(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<ListServicesResponse>, AppError> {
    let rows = salonbook_db::repositories::service::list_active_services(&state.db_pool)
        .await
        .map_err(BookingError::Database)?;

    Ok(Json(ListServicesResponse {
        services: rows.into_iter().map(to_service_response).collect(),
    }))
}

#[axum::debug_handler]
pub async fn get_service(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ServiceResponse>, AppError> {
    let service = salonbook_db::repositories::service::get_service_by_id(&state.db_pool, id)
        .await
        .map_err(BookingError::Database)?
        .filter(|s| s.active)
        .ok_or_else(|| BookingError::NotFound(format!("Service with ID {} not found", id)))?;

    Ok(Json(to_service_response(service)))
}
