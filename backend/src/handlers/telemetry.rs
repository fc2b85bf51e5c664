use axum::{
    extract::{Extension, Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::error::AppError;
use crate::models::account::Account;
use crate::models::telemetry::{CreateTelemetry, EvTelemetry};
use crate::models::{PaginatedResponse, PaginationQuery};
use crate::repositories::{telemetry as telemetry_repo, vehicle as vehicle_repo};
use crate::services::telemetry as telemetry_service;
use crate::state::AppState;

pub async fn record_telemetry(
    State(state): State<AppState>,
    Extension(_account): Extension<Account>,
    Json(payload): Json<CreateTelemetry>,
) -> Result<(StatusCode, Json<EvTelemetry>), AppError> {
    let reading =
        telemetry_service::record_telemetry(&state.pool, state.mailer.as_ref(), payload).await?;

    Ok((StatusCode::CREATED, Json(reading)))
}

pub async fn list_vehicle_telemetry(
    State(state): State<AppState>,
    Extension(_account): Extension<Account>,
    Path(id): Path<String>,
    Query(pagination): Query<PaginationQuery>,
) -> Result<Json<PaginatedResponse<EvTelemetry>>, AppError> {
    let vehicle = vehicle_repo::find_by_id(&state.pool, &id)
        .await?
        .ok_or_else(|| AppError::NotFound("Vehicle not found".to_string()))?;

    let limit = pagination.limit();
    let offset = pagination.offset();
    let (readings, total) =
        telemetry_repo::list_for_vehicle(&state.pool, &vehicle.id, limit, offset).await?;

    Ok(Json(PaginatedResponse::new(readings, total, limit, offset)))
}
