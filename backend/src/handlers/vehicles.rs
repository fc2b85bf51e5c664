use axum::{
    extract::{Extension, Path, Query, State},
    http::{Method, StatusCode, Uri},
    Json,
};
use serde::Deserialize;

use crate::error::AppError;
use crate::models::account::Account;
use crate::models::vehicle::{CreateVehicle, UpdateVehicle, Vehicle, VehicleMetadataEntry};
use crate::models::{PaginatedResponse, PaginationQuery};
use crate::policies;
use crate::repositories::vehicle::{self as vehicle_repo, VehicleFilters};
use crate::services::audit::AuditContext;
use crate::services::vehicle as vehicle_service;
use crate::state::AppState;
use crate::utils::metadata;

#[derive(Debug, Deserialize)]
pub struct VehicleListQuery {
    pub make: Option<String>,
    pub model: Option<String>,
    pub year: Option<i32>,
}

pub async fn list_vehicles(
    State(state): State<AppState>,
    Query(query): Query<VehicleListQuery>,
    Query(pagination): Query<PaginationQuery>,
) -> Result<Json<PaginatedResponse<Vehicle>>, AppError> {
    let filters = VehicleFilters {
        make: query.make,
        model: query.model,
        year: query.year,
    };
    let limit = pagination.limit();
    let offset = pagination.offset();
    let (vehicles, total) = vehicle_repo::list_vehicles(&state.pool, &filters, limit, offset).await?;

    Ok(Json(PaginatedResponse::new(vehicles, total, limit, offset)))
}

pub async fn get_vehicle(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vehicle>, AppError> {
    let vehicle = vehicle_repo::find_by_id(&state.pool, &id)
        .await?
        .ok_or_else(|| AppError::NotFound("Vehicle not found".to_string()))?;

    Ok(Json(vehicle))
}

pub async fn create_vehicle(
    State(state): State<AppState>,
    Extension(account): Extension<Account>,
    method: Method,
    uri: Uri,
    Json(payload): Json<CreateVehicle>,
) -> Result<(StatusCode, Json<Vehicle>), AppError> {
    let ctx = AuditContext::new(Some(account.id.clone()), method.as_str(), uri.path(), 201);
    let vehicle =
        vehicle_service::create_vehicle(&state.pool, &ctx, &account, payload, state.mailer.as_ref())
            .await?;

    Ok((StatusCode::CREATED, Json(vehicle)))
}

pub async fn update_vehicle(
    State(state): State<AppState>,
    Extension(account): Extension<Account>,
    method: Method,
    uri: Uri,
    Path(id): Path<String>,
    Json(payload): Json<UpdateVehicle>,
) -> Result<Json<Vehicle>, AppError> {
    let vehicle = vehicle_repo::find_by_id(&state.pool, &id)
        .await?
        .ok_or_else(|| AppError::NotFound("Vehicle not found".to_string()))?;

    if !policies::is_owner_or_read_only(Some(&account), &method, &vehicle) {
        return Err(AppError::Forbidden(
            "Only the owner can modify this vehicle".to_string(),
        ));
    }

    let ctx = AuditContext::new(Some(account.id.clone()), method.as_str(), uri.path(), 200);
    let vehicle = vehicle_service::update_vehicle(&state.pool, &ctx, vehicle, payload).await?;

    Ok(Json(vehicle))
}

pub async fn delete_vehicle(
    State(state): State<AppState>,
    Extension(account): Extension<Account>,
    method: Method,
    uri: Uri,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let vehicle = vehicle_repo::find_by_id(&state.pool, &id)
        .await?
        .ok_or_else(|| AppError::NotFound("Vehicle not found".to_string()))?;

    if !policies::is_owner_or_read_only(Some(&account), &method, &vehicle) {
        return Err(AppError::Forbidden(
            "Only the owner can delete this vehicle".to_string(),
        ));
    }

    let ctx = AuditContext::new(Some(account.id.clone()), method.as_str(), uri.path(), 204);
    vehicle_service::delete_vehicle(&state.pool, &ctx, &vehicle).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Lists the caller's vehicles enriched with external VIN metadata. Lookup
/// failures degrade to empty metadata fields.
pub async fn vehicles_with_metadata(
    State(state): State<AppState>,
    Extension(account): Extension<Account>,
) -> Result<Json<Vec<VehicleMetadataEntry>>, AppError> {
    let vehicles = if account.is_admin() {
        vehicle_repo::list_all(&state.pool).await?
    } else {
        vehicle_repo::list_for_owner(&state.pool, &account.id).await?
    };

    let client = metadata::build_client()?;
    let mut entries = Vec::with_capacity(vehicles.len());
    for vehicle in vehicles {
        let fetched = metadata::fetch_metadata(&client, &state.config.metadata_base_url, &vehicle.vin)
            .await;
        entries.push(VehicleMetadataEntry {
            make: vehicle.make,
            model: vehicle.model,
            year: vehicle.year,
            vin: vehicle.vin,
            engine: fetched.engine,
            transmission: fetched.transmission,
            country: fetched.country_of_origin,
        });
    }

    Ok(Json(entries))
}
