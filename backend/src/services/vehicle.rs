use sqlx::PgPool;
use validator::Validate;

use crate::error::AppError;
use crate::models::account::Account;
use crate::models::vehicle::{CreateVehicle, UpdateVehicle, Vehicle};
use crate::repositories::vehicle as vehicle_repo;
use crate::services::audit::{self, AuditContext};
use crate::services::email::{self, EmailSender};

/// Registers a vehicle owned by the calling account, then mails the owner.
/// The email goes out only after the row and its audit entry have committed.
pub async fn create_vehicle(
    pool: &PgPool,
    ctx: &AuditContext,
    owner: &Account,
    payload: CreateVehicle,
    mailer: &dyn EmailSender,
) -> Result<Vehicle, AppError> {
    payload.validate()?;

    let vehicle = Vehicle::new(
        Some(owner.id.clone()),
        payload.make,
        payload.model,
        payload.year,
        payload.vin,
    );

    let mut tx = pool.begin().await?;
    vehicle_repo::insert_vehicle(&mut *tx, &vehicle).await?;
    audit::record_created(&mut *tx, ctx, &vehicle).await?;
    tx.commit().await?;

    email::dispatch(
        mailer,
        &owner.email,
        &format!("New Vehicle Added: {}", vehicle.summary()),
        &format!(
            "Your vehicle {} has been added to the Cars Platform.",
            vehicle.summary()
        ),
    );

    Ok(vehicle)
}

pub async fn update_vehicle(
    pool: &PgPool,
    ctx: &AuditContext,
    mut vehicle: Vehicle,
    payload: UpdateVehicle,
) -> Result<Vehicle, AppError> {
    payload.validate()?;

    if let Some(make) = payload.make {
        vehicle.make = make;
    }
    if let Some(model) = payload.model {
        vehicle.model = model;
    }
    if let Some(year) = payload.year {
        vehicle.year = year;
    }

    let mut tx = pool.begin().await?;
    vehicle_repo::update_vehicle(&mut *tx, &vehicle).await?;
    audit::record_updated(&mut *tx, ctx, &vehicle).await?;
    tx.commit().await?;

    Ok(vehicle)
}

pub async fn delete_vehicle(
    pool: &PgPool,
    ctx: &AuditContext,
    vehicle: &Vehicle,
) -> Result<(), AppError> {
    let mut tx = pool.begin().await?;
    vehicle_repo::delete_vehicle(&mut *tx, &vehicle.id).await?;
    audit::record_deleted(&mut *tx, ctx, vehicle).await?;
    tx.commit().await?;

    Ok(())
}
