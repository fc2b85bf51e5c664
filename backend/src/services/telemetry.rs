use sqlx::PgPool;
use validator::Validate;

use crate::error::AppError;
use crate::models::telemetry::{CreateTelemetry, EvTelemetry, LOW_BATTERY_THRESHOLD};
use crate::models::vehicle::Vehicle;
use crate::repositories::{
    account as account_repo, telemetry as telemetry_repo, vehicle as vehicle_repo,
};
use crate::services::email::{self, EmailSender};

/// Stores a telemetry reading. Readings are high-volume sensor data and are
/// not audited. A reading below the battery threshold alerts the vehicle
/// owner by email.
pub async fn record_telemetry(
    pool: &PgPool,
    mailer: &dyn EmailSender,
    payload: CreateTelemetry,
) -> Result<EvTelemetry, AppError> {
    payload.validate()?;

    let vehicle = vehicle_repo::find_by_id(pool, &payload.vehicle_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Vehicle not found".to_string()))?;

    let reading = EvTelemetry::new(payload);
    telemetry_repo::insert_telemetry(pool, &reading).await?;

    if let Some(owner_id) = vehicle.owner_id.as_deref() {
        if let Some(owner) = account_repo::find_by_id(pool, owner_id).await? {
            dispatch_low_battery_alert(mailer, &vehicle, &owner.email, reading.battery_level);
        }
    }

    Ok(reading)
}

/// Sends the low-battery email when the level is below the threshold.
/// Returns whether a send was attempted.
pub fn dispatch_low_battery_alert(
    mailer: &dyn EmailSender,
    vehicle: &Vehicle,
    owner_email: &str,
    battery_level: f64,
) -> bool {
    if battery_level >= LOW_BATTERY_THRESHOLD {
        return false;
    }

    email::dispatch(
        mailer,
        owner_email,
        &format!("Low Battery Alert for {}", vehicle.summary()),
        &format!(
            "Your vehicle {} reported a battery level of {:.0}%. Please charge soon.",
            vehicle.summary(),
            battery_level
        ),
    );

    true
}
