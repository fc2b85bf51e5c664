use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Battery percentage below which the owner is alerted.
pub const LOW_BATTERY_THRESHOLD: f64 = 20.0;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct EvTelemetry {
    pub id: String,
    pub vehicle_id: String,
    pub battery_level: f64,
    pub range_estimate_km: i32,
    pub location_lat: f64,
    pub location_lon: f64,
    pub speed_kph: f64,
    pub recorded_at: DateTime<Utc>,
}

impl EvTelemetry {
    pub fn new(payload: CreateTelemetry) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            vehicle_id: payload.vehicle_id,
            battery_level: payload.battery_level,
            range_estimate_km: payload.range_estimate_km,
            location_lat: payload.location_lat,
            location_lon: payload.location_lon,
            speed_kph: payload.speed_kph,
            recorded_at: Utc::now(),
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateTelemetry {
    pub vehicle_id: String,
    #[validate(range(min = 0.0, max = 100.0))]
    pub battery_level: f64,
    #[validate(range(min = 0))]
    pub range_estimate_km: i32,
    pub location_lat: f64,
    pub location_lon: f64,
    #[validate(range(min = 0.0))]
    pub speed_kph: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn telemetry_rejects_battery_level_above_hundred() {
        let payload = CreateTelemetry {
            vehicle_id: "veh-1".into(),
            battery_level: 120.0,
            range_estimate_km: 300,
            location_lat: 52.5,
            location_lon: 13.4,
            speed_kph: 80.0,
        };
        assert!(payload.validate().is_err());
    }

    #[test]
    fn telemetry_accepts_boundary_values() {
        let payload = CreateTelemetry {
            vehicle_id: "veh-1".into(),
            battery_level: 0.0,
            range_estimate_km: 0,
            location_lat: -90.0,
            location_lon: 180.0,
            speed_kph: 0.0,
        };
        assert!(payload.validate().is_ok());
    }
}
