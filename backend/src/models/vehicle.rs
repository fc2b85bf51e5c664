use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::validation::rules;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Vehicle {
    pub id: String,
    /// Owning account; nullable so vehicles survive owner deletion flows.
    pub owner_id: Option<String>,
    pub make: String,
    pub model: String,
    pub year: i32,
    /// 17-character vehicle identification number (unique).
    pub vin: String,
    pub created_at: DateTime<Utc>,
}

impl Vehicle {
    pub fn new(owner_id: Option<String>, make: String, model: String, year: i32, vin: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            owner_id,
            make,
            model,
            year,
            vin,
            created_at: Utc::now(),
        }
    }

    /// Human-readable description used in audit details and notifications.
    pub fn summary(&self) -> String {
        format!("{} {} ({})", self.make, self.model, self.year)
    }
}

impl crate::policies::Owned for Vehicle {
    fn owner_account_id(&self) -> Option<&str> {
        self.owner_id.as_deref()
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateVehicle {
    #[validate(length(min = 1, max = 50))]
    pub make: String,
    #[validate(length(min = 1, max = 50))]
    pub model: String,
    #[validate(range(min = 1900, max = 2100))]
    pub year: i32,
    #[validate(custom(function = "rules::validate_vin"))]
    pub vin: String,
}

#[derive(Debug, Deserialize, Validate)]
/// Partial update; the VIN is immutable once registered.
pub struct UpdateVehicle {
    #[validate(length(min = 1, max = 50))]
    pub make: Option<String>,
    #[validate(length(min = 1, max = 50))]
    pub model: Option<String>,
    #[validate(range(min = 1900, max = 2100))]
    pub year: Option<i32>,
}

#[derive(Debug, Serialize)]
/// Vehicle enriched with fields from the external VIN metadata service.
pub struct VehicleMetadataEntry {
    pub make: String,
    pub model: String,
    pub year: i32,
    pub vin: String,
    pub engine: Option<String>,
    pub transmission: Option<String>,
    pub country: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_matches_display_convention() {
        let vehicle = Vehicle::new(
            None,
            "Tesla".into(),
            "Model 3".into(),
            2022,
            "5YJ3E1EA7KF317000".into(),
        );
        assert_eq!(vehicle.summary(), "Tesla Model 3 (2022)");
    }

    #[test]
    fn create_vehicle_rejects_out_of_range_year() {
        let payload = CreateVehicle {
            make: "Ford".into(),
            model: "Focus".into(),
            year: 1200,
            vin: "1FADP3F20EL123456".into(),
        };
        assert!(validator::Validate::validate(&payload).is_err());
    }
}
