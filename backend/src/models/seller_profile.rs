use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Companion profile created automatically when an account registers with
/// the seller role.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SellerProfile {
    pub id: String,
    pub account_id: String,
    pub company_name: String,
    pub contact_number: String,
    pub address: String,
    pub rating: f64,
}

impl SellerProfile {
    pub fn new(account_id: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            account_id,
            company_name: String::new(),
            contact_number: String::new(),
            address: String::new(),
            rating: 0.0,
        }
    }
}
