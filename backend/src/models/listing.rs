use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Listing {
    pub id: String,
    pub seller_id: String,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub currency: String,
    pub country: String,
    pub region: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl Listing {
    pub fn new(seller_id: String, payload: CreateListing) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            seller_id,
            title: payload.title,
            description: payload.description,
            price: payload.price,
            currency: payload.currency,
            country: payload.country,
            region: payload.region,
            is_active: true,
            created_at: Utc::now(),
        }
    }

    pub fn summary(&self) -> String {
        self.title.clone()
    }
}

impl crate::policies::Owned for Listing {
    fn owner_account_id(&self) -> Option<&str> {
        Some(&self.seller_id)
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateListing {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(min = 1))]
    pub description: String,
    #[validate(range(min = 0.0))]
    pub price: f64,
    #[validate(length(min = 1, max = 10))]
    pub currency: String,
    #[validate(length(min = 1, max = 100))]
    pub country: String,
    #[validate(length(min = 1, max = 100))]
    pub region: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateListing {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    pub description: Option<String>,
    #[validate(range(min = 0.0))]
    pub price: Option<f64>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AuctionBid {
    pub id: String,
    pub listing_id: String,
    pub bidder_id: String,
    pub amount: f64,
    pub created_at: DateTime<Utc>,
}

impl AuctionBid {
    pub fn new(listing_id: String, bidder_id: String, amount: f64) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            listing_id,
            bidder_id,
            amount,
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateBid {
    #[validate(range(min = 0.0))]
    pub amount: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn create_listing_rejects_negative_price() {
        let payload = CreateListing {
            title: "Clean 2019 Golf".into(),
            description: "One owner".into(),
            price: -1.0,
            currency: "EUR".into(),
            country: "Germany".into(),
            region: "Bavaria".into(),
        };
        assert!(payload.validate().is_err());
    }

    #[test]
    fn new_listing_starts_active() {
        let payload = CreateListing {
            title: "Clean 2019 Golf".into(),
            description: "One owner".into(),
            price: 14500.0,
            currency: "EUR".into(),
            country: "Germany".into(),
            region: "Bavaria".into(),
        };
        let listing = Listing::new("seller-1".into(), payload);
        assert!(listing.is_active);
        assert_eq!(listing.summary(), "Clean 2019 Golf");
    }
}
