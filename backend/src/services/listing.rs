use sqlx::PgPool;
use validator::Validate;

use crate::error::AppError;
use crate::models::account::Account;
use crate::models::listing::{AuctionBid, CreateBid, CreateListing, Listing, UpdateListing};
use crate::repositories::listing as listing_repo;
use crate::services::audit::{self, AuditContext};

pub async fn create_listing(
    pool: &PgPool,
    ctx: &AuditContext,
    seller: &Account,
    payload: CreateListing,
) -> Result<Listing, AppError> {
    payload.validate()?;

    let listing = Listing::new(seller.id.clone(), payload);

    let mut tx = pool.begin().await?;
    listing_repo::insert_listing(&mut *tx, &listing).await?;
    audit::record_created(&mut *tx, ctx, &listing).await?;
    tx.commit().await?;

    Ok(listing)
}

pub async fn update_listing(
    pool: &PgPool,
    ctx: &AuditContext,
    mut listing: Listing,
    payload: UpdateListing,
) -> Result<Listing, AppError> {
    payload.validate()?;

    if let Some(title) = payload.title {
        listing.title = title;
    }
    if let Some(description) = payload.description {
        listing.description = description;
    }
    if let Some(price) = payload.price {
        listing.price = price;
    }
    if let Some(is_active) = payload.is_active {
        listing.is_active = is_active;
    }

    let mut tx = pool.begin().await?;
    listing_repo::update_listing(&mut *tx, &listing).await?;
    audit::record_updated(&mut *tx, ctx, &listing).await?;
    tx.commit().await?;

    Ok(listing)
}

pub async fn delete_listing(
    pool: &PgPool,
    ctx: &AuditContext,
    listing: &Listing,
) -> Result<(), AppError> {
    let mut tx = pool.begin().await?;
    listing_repo::delete_listing(&mut *tx, &listing.id).await?;
    audit::record_deleted(&mut *tx, ctx, listing).await?;
    tx.commit().await?;

    Ok(())
}

/// Places a bid on an active listing. Bids are not tracked entities and
/// produce no audit entry.
pub async fn place_bid(
    pool: &PgPool,
    listing: &Listing,
    bidder: &Account,
    payload: CreateBid,
) -> Result<AuctionBid, AppError> {
    payload.validate()?;

    if !listing.is_active {
        return Err(AppError::BadRequest(
            "Cannot bid on an inactive listing".to_string(),
        ));
    }
    if listing.seller_id == bidder.id {
        return Err(AppError::BadRequest(
            "Sellers cannot bid on their own listings".to_string(),
        ));
    }

    let bid = AuctionBid::new(listing.id.clone(), bidder.id.clone(), payload.amount);

    let mut conn = pool.acquire().await?;
    listing_repo::insert_bid(&mut *conn, &bid).await?;

    Ok(bid)
}
