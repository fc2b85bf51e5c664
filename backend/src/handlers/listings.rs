use axum::{
    extract::{Extension, Path, Query, State},
    http::{Method, StatusCode, Uri},
    Json,
};

use crate::error::AppError;
use crate::models::account::Account;
use crate::models::listing::{AuctionBid, CreateBid, CreateListing, Listing, UpdateListing};
use crate::models::{PaginatedResponse, PaginationQuery};
use crate::policies;
use crate::repositories::listing as listing_repo;
use crate::services::audit::AuditContext;
use crate::services::listing as listing_service;
use crate::state::AppState;

pub async fn list_listings(
    State(state): State<AppState>,
    Query(pagination): Query<PaginationQuery>,
) -> Result<Json<PaginatedResponse<Listing>>, AppError> {
    let limit = pagination.limit();
    let offset = pagination.offset();
    let (listings, total) = listing_repo::list_listings(&state.pool, limit, offset).await?;

    Ok(Json(PaginatedResponse::new(listings, total, limit, offset)))
}

pub async fn get_listing(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Listing>, AppError> {
    let listing = listing_repo::find_by_id(&state.pool, &id)
        .await?
        .ok_or_else(|| AppError::NotFound("Listing not found".to_string()))?;

    Ok(Json(listing))
}

/// Only seller accounts may publish listings.
pub async fn create_listing(
    State(state): State<AppState>,
    Extension(account): Extension<Account>,
    method: Method,
    uri: Uri,
    Json(payload): Json<CreateListing>,
) -> Result<(StatusCode, Json<Listing>), AppError> {
    if !policies::is_seller(Some(&account)) {
        return Err(AppError::Forbidden(
            "Only sellers can create listings".to_string(),
        ));
    }

    let ctx = AuditContext::new(Some(account.id.clone()), method.as_str(), uri.path(), 201);
    let listing = listing_service::create_listing(&state.pool, &ctx, &account, payload).await?;

    Ok((StatusCode::CREATED, Json(listing)))
}

pub async fn update_listing(
    State(state): State<AppState>,
    Extension(account): Extension<Account>,
    method: Method,
    uri: Uri,
    Path(id): Path<String>,
    Json(payload): Json<UpdateListing>,
) -> Result<Json<Listing>, AppError> {
    let listing = listing_repo::find_by_id(&state.pool, &id)
        .await?
        .ok_or_else(|| AppError::NotFound("Listing not found".to_string()))?;

    if !policies::is_owner_or_read_only(Some(&account), &method, &listing) {
        return Err(AppError::Forbidden(
            "Only the seller can modify this listing".to_string(),
        ));
    }

    let ctx = AuditContext::new(Some(account.id.clone()), method.as_str(), uri.path(), 200);
    let listing = listing_service::update_listing(&state.pool, &ctx, listing, payload).await?;

    Ok(Json(listing))
}

pub async fn delete_listing(
    State(state): State<AppState>,
    Extension(account): Extension<Account>,
    method: Method,
    uri: Uri,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let listing = listing_repo::find_by_id(&state.pool, &id)
        .await?
        .ok_or_else(|| AppError::NotFound("Listing not found".to_string()))?;

    if !policies::is_owner_or_read_only(Some(&account), &method, &listing) {
        return Err(AppError::Forbidden(
            "Only the seller can delete this listing".to_string(),
        ));
    }

    let ctx = AuditContext::new(Some(account.id.clone()), method.as_str(), uri.path(), 204);
    listing_service::delete_listing(&state.pool, &ctx, &listing).await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_bids(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<AuctionBid>>, AppError> {
    let listing = listing_repo::find_by_id(&state.pool, &id)
        .await?
        .ok_or_else(|| AppError::NotFound("Listing not found".to_string()))?;

    let bids = listing_repo::list_bids(&state.pool, &listing.id).await?;
    Ok(Json(bids))
}

pub async fn place_bid(
    State(state): State<AppState>,
    Extension(account): Extension<Account>,
    Path(id): Path<String>,
    Json(payload): Json<CreateBid>,
) -> Result<(StatusCode, Json<AuctionBid>), AppError> {
    let listing = listing_repo::find_by_id(&state.pool, &id)
        .await?
        .ok_or_else(|| AppError::NotFound("Listing not found".to_string()))?;

    let bid = listing_service::place_bid(&state.pool, &listing, &account, payload).await?;

    Ok((StatusCode::CREATED, Json(bid)))
}
