use sqlx::{PgConnection, PgPool};

use crate::models::listing::{AuctionBid, Listing};

pub async fn insert_listing(conn: &mut PgConnection, listing: &Listing) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO listings \
         (id, seller_id, title, description, price, currency, country, region, is_active, created_at) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)",
    )
    .bind(&listing.id)
    .bind(&listing.seller_id)
    .bind(&listing.title)
    .bind(&listing.description)
    .bind(listing.price)
    .bind(&listing.currency)
    .bind(&listing.country)
    .bind(&listing.region)
    .bind(listing.is_active)
    .bind(listing.created_at)
    .execute(conn)
    .await
    .map(|_| ())
}

pub async fn update_listing(conn: &mut PgConnection, listing: &Listing) -> Result<(), sqlx::Error> {
    sqlx::query(
        "UPDATE listings SET title = $2, description = $3, price = $4, is_active = $5 \
         WHERE id = $1",
    )
    .bind(&listing.id)
    .bind(&listing.title)
    .bind(&listing.description)
    .bind(listing.price)
    .bind(listing.is_active)
    .execute(conn)
    .await
    .map(|_| ())
}

pub async fn delete_listing(conn: &mut PgConnection, id: &str) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM listings WHERE id = $1")
        .bind(id)
        .execute(conn)
        .await
        .map(|_| ())
}

pub async fn find_by_id(pool: &PgPool, id: &str) -> Result<Option<Listing>, sqlx::Error> {
    sqlx::query_as::<_, Listing>(
        "SELECT id, seller_id, title, description, price, currency, country, region, is_active, \
         created_at FROM listings WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn list_listings(
    pool: &PgPool,
    limit: i64,
    offset: i64,
) -> Result<(Vec<Listing>, i64), sqlx::Error> {
    let items = sqlx::query_as::<_, Listing>(
        "SELECT id, seller_id, title, description, price, currency, country, region, is_active, \
         created_at FROM listings WHERE is_active = TRUE \
         ORDER BY created_at DESC, id DESC LIMIT $1 OFFSET $2",
    )
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    let total =
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM listings WHERE is_active = TRUE")
            .fetch_one(pool)
            .await?;

    Ok((items, total))
}

pub async fn insert_bid(conn: &mut PgConnection, bid: &AuctionBid) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO auction_bids (id, listing_id, bidder_id, amount, created_at) \
         VALUES ($1, $2, $3, $4, $5)",
    )
    .bind(&bid.id)
    .bind(&bid.listing_id)
    .bind(&bid.bidder_id)
    .bind(bid.amount)
    .bind(bid.created_at)
    .execute(conn)
    .await
    .map(|_| ())
}

pub async fn list_bids(pool: &PgPool, listing_id: &str) -> Result<Vec<AuctionBid>, sqlx::Error> {
    sqlx::query_as::<_, AuctionBid>(
        "SELECT id, listing_id, bidder_id, amount, created_at FROM auction_bids \
         WHERE listing_id = $1 ORDER BY created_at DESC, id DESC",
    )
    .bind(listing_id)
    .fetch_all(pool)
    .await
}
