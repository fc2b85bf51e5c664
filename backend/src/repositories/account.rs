use sqlx::{PgConnection, PgPool};

use crate::models::account::Account;
use crate::models::seller_profile::SellerProfile;
use crate::utils::jwt::StoredRefreshToken;

pub async fn insert_account(conn: &mut PgConnection, account: &Account) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO accounts \
         (id, email, username, password_hash, role, business_name, is_active, is_staff, \
         created_at, updated_at) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)",
    )
    .bind(&account.id)
    .bind(&account.email)
    .bind(&account.username)
    .bind(&account.password_hash)
    .bind(account.role)
    .bind(&account.business_name)
    .bind(account.is_active)
    .bind(account.is_staff)
    .bind(account.created_at)
    .bind(account.updated_at)
    .execute(conn)
    .await
    .map(|_| ())
}

pub async fn insert_seller_profile(
    conn: &mut PgConnection,
    profile: &SellerProfile,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO seller_profiles (id, account_id, company_name, contact_number, address, rating) \
         VALUES ($1, $2, $3, $4, $5, $6)",
    )
    .bind(&profile.id)
    .bind(&profile.account_id)
    .bind(&profile.company_name)
    .bind(&profile.contact_number)
    .bind(&profile.address)
    .bind(profile.rating)
    .execute(conn)
    .await
    .map(|_| ())
}

pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<Account>, sqlx::Error> {
    sqlx::query_as::<_, Account>(
        "SELECT id, email, username, password_hash, role, business_name, is_active, is_staff, \
         created_at, updated_at FROM accounts WHERE email = $1",
    )
    .bind(email)
    .fetch_optional(pool)
    .await
}

pub async fn find_by_id(pool: &PgPool, id: &str) -> Result<Option<Account>, sqlx::Error> {
    sqlx::query_as::<_, Account>(
        "SELECT id, email, username, password_hash, role, business_name, is_active, is_staff, \
         created_at, updated_at FROM accounts WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn list_accounts(
    pool: &PgPool,
    limit: i64,
    offset: i64,
) -> Result<(Vec<Account>, i64), sqlx::Error> {
    let items = sqlx::query_as::<_, Account>(
        "SELECT id, email, username, password_hash, role, business_name, is_active, is_staff, \
         created_at, updated_at FROM accounts ORDER BY created_at DESC, id DESC \
         LIMIT $1 OFFSET $2",
    )
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM accounts")
        .fetch_one(pool)
        .await?;

    Ok((items, total))
}

pub async fn insert_refresh_token(
    pool: &PgPool,
    token: &StoredRefreshToken,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO refresh_tokens (id, account_id, token_hash, expires_at) \
         VALUES ($1, $2, $3, $4)",
    )
    .bind(&token.id)
    .bind(&token.account_id)
    .bind(&token.token_hash)
    .bind(token.expires_at)
    .execute(pool)
    .await
    .map(|_| ())
}

pub async fn find_refresh_token(
    pool: &PgPool,
    id: &str,
) -> Result<Option<StoredRefreshToken>, sqlx::Error> {
    sqlx::query_as::<_, StoredRefreshToken>(
        "SELECT id, account_id, token_hash, expires_at FROM refresh_tokens WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn delete_refresh_token(pool: &PgPool, id: &str) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM refresh_tokens WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await
        .map(|_| ())
}
