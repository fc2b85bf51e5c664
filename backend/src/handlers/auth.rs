use axum::{
    extract::State,
    http::{Method, StatusCode, Uri},
    Json,
};
use chrono::Utc;
use serde::Deserialize;

use crate::error::AppError;
use crate::models::account::{
    AccountResponse, AccountRole, LoginRequest, LoginResponse, RegisterRequest,
};
use crate::repositories::account as account_repo;
use crate::services::account as account_service;
use crate::services::audit::AuditContext;
use crate::state::AppState;
use crate::utils::{jwt, password};

pub async fn register(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AccountResponse>), AppError> {
    if payload.role == AccountRole::Admin {
        return Err(AppError::Forbidden(
            "Admin accounts cannot be self-registered".to_string(),
        ));
    }

    let ctx = AuditContext::new(None, method.as_str(), uri.path(), 201);
    let account = account_service::create_account(&state.pool, &ctx, payload).await?;

    Ok((StatusCode::CREATED, Json(account.into())))
}

pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let account = account_repo::find_by_email(&state.pool, &payload.email)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Invalid email or password".to_string()))?;

    let valid = password::verify_password(&payload.password, &account.password_hash)?;
    if !valid {
        return Err(AppError::Unauthorized(
            "Invalid email or password".to_string(),
        ));
    }
    if !account.is_active {
        return Err(AppError::Unauthorized("Account is inactive".to_string()));
    }

    let access_token = jwt::create_access_token(
        &account,
        &state.config.jwt_secret,
        state.config.jwt_expiration_hours,
    )?;
    let issued =
        jwt::create_refresh_token(account.id.clone(), state.config.refresh_token_expiration_days)?;
    account_repo::insert_refresh_token(&state.pool, &issued.record).await?;

    Ok(Json(LoginResponse {
        access_token,
        refresh_token: issued.encoded,
        account: account.into(),
    }))
}

#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Exchanges a refresh token for a fresh token pair. The presented token is
/// consumed; each refresh token works exactly once.
pub async fn refresh(
    State(state): State<AppState>,
    Json(payload): Json<RefreshRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let (id, secret) = jwt::split_refresh_token(&payload.refresh_token)
        .ok_or_else(|| AppError::Unauthorized("Invalid refresh token".to_string()))?;

    let stored = account_repo::find_refresh_token(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Invalid refresh token".to_string()))?;

    if !jwt::verify_refresh_secret(secret, &stored.token_hash)? {
        return Err(AppError::Unauthorized("Invalid refresh token".to_string()));
    }
    if stored.expires_at < Utc::now() {
        account_repo::delete_refresh_token(&state.pool, &stored.id).await?;
        return Err(AppError::Unauthorized(
            "Refresh token has expired".to_string(),
        ));
    }

    let account = account_repo::find_by_id(&state.pool, &stored.account_id)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Invalid refresh token".to_string()))?;
    if !account.is_active {
        return Err(AppError::Unauthorized("Account is inactive".to_string()));
    }

    account_repo::delete_refresh_token(&state.pool, &stored.id).await?;

    let access_token = jwt::create_access_token(
        &account,
        &state.config.jwt_secret,
        state.config.jwt_expiration_hours,
    )?;
    let issued =
        jwt::create_refresh_token(account.id.clone(), state.config.refresh_token_expiration_days)?;
    account_repo::insert_refresh_token(&state.pool, &issued.record).await?;

    Ok(Json(LoginResponse {
        access_token,
        refresh_token: issued.encoded,
        account: account.into(),
    }))
}
