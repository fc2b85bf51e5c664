use axum::{
    extract::{Extension, Query, State},
    http::{Method, StatusCode, Uri},
    Json,
};

use crate::error::AppError;
use crate::models::account::{Account, AccountResponse, RegisterRequest};
use crate::models::{PaginatedResponse, PaginationQuery};
use crate::repositories::account as account_repo;
use crate::services::account as account_service;
use crate::services::audit::AuditContext;
use crate::state::AppState;

pub async fn list_accounts(
    State(state): State<AppState>,
    Query(pagination): Query<PaginationQuery>,
) -> Result<Json<PaginatedResponse<AccountResponse>>, AppError> {
    let limit = pagination.limit();
    let offset = pagination.offset();
    let (accounts, total) = account_repo::list_accounts(&state.pool, limit, offset).await?;

    let responses = accounts.into_iter().map(AccountResponse::from).collect();
    Ok(Json(PaginatedResponse::new(responses, total, limit, offset)))
}

/// Creates an account with any role, including admin. Only reachable behind
/// the admin gate.
pub async fn create_account(
    State(state): State<AppState>,
    Extension(admin): Extension<Account>,
    method: Method,
    uri: Uri,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AccountResponse>), AppError> {
    let ctx = AuditContext::new(Some(admin.id.clone()), method.as_str(), uri.path(), 201);
    let account = account_service::create_account(&state.pool, &ctx, payload).await?;

    Ok((StatusCode::CREATED, Json(account.into())))
}
