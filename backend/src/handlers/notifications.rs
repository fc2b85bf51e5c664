use axum::{
    extract::{Extension, Path, Query, State},
    http::{Method, StatusCode, Uri},
    Json,
};

use crate::error::AppError;
use crate::models::account::Account;
use crate::models::notification::{CreateNotification, Notification};
use crate::models::{PaginatedResponse, PaginationQuery};
use crate::repositories::notification as notification_repo;
use crate::services::audit::AuditContext;
use crate::services::notification as notification_service;
use crate::state::AppState;

/// Lists the caller's own notifications, newest first.
pub async fn list_notifications(
    State(state): State<AppState>,
    Extension(account): Extension<Account>,
    Query(pagination): Query<PaginationQuery>,
) -> Result<Json<PaginatedResponse<Notification>>, AppError> {
    let limit = pagination.limit();
    let offset = pagination.offset();
    let (notifications, total) =
        notification_repo::list_for_recipient(&state.pool, &account.id, limit, offset).await?;

    Ok(Json(PaginatedResponse::new(
        notifications,
        total,
        limit,
        offset,
    )))
}

/// Creates a notification addressed to the caller.
pub async fn create_notification(
    State(state): State<AppState>,
    Extension(account): Extension<Account>,
    method: Method,
    uri: Uri,
    Json(payload): Json<CreateNotification>,
) -> Result<(StatusCode, Json<Notification>), AppError> {
    let ctx = AuditContext::new(Some(account.id.clone()), method.as_str(), uri.path(), 201);
    let notification =
        notification_service::create_notification(&state.pool, &ctx, &account, payload).await?;

    Ok((StatusCode::CREATED, Json(notification)))
}

pub async fn mark_read(
    State(state): State<AppState>,
    Extension(account): Extension<Account>,
    method: Method,
    uri: Uri,
    Path(id): Path<String>,
) -> Result<Json<Notification>, AppError> {
    let ctx = AuditContext::new(Some(account.id.clone()), method.as_str(), uri.path(), 200);
    let notification = notification_service::mark_read(&state.pool, &ctx, &account, &id).await?;

    Ok(Json(notification))
}
