use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::error::AppError;
use crate::models::audit_log::{AuditAction, AuditLogEntry};
use crate::models::{PaginatedResponse, PaginationQuery};
use crate::repositories::audit_log::{self as audit_log_repo, AuditLogFilters};
use crate::services::export;
use crate::state::AppState;

use crate::handlers::export::download_response;

const AUDIT_CSV_HEADERS: [&str; 9] = [
    "Recorded At",
    "Actor",
    "Method",
    "Path",
    "Status",
    "Entity Kind",
    "Entity ID",
    "Action",
    "Detail",
];

#[derive(Debug, Deserialize)]
pub struct AuditLogQuery {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
    pub actor_id: Option<String>,
    pub entity_kind: Option<String>,
    pub action: Option<AuditAction>,
}

impl AuditLogQuery {
    fn filters(&self) -> Result<AuditLogFilters, AppError> {
        if let (Some(from), Some(to)) = (self.from, self.to) {
            if from > to {
                return Err(AppError::BadRequest(
                    "`from` must be on or before `to`".to_string(),
                ));
            }
        }
        Ok(AuditLogFilters {
            from: self.from,
            to: self.to,
            actor_id: self.actor_id.clone(),
            entity_kind: self.entity_kind.clone(),
            action: self.action,
        })
    }
}

pub async fn list_audit_logs(
    State(state): State<AppState>,
    Query(query): Query<AuditLogQuery>,
    Query(pagination): Query<PaginationQuery>,
) -> Result<Json<PaginatedResponse<AuditLogEntry>>, AppError> {
    let filters = query.filters()?;
    let limit = pagination.limit();
    let offset = pagination.offset();
    let (entries, total) =
        audit_log_repo::list_audit_logs(&state.pool, &filters, limit, offset).await?;

    Ok(Json(PaginatedResponse::new(entries, total, limit, offset)))
}

/// Downloads the filtered audit trail as CSV, without pagination.
pub async fn export_audit_logs(
    State(state): State<AppState>,
    Query(query): Query<AuditLogQuery>,
) -> Result<impl IntoResponse, AppError> {
    let filters = query.filters()?;
    let entries = audit_log_repo::export_audit_logs(&state.pool, &filters).await?;

    let rows = entries
        .iter()
        .map(|entry| {
            vec![
                entry.recorded_at.to_rfc3339(),
                entry.actor_id.clone().unwrap_or_default(),
                entry.http_method.clone(),
                entry.path.clone(),
                entry.status_code.to_string(),
                entry.entity_kind.clone(),
                entry.entity_id.clone(),
                entry.action.as_str().to_string(),
                entry.detail.clone(),
            ]
        })
        .collect();

    let doc = export::csv_document("audit_logs", &AUDIT_CSV_HEADERS, rows)?;
    Ok(download_response(doc))
}
