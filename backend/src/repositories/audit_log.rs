use chrono::{DateTime, Utc};
use sqlx::{PgConnection, PgPool, Postgres, QueryBuilder};

use crate::models::audit_log::{AuditAction, AuditLogEntry};

#[derive(Debug, Clone, Default)]
pub struct AuditLogFilters {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
    pub actor_id: Option<String>,
    pub entity_kind: Option<String>,
    pub action: Option<AuditAction>,
}

/// Inserts an entry on a caller-supplied connection so the write shares the
/// transaction of the mutation it records.
pub async fn insert_audit_log(
    conn: &mut PgConnection,
    entry: &AuditLogEntry,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO audit_logs \
         (id, actor_id, path, http_method, status_code, entity_kind, entity_id, action, detail, \
         recorded_at) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)",
    )
    .bind(&entry.id)
    .bind(&entry.actor_id)
    .bind(&entry.path)
    .bind(&entry.http_method)
    .bind(entry.status_code)
    .bind(&entry.entity_kind)
    .bind(&entry.entity_id)
    .bind(entry.action)
    .bind(&entry.detail)
    .bind(entry.recorded_at)
    .execute(conn)
    .await
    .map(|_| ())
}

pub async fn list_audit_logs(
    pool: &PgPool,
    filters: &AuditLogFilters,
    limit: i64,
    offset: i64,
) -> Result<(Vec<AuditLogEntry>, i64), sqlx::Error> {
    let items = query_audit_logs(pool, filters, Some((limit, offset))).await?;

    let mut count_builder: QueryBuilder<Postgres> =
        QueryBuilder::new("SELECT COUNT(*) FROM audit_logs");
    let mut count_has_clause = false;
    apply_audit_log_filters(&mut count_builder, &mut count_has_clause, filters);
    let total = count_builder
        .build_query_scalar::<i64>()
        .fetch_one(pool)
        .await?;

    Ok((items, total))
}

pub async fn export_audit_logs(
    pool: &PgPool,
    filters: &AuditLogFilters,
) -> Result<Vec<AuditLogEntry>, sqlx::Error> {
    query_audit_logs(pool, filters, None).await
}

async fn query_audit_logs(
    pool: &PgPool,
    filters: &AuditLogFilters,
    pagination: Option<(i64, i64)>,
) -> Result<Vec<AuditLogEntry>, sqlx::Error> {
    let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(
        "SELECT id, actor_id, path, http_method, status_code, entity_kind, entity_id, action, \
         detail, recorded_at FROM audit_logs",
    );
    let mut has_clause = false;
    apply_audit_log_filters(&mut builder, &mut has_clause, filters);
    builder.push(" ORDER BY recorded_at DESC, id DESC");

    if let Some((limit, offset)) = pagination {
        builder
            .push(" LIMIT ")
            .push_bind(limit)
            .push(" OFFSET ")
            .push_bind(offset);
    }

    builder
        .build_query_as::<AuditLogEntry>()
        .fetch_all(pool)
        .await
}

fn apply_audit_log_filters(
    builder: &mut QueryBuilder<'_, Postgres>,
    has_clause: &mut bool,
    filters: &AuditLogFilters,
) {
    if let Some(from) = filters.from.as_ref() {
        push_clause(builder, has_clause);
        builder.push("recorded_at >= ").push_bind(from.to_owned());
    }
    if let Some(to) = filters.to.as_ref() {
        push_clause(builder, has_clause);
        builder.push("recorded_at <= ").push_bind(to.to_owned());
    }
    if let Some(actor_id) = filters.actor_id.as_ref() {
        push_clause(builder, has_clause);
        builder.push("actor_id = ").push_bind(actor_id.to_string());
    }
    if let Some(entity_kind) = filters.entity_kind.as_ref() {
        push_clause(builder, has_clause);
        builder
            .push("entity_kind = ")
            .push_bind(entity_kind.to_string());
    }
    if let Some(action) = filters.action {
        push_clause(builder, has_clause);
        builder.push("action = ").push_bind(action);
    }
}

fn push_clause(builder: &mut QueryBuilder<'_, Postgres>, has_clause: &mut bool) {
    if *has_clause {
        builder.push(" AND ");
    } else {
        builder.push(" WHERE ");
        *has_clause = true;
    }
}
