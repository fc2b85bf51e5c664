//! Audit trail recording for tracked entities.
//!
//! Every mutation of a tracked entity writes one audit row on the same
//! database connection, inside the same transaction. If the audit insert
//! fails, the caller's transaction rolls back and the mutation is lost with
//! it.

use chrono::Utc;
use sqlx::PgConnection;
use uuid::Uuid;

use crate::models::account::Account;
use crate::models::audit_log::{AuditAction, AuditLogEntry};
use crate::models::listing::Listing;
use crate::models::notification::Notification;
use crate::models::vehicle::Vehicle;
use crate::repositories::audit_log;

/// Implemented by entity types whose mutations are recorded in the audit
/// trail.
pub trait Auditable {
    /// Stable kind label stored in `entity_kind`.
    fn entity_kind() -> &'static str;

    fn entity_id(&self) -> &str;

    /// Short human-readable description included in the detail text.
    fn summary(&self) -> String;

    /// Account held responsible for the mutation when no request actor is
    /// available.
    fn audit_actor(&self) -> Option<String>;
}

impl Auditable for Account {
    fn entity_kind() -> &'static str {
        "Account"
    }

    fn entity_id(&self) -> &str {
        &self.id
    }

    fn summary(&self) -> String {
        self.username.clone()
    }

    fn audit_actor(&self) -> Option<String> {
        Some(self.id.clone())
    }
}

impl Auditable for Vehicle {
    fn entity_kind() -> &'static str {
        "Vehicle"
    }

    fn entity_id(&self) -> &str {
        &self.id
    }

    fn summary(&self) -> String {
        Vehicle::summary(self)
    }

    fn audit_actor(&self) -> Option<String> {
        self.owner_id.clone()
    }
}

impl Auditable for Listing {
    fn entity_kind() -> &'static str {
        "Listing"
    }

    fn entity_id(&self) -> &str {
        &self.id
    }

    fn summary(&self) -> String {
        Listing::summary(self)
    }

    fn audit_actor(&self) -> Option<String> {
        Some(self.seller_id.clone())
    }
}

impl Auditable for Notification {
    fn entity_kind() -> &'static str {
        "Notification"
    }

    fn entity_id(&self) -> &str {
        &self.id
    }

    fn summary(&self) -> String {
        Notification::summary(self)
    }

    fn audit_actor(&self) -> Option<String> {
        Some(self.recipient_id.clone())
    }
}

/// Request-level facts attached to every audit row produced while handling
/// one request.
#[derive(Debug, Clone)]
pub struct AuditContext {
    pub actor_id: Option<String>,
    pub path: String,
    pub http_method: String,
    pub status_code: i16,
}

impl AuditContext {
    pub fn new(
        actor_id: Option<String>,
        http_method: impl Into<String>,
        path: impl Into<String>,
        status_code: i16,
    ) -> Self {
        Self {
            actor_id,
            path: path.into(),
            http_method: http_method.into(),
            status_code,
        }
    }
}

pub async fn record_created<T: Auditable>(
    conn: &mut PgConnection,
    ctx: &AuditContext,
    entity: &T,
) -> Result<(), sqlx::Error> {
    record(conn, ctx, entity, AuditAction::Created).await
}

pub async fn record_updated<T: Auditable>(
    conn: &mut PgConnection,
    ctx: &AuditContext,
    entity: &T,
) -> Result<(), sqlx::Error> {
    record(conn, ctx, entity, AuditAction::Updated).await
}

pub async fn record_deleted<T: Auditable>(
    conn: &mut PgConnection,
    ctx: &AuditContext,
    entity: &T,
) -> Result<(), sqlx::Error> {
    record(conn, ctx, entity, AuditAction::Deleted).await
}

async fn record<T: Auditable>(
    conn: &mut PgConnection,
    ctx: &AuditContext,
    entity: &T,
    action: AuditAction,
) -> Result<(), sqlx::Error> {
    let entry = build_entry(ctx, entity, action);
    audit_log::insert_audit_log(conn, &entry).await
}

fn build_entry<T: Auditable>(ctx: &AuditContext, entity: &T, action: AuditAction) -> AuditLogEntry {
    AuditLogEntry {
        id: Uuid::new_v4().to_string(),
        actor_id: ctx.actor_id.clone().or_else(|| entity.audit_actor()),
        path: ctx.path.clone(),
        http_method: ctx.http_method.clone(),
        status_code: ctx.status_code,
        entity_kind: T::entity_kind().to_string(),
        entity_id: entity.entity_id().to_string(),
        action,
        detail: format!("{} {}: {}", T::entity_kind(), action.as_str(), entity.summary()),
        recorded_at: Utc::now(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::account::AccountRole;
    use crate::models::notification::NotificationKind;

    fn ctx(actor: Option<&str>) -> AuditContext {
        AuditContext::new(actor.map(String::from), "POST", "/api/vehicles", 201)
    }

    #[test]
    fn entry_prefers_request_actor() {
        let vehicle = Vehicle::new(
            Some("owner-1".into()),
            "Tesla".into(),
            "Model 3".into(),
            2022,
            "5YJ3E1EA7KF317000".into(),
        );
        let entry = build_entry(&ctx(Some("acting-admin")), &vehicle, AuditAction::Created);
        assert_eq!(entry.actor_id.as_deref(), Some("acting-admin"));
        assert_eq!(entry.entity_kind, "Vehicle");
        assert_eq!(entry.entity_id, vehicle.id);
        assert_eq!(entry.detail, "Vehicle created: Tesla Model 3 (2022)");
        assert_eq!(entry.status_code, 201);
    }

    #[test]
    fn entry_falls_back_to_entity_actor() {
        let notification = Notification::new(
            "recipient-1".into(),
            None,
            "Welcome!".into(),
            NotificationKind::Info,
        );
        let entry = build_entry(&ctx(None), &notification, AuditAction::Created);
        assert_eq!(entry.actor_id.as_deref(), Some("recipient-1"));
        assert_eq!(entry.entity_kind, "Notification");
    }

    #[test]
    fn unowned_vehicle_leaves_actor_empty() {
        let vehicle = Vehicle::new(
            None,
            "Ford".into(),
            "Focus".into(),
            2018,
            "1FADP3F20EL123456".into(),
        );
        let entry = build_entry(&ctx(None), &vehicle, AuditAction::Deleted);
        assert!(entry.actor_id.is_none());
        assert_eq!(entry.detail, "Vehicle deleted: Ford Focus (2018)");
    }

    #[test]
    fn account_audits_itself_on_registration() {
        let account = Account::new(
            "s@example.com".into(),
            "sally".into(),
            "hash".into(),
            AccountRole::Seller,
            None,
        );
        let entry = build_entry(&ctx(None), &account, AuditAction::Created);
        assert_eq!(entry.actor_id.as_deref(), Some(account.id.as_str()));
        assert_eq!(entry.detail, "Account created: sally");
    }
}
