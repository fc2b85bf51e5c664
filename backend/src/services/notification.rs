use sqlx::PgPool;
use validator::Validate;

use crate::error::AppError;
use crate::models::account::Account;
use crate::models::notification::{CreateNotification, Notification};
use crate::repositories::notification as notification_repo;
use crate::services::audit::{self, AuditContext};

/// Creates a notification addressed to the calling account.
pub async fn create_notification(
    pool: &PgPool,
    ctx: &AuditContext,
    recipient: &Account,
    payload: CreateNotification,
) -> Result<Notification, AppError> {
    payload.validate()?;

    let notification = Notification::new(
        recipient.id.clone(),
        payload.vehicle_id,
        payload.message,
        payload.kind,
    );

    let mut tx = pool.begin().await?;
    notification_repo::insert_notification(&mut *tx, &notification).await?;
    audit::record_created(&mut *tx, ctx, &notification).await?;
    tx.commit().await?;

    Ok(notification)
}

/// Marks a notification read. Only the recipient may do this; the read flag
/// is the only mutable field on a notification.
pub async fn mark_read(
    pool: &PgPool,
    ctx: &AuditContext,
    account: &Account,
    notification_id: &str,
) -> Result<Notification, AppError> {
    let mut notification = notification_repo::find_by_id(pool, notification_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Notification not found".to_string()))?;

    if notification.recipient_id != account.id {
        return Err(AppError::Forbidden(
            "Only the recipient can mark a notification read".to_string(),
        ));
    }

    notification.is_read = true;

    let mut tx = pool.begin().await?;
    notification_repo::set_read(&mut *tx, &notification.id).await?;
    audit::record_updated(&mut *tx, ctx, &notification).await?;
    tx.commit().await?;

    Ok(notification)
}
