use sqlx::PgPool;
use validator::Validate;

use crate::error::AppError;
use crate::models::account::{Account, RegisterRequest};
use crate::models::notification::{Notification, NotificationKind};
use crate::models::seller_profile::SellerProfile;
use crate::repositories::{account as account_repo, notification as notification_repo};
use crate::services::audit::{self, AuditContext};
use crate::utils::password;

/// Message of the notification created for every new account.
pub const WELCOME_MESSAGE: &str = "Welcome to Cars Platform!";

/// Registers an account. The account row, the seller profile (for sellers),
/// the welcome notification, and the audit entries all commit atomically.
pub async fn create_account(
    pool: &PgPool,
    ctx: &AuditContext,
    payload: RegisterRequest,
) -> Result<Account, AppError> {
    payload.validate()?;

    let password_hash = password::hash_password(&payload.password)?;
    let account = Account::new(
        payload.email,
        payload.username,
        password_hash,
        payload.role,
        payload.business_name,
    );

    let mut tx = pool.begin().await?;

    account_repo::insert_account(&mut *tx, &account).await?;
    audit::record_created(&mut *tx, ctx, &account).await?;

    if account.is_seller() {
        let profile = SellerProfile::new(account.id.clone());
        account_repo::insert_seller_profile(&mut *tx, &profile).await?;
    }

    let welcome = Notification::new(
        account.id.clone(),
        None,
        WELCOME_MESSAGE.to_string(),
        NotificationKind::Info,
    );
    notification_repo::insert_notification(&mut *tx, &welcome).await?;
    audit::record_created(&mut *tx, ctx, &welcome).await?;

    tx.commit().await?;

    Ok(account)
}
