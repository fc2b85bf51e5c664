use carsplatform_backend::{
    models::account::AccountRole,
    models::account::RegisterRequest,
    services::account::{self as account_service, WELCOME_MESSAGE},
    services::audit::AuditContext,
};
use uuid::Uuid;

#[path = "support/mod.rs"]
mod support;

fn register_payload(role: AccountRole, business_name: Option<String>) -> RegisterRequest {
    let tag = Uuid::new_v4().simple().to_string();
    RegisterRequest {
        email: format!("reg_{tag}@example.com"),
        username: format!("reg_{tag}"),
        password: "correct-horse-battery".into(),
        role,
        business_name,
    }
}

fn register_ctx() -> AuditContext {
    AuditContext::new(None, "POST", "/api/auth/register", 201)
}

#[tokio::test]
async fn guest_registration_creates_account_welcome_notification_and_audit_rows() {
    let pool = support::test_pool().await;

    let account = account_service::create_account(&pool, &register_ctx(), register_payload(AccountRole::Guest, None))
        .await
        .expect("create account");

    let account_rows = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM accounts WHERE email = $1")
        .bind(&account.email)
        .fetch_one(&pool)
        .await
        .expect("count accounts");
    assert_eq!(account_rows, 1);

    let messages = sqlx::query_scalar::<_, String>(
        "SELECT message FROM notifications WHERE recipient_id = $1",
    )
    .bind(&account.id)
    .fetch_all(&pool)
    .await
    .expect("fetch notifications");
    assert_eq!(messages, vec![WELCOME_MESSAGE.to_string()]);

    let kind = sqlx::query_scalar::<_, String>(
        "SELECT kind FROM notifications WHERE recipient_id = $1",
    )
    .bind(&account.id)
    .fetch_one(&pool)
    .await
    .expect("fetch notification kind");
    assert_eq!(kind, "info");

    let profile_rows =
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM seller_profiles WHERE account_id = $1")
            .bind(&account.id)
            .fetch_one(&pool)
            .await
            .expect("count seller profiles");
    assert_eq!(profile_rows, 0);

    let account_audit_rows = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM audit_logs \
         WHERE entity_kind = 'Account' AND entity_id = $1 AND action = 'created'",
    )
    .bind(&account.id)
    .fetch_one(&pool)
    .await
    .expect("count account audit rows");
    assert_eq!(account_audit_rows, 1);

    let notification_audit_rows = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM audit_logs \
         WHERE entity_kind = 'Notification' AND actor_id = $1 AND action = 'created'",
    )
    .bind(&account.id)
    .fetch_one(&pool)
    .await
    .expect("count notification audit rows");
    assert_eq!(notification_audit_rows, 1);
}

#[tokio::test]
async fn registration_audit_row_holds_the_new_account_as_actor() {
    let pool = support::test_pool().await;

    let account = account_service::create_account(&pool, &register_ctx(), register_payload(AccountRole::Buyer, None))
        .await
        .expect("create account");

    // No authenticated actor at registration time, so the entry falls back
    // to the account itself.
    let actor = sqlx::query_scalar::<_, Option<String>>(
        "SELECT actor_id FROM audit_logs \
         WHERE entity_kind = 'Account' AND entity_id = $1 AND action = 'created'",
    )
    .bind(&account.id)
    .fetch_one(&pool)
    .await
    .expect("fetch audit actor");
    assert_eq!(actor.as_deref(), Some(account.id.as_str()));
}

#[tokio::test]
async fn seller_registration_creates_exactly_one_profile() {
    let pool = support::test_pool().await;

    let account = account_service::create_account(
        &pool,
        &register_ctx(),
        register_payload(AccountRole::Seller, Some("Sally Motors".into())),
    )
    .await
    .expect("create account");

    let profile_rows =
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM seller_profiles WHERE account_id = $1")
            .bind(&account.id)
            .fetch_one(&pool)
            .await
            .expect("count seller profiles");
    assert_eq!(profile_rows, 1);
}
