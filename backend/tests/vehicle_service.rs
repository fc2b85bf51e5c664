use carsplatform_backend::{
    models::account::AccountRole,
    models::notification::{Notification, NotificationKind},
    models::vehicle::CreateVehicle,
    repositories::notification as notification_repo,
    repositories::vehicle as vehicle_repo,
    services::audit::AuditContext,
    services::vehicle as vehicle_service,
};

#[path = "support/mod.rs"]
mod support;

fn create_payload(vin: String) -> CreateVehicle {
    CreateVehicle {
        make: "Tesla".into(),
        model: "Model 3".into(),
        year: 2022,
        vin,
    }
}

async fn count_audit_rows(pool: &sqlx::PgPool, entity_id: &str, action: &str) -> i64 {
    sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM audit_logs \
         WHERE entity_kind = 'Vehicle' AND entity_id = $1 AND action = $2",
    )
    .bind(entity_id)
    .bind(action)
    .fetch_one(pool)
    .await
    .expect("count audit rows")
}

#[tokio::test]
async fn create_vehicle_writes_exactly_one_created_entry() {
    let pool = support::test_pool().await;
    let owner = support::seed_account(&pool, AccountRole::Seller).await;

    let ctx = AuditContext::new(Some(owner.id.clone()), "POST", "/api/vehicles", 201);
    let vehicle = vehicle_service::create_vehicle(
        &pool,
        &ctx,
        &owner,
        create_payload(support::unique_vin()),
        &support::NullMailer,
    )
    .await
    .expect("create vehicle");

    assert_eq!(count_audit_rows(&pool, &vehicle.id, "created").await, 1);

    let (actor, detail) = sqlx::query_as::<_, (Option<String>, String)>(
        "SELECT actor_id, detail FROM audit_logs \
         WHERE entity_kind = 'Vehicle' AND entity_id = $1 AND action = 'created'",
    )
    .bind(&vehicle.id)
    .fetch_one(&pool)
    .await
    .expect("fetch audit row");
    assert_eq!(actor.as_deref(), Some(owner.id.as_str()));
    assert_eq!(detail, "Vehicle created: Tesla Model 3 (2022)");
}

#[tokio::test]
async fn delete_vehicle_audits_once_and_detaches_notifications() {
    let pool = support::test_pool().await;
    let owner = support::seed_account(&pool, AccountRole::Seller).await;

    let create_ctx = AuditContext::new(Some(owner.id.clone()), "POST", "/api/vehicles", 201);
    let vehicle = vehicle_service::create_vehicle(
        &pool,
        &create_ctx,
        &owner,
        create_payload(support::unique_vin()),
        &support::NullMailer,
    )
    .await
    .expect("create vehicle");

    let notification = Notification::new(
        owner.id.clone(),
        Some(vehicle.id.clone()),
        "Vehicle listed".into(),
        NotificationKind::Info,
    );
    let mut conn = pool.acquire().await.expect("acquire connection");
    notification_repo::insert_notification(&mut conn, &notification)
        .await
        .expect("insert notification");
    drop(conn);

    let delete_ctx = AuditContext::new(
        Some(owner.id.clone()),
        "DELETE",
        format!("/api/vehicles/{}", vehicle.id),
        204,
    );
    vehicle_service::delete_vehicle(&pool, &delete_ctx, &vehicle)
        .await
        .expect("delete vehicle");

    let remaining = vehicle_repo::find_by_id(&pool, &vehicle.id)
        .await
        .expect("look up vehicle");
    assert!(remaining.is_none());

    // The notification outlives the vehicle it referenced.
    let kept = notification_repo::find_by_id(&pool, &notification.id)
        .await
        .expect("look up notification")
        .expect("notification survives vehicle deletion");
    assert!(kept.vehicle_id.is_none());
    assert_eq!(kept.recipient_id, owner.id);

    assert_eq!(count_audit_rows(&pool, &vehicle.id, "deleted").await, 1);
    assert_eq!(count_audit_rows(&pool, &vehicle.id, "created").await, 1);

    let notification_audit_rows = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM audit_logs WHERE entity_kind = 'Notification' AND entity_id = $1",
    )
    .bind(&notification.id)
    .fetch_one(&pool)
    .await
    .expect("count notification audit rows");
    assert_eq!(notification_audit_rows, 0);
}
