use sqlx::{PgConnection, PgPool};

use crate::models::notification::Notification;

pub async fn insert_notification(
    conn: &mut PgConnection,
    notification: &Notification,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO notifications (id, recipient_id, vehicle_id, message, kind, is_read, created_at) \
         VALUES ($1, $2, $3, $4, $5, $6, $7)",
    )
    .bind(&notification.id)
    .bind(&notification.recipient_id)
    .bind(&notification.vehicle_id)
    .bind(&notification.message)
    .bind(notification.kind)
    .bind(notification.is_read)
    .bind(notification.created_at)
    .execute(conn)
    .await
    .map(|_| ())
}

pub async fn find_by_id(pool: &PgPool, id: &str) -> Result<Option<Notification>, sqlx::Error> {
    sqlx::query_as::<_, Notification>(
        "SELECT id, recipient_id, vehicle_id, message, kind, is_read, created_at \
         FROM notifications WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn list_for_recipient(
    pool: &PgPool,
    recipient_id: &str,
    limit: i64,
    offset: i64,
) -> Result<(Vec<Notification>, i64), sqlx::Error> {
    let items = sqlx::query_as::<_, Notification>(
        "SELECT id, recipient_id, vehicle_id, message, kind, is_read, created_at \
         FROM notifications WHERE recipient_id = $1 \
         ORDER BY created_at DESC, id DESC LIMIT $2 OFFSET $3",
    )
    .bind(recipient_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    let total =
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM notifications WHERE recipient_id = $1")
            .bind(recipient_id)
            .fetch_one(pool)
            .await?;

    Ok((items, total))
}

pub async fn set_read(conn: &mut PgConnection, id: &str) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE notifications SET is_read = TRUE WHERE id = $1")
        .bind(id)
        .execute(conn)
        .await
        .map(|_| ())
}
