use sqlx::PgPool;

use crate::models::telemetry::EvTelemetry;

pub async fn insert_telemetry(pool: &PgPool, reading: &EvTelemetry) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO ev_telemetry \
         (id, vehicle_id, battery_level, range_estimate_km, location_lat, location_lon, \
         speed_kph, recorded_at) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
    )
    .bind(&reading.id)
    .bind(&reading.vehicle_id)
    .bind(reading.battery_level)
    .bind(reading.range_estimate_km)
    .bind(reading.location_lat)
    .bind(reading.location_lon)
    .bind(reading.speed_kph)
    .bind(reading.recorded_at)
    .execute(pool)
    .await
    .map(|_| ())
}

pub async fn list_for_vehicle(
    pool: &PgPool,
    vehicle_id: &str,
    limit: i64,
    offset: i64,
) -> Result<(Vec<EvTelemetry>, i64), sqlx::Error> {
    let items = sqlx::query_as::<_, EvTelemetry>(
        "SELECT id, vehicle_id, battery_level, range_estimate_km, location_lat, location_lon, \
         speed_kph, recorded_at FROM ev_telemetry WHERE vehicle_id = $1 \
         ORDER BY recorded_at DESC, id DESC LIMIT $2 OFFSET $3",
    )
    .bind(vehicle_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    let total =
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM ev_telemetry WHERE vehicle_id = $1")
            .bind(vehicle_id)
            .fetch_one(pool)
            .await?;

    Ok((items, total))
}
