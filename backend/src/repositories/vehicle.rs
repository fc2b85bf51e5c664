use sqlx::{PgConnection, PgPool, Postgres, QueryBuilder};

use crate::models::vehicle::Vehicle;

/// Optional equality filters applied to vehicle listings.
#[derive(Debug, Clone, Default)]
pub struct VehicleFilters {
    pub make: Option<String>,
    pub model: Option<String>,
    pub year: Option<i32>,
}

pub async fn insert_vehicle(conn: &mut PgConnection, vehicle: &Vehicle) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO vehicles (id, owner_id, make, model, year, vin, created_at) \
         VALUES ($1, $2, $3, $4, $5, $6, $7)",
    )
    .bind(&vehicle.id)
    .bind(&vehicle.owner_id)
    .bind(&vehicle.make)
    .bind(&vehicle.model)
    .bind(vehicle.year)
    .bind(&vehicle.vin)
    .bind(vehicle.created_at)
    .execute(conn)
    .await
    .map(|_| ())
}

pub async fn update_vehicle(conn: &mut PgConnection, vehicle: &Vehicle) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE vehicles SET make = $2, model = $3, year = $4 WHERE id = $1")
        .bind(&vehicle.id)
        .bind(&vehicle.make)
        .bind(&vehicle.model)
        .bind(vehicle.year)
        .execute(conn)
        .await
        .map(|_| ())
}

pub async fn delete_vehicle(conn: &mut PgConnection, id: &str) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM vehicles WHERE id = $1")
        .bind(id)
        .execute(conn)
        .await
        .map(|_| ())
}

pub async fn find_by_id(pool: &PgPool, id: &str) -> Result<Option<Vehicle>, sqlx::Error> {
    sqlx::query_as::<_, Vehicle>(
        "SELECT id, owner_id, make, model, year, vin, created_at FROM vehicles WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn list_vehicles(
    pool: &PgPool,
    filters: &VehicleFilters,
    limit: i64,
    offset: i64,
) -> Result<(Vec<Vehicle>, i64), sqlx::Error> {
    let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(
        "SELECT id, owner_id, make, model, year, vin, created_at FROM vehicles",
    );
    let mut has_clause = false;
    apply_vehicle_filters(&mut builder, &mut has_clause, filters);
    builder.push(" ORDER BY created_at DESC, id DESC");
    builder
        .push(" LIMIT ")
        .push_bind(limit)
        .push(" OFFSET ")
        .push_bind(offset);
    let items = builder.build_query_as::<Vehicle>().fetch_all(pool).await?;

    let mut count_builder: QueryBuilder<Postgres> =
        QueryBuilder::new("SELECT COUNT(*) FROM vehicles");
    let mut count_has_clause = false;
    apply_vehicle_filters(&mut count_builder, &mut count_has_clause, filters);
    let total = count_builder
        .build_query_scalar::<i64>()
        .fetch_one(pool)
        .await?;

    Ok((items, total))
}

pub async fn list_for_owner(pool: &PgPool, owner_id: &str) -> Result<Vec<Vehicle>, sqlx::Error> {
    sqlx::query_as::<_, Vehicle>(
        "SELECT id, owner_id, make, model, year, vin, created_at FROM vehicles \
         WHERE owner_id = $1 ORDER BY created_at DESC, id DESC",
    )
    .bind(owner_id)
    .fetch_all(pool)
    .await
}

pub async fn list_all(pool: &PgPool) -> Result<Vec<Vehicle>, sqlx::Error> {
    sqlx::query_as::<_, Vehicle>(
        "SELECT id, owner_id, make, model, year, vin, created_at FROM vehicles \
         ORDER BY created_at DESC, id DESC",
    )
    .fetch_all(pool)
    .await
}

fn apply_vehicle_filters(
    builder: &mut QueryBuilder<'_, Postgres>,
    has_clause: &mut bool,
    filters: &VehicleFilters,
) {
    if let Some(make) = filters.make.as_ref() {
        push_clause(builder, has_clause);
        builder.push("make = ").push_bind(make.to_string());
    }
    if let Some(model) = filters.model.as_ref() {
        push_clause(builder, has_clause);
        builder.push("model = ").push_bind(model.to_string());
    }
    if let Some(year) = filters.year {
        push_clause(builder, has_clause);
        builder.push("year = ").push_bind(year);
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vehicle_filters_default_all_none() {
        let filters = VehicleFilters::default();
        assert!(filters.make.is_none());
        assert!(filters.model.is_none());
        assert!(filters.year.is_none());
    }
}
