use anyhow::Context;
use serde::Serialize;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use super::proximity::{BoundingBox, Coordinate};

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Store {
    pub id: Uuid,
    pub name: String,
    pub address: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl Store {
    /// Position of the store, if both coordinates are known.
    pub fn coordinate(&self) -> Option<Coordinate> {
        Some(Coordinate {
            latitude: self.latitude?,
            longitude: self.longitude?,
        })
    }
}

pub struct NewStore {
    pub name: &'static str,
    pub address: &'static str,
    pub latitude: f64,
    pub longitude: f64,
}

pub async fn list(db: &PgPool, search: Option<&str>, limit: i64) -> anyhow::Result<Vec<Store>> {
    let rows = sqlx::query_as::<_, Store>(
        r#"
        SELECT id, name, address, latitude, longitude
        FROM stores
        WHERE ($1::text IS NULL OR name ILIKE '%' || $1 || '%')
        ORDER BY name
        LIMIT $2
        "#,
    )
    .bind(search)
    .bind(limit)
    .fetch_all(db)
    .await
    .context("list stores")?;
    Ok(rows)
}

pub async fn find(db: &PgPool, store_id: Uuid) -> anyhow::Result<Option<Store>> {
    let store = sqlx::query_as::<_, Store>(
        r#"
        SELECT id, name, address, latitude, longitude
        FROM stores
        WHERE id = $1
        "#,
    )
    .bind(store_id)
    .fetch_optional(db)
    .await
    .context("find store")?;
    Ok(store)
}

/// Stores with known coordinates, optionally limited to a bounding box.
pub async fn catalog(db: &PgPool, bounds: Option<BoundingBox>) -> anyhow::Result<Vec<Store>> {
    let rows = match bounds {
        Some(b) => {
            sqlx::query_as::<_, Store>(
                r#"
                SELECT id, name, address, latitude, longitude
                FROM stores
                WHERE latitude BETWEEN $1 AND $2
                  AND longitude BETWEEN $3 AND $4
                "#,
            )
            .bind(b.min_latitude)
            .bind(b.max_latitude)
            .bind(b.min_longitude)
            .bind(b.max_longitude)
            .fetch_all(db)
            .await
        }
        None => {
            sqlx::query_as::<_, Store>(
                r#"
                SELECT id, name, address, latitude, longitude
                FROM stores
                WHERE latitude IS NOT NULL AND longitude IS NOT NULL
                "#,
            )
            .fetch_all(db)
            .await
        }
    }
    .context("load store catalog")?;
    Ok(rows)
}

/// Blocks a concurrent seed until this one commits, so the emptiness check
/// cannot race. Plain reads are not blocked.
const SEED_LOCK: &str = "LOCK TABLE stores IN SHARE ROW EXCLUSIVE MODE";

/// Inserts `stores` unless the table already has rows. Returns whether
/// anything was inserted and the resulting row count.
pub async fn seed_if_empty(db: &PgPool, stores: &[NewStore]) -> anyhow::Result<(bool, i64)> {
    let mut tx = db.begin().await.context("begin store seed")?;
    sqlx::query(SEED_LOCK)
        .execute(&mut *tx)
        .await
        .context("lock stores for seeding")?;
    let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM stores")
        .fetch_one(&mut *tx)
        .await
        .context("count stores")?;
    if existing > 0 {
        return Ok((false, existing));
    }

    for s in stores {
        sqlx::query(
            r#"
            INSERT INTO stores (name, address, latitude, longitude)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(s.name)
        .bind(s.address)
        .bind(s.latitude)
        .bind(s.longitude)
        .execute(&mut *tx)
        .await
        .context("insert store")?;
    }
    tx.commit().await.context("commit store seed")?;
    Ok((true, stores.len() as i64))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_lock_is_self_conflicting() {
        // SHARE ROW EXCLUSIVE conflicts with itself; SHARE would not.
        assert_eq!(SEED_LOCK, "LOCK TABLE stores IN SHARE ROW EXCLUSIVE MODE");
    }
}
