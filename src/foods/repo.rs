use anyhow::Context;
use serde::Serialize;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Food {
    pub id: Uuid,
    pub name: String,
    pub protein_per_100g: f64,
    pub category: Option<String>,
    pub is_vegan: bool,
    pub image_url: Option<String>,
}

pub struct NewFood {
    pub name: &'static str,
    pub protein_per_100g: f64,
    pub category: &'static str,
    pub is_vegan: bool,
}

#[derive(Debug, Default)]
pub struct FoodFilter<'a> {
    pub search: Option<&'a str>,
    pub category: Option<&'a str>,
    pub vegan_only: bool,
    pub limit: i64,
}

/// Highest protein density first.
pub async fn list(db: &PgPool, filter: &FoodFilter<'_>) -> anyhow::Result<Vec<Food>> {
    let rows = sqlx::query_as::<_, Food>(
        r#"
        SELECT id, name, protein_per_100g, category, is_vegan, image_url
        FROM foods
        WHERE ($1::text IS NULL OR name ILIKE '%' || $1 || '%')
          AND ($2::text IS NULL OR category = $2)
          AND (NOT $3 OR is_vegan)
        ORDER BY protein_per_100g DESC
        LIMIT $4
        "#,
    )
    .bind(filter.search)
    .bind(filter.category)
    .bind(filter.vegan_only)
    .bind(filter.limit)
    .fetch_all(db)
    .await
    .context("list foods")?;
    Ok(rows)
}

pub async fn categories(db: &PgPool) -> anyhow::Result<Vec<String>> {
    let rows = sqlx::query_scalar::<_, String>(
        r#"
        SELECT DISTINCT category
        FROM foods
        WHERE category IS NOT NULL
        ORDER BY category
        "#,
    )
    .fetch_all(db)
    .await
    .context("list food categories")?;
    Ok(rows)
}

pub async fn find(db: &PgPool, food_id: Uuid) -> anyhow::Result<Option<Food>> {
    let food = sqlx::query_as::<_, Food>(
        r#"
        SELECT id, name, protein_per_100g, category, is_vegan, image_url
        FROM foods
        WHERE id = $1
        "#,
    )
    .bind(food_id)
    .fetch_optional(db)
    .await
    .context("find food")?;
    Ok(food)
}

/// Blocks a concurrent seed until this one commits, so the emptiness check
/// cannot race. Plain reads are not blocked.
const SEED_LOCK: &str = "LOCK TABLE foods IN SHARE ROW EXCLUSIVE MODE";

/// Inserts `foods` unless the table already has rows. Returns whether
/// anything was inserted and the resulting row count.
pub async fn seed_if_empty(db: &PgPool, foods: &[NewFood]) -> anyhow::Result<(bool, i64)> {
    let mut tx = db.begin().await.context("begin food seed")?;
    sqlx::query(SEED_LOCK)
        .execute(&mut *tx)
        .await
        .context("lock foods for seeding")?;
    let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM foods")
        .fetch_one(&mut *tx)
        .await
        .context("count foods")?;
    if existing > 0 {
        return Ok((false, existing));
    }

    for f in foods {
        sqlx::query(
            r#"
            INSERT INTO foods (name, protein_per_100g, category, is_vegan)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(f.name)
        .bind(f.protein_per_100g)
        .bind(f.category)
        .bind(f.is_vegan)
        .execute(&mut *tx)
        .await
        .context("insert food")?;
    }
    tx.commit().await.context("commit food seed")?;
    Ok((true, foods.len() as i64))
}
