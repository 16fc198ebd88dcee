use anyhow::Context;
use serde::Serialize;
use sqlx::{FromRow, PgPool};
use time::{Date, OffsetDateTime};
use uuid::Uuid;

/// One recorded protein intake. Rows are never updated, only deleted.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct ProteinLog {
    pub id: Uuid,
    pub user_id: Uuid,
    pub food_name: String,
    pub protein_amount: f64,
    #[serde(with = "time::serde::rfc3339")]
    pub logged_at: OffsetDateTime,
}

#[derive(Debug, Clone, FromRow)]
pub struct LogStats {
    pub total_logs: i64,
    pub weekly_protein: f64,
    pub days_logged: i64,
}

pub async fn insert(
    db: &PgPool,
    user_id: Uuid,
    food_name: &str,
    protein_amount: f64,
) -> anyhow::Result<ProteinLog> {
    let log = sqlx::query_as::<_, ProteinLog>(
        r#"
        INSERT INTO protein_logs (user_id, food_name, protein_amount)
        VALUES ($1, $2, $3)
        RETURNING id, user_id, food_name, protein_amount, logged_at
        "#,
    )
    .bind(user_id)
    .bind(food_name)
    .bind(protein_amount)
    .fetch_one(db)
    .await
    .context("insert protein log")?;
    Ok(log)
}

/// Newest first, optionally restricted to one UTC calendar day.
pub async fn list_by_user(
    db: &PgPool,
    user_id: Uuid,
    on: Option<Date>,
    limit: i64,
) -> anyhow::Result<Vec<ProteinLog>> {
    let rows = sqlx::query_as::<_, ProteinLog>(
        r#"
        SELECT id, user_id, food_name, protein_amount, logged_at
        FROM protein_logs
        WHERE user_id = $1
          AND ($2::date IS NULL OR (logged_at AT TIME ZONE 'UTC')::date = $2)
        ORDER BY logged_at DESC
        LIMIT $3
        "#,
    )
    .bind(user_id)
    .bind(on)
    .bind(limit)
    .fetch_all(db)
    .await
    .context("list protein logs")?;
    Ok(rows)
}

/// Logs whose UTC calendar day falls in `[start, end]`, oldest first.
pub async fn list_between(
    db: &PgPool,
    user_id: Uuid,
    start: Date,
    end: Date,
) -> anyhow::Result<Vec<ProteinLog>> {
    let rows = sqlx::query_as::<_, ProteinLog>(
        r#"
        SELECT id, user_id, food_name, protein_amount, logged_at
        FROM protein_logs
        WHERE user_id = $1
          AND (logged_at AT TIME ZONE 'UTC')::date BETWEEN $2 AND $3
        ORDER BY logged_at ASC
        "#,
    )
    .bind(user_id)
    .bind(start)
    .bind(end)
    .fetch_all(db)
    .await
    .context("list protein logs in range")?;
    Ok(rows)
}

/// Returns false when no log with this id belongs to the user.
pub async fn delete(db: &PgPool, user_id: Uuid, log_id: Uuid) -> anyhow::Result<bool> {
    let result = sqlx::query(
        r#"
        DELETE FROM protein_logs
        WHERE id = $1 AND user_id = $2
        "#,
    )
    .bind(log_id)
    .bind(user_id)
    .execute(db)
    .await
    .context("delete protein log")?;
    Ok(result.rows_affected() > 0)
}

pub async fn stats_since(db: &PgPool, user_id: Uuid, since: Date) -> anyhow::Result<LogStats> {
    let stats = sqlx::query_as::<_, LogStats>(
        r#"
        SELECT
            (SELECT COUNT(*) FROM protein_logs WHERE user_id = $1) AS total_logs,
            COALESCE(SUM(protein_amount), 0)::float8 AS weekly_protein,
            COUNT(DISTINCT (logged_at AT TIME ZONE 'UTC')::date) AS days_logged
        FROM protein_logs
        WHERE user_id = $1
          AND (logged_at AT TIME ZONE 'UTC')::date >= $2
        "#,
    )
    .bind(user_id)
    .bind(since)
    .fetch_one(db)
    .await
    .context("protein log stats")?;
    Ok(stats)
}
