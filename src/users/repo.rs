use anyhow::Context;
use serde::Serialize;
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

pub const DEFAULT_PROTEIN_GOAL: i32 = 120;

/// Profile of an authenticated user. Identity itself lives with the
/// token issuer; only nutrition preferences are stored here.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub full_name: Option<String>,
    pub location: Option<String>,
    pub protein_goal: i32,
    pub is_active: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339::option")]
    pub updated_at: Option<OffsetDateTime>,
}

#[derive(Debug, Default)]
pub struct ProfileChanges<'a> {
    pub full_name: Option<&'a str>,
    pub location: Option<&'a str>,
    pub protein_goal: Option<i32>,
}

/// Loads the profile, creating a default one on first sight of this user.
pub async fn find_or_provision(db: &PgPool, user_id: Uuid) -> anyhow::Result<User> {
    sqlx::query(
        r#"
        INSERT INTO users (id, protein_goal)
        VALUES ($1, $2)
        ON CONFLICT (id) DO NOTHING
        "#,
    )
    .bind(user_id)
    .bind(DEFAULT_PROTEIN_GOAL)
    .execute(db)
    .await
    .context("provision user profile")?;

    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT id, full_name, location, protein_goal, is_active, created_at, updated_at
        FROM users
        WHERE id = $1
        "#,
    )
    .bind(user_id)
    .fetch_one(db)
    .await
    .context("load user profile")?;
    Ok(user)
}

/// Applies only the supplied fields.
pub async fn update(
    db: &PgPool,
    user_id: Uuid,
    changes: &ProfileChanges<'_>,
) -> anyhow::Result<User> {
    let user = sqlx::query_as::<_, User>(
        r#"
        UPDATE users
        SET full_name    = COALESCE($2, full_name),
            location     = COALESCE($3, location),
            protein_goal = COALESCE($4, protein_goal),
            updated_at   = now()
        WHERE id = $1
        RETURNING id, full_name, location, protein_goal, is_active, created_at, updated_at
        "#,
    )
    .bind(user_id)
    .bind(changes.full_name)
    .bind(changes.location)
    .bind(changes.protein_goal)
    .fetch_one(db)
    .await
    .context("update user profile")?;
    Ok(user)
}
