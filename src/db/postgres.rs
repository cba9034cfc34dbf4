use chrono::Utc;
use sqlx::{postgres::PgPoolOptions, types::Json, PgPool};

use crate::{
    db::profile_store::{parse_profile, storage_key, ProfileStore},
    error::{AppError, AppResult},
    models::UserProfile,
};

/// Creates a PostgreSQL connection pool
///
/// Establishes a pool of database connections for efficient reuse.
/// The pool automatically manages connection lifecycle and limits.
pub async fn create_pool(database_url: &str) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await?;

    Ok(pool)
}

/// Applies the embedded schema migrations
pub async fn run_migrations(pool: &PgPool) -> anyhow::Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

/// Profile store backed by the `user_profiles` table
///
/// Each save is a single-row upsert, which gives atomic per-key overwrite.
#[derive(Clone)]
pub struct PgProfileStore {
    pool: PgPool,
}

impl PgProfileStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl ProfileStore for PgProfileStore {
    async fn load(&self, name: &str) -> AppResult<UserProfile> {
        let key = storage_key(name)?;

        let row: Option<(Json<serde_json::Value>,)> =
            sqlx::query_as("SELECT record FROM user_profiles WHERE storage_key = $1")
                .bind(&key)
                .fetch_optional(&self.pool)
                .await?;

        match row {
            Some((Json(record),)) => {
                let bytes = serde_json::to_vec(&record)
                    .map_err(|e| AppError::Internal(format!("Record re-encoding error: {}", e)))?;
                parse_profile(name, &bytes)
            }
            None => Ok(UserProfile::new(name)),
        }
    }

    async fn save(&self, profile: &UserProfile) -> AppResult<()> {
        let key = storage_key(profile.name())?;

        sqlx::query(
            r#"
            INSERT INTO user_profiles (storage_key, name, record, updated_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (storage_key)
            DO UPDATE SET record = EXCLUDED.record, updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(&key)
        .bind(profile.name())
        .bind(Json(profile))
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Storage(format!("failed to upsert profile: {}", e)))?;

        tracing::debug!(user = %profile.name(), "Saved profile to Postgres");
        Ok(())
    }

    async fn exists(&self, name: &str) -> AppResult<bool> {
        let key = storage_key(name)?;

        let row: Option<(i32,)> =
            sqlx::query_as("SELECT 1 FROM user_profiles WHERE storage_key = $1")
                .bind(&key)
                .fetch_optional(&self.pool)
                .await?;

        Ok(row.is_some())
    }

    fn name(&self) -> &'static str {
        "postgres"
    }
}
