use async_trait::async_trait;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};
use std::time::Duration;
use uuid::Uuid;

use crate::error::StoreError;
use crate::models::{BackupPost, Plan, User};
use crate::store::{BackupPostStore, UserStore};

/// Create a PostgreSQL connection pool
pub async fn create_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    tracing::info!("Creating database connection pool...");

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .idle_timeout(Duration::from_secs(600))
        .max_lifetime(Duration::from_secs(1800))
        .connect(database_url)
        .await?;

    tracing::info!("Database connection pool created successfully");

    Ok(pool)
}

/// User store backed by the `users` table
#[derive(Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn user_from_row(row: &PgRow) -> Result<User, sqlx::Error> {
    let plan: String = row.try_get("plan")?;
    Ok(User {
        id: row.try_get("id")?,
        external_account_id: row.try_get("external_account_id")?,
        username: row.try_get("username")?,
        access_token: row.try_get("access_token")?,
        refresh_token: row.try_get("refresh_token")?,
        last_posted_at: row.try_get("last_posted_at")?,
        // Unknown plan values fall back to FREE, the schema default
        plan: plan.parse().unwrap_or(Plan::Free),
        is_active: row.try_get("is_active")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn list_eligible(&self) -> Result<Vec<User>, StoreError> {
        let rows = sqlx::query(
            "SELECT id, external_account_id, username, access_token, refresh_token, \
                    last_posted_at, plan, is_active, created_at, updated_at \
             FROM users \
             WHERE is_active = TRUE AND access_token IS NOT NULL \
             ORDER BY created_at ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        let users = rows
            .iter()
            .map(user_from_row)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(users)
    }

    async fn save(&self, user: &User) -> Result<(), StoreError> {
        let result = sqlx::query(
            "UPDATE users \
             SET access_token = $2, refresh_token = $3, last_posted_at = $4, updated_at = now() \
             WHERE id = $1",
        )
        .bind(user.id)
        .bind(user.access_token.as_deref())
        .bind(user.refresh_token.as_deref())
        .bind(user.last_posted_at)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(format!("user {}", user.id)));
        }
        Ok(())
    }
}

/// Backup post store backed by the `backup_posts` table
#[derive(Clone)]
pub struct PgBackupPostStore {
    pool: PgPool,
}

impl PgBackupPostStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn backup_post_from_row(row: &PgRow) -> Result<BackupPost, sqlx::Error> {
    Ok(BackupPost {
        id: row.try_get("id")?,
        user_id: row.try_get("user_id")?,
        content: row.try_get("content")?,
        used: row.try_get("used")?,
        used_at: row.try_get("used_at")?,
        created_at: row.try_get("created_at")?,
    })
}

#[async_trait]
impl BackupPostStore for PgBackupPostStore {
    async fn list_unused(&self, user_id: Uuid) -> Result<Vec<BackupPost>, StoreError> {
        let rows = sqlx::query(
            "SELECT id, user_id, content, used, used_at, created_at \
             FROM backup_posts \
             WHERE user_id = $1 AND used = FALSE \
             ORDER BY created_at ASC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        let posts = rows
            .iter()
            .map(backup_post_from_row)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(posts)
    }

    async fn save(&self, post: &BackupPost) -> Result<(), StoreError> {
        let result = sqlx::query(
            "UPDATE backup_posts SET used = $2, used_at = $3 WHERE id = $1",
        )
        .bind(post.id)
        .bind(post.used)
        .bind(post.used_at)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(format!("backup post {}", post.id)));
        }
        Ok(())
    }
}
