//! Collaborator contracts for persistence.
//!
//! The streak check only reads the eligible-user snapshot and unused
//! backup posts, and writes back individual records. Record creation and
//! deletion belong to the CRUD surface, which lives outside this service.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::StoreError;
use crate::models::{BackupPost, User};

pub use memory::{MemoryBackupPostStore, MemoryUserStore};
pub use postgres::{create_pool, PgBackupPostStore, PgUserStore};

/// Persistence of user accounts and their linked credentials
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Snapshot of users that are active and hold an access token.
    /// Changes made after this call are not re-observed within a run.
    async fn list_eligible(&self) -> Result<Vec<User>, StoreError>;

    /// Persist the fields the reconciliation job mutates on an existing
    /// user: the access/refresh token pair and `last_posted_at`. Other
    /// fields (plan, active flag, identity) belong to the CRUD surface
    /// and are left untouched. Point write, last-writer-wins.
    async fn save(&self, user: &User) -> Result<(), StoreError>;
}

/// Persistence of pre-authored backup posts
#[async_trait]
pub trait BackupPostStore: Send + Sync {
    /// Unused backup posts for one user, oldest first (FIFO consumption
    /// order).
    async fn list_unused(&self, user_id: Uuid) -> Result<Vec<BackupPost>, StoreError>;

    /// Persist mutated fields of an existing backup post
    async fn save(&self, post: &BackupPost) -> Result<(), StoreError>;
}

#[async_trait]
impl<T: UserStore + ?Sized> UserStore for std::sync::Arc<T> {
    async fn list_eligible(&self) -> Result<Vec<User>, StoreError> {
        (**self).list_eligible().await
    }

    async fn save(&self, user: &User) -> Result<(), StoreError> {
        (**self).save(user).await
    }
}

#[async_trait]
impl<T: BackupPostStore + ?Sized> BackupPostStore for std::sync::Arc<T> {
    async fn list_unused(&self, user_id: Uuid) -> Result<Vec<BackupPost>, StoreError> {
        (**self).list_unused(user_id).await
    }

    async fn save(&self, post: &BackupPost) -> Result<(), StoreError> {
        (**self).save(post).await
    }
}
