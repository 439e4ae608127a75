//! In-memory store implementations.
//!
//! Deterministic stand-ins for the Postgres stores, used by the job tests
//! and for running the service locally without a database. Users keep
//! insertion order; backup posts are sorted by creation time on read.
//! A lock poisoned by a panicking thread is recovered rather than
//! propagated, so one broken test thread cannot take the store down.

use async_trait::async_trait;
use std::sync::Mutex;
use uuid::Uuid;

use crate::error::StoreError;
use crate::models::{BackupPost, User};
use crate::store::{BackupPostStore, UserStore};

/// In-memory `UserStore`
#[derive(Default)]
pub struct MemoryUserStore {
    users: Mutex<Vec<User>>,
    save_count: Mutex<usize>,
}

impl MemoryUserStore {
    pub fn new(users: Vec<User>) -> Self {
        Self {
            users: Mutex::new(users),
            save_count: Mutex::new(0),
        }
    }

    /// Current state of one user, if present
    pub fn get(&self, id: Uuid) -> Option<User> {
        self.users
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .find(|u| u.id == id)
            .cloned()
    }

    /// How many times `save` has been called
    pub fn save_count(&self) -> usize {
        *self.save_count.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn list_eligible(&self) -> Result<Vec<User>, StoreError> {
        let users = self.users.lock().unwrap_or_else(|e| e.into_inner());
        Ok(users.iter().filter(|u| u.is_eligible()).cloned().collect())
    }

    async fn save(&self, user: &User) -> Result<(), StoreError> {
        let mut users = self.users.lock().unwrap_or_else(|e| e.into_inner());
        let slot = users
            .iter_mut()
            .find(|u| u.id == user.id)
            .ok_or_else(|| StoreError::NotFound(format!("user {}", user.id)))?;
        *slot = user.clone();
        *self.save_count.lock().unwrap_or_else(|e| e.into_inner()) += 1;
        Ok(())
    }
}

/// In-memory `BackupPostStore`
#[derive(Default)]
pub struct MemoryBackupPostStore {
    posts: Mutex<Vec<BackupPost>>,
}

impl MemoryBackupPostStore {
    pub fn new(posts: Vec<BackupPost>) -> Self {
        Self {
            posts: Mutex::new(posts),
        }
    }

    /// Current state of one backup post, if present
    pub fn get(&self, id: Uuid) -> Option<BackupPost> {
        self.posts
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .find(|p| p.id == id)
            .cloned()
    }
}

#[async_trait]
impl BackupPostStore for MemoryBackupPostStore {
    async fn list_unused(&self, user_id: Uuid) -> Result<Vec<BackupPost>, StoreError> {
        let posts = self.posts.lock().unwrap_or_else(|e| e.into_inner());
        let mut unused: Vec<BackupPost> = posts
            .iter()
            .filter(|p| p.user_id == user_id && !p.used)
            .cloned()
            .collect();
        unused.sort_by_key(|p| p.created_at);
        Ok(unused)
    }

    async fn save(&self, post: &BackupPost) -> Result<(), StoreError> {
        let mut posts = self.posts.lock().unwrap_or_else(|e| e.into_inner());
        let slot = posts
            .iter_mut()
            .find(|p| p.id == post.id)
            .ok_or_else(|| StoreError::NotFound(format!("backup post {}", post.id)))?;
        *slot = post.clone();
        Ok(())
    }
}
