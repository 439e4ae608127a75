use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::MAX_POST_CONTENT_CHARS;

/// A pre-authored post held in reserve, consumed oldest-first when its
/// owner's streak is about to lapse
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackupPost {
    pub id: Uuid,
    pub user_id: Uuid,
    pub content: String,
    pub used: bool,
    pub used_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl BackupPost {
    /// Validate post content: non-empty and within the platform length cap
    pub fn validate_content(content: &str) -> bool {
        let trimmed = content.trim();
        !trimmed.is_empty() && trimmed.chars().count() <= MAX_POST_CONTENT_CHARS
    }

    /// Mark this post consumed. Sets both fields together so a used post
    /// always carries its consumption time.
    pub fn mark_used(&mut self, now: DateTime<Utc>) {
        self.used = true;
        self.used_at = Some(now);
    }
}
