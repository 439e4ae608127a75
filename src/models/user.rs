use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

use crate::constants::{DUE_AFTER_HOURS, FREE_PLAN_UNUSED_LIMIT, NEVER_POSTED_HOURS};

/// Subscription plan, stored as uppercase text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Plan {
    #[default]
    Free,
    Premium,
    Pro,
}

#[derive(Debug, Error)]
#[error("unknown plan: {0}")]
pub struct UnknownPlan(String);

impl FromStr for Plan {
    type Err = UnknownPlan;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "FREE" => Ok(Plan::Free),
            "PREMIUM" => Ok(Plan::Premium),
            "PRO" => Ok(Plan::Pro),
            other => Err(UnknownPlan(other.to_string())),
        }
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Plan::Free => "FREE",
            Plan::Premium => "PREMIUM",
            Plan::Pro => "PRO",
        };
        f.write_str(label)
    }
}

impl Plan {
    /// Maximum unused backup posts this plan may hold, `None` meaning
    /// unlimited. The creation path enforces this; the streak check only
    /// reads it indirectly by consuming whatever exists.
    pub fn unused_backup_limit(&self) -> Option<usize> {
        match self {
            Plan::Free => Some(FREE_PLAN_UNUSED_LIMIT),
            Plan::Premium | Plan::Pro => None,
        }
    }

    /// Whether a user on this plan with `unused_count` unused backup posts
    /// may add another one
    pub fn allows_more_unused(&self, unused_count: usize) -> bool {
        match self.unused_backup_limit() {
            Some(limit) => unused_count < limit,
            None => true,
        }
    }
}

/// A registered user with an optionally linked social account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    /// Id of the linked account on the social platform, unique when present
    pub external_account_id: Option<String>,
    pub username: Option<String>,
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    /// Last post this system knows about, on-platform or backup
    pub last_posted_at: Option<DateTime<Utc>>,
    pub plan: Plan,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Eligible for automatic posting: active with a linked access token
    pub fn is_eligible(&self) -> bool {
        self.is_active && self.access_token.is_some()
    }

    /// Whole hours since the last recorded post, floored. Users who have
    /// never posted get a sentinel large enough to always be overdue.
    pub fn hours_since_last_post(&self, now: DateTime<Utc>) -> i64 {
        match self.last_posted_at {
            Some(last) => (now - last).num_hours(),
            None => NEVER_POSTED_HOURS,
        }
    }

    /// Whole days the current posting streak has been running
    pub fn streak_days(&self, now: DateTime<Utc>) -> i64 {
        match self.last_posted_at {
            Some(last) => (now - last).num_days(),
            None => 0,
        }
    }

    /// A streak is alive while the last post is under the due threshold
    pub fn has_active_streak(&self, now: DateTime<Utc>) -> bool {
        self.last_posted_at.is_some() && self.hours_since_last_post(now) < DUE_AFTER_HOURS
    }

    /// Label for log lines: username, else the external account id
    pub fn display_label(&self) -> &str {
        self.username
            .as_deref()
            .or(self.external_account_id.as_deref())
            .unwrap_or("<unlinked>")
    }
}
