//! Daily streak reconciliation.
//!
//! Walks the eligible-user snapshot once, asks the gateway whether each
//! user has posted recently, and publishes their oldest unused backup
//! post when they are 24+ hours quiet. One user's failure never blocks
//! the rest of the run.

use chrono::{DateTime, Utc};

use crate::constants::DUE_AFTER_HOURS;
use crate::error::StoreError;
use crate::gateway::Gateway;
use crate::models::User;
use crate::store::{BackupPostStore, UserStore};

/// What happened to a single user during a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserOutcome {
    /// Not due: posted recently enough, possibly after reconciling the
    /// stored last-post time with newer on-platform activity
    UpToDate,
    /// Due, and a backup post was published and consumed
    Posted,
    /// Due, but the user has no unused backup posts left
    OutOfBackups,
    /// Due, but loading a backup, the post attempt, or its persistence
    /// failed
    PostFailed,
    /// The activity check or reconcile write failed; user skipped
    CheckFailed,
}

/// Run-level counters, built by folding per-user outcomes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub users_checked: u64,
    pub users_due: u64,
    pub posts_made: u64,
    pub errors: u64,
}

impl RunSummary {
    /// Fold one user's outcome into the summary
    pub fn absorb(mut self, outcome: UserOutcome) -> Self {
        self.users_checked += 1;
        match outcome {
            UserOutcome::UpToDate => {}
            UserOutcome::Posted => {
                self.users_due += 1;
                self.posts_made += 1;
            }
            UserOutcome::OutOfBackups => {
                self.users_due += 1;
            }
            UserOutcome::PostFailed => {
                self.users_due += 1;
                self.errors += 1;
            }
            UserOutcome::CheckFailed => {
                self.errors += 1;
            }
        }
        self
    }
}

/// The reconciliation job, a pure function of its collaborators.
/// Schedule registration lives in [`crate::jobs::scheduler`] so the job
/// can run under test without a timer.
pub struct StreakCheckJob<U, B, G> {
    users: U,
    backups: B,
    gateway: G,
}

impl<U, B, G> StreakCheckJob<U, B, G>
where
    U: UserStore,
    B: BackupPostStore,
    G: Gateway,
{
    pub fn new(users: U, backups: B, gateway: G) -> Self {
        Self {
            users,
            backups,
            gateway,
        }
    }

    /// Zero-argument entry point for the scheduler or a manual operator
    /// invocation. Logs the summary, or the setup failure that ended the
    /// run early; never returns an error.
    pub async fn run_once(&self) {
        tracing::info!("Starting daily streak check at {}", Utc::now());

        match self.run_at(Utc::now()).await {
            Ok(summary) => {
                tracing::info!(
                    users_checked = summary.users_checked,
                    users_due = summary.users_due,
                    posts_made = summary.posts_made,
                    errors = summary.errors,
                    "Streak check completed"
                );
            }
            Err(err) => {
                tracing::error!("Streak check aborted, could not load eligible users: {err}");
            }
        }
    }

    /// One full run against a fixed `now`. Errors only if the eligible
    /// population itself cannot be fetched; every per-user failure is
    /// absorbed into the summary.
    pub async fn run_at(&self, now: DateTime<Utc>) -> Result<RunSummary, StoreError> {
        let eligible = self.users.list_eligible().await?;

        tracing::info!(
            "Checking {} active users with linked accounts",
            eligible.len()
        );

        let mut summary = RunSummary::default();
        for user in eligible {
            let outcome = self.process_user(user, now).await;
            summary = summary.absorb(outcome);
        }

        Ok(summary)
    }

    /// Process a single user. Every failure is mapped to an outcome so the
    /// caller's loop keeps going.
    async fn process_user(&self, mut user: User, now: DateTime<Utc>) -> UserOutcome {
        // list_eligible guarantees a token; guard anyway so a racing
        // credential disconnect cannot panic the run
        let Some(access_token) = user.access_token.clone() else {
            tracing::error!(
                "User {} lost access token between snapshot and processing",
                user.display_label()
            );
            return UserOutcome::CheckFailed;
        };

        // 1. Ask the platform what it has seen from this user
        let activity = match self
            .gateway
            .check_recent_activity(&access_token, user.external_account_id.as_deref())
            .await
        {
            Ok(activity) => activity,
            Err(err) => {
                tracing::error!(
                    "Failed to check recent activity for {}: {err}",
                    user.display_label()
                );
                return UserOutcome::CheckFailed;
            }
        };

        // 2. Due = quiet on-platform AND 24+ hours since our last record
        let hours_since_last_post = user.hours_since_last_post(now);
        let due = !activity.has_posted_recently && hours_since_last_post >= DUE_AFTER_HOURS;

        if !due {
            // 3. Reconcile activity performed outside this system: adopt
            // the platform's last-post time when it is newer than ours
            if let Some(platform_time) = activity.last_post_time {
                let newer = user
                    .last_posted_at
                    .map_or(true, |stored| platform_time > stored);
                if newer {
                    user.last_posted_at = Some(platform_time);
                    if let Err(err) = self.users.save(&user).await {
                        tracing::error!(
                            "Failed to reconcile last-post time for {}: {err}",
                            user.display_label()
                        );
                        return UserOutcome::CheckFailed;
                    }
                }
            }
            return UserOutcome::UpToDate;
        }

        // 4. Consume the oldest unused backup post
        let unused = match self.backups.list_unused(user.id).await {
            Ok(unused) => unused,
            Err(err) => {
                tracing::error!(
                    "Failed to load backup posts for {}: {err}",
                    user.display_label()
                );
                return UserOutcome::PostFailed;
            }
        };

        let Some(mut backup) = unused.into_iter().next() else {
            tracing::warn!(
                "User {} needs a post but has no backup posts available \
                 (last posted {hours_since_last_post} hours ago)",
                user.display_label()
            );
            return UserOutcome::OutOfBackups;
        };

        tracing::info!("Posting backup content for user: {}", user.display_label());

        match self.gateway.post(&access_token, &backup.content).await {
            Ok(receipt) => {
                backup.mark_used(now);
                if let Err(err) = self.backups.save(&backup).await {
                    tracing::error!(
                        "Posted for {} but failed to mark backup {} used: {err}",
                        user.display_label(),
                        backup.id
                    );
                    return UserOutcome::PostFailed;
                }

                user.last_posted_at = Some(now);
                if let Err(err) = self.users.save(&user).await {
                    tracing::error!(
                        "Posted for {} but failed to update last-post time: {err}",
                        user.display_label()
                    );
                    return UserOutcome::PostFailed;
                }

                tracing::info!(
                    post_id = %receipt.external_post_id,
                    "Posted backup content for {}",
                    user.display_label()
                );
                UserOutcome::Posted
            }
            Err(err) => {
                tracing::error!(
                    "Failed to post backup content for {}: {err}",
                    user.display_label()
                );
                // The backup post stays unused and is retried next run
                if err.is_auth_error() {
                    self.try_refresh_credentials(&mut user).await;
                }
                UserOutcome::PostFailed
            }
        }
    }

    /// Best-effort credential refresh after an auth-classified post
    /// failure. Logged either way, never escalated.
    async fn try_refresh_credentials(&self, user: &mut User) {
        let Some(refresh_token) = user.refresh_token.clone() else {
            tracing::warn!(
                "Cannot refresh credentials for {}: no refresh token on record",
                user.display_label()
            );
            return;
        };

        tracing::info!("Attempting token refresh for {}", user.display_label());

        match self.gateway.refresh(&refresh_token).await {
            Ok(rotated) => {
                user.access_token = Some(rotated.access_token);
                user.refresh_token = Some(rotated.refresh_token);
                match self.users.save(user).await {
                    Ok(()) => {
                        tracing::info!("Token refreshed for {}", user.display_label());
                    }
                    Err(err) => {
                        tracing::error!(
                            "Refreshed token for {} but failed to persist it: {err}",
                            user.display_label()
                        );
                    }
                }
            }
            Err(err) => {
                tracing::error!("Token refresh failed for {}: {err}", user.display_label());
            }
        }
    }
}
