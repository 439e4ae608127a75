//! Stand-in gateway implementation.
//!
//! The platform integration is not wired up yet; this stub logs what it
//! would do and returns well-formed responses, so the rest of the service
//! runs end to end. `check_recent_activity` always reports no recent
//! activity and `refresh` echoes the refresh token back as both halves of
//! the new pair.

use async_trait::async_trait;
use chrono::Utc;

use crate::error::GatewayError;
use crate::gateway::{Gateway, PostReceipt, RecentActivity, RefreshedCredentials};

const STUB_TOKEN_TTL_SECS: i64 = 7200;

/// Gateway stand-in used until the real platform client lands
#[derive(Debug, Default, Clone)]
pub struct StubGateway;

impl StubGateway {
    pub fn new() -> Self {
        Self
    }
}

/// First `max` characters of `s`, for log lines
fn preview(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

#[async_trait]
impl Gateway for StubGateway {
    async fn check_recent_activity(
        &self,
        _access_token: &str,
        external_account_id: Option<&str>,
    ) -> Result<RecentActivity, GatewayError> {
        tracing::debug!(
            "Checking recent posts for account: {}",
            external_account_id.unwrap_or("<unknown>")
        );

        Ok(RecentActivity {
            has_posted_recently: false,
            last_post_time: None,
        })
    }

    async fn post(&self, access_token: &str, content: &str) -> Result<PostReceipt, GatewayError> {
        let now = Utc::now();
        tracing::info!(
            "Would post: \"{}...\" (token {}...)",
            preview(content, 50),
            preview(access_token, 20)
        );

        Ok(PostReceipt {
            external_post_id: format!("mock_{}", now.timestamp_millis()),
            posted_at: now,
        })
    }

    async fn refresh(&self, refresh_token: &str) -> Result<RefreshedCredentials, GatewayError> {
        tracing::info!("Refreshing access token...");

        Ok(RefreshedCredentials {
            access_token: refresh_token.to_string(),
            refresh_token: refresh_token.to_string(),
            expires_in_secs: STUB_TOKEN_TTL_SECS,
        })
    }
}
