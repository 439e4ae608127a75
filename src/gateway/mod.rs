//! Contract for the external social-platform gateway.
//!
//! Three operations: publish a post, query recent posting activity, and
//! refresh an expired credential. The wire protocol is the gateway
//! implementation's business; the job only sees these value types.

pub mod stub;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::GatewayError;

pub use stub::StubGateway;

/// The platform's view of a user's recent posting activity
#[derive(Debug, Clone, Default)]
pub struct RecentActivity {
    /// Whether the platform shows a post within the streak window
    pub has_posted_recently: bool,
    /// Timestamp of the most recent on-platform post, if any
    pub last_post_time: Option<DateTime<Utc>>,
}

/// Acknowledgement of a successfully published post
#[derive(Debug, Clone)]
pub struct PostReceipt {
    pub external_post_id: String,
    pub posted_at: DateTime<Utc>,
}

/// A rotated credential pair returned by a refresh
#[derive(Debug, Clone)]
pub struct RefreshedCredentials {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in_secs: i64,
}

/// External posting service
#[async_trait]
pub trait Gateway: Send + Sync {
    /// Query the platform for the user's recent posting activity
    async fn check_recent_activity(
        &self,
        access_token: &str,
        external_account_id: Option<&str>,
    ) -> Result<RecentActivity, GatewayError>;

    /// Publish `content` on behalf of the credential's owner.
    /// Implementations must surface credential failures as
    /// `GatewayError::Unauthorized` so callers can decide to refresh.
    async fn post(&self, access_token: &str, content: &str) -> Result<PostReceipt, GatewayError>;

    /// Exchange a refresh credential for a new token pair
    async fn refresh(&self, refresh_token: &str) -> Result<RefreshedCredentials, GatewayError>;
}

#[async_trait]
impl<T: Gateway + ?Sized> Gateway for std::sync::Arc<T> {
    async fn check_recent_activity(
        &self,
        access_token: &str,
        external_account_id: Option<&str>,
    ) -> Result<RecentActivity, GatewayError> {
        (**self)
            .check_recent_activity(access_token, external_account_id)
            .await
    }

    async fn post(&self, access_token: &str, content: &str) -> Result<PostReceipt, GatewayError> {
        (**self).post(access_token, content).await
    }

    async fn refresh(&self, refresh_token: &str) -> Result<RefreshedCredentials, GatewayError> {
        (**self).refresh(refresh_token).await
    }
}
