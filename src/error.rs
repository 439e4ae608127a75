use thiserror::Error;

/// Errors from the user and backup-post stores
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("record not found: {0}")]
    NotFound(String),
}

/// Errors from the social posting gateway
///
/// Credential failures are a distinct variant rather than a message
/// substring, so callers decide whether to refresh by matching on the
/// type. Gateway implementations are responsible for mapping their
/// transport's auth signals (e.g. HTTP 401/403) to `Unauthorized`.
#[derive(Error, Debug, Clone)]
pub enum GatewayError {
    #[error("gateway rejected credentials: {0}")]
    Unauthorized(String),

    #[error("gateway request failed: {0}")]
    Network(String),

    #[error("gateway returned error {status}: {message}")]
    Api { status: u16, message: String },
}

impl GatewayError {
    /// True when the failure indicates an expired or invalid credential,
    /// i.e. a token refresh is worth attempting.
    pub fn is_auth_error(&self) -> bool {
        matches!(self, GatewayError::Unauthorized(_))
    }
}
