//! Streakkeeper
//!
//! Backend for streak-saving social-media posts: users keep a pool of
//! pre-written backup posts, and a daily reconciliation job publishes one
//! for anybody who has gone quiet for 24+ hours.
//!
//! The library exposes the job, its collaborator contracts, and the
//! store/gateway implementations so the binary stays a thin wiring layer
//! and the job runs under test without a timer or a database.

pub mod config;
pub mod constants;
pub mod error;
pub mod gateway;
pub mod jobs;
pub mod models;
pub mod store;

pub use config::Config;
pub use error::{GatewayError, StoreError};
pub use jobs::{RunSummary, StreakCheckJob, UserOutcome};
