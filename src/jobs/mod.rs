pub mod scheduler;
pub mod streak_check;

pub use streak_check::{RunSummary, StreakCheckJob, UserOutcome};
