use chrono::NaiveTime;
use std::env;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    /// UTC wall-clock time of the daily streak check
    pub streak_check_at: NaiveTime,
    pub environment: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if it exists (development)
        dotenvy::dotenv().ok();

        let database_url =
            env::var("DATABASE_URL").map_err(|_| "DATABASE_URL must be set".to_string())?;

        let hour: u32 = env::var("STREAK_CHECK_HOUR_UTC")
            .unwrap_or_else(|_| "0".to_string())
            .parse()
            .map_err(|_| "Invalid STREAK_CHECK_HOUR_UTC")?;

        let minute: u32 = env::var("STREAK_CHECK_MINUTE_UTC")
            .unwrap_or_else(|_| "0".to_string())
            .parse()
            .map_err(|_| "Invalid STREAK_CHECK_MINUTE_UTC")?;

        let streak_check_at = NaiveTime::from_hms_opt(hour, minute, 0)
            .ok_or("STREAK_CHECK_HOUR_UTC/STREAK_CHECK_MINUTE_UTC out of range")?;

        let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

        Ok(Config {
            database_url,
            streak_check_at,
            environment,
        })
    }
}
