use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use streakkeeper::config::Config;
use streakkeeper::gateway::StubGateway;
use streakkeeper::jobs::{scheduler, StreakCheckJob};
use streakkeeper::store::{create_pool, PgBackupPostStore, PgUserStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "streakkeeper=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Streakkeeper...");

    // Load configuration
    let config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;

    tracing::info!(
        "Environment: {}, daily streak check at {} UTC",
        config.environment,
        config.streak_check_at
    );

    // Create database connection pool
    let pool = create_pool(&config.database_url).await?;

    // Run migrations
    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations").run(&pool).await?;
    tracing::info!("Migrations complete");

    // Wire the job to its collaborators
    let job = StreakCheckJob::new(
        PgUserStore::new(pool.clone()),
        PgBackupPostStore::new(pool),
        StubGateway::new(),
    );

    // `--once` runs the job synchronously for manual operator invocations
    if std::env::args().any(|arg| arg == "--once") {
        job.run_once().await;
        return Ok(());
    }

    // Register the daily schedule; this never returns
    scheduler::run_daily(job, config.streak_check_at).await
}
