//! Schedule registration for the streak check.
//!
//! Kept separate from the job definition: the job is a plain value that
//! tests invoke directly, and `run_daily` is the one place a real timer
//! is attached, called explicitly from process startup.

use chrono::{DateTime, Duration, NaiveTime, Utc};

use crate::gateway::Gateway;
use crate::jobs::StreakCheckJob;
use crate::store::{BackupPostStore, UserStore};

/// Next occurrence of the fixed UTC wall-clock time `at`, strictly after
/// `now`
pub fn next_run_after(now: DateTime<Utc>, at: NaiveTime) -> DateTime<Utc> {
    let today = now.date_naive().and_time(at).and_utc();
    if today > now {
        today
    } else {
        (now.date_naive() + Duration::days(1)).and_time(at).and_utc()
    }
}

/// Run the job once per day at the fixed UTC time `at`, forever.
///
/// Each invocation is awaited to completion before the next sleep is
/// computed, so a run that overshoots its slot delays the following run
/// instead of overlapping it.
pub async fn run_daily<U, B, G>(job: StreakCheckJob<U, B, G>, at: NaiveTime) -> !
where
    U: UserStore,
    B: BackupPostStore,
    G: Gateway,
{
    loop {
        let now = Utc::now();
        let next = next_run_after(now, at);
        let wait = (next - now)
            .to_std()
            .unwrap_or(std::time::Duration::ZERO);

        tracing::info!("Next streak check scheduled for {next}");
        tokio::time::sleep(wait).await;

        job.run_once().await;
    }
}
