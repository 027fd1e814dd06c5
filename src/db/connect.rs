use crate::db::sqlite::AccountStorage;
use crate::error::{IsRetryable, MindwellError};
use backon::{ExponentialBuilder, Retryable};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;
use tracing::{info, warn};

fn bootstrap_retry_policy() -> ExponentialBuilder {
    ExponentialBuilder::default()
        .with_min_delay(Duration::from_secs(1))
        .with_max_delay(Duration::from_secs(5))
        .with_max_times(8)
        .with_jitter()
}

/// Single connection attempt: open the pool, probe liveness, apply the DDL.
pub async fn connect(database_url: &str) -> Result<AccountStorage, MindwellError> {
    let connect_opts = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
    let pool = SqlitePoolOptions::new().connect_with(connect_opts).await?;

    sqlx::query("SELECT 1").execute(&pool).await?;

    let storage = AccountStorage::new(pool);
    storage.init_schema().await?;
    Ok(storage)
}

/// Startup bootstrap: establish the store connection under a bounded
/// exponential-backoff policy. Exhausting the attempts is a startup fault
/// propagated to the caller, not a silent infinite loop.
pub async fn connect_with_retry(database_url: &str) -> Result<AccountStorage, MindwellError> {
    let storage = (|| async { connect(database_url).await })
        .retry(bootstrap_retry_policy())
        .when(|e: &MindwellError| e.is_retryable())
        .notify(|err, dur: Duration| {
            warn!(
                "store connection failed: {}, retrying after {:?}",
                err, dur
            );
        })
        .await?;

    info!("connected to store at {}", database_url);
    Ok(storage)
}
