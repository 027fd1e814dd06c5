use mimalloc::MiMalloc;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cfg = &mindwell::config::CONFIG;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cfg.loglevel.clone()));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_level(true)
                .with_target(false),
        )
        .init();

    info!(
        database_url = %cfg.database_url,
        listen = %cfg.listen,
        loglevel = %cfg.loglevel
    );

    // The process must not serve traffic without a usable store: connect (with
    // bounded retry) before binding the listener, and fail startup if the
    // store never becomes reachable.
    let storage = mindwell::db::connect::connect_with_retry(&cfg.database_url).await?;

    let state = mindwell::router::AppState::new(storage);
    let app = mindwell::router::mindwell_router(state);

    let listener = TcpListener::bind(cfg.listen.as_str()).await?;
    info!("HTTP server listening on {}", cfg.listen);
    axum::serve(listener, app).await?;
    Ok(())
}
