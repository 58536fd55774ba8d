use anyhow::Result;
use tokio::net::TcpListener;
use tracing::info;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

use account_import_service::api::{app_router, AppState};
use account_import_service::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env();

    setup_logging(config.log_level);

    let router = app_router(AppState::new());
    let listener = TcpListener::bind(&config.listen_addr).await?;

    info!("Listening on {}", config.listen_addr);

    axum::serve(listener, router).await?;

    Ok(())
}

fn setup_logging(level: LevelFilter) {
    let terminal_log = fmt::layer()
        .with_target(false)
        .with_filter(level);

    tracing_subscriber::registry()
        .with(terminal_log)
        .init();
}
