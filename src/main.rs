use anyhow::{Context, Result};
use buddy::backend::HttpChatBackend;
use buddy::config::BuddyConfig;
use buddy::conversation::ConversationController;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "buddy=debug,info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Buddy AI");

    let config = BuddyConfig::from_env()?;
    config.validate()?;

    // The UI owns the main thread; backend requests run on this runtime
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .thread_name("buddy-net")
        .build()
        .context("Failed to start async runtime")?;

    let backend = HttpChatBackend::new(&config.backend)?;
    info!("Backend endpoint: {}", backend.endpoint());

    let voice = buddy::voice::detect(&config.voice);
    let controller = ConversationController::new(Arc::new(backend), voice, runtime.handle().clone());

    buddy::ui::run(controller).map_err(|e| anyhow::anyhow!("UI error: {}", e))?;

    info!("Buddy AI stopped");
    Ok(())
}
