use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use translator_core::config::ServerConfig;
use translator_core::server::{self, AppState};
use translator_core::{logging, persistence, DictionaryLoader, Translator};

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    let config = ServerConfig::parse();
    logging::init(config.mode.default_log_filter());

    info!("Starting translation service ({:?} mode)", config.mode);

    // No dictionary, no service: a load failure ends the process here.
    let source = config.dictionary.source();
    let dictionary = DictionaryLoader::new()
        .with_reverse_policy(config.dictionary.reverse_policy)
        .load_source(&source, config.dictionary.fetch_timeout())
        .await
        .with_context(|| format!("Failed to load dictionary from {}", source))?;

    if dictionary.chakma_to_bangla.is_empty() {
        warn!("Dictionary has no chakma entries; every lookup will pass through");
    }

    if let Some(path) = &config.snapshot_out {
        persistence::save_snapshot(&dictionary, config.dictionary.reverse_policy, path)
            .with_context(|| format!("Failed to write snapshot {}", path.display()))?;
    }

    let state = AppState::new(Translator::new(dictionary));

    let addr = config.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    server::serve(listener, state, shutdown_signal())
        .await
        .context("Server error")?;

    info!("Translation service stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Could not listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
