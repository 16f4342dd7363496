use anyhow::{Context, Result};
use clap::Parser;

use deckhand::config::ServerConfig;
use deckhand::server;
use deckhand::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = ServerConfig::parse();
    let sources = config.resolved_sources();
    for source in &sources {
        log::info!("card list [{}]: {}", source.label, source.path.display());
    }

    let state = AppState::new(sources);

    // Startup load is a sanity check only; requests reload on their own.
    match state.load_cards() {
        Ok(report) => log::info!("startup check: {} cards available", report.cards.len()),
        Err(err) => log::warn!("startup check failed: {err}"),
    }

    let addr = config.bind_addr();
    server::serve(state, addr)
        .await
        .with_context(|| format!("serving on {addr}"))
}
