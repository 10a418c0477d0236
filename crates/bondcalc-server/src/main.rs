//! Bondcalc server entry point.

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bondcalc_server::Server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,bondcalc=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Bondcalc server v{}", env!("CARGO_PKG_VERSION"));

    // Optional config path; otherwise $BONDCALC_CONFIG, the user config dir, or defaults
    let explicit = std::env::args().nth(1).map(std::path::PathBuf::from);
    let (config, source) = bondcalc_config::load_config(explicit.as_deref())?;
    info!("Using configuration from {}", source);

    let server = Server::new(config)?;
    server.start().await?;

    Ok(())
}
