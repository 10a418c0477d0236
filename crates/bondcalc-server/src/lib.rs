//! # Bondcalc Server
//!
//! REST server for the Bondcalc bond calculator.
//!
//! ## Features
//!
//! - Bond pricing with premium/discount explanation
//! - Approximate yield to maturity
//! - Price/yield curve sampling
//! - Live treasury yields with static fallback
//! - Persistent portfolio with metrics and benchmark comparison
//! - Configuration via TOML file
//!
//! ## Usage
//!
//! ```ignore
//! use bondcalc_server::Server;
//!
//! let server = Server::new(config)?;
//! server.start().await?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod handlers;
pub mod routes;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use parking_lot::Mutex;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use bondcalc_config::CalculatorConfig;
use bondcalc_ext_file::{create_yield_source, JsonFileStore, LiveFeed, YieldSourceOptions};
use bondcalc_portfolio::prelude::*;
use bondcalc_traits::{KeyValueStore, TraitError, YieldSource};

pub use error::{ApiError, ApiResult};
pub use handlers::AppState;

impl AppState {
    /// Builds state from explicit collaborators.
    pub fn new(
        config: CalculatorConfig,
        store: Arc<dyn KeyValueStore>,
        yields: Arc<dyn YieldSource>,
    ) -> Self {
        let mut session =
            PortfolioSession::open_with_key(store, config.storage.portfolio_key.clone())
                .with_pricer(config.pricer());
        session.subscribe(|portfolio: &Portfolio, metrics: &PortfolioMetrics| {
            info!(
                entries = portfolio.len(),
                total_value = metrics.total_value,
                avg_yield = metrics.avg_yield,
                "portfolio changed"
            );
        });

        Self {
            session: Mutex::new(session),
            yields,
            config,
        }
    }

    /// Builds state backed by `storage.data_dir` and the `[market_data]` sources.
    pub fn from_config(config: CalculatorConfig) -> Result<Self, TraitError> {
        let store = JsonFileStore::new(&config.storage.data_dir)?;
        let market = &config.market_data;
        let yields = create_yield_source(&YieldSourceOptions {
            yields_file: market.yields_file.clone(),
            live: market.live_url.as_ref().map(|url| {
                LiveFeed::new(url.clone())
                    .with_api_key(market.api_key())
                    .with_timeout(market.live_timeout())
            }),
        })?;
        Ok(Self::new(config, Arc::new(store), yields))
    }
}

/// The Bondcalc server.
pub struct Server {
    state: Arc<AppState>,
}

impl Server {
    /// Create a new server.
    pub fn new(config: CalculatorConfig) -> Result<Self, TraitError> {
        Ok(Self::with_state(AppState::from_config(config)?))
    }

    /// Create a server around prepared state.
    pub fn with_state(state: AppState) -> Self {
        Self {
            state: Arc::new(state),
        }
    }

    /// Build the router.
    pub fn router(&self) -> Router {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        routes::create_router(self.state.clone())
            .layer(TraceLayer::new_for_http())
            .layer(cors)
    }

    /// Start the server.
    pub async fn start(&self) -> Result<(), std::io::Error> {
        let settings = &self.state.config.server;
        let host = settings.host.parse().map_err(|_| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("server.host '{}' is not an IP address", settings.host),
            )
        })?;
        let addr = SocketAddr::new(host, settings.port);

        info!("Starting Bondcalc server on {}", addr);

        let listener = TcpListener::bind(addr).await?;
        axum::serve(listener, self.router()).await
    }
}
