//! HTTP product API.
//!
//! Serves paginated product search, autocomplete suggestions, filter facets
//! and single-product lookups as JSON.
//!
//! # Example
//!
//! ```rust,ignore
//! use catalog_search::web::{AppState, WebServer};
//!
//! let server = WebServer::new(AppState::new(search, config));
//! server.start().await?;
//! ```

pub mod handlers;
pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::AppState;

use anyhow::{Context, Result};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

/// HTTP server for the product API.
pub struct WebServer {
    /// Shared application state
    state: AppState,
}

impl WebServer {
    /// Create a new web server with the given state.
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    /// Start the web server on the configured host and port.
    ///
    /// This method blocks until the server is shut down.
    pub async fn start(self) -> Result<()> {
        let addr = format!(
            "{}:{}",
            self.state.config.server.host, self.state.config.server.port
        );

        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        let app = routes::create_router(self.state).layer(cors);

        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .with_context(|| format!("Failed to bind to {}", addr))?;

        info!("Product API listening on http://{}", addr);

        axum::serve(listener, app)
            .await
            .with_context(|| "Web server failed")?;

        Ok(())
    }
}
