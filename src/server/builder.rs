//! Server builder and run_server function

use crate::config::Config;
use crate::core::providers::{ChatBackend, ProviderRegistry};
use crate::server::server::HttpServer;
use crate::server::state::AppState;
use crate::utils::error::{GatewayError, Result};
use std::sync::Arc;
use tracing::info;

/// Server builder for easier configuration
#[derive(Default)]
pub struct ServerBuilder {
    config: Option<Config>,
    backend: Option<Arc<dyn ChatBackend>>,
}

impl ServerBuilder {
    /// Create a new server builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set configuration
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Serve chats from `backend` instead of the HTTP providers
    pub fn with_backend(mut self, backend: Arc<dyn ChatBackend>) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Build the shared state without creating a server
    pub fn build_state(self) -> Result<AppState> {
        let config = self
            .config
            .ok_or_else(|| GatewayError::config("Configuration is required"))?;

        match self.backend {
            Some(backend) => {
                let registry = ProviderRegistry::from_config(&config.providers);
                Ok(AppState::with_backend(config, registry, backend))
            }
            None => AppState::new(config),
        }
    }

    /// Build the HTTP server
    pub fn build(self) -> Result<HttpServer> {
        Ok(HttpServer::with_state(self.build_state()?))
    }
}

/// Run the server with an already loaded configuration
pub async fn run_server(config: Config) -> Result<()> {
    info!("🚀 Starting persona gateway");

    let server = ServerBuilder::new().with_config(config).build()?;
    info!(
        "🌐 Server starting at: http://{}",
        server.config().address()
    );
    info!("📋 API Endpoints:");
    info!("   POST /api/chat - Persona chat (SSE)");
    info!("   GET  /api/health - Health check");
    info!("   GET  /api/health/providers - Provider probe");
    info!("   GET  /api/visit - Visit statistics");
    info!("   POST /api/visit - Record a visit");

    server.start().await
}
