//! HTTP server core implementation

use crate::config::{Config, ServerConfig};
use crate::server::routes;
use crate::server::state::AppState;
use crate::utils::error::{GatewayError, Result};
use actix_cors::Cors;
use actix_web::{
    App, HttpServer as ActixHttpServer,
    http::{Method, header},
    middleware::{DefaultHeaders, Logger},
    web,
};
use std::time::Duration;
use tracing::{info, warn};

/// HTTP server
pub struct HttpServer {
    /// Server configuration
    config: ServerConfig,
    /// Application state
    state: AppState,
}

impl HttpServer {
    /// Create a server with HTTP-backed providers from `config`
    pub fn new(config: &Config) -> Result<Self> {
        info!("Creating HTTP server");
        Ok(Self::with_state(AppState::new(config.clone())?))
    }

    /// Create a server around prepared state
    pub fn with_state(state: AppState) -> Self {
        let enabled: Vec<&str> = state
            .router
            .registry()
            .get_enabled_providers()
            .iter()
            .map(|p| p.id.id())
            .collect();
        if enabled.is_empty() {
            warn!("No AI provider credential configured, chat requests will be rejected");
        } else {
            info!("Enabled AI providers in priority order: {:?}", enabled);
        }

        Self {
            config: state.config.server.clone(),
            state,
        }
    }

    /// Create the Actix-web application
    pub fn create_app(
        state: web::Data<AppState>,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        let cors = Self::build_cors(&state.config.server);

        App::new()
            .app_data(state)
            .wrap(cors)
            .wrap(Logger::default())
            .wrap(DefaultHeaders::new().add(("Server", "persona-gateway")))
            .configure(routes::configure_routes)
    }

    fn build_cors(config: &ServerConfig) -> Cors {
        let cors_config = &config.cors;
        if !cors_config.enabled {
            return Cors::default();
        }

        let mut cors = Cors::default();
        if cors_config.allows_all_origins() {
            cors = cors.allow_any_origin();
        } else {
            for origin in &cors_config.allowed_origins {
                cors = cors.allowed_origin(origin);
            }
        }

        cors.allowed_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allowed_headers([header::CONTENT_TYPE, header::ACCEPT])
            .max_age(cors_config.max_age)
    }

    /// Spawn the limiter sweep and, when configured, the provider health monitor
    fn spawn_background_tasks(&self) {
        self.state.rate_limiter.clone().start_cleanup_task();

        if let Some(secs) = self.state.config.router.health_check_interval_secs {
            info!("Provider health monitor every {}s", secs);
            self.state
                .health
                .clone()
                .start_monitor(Duration::from_secs(secs));
        }
    }

    /// Start the HTTP server
    pub async fn start(self) -> Result<()> {
        let bind_addr = self.config.address();
        let port = self.config.port;

        info!("Starting HTTP server on {}", bind_addr);
        self.spawn_background_tasks();

        let state = web::Data::new(self.state);
        let mut server = ActixHttpServer::new(move || Self::create_app(state.clone()));
        if let Some(workers) = self.config.workers {
            server = server.workers(workers);
        }

        let server = server
            .bind(&bind_addr)
            .map_err(|e| Self::format_bind_error(e, &bind_addr, port))?
            .run();

        info!("HTTP server listening on {}", bind_addr);

        server
            .await
            .map_err(|e| GatewayError::server(format!("Server error: {}", e)))?;

        info!("HTTP server stopped");
        Ok(())
    }

    /// Get server configuration
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Get application state
    pub fn state(&self) -> &AppState {
        &self.state
    }
}
