//! Request and startup helpers

use crate::server::server::HttpServer;
use crate::utils::error::GatewayError;
use actix_web::HttpRequest;
use std::io::ErrorKind;

/// Client address used when no proxy header is present
pub const UNKNOWN_IP: &str = "unknown";

/// Caller IP as reported by the fronting proxy
///
/// The first `x-forwarded-for` entry wins, then `x-real-ip`, then `cf-connecting-ip`.
pub fn client_ip(req: &HttpRequest) -> String {
    let header = |name: &str| {
        req.headers()
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
    };

    let forwarded = header("x-forwarded-for")
        .and_then(|value| value.split(',').next())
        .map(str::trim)
        .filter(|first| !first.is_empty());

    forwarded
        .or_else(|| header("x-real-ip"))
        .or_else(|| header("cf-connecting-ip"))
        .unwrap_or(UNKNOWN_IP)
        .to_string()
}

impl HttpServer {
    /// Turn a bind failure into an actionable message
    pub(crate) fn format_bind_error(
        error: std::io::Error,
        bind_addr: &str,
        port: u16,
    ) -> GatewayError {
        let text = error.to_string();
        let in_use = error.kind() == ErrorKind::AddrInUse
            || text.contains("os error 48")
            || text.contains("os error 98");
        let denied = error.kind() == ErrorKind::PermissionDenied || text.contains("os error 13");

        if in_use {
            let next = port.saturating_add(1);
            GatewayError::server(format!(
                "Port {port} is already in use.\n  \
                 Find the owner with `lsof -i:{port}`, or start on another port with \
                 `--port {next}` / {env}={next}",
                env = crate::config::ENV_PORT,
            ))
        } else if denied {
            GatewayError::server(format!(
                "Permission denied for port {port}.\n  \
                 Use a non-privileged port (>= 1024), for example `--port 8000`"
            ))
        } else {
            GatewayError::server(format!("Failed to bind to {}: {}", bind_addr, error))
        }
    }
}
