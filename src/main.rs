//! Persona gateway - chat backend with multi-provider failover
//!
//! Serves the persona chat, health and visit endpoints

#![allow(missing_docs)]

use clap::Parser;
use persona_gateway::{Config, server};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Configuration file used when `--config` is not given and the file exists
const DEFAULT_CONFIG_PATH: &str = "config/gateway.yaml";

#[derive(Debug, Parser)]
#[command(name = "gateway", version, about = "Persona chat gateway")]
struct Args {
    /// YAML configuration file
    #[arg(short, long, env = "GATEWAY_CONFIG")]
    config: Option<PathBuf>,

    /// Bind host, overriding configuration and environment
    #[arg(long)]
    host: Option<String>,

    /// Bind port, overriding configuration and environment
    #[arg(short, long)]
    port: Option<u16>,

    /// Emit logs as JSON lines
    #[arg(long, env = "LOG_JSON")]
    log_json: bool,
}

fn init_logging(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

async fn load_config(args: &Args) -> persona_gateway::Result<Config> {
    let default_path = PathBuf::from(DEFAULT_CONFIG_PATH);
    let path = match &args.config {
        Some(path) => Some(path.as_path()),
        None if default_path.exists() => Some(default_path.as_path()),
        None => None,
    };

    let mut config = Config::load(path).await?;
    if let Some(host) = &args.host {
        config.server.host = host.clone();
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    config.validate()?;
    Ok(config)
}

#[tokio::main]
async fn main() -> ExitCode {
    // .env is optional
    let _ = dotenvy::dotenv();

    let args = Args::parse();
    init_logging(args.log_json);

    let result = match load_config(&args).await {
        Ok(config) => server::run_server(config).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Display keeps the multi-line bind hints readable
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
