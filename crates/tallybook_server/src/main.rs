//! Tallybook REST server.
//!
//! ## Usage
//!
//! ```bash
//! # Defaults: ./data, 127.0.0.1:3000
//! tallybook-server
//!
//! # Custom config file, port override from the environment
//! TALLYBOOK_HTTP_PORT=8080 tallybook-server --config tallybook.toml
//! ```

use clap::Parser;
use log::{error, info};
use std::path::PathBuf;
use std::sync::Arc;
use tallybook_core::init_logging;
use tallybook_server::{AppState, Config, HttpServer};

#[derive(Parser, Debug)]
#[command(name = "tallybook-server")]
#[command(about = "REST server for expenses and todos")]
struct Args {
    /// Path to a TOML config file
    #[arg(short, long, env = "TALLYBOOK_CONFIG")]
    config: Option<PathBuf>,

    /// Directory holding the JSON collections
    #[arg(long, env = "TALLYBOOK_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Interface to bind
    #[arg(long, env = "TALLYBOOK_BIND_HOST")]
    bind_host: Option<String>,

    /// HTTP port
    #[arg(long, env = "TALLYBOOK_HTTP_PORT")]
    http_port: Option<u16>,

    /// Log level (trace|debug|info|warn|error)
    #[arg(long, env = "TALLYBOOK_LOG_LEVEL")]
    log_level: Option<String>,

    /// Rolling log directory
    #[arg(long, env = "TALLYBOOK_LOG_DIR")]
    log_dir: Option<PathBuf>,
}

impl Args {
    fn into_config(self) -> Result<Config, std::io::Error> {
        let mut config = match &self.config {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        };

        if let Some(dir) = self.data_dir {
            config.data_dir = dir;
        }
        if let Some(host) = self.bind_host {
            config.bind_host = host;
        }
        if let Some(port) = self.http_port {
            config.http_port = port;
        }
        if let Some(level) = self.log_level {
            config.log_level = level;
        }
        if let Some(dir) = self.log_dir {
            config.log_dir = Some(dir);
        }
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let config = Args::parse().into_config()?;

    let log_dir = config.resolved_log_dir(&std::env::current_dir()?);
    init_logging(&config.log_level, &log_dir.to_string_lossy(), true)?;

    let bind_addr = config.bind_addr()?;
    info!(
        "event=server_start module=server status=start data_dir={} addr={}",
        config.data_dir.display(),
        bind_addr
    );

    let state = Arc::new(AppState::open(&config.data_dir));
    let server = HttpServer::new(state, bind_addr);

    tokio::select! {
        result = server.run() => {
            if let Err(err) = &result {
                error!("event=server_stop module=server status=error error={err}");
            }
            result?;
        }
        _ = tokio::signal::ctrl_c() => {
            info!("event=server_stop module=server status=ok reason=ctrl_c");
        }
    }

    Ok(())
}
