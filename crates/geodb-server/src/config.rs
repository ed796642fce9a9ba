use anyhow::{Context, Result};
use clap::Parser;
use geodb_core::loader::DEFAULT_DATASET_PATH;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Command-line / environment configuration for geodb-server.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "geodb-server",
    version,
    about = "Read-only HTTP lookup service for countries, states and cities"
)]
pub struct ServerConfig {
    /// Listening IP address
    #[arg(short = 'H', long, env = "HOST", default_value = "0.0.0.0", value_name = "IP")]
    pub host: String,

    /// Listening port
    #[arg(short, long, env = "PORT", default_value_t = 3001)]
    pub port: u16,

    /// Path to the dataset (JSON array of countries; `.json.gz` also accepted)
    #[arg(short, long = "data", env = "GEODB_DATA", default_value = DEFAULT_DATASET_PATH)]
    pub data: PathBuf,

    /// Static JSON file served by `/files`
    #[arg(long = "demo-data", env = "GEODB_DEMO_DATA", default_value = "data/demo.json")]
    pub demo_data: PathBuf,

    /// Log level (overridden by RUST_LOG)
    #[arg(short = 'v', long, default_value = "info")]
    pub log_level: String,

    /// Don't warm the dataset at boot; build it on the first request instead
    #[arg(long)]
    pub lazy: bool,
}

impl ServerConfig {
    pub fn addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid listen address {}:{}", self.host, self.port))
    }

    /// Default `EnvFilter` directive for the configured level.
    pub fn log_filter(&self) -> String {
        let level = &self.log_level;
        format!("geodb_server={level},geodb_core={level},tower_http={level}")
    }
}
