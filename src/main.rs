//! chatbot-gateway - API gateway for the chatbot dashboard
//!
//! Loads configuration, installs logging and serves the gateway-wrapped API.

#![allow(missing_docs)]

use chatbot_gateway::config::Config;
use chatbot_gateway::server;
use chatbot_gateway::utils::logging::init_logging;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

/// Command line interface
#[derive(Debug, Parser)]
#[command(name = "chatbot-gateway", version, about)]
struct Cli {
    /// Path to the YAML configuration file
    #[arg(
        short,
        long,
        env = "CHATBOT_GATEWAY_CONFIG",
        default_value = "config/gateway.yaml"
    )]
    config: PathBuf,

    /// Override the bind host
    #[arg(long, env = "CHATBOT_GATEWAY_HOST")]
    host: Option<String>,

    /// Override the bind port
    #[arg(short, long, env = "CHATBOT_GATEWAY_PORT")]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut config = match Config::from_file(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    if let Some(host) = cli.host {
        config.gateway.server.host = host;
    }
    if let Some(port) = cli.port {
        config.gateway.server.port = port;
    }

    if let Err(e) = init_logging(config.logging()) {
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }

    match server::run_server(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Print error using Display (not Debug) to preserve newlines
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
