//! JIRA REST MCP Server - create, update and search Jira issues via MCP
//!
//! Serves over HTTP (default port 8080) or STDIO.

use clap::Parser;
use jira_rest_mcp_server::config::{ServerConfig, TransportMode};
use jira_rest_mcp_server::JiraRestMcpServer;
use pulseengine_mcp_server::McpServerBuilder;
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "jira-rest-mcp-server")]
#[command(about = "MCP server exposing Jira create/update/search tools", long_about = None)]
struct Args {
    /// The port to listen on (HTTP transport)
    #[arg(short, long)]
    port: Option<u16>,

    /// Serve over STDIO instead of HTTP
    #[arg(long)]
    stdio: bool,

    /// Path to a TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn load_config(args: &Args) -> Result<ServerConfig, Box<dyn std::error::Error>> {
    let mut config = match &args.config {
        Some(path) => ServerConfig::load_with_file(path)?,
        None => ServerConfig::load()?,
    };

    if let Some(port) = args.port {
        config.port = port;
    }
    if args.stdio {
        config.transport = TransportMode::Stdio;
    }

    config.validate()?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Logs go to stderr; stdout carries protocol traffic in STDIO mode
    if args.stdio {
        JiraRestMcpServer::configure_stdio_logging();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .with_writer(std::io::stderr)
            .init();
    }

    info!("Starting Jira MCP Server...");

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            eprintln!("❌ Failed to start Jira MCP Server: {}", e);
            std::process::exit(1);
        }
    };

    match config.transport {
        TransportMode::Stdio => info!("Starting MCP server with STDIO transport..."),
        TransportMode::Http => info!("Listening on port: {}", config.port),
    }

    let mut server = JiraRestMcpServer::with_config(config)
        .into_mcp_server()
        .await?;

    info!("🚀 Jira MCP Server is running and ready to serve requests");

    server.run().await?;

    Ok(())
}
