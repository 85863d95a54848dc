//! Configuration management for the JIRA REST MCP Server
//!
//! Handles loading configuration from environment variables, TOML files,
//! and provides sensible defaults for all settings. Jira connection details
//! are not configured here; they arrive with every tool call.

use crate::error::{JiraMcpError, JiraMcpResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, warn};

const CONFIG_FILE_CANDIDATES: [&str; 2] = ["config/jira-mcp-config.toml", "jira-mcp-config.toml"];

/// How the MCP server is exposed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    Http,
    Stdio,
}

/// Main configuration structure for the server process
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Port for the HTTP transport (default: 8080)
    pub port: u16,

    /// Transport to serve on (default: http)
    pub transport: TransportMode,

    /// Timeout for each outbound Jira request in seconds (default: 10)
    pub request_timeout_seconds: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            transport: TransportMode::Http,
            request_timeout_seconds: 10,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables, TOML file, and defaults
    /// Priority: env vars > TOML file > defaults
    pub fn load() -> JiraMcpResult<Self> {
        let mut config = Self::default();

        for candidate in CONFIG_FILE_CANDIDATES {
            if Path::new(candidate).exists() {
                config = Self::load_from_file(candidate)?;
                info!("Loaded configuration from {}", candidate);
                break;
            }
        }

        config.load_from_env();
        config.validate()?;

        Ok(config)
    }

    /// Load configuration from an explicit TOML file, then apply env overrides
    pub fn load_with_file<P: AsRef<Path>>(path: P) -> JiraMcpResult<Self> {
        let mut config = Self::load_from_file(path.as_ref())?;
        info!("Loaded configuration from {}", path.as_ref().display());

        config.load_from_env();
        config.validate()?;

        Ok(config)
    }

    /// Load configuration from a TOML file
    fn load_from_file<P: AsRef<Path>>(path: P) -> JiraMcpResult<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            JiraMcpError::config(format!(
                "Failed to read config file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;

        Ok(toml::from_str(&content)?)
    }

    /// Load configuration from environment variables
    fn load_from_env(&mut self) {
        if let Ok(port) = env::var("JIRA_MCP_PORT") {
            match port.parse::<u16>() {
                Ok(port) => {
                    self.port = port;
                    debug!("Set port to {} from environment", port);
                }
                Err(_) => debug!("Ignoring invalid JIRA_MCP_PORT: {}", port),
            }
        }

        if let Ok(transport) = env::var("JIRA_MCP_TRANSPORT") {
            match transport.to_lowercase().as_str() {
                "http" => self.transport = TransportMode::Http,
                "stdio" => self.transport = TransportMode::Stdio,
                _ => warn!("Unknown JIRA_MCP_TRANSPORT: {}, using default", transport),
            }
        }

        if let Ok(timeout) = env::var("JIRA_REQUEST_TIMEOUT") {
            match timeout.parse::<u64>() {
                Ok(seconds) => {
                    self.request_timeout_seconds = seconds;
                    debug!("Set request timeout to {} seconds from environment", seconds);
                }
                Err(_) => debug!("Ignoring invalid JIRA_REQUEST_TIMEOUT: {}", timeout),
            }
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> JiraMcpResult<()> {
        if self.port == 0 {
            return Err(JiraMcpError::config("port must be greater than 0"));
        }

        if self.request_timeout_seconds == 0 {
            return Err(JiraMcpError::config(
                "request_timeout_seconds must be greater than 0",
            ));
        }

        if self.request_timeout_seconds > 60 {
            warn!(
                "Request timeout is set to {} seconds, tool calls may hang for a long time",
                self.request_timeout_seconds
            );
        }

        debug!("Configuration validation successful");
        Ok(())
    }

    /// Per-request timeout for outbound Jira calls
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }
}
