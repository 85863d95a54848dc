//! Error types and handling for the JIRA REST MCP Server
//!
//! Every failure of an outbound Jira call falls into one of four kinds:
//! the request could not be encoded, the request could not be delivered,
//! the upstream answered with an unexpected status, or the answer could not
//! be decoded. Errors propagate unchanged to the MCP layer.

use serde_json::Value;
use thiserror::Error;

/// Custom error types for the JIRA REST MCP Server
#[derive(Debug, Error)]
pub enum JiraMcpError {
    /// Request payload could not be serialized (-32603)
    #[error("failed to marshal payload: {message}")]
    Encoding { message: String },

    /// The outbound HTTP call could not be sent or timed out (-32003)
    #[error("failed to send request: {message}")]
    Transport { message: String },

    /// Upstream answered with an unexpected status code (-32004)
    #[error("failed to {operation}, status: {status}")]
    UpstreamStatus { operation: String, status: u16 },

    /// Upstream body was not valid JSON or lacked an expected field (-32005)
    #[error("failed to decode response: {message}")]
    Decoding { message: String },

    /// Process configuration errors (-32001)
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl JiraMcpError {
    /// Get the MCP JSON-RPC error code for this error
    pub fn error_code(&self) -> i32 {
        match self {
            JiraMcpError::Configuration { .. } => -32001,
            JiraMcpError::Transport { .. } => -32003,
            JiraMcpError::UpstreamStatus { .. } => -32004,
            JiraMcpError::Decoding { .. } => -32005,
            JiraMcpError::Encoding { .. } => -32603,
        }
    }

    /// Get the error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            JiraMcpError::Encoding { .. } => "encoding",
            JiraMcpError::Transport { .. } => "transport",
            JiraMcpError::UpstreamStatus { .. } => "upstream_status",
            JiraMcpError::Decoding { .. } => "decoding",
            JiraMcpError::Configuration { .. } => "configuration",
        }
    }

    /// Get additional error data for MCP error responses
    pub fn error_data(&self) -> Option<Value> {
        let mut data = serde_json::Map::new();
        data.insert(
            "category".to_string(),
            Value::String(self.category().to_string()),
        );

        if let JiraMcpError::UpstreamStatus { operation, status } = self {
            data.insert("operation".to_string(), Value::String(operation.clone()));
            data.insert("status".to_string(), Value::Number((*status).into()));
        }

        Some(Value::Object(data))
    }

    /// Upstream status code, if this error carries one
    pub fn status(&self) -> Option<u16> {
        match self {
            JiraMcpError::UpstreamStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Create an encoding error
    pub fn encoding(message: impl Into<String>) -> Self {
        JiraMcpError::Encoding {
            message: message.into(),
        }
    }

    /// Create a transport error
    pub fn transport(message: impl Into<String>) -> Self {
        JiraMcpError::Transport {
            message: message.into(),
        }
    }

    /// Create an upstream status error
    pub fn upstream_status(operation: impl Into<String>, status: u16) -> Self {
        JiraMcpError::UpstreamStatus {
            operation: operation.into(),
            status,
        }
    }

    /// Create a decoding error
    pub fn decoding(message: impl Into<String>) -> Self {
        JiraMcpError::Decoding {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        JiraMcpError::Configuration {
            message: message.into(),
        }
    }
}

/// Convert from reqwest errors
///
/// Timeouts are not distinguished from other delivery failures.
impl From<reqwest::Error> for JiraMcpError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            JiraMcpError::decoding(err.to_string())
        } else {
            JiraMcpError::transport(err.to_string())
        }
    }
}

/// Convert from TOML parsing errors
impl From<toml::de::Error> for JiraMcpError {
    fn from(err: toml::de::Error) -> Self {
        JiraMcpError::config(format!("TOML parsing error: {}", err))
    }
}

/// Result type alias for JIRA MCP operations
pub type JiraMcpResult<T> = Result<T, JiraMcpError>;
