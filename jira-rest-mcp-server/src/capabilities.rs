//! Static description of the server, served as the `info://server` resource

use serde::Serialize;

pub const SERVER_NAME: &str = "Jira MCP Server";
pub const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

// Must match the `#[mcp_resource]` attribute on `JiraRestMcpServer::server_info`
pub const SERVER_INFO_URI: &str = "info://server";
pub const SERVER_INFO_MIME_TYPE: &str = "application/json";

/// Tool names, in the order they are advertised
pub const ACTIONS: [&str; 3] = ["create_issue", "update_issue", "search_issues"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServerCapabilities {
    pub name: &'static str,
    pub version: &'static str,
    pub actions: &'static [&'static str],
}

impl ServerCapabilities {
    pub const fn current() -> Self {
        Self {
            name: SERVER_NAME,
            version: SERVER_VERSION,
            actions: &ACTIONS,
        }
    }
}
