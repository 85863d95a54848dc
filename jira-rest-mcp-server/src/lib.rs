//! JIRA REST MCP Server Library
//!
//! Exposes three Jira operations as Model Context Protocol (MCP) tools and a
//! small metadata resource describing the server.
//!
//! ## Features
//!
//! - **Self-describing calls**: every tool call carries its own Jira URL and
//!   credentials, nothing is stored server-side
//! - **Cloud and Data Center**: REST version and authentication are picked
//!   from the base URL (`/rest/api/3` + Basic for `*.atlassian.net`,
//!   `/rest/api/2` + Bearer otherwise)
//! - **Tools**: `create_issue`, `update_issue`, `search_issues`
//! - **Resource**: `info://server` with name, version and the tool list

use crate::capabilities::ServerCapabilities;
use crate::config::{ServerConfig, TransportMode};
use crate::tools::{
    CreateIssueParams, CreateIssueTool, SearchIssuesParams, SearchIssuesTool, UpdateIssueParams,
    UpdateIssueTool,
};

use pulseengine_mcp_macros::{mcp_resource, mcp_server, mcp_tools};
use pulseengine_mcp_server::{AuthConfig, HasServerInfo, McpServer, ServerConfig as McpServerConfig};
use pulseengine_mcp_transport::TransportConfig;
use std::sync::Arc;
use tracing::{error, info, instrument};

// Re-export modules for external use
pub mod capabilities;
pub mod config;
pub mod deployment;
pub mod error;
pub mod jira_client;
pub mod tools;

/// JIRA REST MCP Server
///
/// Stateless: each tool call builds its own Jira client, so the server can
/// be cloned freely and calls never share anything but configuration.
#[mcp_server(
    name = "Jira MCP Server",
    version = "1.0.0",
    description = "Create, update and search Jira issues on Cloud or Data Center",
    auth = "disabled"
)]
#[derive(Clone)]
pub struct JiraRestMcpServer {
    /// Process configuration
    config: Arc<ServerConfig>,

    /// Tool implementations
    create_tool: Arc<CreateIssueTool>,
    update_tool: Arc<UpdateIssueTool>,
    search_tool: Arc<SearchIssuesTool>,
}

impl Default for JiraRestMcpServer {
    fn default() -> Self {
        Self::with_config(ServerConfig::default())
    }
}

impl JiraRestMcpServer {
    /// Create the server from loaded configuration
    #[instrument(skip(config))]
    pub fn with_config(config: ServerConfig) -> Self {
        let timeout = config.request_timeout();
        info!(
            "Initializing JIRA REST MCP Server (request timeout {}s)",
            config.request_timeout_seconds
        );

        Self {
            config: Arc::new(config),
            create_tool: Arc::new(CreateIssueTool::new(timeout)),
            update_tool: Arc::new(UpdateIssueTool::new(timeout)),
            search_tool: Arc::new(SearchIssuesTool::new(timeout)),
        }
    }

    /// Framework configuration for the configured transport
    ///
    /// Authentication is off: callers pass Jira credentials with each call.
    pub fn mcp_server_config(&self) -> McpServerConfig {
        let mut auth_config = AuthConfig::memory();
        auth_config.enabled = false;

        let transport_config = match self.config.transport {
            TransportMode::Http => TransportConfig::http(self.config.port),
            TransportMode::Stdio => TransportConfig::Stdio,
        };

        McpServerConfig {
            server_info: <Self as HasServerInfo>::server_info(),
            auth_config,
            transport_config,
            ..Default::default()
        }
    }

    /// Build the MCP server on the configured transport
    pub async fn into_mcp_server(self) -> anyhow::Result<McpServer<Self>> {
        let config = self.mcp_server_config();

        McpServer::new(self, config)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to create server: {}", e))
    }

    /// Configuration the server was built with
    pub fn server_config(&self) -> &ServerConfig {
        &self.config
    }
}

/// All public methods in this impl block become MCP tools automatically
#[mcp_tools]
impl JiraRestMcpServer {
    /// Create a new Jira issue
    ///
    /// # Examples
    /// - `{"jira_config": {"url": "https://acme.atlassian.net", "api_key": "...", "email": "me@acme.com"}, "project_key": "PROJ", "summary": "Fix login", "issue_type": "Bug"}`
    #[instrument(skip(self))]
    pub async fn create_issue(&self, params: CreateIssueParams) -> anyhow::Result<String> {
        self.create_tool.execute(params).await.map_err(|e| {
            error!("create_issue failed: {}", e);
            anyhow::anyhow!(e)
        })
    }

    /// Update an existing Jira issue
    ///
    /// Only `summary` and `description` can be changed; omitted or empty
    /// fields are left as they are.
    #[instrument(skip(self))]
    pub async fn update_issue(&self, params: UpdateIssueParams) -> anyhow::Result<String> {
        self.update_tool.execute(params).await.map_err(|e| {
            error!("update_issue failed: {}", e);
            anyhow::anyhow!(e)
        })
    }

    /// Search Jira issues using JQL
    ///
    /// Returns a JSON array of `{"key", "summary"}` objects.
    #[instrument(skip(self))]
    pub async fn search_issues(&self, params: SearchIssuesParams) -> anyhow::Result<String> {
        self.search_tool.execute(params).await.map_err(|e| {
            error!("search_issues failed: {}", e);
            anyhow::anyhow!(e)
        })
    }

    /// Provides details about the server and available actions
    #[mcp_resource(
        uri_template = "info://server",
        name = "Server Information",
        description = "Provides details about the server and available actions",
        mime_type = "application/json"
    )]
    pub async fn server_info(&self) -> anyhow::Result<ServerCapabilities> {
        Ok(ServerCapabilities::current())
    }
}
