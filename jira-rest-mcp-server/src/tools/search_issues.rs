//! Search issues tool
//!
//! Runs a caller-supplied JQL query and returns the key and summary of
//! every matching issue as JSON text. Only the first page Jira returns is
//! used.

use crate::error::{JiraMcpError, JiraMcpResult};
use crate::jira_client::{ConnectionConfig, IssueSearchRequest, JiraClient};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{info, instrument};

/// Parameters for the search_issues tool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SearchIssuesParams {
    /// Jira connection configuration
    pub jira_config: ConnectionConfig,

    /// The JQL query to search issues (e.g., 'project = PROJ AND status = Open')
    pub jql: String,
}

impl SearchIssuesParams {
    pub fn into_parts(self) -> (ConnectionConfig, IssueSearchRequest) {
        (self.jira_config, IssueSearchRequest { jql: self.jql })
    }
}

/// Implementation of the search_issues tool
pub struct SearchIssuesTool {
    request_timeout: Duration,
}

impl SearchIssuesTool {
    /// Create a new search issues tool
    pub fn new(request_timeout: Duration) -> Self {
        Self { request_timeout }
    }

    /// Execute the search_issues tool
    #[instrument(skip(self, params), fields(url = %params.jira_config.url, jql = %params.jql))]
    pub async fn execute(&self, params: SearchIssuesParams) -> JiraMcpResult<String> {
        let (connection, request) = params.into_parts();
        let client = JiraClient::with_timeout(connection, self.request_timeout)?;

        let issues = client.search_issues(&request).await?;
        info!("search_issues matched {} issues", issues.len());

        serde_json::to_string(&issues).map_err(|e| JiraMcpError::encoding(e.to_string()))
    }
}
