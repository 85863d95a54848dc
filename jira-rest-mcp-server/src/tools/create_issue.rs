use crate::error::JiraMcpResult;
use crate::jira_client::{ConnectionConfig, IssueCreateRequest, JiraClient};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{info, instrument};

/// Parameters for creating a new JIRA issue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CreateIssueParams {
    /// Jira connection configuration
    pub jira_config: ConnectionConfig,

    /// The key of the project to create the issue in
    pub project_key: String,

    /// The summary or title of the issue
    pub summary: String,

    /// Optional description of the issue
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// The type of issue (e.g., Bug, Story, Task)
    pub issue_type: String,
}

impl CreateIssueParams {
    /// Split into connection details and the create request
    pub fn into_parts(self) -> (ConnectionConfig, IssueCreateRequest) {
        (
            self.jira_config,
            IssueCreateRequest {
                project_key: self.project_key,
                summary: self.summary,
                description: self.description,
                issue_type: self.issue_type,
            },
        )
    }
}

/// Tool for creating JIRA issues
pub struct CreateIssueTool {
    request_timeout: Duration,
}

impl CreateIssueTool {
    pub fn new(request_timeout: Duration) -> Self {
        Self { request_timeout }
    }

    #[instrument(skip(self, params), fields(url = %params.jira_config.url, project_key = %params.project_key))]
    pub async fn execute(&self, params: CreateIssueParams) -> JiraMcpResult<String> {
        info!("Creating new JIRA issue: {}", params.summary);

        let (connection, request) = params.into_parts();
        let client = JiraClient::with_timeout(connection, self.request_timeout)?;

        let issue_key = client.create_issue(&request).await?;

        Ok(format!("Created issue: {}", issue_key))
    }
}
