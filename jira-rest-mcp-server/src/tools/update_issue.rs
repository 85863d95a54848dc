use crate::error::JiraMcpResult;
use crate::jira_client::{ConnectionConfig, IssueUpdateRequest, JiraClient};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{info, instrument};

/// Parameters for updating an existing JIRA issue
///
/// Only the fields that are present and non-empty are sent to Jira.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct UpdateIssueParams {
    /// Jira connection configuration
    pub jira_config: ConnectionConfig,

    /// The key of the issue to update (e.g., PROJ-123)
    pub issue_key: String,

    /// The new summary or title of the issue
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    /// The new description of the issue
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl UpdateIssueParams {
    pub fn into_parts(self) -> (ConnectionConfig, IssueUpdateRequest) {
        (
            self.jira_config,
            IssueUpdateRequest {
                issue_key: self.issue_key,
                summary: self.summary,
                description: self.description,
            },
        )
    }
}

pub struct UpdateIssueTool {
    request_timeout: Duration,
}

impl UpdateIssueTool {
    pub fn new(request_timeout: Duration) -> Self {
        Self { request_timeout }
    }

    #[instrument(skip(self, params), fields(url = %params.jira_config.url, issue_key = %params.issue_key))]
    pub async fn execute(&self, params: UpdateIssueParams) -> JiraMcpResult<String> {
        info!("Updating JIRA issue {}", params.issue_key);

        let (connection, request) = params.into_parts();
        let client = JiraClient::with_timeout(connection, self.request_timeout)?;

        let issue_key = client.update_issue(&request).await?;

        Ok(format!("Updated issue: {}", issue_key))
    }
}
