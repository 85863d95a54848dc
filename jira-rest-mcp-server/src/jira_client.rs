//! Thin JIRA REST client
//!
//! A client is built for a single tool call from the connection details the
//! caller supplied, issues exactly one HTTP request and is dropped. There is
//! no pooling, caching or retrying.

use crate::deployment::DeploymentVariant;
use crate::error::{JiraMcpError, JiraMcpResult};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{IntoUrl, Method, RequestBuilder, StatusCode, Url};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Per-request timeout used unless the server is configured otherwise
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Jira connection details, sent along with every tool call
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ConnectionConfig {
    /// The Jira instance URL (Cloud or Data Center)
    pub url: String,

    /// The Jira API key or Personal Access Token
    pub api_key: String,

    /// The email address for Jira Cloud authentication
    pub email: String,
}

impl std::fmt::Debug for ConnectionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionConfig")
            .field("url", &self.url)
            .field("api_key", &"<redacted>")
            .field("email", &self.email)
            .finish()
    }
}

/// Fields needed to create an issue
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueCreateRequest {
    pub project_key: String,
    pub summary: String,
    pub description: Option<String>,
    pub issue_type: String,
}

/// Fields to change on an existing issue; `None` leaves a field untouched
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueUpdateRequest {
    pub issue_key: String,
    pub summary: Option<String>,
    pub description: Option<String>,
}

/// A JQL search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueSearchRequest {
    pub jql: String,
}

/// Key and summary of a matched issue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct IssueSummaryView {
    pub key: String,
    pub summary: String,
}

#[derive(Serialize)]
struct IssuePayload<F> {
    fields: F,
}

#[derive(Serialize)]
struct CreateFields<'a> {
    project: KeyRef<'a>,
    summary: &'a str,
    description: &'a str,
    issuetype: NameRef<'a>,
}

#[derive(Serialize)]
struct UpdateFields<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
}

#[derive(Serialize)]
struct KeyRef<'a> {
    key: &'a str,
}

#[derive(Serialize)]
struct NameRef<'a> {
    name: &'a str,
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    issues: Vec<SearchHit>,
}

#[derive(Deserialize)]
struct SearchHit {
    key: String,
    #[serde(default)]
    fields: SearchHitFields,
}

#[derive(Default, Deserialize)]
struct SearchHitFields {
    #[serde(default)]
    summary: String,
}

/// Empty strings count as "not supplied"
fn supplied(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn encode<T: Serialize>(payload: &T) -> JiraMcpResult<Vec<u8>> {
    serde_json::to_vec(payload).map_err(|e| JiraMcpError::encoding(e.to_string()))
}

pub(crate) fn create_issue_body(req: &IssueCreateRequest) -> JiraMcpResult<Vec<u8>> {
    encode(&IssuePayload {
        fields: CreateFields {
            project: KeyRef {
                key: &req.project_key,
            },
            summary: &req.summary,
            // Sent as "" when absent
            description: req.description.as_deref().unwrap_or_default(),
            issuetype: NameRef {
                name: &req.issue_type,
            },
        },
    })
}

pub(crate) fn update_issue_body(req: &IssueUpdateRequest) -> JiraMcpResult<Vec<u8>> {
    encode(&IssuePayload {
        fields: UpdateFields {
            summary: supplied(&req.summary),
            description: supplied(&req.description),
        },
    })
}

/// Single-use JIRA REST client
#[derive(Debug)]
pub struct JiraClient {
    config: ConnectionConfig,
    variant: DeploymentVariant,
    http: reqwest::Client,
}

impl JiraClient {
    /// Create a client with the default 10 second timeout
    pub fn new(config: ConnectionConfig) -> JiraMcpResult<Self> {
        Self::with_timeout(config, DEFAULT_REQUEST_TIMEOUT)
    }

    /// Create a client with an explicit per-request timeout
    #[instrument(skip_all, fields(url = %config.url))]
    pub fn with_timeout(config: ConnectionConfig, timeout: Duration) -> JiraMcpResult<Self> {
        let variant = DeploymentVariant::resolve(&config.url);

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| JiraMcpError::transport(format!("failed to build HTTP client: {}", e)))?;

        debug!("Resolved deployment variant {:?}", variant);

        Ok(Self {
            config,
            variant,
            http,
        })
    }

    /// Deployment variant detected from the base URL
    pub fn variant(&self) -> DeploymentVariant {
        self.variant
    }

    /// Full URL for an API path such as `/issue`
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}{}", self.config.url, self.variant.api_prefix(), path)
    }

    /// URL of a single issue, with the key encoded as one path segment
    pub fn issue_url(&self, issue_key: &str) -> JiraMcpResult<Url> {
        let mut url = Url::parse(&self.endpoint("/issue"))
            .map_err(|e| JiraMcpError::transport(format!("invalid base URL: {}", e)))?;

        url.path_segments_mut()
            .map_err(|_| JiraMcpError::transport("base URL cannot carry a path"))?
            .push(issue_key);

        Ok(url)
    }

    fn request(&self, method: Method, url: impl IntoUrl) -> RequestBuilder {
        let auth = self
            .variant
            .auth_scheme(&self.config.email, &self.config.api_key);

        self.http
            .request(method, url)
            .header(AUTHORIZATION, auth.header_value())
            .header(CONTENT_TYPE, "application/json")
    }

    /// Create an issue and return its key
    #[instrument(skip(self), fields(variant = ?self.variant))]
    pub async fn create_issue(&self, req: &IssueCreateRequest) -> JiraMcpResult<String> {
        let body = create_issue_body(req)?;

        let response = self.request(Method::POST, self.endpoint("/issue")).body(body).send().await?;

        let status = response.status();
        if status != StatusCode::CREATED {
            return Err(JiraMcpError::upstream_status("create issue", status.as_u16()));
        }

        let result: Value = response.json().await?;

        let issue_key = result
            .get("key")
            .and_then(Value::as_str)
            .ok_or_else(|| JiraMcpError::decoding("issue key not found in response"))?
            .to_string();

        info!("Created issue {}", issue_key);
        Ok(issue_key)
    }

    /// Update summary and/or description; returns the key it was given
    #[instrument(skip(self), fields(variant = ?self.variant))]
    pub async fn update_issue(&self, req: &IssueUpdateRequest) -> JiraMcpResult<String> {
        let body = update_issue_body(req)?;
        let url = self.issue_url(&req.issue_key)?;

        let response = self.request(Method::PUT, url).body(body).send().await?;

        let status = response.status();
        if status != StatusCode::OK && status != StatusCode::NO_CONTENT {
            return Err(JiraMcpError::upstream_status("update issue", status.as_u16()));
        }

        info!("Updated issue {}", req.issue_key);
        Ok(req.issue_key.clone())
    }

    /// Run a JQL search, returning key and summary of each hit
    #[instrument(skip(self), fields(variant = ?self.variant))]
    pub async fn search_issues(
        &self,
        req: &IssueSearchRequest,
    ) -> JiraMcpResult<Vec<IssueSummaryView>> {
        let response = self
            .request(Method::GET, self.endpoint("/search"))
            .query(&[("jql", req.jql.as_str()), ("fields", "summary")])
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(JiraMcpError::upstream_status("search issues", status.as_u16()));
        }

        let result: SearchResponse = response.json().await?;

        let issues: Vec<IssueSummaryView> = result
            .issues
            .into_iter()
            .map(|hit| IssueSummaryView {
                key: hit.key,
                summary: hit.fields.summary,
            })
            .collect();

        info!("Search returned {} issues", issues.len());
        Ok(issues)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn connection(url: &str) -> ConnectionConfig {
        ConnectionConfig {
            url: url.to_string(),
            api_key: "secret-token".to_string(),
            email: "dev@example.com".to_string(),
        }
    }

    fn as_json(bytes: Vec<u8>) -> Value {
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_create_body_shape() {
        let body = create_issue_body(&IssueCreateRequest {
            project_key: "PROJ".to_string(),
            summary: "Login broken".to_string(),
            description: Some("Steps to reproduce".to_string()),
            issue_type: "Bug".to_string(),
        })
        .unwrap();

        assert_eq!(
            as_json(body),
            json!({
                "fields": {
                    "project": {"key": "PROJ"},
                    "summary": "Login broken",
                    "description": "Steps to reproduce",
                    "issuetype": {"name": "Bug"}
                }
            })
        );
    }

    #[test]
    fn test_create_body_without_description() {
        let body = as_json(
            create_issue_body(&IssueCreateRequest {
                project_key: "PROJ".to_string(),
                summary: "Task".to_string(),
                description: None,
                issue_type: "Task".to_string(),
            })
            .unwrap(),
        );

        assert_eq!(body["fields"]["description"], "");
    }

    #[test]
    fn test_update_body_only_summary() {
        let body = update_issue_body(&IssueUpdateRequest {
            issue_key: "PROJ-1".to_string(),
            summary: Some("New title".to_string()),
            description: None,
        })
        .unwrap();

        assert_eq!(as_json(body), json!({"fields": {"summary": "New title"}}));
    }

    #[test]
    fn test_update_body_empty_strings_are_omitted() {
        let body = update_issue_body(&IssueUpdateRequest {
            issue_key: "PROJ-1".to_string(),
            summary: Some(String::new()),
            description: Some(String::new()),
        })
        .unwrap();

        assert_eq!(as_json(body), json!({"fields": {}}));
    }

    #[test]
    fn test_endpoint_uses_variant_prefix() {
        let cloud = JiraClient::new(connection("https://acme.atlassian.net")).unwrap();
        assert_eq!(cloud.variant(), DeploymentVariant::Cloud);
        assert_eq!(
            cloud.endpoint("/issue"),
            "https://acme.atlassian.net/rest/api/3/issue"
        );

        let dc = JiraClient::new(connection("https://jira.example.com")).unwrap();
        assert_eq!(dc.variant(), DeploymentVariant::DataCenter);
        assert_eq!(
            dc.endpoint("/issue/PROJ-1"),
            "https://jira.example.com/rest/api/2/issue/PROJ-1"
        );
    }

    #[test]
    fn test_issue_url_encodes_key_as_one_segment() {
        let dc = JiraClient::new(connection("https://jira.example.com")).unwrap();

        assert_eq!(
            dc.issue_url("PROJ-1").unwrap().as_str(),
            "https://jira.example.com/rest/api/2/issue/PROJ-1"
        );
        assert_eq!(
            dc.issue_url("PROJ/1?expand=x#y").unwrap().as_str(),
            "https://jira.example.com/rest/api/2/issue/PROJ%2F1%3Fexpand=x%23y"
        );
    }

    #[test]
    fn test_issue_url_rejects_unparseable_base() {
        let client = JiraClient::new(connection("not a url")).unwrap();

        let err = client.issue_url("PROJ-1").unwrap_err();
        assert_eq!(err.category(), "transport");
    }

    #[test]
    fn test_connection_debug_redacts_api_key() {
        let printed = format!("{:?}", connection("https://jira.example.com"));
        assert!(printed.contains("jira.example.com"));
        assert!(!printed.contains("secret-token"));
    }
}
