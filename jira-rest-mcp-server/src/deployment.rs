//! Jira deployment detection
//!
//! Cloud and Data Center expose the same issue endpoints under different
//! REST versions and expect different credentials. The variant is guessed
//! from the shape of the base URL only; nothing is probed over the network.

use base64::Engine;
use serde::{Deserialize, Serialize};

/// Hosted-domain suffix shared by every Jira Cloud site
pub const CLOUD_DOMAIN_SUFFIX: &str = ".atlassian.net";

/// Which flavour of Jira a base URL points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeploymentVariant {
    /// Atlassian-hosted, multi-tenant Jira
    Cloud,
    /// Self-hosted Jira (Server / Data Center)
    DataCenter,
}

impl DeploymentVariant {
    /// Classify a base URL. Anything that is not recognisably Cloud is
    /// treated as Data Center.
    pub fn resolve(base_url: &str) -> Self {
        if base_url.to_lowercase().contains(CLOUD_DOMAIN_SUFFIX) {
            DeploymentVariant::Cloud
        } else {
            DeploymentVariant::DataCenter
        }
    }

    /// REST path prefix for this variant
    pub fn api_prefix(&self) -> &'static str {
        match self {
            DeploymentVariant::Cloud => "/rest/api/3",
            DeploymentVariant::DataCenter => "/rest/api/2",
        }
    }

    /// Build the authentication scheme this variant expects
    pub fn auth_scheme<'a>(&self, email: &'a str, api_key: &'a str) -> AuthScheme<'a> {
        match self {
            DeploymentVariant::Cloud => AuthScheme::Basic {
                username: email,
                password: api_key,
            },
            DeploymentVariant::DataCenter => AuthScheme::Bearer { token: api_key },
        }
    }
}

/// Credentials attached to every outbound request
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum AuthScheme<'a> {
    Basic { username: &'a str, password: &'a str },
    Bearer { token: &'a str },
}

impl AuthScheme<'_> {
    /// Value for the `Authorization` header
    pub fn header_value(&self) -> String {
        match self {
            AuthScheme::Basic { username, password } => {
                let credentials = format!("{}:{}", username, password);
                format!(
                    "Basic {}",
                    base64::engine::general_purpose::STANDARD.encode(credentials)
                )
            }
            AuthScheme::Bearer { token } => format!("Bearer {}", token),
        }
    }
}

// Never print secrets.
impl std::fmt::Debug for AuthScheme<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthScheme::Basic { username, .. } => f
                .debug_struct("Basic")
                .field("username", username)
                .field("password", &"<redacted>")
                .finish(),
            AuthScheme::Bearer { .. } => f
                .debug_struct("Bearer")
                .field("token", &"<redacted>")
                .finish(),
        }
    }
}
