/// Common utilities for JIRA REST MCP Server integration tests
///
/// `StubJira` is a minimal stand-in for a Jira instance: it answers every
/// request with a fixed status and body and records what it received.
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, HeaderMap, Method, StatusCode, Uri};
use axum::response::IntoResponse;
use axum::Router;
use jira_rest_mcp_server::jira_client::ConnectionConfig;
use serde_json::Value;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;

/// A request as seen by the stub
#[allow(dead_code)]
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

#[allow(dead_code)]
impl RecordedRequest {
    /// Parse the request body as JSON
    pub fn json_body(&self) -> Value {
        serde_json::from_slice(&self.body).expect("Request body is not JSON")
    }

    /// Decoded value of a query parameter
    pub fn query_param(&self, name: &str) -> Option<String> {
        let query = self.query.as_deref()?;
        let url = reqwest::Url::parse(&format!("http://stub{}?{}", self.path, query)).ok()?;
        url.query_pairs()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.into_owned())
    }
}

struct StubState {
    status: StatusCode,
    body: String,
    delay: Duration,
    requests: Mutex<Vec<RecordedRequest>>,
}

/// Stub Jira server listening on an ephemeral localhost port
#[allow(dead_code)]
pub struct StubJira {
    base_url: String,
    state: Arc<StubState>,
    handle: JoinHandle<()>,
}

#[allow(dead_code)]
impl StubJira {
    /// Start a stub that answers every request with `status` and `body`
    pub async fn start(status: u16, body: &str) -> Self {
        Self::start_with_delay(status, body, Duration::ZERO).await
    }

    /// Like `start`, but waits `delay` before answering
    pub async fn start_with_delay(status: u16, body: &str, delay: Duration) -> Self {
        let state = Arc::new(StubState {
            status: StatusCode::from_u16(status).expect("Invalid status code"),
            body: body.to_string(),
            delay,
            requests: Mutex::new(Vec::new()),
        });

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind stub listener");
        let addr = listener.local_addr().expect("Stub listener has no address");

        let app = Router::new()
            .fallback(record_request)
            .with_state(Arc::clone(&state));

        let handle = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self {
            base_url: format!("http://{}", addr),
            state,
            handle,
        }
    }

    /// Base URL that resolves as a Data Center instance
    pub fn base_url(&self) -> String {
        self.base_url.clone()
    }

    /// Base URL that resolves as a Cloud instance while still hitting the stub
    pub fn cloud_base_url(&self) -> String {
        format!("{}/acme.atlassian.net", self.base_url)
    }

    /// Connection details pointing at the stub as Data Center
    pub fn data_center_config(&self) -> ConnectionConfig {
        ConnectionConfig {
            url: self.base_url(),
            api_key: "pat-token".to_string(),
            email: "dev@example.com".to_string(),
        }
    }

    /// Connection details pointing at the stub as Cloud
    pub fn cloud_config(&self) -> ConnectionConfig {
        ConnectionConfig {
            url: self.cloud_base_url(),
            api_key: "api-token".to_string(),
            email: "dev@example.com".to_string(),
        }
    }

    /// All requests received so far
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().unwrap().clone()
    }

    /// The only request received; panics if there were zero or several
    pub fn single_request(&self) -> RecordedRequest {
        let requests = self.requests();
        assert_eq!(requests.len(), 1, "Expected exactly one request");
        requests.into_iter().next().unwrap()
    }
}

impl Drop for StubJira {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn record_request(
    State(state): State<Arc<StubState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    let header_value = |name: header::HeaderName| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };

    state.requests.lock().unwrap().push(RecordedRequest {
        method: method.to_string(),
        path: uri.path().to_string(),
        query: uri.query().map(str::to_string),
        authorization: header_value(header::AUTHORIZATION),
        content_type: header_value(header::CONTENT_TYPE),
        body: body.to_vec(),
    });

    if !state.delay.is_zero() {
        tokio::time::sleep(state.delay).await;
    }

    (
        state.status,
        [(header::CONTENT_TYPE, "application/json")],
        state.body.clone(),
    )
}
