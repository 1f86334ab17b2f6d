//! Local stand-in for the Google token endpoint and FCM send API.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode, Uri, header},
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};

use super::types::ServiceAccountKey;

/// Device token the mock always rejects as unregistered
pub const UNREGISTERED_TOKEN: &str = "unregistered-token";

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub path: String,
    pub authorization: Option<String>,
    pub body: String,
}

#[derive(Clone)]
struct MockState {
    reject_auth: bool,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    concurrency: Arc<Concurrency>,
}

/// Tracks how many send calls are being handled at once
#[derive(Default)]
struct Concurrency {
    current: AtomicUsize,
    peak: AtomicUsize,
}

impl Concurrency {
    fn enter(&self) {
        let now = self.current.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
    }

    fn leave(&self) {
        self.current.fetch_sub(1, Ordering::SeqCst);
    }
}

pub struct MockFcm {
    base_url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    concurrency: Arc<Concurrency>,
}

impl MockFcm {
    pub const ACCESS_TOKEN: &'static str = "ya29.mock-access-token";

    pub async fn start() -> Self {
        Self::spawn(false).await
    }

    pub async fn start_rejecting_auth() -> Self {
        Self::spawn(true).await
    }

    async fn spawn(reject_auth: bool) -> Self {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let concurrency = Arc::new(Concurrency::default());
        let state = MockState {
            reject_auth,
            requests: requests.clone(),
            concurrency: concurrency.clone(),
        };
        let app = Router::new().fallback(handle).with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{}", addr),
            requests,
            concurrency,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn token_uri(&self) -> String {
        format!("{}/token", self.base_url)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Most send calls that were in flight at the same moment
    pub fn peak_in_flight(&self) -> usize {
        self.concurrency.peak.load(Ordering::SeqCst)
    }

    /// Bodies of every FCM send call, parsed as JSON
    pub fn sent_messages(&self) -> Vec<Value> {
        self.requests()
            .into_iter()
            .filter(|r| r.path.ends_with("/messages:send"))
            .map(|r| serde_json::from_str(&r.body).unwrap())
            .collect()
    }
}

async fn handle(State(state): State<MockState>, uri: Uri, headers: HeaderMap, body: String) -> Response {
    let path = uri.path().to_string();
    let authorization = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(String::from);

    let index = {
        let mut requests = state.requests.lock().unwrap();
        requests.push(RecordedRequest {
            path: path.clone(),
            authorization: authorization.clone(),
            body: body.clone(),
        });
        requests.len()
    };

    if path == "/token" {
        if state.reject_auth {
            return (
                StatusCode::UNAUTHORIZED,
                Json(json!({"error": "invalid_grant", "error_description": "Invalid JWT Signature."})),
            )
                .into_response();
        }
        return Json(json!({
            "access_token": MockFcm::ACCESS_TOKEN,
            "expires_in": 3599,
            "token_type": "Bearer"
        }))
        .into_response();
    }

    let Some(project) = path
        .strip_prefix("/v1/projects/")
        .and_then(|rest| rest.strip_suffix("/messages:send"))
    else {
        return StatusCode::NOT_FOUND.into_response();
    };

    let expected = format!("Bearer {}", MockFcm::ACCESS_TOKEN);
    if authorization.as_deref() != Some(expected.as_str()) {
        return StatusCode::UNAUTHORIZED.into_response();
    }

    // Hold each send briefly so overlapping calls are observable
    state.concurrency.enter();
    tokio::time::sleep(Duration::from_millis(5)).await;
    state.concurrency.leave();

    let payload: Value = serde_json::from_str(&body).unwrap_or(Value::Null);
    if payload["message"]["token"] == UNREGISTERED_TOKEN {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": {
                    "code": 404,
                    "message": "Requested entity was not found.",
                    "status": "NOT_FOUND"
                }
            })),
        )
            .into_response();
    }

    Json(json!({ "name": format!("projects/{}/messages/{}", project, index) })).into_response()
}

/// Service account key signed with the test keypair in `testdata/`
pub fn test_key(token_uri: &str) -> ServiceAccountKey {
    ServiceAccountKey {
        project_id: "demo-project".to_string(),
        private_key_id: "test-key-id".to_string(),
        private_key: include_str!("testdata/private_key.pem").to_string(),
        client_email: "sender@demo-project.iam.gserviceaccount.com".to_string(),
        client_id: None,
        auth_uri: None,
        token_uri: token_uri.to_string(),
    }
}
