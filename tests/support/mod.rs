//! In-process mock automation server for exercising the runner without a
//! real browser. Speaks just enough W3C WebDriver JSON for one session and
//! counts the lifecycle calls the tests assert on.

// Not every test binary uses every helper.
#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};

/// 1x1 transparent PNG, base64-encoded the way the wire carries screenshots.
pub const SCREENSHOT_B64: &str =
    "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mP8z8BQDwAEhQGAhKmMIQAAAABJRU5ErkJggg==";

#[derive(Default)]
pub struct HubState {
    /// Title reported for every page.
    pub title: String,
    /// Reject navigation requests with a WebDriver error.
    pub fail_navigation: bool,
    /// Reject title requests with a WebDriver error.
    pub fail_title: bool,
    pub sessions_opened: AtomicUsize,
    pub sessions_closed: AtomicUsize,
    pub navigations: AtomicUsize,
}

pub struct MockHub {
    addr: SocketAddr,
    state: Arc<HubState>,
}

impl MockHub {
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn opened(&self) -> usize {
        self.state.sessions_opened.load(Ordering::SeqCst)
    }

    pub fn closed(&self) -> usize {
        self.state.sessions_closed.load(Ordering::SeqCst)
    }

    pub fn navigations(&self) -> usize {
        self.state.navigations.load(Ordering::SeqCst)
    }
}

/// Serve a hub on an ephemeral port that reports `title` for every page.
pub async fn spawn_hub(title: &str) -> MockHub {
    spawn_hub_with(HubState {
        title: title.to_string(),
        ..HubState::default()
    })
    .await
}

pub async fn spawn_hub_with(state: HubState) -> MockHub {
    let state = Arc::new(state);
    let app = Router::new()
        .route("/session", post(new_session))
        .route("/session/{id}", delete(delete_session))
        .route("/session/{id}/url", get(current_url).post(navigate))
        .route("/session/{id}/title", get(title))
        .route("/session/{id}/screenshot", get(screenshot))
        .with_state(Arc::clone(&state));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind mock hub");
    let addr = listener.local_addr().expect("mock hub addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve mock hub");
    });

    MockHub { addr, state }
}

async fn new_session(State(state): State<Arc<HubState>>) -> Json<Value> {
    state.sessions_opened.fetch_add(1, Ordering::SeqCst);
    Json(json!({
        "value": {
            "sessionId": "mock-session-1",
            "capabilities": { "browserName": "chrome" }
        }
    }))
}

async fn delete_session(
    State(state): State<Arc<HubState>>,
    Path(_id): Path<String>,
) -> Json<Value> {
    state.sessions_closed.fetch_add(1, Ordering::SeqCst);
    Json(json!({ "value": null }))
}

// The client resolves relative URLs against the current one before navigating.
async fn current_url(Path(_id): Path<String>) -> Json<Value> {
    Json(json!({ "value": "about:blank" }))
}

#[derive(Deserialize)]
struct NavigateBody {
    url: String,
}

async fn navigate(
    State(state): State<Arc<HubState>>,
    Path(_id): Path<String>,
    Json(body): Json<NavigateBody>,
) -> (StatusCode, Json<Value>) {
    state.navigations.fetch_add(1, Ordering::SeqCst);
    if state.fail_navigation {
        return webdriver_error(
            "unknown error",
            &format!("net::ERR_NAME_NOT_RESOLVED loading {}", body.url),
        );
    }
    (StatusCode::OK, Json(json!({ "value": null })))
}

async fn title(
    State(state): State<Arc<HubState>>,
    Path(_id): Path<String>,
) -> (StatusCode, Json<Value>) {
    if state.fail_title {
        return webdriver_error("unknown error", "session is not responding");
    }
    (StatusCode::OK, Json(json!({ "value": state.title })))
}

async fn screenshot(Path(_id): Path<String>) -> Json<Value> {
    Json(json!({ "value": SCREENSHOT_B64 }))
}

fn webdriver_error(error: &str, message: &str) -> (StatusCode, Json<Value>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({
            "value": { "error": error, "message": message, "stacktrace": "" }
        })),
    )
}
