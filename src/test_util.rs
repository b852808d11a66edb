use std::{
    net::TcpListener,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    },
    time::Duration,
};

use axum::{
    body::Bytes,
    extract::State,
    http::{header::AUTHORIZATION, HeaderMap, StatusCode, Uri},
    routing::post,
    Router,
};
use serde_json::Value;
use tokio::sync::Mutex as AsyncMutex;

use crate::{
    app::envy::Envy,
    generate::{apis::huggingface::config::DEFAULT_MODEL, models::bearer_token::BearerToken},
    AppState,
};

#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub path: String,
    pub authorization: Option<String>,
    pub body: Value,
}

#[derive(Default)]
struct InFlight {
    current: AtomicUsize,
    peak: AtomicUsize,
}

#[derive(Clone)]
struct StubState {
    status: StatusCode,
    body: Bytes,
    delay: Duration,
    captured: Arc<Mutex<Vec<CapturedRequest>>>,
    in_flight: Arc<InFlight>,
}

/// In-process stand-in for the inference api that answers every call
/// with a fixed status and body.
pub struct StubInference {
    pub api_url: String,
    pub url: String,
    captured: Arc<Mutex<Vec<CapturedRequest>>>,
    in_flight: Arc<InFlight>,
}

impl StubInference {
    pub fn captured(&self) -> Vec<CapturedRequest> {
        self.captured.lock().unwrap().clone()
    }

    /// Highest number of calls the stub was serving at the same time.
    pub fn peak_in_flight(&self) -> usize {
        self.in_flight.peak.load(Ordering::SeqCst)
    }
}

async fn stub_handler(
    State(stub): State<StubState>,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, Bytes) {
    stub.captured.lock().unwrap().push(CapturedRequest {
        path: uri.path().to_string(),
        authorization: headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string),
        body: serde_json::from_slice(&body).unwrap_or(Value::Null),
    });

    let current = stub.in_flight.current.fetch_add(1, Ordering::SeqCst) + 1;
    stub.in_flight.peak.fetch_max(current, Ordering::SeqCst);

    if !stub.delay.is_zero() {
        tokio::time::sleep(stub.delay).await;
    }

    stub.in_flight.current.fetch_sub(1, Ordering::SeqCst);

    (stub.status, stub.body.clone())
}

pub async fn spawn_stub(status: StatusCode, body: Vec<u8>) -> StubInference {
    spawn_slow_stub(status, body, Duration::ZERO).await
}

/// Like `spawn_stub`, but holds every call open for `delay` before answering.
pub async fn spawn_slow_stub(status: StatusCode, body: Vec<u8>, delay: Duration) -> StubInference {
    let captured = Arc::new(Mutex::new(Vec::new()));
    let in_flight = Arc::new(InFlight::default());
    let state = StubState {
        status,
        body: Bytes::from(body),
        delay,
        captured: captured.clone(),
        in_flight: in_flight.clone(),
    };

    let app = Router::new()
        .route("/models/*model", post(stub_handler))
        .with_state(state);

    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::Server::from_tcp(listener)
            .unwrap()
            .serve(app.into_make_service())
            .await
            .unwrap();
    });

    let api_url = format!("http://{}/models", addr);

    StubInference {
        url: format!("{}/{}", api_url, DEFAULT_MODEL),
        api_url,
        captured,
        in_flight,
    }
}

/// Api base url on a local port nothing listens on.
pub fn unreachable_api_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    format!("http://{}/models", addr)
}

pub fn test_envy(api_url: &str, api_key: Option<&str>) -> Envy {
    Envy {
        app_env: "test".to_string(),
        port: None,
        huggingface_api_key: api_key.map(BearerToken::new),
        huggingface_model: DEFAULT_MODEL.to_string(),
        huggingface_api_url: api_url.to_string(),
        request_timeout_secs: None,
    }
}

pub fn test_state(api_url: &str, api_key: Option<&str>) -> AppState {
    AppState {
        envy: Arc::new(test_envy(api_url, api_key)),
        client: reqwest::Client::new(),
        dispatch_lock: Arc::new(AsyncMutex::new(())),
    }
}
