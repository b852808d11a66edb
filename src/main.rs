use std::{env, net::SocketAddr, sync::Arc, time::Duration};

#[macro_use]
extern crate lazy_static;

use axum::{
    error_handling::HandleErrorLayer,
    extract::DefaultBodyLimit,
    http::header::CONTENT_TYPE,
    http::Method,
    routing::{get, post},
    BoxError, Router,
};
use tokio::sync::Mutex;
use tower::{buffer::BufferLayer, limit::RateLimitLayer, ServiceBuilder};
use tower_http::cors::{Any, CorsLayer};
use tracing_subscriber::EnvFilter;

use crate::app::{envy::Envy, errors::DefaultApiError};

mod app;
mod generate;
#[cfg(test)]
mod test_util;

#[derive(Clone)]
pub struct AppState {
    pub envy: Arc<Envy>,
    pub client: reqwest::Client,
    pub dispatch_lock: Arc<Mutex<()>>,
}

impl AppState {
    pub fn new(envy: Envy) -> Result<Self, reqwest::Error> {
        let client = app::util::reqwest::build_client(envy.request_timeout())?;

        Ok(Self {
            envy: Arc::new(envy),
            client,
            dispatch_lock: Arc::new(Mutex::new(())),
        })
    }
}

#[tokio::main]
async fn main() {
    // tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // environment
    let app_env = env::var("APP_ENV").unwrap_or("development".to_string());
    if dotenvy::from_filename(format!(".env.{}", app_env)).is_err() {
        let _ = dotenvy::dotenv();
    }
    let envy = match Envy::from_env() {
        Ok(config) => config,
        Err(e) => panic!("{:#?}", e),
    };
    if let Err(e) = envy.validate() {
        panic!("{}", e);
    }

    if envy.credentials().is_none() {
        tracing::warn!("HUGGINGFACE_API_KEY is not set, every generation will be rejected");
    }

    tracing::info!(
        app_env = %envy.app_env,
        model = %envy.huggingface_model,
        timeout_secs = ?envy.request_timeout_secs,
        "configuration loaded"
    );

    // properties
    let port = envy.port.to_owned().unwrap_or(3000);
    let state = match AppState::new(envy) {
        Ok(state) => state,
        Err(e) => panic!("failed to build http client: {}", e),
    };

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("listening on {}", addr);

    axum::Server::bind(&addr)
        .serve(router(state).into_make_service())
        .await
        .unwrap();
}

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_headers([CONTENT_TYPE])
        .allow_methods([Method::GET, Method::POST]);

    Router::new()
        .route("/", get(app::controller::get_root))
        // generate
        .route("/generate", post(generate::controller::submit_form))
        .route("/api/generate", post(generate::controller::generate_image))
        // layers
        .layer(cors)
        .layer(DefaultBodyLimit::max(64 * 1024))
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(|err: BoxError| async move {
                    tracing::error!(%err, "middleware error");
                    DefaultApiError::ServiceOverloaded.value()
                }))
                .layer(BufferLayer::new(1024))
                .layer(RateLimitLayer::new(5, Duration::from_secs(1))),
        )
        .with_state(state)
}
