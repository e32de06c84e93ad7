use axum::{
    http::StatusCode,
    middleware,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::{sync::Arc, time::Duration};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    config::Config,
    middleware::{make_span_with_request_id, request_id_middleware},
    services::{HttpUserDirectory, OpenAiDelegate, RecommendationDelegate, UserDirectory},
};

pub mod distance;
pub mod recommendations;
pub mod users;

pub const SERVICE_NAME: &str = "tripsense-ai-service";

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    /// Present only when an API key is configured
    pub delegate: Option<Arc<dyn RecommendationDelegate>>,
    pub users: Arc<dyn UserDirectory>,
    /// Serve local recommendations when the delegate fails
    pub delegate_failure_fallback: bool,
}

impl AppState {
    /// Wires the outbound clients described by the configuration
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.upstream_timeout_secs))
            .build()?;

        let delegate = config.openai_api_key().map(|key| {
            Arc::new(OpenAiDelegate::new(
                http_client.clone(),
                key.to_string(),
                config.openai_api_url.clone(),
                config.openai_model.clone(),
            )) as Arc<dyn RecommendationDelegate>
        });

        let users = HttpUserDirectory::new(http_client, &config.user_service_url)?;

        Ok(Self {
            delegate,
            users: Arc::new(users),
            delegate_failure_fallback: config.delegate_failure_fallback,
        })
    }
}

/// Creates the application router with all routes and layers
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(health_check))
        .nest("/api", api_routes())
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
                .layer(CorsLayer::permissive()),
        )
}

/// API routes under /api
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        // Path spelling is relied on by existing clients
        .route("/recomendations", post(recommendations::recommend))
        .route("/distance-km", post(distance::distance_km))
        .route("/users/:email", get(users::get_user))
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (
        StatusCode::OK,
        Json(json!({ "status": "ok", "service": SERVICE_NAME })),
    )
}
