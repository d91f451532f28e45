//! HTTP server for Terraform Cloud notification webhooks.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};
use tfc_notify::{ForwardError, Forwarder, NotificationBatch};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Renders payloads and delivers them to Discord.
    pub forwarder: Forwarder,
}

/// Build the HTTP router for the relay service.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/terraform", post(terraform_webhook_handler))
        .route("/api/v1/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Accept a Terraform Cloud notification payload.
///
/// Replies `202 Accepted` once every notification has been delivered.
pub async fn terraform_webhook_handler(
    State(state): State<AppState>,
    Json(payload): Json<NotificationBatch>,
) -> Result<StatusCode, ApiError> {
    let delivered = state.forwarder.forward(&payload).await?;

    info!(
        delivered,
        channel = state.forwarder.channel_name(),
        "Terraform notification forwarded"
    );

    Ok(StatusCode::ACCEPTED)
}

/// A failed webhook request.
#[derive(Debug)]
pub struct ApiError(ForwardError);

impl From<ForwardError> for ApiError {
    fn from(err: ForwardError) -> Self {
        Self(err)
    }
}

impl ApiError {
    /// Unknown codes and failed deliveries are both server-side failures.
    pub fn status(&self) -> StatusCode {
        match self.0 {
            ForwardError::Render(_) | ForwardError::Delivery { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        error!(status = %status, error = %self.0, "Failed to forward Terraform notification");

        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}
