use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use core_config::AppInfo;
use serde::Serialize;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub name: &'static str,
    pub version: &'static str,
}

/// Liveness handler; returns 200 with app name and version whenever the
/// process is up.
async fn health_handler(State(app): State<AppInfo>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy",
            name: app.name,
            version: app.version,
        }),
    )
}

/// Creates a router with the /health endpoint.
pub fn health_router(app_info: AppInfo) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .with_state(app_info)
}
