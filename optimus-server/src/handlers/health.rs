use axum::{Json, extract::State, http::StatusCode};
use serde_json::{Value, json};
use tracing::info;

use crate::infra::app_state::AppState;

pub async fn ping_handler() -> Json<Value> {
    info!("Ping endpoint called");
    Json(json!({
        "status": "ok",
        "message": "Optimus site server is running",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Unhealthy (503) only when there is no static site to serve. A missing
/// mail relay degrades the report but keeps a 200.
pub async fn health_handler(
    State(state): State<AppState>,
) -> (StatusCode, Json<Value>) {
    let site = &state.config().site;
    let static_present = site.static_dir().is_dir();
    let mail_relay = state.mailer.is_some();

    let (status, label) = match (static_present, mail_relay) {
        (false, _) => (StatusCode::SERVICE_UNAVAILABLE, "unhealthy"),
        (true, false) => (StatusCode::OK, "degraded"),
        (true, true) => (StatusCode::OK, "healthy"),
    };

    let body = json!({
        "status": label,
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION"),
        "checks": {
            "catalog": { "items": state.catalog.len() },
            "static_dir": static_present,
            "images_dir": site.images_dir().is_dir(),
            "profile_dir": site.profile_dir().is_dir(),
            "mail_relay": mail_relay,
        }
    });

    (status, Json(body))
}
