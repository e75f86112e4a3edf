use axum::{extract::State, response::Html, routing::get, Json, Router};
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::config::Settings;
use crate::utils::error::Result;

const DASHBOARD_HTML: &str = include_str!("../../static/dashboard.html");

#[derive(Debug, Clone)]
pub struct DashboardState {
    pub api_url: String,
}

async fn index() -> Html<&'static str> {
    Html(DASHBOARD_HTML)
}

/// The page reads its backend URL from here at load time.
async fn config(State(state): State<Arc<DashboardState>>) -> Json<Value> {
    Json(json!({ "api_url": state.api_url }))
}

pub fn router(api_url: String) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/config.json", get(config))
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(DashboardState { api_url }))
}

pub async fn serve(settings: &Settings) -> Result<()> {
    let addr = format!("{}:{}", settings.server.host, settings.server.dashboard_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(
        "📊 Dashboard on http://{} (API: {})",
        addr,
        settings.server.api_url
    );

    axum::serve(listener, router(settings.server.api_url.clone()))
        .with_graceful_shutdown(super::shutdown_signal())
        .await?;
    Ok(())
}
