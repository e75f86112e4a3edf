//! HTTP surface: the REST API and the dashboard server.

pub mod dashboard;
pub mod error;
pub mod handlers;

use axum::{
    routing::{get, post},
    Router,
};
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::adapters::storage::LocalStorage;
use crate::config::Settings;
use crate::core::agents::MultiAgentSystem;
use crate::core::audit_log::AuditLogger;
use crate::core::monitor::ComplianceMonitor;
use crate::domain::ports::GenerativeModel;
use crate::utils::error::Result;

pub struct AppState {
    pub monitor: ComplianceMonitor,
    pub agents: Option<MultiAgentSystem>,
    pub audit_logger: Arc<AuditLogger<LocalStorage>>,
    pub mock_mode: bool,
}

pub type SharedState = Arc<AppState>;

impl AppState {
    pub fn new(
        model: Option<Arc<dyn GenerativeModel>>,
        regulations_dir: Option<PathBuf>,
        audit_log_dir: String,
    ) -> Self {
        Self {
            mock_mode: model.is_none(),
            agents: model.clone().map(MultiAgentSystem::new),
            monitor: ComplianceMonitor::with_model(model, regulations_dir),
            audit_logger: Arc::new(AuditLogger::new(LocalStorage::new(audit_log_dir))),
        }
    }

    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Ok(Self::new(
            settings.generative_model()?,
            Some(PathBuf::from(&settings.storage.regulations_dir)),
            settings.storage.audit_log_dir.clone(),
        ))
    }
}

pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health_check))
        .route("/regulations", get(handlers::get_regulations))
        .route("/analyze-compliance", post(handlers::analyze_compliance))
        .route("/quick-check", post(handlers::quick_check))
        .route("/consult", post(handlers::consult))
        .route("/process-document", post(handlers::process_document))
        .route("/agents/run", post(handlers::run_agent))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn serve(settings: &Settings) -> Result<()> {
    tracing::info!("🚀 Starting Gemini Compliance Monitor...");
    let state = Arc::new(AppState::from_settings(settings)?);
    let app = router(state);

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("✅ API listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("👋 API server stopped");
    Ok(())
}

/// Resolves on Ctrl+C or, on Unix, SIGTERM (container stop).
pub(crate) async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("Shutdown signal received");
}
