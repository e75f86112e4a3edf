//! REST handlers.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    Json,
};
use chrono::Local;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::api::SharedState;
use crate::core::agents::MultiAgentSystem;
use crate::core::catalog::{regulation_catalog, SUPPORTED_REGULATIONS};
use crate::domain::model::{ChatMessage, CompanyData, ComplianceRequest, ComplianceResponse};
use crate::utils::error::{ComplianceError, Result};
use crate::utils::format::report_url;
use crate::utils::validation::Validate;

pub const API_VERSION: &str = "2.0.0";

impl Validate for ComplianceRequest {
    fn validate(&self) -> Result<()> {
        if self.company_data.company_name.trim().is_empty() {
            return Err(ComplianceError::ValidationError {
                message: "company_data.company_name must not be empty".to_string(),
            });
        }
        if self.regulations.is_empty() {
            return Err(ComplianceError::ValidationError {
                message: "at least one regulation is required".to_string(),
            });
        }
        if let Some(blank) = self.regulations.iter().find(|r| r.trim().is_empty()) {
            return Err(ComplianceError::ValidationError {
                message: format!("invalid regulation identifier: {:?}", blank),
            });
        }
        Ok(())
    }
}

/// GET /
pub async fn root() -> Json<Value> {
    Json(json!({
        "message": "Gemini Compliance Monitoring System",
        "version": API_VERSION,
        "status": "operational",
        "regulations_supported": SUPPORTED_REGULATIONS,
        "features": [
            "Real-time compliance monitoring",
            "AI-powered regulation parsing",
            "Automated fix suggestions",
            "Risk assessment and fine estimation",
            "Detailed audit reports",
        ],
    }))
}

/// GET /health
pub async fn health_check(State(state): State<SharedState>) -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": Local::now().to_rfc3339(),
        "service": "compliance-monitor",
        "mock_mode": state.mock_mode,
    }))
}

/// GET /regulations
pub async fn get_regulations() -> Json<Value> {
    Json(json!({ "regulations": regulation_catalog() }))
}

/// POST /analyze-compliance
pub async fn analyze_compliance(
    State(state): State<SharedState>,
    payload: std::result::Result<Json<ComplianceRequest>, JsonRejection>,
) -> Result<Json<ComplianceResponse>> {
    let Json(request) = payload?;
    run_analysis(&state, request).await.map(Json)
}

#[derive(Debug, Deserialize)]
pub struct QuickCheckQuery {
    pub company_name: String,
    #[serde(default = "default_industry")]
    pub industry: String,
}

fn default_industry() -> String {
    "Technology".to_string()
}

/// POST /quick-check?company_name=..&industry=..
pub async fn quick_check(
    State(state): State<SharedState>,
    query: std::result::Result<Query<QuickCheckQuery>, QueryRejection>,
) -> Result<Json<ComplianceResponse>> {
    let Query(query) = query?;
    let request = ComplianceRequest {
        company_data: sample_company(query.company_name, query.industry),
        regulations: vec!["GDPR".to_string(), "CCPA".to_string()],
        priority: "low".to_string(),
        generate_report: true,
    };
    run_analysis(&state, request).await.map(Json)
}

fn sample_company(company_name: String, industry: String) -> CompanyData {
    CompanyData {
        company_name,
        data_collected: vec!["email".to_string(), "name".to_string(), "location".to_string()],
        data_storage_location: "global".to_string(),
        ai_models_used: vec!["basic_analytics".to_string()],
        user_count: 1000,
        revenue: Some(1_000_000.0),
        processing_purposes: vec!["service_delivery".to_string()],
        industry: Some(industry),
    }
}

async fn run_analysis(state: &SharedState, request: ComplianceRequest) -> Result<ComplianceResponse> {
    request.validate()?;
    tracing::info!(
        company = %request.company_data.company_name,
        priority = %request.priority,
        "Compliance analysis requested"
    );

    let analysis = state
        .monitor
        .analyze_compliance(&request.company_data, &request.regulations)
        .await;

    let now = Local::now();
    let response = ComplianceResponse {
        status: "completed".to_string(),
        compliance_score: analysis.compliance_score,
        violations: analysis.violations.clone(),
        suggested_fixes: analysis.suggested_fixes.clone(),
        audit_report: analysis.audit_report.clone(),
        risk_level: analysis.risk_level,
        estimated_fine: analysis.estimated_fine,
        report_url: request
            .generate_report
            .then(|| report_url(&request.company_data.company_name, now)),
        timestamp: now.to_rfc3339(),
    };

    let logger = state.audit_logger.clone();
    let company = request.company_data;
    tokio::spawn(async move {
        if let Err(e) = logger.store_audit_log(&company, &analysis).await {
            tracing::error!("Failed to store audit log: {}", e);
        }
    });

    Ok(response)
}

fn agents(state: &SharedState) -> Result<&MultiAgentSystem> {
    state
        .agents
        .as_ref()
        .ok_or_else(|| ComplianceError::ModelUnavailableError {
            message: "Gemini API key not configured; agents are unavailable in mock mode".to_string(),
        })
}

#[derive(Debug, Deserialize)]
pub struct ConsultRequest {
    pub query: String,
    #[serde(default)]
    pub history: Vec<ChatMessage>,
}

#[derive(Debug, Serialize)]
pub struct ConsultResponse {
    pub response: String,
}

/// POST /consult
pub async fn consult(
    State(state): State<SharedState>,
    payload: std::result::Result<Json<ConsultRequest>, JsonRejection>,
) -> Result<Json<ConsultResponse>> {
    let system = agents(&state)?;
    let Json(request) = payload?;
    if request.query.trim().is_empty() {
        return Err(ComplianceError::ValidationError {
            message: "query must not be empty".to_string(),
        });
    }
    let response = system.get_consultation(&request.query, &request.history).await?;
    Ok(Json(ConsultResponse { response }))
}

#[derive(Debug, Deserialize)]
pub struct ProcessDocumentRequest {
    pub text: String,
}

/// POST /process-document
pub async fn process_document(
    State(state): State<SharedState>,
    payload: std::result::Result<Json<ProcessDocumentRequest>, JsonRejection>,
) -> Result<Json<Value>> {
    let system = agents(&state)?;
    let Json(request) = payload?;
    Ok(Json(system.process_document(&request.text).await?))
}

#[derive(Debug, Deserialize)]
pub struct AgentRunRequest {
    pub agent: String,
    #[serde(default)]
    pub context: String,
    pub task: String,
}

#[derive(Debug, Serialize)]
pub struct AgentRunResponse {
    pub agent: String,
    pub response: String,
}

/// POST /agents/run
pub async fn run_agent(
    State(state): State<SharedState>,
    payload: std::result::Result<Json<AgentRunRequest>, JsonRejection>,
) -> Result<Json<AgentRunResponse>> {
    let system = agents(&state)?;
    let Json(request) = payload?;
    let response = system
        .run_agent(&request.agent, &request.context, &request.task)
        .await?;
    Ok(Json(AgentRunResponse {
        agent: request.agent,
        response,
    }))
}
