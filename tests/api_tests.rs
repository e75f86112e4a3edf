use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use compliance_monitor::api::{router, AppState};
use compliance_monitor::domain::model::ChatMessage;
use compliance_monitor::domain::ports::GenerativeModel;
use compliance_monitor::Result;
use serde_json::{json, Value};
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

struct ScriptedModel {
    reply: String,
}

#[async_trait]
impl GenerativeModel for ScriptedModel {
    async fn generate(&self, _prompt: &str) -> Result<String> {
        Ok(self.reply.clone())
    }

    async fn chat(&self, history: &[ChatMessage], message: &str) -> Result<String> {
        Ok(format!("[{} prior] {}", history.len(), message))
    }
}

fn mock_app(log_dir: &TempDir) -> Router {
    let state = AppState::new(None, None, log_dir.path().to_string_lossy().to_string());
    router(Arc::new(state))
}

fn model_app(log_dir: &TempDir, reply: &str) -> Router {
    let model: Arc<dyn GenerativeModel> = Arc::new(ScriptedModel {
        reply: reply.to_string(),
    });
    let state = AppState::new(Some(model), None, log_dir.path().to_string_lossy().to_string());
    router(Arc::new(state))
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_root_lists_supported_regulations() {
    let dir = TempDir::new().unwrap();
    let (status, body) = send(mock_app(&dir), get("/")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "operational");
    assert_eq!(body["version"], "2.0.0");
    let regs = body["regulations_supported"].as_array().unwrap();
    assert!(regs.contains(&json!("GDPR")));
    assert!(regs.contains(&json!("AI_ACT")));
}

#[tokio::test]
async fn test_health_reports_mock_mode() {
    let dir = TempDir::new().unwrap();
    let (status, body) = send(mock_app(&dir), get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["mock_mode"], true);

    let (_, body) = send(model_app(&dir, "ok"), get("/health")).await;
    assert_eq!(body["mock_mode"], false);
}

#[tokio::test]
async fn test_regulations_catalogue() {
    let dir = TempDir::new().unwrap();
    let (status, body) = send(mock_app(&dir), get("/regulations")).await;

    assert_eq!(status, StatusCode::OK);
    let gdpr = &body["regulations"]["GDPR"];
    assert!(gdpr["name"].as_str().unwrap().contains("General Data Protection"));
    assert!(body["regulations"]["CCPA"].is_object());
}

#[tokio::test]
async fn test_analyze_compliance_in_mock_mode() {
    let dir = TempDir::new().unwrap();
    let request = json!({
        "company_data": {
            "company_name": "Acme Analytics",
            "data_collected": ["email", "name"],
            "data_storage_location": "USA",
            "ai_models_used": ["recommender"],
            "user_count": 120000,
            "revenue": 5000000.0
        },
        "regulations": ["GDPR", "CCPA", "AI_ACT"]
    });

    let (status, body) = send(mock_app(&dir), post_json("/analyze-compliance", request)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "completed");

    let ids: Vec<&str> = body["violations"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["id"].as_str().unwrap())
        .collect();
    assert_eq!(
        ids,
        vec!["gdpr_international_transfer", "ccpa_threshold", "aia_transparency"]
    );

    // 6 + 6 + 3 risk points
    assert_eq!(body["risk_level"], "high");
    assert_eq!(body["estimated_fine"], 200000.0);
    assert_eq!(body["suggested_fixes"].as_array().unwrap().len(), 3);
    assert!(body["audit_report"].as_str().unwrap().contains("Acme Analytics"));
    assert!(body["report_url"]
        .as_str()
        .unwrap()
        .starts_with("/reports/acme analytics_"));
}

#[tokio::test]
async fn test_analyze_without_report_url() {
    let dir = TempDir::new().unwrap();
    let request = json!({
        "company_data": {
            "company_name": "Tiny",
            "data_collected": ["email"],
            "data_storage_location": "EU",
            "ai_models_used": [],
            "user_count": 200
        },
        "regulations": ["GDPR"],
        "generate_report": false
    });

    let (status, body) = send(mock_app(&dir), post_json("/analyze-compliance", request)).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["report_url"].is_null());
    assert_eq!(body["compliance_score"], 100.0);
    assert_eq!(body["risk_level"], "low");
    assert_eq!(body["estimated_fine"], 0.0);
}

#[tokio::test]
async fn test_analyze_rejects_invalid_requests() {
    let dir = TempDir::new().unwrap();

    let blank_name = json!({
        "company_data": {
            "company_name": "  ",
            "data_collected": [],
            "ai_models_used": [],
            "user_count": 0
        },
        "regulations": ["GDPR"]
    });
    let (status, body) = send(mock_app(&dir), post_json("/analyze-compliance", blank_name)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");

    let no_regulations = json!({
        "company_data": {
            "company_name": "Acme",
            "data_collected": [],
            "ai_models_used": [],
            "user_count": 0
        },
        "regulations": []
    });
    let (status, _) = send(mock_app(&dir), post_json("/analyze-compliance", no_regulations)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_quick_check_uses_sample_company() {
    let dir = TempDir::new().unwrap();
    let request = Request::builder()
        .method("POST")
        .uri("/quick-check?company_name=Startup&industry=Retail")
        .body(Body::empty())
        .unwrap();

    let (status, body) = send(mock_app(&dir), request).await;

    assert_eq!(status, StatusCode::OK);
    // Global storage trips the GDPR transfer check only.
    let violations = body["violations"].as_array().unwrap();
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0]["id"], "gdpr_international_transfer");
    assert_eq!(body["compliance_score"], 95.0);
    assert_eq!(body["risk_level"], "medium");
    assert_eq!(body["estimated_fine"], 20000.0);
}

#[tokio::test]
async fn test_agent_endpoints_unavailable_in_mock_mode() {
    let dir = TempDir::new().unwrap();

    let (status, body) = send(
        mock_app(&dir),
        post_json("/consult", json!({"query": "Do we need a DPO?"})),
    )
    .await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["code"], "MODEL_UNAVAILABLE");

    let (status, _) = send(
        mock_app(&dir),
        post_json("/process-document", json!({"text": "Article 5"})),
    )
    .await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_consult_with_history() {
    let dir = TempDir::new().unwrap();
    let request = json!({
        "query": "Do we need a DPO?",
        "history": [
            {"role": "user", "content": "We process health data."},
            {"role": "model", "content": "Then HIPAA may apply."}
        ]
    });

    let (status, body) = send(model_app(&dir, "unused"), post_json("/consult", request)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["response"], "[2 prior] Do we need a DPO?");

    let (status, _) = send(
        model_app(&dir, "unused"),
        post_json("/consult", json!({"query": "   "})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_process_document_returns_structured_json() {
    let dir = TempDir::new().unwrap();
    let reply = "Here you go:\n{\"requirements\": [\"Lawful basis\", \"Right to erasure\"]}";

    let (status, body) = send(
        model_app(&dir, reply),
        post_json("/process-document", json!({"text": "Regulation text"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["requirements"][0], "Lawful basis");
}

#[tokio::test]
async fn test_run_agent_by_name() {
    let dir = TempDir::new().unwrap();

    let (status, body) = send(
        model_app(&dir, "Remediation plan"),
        post_json(
            "/agents/run",
            json!({"agent": "auditor", "context": "EU customers", "task": "Find gaps"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["agent"], "auditor");
    assert_eq!(body["response"], "Remediation plan");

    let (status, body) = send(
        model_app(&dir, "x"),
        post_json("/agents/run", json!({"agent": "lawyer", "task": "Sue"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_dashboard_serves_page_and_backend_url() {
    let app = compliance_monitor::api::dashboard::router("http://api.internal:8000".to_string());

    let response = app.clone().oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let html = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(html.contains("config.json"));

    let (status, body) = send(app, get("/config.json")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["api_url"], "http://api.internal:8000");
}

#[tokio::test]
async fn test_unreadable_bodies_get_json_errors() {
    let dir = TempDir::new().unwrap();

    let missing_field = json!({
        "company_data": {"company_name": "X"},
        "regulations": ["GDPR"]
    });
    let (status, body) = send(mock_app(&dir), post_json("/analyze-compliance", missing_field)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert!(body["message"].as_str().unwrap().contains("data_collected"));

    let broken = Request::builder()
        .method("POST")
        .uri("/analyze-compliance")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, body) = send(mock_app(&dir), broken).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");

    let (status, body) = send(
        model_app(&dir, "x"),
        post_json("/agents/run", json!({"agent": "auditor"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_quick_check_requires_company_name() {
    let dir = TempDir::new().unwrap();
    let request = Request::builder()
        .method("POST")
        .uri("/quick-check?industry=Retail")
        .body(Body::empty())
        .unwrap();

    let (status, body) = send(mock_app(&dir), request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert!(body["message"].as_str().unwrap().contains("company_name"));
}
