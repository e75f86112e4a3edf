use crate::domain::model::{AuditResults, CompanyData, Fix, Violation};
use crate::domain::ports::GenerativeModel;
use crate::utils::error::{ComplianceError, Result};
use crate::utils::json::strip_code_fence;
use serde::Deserialize;
use std::sync::Arc;

const MAX_TEMPLATE_FIXES: usize = 5;

struct FixTemplate {
    title: &'static str,
    description: &'static str,
    steps: &'static [&'static str],
    estimated_time_hours: u32,
    required_resources: &'static [&'static str],
    cost_estimate_usd: u64,
    compliance_impact: &'static str,
}

const DATA_MINIMIZATION: FixTemplate = FixTemplate {
    title: "Implement Data Minimization Policy",
    description: "Reduce collected data to only what's necessary",
    steps: &[
        "Audit current data collection",
        "Identify unnecessary data fields",
        "Update data collection forms",
        "Delete historical unnecessary data",
    ],
    estimated_time_hours: 40,
    required_resources: &["data_engineer", "legal"],
    cost_estimate_usd: 8000,
    compliance_impact: "Resolves data minimization requirements",
};

const USER_CONSENT: FixTemplate = FixTemplate {
    title: "Deploy Consent Management Platform",
    description: "Implement proper user consent collection and management",
    steps: &[
        "Select consent management tool",
        "Design consent collection UI",
        "Integrate with data systems",
        "Test and deploy",
    ],
    estimated_time_hours: 60,
    required_resources: &["frontend_dev", "backend_dev", "legal"],
    cost_estimate_usd: 15000,
    compliance_impact: "Ensures proper consent collection",
};

const AI_TRANSPARENCY: FixTemplate = FixTemplate {
    title: "Create AI Model Documentation",
    description: "Document AI models for transparency requirements",
    steps: &[
        "Document model purpose and capabilities",
        "Describe training data and methodology",
        "Outline decision-making process",
        "Create user-facing explanations",
    ],
    estimated_time_hours: 30,
    required_resources: &["data_scientist", "technical_writer"],
    cost_estimate_usd: 6000,
    compliance_impact: "Meets AI transparency requirements",
};

/// The model may answer with a bare array or wrap it as `{"fixes": [...]}`.
#[derive(Deserialize)]
#[serde(untagged)]
enum FixesPayload {
    List(Vec<Fix>),
    Wrapped { fixes: Vec<Fix> },
}

pub struct FixSuggester {
    model: Option<Arc<dyn GenerativeModel>>,
}

impl FixSuggester {
    pub fn new(model: Option<Arc<dyn GenerativeModel>>) -> Self {
        Self { model }
    }

    pub async fn suggest_fixes(&self, audit_results: &AuditResults, company_data: &CompanyData) -> Vec<Fix> {
        let violations = &audit_results.violations;
        if violations.is_empty() {
            return Vec::new();
        }

        let fixes = match &self.model {
            Some(model) => match Self::suggest_with_model(model.as_ref(), violations, company_data).await {
                Ok(fixes) => fixes,
                Err(e) => {
                    tracing::error!("AI fix generation failed, using templates: {}", e);
                    Self::suggest_with_templates(violations, company_data)
                }
            },
            None => Self::suggest_with_templates(violations, company_data),
        };

        prioritize_fixes(fixes)
    }

    async fn suggest_with_model(
        model: &dyn GenerativeModel,
        violations: &[Violation],
        company_data: &CompanyData,
    ) -> Result<Vec<Fix>> {
        let prompt = Self::create_fix_prompt(violations, company_data)?;
        let response = model.generate(&prompt).await?;

        match serde_json::from_str::<FixesPayload>(strip_code_fence(&response)) {
            Ok(FixesPayload::List(fixes)) | Ok(FixesPayload::Wrapped { fixes }) => Ok(fixes),
            Err(e) => Err(ComplianceError::ModelResponseError {
                message: format!("unexpected fix payload: {}", e),
            }),
        }
    }

    fn create_fix_prompt(violations: &[Violation], company_data: &CompanyData) -> Result<String> {
        let violations_json = serde_json::to_string_pretty(violations)?;
        let company_info = serde_json::to_string_pretty(&serde_json::json!({
            "industry": company_data.industry.as_deref().unwrap_or("Technology"),
            "size": company_data.user_count,
            "tech_stack": company_data.ai_models_used,
        }))?;

        Ok(format!(
            r#"
Generate actionable fix suggestions for these compliance violations.

VIOLATIONS:
{violations_json}

COMPANY CONTEXT:
{company_info}

For each violation, provide a practical fix. Return ONLY valid JSON array:
[
    {{
        "violation_id": "matching_id",
        "title": "Fix Title",
        "description": "Detailed description",
        "steps": ["Step 1", "Step 2"],
        "estimated_time_hours": 24,
        "required_resources": ["developer", "legal"],
        "priority": "critical|high|medium|low",
        "cost_estimate_usd": 5000,
        "compliance_impact": "Will resolve violation"
    }}
]

Make fixes specific, actionable, and appropriate for the company size.
"#
        ))
    }

    fn select_template(violation: &Violation) -> &'static FixTemplate {
        let requirement = violation.requirement.to_lowercase();

        if requirement.contains("data") || requirement.contains("collection") {
            &DATA_MINIMIZATION
        } else if requirement.contains("ai") || requirement.contains("model") {
            &AI_TRANSPARENCY
        } else {
            // consent / opt-out and anything unmatched
            &USER_CONSENT
        }
    }

    /// (cost, time) multipliers by user base.
    fn size_multipliers(user_count: u64) -> (f64, f64) {
        if user_count > 100_000 {
            (2.0, 1.5)
        } else if user_count < 1000 {
            (0.5, 0.8)
        } else {
            (1.0, 1.0)
        }
    }

    pub fn suggest_with_templates(violations: &[Violation], company_data: &CompanyData) -> Vec<Fix> {
        let (cost_multiplier, time_multiplier) = Self::size_multipliers(company_data.user_count);

        violations
            .iter()
            .take(MAX_TEMPLATE_FIXES)
            .map(|violation| {
                let template = Self::select_template(violation);
                Fix {
                    violation_id: violation.id.clone(),
                    title: template.title.to_string(),
                    description: template.description.to_string(),
                    steps: template.steps.iter().map(|s| s.to_string()).collect(),
                    estimated_time_hours: (template.estimated_time_hours as f64 * time_multiplier) as u32,
                    required_resources: template
                        .required_resources
                        .iter()
                        .map(|r| r.to_string())
                        .collect(),
                    priority: violation.severity,
                    cost_estimate_usd: (template.cost_estimate_usd as f64 * cost_multiplier) as u64,
                    compliance_impact: template.compliance_impact.to_string(),
                }
            })
            .collect()
    }
}

/// Stable sort, most severe first.
pub fn prioritize_fixes(mut fixes: Vec<Fix>) -> Vec<Fix> {
    fixes.sort_by_key(|fix| fix.priority.rank());
    fixes
}
