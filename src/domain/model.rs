use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    High,
    #[default]
    Medium,
    Low,
    #[serde(other)]
    Unknown,
}

impl Severity {
    /// Sort key for remediation order; anything unrecognised goes last with `low`.
    pub fn rank(self) -> u8 {
        match self {
            Severity::Critical => 0,
            Severity::High => 1,
            Severity::Medium => 2,
            Severity::Low | Severity::Unknown => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Critical => "critical",
            Severity::High => "high",
            Severity::Medium => "medium",
            Severity::Low => "low",
            Severity::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
    Unknown,
}

impl RiskLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
            RiskLevel::Critical => "critical",
            RiskLevel::Unknown => "unknown",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn default_storage_location() -> String {
    "global".to_string()
}

fn default_processing_purposes() -> Vec<String> {
    vec!["Analytics".to_string()]
}

fn default_industry() -> Option<String> {
    Some("Technology".to_string())
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CompanyData {
    pub company_name: String,
    pub data_collected: Vec<String>,
    #[serde(default = "default_storage_location")]
    pub data_storage_location: String,
    pub ai_models_used: Vec<String>,
    pub user_count: u64,
    #[serde(default)]
    pub revenue: Option<f64>,
    #[serde(default = "default_processing_purposes")]
    pub processing_purposes: Vec<String>,
    #[serde(default = "default_industry")]
    pub industry: Option<String>,
}

fn default_priority() -> String {
    "medium".to_string()
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplianceRequest {
    pub company_data: CompanyData,
    pub regulations: Vec<String>,
    #[serde(default = "default_priority")]
    pub priority: String,
    #[serde(default = "default_true")]
    pub generate_report: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Requirement {
    pub id: String,
    pub requirement: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub severity: Severity,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Penalties {
    pub max_fine_percentage: f64,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Regulation {
    pub regulation_name: String,
    #[serde(default)]
    pub key_requirements: Vec<Requirement>,
    #[serde(default)]
    pub applicable_systems: Vec<String>,
    pub penalties: Penalties,
}

fn unknown_id() -> String {
    "unknown".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Violation {
    #[serde(default = "unknown_id")]
    pub id: String,
    #[serde(default)]
    pub regulation: String,
    #[serde(default)]
    pub requirement: String,
    #[serde(default)]
    pub severity: Severity,
    #[serde(default)]
    pub system_affected: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub evidence: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct AuditResults {
    #[serde(default)]
    pub total_checks: Option<u32>,
    #[serde(default)]
    pub passed_checks: Option<u32>,
    #[serde(default)]
    pub violations: Vec<Violation>,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub recommendations: Vec<String>,
}

impl AuditResults {
    pub fn count_severity(&self, severity: Severity) -> usize {
        self.violations
            .iter()
            .filter(|v| v.severity == severity)
            .count()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Fix {
    #[serde(default = "unknown_id")]
    pub violation_id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub steps: Vec<String>,
    #[serde(default)]
    pub estimated_time_hours: u32,
    #[serde(default)]
    pub required_resources: Vec<String>,
    #[serde(default = "low_priority")]
    pub priority: Severity,
    #[serde(default)]
    pub cost_estimate_usd: u64,
    #[serde(default)]
    pub compliance_impact: String,
}

fn low_priority() -> Severity {
    Severity::Low
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplianceAnalysis {
    pub compliance_score: f64,
    pub violations: Vec<Violation>,
    pub suggested_fixes: Vec<Fix>,
    pub audit_report: String,
    pub risk_level: RiskLevel,
    pub estimated_fine: Option<f64>,
    pub regulations: Vec<String>,
    pub analysis_date: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplianceResponse {
    pub status: String,
    pub compliance_score: f64,
    pub violations: Vec<Violation>,
    pub suggested_fixes: Vec<Fix>,
    pub audit_report: String,
    pub risk_level: RiskLevel,
    pub estimated_fine: Option<f64>,
    pub report_url: Option<String>,
    pub timestamp: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuditLogEntry {
    pub timestamp: String,
    pub company: String,
    pub compliance_score: f64,
    pub risk_level: RiskLevel,
    pub violations_count: usize,
    pub regulations_checked: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Model,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}
