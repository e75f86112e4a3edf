use crate::domain::model::{AuditResults, RiskLevel, Severity};

/// Checks assumed when the audit did not report a total.
const ASSUMED_EXTRA_CHECKS: usize = 10;

fn score_weight(severity: Severity) -> f64 {
    match severity {
        Severity::Critical => 5.0,
        Severity::High => 3.0,
        Severity::Medium => 2.0,
        Severity::Low | Severity::Unknown => 1.0,
    }
}

fn risk_points(severity: Severity) -> u32 {
    match severity {
        Severity::Critical => 10,
        Severity::High => 6,
        Severity::Medium => 3,
        Severity::Low => 1,
        Severity::Unknown => 0,
    }
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Compliance score in [0, 100]; each violation costs `10 * weight / total_checks`.
pub fn calculate_compliance_score(audit_results: &AuditResults) -> f64 {
    let violations = &audit_results.violations;
    let total_checks = audit_results
        .total_checks
        .map(|t| t as usize)
        .unwrap_or(violations.len() + ASSUMED_EXTRA_CHECKS);

    if total_checks == 0 {
        return 100.0;
    }

    let penalty: f64 = violations
        .iter()
        .map(|v| 10.0 * score_weight(v.severity) / total_checks as f64)
        .sum();

    (100.0 - penalty).clamp(0.0, 100.0)
}

/// Risk level plus an estimated fine as a share of revenue.
pub fn assess_risk(audit_results: &AuditResults, revenue: Option<f64>) -> (RiskLevel, Option<f64>) {
    let violations = &audit_results.violations;
    if violations.is_empty() {
        return (RiskLevel::Low, Some(0.0));
    }

    let score: u32 = violations.iter().map(|v| risk_points(v.severity)).sum();

    let (risk_level, fine_percentage) = match score {
        s if s >= 20 => (RiskLevel::Critical, 0.06),
        s if s >= 10 => (RiskLevel::High, 0.04),
        s if s >= 5 => (RiskLevel::Medium, 0.02),
        _ => (RiskLevel::Low, 0.01),
    };

    let estimated_fine = revenue
        .filter(|r| *r != 0.0)
        .map(|r| round2(r * fine_percentage))
        .filter(|fine| *fine != 0.0);

    (risk_level, estimated_fine)
}

/// Band for a compliance score, used for summaries.
pub fn risk_from_score(score: f64) -> RiskLevel {
    if score >= 90.0 {
        RiskLevel::Low
    } else if score >= 70.0 {
        RiskLevel::Medium
    } else if score >= 50.0 {
        RiskLevel::High
    } else {
        RiskLevel::Critical
    }
}
