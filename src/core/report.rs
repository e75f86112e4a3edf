use crate::domain::model::{AuditResults, CompanyData, RiskLevel, Severity};
use chrono::NaiveDate;
use std::fmt::Write;

/// Plain-text audit report.
pub fn generate_audit_report(
    company_data: &CompanyData,
    audit_results: &AuditResults,
    compliance_score: f64,
    risk_level: RiskLevel,
    date: NaiveDate,
) -> String {
    let company_name = if company_data.company_name.is_empty() {
        "Unknown Company"
    } else {
        company_data.company_name.as_str()
    };
    let violations = &audit_results.violations;
    let total_checks = audit_results
        .total_checks
        .map(|t| t.to_string())
        .unwrap_or_else(|| "N/A".to_string());

    let mut report = format!(
        r#"
COMPLIANCE AUDIT REPORT
======================

Company: {company_name}
Date: {date}
Compliance Score: {compliance_score}/100
Risk Level: {risk}

SUMMARY
-------
Total Checks Performed: {total_checks}
Violations Found: {found}
Critical Issues: {critical}
High Priority Issues: {high}

DETAILED FINDINGS
-----------------
"#,
        date = date.format("%Y-%m-%d"),
        risk = risk_level.as_str().to_uppercase(),
        found = violations.len(),
        critical = audit_results.count_severity(Severity::Critical),
        high = audit_results.count_severity(Severity::High),
    );

    if violations.is_empty() {
        report.push_str("✅ No violations found. Company is compliant with checked regulations.\n");
    } else {
        for (i, violation) in violations.iter().enumerate() {
            // Writing into a String cannot fail.
            let _ = write!(
                report,
                "\n{}. {} - {}\n    Severity: {}\n    System Affected: {}\n    Description: {}\n    Evidence: {}\n",
                i + 1,
                or_default(&violation.regulation, "Unknown"),
                or_default(&violation.requirement, "Requirement"),
                violation.severity.as_str().to_uppercase(),
                or_default(&violation.system_affected, "N/A"),
                or_default(&violation.description, "No description"),
                or_default(&violation.evidence, "No evidence provided"),
            );
        }
    }

    let _ = write!(
        report,
        r#"

RECOMMENDATIONS
---------------
{}

NEXT STEPS
----------
1. Review all violations and suggested fixes
2. Prioritize fixes based on severity
3. Implement corrective actions
4. Schedule follow-up audit in 30 days
5. Document all compliance efforts

---
Generated by Gemini Compliance Monitor
AI-Powered Regulatory Compliance System
"#,
        or_default(&audit_results.summary, "No specific recommendations provided.")
    );

    report.trim().to_string()
}

fn or_default<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.is_empty() {
        fallback
    } else {
        value
    }
}
