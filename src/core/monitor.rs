use crate::core::auditor::SystemAuditor;
use crate::core::fix_suggester::FixSuggester;
use crate::core::regulation_parser::RegulationParser;
use crate::core::report::generate_audit_report;
use crate::core::scoring::{assess_risk, calculate_compliance_score, round2};
use crate::domain::model::{CompanyData, ComplianceAnalysis};
use crate::domain::ports::GenerativeModel;
use chrono::Local;
use std::path::PathBuf;
use std::sync::Arc;

/// Runs the compliance pipeline: parse, audit, score, fix, assess, report.
pub struct ComplianceMonitor {
    regulation_parser: RegulationParser,
    system_auditor: SystemAuditor,
    fix_suggester: FixSuggester,
}

impl ComplianceMonitor {
    pub fn new(
        regulation_parser: RegulationParser,
        system_auditor: SystemAuditor,
        fix_suggester: FixSuggester,
    ) -> Self {
        Self {
            regulation_parser,
            system_auditor,
            fix_suggester,
        }
    }

    /// Wires every stage to the same model; `None` runs the deterministic fallbacks.
    pub fn with_model(model: Option<Arc<dyn GenerativeModel>>, regulations_dir: Option<PathBuf>) -> Self {
        let mut parser = RegulationParser::new(model.clone());
        if let Some(dir) = regulations_dir {
            parser = parser.with_regulations_dir(dir);
        }
        Self::new(
            parser,
            SystemAuditor::new(model.clone()),
            FixSuggester::new(model),
        )
    }

    pub fn regulation_parser(&self) -> &RegulationParser {
        &self.regulation_parser
    }

    pub async fn analyze_compliance(
        &self,
        company_data: &CompanyData,
        regulations: &[String],
    ) -> ComplianceAnalysis {
        tracing::info!("Starting compliance analysis for {}", company_data.company_name);

        tracing::info!("Parsing {} regulations...", regulations.len());
        let parsed = self.regulation_parser.parse_regulations(regulations).await;

        tracing::info!("Auditing company systems...");
        let audit_results = if parsed.is_empty() {
            tracing::warn!("No regulations to audit against");
            SystemAuditor::default_audit_results()
        } else {
            self.system_auditor.audit_systems(company_data, &parsed).await
        };

        let compliance_score = round2(calculate_compliance_score(&audit_results));

        let suggested_fixes = self
            .fix_suggester
            .suggest_fixes(&audit_results, company_data)
            .await;

        let (risk_level, estimated_fine) = assess_risk(&audit_results, company_data.revenue);

        let now = Local::now();
        let audit_report = generate_audit_report(
            company_data,
            &audit_results,
            compliance_score,
            risk_level,
            now.date_naive(),
        );

        tracing::info!(
            "Analysis complete for {}: score={}, risk={}, violations={}, fixes={}",
            company_data.company_name,
            compliance_score,
            risk_level,
            audit_results.violations.len(),
            suggested_fixes.len()
        );

        ComplianceAnalysis {
            compliance_score,
            violations: audit_results.violations,
            suggested_fixes,
            audit_report,
            risk_level,
            estimated_fine,
            regulations: regulations.to_vec(),
            analysis_date: now.format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}
