use crate::domain::model::{AuditLogEntry, CompanyData, ComplianceAnalysis};
use crate::domain::ports::Storage;
use crate::utils::error::Result;
use crate::utils::format::generate_report_id;
use chrono::Local;

pub struct AuditLogger<S: Storage> {
    storage: S,
}

impl<S: Storage> AuditLogger<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Persists a summary of one analysis and returns the file it was written to.
    pub async fn store_audit_log(
        &self,
        company_data: &CompanyData,
        analysis: &ComplianceAnalysis,
    ) -> Result<String> {
        let now = Local::now();
        let entry = AuditLogEntry {
            timestamp: now.to_rfc3339(),
            company: company_data.company_name.clone(),
            compliance_score: analysis.compliance_score,
            risk_level: analysis.risk_level,
            violations_count: analysis.violations.len(),
            regulations_checked: analysis.regulations.clone(),
        };

        tracing::info!(
            company = %entry.company,
            score = entry.compliance_score,
            risk = %entry.risk_level,
            violations = entry.violations_count,
            "Audit stored"
        );

        let path = format!("{}.json", generate_report_id(&company_data.company_name, now));
        let data = serde_json::to_vec_pretty(&entry)?;
        self.storage.write_file(&path, &data).await?;

        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::LocalStorage;
    use crate::domain::model::{AuditLogEntry, RiskLevel};
    use tempfile::TempDir;

    fn company(name: &str) -> CompanyData {
        CompanyData {
            company_name: name.to_string(),
            data_collected: vec![],
            data_storage_location: "EU".to_string(),
            ai_models_used: vec![],
            user_count: 1,
            revenue: None,
            processing_purposes: vec![],
            industry: None,
        }
    }

    fn analysis() -> ComplianceAnalysis {
        ComplianceAnalysis {
            compliance_score: 88.5,
            violations: vec![],
            suggested_fixes: vec![],
            audit_report: String::new(),
            risk_level: RiskLevel::Medium,
            estimated_fine: None,
            regulations: vec!["GDPR".to_string()],
            analysis_date: String::new(),
        }
    }

    #[tokio::test]
    async fn test_store_audit_log_writes_entry() {
        let dir = TempDir::new().unwrap();
        let logger = AuditLogger::new(LocalStorage::new(dir.path().to_str().unwrap().to_string()));

        let path = logger.store_audit_log(&company("Test Co"), &analysis()).await.unwrap();
        assert!(path.starts_with("report_test_co_"));

        let written = std::fs::read(dir.path().join(&path)).unwrap();
        let entry: AuditLogEntry = serde_json::from_slice(&written).unwrap();
        assert_eq!(entry.company, "Test Co");
        assert_eq!(entry.risk_level, RiskLevel::Medium);
        assert_eq!(entry.regulations_checked, vec!["GDPR"]);
    }

    #[tokio::test]
    async fn test_company_name_cannot_leave_log_dir() {
        let root = TempDir::new().unwrap();
        let base = root.path().join("a").join("b").join("logs");
        let logger = AuditLogger::new(LocalStorage::new(base.to_str().unwrap().to_string()));

        let path = logger
            .store_audit_log(&company("../../../../pwn"), &analysis())
            .await
            .unwrap();

        assert!(!path.contains('/'));
        assert!(base.join(&path).is_file());
        let entries: Vec<_> = std::fs::read_dir(root.path().join("a")).unwrap().collect();
        assert_eq!(entries.len(), 1, "only the b/ directory should exist under a/");
    }
}
