pub mod agents;
pub mod audit_log;
pub mod auditor;
pub mod catalog;
pub mod fix_suggester;
pub mod monitor;
pub mod regulation_parser;
pub mod report;
pub mod scoring;

pub use crate::domain::model::{AuditResults, CompanyData, ComplianceAnalysis, Fix, Regulation, Violation};
pub use crate::domain::ports::{GenerativeModel, Storage};
pub use crate::utils::error::Result;
