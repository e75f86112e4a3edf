//! Built-in regulation knowledge used when no model or data file is available.

use crate::domain::model::{Penalties, Regulation, Requirement, Severity};
use serde::Serialize;
use std::collections::BTreeMap;

pub const SUPPORTED_REGULATIONS: [&str; 6] = ["GDPR", "CCPA", "DMA", "AI_ACT", "HIPAA", "PIPEDA"];

fn requirement(id: &str, text: &str, category: &str, severity: Severity) -> Requirement {
    Requirement {
        id: id.to_string(),
        requirement: text.to_string(),
        category: category.to_string(),
        severity,
    }
}

fn systems(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

/// Structured fallback for the regulations the service knows natively.
pub fn fallback_regulation(regulation_name: &str) -> Option<Regulation> {
    let regulation = match regulation_name {
        "GDPR" => Regulation {
            regulation_name: "GDPR".to_string(),
            key_requirements: vec![
                requirement(
                    "gdpr_1",
                    "Obtain explicit consent for data processing",
                    "user_consent",
                    Severity::High,
                ),
                requirement(
                    "gdpr_2",
                    "Implement data protection by design and by default",
                    "security",
                    Severity::High,
                ),
                requirement(
                    "gdpr_3",
                    "Notify authorities of data breaches within 72 hours",
                    "transparency",
                    Severity::Critical,
                ),
            ],
            applicable_systems: systems(&["data_collection", "data_storage", "user_interface"]),
            penalties: Penalties {
                max_fine_percentage: 0.04,
                description: "Up to 4% of global annual turnover".to_string(),
            },
        },
        "CCPA" => Regulation {
            regulation_name: "CCPA".to_string(),
            key_requirements: vec![
                requirement(
                    "ccpa_1",
                    "Provide right to opt-out of data sale",
                    "user_consent",
                    Severity::High,
                ),
                requirement(
                    "ccpa_2",
                    "Disclose data collection practices",
                    "transparency",
                    Severity::Medium,
                ),
                requirement(
                    "ccpa_3",
                    "Honor deletion requests within 45 days",
                    "data_protection",
                    Severity::High,
                ),
            ],
            applicable_systems: systems(&["data_collection", "user_interface"]),
            penalties: Penalties {
                max_fine_percentage: 0.025,
                description: "$2,500-$7,500 per violation".to_string(),
            },
        },
        "AI_ACT" => Regulation {
            regulation_name: "AI_ACT".to_string(),
            key_requirements: vec![
                requirement(
                    "aia_1",
                    "Conduct risk assessment for high-risk AI systems",
                    "audit",
                    Severity::Critical,
                ),
                requirement(
                    "aia_2",
                    "Ensure human oversight of AI decisions",
                    "transparency",
                    Severity::High,
                ),
                requirement(
                    "aia_3",
                    "Maintain documentation of AI system development",
                    "audit",
                    Severity::Medium,
                ),
            ],
            applicable_systems: systems(&["ai_models", "data_collection"]),
            penalties: Penalties {
                max_fine_percentage: 0.06,
                description: "Up to 6% of global annual turnover".to_string(),
            },
        },
        _ => return None,
    };
    Some(regulation)
}

pub fn default_regulation(regulation_name: &str) -> Regulation {
    Regulation {
        regulation_name: regulation_name.to_string(),
        key_requirements: Vec::new(),
        applicable_systems: Vec::new(),
        penalties: Penalties {
            max_fine_percentage: 0.04,
            description: "Standard fine".to_string(),
        },
    }
}

pub fn regulation_text(regulation_name: &str) -> String {
    match regulation_name {
        "GDPR" => "General Data Protection Regulation (GDPR) is a privacy law in the EU...".to_string(),
        "CCPA" => "California Consumer Privacy Act (CCPA) gives consumers rights over their personal information...".to_string(),
        "AI_ACT" => "EU Artificial Intelligence Act regulates AI systems based on risk levels...".to_string(),
        other => format!("Regulation: {}", other),
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RegulationInfo {
    pub name: &'static str,
    pub region: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enforced_since: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<&'static str>,
    pub max_fine: &'static str,
    pub key_requirements: Vec<&'static str>,
}

/// Public catalogue served by `GET /regulations`.
pub fn regulation_catalog() -> BTreeMap<&'static str, RegulationInfo> {
    let mut catalog = BTreeMap::new();
    catalog.insert(
        "GDPR",
        RegulationInfo {
            name: "General Data Protection Regulation",
            region: "European Union",
            enforced_since: Some("2018"),
            status: None,
            max_fine: "4% of global revenue or €20M",
            key_requirements: vec![
                "Data minimization",
                "Purpose limitation",
                "Right to erasure",
                "Data protection by design",
            ],
        },
    );
    catalog.insert(
        "CCPA",
        RegulationInfo {
            name: "California Consumer Privacy Act",
            region: "California, USA",
            enforced_since: Some("2020"),
            status: None,
            max_fine: "$7,500 per intentional violation",
            key_requirements: vec![
                "Right to know",
                "Right to delete",
                "Right to opt-out",
                "Non-discrimination",
            ],
        },
    );
    catalog.insert(
        "AI_ACT",
        RegulationInfo {
            name: "EU Artificial Intelligence Act",
            region: "European Union",
            enforced_since: None,
            status: Some("Upcoming"),
            max_fine: "6% of global revenue",
            key_requirements: vec![
                "Risk-based classification",
                "Prohibited AI practices",
                "High-risk AI requirements",
                "Transparency obligations",
            ],
        },
    );
    catalog
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_known_regulations() {
        for name in ["GDPR", "CCPA", "AI_ACT"] {
            let regulation = fallback_regulation(name).unwrap();
            assert_eq!(regulation.regulation_name, name);
            assert_eq!(regulation.key_requirements.len(), 3);
        }
        assert_eq!(fallback_regulation("AI_ACT").unwrap().penalties.max_fine_percentage, 0.06);
        assert!(fallback_regulation("HIPAA").is_none());
    }

    #[test]
    fn test_default_regulation_is_empty() {
        let regulation = default_regulation("PIPEDA");
        assert_eq!(regulation.regulation_name, "PIPEDA");
        assert!(regulation.key_requirements.is_empty());
        assert_eq!(regulation.penalties.description, "Standard fine");
    }

    #[test]
    fn test_regulation_text_for_unknown_name() {
        assert_eq!(regulation_text("DMA"), "Regulation: DMA");
        assert!(regulation_text("GDPR").starts_with("General Data Protection"));
    }

    #[test]
    fn test_catalog_shape() {
        let catalog = regulation_catalog();
        let json = serde_json::to_value(&catalog).unwrap();
        assert_eq!(json["AI_ACT"]["status"], "Upcoming");
        assert!(json["AI_ACT"].get("enforced_since").is_none());
        assert_eq!(json["GDPR"]["enforced_since"], "2018");
    }
}
