//! Role-prompted agents sharing one generative model.

use crate::domain::model::ChatMessage;
use crate::domain::ports::GenerativeModel;
use crate::utils::error::{ComplianceError, Result};
use crate::utils::json::{extract_json_object, truncate_chars};
use serde_json::{json, Value};
use std::sync::Arc;

const RAW_EXCERPT_CHARS: usize = 500;

#[derive(Debug, Clone)]
pub struct ComplianceAgent {
    pub name: &'static str,
    pub role: &'static str,
    pub goal: &'static str,
}

impl ComplianceAgent {
    fn prompt(&self, context: &str, task: &str) -> String {
        format!(
            "\nRole: {}\nGoal: {}\n\nContext: {}\n\nTask: {}\n\nProvide a detailed response focused on your role.\n",
            self.role, self.goal, context, task
        )
    }

    pub async fn run(&self, model: &dyn GenerativeModel, context: &str, task: &str) -> Result<String> {
        tracing::debug!("Agent {} running task ({} chars of context)", self.name, context.len());
        model.generate(&self.prompt(context, task)).await
    }
}

pub const RESEARCHER: ComplianceAgent = ComplianceAgent {
    name: "Researcher",
    role: "Technical Compliance Researcher",
    goal: "Extract critical requirements from complex legal and technical documents.",
};

pub const AUDITOR: ComplianceAgent = ComplianceAgent {
    name: "Auditor",
    role: "System Integrity Auditor",
    goal: "Detect gaps between company data and regulatory requirements.",
};

pub const ADVISOR: ComplianceAgent = ComplianceAgent {
    name: "Advisor",
    role: "Strategic Compliance Advisor",
    goal: "Generate actionable remediation plans and business risk summaries.",
};

pub struct MultiAgentSystem {
    model: Arc<dyn GenerativeModel>,
    agents: [ComplianceAgent; 3],
}

impl MultiAgentSystem {
    pub fn new(model: Arc<dyn GenerativeModel>) -> Self {
        Self {
            model,
            agents: [RESEARCHER, AUDITOR, ADVISOR],
        }
    }

    pub fn agent(&self, name: &str) -> Option<&ComplianceAgent> {
        self.agents
            .iter()
            .find(|agent| agent.name.eq_ignore_ascii_case(name))
    }

    pub fn agent_names(&self) -> Vec<&'static str> {
        self.agents.iter().map(|a| a.name).collect()
    }

    /// Free-form consultant chat.
    pub async fn get_consultation(&self, query: &str, history: &[ChatMessage]) -> Result<String> {
        self.model.chat(history, query).await
    }

    pub async fn run_agent(&self, name: &str, context: &str, task: &str) -> Result<String> {
        let agent = self.agent(name).ok_or_else(|| ComplianceError::NotFoundError {
            message: format!("agent '{}' (available: {})", name, self.agent_names().join(", ")),
        })?;
        agent.run(self.model.as_ref(), context, task).await
    }

    /// Structured summary of a raw regulation document.
    ///
    /// Always yields JSON: either the object the researcher produced or an
    /// `{"error", "raw"}` pair carrying the start of the reply.
    pub async fn process_document(&self, text: &str) -> Result<Value> {
        let task = "Analyze this document and extract the top 5 mandatory compliance requirements as a JSON object.";
        let reply = RESEARCHER.run(self.model.as_ref(), text, task).await?;
        let raw = truncate_chars(&reply, RAW_EXCERPT_CHARS);

        let Some(object) = extract_json_object(&reply) else {
            return Ok(json!({ "error": "Could not structure data", "raw": raw }));
        };

        match serde_json::from_str::<Value>(object) {
            Ok(value) => Ok(value),
            Err(e) => {
                tracing::warn!("Researcher reply was not valid JSON: {}", e);
                Ok(json!({ "error": "Parsing error", "raw": raw }))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::ChatRole;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct RecordingModel {
        reply: String,
        prompts: Mutex<Vec<String>>,
    }

    impl RecordingModel {
        fn new(reply: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: reply.to_string(),
                prompts: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl GenerativeModel for RecordingModel {
        async fn generate(&self, prompt: &str) -> Result<String> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            Ok(self.reply.clone())
        }

        async fn chat(&self, history: &[ChatMessage], message: &str) -> Result<String> {
            Ok(format!("{} turns then: {}", history.len(), message))
        }
    }

    #[tokio::test]
    async fn test_process_document_extracts_embedded_json() {
        let model = RecordingModel::new("Sure! {\"requirements\": [\"Consent\", \"Erasure\"]} Hope this helps.");
        let system = MultiAgentSystem::new(model.clone());

        let value = system.process_document("Article 17...").await.unwrap();
        assert_eq!(value["requirements"][1], "Erasure");

        let prompts = model.prompts.lock().unwrap();
        assert!(prompts[0].contains("Role: Technical Compliance Researcher"));
        assert!(prompts[0].contains("Context: Article 17..."));
    }

    #[tokio::test]
    async fn test_process_document_without_json() {
        let system = MultiAgentSystem::new(RecordingModel::new("No structure here"));
        let value = system.process_document("text").await.unwrap();
        assert_eq!(value["error"], "Could not structure data");
        assert_eq!(value["raw"], "No structure here");
    }

    #[tokio::test]
    async fn test_process_document_with_broken_json() {
        let reply = format!("{{ not json {} }}", "y".repeat(600));
        let system = MultiAgentSystem::new(RecordingModel::new(&reply));
        let value = system.process_document("text").await.unwrap();
        assert_eq!(value["error"], "Parsing error");
        assert_eq!(value["raw"].as_str().unwrap().chars().count(), 500);
    }

    #[tokio::test]
    async fn test_run_agent_by_name() {
        let model = RecordingModel::new("plan");
        let system = MultiAgentSystem::new(model.clone());

        assert_eq!(system.run_agent("advisor", "ctx", "summarize").await.unwrap(), "plan");
        assert!(model.prompts.lock().unwrap()[0].contains("Strategic Compliance Advisor"));

        let err = system.run_agent("lawyer", "ctx", "task").await.unwrap_err();
        assert!(matches!(err, ComplianceError::NotFoundError { .. }));
    }

    #[tokio::test]
    async fn test_consultation_passes_history() {
        let system = MultiAgentSystem::new(RecordingModel::new(""));
        let history = vec![
            ChatMessage { role: ChatRole::User, content: "Hi".to_string() },
            ChatMessage { role: ChatRole::Model, content: "Hello".to_string() },
        ];
        let answer = system.get_consultation("Is GDPR relevant?", &history).await.unwrap();
        assert_eq!(answer, "2 turns then: Is GDPR relevant?");
    }
}
