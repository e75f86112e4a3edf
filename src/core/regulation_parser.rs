use crate::core::catalog;
use crate::domain::model::Regulation;
use crate::domain::ports::GenerativeModel;
use crate::utils::error::Result;
use crate::utils::json::{strip_code_fence, truncate_chars};
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Characters of regulation text forwarded to the model.
const PROMPT_TEXT_LIMIT: usize = 1000;

/// Resolves regulation identifiers into structured requirements.
///
/// Resolution order per name: in-memory cache, `<dir>/<name>.json`, the
/// generative model, the built-in catalogue, and finally an empty default.
pub struct RegulationParser {
    model: Option<Arc<dyn GenerativeModel>>,
    regulations_dir: Option<PathBuf>,
    cache: RwLock<HashMap<String, Regulation>>,
}

impl RegulationParser {
    pub fn new(model: Option<Arc<dyn GenerativeModel>>) -> Self {
        Self {
            model,
            regulations_dir: None,
            cache: RwLock::new(HashMap::new()),
        }
    }

    pub fn with_regulations_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.regulations_dir = Some(dir.into());
        self
    }

    pub async fn parse_regulation_from_text(
        &self,
        regulation_text: &str,
        regulation_name: &str,
    ) -> Regulation {
        match &self.model {
            Some(model) => {
                match self
                    .parse_with_model(model.as_ref(), regulation_text, regulation_name)
                    .await
                {
                    Ok(regulation) => regulation,
                    Err(e) => {
                        tracing::error!("Model regulation parsing failed for {}: {}", regulation_name, e);
                        Self::parse_with_fallback(regulation_name)
                    }
                }
            }
            None => Self::parse_with_fallback(regulation_name),
        }
    }

    async fn parse_with_model(
        &self,
        model: &dyn GenerativeModel,
        regulation_text: &str,
        regulation_name: &str,
    ) -> Result<Regulation> {
        let prompt = Self::build_prompt(regulation_text, regulation_name);
        tracing::debug!("Regulation prompt for {} ({} chars)", regulation_name, prompt.len());

        let response = model.generate(&prompt).await?;
        let regulation: Regulation = serde_json::from_str(strip_code_fence(&response))?;
        Ok(regulation)
    }

    fn build_prompt(regulation_text: &str, regulation_name: &str) -> String {
        format!(
            r#"
Analyze this {name} regulation and extract key compliance requirements.
Return ONLY valid JSON with this exact structure:
{{
    "regulation_name": "{name}",
    "key_requirements": [
        {{
            "id": "req_1",
            "requirement": "specific requirement text",
            "category": "data_protection|user_consent|transparency|security|audit",
            "severity": "critical|high|medium|low"
        }}
    ],
    "applicable_systems": ["data_collection", "data_storage", "ai_models", "user_interface"],
    "penalties": {{
        "max_fine_percentage": 0.06,
        "description": "fine description"
    }}
}}

Regulation: {text}...
"#,
            name = regulation_name,
            text = truncate_chars(regulation_text, PROMPT_TEXT_LIMIT),
        )
    }

    fn parse_with_fallback(regulation_name: &str) -> Regulation {
        catalog::fallback_regulation(regulation_name)
            .unwrap_or_else(|| catalog::default_regulation(regulation_name))
    }

    pub async fn parse_regulations(&self, regulation_names: &[String]) -> BTreeMap<String, Regulation> {
        let mut regulations = BTreeMap::new();

        for name in regulation_names {
            if let Some(cached) = self.cache.read().await.get(name) {
                regulations.insert(name.clone(), cached.clone());
                continue;
            }

            if let Some(dir) = &self.regulations_dir {
                if let Some(from_file) = Self::load_from_file(dir, name).await {
                    tracing::debug!("Loaded {} from {}", name, dir.display());
                    self.cache.write().await.insert(name.clone(), from_file.clone());
                    regulations.insert(name.clone(), from_file);
                    continue;
                }
            }

            let text = catalog::regulation_text(name);
            let parsed = self.parse_regulation_from_text(&text, name).await;

            self.cache.write().await.insert(name.clone(), parsed.clone());
            regulations.insert(name.clone(), parsed);
        }

        regulations
    }

    async fn load_from_file(dir: &Path, regulation_name: &str) -> Option<Regulation> {
        let path = dir.join(format!("{}.json", regulation_name.to_lowercase()));
        let content = tokio::fs::read(&path).await.ok()?;

        match serde_json::from_slice::<Regulation>(&content) {
            Ok(regulation) => Some(regulation),
            Err(e) => {
                tracing::warn!("Could not load regulation from {}: {}", path.display(), e);
                None
            }
        }
    }

    pub async fn cached_count(&self) -> usize {
        self.cache.read().await.len()
    }
}
