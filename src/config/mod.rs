#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::adapters::gemini::{GeminiClient, GeminiConfig};
use crate::domain::ports::GenerativeModel;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

/// Key shipped in `.env.example`; treated the same as no key.
pub const PLACEHOLDER_API_KEY: &str = "your_gemini_api_key_here";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub gemini: GeminiSettings,
    pub storage: StorageSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub dashboard_port: u16,
    pub api_url: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            dashboard_port: 8501,
            api_url: "http://localhost:8000".to_string(),
        }
    }
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeminiSettings {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for GeminiSettings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: "gemini-1.5-pro".to_string(),
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            timeout_secs: 60,
        }
    }
}

// Keep the key out of `--verbose` config dumps.
impl std::fmt::Debug for GeminiSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiSettings")
            .field("api_key", &if self.api_key.is_empty() { "<unset>" } else { "<redacted>" })
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    pub regulations_dir: String,
    pub audit_log_dir: String,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            regulations_dir: "data/regulations".to_string(),
            audit_log_dir: "data/logs".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub level: String,
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "compact".to_string(),
        }
    }
}

impl GeminiSettings {
    /// An unresolved `${VAR}` from the TOML file counts as no key.
    pub fn is_configured(&self) -> bool {
        let key = self.api_key.trim();
        let unresolved = key.starts_with("${") && key.ends_with('}');
        !key.is_empty() && key != PLACEHOLDER_API_KEY && !unresolved
    }

    pub fn client_config(&self) -> GeminiConfig {
        GeminiConfig {
            api_key: self.api_key.trim().to_string(),
            model: self.model.clone(),
            base_url: self.base_url.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }
}

impl Settings {
    /// Without a usable Gemini key every stage runs its deterministic fallback.
    pub fn is_mock_mode(&self) -> bool {
        !self.gemini.is_configured()
    }

    /// The configured Gemini client, or `None` in mock mode.
    pub fn generative_model(&self) -> Result<Option<Arc<dyn GenerativeModel>>> {
        if self.is_mock_mode() {
            tracing::warn!("⚠️  Gemini API key not configured. Using mock mode.");
            return Ok(None);
        }
        tracing::info!("Using Gemini model {}", self.gemini.model);
        Ok(Some(Arc::new(GeminiClient::new(self.gemini.client_config())?)))
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validation::validate_non_empty_string("server.host", &self.server.host)?;
        validation::validate_positive_number("server.port", self.server.port as u64, 1)?;
        validation::validate_positive_number("server.dashboard_port", self.server.dashboard_port as u64, 1)?;
        validation::validate_url("server.api_url", &self.server.api_url)?;

        validation::validate_non_empty_string("gemini.model", &self.gemini.model)?;
        validation::validate_url("gemini.base_url", &self.gemini.base_url)?;
        validation::validate_positive_number("gemini.timeout_secs", self.gemini.timeout_secs, 1)?;

        validation::validate_path("storage.regulations_dir", &self.storage.regulations_dir)?;
        validation::validate_path("storage.audit_log_dir", &self.storage.audit_log_dir)?;

        validation::validate_one_of(
            "logging.level",
            &self.logging.level,
            &["trace", "debug", "info", "warn", "error"],
        )?;
        validation::validate_one_of("logging.format", &self.logging.format, &["compact", "json"])?;

        Ok(())
    }
}
