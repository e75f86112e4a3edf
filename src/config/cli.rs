use crate::config::{GeminiSettings, LoggingSettings, ServerSettings, Settings, StorageSettings};
use crate::utils::error::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "compliance-monitor", version)]
#[command(about = "AI-powered regulatory compliance monitoring service")]
pub struct Cli {
    #[command(flatten)]
    pub options: GlobalOptions,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Run the REST API server
    Serve,
    /// Run the web dashboard
    Dashboard,
    /// Analyze one company description and print the audit report
    Analyze(AnalyzeArgs),
    /// Print the regulation catalogue
    Regulations,
    /// Validate configuration and report whether Gemini or mock mode is active
    CheckConfig,
}

#[derive(Debug, Clone, Args)]
pub struct AnalyzeArgs {
    /// JSON file with the company description
    #[arg(long, short)]
    pub input: PathBuf,

    #[arg(long, short, value_delimiter = ',', default_value = "GDPR,CCPA")]
    pub regulations: Vec<String>,

    /// Write the audit report here instead of stdout
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Clone, Args)]
pub struct GlobalOptions {
    /// TOML settings file; replaces the options below when given
    #[arg(long, global = true, env = "COMPLIANCE_CONFIG")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, env = "GEMINI_API_KEY", default_value = "", hide_env_values = true)]
    pub gemini_api_key: String,

    #[arg(long, global = true, env = "GEMINI_MODEL", default_value = "gemini-1.5-pro")]
    pub gemini_model: String,

    #[arg(long, global = true, env = "GEMINI_BASE_URL", default_value = "https://generativelanguage.googleapis.com")]
    pub gemini_base_url: String,

    #[arg(long, global = true, env = "GEMINI_TIMEOUT_SECS", default_value = "60")]
    pub gemini_timeout_secs: u64,

    #[arg(long, global = true, env = "API_HOST", default_value = "0.0.0.0")]
    pub api_host: String,

    #[arg(long, global = true, env = "API_PORT", default_value = "8000")]
    pub api_port: u16,

    #[arg(long, global = true, env = "DASHBOARD_PORT", default_value = "8501")]
    pub dashboard_port: u16,

    /// API base URL the dashboard talks to
    #[arg(long, global = true, env = "API_URL", default_value = "http://localhost:8000")]
    pub api_url: String,

    #[arg(long, global = true, env = "REGULATIONS_DIR", default_value = "data/regulations")]
    pub regulations_dir: String,

    #[arg(long, global = true, env = "AUDIT_LOG_DIR", default_value = "data/logs")]
    pub audit_log_dir: String,

    #[arg(long, global = true, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    #[arg(long, global = true, env = "LOG_FORMAT", default_value = "compact")]
    pub log_format: String,

    #[arg(long, short, global = true, help = "Enable verbose output")]
    pub verbose: bool,
}

impl GlobalOptions {
    pub fn settings(&self) -> Result<Settings> {
        if let Some(path) = &self.config {
            return Settings::from_file(path);
        }

        Ok(Settings {
            server: ServerSettings {
                host: self.api_host.clone(),
                port: self.api_port,
                dashboard_port: self.dashboard_port,
                api_url: self.api_url.clone(),
            },
            gemini: GeminiSettings {
                api_key: self.gemini_api_key.clone(),
                model: self.gemini_model.clone(),
                base_url: self.gemini_base_url.clone(),
                timeout_secs: self.gemini_timeout_secs,
            },
            storage: StorageSettings {
                regulations_dir: self.regulations_dir.clone(),
                audit_log_dir: self.audit_log_dir.clone(),
            },
            logging: LoggingSettings {
                level: self.log_level.clone(),
                format: self.log_format.clone(),
            },
        })
    }
}
