use thiserror::Error;

#[derive(Error, Debug)]
pub enum ComplianceError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value for {field}: {value} ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Model response error: {message}")]
    ModelResponseError { message: String },

    #[error("Generative model unavailable: {message}")]
    ModelUnavailableError { message: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Not found: {message}")]
    NotFoundError { message: String },

    #[error("Processing error: {message}")]
    ProcessingError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Storage,
    Data,
    Configuration,
    Model,
    Input,
    Internal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ComplianceError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ApiError(_) => ErrorCategory::Network,
            Self::IoError(_) => ErrorCategory::Storage,
            Self::SerializationError(_) => ErrorCategory::Data,
            Self::ConfigError { .. }
            | Self::MissingConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::ConfigValidationError { .. } => ErrorCategory::Configuration,
            Self::ModelResponseError { .. } | Self::ModelUnavailableError { .. } => {
                ErrorCategory::Model
            }
            Self::ValidationError { .. } | Self::NotFoundError { .. } => ErrorCategory::Input,
            Self::ProcessingError { .. } => ErrorCategory::Internal,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NotFoundError { .. } => ErrorSeverity::Low,
            Self::ApiError(_) | Self::ModelResponseError { .. } => ErrorSeverity::Medium,
            Self::SerializationError(_)
            | Self::ValidationError { .. }
            | Self::ModelUnavailableError { .. }
            | Self::ProcessingError { .. } => ErrorSeverity::High,
            Self::IoError(_)
            | Self::ConfigError { .. }
            | Self::MissingConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::ConfigValidationError { .. } => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => "Check network connectivity and the Gemini endpoint, then retry",
            ErrorCategory::Storage => "Check that the data directories exist and are writable",
            ErrorCategory::Data => "Check that the input file is valid JSON with the expected fields",
            ErrorCategory::Configuration => "Review environment variables, .env or the TOML config file",
            ErrorCategory::Model => "Verify GEMINI_API_KEY and GEMINI_MODEL, or unset the key to run in mock mode",
            ErrorCategory::Input => "Correct the request payload and try again",
            ErrorCategory::Internal => "Retry the analysis; if it persists, run with --verbose and inspect the logs",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::ApiError(_) => "Could not reach the generative model service".to_string(),
            Self::IoError(e) => format!("File system operation failed: {}", e),
            Self::SerializationError(e) => format!("Invalid JSON data: {}", e),
            Self::MissingConfigError { field } => {
                format!("Required setting '{}' is missing", field)
            }
            Self::InvalidConfigValueError { field, reason, .. } => {
                format!("Setting '{}' is invalid: {}", field, reason)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ComplianceError>;
