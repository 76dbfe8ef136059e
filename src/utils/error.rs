use thiserror::Error;

#[derive(Error, Debug)]
pub enum HealthCheckError {
    #[error("Root path unreachable: {root} ({reason})")]
    CatastrophicIo { root: String, reason: String },

    #[error("{path} missing")]
    MissingArtifact { path: String },

    #[error("Malformed configuration key '{key}': {reason}")]
    MalformedConfig { key: String, reason: String },

    #[error("Artifact {path} is not valid UTF-8 text: {reason}")]
    UndecodableArtifact { path: String, reason: String },

    #[error("Check {check_id} could not be evaluated: {message}")]
    PredicateFault { check_id: String, message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration field: {field}")]
    MissingConfigError { field: String },
}

pub type Result<T> = std::result::Result<T, HealthCheckError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Inventory,
    Evaluation,
    Configuration,
    Output,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl HealthCheckError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            HealthCheckError::CatastrophicIo { .. }
            | HealthCheckError::MissingArtifact { .. }
            | HealthCheckError::IoError(_) => ErrorCategory::Inventory,
            HealthCheckError::PredicateFault { .. }
            | HealthCheckError::UndecodableArtifact { .. } => ErrorCategory::Evaluation,
            HealthCheckError::MalformedConfig { .. }
            | HealthCheckError::ConfigValidationError { .. }
            | HealthCheckError::InvalidConfigValueError { .. }
            | HealthCheckError::MissingConfigError { .. } => ErrorCategory::Configuration,
            HealthCheckError::SerializationError(_) => ErrorCategory::Output,
        }
    }

    /// Absorbed errors (missing artifacts, malformed keys, predicate faults)
    /// rank low: they end up in a check detail instead of stopping the run.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            HealthCheckError::MissingArtifact { .. }
            | HealthCheckError::MalformedConfig { .. }
            | HealthCheckError::PredicateFault { .. }
            | HealthCheckError::UndecodableArtifact { .. } => ErrorSeverity::Low,
            HealthCheckError::ConfigValidationError { .. }
            | HealthCheckError::InvalidConfigValueError { .. }
            | HealthCheckError::MissingConfigError { .. } => ErrorSeverity::High,
            HealthCheckError::SerializationError(_) | HealthCheckError::IoError(_) => {
                ErrorSeverity::High
            }
            HealthCheckError::CatastrophicIo { .. } => ErrorSeverity::Critical,
        }
    }

    /// Process exit status for an error that stopped the run: 1 for
    /// configuration problems, 3 for everything else.
    pub fn exit_code(&self) -> i32 {
        match self.category() {
            ErrorCategory::Configuration => 1,
            _ => 3,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            HealthCheckError::CatastrophicIo { root, .. } => {
                format!("Check that '{}' exists and is a readable directory", root)
            }
            HealthCheckError::MissingArtifact { path } => {
                format!("Create '{}' or remove it from the expected layout", path)
            }
            HealthCheckError::MalformedConfig { key, .. } => {
                format!("Fix the value of '{}' in workflow.toml", key)
            }
            HealthCheckError::PredicateFault { .. } | HealthCheckError::UndecodableArtifact { .. } => {
                "Make sure the inspected definitions are valid UTF-8 text".to_string()
            }
            HealthCheckError::IoError(_) => {
                "Check file permissions on the root and output directories".to_string()
            }
            HealthCheckError::SerializationError(_) => {
                "Re-run with --verbose and report the failing output format".to_string()
            }
            HealthCheckError::ConfigValidationError { field, .. }
            | HealthCheckError::InvalidConfigValueError { field, .. }
            | HealthCheckError::MissingConfigError { field } => {
                format!("Correct '{}' on the command line or in the config file", field)
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            HealthCheckError::CatastrophicIo { root, .. } => {
                format!("Cannot inspect '{}': the directory is not reachable", root)
            }
            HealthCheckError::ConfigValidationError { .. }
            | HealthCheckError::InvalidConfigValueError { .. }
            | HealthCheckError::MissingConfigError { .. } => {
                format!("Invalid configuration: {}", self)
            }
            other => other.to_string(),
        }
    }
}
