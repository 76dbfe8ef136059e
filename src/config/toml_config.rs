use crate::config::{dedup_formats, RunConfig, MAX_READ_TIMEOUT_MS};
use crate::report::ReportFormat;
use crate::utils::error::{HealthCheckError, Result};
use crate::utils::validation::{
    parse_timestamp, validate_non_empty, validate_path, validate_positive_number, validate_range,
    Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Run settings loaded from a TOML file.
///
/// ```toml
/// [run]
/// root = "${WORKFLOW_ROOT}"
/// parallel = true
/// max_concurrency = 8
///
/// [output]
/// path = "./reports"
/// formats = ["markdown", "json"]
///
/// [logging]
/// verbose = false
/// json = true
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub run: RunSection,
    pub output: Option<OutputSection>,
    pub logging: Option<LoggingSection>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSection {
    pub root: String,
    pub parallel: Option<bool>,
    pub max_concurrency: Option<usize>,
    pub read_timeout_ms: Option<u64>,
    pub timestamp: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputSection {
    pub path: Option<String>,
    pub formats: Option<Vec<ReportFormat>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSection {
    pub verbose: Option<bool>,
    pub json: Option<bool>,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(HealthCheckError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| HealthCheckError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown names are left as is.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| HealthCheckError::ConfigValidationError {
            field: "environment".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn formats(&self) -> Vec<ReportFormat> {
        self.output
            .as_ref()
            .and_then(|o| o.formats.clone())
            .map(dedup_formats)
            .unwrap_or_else(|| vec![ReportFormat::Markdown])
    }

    pub fn output_path(&self) -> Option<&str> {
        self.output.as_ref().and_then(|o| o.path.as_deref())
    }

    pub fn to_run_config(&self) -> Result<RunConfig> {
        self.validate()?;

        let defaults = RunConfig::default();
        let logging = self.logging.as_ref();
        let timestamp = match &self.run.timestamp {
            Some(value) => Some(parse_timestamp("run.timestamp", value)?),
            None => None,
        };

        Ok(RunConfig {
            root: self.run.root.clone(),
            output_path: self.output_path().map(str::to_string),
            formats: self.formats(),
            parallel: self.run.parallel.unwrap_or(defaults.parallel),
            max_concurrency: self.run.max_concurrency.unwrap_or(defaults.max_concurrency),
            read_timeout_ms: self.run.read_timeout_ms.unwrap_or(defaults.read_timeout_ms),
            timestamp,
            verbose: logging.and_then(|l| l.verbose).unwrap_or(false),
            json_logs: logging.and_then(|l| l.json).unwrap_or(false),
        })
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validate_path("run.root", &self.run.root)?;

        if let Some(concurrency) = self.run.max_concurrency {
            validate_positive_number("run.max_concurrency", concurrency, 1)?;
        }
        if let Some(timeout) = self.run.read_timeout_ms {
            validate_range("run.read_timeout_ms", timeout, 1, MAX_READ_TIMEOUT_MS)?;
        }
        if let Some(path) = self.output_path() {
            validate_path("output.path", path)?;
        }
        if let Some(formats) = self.output.as_ref().and_then(|o| o.formats.as_ref()) {
            validate_non_empty("output.formats", formats)?;
        }

        Ok(())
    }
}
