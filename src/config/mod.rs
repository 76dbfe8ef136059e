pub mod toml_config;

use crate::domain::ports::ConfigProvider;
use crate::report::ReportFormat;
use crate::utils::error::Result;
use crate::utils::validation::{
    parse_timestamp, validate_non_empty, validate_path, validate_positive_number, validate_range,
    Validate,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
use clap::Parser;

pub use toml_config::TomlConfig;

pub const DEFAULT_MAX_CONCURRENCY: usize = 4;
pub const DEFAULT_READ_TIMEOUT_MS: u64 = 2000;
pub const MAX_READ_TIMEOUT_MS: u64 = 60_000;

/// Fully resolved settings for one validation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    pub root: String,
    pub output_path: Option<String>,
    pub formats: Vec<ReportFormat>,
    pub parallel: bool,
    pub max_concurrency: usize,
    pub read_timeout_ms: u64,
    pub timestamp: Option<DateTime<Utc>>,
    pub verbose: bool,
    pub json_logs: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            root: ".".to_string(),
            output_path: None,
            formats: vec![ReportFormat::Markdown],
            parallel: true,
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            read_timeout_ms: DEFAULT_READ_TIMEOUT_MS,
            timestamp: None,
            verbose: false,
            json_logs: false,
        }
    }
}

impl RunConfig {
    pub fn new(root: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            ..Default::default()
        }
    }

    pub fn with_formats(mut self, formats: Vec<ReportFormat>) -> Self {
        self.formats = dedup_formats(formats);
        self
    }

    pub fn with_output(mut self, output_path: impl Into<String>) -> Self {
        self.output_path = Some(output_path.into());
        self
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }
}

impl ConfigProvider for RunConfig {
    fn root(&self) -> &str {
        &self.root
    }

    fn output_path(&self) -> Option<&str> {
        self.output_path.as_deref()
    }

    fn formats(&self) -> &[ReportFormat] {
        &self.formats
    }

    fn parallel(&self) -> bool {
        self.parallel
    }

    fn max_concurrency(&self) -> usize {
        self.max_concurrency
    }

    fn read_timeout_ms(&self) -> u64 {
        self.read_timeout_ms
    }

    fn timestamp(&self) -> Option<DateTime<Utc>> {
        self.timestamp
    }
}

impl Validate for RunConfig {
    fn validate(&self) -> Result<()> {
        validate_path("root", &self.root)?;
        if let Some(output) = &self.output_path {
            validate_path("output", output)?;
        }
        validate_non_empty("formats", &self.formats)?;
        validate_positive_number("max_concurrency", self.max_concurrency, 1)?;
        validate_range("read_timeout_ms", self.read_timeout_ms, 1, MAX_READ_TIMEOUT_MS)?;
        Ok(())
    }
}

/// Keeps the first occurrence of each format.
pub fn dedup_formats(formats: Vec<ReportFormat>) -> Vec<ReportFormat> {
    let mut unique = Vec::with_capacity(formats.len());
    for format in formats {
        if !unique.contains(&format) {
            unique.push(format);
        }
    }
    unique
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "hubcheck")]
#[command(about = "Structural health check for hub-and-spoke workflow definitions")]
pub struct CliConfig {
    /// Root of the workflow definition tree
    pub root: Option<String>,

    /// Load run settings from a TOML file; command-line flags override it
    #[arg(short, long)]
    pub config: Option<String>,

    /// Report formats to produce
    #[arg(long, value_enum, value_delimiter = ',')]
    pub format: Vec<ReportFormat>,

    /// Directory to write reports to instead of stdout
    #[arg(short, long)]
    pub output: Option<String>,

    /// Evaluate checks one after another on the current thread
    #[arg(long)]
    pub sequential: bool,

    /// Maximum number of checks evaluated at once
    #[arg(long)]
    pub concurrency: Option<usize>,

    /// Per-artifact read timeout in milliseconds
    #[arg(long)]
    pub read_timeout_ms: Option<u64>,

    /// Pin the report timestamp (RFC 3339) for reproducible output
    #[arg(long)]
    pub timestamp: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    /// Emit logs as JSON
    #[arg(long)]
    pub json_logs: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// Merges the optional config file with command-line overrides.
    pub fn resolve(&self) -> Result<RunConfig> {
        let mut config = match &self.config {
            Some(path) => TomlConfig::from_file(path)?.to_run_config()?,
            None => RunConfig::default(),
        };

        if let Some(root) = &self.root {
            config.root = root.clone();
        }
        if !self.format.is_empty() {
            config.formats = dedup_formats(self.format.clone());
        }
        if let Some(output) = &self.output {
            config.output_path = Some(output.clone());
        }
        if self.sequential {
            config.parallel = false;
        }
        if let Some(concurrency) = self.concurrency {
            config.max_concurrency = concurrency;
        }
        if let Some(timeout) = self.read_timeout_ms {
            config.read_timeout_ms = timeout;
        }
        if let Some(timestamp) = &self.timestamp {
            config.timestamp = Some(parse_timestamp("timestamp", timestamp)?);
        }
        config.verbose |= self.verbose;
        config.json_logs |= self.json_logs;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(RunConfig::default().validate().is_ok());
    }

    #[test]
    fn test_invalid_values_rejected() {
        let mut config = RunConfig::new("./workflows");
        config.max_concurrency = 0;
        assert!(config.validate().is_err());

        let mut config = RunConfig::new("./workflows");
        config.read_timeout_ms = 0;
        assert!(config.validate().is_err());

        let config = RunConfig::new("./workflows").with_formats(vec![]);
        assert!(config.validate().is_err());

        assert!(RunConfig::new("").validate().is_err());
    }

    #[test]
    fn test_dedup_formats_keeps_order() {
        let formats = dedup_formats(vec![
            ReportFormat::Json,
            ReportFormat::Markdown,
            ReportFormat::Json,
        ]);
        assert_eq!(formats, vec![ReportFormat::Json, ReportFormat::Markdown]);
    }

    #[cfg(feature = "cli")]
    #[test]
    fn test_cli_overrides() {
        let cli = CliConfig::parse_from([
            "hubcheck",
            "./defs",
            "--format",
            "markdown,json",
            "--sequential",
            "--concurrency",
            "8",
            "--timestamp",
            "2024-05-01T12:00:00Z",
        ]);
        let config = cli.resolve().unwrap();

        assert_eq!(config.root, "./defs");
        assert_eq!(config.formats, vec![ReportFormat::Markdown, ReportFormat::Json]);
        assert!(!config.parallel);
        assert_eq!(config.max_concurrency, 8);
        assert_eq!(
            config.timestamp.map(crate::core::scorer::format_timestamp),
            Some("2024-05-01T12:00:00Z".to_string())
        );
    }

    #[cfg(feature = "cli")]
    #[test]
    fn test_cli_rejects_bad_timestamp() {
        let cli = CliConfig::parse_from(["hubcheck", "--timestamp", "noon"]);
        assert!(cli.resolve().is_err());
    }
}
