//! Report rendering.
//!
//! Two renderers consume the same [`Report`] value: a Markdown document for
//! people and a JSON record for machines. Both list the same aligned and
//! misaligned checks; nothing appears in one and not the other.

pub mod json;
pub mod markdown;

use crate::domain::model::{Report, Status};
use crate::utils::error::Result;
use serde::{Deserialize, Serialize};
use std::fmt;

pub use json::JsonRenderer;
pub use markdown::MarkdownRenderer;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    Markdown,
    Json,
}

impl ReportFormat {
    pub fn file_name(&self) -> &'static str {
        match self {
            ReportFormat::Markdown => "alignment-report.md",
            ReportFormat::Json => "alignment-report.json",
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportFormat::Markdown => write!(f, "markdown"),
            ReportFormat::Json => write!(f, "json"),
        }
    }
}

/// One rendering of a report, with the path it was written to (if any).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedReport {
    pub format: ReportFormat,
    pub content: String,
    pub path: Option<String>,
}

pub trait ReportRenderer {
    fn render(&self, report: &Report) -> Result<String>;
}

pub fn get_renderer(format: ReportFormat) -> Box<dyn ReportRenderer + Send + Sync> {
    match format {
        ReportFormat::Markdown => Box::new(MarkdownRenderer),
        ReportFormat::Json => Box::new(JsonRenderer::new(true)),
    }
}

/// Guidance shown after the action items, keyed by status tier.
pub fn next_steps(status: Status) -> &'static [&'static str] {
    match status {
        Status::Excellent => &[
            "Keep the coordinator as the only delegator when adding specialists",
            "Re-run validation in CI to catch regressions early",
        ],
        Status::Good => &[
            "Resolve the high priority recommendations first",
            "Re-run validation and aim for a score of 80 or more",
        ],
        Status::NeedsWork => &[
            "Restore the missing definitions and configuration before anything else",
            "Remove peer-to-peer delegation so every hand-off goes through the coordinator",
            "Work through the action items in order and re-run validation after each batch",
        ],
    }
}

/// Check id at the front of an `ID: description` label.
pub fn check_id(label: &str) -> &str {
    label.split_once(':').map(|(id, _)| id).unwrap_or(label)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{MisalignedArea, Recommendations};
    use std::collections::BTreeSet;

    fn sample_report() -> Report {
        Report {
            timestamp: "2024-05-01T12:00:00Z".to_string(),
            alignment_score: 66,
            status: Status::Good,
            checks_total: 3,
            checks_passed: 2,
            aligned_areas: vec![
                "INV-001: At least 5 task definitions present".to_string(),
                "HUB-001: Coordinator definition present".to_string(),
            ],
            misaligned_areas: vec![MisalignedArea::failed(
                "HUB-003: No peer-to-peer delegation outside the coordinator",
                "2 peer delegation markers outside the coordinator: specialists/analyst.md (2)",
            )],
            recommendations: Recommendations {
                high: vec!["HUB-003: Route through the coordinator".to_string()],
                medium: vec![],
                low: vec![],
            },
            action_items: vec!["[HIGH] Fix HUB-003 (No peer-to-peer delegation outside the coordinator)".to_string()],
        }
    }

    #[test]
    fn test_formats_agree_on_failed_checks() {
        let report = sample_report();
        let markdown = MarkdownRenderer.render(&report).unwrap();
        let json = JsonRenderer::new(false).render(&report).unwrap();

        let markdown_ids = markdown::misaligned_ids(&markdown);
        let record: serde_json::Value = serde_json::from_str(&json).unwrap();
        let json_ids: BTreeSet<String> = record["misalignedAreas"]
            .as_array()
            .unwrap()
            .iter()
            .map(|m| check_id(m["check"].as_str().unwrap()).to_string())
            .collect();

        assert_eq!(markdown_ids, json_ids);
        assert!(json_ids.contains("HUB-003"));
    }

    #[test]
    fn test_get_renderer() {
        let report = sample_report();
        let json = get_renderer(ReportFormat::Json).render(&report).unwrap();
        assert!(json.contains("\"alignmentScore\": 66"));
        let markdown = get_renderer(ReportFormat::Markdown).render(&report).unwrap();
        assert!(markdown.starts_with("# Hub-and-Spoke Alignment Report"));
    }

    #[test]
    fn test_check_id() {
        assert_eq!(check_id("HUB-003: No peer-to-peer delegation"), "HUB-003");
        assert_eq!(check_id("HUB-003"), "HUB-003");
    }
}
