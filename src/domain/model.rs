use crate::utils::error::{HealthCheckError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactKind {
    Task,
    Specialist,
    Config,
    Doc,
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArtifactKind::Task => write!(f, "task"),
            ArtifactKind::Specialist => write!(f, "specialist"),
            ArtifactKind::Config => write!(f, "config"),
            ArtifactKind::Doc => write!(f, "doc"),
        }
    }
}

/// One inspected definition file. Missing files are kept as artifacts with
/// `exists == false` and empty content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub name: String,
    pub path: PathBuf,
    pub exists: bool,
    pub content: String,
    pub size: u64,
    pub kind: ArtifactKind,
    pub decode_error: Option<String>,
}

impl Artifact {
    pub fn missing(name: impl Into<String>, path: PathBuf, kind: ArtifactKind) -> Self {
        Self {
            name: name.into(),
            path,
            exists: false,
            content: String::new(),
            size: 0,
            kind,
            decode_error: None,
        }
    }

    pub fn from_bytes(name: impl Into<String>, path: PathBuf, kind: ArtifactKind, bytes: Vec<u8>) -> Self {
        let size = bytes.len() as u64;
        let (content, decode_error) = match String::from_utf8(bytes) {
            Ok(text) => (text, None),
            Err(e) => (String::new(), Some(e.to_string())),
        };

        Self {
            name: name.into(),
            path,
            exists: true,
            content,
            size,
            kind,
            decode_error,
        }
    }

    /// Text of an existing artifact. Fails for undecodable files so the
    /// calling check reports a fault instead of matching against nothing.
    pub fn text(&self) -> Result<&str> {
        match &self.decode_error {
            Some(reason) => Err(HealthCheckError::UndecodableArtifact {
                path: self.name.clone(),
                reason: reason.clone(),
            }),
            None => Ok(&self.content),
        }
    }

    /// File name without directory and extension (`specialists/analyst.md` -> `analyst`).
    pub fn stem(&self) -> &str {
        let file = self.name.rsplit('/').next().unwrap_or(&self.name);
        file.strip_suffix(".md").unwrap_or(file)
    }
}

/// Immutable snapshot of every artifact the checks may look at.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inventory {
    pub root: PathBuf,
    pub layout_version: u32,
    pub artifacts: BTreeMap<String, Artifact>,
    pub category_counts: BTreeMap<ArtifactKind, usize>,
}

impl Inventory {
    pub fn get(&self, name: &str) -> Option<&Artifact> {
        self.artifacts.get(name)
    }

    pub fn is_present(&self, name: &str) -> bool {
        self.get(name).map(|a| a.exists).unwrap_or(false)
    }

    /// Existing artifacts of one kind, in lexicographic name order.
    pub fn existing(&self, kind: ArtifactKind) -> impl Iterator<Item = &Artifact> {
        self.artifacts
            .values()
            .filter(move |a| a.exists && a.kind == kind)
    }

    pub fn count(&self, kind: ArtifactKind) -> usize {
        self.category_counts.get(&kind).copied().unwrap_or(0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Priority::High => write!(f, "high"),
            Priority::Medium => write!(f, "medium"),
            Priority::Low => write!(f, "low"),
        }
    }
}

/// Outcome of one probe: the boolean verdict plus the text explaining it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub passed: bool,
    pub detail: String,
}

impl Finding {
    pub fn pass(detail: impl Into<String>) -> Self {
        Self {
            passed: true,
            detail: detail.into(),
        }
    }

    pub fn fail(detail: impl Into<String>) -> Self {
        Self {
            passed: false,
            detail: detail.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResult {
    pub check_id: String,
    pub passed: bool,
    pub detail: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    Excellent,
    Good,
    NeedsWork,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Excellent => write!(f, "excellent"),
            Status::Good => write!(f, "good"),
            Status::NeedsWork => write!(f, "needs-work"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MisalignedArea {
    pub check: String,
    pub status: String,
    pub details: String,
}

impl MisalignedArea {
    pub fn failed(check: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            check: check.into(),
            status: "failed".to_string(),
            details: details.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendations {
    pub high: Vec<String>,
    pub medium: Vec<String>,
    pub low: Vec<String>,
}

impl Recommendations {
    pub fn tier_mut(&mut self, priority: Priority) -> &mut Vec<String> {
        match priority {
            Priority::High => &mut self.high,
            Priority::Medium => &mut self.medium,
            Priority::Low => &mut self.low,
        }
    }

    pub fn len(&self) -> usize {
        self.high.len() + self.medium.len() + self.low.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Terminal artifact of a run. Field names match the JSON record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub timestamp: String,
    pub alignment_score: u32,
    pub status: Status,
    pub checks_total: usize,
    pub checks_passed: usize,
    pub aligned_areas: Vec<String>,
    pub misaligned_areas: Vec<MisalignedArea>,
    pub recommendations: Recommendations,
    pub action_items: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_artifact_from_invalid_utf8_keeps_exists() {
        let artifact = Artifact::from_bytes(
            "tasks/broken.md",
            PathBuf::from("/tmp/tasks/broken.md"),
            ArtifactKind::Task,
            vec![0xff, 0xfe, 0x00],
        );
        assert!(artifact.exists);
        assert_eq!(artifact.size, 3);
        assert!(artifact.content.is_empty());
        assert!(artifact.text().is_err());
    }

    #[test]
    fn test_artifact_stem() {
        let artifact = Artifact::missing(
            "specialists/analyst.md",
            PathBuf::from("specialists/analyst.md"),
            ArtifactKind::Specialist,
        );
        assert_eq!(artifact.stem(), "analyst");
    }

    #[test]
    fn test_status_serializes_kebab_case() {
        let json = serde_json::to_string(&Status::NeedsWork).unwrap();
        assert_eq!(json, "\"needs-work\"");
    }

    #[test]
    fn test_report_field_names() {
        let report = Report {
            timestamp: "2024-01-01T00:00:00Z".to_string(),
            alignment_score: 50,
            status: Status::NeedsWork,
            checks_total: 2,
            checks_passed: 1,
            aligned_areas: vec!["INV-001: ok".to_string()],
            misaligned_areas: vec![MisalignedArea::failed("HUB-001", "missing")],
            recommendations: Recommendations::default(),
            action_items: vec![],
        };
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["alignmentScore"], 50);
        assert_eq!(value["checksTotal"], 2);
        assert_eq!(value["checksPassed"], 1);
        assert_eq!(value["misalignedAreas"][0]["status"], "failed");
        assert!(value["recommendations"]["high"].is_array());
        assert!(value["actionItems"].is_array());
    }
}
