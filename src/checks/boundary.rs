//! Phase 4: restricted specialists stay inside their scope.
//!
//! A restricted check fails only when the scope marker is absent AND a
//! disallowed action is referenced. Either condition alone is still written
//! to the detail so it shows up in the report.

use crate::checks::{missing, present};
use crate::domain::model::{Finding, Inventory};
use crate::utils::error::Result;

pub const ANALYST: &str = "specialists/analyst.md";
pub const REVIEWER: &str = "specialists/reviewer.md";

pub const READ_ONLY_MARKER: &str = "read-only";
pub const ANALYSIS_ONLY_MARKER: &str = "analysis-only";

pub const WRITE_ACTIONS: [&str; 4] = ["write_file", "edit_file", "delete_file", "git push"];
pub const REVIEWER_ACTIONS: [&str; 5] = [
    "write_file",
    "edit_file",
    "delete_file",
    "git push",
    "git commit",
];

pub fn analyst_read_only(inventory: &Inventory) -> Result<Finding> {
    restricted_scope(inventory, ANALYST, READ_ONLY_MARKER, &WRITE_ACTIONS)
}

pub fn reviewer_analysis_only(inventory: &Inventory) -> Result<Finding> {
    restricted_scope(inventory, REVIEWER, ANALYSIS_ONLY_MARKER, &REVIEWER_ACTIONS)
}

pub fn restricted_scope(
    inventory: &Inventory,
    name: &str,
    marker: &str,
    disallowed: &[&str],
) -> Result<Finding> {
    let Some(artifact) = present(inventory, name) else {
        return Ok(missing(name));
    };

    let text = artifact.text()?.to_lowercase();
    let marker_present = text.contains(marker);
    let referenced: Vec<&str> = disallowed
        .iter()
        .copied()
        .filter(|action| text.contains(action))
        .collect();

    let marker_note = if marker_present {
        format!("'{}' marker present", marker)
    } else {
        format!("'{}' marker missing", marker)
    };
    let action_note = if referenced.is_empty() {
        "no disallowed actions referenced".to_string()
    } else {
        format!("disallowed actions referenced: {}", referenced.join(", "))
    };

    let violated = !marker_present && !referenced.is_empty();
    let detail = format!("{}: {}; {}", name, marker_note, action_note);

    Ok(Finding {
        passed: !violated,
        detail,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::fixtures::inventory;

    #[test]
    fn test_marker_absent_and_keyword_present_fails() {
        let files = inventory(&[(ANALYST, "Uses write_file to save notes")]);
        let finding = analyst_read_only(&files).unwrap();
        assert!(!finding.passed);
        assert_eq!(
            finding.detail,
            "specialists/analyst.md: 'read-only' marker missing; disallowed actions referenced: write_file"
        );
    }

    #[test]
    fn test_marker_present_with_keyword_passes_but_reports_it() {
        let files = inventory(&[(ANALYST, "Mode: Read-Only\nNever call write_file")]);
        let finding = analyst_read_only(&files).unwrap();
        assert!(finding.passed);
        assert!(finding.detail.contains("'read-only' marker present"));
        assert!(finding.detail.contains("disallowed actions referenced: write_file"));
    }

    #[test]
    fn test_marker_absent_without_keywords_passes_but_reports_it() {
        let files = inventory(&[(REVIEWER, "Reads diffs and comments")]);
        let finding = reviewer_analysis_only(&files).unwrap();
        assert!(finding.passed);
        assert!(finding.detail.contains("'analysis-only' marker missing"));
    }

    #[test]
    fn test_reviewer_commit_is_disallowed() {
        let files = inventory(&[(REVIEWER, "Finishes with git commit")]);
        assert!(!reviewer_analysis_only(&files).unwrap().passed);
    }

    #[test]
    fn test_missing_restricted_artifact_fails() {
        let finding = analyst_read_only(&inventory(&[])).unwrap();
        assert!(!finding.passed);
        assert_eq!(finding.detail, "specialists/analyst.md missing");
    }
}
