//! Phase 2: categorization and scope-size limits.

use crate::checks::{count_marker, every_definition};
use crate::domain::model::{ArtifactKind, Finding, Inventory};
use crate::utils::error::Result;

pub const STEP_MARKER: &str = "## Step ";
pub const MAX_STEP_MARKERS: usize = 10;
pub const CATEGORY_MARKER: &str = "category:";
pub const SCOPE_MARKER: &str = "scope:";

/// Scope creep: a task with more than [`MAX_STEP_MARKERS`] literal step
/// markers fails the check. This is a count, not a parse.
pub fn step_limit(inventory: &Inventory) -> Result<Finding> {
    let mut inspected = 0;
    let mut largest = 0;
    let mut offenders = Vec::new();

    for task in inventory.existing(ArtifactKind::Task) {
        inspected += 1;
        let steps = count_marker(task.text()?, STEP_MARKER);
        largest = largest.max(steps);
        if steps > MAX_STEP_MARKERS {
            offenders.push(format!(
                "{} has {} step markers (limit {})",
                task.name, steps, MAX_STEP_MARKERS
            ));
        }
    }

    if inspected == 0 {
        return Ok(Finding::fail("no task definitions to inspect"));
    }

    if offenders.is_empty() {
        Ok(Finding::pass(format!(
            "{} task definitions within the step limit (largest has {})",
            inspected, largest
        )))
    } else {
        Ok(Finding::fail(offenders.join("; ")))
    }
}

pub fn task_categories(inventory: &Inventory) -> Result<Finding> {
    every_definition(inventory, ArtifactKind::Task, "declares a category", |text| {
        text.contains(CATEGORY_MARKER)
    })
}

pub fn specialist_scopes(inventory: &Inventory) -> Result<Finding> {
    every_definition(
        inventory,
        ArtifactKind::Specialist,
        "declares exactly one scope",
        |text| count_marker(text, SCOPE_MARKER) == 1,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::fixtures::inventory;

    fn steps(n: usize) -> String {
        (1..=n).map(|i| format!("## Step {}\ndo thing\n", i)).collect()
    }

    #[test]
    fn test_ten_steps_pass() {
        let text = steps(10);
        let finding = step_limit(&inventory(&[("tasks/deploy.md", text.as_str())])).unwrap();
        assert!(finding.passed);
    }

    #[test]
    fn test_eleven_steps_fail_with_count() {
        let text = steps(11);
        let finding = step_limit(&inventory(&[
            ("tasks/deploy.md", text.as_str()),
            ("tasks/test.md", "## Step 1\n"),
        ]))
        .unwrap();
        assert!(!finding.passed);
        assert_eq!(finding.detail, "tasks/deploy.md has 11 step markers (limit 10)");
    }

    #[test]
    fn test_step_limit_without_tasks_fails() {
        assert!(!step_limit(&inventory(&[])).unwrap().passed);
    }

    #[test]
    fn test_specialist_scopes_need_exactly_one() {
        let ok = inventory(&[("specialists/a.md", "scope: analysis")]);
        assert!(specialist_scopes(&ok).unwrap().passed);

        let twice = inventory(&[("specialists/a.md", "scope: analysis\nscope: build")]);
        assert!(!specialist_scopes(&twice).unwrap().passed);

        let none = inventory(&[("specialists/a.md", "# Analyst")]);
        assert!(!specialist_scopes(&none).unwrap().passed);
    }

    #[test]
    fn test_task_categories() {
        let files = inventory(&[
            ("tasks/a.md", "category: build"),
            ("tasks/b.md", "category: release"),
        ]);
        assert!(task_categories(&files).unwrap().passed);
    }

    #[test]
    fn test_undecodable_task_is_an_error() {
        let mut files = inventory(&[("tasks/a.md", "")]);
        let artifact = files.artifacts.get_mut("tasks/a.md").unwrap();
        artifact.decode_error = Some("invalid utf-8 sequence".to_string());
        assert!(step_limit(&files).is_err());
    }
}
