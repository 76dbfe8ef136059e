//! Phase 5: workflow patterns, checked structurally.
//!
//! Each named workflow expects a task definition to declare its stages with
//! `stage: <name>` lines. Nothing is executed.

use crate::checks::scope::STEP_MARKER;
use crate::checks::{every_definition, missing, present};
use crate::domain::model::{ArtifactKind, Finding, Inventory};
use crate::utils::error::Result;

pub const STAGE_PREFIX: &str = "stage: ";

pub const FEATURE_TASK: &str = "tasks/implement.md";
pub const FEATURE_STAGES: [&str; 4] = ["analysis", "implementation", "testing", "review"];

pub const REVIEW_TASK: &str = "tasks/review.md";
pub const REVIEW_STAGES: [&str; 2] = ["analysis", "review"];

pub const RELEASE_TASK: &str = "tasks/deploy.md";
pub const RELEASE_STAGES: [&str; 3] = ["testing", "deployment", "verification"];

pub fn feature_workflow(inventory: &Inventory) -> Result<Finding> {
    stages_present(inventory, FEATURE_TASK, &FEATURE_STAGES)
}

pub fn review_workflow(inventory: &Inventory) -> Result<Finding> {
    stages_present(inventory, REVIEW_TASK, &REVIEW_STAGES)
}

pub fn release_workflow(inventory: &Inventory) -> Result<Finding> {
    stages_present(inventory, RELEASE_TASK, &RELEASE_STAGES)
}

pub fn tasks_have_steps(inventory: &Inventory) -> Result<Finding> {
    every_definition(inventory, ArtifactKind::Task, "defines numbered steps", |text| {
        text.contains(STEP_MARKER)
    })
}

pub fn stages_present(inventory: &Inventory, name: &str, stages: &[&str]) -> Result<Finding> {
    let Some(task) = present(inventory, name) else {
        return Ok(missing(name));
    };

    let text = task.text()?;
    let missing: Vec<&str> = stages
        .iter()
        .copied()
        .filter(|stage| !text.contains(&format!("{}{}", STAGE_PREFIX, stage)))
        .collect();

    if missing.is_empty() {
        Ok(Finding::pass(format!(
            "{} declares stages {}",
            name,
            stages.join(" -> ")
        )))
    } else {
        Ok(Finding::fail(format!(
            "{} is missing stages: {}",
            name,
            missing.join(", ")
        )))
    }
}
