//! Phase 1: is there enough of the system to validate at all?

use crate::checks::{missing, present};
use crate::core::inventory::layout;
use crate::domain::model::{ArtifactKind, Finding, Inventory};
use crate::utils::error::Result;

pub const MIN_TASKS: usize = 5;
pub const MIN_SPECIALISTS: usize = 5;

pub fn task_count(inventory: &Inventory) -> Result<Finding> {
    Ok(minimum_count(inventory, ArtifactKind::Task, MIN_TASKS))
}

pub fn specialist_count(inventory: &Inventory) -> Result<Finding> {
    Ok(minimum_count(inventory, ArtifactKind::Specialist, MIN_SPECIALISTS))
}

pub fn expected_tasks(inventory: &Inventory) -> Result<Finding> {
    Ok(all_present(inventory, &layout::EXPECTED_TASKS, "task"))
}

pub fn expected_specialists(inventory: &Inventory) -> Result<Finding> {
    Ok(all_present(inventory, &layout::EXPECTED_SPECIALISTS, "specialist"))
}

pub fn config_document(inventory: &Inventory) -> Result<Finding> {
    Ok(match present(inventory, layout::CONFIG_DOCUMENT) {
        Some(artifact) => Finding::pass(format!("{} present ({} bytes)", artifact.name, artifact.size)),
        None => missing(layout::CONFIG_DOCUMENT),
    })
}

fn minimum_count(inventory: &Inventory, kind: ArtifactKind, minimum: usize) -> Finding {
    let found = inventory.count(kind);
    let detail = format!("{} {} definitions found (minimum {})", found, kind, minimum);
    if found >= minimum {
        Finding::pass(detail)
    } else {
        Finding::fail(detail)
    }
}

fn all_present(inventory: &Inventory, expected: &[&str], label: &str) -> Finding {
    let missing: Vec<&str> = expected
        .iter()
        .copied()
        .filter(|name| !inventory.is_present(name))
        .collect();

    if missing.is_empty() {
        Finding::pass(format!("all {} expected {} definitions present", expected.len(), label))
    } else {
        Finding::fail(format!(
            "{} of {} expected {} definitions missing: {}",
            missing.len(),
            expected.len(),
            label,
            missing.join(", ")
        ))
    }
}
