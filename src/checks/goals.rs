//! Phase 8: cross-cutting goal markers.

use crate::checks::{contains_ignore_case, every_definition, missing, present};
use crate::core::inventory::layout;
use crate::domain::model::{ArtifactKind, Finding, Inventory};
use crate::utils::error::Result;

pub const GOAL_MARKER: &str = "## Goal";
pub const SUCCESS_MARKER: &str = "## Success Criteria";

pub fn specialists_state_goal(inventory: &Inventory) -> Result<Finding> {
    every_definition(inventory, ArtifactKind::Specialist, "states a goal", |text| {
        text.contains(GOAL_MARKER)
    })
}

pub fn tasks_state_success_criteria(inventory: &Inventory) -> Result<Finding> {
    every_definition(
        inventory,
        ArtifactKind::Task,
        "states success criteria",
        |text| text.contains(SUCCESS_MARKER),
    )
}

pub fn coordinator_names_specialists(inventory: &Inventory) -> Result<Finding> {
    let Some(coordinator) = present(inventory, layout::COORDINATOR) else {
        return Ok(missing(layout::COORDINATOR));
    };
    let text = coordinator.text()?;

    let spokes: Vec<&str> = inventory
        .existing(ArtifactKind::Specialist)
        .filter(|a| a.name != layout::COORDINATOR)
        .map(|a| a.stem())
        .collect();

    if spokes.is_empty() {
        return Ok(Finding::fail("no specialists for the coordinator to reference"));
    }

    let unnamed: Vec<&str> = spokes
        .iter()
        .copied()
        .filter(|stem| !contains_ignore_case(text, stem))
        .collect();

    if unnamed.is_empty() {
        Ok(Finding::pass(format!("coordinator names all {} specialists", spokes.len())))
    } else {
        Ok(Finding::fail(format!(
            "coordinator does not name: {}",
            unnamed.join(", ")
        )))
    }
}
