//! Phase 3: the coordinator is the hub and the only delegator.

use crate::checks::{contains_ignore_case, count_marker, every_definition, missing, present};
use crate::core::inventory::layout;
use crate::domain::model::{ArtifactKind, Finding, Inventory};
use crate::utils::error::Result;

pub const DELEGATION_MARKER: &str = "delegate_to:";
pub const PEER_DELEGATION_MARKERS: [&str; 2] = ["delegate_to:", "handoff_to:"];

pub fn coordinator_present(inventory: &Inventory) -> Result<Finding> {
    Ok(match present(inventory, layout::COORDINATOR) {
        Some(_) => Finding::pass(format!("{} present", layout::COORDINATOR)),
        None => missing(layout::COORDINATOR),
    })
}

pub fn coordinator_delegates(inventory: &Inventory) -> Result<Finding> {
    let Some(coordinator) = present(inventory, layout::COORDINATOR) else {
        return Ok(missing(layout::COORDINATOR));
    };

    let delegations = count_marker(coordinator.text()?, DELEGATION_MARKER);
    let detail = format!("coordinator declares {} delegation targets", delegations);
    Ok(if delegations > 0 {
        Finding::pass(detail)
    } else {
        Finding::fail(detail)
    })
}

/// Counts peer-delegation markers in every task and every specialist other
/// than the coordinator. Any occurrence fails the check; the raw count is
/// kept in the detail.
pub fn no_peer_delegation(inventory: &Inventory) -> Result<Finding> {
    let mut inspected = 0;
    let mut total = 0;
    let mut per_file = Vec::new();

    let candidates = inventory
        .existing(ArtifactKind::Task)
        .chain(inventory.existing(ArtifactKind::Specialist))
        .filter(|a| a.name != layout::COORDINATOR);

    for artifact in candidates {
        inspected += 1;
        let text = artifact.text()?;
        let count: usize = PEER_DELEGATION_MARKERS
            .iter()
            .map(|marker| count_marker(text, marker))
            .sum();
        if count > 0 {
            total += count;
            per_file.push(format!("{} ({})", artifact.name, count));
        }
    }

    if inspected == 0 {
        return Ok(Finding::fail("no task or specialist definitions to inspect"));
    }

    if total == 0 {
        Ok(Finding::pass(format!(
            "0 peer delegation markers outside the coordinator ({} definitions inspected)",
            inspected
        )))
    } else {
        Ok(Finding::fail(format!(
            "{} peer delegation markers outside the coordinator: {}",
            total,
            per_file.join(", ")
        )))
    }
}

pub fn tasks_route_through_coordinator(inventory: &Inventory) -> Result<Finding> {
    every_definition(
        inventory,
        ArtifactKind::Task,
        "references the coordinator",
        |text| contains_ignore_case(text, "coordinator"),
    )
}
