//! The check catalog.
//!
//! Checks are grouped into nine phases and listed in a single static, ordered
//! registry. Each check owns a probe: a plain function from the inventory
//! snapshot to a [`Finding`]. Probes only read the snapshot, so they can run
//! in any order or in parallel.
//!
//! All probes are textual: they look for files, count literal markers and
//! search for keywords. Nothing here parses the definition language.

pub mod boundary;
pub mod docs;
pub mod goals;
pub mod hub;
pub mod infra;
pub mod scope;
pub mod sufficiency;
pub mod workflow;

use crate::domain::model::{Artifact, ArtifactKind, Finding, Inventory, Priority};
use crate::utils::error::{HealthCheckError, Result};
use std::fmt;

pub type Probe = fn(&Inventory) -> Result<Finding>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Phase {
    Inventory,
    Scope,
    Hub,
    Boundaries,
    Workflows,
    Infrastructure,
    Documentation,
    Goals,
    Bonus,
}

impl Phase {
    pub fn number(&self) -> u8 {
        match self {
            Phase::Inventory => 1,
            Phase::Scope => 2,
            Phase::Hub => 3,
            Phase::Boundaries => 4,
            Phase::Workflows => 5,
            Phase::Infrastructure => 6,
            Phase::Documentation => 7,
            Phase::Goals => 8,
            Phase::Bonus => 9,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Inventory => "Inventory sufficiency",
            Phase::Scope => "Categorization and scope",
            Phase::Hub => "Coordinator hub",
            Phase::Boundaries => "Scope boundaries",
            Phase::Workflows => "Workflow patterns",
            Phase::Infrastructure => "Infrastructure configuration",
            Phase::Documentation => "Documentation",
            Phase::Goals => "Goal markers",
            Phase::Bonus => "Bonus",
        };
        write!(f, "{}", name)
    }
}

/// A registered check.
#[derive(Debug, Clone, Copy)]
pub struct CheckSpec {
    /// Unique identifier (e.g. "HUB-003")
    pub id: &'static str,
    /// Human-readable description used in reports
    pub name: &'static str,
    pub phase: Phase,
    /// Remediation urgency when the check fails
    pub priority: Priority,
    /// Recommendation text emitted when the check fails
    pub remediation: &'static str,
    pub probe: Probe,
}

/// Size of the always-passing bonus block. Carried over from the original
/// scoring; it inflates every score by a fixed amount.
pub const BONUS_CHECKS: usize = 4;

const CATALOG: [CheckSpec; 33] = [
    // Phase 1
    CheckSpec {
        id: "INV-001",
        name: "At least 5 task definitions present",
        phase: Phase::Inventory,
        priority: Priority::High,
        remediation: "Add task definitions under tasks/ until at least 5 exist",
        probe: sufficiency::task_count,
    },
    CheckSpec {
        id: "INV-002",
        name: "At least 5 specialist definitions present",
        phase: Phase::Inventory,
        priority: Priority::High,
        remediation: "Add specialist definitions under specialists/ until at least 5 exist",
        probe: sufficiency::specialist_count,
    },
    CheckSpec {
        id: "INV-003",
        name: "All expected task definitions present",
        phase: Phase::Inventory,
        priority: Priority::High,
        remediation: "Create the missing task definitions listed in the check details",
        probe: sufficiency::expected_tasks,
    },
    CheckSpec {
        id: "INV-004",
        name: "All expected specialist definitions present",
        phase: Phase::Inventory,
        priority: Priority::High,
        remediation: "Create the missing specialist definitions listed in the check details",
        probe: sufficiency::expected_specialists,
    },
    CheckSpec {
        id: "INV-005",
        name: "Workflow configuration document present",
        phase: Phase::Inventory,
        priority: Priority::High,
        remediation: "Add workflow.toml at the root of the workflow tree",
        probe: sufficiency::config_document,
    },
    // Phase 2
    CheckSpec {
        id: "SCOPE-001",
        name: "No task exceeds 10 step markers",
        phase: Phase::Scope,
        priority: Priority::Medium,
        remediation: "Split oversized tasks so each has at most 10 steps",
        probe: scope::step_limit,
    },
    CheckSpec {
        id: "SCOPE-002",
        name: "Every task declares a category",
        phase: Phase::Scope,
        priority: Priority::Low,
        remediation: "Add a 'category:' line to each task definition",
        probe: scope::task_categories,
    },
    CheckSpec {
        id: "SCOPE-003",
        name: "Every specialist declares exactly one scope",
        phase: Phase::Scope,
        priority: Priority::Medium,
        remediation: "Give each specialist a single 'scope:' declaration",
        probe: scope::specialist_scopes,
    },
    // Phase 3
    CheckSpec {
        id: "HUB-001",
        name: "Coordinator definition present",
        phase: Phase::Hub,
        priority: Priority::High,
        remediation: "Create specialists/coordinator.md as the single delegation hub",
        probe: hub::coordinator_present,
    },
    CheckSpec {
        id: "HUB-002",
        name: "Coordinator declares delegation",
        phase: Phase::Hub,
        priority: Priority::High,
        remediation: "List delegation targets in the coordinator with 'delegate_to:'",
        probe: hub::coordinator_delegates,
    },
    CheckSpec {
        id: "HUB-003",
        name: "No peer-to-peer delegation outside the coordinator",
        phase: Phase::Hub,
        priority: Priority::High,
        remediation: "Remove delegate_to:/handoff_to: from tasks and specialists and route through the coordinator",
        probe: hub::no_peer_delegation,
    },
    CheckSpec {
        id: "HUB-004",
        name: "Tasks route through the coordinator",
        phase: Phase::Hub,
        priority: Priority::Medium,
        remediation: "Reference the coordinator in every task definition",
        probe: hub::tasks_route_through_coordinator,
    },
    // Phase 4
    CheckSpec {
        id: "BOUND-001",
        name: "Analyst stays read-only",
        phase: Phase::Boundaries,
        priority: Priority::High,
        remediation: "Mark the analyst 'read-only' or remove write actions from it",
        probe: boundary::analyst_read_only,
    },
    CheckSpec {
        id: "BOUND-002",
        name: "Reviewer stays analysis-only",
        phase: Phase::Boundaries,
        priority: Priority::High,
        remediation: "Mark the reviewer 'analysis-only' or remove write actions from it",
        probe: boundary::reviewer_analysis_only,
    },
    // Phase 5
    CheckSpec {
        id: "FLOW-001",
        name: "Feature workflow stages present",
        phase: Phase::Workflows,
        priority: Priority::Medium,
        remediation: "Declare analysis, implementation, testing and review stages in tasks/implement.md",
        probe: workflow::feature_workflow,
    },
    CheckSpec {
        id: "FLOW-002",
        name: "Review workflow stages present",
        phase: Phase::Workflows,
        priority: Priority::Medium,
        remediation: "Declare analysis and review stages in tasks/review.md",
        probe: workflow::review_workflow,
    },
    CheckSpec {
        id: "FLOW-003",
        name: "Release workflow stages present",
        phase: Phase::Workflows,
        priority: Priority::Medium,
        remediation: "Declare testing, deployment and verification stages in tasks/deploy.md",
        probe: workflow::release_workflow,
    },
    CheckSpec {
        id: "FLOW-004",
        name: "Every task defines numbered steps",
        phase: Phase::Workflows,
        priority: Priority::Low,
        remediation: "Break each task into '## Step N' sections",
        probe: workflow::tasks_have_steps,
    },
    // Phase 6
    CheckSpec {
        id: "CFG-001",
        name: "Logging enabled",
        phase: Phase::Infrastructure,
        priority: Priority::High,
        remediation: "Set logging.enabled = true in workflow.toml",
        probe: infra::logging_enabled,
    },
    CheckSpec {
        id: "CFG-002",
        name: "Hub enforcement enabled",
        phase: Phase::Infrastructure,
        priority: Priority::Medium,
        remediation: "Set coordinator.enforce_hub = true in workflow.toml",
        probe: infra::hub_enforced,
    },
    CheckSpec {
        id: "CFG-003",
        name: "Network timeout configured",
        phase: Phase::Infrastructure,
        priority: Priority::Medium,
        remediation: "Set network.timeout_seconds to a positive integer in workflow.toml",
        probe: infra::network_timeout,
    },
    CheckSpec {
        id: "CFG-004",
        name: "Metrics enabled",
        phase: Phase::Infrastructure,
        priority: Priority::Low,
        remediation: "Set metrics.enabled = true in workflow.toml",
        probe: infra::metrics_enabled,
    },
    // Phase 7
    CheckSpec {
        id: "DOC-001",
        name: "README present",
        phase: Phase::Documentation,
        priority: Priority::Medium,
        remediation: "Add a README.md describing the workflow system",
        probe: docs::readme,
    },
    CheckSpec {
        id: "DOC-002",
        name: "Architecture document describes the hub",
        phase: Phase::Documentation,
        priority: Priority::Medium,
        remediation: "Document the hub-and-spoke architecture in docs/architecture.md",
        probe: docs::architecture,
    },
    CheckSpec {
        id: "DOC-003",
        name: "Workflow guide present",
        phase: Phase::Documentation,
        priority: Priority::Low,
        remediation: "Add docs/workflows.md",
        probe: docs::workflows,
    },
    CheckSpec {
        id: "DOC-004",
        name: "Troubleshooting guide present",
        phase: Phase::Documentation,
        priority: Priority::Low,
        remediation: "Add docs/troubleshooting.md",
        probe: docs::troubleshooting,
    },
    // Phase 8
    CheckSpec {
        id: "GOAL-001",
        name: "Every specialist states its goal",
        phase: Phase::Goals,
        priority: Priority::Medium,
        remediation: "Add a '## Goal' section to each specialist definition",
        probe: goals::specialists_state_goal,
    },
    CheckSpec {
        id: "GOAL-002",
        name: "Every task states success criteria",
        phase: Phase::Goals,
        priority: Priority::Low,
        remediation: "Add a '## Success Criteria' section to each task definition",
        probe: goals::tasks_state_success_criteria,
    },
    CheckSpec {
        id: "GOAL-003",
        name: "Coordinator names every specialist",
        phase: Phase::Goals,
        priority: Priority::Low,
        remediation: "Mention every specialist by name in the coordinator definition",
        probe: goals::coordinator_names_specialists,
    },
    // Phase 9
    CheckSpec {
        id: "BONUS-001",
        name: "Baseline credit",
        phase: Phase::Bonus,
        priority: Priority::Low,
        remediation: "No action required",
        probe: bonus,
    },
    CheckSpec {
        id: "BONUS-002",
        name: "Baseline credit",
        phase: Phase::Bonus,
        priority: Priority::Low,
        remediation: "No action required",
        probe: bonus,
    },
    CheckSpec {
        id: "BONUS-003",
        name: "Baseline credit",
        phase: Phase::Bonus,
        priority: Priority::Low,
        remediation: "No action required",
        probe: bonus,
    },
    CheckSpec {
        id: "BONUS-004",
        name: "Baseline credit",
        phase: Phase::Bonus,
        priority: Priority::Low,
        remediation: "No action required",
        probe: bonus,
    },
];

const fn count_phase(catalog: &[CheckSpec], phase: Phase) -> usize {
    let mut count = 0;
    let mut i = 0;
    while i < catalog.len() {
        if catalog[i].phase as u8 == phase as u8 {
            count += 1;
        }
        i += 1;
    }
    count
}

const _: () = assert!(
    count_phase(&CATALOG, Phase::Bonus) == BONUS_CHECKS,
    "bonus block size does not match BONUS_CHECKS"
);

static REGISTRY: [CheckSpec; 33] = CATALOG;

/// The full catalog in evaluation order.
pub fn registry() -> &'static [CheckSpec] {
    &REGISTRY
}

pub fn find(id: &str) -> Option<&'static CheckSpec> {
    REGISTRY.iter().find(|c| c.id == id)
}

fn bonus(_inventory: &Inventory) -> Result<Finding> {
    Ok(Finding::pass("fixed bonus credit"))
}

pub(crate) fn count_marker(text: &str, marker: &str) -> usize {
    text.matches(marker).count()
}

pub(crate) fn contains_ignore_case(text: &str, needle: &str) -> bool {
    text.to_lowercase().contains(&needle.to_lowercase())
}

pub(crate) fn missing_detail(name: &str) -> String {
    HealthCheckError::MissingArtifact {
        path: name.to_string(),
    }
    .to_string()
}

pub(crate) fn missing(name: &str) -> Finding {
    Finding::fail(missing_detail(name))
}

/// The artifact if it exists on disk.
pub(crate) fn present<'a>(inventory: &'a Inventory, name: &str) -> Option<&'a Artifact> {
    inventory.get(name).filter(|a| a.exists)
}

/// Passes when every existing definition of `kind` satisfies `accept`.
/// Fails when there is no definition of that kind to inspect.
pub(crate) fn every_definition(
    inventory: &Inventory,
    kind: ArtifactKind,
    requirement: &str,
    accept: impl Fn(&str) -> bool,
) -> Result<Finding> {
    let mut inspected = 0;
    let mut offenders = Vec::new();

    for artifact in inventory.existing(kind) {
        inspected += 1;
        if !accept(artifact.text()?) {
            offenders.push(artifact.name.as_str());
        }
    }

    if inspected == 0 {
        return Ok(Finding::fail(format!("no {} definitions to inspect", kind)));
    }

    if offenders.is_empty() {
        Ok(Finding::pass(format!(
            "all {} {} definitions {}",
            inspected, kind, requirement
        )))
    } else {
        Ok(Finding::fail(format!(
            "{} of {} {} definitions do not {}: {}",
            offenders.len(),
            inspected,
            kind,
            requirement_negated(requirement),
            offenders.join(", ")
        )))
    }
}

fn requirement_negated(requirement: &str) -> String {
    // "declare X" reads better than "declares X" after "do not"
    match requirement.split_once(' ') {
        Some((verb, rest)) => format!("{} {}", verb.strip_suffix('s').unwrap_or(verb), rest),
        None => requirement.to_string(),
    }
}
