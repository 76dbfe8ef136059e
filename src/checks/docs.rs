//! Phase 7: documentation completeness.

use crate::checks::{contains_ignore_case, missing, present};
use crate::domain::model::{Finding, Inventory};
use crate::utils::error::Result;

pub fn readme(inventory: &Inventory) -> Result<Finding> {
    Ok(doc_present(inventory, "README.md"))
}

pub fn architecture(inventory: &Inventory) -> Result<Finding> {
    let name = "docs/architecture.md";
    let Some(doc) = present(inventory, name) else {
        return Ok(missing(name));
    };

    if contains_ignore_case(doc.text()?, "hub") {
        Ok(Finding::pass(format!("{} describes the hub", name)))
    } else {
        Ok(Finding::fail(format!("{} does not mention the hub", name)))
    }
}

pub fn workflows(inventory: &Inventory) -> Result<Finding> {
    Ok(doc_present(inventory, "docs/workflows.md"))
}

pub fn troubleshooting(inventory: &Inventory) -> Result<Finding> {
    Ok(doc_present(inventory, "docs/troubleshooting.md"))
}

fn doc_present(inventory: &Inventory, name: &str) -> Finding {
    match present(inventory, name) {
        Some(doc) if doc.size > 0 => Finding::pass(format!("{} present ({} bytes)", name, doc.size)),
        Some(_) => Finding::fail(format!("{} is empty", name)),
        None => missing(name),
    }
}
