//! Phase 6: infrastructure flags in the workflow configuration document.
//!
//! A key that is unreadable or has the wrong shape takes its default (false,
//! or no timeout) and the reason goes into the detail. An unparsable document
//! makes every key malformed. None of this aborts the run.

use crate::checks::{missing_detail, present};
use crate::core::inventory::layout;
use crate::domain::model::{Finding, Inventory};
use crate::utils::error::{HealthCheckError, Result};

/// Outcome of looking up one dotted key.
#[derive(Debug, Clone, PartialEq)]
pub enum Setting<T> {
    Value(T),
    Missing,
    Malformed(String),
}

#[derive(Debug, Clone)]
pub struct WorkflowSettings {
    table: std::result::Result<toml::Table, String>,
}

impl WorkflowSettings {
    /// `None` when the configuration document does not exist.
    pub fn load(inventory: &Inventory) -> Option<Self> {
        let artifact = present(inventory, layout::CONFIG_DOCUMENT)?;
        let table = match artifact.text() {
            Ok(text) => toml::from_str::<toml::Table>(text)
                .map_err(|e| format!("{} is not valid TOML: {}", layout::CONFIG_DOCUMENT, e.message())),
            Err(e) => Err(e.to_string()),
        };
        Some(Self { table })
    }

    pub fn from_toml_str(content: &str) -> Self {
        Self {
            table: toml::from_str::<toml::Table>(content).map_err(|e| e.message().to_string()),
        }
    }

    fn lookup(&self, key: &str) -> Setting<&toml::Value> {
        let table = match &self.table {
            Ok(table) => table,
            Err(reason) => return Setting::Malformed(reason.clone()),
        };

        let mut segments = key.split('.');
        let Some(first) = segments.next() else {
            return Setting::Missing;
        };
        let mut current = match table.get(first) {
            Some(value) => value,
            None => return Setting::Missing,
        };

        for segment in segments {
            let Some(inner) = current.as_table() else {
                return Setting::Malformed(format!(
                    "expected a table before '{}', found {}",
                    segment,
                    current.type_str()
                ));
            };
            current = match inner.get(segment) {
                Some(value) => value,
                None => return Setting::Missing,
            };
        }

        Setting::Value(current)
    }

    pub fn flag(&self, key: &str) -> Setting<bool> {
        match self.lookup(key) {
            Setting::Value(value) => match value.as_bool() {
                Some(flag) => Setting::Value(flag),
                None => Setting::Malformed(format!("expected a boolean, found {}", value.type_str())),
            },
            Setting::Missing => Setting::Missing,
            Setting::Malformed(reason) => Setting::Malformed(reason),
        }
    }

    pub fn integer(&self, key: &str) -> Setting<i64> {
        match self.lookup(key) {
            Setting::Value(value) => match value.as_integer() {
                Some(number) => Setting::Value(number),
                None => Setting::Malformed(format!("expected an integer, found {}", value.type_str())),
            },
            Setting::Missing => Setting::Missing,
            Setting::Malformed(reason) => Setting::Malformed(reason),
        }
    }
}

pub fn logging_enabled(inventory: &Inventory) -> Result<Finding> {
    Ok(flag_enabled(inventory, "logging.enabled"))
}

pub fn hub_enforced(inventory: &Inventory) -> Result<Finding> {
    Ok(flag_enabled(inventory, "coordinator.enforce_hub"))
}

pub fn metrics_enabled(inventory: &Inventory) -> Result<Finding> {
    Ok(flag_enabled(inventory, "metrics.enabled"))
}

pub fn network_timeout(inventory: &Inventory) -> Result<Finding> {
    let key = "network.timeout_seconds";
    let Some(settings) = WorkflowSettings::load(inventory) else {
        return Ok(Finding::fail(format!(
            "{}; {} defaults to 0",
            missing_detail(layout::CONFIG_DOCUMENT),
            key
        )));
    };

    Ok(match settings.integer(key) {
        Setting::Value(seconds) if seconds > 0 => Finding::pass(format!("{} = {}", key, seconds)),
        Setting::Value(seconds) => Finding::fail(format!("{} = {} (must be positive)", key, seconds)),
        Setting::Missing => Finding::fail(format!("{} not set; defaults to 0", key)),
        Setting::Malformed(reason) => Finding::fail(format!("{}; treated as 0", malformed(key, reason))),
    })
}

fn flag_enabled(inventory: &Inventory, key: &str) -> Finding {
    let Some(settings) = WorkflowSettings::load(inventory) else {
        return Finding::fail(format!(
            "{}; {} defaults to false",
            missing_detail(layout::CONFIG_DOCUMENT),
            key
        ));
    };

    match settings.flag(key) {
        Setting::Value(true) => Finding::pass(format!("{} = true", key)),
        Setting::Value(false) => Finding::fail(format!("{} = false", key)),
        Setting::Missing => Finding::fail(format!("{} not set; defaults to false", key)),
        Setting::Malformed(reason) => Finding::fail(format!("{}; treated as false", malformed(key, reason))),
    }
}

fn malformed(key: &str, reason: String) -> HealthCheckError {
    HealthCheckError::MalformedConfig {
        key: key.to_string(),
        reason,
    }
}
