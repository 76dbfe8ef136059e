//! Check evaluation.
//!
//! Runs every registered check against one shared inventory snapshot and
//! returns exactly one result per check, in registry order. A probe that
//! returns an error or panics yields a failed result; it never stops the
//! remaining checks.

use crate::checks::CheckSpec;
use crate::domain::model::{CheckResult, Inventory};
use crate::utils::error::HealthCheckError;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

#[derive(Debug, Clone)]
pub struct Evaluator {
    parallel: bool,
    max_concurrency: usize,
}

impl Default for Evaluator {
    fn default() -> Self {
        Self {
            parallel: true,
            max_concurrency: 4,
        }
    }
}

impl Evaluator {
    pub fn new(parallel: bool, max_concurrency: usize) -> Self {
        Self {
            parallel,
            max_concurrency: max_concurrency.max(1),
        }
    }

    pub fn sequential() -> Self {
        Self::new(false, 1)
    }

    pub async fn evaluate(&self, registry: &[CheckSpec], inventory: Arc<Inventory>) -> Vec<CheckResult> {
        tracing::debug!(
            "Evaluating {} checks ({})",
            registry.len(),
            if self.parallel { "parallel" } else { "sequential" }
        );

        if self.parallel {
            self.evaluate_parallel(registry, inventory).await
        } else {
            evaluate_sequential(registry, &inventory)
        }
    }

    async fn evaluate_parallel(&self, registry: &[CheckSpec], inventory: Arc<Inventory>) -> Vec<CheckResult> {
        let semaphore = Arc::new(Semaphore::new(self.max_concurrency));
        let mut tasks = JoinSet::new();

        for (index, spec) in registry.iter().copied().enumerate() {
            let permit = semaphore.clone().acquire_owned().await.ok();
            let inventory = Arc::clone(&inventory);
            tasks.spawn_blocking(move || {
                let _permit = permit;
                (index, run_check(&spec, &inventory))
            });
        }

        let mut slots: Vec<Option<CheckResult>> = vec![None; registry.len()];
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((index, result)) => slots[index] = Some(result),
                Err(e) => tracing::warn!("Check task did not complete: {}", e),
            }
        }

        // Back to registry order; a lost task still yields a failed result.
        slots
            .into_iter()
            .zip(registry)
            .map(|(slot, spec)| {
                slot.unwrap_or_else(|| CheckResult {
                    check_id: spec.id.to_string(),
                    passed: false,
                    detail: "check task did not complete".to_string(),
                })
            })
            .collect()
    }
}

pub fn evaluate_sequential(registry: &[CheckSpec], inventory: &Inventory) -> Vec<CheckResult> {
    registry.iter().map(|spec| run_check(spec, inventory)).collect()
}

/// Runs one probe, turning errors and panics into a failed result.
pub fn run_check(spec: &CheckSpec, inventory: &Inventory) -> CheckResult {
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| (spec.probe)(inventory)));

    let result = match outcome {
        Ok(Ok(finding)) => CheckResult {
            check_id: spec.id.to_string(),
            passed: finding.passed,
            detail: finding.detail,
        },
        Ok(Err(e)) => {
            let fault = HealthCheckError::PredicateFault {
                check_id: spec.id.to_string(),
                message: e.to_string(),
            };
            tracing::warn!("{}", fault);
            CheckResult {
                check_id: spec.id.to_string(),
                passed: false,
                detail: fault.to_string(),
            }
        }
        Err(payload) => {
            let message = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_string());
            let fault = HealthCheckError::PredicateFault {
                check_id: spec.id.to_string(),
                message: format!("probe panicked: {}", message),
            };
            tracing::warn!("{}", fault);
            CheckResult {
                check_id: spec.id.to_string(),
                passed: false,
                detail: fault.to_string(),
            }
        }
    };

    tracing::debug!(
        "{} {}: {}",
        if result.passed { "PASS" } else { "FAIL" },
        result.check_id,
        result.detail
    );
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::{registry, Phase};
    use crate::domain::model::{Finding, Priority};
    use crate::utils::error::Result;

    fn passes(_: &Inventory) -> Result<Finding> {
        Ok(Finding::pass("fine"))
    }

    fn fails(_: &Inventory) -> Result<Finding> {
        Ok(Finding::fail("not fine"))
    }

    fn errors(_: &Inventory) -> Result<Finding> {
        Err(HealthCheckError::UndecodableArtifact {
            path: "tasks/x.md".to_string(),
            reason: "invalid utf-8".to_string(),
        })
    }

    fn panics(_: &Inventory) -> Result<Finding> {
        panic!("boom")
    }

    fn spec(id: &'static str, probe: crate::checks::Probe) -> CheckSpec {
        CheckSpec {
            id,
            name: "test check",
            phase: Phase::Inventory,
            priority: Priority::Low,
            remediation: "none",
            probe,
        }
    }

    fn faulty_registry() -> Vec<CheckSpec> {
        vec![
            spec("T-001", passes),
            spec("T-002", panics),
            spec("T-003", errors),
            spec("T-004", fails),
            spec("T-005", passes),
        ]
    }

    #[test]
    fn test_sequential_isolates_faults() {
        let results = evaluate_sequential(&faulty_registry(), &Inventory::default());

        let ids: Vec<&str> = results.iter().map(|r| r.check_id.as_str()).collect();
        assert_eq!(ids, vec!["T-001", "T-002", "T-003", "T-004", "T-005"]);
        assert!(results[0].passed);
        assert!(!results[1].passed);
        assert!(results[1].detail.contains("probe panicked: boom"));
        assert!(!results[2].passed);
        assert!(results[2].detail.contains("not valid UTF-8"));
        assert!(results[4].passed);
    }

    #[tokio::test]
    async fn test_parallel_matches_sequential() {
        let registry = faulty_registry();
        let inventory = Arc::new(Inventory::default());

        let parallel = Evaluator::new(true, 2)
            .evaluate(&registry, Arc::clone(&inventory))
            .await;
        let sequential = Evaluator::sequential().evaluate(&registry, inventory).await;

        assert_eq!(parallel, sequential);
    }

    #[tokio::test]
    async fn test_full_registry_yields_one_result_per_check() {
        let results = Evaluator::default()
            .evaluate(registry(), Arc::new(Inventory::default()))
            .await;

        assert_eq!(results.len(), registry().len());
        for (result, spec) in results.iter().zip(registry()) {
            assert_eq!(result.check_id, spec.id);
        }
    }
}
