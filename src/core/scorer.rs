//! Scoring and report assembly.
//!
//! Everything here is a pure function of the registry, the result set and the
//! timestamp. The score uses integer division, so it is the floor of the
//! passing percentage and never drifts between runs.

use crate::checks::{CheckSpec, Phase};
use crate::domain::model::{CheckResult, MisalignedArea, Priority, Recommendations, Report, Status};
use chrono::{DateTime, SecondsFormat, Utc};
use std::collections::HashMap;

pub const EXCELLENT_THRESHOLD: u32 = 80;
pub const GOOD_THRESHOLD: u32 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Score {
    pub passed: usize,
    pub total: usize,
    pub percent: u32,
    pub status: Status,
}

/// `passed * 100 / total`, or 0 for an empty registry.
pub fn alignment_score(passed: usize, total: usize) -> u32 {
    if total == 0 {
        0
    } else {
        (passed * 100 / total) as u32
    }
}

pub fn classify(score: u32) -> Status {
    if score >= EXCELLENT_THRESHOLD {
        Status::Excellent
    } else if score >= GOOD_THRESHOLD {
        Status::Good
    } else {
        Status::NeedsWork
    }
}

pub fn tally(results: &[CheckResult]) -> Score {
    let passed = results.iter().filter(|r| r.passed).count();
    let total = results.len();
    let percent = alignment_score(passed, total);
    Score {
        passed,
        total,
        percent,
        status: classify(percent),
    }
}

pub fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Builds the report from the registry and its results.
///
/// The registry is the source of truth for totals and priorities: a check
/// with no matching result is reported as failed rather than dropped.
pub fn build_report(registry: &[CheckSpec], results: &[CheckResult], timestamp: DateTime<Utc>) -> Report {
    let by_id: HashMap<&str, &CheckResult> = results.iter().map(|r| (r.check_id.as_str(), r)).collect();

    let mut outcomes = Vec::with_capacity(registry.len());
    for spec in registry {
        let outcome = match by_id.get(spec.id) {
            Some(result) => (*result).clone(),
            None => CheckResult {
                check_id: spec.id.to_string(),
                passed: false,
                detail: "check was not evaluated".to_string(),
            },
        };
        outcomes.push((spec, outcome));
    }

    let score = tally(&outcomes.iter().map(|(_, r)| r.clone()).collect::<Vec<_>>());

    let bonus = registry.iter().filter(|c| c.phase == Phase::Bonus).count();
    if bonus > 0 {
        tracing::debug!(
            "Score {} includes {} always-passing bonus checks",
            score.percent,
            bonus
        );
    }

    let mut aligned_areas = Vec::new();
    let mut misaligned_areas = Vec::new();
    let mut recommendations = Recommendations::default();

    for (spec, result) in &outcomes {
        let label = format!("{}: {}", spec.id, spec.name);
        if result.passed {
            aligned_areas.push(label);
        } else {
            misaligned_areas.push(MisalignedArea::failed(label, result.detail.clone()));
            recommendations
                .tier_mut(spec.priority)
                .push(format!("{}: {}", spec.id, spec.remediation));
        }
    }

    Report {
        timestamp: format_timestamp(timestamp),
        alignment_score: score.percent,
        status: score.status,
        checks_total: score.total,
        checks_passed: score.passed,
        aligned_areas,
        misaligned_areas,
        recommendations,
        action_items: action_items(&outcomes),
    }
}

fn action_items(outcomes: &[(&CheckSpec, CheckResult)]) -> Vec<String> {
    let mut items = Vec::new();

    for priority in [Priority::High, Priority::Medium, Priority::Low] {
        for (spec, _) in outcomes
            .iter()
            .filter(|(spec, result)| !result.passed && spec.priority == priority)
        {
            items.push(format!(
                "[{}] Fix {} ({})",
                priority.to_string().to_uppercase(),
                spec.id,
                spec.name
            ));
        }
    }

    if items.is_empty() {
        items.push("Keep definitions aligned and re-run validation after any artifact change".to_string());
    }

    items
}
