mod common;

use common::{aligned_tree, config_for, task_definition, write};
use hubcheck::report::check_id;
use hubcheck::{run_validation, Report, Status};
use std::path::Path;
use tempfile::TempDir;

async fn report_for(root: &Path) -> anyhow::Result<Report> {
    Ok(run_validation(&config_for(root)).await?.report)
}

fn failure<'a>(report: &'a Report, id: &str) -> Option<&'a str> {
    report
        .misaligned_areas
        .iter()
        .find(|m| check_id(&m.check) == id)
        .map(|m| m.details.as_str())
}

#[tokio::test]
async fn test_oversized_task_fails_step_limit() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    aligned_tree(temp_dir.path());
    write(temp_dir.path(), "tasks/deploy.md", &task_definition("deploy", 11));

    let report = report_for(temp_dir.path()).await?;

    let detail = failure(&report, "SCOPE-001").expect("SCOPE-001 should fail");
    assert!(detail.contains("tasks/deploy.md"));
    assert!(detail.contains("11"));
    assert_eq!(report.checks_passed, 32);
    assert_eq!(report.alignment_score, 96);
    assert_eq!(report.status, Status::Excellent);
    assert!(report.recommendations.medium.iter().any(|r| r.starts_with("SCOPE-001")));
    Ok(())
}

#[tokio::test]
async fn test_ten_steps_is_within_limit() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    aligned_tree(temp_dir.path());
    write(temp_dir.path(), "tasks/deploy.md", &task_definition("deploy", 10));

    let report = report_for(temp_dir.path()).await?;

    assert!(failure(&report, "SCOPE-001").is_none());
    Ok(())
}

#[tokio::test]
async fn test_restricted_scope_needs_both_conditions_to_fail() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    aligned_tree(temp_dir.path());

    // Marker present with a disallowed action: passes, the action is noted.
    write(
        temp_dir.path(),
        "specialists/analyst.md",
        "scope: read-only\n## Goal\nNever call write_file.\n",
    );
    // Marker missing and a disallowed action referenced: fails.
    write(
        temp_dir.path(),
        "specialists/reviewer.md",
        "scope: review\n## Goal\nRun git commit after review.\n",
    );

    let report = report_for(temp_dir.path()).await?;

    assert!(failure(&report, "BOUND-001").is_none());
    let detail = failure(&report, "BOUND-002").expect("BOUND-002 should fail");
    assert!(detail.contains("'analysis-only' marker missing"));
    assert!(detail.contains("git commit"));
    Ok(())
}

#[tokio::test]
async fn test_peer_delegation_reported_per_file() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    aligned_tree(temp_dir.path());
    write(
        temp_dir.path(),
        "specialists/developer.md",
        "scope: code\n## Goal\nShip.\nhandoff_to: tester\ndelegate_to: reviewer\n",
    );

    let report = report_for(temp_dir.path()).await?;

    let detail = failure(&report, "HUB-003").expect("HUB-003 should fail");
    assert!(detail.starts_with("2 peer delegation markers"));
    assert!(detail.contains("specialists/developer.md (2)"));
    assert!(report.action_items[0].starts_with("[HIGH] Fix HUB-003"));
    Ok(())
}

#[tokio::test]
async fn test_malformed_config_values_fail_their_checks() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    aligned_tree(temp_dir.path());
    write(
        temp_dir.path(),
        "workflow.toml",
        "[logging]\nenabled = \"yes\"\n[coordinator]\nenforce_hub = true\n[metrics]\nenabled = true\n[network]\ntimeout_seconds = 0\n",
    );

    let report = report_for(temp_dir.path()).await?;

    let logging = failure(&report, "CFG-001").expect("CFG-001 should fail");
    assert!(logging.contains("logging.enabled"));
    assert!(logging.ends_with("treated as false"));
    assert!(failure(&report, "CFG-002").is_none());
    assert!(failure(&report, "CFG-003").is_some());
    Ok(())
}

#[tokio::test]
async fn test_undecodable_definition_is_isolated() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    aligned_tree(temp_dir.path());
    std::fs::write(temp_dir.path().join("tasks/extra.md"), [0xff, 0xfe, 0x00])?;

    let report = report_for(temp_dir.path()).await?;

    assert_eq!(report.checks_total, 33);
    let detail = failure(&report, "SCOPE-002").expect("SCOPE-002 should fail");
    assert!(detail.contains("tasks/extra.md"));
    assert!(failure(&report, "INV-001").is_none());
    Ok(())
}
