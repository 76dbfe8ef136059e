#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use hubcheck::{ReportFormat, RunConfig};
use std::path::Path;

pub const SPECIALISTS: [&str; 5] = ["coordinator", "analyst", "reviewer", "developer", "tester"];
pub const TASKS: [&str; 5] = ["analyze", "implement", "review", "test", "deploy"];

pub fn pinned_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
}

pub fn config_for(root: &Path) -> RunConfig {
    RunConfig::new(root.to_str().unwrap())
        .with_formats(vec![ReportFormat::Markdown, ReportFormat::Json])
        .with_timestamp(pinned_time())
}

pub fn write(root: &Path, name: &str, content: &str) {
    let path = root.join(name);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, content).unwrap();
}

fn stages_for(task: &str) -> &'static str {
    match task {
        "implement" => "stage: analysis\nstage: implementation\nstage: testing\nstage: review\n",
        "review" => "stage: analysis\nstage: review\n",
        "deploy" => "stage: testing\nstage: deployment\nstage: verification\n",
        _ => "",
    }
}

pub fn task_definition(task: &str, steps: usize) -> String {
    let mut text = format!(
        "# {task}\n\ncategory: delivery\nRouted through the coordinator.\n\n{}",
        stages_for(task)
    );
    for step in 1..=steps {
        text.push_str(&format!("\n## Step {step}\nDo part {step}.\n"));
    }
    text.push_str("\n## Success Criteria\nThe step outputs are reviewed.\n");
    text
}

pub fn specialist_definition(name: &str) -> String {
    match name {
        "coordinator" => {
            let mut text = String::from("# Coordinator\n\nscope: orchestration\n\n## Goal\nRoute all work.\n\n");
            for spoke in SPECIALISTS.iter().skip(1) {
                text.push_str(&format!("delegate_to: {spoke}\n"));
            }
            text
        }
        "analyst" => "# Analyst\n\nscope: read-only analysis\n\n## Goal\nExplain the code.\n".to_string(),
        "reviewer" => "# Reviewer\n\nscope: analysis-only review\n\n## Goal\nFind defects.\n".to_string(),
        other => format!("# {other}\n\nscope: {other}\n\n## Goal\nDo {other} work.\n"),
    }
}

pub const WORKFLOW_CONFIG: &str = r#"
[logging]
enabled = true

[coordinator]
enforce_hub = true

[metrics]
enabled = true

[network]
timeout_seconds = 30
"#;

/// A definition tree that passes every check.
pub fn aligned_tree(root: &Path) {
    for task in TASKS {
        write(root, &format!("tasks/{task}.md"), &task_definition(task, 3));
    }
    for specialist in SPECIALISTS {
        write(
            root,
            &format!("specialists/{specialist}.md"),
            &specialist_definition(specialist),
        );
    }
    write(root, "workflow.toml", WORKFLOW_CONFIG);
    write(root, "README.md", "# Workflows\n");
    write(root, "docs/architecture.md", "The coordinator is the hub.\n");
    write(root, "docs/workflows.md", "Feature, review and release.\n");
    write(root, "docs/troubleshooting.md", "Re-run the check.\n");
}
