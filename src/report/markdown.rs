use crate::domain::model::Report;
use crate::report::{check_id, next_steps, ReportRenderer};
use crate::utils::error::Result;
use std::collections::BTreeSet;

const ALIGNED_PREFIX: &str = "- [x] ";
const MISALIGNED_PREFIX: &str = "- [ ] ";

/// Human-readable document with fixed section headers.
pub struct MarkdownRenderer;

impl MarkdownRenderer {
    fn list(output: &mut String, items: &[String]) {
        if items.is_empty() {
            output.push_str("_None_\n");
        }
        for item in items {
            output.push_str(&format!("- {}\n", single_line(item)));
        }
    }
}

/// Keeps a value on one list line; artifact names may contain line breaks.
pub fn single_line(text: &str) -> String {
    text.replace('\r', "\\r").replace('\n', "\\n")
}

impl ReportRenderer for MarkdownRenderer {
    fn render(&self, report: &Report) -> Result<String> {
        let mut output = String::new();

        output.push_str("# Hub-and-Spoke Alignment Report\n\n");
        output.push_str(&format!("- **Timestamp:** {}\n", report.timestamp));
        output.push_str(&format!("- **Alignment Score:** {}/100\n", report.alignment_score));
        output.push_str(&format!("- **Status:** {}\n", report.status));
        output.push_str(&format!(
            "- **Checks Passed:** {}/{}\n\n",
            report.checks_passed, report.checks_total
        ));

        output.push_str("## Aligned Areas\n\n");
        if report.aligned_areas.is_empty() {
            output.push_str("_None_\n");
        }
        for area in &report.aligned_areas {
            output.push_str(&format!("{}{}\n", ALIGNED_PREFIX, single_line(area)));
        }
        output.push('\n');

        output.push_str("## Misaligned Areas\n\n");
        if report.misaligned_areas.is_empty() {
            output.push_str("_None_\n");
        }
        for area in &report.misaligned_areas {
            output.push_str(&format!("{}{}\n", MISALIGNED_PREFIX, single_line(&area.check)));
            output.push_str(&format!("  - {}: {}\n", area.status, single_line(&area.details)));
        }
        output.push('\n');

        output.push_str("## Recommendations\n\n");
        output.push_str("### High Priority\n\n");
        Self::list(&mut output, &report.recommendations.high);
        output.push_str("\n### Medium Priority\n\n");
        Self::list(&mut output, &report.recommendations.medium);
        output.push_str("\n### Low Priority\n\n");
        Self::list(&mut output, &report.recommendations.low);
        output.push('\n');

        output.push_str("## Action Items\n\n");
        for (index, item) in report.action_items.iter().enumerate() {
            output.push_str(&format!("{}. {}\n", index + 1, single_line(item)));
        }
        if report.action_items.is_empty() {
            output.push_str("_None_\n");
        }
        output.push('\n');

        output.push_str(&format!("## Next Steps ({})\n\n", report.status));
        for step in next_steps(report.status) {
            output.push_str(&format!("- {}\n", step));
        }

        Ok(output)
    }
}

/// Check ids listed under "Misaligned Areas" in a rendered document.
pub fn misaligned_ids(document: &str) -> BTreeSet<String> {
    document
        .lines()
        .filter_map(|line| line.strip_prefix(MISALIGNED_PREFIX))
        .map(|label| check_id(label).to_string())
        .collect()
}

/// Check ids listed under "Aligned Areas" in a rendered document.
pub fn aligned_ids(document: &str) -> BTreeSet<String> {
    document
        .lines()
        .filter_map(|line| line.strip_prefix(ALIGNED_PREFIX))
        .map(|label| check_id(label).to_string())
        .collect()
}
