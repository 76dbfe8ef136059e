use crate::domain::model::Report;
use crate::report::ReportRenderer;
use crate::utils::error::Result;

/// Machine-readable record. The field names come from the serde attributes
/// on [`Report`].
pub struct JsonRenderer {
    pretty: bool,
}

impl JsonRenderer {
    pub fn new(pretty: bool) -> Self {
        JsonRenderer { pretty }
    }
}

impl ReportRenderer for JsonRenderer {
    fn render(&self, report: &Report) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(report)?
        } else {
            serde_json::to_string(report)?
        };
        Ok(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{MisalignedArea, Recommendations, Status};

    #[test]
    fn test_record_shape() {
        let report = Report {
            timestamp: "2024-05-01T12:00:00Z".to_string(),
            alignment_score: 12,
            status: Status::NeedsWork,
            checks_total: 33,
            checks_passed: 4,
            aligned_areas: vec!["BONUS-001: Baseline credit".to_string()],
            misaligned_areas: vec![MisalignedArea::failed(
                "INV-005: Workflow configuration document present",
                "workflow.toml missing",
            )],
            recommendations: Recommendations::default(),
            action_items: vec![],
        };

        let json = JsonRenderer::new(false).render(&report).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["timestamp"], "2024-05-01T12:00:00Z");
        assert_eq!(value["status"], "needs-work");
        assert_eq!(value["checksTotal"], 33);
        assert_eq!(value["misalignedAreas"][0]["status"], "failed");
        assert_eq!(value["misalignedAreas"][0]["details"], "workflow.toml missing");
        assert_eq!(value["recommendations"]["low"], serde_json::json!([]));

        let round_trip: Report = serde_json::from_str(&json).unwrap();
        assert_eq!(round_trip, report);
    }
}
