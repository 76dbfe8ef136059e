use crate::domain::ports::{LoadOutcome, Pipeline};
use crate::utils::error::Result;

pub struct HealthCheckEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> HealthCheckEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<LoadOutcome> {
        tracing::info!("Starting health check...");

        tracing::debug!("Building inventory...");
        let inventory = self.pipeline.extract().await?;
        tracing::info!(
            "Inventory holds {} artifacts ({} present)",
            inventory.artifacts.len(),
            inventory.artifacts.values().filter(|a| a.exists).count()
        );

        tracing::debug!("Evaluating checks...");
        let report = self.pipeline.transform(inventory).await?;
        tracing::info!(
            "Score {}/100 ({}), {}/{} checks passed",
            report.alignment_score,
            report.status,
            report.checks_passed,
            report.checks_total
        );

        tracing::debug!("Rendering reports...");
        let outcome = self.pipeline.load(report).await?;
        tracing::info!("Produced {} report(s)", outcome.outputs.len());

        Ok(outcome)
    }
}
