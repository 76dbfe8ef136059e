use crate::checks::registry;
use crate::core::evaluator::Evaluator;
use crate::core::inventory::InventoryScanner;
use crate::core::scorer::build_report;
use crate::domain::model::{Inventory, Report};
use crate::domain::ports::{ConfigProvider, LoadOutcome, Pipeline, Storage};
use crate::report::{get_renderer, RenderedReport};
use crate::utils::error::Result;
use chrono::Utc;
use std::path::Path;
use std::sync::Arc;

/// Inventory, evaluation and rendering over one definition tree.
///
/// `source` is the tree being checked. Reports are written to `sink` when one
/// is given; otherwise they are only returned in the [`LoadOutcome`].
pub struct ValidationPipeline<S: Storage, C: ConfigProvider> {
    source: S,
    sink: Option<S>,
    config: C,
}

impl<S: Storage + Clone + 'static, C: ConfigProvider> ValidationPipeline<S, C> {
    pub fn new(source: S, config: C) -> Self {
        Self {
            source,
            sink: None,
            config,
        }
    }

    pub fn with_sink(mut self, sink: S) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn config(&self) -> &C {
        &self.config
    }
}

#[async_trait::async_trait]
impl<S: Storage + Clone + 'static, C: ConfigProvider> Pipeline for ValidationPipeline<S, C> {
    async fn extract(&self) -> Result<Inventory> {
        tracing::debug!("Scanning definition tree at {}", self.source.describe());
        InventoryScanner::new(self.source.clone(), self.config.read_timeout_ms())
            .scan()
            .await
    }

    async fn transform(&self, inventory: Inventory) -> Result<Report> {
        let registry = registry();
        let evaluator = Evaluator::new(self.config.parallel(), self.config.max_concurrency());
        let results = evaluator.evaluate(registry, Arc::new(inventory)).await;

        let timestamp = self.config.timestamp().unwrap_or_else(Utc::now);
        Ok(build_report(registry, &results, timestamp))
    }

    async fn load(&self, report: Report) -> Result<LoadOutcome> {
        let mut outputs = Vec::with_capacity(self.config.formats().len());

        for format in self.config.formats() {
            let content = get_renderer(*format).render(&report)?;

            let path = match &self.sink {
                Some(sink) => {
                    sink.write_file(format.file_name(), content.as_bytes()).await?;
                    let path = Path::new(&sink.describe()).join(format.file_name());
                    tracing::info!("Wrote {} report to {}", format, path.display());
                    Some(path.display().to_string())
                }
                None => None,
            };

            outputs.push(RenderedReport {
                format: *format,
                content,
                path,
            });
        }

        Ok(LoadOutcome { report, outputs })
    }
}
