pub mod adapters;
pub mod checks;
pub mod config;
pub mod core;
pub mod domain;
pub mod report;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::LocalStorage;
pub use config::{RunConfig, TomlConfig};
pub use self::core::{engine::HealthCheckEngine, pipeline::ValidationPipeline};
pub use domain::model::{Report, Status};
pub use domain::ports::LoadOutcome;
pub use report::{RenderedReport, ReportFormat};
pub use utils::error::{HealthCheckError, Result};

use std::time::Duration;
use utils::validation::Validate;

/// Validates the tree at `config.root` and renders every requested format.
///
/// Reports are written under `config.output_path` when it is set.
pub async fn run_validation(config: &RunConfig) -> Result<LoadOutcome> {
    config.validate()?;

    let source = LocalStorage::new(&config.root);
    let mut pipeline = ValidationPipeline::new(source, config.clone());
    if let Some(output) = &config.output_path {
        pipeline = pipeline.with_sink(LocalStorage::new(output));
    }

    HealthCheckEngine::new(pipeline).run().await
}

/// Runs [`run_validation`] on a dedicated runtime and shuts it down.
///
/// Blocking reads still pending once the run is over are abandoned after
/// `config.read_timeout_ms` instead of holding the process open.
pub fn run_validation_blocking(config: &RunConfig) -> Result<LoadOutcome> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    let result = runtime.block_on(run_validation(config));
    runtime.shutdown_timeout(Duration::from_millis(config.read_timeout_ms));
    result
}
