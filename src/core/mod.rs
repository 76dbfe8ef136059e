pub mod engine;
pub mod evaluator;
pub mod inventory;
pub mod pipeline;
pub mod scorer;

pub use crate::domain::ports::{ConfigProvider, LoadOutcome, Pipeline, Storage};
pub use crate::utils::error::Result;
pub use engine::HealthCheckEngine;
pub use evaluator::Evaluator;
pub use inventory::InventoryScanner;
pub use pipeline::ValidationPipeline;
