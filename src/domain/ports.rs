use crate::domain::model::{Inventory, Report};
use crate::report::{ReportFormat, RenderedReport};
use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Read/write access to a directory tree. Paths are relative to the storage base.
pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    /// Names of the regular files directly inside `dir`, sorted.
    fn list_dir(&self, dir: &str) -> impl std::future::Future<Output = Result<Vec<String>>> + Send;
    fn is_dir(&self, path: &str) -> impl std::future::Future<Output = bool> + Send;
    fn describe(&self) -> String;
}

pub trait ConfigProvider: Send + Sync {
    fn root(&self) -> &str;
    fn output_path(&self) -> Option<&str>;
    fn formats(&self) -> &[ReportFormat];
    fn parallel(&self) -> bool;
    fn max_concurrency(&self) -> usize;
    fn read_timeout_ms(&self) -> u64;
    /// Pinned report timestamp; `None` means the time of the run.
    fn timestamp(&self) -> Option<DateTime<Utc>>;
}

/// Result of the load stage: the report and every rendering of it.
#[derive(Debug, Clone)]
pub struct LoadOutcome {
    pub report: Report,
    pub outputs: Vec<RenderedReport>,
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Inventory>;
    async fn transform(&self, inventory: Inventory) -> Result<Report>;
    async fn load(&self, report: Report) -> Result<LoadOutcome>;
}
