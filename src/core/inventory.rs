//! Artifact discovery.
//!
//! Builds the immutable [`Inventory`] snapshot the checks run against. Every
//! expected location produces an artifact whether or not the file exists, and
//! every `*.md` definition found under the category directories is added on
//! top. Reads run concurrently, each bounded by a timeout; a read that fails
//! or times out leaves the artifact marked as missing.

use crate::domain::model::{Artifact, ArtifactKind, Inventory};
use crate::domain::ports::Storage;
use crate::utils::error::{HealthCheckError, Result};
use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;
use tokio::task::JoinSet;

/// Expected locations, versioned so reports can be tied to the layout they checked.
pub mod layout {
    pub const LAYOUT_VERSION: u32 = 1;

    pub const TASKS_DIR: &str = "tasks";
    pub const SPECIALISTS_DIR: &str = "specialists";
    pub const DEFINITION_EXTENSION: &str = ".md";

    pub const COORDINATOR: &str = "specialists/coordinator.md";
    pub const CONFIG_DOCUMENT: &str = "workflow.toml";

    pub const EXPECTED_TASKS: [&str; 5] = [
        "tasks/analyze.md",
        "tasks/implement.md",
        "tasks/review.md",
        "tasks/test.md",
        "tasks/deploy.md",
    ];

    pub const EXPECTED_SPECIALISTS: [&str; 5] = [
        COORDINATOR,
        "specialists/analyst.md",
        "specialists/reviewer.md",
        "specialists/developer.md",
        "specialists/tester.md",
    ];

    pub const DOCUMENTATION: [&str; 4] = [
        "README.md",
        "docs/architecture.md",
        "docs/workflows.md",
        "docs/troubleshooting.md",
    ];
}

pub struct InventoryScanner<S: Storage> {
    storage: S,
    read_timeout: Duration,
}

impl<S: Storage + Clone + 'static> InventoryScanner<S> {
    pub fn new(storage: S, read_timeout_ms: u64) -> Self {
        Self {
            storage,
            read_timeout: Duration::from_millis(read_timeout_ms),
        }
    }

    pub async fn scan(&self) -> Result<Inventory> {
        let root = self.storage.describe();
        match tokio::time::timeout(self.read_timeout, self.storage.is_dir("")).await {
            Ok(true) => {}
            Ok(false) => {
                return Err(HealthCheckError::CatastrophicIo {
                    root,
                    reason: "not a readable directory".to_string(),
                })
            }
            Err(_) => {
                return Err(HealthCheckError::CatastrophicIo {
                    root,
                    reason: format!("no response within {}ms", self.read_timeout.as_millis()),
                })
            }
        }

        let targets = self.collect_targets().await;
        tracing::debug!("Inventory targets: {}", targets.len());

        let mut reads = JoinSet::new();
        for (name, kind) in &targets {
            let storage = self.storage.clone();
            let name = name.clone();
            let kind = *kind;
            let read_timeout = self.read_timeout;
            let full_path = Path::new(&root).join(&name);

            reads.spawn(async move {
                let artifact = match tokio::time::timeout(read_timeout, storage.read_file(&name)).await {
                    Ok(Ok(bytes)) => Artifact::from_bytes(name.clone(), full_path, kind, bytes),
                    Ok(Err(HealthCheckError::IoError(e))) if e.kind() == std::io::ErrorKind::NotFound => {
                        tracing::debug!("Artifact not found: {}", name);
                        Artifact::missing(name.clone(), full_path, kind)
                    }
                    Ok(Err(e)) => {
                        tracing::warn!("Failed to read {}: {}", name, e);
                        Artifact::missing(name.clone(), full_path, kind)
                    }
                    Err(_) => {
                        tracing::warn!(
                            "Read of {} timed out after {}ms, treating as missing",
                            name,
                            read_timeout.as_millis()
                        );
                        Artifact::missing(name.clone(), full_path, kind)
                    }
                };
                (name, artifact)
            });
        }

        let mut artifacts = BTreeMap::new();
        while let Some(joined) = reads.join_next().await {
            match joined {
                Ok((name, artifact)) => {
                    artifacts.insert(name, artifact);
                }
                Err(e) => tracing::warn!("Artifact read task aborted: {}", e),
            }
        }

        // An aborted read still leaves its artifact in the snapshot.
        for (name, kind) in targets {
            artifacts
                .entry(name.clone())
                .or_insert_with(|| Artifact::missing(name.clone(), Path::new(&root).join(&name), kind));
        }

        let mut category_counts = BTreeMap::new();
        for artifact in artifacts.values().filter(|a| a.exists) {
            *category_counts.entry(artifact.kind).or_insert(0) += 1;
        }

        tracing::info!(
            "Inventory built: {} artifacts ({} present)",
            artifacts.len(),
            artifacts.values().filter(|a| a.exists).count()
        );

        Ok(Inventory {
            root: root.into(),
            layout_version: layout::LAYOUT_VERSION,
            artifacts,
            category_counts,
        })
    }

    async fn collect_targets(&self) -> BTreeMap<String, ArtifactKind> {
        let mut targets = BTreeMap::new();

        for name in layout::EXPECTED_TASKS {
            targets.insert(name.to_string(), ArtifactKind::Task);
        }
        for name in layout::EXPECTED_SPECIALISTS {
            targets.insert(name.to_string(), ArtifactKind::Specialist);
        }
        targets.insert(layout::CONFIG_DOCUMENT.to_string(), ArtifactKind::Config);
        for name in layout::DOCUMENTATION {
            targets.insert(name.to_string(), ArtifactKind::Doc);
        }

        for (dir, kind) in [
            (layout::TASKS_DIR, ArtifactKind::Task),
            (layout::SPECIALISTS_DIR, ArtifactKind::Specialist),
        ] {
            match tokio::time::timeout(self.read_timeout, self.storage.list_dir(dir)).await {
                Ok(Ok(files)) => {
                    for file in files
                        .into_iter()
                        .filter(|f| f.ends_with(layout::DEFINITION_EXTENSION))
                    {
                        targets.insert(format!("{}/{}", dir, file), kind);
                    }
                }
                Ok(Err(e)) => tracing::debug!("No {} directory to scan: {}", dir, e),
                Err(_) => tracing::warn!(
                    "Listing {} timed out after {}ms, scanning expected names only",
                    dir,
                    self.read_timeout.as_millis()
                ),
            }
        }

        targets
    }
}
