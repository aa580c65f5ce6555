#![allow(clippy::expect_used)]

pub mod call;

use catalog_common::{config, db::Database};
use catalog_module_ingestor::graph::Graph;
use tempfile::TempDir;
use test_context::AsyncTestContext;
use tracing::instrument;

/// A migrated, file-backed database, living in a temporary directory.
pub struct CatalogContext {
    pub db: Database,
    pub graph: Graph,
    /// The directory holding the database file, removed on drop.
    _tempdir: TempDir,
}

impl CatalogContext {
    async fn new() -> Self {
        let tempdir = tempfile::tempdir().expect("creating a temporary directory");
        let config = config::Database::new(tempdir.path().join("catalog.db"));

        let db = Database::new(&config)
            .await
            .expect("opening the database");
        db.migrate().await.expect("migrating the database");

        let graph = Graph::new(db.clone());

        Self {
            db,
            graph,
            _tempdir: tempdir,
        }
    }
}

impl AsyncTestContext for CatalogContext {
    #[instrument]
    async fn setup() -> CatalogContext {
        CatalogContext::new().await
    }

    async fn teardown(self) {
        if let Err(err) = self.db.close().await {
            log::warn!("Failed to close the database: {err}");
        }
    }
}

impl std::fmt::Debug for CatalogContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogContext")
            .field("path", &self._tempdir.path())
            .finish_non_exhaustive()
    }
}
