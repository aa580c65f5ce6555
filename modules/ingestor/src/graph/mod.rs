pub mod error;
pub mod identification_helper;
pub mod node;
pub mod relationship;

use catalog_common::db::Database;
use sea_orm::{DatabaseTransaction, TransactionTrait};
use tracing::instrument;
use uuid::Uuid;

pub use error::Error;

/// Write access to the product graph.
///
/// All operations take the connection to run on, which may be the database itself or a
/// transaction created through [`Graph::transaction`].
#[derive(Debug, Clone)]
pub struct Graph {
    pub(crate) db: Database,
}

impl Graph {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Begin a new transaction.
    ///
    /// The transaction will be rolled-back unless explicitly `commit()`'d before it drops.
    #[instrument(skip(self), err)]
    pub async fn transaction(&self) -> Result<DatabaseTransaction, Error> {
        Ok(self.db.begin().await?)
    }

    pub fn db(&self) -> &Database {
        &self.db
    }
}

/// A fresh, opaque identifier.
pub(crate) fn new_id() -> String {
    Uuid::new_v4().to_string()
}
