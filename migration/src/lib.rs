//! Schema reconciliation driven by entity definitions.
//!
//! Instead of an ordered list of hand-written migration steps, the store is brought in line with
//! whatever set of entities the caller hands in: missing tables are created, missing columns are
//! added, and declared indexes are created. Nothing is ever dropped or rewritten, so running
//! [`migrate`] repeatedly with the same set of entities is a no-op after the first run.

use sea_orm::{
    sea_query::{Alias, IndexCreateStatement, Table, TableCreateStatement},
    ConnectionTrait, DatabaseConnection, DbErr, EntityTrait, Schema,
};
use sea_orm_migration::SchemaManager;
use tracing::instrument;

#[derive(Debug, thiserror::Error)]
pub enum MigrationError {
    #[error("failed to migrate table '{table}'")]
    Failed {
        table: String,
        #[source]
        source: DbErr,
    },
}

impl MigrationError {
    pub fn table(&self) -> &str {
        match self {
            Self::Failed { table, .. } => table,
        }
    }
}

/// Something the migrator can reconcile with the store.
///
/// Implemented for every sea-orm entity, so a list of entities can be passed as
/// `&[&node::Entity, &relationship::Entity]`.
pub trait EntityDescriptor: Send + Sync {
    /// Name of the backing table.
    fn table(&self) -> String;

    /// The full `CREATE TABLE` statement, including primary and foreign keys.
    fn table_statement(&self, schema: &Schema) -> TableCreateStatement;

    /// `CREATE INDEX` statements for all indexed columns.
    fn index_statements(&self, schema: &Schema) -> Vec<IndexCreateStatement>;
}

impl<E> EntityDescriptor for E
where
    E: EntityTrait,
{
    fn table(&self) -> String {
        self.table_name().to_string()
    }

    fn table_statement(&self, schema: &Schema) -> TableCreateStatement {
        schema.create_table_from_entity(*self)
    }

    fn index_statements(&self, schema: &Schema) -> Vec<IndexCreateStatement> {
        schema.create_index_from_entity(*self)
    }
}

/// Bring the store in line with the provided entities.
///
/// Entities are processed in order. An empty list is a no-op.
#[instrument(skip_all, fields(entities = entities.len()), err)]
pub async fn migrate(
    db: &DatabaseConnection,
    entities: &[&dyn EntityDescriptor],
) -> Result<(), MigrationError> {
    let schema = Schema::new(db.get_database_backend());
    let manager = SchemaManager::new(db);

    for entity in entities {
        reconcile(&manager, &schema, *entity).await?;
    }

    Ok(())
}

async fn reconcile(
    manager: &SchemaManager<'_>,
    schema: &Schema,
    entity: &dyn EntityDescriptor,
) -> Result<(), MigrationError> {
    let table = entity.table();
    let failed = |source: DbErr| MigrationError::Failed {
        table: table.clone(),
        source,
    };

    let statement = entity.table_statement(schema);

    if manager.has_table(&table).await.map_err(failed)? {
        for column in statement.get_columns() {
            let name = column.get_column_name();
            if manager.has_column(&table, &name).await.map_err(failed)? {
                continue;
            }

            log::info!("adding column '{name}' to table '{table}'");
            manager
                .alter_table(
                    Table::alter()
                        .table(Alias::new(&table))
                        .add_column(column.clone())
                        .to_owned(),
                )
                .await
                .map_err(failed)?;
        }
    } else {
        log::info!("creating table '{table}'");
        manager.create_table(statement).await.map_err(failed)?;
    }

    for mut index in entity.index_statements(schema) {
        index.if_not_exists();
        manager.create_index(index).await.map_err(failed)?;
    }

    log::debug!("table '{table}' is up to date");

    Ok(())
}
