use crate::graph::{error::Error, new_id, node::require, Graph};
use catalog_entity::{relationship, relationship_category::RelationshipCategory};
use sea_orm::{ActiveModelTrait, ConnectionTrait, Set};
use tracing::instrument;

impl Graph {
    /// Add a directed edge between two existing nodes.
    ///
    /// A node may be related to itself.
    #[instrument(skip(self, connection), err(level=tracing::Level::INFO))]
    pub async fn ingest_relationship<C: ConnectionTrait>(
        &self,
        category: RelationshipCategory,
        source_node_id: &str,
        target_node_id: &str,
        connection: &C,
    ) -> Result<relationship::Model, Error> {
        require(source_node_id, connection).await?;
        require(target_node_id, connection).await?;

        let model = relationship::ActiveModel {
            id: Set(new_id()),
            category: Set(category),
            source_node_id: Set(source_node_id.to_string()),
            target_node_id: Set(target_node_id.to_string()),
        };

        Ok(model.insert(connection).await?)
    }
}
