#[cfg(test)]
mod test;

use crate::{
    node::model::{IdentificationHelperSummary, NodeSummary, NodeTree, RelationshipSummary},
    Error,
};
use catalog_common::db::Database;
use catalog_entity::{
    identification_helper,
    node::{self, SuccessorLink},
    relationship,
};
use sea_orm::{ColumnTrait, Condition, EntityTrait, ModelTrait, QueryFilter, QueryOrder};
use std::collections::HashSet;
use tracing::instrument;

/// Read access to the product hierarchy.
#[derive(Clone, Debug)]
pub struct NodeService {
    db: Database,
}

impl NodeService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    #[instrument(skip(self), err(level=tracing::Level::INFO))]
    pub async fn fetch_node(&self, id: &str) -> Result<Option<NodeSummary>, Error> {
        Ok(node::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .map(NodeSummary::from))
    }

    /// Load a node, and up to `depth` levels of its descendants.
    ///
    /// Issues one query per level.
    #[instrument(skip(self), err(level=tracing::Level::INFO))]
    pub async fn fetch_tree(&self, id: &str, depth: usize) -> Result<Option<NodeTree>, Error> {
        let Some(root) = self.fetch_node(id).await? else {
            return Ok(None);
        };

        let mut level = vec![root.id.clone()];
        let mut tree = NodeTree::new(root);

        for _ in 0..depth {
            if level.is_empty() {
                break;
            }

            let children = node::Entity::find()
                .filter(node::Column::ParentId.is_in(level))
                .order_by_asc(node::Column::Id)
                .all(&self.db)
                .await?;

            level = Vec::with_capacity(children.len());
            for child in children {
                let id = child.id.clone();
                if tree.insert(child.into()) {
                    level.push(id);
                }
            }
        }

        Ok(Some(tree))
    }

    /// The ids of the nodes superseding `id`, the direct successor first.
    #[instrument(skip(self), err(level=tracing::Level::INFO))]
    pub async fn fetch_successors(&self, id: &str) -> Result<Vec<String>, Error> {
        let mut result = Vec::new();
        let mut seen = HashSet::from([id.to_string()]);

        let mut current = node::Entity::find_by_id(id).one(&self.db).await?;
        while let Some(node) = current {
            current = node.find_linked(SuccessorLink).one(&self.db).await?;
            if let Some(successor) = &current {
                if !seen.insert(successor.id.clone()) {
                    break;
                }
                result.push(successor.id.clone());
            }
        }

        Ok(result)
    }

    /// All relationships starting or ending at a node.
    #[instrument(skip(self), err(level=tracing::Level::INFO))]
    pub async fn fetch_relationships(
        &self,
        node_id: &str,
    ) -> Result<Vec<RelationshipSummary>, Error> {
        Ok(relationship::Entity::find()
            .filter(
                Condition::any()
                    .add(relationship::Column::SourceNodeId.eq(node_id))
                    .add(relationship::Column::TargetNodeId.eq(node_id)),
            )
            .order_by_asc(relationship::Column::Id)
            .all(&self.db)
            .await?
            .into_iter()
            .map(RelationshipSummary::from)
            .collect())
    }

    #[instrument(skip(self), err(level=tracing::Level::INFO))]
    pub async fn fetch_identification_helpers(
        &self,
        node_id: &str,
    ) -> Result<Vec<IdentificationHelperSummary>, Error> {
        Ok(identification_helper::Entity::find()
            .filter(identification_helper::Column::NodeId.eq(node_id))
            .order_by_asc(identification_helper::Column::Id)
            .all(&self.db)
            .await?
            .into_iter()
            .map(IdentificationHelperSummary::from)
            .collect())
    }
}
