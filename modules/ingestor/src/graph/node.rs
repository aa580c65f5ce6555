use crate::graph::{
    error::Error, identification_helper::IdentificationHelperInformation, new_id, Graph,
};
use catalog_entity::{
    identification_helper,
    node::{self, ParentLink, SuccessorLink},
    node_category::NodeCategory,
    product_type::ProductType,
    relationship,
    relationship_category::RelationshipCategory,
};
use sea_orm::{ActiveModelTrait, ConnectionTrait, EntityTrait, Linked, ModelTrait, Set};
use std::collections::HashSet;
use time::OffsetDateTime;
use tracing::instrument;

/// Everything needed to create a node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NodeInformation {
    /// The id to use, a new one is generated when missing.
    pub id: Option<String>,
    pub category: NodeCategory,
    pub name: String,
    pub description: String,
    pub parent_id: Option<String>,
    pub product_type: Option<ProductType>,
    pub released_at: Option<OffsetDateTime>,
    pub successor_id: Option<String>,
}

impl NodeInformation {
    pub fn new(category: NodeCategory, name: impl Into<String>) -> Self {
        Self {
            id: None,
            category,
            name: name.into(),
            description: String::new(),
            parent_id: None,
            product_type: None,
            released_at: None,
            successor_id: None,
        }
    }

    pub fn vendor(name: impl Into<String>) -> Self {
        Self::new(NodeCategory::Vendor, name)
    }

    pub fn product(name: impl Into<String>) -> Self {
        Self::new(NodeCategory::ProductName, name)
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_parent(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    pub fn with_product_type(mut self, product_type: ProductType) -> Self {
        self.product_type = Some(product_type);
        self
    }

    pub fn with_released_at(mut self, released_at: OffsetDateTime) -> Self {
        self.released_at = Some(released_at);
        self
    }

    pub fn with_successor(mut self, successor_id: impl Into<String>) -> Self {
        self.successor_id = Some(successor_id.into());
        self
    }

    /// Checks which don't require looking at the store.
    fn validate(&self) -> Result<(), Error> {
        if matches!(&self.id, Some(id) if id.is_empty()) {
            return Err(Error::InvalidInput("id must not be empty".into()));
        }
        if self.name.trim().is_empty() {
            return Err(Error::InvalidInput("name must not be empty".into()));
        }
        if self.product_type.is_some() && !self.category.is_product_level() {
            return Err(Error::InvalidInput(format!(
                "a {} must not carry a product type",
                self.category
            )));
        }
        if self.released_at.is_some() && self.category != NodeCategory::ProductVersion {
            return Err(Error::InvalidInput(format!(
                "a {} must not carry a release date",
                self.category
            )));
        }
        Ok(())
    }
}

/// A node which is known to exist.
#[derive(Clone, Debug)]
pub struct NodeContext<'g> {
    graph: &'g Graph,
    pub node: node::Model,
}

impl<'g> NodeContext<'g> {
    pub fn new(graph: &'g Graph, node: node::Model) -> Self {
        Self { graph, node }
    }

    pub fn id(&self) -> &str {
        &self.node.id
    }

    /// Create a node below this one.
    pub async fn ingest_child<C: ConnectionTrait>(
        &self,
        information: NodeInformation,
        connection: &C,
    ) -> Result<NodeContext<'g>, Error> {
        self.graph
            .ingest_node(information.with_parent(self.node.id.clone()), connection)
            .await
    }

    pub async fn ingest_identification_helper<C: ConnectionTrait>(
        &self,
        information: IdentificationHelperInformation,
        connection: &C,
    ) -> Result<identification_helper::Model, Error> {
        self.graph
            .ingest_identification_helper(&self.node.id, information, connection)
            .await
    }

    /// Add an edge from this node to `target`.
    pub async fn relate_to<C: ConnectionTrait>(
        &self,
        category: RelationshipCategory,
        target: &str,
        connection: &C,
    ) -> Result<relationship::Model, Error> {
        self.graph
            .ingest_relationship(category, &self.node.id, target, connection)
            .await
    }
}

impl Graph {
    #[instrument(skip(self, connection), err(level=tracing::Level::INFO))]
    pub async fn get_node<C: ConnectionTrait>(
        &self,
        id: &str,
        connection: &C,
    ) -> Result<Option<NodeContext<'_>>, Error> {
        Ok(node::Entity::find_by_id(id)
            .one(connection)
            .await?
            .map(|node| NodeContext::new(self, node)))
    }

    #[instrument(skip(self, connection), err(level=tracing::Level::INFO))]
    pub async fn ingest_node<C: ConnectionTrait>(
        &self,
        information: NodeInformation,
        connection: &C,
    ) -> Result<NodeContext<'_>, Error> {
        information.validate()?;

        let id = information.id.unwrap_or_else(new_id);

        if node::Entity::find_by_id(&id).one(connection).await?.is_some() {
            return Err(Error::Duplicate(id));
        }

        if let Some(parent_id) = &information.parent_id {
            require(parent_id, connection).await?;
        }

        if let Some(successor_id) = &information.successor_id {
            let successor = require(successor_id, connection).await?;
            check_successor_category(information.category, &successor)?;
        }

        let model = node::ActiveModel {
            id: Set(id),
            category: Set(information.category),
            name: Set(information.name),
            description: Set(information.description),
            parent_id: Set(information.parent_id),
            product_type: Set(information.product_type),
            released_at: Set(information.released_at),
            successor_id: Set(information.successor_id),
        };

        let node = model.insert(connection).await?;
        log::debug!("ingested {} {}", node.category, node.id);

        Ok(NodeContext::new(self, node))
    }

    /// Move a node below another one, or make it a root when `parent_id` is `None`.
    #[instrument(skip(self, connection), err(level=tracing::Level::INFO))]
    pub async fn set_parent<C: ConnectionTrait>(
        &self,
        id: &str,
        parent_id: Option<&str>,
        connection: &C,
    ) -> Result<node::Model, Error> {
        let node = require(id, connection).await?;

        if let Some(parent_id) = parent_id {
            let parent = require(parent_id, connection).await?;
            if reaches(id, parent, ParentLink, connection).await? {
                return Err(Error::Cycle(id.to_string()));
            }
        }

        let mut model: node::ActiveModel = node.into();
        model.parent_id = Set(parent_id.map(ToString::to_string));
        Ok(model.update(connection).await?)
    }

    /// Mark a node as superseded by another one, or clear that when `successor_id` is `None`.
    #[instrument(skip(self, connection), err(level=tracing::Level::INFO))]
    pub async fn set_successor<C: ConnectionTrait>(
        &self,
        id: &str,
        successor_id: Option<&str>,
        connection: &C,
    ) -> Result<node::Model, Error> {
        let node = require(id, connection).await?;

        if let Some(successor_id) = successor_id {
            let successor = require(successor_id, connection).await?;
            check_successor_category(node.category, &successor)?;
            if reaches(id, successor, SuccessorLink, connection).await? {
                return Err(Error::Cycle(id.to_string()));
            }
        }

        let mut model: node::ActiveModel = node.into();
        model.successor_id = Set(successor_id.map(ToString::to_string));
        Ok(model.update(connection).await?)
    }

    /// Delete a node, returns `false` if there was none.
    ///
    /// Relationships and identification helpers of the node are removed by the store, children
    /// and predecessors lose their reference to it.
    #[instrument(skip(self, connection), err(level=tracing::Level::INFO))]
    pub async fn delete_node<C: ConnectionTrait>(
        &self,
        id: &str,
        connection: &C,
    ) -> Result<bool, Error> {
        let result = node::Entity::delete_by_id(id).exec(connection).await?;
        Ok(result.rows_affected > 0)
    }
}

pub(crate) async fn require<C: ConnectionTrait>(
    id: &str,
    connection: &C,
) -> Result<node::Model, Error> {
    node::Entity::find_by_id(id)
        .one(connection)
        .await?
        .ok_or_else(|| Error::NotFound(id.to_string()))
}

fn check_successor_category(category: NodeCategory, successor: &node::Model) -> Result<(), Error> {
    if successor.category != category {
        return Err(Error::InvalidInput(format!(
            "a {category} can't be succeeded by a {}",
            successor.category
        )));
    }
    Ok(())
}

/// Follow `link` starting at `start`, checking if `id` shows up along the way.
async fn reaches<L, C>(id: &str, start: node::Model, link: L, connection: &C) -> Result<bool, Error>
where
    L: Linked<FromEntity = node::Entity, ToEntity = node::Entity> + Copy,
    C: ConnectionTrait,
{
    let mut seen = HashSet::new();
    let mut current = Some(start);

    while let Some(node) = current {
        if node.id == id {
            return Ok(true);
        }
        if !seen.insert(node.id.clone()) {
            // an existing loop, which doesn't pass through `id`
            break;
        }
        current = node.find_linked(link).one(connection).await?;
    }

    Ok(false)
}
