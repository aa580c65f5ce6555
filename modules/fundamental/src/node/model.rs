use catalog_entity::{
    identification_helper, node, node_category::NodeCategory, product_type::ProductType,
    relationship, relationship_category::RelationshipCategory,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::collections::HashMap;
use time::OffsetDateTime;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeSummary {
    pub id: String,
    pub category: NodeCategory,
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_type: Option<ProductType>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "time::serde::rfc3339::option"
    )]
    pub released_at: Option<OffsetDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub successor_id: Option<String>,
}

impl From<node::Model> for NodeSummary {
    fn from(value: node::Model) -> Self {
        Self {
            id: value.id,
            category: value.category,
            name: value.name,
            description: value.description,
            parent_id: value.parent_id,
            product_type: value.product_type,
            released_at: value.released_at,
            successor_id: value.successor_id,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationshipSummary {
    pub id: String,
    pub category: RelationshipCategory,
    pub source_node_id: String,
    pub target_node_id: String,
}

impl From<relationship::Model> for RelationshipSummary {
    fn from(value: relationship::Model) -> Self {
        Self {
            id: value.id,
            category: value.category,
            source_node_id: value.source_node_id,
            target_node_id: value.target_node_id,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IdentificationHelperSummary {
    pub id: String,
    pub node_id: String,
    pub category: String,
    pub metadata: Vec<u8>,
}

impl IdentificationHelperSummary {
    /// Interpret the metadata as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.metadata)
    }
}

impl From<identification_helper::Model> for IdentificationHelperSummary {
    fn from(value: identification_helper::Model) -> Self {
        Self {
            id: value.id,
            node_id: value.node_id,
            category: value.category,
            metadata: value.metadata,
        }
    }
}

/// A node and some levels of its descendants.
///
/// Nodes are kept in an arena, relations between them are lookups by id.
#[derive(Clone, Debug)]
pub struct NodeTree {
    /// Never empty, the root is at index 0.
    nodes: Vec<NodeSummary>,
    index: HashMap<String, usize>,
    children: Vec<Vec<usize>>,
}

impl NodeTree {
    pub fn new(root: NodeSummary) -> Self {
        let mut index = HashMap::new();
        index.insert(root.id.clone(), 0);

        Self {
            nodes: vec![root],
            index,
            children: vec![vec![]],
        }
    }

    /// Add a node below its parent, returns `false` if the parent isn't part of the tree, or the
    /// node already is.
    pub fn insert(&mut self, node: NodeSummary) -> bool {
        if self.index.contains_key(&node.id) {
            return false;
        }
        let Some(parent) = node
            .parent_id
            .as_ref()
            .and_then(|parent_id| self.index.get(parent_id).copied())
        else {
            return false;
        };

        let idx = self.nodes.len();
        self.index.insert(node.id.clone(), idx);
        self.nodes.push(node);
        self.children.push(vec![]);
        self.children[parent].push(idx);

        true
    }

    pub fn root(&self) -> &NodeSummary {
        &self.nodes[0]
    }

    pub fn get(&self, id: &str) -> Option<&NodeSummary> {
        self.index.get(id).map(|idx| &self.nodes[*idx])
    }

    /// The children of a node, in the order they were inserted.
    pub fn children(&self, id: &str) -> impl Iterator<Item = &NodeSummary> {
        self.index
            .get(id)
            .map(|idx| self.children[*idx].as_slice())
            .unwrap_or_default()
            .iter()
            .map(|child| &self.nodes[*child])
    }

    /// The parent of a node, if it is part of the tree.
    pub fn parent(&self, id: &str) -> Option<&NodeSummary> {
        self.get(id)?
            .parent_id
            .as_deref()
            .and_then(|parent_id| self.get(parent_id))
    }

    /// Number of nodes, the root included.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }
}
