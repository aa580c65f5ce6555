use crate::{node_category::NodeCategory, product_type::ProductType};
use sea_orm::entity::prelude::*;
use time::OffsetDateTime;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "nodes")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    #[sea_orm(indexed)]
    pub category: NodeCategory,
    pub name: String,
    pub description: String,
    #[sea_orm(indexed)]
    pub parent_id: Option<String>,
    pub product_type: Option<ProductType>,
    pub released_at: Option<OffsetDateTime>,
    pub successor_id: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "Entity",
        from = "Column::ParentId",
        to = "Column::Id",
        on_delete = "SetNull"
    )]
    Parent,
    #[sea_orm(
        belongs_to = "Entity",
        from = "Column::SuccessorId",
        to = "Column::Id",
        on_delete = "SetNull"
    )]
    Successor,
    #[sea_orm(has_many = "super::identification_helper::Entity")]
    IdentificationHelper,
}

impl Related<super::identification_helper::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::IdentificationHelper.def()
    }
}

/// Walks from a node up to its parent.
#[derive(Clone, Copy, Debug)]
pub struct ParentLink;

impl Linked for ParentLink {
    type FromEntity = Entity;
    type ToEntity = Entity;

    fn link(&self) -> Vec<RelationDef> {
        vec![Relation::Parent.def()]
    }
}

/// Walks from a node to the node superseding it.
#[derive(Clone, Copy, Debug)]
pub struct SuccessorLink;

impl Linked for SuccessorLink {
    type FromEntity = Entity;
    type ToEntity = Entity;

    fn link(&self) -> Vec<RelationDef> {
        vec![Relation::Successor.def()]
    }
}

impl ActiveModelBehavior for ActiveModel {}
