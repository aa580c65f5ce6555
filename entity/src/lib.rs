pub mod identification_helper;
pub mod node;
pub mod node_category;
pub mod product_type;
pub mod relationship;
pub mod relationship_category;
