use sea_orm::entity::prelude::*;

#[derive(
    Debug,
    Copy,
    Clone,
    Hash,
    PartialEq,
    Eq,
    EnumIter,
    DeriveActiveEnum,
    strum::Display,
    strum::EnumString,
    strum::VariantArray,
    serde::Serialize,
    serde::Deserialize,
    utoipa::ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum NodeCategory {
    #[sea_orm(string_value = "vendor")]
    Vendor,
    #[sea_orm(string_value = "product_family")]
    ProductFamily,
    #[sea_orm(string_value = "product_name")]
    ProductName,
    #[sea_orm(string_value = "product_version")]
    ProductVersion,
}

impl NodeCategory {
    /// Everything below a vendor is a product-level node, and may carry a product type.
    pub fn is_product_level(&self) -> bool {
        !matches!(self, Self::Vendor)
    }
}
