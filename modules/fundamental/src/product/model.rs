use crate::Error;
use catalog_common::model::PaginatedResults;
use sea_orm::FromQueryResult;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// A node of category `product_name`, as far as the listing is concerned.
#[derive(Clone, Debug, PartialEq, Eq, FromQueryResult)]
pub struct Product {
    pub id: String,
    pub name: String,
}

/// Pagination, as requested through the query string.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListParams {
    /// The page to return, starting at 1
    #[serde(default = "default::page")]
    #[param(default = 1, minimum = 1)]
    pub page: u64,
    /// The maximum number of items per page
    #[serde(default = "default::page_size")]
    #[param(default = 20, minimum = 1, maximum = 100)]
    pub page_size: u64,
}

mod default {
    pub const fn page() -> u64 {
        1
    }

    pub const fn page_size() -> u64 {
        20
    }
}

impl Default for ListParams {
    fn default() -> Self {
        Self {
            page: default::page(),
            page_size: default::page_size(),
        }
    }
}

impl ListParams {
    pub const MAX_PAGE_SIZE: u64 = 100;

    pub fn validate(&self) -> Result<(), Error> {
        if self.page < 1 {
            return Err(Error::BadRequest("page must be at least 1".into()));
        }
        if !(1..=Self::MAX_PAGE_SIZE).contains(&self.page_size) {
            return Err(Error::BadRequest(format!(
                "pageSize must be between 1 and {}",
                Self::MAX_PAGE_SIZE
            )));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ProductDto {
    pub name: String,
}

impl From<Product> for ProductDto {
    fn from(value: Product) -> Self {
        Self { name: value.name }
    }
}

/// A page of items, echoing the requested pagination.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PagedResponse<T> {
    /// The number of items across all pages
    pub total: u64,
    pub page: u64,
    pub page_size: u64,
    pub items: Vec<T>,
}

impl<T> PagedResponse<T> {
    pub fn new(params: ListParams, results: PaginatedResults<T>) -> Self {
        Self {
            total: results.total,
            page: params.page,
            page_size: params.page_size,
            items: results.items,
        }
    }
}
