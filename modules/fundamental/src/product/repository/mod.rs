
use crate::{common::cancellable, product::model::Product, Error};
use catalog_common::{
    db::{limiter::LimiterAsModelTrait, Database},
    model::PaginatedResults,
};
use catalog_entity::{node, node_category::NodeCategory};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect};
use tokio_util::sync::CancellationToken;
use tracing::instrument;

/// SQLite binds integers as signed 64 bit values.
const MAX_BOUND: u64 = i64::MAX as u64;

/// Reads products from the store.
#[derive(Clone, Debug)]
pub struct ProductRepository {
    db: Database,
}

impl ProductRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// List one page of products, newest id first, together with the number of all products.
    ///
    /// `page` starts at 1. Counting and fetching are two statements, a concurrent writer may
    /// cause the total to disagree with the pages.
    #[instrument(skip(self, token), err(level=tracing::Level::INFO))]
    pub async fn list(
        &self,
        token: &CancellationToken,
        page: u64,
        size: u64,
    ) -> Result<PaginatedResults<Product>, Error> {
        if page == 0 || size == 0 {
            return Err(Error::BadRequest("page and size must be positive".into()));
        }

        // an offset that overflows lies past the last page either way
        let offset = (page - 1).checked_mul(size);

        let limiter = node::Entity::find()
            .select_only()
            .column(node::Column::Id)
            .column(node::Column::Name)
            .filter(node::Column::Category.eq(NodeCategory::ProductName))
            .order_by_desc(node::Column::Id)
            .limiting_as::<Product>(
                &self.db,
                offset.unwrap_or(MAX_BOUND).min(MAX_BOUND),
                size.min(MAX_BOUND),
            );

        let total = cancellable(token, limiter.total()).await?;
        let items = match offset {
            Some(offset) if offset < total => cancellable(token, limiter.fetch()).await?,
            _ => Vec::new(),
        };

        log::debug!("page {page} of {size}: {} of {total}", items.len());

        Ok(PaginatedResults { items, total })
    }
}
