use crate::{
    product::{model::Product, repository::ProductRepository},
    Error,
};
use catalog_common::{db::Database, model::PaginatedResults};
use tokio_util::sync::CancellationToken;

/// Business rules for products go here, storage access goes to the [`ProductRepository`].
#[derive(Clone, Debug)]
pub struct ProductService {
    repository: ProductRepository,
}

impl ProductService {
    pub fn new(db: Database) -> Self {
        Self::with_repository(ProductRepository::new(db))
    }

    pub fn with_repository(repository: ProductRepository) -> Self {
        Self { repository }
    }

    pub async fn list(
        &self,
        token: &CancellationToken,
        page: u64,
        size: u64,
    ) -> Result<PaginatedResults<Product>, Error> {
        self.repository.list(token, page, size).await
    }
}
