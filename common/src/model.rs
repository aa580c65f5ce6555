use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One page of items, plus the number of items across all pages.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PaginatedResults<R> {
    pub items: Vec<R>,
    pub total: u64,
}

impl<R> PaginatedResults<R> {
    pub fn map<O, F>(self, f: F) -> PaginatedResults<O>
    where
        F: FnMut(R) -> O,
    {
        PaginatedResults {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
        }
    }
}

impl<R> Default for PaginatedResults<R> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            total: 0,
        }
    }
}
