use crate::graph::{error::Error, new_id, node::require, Graph};
use catalog_entity::identification_helper;
use sea_orm::{ActiveModelTrait, ConnectionTrait, Set};
use serde::{Deserialize, Serialize};
use tracing::instrument;

pub const CPE: &str = "cpe";

/// The metadata of a `cpe` identification helper.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CpeMetadata {
    pub cpe: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IdentificationHelperInformation {
    pub category: String,
    pub metadata: Vec<u8>,
}

impl IdentificationHelperInformation {
    pub fn new(category: impl Into<String>, metadata: impl Into<Vec<u8>>) -> Self {
        Self {
            category: category.into(),
            metadata: metadata.into(),
        }
    }

    /// Metadata serialized as JSON.
    pub fn json<T: Serialize>(category: impl Into<String>, metadata: &T) -> Result<Self, Error> {
        Ok(Self::new(category, serde_json::to_vec(metadata)?))
    }

    pub fn cpe(cpe: impl Into<String>) -> Result<Self, Error> {
        Self::json(CPE, &CpeMetadata { cpe: cpe.into() })
    }
}

impl Graph {
    /// Attach metadata to an existing node, the metadata is stored as is.
    #[instrument(skip(self, connection), err(level=tracing::Level::INFO))]
    pub async fn ingest_identification_helper<C: ConnectionTrait>(
        &self,
        node_id: &str,
        information: IdentificationHelperInformation,
        connection: &C,
    ) -> Result<identification_helper::Model, Error> {
        if information.category.is_empty() {
            return Err(Error::InvalidInput("category must not be empty".into()));
        }

        require(node_id, connection).await?;

        let model = identification_helper::ActiveModel {
            id: Set(new_id()),
            node_id: Set(node_id.to_string()),
            category: Set(information.category),
            metadata: Set(information.metadata),
        };

        Ok(model.insert(connection).await?)
    }
}
