use sea_orm::DbErr;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Database(#[from] DbErr),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("node not found: {0}")]
    NotFound(String),

    #[error("node {0} would become part of a cycle")]
    Cycle(String),

    #[error("node {0} already exists")]
    Duplicate(String),
}
