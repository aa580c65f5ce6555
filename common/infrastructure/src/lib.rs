pub mod app;
pub mod tracing;

pub use crate::tracing::Environment;
