pub mod common;
pub mod endpoints;
pub mod error;
pub mod node;
pub mod openapi;
pub mod product;

pub use endpoints::configure;
pub use error::Error;
pub use openapi::openapi;

#[cfg(test)]
pub mod test;
