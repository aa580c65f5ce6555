use actix_web::web;
use catalog_common::db::Database;

/// Register all routes of the catalog.
pub fn configure(svc: &mut web::ServiceConfig, db: Database) {
    crate::product::endpoints::configure(svc, db);
}
