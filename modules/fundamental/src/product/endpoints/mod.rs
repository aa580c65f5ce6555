
use crate::{
    product::{
        model::{ListParams, PagedResponse, ProductDto},
        service::ProductService,
    },
    Error,
};
use actix_web::{error::InternalError, get, web, HttpResponse, Responder};
use catalog_common::{db::Database, error::ErrorInformation};
use tokio_util::sync::CancellationToken;
use utoipa::OpenApi;

pub const CONTEXT_PATH: &str = "/products";

#[derive(OpenApi)]
#[openapi(paths(list), tags((name = "product", description = "The product listing")))]
pub struct ApiDoc;

pub fn configure(config: &mut web::ServiceConfig, db: Database) {
    let service = ProductService::new(db);
    config.service(
        web::scope(CONTEXT_PATH)
            .app_data(web::Data::new(service))
            .app_data(query_config())
            .service(list),
    );
}

/// Report malformed query strings the same way as invalid values.
fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| {
        let response = HttpResponse::BadRequest().json(ErrorInformation::new("bad_request", &err));
        InternalError::from_response(err, response).into()
    })
}

#[utoipa::path(
    get,
    path = "/products/",
    tag = "product",
    operation_id = "listProducts",
    params(ListParams),
    responses(
        (status = 200, description = "One page of products", body = PagedResponse<ProductDto>),
        (status = 400, description = "Invalid pagination", body = ErrorInformation),
        (status = 500, description = "The products could not be read", body = ErrorInformation),
    ),
)]
#[get("/")]
pub async fn list(
    service: web::Data<ProductService>,
    web::Query(params): web::Query<ListParams>,
) -> Result<impl Responder, Error> {
    params.validate()?;

    // trips when actix drops this future, e.g. when the client goes away
    let token = CancellationToken::new();
    let _guard = token.clone().drop_guard();

    let products = service.list(&token, params.page, params.page_size).await?;

    Ok(HttpResponse::Ok().json(PagedResponse::new(params, products.map(ProductDto::from))))
}
