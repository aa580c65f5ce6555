use actix_http::Request;
use actix_web::{
    dev::{Service, ServiceResponse},
    Error,
};
use serde::de::DeserializeOwned;
use std::future::Future;

/// Calls into an initialized test service, so helpers can return `impl CallService`.
pub trait CallService {
    fn call_service(&self, request: Request) -> impl Future<Output = ServiceResponse>;
    fn call_and_read_body_json<T: DeserializeOwned>(
        &self,
        request: Request,
    ) -> impl Future<Output = T>;
}

impl<S> CallService for S
where
    S: Service<Request, Response = ServiceResponse, Error = Error>,
{
    async fn call_service(&self, request: Request) -> ServiceResponse {
        actix_web::test::call_service(self, request).await
    }

    async fn call_and_read_body_json<T: DeserializeOwned>(&self, request: Request) -> T {
        actix_web::test::call_and_read_body_json(self, request).await
    }
}
