use actix_web::{body::BoxBody, http::StatusCode, HttpResponse, ResponseError};
use catalog_common::error::ErrorInformation;
use sea_orm::DbErr;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Database(#[from] DbErr),
    #[error("operation was cancelled")]
    Cancelled,
    #[error("Invalid request: {0}")]
    BadRequest(String),
    #[error(transparent)]
    Any(#[from] anyhow::Error),
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse<BoxBody> {
        match self {
            Self::BadRequest(msg) => {
                HttpResponse::BadRequest().json(ErrorInformation::new("bad_request", msg))
            }
            // the caller went away, nobody will read this
            Self::Cancelled => {
                log::debug!("request cancelled");
                internal()
            }
            Self::Database(err) => {
                log::error!("database error: {err}");
                internal()
            }
            Self::Any(err) => {
                log::error!("internal error: {err:#}");
                internal()
            }
        }
    }
}

/// The storage details stay in the log.
fn internal() -> HttpResponse<BoxBody> {
    HttpResponse::InternalServerError().json(ErrorInformation::terse("internal"))
}

#[cfg(test)]
mod test {
    use super::*;
    use actix_web::body::to_bytes;
    use serde_json::{json, Value};

    async fn body(err: Error) -> (StatusCode, Value) {
        let response = err.error_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body()).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[actix_web::test]
    async fn database_errors_are_redacted() {
        let (status, value) = body(Error::Database(DbErr::Custom(
            "no such table: nodes".into(),
        )))
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(value, json!({"error": "internal"}));
    }

    #[actix_web::test]
    async fn bad_request() {
        let (status, value) = body(Error::BadRequest("page must be at least 1".into())).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            value,
            json!({"error": "bad_request", "message": "page must be at least 1"})
        );
    }

    #[actix_web::test]
    async fn cancelled() {
        let (status, value) = body(Error::Cancelled).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(value, json!({"error": "internal"}));
    }
}
