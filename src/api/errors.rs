use actix_web::error::JsonPayloadError;
use actix_web::http::StatusCode;
use actix_web::{Error, HttpRequest, HttpResponse};

use crate::db::RepositoryError;

pub fn default_error_handler(err: JsonPayloadError, req: &HttpRequest) -> Error {
    error!("Error in request: {} \n Error: {}", req.full_url(), err);
    actix_web::error::InternalError::from_response("", HttpResponse::BadRequest().finish()).into()
}

/// HTTP status for a repository failure: validation 400, missing entity
/// 404, gateway trouble 502, everything else an opaque 500.
pub(crate) fn error_status(err: &RepositoryError) -> StatusCode {
    match err {
        RepositoryError::ValidationError(_) => StatusCode::BAD_REQUEST,
        RepositoryError::NotFound(_) => StatusCode::NOT_FOUND,
        RepositoryError::Gateway(_) => StatusCode::BAD_GATEWAY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
