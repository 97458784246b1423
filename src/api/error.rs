use actix_web::error::{JsonPayloadError, PathError};
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, ResponseError};
use thiserror::Error;
use tracing::{error, warn};

use crate::api::models::ErrorResponse;
use crate::zones::{DeleteError, EditError};

pub const DISTRIBUTION_NOT_FOUND: &str = "Distribution not found";
const INTERNAL_ERROR: &str = "Internal server error";

#[derive(Debug, Error)]
pub enum ApiError {
    /// Rejected edit; answered with an empty body.
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    #[error("Distribution not found")]
    DistributionNotFound,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) | ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::DistributionNotFound => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        match self {
            ApiError::BadRequest(_) => builder.finish(),
            ApiError::Validation(message) | ApiError::PayloadTooLarge(message) => {
                builder.json(ErrorResponse {
                    error: message.clone(),
                })
            }
            ApiError::DistributionNotFound => builder.json(ErrorResponse {
                error: DISTRIBUTION_NOT_FOUND.to_string(),
            }),
            ApiError::Internal(_) => builder.json(ErrorResponse {
                error: INTERNAL_ERROR.to_string(),
            }),
        }
    }
}

impl From<EditError> for ApiError {
    fn from(err: EditError) -> Self {
        match err {
            EditError::ZoneNotFound(_) | EditError::DistributionNotFound(_) => {
                warn!("Edit rejected: {}", err);
                ApiError::BadRequest(err.to_string())
            }
            EditError::Store(e) => {
                error!("Edit failed: {}", e);
                ApiError::Internal(e.to_string())
            }
        }
    }
}

impl From<DeleteError> for ApiError {
    fn from(err: DeleteError) -> Self {
        match err {
            DeleteError::NotFound(id) => {
                warn!("Delete rejected: distribution {} not found", id);
                ApiError::DistributionNotFound
            }
            DeleteError::Store(e) => {
                error!("Delete failed: {}", e);
                ApiError::Internal(e.to_string())
            }
        }
    }
}

pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let api_error = match &err {
        JsonPayloadError::Overflow { .. } | JsonPayloadError::OverflowKnownLength { .. } => {
            ApiError::PayloadTooLarge(err.to_string())
        }
        _ => ApiError::Validation(err.to_string()),
    };
    warn!("Rejected request body: {}", err);
    api_error.into()
}

/// Only `/delete/{id}` takes a path parameter; a non-integer id cannot name
/// a distribution.
pub fn path_error_handler(err: PathError, _req: &HttpRequest) -> actix_web::Error {
    warn!("Rejected path: {}", err);
    ApiError::DistributionNotFound.into()
}
