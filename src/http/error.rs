use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde_json::json;

use crate::domain::order::ValidationError;
use crate::store::StoreError;

pub const PLACE_ORDER_FAILED: &str = "Failed to place order";
pub const FETCH_ORDERS_FAILED: &str = "Failed to fetch orders";

/// Every error a handler can return. Each one becomes a JSON response.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Validation Failed: Malformed JSON body.")]
    MalformedBody(String),

    #[error("{message}: {source}")]
    Persistence {
        message: &'static str,
        #[source]
        source: StoreError,
    },
}

impl ApiError {
    pub fn persistence(message: &'static str, source: StoreError) -> Self {
        Self::Persistence { message, source }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::MalformedBody(_) => StatusCode::BAD_REQUEST,
            ApiError::Persistence { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            ApiError::Validation(e) => {
                let fields = e.fields();
                if fields.is_empty() {
                    json!({ "message": e.to_string() })
                } else {
                    json!({ "message": e.to_string(), "fields": fields })
                }
            }
            ApiError::MalformedBody(detail) => json!({
                "message": self.to_string(),
                "error": detail,
            }),
            ApiError::Persistence { message, source } => json!({
                "message": message,
                "error": source.to_string(),
            }),
        };

        HttpResponse::build(self.status_code()).json(body)
    }
}
