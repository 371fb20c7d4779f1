use axum::{
    response::{IntoResponse, Response},
    Json,
};
use http::StatusCode;
use serde::Serialize;
use tracing::error;

pub type ApiResult<T> = std::result::Result<T, ApiError>;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    BadRequest(String),
    #[error("Internal server error")]
    Internal(#[source] Box<dyn std::error::Error + Send + Sync + 'static>),
}

#[derive(Debug, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ErrorMessage {
    pub message: String,
}

impl From<gamestore_dal::Error> for ApiError {
    fn from(value: gamestore_dal::Error) -> Self {
        use gamestore_dal::Error;
        match value {
            e @ Error::RecordNotFound { .. } => ApiError::NotFound(e.to_string()),
            e @ Error::InvalidReference { .. } => ApiError::BadRequest(e.to_string()),
            e @ Error::PriceOutOfRange(_) => ApiError::BadRequest(e.to_string()),
            e => ApiError::Internal(Box::new(e)),
        }
    }
}

impl From<url::ParseError> for ApiError {
    fn from(value: url::ParseError) -> Self {
        ApiError::Internal(Box::new(value))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(e) => {
                error!("Request failed: {e}");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        let body = ErrorMessage {
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
