use axum::http::StatusCode;

use super::models::api_error::ApiError;

#[derive(Debug)]
pub enum DefaultApiError {
    ServiceOverloaded,
}

impl DefaultApiError {
    pub fn value(&self) -> ApiError {
        match *self {
            Self::ServiceOverloaded => ApiError {
                code: StatusCode::SERVICE_UNAVAILABLE,
                message: "The service is busy, try again shortly.".to_string(),
            },
        }
    }
}
