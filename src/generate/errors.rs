use axum::http::StatusCode;

use crate::app::models::api_error::ApiError;

/// Failures detected before anything is sent to the inference api.
#[derive(Debug, PartialEq)]
pub enum GenerateApiError {
    MissingCredentials,
    EmptyPrompt,
    InvalidParameters(String),
}

impl GenerateApiError {
    pub fn value(&self) -> ApiError {
        match self {
            Self::MissingCredentials => ApiError {
                code: StatusCode::INTERNAL_SERVER_ERROR,
                message: "API key missing! Please add 'HUGGINGFACE_API_KEY' to your environment."
                    .to_string(),
            },
            Self::EmptyPrompt => ApiError {
                code: StatusCode::BAD_REQUEST,
                message: "Please enter a valid prompt.".to_string(),
            },
            Self::InvalidParameters(message) => ApiError {
                code: StatusCode::BAD_REQUEST,
                message: message.to_string(),
            },
        }
    }

    pub fn is_warning(&self) -> bool {
        matches!(self, Self::EmptyPrompt)
    }
}
