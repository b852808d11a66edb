use axum::{extract::State, http::StatusCode, response::Html, Json};
use validator::Validate;

use crate::{
    app::models::{
        api_error::ApiError, form_from_request::FormFromRequest,
        json_from_request::JsonFromRequest,
    },
    AppState,
};

use super::{
    dtos::generate_image_dto::GenerateImageDto,
    errors::GenerateApiError,
    service,
    structs::generation_response::GenerationResponse,
    templates::page_template::{render_page, PageNotice},
};

pub async fn submit_form(
    State(state): State<AppState>,
    form: Result<FormFromRequest<GenerateImageDto>, ApiError>,
) -> (StatusCode, Html<String>) {
    // a cleared number field can't be parsed, show the empty form again
    let FormFromRequest(dto) = match form {
        Ok(form) => form,
        Err(e) => {
            tracing::warn!(message = %e.message, "rejected form submission");
            let notice = PageNotice::Error(e.message);
            return (
                StatusCode::BAD_REQUEST,
                Html(render_page(&GenerateImageDto::default(), Some(&notice))),
            );
        }
    };

    let outcome = match dto.validate() {
        Ok(_) => service::generate_image(&dto, &state).await,
        Err(e) => Err(GenerateApiError::InvalidParameters(e.to_string())),
    };

    match outcome {
        Ok(result) => (
            StatusCode::OK,
            Html(render_page(&dto, Some(&PageNotice::Result(&result)))),
        ),
        Err(e) => (
            e.value().code,
            Html(render_page(&dto, Some(&PageNotice::from(&e)))),
        ),
    }
}

pub async fn generate_image(
    State(state): State<AppState>,
    JsonFromRequest(dto): JsonFromRequest<GenerateImageDto>,
) -> Result<(StatusCode, Json<GenerationResponse>), ApiError> {
    match dto.validate() {
        Ok(_) => match service::generate_image(&dto, &state).await {
            Ok(result) => Ok((result.http_status(), Json(GenerationResponse::from(&result)))),
            Err(e) => Err(e.value()),
        },
        Err(e) => Err(ApiError {
            code: StatusCode::BAD_REQUEST,
            message: e.to_string(),
        }),
    }
}
