use std::time::{Duration, Instant};

use uuid::Uuid;

use crate::AppState;

use super::{
    apis::huggingface,
    dtos::generate_image_dto::GenerateImageDto,
    errors::GenerateApiError,
    models::{generation_request::GenerationRequest, generation_result::GenerationResult},
};

pub async fn generate_image(
    dto: &GenerateImageDto,
    state: &AppState,
) -> Result<GenerationResult, GenerateApiError> {
    let Some(credentials) = state.envy.credentials() else {
        tracing::error!("rejected generation: HUGGINGFACE_API_KEY is not configured");
        return Err(GenerateApiError::MissingCredentials);
    };

    if dto.prompt.trim().is_empty() {
        return Err(GenerateApiError::EmptyPrompt);
    }

    let request = GenerationRequest::from_dto(dto);
    let request_id = Uuid::new_v4().to_string();

    // one dispatch at a time, later submissions queue here
    let _guard = state.dispatch_lock.lock().await;

    tracing::info!(
        %request_id,
        model = %state.envy.huggingface_model,
        guidance_scale = request.guidance_scale,
        height = request.height,
        width = request.width,
        format = request.output_format.value(),
        "generating image"
    );

    let started = Instant::now();
    let result = huggingface::service::dispatch(
        &state.client,
        &state.envy.inference_url(),
        credentials,
        &request,
    )
    .await;

    log_outcome(&request_id, &result, started.elapsed());

    Ok(result)
}

fn log_outcome(request_id: &str, result: &GenerationResult, elapsed: Duration) {
    let elapsed_ms = elapsed.as_millis() as u64;

    match result {
        GenerationResult::Success {
            image_bytes,
            suggested_filename,
            ..
        } => {
            let size = imagesize::blob_size(image_bytes)
                .map(|size| format!("{}x{}", size.width, size.height))
                .unwrap_or_else(|_| "unknown".to_string());

            tracing::info!(
                request_id,
                elapsed_ms,
                bytes = image_bytes.len(),
                size = %size,
                filename = %suggested_filename,
                "image generated"
            );
        }
        GenerationResult::Pending | GenerationResult::Forbidden => {
            tracing::warn!(request_id, elapsed_ms, outcome = result.kind(), "{}", result.message());
        }
        GenerationResult::Failure {
            status_code,
            diagnostic_text,
        } => {
            tracing::warn!(
                request_id,
                elapsed_ms,
                status_code,
                diagnostic = %diagnostic_text,
                "inference api returned an error"
            );
        }
        GenerationResult::Exception { description } => {
            tracing::error!(request_id, elapsed_ms, %description, "image generation raised");
        }
    }
}
