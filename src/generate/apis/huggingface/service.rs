use std::error::Error;

use reqwest::{Client, Response};

use crate::{
    app::util::time,
    generate::{
        enums::image_format::ImageFormat,
        models::{
            bearer_token::BearerToken, generation_request::GenerationRequest,
            generation_result::GenerationResult,
        },
    },
};

use super::models::input_spec::{InputSpec, InputSpecOptions, InputSpecParameters};

/// Sends one generation request and classifies whatever comes back.
/// Never fails: transport problems become `GenerationResult::Exception`.
pub async fn dispatch(
    client: &Client,
    url: &str,
    credentials: &BearerToken,
    request: &GenerationRequest,
) -> GenerationResult {
    let input_spec = provide_input_spec(request);

    tracing::debug!(url, "posting inference request");

    let result = client
        .post(url)
        .bearer_auth(credentials.as_str())
        .json(&input_spec)
        .send()
        .await;

    match result {
        Ok(res) => classify_response(res, request.output_format).await,
        Err(e) => {
            tracing::error!(%e, "inference request failed");
            exception(&e)
        }
    }
}

async fn classify_response(res: Response, format: ImageFormat) -> GenerationResult {
    match res.status().as_u16() {
        200 => match res.bytes().await {
            Ok(image_bytes) => GenerationResult::Success {
                suggested_filename: format.filename(&time::current_local_timestamp()),
                image_bytes,
                format,
            },
            Err(e) => {
                tracing::error!(%e, "failed to read image bytes");
                exception(&e)
            }
        },
        503 => GenerationResult::Pending,
        403 => GenerationResult::Forbidden,
        status_code => match res.text().await {
            Ok(diagnostic_text) => GenerationResult::Failure {
                status_code,
                diagnostic_text,
            },
            Err(e) => {
                tracing::error!(%e, status_code, "failed to read error body");
                exception(&e)
            }
        },
    }
}

fn provide_input_spec(request: &GenerationRequest) -> InputSpec {
    InputSpec {
        inputs: request.prompt.to_string(),
        options: InputSpecOptions {
            guidance_scale: request.guidance_scale,
        },
        parameters: InputSpecParameters {
            height: request.height,
            width: request.width,
        },
    }
}

fn exception(e: &reqwest::Error) -> GenerationResult {
    let mut description = e.to_string();
    let mut source = e.source();

    while let Some(cause) = source {
        description.push_str(": ");
        description.push_str(&cause.to_string());
        source = cause.source();
    }

    GenerationResult::Exception { description }
}
