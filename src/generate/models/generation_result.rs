use axum::http::StatusCode;
use bytes::Bytes;
use imagesize::ImageType;

use crate::generate::enums::image_format::ImageFormat;

/// Outcome of exactly one dispatch to the inference api.
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationResult {
    Success {
        image_bytes: Bytes,
        suggested_filename: String,
        format: ImageFormat,
    },
    /// Model cold start on the remote side (503).
    Pending,
    /// License not accepted or token lacks access (403).
    Forbidden,
    Failure {
        status_code: u16,
        diagnostic_text: String,
    },
    Exception {
        description: String,
    },
}

impl GenerationResult {
    pub fn kind(&self) -> &'static str {
        match *self {
            Self::Success { .. } => "success",
            Self::Pending => "pending",
            Self::Forbidden => "forbidden",
            Self::Failure { .. } => "failure",
            Self::Exception { .. } => "exception",
        }
    }

    pub fn message(&self) -> String {
        match self {
            Self::Success { .. } => "Generated Image".to_string(),
            Self::Pending => {
                "Model is still loading. Please wait a moment and try again.".to_string()
            }
            Self::Forbidden => {
                "You may need to accept the model's license or use a different model.".to_string()
            }
            Self::Failure { status_code, .. } => {
                format!("Failed to generate image (Status {})", status_code)
            }
            Self::Exception { .. } => "An error occurred during image generation.".to_string(),
        }
    }

    /// Status used when the result is returned from the json api.
    pub fn http_status(&self) -> StatusCode {
        match *self {
            Self::Success { .. } => StatusCode::OK,
            Self::Pending => StatusCode::SERVICE_UNAVAILABLE,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::Failure { .. } => StatusCode::BAD_GATEWAY,
            Self::Exception { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// `data:file/<ext>;base64,<bytes>` link offered for download.
    pub fn download_href(&self) -> Option<String> {
        match self {
            Self::Success {
                image_bytes,
                format,
                ..
            } => Some(format!(
                "data:file/{};base64,{}",
                format.extension(),
                base64::encode(image_bytes)
            )),
            _ => None,
        }
    }

    /// Data uri for displaying the image inline.
    pub fn inline_src(&self) -> Option<String> {
        match self {
            Self::Success {
                image_bytes,
                format,
                ..
            } => Some(format!(
                "data:{};base64,{}",
                sniff_mime_type(image_bytes, *format),
                base64::encode(image_bytes)
            )),
            _ => None,
        }
    }
}

/// The model decides the actual encoding, so trust the bytes over the
/// requested format when the header is recognizable.
pub fn sniff_mime_type(bytes: &[u8], requested: ImageFormat) -> String {
    match imagesize::image_type(bytes) {
        Ok(ImageType::Png) => mime::IMAGE_PNG.to_string(),
        Ok(ImageType::Jpeg) => mime::IMAGE_JPEG.to_string(),
        Ok(ImageType::Gif) => mime::IMAGE_GIF.to_string(),
        Ok(ImageType::Webp) => "image/webp".to_string(),
        _ => requested.mime_type().to_string(),
    }
}
