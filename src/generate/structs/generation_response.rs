use serde::Serialize;

use crate::generate::models::generation_result::{sniff_mime_type, GenerationResult};

#[derive(Debug, Serialize, PartialEq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum GenerationResponse {
    Success {
        message: String,
        filename: String,
        mime_type: String,
        image_base64: String,
        download_href: String,
    },
    Pending {
        message: String,
    },
    Forbidden {
        message: String,
    },
    Failure {
        message: String,
        status_code: u16,
        diagnostic_text: String,
    },
    Exception {
        message: String,
        description: String,
    },
}

impl From<&GenerationResult> for GenerationResponse {
    fn from(result: &GenerationResult) -> Self {
        let message = result.message();

        match result {
            GenerationResult::Success {
                image_bytes,
                suggested_filename,
                format,
            } => Self::Success {
                message,
                filename: suggested_filename.to_string(),
                mime_type: sniff_mime_type(image_bytes, *format),
                image_base64: base64::encode(image_bytes),
                download_href: result.download_href().unwrap_or_default(),
            },
            GenerationResult::Pending => Self::Pending { message },
            GenerationResult::Forbidden => Self::Forbidden { message },
            GenerationResult::Failure {
                status_code,
                diagnostic_text,
            } => Self::Failure {
                message,
                status_code: *status_code,
                diagnostic_text: diagnostic_text.to_string(),
            },
            GenerationResult::Exception { description } => Self::Exception {
                message,
                description: description.to_string(),
            },
        }
    }
}
