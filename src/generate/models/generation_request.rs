use crate::generate::{dtos::generate_image_dto::GenerateImageDto, enums::image_format::ImageFormat};

/// One submission, built fresh for a single dispatch.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub prompt: String,
    pub guidance_scale: f64,
    pub height: u32,
    pub width: u32,
    pub output_format: ImageFormat,
}

impl GenerationRequest {
    pub fn from_dto(dto: &GenerateImageDto) -> Self {
        return Self {
            prompt: dto.prompt.to_string(),
            guidance_scale: dto.guidance_scale,
            height: dto.height,
            width: dto.width,
            output_format: dto.format,
        };
    }
}
