use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::generate::enums::image_format::ImageFormat;

pub const DEFAULT_GUIDANCE_SCALE: f64 = 7.5;
pub const DEFAULT_DIMENSION: u32 = 512;
pub const DIMENSION_STEP: u32 = 64;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_parameters", skip_on_field_errors = false))]
pub struct GenerateImageDto {
    #[serde(default)]
    pub prompt: String,
    #[serde(default = "default_guidance_scale")]
    #[validate(range(
        min = 1.0,
        max = 20.0,
        message = "guidance_scale must be between 1.0 and 20.0."
    ))]
    pub guidance_scale: f64,
    #[serde(default = "default_dimension")]
    #[validate(range(min = 256, max = 1024, message = "height must be between 256 and 1024."))]
    pub height: u32,
    #[serde(default = "default_dimension")]
    #[validate(range(min = 256, max = 1024, message = "width must be between 256 and 1024."))]
    pub width: u32,
    #[serde(default)]
    pub format: ImageFormat,
}

fn default_guidance_scale() -> f64 {
    DEFAULT_GUIDANCE_SCALE
}

fn default_dimension() -> u32 {
    DEFAULT_DIMENSION
}

impl Default for GenerateImageDto {
    fn default() -> Self {
        return Self {
            prompt: String::new(),
            guidance_scale: DEFAULT_GUIDANCE_SCALE,
            height: DEFAULT_DIMENSION,
            width: DEFAULT_DIMENSION,
            format: ImageFormat::default(),
        };
    }
}

// range() lets NaN through and has no notion of a step
fn validate_parameters(dto: &GenerateImageDto) -> Result<(), ValidationError> {
    if !dto.guidance_scale.is_finite() {
        let mut error = ValidationError::new("guidance_scale_finite");
        error.message = Some(Cow::from("guidance_scale must be a finite number."));
        return Err(error);
    }

    if dto.height % DIMENSION_STEP != 0 || dto.width % DIMENSION_STEP != 0 {
        let mut error = ValidationError::new("dimension_step");
        error.message = Some(Cow::from("height and width must be multiples of 64."));
        return Err(error);
    }

    return Ok(());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dto(guidance_scale: f64, height: u32, width: u32) -> GenerateImageDto {
        GenerateImageDto {
            prompt: "a cute robot in space".to_string(),
            guidance_scale,
            height,
            width,
            format: ImageFormat::Png,
        }
    }

    #[test]
    fn accepts_bounds_and_steps() {
        assert!(dto(1.0, 256, 1024).validate().is_ok());
        assert!(dto(20.0, 1024, 256).validate().is_ok());
        assert!(dto(7.5, 576, 832).validate().is_ok());
    }

    #[test]
    fn rejects_out_of_range_guidance_scale() {
        assert!(dto(0.5, 512, 512).validate().is_err());
        assert!(dto(20.5, 512, 512).validate().is_err());
        assert!(dto(f64::NAN, 512, 512).validate().is_err());
    }

    #[test]
    fn rejects_out_of_range_dimensions() {
        assert!(dto(7.5, 192, 512).validate().is_err());
        assert!(dto(7.5, 512, 1088).validate().is_err());
    }

    #[test]
    fn rejects_dimensions_off_step() {
        let errors = dto(7.5, 500, 512).validate().unwrap_err();
        assert!(errors.to_string().contains("multiples of 64"));
    }

    #[test]
    fn empty_prompt_is_left_to_the_service() {
        let mut dto = dto(7.5, 512, 512);
        dto.prompt = "   ".to_string();
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn long_prompts_are_not_capped() {
        let mut dto = dto(7.5, 512, 512);
        dto.prompt = "a".repeat(5000);
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn missing_fields_take_widget_defaults() {
        let dto: GenerateImageDto = serde_json::from_str(r#"{"prompt":"castle"}"#).unwrap();

        assert_eq!(dto.guidance_scale, 7.5);
        assert_eq!(dto.height, 512);
        assert_eq!(dto.width, 512);
        assert_eq!(dto.format, ImageFormat::Png);
    }
}
