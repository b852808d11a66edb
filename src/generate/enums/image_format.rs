use mime::Mime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageFormat {
    #[default]
    #[serde(rename = "PNG", alias = "png")]
    Png,
    #[serde(rename = "JPG", alias = "jpg", alias = "JPEG", alias = "jpeg")]
    Jpg,
}

impl ImageFormat {
    pub fn value(&self) -> &'static str {
        match *self {
            Self::Png => "PNG",
            Self::Jpg => "JPG",
        }
    }

    pub fn extension(&self) -> &'static str {
        match *self {
            Self::Png => "png",
            Self::Jpg => "jpg",
        }
    }

    pub fn mime_type(&self) -> Mime {
        match *self {
            Self::Png => mime::IMAGE_PNG,
            Self::Jpg => mime::IMAGE_JPEG,
        }
    }

    /// `ai_image_<timestamp>.<ext>`
    pub fn filename(&self, timestamp: &str) -> String {
        format!("ai_image_{}.{}", timestamp, self.extension())
    }
}
