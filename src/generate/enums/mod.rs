pub mod image_format;
