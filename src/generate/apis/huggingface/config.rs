pub static DEFAULT_API_URL: &str = "https://api-inference.huggingface.co/models";
pub static DEFAULT_MODEL: &str = "black-forest-labs/FLUX.1-dev";
