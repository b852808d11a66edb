use std::time::Duration;

use regex::Regex;
use serde::Deserialize;

use crate::generate::{
    apis::huggingface::config::{DEFAULT_API_URL, DEFAULT_MODEL},
    models::bearer_token::BearerToken,
};

lazy_static! {
    pub static ref MODEL_ID_REGEX: Regex = Regex::new(r"^[A-Za-z0-9_.-]+/[A-Za-z0-9_.-]+$").unwrap();
}

#[derive(Debug, Clone, Deserialize)]
pub struct Envy {
    #[serde(default = "default_app_env")]
    pub app_env: String,
    pub port: Option<u16>,

    pub huggingface_api_key: Option<BearerToken>,
    #[serde(default = "default_huggingface_model")]
    pub huggingface_model: String,
    #[serde(default = "default_huggingface_api_url")]
    pub huggingface_api_url: String,

    pub request_timeout_secs: Option<u64>,
}

fn default_app_env() -> String {
    "development".to_string()
}

fn default_huggingface_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_huggingface_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

impl Envy {
    pub fn from_env() -> Result<Self, envy::Error> {
        envy::from_env::<Envy>()
    }

    pub fn validate(&self) -> Result<(), String> {
        // "." and ".." segments would escape the models path
        let has_dot_segment = self
            .huggingface_model
            .split('/')
            .any(|segment| segment.chars().all(|c| c == '.'));

        if !MODEL_ID_REGEX.is_match(&self.huggingface_model) || has_dot_segment {
            return Err(format!(
                "HUGGINGFACE_MODEL must look like <owner>/<name>, got {:?}",
                self.huggingface_model
            ));
        }

        if let Err(e) = reqwest::Url::parse(&self.huggingface_api_url) {
            return Err(format!("HUGGINGFACE_API_URL is not a valid url: {}", e));
        }

        if self.request_timeout_secs == Some(0) {
            return Err("REQUEST_TIMEOUT_SECS must be greater than zero".to_string());
        }

        Ok(())
    }

    /// The configured bearer token, treating a blank value as absent.
    pub fn credentials(&self) -> Option<&BearerToken> {
        self.huggingface_api_key
            .as_ref()
            .filter(|token| !token.is_blank())
    }

    pub fn inference_url(&self) -> String {
        format!(
            "{}/{}",
            self.huggingface_api_url.trim_end_matches('/'),
            self.huggingface_model
        )
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}
