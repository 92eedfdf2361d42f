use std::env;

pub const DEFAULT_MODEL: &str = "meta-llama/Llama-3.3-70B-Instruct-Turbo";

/// Application configuration loaded from environment variables.
///
/// Both credentials load as `Option`: a missing Foursquare key fails each
/// search with `MissingCredential`, and a missing Together key surfaces as
/// an authentication failure from the LLM endpoint. Neither is a boot
/// failure.
#[derive(Debug, Clone)]
pub struct Config {
    pub together_api_key: Option<String>,
    pub foursquare_api_key: Option<String>,
    pub model: String,
    pub host: String,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            together_api_key: env::var("TOGETHER_API_KEY").ok(),
            foursquare_api_key: env::var("FOURSQUARE_API_KEY").ok(),
            model: env::var("TOGETHER_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            host: env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("API_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .expect("API_PORT must be a number"),
        }
    }
}
