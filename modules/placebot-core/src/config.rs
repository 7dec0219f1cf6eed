use std::env;
use std::path::PathBuf;

/// Application configuration loaded from environment variables.
///
/// Missing provider keys are tolerated at startup (placeholder values) so the
/// process can boot in degraded mode; provider calls fail at runtime until
/// real keys are supplied.
#[derive(Debug, Clone)]
pub struct Config {
    // Providers
    pub foursquare_api_key: String,
    pub openai_api_key: String,
    pub openai_model: String,

    // Web server
    pub web_host: String,
    pub web_port: u16,

    // Audit trail
    pub log_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            foursquare_api_key: env::var("FOURSQUARE_API_KEY")
                .unwrap_or_else(|_| "your_foursquare_api_key_here".to_string()),
            openai_api_key: env::var("OPENAI_API_KEY")
                .unwrap_or_else(|_| "your_openai_api_key_here".to_string()),
            openai_model: env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string()),
            web_host: env::var("WEB_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            web_port: env::var("WEB_PORT")
                .unwrap_or_else(|_| "8000".to_string())
                .parse()
                .expect("WEB_PORT must be a number"),
            log_dir: env::var("LOG_DIR")
                .unwrap_or_else(|_| "logs".to_string())
                .into(),
        }
    }
}
