use thiserror::Error;

pub type Result<T> = std::result::Result<T, FoursquareError>;

#[derive(Debug, Error)]
pub enum FoursquareError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),
}

impl FoursquareError {
    /// HTTP status of the provider response, when the provider answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            FoursquareError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for FoursquareError {
    fn from(err: reqwest::Error) -> Self {
        FoursquareError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for FoursquareError {
    fn from(err: serde_json::Error) -> Self {
        FoursquareError::Parse(err.to_string())
    }
}
