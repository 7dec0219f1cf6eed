use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlacebotError {
    #[error("Places provider unavailable: {0}")]
    ProviderUnavailable(String),

    #[error("Category taxonomy fetch failed: {0}")]
    TaxonomyFetchFailed(String),

    #[error("Reasoning unavailable: {0}")]
    ReasoningUnavailable(String),

    #[error("Audit log write failed: {0}")]
    AuditWrite(String),
}
