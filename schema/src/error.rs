use thiserror::Error;

/// Errors raised while reading a SARIF document.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// The document is not valid JSON or does not match the 2.0.0 schema.
    #[error("Invalid SARIF document: {0}")]
    Json(#[from] serde_json::Error),
}
