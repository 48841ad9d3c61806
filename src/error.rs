//! Error types for the provider client.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport failure, or a body that does not decode to a JSON structure.
    #[error("could not connect to the provider: {0}")]
    ConnectionFailure(String),

    /// Messages reported by the provider in the `errors` field, joined with ", ".
    #[error("{0}")]
    ProviderError(String),

    #[error("invalid order type: {0}")]
    InvalidOrderType(String),

    #[error("upload file not found: {}", .0.display())]
    MissingUploadFile(PathBuf),

    /// Upload name that is absolute or leaves the uploads directory.
    #[error("upload path escapes the uploads directory: {}", .0.display())]
    UnsafeUploadPath(PathBuf),

    #[error("unknown service category: {0}")]
    UnknownServiceCategory(String),

    /// A required response field is missing or has an unusable shape.
    #[error("malformed provider response: {0}")]
    MalformedResponse(String),

    #[error("failed to compute Auth-Key: {0}")]
    Auth(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration parse error: {0}")]
    Parse(String),

    #[error("Logging setup error: {0}")]
    Logging(String),
}

pub type ClientResult<T> = Result<T, ClientError>;
