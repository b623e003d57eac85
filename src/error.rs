//! Error types for NCANode client operations.

use thiserror::Error;

/// Result type for NCANode client operations
pub type NcaNodeResult<T> = Result<T, NcaNodeError>;

/// Error types for NCANode client operations
#[derive(Error, Debug, miette::Diagnostic)]
pub enum NcaNodeError {
    /// A signing operation was invoked without key material. Raised before
    /// any request is built; never reaches the transport.
    #[error("Missing signer: {0}")]
    MissingSigner(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The request could not be sent or the response could not be read.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The service answered with a body that is not decodable JSON.
    #[error("Malformed response body: {0}")]
    MalformedBody(String),
}
