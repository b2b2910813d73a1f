//! Error types for the relay

use thiserror::Error;

/// Errors that can occur while accepting an inbound email
#[derive(Error, Debug)]
pub enum RelayError {
    /// Failed to parse a raw RFC 5322 message
    #[error("Failed to parse email structure: {0}")]
    Structure(String),

    /// Failed to deserialize the JSON webhook payload
    #[error("Invalid webhook payload: {0}")]
    Payload(String),

    /// Recipient address has no usable local part
    #[error("Invalid recipient: {0:?}")]
    InvalidRecipient(String),

    /// The mailbox store rejected an operation
    #[error("Storage failed: {0}")]
    Storage(String),
}

impl From<serde_json::Error> for RelayError {
    fn from(e: serde_json::Error) -> Self {
        Self::Payload(e.to_string())
    }
}

impl From<mailparse::MailParseError> for RelayError {
    fn from(e: mailparse::MailParseError) -> Self {
        Self::Structure(e.to_string())
    }
}

/// Result type for relay operations
pub type Result<T> = std::result::Result<T, RelayError>;
