//! Error types for the people repository.
//!
//! # Design
//! Every non-2xx status gets its own variant so callers can tell "the person
//! does not exist" from "the server rejected the edit" from "the server is
//! down" without inspecting numbers. Each status variant keeps the original
//! status and raw body for diagnostics. Network-level failures, including
//! timeouts, live in `TransportError` and are never reported as a server
//! error.

use thiserror::Error;

/// Failures raised by a [`Transport`](crate::transport::Transport) before any
/// HTTP status was received.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Connection refused, reset or the host could not be resolved.
    #[error("connection error: {0}")]
    Connection(String),
    /// The request did not complete within the configured timeout.
    #[error("request timed out")]
    Timeout,
    /// Any other transport failure.
    #[error("{0}")]
    Other(String),
}

#[cfg(feature = "reqwest")]
impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout
        } else if err.is_connect() {
            TransportError::Connection(err.to_string())
        } else {
            TransportError::Other(err.to_string())
        }
    }
}

/// Errors returned by repository operations and `ResourceClient` parse
/// methods.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// 404: the addressed resource does not exist.
    #[error("resource not found (HTTP {status})")]
    NotFound { status: u16, body: String },

    /// 409 or 422: the server refused the submitted data.
    #[error("validation rejected (HTTP {status}): {body}")]
    ValidationRejected { status: u16, body: String },

    /// 401 or 403.
    #[error("unauthorized (HTTP {status})")]
    Unauthorized { status: u16, body: String },

    /// Any other 4xx.
    #[error("client request error (HTTP {status}): {body}")]
    ClientRequestError { status: u16, body: String },

    /// 5xx, or a status outside the 2xx/4xx classes.
    #[error("server error (HTTP {status}): {body}")]
    ServerError { status: u16, body: String },

    /// A 2xx response whose body did not match the expected shape.
    #[error("failed to decode response body: {message}")]
    DecodeFailure { message: String, body: String },

    /// The request payload could not be serialized to JSON.
    #[error("failed to serialize request body: {0}")]
    Serialization(String),

    /// No HTTP status was received.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The caller's cancellation token fired before the response arrived.
    #[error("operation cancelled")]
    Cancelled,
}

impl RepositoryError {
    /// HTTP status carried by status-classified variants.
    pub fn status(&self) -> Option<u16> {
        match self {
            RepositoryError::NotFound { status, .. }
            | RepositoryError::ValidationRejected { status, .. }
            | RepositoryError::Unauthorized { status, .. }
            | RepositoryError::ClientRequestError { status, .. }
            | RepositoryError::ServerError { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, RepositoryError::NotFound { .. })
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, RepositoryError::Transport(TransportError::Timeout))
    }
}
