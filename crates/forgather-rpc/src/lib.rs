pub mod backend;
pub mod client;
pub mod protocol;

use thiserror::Error;

pub use backend::Backend;
pub use client::RpcClient;

/// Failure modes of a remote call. Every call is a single attempt: there are
/// no retries and no backoff, a failed call is terminal for that user action.
#[derive(Debug, Error)]
pub enum RpcError {
    #[error("invalid backend url: {0}")]
    InvalidUrl(String),
    #[error("unauthorized")]
    Unauthorized,
    /// The backend ran the procedure and rejected it (business rule,
    /// row-level security, malformed arguments).
    #[error("{call} rejected by backend: {code}: {message}")]
    Remote {
        call: &'static str,
        code: String,
        message: String,
    },
    /// Transport-level failure: connect, timeout, TLS.
    #[error("http error: {0}")]
    Http(String),
    /// The call succeeded at the HTTP level but the body did not match the
    /// typed contract for the endpoint.
    #[error("invalid response: {0}")]
    Decode(String),
}

impl RpcError {
    /// Stable key used to pick the localized notification for this failure.
    pub fn message_key(&self) -> &'static str {
        match self {
            RpcError::InvalidUrl(_) => "error.config",
            RpcError::Unauthorized => "error.unauthorized",
            RpcError::Remote { .. } => "error.rejected",
            RpcError::Http(_) => "error.network",
            RpcError::Decode(_) => "error.response",
        }
    }
}
