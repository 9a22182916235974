//! Gateway error taxonomy

use thiserror::Error;

/// Errors raised while talking to a BlueCat Gateway
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Missing or invalid host settings
    #[error("configuration error: {0}")]
    Config(String),

    /// The login handshake failed
    #[error("authentication failed: {0}")]
    Authentication(String),

    /// Connection, TLS or timeout failure
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-success status reported by the gateway
    #[error("gateway returned {status}: {message}")]
    Gateway { status: u16, message: String },

    /// The response body does not have the expected shape
    #[error("failed to decode gateway response: {0}")]
    Decode(#[source] serde_json::Error),

    /// An operation descriptor that cannot be turned into a request
    #[error("invalid operation: {0}")]
    InvalidOperation(String),
}

impl GatewayError {
    /// Whether the gateway reported the object as absent.
    ///
    /// Only the status counts: a 400 whose message mentions some other
    /// missing object (a search order, a zone) is a real failure.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            GatewayError::Gateway {
                status: 404 | 410,
                ..
            }
        )
    }
}

/// Result type for gateway operations
pub type GatewayResult<T> = Result<T, GatewayError>;
