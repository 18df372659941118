use std::str::Utf8Error;
use std::time::Duration;

use thiserror::Error;

/// Boxed cause carried by socket-level failures.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Unified client error.
///
/// Every stage of a request (configuration, connect, send, receive,
/// decode) fails with one of these so the binary can report it the
/// same way regardless of where it happened.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Unable to connect to {endpoint}: {source}")]
    Connect { endpoint: String, source: BoxError },

    #[error("Failed to send request: {source}")]
    Send { source: BoxError },

    #[error("Failed to receive reply: {source}")]
    Receive { source: BoxError },

    #[error("No reply from {endpoint} within {:.1}s", timeout.as_secs_f64())]
    Timeout { endpoint: String, timeout: Duration },

    #[error("Reply frame {index} is not valid UTF-8: {source}")]
    Decode { index: usize, source: Utf8Error },
}

impl ClientError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config { message: message.into() }
    }

    pub fn connect(endpoint: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::Connect {
            endpoint: endpoint.into(),
            source: source.into(),
        }
    }

    pub fn send(source: impl Into<BoxError>) -> Self {
        Self::Send { source: source.into() }
    }

    pub fn receive(source: impl Into<BoxError>) -> Self {
        Self::Receive { source: source.into() }
    }

    pub fn decode(index: usize, source: Utf8Error) -> Self {
        Self::Decode { index, source }
    }

    pub fn timeout(endpoint: impl Into<String>, timeout: Duration) -> Self {
        Self::Timeout {
            endpoint: endpoint.into(),
            timeout,
        }
    }
}
