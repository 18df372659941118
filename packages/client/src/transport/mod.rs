//! Request/reply transport interface
//!
//! The client logic talks to a `Transport`, so it can be exercised
//! against a scripted peer without opening a socket.

pub mod zmq;

#[cfg(test)]
pub mod mock;

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::ClientError;

pub use self::zmq::ZmqTransport;

#[async_trait]
pub trait Transport: Send {
    /// Send `payload` as a single-frame message and wait for one reply,
    /// returning its frames in order.
    async fn request(&mut self, payload: Bytes) -> Result<Vec<Bytes>, ClientError>;

    /// Name of this transport for logging/debugging
    fn transport_name(&self) -> &str;
}
