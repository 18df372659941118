use async_trait::async_trait;
use bytes::Bytes;
use zeromq::{DealerSocket, Socket, SocketRecv, SocketSend, ZmqMessage};

use crate::config::Endpoint;
use crate::error::ClientError;
use crate::transport::Transport;

/// DEALER socket connected to the daemon's ROUTER.
///
/// The ROUTER strips the routing identity before replying, so the frames
/// received here are the reply payload only.
pub struct ZmqTransport {
    socket: DealerSocket,
}

impl ZmqTransport {
    pub async fn connect(endpoint: &Endpoint) -> Result<Self, ClientError> {
        let address = endpoint.to_string();
        let mut socket = DealerSocket::new();

        socket
            .connect(&address)
            .await
            .map_err(|err| ClientError::connect(address.as_str(), err))?;

        tracing::debug!("Connected to {}", address);

        Ok(Self { socket })
    }
}

#[async_trait]
impl Transport for ZmqTransport {
    async fn request(&mut self, payload: Bytes) -> Result<Vec<Bytes>, ClientError> {
        tracing::debug!("Sending {} byte request", payload.len());

        self.socket
            .send(ZmqMessage::from(payload))
            .await
            .map_err(ClientError::send)?;

        let reply = self.socket.recv().await.map_err(ClientError::receive)?;
        let frames = reply.into_vec();

        tracing::debug!("Received reply with {} frame(s)", frames.len());

        Ok(frames)
    }

    fn transport_name(&self) -> &str {
        "zmq-dealer"
    }
}
