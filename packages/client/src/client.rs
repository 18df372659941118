//! One request, one reply.
//!
//! `Client` composes the request line, hands it to a [`Transport`],
//! and decodes whatever comes back. `run` wires it to a DEALER socket
//! for the binary.

use std::future::Future;
use std::io::Write;
use std::time::Duration;

use bytes::Bytes;
use tokio::time;

use crate::config::Config;
use crate::error::ClientError;
use crate::message::{compose_request, decode_reply};
use crate::transport::{Transport, ZmqTransport};

pub struct Client<T> {
    transport: T,
    endpoint: String,
    timeout: Option<Duration>,
}

impl<T: Transport> Client<T> {
    pub fn new(transport: T, endpoint: impl Into<String>, timeout: Option<Duration>) -> Self {
        Self {
            transport,
            endpoint: endpoint.into(),
            timeout,
        }
    }

    /// Send `args` as one request and return the decoded reply.
    pub async fn execute<S: AsRef<str>>(&mut self, args: &[S]) -> Result<String, ClientError> {
        let request = compose_request(args);
        tracing::info!("> {}", request);

        let frames = within(
            self.timeout,
            &self.endpoint,
            self.transport.request(Bytes::from(request)),
        )
        .await?;

        decode_reply(&frames)
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }
}

/// Connect to the configured endpoint, send `args` and return the reply.
///
/// The configured timeout bounds the whole exchange, connect included.
pub async fn run<S: AsRef<str>>(config: &Config, args: &[S]) -> Result<String, ClientError> {
    let endpoint = config.endpoint.to_string();
    tracing::debug!("Using endpoint {}", endpoint);

    within(config.timeout, &endpoint, async {
        let transport = ZmqTransport::connect(&config.endpoint).await?;
        tracing::debug!("Transport ready: {}", transport.transport_name());

        // The outer deadline already covers the request.
        let mut client = Client::new(transport, endpoint.as_str(), None);
        client.execute(args).await
    })
    .await
}

/// Print a reply line to `out` and map the outcome to a process exit status.
///
/// 0 once the reply and its newline are written, 1 for any failure,
/// which is logged rather than written to `out`.
pub fn report<W: Write>(out: &mut W, outcome: Result<String, ClientError>) -> i32 {
    let reply = match outcome {
        Ok(reply) => reply,
        Err(err) => {
            tracing::error!("{}", err);
            return 1;
        }
    };

    match writeln!(out, "{}", reply).and_then(|_| out.flush()) {
        Ok(()) => 0,
        Err(err) => {
            tracing::error!("Unable to print reply: {}", err);
            1
        }
    }
}

async fn within<F, R>(limit: Option<Duration>, endpoint: &str, fut: F) -> Result<R, ClientError>
where
    F: Future<Output = Result<R, ClientError>>,
{
    match limit {
        None => fut.await,
        Some(limit) => time::timeout(limit, fut)
            .await
            .map_err(|_| ClientError::timeout(endpoint, limit))?,
    }
}
