//! Scripted transport for unit tests.

use std::collections::VecDeque;

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::ClientError;
use crate::transport::Transport;

#[derive(Default)]
pub struct MockTransport {
    replies: VecDeque<Result<Vec<Bytes>, ClientError>>,
    requests: Vec<Bytes>,
    stalled: bool,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a reply made of the given frames.
    pub fn with_reply(mut self, frames: &[&str]) -> Self {
        let frames = frames.iter().map(|f| Bytes::copy_from_slice(f.as_bytes())).collect();
        self.replies.push_back(Ok(frames));
        self
    }

    /// Queue a reply made of raw frames.
    pub fn with_raw_reply(mut self, frames: Vec<Bytes>) -> Self {
        self.replies.push_back(Ok(frames));
        self
    }

    pub fn with_error(mut self, err: ClientError) -> Self {
        self.replies.push_back(Err(err));
        self
    }

    /// Never answer any request.
    pub fn stalled(mut self) -> Self {
        self.stalled = true;
        self
    }

    /// Payloads received so far, oldest first.
    pub fn requests(&self) -> &[Bytes] {
        &self.requests
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn request(&mut self, payload: Bytes) -> Result<Vec<Bytes>, ClientError> {
        self.requests.push(payload);

        if self.stalled {
            std::future::pending::<()>().await;
        }

        self.replies.pop_front().unwrap_or_else(|| Ok(Vec::new()))
    }

    fn transport_name(&self) -> &str {
        "mock"
    }
}
