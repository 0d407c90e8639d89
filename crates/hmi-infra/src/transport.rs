//! Transport that records payloads instead of talking to a head unit.
//!
//! Useful for dry runs: every payload is kept in order and answered from a
//! scripted queue of responses, falling back to "accepted".

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use tracing::debug;

use hmi_core::ports::{DisplayResponse, DisplayTransportPort};
use hmi_core::DisplayUpdate;

#[derive(Default)]
pub struct RecordingTransport {
    sent: Mutex<Vec<DisplayUpdate>>,
    responses: Mutex<VecDeque<DisplayResponse>>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer the next sends with `responses`, in order.
    pub fn with_responses(responses: impl IntoIterator<Item = DisplayResponse>) -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            responses: Mutex::new(responses.into_iter().collect()),
        }
    }

    pub fn sent(&self) -> Vec<DisplayUpdate> {
        self.sent
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

#[async_trait]
impl DisplayTransportPort for RecordingTransport {
    async fn send(&self, update: DisplayUpdate) -> anyhow::Result<DisplayResponse> {
        let response = self
            .responses
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .pop_front()
            .unwrap_or_else(DisplayResponse::accepted);

        let mut sent = self
            .sent
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        sent.push(update);
        debug!(count = sent.len(), success = response.success, "Recorded display update");
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn scripted_responses_then_accepts() {
        let transport = RecordingTransport::with_responses([DisplayResponse::rejected("busy")]);

        let first = transport
            .send(DisplayUpdate::default())
            .await
            .expect("send first");
        let second = transport
            .send(DisplayUpdate::default())
            .await
            .expect("send second");

        assert!(!first.success);
        assert!(second.success);
        assert_eq!(transport.sent().len(), 2);
    }
}
