//! Display Transport Port
//!
//! Sends one display-update payload to the head unit and waits for its
//! acknowledgement.

use crate::display::DisplayUpdate;

/// Acknowledgement of a display update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayResponse {
    pub success: bool,
    pub info: Option<String>,
}

impl DisplayResponse {
    pub fn accepted() -> Self {
        Self {
            success: true,
            info: None,
        }
    }

    pub fn rejected(info: impl Into<String>) -> Self {
        Self {
            success: false,
            info: Some(info.into()),
        }
    }
}

#[async_trait::async_trait]
pub trait DisplayTransportPort: Send + Sync {
    /// Send a display update.
    ///
    /// `Err` means the request never got an answer (disconnected, timed out);
    /// callers treat it the same as a rejection.
    async fn send(&self, update: DisplayUpdate) -> anyhow::Result<DisplayResponse>;
}
