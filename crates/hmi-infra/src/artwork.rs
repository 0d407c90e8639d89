//! In-memory artwork registry.
//!
//! Tracks which artworks the head unit already holds and forwards new ones
//! to an [`ArtworkSink`] that performs the actual file transfer.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tracing::{debug, warn};

use hmi_core::ports::ArtworkUploadPort;
use hmi_core::GraphicRef;

/// Transfers one artwork file to the head unit.
#[async_trait]
pub trait ArtworkSink: Send + Sync {
    async fn put(&self, graphic: &GraphicRef) -> anyhow::Result<()>;
}

pub struct InMemoryArtworkRegistry {
    sink: Arc<dyn ArtworkSink>,
    uploaded: Mutex<HashSet<String>>,
}

impl InMemoryArtworkRegistry {
    pub fn new(sink: Arc<dyn ArtworkSink>) -> Self {
        Self {
            sink,
            uploaded: Mutex::new(HashSet::new()),
        }
    }

    /// Record an artwork that is already present on the head unit,
    /// e.g. one left over from a previous session.
    pub fn mark_uploaded(&self, name: impl Into<String>) {
        self.uploaded_names().insert(name.into());
    }

    fn uploaded_names(&self) -> std::sync::MutexGuard<'_, HashSet<String>> {
        self.uploaded
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl ArtworkUploadPort for InMemoryArtworkRegistry {
    fn has_uploaded(&self, graphic: &GraphicRef) -> bool {
        self.uploaded_names().contains(graphic.name())
    }

    async fn upload_batch(&self, graphics: &[GraphicRef]) -> anyhow::Result<Vec<bool>> {
        let mut results = Vec::with_capacity(graphics.len());
        for graphic in graphics {
            if graphic.is_static_icon() || self.has_uploaded(graphic) {
                results.push(true);
                continue;
            }

            match self.sink.put(graphic).await {
                Ok(()) => {
                    debug!(name = graphic.name(), "Artwork uploaded");
                    self.uploaded_names().insert(graphic.name().to_string());
                    results.push(true);
                }
                Err(err) => {
                    warn!(name = graphic.name(), error = %err, "Artwork upload failed");
                    results.push(false);
                }
            }
        }
        Ok(results)
    }
}
