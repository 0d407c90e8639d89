//! Artwork Upload Port
//!
//! Uploads dynamic artwork so the head unit can resolve it by name.

use crate::display::GraphicRef;

#[async_trait::async_trait]
pub trait ArtworkUploadPort: Send + Sync {
    /// Whether the artwork already exists on the head unit.
    fn has_uploaded(&self, graphic: &GraphicRef) -> bool;

    /// Upload a batch of artworks.
    ///
    /// The result is aligned with `graphics`: entry `i` tells whether
    /// `graphics[i]` is now available. Partial failure is reported per entry,
    /// `Err` means the whole batch failed.
    async fn upload_batch(&self, graphics: &[GraphicRef]) -> anyhow::Result<Vec<bool>>;
}
