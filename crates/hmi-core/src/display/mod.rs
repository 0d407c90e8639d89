//! Display domain models.
//!
//! - [`DesiredDisplayState`]: what the application wants on screen
//! - [`DisplayUpdate`]: one outbound display-update payload
//! - [`CurrentDisplayState`]: what the screen last accepted

mod graphic;
mod model;
mod state;
mod update;

pub use graphic::{GraphicRef, ImageRef, ImageType};
pub use model::{MetadataType, TextAlignment, TextSlot};
pub use state::{CurrentDisplayState, DesiredDisplayState, TextField};
pub use update::{DisplayUpdate, MetadataTags};
