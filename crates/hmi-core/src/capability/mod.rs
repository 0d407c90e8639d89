//! Capability resolution.
//!
//! Answers "does this surface support text field X / image slot Y" and
//! "how many main text lines are available". A missing descriptor is not an
//! error: [`PermissiveCapability`] assumes full support.

mod resolver;
mod window;

pub use resolver::{CapabilityResolver, DisplayCapability, PermissiveCapability};
pub use window::{ImageFieldName, LineCount, ProtocolVersion, TextFieldName, WindowCapability};
