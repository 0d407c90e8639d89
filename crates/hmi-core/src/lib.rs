//! # hmi-core
//!
//! Core display models and pure logic for reconciling what a head-unit
//! screen shows with what the application wants it to show.
//!
//! This crate contains no infrastructure: transports and artwork uploads
//! are reached through the traits in [`ports`].

pub mod capability;
pub mod config;
pub mod display;
pub mod layout;
pub mod ports;

pub use capability::{
    CapabilityResolver, DisplayCapability, ImageFieldName, LineCount, PermissiveCapability,
    ProtocolVersion, TextFieldName, WindowCapability,
};
pub use config::{ConfigError, ReconcileConfig};
pub use display::{
    CurrentDisplayState, DesiredDisplayState, DisplayUpdate, GraphicRef, ImageRef, ImageType,
    MetadataTags, MetadataType, TextAlignment, TextField, TextSlot,
};
