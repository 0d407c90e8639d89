//! Port interfaces for the application layer
//!
//! Ports define the contract between the reconciliation use case and the
//! infrastructure that talks to the head unit. Use cases depend on these
//! traits only, never on a concrete transport or file manager.

mod artwork;
mod listener;
mod transport;

pub use artwork::ArtworkUploadPort;
pub use listener::{CompletionListener, ScreenStateListener};
pub use transport::{DisplayResponse, DisplayTransportPort};
