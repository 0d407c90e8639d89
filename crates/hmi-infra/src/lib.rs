pub mod artwork;
pub mod config;
pub mod transport;

pub use artwork::{ArtworkSink, InMemoryArtworkRegistry};
pub use config::load_reconcile_config;
pub use transport::RecordingTransport;
