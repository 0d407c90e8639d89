//! Head-unit display orchestration layer
//!
//! This crate contains the use cases that drive display updates through
//! the ports defined in `hmi-core`.

pub mod usecases;

pub use usecases::display::{
    CancelHandle, OperationState, ReconcileDeps, ReconcileDisplayOperation, ReconcileFailure,
    ReconcileOutcome,
};
