//! Text and graphic reconciliation.
//!
//! ```text
//! ReconcileDisplayOperation
//!     ├─ layout::assemble_text        (always)
//!     ├─ GraphicUpdatePlan            (which image slots change)
//!     ├─ UploadCoordinator            (only when artwork is missing)
//!     └─ DisplayTransportPort::send   (one or two calls)
//! ```

pub mod graphics;
pub mod operation;

pub use graphics::{needs_upload, GraphicUpdatePlan, UploadCoordinator, UploadOutcome};
pub use operation::{
    CancelHandle, OperationState, ReconcileDeps, ReconcileDisplayOperation, ReconcileFailure,
    ReconcileOutcome,
};
