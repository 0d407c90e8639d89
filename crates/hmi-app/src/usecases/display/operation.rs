//! Display reconciliation operation.
//!
//! One operation turns a [`DesiredDisplayState`] into at most two display
//! updates (text, then images) plus one artwork upload batch, and returns
//! the screen state that was actually accepted.
//!
//! Cancellation is cooperative: it is polled on start and after every
//! transport or upload call. A call already in flight completes, but no
//! further call is issued once the operation is canceled.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, info, info_span, warn, Instrument};

use hmi_core::layout::assemble_text;
use hmi_core::ports::{
    ArtworkUploadPort, CompletionListener, DisplayTransportPort, ScreenStateListener,
};
use hmi_core::{
    CapabilityResolver, CurrentDisplayState, DesiredDisplayState, DisplayUpdate, ProtocolVersion,
    ReconcileConfig,
};

use super::graphics::{GraphicUpdatePlan, UploadCoordinator, UploadOutcome};

/// Lifecycle of one operation.
///
/// 操作生命周期：PENDING → IN_PROGRESS → (CANCELED) → FINISHED。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationState {
    Pending,
    InProgress,
    Canceled,
    Finished,
}

/// Why an operation finished without success.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReconcileFailure {
    #[error("operation canceled")]
    Canceled,
    #[error("display update rejected: {}", .0.as_deref().unwrap_or("no info"))]
    TransportRejected(Option<String>),
    #[error("display update failed: {0}")]
    TransportError(String),
    #[error("one or more artworks failed to upload")]
    UploadFailed,
    #[error("no graphics to send after upload")]
    NoGraphicsToSend,
}

/// Result of a finished operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconcileOutcome {
    pub failure: Option<ReconcileFailure>,
    /// Screen state after merging every accepted update.
    pub current: CurrentDisplayState,
}

impl ReconcileOutcome {
    pub fn is_success(&self) -> bool {
        self.failure.is_none()
    }
}

/// Cancels an operation from outside and observes its state.
#[derive(Debug, Clone)]
pub struct CancelHandle {
    state: Arc<watch::Sender<OperationState>>,
}

impl CancelHandle {
    /// Request cancellation. Returns false once the operation has finished.
    pub fn cancel(&self) -> bool {
        self.state.send_if_modified(|state| match state {
            OperationState::Pending | OperationState::InProgress => {
                *state = OperationState::Canceled;
                true
            }
            OperationState::Canceled | OperationState::Finished => false,
        });
        self.is_canceled()
    }

    pub fn state(&self) -> OperationState {
        *self.state.borrow()
    }

    pub fn is_canceled(&self) -> bool {
        self.state() == OperationState::Canceled
    }

    /// Wait until the operation reaches FINISHED.
    pub async fn finished(&self) {
        let mut receiver = self.state.subscribe();
        // The sender lives as long as this handle, so the wait cannot fail.
        let _ = receiver
            .wait_for(|state| *state == OperationState::Finished)
            .await;
    }
}

/// Collaborators of [`ReconcileDisplayOperation`].
pub struct ReconcileDeps {
    pub transport: Arc<dyn DisplayTransportPort>,
    pub uploader: Arc<dyn ArtworkUploadPort>,
    pub capability: CapabilityResolver,
    pub protocol_version: ProtocolVersion,
    pub config: ReconcileConfig,
    pub screen_listener: Option<Arc<dyn ScreenStateListener>>,
    pub completion_listener: Option<Arc<dyn CompletionListener>>,
}

pub struct ReconcileDisplayOperation {
    transport: Arc<dyn DisplayTransportPort>,
    uploads: UploadCoordinator,
    capability: CapabilityResolver,
    protocol_version: ProtocolVersion,
    config: ReconcileConfig,
    screen_listener: Option<Arc<dyn ScreenStateListener>>,
    completion_listener: Option<Arc<dyn CompletionListener>>,
    desired: DesiredDisplayState,
    current: CurrentDisplayState,
    state: Arc<watch::Sender<OperationState>>,
}

impl ReconcileDisplayOperation {
    /// Create a PENDING operation working on a snapshot of `current`.
    pub fn from_deps(
        deps: ReconcileDeps,
        desired: DesiredDisplayState,
        current: CurrentDisplayState,
    ) -> Self {
        let ReconcileDeps {
            transport,
            uploader,
            capability,
            protocol_version,
            config,
            screen_listener,
            completion_listener,
        } = deps;
        let (state, _) = watch::channel(OperationState::Pending);

        Self {
            transport,
            uploads: UploadCoordinator::new(uploader),
            capability,
            protocol_version,
            config,
            screen_listener,
            completion_listener,
            desired,
            current,
            state: Arc::new(state),
        }
    }

    pub fn cancel_handle(&self) -> CancelHandle {
        CancelHandle {
            state: Arc::clone(&self.state),
        }
    }

    pub fn state(&self) -> OperationState {
        *self.state.borrow()
    }

    /// Run the operation to FINISHED.
    pub async fn execute(mut self) -> ReconcileOutcome {
        let span = info_span!(
            "usecase.display.reconcile.execute",
            line_count = self.capability.line_count().get(),
            protocol_version = %self.protocol_version,
        );

        async move {
            let result = self.run().await;
            self.finish(result)
        }
        .instrument(span)
        .await
    }

    /// Run the operation on the calling thread.
    pub fn execute_blocking(self) -> ReconcileOutcome {
        futures::executor::block_on(self.execute())
    }

    async fn run(&mut self) -> Result<(), ReconcileFailure> {
        self.start()?;

        let text = assemble_text(&self.desired, &self.capability);
        let plan = GraphicUpdatePlan::resolve(
            &self.desired,
            &self.current,
            &self.capability,
            self.protocol_version,
            &self.config,
        );
        let mut full = text;
        plan.apply(&self.desired, &mut full);

        if !plan.any() {
            info!("No images to send, sending text");
            return self.send(full.text_only()).await;
        }

        if !self.uploads.plan_needs_upload(&self.desired, plan) {
            info!("Images already uploaded, sending full update");
            return self.send(full).await;
        }

        info!("Images need to be uploaded, sending text and uploading images");
        self.ensure_not_canceled()?;
        self.send(full.text_only()).await?;

        let outcome = self.uploads.upload(&self.desired, plan).await;
        self.ensure_not_canceled()?;

        match outcome {
            UploadOutcome::Ready {
                update,
                all_uploaded,
            } => {
                info!("Sending update with the successfully uploaded images");
                self.send(update).await?;
                if all_uploaded {
                    Ok(())
                } else {
                    Err(ReconcileFailure::UploadFailed)
                }
            }
            UploadOutcome::NoGraphicsToSend => {
                warn!("All images failed to upload. No graphics to show, skipping update.");
                Err(ReconcileFailure::NoGraphicsToSend)
            }
        }
    }

    fn start(&self) -> Result<(), ReconcileFailure> {
        self.state.send_if_modified(|state| {
            if *state == OperationState::Pending {
                *state = OperationState::InProgress;
                true
            } else {
                false
            }
        });
        self.ensure_not_canceled()
    }

    fn ensure_not_canceled(&self) -> Result<(), ReconcileFailure> {
        if *self.state.borrow() == OperationState::Canceled {
            info!("Operation canceled");
            return Err(ReconcileFailure::Canceled);
        }
        Ok(())
    }

    /// Send one update and merge it into the current state if accepted.
    async fn send(&mut self, update: DisplayUpdate) -> Result<(), ReconcileFailure> {
        if self.config.trace_payloads {
            match serde_json::to_string(&update) {
                Ok(payload) => debug!(%payload, "Outbound display update"),
                Err(err) => warn!(error = %err, "Failed to serialize display update for tracing"),
            }
        }

        match self.transport.send(update.clone()).await {
            Ok(response) if response.success => {
                info!("Text and graphic update complete");
                self.merge(&update);
            }
            Ok(response) => {
                warn!(info = ?response.info, "Display update rejected");
                return Err(ReconcileFailure::TransportRejected(response.info));
            }
            Err(err) => {
                warn!(error = %err, "Display update failed");
                return Err(ReconcileFailure::TransportError(err.to_string()));
            }
        }

        self.ensure_not_canceled()
    }

    fn merge(&mut self, accepted: &DisplayUpdate) {
        if !self.current.apply(accepted) {
            return;
        }
        if let Some(listener) = &self.screen_listener {
            listener.on_screen_state_changed(&self.current);
        }
    }

    fn finish(self, result: Result<(), ReconcileFailure>) -> ReconcileOutcome {
        let success = result.is_ok();
        info!(success, "Finishing text and graphic update operation");
        if let Err(failure) = &result {
            debug!(%failure, "Text and graphic update did not succeed");
        }

        self.state.send_modify(|state| *state = OperationState::Finished);
        if let Some(listener) = &self.completion_listener {
            listener.on_complete(success);
        }

        ReconcileOutcome {
            failure: result.err(),
            current: self.current,
        }
    }
}
