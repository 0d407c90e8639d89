//! Graphic slot decisions and artwork uploads.

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use hmi_core::ports::ArtworkUploadPort;
use hmi_core::{
    CapabilityResolver, CurrentDisplayState, DesiredDisplayState, DisplayUpdate, GraphicRef,
    ImageFieldName, ProtocolVersion, ReconcileConfig,
};

/// Which image slots differ from what the screen shows and can be shown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GraphicUpdatePlan {
    pub primary: bool,
    pub secondary: bool,
}

impl GraphicUpdatePlan {
    pub fn resolve(
        desired: &DesiredDisplayState,
        current: &CurrentDisplayState,
        capability: &CapabilityResolver,
        protocol_version: ProtocolVersion,
        config: &ReconcileConfig,
    ) -> Self {
        let primary_supported = capability.supports_image_field(ImageFieldName::Graphic);

        // Windows below the gate never declare the secondary slot, so the
        // primary slot's support stands in for it.
        let secondary_supported =
            if protocol_version.major >= config.secondary_graphic_min_protocol_major {
                capability.supports_image_field(ImageFieldName::SecondaryGraphic)
            } else {
                primary_supported
            };

        Self {
            primary: primary_supported
                && differs(desired.primary_graphic.as_ref(), current.primary_graphic_name()),
            secondary: secondary_supported
                && differs(
                    desired.secondary_graphic.as_ref(),
                    current.secondary_graphic_name(),
                ),
        }
    }

    pub fn any(&self) -> bool {
        self.primary || self.secondary
    }

    /// Desired graphics of the changing slots, primary first.
    pub fn graphics<'a>(
        &self,
        desired: &'a DesiredDisplayState,
    ) -> (Option<&'a GraphicRef>, Option<&'a GraphicRef>) {
        (
            self.primary.then_some(desired.primary_graphic.as_ref()).flatten(),
            self.secondary.then_some(desired.secondary_graphic.as_ref()).flatten(),
        )
    }

    /// Put the images of the changing slots on `update`.
    pub fn apply(&self, desired: &DesiredDisplayState, update: &mut DisplayUpdate) {
        if self.primary {
            update.graphic = desired.primary_graphic.as_ref().map(GraphicRef::to_image);
        }
        if self.secondary {
            update.secondary_graphic = desired.secondary_graphic.as_ref().map(GraphicRef::to_image);
        }
    }
}

/// A missing desired graphic never counts as a change: an absent image
/// field cannot clear a slot.
fn differs(desired: Option<&GraphicRef>, displayed: Option<&str>) -> bool {
    match desired {
        Some(graphic) => displayed != Some(graphic.name()),
        None => false,
    }
}

/// Whether a graphic has to be uploaded before the head unit can show it.
pub fn needs_upload(graphic: Option<&GraphicRef>, uploader: &dyn ArtworkUploadPort) -> bool {
    graphic.is_some_and(|graphic| !graphic.is_static_icon() && !uploader.has_uploaded(graphic))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    /// Images that can be shown now. `all_uploaded` is false when some
    /// artwork failed and its slot was left out.
    Ready {
        update: DisplayUpdate,
        all_uploaded: bool,
    },
    /// Every changing slot failed; there is nothing to send.
    NoGraphicsToSend,
}

impl UploadOutcome {
    pub fn all_uploaded(&self) -> bool {
        matches!(
            self,
            UploadOutcome::Ready {
                all_uploaded: true,
                ..
            }
        )
    }
}

pub struct UploadCoordinator {
    uploader: Arc<dyn ArtworkUploadPort>,
}

impl UploadCoordinator {
    pub fn new(uploader: Arc<dyn ArtworkUploadPort>) -> Self {
        Self { uploader }
    }

    pub fn needs_upload(&self, graphic: Option<&GraphicRef>) -> bool {
        needs_upload(graphic, self.uploader.as_ref())
    }

    /// Whether any changing slot carries artwork the head unit lacks.
    /// Slots the plan leaves alone are never uploaded.
    pub fn plan_needs_upload(
        &self,
        desired: &DesiredDisplayState,
        plan: GraphicUpdatePlan,
    ) -> bool {
        let (primary, secondary) = plan.graphics(desired);
        self.needs_upload(primary) || self.needs_upload(secondary)
    }

    /// Upload what the plan needs and build the image-only update.
    pub async fn upload(
        &self,
        desired: &DesiredDisplayState,
        plan: GraphicUpdatePlan,
    ) -> UploadOutcome {
        let (primary, secondary) = plan.graphics(desired);

        let mut batch = Vec::new();
        let primary_pending = self.needs_upload(primary);
        if let (true, Some(graphic)) = (primary_pending, primary) {
            batch.push(graphic.clone());
        }
        let secondary_pending = self.needs_upload(secondary);
        if let (true, Some(graphic)) = (secondary_pending, secondary) {
            batch.push(graphic.clone());
        }

        let results = if batch.is_empty() {
            info!("No artworks need an upload, sending them without upload instead");
            Vec::new()
        } else {
            self.upload_batch(&batch).await
        };

        let mut results = results.into_iter();
        let primary_ok = !primary_pending || results.next().unwrap_or(false);
        let secondary_ok = !secondary_pending || results.next().unwrap_or(false);
        let all_uploaded = primary_ok && secondary_ok;
        if !all_uploaded {
            error!(primary_ok, secondary_ok, "Artwork failed to upload");
        }

        let image = |graphic: Option<&GraphicRef>, ok: bool| {
            graphic.filter(|_| ok).map(GraphicRef::to_image)
        };
        match DisplayUpdate::image_only(image(primary, primary_ok), image(secondary, secondary_ok)) {
            Some(update) => UploadOutcome::Ready {
                update,
                all_uploaded,
            },
            None => {
                info!("No graphics to upload");
                UploadOutcome::NoGraphicsToSend
            }
        }
    }

    async fn upload_batch(&self, batch: &[GraphicRef]) -> Vec<bool> {
        debug!(count = batch.len(), "Uploading artworks");
        match self.uploader.upload_batch(batch).await {
            Ok(results) => {
                if results.len() != batch.len() {
                    warn!(
                        expected = batch.len(),
                        actual = results.len(),
                        "Upload result count does not match batch; missing entries count as failed"
                    );
                }
                results
            }
            Err(err) => {
                warn!(error = %err, "Artwork batch upload failed");
                vec![false; batch.len()]
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::HashSet;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use hmi_core::{ImageRef, ImageType, TextFieldName, WindowCapability};

    struct TestUploader {
        uploaded: HashSet<String>,
        results: Option<Vec<bool>>,
        batches: Mutex<Vec<Vec<String>>>,
    }

    impl TestUploader {
        fn new(uploaded: &[&str], results: Option<Vec<bool>>) -> Self {
            Self {
                uploaded: uploaded.iter().map(|name| name.to_string()).collect(),
                results,
                batches: Mutex::new(Vec::new()),
            }
        }

        fn batches(&self) -> Vec<Vec<String>> {
            self.batches.lock().expect("batches lock").clone()
        }
    }

    #[async_trait]
    impl ArtworkUploadPort for TestUploader {
        fn has_uploaded(&self, graphic: &GraphicRef) -> bool {
            self.uploaded.contains(graphic.name())
        }

        async fn upload_batch(&self, graphics: &[GraphicRef]) -> anyhow::Result<Vec<bool>> {
            self.batches
                .lock()
                .expect("batches lock")
                .push(graphics.iter().map(|g| g.name().to_string()).collect());
            match &self.results {
                Some(results) => Ok(results.clone()),
                None => Err(anyhow::anyhow!("file manager unavailable")),
            }
        }
    }

    fn both_graphics() -> DesiredDisplayState {
        DesiredDisplayState::new()
            .with_primary_graphic(GraphicRef::artwork("cover.png"))
            .with_secondary_graphic(GraphicRef::artwork("logo.png"))
    }

    fn displayed(primary: Option<&str>, secondary: Option<&str>) -> CurrentDisplayState {
        let image = |name: &str| ImageRef {
            value: name.to_string(),
            image_type: ImageType::Dynamic,
        };
        CurrentDisplayState::from(DisplayUpdate {
            graphic: primary.map(image),
            secondary_graphic: secondary.map(image),
            ..DisplayUpdate::default()
        })
    }

    fn plan_for(
        capability: &CapabilityResolver,
        current: &CurrentDisplayState,
        major: u8,
    ) -> GraphicUpdatePlan {
        GraphicUpdatePlan::resolve(
            &both_graphics(),
            current,
            capability,
            ProtocolVersion::new(major, 0, 0),
            &ReconcileConfig::default(),
        )
    }

    #[test]
    fn same_name_needs_no_update() {
        let plan = plan_for(
            &CapabilityResolver::permissive(),
            &displayed(Some("cover.png"), None),
            7,
        );
        assert!(!plan.primary);
        assert!(plan.secondary);
    }

    #[test]
    fn absent_desired_graphic_is_not_a_change() {
        let plan = GraphicUpdatePlan::resolve(
            &DesiredDisplayState::new(),
            &displayed(Some("cover.png"), Some("logo.png")),
            &CapabilityResolver::permissive(),
            ProtocolVersion::new(7, 0, 0),
            &ReconcileConfig::default(),
        );
        assert!(!plan.any());
    }

    #[test]
    fn secondary_follows_primary_support_below_version_five() {
        let primary_only = CapabilityResolver::from_optional(Some(WindowCapability::new(
            vec![TextFieldName::MainField1],
            vec![ImageFieldName::Graphic],
        )));

        let legacy = plan_for(&primary_only, &CurrentDisplayState::new(), 4);
        assert!(legacy.secondary);

        let modern = plan_for(&primary_only, &CurrentDisplayState::new(), 5);
        assert!(!modern.secondary);
        assert!(modern.primary);
    }

    #[test]
    fn unsupported_primary_hides_secondary_below_version_five() {
        let secondary_only = CapabilityResolver::from_optional(Some(WindowCapability::new(
            Vec::new(),
            vec![ImageFieldName::SecondaryGraphic],
        )));

        let legacy = plan_for(&secondary_only, &CurrentDisplayState::new(), 4);
        assert!(!legacy.any());
    }

    #[test]
    fn static_icons_never_need_upload() {
        let uploader = TestUploader::new(&[], Some(Vec::new()));
        assert!(!needs_upload(Some(&GraphicRef::static_icon("0x11")), &uploader));
        assert!(needs_upload(Some(&GraphicRef::artwork("cover.png")), &uploader));
        assert!(!needs_upload(None, &uploader));
    }

    #[test]
    fn unchanged_slot_artwork_is_not_an_upload() {
        let uploader = Arc::new(TestUploader::new(&[], Some(Vec::new())));
        let coordinator = UploadCoordinator::new(uploader);
        let desired = DesiredDisplayState::new()
            .with_primary_graphic(GraphicRef::artwork("cover.png"))
            .with_secondary_graphic(GraphicRef::static_icon("0x11"));
        let plan = GraphicUpdatePlan {
            primary: false,
            secondary: true,
        };

        assert!(!coordinator.plan_needs_upload(&desired, plan));
        assert!(coordinator.plan_needs_upload(
            &desired,
            GraphicUpdatePlan {
                primary: true,
                secondary: true,
            }
        ));
    }

    #[tokio::test]
    async fn partial_failure_drops_failed_slot() {
        let uploader = Arc::new(TestUploader::new(&[], Some(vec![true, false])));
        let coordinator = UploadCoordinator::new(uploader.clone());
        let plan = GraphicUpdatePlan {
            primary: true,
            secondary: true,
        };

        let outcome = coordinator.upload(&both_graphics(), plan).await;

        match outcome {
            UploadOutcome::Ready {
                update,
                all_uploaded,
            } => {
                assert!(!all_uploaded);
                assert_eq!(update.graphic.map(|image| image.value).as_deref(), Some("cover.png"));
                assert!(update.secondary_graphic.is_none());
                assert!(update.main_field_1.is_none());
            }
            UploadOutcome::NoGraphicsToSend => panic!("first graphic uploaded"),
        }
        assert_eq!(
            uploader.batches(),
            vec![vec!["cover.png".to_string(), "logo.png".to_string()]]
        );
    }

    #[tokio::test]
    async fn all_failed_means_nothing_to_send() {
        let uploader = Arc::new(TestUploader::new(&[], Some(vec![false, false])));
        let coordinator = UploadCoordinator::new(uploader);
        let plan = GraphicUpdatePlan {
            primary: true,
            secondary: true,
        };

        let outcome = coordinator.upload(&both_graphics(), plan).await;

        assert_eq!(outcome, UploadOutcome::NoGraphicsToSend);
    }

    #[tokio::test]
    async fn batch_error_counts_as_failure_for_every_entry() {
        let uploader = Arc::new(TestUploader::new(&["logo.png"], None));
        let coordinator = UploadCoordinator::new(uploader.clone());
        let plan = GraphicUpdatePlan {
            primary: true,
            secondary: true,
        };

        let outcome = coordinator.upload(&both_graphics(), plan).await;

        match outcome {
            UploadOutcome::Ready {
                update,
                all_uploaded,
            } => {
                assert!(!all_uploaded);
                assert!(update.graphic.is_none());
                assert_eq!(
                    update.secondary_graphic.map(|image| image.value).as_deref(),
                    Some("logo.png")
                );
            }
            UploadOutcome::NoGraphicsToSend => panic!("already uploaded graphic remains"),
        }
        assert_eq!(uploader.batches(), vec![vec!["cover.png".to_string()]]);
    }

    #[tokio::test]
    async fn nothing_to_upload_skips_the_batch() {
        let uploader = Arc::new(TestUploader::new(&[], Some(Vec::new())));
        let coordinator = UploadCoordinator::new(uploader.clone());
        let desired = DesiredDisplayState::new()
            .with_primary_graphic(GraphicRef::static_icon("0x11"))
            .with_secondary_graphic(GraphicRef::artwork("logo.png"));
        let plan = GraphicUpdatePlan {
            primary: true,
            secondary: false,
        };

        let outcome = coordinator.upload(&desired, plan).await;

        assert!(outcome.all_uploaded());
        assert!(uploader.batches().is_empty());
    }
}
