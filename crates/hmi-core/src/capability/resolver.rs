use std::sync::Arc;

use super::{ImageFieldName, LineCount, TextFieldName, WindowCapability};

/// What a display surface can show.
pub trait DisplayCapability: Send + Sync {
    fn supports_text_field(&self, field: TextFieldName) -> bool;

    fn supports_image_field(&self, field: ImageFieldName) -> bool;

    fn line_count(&self) -> LineCount;
}

/// Capability used when the surface did not describe itself.
///
/// Everything is supported and four lines are available.
#[derive(Debug, Clone, Copy, Default)]
pub struct PermissiveCapability;

impl DisplayCapability for PermissiveCapability {
    fn supports_text_field(&self, _field: TextFieldName) -> bool {
        true
    }

    fn supports_image_field(&self, _field: ImageFieldName) -> bool {
        true
    }

    fn line_count(&self) -> LineCount {
        LineCount::Four
    }
}

/// Shared handle over the capability of one surface.
#[derive(Clone)]
pub struct CapabilityResolver {
    capability: Arc<dyn DisplayCapability>,
}

impl CapabilityResolver {
    pub fn new(capability: Arc<dyn DisplayCapability>) -> Self {
        Self { capability }
    }

    pub fn permissive() -> Self {
        Self::new(Arc::new(PermissiveCapability))
    }

    /// Resolver for an optional descriptor; absent means permissive.
    pub fn from_optional(capability: Option<WindowCapability>) -> Self {
        match capability {
            Some(capability) => Self::new(Arc::new(capability)),
            None => Self::permissive(),
        }
    }

    pub fn supports_text_field(&self, field: TextFieldName) -> bool {
        self.capability.supports_text_field(field)
    }

    pub fn supports_image_field(&self, field: ImageFieldName) -> bool {
        self.capability.supports_image_field(field)
    }

    pub fn line_count(&self) -> LineCount {
        self.capability.line_count()
    }
}

impl Default for CapabilityResolver {
    fn default() -> Self {
        Self::permissive()
    }
}

impl std::fmt::Debug for CapabilityResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CapabilityResolver")
            .field("line_count", &self.line_count())
            .finish_non_exhaustive()
    }
}
