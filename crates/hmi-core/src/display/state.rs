//! Desired and currently displayed screen state.

use serde::{Deserialize, Serialize};
use tracing::error;

use super::{DisplayUpdate, GraphicRef, MetadataType, TextAlignment, TextSlot};

/// One of the caller's logical text inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextField {
    pub text: Option<String>,
    pub kind: Option<MetadataType>,
}

impl TextField {
    pub fn new(text: impl Into<String>, kind: Option<MetadataType>) -> Self {
        Self {
            text: Some(text.into()),
            kind,
        }
    }

    /// The text, if present and non-empty.
    pub fn value(&self) -> Option<&str> {
        self.text.as_deref().filter(|text| !text.is_empty())
    }
}

/// What the application wants the screen to show.
///
/// 期望显示的屏幕状态。一次对账操作中不可变。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DesiredDisplayState {
    pub text_fields: [TextField; 4],
    pub title: Option<String>,
    pub media_track: Option<String>,
    pub alignment: Option<TextAlignment>,
    pub primary_graphic: Option<GraphicRef>,
    pub secondary_graphic: Option<GraphicRef>,
}

impl DesiredDisplayState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(
        mut self,
        slot: TextSlot,
        text: impl Into<String>,
        kind: Option<MetadataType>,
    ) -> Self {
        self.text_fields[slot.index()] = TextField::new(text, kind);
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_media_track(mut self, media_track: impl Into<String>) -> Self {
        self.media_track = Some(media_track.into());
        self
    }

    pub fn with_alignment(mut self, alignment: TextAlignment) -> Self {
        self.alignment = Some(alignment);
        self
    }

    pub fn with_primary_graphic(mut self, graphic: GraphicRef) -> Self {
        self.primary_graphic = Some(graphic);
        self
    }

    pub fn with_secondary_graphic(mut self, graphic: GraphicRef) -> Self {
        self.secondary_graphic = Some(graphic);
        self
    }

    pub fn text_field(&self, slot: TextSlot) -> &TextField {
        &self.text_fields[slot.index()]
    }

    /// Non-empty text values in logical order.
    pub fn present_text(&self) -> Vec<&str> {
        self.text_fields.iter().filter_map(TextField::value).collect()
    }

    /// Every metadata tag set on a logical field, in logical order,
    /// whether or not the field carries text.
    pub fn all_metadata(&self) -> Vec<MetadataType> {
        self.text_fields.iter().filter_map(|field| field.kind).collect()
    }
}

/// Mirror of the last display update the head unit accepted.
///
/// 屏幕当前状态：只反映已被确认接受的更新。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CurrentDisplayState {
    screen: DisplayUpdate,
}

impl CurrentDisplayState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn screen(&self) -> &DisplayUpdate {
        &self.screen
    }

    pub fn primary_graphic_name(&self) -> Option<&str> {
        self.screen.graphic.as_ref().map(|image| image.value.as_str())
    }

    pub fn secondary_graphic_name(&self) -> Option<&str> {
        self.screen
            .secondary_graphic
            .as_ref()
            .map(|image| image.value.as_str())
    }

    /// Merge the present fields of an accepted update.
    ///
    /// Absent fields keep their previous value. An update with no present
    /// field at all is rejected and leaves the state untouched; returns
    /// whether the merge happened.
    pub fn apply(&mut self, accepted: &DisplayUpdate) -> bool {
        if accepted.is_empty() {
            error!("Cannot update current screen data from an empty display update");
            return false;
        }

        let DisplayUpdate {
            main_field_1,
            main_field_2,
            main_field_3,
            main_field_4,
            media_track,
            template_title,
            alignment,
            metadata_tags,
            graphic,
            secondary_graphic,
        } = accepted.clone();

        let screen = &mut self.screen;
        replace_if_present(&mut screen.main_field_1, main_field_1);
        replace_if_present(&mut screen.main_field_2, main_field_2);
        replace_if_present(&mut screen.main_field_3, main_field_3);
        replace_if_present(&mut screen.main_field_4, main_field_4);
        replace_if_present(&mut screen.media_track, media_track);
        replace_if_present(&mut screen.template_title, template_title);
        replace_if_present(&mut screen.alignment, alignment);
        replace_if_present(&mut screen.metadata_tags, metadata_tags);
        replace_if_present(&mut screen.graphic, graphic);
        replace_if_present(&mut screen.secondary_graphic, secondary_graphic);
        true
    }
}

impl From<DisplayUpdate> for CurrentDisplayState {
    fn from(screen: DisplayUpdate) -> Self {
        Self { screen }
    }
}

fn replace_if_present<T>(slot: &mut Option<T>, value: Option<T>) {
    if value.is_some() {
        *slot = value;
    }
}
