//! Display-update payload.
//!
//! Every field is optional. An absent field means "not part of this
//! update" and is omitted on the wire; it never means "clear this field".
//! Clearing is expressed with an empty string (see [`DisplayUpdate::blank_text`]).

use serde::{Deserialize, Serialize};

use super::{ImageRef, MetadataType, TextAlignment, TextSlot};

/// Metadata tags per physical text slot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataTags {
    #[serde(rename = "mainField1", skip_serializing_if = "Option::is_none")]
    pub main_field_1: Option<Vec<MetadataType>>,
    #[serde(rename = "mainField2", skip_serializing_if = "Option::is_none")]
    pub main_field_2: Option<Vec<MetadataType>>,
    #[serde(rename = "mainField3", skip_serializing_if = "Option::is_none")]
    pub main_field_3: Option<Vec<MetadataType>>,
    #[serde(rename = "mainField4", skip_serializing_if = "Option::is_none")]
    pub main_field_4: Option<Vec<MetadataType>>,
}

impl MetadataTags {
    pub fn slot(&self, slot: TextSlot) -> Option<&[MetadataType]> {
        match slot {
            TextSlot::One => self.main_field_1.as_deref(),
            TextSlot::Two => self.main_field_2.as_deref(),
            TextSlot::Three => self.main_field_3.as_deref(),
            TextSlot::Four => self.main_field_4.as_deref(),
        }
    }

    /// Record the tags of a slot. An empty list leaves the slot untagged.
    pub fn set_slot(&mut self, slot: TextSlot, tags: Vec<MetadataType>) {
        let value = if tags.is_empty() { None } else { Some(tags) };
        match slot {
            TextSlot::One => self.main_field_1 = value,
            TextSlot::Two => self.main_field_2 = value,
            TextSlot::Three => self.main_field_3 = value,
            TextSlot::Four => self.main_field_4 = value,
        }
    }
}

/// One outbound display-update call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayUpdate {
    #[serde(rename = "mainField1", skip_serializing_if = "Option::is_none")]
    pub main_field_1: Option<String>,
    #[serde(rename = "mainField2", skip_serializing_if = "Option::is_none")]
    pub main_field_2: Option<String>,
    #[serde(rename = "mainField3", skip_serializing_if = "Option::is_none")]
    pub main_field_3: Option<String>,
    #[serde(rename = "mainField4", skip_serializing_if = "Option::is_none")]
    pub main_field_4: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_track: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alignment: Option<TextAlignment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata_tags: Option<MetadataTags>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub graphic: Option<ImageRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary_graphic: Option<ImageRef>,
}

impl DisplayUpdate {
    pub fn main_field(&self, slot: TextSlot) -> Option<&str> {
        match slot {
            TextSlot::One => self.main_field_1.as_deref(),
            TextSlot::Two => self.main_field_2.as_deref(),
            TextSlot::Three => self.main_field_3.as_deref(),
            TextSlot::Four => self.main_field_4.as_deref(),
        }
    }

    pub fn set_main_field(&mut self, slot: TextSlot, text: impl Into<String>) {
        let text = Some(text.into());
        match slot {
            TextSlot::One => self.main_field_1 = text,
            TextSlot::Two => self.main_field_2 = text,
            TextSlot::Three => self.main_field_3 = text,
            TextSlot::Four => self.main_field_4 = text,
        }
    }

    /// Explicitly clear every text position the layout step owns.
    pub fn blank_text(&mut self) {
        for slot in TextSlot::ALL {
            self.set_main_field(slot, String::new());
        }
        self.media_track = Some(String::new());
        self.template_title = Some(String::new());
    }

    /// Copy of this update with the graphic fields dropped.
    pub fn text_only(&self) -> DisplayUpdate {
        DisplayUpdate {
            graphic: None,
            secondary_graphic: None,
            ..self.clone()
        }
    }

    /// Update carrying only graphics.
    ///
    /// Returns `None` when neither slot has an image, since such an update
    /// would carry nothing.
    pub fn image_only(
        graphic: Option<ImageRef>,
        secondary_graphic: Option<ImageRef>,
    ) -> Option<DisplayUpdate> {
        if graphic.is_none() && secondary_graphic.is_none() {
            return None;
        }
        Some(DisplayUpdate {
            graphic,
            secondary_graphic,
            ..DisplayUpdate::default()
        })
    }

    pub fn has_graphics(&self) -> bool {
        self.graphic.is_some() || self.secondary_graphic.is_some()
    }

    /// True when no field is present at all.
    pub fn is_empty(&self) -> bool {
        *self == DisplayUpdate::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::ImageType;

    fn populated() -> DisplayUpdate {
        let mut tags = MetadataTags::default();
        tags.set_slot(TextSlot::One, vec![MetadataType::MediaTitle]);
        tags.set_slot(TextSlot::Two, vec![MetadataType::MediaArtist]);
        DisplayUpdate {
            main_field_1: Some("Song".into()),
            main_field_2: Some("Artist".into()),
            main_field_3: Some("Album".into()),
            main_field_4: Some("1999".into()),
            media_track: Some("3/12".into()),
            template_title: Some("Now Playing".into()),
            alignment: Some(TextAlignment::Centered),
            metadata_tags: Some(tags),
            graphic: Some(ImageRef {
                value: "cover.png".into(),
                image_type: ImageType::Dynamic,
            }),
            secondary_graphic: Some(ImageRef {
                value: "0x21".into(),
                image_type: ImageType::Static,
            }),
        }
    }

    #[test]
    fn text_only_keeps_text_and_drops_graphics() {
        let full = populated();
        let text = full.text_only();

        for slot in TextSlot::ALL {
            assert_eq!(text.main_field(slot), full.main_field(slot));
        }
        assert_eq!(text.template_title, full.template_title);
        assert_eq!(text.metadata_tags, full.metadata_tags);
        assert_eq!(text.alignment, full.alignment);
        assert_eq!(text.media_track, full.media_track);
        assert!(!text.has_graphics());
    }

    #[test]
    fn absent_fields_are_omitted_on_the_wire() {
        let update = DisplayUpdate {
            main_field_1: Some("A".into()),
            ..DisplayUpdate::default()
        };
        let json = serde_json::to_value(&update).expect("serialize update");
        assert_eq!(json, serde_json::json!({ "mainField1": "A" }));
    }

    #[test]
    fn blanked_fields_are_sent_as_empty_strings() {
        let mut update = DisplayUpdate::default();
        update.blank_text();
        let json = serde_json::to_value(&update).expect("serialize update");
        assert_eq!(json["mainField4"], "");
        assert_eq!(json["mediaTrack"], "");
        assert_eq!(json["templateTitle"], "");
        assert!(json.get("graphic").is_none());
    }

    #[test]
    fn wire_names_match_protocol() {
        let json = serde_json::to_value(populated()).expect("serialize update");
        assert_eq!(json["alignment"], "CENTERED");
        assert_eq!(json["metadataTags"]["mainField1"][0], "mediaTitle");
        assert_eq!(json["secondaryGraphic"]["imageType"], "STATIC");
    }

    #[test]
    fn image_only_without_images_is_none() {
        assert!(DisplayUpdate::image_only(None, None).is_none());
    }

    #[test]
    fn empty_tag_list_leaves_slot_untagged() {
        let mut tags = MetadataTags::default();
        tags.set_slot(TextSlot::Three, Vec::new());
        assert!(tags.slot(TextSlot::Three).is_none());
    }
}
