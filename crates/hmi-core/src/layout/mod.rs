//! Text layout.
//!
//! Turns the caller's four logical text fields into the physical main
//! fields a surface has, merging fields when there are fewer lines than
//! fields. Merged text is joined with [`FIELD_SEPARATOR`].
//!
//! Merge rule for a pair of fields sharing one slot:
//! - both present: "earlier - later" (formatted), both tags recorded
//! - only one present: that field alone (unformatted), only its tag recorded

use crate::capability::{CapabilityResolver, LineCount, TextFieldName};
use crate::display::{
    DesiredDisplayState, DisplayUpdate, MetadataTags, MetadataType, TextField, TextSlot,
};

pub const FIELD_SEPARATOR: &str = " - ";

/// Build the text part of a display update.
///
/// All text positions are blanked first so that fields no longer wanted
/// are cleared on screen; then only what the surface supports is filled.
pub fn assemble_text(desired: &DesiredDisplayState, capability: &CapabilityResolver) -> DisplayUpdate {
    let mut update = DisplayUpdate {
        alignment: desired.alignment,
        ..DisplayUpdate::default()
    };
    update.blank_text();

    if let Some(media_track) = &desired.media_track {
        if capability.supports_text_field(TextFieldName::MediaTrack) {
            update.media_track = Some(media_track.clone());
        }
    }

    if let Some(title) = &desired.title {
        if capability.supports_text_field(TextFieldName::TemplateTitle) {
            update.template_title = Some(title.clone());
        }
    }

    if desired.present_text().is_empty() {
        return update;
    }

    let tags = match capability.line_count() {
        LineCount::One => assemble_one_line(desired, &mut update),
        LineCount::Two => assemble_two_lines(desired, &mut update),
        LineCount::Three => assemble_three_lines(desired, &mut update),
        LineCount::Four => assemble_four_lines(desired, &mut update),
    };
    update.metadata_tags = Some(tags);
    update
}

fn assemble_one_line(desired: &DesiredDisplayState, update: &mut DisplayUpdate) -> MetadataTags {
    update.set_main_field(TextSlot::One, desired.present_text().join(FIELD_SEPARATOR));

    let mut tags = MetadataTags::default();
    tags.set_slot(TextSlot::One, desired.all_metadata());
    tags
}

fn assemble_two_lines(desired: &DesiredDisplayState, update: &mut DisplayUpdate) -> MetadataTags {
    let mut tags = MetadataTags::default();
    let field = |slot| desired.text_field(slot);

    let first = SlotText::merge(field(TextSlot::One), field(TextSlot::Two), TagOrder::LaterFirst);
    first.write(TextSlot::One, update, &mut tags);

    let second = SlotText::merge(
        field(TextSlot::Three),
        field(TextSlot::Four),
        TagOrder::LaterFirst,
    );
    second.write(TextSlot::Two, update, &mut tags);
    tags
}

fn assemble_three_lines(desired: &DesiredDisplayState, update: &mut DisplayUpdate) -> MetadataTags {
    let mut tags = MetadataTags::default();
    let field = |slot| desired.text_field(slot);

    SlotText::single(field(TextSlot::One)).write(TextSlot::One, update, &mut tags);
    SlotText::single(field(TextSlot::Two)).write(TextSlot::Two, update, &mut tags);
    SlotText::merge(
        field(TextSlot::Three),
        field(TextSlot::Four),
        TagOrder::EarlierFirst,
    )
    .write(TextSlot::Three, update, &mut tags);
    tags
}

fn assemble_four_lines(desired: &DesiredDisplayState, update: &mut DisplayUpdate) -> MetadataTags {
    let mut tags = MetadataTags::default();
    for slot in TextSlot::ALL {
        SlotText::single(desired.text_field(slot)).write(slot, update, &mut tags);
    }
    tags
}

/// Order of the two tags when a merged slot is formatted.
#[derive(Debug, Clone, Copy)]
enum TagOrder {
    EarlierFirst,
    LaterFirst,
}

/// Text and tags accumulated for one physical slot.
#[derive(Debug, Default)]
struct SlotText {
    text: String,
    tags: Vec<MetadataType>,
}

impl SlotText {
    fn single(field: &TextField) -> Self {
        match field.value() {
            Some(text) => Self {
                text: text.to_string(),
                tags: field.kind.into_iter().collect(),
            },
            None => Self::default(),
        }
    }

    fn merge(earlier: &TextField, later: &TextField, order: TagOrder) -> Self {
        match (earlier.value(), later.value()) {
            (Some(first), Some(second)) => {
                let tags = match order {
                    TagOrder::EarlierFirst => [earlier.kind, later.kind],
                    TagOrder::LaterFirst => [later.kind, earlier.kind],
                };
                Self {
                    text: format!("{first}{FIELD_SEPARATOR}{second}"),
                    tags: tags.into_iter().flatten().collect(),
                }
            }
            (Some(_), None) => Self::single(earlier),
            (None, _) => Self::single(later),
        }
    }

    /// Empty text leaves the slot at its blanked value.
    fn write(self, slot: TextSlot, update: &mut DisplayUpdate, tags: &mut MetadataTags) {
        if self.text.is_empty() {
            return;
        }
        update.set_main_field(slot, self.text);
        tags.set_slot(slot, self.tags);
    }
}
