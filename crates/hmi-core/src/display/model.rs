use serde::{Deserialize, Serialize};

/// Horizontal alignment of the main text fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TextAlignment {
    #[serde(rename = "LEFT_ALIGNED")]
    Left,
    #[serde(rename = "RIGHT_ALIGNED")]
    Right,
    #[serde(rename = "CENTERED")]
    Centered,
}

/// Semantic type of the text occupying a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MetadataType {
    MediaTitle,
    MediaArtist,
    MediaAlbum,
    MediaYear,
    MediaGenre,
    MediaStation,
    Rating,
    CurrentTemperature,
    MaximumTemperature,
    MinimumTemperature,
    WeatherTerm,
    Humidity,
}

/// One of the four numbered text positions.
///
/// Used both for the caller's logical fields and for the physical slots
/// of a payload; the layout step decides how one maps onto the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TextSlot {
    One,
    Two,
    Three,
    Four,
}

impl TextSlot {
    pub const ALL: [TextSlot; 4] = [TextSlot::One, TextSlot::Two, TextSlot::Three, TextSlot::Four];

    pub(crate) fn index(self) -> usize {
        match self {
            TextSlot::One => 0,
            TextSlot::Two => 1,
            TextSlot::Three => 2,
            TextSlot::Four => 3,
        }
    }
}
