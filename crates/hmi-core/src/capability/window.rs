use serde::{Deserialize, Serialize};

use super::DisplayCapability;

/// Text fields a window may declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TextFieldName {
    #[serde(rename = "mainField1")]
    MainField1,
    #[serde(rename = "mainField2")]
    MainField2,
    #[serde(rename = "mainField3")]
    MainField3,
    #[serde(rename = "mainField4")]
    MainField4,
    StatusBar,
    MediaClock,
    MediaTrack,
    TemplateTitle,
    AlertText1,
    AlertText2,
    AlertText3,
}

/// Image fields a window may declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ImageFieldName {
    SoftButtonImage,
    ChoiceImage,
    MenuIcon,
    CmdIcon,
    AppIcon,
    Graphic,
    SecondaryGraphic,
    AlertIcon,
}

/// Number of main text lines a surface can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum LineCount {
    One,
    Two,
    Three,
    #[default]
    Four,
}

impl LineCount {
    /// Line count from the highest main field number a window declares.
    ///
    /// Values outside 1..=4 are clamped.
    pub fn from_highest_main_field(highest: u8) -> Self {
        match highest {
            0 | 1 => LineCount::One,
            2 => LineCount::Two,
            3 => LineCount::Three,
            _ => LineCount::Four,
        }
    }

    pub fn get(self) -> u8 {
        match self {
            LineCount::One => 1,
            LineCount::Two => 2,
            LineCount::Three => 3,
            LineCount::Four => 4,
        }
    }
}

/// Negotiated protocol version of the connected head unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ProtocolVersion {
    pub major: u8,
    pub minor: u8,
    pub patch: u8,
}

impl ProtocolVersion {
    pub const fn new(major: u8, minor: u8, patch: u8) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }
}

impl std::fmt::Display for ProtocolVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Capability descriptor of the default main window.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowCapability {
    #[serde(default)]
    pub text_fields: Vec<TextFieldName>,
    #[serde(default)]
    pub image_fields: Vec<ImageFieldName>,
}

impl WindowCapability {
    pub fn new(text_fields: Vec<TextFieldName>, image_fields: Vec<ImageFieldName>) -> Self {
        Self {
            text_fields,
            image_fields,
        }
    }
}

impl DisplayCapability for WindowCapability {
    fn supports_text_field(&self, field: TextFieldName) -> bool {
        self.text_fields.contains(&field)
    }

    fn supports_image_field(&self, field: ImageFieldName) -> bool {
        self.image_fields.contains(&field)
    }

    fn line_count(&self) -> LineCount {
        let highest = self
            .text_fields
            .iter()
            .filter_map(|field| match field {
                TextFieldName::MainField1 => Some(1),
                TextFieldName::MainField2 => Some(2),
                TextFieldName::MainField3 => Some(3),
                TextFieldName::MainField4 => Some(4),
                _ => None,
            })
            .max()
            .unwrap_or(0);
        LineCount::from_highest_main_field(highest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_count_uses_highest_main_field() {
        let capability = WindowCapability::new(
            vec![
                TextFieldName::MainField1,
                TextFieldName::MainField3,
                TextFieldName::TemplateTitle,
            ],
            Vec::new(),
        );
        assert_eq!(capability.line_count(), LineCount::Three);
    }

    #[test]
    fn line_count_without_main_fields_is_one() {
        let capability = WindowCapability::new(vec![TextFieldName::MediaTrack], Vec::new());
        assert_eq!(capability.line_count(), LineCount::One);
    }

    #[test]
    fn image_support_is_membership() {
        let capability = WindowCapability::new(Vec::new(), vec![ImageFieldName::Graphic]);
        assert!(capability.supports_image_field(ImageFieldName::Graphic));
        assert!(!capability.supports_image_field(ImageFieldName::SecondaryGraphic));
    }

    #[test]
    fn deserializes_protocol_field_names() {
        let capability: WindowCapability = serde_json::from_str(
            r#"{"textFields":["mainField2","templateTitle"],"imageFields":["secondaryGraphic"]}"#,
        )
        .expect("parse window capability");
        assert_eq!(capability.line_count(), LineCount::Two);
        assert!(capability.supports_text_field(TextFieldName::TemplateTitle));
        assert!(capability.supports_image_field(ImageFieldName::SecondaryGraphic));
    }
}
