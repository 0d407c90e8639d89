use serde::{Deserialize, Serialize};

/// Whether an image is resolved by the head unit itself or was uploaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ImageType {
    #[serde(rename = "STATIC")]
    Static,
    #[serde(rename = "DYNAMIC")]
    Dynamic,
}

/// Image reference as carried on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageRef {
    pub value: String,
    pub image_type: ImageType,
}

/// A graphic the application wants to display.
///
/// The name is the only identity: two references with the same name are
/// the same image as far as reconciliation is concerned.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GraphicRef {
    name: String,
    static_icon: bool,
}

impl GraphicRef {
    /// Artwork that must be uploaded before the head unit can show it.
    pub fn artwork(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            static_icon: false,
        }
    }

    /// Icon built into the head unit; never uploaded.
    pub fn static_icon(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            static_icon: true,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_static_icon(&self) -> bool {
        self.static_icon
    }

    pub fn to_image(&self) -> ImageRef {
        ImageRef {
            value: self.name.clone(),
            image_type: if self.static_icon {
                ImageType::Static
            } else {
                ImageType::Dynamic
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_icon_maps_to_static_image() {
        let image = GraphicRef::static_icon("0x11").to_image();
        assert_eq!(image.value, "0x11");
        assert_eq!(image.image_type, ImageType::Static);
    }

    #[test]
    fn artwork_maps_to_dynamic_image() {
        let image = GraphicRef::artwork("album.png").to_image();
        assert_eq!(image.image_type, ImageType::Dynamic);
    }
}
