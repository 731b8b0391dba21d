use crate::foundation::error::{PinError, PinResult};

/// Output raster dimensions (portrait pin format).
pub const CANVAS_WIDTH: u32 = 1000;
/// Output raster height.
pub const CANVAS_HEIGHT: u32 = 1500;

/// One of the five fixed visual templates.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum StyleId {
    #[default]
    #[serde(rename = "style1")]
    Style1,
    #[serde(rename = "style2")]
    Style2,
    #[serde(rename = "style3")]
    Style3,
    #[serde(rename = "style4")]
    Style4,
    #[serde(rename = "style5")]
    Style5,
}

impl StyleId {
    pub const ALL: [StyleId; 5] = [
        StyleId::Style1,
        StyleId::Style2,
        StyleId::Style3,
        StyleId::Style4,
        StyleId::Style5,
    ];

    /// Parse the wire/CLI form (`"style1"`..`"style5"`).
    pub fn parse(s: &str) -> Option<StyleId> {
        match s {
            "style1" => Some(StyleId::Style1),
            "style2" => Some(StyleId::Style2),
            "style3" => Some(StyleId::Style3),
            "style4" => Some(StyleId::Style4),
            "style5" => Some(StyleId::Style5),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StyleId::Style1 => "style1",
            StyleId::Style2 => "style2",
            StyleId::Style3 => "style3",
            StyleId::Style4 => "style4",
            StyleId::Style5 => "style5",
        }
    }
}

/// Boundary input for one render, as accepted by [`crate::service::RenderService`].
///
/// `branding_text` empty means "no branding". The base image is produced by the
/// upstream collaborator from `image_prompt`; [`RenderRequest`] is what the
/// rendering core itself consumes.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct RenderInput {
    pub image_prompt: String,
    pub title: String,
    #[serde(default)]
    pub branding_text: String,
    #[serde(default)]
    pub style: StyleId,
}

impl RenderInput {
    /// Reject missing required fields before any collaborator call.
    pub fn validate(&self) -> PinResult<()> {
        if self.image_prompt.trim().is_empty() {
            return Err(PinError::validation("missing image_prompt parameter"));
        }
        if self.title.trim().is_empty() {
            return Err(PinError::validation("missing title parameter"));
        }
        Ok(())
    }
}

/// Immutable input to the compositing pipeline: decoded base image bytes plus
/// the text fields and selected style.
#[derive(Clone, Debug)]
pub struct RenderRequest {
    /// Encoded image bytes (any format `image` can sniff).
    pub base_image: Vec<u8>,
    pub title: String,
    /// Empty string disables branding elements.
    pub branding_text: String,
    pub style: StyleId,
}

impl RenderRequest {
    pub fn new(base_image: Vec<u8>, title: impl Into<String>, style: StyleId) -> Self {
        Self {
            base_image,
            title: title.into(),
            branding_text: String::new(),
            style,
        }
    }

    pub fn with_branding(mut self, branding: impl Into<String>) -> Self {
        self.branding_text = branding.into();
        self
    }

    pub fn has_branding(&self) -> bool {
        !self.branding_text.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn style_id_round_trips_wire_form() {
        for id in StyleId::ALL {
            assert_eq!(StyleId::parse(id.as_str()), Some(id));
        }
        assert_eq!(StyleId::parse("style9"), None);
    }

    #[test]
    fn style_id_serde_uses_wire_names() {
        let s = serde_json::to_string(&StyleId::Style3).unwrap();
        assert_eq!(s, "\"style3\"");
        let de: StyleId = serde_json::from_str("\"style5\"").unwrap();
        assert_eq!(de, StyleId::Style5);
    }

    #[test]
    fn validate_rejects_missing_fields() {
        let input = RenderInput {
            image_prompt: String::new(),
            title: "t".into(),
            branding_text: String::new(),
            style: StyleId::default(),
        };
        assert!(input.validate().is_err());

        let input = RenderInput {
            image_prompt: "a cabin".into(),
            title: "  ".into(),
            branding_text: String::new(),
            style: StyleId::default(),
        };
        assert!(input.validate().is_err());
    }

    #[test]
    fn default_style_is_style1() {
        let input: RenderInput =
            serde_json::from_str(r#"{"image_prompt":"p","title":"t"}"#).unwrap();
        assert_eq!(input.style, StyleId::Style1);
        assert!(input.branding_text.is_empty());
    }
}
