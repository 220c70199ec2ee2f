//! Typed node shapes shared by the page payloads.
//!
//! Every field is optional at the JSON level; absent nodes deserialize to their defaults so
//! renderers can pattern-match instead of re-validating raw structure.

use serde::Deserialize;

use crate::assets::color::ColorDef;
use crate::manifest::lenient;

/// Font override carried in a page `Property` block.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct FontDef {
    /// Family alias.
    #[serde(deserialize_with = "lenient::opt_string")]
    pub font_name: Option<String>,
    /// Pixel size.
    #[serde(deserialize_with = "lenient::opt_f64")]
    pub font_size: Option<f64>,
}

/// Labelled text placed at a fixed or data-supplied anchor.
///
/// A bare JSON string is accepted as a field with only `Text` set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextField {
    /// Content.
    pub text: String,
    /// Left edge override.
    pub x: Option<f64>,
    /// Baseline (or box top when `width` is set) override.
    pub y: Option<f64>,
    /// Wrap width; turns the field into a word-wrapped box.
    pub width: Option<f64>,
    /// Family override.
    pub font_name: Option<String>,
    /// Size override.
    pub font_size: Option<f64>,
    pub(crate) color: ColorDef,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "PascalCase", default)]
struct TextFieldRepr {
    #[serde(deserialize_with = "lenient::string_or_empty")]
    text: String,
    #[serde(deserialize_with = "lenient::opt_f64")]
    x: Option<f64>,
    #[serde(deserialize_with = "lenient::opt_f64")]
    y: Option<f64>,
    #[serde(deserialize_with = "lenient::opt_f64")]
    width: Option<f64>,
    #[serde(deserialize_with = "lenient::opt_string")]
    font_name: Option<String>,
    #[serde(deserialize_with = "lenient::opt_f64")]
    font_size: Option<f64>,
    color: ColorDef,
}

impl<'de> Deserialize<'de> for TextField {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Plain(String),
            Number(f64),
            Full(TextFieldRepr),
        }

        Ok(match Repr::deserialize(deserializer)? {
            Repr::Plain(text) => Self {
                text,
                ..Self::default()
            },
            Repr::Number(n) => Self {
                text: n.to_string(),
                ..Self::default()
            },
            Repr::Full(r) => Self {
                text: r.text,
                x: r.x,
                y: r.y,
                width: r.width,
                font_name: r.font_name,
                font_size: r.font_size,
                color: r.color,
            },
        })
    }
}

impl TextField {
    /// Whether there is anything to draw.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// String with explicit per-character x offsets on one baseline.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct TextLine {
    /// Content.
    #[serde(deserialize_with = "lenient::string_or_empty")]
    pub text: String,
    /// One x offset per character.
    #[serde(rename = "X", deserialize_with = "lenient::f64_vec")]
    pub offsets: Vec<f64>,
    /// Shared baseline.
    #[serde(deserialize_with = "lenient::f64_or_zero")]
    pub y: f64,
    /// Family override.
    #[serde(deserialize_with = "lenient::opt_string")]
    pub font_name: Option<String>,
    /// Size override.
    #[serde(deserialize_with = "lenient::opt_f64")]
    pub font_size: Option<f64>,
    pub(crate) color: ColorDef,
}

/// Target box for a cached media image.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct MediaBox {
    /// Remote URI; resolved against the page-scoped cache.
    #[serde(deserialize_with = "lenient::string_or_empty")]
    pub url: String,
    /// Box left.
    #[serde(deserialize_with = "lenient::f64_or_zero")]
    pub x: f64,
    /// Box top.
    #[serde(deserialize_with = "lenient::f64_or_zero")]
    pub y: f64,
    /// Box width.
    #[serde(deserialize_with = "lenient::f64_or_zero")]
    pub width: f64,
    /// Box height.
    #[serde(deserialize_with = "lenient::f64_or_zero")]
    pub height: f64,
    /// Corner radius; values above half the short side produce a circle.
    #[serde(deserialize_with = "lenient::opt_f64")]
    pub radius: Option<f64>,
    /// Rotation in degrees around the image centre.
    #[serde(deserialize_with = "lenient::opt_f64")]
    pub rotate: Option<f64>,
    /// Rotate landscape sources by -90 degrees when the box is portrait.
    #[serde(deserialize_with = "lenient::bool_or_false")]
    pub auto_rotate: bool,
}

/// Point anchor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Anchor {
    /// X.
    #[serde(deserialize_with = "lenient::f64_or_zero")]
    pub x: f64,
    /// Y.
    #[serde(deserialize_with = "lenient::f64_or_zero")]
    pub y: f64,
}

/// Square placement (QR codes, avatars); any missing part falls back to the layout default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct SquareBox {
    #[serde(deserialize_with = "lenient::opt_f64")]
    pub x: Option<f64>,
    #[serde(deserialize_with = "lenient::opt_f64")]
    pub y: Option<f64>,
    /// Side in pixels, clamped to the page's raster limit. A QR code below one pixel per module
    /// keeps its modules and overflows this box.
    #[serde(deserialize_with = "lenient::opt_f64")]
    pub size: Option<f64>,
}

/// Label/value row.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct LabelValue {
    #[serde(deserialize_with = "lenient::string_or_empty")]
    pub label: String,
    #[serde(deserialize_with = "lenient::string_or_empty")]
    pub value: String,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub unit: Option<String>,
    #[serde(deserialize_with = "lenient::opt_f64")]
    pub x: Option<f64>,
    #[serde(deserialize_with = "lenient::opt_f64")]
    pub y: Option<f64>,
}

/// Value with a unit, e.g. height in centimetres.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Measurement {
    #[serde(deserialize_with = "lenient::opt_string")]
    pub value: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub unit: Option<String>,
}

impl Measurement {
    /// `"{value} {unit}"`, or `None` without a value.
    pub fn display(&self) -> Option<String> {
        let value = self.value.as_deref().filter(|v| !v.trim().is_empty())?;
        Some(match self.unit.as_deref().filter(|u| !u.is_empty()) {
            Some(unit) => format!("{value} {unit}"),
            None => value.to_owned(),
        })
    }
}

/// Left/right eye acuity.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Vision {
    #[serde(deserialize_with = "lenient::opt_string")]
    pub left: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub right: Option<String>,
}

/// Table-of-contents entry.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct DirectoryEntry {
    #[serde(deserialize_with = "lenient::string_or_empty")]
    pub text: String,
    /// Target page number.
    #[serde(deserialize_with = "lenient::i64_or_zero")]
    pub pagination: i64,
    #[serde(deserialize_with = "lenient::bool_or_false")]
    pub has_video: bool,
    #[serde(deserialize_with = "lenient::node_vec")]
    pub children: Vec<DirectoryEntry>,
}

/// One classmate card on an audio page.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct AudioCard {
    /// Avatar URI.
    #[serde(deserialize_with = "lenient::string_or_empty")]
    pub avatar: String,
    #[serde(deserialize_with = "lenient::string_or_empty")]
    pub name: String,
    /// 1 = male, 2 = female, anything else unknown.
    #[serde(deserialize_with = "lenient::i64_or_zero")]
    pub gender: i64,
    #[serde(deserialize_with = "lenient::string_or_empty")]
    pub caption: String,
}

#[cfg(test)]
#[path = "../../tests/unit/manifest/model.rs"]
mod tests;
