/// Typographic role a layout asks for; mapped to a concrete family by [`FontConfig`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FontRole {
    /// Titles, headlines and numerals.
    Heading,
    /// Running text, captions and labels.
    Body,
    /// Soft rounded face used for handwritten-style wishes and names.
    Rounded,
}

/// Role to family-alias mapping.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FontConfig {
    /// Family alias for [`FontRole::Heading`].
    pub heading: String,
    /// Family alias for [`FontRole::Body`].
    pub body: String,
    /// Family alias for [`FontRole::Rounded`].
    pub rounded: String,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            heading: "yahei".to_owned(),
            body: "SourceHanSansCN-Normal".to_owned(),
            rounded: "yuanti".to_owned(),
        }
    }
}

impl FontConfig {
    /// Family alias configured for `role`.
    pub fn family(&self, role: FontRole) -> &str {
        match role {
            FontRole::Heading => &self.heading,
            FontRole::Body => &self.body,
            FontRole::Rounded => &self.rounded,
        }
    }

    /// Font for `role` at `size_px`.
    pub fn spec(&self, role: FontRole, size_px: f32) -> FontSpec {
        FontSpec::new(self.family(role), size_px)
    }
}

/// Concrete font request: family alias plus pixel size.
#[derive(Clone, Debug, PartialEq)]
pub struct FontSpec {
    /// Registered family alias.
    pub family: String,
    /// Pixel size.
    pub size_px: f32,
}

impl FontSpec {
    /// Build a font request.
    pub fn new(family: impl Into<String>, size_px: f32) -> Self {
        Self {
            family: family.into(),
            size_px,
        }
    }

    /// Replace family and/or size with manifest overrides when present.
    pub fn with_overrides(mut self, family: Option<&str>, size_px: Option<f64>) -> Self {
        if let Some(f) = family.filter(|f| !f.trim().is_empty()) {
            self.family = f.to_owned();
        }
        if let Some(s) = size_px.filter(|s| s.is_finite() && *s > 0.0) {
            self.size_px = s as f32;
        }
        self
    }
}
