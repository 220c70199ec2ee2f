use std::collections::BTreeMap;
use std::path::Path;

use crate::foundation::error::{BookError, BookResult};
use crate::text::fonts::FontSpec;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// RGBA8 brush colour carried through Parley layouts.
pub(crate) struct TextBrushRgba8 {
    pub(crate) r: u8,
    pub(crate) g: u8,
    pub(crate) b: u8,
    pub(crate) a: u8,
}

#[derive(Clone)]
pub(crate) struct LoadedFont {
    /// Family name as reported by the font itself, used for Parley font stacks.
    family_name: String,
}

/// Shaped text ready for rasterization. Each glyph run carries the face Parley resolved for it.
pub(crate) struct ShapedText {
    pub(crate) layout: parley::Layout<TextBrushRgba8>,
    /// Baseline offset of the first line from the layout top.
    pub(crate) first_baseline: f32,
}

/// Font registry plus Parley shaping contexts.
///
/// Fonts are registered under an alias (typically the file stem). Unknown aliases fall back to
/// the first registered face. With no faces at all, measurement uses a fixed per-character
/// estimate and rasterization skips text.
pub struct TextEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
    fonts: BTreeMap<String, LoadedFont>,
    fallback: Option<String>,
}

impl Default for TextEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TextEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextEngine")
            .field("fonts", &self.fonts.keys().collect::<Vec<_>>())
            .field("fallback", &self.fallback)
            .finish()
    }
}

impl TextEngine {
    /// Construct an engine with no registered fonts.
    pub fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
            fonts: BTreeMap::new(),
            fallback: None,
        }
    }

    /// Register font bytes under `alias`.
    pub fn register_font(&mut self, alias: impl Into<String>, bytes: Vec<u8>) -> BookResult<()> {
        let alias = alias.into();
        let families = self
            .font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(bytes), None);
        let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
            BookError::validation(format!("no font families found in font '{alias}'"))
        })?;
        let family_name = self
            .font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| BookError::validation("registered font family has no name"))?
            .to_string();

        tracing::debug!(alias = %alias, family = %family_name, "registered font");
        if self.fallback.is_none() {
            self.fallback = Some(alias.clone());
        }
        self.fonts.insert(alias, LoadedFont { family_name });
        Ok(())
    }

    /// Read and register a font file.
    pub fn register_font_file(
        &mut self,
        alias: impl Into<String>,
        path: impl AsRef<Path>,
    ) -> BookResult<()> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)
            .map_err(|e| BookError::io(format!("read font '{}': {e}", path.display())))?;
        self.register_font(alias, bytes)
    }

    /// Register every `.ttf`, `.otf` and `.ttc` file in `dir`, aliased by file stem.
    ///
    /// Files are visited in name order so the fallback face is stable.
    pub fn register_fonts_dir(&mut self, dir: impl AsRef<Path>) -> BookResult<usize> {
        let dir = dir.as_ref();
        let entries = std::fs::read_dir(dir)
            .map_err(|e| BookError::io(format!("read font dir '{}': {e}", dir.display())))?;
        let mut paths = entries
            .filter_map(|e| e.ok().map(|e| e.path()))
            .filter(|p| {
                p.extension()
                    .and_then(|e| e.to_str())
                    .is_some_and(|e| matches!(e.to_ascii_lowercase().as_str(), "ttf" | "otf" | "ttc"))
            })
            .collect::<Vec<_>>();
        paths.sort();

        let mut n = 0;
        for path in paths {
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            match self.register_font_file(stem.to_owned(), &path) {
                Ok(()) => n += 1,
                Err(e) => tracing::warn!(path = %path.display(), error = %e, "skipping font"),
            }
        }
        Ok(n)
    }

    /// Whether any face has been registered.
    pub fn has_fonts(&self) -> bool {
        !self.fonts.is_empty()
    }

    /// Registered aliases in sorted order.
    pub fn aliases(&self) -> impl Iterator<Item = &str> {
        self.fonts.keys().map(String::as_str)
    }

    fn lookup(&self, alias: &str) -> Option<&LoadedFont> {
        self.fonts
            .get(alias)
            .or_else(|| self.fallback.as_deref().and_then(|f| self.fonts.get(f)))
    }

    /// Advance width of `text` set in `font`.
    pub fn measure(&mut self, text: &str, font: &FontSpec) -> f64 {
        if text.is_empty() {
            return 0.0;
        }
        match self.shape(text, font, TextBrushRgba8::default(), None) {
            Some(shaped) => f64::from(shaped.layout.width()),
            None => estimate_width(text, font.size_px),
        }
    }

    /// Shape `text`; wrapped to `max_width` when given.
    pub(crate) fn shape(
        &mut self,
        text: &str,
        font: &FontSpec,
        brush: TextBrushRgba8,
        max_width: Option<f32>,
    ) -> Option<ShapedText> {
        if !font.size_px.is_finite() || font.size_px <= 0.0 {
            return None;
        }
        let loaded = self.lookup(&font.family)?.clone();

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(loaded.family_name)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(font.size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        match max_width {
            Some(w) => {
                layout.break_all_lines(Some(w));
                layout.align(
                    Some(w),
                    parley::Alignment::Start,
                    parley::AlignmentOptions::default(),
                );
            }
            None => layout.break_all_lines(None),
        }

        let first_baseline = layout
            .lines()
            .next()
            .map(|line| line.metrics().baseline)
            .unwrap_or(font.size_px);

        Some(ShapedText {
            layout,
            first_baseline,
        })
    }
}

/// Deterministic width estimate used when no face is registered.
pub(crate) fn estimate_width(text: &str, size_px: f32) -> f64 {
    let size = f64::from(size_px.max(0.0));
    text.chars()
        .map(|c| if c.is_ascii() { 0.6 * size } else { size })
        .sum()
}

#[cfg(test)]
#[path = "../../tests/unit/text/engine.rs"]
mod tests;
