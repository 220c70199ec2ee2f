use crate::assets::decode::{SourceImage, load_image};
use crate::assets::resolve::AssetResolver;
use crate::book::BookOptions;
use crate::foundation::core::Rgba8;
use crate::manifest::document::Manifest;
use crate::manifest::model::FontDef;
use crate::manifest::page::Page;
use crate::text::fonts::{FontRole, FontSpec};

/// Default ink for running text.
pub(crate) const INK: Rgba8 = Rgba8::rgb(0x33, 0x33, 0x33);
/// Secondary text (dates, captions).
pub(crate) const MUTED: Rgba8 = Rgba8::rgb(0x88, 0x88, 0x88);

/// Everything a page renderer reads; renderers never mutate it.
pub(crate) struct PageContext<'a> {
    pub(crate) manifest: &'a Manifest,
    pub(crate) page: &'a Page,
    pub(crate) resolver: &'a AssetResolver,
    pub(crate) opts: &'a BookOptions,
}

impl PageContext<'_> {
    pub(crate) fn width(&self) -> f64 {
        self.manifest.page_size.width
    }

    pub(crate) fn height(&self) -> f64 {
        self.manifest.page_size.height
    }

    pub(crate) fn font(&self, role: FontRole, size_px: f32) -> FontSpec {
        self.opts.fonts.spec(role, size_px)
    }

    /// Role font overridden by a `Property` font node.
    pub(crate) fn font_def(&self, role: FontRole, size_px: f32, def: Option<&FontDef>) -> FontSpec {
        let spec = self.font(role, size_px);
        match def {
            Some(d) => spec.with_overrides(d.font_name.as_deref(), d.font_size),
            None => spec,
        }
    }

    /// Load a page-scoped asset; absent or undecodable files are logged and yield `None`.
    pub(crate) fn load_page_image(&self, uri: &str) -> Option<SourceImage> {
        if uri.trim().is_empty() {
            return None;
        }
        let path = self.resolver.resolve(uri, self.page.id);
        if !path.is_file() {
            tracing::warn!(uri, path = %path.display(), page_id = self.page.id, "media not in cache");
            return None;
        }
        match load_image(&path) {
            Ok(img) => Some(img),
            Err(e) => {
                tracing::warn!(uri, path = %path.display(), error = %e, "failed to decode media");
                None
            }
        }
    }

    /// The manifest-level avatar, when it was found at load time.
    pub(crate) fn load_profile_avatar(&self) -> Option<SourceImage> {
        let path = self.manifest.profile_avatar.as_deref()?;
        match load_image(path) {
            Ok(img) => Some(img),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "failed to decode profile avatar");
                None
            }
        }
    }
}
