use std::path::{Path, PathBuf};

use crate::assets::resolve::{AssetResolver, MediaRef};
use crate::canvas::plan::PagePlan;
use crate::canvas::surface::Canvas;
use crate::foundation::core::Rgba8;
use crate::foundation::error::{BookError, BookResult};
use crate::manifest::document::Manifest;
use crate::manifest::page::PageType;
use crate::pages::context::PageContext;
use crate::pages::dispatch::{self, px};
use crate::text::engine::TextEngine;
use crate::text::fonts::FontConfig;

/// Rendering options.
#[derive(Clone, Debug, PartialEq)]
pub struct BookOptions {
    /// Base URL QR payloads are built on.
    pub qr_base_url: String,
    /// Role to font-family mapping.
    pub fonts: FontConfig,
    /// Clear to `clear_rgba` before every [`Book::draw_page`]. Off by default: pages paint
    /// over whatever the buffer already holds.
    pub clear_before_draw: bool,
    /// Initial fill of a new canvas; marks pixels no page has touched.
    pub sentinel_rgba: Rgba8,
    /// Colour used by [`Book::clear`].
    pub clear_rgba: Rgba8,
}

impl Default for BookOptions {
    fn default() -> Self {
        Self {
            qr_base_url: "https://media.yearbook.example".to_owned(),
            fonts: FontConfig::default(),
            clear_before_draw: false,
            sentinel_rgba: Rgba8::rgb(255, 0, 255),
            clear_rgba: Rgba8::WHITE,
        }
    }
}

impl BookOptions {
    pub fn with_qr_base_url(mut self, url: impl Into<String>) -> Self {
        self.qr_base_url = url.into();
        self
    }

    pub fn with_fonts(mut self, fonts: FontConfig) -> Self {
        self.fonts = fonts;
        self
    }

    pub fn with_clear_before_draw(mut self, clear: bool) -> Self {
        self.clear_before_draw = clear;
        self
    }

    pub fn with_sentinel(mut self, rgba: Rgba8) -> Self {
        self.sentinel_rgba = rgba;
        self
    }

    pub fn with_clear_color(mut self, rgba: Rgba8) -> Self {
        self.clear_rgba = rgba;
        self
    }
}

/// Result of [`Book::draw_page`]. Drawing never fails; problems are logged.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageOutcome {
    /// The page was composed and rasterized. Unknown and malformed pages report their kind
    /// here after drawing background and footer only.
    Drawn { kind: PageType },
    /// Index past the last page; the canvas is untouched.
    OutOfRange,
    /// No manifest has been loaded yet.
    NotLoaded,
}

struct Loaded {
    manifest: Manifest,
    resolver: AssetResolver,
}

/// A loaded yearbook and its persistent page canvas.
///
/// `load` parses a manifest against a populated media cache; `draw_page` composes a page and
/// paints it onto the canvas. Access is single-threaded; the canvas is reused across calls.
pub struct Book {
    opts: BookOptions,
    text: TextEngine,
    loaded: Option<Loaded>,
    canvas: Option<Canvas>,
}

impl std::fmt::Debug for Book {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Book")
            .field("opts", &self.opts)
            .field("text", &self.text)
            .field("pages", &self.page_count())
            .field("canvas", &self.canvas)
            .finish()
    }
}

impl Default for Book {
    fn default() -> Self {
        Self::new(BookOptions::default())
    }
}

impl Book {
    pub fn new(opts: BookOptions) -> Self {
        Self {
            opts,
            text: TextEngine::new(),
            loaded: None,
            canvas: None,
        }
    }

    pub fn options(&self) -> &BookOptions {
        &self.opts
    }

    /// Font registry; register faces here before drawing.
    pub fn text_engine_mut(&mut self) -> &mut TextEngine {
        &mut self.text
    }

    /// Read and parse `manifest_path` against the cache at `media_root`.
    ///
    /// On failure any previously loaded book stays in place.
    #[tracing::instrument(skip_all, fields(manifest = %manifest_path.as_ref().display()))]
    pub fn load(
        &mut self,
        manifest_path: impl AsRef<Path>,
        media_root: impl AsRef<Path>,
    ) -> BookResult<()> {
        let path = manifest_path.as_ref();
        let bytes = std::fs::read(path)
            .map_err(|e| BookError::io(format!("read manifest '{}': {e}", path.display())))?;
        self.load_bytes(&bytes, media_root)
    }

    /// Parse manifest bytes against the cache at `media_root`.
    pub fn load_bytes(&mut self, bytes: &[u8], media_root: impl AsRef<Path>) -> BookResult<()> {
        let media_root = media_root.as_ref();
        if media_root.as_os_str().is_empty() {
            return Err(BookError::validation("media root is empty"));
        }
        if !media_root.is_dir() {
            return Err(BookError::validation(format!(
                "media root '{}' is not a directory",
                media_root.display()
            )));
        }

        let resolver = AssetResolver::new(media_root);
        let manifest = Manifest::from_slice(bytes, &resolver)?;
        let size = manifest.page_size;

        match &self.canvas {
            None => {
                self.canvas = Some(Canvas::new(
                    px(size.width),
                    px(size.height),
                    self.opts.sentinel_rgba,
                )?);
            }
            Some(c) if c.width() != px(size.width).max(1) || c.height() != px(size.height).max(1) => {
                tracing::warn!(
                    canvas_w = c.width(),
                    canvas_h = c.height(),
                    page_w = size.width,
                    page_h = size.height,
                    "page size changed; keeping existing canvas"
                );
            }
            Some(_) => {}
        }

        tracing::info!(pages = manifest.pages.len(), "manifest loaded");
        self.loaded = Some(Loaded { manifest, resolver });
        Ok(())
    }

    pub fn manifest(&self) -> Option<&Manifest> {
        self.loaded.as_ref().map(|l| &l.manifest)
    }

    pub fn resolver(&self) -> Option<&AssetResolver> {
        self.loaded.as_ref().map(|l| &l.resolver)
    }

    pub fn page_count(&self) -> usize {
        self.manifest().map_or(0, |m| m.pages.len())
    }

    /// Media the loaded book references, with cache status.
    pub fn media_refs(&self) -> Vec<MediaRef> {
        match &self.loaded {
            Some(l) => l.manifest.media_refs(&l.resolver),
            None => Vec::new(),
        }
    }

    /// Compose page `index` without touching the canvas.
    pub fn compose_page(&mut self, index: usize) -> Option<PagePlan> {
        let loaded = self.loaded.as_ref()?;
        let page = loaded.manifest.pages.get(index)?;
        let ctx = PageContext {
            manifest: &loaded.manifest,
            page,
            resolver: &loaded.resolver,
            opts: &self.opts,
        };
        Some(dispatch::compose(&ctx, &mut self.text))
    }

    /// Compose page `index` and paint it onto the canvas.
    #[tracing::instrument(skip(self))]
    pub fn draw_page(&mut self, index: usize) -> PageOutcome {
        let Some(loaded) = self.loaded.as_ref() else {
            tracing::warn!("draw_page before load");
            return PageOutcome::NotLoaded;
        };
        let Some(kind) = loaded.manifest.pages.get(index).map(|p| p.kind.page_type()) else {
            tracing::warn!(total = loaded.manifest.pages.len(), "page index out of range");
            return PageOutcome::OutOfRange;
        };
        let Some(plan) = self.compose_page(index) else {
            return PageOutcome::OutOfRange;
        };

        if self.opts.clear_before_draw {
            self.clear();
        }
        let Some(canvas) = self.canvas.as_mut() else {
            return PageOutcome::NotLoaded;
        };
        if let Err(e) = canvas.execute(&plan, &mut self.text) {
            tracing::warn!(error = %e, "page rasterization failed");
        }
        PageOutcome::Drawn { kind }
    }

    /// Fill the canvas with the configured clear colour.
    pub fn clear(&mut self) {
        if let Some(c) = self.canvas.as_mut() {
            c.clear(self.opts.clear_rgba);
        }
    }

    pub fn canvas(&self) -> Option<&Canvas> {
        self.canvas.as_ref()
    }

    /// Draw every page in order and write each to `{out}/out/{index}.png`.
    pub fn save_all(&mut self, out: impl AsRef<Path>) -> BookResult<Vec<PathBuf>> {
        if self.loaded.is_none() {
            return Err(BookError::validation("no manifest loaded"));
        }
        let dir = out.as_ref().join("out");
        std::fs::create_dir_all(&dir)
            .map_err(|e| BookError::io(format!("create '{}': {e}", dir.display())))?;

        let mut written = Vec::with_capacity(self.page_count());
        for index in 0..self.page_count() {
            self.draw_page(index);
            let path = dir.join(format!("{index}.png"));
            self.save_current(&path)?;
            written.push(path);
        }
        Ok(written)
    }

    /// Write the canvas as it currently stands.
    pub fn save_current(&self, path: &Path) -> BookResult<()> {
        let canvas = self
            .canvas
            .as_ref()
            .ok_or_else(|| BookError::validation("no canvas; load a manifest first"))?;
        canvas.save_png(path)
    }
}
