use std::path::Path;
use std::sync::Arc;

use anyhow::Context;

use crate::assets::svg_raster::rasterize_svg_natural;
use crate::foundation::core::{premultiply_rgba8_in_place, unpremultiply_rgba8_in_place};
use crate::foundation::error::{BookError, BookResult};

/// Decoded raster in premultiplied RGBA8 form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RasterImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel bytes in row-major premultiplied RGBA8.
    pub rgba8_premul: Arc<Vec<u8>>,
}

impl RasterImage {
    /// Wrap already-premultiplied pixels.
    pub fn from_premul(width: u32, height: u32, rgba8_premul: Vec<u8>) -> BookResult<Self> {
        let expected = (width as usize)
            .saturating_mul(height as usize)
            .saturating_mul(4);
        if rgba8_premul.len() != expected {
            return Err(BookError::render(format!(
                "raster byte len mismatch: got {}, expected {expected}",
                rgba8_premul.len()
            )));
        }
        Ok(Self {
            width,
            height,
            rgba8_premul: Arc::new(rgba8_premul),
        })
    }

    fn from_rgba_image(rgba: image::RgbaImage) -> Self {
        let (width, height) = rgba.dimensions();
        let mut bytes = rgba.into_raw();
        premultiply_rgba8_in_place(&mut bytes);
        Self {
            width,
            height,
            rgba8_premul: Arc::new(bytes),
        }
    }
}

/// Decoded source image kept in straight alpha until it has been scaled for placement.
#[derive(Clone, Debug)]
pub struct SourceImage {
    pixels: image::RgbaImage,
}

impl SourceImage {
    /// Source width in pixels.
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    /// Source height in pixels.
    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Resample to exactly `width` x `height` and premultiply.
    pub fn scaled(&self, width: u32, height: u32) -> RasterImage {
        let width = width.max(1);
        let height = height.max(1);
        if width == self.width() && height == self.height() {
            return RasterImage::from_rgba_image(self.pixels.clone());
        }
        let resized = image::imageops::resize(
            &self.pixels,
            width,
            height,
            image::imageops::FilterType::Triangle,
        );
        RasterImage::from_rgba_image(resized)
    }

    /// Centred square crop on the short side.
    pub fn center_square(&self) -> SourceImage {
        let (w, h) = (self.width(), self.height());
        let side = w.min(h);
        let view = image::imageops::crop_imm(&self.pixels, (w - side) / 2, (h - side) / 2, side, side);
        SourceImage {
            pixels: view.to_image(),
        }
    }

    /// Premultiplied copy at natural size.
    pub fn to_raster(&self) -> RasterImage {
        RasterImage::from_rgba_image(self.pixels.clone())
    }
}

/// Decode encoded bytes. `ext` selects the SVG path; everything else goes through `image`.
pub fn decode_image(bytes: &[u8], ext: &str) -> BookResult<SourceImage> {
    if ext.eq_ignore_ascii_case("svg") {
        return decode_svg(bytes);
    }
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    Ok(SourceImage {
        pixels: dyn_img.to_rgba8(),
    })
}

/// Read and decode a cached media file.
pub fn load_image(path: &Path) -> BookResult<SourceImage> {
    let bytes = std::fs::read(path)
        .map_err(|e| BookError::io(format!("read '{}': {e}", path.display())))?;
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default();
    decode_image(&bytes, ext)
}

fn decode_svg(bytes: &[u8]) -> BookResult<SourceImage> {
    let opts = usvg::Options::default();
    let tree = usvg::Tree::from_data(bytes, &opts).context("parse svg tree")?;
    let (width, height, mut data) = rasterize_svg_natural(&tree)?;
    unpremultiply_rgba8_in_place(&mut data);
    let pixels = image::RgbaImage::from_raw(width, height, data)
        .ok_or_else(|| BookError::render("svg raster buffer has unexpected size"))?;
    Ok(SourceImage { pixels })
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
