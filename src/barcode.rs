//! QR codes pointing at the hosted copy of a page's source video.

use qrcode::{Color, EcLevel, QrCode};

use crate::assets::decode::RasterImage;
use crate::assets::resolve::{uri_digest, uri_extension};
use crate::foundation::core::Rgba8;
use crate::foundation::error::{BookError, BookResult};

/// Light modules kept around the symbol on each side.
pub const QUIET_ZONE: usize = 2;

/// Payload for `origin`: `{base}/{digest}.{ext}?inline=true`.
pub fn qr_payload(base: &str, origin: &str) -> String {
    format!(
        "{}/{}.{}?inline=true",
        base.trim_end_matches('/'),
        uri_digest(origin),
        uri_extension(origin)
    )
}

/// Square module grid, row-major, `true` = dark.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BitMatrix {
    width: usize,
    dark: Vec<bool>,
}

impl BitMatrix {
    /// Modules per side.
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn is_dark(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.width && self.dark[y * self.width + x]
    }
}

/// Encode at error-correction level H so a centred logo stays scannable.
pub fn encode(payload: &str) -> BookResult<BitMatrix> {
    let code = QrCode::with_error_correction_level(payload.as_bytes(), EcLevel::H)
        .map_err(|e| BookError::render(format!("qr encode: {e}")))?;
    let width = code.width();
    let dark = code.to_colors().into_iter().map(|c| c == Color::Dark).collect();
    Ok(BitMatrix { width, dark })
}

/// Largest raster side the backend can paint.
const MAX_SIDE: usize = u16::MAX as usize;

/// Paint `matrix` into a `size_px` square, one solid block per module, centred with a quiet
/// zone.
///
/// A box too small for the full quiet zone loses quiet-zone modules first. Below one pixel per
/// data module the raster is `matrix.width()` pixels wide, larger than requested, rather than
/// dropping cells.
pub fn rasterize(matrix: &BitMatrix, size_px: u32, fg: Rgba8, bg: Rgba8) -> BookResult<RasterImage> {
    let core = matrix.width();
    let requested = size_px as usize;
    let quiet = QUIET_ZONE.min(requested.saturating_sub(core) / 2);
    let modules = core + 2 * quiet;
    let cell = (requested / modules.max(1)).max(1);
    let side = requested.max(cell * modules);
    if side > MAX_SIDE {
        return Err(BookError::render(format!(
            "qr raster {side}px exceeds the {MAX_SIDE}px limit"
        )));
    }
    let len = side
        .checked_mul(side)
        .and_then(|n| n.checked_mul(4))
        .ok_or_else(|| BookError::render(format!("qr raster {side}px is too large")))?;
    let pad = (side - cell * modules) / 2 + quiet * cell;

    let fg = fg.premultiplied();
    let bg = bg.premultiplied();
    let mut bytes = Vec::with_capacity(len);
    for y in 0..side {
        for x in 0..side {
            let mx = x.checked_sub(pad).map(|v| v / cell);
            let my = y.checked_sub(pad).map(|v| v / cell);
            let dark = match (mx, my) {
                (Some(mx), Some(my)) => matrix.is_dark(mx, my),
                _ => false,
            };
            bytes.extend_from_slice(if dark { &fg } else { &bg });
        }
    }
    RasterImage::from_premul(side as u32, side as u32, bytes)
}

#[cfg(test)]
#[path = "../tests/unit/barcode.rs"]
mod tests;
