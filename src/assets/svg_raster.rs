use crate::foundation::error::{BookError, BookResult};

// Pathological documents would otherwise allocate unbounded pixmaps.
const MAX_DIM: u32 = 8_192;

/// Rasterize an SVG tree at its intrinsic size.
///
/// Returns `(width, height, premultiplied RGBA8)`.
pub(crate) fn rasterize_svg_natural(tree: &usvg::Tree) -> BookResult<(u32, u32, Vec<u8>)> {
    fn to_px(v: f32) -> BookResult<u32> {
        if !v.is_finite() || v <= 0.0 {
            return Err(BookError::render("svg has invalid width/height"));
        }
        Ok((v.ceil() as u32).max(1))
    }

    let size = tree.size();
    let width = to_px(size.width())?;
    let height = to_px(size.height())?;
    if width > MAX_DIM || height > MAX_DIM {
        return Err(BookError::render(format!(
            "svg raster size too large: {width}x{height} (max {MAX_DIM}x{MAX_DIM})"
        )));
    }

    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| BookError::render("failed to allocate svg pixmap"))?;
    let sx = (width as f32) / size.width();
    let sy = (height as f32) / size.height();
    let xform = resvg::tiny_skia::Transform::from_scale(sx, sy);
    resvg::render(tree, xform, &mut pixmap.as_mut());
    Ok((width, height, pixmap.data().to_vec()))
}
