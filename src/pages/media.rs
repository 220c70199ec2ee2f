use crate::assets::decode::SourceImage;
use crate::canvas::painter::Painter;
use crate::foundation::core::{Point, Rect, Size};
use crate::manifest::model::MediaBox;
use crate::pages::context::PageContext;

/// Largest size with the source aspect ratio that fits inside `target`.
///
/// Width-fit when the source is relatively wider than the box, height-fit otherwise, so the
/// constraining axis is never exceeded.
pub fn fit_within(source: Size, target: Size) -> Size {
    if source.width <= 0.0 || source.height <= 0.0 || target.width <= 0.0 || target.height <= 0.0 {
        return Size::ZERO;
    }
    let src_aspect = source.width / source.height;
    let dst_aspect = target.width / target.height;
    if src_aspect > dst_aspect {
        Size::new(target.width, target.width / src_aspect)
    } else {
        Size::new(target.height * src_aspect, target.height)
    }
}

/// Longest raster side a renderer may allocate for `p`: the larger page dimension, never more
/// than the backend's `u16` surface limit.
pub(crate) fn raster_limit(p: &Painter<'_>) -> f64 {
    p.width().max(p.height()).clamp(1.0, f64::from(u16::MAX))
}

/// Whole-pixel version of [`fit_within`], rounded down on the constraining axis. Each side is
/// also kept within `limit`.
fn fit_pixels(source: Size, target: Size, limit: f64) -> (u32, u32) {
    let target = Size::new(target.width.min(limit), target.height.min(limit));
    let fit = fit_within(source, target);
    let w = fit.width.round().min(target.width.floor()).max(1.0);
    let h = fit.height.round().min(target.height.floor()).max(1.0);
    (w as u32, h as u32)
}

/// Whether `degrees` is an odd multiple of 90.
fn is_quarter_turn(degrees: f64) -> bool {
    let r = degrees.rem_euclid(180.0);
    (r - 90.0).abs() < 1e-6
}

/// Draw a media box: aspect-fit, optional rounded corners, optional rotation about the image
/// centre. The image is centred in the box.
pub(crate) fn draw_media(p: &mut Painter<'_>, ctx: &PageContext<'_>, m: &MediaBox) {
    if m.width <= 0.0 || m.height <= 0.0 {
        tracing::debug!(uri = %m.url, "media box has no area; skipped");
        return;
    }
    let Some(src) = ctx.load_page_image(&m.url) else {
        return;
    };
    let (sw, sh) = (f64::from(src.width()), f64::from(src.height()));

    let mut angle = m.rotate.unwrap_or(0.0);
    if m.auto_rotate && sw > sh && m.height > m.width {
        angle = -90.0;
    }

    // Fit the rotated footprint; the raster itself stays in source orientation.
    let limit = raster_limit(p);
    let (iw, ih) = if is_quarter_turn(angle) {
        let (w, h) = fit_pixels(Size::new(sh, sw), Size::new(m.width, m.height), limit);
        (h, w)
    } else {
        fit_pixels(Size::new(sw, sh), Size::new(m.width, m.height), limit)
    };
    let center = Point::new(m.x + m.width / 2.0, m.y + m.height / 2.0);
    draw_framed(p, &src, iw, ih, center, angle, m.radius.unwrap_or(0.0));
}

/// Draw `src` scaled to `iw` x `ih`, centred on `center` and rotated by `angle` degrees,
/// with corners rounded to `radius`.
pub(crate) fn draw_framed(
    p: &mut Painter<'_>,
    src: &SourceImage,
    iw: u32,
    ih: u32,
    center: Point,
    angle: f64,
    radius: f64,
) {
    let scaled = src.scaled(iw, ih);
    let (w, h) = (f64::from(iw), f64::from(ih));

    let mut s = p.scope();
    s.translate(center.x, center.y);
    if angle != 0.0 {
        s.rotate(angle);
    }
    let top_left = Point::new(-w / 2.0, -h / 2.0);
    if radius > 0.0 {
        let framed = {
            let mut off = s.offscreen(iw, ih);
            off.set_clip_rounded_rect(Rect::new(0.0, 0.0, w, h), radius.min(w.min(h) / 2.0));
            off.draw_image(Point::ORIGIN, &scaled);
            off.finish()
        };
        s.draw_sub_canvas(top_left, framed);
    } else {
        s.draw_image(top_left, &scaled);
    }
}

/// Centre-crop `src` to a square, scale it to `size` and clip it to a circle with top-left at
/// `pos`. Sizes past the page's raster limit are clamped.
pub(crate) fn draw_circle_avatar(p: &mut Painter<'_>, src: &SourceImage, pos: Point, size: f64) {
    if size.is_nan() || size < 1.0 || src.width() == 0 || src.height() == 0 {
        return;
    }
    let limit = raster_limit(p);
    if size > limit {
        tracing::warn!(size, limit, "avatar size clamped to page raster limit");
    }
    let side = size.min(limit).round() as u32;
    let cover = src.center_square().scaled(side, side);
    let d = f64::from(side);
    let circle = {
        let mut off = p.offscreen(side, side);
        off.set_clip_rounded_rect(Rect::new(0.0, 0.0, d, d), d / 2.0);
        off.draw_image(Point::ORIGIN, &cover);
        off.finish()
    };
    p.draw_sub_canvas(pos, circle);
}

#[cfg(test)]
#[path = "../../tests/unit/pages/media.rs"]
mod tests;
