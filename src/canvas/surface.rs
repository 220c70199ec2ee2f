use std::path::Path;
use std::sync::Arc;

use crate::assets::decode::RasterImage;
use crate::canvas::composite;
use crate::canvas::plan::{DrawCmd, DrawOp, PagePlan};
use crate::foundation::core::{Affine, Rect, Rgba8, Vec2, unpremultiply_rgba8_in_place};
use crate::foundation::error::{BookError, BookResult};
use crate::text::engine::{TextBrushRgba8, TextEngine};

/// Persistent page buffer.
///
/// Created once with a sentinel fill and never cleared implicitly: every executed plan is
/// composited over what is already there.
pub struct Canvas {
    width: u16,
    height: u16,
    pixmap: vello_cpu::Pixmap,
}

impl std::fmt::Debug for Canvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Canvas")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}

impl Canvas {
    /// Allocate a `width` x `height` buffer filled with `sentinel`. Zero dimensions are clamped
    /// to 1.
    pub fn new(width: u32, height: u32, sentinel: Rgba8) -> BookResult<Self> {
        if width == 0 || height == 0 {
            tracing::warn!(width, height, "zero page size, clamping canvas to at least 1x1");
        }
        let width: u16 = width
            .max(1)
            .try_into()
            .map_err(|_| BookError::validation("page width exceeds u16"))?;
        let height: u16 = height
            .max(1)
            .try_into()
            .map_err(|_| BookError::validation("page height exceeds u16"))?;
        let mut canvas = Self {
            width,
            height,
            pixmap: vello_cpu::Pixmap::new(width, height),
        };
        canvas.clear(sentinel);
        Ok(canvas)
    }

    pub fn width(&self) -> u32 {
        u32::from(self.width)
    }

    pub fn height(&self) -> u32 {
        u32::from(self.height)
    }

    /// Fill the whole buffer with `color`.
    pub fn clear(&mut self, color: Rgba8) {
        composite::fill(self.pixmap.data_as_u8_slice_mut(), color.premultiplied());
    }

    /// Straight-alpha colour at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba8> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        let idx = (y as usize * self.width() as usize + x as usize) * 4;
        let mut px = [0u8; 4];
        px.copy_from_slice(self.pixmap.data_as_u8_slice().get(idx..idx + 4)?);
        unpremultiply_rgba8_in_place(&mut px);
        Some(Rgba8::from_array(px))
    }

    /// Whole buffer as straight-alpha RGBA8.
    pub fn to_rgba_image(&self) -> BookResult<image::RgbaImage> {
        let mut data = self.pixmap.data_as_u8_slice().to_vec();
        unpremultiply_rgba8_in_place(&mut data);
        image::RgbaImage::from_raw(self.width(), self.height(), data)
            .ok_or_else(|| BookError::render("canvas buffer has unexpected size"))
    }

    /// Write the buffer as PNG.
    pub fn save_png(&self, path: &Path) -> BookResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| BookError::io(format!("create '{}': {e}", parent.display())))?;
        }
        self.to_rgba_image()?
            .save_with_format(path, image::ImageFormat::Png)
            .map_err(|e| BookError::io(format!("write '{}': {e}", path.display())))
    }

    /// Rasterize `plan` and composite it over the buffer.
    pub fn execute(&mut self, plan: &PagePlan, text: &mut TextEngine) -> BookResult<()> {
        if plan.width != self.width() || plan.height != self.height() {
            tracing::debug!(
                plan_w = plan.width,
                plan_h = plan.height,
                "plan size differs from canvas; drawing in canvas space"
            );
        }
        let layer = render_plan(plan, self.width, self.height, text);
        composite::over_in_place(
            self.pixmap.data_as_u8_slice_mut(),
            layer.data_as_u8_slice(),
        )
    }
}

/// Rasterize every command into a fresh layer. A command that fails is logged and skipped; the
/// rest of the plan still paints.
fn render_plan(
    plan: &PagePlan,
    width: u16,
    height: u16,
    text: &mut TextEngine,
) -> vello_cpu::Pixmap {
    let mut ctx = vello_cpu::RenderContext::new(width, height);
    let mut warned_fonts = false;
    for (index, cmd) in plan.cmds.iter().enumerate() {
        if let Err(e) = draw_cmd(&mut ctx, cmd, text, &mut warned_fonts) {
            tracing::warn!(index, error = %e, "draw command skipped");
        }
    }
    ctx.flush();
    let mut pixmap = vello_cpu::Pixmap::new(width, height);
    ctx.render_to_pixmap(&mut pixmap);
    pixmap
}

fn draw_cmd(
    ctx: &mut vello_cpu::RenderContext,
    cmd: &DrawCmd,
    text: &mut TextEngine,
    warned_fonts: &mut bool,
) -> BookResult<()> {
    ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);

    if let Some(clip) = &cmd.clip {
        ctx.set_transform(affine_to_cpu(clip.transform));
        ctx.push_clip_layer(&bezpath_to_cpu(&kurbo::Shape::to_path(&clip.shape, 0.1)));
    }
    ctx.set_transform(affine_to_cpu(cmd.transform));
    let drawn = draw_op(ctx, cmd, text, warned_fonts);
    if cmd.clip.is_some() {
        ctx.pop_layer();
    }
    drawn
}

fn draw_op(
    ctx: &mut vello_cpu::RenderContext,
    cmd: &DrawCmd,
    text: &mut TextEngine,
    warned_fonts: &mut bool,
) -> BookResult<()> {
    match &cmd.op {
        DrawOp::FillRect {
            rect,
            radius,
            color,
        } => {
            ctx.set_paint(color_to_cpu(*color));
            if *radius > 0.0 {
                let path = kurbo::Shape::to_path(&rect.to_rounded_rect(*radius), 0.1);
                ctx.fill_path(&bezpath_to_cpu(&path));
            } else {
                ctx.fill_rect(&rect_to_cpu(*rect));
            }
        }
        DrawOp::Image { image, dst, src } => {
            let src = src.unwrap_or_else(|| {
                Rect::new(0.0, 0.0, f64::from(image.width), f64::from(image.height))
            });
            if src.width() > 0.0 && src.height() > 0.0 {
                let map = Affine::translate(dst.origin().to_vec2())
                    * Affine::scale_non_uniform(dst.width() / src.width(), dst.height() / src.height())
                    * Affine::translate(-src.origin().to_vec2());
                ctx.set_transform(affine_to_cpu(cmd.transform * map));
                ctx.set_paint(image_paint(image)?);
                ctx.fill_rect(&rect_to_cpu(src));
            }
        }
        DrawOp::Text {
            text: s,
            origin,
            font,
            color,
        } => {
            match text.shape(s, font, brush(*color), None) {
                Some(shaped) => {
                    let top = Vec2::new(origin.x, origin.y - f64::from(shaped.first_baseline));
                    ctx.set_transform(affine_to_cpu(cmd.transform * Affine::translate(top)));
                    fill_layout(ctx, &shaped.layout);
                }
                None => warn_text_skipped(text, s, warned_fonts),
            }
        }
        DrawOp::TextBox {
            text: s,
            rect,
            font,
            color,
        } => {
            match text.shape(s, font, brush(*color), Some(rect.width() as f32)) {
                Some(shaped) => {
                    ctx.set_transform(affine_to_cpu(
                        cmd.transform * Affine::translate(rect.origin().to_vec2()),
                    ));
                    fill_layout(ctx, &shaped.layout);
                }
                None => warn_text_skipped(text, s, warned_fonts),
            }
        }
        DrawOp::Layer { origin, plan } => {
            let w: u16 = plan.width.max(1).try_into().map_err(|_| {
                BookError::render("sub-canvas width exceeds u16")
            })?;
            let h: u16 = plan.height.max(1).try_into().map_err(|_| {
                BookError::render("sub-canvas height exceeds u16")
            })?;
            let sub = render_plan(plan, w, h, text);
            ctx.set_transform(affine_to_cpu(
                cmd.transform * Affine::translate(origin.to_vec2()),
            ));
            ctx.set_paint(vello_cpu::Image {
                image: vello_cpu::ImageSource::Pixmap(Arc::new(sub)),
                sampler: vello_cpu::peniko::ImageSampler::default(),
            });
            ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                0.0,
                0.0,
                f64::from(w),
                f64::from(h),
            ));
        }
    }
    Ok(())
}

fn warn_text_skipped(engine: &TextEngine, s: &str, warned: &mut bool) {
    if engine.has_fonts() {
        tracing::warn!(text = s, "text could not be shaped; skipped");
    } else if !*warned {
        *warned = true;
        tracing::warn!("no fonts registered; text is skipped");
    }
}

fn fill_layout(ctx: &mut vello_cpu::RenderContext, layout: &parley::Layout<TextBrushRgba8>) {
    for line in layout.lines() {
        for item in line.items() {
            let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                continue;
            };
            let brush = run.style().brush;
            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                brush.r, brush.g, brush.b, brush.a,
            ));
            let glyphs = run.glyphs().map(|g| vello_cpu::Glyph {
                id: g.id,
                x: g.x,
                y: g.y,
            });
            // Fallback glyphs index into the face Parley picked for this run.
            let font = run.run().font();
            ctx.glyph_run(font)
                .font_size(run.run().font_size())
                .fill_glyphs(glyphs);
        }
    }
}

fn brush(c: Rgba8) -> TextBrushRgba8 {
    TextBrushRgba8 {
        r: c.r,
        g: c.g,
        b: c.b,
        a: c.a,
    }
}

fn color_to_cpu(c: Rgba8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn image_paint(image: &RasterImage) -> BookResult<vello_cpu::Image> {
    let pixmap = pixmap_from_premul(image.rgba8_premul.as_slice(), image.width, image.height)?;
    Ok(vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
        sampler: vello_cpu::peniko::ImageSampler::default(),
    })
}

fn pixmap_from_premul(rgba8_premul: &[u8], width: u32, height: u32) -> BookResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| BookError::render("image width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| BookError::render("image height exceeds u16"))?;
    if rgba8_premul.len() != width as usize * height as usize * 4 {
        return Err(BookError::render("image byte length mismatch"));
    }

    let mut may_have_opacities = false;
    let mut pixels = Vec::with_capacity(width as usize * height as usize);
    for px in rgba8_premul.chunks_exact(4) {
        let a = px[3];
        may_have_opacities |= a != 255;
        pixels.push(vello_cpu::peniko::color::PremulRgba8 {
            r: px[0],
            g: px[1],
            b: px[2],
            a,
        });
    }
    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels,
        w,
        h,
        may_have_opacities,
    ))
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn rect_to_cpu(r: Rect) -> vello_cpu::kurbo::Rect {
    vello_cpu::kurbo::Rect::new(r.x0, r.y0, r.x1, r.y1)
}

fn point_to_cpu(p: kurbo::Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn bezpath_to_cpu(path: &kurbo::BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/canvas/surface.rs"]
mod tests;
