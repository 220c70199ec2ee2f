use std::ops::{Deref, DerefMut};

use kurbo::RoundedRect;

use crate::assets::decode::RasterImage;
use crate::canvas::plan::{Clip, DrawCmd, DrawOp, PagePlan};
use crate::foundation::core::{Affine, Point, Rect, Rgba8, Vec2};
use crate::text::engine::TextEngine;
use crate::text::fonts::FontSpec;

/// Drawing cursor: everything a [`PainterScope`] saves and restores.
#[derive(Clone, Debug, PartialEq)]
struct PenState {
    font: FontSpec,
    /// Text colour.
    pen: Rgba8,
    /// Fill colour.
    brush: Rgba8,
    transform: Affine,
    clip: Option<Clip>,
}

/// Records drawing calls into a [`PagePlan`].
///
/// Mirrors a retained painter: font, colours, transform and clip are sticky until changed.
/// Use [`Painter::scope`] around any temporary change; the guard restores the cursor on drop.
pub struct Painter<'t> {
    text: &'t mut TextEngine,
    state: PenState,
    plan: PagePlan,
}

impl<'t> Painter<'t> {
    pub fn new(text: &'t mut TextEngine, width: u32, height: u32, font: FontSpec) -> Self {
        Self {
            text,
            state: PenState {
                font,
                pen: Rgba8::BLACK,
                brush: Rgba8::BLACK,
                transform: Affine::IDENTITY,
                clip: None,
            },
            plan: PagePlan::new(width, height),
        }
    }

    pub fn width(&self) -> f64 {
        f64::from(self.plan.width)
    }

    pub fn height(&self) -> f64 {
        f64::from(self.plan.height)
    }

    pub fn set_font(&mut self, font: FontSpec) {
        self.state.font = font;
    }

    pub fn font(&self) -> &FontSpec {
        &self.state.font
    }

    /// Set text (`pen`) and fill (`brush`) colours.
    pub fn set_color(&mut self, pen: Rgba8, brush: Rgba8) {
        self.state.pen = pen;
        self.state.brush = brush;
    }

    pub fn set_pen(&mut self, pen: Rgba8) {
        self.state.pen = pen;
    }

    pub fn set_brush(&mut self, brush: Rgba8) {
        self.state.brush = brush;
    }

    pub fn transform(&self) -> Affine {
        self.state.transform
    }

    /// Shift the local origin.
    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.state.transform *= Affine::translate(Vec2::new(dx, dy));
    }

    /// Rotate the local frame clockwise (y down) by `degrees` about the local origin.
    pub fn rotate(&mut self, degrees: f64) {
        self.state.transform *= Affine::rotate(degrees.to_radians());
    }

    /// Clip later drawing to `rect` with rounded corners, in the current local frame.
    pub fn set_clip_rounded_rect(&mut self, rect: Rect, radius: f64) {
        self.state.clip = Some(Clip {
            shape: RoundedRect::from_rect(rect, radius.max(0.0)),
            transform: self.state.transform,
        });
    }

    pub fn clear_clip(&mut self) {
        self.state.clip = None;
    }

    fn push(&mut self, op: DrawOp) {
        self.plan.cmds.push(DrawCmd {
            op,
            transform: self.state.transform,
            clip: self.state.clip.clone(),
        });
    }

    /// Single-line text with its baseline starting at `(x, y)`.
    pub fn draw_text(&mut self, x: f64, y: f64, text: &str) {
        if text.is_empty() {
            return;
        }
        self.push(DrawOp::Text {
            text: text.to_owned(),
            origin: Point::new(x, y),
            font: self.state.font.clone(),
            color: self.state.pen,
        });
    }

    /// Word-wrapped text inside `rect` (top-left anchored; height is advisory).
    pub fn draw_text_box(&mut self, rect: Rect, text: &str) {
        if text.is_empty() || rect.width() <= 0.0 {
            return;
        }
        self.push(DrawOp::TextBox {
            text: text.to_owned(),
            rect,
            font: self.state.font.clone(),
            color: self.state.pen,
        });
    }

    /// Draw an image at natural size with its top-left at `pos`.
    pub fn draw_image(&mut self, pos: Point, image: &RasterImage) {
        let dst = Rect::from_origin_size(
            pos,
            (f64::from(image.width), f64::from(image.height)),
        );
        self.draw_image_rect(dst, image, None);
    }

    /// Draw the `src` part of `image` (whole image when `None`) stretched onto `dst`.
    pub fn draw_image_rect(&mut self, dst: Rect, image: &RasterImage, src: Option<Rect>) {
        if image.width == 0 || image.height == 0 || dst.width() <= 0.0 || dst.height() <= 0.0 {
            return;
        }
        self.push(DrawOp::Image {
            image: image.clone(),
            dst,
            src,
        });
    }

    /// Fill `rect` with the brush colour.
    pub fn draw_rect(&mut self, rect: Rect) {
        self.draw_rounded_rect(rect, 0.0);
    }

    pub fn draw_rounded_rect(&mut self, rect: Rect, radius: f64) {
        if rect.width() <= 0.0 || rect.height() <= 0.0 {
            return;
        }
        self.push(DrawOp::FillRect {
            rect,
            radius: radius.max(0.0),
            color: self.state.brush,
        });
    }

    /// Composite a finished offscreen plan with its top-left at `pos`.
    pub fn draw_sub_canvas(&mut self, pos: Point, sub: PagePlan) {
        if sub.is_empty() {
            return;
        }
        self.push(DrawOp::Layer {
            origin: pos,
            plan: Box::new(sub),
        });
    }

    /// Start an offscreen painter of `width` x `height` that shares this painter's text engine
    /// and font.
    pub fn offscreen(&mut self, width: u32, height: u32) -> Painter<'_> {
        Painter::new(&mut *self.text, width, height, self.state.font.clone())
    }

    /// Advance width of `text` in the current font.
    pub fn measure(&mut self, text: &str) -> f64 {
        self.text.measure(text, &self.state.font)
    }

    /// Save the cursor; it is restored when the returned guard drops.
    pub fn scope(&mut self) -> PainterScope<'_, 't> {
        let saved = self.state.clone();
        PainterScope {
            painter: self,
            saved,
        }
    }

    pub fn finish(self) -> PagePlan {
        self.plan
    }
}

/// Restores the painter's font, colours, transform and clip on drop.
pub struct PainterScope<'p, 't> {
    painter: &'p mut Painter<'t>,
    saved: PenState,
}

impl<'t> Deref for PainterScope<'_, 't> {
    type Target = Painter<'t>;

    fn deref(&self) -> &Self::Target {
        self.painter
    }
}

impl DerefMut for PainterScope<'_, '_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.painter
    }
}

impl Drop for PainterScope<'_, '_> {
    fn drop(&mut self) {
        self.painter.state = self.saved.clone();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/canvas/painter.rs"]
mod tests;
