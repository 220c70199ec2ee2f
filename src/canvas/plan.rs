use kurbo::RoundedRect;

use crate::assets::decode::RasterImage;
use crate::foundation::core::{Affine, Point, Rect, Rgba8};
use crate::text::fonts::FontSpec;

/// Clip region captured together with the transform that was active when it was set.
#[derive(Clone, Debug, PartialEq)]
pub struct Clip {
    pub shape: RoundedRect,
    pub transform: Affine,
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    /// Solid fill; `radius > 0` rounds the corners.
    FillRect {
        rect: Rect,
        radius: f64,
        color: Rgba8,
    },
    /// `src` (in image pixels) mapped onto `dst`; `None` uses the whole image.
    Image {
        image: RasterImage,
        dst: Rect,
        src: Option<Rect>,
    },
    /// Single line; `origin` is the left end of the baseline.
    Text {
        text: String,
        origin: Point,
        font: FontSpec,
        color: Rgba8,
    },
    /// Word-wrapped to `rect.width()`, first line top at `rect.y0`.
    TextBox {
        text: String,
        rect: Rect,
        font: FontSpec,
        color: Rgba8,
    },
    /// Pre-composed offscreen buffer placed with its top-left at `origin`.
    Layer {
        origin: Point,
        plan: Box<PagePlan>,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub struct DrawCmd {
    pub op: DrawOp,
    pub transform: Affine,
    pub clip: Option<Clip>,
}

/// Ordered draw commands for one buffer of `width` x `height` pixels.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct PagePlan {
    pub width: u32,
    pub height: u32,
    pub cmds: Vec<DrawCmd>,
}

/// A text command flattened to page space.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacedText<'a> {
    pub text: &'a str,
    /// Baseline origin (or box top-left) after the command transform.
    pub at: Point,
    pub font: &'a FontSpec,
    pub color: Rgba8,
}

impl PagePlan {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            cmds: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.cmds.is_empty()
    }

    /// Text and text-box commands in draw order, with positions in page space. Layers are
    /// descended into and offset by their origin.
    pub fn texts(&self) -> Vec<PlacedText<'_>> {
        let mut out = Vec::new();
        self.collect_texts(Affine::IDENTITY, &mut out);
        out
    }

    fn collect_texts<'a>(&'a self, base: Affine, out: &mut Vec<PlacedText<'a>>) {
        for cmd in &self.cmds {
            let t = base * cmd.transform;
            match &cmd.op {
                DrawOp::Text {
                    text,
                    origin,
                    font,
                    color,
                } => out.push(PlacedText {
                    text,
                    at: t * *origin,
                    font,
                    color: *color,
                }),
                DrawOp::TextBox {
                    text,
                    rect,
                    font,
                    color,
                } => out.push(PlacedText {
                    text,
                    at: t * rect.origin(),
                    font,
                    color: *color,
                }),
                DrawOp::Layer { origin, plan } => {
                    plan.collect_texts(t * Affine::translate(origin.to_vec2()), out);
                }
                _ => {}
            }
        }
    }

    /// Image commands in draw order with their destination transformed to page space
    /// (bounding box for rotated placements).
    pub fn images(&self) -> Vec<(&RasterImage, Rect)> {
        self.cmds
            .iter()
            .filter_map(|cmd| match &cmd.op {
                DrawOp::Image { image, dst, .. } => {
                    Some((image, cmd.transform.transform_rect_bbox(*dst)))
                }
                _ => None,
            })
            .collect()
    }
}
