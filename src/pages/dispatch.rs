use crate::canvas::painter::Painter;
use crate::canvas::plan::PagePlan;
use crate::foundation::core::Point;
use crate::manifest::page::PageKind;
use crate::pages::context::PageContext;
use crate::pages::{audios, cover, directory, feed, graduation, pagination, profile, subject, wish};
use crate::text::engine::TextEngine;
use crate::text::fonts::FontRole;

/// Compose one page: background, type-specific content, then the footer when present.
pub(crate) fn compose(ctx: &PageContext<'_>, text: &mut TextEngine) -> PagePlan {
    let size = ctx.manifest.page_size;
    let (w, h) = (px(size.width), px(size.height));
    let mut p = Painter::new(text, w, h, ctx.font(FontRole::Body, 24.0));

    draw_background(&mut p, ctx);

    let page = ctx.page;
    tracing::debug!(id = page.id, page_type = %page.kind.page_type(), "dispatching page");
    match &page.kind {
        PageKind::Intro(v) => cover::draw_intro(&mut p, ctx, v),
        PageKind::Version(v) => cover::draw_version(&mut p, ctx, v),
        PageKind::Directory(v) => directory::draw_directory(&mut p, ctx, v),
        PageKind::Profile(v) => profile::draw_profile(&mut p, ctx, v),
        PageKind::GraduationPhoto(v) => graduation::draw_photos(&mut p, ctx, v),
        PageKind::GraduationMovie(v) => graduation::draw_movie(&mut p, ctx, v),
        PageKind::GraduationDream(v) => graduation::draw_dream(&mut p, ctx, v),
        PageKind::HybridSubject(v) => subject::draw_subject(&mut p, ctx, v, true),
        PageKind::Subject(v) => subject::draw_subject(&mut p, ctx, v, false),
        PageKind::Feed(v) => feed::draw_feed(&mut p, ctx, v),
        PageKind::PhysicalExamination(v) => profile::draw_physical(&mut p, ctx, v),
        PageKind::EWish(v) => wish::draw_wish(&mut p, ctx, v),
        PageKind::GraduationAudios(v) => audios::draw_audios(&mut p, ctx, v),
        PageKind::Unknown(tag) => {
            tracing::warn!(id = page.id, tag = ?tag, "unknown page type; background only");
        }
        PageKind::Malformed { page_type, reason } => {
            tracing::warn!(id = page.id, %page_type, %reason, "malformed page; background only");
        }
    }

    if let Some(footer) = &page.footer {
        pagination::draw_footer(&mut p, ctx, footer);
    }
    p.finish()
}

/// Background image at natural size, anchored top-left.
fn draw_background(p: &mut Painter<'_>, ctx: &PageContext<'_>) {
    let Some(uri) = ctx.page.background.as_deref() else {
        return;
    };
    if let Some(img) = ctx.load_page_image(uri) {
        p.draw_image(Point::ORIGIN, &img.to_raster());
    }
}

/// Page dimension in whole pixels; non-finite and negative sizes become 0.
pub(crate) fn px(v: f64) -> u32 {
    if v.is_finite() && v > 0.0 {
        v.round().min(f64::from(u32::MAX)) as u32
    } else {
        0
    }
}
