//! Graduation spreads: `graduation-photo`, `graduation-movie` and `graduation-dream`.

use crate::barcode;
use crate::canvas::painter::Painter;
use crate::foundation::core::{Point, Rgba8};
use crate::manifest::model::TextField;
use crate::manifest::page::{DreamPage, MoviePage, PhotoPage};
use crate::pages::context::{INK, MUTED, PageContext};
use crate::pages::media::{draw_media, raster_limit};
use crate::pages::text::{Align, draw_field, draw_text_line};
use crate::text::fonts::FontRole;

pub const QR_DEFAULT_SIZE: f64 = 240.0;
/// Distance of the default QR placement from the right and bottom edges.
pub const QR_MARGIN: f64 = 100.0;

pub(crate) fn draw_photos(p: &mut Painter<'_>, ctx: &PageContext<'_>, page: &PhotoPage) {
    for photo in &page.photos {
        draw_media(p, ctx, photo);
    }
    if let Some(caption) = &page.caption {
        draw_field(
            p,
            caption,
            ctx.font(FontRole::Body, 28.0),
            MUTED,
            Align::Center(ctx.width() / 2.0),
            ctx.height() - 120.0,
        );
    }
}

pub(crate) fn draw_movie(p: &mut Painter<'_>, ctx: &PageContext<'_>, page: &MoviePage) {
    if let Some(cover) = &page.cover {
        draw_media(p, ctx, cover);
    }
    if let Some(title) = &page.title {
        draw_title(p, ctx, title);
    }

    let Some(origin) = page.origin_url.as_deref().filter(|u| !u.trim().is_empty()) else {
        return;
    };
    let qr = page.qr_code.unwrap_or_default();
    let limit = raster_limit(p);
    let mut size = qr.size.filter(|s| *s >= 1.0).unwrap_or(QR_DEFAULT_SIZE);
    if size > limit {
        tracing::warn!(size, limit, "qr size clamped to page raster limit");
        size = limit;
    }
    let x = qr.x.unwrap_or(ctx.width() - size - QR_MARGIN);
    let y = qr.y.unwrap_or(ctx.height() - size - QR_MARGIN);

    let payload = barcode::qr_payload(&ctx.opts.qr_base_url, origin);
    let image = barcode::encode(&payload)
        .and_then(|m| barcode::rasterize(&m, size.round() as u32, Rgba8::BLACK, Rgba8::WHITE));
    match image {
        Ok(image) => {
            tracing::debug!(%payload, size, "drawing movie qr code");
            p.draw_image(Point::new(x, y), &image);
        }
        Err(e) => tracing::warn!(%payload, error = %e, "qr code skipped"),
    }
}

pub(crate) fn draw_dream(p: &mut Painter<'_>, ctx: &PageContext<'_>, page: &DreamPage) {
    if let Some(photo) = &page.photo {
        draw_media(p, ctx, photo);
    }
    if let Some(title) = &page.title {
        draw_title(p, ctx, title);
    }
    let line_font = ctx.font(FontRole::Body, 30.0);
    for line in &page.lines {
        draw_text_line(p, line, line_font.clone(), INK);
    }
    if let Some(dream) = &page.dream {
        let mut dream = dream.clone();
        dream.width = dream.width.or(Some(ctx.width() - 240.0));
        draw_field(
            p,
            &dream,
            ctx.font(FontRole::Rounded, 32.0),
            INK,
            Align::Left(120.0),
            ctx.height() * 0.7,
        );
    }
}

fn draw_title(p: &mut Painter<'_>, ctx: &PageContext<'_>, title: &TextField) {
    draw_field(
        p,
        title,
        ctx.font(FontRole::Heading, 44.0),
        INK,
        Align::Center(ctx.width() / 2.0),
        120.0,
    );
}
