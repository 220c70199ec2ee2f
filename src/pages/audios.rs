use crate::canvas::painter::Painter;
use crate::foundation::core::{Point, Rect, Rgba8};
use crate::manifest::model::AudioCard;
use crate::manifest::page::AudiosPage;
use crate::pages::context::{INK, MUTED, PageContext};
use crate::pages::media::draw_circle_avatar;
use crate::pages::text::{Align, draw_aligned, draw_field};
use crate::text::fonts::FontRole;

pub const COLUMNS: usize = 3;
pub const CELL_W: f64 = 300.0;
pub const CELL_H: f64 = 380.0;
pub const SPACING: f64 = 24.0;
const AVATAR: f64 = 200.0;
const BADGE: f64 = 40.0;
const DEFAULT_TOP: f64 = 200.0;

/// Badge glyph and colour for a gender code.
pub fn gender_badge(code: i64) -> (&'static str, Rgba8) {
    match code {
        1 => ("♂", Rgba8::rgb(0x3a, 0x8e, 0xe6)),
        2 => ("♀", Rgba8::rgb(0xf5, 0x6c, 0x9d)),
        _ => ("?", Rgba8::rgb(0x9e, 0x9e, 0x9e)),
    }
}

/// Top-left of the `index`-th cell; rows advance every [`COLUMNS`] cells.
pub fn cell_origin(origin: Point, index: usize) -> Point {
    let col = (index % COLUMNS) as f64;
    let row = (index / COLUMNS) as f64;
    Point::new(
        origin.x + col * (CELL_W + SPACING),
        origin.y + row * (CELL_H + SPACING),
    )
}

pub(crate) fn draw_audios(p: &mut Painter<'_>, ctx: &PageContext<'_>, page: &AudiosPage) {
    if let Some(title) = &page.title {
        draw_field(
            p,
            title,
            ctx.font(FontRole::Heading, 48.0),
            INK,
            Align::Center(ctx.width() / 2.0),
            120.0,
        );
    }

    let grid_w = COLUMNS as f64 * CELL_W + (COLUMNS - 1) as f64 * SPACING;
    let origin = page
        .origin
        .map(|a| Point::new(a.x, a.y))
        .unwrap_or(Point::new((ctx.width() - grid_w) / 2.0, DEFAULT_TOP));

    for (i, card) in page.cards.iter().enumerate() {
        draw_card(p, ctx, card, cell_origin(origin, i));
    }
}

fn draw_card(p: &mut Painter<'_>, ctx: &PageContext<'_>, card: &AudioCard, at: Point) {
    let mut s = p.scope();
    s.translate(at.x, at.y);
    let cx = CELL_W / 2.0;
    let ax = cx - AVATAR / 2.0;
    let ay = 20.0;

    if let Some(avatar) = ctx.load_page_image(&card.avatar) {
        draw_circle_avatar(&mut s, &avatar, Point::new(ax, ay), AVATAR);
    }

    let (glyph, color) = gender_badge(card.gender);
    let bx = ax + AVATAR - BADGE;
    let by = ay + AVATAR - BADGE;
    s.set_brush(color);
    s.draw_rounded_rect(Rect::new(bx, by, bx + BADGE, by + BADGE), BADGE / 2.0);
    s.set_font(ctx.font(FontRole::Body, 26.0));
    s.set_pen(Rgba8::WHITE);
    draw_aligned(&mut s, glyph, Align::Center(bx + BADGE / 2.0), by + BADGE * 0.72);

    if !card.name.is_empty() {
        s.set_font(ctx.font(FontRole::Rounded, 30.0));
        s.set_pen(INK);
        draw_aligned(&mut s, &card.name, Align::Center(cx), ay + AVATAR + 50.0);
    }
    if !card.caption.is_empty() {
        s.set_font(ctx.font(FontRole::Body, 22.0));
        s.set_pen(MUTED);
        s.draw_text_box(
            Rect::new(20.0, ay + AVATAR + 76.0, CELL_W - 20.0, CELL_H),
            &card.caption,
        );
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pages/audios.rs"]
mod tests;
