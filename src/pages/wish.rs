use crate::canvas::painter::Painter;
use crate::manifest::page::WishPage;
use crate::pages::context::{INK, MUTED, PageContext};
use crate::pages::text::{Align, draw_field, draw_text_line};
use crate::text::fonts::FontRole;

const RIGHT_MARGIN: f64 = 120.0;
const TITLE_Y: f64 = 180.0;
/// Signature baseline, measured up from the page bottom.
const SIGNATURE_RISE: f64 = 260.0;
const DATE_RISE: f64 = 200.0;

/// Title, hand-placed lines, then signature and date flush against the right margin.
pub(crate) fn draw_wish(p: &mut Painter<'_>, ctx: &PageContext<'_>, page: &WishPage) {
    let title_font = ctx.font_def(FontRole::Rounded, 48.0, page.fonts.title_font.as_ref());
    let signature_font =
        ctx.font_def(FontRole::Rounded, 32.0, page.fonts.signature_font.as_ref());

    if let Some(title) = &page.title {
        draw_field(p, title, title_font, INK, Align::Center(ctx.width() / 2.0), TITLE_Y);
    }

    let line_font = ctx.font(FontRole::Rounded, 32.0);
    for line in &page.lines {
        draw_text_line(p, line, line_font.clone(), INK);
    }

    let right = Align::Right(ctx.width() - RIGHT_MARGIN);
    if let Some(sig) = &page.signature {
        draw_field(p, sig, signature_font, INK, right, ctx.height() - SIGNATURE_RISE);
    }
    if let Some(date) = &page.date {
        draw_field(
            p,
            date,
            ctx.font(FontRole::Body, 24.0),
            MUTED,
            right,
            ctx.height() - DATE_RISE,
        );
    }
}
