use crate::canvas::painter::Painter;
use crate::foundation::core::{Rect, Rgba8};
use crate::manifest::page::SubjectPage;
use crate::pages::context::{INK, PageContext};
use crate::pages::media::draw_media;
use crate::pages::text::draw_text_line;
use crate::text::fonts::FontRole;

const RULE_FALLBACK: Rgba8 = Rgba8::rgb(0xcc, 0xcc, 0xcc);

/// `subject` and `hybrid-subject`: hand-placed title and lines, the manifest's vertical
/// dividing rule, and (hybrid only) media boxes.
pub(crate) fn draw_subject(
    p: &mut Painter<'_>,
    ctx: &PageContext<'_>,
    page: &SubjectPage,
    hybrid: bool,
) {
    draw_dividing_line(p, ctx);

    if hybrid {
        for m in &page.media {
            draw_media(p, ctx, m);
        }
    }

    let title_font = ctx.font_def(FontRole::Heading, 44.0, page.fonts.title_font.as_ref());
    let content_font = ctx.font_def(FontRole::Body, 28.0, page.fonts.content_font.as_ref());
    if let Some(title) = &page.title {
        draw_text_line(p, title, title_font, INK);
    }
    for line in &page.lines {
        draw_text_line(p, line, content_font.clone(), INK);
    }
}

/// Vertical rule centred vertically on the page. Without an explicit `X` it sits at the edge
/// of the subject text column.
fn draw_dividing_line(p: &mut Painter<'_>, ctx: &PageContext<'_>) {
    let style = &ctx.manifest.dividing_line;
    if style.width <= 0.0 || style.height <= 0.0 {
        return;
    }
    let x = if style.x != 0.0 {
        style.x
    } else {
        ctx.manifest.page_size.subject_width
    };
    let top = (ctx.height() - style.height) / 2.0;
    let mut s = p.scope();
    s.set_brush(style.color().unwrap_or(RULE_FALLBACK));
    s.draw_rect(Rect::new(x, top, x + style.width, top + style.height));
}
