use crate::canvas::painter::Painter;
use crate::foundation::core::Rgba8;
use crate::manifest::page::FeedPage;
use crate::pages::context::{INK, MUTED, PageContext};
use crate::pages::media::draw_media;
use crate::pages::text::{Align, draw_aligned, draw_field, draw_text_line};
use crate::text::fonts::FontRole;

const PAD: f64 = 40.0;
const TAG_GAP: f64 = 16.0;
const TAG_COLOR: Rgba8 = Rgba8::rgb(0x3a, 0x8e, 0xe6);

/// Feed post composed in the feed area, centred on the page. All element coordinates are
/// relative to that area.
pub(crate) fn draw_feed(p: &mut Painter<'_>, ctx: &PageContext<'_>, page: &FeedPage) {
    let size = ctx.manifest.page_size;
    let fw = if size.feed_width > 0.0 { size.feed_width } else { size.width };
    let fh = if size.feed_height > 0.0 { size.feed_height } else { size.height };

    let mut s = p.scope();
    s.translate((size.width - fw) / 2.0, (size.height - fh) / 2.0);

    for image in &page.images {
        draw_media(&mut s, ctx, image);
    }

    let fonts = &page.fonts;
    if let Some(mark) = &page.mark {
        let font = ctx.font_def(FontRole::Heading, 28.0, fonts.mark_font.as_ref());
        draw_field(&mut s, mark, font, MUTED, Align::Left(PAD), 80.0);
    }
    if let Some(title) = &page.title {
        let font = ctx.font_def(FontRole::Heading, 40.0, fonts.title_font.as_ref());
        draw_field(&mut s, title, font, INK, Align::Left(PAD), 140.0);
    }

    let content = ctx.font_def(FontRole::Body, 28.0, fonts.content_font.as_ref());
    for line in &page.lines {
        draw_text_line(&mut s, line, content.clone(), INK);
    }

    if let Some(quote) = &page.quote {
        let mut quote = quote.clone();
        quote.width = quote.width.or(Some(fw - 2.0 * PAD));
        let font = ctx.font_def(FontRole::Rounded, 28.0, fonts.quote_font.as_ref());
        draw_field(&mut s, &quote, font, MUTED, Align::Left(PAD), fh * 0.55);
    }

    let tags = page
        .tags
        .iter()
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>();
    if !tags.is_empty() {
        s.set_font(ctx.font_def(FontRole::Body, 22.0, fonts.tag_font.as_ref()));
        s.set_pen(TAG_COLOR);
        let mut x = PAD;
        for tag in tags {
            let label = format!("#{tag}");
            x += draw_aligned(&mut s, &label, Align::Left(x), fh - 60.0) + TAG_GAP;
        }
    }
}
