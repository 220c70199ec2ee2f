use crate::canvas::painter::Painter;
use crate::foundation::core::{Rect, Rgba8};
use crate::manifest::document::FooterFont;
use crate::manifest::page::{FooterSide, PageFooter};
use crate::pages::context::{INK, PageContext};
use crate::text::fonts::FontRole;

const RULE_FALLBACK: Rgba8 = Rgba8::rgb(0xbb, 0xbb, 0xbb);

/// Baseline for a footer element whose line box ends at `bottom`. The em box sits centred in
/// the line box, so extra height lifts the baseline by half the leading.
fn footer_baseline(bottom: f64, style: FooterFont) -> f64 {
    let leading = style.height - style.font_size;
    if style.height > 0.0 && leading > 0.0 {
        bottom - leading / 2.0
    } else {
        bottom
    }
}

/// Running footer: number, rule and caption. Line boxes and the rule end on
/// `height - BottomDistance`.
///
/// Left-anchored footers run outward from the left margin. Right-anchored footers mirror
/// that: each element is measured and placed leftward from the right margin, so the number
/// still sits at the outer edge.
pub(crate) fn draw_footer(p: &mut Painter<'_>, ctx: &PageContext<'_>, footer: &PageFooter) {
    let style = &ctx.manifest.pagination;
    let dist = style.distance;
    let bottom = ctx.height() - dist.bottom_distance;
    let gap = dist.interval_distance;

    let number_font = ctx.font(FontRole::Heading, style.number.font_size as f32);
    let text_font = ctx.font(FontRole::Body, style.text.font_size as f32);
    let rule_w = style.line.width;
    let rule_h = style.line.height;
    let rule_color = ctx.manifest.dividing_line.color().unwrap_or(RULE_FALLBACK);

    let mut s = p.scope();
    s.set_color(INK, rule_color);

    s.set_font(number_font.clone());
    let number_w = s.measure(&footer.number);
    s.set_font(text_font.clone());
    let text_w = s.measure(&footer.text);

    let has_rule = rule_w > 0.0 && rule_h > 0.0;
    let (number_x, rule_x, text_x) = match footer.side {
        FooterSide::Left => {
            let number_x = dist.side_distance;
            let rule_x = number_x + number_w + gap;
            let text_x = if has_rule { rule_x + rule_w + gap } else { rule_x };
            (number_x, rule_x, text_x)
        }
        FooterSide::Right => {
            let edge = ctx.width() - dist.side_distance;
            let number_x = edge - number_w;
            let rule_x = number_x - gap - rule_w;
            let text_x = if has_rule {
                rule_x - gap - text_w
            } else {
                number_x - gap - text_w
            };
            (number_x, rule_x, text_x)
        }
    };

    if !footer.number.is_empty() {
        s.set_font(number_font);
        s.draw_text(number_x, footer_baseline(bottom, style.number), &footer.number);
    }
    if has_rule {
        s.draw_rect(Rect::new(rule_x, bottom - rule_h, rule_x + rule_w, bottom));
    }
    if !footer.text.is_empty() {
        s.set_font(text_font);
        s.draw_text(text_x, footer_baseline(bottom, style.text), &footer.text);
    }
}
