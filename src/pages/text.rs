use crate::canvas::painter::Painter;
use crate::foundation::core::{Rect, Rgba8};
use crate::manifest::model::{TextField, TextLine};
use crate::text::fonts::FontSpec;

/// Horizontal placement used when a field carries no `X`.
#[derive(Clone, Copy, Debug)]
pub(crate) enum Align {
    /// Left edge at the given x.
    Left(f64),
    /// Centred on the given x.
    Center(f64),
    /// Right edge at the given x.
    Right(f64),
}

/// Draw a labelled field. `X`/`Y` in the field override the layout anchor; `Width` turns it
/// into a wrapped box whose top-left is the anchor. Returns the advance width drawn.
pub(crate) fn draw_field(
    p: &mut Painter<'_>,
    field: &TextField,
    font: FontSpec,
    color: Rgba8,
    align: Align,
    y: f64,
) -> f64 {
    if field.is_blank() {
        return 0.0;
    }
    let mut s = p.scope();
    s.set_font(font.with_overrides(field.font_name.as_deref(), field.font_size));
    s.set_pen(field.color.or(color));
    let y = field.y.unwrap_or(y);

    if let Some(width) = field.width.filter(|w| *w > 0.0) {
        let x = field.x.unwrap_or(match align {
            Align::Left(x) => x,
            Align::Center(cx) => cx - width / 2.0,
            Align::Right(rx) => rx - width,
        });
        let line_h = f64::from(s.font().size_px);
        s.draw_text_box(Rect::new(x, y, x + width, y + line_h), &field.text);
        return width;
    }

    let advance = s.measure(&field.text);
    let x = field.x.unwrap_or(match align {
        Align::Left(x) => x,
        Align::Center(cx) => cx - advance / 2.0,
        Align::Right(rx) => rx - advance,
    });
    s.draw_text(x, y, &field.text);
    advance
}

/// Plain text with the painter's font and pen, aligned at `(x, y)`.
pub(crate) fn draw_aligned(p: &mut Painter<'_>, text: &str, align: Align, y: f64) -> f64 {
    if text.is_empty() {
        return 0.0;
    }
    let advance = p.measure(text);
    let x = match align {
        Align::Left(x) => x,
        Align::Center(cx) => cx - advance / 2.0,
        Align::Right(rx) => rx - advance,
    };
    p.draw_text(x, y, text);
    advance
}

/// Per-character positioned line.
///
/// With one offset per character each character is drawn at its own x; otherwise the whole
/// string is drawn at the first offset (0 when there is none) and a warning is logged.
pub(crate) fn draw_text_line(p: &mut Painter<'_>, line: &TextLine, font: FontSpec, color: Rgba8) {
    if line.text.is_empty() {
        return;
    }
    let mut s = p.scope();
    s.set_font(font.with_overrides(line.font_name.as_deref(), line.font_size));
    s.set_pen(line.color.or(color));

    let chars = line.text.chars().count();
    if chars == line.offsets.len() {
        let mut buf = [0u8; 4];
        for (ch, x) in line.text.chars().zip(&line.offsets) {
            s.draw_text(*x, line.y, ch.encode_utf8(&mut buf));
        }
        return;
    }

    tracing::warn!(
        text = %line.text,
        chars,
        offsets = line.offsets.len(),
        "text line offset count mismatch; drawing whole string at first offset"
    );
    let x = line.offsets.first().copied().unwrap_or(0.0);
    s.draw_text(x, line.y, &line.text);
}

#[cfg(test)]
#[path = "../../tests/unit/pages/text.rs"]
mod tests;
