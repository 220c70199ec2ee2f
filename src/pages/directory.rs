use crate::canvas::painter::Painter;
use crate::foundation::core::Rgba8;
use crate::manifest::model::DirectoryEntry;
use crate::manifest::page::DirectoryPage;
use crate::pages::context::{INK, MUTED, PageContext};
use crate::pages::text::{Align, draw_field};
use crate::text::fonts::{FontRole, FontSpec};

/// Left edge of the page-number column.
pub const NUMBER_X: f64 = 120.0;
/// Left edge of the entry-text column.
pub const TEXT_X: f64 = 220.0;
/// Extra indent for child entries (text column only).
pub const CHILD_INDENT: f64 = 48.0;
pub const TITLE_Y: f64 = 180.0;
/// Baseline of the first entry.
pub const FIRST_ENTRY_Y: f64 = 300.0;
pub const HEAD_ROW_H: f64 = 72.0;
pub const SUB_ROW_H: f64 = 52.0;

/// Marker appended to entries that carry a video.
pub const VIDEO_MARK: &str = "  ⌛";

/// Page number as shown in the number column: at least two digits.
pub fn entry_number(pagination: i64) -> String {
    format!("{pagination:02}")
}

/// Entry text with the video marker when applicable.
pub fn entry_label(entry: &DirectoryEntry) -> String {
    if entry.has_video {
        format!("{}{VIDEO_MARK}", entry.text)
    } else {
        entry.text.clone()
    }
}

pub(crate) fn draw_directory(p: &mut Painter<'_>, ctx: &PageContext<'_>, page: &DirectoryPage) {
    if let Some(title) = &page.title {
        draw_field(
            p,
            title,
            ctx.font(FontRole::Heading, 56.0),
            INK,
            Align::Center(ctx.width() / 2.0),
            TITLE_Y,
        );
    }

    let head = ctx.font_def(FontRole::Heading, 36.0, page.fonts.head_entry_font.as_ref());
    let sub = ctx.font_def(FontRole::Body, 28.0, page.fonts.sub_entry_font.as_ref());

    let mut y = FIRST_ENTRY_Y;
    for entry in &page.entries {
        draw_row(p, entry, &head, INK, 0.0, y);
        y += HEAD_ROW_H;
        for child in &entry.children {
            draw_row(p, child, &sub, MUTED, CHILD_INDENT, y);
            y += SUB_ROW_H;
        }
    }
}

fn draw_row(
    p: &mut Painter<'_>,
    entry: &DirectoryEntry,
    font: &FontSpec,
    pen: Rgba8,
    indent: f64,
    y: f64,
) {
    let mut s = p.scope();
    s.set_font(font.clone());
    s.set_pen(pen);
    s.draw_text(NUMBER_X, y, &entry_number(entry.pagination));
    s.draw_text(TEXT_X + indent, y, &entry_label(entry));
}

#[cfg(test)]
#[path = "../../tests/unit/pages/directory.rs"]
mod tests;
