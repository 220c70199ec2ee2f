//! Front matter: `intro` and `version` pages.

use crate::canvas::painter::Painter;
use crate::manifest::model::TextField;
use crate::manifest::page::{IntroPage, VersionPage};
use crate::pages::context::{INK, MUTED, PageContext};
use crate::pages::text::{Align, draw_aligned, draw_field};
use crate::text::fonts::FontRole;

pub(crate) fn draw_intro(p: &mut Painter<'_>, ctx: &PageContext<'_>, page: &IntroPage) {
    let cx = Align::Center(ctx.width() / 2.0);
    let h = ctx.height();
    let rows: [(&Option<TextField>, FontRole, f32, f64); 4] = [
        (&page.title, FontRole::Heading, 64.0, 0.35),
        (&page.subtitle, FontRole::Body, 36.0, 0.45),
        (&page.author, FontRole::Body, 28.0, 0.75),
        (&page.date, FontRole::Body, 24.0, 0.80),
    ];
    for (i, (field, role, size, frac)) in rows.into_iter().enumerate() {
        let Some(field) = field else { continue };
        let color = if i == 3 { MUTED } else { INK };
        draw_field(p, field, ctx.font(role, size), color, cx, h * frac);
    }
}

const VERSION_LEFT: f64 = 120.0;
const VERSION_VALUE_X: f64 = 400.0;
const VERSION_TITLE_Y: f64 = 200.0;
const VERSION_FIRST_ROW: f64 = 320.0;
const VERSION_ROW_H: f64 = 56.0;

pub(crate) fn draw_version(p: &mut Painter<'_>, ctx: &PageContext<'_>, page: &VersionPage) {
    if let Some(title) = &page.title {
        draw_field(
            p,
            title,
            ctx.font(FontRole::Heading, 48.0),
            INK,
            Align::Left(VERSION_LEFT),
            VERSION_TITLE_Y,
        );
    }

    let label_font = ctx.font(FontRole::Body, 26.0);
    let value_font = ctx.font(FontRole::Heading, 26.0);
    let fixed = [
        ("Edition", &page.edition),
        ("Date", &page.date),
        ("Pages", &page.page_count),
        ("Photos", &page.photo_count),
        ("Videos", &page.video_count),
        ("Words", &page.word_count),
    ];

    let mut y = VERSION_FIRST_ROW;
    for (label, value) in fixed {
        let Some(value) = value.as_ref().filter(|v| !v.is_blank()) else {
            continue;
        };
        {
            let mut s = p.scope();
            s.set_font(label_font.clone());
            s.set_pen(MUTED);
            draw_aligned(&mut s, label, Align::Left(VERSION_LEFT), value.y.unwrap_or(y));
        }
        draw_field(p, value, value_font.clone(), INK, Align::Left(VERSION_VALUE_X), y);
        y += VERSION_ROW_H;
    }

    for credit in &page.credits {
        if credit.label.is_empty() && credit.value.is_empty() {
            continue;
        }
        let x = credit.x.unwrap_or(VERSION_LEFT);
        let row_y = credit.y.unwrap_or(y);
        let mut s = p.scope();
        s.set_font(label_font.clone());
        s.set_pen(MUTED);
        draw_aligned(&mut s, &credit.label, Align::Left(x), row_y);
        s.set_font(value_font.clone());
        s.set_pen(INK);
        draw_aligned(&mut s, &credit.value, Align::Left(x + VERSION_VALUE_X - VERSION_LEFT), row_y);
        y += VERSION_ROW_H;
    }
}
