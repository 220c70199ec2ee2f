//! Personal pages: `profile` and `physical-examination`.

use crate::canvas::painter::Painter;
use crate::foundation::core::{Point, Rect, Rgba8};
use crate::manifest::model::LabelValue;
use crate::manifest::page::{PhysicalPage, ProfilePage};
use crate::pages::context::{INK, MUTED, PageContext};
use crate::pages::media::{draw_circle_avatar, raster_limit};
use crate::pages::text::{Align, draw_aligned, draw_field};
use crate::text::fonts::{FontRole, FontSpec};

const LEFT: f64 = 120.0;
const VALUE_OFFSET: f64 = 200.0;
const AVATAR_SIZE: f64 = 240.0;
const AVATAR_Y: f64 = 160.0;
const AVATAR_RING: Rgba8 = Rgba8::WHITE;

pub(crate) fn draw_profile(p: &mut Painter<'_>, ctx: &PageContext<'_>, page: &ProfilePage) {
    let w = ctx.width();
    let boxed = page.avatar_box.unwrap_or_default();
    let size = boxed
        .size
        .filter(|s| *s > 0.0)
        .unwrap_or(AVATAR_SIZE)
        .min(raster_limit(p));
    let ax = boxed.x.unwrap_or((w - size) / 2.0);
    let ay = boxed.y.unwrap_or(AVATAR_Y);

    if let Some(avatar) = ctx.load_profile_avatar() {
        {
            let mut s = p.scope();
            s.set_brush(AVATAR_RING);
            s.draw_rounded_rect(
                Rect::new(ax - 4.0, ay - 4.0, ax + size + 4.0, ay + size + 4.0),
                size / 2.0 + 4.0,
            );
        }
        draw_circle_avatar(p, &avatar, Point::new(ax, ay), size);
    }

    let cx = Align::Center(w / 2.0);
    let below = ay + size;
    if let Some(name) = &page.name {
        draw_field(p, name, ctx.font(FontRole::Heading, 48.0), INK, cx, below + 80.0);
    }
    let small = ctx.font(FontRole::Body, 28.0);
    let rows = [
        (&page.nickname, 130.0),
        (&page.class, 180.0),
        (&page.birthday, 230.0),
    ];
    for (field, dy) in rows {
        if let Some(field) = field {
            draw_field(p, field, small.clone(), MUTED, cx, below + dy);
        }
    }
    if let Some(motto) = &page.motto {
        let mut motto = motto.clone();
        motto.width = motto.width.or(Some(w - 2.0 * LEFT));
        draw_field(
            p,
            &motto,
            ctx.font(FontRole::Rounded, 30.0),
            INK,
            Align::Left(LEFT),
            below + 290.0,
        );
    }

    draw_label_rows(
        p,
        &page.fields,
        ctx.font(FontRole::Body, 26.0),
        below + 420.0,
        52.0,
    );
}

const PHYSICAL_FIRST_ROW: f64 = 320.0;
const PHYSICAL_ROW_H: f64 = 60.0;

pub(crate) fn draw_physical(p: &mut Painter<'_>, ctx: &PageContext<'_>, page: &PhysicalPage) {
    let cx = Align::Center(ctx.width() / 2.0);
    if let Some(title) = &page.title {
        draw_field(p, title, ctx.font(FontRole::Heading, 48.0), INK, cx, 160.0);
    }
    if let Some(date) = &page.date {
        draw_field(p, date, ctx.font(FontRole::Body, 24.0), MUTED, cx, 220.0);
    }

    let mut rows = Vec::new();
    if let Some(v) = page.height.as_ref().and_then(|m| m.display()) {
        rows.push(("Height", v));
    }
    if let Some(v) = page.weight.as_ref().and_then(|m| m.display()) {
        rows.push(("Weight", v));
    }
    if let Some(vision) = &page.vision {
        let side = |tag: &str, v: &Option<String>| {
            v.as_deref()
                .filter(|s| !s.trim().is_empty())
                .map(|s| format!("{tag} {s}"))
        };
        let parts = [side("L", &vision.left), side("R", &vision.right)]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>();
        if !parts.is_empty() {
            rows.push(("Vision", parts.join("   ")));
        }
    }

    let label_font = ctx.font(FontRole::Body, 28.0);
    let value_font = ctx.font(FontRole::Heading, 28.0);
    let mut y = PHYSICAL_FIRST_ROW;
    for (label, value) in rows {
        let mut s = p.scope();
        s.set_font(label_font.clone());
        s.set_pen(MUTED);
        draw_aligned(&mut s, label, Align::Left(LEFT), y);
        s.set_font(value_font.clone());
        s.set_pen(INK);
        draw_aligned(&mut s, &value, Align::Left(LEFT + VALUE_OFFSET), y);
        y += PHYSICAL_ROW_H;
    }

    draw_label_rows(p, &page.items, label_font, y, PHYSICAL_ROW_H);
}

/// Label/value rows stacked from `y`; rows with their own `X`/`Y` are placed there and do not
/// advance the stack.
fn draw_label_rows(
    p: &mut Painter<'_>,
    rows: &[LabelValue],
    font: FontSpec,
    mut y: f64,
    row_h: f64,
) {
    for row in rows {
        if row.label.is_empty() && row.value.is_empty() {
            continue;
        }
        let x = row.x.unwrap_or(LEFT);
        let row_y = row.y.unwrap_or(y);
        let value = match row.unit.as_deref().filter(|u| !u.is_empty()) {
            Some(unit) => format!("{} {unit}", row.value),
            None => row.value.clone(),
        };
        let mut s = p.scope();
        s.set_font(font.clone());
        s.set_pen(MUTED);
        draw_aligned(&mut s, &row.label, Align::Left(x), row_y);
        s.set_pen(INK);
        draw_aligned(&mut s, &value, Align::Left(x + VALUE_OFFSET), row_y);
        if row.y.is_none() {
            y += row_h;
        }
    }
}
