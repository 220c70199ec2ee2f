use super::*;
use crate::canvas::painter::Painter;
use crate::foundation::core::Point;
use crate::text::fonts::FontSpec;

const MAGENTA: Rgba8 = Rgba8::rgb(255, 0, 255);

fn close(a: Rgba8, b: Rgba8) -> bool {
    let d = |x: u8, y: u8| (i16::from(x) - i16::from(y)).abs() <= 3;
    d(a.r, b.r) && d(a.g, b.g) && d(a.b, b.b) && d(a.a, b.a)
}

fn solid(w: u32, h: u32, c: Rgba8) -> RasterImage {
    let px = c.premultiplied();
    let bytes = std::iter::repeat_n(px, (w * h) as usize).flatten().collect();
    RasterImage::from_premul(w, h, bytes).unwrap()
}

#[test]
fn new_canvas_is_sentinel_filled_and_clamped() {
    let c = Canvas::new(0, 3, MAGENTA).unwrap();
    assert_eq!((c.width(), c.height()), (1, 3));
    assert_eq!(c.pixel(0, 2), Some(MAGENTA));
    assert_eq!(c.pixel(1, 0), None);
    assert!(Canvas::new(70_000, 10, MAGENTA).is_err());
}

#[test]
fn paint_accumulates_until_cleared() {
    let mut engine = TextEngine::new();
    let mut canvas = Canvas::new(40, 20, MAGENTA).unwrap();

    let mut p = Painter::new(&mut engine, 40, 20, FontSpec::new("x", 10.0));
    p.set_brush(Rgba8::rgb(0, 0, 255));
    p.draw_rect(Rect::new(0.0, 0.0, 20.0, 20.0));
    let first = p.finish();
    canvas.execute(&first, &mut engine).unwrap();

    let mut p = Painter::new(&mut engine, 40, 20, FontSpec::new("x", 10.0));
    p.set_brush(Rgba8::rgb(0, 255, 0));
    p.draw_rect(Rect::new(20.0, 0.0, 40.0, 20.0));
    let second = p.finish();
    canvas.execute(&second, &mut engine).unwrap();

    assert_eq!(canvas.pixel(10, 10), Some(Rgba8::rgb(0, 0, 255)));
    assert_eq!(canvas.pixel(30, 10), Some(Rgba8::rgb(0, 255, 0)));

    canvas.clear(Rgba8::WHITE);
    assert_eq!(canvas.pixel(10, 10), Some(Rgba8::WHITE));
}

#[test]
fn translucent_fill_blends_over_existing_paint() {
    let mut engine = TextEngine::new();
    let mut canvas = Canvas::new(8, 8, Rgba8::WHITE).unwrap();
    let mut p = Painter::new(&mut engine, 8, 8, FontSpec::new("x", 10.0));
    p.set_brush(Rgba8::rgba(0, 0, 0, 128));
    p.draw_rect(Rect::new(0.0, 0.0, 8.0, 8.0));
    let plan = p.finish();
    canvas.execute(&plan, &mut engine).unwrap();
    let px = canvas.pixel(4, 4).unwrap();
    assert!(close(px, Rgba8::rgb(127, 127, 127)), "{px:?}");
}

#[test]
fn image_is_placed_at_destination() {
    let mut engine = TextEngine::new();
    let mut canvas = Canvas::new(30, 30, MAGENTA).unwrap();
    let img = solid(10, 10, Rgba8::rgb(200, 10, 10));
    let mut p = Painter::new(&mut engine, 30, 30, FontSpec::new("x", 10.0));
    p.draw_image(Point::new(10.0, 10.0), &img);
    let plan = p.finish();
    canvas.execute(&plan, &mut engine).unwrap();
    assert!(close(canvas.pixel(15, 15).unwrap(), Rgba8::rgb(200, 10, 10)));
    assert_eq!(canvas.pixel(5, 5), Some(MAGENTA));
    assert_eq!(canvas.pixel(25, 25), Some(MAGENTA));
}

#[test]
fn rounded_clip_masks_corners() {
    let mut engine = TextEngine::new();
    let mut canvas = Canvas::new(40, 40, Rgba8::WHITE).unwrap();
    let mut p = Painter::new(&mut engine, 40, 40, FontSpec::new("x", 10.0));
    {
        let mut s = p.scope();
        s.set_clip_rounded_rect(Rect::new(0.0, 0.0, 40.0, 40.0), 20.0);
        s.set_brush(Rgba8::BLACK);
        s.draw_rect(Rect::new(0.0, 0.0, 40.0, 40.0));
    }
    let plan = p.finish();
    canvas.execute(&plan, &mut engine).unwrap();
    assert_eq!(canvas.pixel(20, 20), Some(Rgba8::BLACK));
    assert_eq!(canvas.pixel(0, 0), Some(Rgba8::WHITE));
}

#[test]
fn text_without_fonts_is_skipped() {
    let mut engine = TextEngine::new();
    let mut canvas = Canvas::new(20, 20, MAGENTA).unwrap();
    let mut p = Painter::new(&mut engine, 20, 20, FontSpec::new("x", 10.0));
    p.draw_text(0.0, 10.0, "hello");
    let plan = p.finish();
    canvas.execute(&plan, &mut engine).unwrap();
    assert_eq!(canvas.pixel(2, 8), Some(MAGENTA));
}

#[test]
fn save_png_round_trips_straight_alpha() {
    let dir = std::env::temp_dir().join(format!("yearbook_surface_{}", std::process::id()));
    let path = dir.join("nested").join("page.png");
    let canvas = Canvas::new(4, 4, Rgba8::rgb(10, 20, 30)).unwrap();
    canvas.save_png(&path).unwrap();
    let back = image::open(&path).unwrap().to_rgba8();
    assert_eq!(back.get_pixel(1, 1).0, [10, 20, 30, 255]);
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn failing_command_does_not_blank_the_page() {
    let mut engine = TextEngine::new();
    let mut canvas = Canvas::new(20, 10, MAGENTA).unwrap();
    let mut p = Painter::new(&mut engine, 20, 10, FontSpec::new("x", 10.0));
    p.set_clip_rounded_rect(Rect::new(0.0, 0.0, 20.0, 10.0), 2.0);
    // Wider than the backend's u16 pixmap limit.
    p.draw_image(Point::ORIGIN, &solid(70_000, 1, Rgba8::rgb(255, 0, 0)));
    p.clear_clip();
    p.set_brush(Rgba8::rgb(0, 255, 0));
    p.draw_rect(Rect::new(5.0, 0.0, 15.0, 10.0));
    let plan = p.finish();

    canvas.execute(&plan, &mut engine).unwrap();
    assert!(close(canvas.pixel(10, 5).unwrap(), Rgba8::rgb(0, 255, 0)));
    assert_eq!(canvas.pixel(1, 5), Some(MAGENTA));
}

#[test]
fn glyph_runs_paint_with_their_resolved_face() {
    let bytes = std::fs::read("tests/data/fonts/DejaVuSans.ttf").unwrap();
    let mut engine = TextEngine::new();
    engine.register_font("body", bytes.clone()).unwrap();
    let font = FontSpec::new("body", 24.0);

    let shaped = engine
        .shape("Ab ♂", &font, TextBrushRgba8::default(), None)
        .unwrap();
    let mut runs = 0;
    for line in shaped.layout.lines() {
        for item in line.items() {
            if let parley::layout::PositionedLayoutItem::GlyphRun(run) = item {
                assert_eq!(run.run().font().data.len(), bytes.len());
                runs += 1;
            }
        }
    }
    assert!(runs > 0);

    let mut canvas = Canvas::new(120, 40, Rgba8::WHITE).unwrap();
    let mut p = Painter::new(&mut engine, 120, 40, font);
    p.set_pen(Rgba8::BLACK);
    p.draw_text(4.0, 30.0, "Ab ♂");
    let plan = p.finish();
    canvas.execute(&plan, &mut engine).unwrap();
    let img = canvas.to_rgba_image().unwrap();
    assert!(img.pixels().any(|px| px.0[0] < 128));
}
