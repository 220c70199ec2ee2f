use super::*;
use crate::canvas::plan::PagePlan;
use crate::foundation::core::Point;
use crate::text::engine::TextEngine;

fn with_painter(f: impl FnOnce(&mut Painter<'_>)) -> PagePlan {
    let mut engine = TextEngine::new();
    let mut p = Painter::new(&mut engine, 200, 100, FontSpec::new("body", 10.0));
    f(&mut p);
    p.finish()
}

fn line(text: &str, offsets: &[f64]) -> TextLine {
    TextLine {
        text: text.to_owned(),
        offsets: offsets.to_vec(),
        y: 50.0,
        ..TextLine::default()
    }
}

#[test]
fn matching_offsets_place_each_character() {
    let plan = with_painter(|p| {
        draw_text_line(p, &line("a中c", &[30.0, 5.0, 12.5]), FontSpec::new("b", 10.0), Rgba8::BLACK)
    });
    let placed = plan
        .texts()
        .into_iter()
        .map(|t| (t.text.to_owned(), t.at))
        .collect::<Vec<_>>();
    assert_eq!(
        placed,
        vec![
            ("a".to_owned(), Point::new(30.0, 50.0)),
            ("中".to_owned(), Point::new(5.0, 50.0)),
            ("c".to_owned(), Point::new(12.5, 50.0)),
        ]
    );
}

#[test]
fn mismatched_offsets_draw_whole_string_at_first_offset() {
    let plan = with_painter(|p| {
        draw_text_line(p, &line("abc", &[7.0, 9.0]), FontSpec::new("b", 10.0), Rgba8::BLACK);
        draw_text_line(p, &line("xy", &[]), FontSpec::new("b", 10.0), Rgba8::BLACK);
    });
    let texts = plan.texts();
    assert_eq!(texts.len(), 2);
    assert_eq!((texts[0].text, texts[0].at), ("abc", Point::new(7.0, 50.0)));
    assert_eq!((texts[1].text, texts[1].at), ("xy", Point::new(0.0, 50.0)));
}

#[test]
fn line_overrides_font_and_colour() {
    let mut l = line("z", &[1.0]);
    l.font_size = Some(33.0);
    l.color = crate::assets::color::ColorDef(Some(Rgba8::WHITE));
    let plan = with_painter(|p| draw_text_line(p, &l, FontSpec::new("b", 10.0), Rgba8::BLACK));
    let t = &plan.texts()[0];
    assert_eq!(t.font.size_px, 33.0);
    assert_eq!(t.color, Rgba8::WHITE);
}

#[test]
fn field_alignment_and_overrides() {
    let field = TextField {
        text: "ab".to_owned(),
        ..TextField::default()
    };
    let plan = with_painter(|p| {
        // estimate width: 2 * 0.6 * 10 = 12
        draw_field(p, &field, FontSpec::new("b", 10.0), Rgba8::BLACK, Align::Center(100.0), 20.0);
        draw_field(p, &field, FontSpec::new("b", 10.0), Rgba8::BLACK, Align::Right(100.0), 30.0);
        let moved = TextField {
            x: Some(3.0),
            y: Some(4.0),
            ..field.clone()
        };
        draw_field(p, &moved, FontSpec::new("b", 10.0), Rgba8::BLACK, Align::Right(100.0), 30.0);
    });
    let at = plan.texts().into_iter().map(|t| t.at).collect::<Vec<_>>();
    assert_eq!(
        at,
        vec![Point::new(94.0, 20.0), Point::new(88.0, 30.0), Point::new(3.0, 4.0)]
    );
}

#[test]
fn field_with_width_becomes_text_box() {
    let field = TextField {
        text: "long wrapped motto".to_owned(),
        width: Some(80.0),
        ..TextField::default()
    };
    let plan = with_painter(|p| {
        draw_field(p, &field, FontSpec::new("b", 10.0), Rgba8::BLACK, Align::Left(10.0), 60.0);
    });
    assert!(matches!(
        &plan.cmds[0].op,
        crate::canvas::plan::DrawOp::TextBox { rect, .. } if rect.x0 == 10.0 && rect.width() == 80.0
    ));
}
