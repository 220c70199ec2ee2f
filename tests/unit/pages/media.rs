use super::*;
use crate::assets::decode::decode_image;
use crate::canvas::plan::DrawOp;
use crate::text::engine::TextEngine;
use crate::text::fonts::FontSpec;

fn png(w: u32, h: u32) -> SourceImage {
    let img = image::RgbaImage::from_pixel(w, h, image::Rgba([10, 200, 30, 255]));
    let mut bytes = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
        .unwrap();
    decode_image(&bytes, "png").unwrap()
}

#[test]
fn fit_never_exceeds_box_and_keeps_ratio() {
    let sources = [(400.0, 300.0), (300.0, 400.0), (1000.0, 10.0), (7.0, 900.0), (50.0, 50.0)];
    let boxes = [(200.0, 200.0), (320.0, 100.0), (90.0, 600.0), (1.0, 1.0)];
    for (sw, sh) in sources {
        for (bw, bh) in boxes {
            let fit = fit_within(Size::new(sw, sh), Size::new(bw, bh));
            assert!(fit.width <= bw + 1e-9 && fit.height <= bh + 1e-9, "{sw}x{sh} in {bw}x{bh}");
            assert!(
                (fit.width - bw).abs() < 1e-9 || (fit.height - bh).abs() < 1e-9,
                "one axis must touch the box"
            );
            assert!((fit.width / fit.height - sw / sh).abs() < 1e-9);
        }
    }
}

#[test]
fn fit_picks_width_for_wide_sources() {
    assert_eq!(
        fit_within(Size::new(400.0, 200.0), Size::new(100.0, 100.0)),
        Size::new(100.0, 50.0)
    );
    assert_eq!(
        fit_within(Size::new(200.0, 400.0), Size::new(100.0, 100.0)),
        Size::new(50.0, 100.0)
    );
    assert_eq!(fit_within(Size::ZERO, Size::new(1.0, 1.0)), Size::ZERO);
}

#[test]
fn pixel_fit_stays_inside_box() {
    let limit = f64::from(u16::MAX);
    assert_eq!(fit_pixels(Size::new(3.0, 2.0), Size::new(100.0, 100.0), limit), (100, 67));
    assert_eq!(fit_pixels(Size::new(1.0, 3.0), Size::new(10.5, 10.5), limit), (4, 10));
}

#[test]
fn pixel_fit_respects_raster_limit() {
    assert_eq!(fit_pixels(Size::new(3.0, 2.0), Size::new(5e9, 5e9), 300.0), (300, 200));
    assert_eq!(fit_pixels(Size::new(1.0, 4.0), Size::new(5e9, 100.0), 300.0), (25, 100));
}

#[test]
fn quarter_turns() {
    assert!(is_quarter_turn(90.0));
    assert!(is_quarter_turn(-90.0));
    assert!(is_quarter_turn(270.0));
    assert!(!is_quarter_turn(180.0));
    assert!(!is_quarter_turn(45.0));
}

#[test]
fn framed_rotation_is_centred_and_scoped() {
    let src = png(40, 20);
    let mut engine = TextEngine::new();
    let mut p = Painter::new(&mut engine, 200, 200, FontSpec::new("b", 10.0));
    draw_framed(&mut p, &src, 40, 20, Point::new(100.0, 100.0), -90.0, 0.0);
    assert_eq!(p.transform(), crate::foundation::core::Affine::IDENTITY);
    let plan = p.finish();
    let (img, bbox) = plan.images()[0];
    assert_eq!((img.width, img.height), (40, 20));
    // A -90 degree turn swaps the footprint around the same centre.
    assert!((bbox.width() - 20.0).abs() < 1e-9);
    assert!((bbox.height() - 40.0).abs() < 1e-9);
    assert!((bbox.center().x - 100.0).abs() < 1e-9);
    assert!((bbox.center().y - 100.0).abs() < 1e-9);
}

#[test]
fn rounded_frame_goes_through_a_clipped_layer() {
    let src = png(30, 30);
    let mut engine = TextEngine::new();
    let mut p = Painter::new(&mut engine, 100, 100, FontSpec::new("b", 10.0));
    draw_framed(&mut p, &src, 30, 30, Point::new(50.0, 50.0), 0.0, 8.0);
    let plan = p.finish();
    let DrawOp::Layer { origin, plan: sub } = &plan.cmds[0].op else {
        panic!("expected layer");
    };
    assert_eq!(*origin, Point::new(-15.0, -15.0));
    assert_eq!((sub.width, sub.height), (30, 30));
    let clip = sub.cmds[0].clip.as_ref().unwrap();
    assert_eq!(clip.shape.radii().top_left, 8.0);
}

#[test]
fn circle_avatar_crops_to_square() {
    let src = png(80, 40);
    let mut engine = TextEngine::new();
    let mut p = Painter::new(&mut engine, 100, 100, FontSpec::new("b", 10.0));
    draw_circle_avatar(&mut p, &src, Point::new(5.0, 6.0), 20.0);
    let plan = p.finish();
    let DrawOp::Layer { origin, plan: sub } = &plan.cmds[0].op else {
        panic!("expected layer");
    };
    assert_eq!(*origin, Point::new(5.0, 6.0));
    let DrawOp::Image { image, src, .. } = &sub.cmds[0].op else {
        panic!("expected image");
    };
    assert_eq!((image.width, image.height), (20, 20));
    assert_eq!(*src, None);
    assert_eq!(sub.cmds[0].clip.as_ref().unwrap().shape.radii().top_left, 10.0);
}

#[test]
fn huge_avatar_is_clamped_to_the_page() {
    let src = png(30, 60);
    let mut engine = TextEngine::new();
    let mut p = Painter::new(&mut engine, 120, 80, FontSpec::new("b", 10.0));
    draw_circle_avatar(&mut p, &src, Point::ORIGIN, 5e9);
    let plan = p.finish();
    let DrawOp::Layer { plan: sub, .. } = &plan.cmds[0].op else {
        panic!("expected layer");
    };
    assert_eq!((sub.width, sub.height), (120, 120));
    assert_eq!(sub.images()[0].0.width, 120);
}
