use super::*;
use crate::foundation::core::Rgba8;

#[test]
fn text_field_accepts_plain_string_and_full_form() {
    let plain: TextField = serde_json::from_value(serde_json::json!("Hello")).unwrap();
    assert_eq!(plain.text, "Hello");
    assert_eq!(plain.x, None);

    let full: TextField = serde_json::from_value(serde_json::json!({
        "Text": "Hi",
        "X": "12",
        "Y": 30,
        "FontSize": "18",
        "Color": "#ff0000"
    }))
    .unwrap();
    assert_eq!(full.text, "Hi");
    assert_eq!(full.x, Some(12.0));
    assert_eq!(full.y, Some(30.0));
    assert_eq!(full.font_size, Some(18.0));
    assert_eq!(full.color.or(Rgba8::BLACK), Rgba8::rgb(255, 0, 0));
}

#[test]
fn text_line_keeps_offset_count_for_bad_entries() {
    let line: TextLine = serde_json::from_value(serde_json::json!({
        "Text": "abc",
        "X": [10, "bad", 30],
        "Y": "40"
    }))
    .unwrap();
    assert_eq!(line.offsets, vec![10.0, 0.0, 30.0]);
    assert_eq!(line.y, 40.0);
}

#[test]
fn media_box_defaults_missing_numbers_to_zero() {
    let m: MediaBox = serde_json::from_value(serde_json::json!({
        "Url": "http://x/a.jpg",
        "Width": "abc",
        "AutoRotate": "true"
    }))
    .unwrap();
    assert_eq!(m.width, 0.0);
    assert_eq!(m.height, 0.0);
    assert!(m.auto_rotate);
    assert_eq!(m.radius, None);
}

#[test]
fn directory_entries_nest_and_drop_malformed_children() {
    let e: DirectoryEntry = serde_json::from_value(serde_json::json!({
        "Text": "Chapter",
        "Pagination": 3,
        "Children": [{"Text": "Sub", "Pagination": "4", "HasVideo": 1}, 17]
    }))
    .unwrap();
    assert_eq!(e.children.len(), 1);
    assert_eq!(e.children[0].pagination, 4);
    assert!(e.children[0].has_video);
}

#[test]
fn measurement_display_joins_unit() {
    let m = Measurement {
        value: Some("170".to_owned()),
        unit: Some("cm".to_owned()),
    };
    assert_eq!(m.display().as_deref(), Some("170 cm"));
    assert_eq!(Measurement::default().display(), None);
}
