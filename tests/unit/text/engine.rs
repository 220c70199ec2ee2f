use super::*;
use crate::text::fonts::{FontConfig, FontRole};

#[test]
fn measure_without_fonts_uses_estimate() {
    let mut engine = TextEngine::new();
    assert!(!engine.has_fonts());
    let font = FontSpec::new("missing", 20.0);
    assert_eq!(engine.measure("", &font), 0.0);
    assert!((engine.measure("ab", &font) - 24.0).abs() < 1e-9);
    assert!((engine.measure("中文", &font) - 40.0).abs() < 1e-9);
}

#[test]
fn shape_without_fonts_is_none() {
    let mut engine = TextEngine::new();
    let font = FontSpec::new("missing", 20.0);
    assert!(engine.shape("x", &font, TextBrushRgba8::default(), None).is_none());
}

#[test]
fn register_rejects_non_font_bytes() {
    let mut engine = TextEngine::new();
    assert!(engine.register_font("junk", b"not a font".to_vec()).is_err());
    assert!(!engine.has_fonts());
    assert_eq!(engine.aliases().count(), 0);
}

#[test]
fn register_fonts_dir_reports_missing_dir() {
    let mut engine = TextEngine::new();
    let dir = std::env::temp_dir().join("yearbook_fonts_dir_that_does_not_exist");
    assert!(matches!(
        engine.register_fonts_dir(&dir),
        Err(BookError::Io(_))
    ));
}

#[test]
fn font_config_maps_roles() {
    let cfg = FontConfig::default();
    assert_eq!(cfg.family(FontRole::Heading), "yahei");
    assert_eq!(cfg.family(FontRole::Rounded), "yuanti");
    let spec = cfg
        .spec(FontRole::Body, 24.0)
        .with_overrides(Some("custom"), Some(30.0));
    assert_eq!(spec, FontSpec::new("custom", 30.0));
    let spec = cfg.spec(FontRole::Body, 24.0).with_overrides(Some("  "), Some(-1.0));
    assert_eq!(spec.family, "SourceHanSansCN-Normal");
    assert_eq!(spec.size_px, 24.0);
}

#[test]
fn text_layout_smoke_with_local_font_if_present() {
    let font_path = std::path::Path::new("assets/fonts/yahei.ttf");
    let Ok(bytes) = std::fs::read(font_path) else {
        return;
    };
    let mut engine = TextEngine::new();
    engine.register_font("yahei", bytes).unwrap();
    let font = FontSpec::new("yahei", 32.0);
    assert!(engine.measure("hello", &font) > 0.0);
    let shaped = engine
        .shape("hello world", &font, TextBrushRgba8::default(), Some(40.0))
        .unwrap();
    assert!(shaped.layout.lines().count() >= 2);
}
