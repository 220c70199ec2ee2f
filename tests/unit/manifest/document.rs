use super::*;
use serde_json::json;

fn resolver() -> AssetResolver {
    AssetResolver::new(std::env::temp_dir().join("yearbook_manifest_unit_no_media"))
}

fn minimal() -> serde_json::Value {
    json!({
        "data": {
            "Property": {
                "PageSize": {"PageWidth": 800, "PageHeight": "600", "FeedPageWidth": 700,
                             "FeedPageHeight": 500, "SubjectPageWidth": 400},
                "DividingLine": {"X": 410, "Width": 2, "Height": 300, "Color": "#112233"},
                "Pagination": {
                    "Distance": {"SideDistance": 40, "BottomDistance": 30, "IntervalDistance": 8},
                    "Line": {"Width": 1, "Height": 20},
                    "Text": {"FontSize": 14, "Height": 20},
                    "Number": {"FontSize": 18, "Height": 20}
                }
            },
            "Profile": {"Avatar": "http://cdn/avatar.jpg", "Cover": "http://cdn/cover.png"},
            "Pages": [
                {"ID": 1, "Property": {"Type": "intro", "Background": {"ImageUrl": "http://cdn/bg.jpg"}}}
            ]
        }
    })
}

#[test]
fn parses_property_sub_configs() {
    let bytes = serde_json::to_vec(&minimal()).unwrap();
    let m = Manifest::from_slice(&bytes, &resolver()).unwrap();
    assert_eq!(m.page_size.width, 800.0);
    assert_eq!(m.page_size.height, 600.0);
    assert_eq!(m.page_size.subject_width, 400.0);
    assert_eq!(m.dividing_line.x, 410.0);
    assert_eq!(m.dividing_line.color(), Some(Rgba8::rgb(0x11, 0x22, 0x33)));
    assert_eq!(m.pagination.distance.bottom_distance, 30.0);
    assert_eq!(m.pagination.number.font_size, 18.0);
    assert_eq!(m.pagination.line.height, 20.0);
    assert_eq!(m.pages.len(), 1);
}

#[test]
fn missing_profile_avatar_is_cleared_not_fatal() {
    let bytes = serde_json::to_vec(&minimal()).unwrap();
    let m = Manifest::from_slice(&bytes, &resolver()).unwrap();
    assert_eq!(m.profile.avatar.as_deref(), Some("http://cdn/avatar.jpg"));
    assert!(m.profile_avatar.is_none());
}

#[test]
fn missing_sub_configs_default_to_zero() {
    let doc = json!({"data": {"Property": {"Other": 1}, "Pages": [{}]}});
    let m = Manifest::from_slice(&serde_json::to_vec(&doc).unwrap(), &resolver()).unwrap();
    assert_eq!(m.page_size, PageSize::default());
    assert_eq!(m.pagination, PaginationStyle::default());
}

#[test]
fn structural_failures() {
    let r = resolver();
    assert!(matches!(
        Manifest::from_slice(b"{not json", &r),
        Err(BookError::Syntax(_))
    ));
    let cases = [
        (json!({}), "data"),
        (json!({"data": {"Pages": [{}]}}), "data.Property"),
        (json!({"data": {"Property": {}, "Pages": [{}]}}), "data.Property"),
        (json!({"data": {"Property": {"PageSize": {}}}}), "data.Pages"),
        (json!({"data": {"Property": {"PageSize": {}}, "Pages": []}}), "data.Pages"),
    ];
    for (doc, field) in cases {
        let err = Manifest::from_slice(&serde_json::to_vec(&doc).unwrap(), &r).unwrap_err();
        match err {
            BookError::MissingField(f) => assert_eq!(f, field),
            other => panic!("expected missing field {field}, got {other}"),
        }
    }
}

#[test]
fn media_refs_list_profile_then_pages() {
    let r = resolver();
    let bytes = serde_json::to_vec(&minimal()).unwrap();
    let m = Manifest::from_slice(&bytes, &r).unwrap();
    let refs = m.media_refs(&r);
    assert_eq!(refs.len(), 3);
    assert_eq!(refs[0].page_id, None);
    assert_eq!(refs[1].uri, "http://cdn/cover.png");
    assert_eq!(refs[2].page_id, Some(1));
    assert_eq!(refs[2].path, r.resolve("http://cdn/bg.jpg", 1));
    assert!(!refs[2].is_cached());
}
