use super::*;
use serde_json::json;

#[test]
fn tags_round_trip_through_page_type() {
    for tag in [
        "intro",
        "version",
        "directory",
        "profile",
        "graduation-photo",
        "graduation-movie",
        "graduation-dream",
        "hybrid-subject",
        "subject",
        "feed",
        "physical-examination",
        "e-wish",
        "graduation-audios",
    ] {
        let ty = PageType::from_tag(tag).unwrap();
        assert_eq!(ty.as_tag(), tag);
    }
    assert_eq!(PageType::from_tag("poster"), None);
}

#[test]
fn directory_elements_array_becomes_entries() {
    let page = Page::from_value(
        0,
        &json!({
            "ID": "7",
            "Property": {
                "Type": "directory",
                "Background": {"ImageUrl": "http://cdn/bg.png"},
                "HeadEntryFont": {"FontName": "yahei", "FontSize": 40}
            },
            "Elements": [
                {"Text": "A", "Pagination": 1, "HasVideo": false},
                {"Text": "B", "Pagination": 150, "HasVideo": true}
            ]
        }),
    );
    assert_eq!(page.id, 7);
    assert_eq!(page.background.as_deref(), Some("http://cdn/bg.png"));
    let PageKind::Directory(dir) = &page.kind else {
        panic!("expected directory, got {:?}", page.kind);
    };
    assert_eq!(dir.entries.len(), 2);
    assert_eq!(dir.entries[1].pagination, 150);
    assert!(dir.entries[1].has_video);
    assert_eq!(
        dir.fonts.head_entry_font.as_ref().and_then(|f| f.font_size),
        Some(40.0)
    );
}

#[test]
fn unknown_and_missing_types_are_unknown() {
    let page = Page::from_value(0, &json!({"ID": 1, "Property": {"Type": "poster"}}));
    assert_eq!(page.kind, PageKind::Unknown(Some("poster".to_owned())));
    let page = Page::from_value(1, &json!({}));
    assert_eq!(page.id, -1);
    assert_eq!(page.kind.page_type(), PageType::Unknown);
}

#[test]
fn scalar_elements_make_the_page_malformed() {
    let page = Page::from_value(
        0,
        &json!({"ID": 2, "Property": {"Type": "intro"}, "Elements": "oops"}),
    );
    assert!(matches!(
        page.kind,
        PageKind::Malformed {
            page_type: PageType::Intro,
            ..
        }
    ));
}

#[test]
fn movie_page_reads_origin_url_key() {
    let page = Page::from_value(
        0,
        &json!({
            "ID": 3,
            "Property": {"Type": "graduation-movie"},
            "Elements": {
                "OrginURL": "http://v/clip.mp4",
                "Cover": {"Url": "http://v/cover.jpg", "Width": 100, "Height": 50}
            }
        }),
    );
    let PageKind::GraduationMovie(movie) = &page.kind else {
        panic!("expected movie");
    };
    assert_eq!(movie.origin_url.as_deref(), Some("http://v/clip.mp4"));
    assert_eq!(page.kind.media_uris(), vec!["http://v/cover.jpg"]);
}

#[test]
fn footer_location_parses_side() {
    let page = Page::from_value(
        0,
        &json!({"Pagination": {"Location": "Right", "Number": 12, "Text": "Memories"}}),
    );
    let footer = page.footer.unwrap();
    assert_eq!(footer.side, FooterSide::Right);
    assert_eq!(footer.number, "12");
    assert_eq!(footer.text, "Memories");

    let page = Page::from_value(0, &json!({"Pagination": {}}));
    assert!(page.footer.is_none());
}
