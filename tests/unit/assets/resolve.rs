use super::*;

#[test]
fn digest_is_md5_hex_of_uri_string() {
    assert_eq!(uri_digest(""), "d41d8cd98f00b204e9800998ecf8427e");
    assert_eq!(uri_digest("abc"), "900150983cd24fb0d6963f7d28e17f72");
    assert_eq!(uri_digest("abc").len(), 32);
}

#[test]
fn extension_is_text_after_last_dot() {
    assert_eq!(uri_extension("https://cdn.example/a/b/photo.final.JPG"), "JPG");
    assert_eq!(uri_extension("https://cdn/clip.mp4"), "mp4");
    assert_eq!(uri_extension("no-dot-here"), "");
    assert_eq!(uri_extension("trailing."), "");
}

#[test]
fn page_scoped_layout() {
    let r = AssetResolver::new("/cache");
    let p = r.resolve("abc", 7);
    assert_eq!(
        p,
        Path::new("/cache")
            .join("7")
            .join("900150983cd24fb0d6963f7d28e17f72.")
    );

    let p = r.resolve("https://x/y.png", -1);
    assert_eq!(p.parent().unwrap(), Path::new("/cache").join("-1"));
    assert!(p.to_string_lossy().ends_with(".png"));
}

#[test]
fn profile_variant_omits_page_segment() {
    let r = AssetResolver::new("/cache");
    let p = r.resolve_profile("https://x/avatar.jpg");
    assert_eq!(p.parent().unwrap(), Path::new("/cache"));
    assert_eq!(
        p.file_name().unwrap().to_string_lossy(),
        format!("{}.jpg", uri_digest("https://x/avatar.jpg"))
    );
}

#[test]
fn resolution_is_pure_and_repeatable() {
    let a = AssetResolver::new("root");
    let b = AssetResolver::new("root");
    for _ in 0..3 {
        assert_eq!(a.resolve("u.webp", 3), b.resolve("u.webp", 3));
    }
    assert_ne!(a.resolve("u.webp", 3), a.resolve("u.webp", 4));
}

#[test]
fn existing_reports_absent_files_as_none() {
    let r = AssetResolver::new(std::env::temp_dir().join("yearbook_resolver_absent_root"));
    assert!(r.existing("nope.png", 1).is_none());
    let m = MediaRef::page(&r, "nope.png", 1);
    assert!(!m.is_cached());
    assert_eq!(m.page_id, Some(1));
}
