use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(BookError::syntax("x").to_string().contains("syntax error:"));
    assert!(
        BookError::missing_field("data.Pages")
            .to_string()
            .contains("missing field: data.Pages")
    );
    assert!(
        BookError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(BookError::io("x").to_string().contains("io error:"));
    assert!(BookError::render("x").to_string().contains("render error:"));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = BookError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
