use super::*;

#[test]
fn numbers_pad_to_two_digits() {
    assert_eq!(entry_number(1), "01");
    assert_eq!(entry_number(9), "09");
    assert_eq!(entry_number(150), "150");
    assert_eq!(entry_number(0), "00");
}

#[test]
fn video_entries_get_marker() {
    let mut e = DirectoryEntry {
        text: "B".to_owned(),
        pagination: 150,
        has_video: true,
        children: Vec::new(),
    };
    assert_eq!(entry_label(&e), "B  ⌛");
    e.has_video = false;
    assert_eq!(entry_label(&e), "B");
}
