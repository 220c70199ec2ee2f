use super::*;

#[test]
fn over_transparent_and_opaque_sources() {
    let dst = [10, 20, 30, 255];
    assert_eq!(over(dst, [0, 0, 0, 0]), dst);
    assert_eq!(over(dst, [1, 2, 3, 255]), [1, 2, 3, 255]);
}

#[test]
fn over_half_alpha_mixes() {
    let out = over([200, 0, 0, 255], [0, 0, 128, 128]);
    assert_eq!(out[3], 255);
    assert_eq!(out[2], 128);
    assert!((99..=101).contains(&out[0]));
}

#[test]
fn over_in_place_rejects_mismatched_buffers() {
    let mut dst = vec![0u8; 8];
    assert!(over_in_place(&mut dst, &[0u8; 4]).is_err());
    assert!(over_in_place(&mut dst, &[9, 9, 9, 255, 0, 0, 0, 0]).is_ok());
    assert_eq!(dst, vec![9, 9, 9, 255, 0, 0, 0, 0]);
}
