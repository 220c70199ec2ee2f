use super::*;

#[test]
fn premultiplied_scales_channels_by_alpha() {
    assert_eq!(Rgba8::rgba(255, 128, 0, 255).premultiplied(), [255, 128, 0, 255]);
    assert_eq!(Rgba8::rgba(255, 255, 255, 128).premultiplied(), [128, 128, 128, 128]);
    assert_eq!(Rgba8::rgba(200, 100, 50, 0).premultiplied(), [0, 0, 0, 0]);
}

#[test]
fn unpremultiply_inverts_premultiply_for_opaque_and_half_alpha() {
    let mut px = vec![10u8, 20, 30, 255, 200, 100, 0, 128];
    premultiply_rgba8_in_place(&mut px);
    assert_eq!(&px[..4], &[10, 20, 30, 255]);
    unpremultiply_rgba8_in_place(&mut px);
    assert_eq!(&px[..4], &[10, 20, 30, 255]);
    assert!((i16::from(px[4]) - 200).abs() <= 2);
    assert!((i16::from(px[5]) - 100).abs() <= 2);
    assert_eq!(px[7], 128);
}

#[test]
fn array_round_trip() {
    let c = Rgba8::from_array([1, 2, 3, 4]);
    assert_eq!(c.to_array(), [1, 2, 3, 4]);
}
