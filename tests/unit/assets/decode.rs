use std::io::Cursor;

use super::*;

fn png_bytes(w: u32, h: u32, px: [u8; 4]) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(w, h, image::Rgba(px));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn decode_png_keeps_dimensions() {
    let img = decode_image(&png_bytes(4, 2, [10, 20, 30, 255]), "png").unwrap();
    assert_eq!((img.width(), img.height()), (4, 2));
    let raster = img.to_raster();
    assert_eq!(raster.rgba8_premul.len(), 4 * 2 * 4);
    assert_eq!(&raster.rgba8_premul[..4], &[10, 20, 30, 255]);
}

#[test]
fn scaled_output_is_premultiplied() {
    let img = decode_image(&png_bytes(2, 2, [255, 255, 255, 128]), "png").unwrap();
    let raster = img.scaled(1, 1);
    assert_eq!((raster.width, raster.height), (1, 1));
    assert_eq!(raster.rgba8_premul[3], 128);
    assert!(raster.rgba8_premul[0] <= 129);
}

#[test]
fn decode_rejects_garbage() {
    assert!(decode_image(b"definitely not an image", "jpg").is_err());
}

#[test]
fn decode_svg_by_extension() {
    let svg = br##"<svg xmlns="http://www.w3.org/2000/svg" width="8" height="4"><rect width="8" height="4" fill="#ff0000"/></svg>"##;
    let img = decode_image(svg, "SVG").unwrap();
    assert_eq!((img.width(), img.height()), (8, 4));
    let raster = img.to_raster();
    assert_eq!(&raster.rgba8_premul[..4], &[255, 0, 0, 255]);
}

#[test]
fn from_premul_validates_length() {
    assert!(RasterImage::from_premul(2, 2, vec![0; 16]).is_ok());
    assert!(RasterImage::from_premul(2, 2, vec![0; 15]).is_err());
}

#[test]
fn load_image_reports_missing_file() {
    let missing = std::env::temp_dir().join("yearbook_decode_missing_file.png");
    assert!(matches!(load_image(&missing), Err(BookError::Io(_))));
}
