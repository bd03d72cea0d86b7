use super::*;

#[test]
fn decode_png_keeps_dimensions_and_pixels() {
    let src = image::RgbaImage::from_raw(2, 1, vec![100, 50, 200, 128, 1, 2, 3, 255]).unwrap();
    let png = encode_png(&src).unwrap();

    let decoded = decode_image(&png).unwrap().to_rgba8();
    assert_eq!(decoded.dimensions(), (2, 1));
    assert_eq!(decoded.as_raw(), src.as_raw());
}

#[test]
fn decode_rejects_empty_and_garbage() {
    assert!(matches!(decode_image(&[]), Err(BannerError::Decode(_))));
    assert!(matches!(
        decode_image(b"definitely not an image"),
        Err(BannerError::Decode(_))
    ));
}

#[test]
fn load_missing_file_is_an_io_error() {
    let err = load_image_file(Path::new("/nonexistent/promocard/bg.png")).unwrap_err();
    assert!(matches!(err, BannerError::Other(_)));
    assert!(err.to_string().contains("read image"));
}
