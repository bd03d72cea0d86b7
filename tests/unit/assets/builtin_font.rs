use super::*;

const WHITE: image::Rgba<u8> = image::Rgba([255, 255, 255, 255]);

#[test]
fn measure_ignores_nothing_but_char_count() {
    assert_eq!(measure(""), (0, 0));
    assert_eq!(measure("A"), (5 * BUILTIN_SCALE, 8 * BUILTIN_SCALE));
    assert_eq!(measure("Go"), (11 * BUILTIN_SCALE, 8 * BUILTIN_SCALE));
    // Non-ASCII still occupies one cell.
    assert_eq!(measure("立即"), measure("ab"));
}

#[test]
fn rasterize_empty_is_none() {
    assert!(rasterize("", WHITE).is_none());
}

#[test]
fn rasterize_space_is_fully_transparent() {
    let img = rasterize(" ", WHITE).unwrap();
    assert!(img.pixels().all(|p| p[3] == 0));
}

#[test]
fn rasterize_letter_sets_opaque_pixels_in_color() {
    let color = image::Rgba([10, 20, 30, 255]);
    let img = rasterize("I", color).unwrap();
    let lit: Vec<_> = img.pixels().filter(|p| p[3] != 0).collect();
    assert!(!lit.is_empty());
    assert!(lit.iter().all(|p| **p == color));
    // Centre column of 'I' is a full vertical bar through rows 0..7.
    assert_eq!(*img.get_pixel(2 * BUILTIN_SCALE, 0), color);
    assert_eq!(*img.get_pixel(2 * BUILTIN_SCALE, 6 * BUILTIN_SCALE), color);
}

#[test]
fn unknown_chars_draw_a_box() {
    let img = rasterize("€", WHITE).unwrap();
    // Box outline: top-left corner set, centre empty.
    assert_eq!(img.get_pixel(0, 0)[3], 255);
    assert_eq!(img.get_pixel(2 * BUILTIN_SCALE, 3 * BUILTIN_SCALE)[3], 0);
}
