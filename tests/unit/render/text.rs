use super::*;
use crate::{assets::font::resolve_font, testing::host_font};

const WHITE: image::Rgba<u8> = image::Rgba([255, 255, 255, 255]);

#[test]
fn empty_text_renders_nothing() {
    assert!(render_line(&FontHandle::Builtin, "", WHITE).unwrap().is_none());
}

#[test]
fn builtin_sprite_has_no_padding() {
    let sprite = render_line(&FontHandle::Builtin, "Go", WHITE)
        .unwrap()
        .unwrap();
    assert_eq!(sprite.offset, (0, 0));
    assert_eq!(
        sprite.image.dimensions(),
        builtin_font::measure("Go")
    );
    assert_eq!(sprite.width, sprite.image.width() as f32);
    assert_eq!(sprite.paste_origin(10, 20), (10, 20));
}

#[test]
fn outline_sprite_draws_ink_in_color() {
    let Some(src) = host_font() else {
        return;
    };
    let font = resolve_font(Some(&src), 80.0).handle;
    let color = image::Rgba([30, 60, 90, 255]);
    let sprite = render_line(&font, "A", color).unwrap().unwrap();

    assert!(sprite.width > 10.0 && sprite.height > 40.0);
    assert!(sprite.offset.0 < 0 && sprite.offset.1 < 0);
    assert!(sprite.image.width() as f32 >= sprite.width);

    let opaque: Vec<_> = sprite.image.pixels().filter(|p| p[3] == 255).collect();
    assert!(!opaque.is_empty());
    assert!(opaque.iter().all(|p| {
        p.0[..3]
            .iter()
            .zip(&color.0[..3])
            .all(|(a, b)| a.abs_diff(*b) <= 1)
    }));
}

#[test]
fn outline_width_grows_with_text() {
    let Some(src) = host_font() else {
        return;
    };
    let font = resolve_font(Some(&src), 40.0).handle;
    let one = render_line(&font, "B", WHITE).unwrap().unwrap();
    let three = render_line(&font, "BBB", WHITE).unwrap().unwrap();
    assert!(three.width > one.width * 2.5);
}

#[test]
fn ink_rows_skip_transparent_padding() {
    let mut image = RgbaImage::new(6, 10);
    image.put_pixel(2, 3, WHITE);
    image.put_pixel(4, 6, WHITE);
    let sprite = TextSprite {
        image,
        offset: (-2, -2),
        width: 2.0,
        height: 6.0,
    };
    // Rows 3..=6 in the image, shifted by the -2 padding offset.
    assert_eq!(sprite.ink_rows(), Some((1, 4)));
}

#[test]
fn ink_rows_of_blank_sprite_is_none() {
    let sprite = TextSprite {
        image: RgbaImage::new(4, 4),
        offset: (0, 0),
        width: 4.0,
        height: 4.0,
    };
    assert_eq!(sprite.ink_rows(), None);
}

#[test]
fn outline_ink_starts_below_line_box_top() {
    let Some(src) = host_font() else {
        return;
    };
    let font = resolve_font(Some(&src), 80.0).handle;
    let sprite = render_line(&font, "H", WHITE).unwrap().unwrap();
    let (top, h) = sprite.ink_rows().unwrap();
    // Cap height sits under the ascender line and is shorter than the line box.
    assert!(top > 0, "{top}");
    assert!((h as f32) < sprite.height, "{h} vs {}", sprite.height);
}
