use super::*;
use crate::testing::solid;

/// White backdrop with a red square in the middle.
fn product_on_white() -> DynamicImage {
    let mut img = image::RgbaImage::from_pixel(40, 30, image::Rgba([255, 255, 255, 255]));
    for y in 10..20 {
        for x in 15..25 {
            img.put_pixel(x, y, image::Rgba([200, 20, 20, 255]));
        }
    }
    DynamicImage::ImageRgba8(img)
}

#[test]
fn keep_alpha_is_identity_on_rgba() {
    let src = product_on_white();
    let out = KeepAlpha.remove(&src).unwrap();
    assert_eq!(out.as_raw(), src.to_rgba8().as_raw());
    assert_eq!(KeepAlpha.name(), "keep-alpha");
}

#[test]
fn border_key_clears_backdrop_and_keeps_subject() {
    let out = BorderKeyRemover::default()
        .remove(&product_on_white())
        .unwrap();
    assert_eq!(out.dimensions(), (40, 30));
    assert_eq!(out.get_pixel(0, 0)[3], 0);
    assert_eq!(out.get_pixel(39, 29)[3], 0);
    assert_eq!(out.get_pixel(5, 15)[3], 0);
    assert_eq!(*out.get_pixel(20, 15), image::Rgba([200, 20, 20, 255]));
}

#[test]
fn border_key_leaves_enclosed_backdrop_color() {
    let mut img = image::RgbaImage::from_pixel(30, 30, image::Rgba([255, 255, 255, 255]));
    // Black ring with a white hole in the middle.
    for y in 5..25 {
        for x in 5..25 {
            let edge = x < 8 || x >= 22 || y < 8 || y >= 22;
            if edge {
                img.put_pixel(x, y, image::Rgba([0, 0, 0, 255]));
            }
        }
    }
    let out = BorderKeyRemover::default()
        .remove(&DynamicImage::ImageRgba8(img))
        .unwrap();
    assert_eq!(out.get_pixel(1, 1)[3], 0);
    assert_eq!(out.get_pixel(6, 6)[3], 255);
    assert_eq!(out.get_pixel(15, 15)[3], 255);
}

#[test]
fn border_key_soft_edge_is_partial() {
    let mut img = image::RgbaImage::from_pixel(9, 1, image::Rgba([255, 255, 255, 255]));
    // Distance from white: sqrt(3) * 20 ~= 34.6, inside the 24..48 ramp.
    img.put_pixel(4, 0, image::Rgba([235, 235, 235, 255]));
    let out = BorderKeyRemover::default()
        .remove(&DynamicImage::ImageRgba8(img))
        .unwrap();
    let a = out.get_pixel(4, 0)[3];
    assert!(a > 0 && a < 255, "alpha {a} should be partial");
}

#[test]
fn border_key_is_deterministic() {
    let r = BorderKeyRemover::default();
    let a = r.remove(&product_on_white()).unwrap();
    let b = r.remove(&product_on_white()).unwrap();
    assert_eq!(a.as_raw(), b.as_raw());
}

#[test]
fn border_key_rejects_bad_parameters() {
    let r = BorderKeyRemover {
        tolerance: f32::NAN,
        softness: 1.0,
    };
    assert!(r.remove(&solid(2, 2, [0, 0, 0, 255])).is_err());
}

#[test]
fn closures_are_removers() {
    let halve = |img: &DynamicImage| -> BannerResult<RgbaImage> {
        let mut out = img.to_rgba8();
        for px in out.pixels_mut() {
            px.0[3] /= 2;
        }
        Ok(out)
    };
    let out = halve.remove(&solid(2, 2, [1, 2, 3, 255])).unwrap();
    assert_eq!(out.get_pixel(1, 1)[3], 127);
    assert_eq!(halve.name(), "custom");
}
