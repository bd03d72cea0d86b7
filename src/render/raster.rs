use image::{RgbaImage, imageops::FilterType};

use crate::foundation::{
    core::PixelSize,
    error::{BannerError, BannerResult, CompositionStage},
};

/// Checked conversion to the `u16` extents `vello_cpu` surfaces use.
pub fn surface_extent(size: PixelSize, stage: CompositionStage) -> BannerResult<(u16, u16)> {
    let w: u16 = size
        .width
        .try_into()
        .map_err(|_| BannerError::composition(stage, "surface width exceeds u16"))?;
    let h: u16 = size
        .height
        .try_into()
        .map_err(|_| BannerError::composition(stage, "surface height exceeds u16"))?;
    if w == 0 || h == 0 {
        return Err(BannerError::composition(stage, "surface must be non-empty"));
    }
    Ok((w, h))
}

/// Copy a premultiplied `vello_cpu` pixmap into a straight-alpha image.
pub fn pixmap_to_rgba(pixmap: &vello_cpu::Pixmap) -> BannerResult<RgbaImage> {
    let mut bytes = pixmap.data_as_u8_slice().to_vec();
    unpremultiply_rgba8_in_place(&mut bytes);
    RgbaImage::from_raw(u32::from(pixmap.width()), u32::from(pixmap.height()), bytes).ok_or_else(
        || BannerError::composition(CompositionStage::Paste, "pixmap byte length mismatch"),
    )
}

pub fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
        px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
        px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
    }
}

pub fn unpremultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u32;
        match a {
            0 => {
                px[0] = 0;
                px[1] = 0;
                px[2] = 0;
            }
            255 => {}
            _ => {
                for c in &mut px[..3] {
                    *c = ((*c as u32 * 255 + a / 2) / a).min(255) as u8;
                }
            }
        }
    }
}

/// Resample with `filter` in premultiplied space so fully transparent pixels cannot bleed
/// their (meaningless) color into the edges of the result.
pub fn resize_premultiplied(
    img: &RgbaImage,
    width: u32,
    height: u32,
    filter: FilterType,
) -> RgbaImage {
    if img.dimensions() == (width, height) {
        return img.clone();
    }
    let mut premul = img.clone();
    premultiply_rgba8_in_place(&mut premul);
    let mut out = image::imageops::resize(&premul, width, height, filter);
    unpremultiply_rgba8_in_place(&mut out);
    out
}

/// Alpha-composite `layer` onto `canvas` with its top-left at (`x`, `y`).
///
/// The layer's own alpha acts as the paste mask; parts outside the canvas are clipped.
/// Blending is integer source-over, so an opaque canvas stays exactly opaque.
pub fn paste(canvas: &mut RgbaImage, layer: &RgbaImage, x: i64, y: i64) {
    let (cw, ch) = (i64::from(canvas.width()), i64::from(canvas.height()));
    let (lw, lh) = (i64::from(layer.width()), i64::from(layer.height()));
    let (x0, y0) = (x.max(0), y.max(0));
    let (x1, y1) = ((x + lw).min(cw), (y + lh).min(ch));
    if x0 >= x1 || y0 >= y1 {
        return;
    }

    for cy in y0..y1 {
        for cx in x0..x1 {
            let src = layer.get_pixel((cx - x) as u32, (cy - y) as u32).0;
            if src[3] == 0 {
                continue;
            }
            let dst = canvas.get_pixel_mut(cx as u32, cy as u32);
            dst.0 = over_straight(dst.0, src);
        }
    }
}

fn over_straight(dst: [u8; 4], src: [u8; 4]) -> [u8; 4] {
    let mut d = dst;
    let mut s = src;
    premultiply_rgba8_in_place(&mut d);
    premultiply_rgba8_in_place(&mut s);

    let inv = 255 - u16::from(s[3]);
    let mut out = [0u8; 4];
    for ((o, sc), dc) in out.iter_mut().zip(s).zip(d) {
        *o = sc.saturating_add(mul_div255(u16::from(dc), inv));
    }
    unpremultiply_rgba8_in_place(&mut out);
    out
}

fn mul_div255(x: u16, y: u16) -> u8 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/render/raster.rs"]
mod tests;
