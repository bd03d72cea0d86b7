use image::{RgbaImage, imageops::FilterType};

use crate::{
    foundation::error::{BannerError, BannerResult, CompositionStage},
    render::raster::resize_premultiplied,
};

/// Absorbs float error so an exactly-fitting side is not truncated one pixel short.
const FIT_EPSILON: f64 = 1e-6;

/// Dimensions of `width x height` scaled by `min(max_w / width, max_h / height)`.
///
/// Sides are truncated (never rounded up past the box) and kept at least 1 px.
pub fn fit_dimensions(width: u32, height: u32, max_w: f64, max_h: f64) -> BannerResult<(u32, u32)> {
    if width == 0 || height == 0 {
        return Err(BannerError::composition(
            CompositionStage::ProductFit,
            format!("cannot fit a {width}x{height} image"),
        ));
    }
    if !max_w.is_finite() || !max_h.is_finite() || max_w < 1.0 || max_h < 1.0 {
        return Err(BannerError::composition(
            CompositionStage::ProductFit,
            format!("fit box {max_w}x{max_h} must be finite and at least 1x1"),
        ));
    }

    let ratio = (max_w / f64::from(width)).min(max_h / f64::from(height));
    let side = |v: u32, max: f64| {
        let scaled = (f64::from(v) * ratio + FIT_EPSILON).floor().min(max.floor());
        (scaled as u32).max(1)
    };
    Ok((side(width, max_w), side(height, max_h)))
}

/// Aspect-fit `img` into `max_w x max_h` with Lanczos3 resampling.
pub fn fit(img: &RgbaImage, max_w: f64, max_h: f64) -> BannerResult<RgbaImage> {
    let (w, h) = fit_dimensions(img.width(), img.height(), max_w, max_h)?;
    Ok(resize_premultiplied(img, w, h, FilterType::Lanczos3))
}

#[cfg(test)]
#[path = "../../tests/unit/render/resize.rs"]
mod tests;
