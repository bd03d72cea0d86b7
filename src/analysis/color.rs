use image::{DynamicImage, imageops::FilterType};

use crate::foundation::core::ThemeColor;

/// Default side of the square the image is reduced to before scanning.
pub const ANALYSIS_SAMPLE: u32 = 150;

/// Darkest pixel of `img` by perceptual luma, after reducing it to 150x150.
pub fn darkest_color(img: &DynamicImage) -> ThemeColor {
    darkest_color_with(img, ANALYSIS_SAMPLE)
}

/// Like [`darkest_color`] with an explicit sample size.
///
/// Falls back to [`ThemeColor::FALLBACK`] for empty images or a zero sample. Ties go to the
/// first pixel in row-major order. Alpha is dropped, not composited.
pub fn darkest_color_with(img: &DynamicImage, sample: u32) -> ThemeColor {
    if img.width() == 0 || img.height() == 0 || sample == 0 {
        tracing::debug!("empty image or sample, using fallback theme color");
        return ThemeColor::FALLBACK;
    }

    let rgb = if img.width() == sample && img.height() == sample {
        img.to_rgb8()
    } else {
        img.resize_exact(sample, sample, FilterType::CatmullRom)
            .to_rgb8()
    };

    let mut best: Option<(f32, ThemeColor)> = None;
    for px in rgb.pixels() {
        let [r, g, b] = px.0;
        let c = ThemeColor::new(r, g, b);
        let l = c.luma();
        match best {
            Some((best_l, _)) if l >= best_l => {}
            _ => best = Some((l, c)),
        }
    }
    best.map(|(_, c)| c).unwrap_or(ThemeColor::FALLBACK)
}

#[cfg(test)]
#[path = "../../tests/unit/analysis/color.rs"]
mod tests;
