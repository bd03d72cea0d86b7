//! Shared fixtures for unit tests.

const CANDIDATE_FONTS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation-sans/LiberationSans-Regular.ttf",
    "/usr/share/fonts/truetype/freefont/FreeSans.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// Bytes of some outline font on this host, if any. Tests that need one skip without it.
pub(crate) fn host_font() -> Option<crate::assets::font::FontSource> {
    let from_env = std::env::var("PROMOCARD_TEST_FONT").ok();
    from_env
        .iter()
        .map(String::as_str)
        .chain(CANDIDATE_FONTS.iter().copied())
        .find_map(|p| std::fs::read(p).ok())
        .map(crate::assets::font::FontSource::from_bytes)
}

pub(crate) fn solid(w: u32, h: u32, rgba: [u8; 4]) -> image::DynamicImage {
    image::DynamicImage::ImageRgba8(image::RgbaImage::from_pixel(w, h, image::Rgba(rgba)))
}
