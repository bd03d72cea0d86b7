use std::path::PathBuf;

use crate::{
    assets::{decode::load_image_file, fetch::ImageFetcher},
    foundation::error::BannerResult,
};

/// Where an input image comes from. Both kinds are interchangeable once decoded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ImageSource {
    File(PathBuf),
    Url(String),
}

impl ImageSource {
    /// `http://` and `https://` prefixes select a URL, anything else is a file path.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        let lower = trimmed.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            Self::Url(trimmed.to_string())
        } else {
            Self::File(PathBuf::from(trimmed))
        }
    }

    pub fn load(&self, fetcher: &ImageFetcher) -> BannerResult<image::DynamicImage> {
        match self {
            Self::File(path) => load_image_file(path),
            Self::Url(url) => fetcher.fetch(url),
        }
    }
}

impl std::fmt::Display for ImageSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Url(url) => f.write_str(url),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/source.rs"]
mod tests;
