use std::{io::Cursor, path::Path};

use anyhow::Context;

use crate::foundation::error::{BannerError, BannerResult};

/// Decode encoded image bytes (any format the `image` crate recognizes).
pub fn decode_image(bytes: &[u8]) -> BannerResult<image::DynamicImage> {
    if bytes.is_empty() {
        return Err(BannerError::decode("image payload is empty"));
    }
    image::load_from_memory(bytes).map_err(|e| BannerError::decode(e.to_string()))
}

/// Read and decode an image file.
pub fn load_image_file(path: &Path) -> BannerResult<image::DynamicImage> {
    let bytes =
        std::fs::read(path).with_context(|| format!("read image '{}'", path.display()))?;
    decode_image(&bytes).map_err(|e| match e {
        BannerError::Decode(reason) => {
            BannerError::decode(format!("'{}': {reason}", path.display()))
        }
        other => other,
    })
}

/// Encode a finished banner as PNG bytes.
pub fn encode_png(img: &image::RgbaImage) -> BannerResult<Vec<u8>> {
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .context("encode png")?;
    Ok(buf)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
