//! Background removal seam.
//!
//! Matting is treated as an opaque capability: an image goes in, the same image with an alpha
//! matte comes out. Model-backed implementations live outside this crate and plug in through
//! [`BackgroundRemover`]. Two deterministic removers ship here: [`KeepAlpha`] for inputs that
//! are already cut out, and [`BorderKeyRemover`] for product shots on a plain backdrop.

use std::collections::VecDeque;

use image::{DynamicImage, RgbaImage};

use crate::foundation::error::{BannerError, BannerResult};

/// Isolates the subject of an image by writing an alpha matte.
///
/// Calls may block for a long time (model loading, inference). Implementations take `&self` and
/// must be shareable between threads so one engine can serve concurrent requests.
pub trait BackgroundRemover: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &str {
        "custom"
    }

    /// Return `img` as RGBA with the background made transparent.
    ///
    /// The output must have the same dimensions as the input.
    fn remove(&self, img: &DynamicImage) -> BannerResult<RgbaImage>;
}

impl<F> BackgroundRemover for F
where
    F: Fn(&DynamicImage) -> BannerResult<RgbaImage> + Send + Sync,
{
    fn remove(&self, img: &DynamicImage) -> BannerResult<RgbaImage> {
        self(img)
    }
}

/// Passes the image through, keeping whatever alpha it already has.
#[derive(Clone, Copy, Debug, Default)]
pub struct KeepAlpha;

impl BackgroundRemover for KeepAlpha {
    fn name(&self) -> &str {
        "keep-alpha"
    }

    fn remove(&self, img: &DynamicImage) -> BannerResult<RgbaImage> {
        Ok(img.to_rgba8())
    }
}

/// Keys out the backdrop connected to the image border.
///
/// The backdrop color is the per-channel median of the border pixels. Starting from the border,
/// every connected pixel within `tolerance + softness` of that color is matted: fully
/// transparent up to `tolerance`, then ramping linearly back to opaque over `softness`.
/// Backdrop-colored regions enclosed by the subject are left alone.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BorderKeyRemover {
    /// Euclidean RGB distance treated as pure backdrop.
    pub tolerance: f32,
    /// Width of the soft edge beyond `tolerance`.
    pub softness: f32,
}

impl Default for BorderKeyRemover {
    fn default() -> Self {
        Self {
            tolerance: 24.0,
            softness: 24.0,
        }
    }
}

impl BackgroundRemover for BorderKeyRemover {
    fn name(&self) -> &str {
        "border-key"
    }

    fn remove(&self, img: &DynamicImage) -> BannerResult<RgbaImage> {
        if !self.tolerance.is_finite()
            || !self.softness.is_finite()
            || self.tolerance < 0.0
            || self.softness < 0.0
        {
            return Err(BannerError::input_missing(
                "border key tolerance and softness must be finite and >= 0",
            ));
        }

        let mut rgba = img.to_rgba8();
        let (w, h) = rgba.dimensions();
        if w == 0 || h == 0 {
            return Ok(rgba);
        }

        let key = border_median(&rgba);
        let reach = self.tolerance + self.softness;
        let idx = |x: u32, y: u32| (y as usize) * (w as usize) + (x as usize);

        let mut visited = vec![false; (w as usize) * (h as usize)];
        let mut queue = VecDeque::new();
        for (x, y) in border_coords(w, h) {
            if !visited[idx(x, y)] && distance(rgba.get_pixel(x, y), key) <= reach {
                visited[idx(x, y)] = true;
                queue.push_back((x, y));
            }
        }

        while let Some((x, y)) = queue.pop_front() {
            let px = rgba.get_pixel_mut(x, y);
            let d = distance(px, key);
            let keep = if d <= self.tolerance || self.softness == 0.0 {
                0.0
            } else {
                ((d - self.tolerance) / self.softness).clamp(0.0, 1.0)
            };
            px.0[3] = (f32::from(px.0[3]) * keep).round() as u8;

            let neighbors = [
                (x.checked_sub(1), Some(y)),
                (x.checked_add(1).filter(|&v| v < w), Some(y)),
                (Some(x), y.checked_sub(1)),
                (Some(x), y.checked_add(1).filter(|&v| v < h)),
            ];
            for (nx, ny) in neighbors {
                let (Some(nx), Some(ny)) = (nx, ny) else {
                    continue;
                };
                let i = idx(nx, ny);
                if !visited[i] && distance(rgba.get_pixel(nx, ny), key) <= reach {
                    visited[i] = true;
                    queue.push_back((nx, ny));
                }
            }
        }

        Ok(rgba)
    }
}

fn border_coords(w: u32, h: u32) -> impl Iterator<Item = (u32, u32)> {
    let top_bottom = (0..w).flat_map(move |x| [(x, 0), (x, h - 1)]);
    let sides = (0..h).flat_map(move |y| [(0, y), (w - 1, y)]);
    top_bottom.chain(sides)
}

fn border_median(img: &RgbaImage) -> [u8; 3] {
    let (w, h) = img.dimensions();
    let mut channels: [Vec<u8>; 3] = Default::default();
    for (x, y) in border_coords(w, h) {
        let px = img.get_pixel(x, y);
        for (c, values) in channels.iter_mut().enumerate() {
            values.push(px.0[c]);
        }
    }
    channels.map(|mut values| {
        values.sort_unstable();
        values[values.len() / 2]
    })
}

fn distance(px: &image::Rgba<u8>, key: [u8; 3]) -> f32 {
    let sq: f32 = (0..3)
        .map(|c| {
            let d = f32::from(px.0[c]) - f32::from(key[c]);
            d * d
        })
        .sum();
    sq.sqrt()
}

#[cfg(test)]
#[path = "../../tests/unit/matting/remover.rs"]
mod tests;
