use std::path::Path;

use anyhow::Context;

use crate::foundation::{
    core::{PixelSize, ThemeColor},
    error::{BannerError, BannerResult},
};

/// Fixed geometry of the banner.
///
/// Every placement in the pipeline is derived from these values, never from the size of the
/// input images. `LayoutSpec::default()` is the canonical 888x1020 layout; a JSON document
/// may override any subset of fields.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LayoutSpec {
    /// Output canvas size.
    pub canvas: PixelSize,

    /// Nominal title font size in pixels.
    pub title_size_px: f32,
    /// Top edge of title line 1.
    pub title_line1_y: i64,
    /// Top edge of title line 2.
    pub title_line2_y: i64,
    /// Title fill color.
    pub title_color: ThemeColor,

    /// Reserved product area as a fraction of the canvas (width, height).
    pub product_area: [f64; 2],
    /// Extra scale applied to the reserved area to get the fit box (width, height).
    ///
    /// A height factor above 1.0 lets products overflow their reserved area.
    pub product_scale: [f64; 2],
    /// Top-left of the first product.
    pub product1_anchor: [i64; 2],
    /// Gap between the second product's right edge and the canvas right edge.
    pub product2_right_margin: i64,
    /// How far below the first product's anchor the second product starts.
    pub product2_drop: i64,

    /// Nominal button size.
    pub button_size: PixelSize,
    /// Horizontal bias added to the centered button position.
    pub button_x_bias: f64,
    /// Top edge of the button.
    pub button_y: i64,
    /// Nominal label font size in pixels.
    pub button_label_px: f32,
    /// Nominal outline width in pixels.
    pub button_outline_px: f32,
    /// Supersampling factor used when rasterizing the button.
    pub supersample: u32,
    /// Vertical label nudge in nominal pixels, tuned by eye for CJK display faces.
    pub label_bias_y: f32,

    /// Side of the square the background is reduced to before picking the theme color.
    pub analysis_sample: u32,
}

impl Default for LayoutSpec {
    fn default() -> Self {
        Self {
            canvas: PixelSize::new(888, 1020),
            title_size_px: 80.0,
            title_line1_y: 90,
            title_line2_y: 190,
            title_color: ThemeColor::WHITE,
            product_area: [0.8, 0.4],
            product_scale: [0.84, 1.2],
            product1_anchor: [100, 310],
            product2_right_margin: 80,
            product2_drop: 80,
            button_size: PixelSize::new(311, 91),
            button_x_bias: -4.0,
            button_y: 888,
            button_label_px: 48.0,
            button_outline_px: 3.0,
            supersample: 4,
            label_bias_y: -14.0,
            analysis_sample: 150,
        }
    }
}

impl LayoutSpec {
    /// Parse a (possibly partial) JSON layout and validate it.
    pub fn from_json_str(json: &str) -> BannerResult<Self> {
        let spec: Self = serde_json::from_str(json).context("parse layout JSON")?;
        spec.validate()?;
        Ok(spec)
    }

    /// Load a JSON layout file.
    pub fn load(path: &Path) -> BannerResult<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("read layout '{}'", path.display()))?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> BannerResult<()> {
        if self.canvas.is_empty() {
            return Err(BannerError::input_missing("layout canvas must be non-empty"));
        }
        if self.button_size.is_empty() {
            return Err(BannerError::input_missing("layout button_size must be non-empty"));
        }
        if self.supersample == 0 {
            return Err(BannerError::input_missing("layout supersample must be >= 1"));
        }
        if self.analysis_sample == 0 {
            return Err(BannerError::input_missing(
                "layout analysis_sample must be >= 1",
            ));
        }
        for (name, v) in [
            ("title_size_px", self.title_size_px),
            ("button_label_px", self.button_label_px),
        ] {
            if !v.is_finite() || v <= 0.0 {
                return Err(BannerError::input_missing(format!(
                    "layout {name} must be finite and > 0"
                )));
            }
        }
        if !self.button_outline_px.is_finite() || self.button_outline_px < 0.0 {
            return Err(BannerError::input_missing(
                "layout button_outline_px must be finite and >= 0",
            ));
        }
        let factors = self.product_area.iter().chain(self.product_scale.iter());
        if factors.into_iter().any(|f| !f.is_finite() || *f <= 0.0) {
            return Err(BannerError::input_missing(
                "layout product_area and product_scale must be finite and > 0",
            ));
        }
        Ok(())
    }

    /// Box every product image is aspect-fit into, in pixels.
    pub fn product_box(&self) -> (f64, f64) {
        let w = f64::from(self.canvas.width) * self.product_area[0] * self.product_scale[0];
        let h = f64::from(self.canvas.height) * self.product_area[1] * self.product_scale[1];
        (w, h)
    }

    pub fn product1_origin(&self) -> (i64, i64) {
        (self.product1_anchor[0], self.product1_anchor[1])
    }

    /// Second product is flush right (minus the margin) and staggered below the first.
    pub fn product2_origin(&self, product_width: u32) -> (i64, i64) {
        let x = i64::from(self.canvas.width) - i64::from(product_width) - self.product2_right_margin;
        let y = self.product1_anchor[1] + self.product2_drop;
        (x, y)
    }

    /// Horizontally centered (plus bias, truncated toward zero) at the fixed button row.
    pub fn button_origin(&self) -> (i64, i64) {
        let free = f64::from(self.canvas.width) - f64::from(self.button_size.width);
        let x = (free / 2.0 + self.button_x_bias).trunc() as i64;
        (x, self.button_y)
    }

    /// Left edge that centers a line of `line_width` pixels on the canvas.
    pub fn centered_x(&self, line_width: f64) -> i64 {
        ((f64::from(self.canvas.width) - line_width) / 2.0).round() as i64
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/spec.rs"]
mod tests;
