use image::{RgbaImage, imageops::FilterType};
use vello_cpu::kurbo::Shape as _;

use crate::{
    assets::font::{FontSource, resolve_font},
    foundation::{
        core::{PixelSize, ThemeColor},
        error::{BannerError, BannerResult, CompositionStage},
    },
    layout::spec::LayoutSpec,
    render::{
        raster::{paste, pixmap_to_rgba, resize_premultiplied, surface_extent},
        text::render_line,
    },
};

/// Curve flattening tolerance for the pill outline, in supersampled pixels.
const PATH_TOLERANCE: f64 = 0.1;

/// Geometry of the call-to-action button, all in nominal (not supersampled) pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ButtonParams {
    pub size: PixelSize,
    pub label_px: f32,
    pub outline_px: f32,
    pub supersample: u32,
    pub label_bias_y: f32,
}

impl ButtonParams {
    pub fn from_layout(spec: &LayoutSpec) -> Self {
        Self {
            size: spec.button_size,
            label_px: spec.button_label_px,
            outline_px: spec.button_outline_px,
            supersample: spec.supersample,
            label_bias_y: spec.label_bias_y,
        }
    }
}

impl Default for ButtonParams {
    fn default() -> Self {
        Self::from_layout(&LayoutSpec::default())
    }
}

/// A rendered button plus the font fallback notice, if one happened.
#[derive(Debug)]
pub struct RenderedButton {
    pub image: RgbaImage,
    pub notice: Option<BannerError>,
}

/// Render a white pill outlined and labelled in `theme`, on a transparent background.
///
/// Everything is drawn at `supersample` times the nominal size and reduced with Lanczos3;
/// that reduction is what anti-aliases the outline and the label.
#[tracing::instrument(skip(font, theme), fields(theme = %theme))]
pub fn render_button(
    params: &ButtonParams,
    label: &str,
    font: Option<&FontSource>,
    theme: ThemeColor,
) -> BannerResult<RenderedButton> {
    if params.supersample == 0 {
        return Err(BannerError::composition(
            CompositionStage::Button,
            "supersample factor must be >= 1",
        ));
    }
    let scale = params.supersample;
    let big = params
        .size
        .scaled(scale)
        .map_err(|e| e.at_stage(CompositionStage::Button))?;
    let (w16, h16) = surface_extent(big, CompositionStage::Button)?;
    let (bw, bh) = (f64::from(w16), f64::from(h16));

    let mut ctx = vello_cpu::RenderContext::new(w16, h16);
    let radius = bh / 2.0;
    let outline = f64::from(params.outline_px) * f64::from(scale);

    // Outline drawn inward: theme-colored pill, then a white pill inset by the outline width.
    if outline > 0.0 {
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
            theme.r, theme.g, theme.b, 255,
        ));
        let outer = vello_cpu::kurbo::RoundedRect::new(0.0, 0.0, bw, bh, radius);
        ctx.fill_path(&outer.to_path(PATH_TOLERANCE));
    }
    if 2.0 * outline < bw && 2.0 * outline < bh {
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(255, 255, 255, 255));
        let inner = vello_cpu::kurbo::RoundedRect::new(
            outline,
            outline,
            bw - outline,
            bh - outline,
            (radius - outline).max(0.0),
        );
        ctx.fill_path(&inner.to_path(PATH_TOLERANCE));
    }
    ctx.flush();

    let mut pixmap = vello_cpu::Pixmap::new(w16, h16);
    ctx.render_to_pixmap(&mut pixmap);
    let mut surface = pixmap_to_rgba(&pixmap).map_err(|e| e.at_stage(CompositionStage::Button))?;

    let resolved = resolve_font(font, params.label_px * scale as f32);
    let label_sprite = render_line(&resolved.handle, label, theme.to_rgba())
        .map_err(|e| match e {
            BannerError::Composition { reason, .. } => {
                BannerError::composition(CompositionStage::Button, reason)
            }
            other => other.at_stage(CompositionStage::Button),
        })?;

    if let Some(sprite) = label_sprite {
        // The line box top is placed as if the ink box were centered; the bias then lifts the
        // label by the gap between the ascender line and the top of the ink.
        let ink_h = sprite
            .ink_rows()
            .map_or(f64::from(sprite.height), |(_, h)| f64::from(h));
        let x = ((bw - f64::from(sprite.width)) / 2.0).round() as i64;
        let y = ((bh - ink_h) / 2.0 + f64::from(params.label_bias_y) * f64::from(scale)).round()
            as i64;
        let (px, py) = sprite.paste_origin(x, y);
        paste(&mut surface, &sprite.image, px, py);
    }

    let image = resize_premultiplied(
        &surface,
        params.size.width,
        params.size.height,
        FilterType::Lanczos3,
    );
    tracing::debug!(
        width = image.width(),
        height = image.height(),
        builtin_font = resolved.handle.is_builtin(),
        "button rendered"
    );

    Ok(RenderedButton {
        image,
        notice: resolved.notice,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/render/button.rs"]
mod tests;
