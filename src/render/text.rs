use image::RgbaImage;

use crate::{
    assets::{
        builtin_font,
        font::{FontHandle, OutlineFace, TextBrushRgba8},
    },
    foundation::{
        core::PixelSize,
        error::{BannerError, BannerResult, CompositionStage},
    },
    render::raster::{pixmap_to_rgba, surface_extent},
};

/// One rasterized line of text.
///
/// `width`/`height` describe the line box used for alignment (advance width, ascent to
/// descent). The image may be padded beyond that box so overhanging glyph ink is not cut off;
/// `offset` is where the image's top-left sits relative to the box's top-left.
#[derive(Clone, Debug)]
pub struct TextSprite {
    pub image: RgbaImage,
    pub offset: (i64, i64),
    pub width: f32,
    pub height: f32,
}

impl TextSprite {
    /// Top-left at which to paste `image` so the line box starts at (`x`, `y`).
    pub fn paste_origin(&self, x: i64, y: i64) -> (i64, i64) {
        (x + self.offset.0, y + self.offset.1)
    }

    /// Rows that actually carry ink, as (top relative to the line box, height).
    ///
    /// `None` when the sprite is fully transparent (e.g. only spaces).
    pub fn ink_rows(&self) -> Option<(i64, u32)> {
        let (w, h) = self.image.dimensions();
        let has_ink = |y: u32| (0..w).any(|x| self.image.get_pixel(x, y)[3] > 0);
        let first = (0..h).find(|&y| has_ink(y))?;
        let last = (0..h).rev().find(|&y| has_ink(y))?;
        Some((i64::from(first) + self.offset.1, last - first + 1))
    }
}

/// Rasterize `text` as a single line in `color`. Empty text yields `None`.
pub fn render_line(
    font: &FontHandle,
    text: &str,
    color: image::Rgba<u8>,
) -> BannerResult<Option<TextSprite>> {
    if text.is_empty() {
        return Ok(None);
    }
    match font {
        FontHandle::Builtin => Ok(builtin_font::rasterize(text, color).map(|image| {
            let (w, h) = image.dimensions();
            TextSprite {
                image,
                offset: (0, 0),
                width: w as f32,
                height: h as f32,
            }
        })),
        FontHandle::Outline(face) => render_outline(face, text, color).map(Some),
    }
}

fn render_outline(
    face: &OutlineFace,
    text: &str,
    color: image::Rgba<u8>,
) -> BannerResult<TextSprite> {
    let layout = face
        .layout_line(text, TextBrushRgba8::from(color))
        .map_err(|e| e.at_stage(CompositionStage::Title))?;
    let (width, height) = (layout.width(), layout.height());

    let pad = (face.size_px() * 0.25).ceil() as u32;
    let surface = PixelSize::new(
        width.max(1.0).ceil() as u32 + 2 * pad,
        height.max(1.0).ceil() as u32 + 2 * pad,
    );
    let (w16, h16) = surface_extent(surface, CompositionStage::Title)?;

    let font = vello_cpu::peniko::FontData::new(
        vello_cpu::peniko::Blob::from(face.bytes().to_vec()),
        0,
    );

    let mut ctx = vello_cpu::RenderContext::new(w16, h16);
    ctx.set_transform(vello_cpu::kurbo::Affine::translate((
        f64::from(pad),
        f64::from(pad),
    )));
    for line in layout.lines() {
        for item in line.items() {
            let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                continue;
            };

            let brush = run.style().brush;
            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                brush.r, brush.g, brush.b, brush.a,
            ));

            let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                id: g.id,
                x: g.x,
                y: g.y,
            });
            ctx.glyph_run(&font)
                .font_size(run.run().font_size())
                .fill_glyphs(glyphs);
        }
    }
    ctx.flush();

    let mut pixmap = vello_cpu::Pixmap::new(w16, h16);
    ctx.render_to_pixmap(&mut pixmap);
    let image = pixmap_to_rgba(&pixmap).map_err(|e| match e {
        BannerError::Composition { reason, .. } => {
            BannerError::composition(CompositionStage::Title, reason)
        }
        other => other,
    })?;

    let pad = i64::from(pad);
    Ok(TextSprite {
        image,
        offset: (-pad, -pad),
        width,
        height,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/render/text.rs"]
mod tests;
