use std::{path::Path, sync::Arc};

use anyhow::Context;

use crate::foundation::error::{BannerError, BannerResult};

/// Raw outline-font bytes (TTF/OTF/TTC).
///
/// Cloning shares the bytes. Resolving a font never consumes the source, so one source can
/// back any number of sizes.
#[derive(Clone)]
pub struct FontSource {
    bytes: Arc<[u8]>,
}

impl std::fmt::Debug for FontSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontSource")
            .field("len", &self.bytes.len())
            .finish()
    }
}

impl FontSource {
    pub fn from_bytes(bytes: impl Into<Arc<[u8]>>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }

    pub fn load(path: &Path) -> BannerResult<Self> {
        let bytes =
            std::fs::read(path).with_context(|| format!("read font '{}'", path.display()))?;
        Ok(Self::from_bytes(bytes))
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

/// RGBA8 brush carried through Parley layouts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TextBrushRgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl From<image::Rgba<u8>> for TextBrushRgba8 {
    fn from(px: image::Rgba<u8>) -> Self {
        let [r, g, b, a] = px.0;
        Self { r, g, b, a }
    }
}

/// Outline face at a concrete pixel size.
#[derive(Clone)]
pub struct OutlineFace {
    bytes: Arc<[u8]>,
    family: String,
    size_px: f32,
}

impl std::fmt::Debug for OutlineFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OutlineFace")
            .field("family", &self.family)
            .field("size_px", &self.size_px)
            .field("bytes_len", &self.bytes.len())
            .finish()
    }
}

impl OutlineFace {
    pub fn family_name(&self) -> &str {
        &self.family
    }

    pub fn size_px(&self) -> f32 {
        self.size_px
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Shape a single unwrapped line.
    ///
    /// Every call gets fresh Parley contexts, so layouts never share mutable state.
    pub fn layout_line(
        &self,
        text: &str,
        brush: TextBrushRgba8,
    ) -> BannerResult<parley::Layout<TextBrushRgba8>> {
        let mut font_ctx = parley::FontContext::default();
        let mut layout_ctx = parley::LayoutContext::<TextBrushRgba8>::new();
        let family = register_family(&mut font_ctx, &self.bytes)?;

        let mut builder = layout_ctx.ranged_builder(&mut font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(family)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(self.size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(None);
        Ok(layout)
    }
}

/// A font ready for drawing: either a parsed outline face or the built-in bitmap face.
#[derive(Clone, Debug)]
pub enum FontHandle {
    Outline(OutlineFace),
    Builtin,
}

impl FontHandle {
    pub fn is_builtin(&self) -> bool {
        matches!(self, Self::Builtin)
    }

    /// Requested size for outline faces; `None` for the fixed-size built-in face.
    pub fn size_px(&self) -> Option<f32> {
        match self {
            Self::Outline(face) => Some(face.size_px),
            Self::Builtin => None,
        }
    }

    pub fn family_name(&self) -> Option<&str> {
        match self {
            Self::Outline(face) => Some(face.family_name()),
            Self::Builtin => None,
        }
    }
}

/// Outcome of [`resolve_font`]. `notice` is set when a fallback happened.
#[derive(Debug)]
pub struct Resolved {
    pub handle: FontHandle,
    pub notice: Option<BannerError>,
}

/// Resolve `source` at `size_px`, falling back to the built-in face.
///
/// A missing source is not an error. Malformed bytes or a nonsensical size produce a
/// [`BannerError::FontLoad`] notice and the built-in face.
pub fn resolve_font(source: Option<&FontSource>, size_px: f32) -> Resolved {
    let Some(source) = source else {
        return Resolved {
            handle: FontHandle::Builtin,
            notice: None,
        };
    };

    match load_outline(source, size_px) {
        Ok(face) => Resolved {
            handle: FontHandle::Outline(face),
            notice: None,
        },
        Err(err) => {
            tracing::warn!(error = %err, size_px, "font load failed, using built-in face");
            Resolved {
                handle: FontHandle::Builtin,
                notice: Some(err),
            }
        }
    }
}

fn load_outline(source: &FontSource, size_px: f32) -> BannerResult<OutlineFace> {
    if !size_px.is_finite() || size_px <= 0.0 {
        return Err(BannerError::font_load(format!(
            "font size must be finite and > 0, got {size_px}"
        )));
    }
    let mut font_ctx = parley::FontContext::default();
    let family = register_family(&mut font_ctx, source.bytes())?;
    Ok(OutlineFace {
        bytes: source.bytes.clone(),
        family,
        size_px,
    })
}

fn register_family(font_ctx: &mut parley::FontContext, bytes: &[u8]) -> BannerResult<String> {
    if bytes.is_empty() {
        return Err(BannerError::font_load("font bytes are empty"));
    }
    let families = font_ctx
        .collection
        .register_fonts(parley::fontique::Blob::from(bytes.to_vec()), None);
    let family_id = families
        .first()
        .map(|(id, _)| *id)
        .ok_or_else(|| BannerError::font_load("no font families registered from font bytes"))?;

    font_ctx
        .collection
        .family_name(family_id)
        .map(str::to_string)
        .ok_or_else(|| BannerError::font_load("registered font family has no name"))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/font.rs"]
mod tests;
