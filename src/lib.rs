//! Promotional banner compositing.
//!
//! A [`CompositeEngine`] turns a background photo, up to two product photos and three short
//! strings into a fixed-layout 888x1020 banner: the background is stretched to the canvas, two
//! centered title lines are drawn, product cut-outs are aspect-fit and staggered across the
//! middle, and a pill-shaped button colored after the background's darkest pixel sits at the
//! bottom.
//!
//! Product cut-outs come from a pluggable [`BackgroundRemover`]; fonts fall back to a built-in
//! bitmap face when missing or unreadable, reported as [`Banner::notices`].

#![forbid(unsafe_code)]

pub mod analysis;
pub mod assets;
pub mod foundation;
pub mod layout;
pub mod matting;
pub mod render;

#[cfg(test)]
mod testing;

pub use analysis::color::{darkest_color, darkest_color_with};
pub use assets::{
    decode::{decode_image, encode_png, load_image_file},
    fetch::{FetchConfig, ImageFetcher},
    font::{FontHandle, FontSource, Resolved, resolve_font},
    source::ImageSource,
};
pub use foundation::{
    core::{PixelSize, ThemeColor},
    error::{BannerError, BannerResult, CompositionStage},
};
pub use layout::spec::LayoutSpec;
pub use matting::{BackgroundRemover, BorderKeyRemover, KeepAlpha};
pub use render::{
    button::{ButtonParams, RenderedButton, render_button},
    compose::{Banner, CompositeEngine, GenerationRequest, MAX_PRODUCTS, Progress},
    resize::fit_dimensions,
};
