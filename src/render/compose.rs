use image::{DynamicImage, RgbaImage, imageops::FilterType};

use crate::{
    analysis::color::darkest_color_with,
    assets::{
        decode::encode_png,
        font::{FontSource, resolve_font},
    },
    foundation::{
        core::ThemeColor,
        error::{BannerError, BannerResult, CompositionStage},
    },
    layout::spec::LayoutSpec,
    matting::BackgroundRemover,
    render::{
        button::{ButtonParams, render_button},
        raster::paste,
        resize::fit,
        text::render_line,
    },
};

/// Maximum number of product images on one banner.
pub const MAX_PRODUCTS: usize = 2;

/// Everything one banner is made from.
#[derive(Clone, Debug)]
pub struct GenerationRequest {
    pub background: DynamicImage,
    /// Zero, one or two product photos, in placement order.
    pub products: Vec<DynamicImage>,
    pub title_line1: String,
    pub title_line2: String,
    pub button_label: String,
    /// Outline font bytes; `None` draws every label with the built-in face.
    pub font: Option<FontSource>,
}

impl GenerationRequest {
    pub fn new(background: DynamicImage) -> Self {
        Self {
            background,
            products: Vec::new(),
            title_line1: String::new(),
            title_line2: String::new(),
            button_label: String::new(),
            font: None,
        }
    }

    pub fn with_product(mut self, product: DynamicImage) -> Self {
        self.products.push(product);
        self
    }

    pub fn with_titles(mut self, line1: impl Into<String>, line2: impl Into<String>) -> Self {
        self.title_line1 = line1.into();
        self.title_line2 = line2.into();
        self
    }

    pub fn with_button_label(mut self, label: impl Into<String>) -> Self {
        self.button_label = label.into();
        self
    }

    pub fn with_font(mut self, font: FontSource) -> Self {
        self.font = Some(font);
        self
    }

    /// Minimum needed to generate: a non-empty background and at most two non-empty products.
    pub fn validate(&self) -> BannerResult<()> {
        if self.background.width() == 0 || self.background.height() == 0 {
            return Err(BannerError::input_missing("background image is empty"));
        }
        if self.products.len() > MAX_PRODUCTS {
            return Err(BannerError::input_missing(format!(
                "at most {MAX_PRODUCTS} product images are supported, got {}",
                self.products.len()
            )));
        }
        for (i, p) in self.products.iter().enumerate() {
            if p.width() == 0 || p.height() == 0 {
                return Err(BannerError::input_missing(format!(
                    "product image {} is empty",
                    i + 1
                )));
            }
        }
        Ok(())
    }

    /// The full set the banner is designed around: a font and both product images.
    pub fn validate_strict(&self) -> BannerResult<()> {
        if self.font.is_none() {
            return Err(BannerError::input_missing("a font file is required"));
        }
        if self.products.len() != MAX_PRODUCTS {
            return Err(BannerError::input_missing(format!(
                "background and {MAX_PRODUCTS} product images are required, got {} product(s)",
                self.products.len()
            )));
        }
        self.validate()
    }
}

/// Stage reached by a running [`CompositeEngine::compose_with_progress`] call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Progress {
    Background,
    Titles,
    /// About to run the (possibly slow) background remover on product `index` (0-based).
    RemovingBackground { index: usize, total: usize },
    PlacingProducts,
    Button,
    Done,
}

/// A finished banner.
#[derive(Debug)]
pub struct Banner {
    pub image: RgbaImage,
    pub theme: ThemeColor,
    /// Problems that were recovered from (font fallbacks). Never terminal.
    pub notices: Vec<BannerError>,
}

impl Banner {
    pub fn to_png(&self) -> BannerResult<Vec<u8>> {
        encode_png(&self.image)
    }
}

/// Builds banners from requests. Holds only immutable configuration, so one engine can serve
/// any number of requests, including concurrently.
pub struct CompositeEngine {
    spec: LayoutSpec,
    remover: Box<dyn BackgroundRemover>,
}

impl std::fmt::Debug for CompositeEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompositeEngine")
            .field("spec", &self.spec)
            .field("remover", &self.remover.name())
            .finish()
    }
}

impl CompositeEngine {
    pub fn new(spec: LayoutSpec, remover: impl BackgroundRemover + 'static) -> BannerResult<Self> {
        spec.validate()?;
        Ok(Self {
            spec,
            remover: Box::new(remover),
        })
    }

    pub fn spec(&self) -> &LayoutSpec {
        &self.spec
    }

    pub fn compose(&self, request: &GenerationRequest) -> BannerResult<Banner> {
        self.compose_with_progress(request, &mut |_| {})
    }

    /// Run the whole pipeline, reporting each stage to `on_progress` before it starts.
    ///
    /// Blocks for as long as the background remover takes. Any failure aborts the request;
    /// no partially drawn canvas is ever returned.
    #[tracing::instrument(
        skip(self, request, on_progress),
        fields(products = request.products.len(), remover = self.remover.name())
    )]
    pub fn compose_with_progress(
        &self,
        request: &GenerationRequest,
        on_progress: &mut dyn FnMut(Progress),
    ) -> BannerResult<Banner> {
        request.validate()?;
        let spec = &self.spec;
        let mut notices = Notices::default();

        on_progress(Progress::Background);
        let mut canvas = image::imageops::resize(
            &request.background.to_rgba8(),
            spec.canvas.width,
            spec.canvas.height,
            FilterType::CatmullRom,
        );
        let theme = darkest_color_with(&request.background, spec.analysis_sample);
        tracing::debug!(theme = %theme, "theme color picked");

        on_progress(Progress::Titles);
        self.draw_titles(&mut canvas, request, &mut notices)?;

        let total = request.products.len();
        let mut matted = Vec::with_capacity(total);
        for (index, product) in request.products.iter().enumerate() {
            on_progress(Progress::RemovingBackground { index, total });
            let cut = self
                .remover
                .remove(product)
                .map_err(|e| e.at_stage(CompositionStage::Matting))?;
            if cut.width() == 0 || cut.height() == 0 {
                return Err(BannerError::composition(
                    CompositionStage::Matting,
                    format!("remover '{}' returned an empty image", self.remover.name()),
                ));
            }
            matted.push(cut);
        }

        on_progress(Progress::PlacingProducts);
        let (box_w, box_h) = spec.product_box();
        for (index, cut) in matted.iter().enumerate() {
            let placed = fit(cut, box_w, box_h)?;
            let (x, y) = match index {
                0 => spec.product1_origin(),
                _ => spec.product2_origin(placed.width()),
            };
            tracing::debug!(index, x, y, w = placed.width(), h = placed.height(), "placing product");
            paste(&mut canvas, &placed, x, y);
        }

        on_progress(Progress::Button);
        let button = render_button(
            &ButtonParams::from_layout(spec),
            &request.button_label,
            request.font.as_ref(),
            theme,
        )?;
        notices.push(button.notice);
        let (bx, by) = spec.button_origin();
        paste(&mut canvas, &button.image, bx, by);

        on_progress(Progress::Done);
        Ok(Banner {
            image: canvas,
            theme,
            notices: notices.into_inner(),
        })
    }

    fn draw_titles(
        &self,
        canvas: &mut RgbaImage,
        request: &GenerationRequest,
        notices: &mut Notices,
    ) -> BannerResult<()> {
        let spec = &self.spec;
        let resolved = resolve_font(request.font.as_ref(), spec.title_size_px);
        notices.push(resolved.notice);

        let lines = [
            (&request.title_line1, spec.title_line1_y),
            (&request.title_line2, spec.title_line2_y),
        ];
        for (text, y) in lines {
            let Some(sprite) = render_line(&resolved.handle, text, spec.title_color.to_rgba())
                .map_err(|e| e.at_stage(CompositionStage::Title))?
            else {
                continue;
            };
            let x = spec.centered_x(f64::from(sprite.width));
            let (px, py) = sprite.paste_origin(x, y);
            paste(canvas, &sprite.image, px, py);
        }
        Ok(())
    }
}

/// Recovered problems, deduplicated by message (every font resolution against the same bad
/// bytes fails the same way).
#[derive(Default)]
struct Notices(Vec<BannerError>);

impl Notices {
    fn push(&mut self, notice: Option<BannerError>) {
        let Some(notice) = notice else {
            return;
        };
        let msg = notice.to_string();
        if self.0.iter().all(|n| n.to_string() != msg) {
            self.0.push(notice);
        }
    }

    fn into_inner(self) -> Vec<BannerError> {
        self.0
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/compose.rs"]
mod tests;
