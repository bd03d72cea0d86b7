/// Convenience result type used across promocard.
pub type BannerResult<T> = Result<T, BannerError>;

/// Pipeline stage a [`BannerError::Composition`] failure happened in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CompositionStage {
    /// Stretching the background onto the canvas.
    Background,
    /// Shaping or rasterizing a title line.
    Title,
    /// Running the background remover on a product image.
    Matting,
    /// Aspect-fitting a product image into the product box.
    ProductFit,
    /// Rendering the call-to-action button.
    Button,
    /// Pasting a finished layer onto the canvas.
    Paste,
}

impl CompositionStage {
    /// Stable snake_case name used in error messages and log fields.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Background => "background",
            Self::Title => "title",
            Self::Matting => "matting",
            Self::ProductFit => "product_fit",
            Self::Button => "button",
            Self::Paste => "paste",
        }
    }
}

impl std::fmt::Display for CompositionStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Top-level error taxonomy used by the banner pipeline.
#[derive(thiserror::Error, Debug)]
pub enum BannerError {
    /// A required asset is absent or the request is malformed.
    #[error("input missing: {0}")]
    InputMissing(String),

    /// Font bytes could not be loaded. Recovered by falling back to the built-in face.
    #[error("font load error: {0}")]
    FontLoad(String),

    /// Fetching an image over HTTP failed.
    #[error("network fetch error for '{url}': {reason}")]
    NetworkFetch {
        /// URL that was requested.
        url: String,
        /// Human readable failure description.
        reason: String,
    },

    /// Bytes could not be decoded into an image.
    #[error("decode error: {0}")]
    Decode(String),

    /// Drawing, resizing or matting failed; the whole request is aborted.
    #[error("composition error at {stage}: {reason}")]
    Composition {
        /// Stage that failed.
        stage: CompositionStage,
        /// Human readable failure description.
        reason: String,
    },

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BannerError {
    /// Build a [`BannerError::InputMissing`] value.
    pub fn input_missing(msg: impl Into<String>) -> Self {
        Self::InputMissing(msg.into())
    }

    /// Build a [`BannerError::FontLoad`] value.
    pub fn font_load(msg: impl Into<String>) -> Self {
        Self::FontLoad(msg.into())
    }

    /// Build a [`BannerError::NetworkFetch`] value.
    pub fn network_fetch(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::NetworkFetch {
            url: url.into(),
            reason: reason.into(),
        }
    }

    /// Build a [`BannerError::Decode`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`BannerError::Composition`] value.
    pub fn composition(stage: CompositionStage, reason: impl Into<String>) -> Self {
        Self::Composition {
            stage,
            reason: reason.into(),
        }
    }

    /// Re-tag any error as a terminal composition failure of `stage`.
    ///
    /// Errors that already carry a stage keep it.
    pub fn at_stage(self, stage: CompositionStage) -> Self {
        match self {
            Self::Composition { .. } => self,
            other => Self::composition(stage, other.to_string()),
        }
    }

    /// Whether the pipeline recovers from this error on its own.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::FontLoad(_))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
