//! Text measurement for label layout.
//!
//! Layout only needs one number per label: its advance width in pixels for a
//! given font family and size. [`TextMeasurer`] is the seam between the layout
//! engine and whatever the host uses to answer that question.
//!
//! # Overview
//!
//! - [`TextMeasurer`] - The measuring interface consumed by layout
//! - [`FontSystemMeasurer`] - Measures with real font metrics through `cosmic-text`
//! - [`FixedAdvanceMeasurer`] - Deterministic measurer for tests and font-less hosts
//!
//! # Quick Start
//!
//! ```
//! # use sylva_core::draw::{FixedAdvanceMeasurer, TextMeasurer};
//! let measurer = FixedAdvanceMeasurer::new(0.5);
//! let width = measurer.measure("dog", "sans-serif", 16.0).unwrap();
//! assert_eq!(width, 24.0);
//! ```

use std::sync::Mutex;

use cosmic_text::{Attrs, Buffer, Family, FontSystem, Metrics, Shaping, fontdb};
use log::{debug, info};
use thiserror::Error;

/// Failures reported by a [`TextMeasurer`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MeasureError {
    #[error("font family `{0}` is not available")]
    UnknownFontFamily(String),

    #[error("invalid font size {0}")]
    InvalidFontSize(String),

    #[error("font system is unavailable: {0}")]
    FontSystem(String),
}

/// Measures the pixel width of a single line of text.
///
/// Implementations must be pure and deterministic for a given font family and
/// size: layout measures the same label several times and expects the same
/// answer each time.
pub trait TextMeasurer {
    /// Returns the advance width of `text` in pixels.
    ///
    /// # Errors
    ///
    /// Returns a [`MeasureError`] when the text cannot be measured, for
    /// example because the font family is not installed. Layout has no
    /// fallback font and treats this as fatal.
    fn measure(&self, text: &str, font_family: &str, size_px: f32) -> Result<f32, MeasureError>;
}

impl<T: TextMeasurer + ?Sized> TextMeasurer for &T {
    fn measure(&self, text: &str, font_family: &str, size_px: f32) -> Result<f32, MeasureError> {
        (**self).measure(text, font_family, size_px)
    }
}

impl<T: TextMeasurer + ?Sized> TextMeasurer for Box<T> {
    fn measure(&self, text: &str, font_family: &str, size_px: f32) -> Result<f32, MeasureError> {
        (**self).measure(text, font_family, size_px)
    }
}

fn check_size(size_px: f32) -> Result<(), MeasureError> {
    if size_px.is_finite() && size_px > 0.0 {
        Ok(())
    } else {
        Err(MeasureError::InvalidFontSize(size_px.to_string()))
    }
}

/// Measures every character with the same advance, a fraction of the font size.
///
/// Useful wherever output must not depend on installed fonts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedAdvanceMeasurer {
    advance: f32,
}

impl FixedAdvanceMeasurer {
    /// Creates a measurer where each character is `advance × size` pixels wide.
    pub const fn new(advance: f32) -> Self {
        Self { advance }
    }
}

impl Default for FixedAdvanceMeasurer {
    fn default() -> Self {
        Self::new(0.55)
    }
}

impl TextMeasurer for FixedAdvanceMeasurer {
    fn measure(&self, text: &str, _font_family: &str, size_px: f32) -> Result<f32, MeasureError> {
        check_size(size_px)?;
        Ok(text.chars().count() as f32 * self.advance * size_px)
    }
}

/// Measures text with real font metrics and shaping through `cosmic-text`.
///
/// It maintains a reusable `FontSystem` instance to avoid expensive
/// recreation; system fonts are loaded once, on construction.
pub struct FontSystemMeasurer {
    font_system: Mutex<FontSystem>,
}

impl Default for FontSystemMeasurer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for FontSystemMeasurer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontSystemMeasurer").finish_non_exhaustive()
    }
}

impl FontSystemMeasurer {
    /// Create a new measurer backed by the system font database.
    pub fn new() -> Self {
        info!("Initializing FontSystem");
        Self::with_font_system(FontSystem::new())
    }

    /// Create a measurer from a prepared `FontSystem`, for example one
    /// loaded with bundled fonts only.
    pub fn with_font_system(font_system: FontSystem) -> Self {
        Self {
            font_system: Mutex::new(font_system),
        }
    }
}

/// Maps a CSS font family name to a font database family.
fn family_for(name: &str) -> Family<'_> {
    match name {
        "serif" => Family::Serif,
        "sans-serif" | "sans" => Family::SansSerif,
        "monospace" => Family::Monospace,
        "cursive" => Family::Cursive,
        "fantasy" => Family::Fantasy,
        _ => Family::Name(name),
    }
}

impl TextMeasurer for FontSystemMeasurer {
    fn measure(&self, text: &str, font_family: &str, size_px: f32) -> Result<f32, MeasureError> {
        check_size(size_px)?;
        if text.is_empty() {
            return Ok(0.0);
        }

        let mut font_system = self
            .font_system
            .lock()
            .map_err(|err| MeasureError::FontSystem(err.to_string()))?;

        let family = family_for(font_family);
        let query = fontdb::Query {
            families: &[family],
            weight: fontdb::Weight::NORMAL,
            stretch: fontdb::Stretch::Normal,
            style: fontdb::Style::Normal,
        };
        if font_system.db().query(&query).is_none() {
            return Err(MeasureError::UnknownFontFamily(font_family.to_string()));
        }

        let metrics = Metrics::new(size_px, size_px * 1.15);
        let mut buffer = Buffer::new(&mut font_system, metrics);
        let mut buffer = buffer.borrow_with(&mut font_system);

        let attrs = Attrs::new().family(family);
        buffer.set_size(None, None);
        buffer.set_text(text, &attrs, Shaping::Advanced, None);
        buffer.shape_until_scroll(true);

        // Rightmost glyph extent across layout runs.
        let width = buffer
            .layout_runs()
            .filter_map(|run| run.glyphs.last().map(|glyph| glyph.x + glyph.w))
            .fold(0.0_f32, f32::max);

        debug!(text, font_family, size_px, width; "Measured text");
        Ok(width)
    }
}
