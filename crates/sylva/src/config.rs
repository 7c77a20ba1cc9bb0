//! Configuration types for syntax tree rendering.
//!
//! This module provides configuration structures that control how trees
//! are measured, laid out and styled. All types implement
//! [`serde::Deserialize`], and every field has a default, so partial
//! configurations can be loaded from external sources.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining the sections below.
//! - [`Metrics`] - Pixel spacing of the diagram.
//! - [`RenderOptions`] - Layout mode, connector style and font.
//! - [`StyleConfig`] - Optional overrides of the role colors.
//!
//! # Example
//!
//! ```
//! # use sylva::config::{AppConfig, LeafConnectorStyle};
//! let config = AppConfig::default();
//! assert!(config.render().symmetrize());
//! assert_eq!(config.render().leaf_connector_style(), LeafConnectorStyle::Auto);
//! ```

use serde::Deserialize;

use sylva_core::color::{Color, Palette};

/// Top-level configuration combining metrics, render options and style.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Pixel spacing section.
    #[serde(default)]
    metrics: Metrics,

    /// Layout mode and font section.
    #[serde(default)]
    render: RenderOptions,

    /// Color override section.
    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    ///
    /// # Arguments
    ///
    /// * `metrics` - Pixel spacing of the diagram.
    /// * `render` - Layout mode, connector style and font.
    /// * `style` - Color overrides.
    pub fn new(metrics: Metrics, render: RenderOptions, style: StyleConfig) -> Self {
        Self {
            metrics,
            render,
            style,
        }
    }

    /// Returns the metrics configuration.
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Returns the render options.
    pub fn render(&self) -> &RenderOptions {
        &self.render
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }
}

/// Pixel spacing of a diagram.
///
/// Rows are `font_size + 2 × element_padding_v` tall and separated by
/// `vertical_spacing + font_size` pixels.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct Metrics {
    element_padding_v: f32,
    side_margin: f32,
    top_bottom_margin: f32,
    vertical_spacing: f32,
}

impl Default for Metrics {
    fn default() -> Self {
        Self {
            element_padding_v: 14.0,
            side_margin: 10.0,
            top_bottom_margin: 10.0,
            vertical_spacing: 20.0,
        }
    }
}

impl Metrics {
    pub fn new(
        element_padding_v: f32,
        side_margin: f32,
        top_bottom_margin: f32,
        vertical_spacing: f32,
    ) -> Self {
        Self {
            element_padding_v,
            side_margin,
            top_bottom_margin,
            vertical_spacing,
        }
    }

    /// Vertical padding above and below a label inside its row.
    pub fn element_padding_v(&self) -> f32 {
        self.element_padding_v
    }

    /// Horizontal margin left of the diagram.
    pub fn side_margin(&self) -> f32 {
        self.side_margin
    }

    /// Margin above the first and below the last row.
    pub fn top_bottom_margin(&self) -> f32 {
        self.top_bottom_margin
    }

    /// Extra space between rows, on top of one font size.
    pub fn vertical_spacing(&self) -> f32 {
        self.vertical_spacing
    }

    /// Height of a row for the given font size.
    pub fn row_height(&self, font_size: f32) -> f32 {
        font_size + 2.0 * self.element_padding_v
    }
}

/// Text color policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColorMode {
    /// Black labels; traces keep their own color.
    Monochrome,
    /// Distinct colors for internal nodes, leaves and traces.
    #[default]
    RoleColored,
}

/// How leaves are connected to their parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeafConnectorStyle {
    /// No connector; the leaf is drawn closer to its parent instead.
    #[serde(alias = "nothing")]
    None,
    /// Always a straight line.
    Line,
    /// A triangle over multi-word leaves.
    Triangle,
    /// A triangle over multi-word or hinted leaves, a line otherwise.
    #[default]
    Auto,
}

/// Layout mode, connector style and font settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    symmetrize: bool,
    color_mode: ColorMode,
    leaf_connector_style: LeafConnectorStyle,
    font_family: String,
    font_style: String,
    font_size: f32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            symmetrize: true,
            color_mode: ColorMode::default(),
            leaf_connector_style: LeafConnectorStyle::default(),
            font_family: "sans-serif".to_string(),
            font_style: "sans".to_string(),
            font_size: 16.0,
        }
    }
}

impl RenderOptions {
    /// Returns `true` when parents are centered over their children.
    pub fn symmetrize(&self) -> bool {
        self.symmetrize
    }

    pub fn color_mode(&self) -> ColorMode {
        self.color_mode
    }

    pub fn leaf_connector_style(&self) -> LeafConnectorStyle {
        self.leaf_connector_style
    }

    /// Font family handed to the text measurer.
    pub fn font_family(&self) -> &str {
        &self.font_family
    }

    /// Font style name as configured.
    pub fn font_style(&self) -> &str {
        &self.font_style
    }

    /// Value of the SVG `font-family` attribute.
    ///
    /// The shorthand `sans` stands for `sans-serif`.
    pub fn svg_font_family(&self) -> &str {
        match self.font_style.as_str() {
            "sans" => "sans-serif",
            other => other,
        }
    }

    /// Font size in pixels.
    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    pub fn with_symmetrize(mut self, symmetrize: bool) -> Self {
        self.symmetrize = symmetrize;
        self
    }

    pub fn with_color_mode(mut self, color_mode: ColorMode) -> Self {
        self.color_mode = color_mode;
        self
    }

    pub fn with_leaf_connector_style(mut self, style: LeafConnectorStyle) -> Self {
        self.leaf_connector_style = style;
        self
    }

    pub fn with_font_family(mut self, font_family: impl Into<String>) -> Self {
        self.font_family = font_family.into();
        self
    }

    pub fn with_font_style(mut self, font_style: impl Into<String>) -> Self {
        self.font_style = font_style.into();
        self
    }

    pub fn with_font_size(mut self, font_size: f32) -> Self {
        self.font_size = font_size;
        self
    }
}

/// Optional overrides of the role colors, as CSS color strings.
///
/// Fields that are not set fall back to the palette of the active
/// [`ColorMode`].
#[derive(Debug, Default, Clone, Deserialize)]
pub struct StyleConfig {
    #[serde(default)]
    node_color: Option<String>,

    #[serde(default)]
    leaf_color: Option<String>,

    #[serde(default)]
    trace_color: Option<String>,

    #[serde(default)]
    line_color: Option<String>,
}

impl StyleConfig {
    /// Builds the [`Palette`] for `mode` with the configured overrides applied.
    ///
    /// # Errors
    ///
    /// Returns an error if a configured color string cannot be parsed
    /// into a valid [`Color`].
    pub fn palette(&self, mode: ColorMode) -> Result<Palette, String> {
        let base = match mode {
            ColorMode::Monochrome => Palette::monochrome(),
            ColorMode::RoleColored => Palette::role_colored(),
        };

        let pick = |value: &Option<String>, fallback: Color, role: &str| {
            value
                .as_deref()
                .map(Color::new)
                .transpose()
                .map(|color| color.unwrap_or(fallback))
                .map_err(|err| format!("Invalid {role} color in config: {err}"))
        };

        Ok(Palette::new(
            pick(&self.node_color, base.node(), "node")?,
            pick(&self.leaf_color, base.leaf(), "leaf")?,
            pick(&self.trace_color, base.trace(), "trace")?,
            pick(&self.line_color, base.line(), "line")?,
        ))
    }
}
