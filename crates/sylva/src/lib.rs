//! Sylva - Layout and SVG rendering of linguistic syntax trees.
//!
//! Sylva takes a labeled tree built by the caller, measures every label,
//! reconciles node widths, places nodes level by level and emits a standalone
//! SVG document. Bracket-notation parsing is left to the caller.
//!
//! # Example
//!
//! ```
//! use sylva::{
//!     TreeRenderer,
//!     config::AppConfig,
//!     draw::FixedAdvanceMeasurer,
//!     tree::{NodeKind, Tree},
//! };
//!
//! let mut tree = Tree::new();
//! let s = tree.add_root(NodeKind::Internal, "S").unwrap();
//! tree.add_child(s, NodeKind::Leaf, "NP").unwrap();
//! tree.add_child(s, NodeKind::Leaf, "VP").unwrap();
//!
//! let measurer = FixedAdvanceMeasurer::default();
//! let renderer = TreeRenderer::with_measurer(AppConfig::default(), measurer);
//! let svg = renderer.render_svg(&tree).unwrap();
//! assert!(svg.contains("<svg"));
//! ```

pub mod config;

mod error;
mod export;
mod layout;

pub use sylva_core::{color, draw, geometry, label, tree};

pub use error::SylvaError;
pub use export::SvgDocument;
pub use layout::{Geometry, Layout};

use log::{debug, info};

use config::AppConfig;
use draw::{FontSystemMeasurer, TextMeasurer};
use layout::LayoutEngine;
use tree::Tree;

/// Lays out and renders syntax trees.
///
/// A renderer holds the configuration and the text measurer; it can render
/// any number of trees. Trees are only borrowed, so one tree can be rendered
/// by several renderers.
///
/// # Examples
///
/// ```rust,no_run
/// use sylva::{TreeRenderer, config::AppConfig, tree::{NodeKind, Tree}};
///
/// let mut tree = Tree::new();
/// tree.add_root(NodeKind::Leaf, "dog").unwrap();
///
/// // Measures labels with the system fonts.
/// let renderer = TreeRenderer::new(AppConfig::default());
/// let svg = renderer.render_svg(&tree).expect("Failed to render");
/// println!("{svg}");
/// ```
#[derive(Debug)]
pub struct TreeRenderer<M = FontSystemMeasurer> {
    config: AppConfig,
    measurer: M,
}

impl TreeRenderer<FontSystemMeasurer> {
    /// Creates a renderer measuring text with the system fonts.
    ///
    /// # Arguments
    ///
    /// * `config` - Metrics, render options and style
    pub fn new(config: AppConfig) -> Self {
        Self::with_measurer(config, FontSystemMeasurer::new())
    }
}

impl Default for TreeRenderer<FontSystemMeasurer> {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}

impl<M: TextMeasurer> TreeRenderer<M> {
    /// Creates a renderer with a custom text measurer.
    ///
    /// # Arguments
    ///
    /// * `config` - Metrics, render options and style
    /// * `measurer` - Source of label widths
    pub fn with_measurer(config: AppConfig, measurer: M) -> Self {
        Self { config, measurer }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn measurer(&self) -> &M {
        &self.measurer
    }

    /// Computes the layout of `tree` without serializing it.
    ///
    /// # Errors
    ///
    /// Returns [`SylvaError::EmptyTree`] for a tree without nodes,
    /// [`SylvaError::Config`] for invalid style colors and
    /// [`SylvaError::Measure`] when a label cannot be measured.
    pub fn layout(&self, tree: &Tree) -> Result<Layout, SylvaError> {
        info!(
            nodes = tree.len(),
            symmetrize = self.config.render().symmetrize();
            "Computing layout"
        );
        let layout = LayoutEngine::new(&self.config, &self.measurer).calculate(tree)?;
        debug!(width = layout.width(), height = layout.height(); "Layout calculated");
        Ok(layout)
    }

    /// Renders `tree` to a standalone SVG document.
    ///
    /// # Errors
    ///
    /// Fails under the same conditions as [`TreeRenderer::layout`].
    pub fn render_svg(&self, tree: &Tree) -> Result<String, SylvaError> {
        let layout = self.layout(tree)?;
        let svg = SvgDocument::from_layout(&layout).to_string();
        info!(bytes = svg.len(); "SVG rendered successfully");
        Ok(svg)
    }
}
