//! Tree layout.
//!
//! Layout runs in fixed stages over an immutable [`Tree`]:
//!
//! 1. Every label is measured once ([`width::LabelWidths`]).
//! 2. Widths are reconciled bottom-up ([`width::WidthReconciler`]).
//! 3. The primary pass assigns left-to-right indents per level and, when
//!    symmetrization is off, draws the tree ([`primary`]).
//! 4. The symmetric pass re-centers parents over their children from the
//!    deepest level up and draws the tree ([`symmetric`]).
//!
//! Per-node widths and indents are kept in a [`Geometry`] map owned by the
//! layout rather than on the tree nodes.

pub mod canvas;
pub mod connector;
pub mod primary;
pub mod symmetric;
pub mod width;

use indexmap::IndexMap;
use log::{debug, info};

use sylva_core::{
    draw::{DrawList, TextMeasurer},
    tree::{NodeId, Tree},
};

use crate::{SylvaError, config::AppConfig};

use canvas::Canvas;
use width::{LabelWidths, WidthReconciler};

/// Width and indent of every node, keyed by node id.
#[derive(Debug, Clone, Default)]
pub struct Geometry {
    widths: IndexMap<NodeId, f32>,
    indents: IndexMap<NodeId, f32>,
}

impl Geometry {
    /// Returns the reconciled width of `id`, if computed.
    pub fn width(&self, id: NodeId) -> Option<f32> {
        self.widths.get(&id).copied()
    }

    /// Returns the indent of `id`, if assigned.
    pub fn indent(&self, id: NodeId) -> Option<f32> {
        self.indents.get(&id).copied()
    }

    pub fn set_width(&mut self, id: NodeId, width: f32) {
        self.widths.insert(id, width);
    }

    pub fn set_indent(&mut self, id: NodeId, indent: f32) {
        self.indents.insert(id, indent);
    }

    /// Like [`Geometry::width`], but a missing width is a layout error.
    pub fn require_width(&self, id: NodeId) -> Result<f32, SylvaError> {
        self.width(id)
            .ok_or_else(|| SylvaError::Layout(format!("width of node {id} is not computed")))
    }

    /// Like [`Geometry::indent`], but a missing indent is a layout error.
    pub fn require_indent(&self, id: NodeId) -> Result<f32, SylvaError> {
        self.indent(id)
            .ok_or_else(|| SylvaError::Layout(format!("indent of node {id} is not assigned")))
    }

    /// Sums the widths of `ids`.
    pub fn sum_widths(&self, ids: &[NodeId]) -> Result<f32, SylvaError> {
        ids.iter().map(|&id| self.require_width(id)).sum()
    }

    /// Sums the widths of the nodes at `level`. Nodes without a width count
    /// as zero.
    pub fn level_width(&self, tree: &Tree, level: usize) -> f32 {
        tree.nodes_at_level(level)
            .filter_map(|node| self.width(node.id()))
            .sum()
    }
}

/// Result of laying out a tree: geometry, primitives and document size.
#[derive(Debug)]
pub struct Layout {
    geometry: Geometry,
    primitives: DrawList,
    width: f32,
    height: f32,
}

impl Layout {
    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// Primitives in draw order.
    pub fn primitives(&self) -> &DrawList {
        &self.primitives
    }

    /// Document width in pixels.
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Document height in pixels.
    pub fn height(&self) -> f32 {
        self.height
    }
}

/// Lays out trees under one configuration with one text measurer.
pub struct LayoutEngine<'a, M> {
    config: &'a AppConfig,
    measurer: &'a M,
}

impl<'a, M: TextMeasurer> LayoutEngine<'a, M> {
    pub fn new(config: &'a AppConfig, measurer: &'a M) -> Self {
        Self { config, measurer }
    }

    /// Computes the complete layout of `tree`.
    ///
    /// # Errors
    ///
    /// Returns [`SylvaError::EmptyTree`] for a tree without nodes, a
    /// configuration error for unparsable style colors, and propagates
    /// measurement failures.
    pub fn calculate(&self, tree: &Tree) -> Result<Layout, SylvaError> {
        if tree.is_empty() {
            return Err(SylvaError::EmptyTree);
        }

        let metrics = self.config.metrics();
        let options = self.config.render();
        let palette = self
            .config
            .style()
            .palette(options.color_mode())
            .map_err(SylvaError::Config)?;

        let labels = LabelWidths::measure(
            tree,
            self.measurer,
            options.font_family(),
            options.font_size(),
        )?;
        let mut geometry = WidthReconciler::new(tree, &labels, options.font_size()).reconcile()?;

        let levels = tree.level_count();
        let width = geometry.level_width(tree, 0) + 2.0 * metrics.side_margin();
        let height = levels as f32 * metrics.row_height(options.font_size())
            + levels.saturating_sub(1) as f32
                * (metrics.vertical_spacing() + options.font_size())
            + 2.0 * metrics.top_bottom_margin();
        info!(nodes = tree.len(), levels, width, height; "Laying out tree");

        let mut canvas = Canvas::new(metrics, options, palette, self.measurer)?;
        primary::place(
            tree,
            &labels,
            options.leaf_connector_style(),
            !options.symmetrize(),
            &mut geometry,
            &mut canvas,
        )?;
        debug!(drawn = canvas.primitives().len(); "Primary pass done");
        if options.symmetrize() {
            symmetric::place(
                tree,
                &labels,
                options.leaf_connector_style(),
                &mut geometry,
                &mut canvas,
            )?;
        }

        let primitives = canvas.into_primitives();
        debug!(
            texts = primitives.text_count(),
            lines = primitives.line_count(),
            polygons = primitives.polygon_count();
            "Tree drawn"
        );

        Ok(Layout {
            geometry,
            primitives,
            width,
            height,
        })
    }
}
