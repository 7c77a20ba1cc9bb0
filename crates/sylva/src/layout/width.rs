//! Width reconciliation.
//!
//! Leaves are as wide as their label plus one font size. An internal node is
//! as wide as its children combined, unless its own label is wider; in that
//! case the extra width is pushed down into the whole subtree so that the
//! children again fill their parent exactly.
//!
//! Both walks use explicit stacks so that very deep trees cannot exhaust the
//! call stack.

use indexmap::IndexMap;
use log::{debug, trace};

use sylva_core::{
    draw::TextMeasurer,
    tree::{NodeId, Tree},
};

use super::Geometry;
use crate::SylvaError;

/// Measured width of every node's raw label, without padding.
#[derive(Debug, Clone, Default)]
pub struct LabelWidths {
    widths: IndexMap<NodeId, f32>,
}

impl LabelWidths {
    /// Measures the label of every node once.
    ///
    /// # Errors
    ///
    /// Propagates the first measurement failure.
    pub fn measure<M: TextMeasurer>(
        tree: &Tree,
        measurer: &M,
        font_family: &str,
        font_size: f32,
    ) -> Result<Self, SylvaError> {
        let widths = tree
            .nodes()
            .map(|node| {
                measurer
                    .measure(node.content(), font_family, font_size)
                    .map(|width| (node.id(), width))
            })
            .collect::<Result<_, _>>()?;
        Ok(Self { widths })
    }

    /// Returns the label width of `id`.
    ///
    /// # Errors
    ///
    /// Returns [`SylvaError::Layout`] if `id` was not measured.
    pub fn get(&self, id: NodeId) -> Result<f32, SylvaError> {
        self.widths
            .get(&id)
            .copied()
            .ok_or_else(|| SylvaError::Layout(format!("no label width for node {id}")))
    }
}

/// Computes the width of every node, bottom-up.
pub struct WidthReconciler<'a> {
    tree: &'a Tree,
    labels: &'a LabelWidths,
    font_size: f32,
}

impl<'a> WidthReconciler<'a> {
    pub fn new(tree: &'a Tree, labels: &'a LabelWidths, font_size: f32) -> Self {
        Self {
            tree,
            labels,
            font_size,
        }
    }

    /// Returns the label width plus one font size of lateral padding.
    fn own_width(&self, id: NodeId) -> Result<f32, SylvaError> {
        Ok(self.labels.get(id)? + self.font_size)
    }

    fn children(&self, id: NodeId) -> Result<&'a [NodeId], SylvaError> {
        self.tree
            .children(id)
            .ok_or_else(|| SylvaError::Layout(format!("unknown node {id}")))
    }

    /// Computes widths for every root and returns the fresh geometry.
    ///
    /// The sum of the root widths is the width of level 0.
    pub fn reconcile(&self) -> Result<Geometry, SylvaError> {
        let mut geometry = Geometry::default();
        for root in self.tree.roots() {
            let width = self.compute_width(root.id(), &mut geometry)?;
            trace!(node:% = root.id(), width; "Root width reconciled");
        }
        debug!(
            nodes = self.tree.len(),
            level_width = geometry.level_width(self.tree, 0);
            "Widths reconciled"
        );
        Ok(geometry)
    }

    /// Computes the width of the subtree rooted at `id`, children first.
    pub fn compute_width(&self, id: NodeId, geometry: &mut Geometry) -> Result<f32, SylvaError> {
        let mut stack = vec![(id, false)];

        while let Some((current, expanded)) = stack.pop() {
            let children = self.children(current)?;

            if !expanded {
                stack.push((current, true));
                stack.extend(children.iter().rev().map(|&child| (child, false)));
                continue;
            }

            let own_width = self.own_width(current)?;
            let width = if children.is_empty() {
                own_width
            } else {
                let children_width = geometry.sum_widths(children)?;
                if own_width > children_width {
                    self.redistribute(current, children_width, own_width, geometry)?;
                    own_width
                } else {
                    children_width
                }
            };
            geometry.set_width(current, width);
        }

        geometry.require_width(id)
    }

    /// Widens `id` to `target` and spreads the difference over its subtree.
    ///
    /// `current` is the combined width of the children of `id`. The
    /// difference `target - current` is split evenly across the immediate
    /// children, the last child absorbing the rounding remainder, and every
    /// child is widened the same way in turn.
    pub fn redistribute(
        &self,
        id: NodeId,
        current: f32,
        target: f32,
        geometry: &mut Geometry,
    ) -> Result<(), SylvaError> {
        let mut stack = vec![(id, current, target)];

        while let Some((node, current, target)) = stack.pop() {
            geometry.set_width(node, target);

            let children = self.children(node)?;
            if children.is_empty() {
                continue;
            }

            let delta = target - current;
            let count = children.len() as f32;
            let per_child = delta / count;
            let remainder = delta - per_child * (count - 1.0);

            for (position, &child) in children.iter().enumerate() {
                let child_delta = if position + 1 == children.len() {
                    remainder
                } else {
                    per_child
                };
                let child_width = geometry.require_width(child)?;
                let grandchildren_width = geometry.sum_widths(self.children(child)?)?;
                stack.push((child, grandchildren_width, child_width + child_delta));
            }
        }

        Ok(())
    }
}
