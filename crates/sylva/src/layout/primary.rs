//! Primary placement pass.
//!
//! Each level is packed left to right in tree order. A node never starts left
//! of its parent's indent, so every subtree sits under its parent. Without
//! symmetrization this pass also draws the tree; parents then sit at the
//! left edge of their children.

use log::trace;

use sylva_core::{draw::TextMeasurer, tree::Tree};

use super::{
    Geometry,
    canvas::Canvas,
    connector::{Connector, choose_connector},
    width::LabelWidths,
};
use crate::{SylvaError, config::LeafConnectorStyle};

/// Assigns an indent to every node and, if `draw` is set, draws each node
/// with its connector.
///
/// Widths must already be reconciled in `geometry`.
///
/// # Errors
///
/// Fails if a width is missing or a label cannot be measured.
pub fn place<M: TextMeasurer>(
    tree: &Tree,
    labels: &LabelWidths,
    style: LeafConnectorStyle,
    draw: bool,
    geometry: &mut Geometry,
    canvas: &mut Canvas<'_, M>,
) -> Result<(), SylvaError> {
    for level in 0..tree.level_count() {
        let mut x = 0.0_f32;

        for node in tree.nodes_at_level(level) {
            let width = geometry.require_width(node.id())?;
            let parent_indent = match node.parent() {
                Some(parent) => geometry.require_indent(parent)?,
                None => 0.0,
            };

            x = x.max(parent_indent);
            geometry.set_indent(node.id(), x);
            trace!(node:% = node.id(), level, indent = x, width; "Placed node");

            if draw {
                canvas.draw_element(x, level, width, node.content(), node.kind())?;

                if let Some(parent) = node.parent() {
                    match choose_connector(style, node, x == parent_indent) {
                        Connector::None => {}
                        Connector::Line => {
                            let parent_width = geometry.require_width(parent)?;
                            canvas.line_to_parent(x, level, width, parent_indent, parent_width);
                        }
                        Connector::Triangle => {
                            let label_width = labels.get(node.id())?;
                            canvas.triangle_to_parent(x, level, width, label_width);
                        }
                    }
                }
            }

            x += width;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;
    use proptest::prelude::*;

    use sylva_core::{
        color::Palette,
        draw::FixedAdvanceMeasurer,
        tree::{NodeId, NodeKind},
    };

    use super::*;
    use crate::{
        config::{Metrics, RenderOptions},
        layout::width::WidthReconciler,
    };

    const MEASURER: FixedAdvanceMeasurer = FixedAdvanceMeasurer::new(1.0);

    struct Placed {
        geometry: Geometry,
        texts: usize,
        lines: usize,
        polygons: usize,
    }

    fn run(tree: &Tree, style: LeafConnectorStyle) -> Placed {
        let metrics = Metrics::default();
        let options = RenderOptions::default()
            .with_font_size(10.0)
            .with_symmetrize(false)
            .with_leaf_connector_style(style);
        let labels = LabelWidths::measure(tree, &MEASURER, "serif", 10.0).unwrap();
        let mut geometry = WidthReconciler::new(tree, &labels, 10.0).reconcile().unwrap();
        let mut canvas = Canvas::new(&metrics, &options, Palette::default(), &MEASURER).unwrap();

        place(tree, &labels, style, true, &mut geometry, &mut canvas).unwrap();

        let primitives = canvas.into_primitives();
        Placed {
            geometry,
            texts: primitives.text_count(),
            lines: primitives.line_count(),
            polygons: primitives.polygon_count(),
        }
    }

    fn indent(placed: &Placed, id: NodeId) -> f32 {
        placed.geometry.indent(id).unwrap()
    }

    #[test]
    fn test_children_are_packed_under_parent() {
        let mut tree = Tree::new();
        let s = tree.add_root(NodeKind::Internal, "S").unwrap();
        let np = tree.add_child(s, NodeKind::Leaf, "NP").unwrap();
        let vp = tree.add_child(s, NodeKind::Leaf, "VP").unwrap();

        let placed = run(&tree, LeafConnectorStyle::Auto);
        assert_approx_eq!(f32, indent(&placed, s), 0.0);
        assert_approx_eq!(f32, indent(&placed, np), 0.0);
        assert_approx_eq!(f32, indent(&placed, vp), 30.0);
        assert_eq!((placed.texts, placed.lines, placed.polygons), (3, 2, 0));
    }

    #[test]
    fn test_node_never_starts_left_of_parent() {
        let mut tree = Tree::new();
        let s = tree.add_root(NodeKind::Internal, "S").unwrap();
        let a = tree.add_child(s, NodeKind::Leaf, "aaaa").unwrap();
        let b = tree.add_child(s, NodeKind::Internal, "B").unwrap();
        let c = tree.add_child(b, NodeKind::Leaf, "c").unwrap();

        let placed = run(&tree, LeafConnectorStyle::Auto);
        // "c" is the first node of level 2 but its parent starts at 50.
        assert_approx_eq!(f32, indent(&placed, a), 0.0);
        assert_approx_eq!(f32, indent(&placed, b), 50.0);
        assert_approx_eq!(f32, indent(&placed, c), 50.0);
    }

    #[test]
    fn test_only_aligned_phrase_gets_triangle() {
        let mut tree = Tree::new();
        let s = tree.add_root(NodeKind::Internal, "S").unwrap();
        tree.add_child(s, NodeKind::Leaf, "the big dog").unwrap();
        tree.add_child(s, NodeKind::Leaf, "barks loudly").unwrap();

        let placed = run(&tree, LeafConnectorStyle::Auto);
        assert_eq!(placed.polygons, 1);
        assert_eq!(placed.lines, 1);
    }

    #[test]
    fn test_none_style_draws_no_leaf_connectors() {
        let mut tree = Tree::new();
        let s = tree.add_root(NodeKind::Internal, "S").unwrap();
        let np = tree.add_child(s, NodeKind::Internal, "NP").unwrap();
        tree.add_child(np, NodeKind::Leaf, "dog").unwrap();

        let placed = run(&tree, LeafConnectorStyle::None);
        assert_eq!(placed.lines, 1);
        assert_eq!(placed.texts, 3);
    }

    #[test]
    fn test_forest_roots_are_side_by_side() {
        let mut tree = Tree::new();
        let a = tree.add_root(NodeKind::Leaf, "ab").unwrap();
        let b = tree.add_root(NodeKind::Leaf, "c").unwrap();

        let placed = run(&tree, LeafConnectorStyle::Auto);
        assert_approx_eq!(f32, indent(&placed, a), 0.0);
        assert_approx_eq!(f32, indent(&placed, b), 30.0);
        assert_eq!(placed.lines, 0);
    }

    fn tree_from_shape(shape: &[(usize, usize, bool)]) -> Tree {
        let mut tree = Tree::new();
        let mut internals = vec![tree.add_root(NodeKind::Internal, "S").unwrap()];
        for &(parent_pick, label_len, leaf) in shape {
            let parent = internals[parent_pick % internals.len()];
            let kind = if leaf { NodeKind::Leaf } else { NodeKind::Internal };
            let id = tree.add_child(parent, kind, "w".repeat(label_len)).unwrap();
            if !leaf {
                internals.push(id);
            }
        }
        tree
    }

    proptest! {
        #[test]
        fn siblings_do_not_overlap(
            shape in prop::collection::vec((0usize..50, 0usize..8, any::<bool>()), 0..40)
        ) {
            let tree = tree_from_shape(&shape);
            let placed = run(&tree, LeafConnectorStyle::Auto);

            for level in 0..tree.level_count() {
                let mut right_edge = 0.0_f32;
                for node in tree.nodes_at_level(level) {
                    let left = indent(&placed, node.id());
                    prop_assert!(left >= right_edge - 0.01);
                    if let Some(parent) = node.parent() {
                        prop_assert!(left >= indent(&placed, parent) - 0.01);
                    }
                    right_edge = left + placed.geometry.width(node.id()).unwrap();
                }
            }
        }
    }
}
