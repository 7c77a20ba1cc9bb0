//! Symmetric placement pass.
//!
//! Runs after the primary pass, from the deepest level up to the roots, and
//! re-centers every node over its children:
//!
//! - With several children, the node is centered between the label centers
//!   of its outermost children.
//! - With a single child, it is centered over that child's label.
//! - A leaf takes its parent's label span when the parent's label is wider,
//!   and keeps its own span otherwise.
//!
//! Indents here refer to label boxes rather than reconciled widths, so every
//! measurement is a raw label width.

use log::trace;

use sylva_core::{
    draw::TextMeasurer,
    tree::{Node, Tree},
};

use super::{
    Geometry,
    canvas::Canvas,
    connector::{Connector, choose_connector},
    width::LabelWidths,
};
use crate::{SylvaError, config::LeafConnectorStyle};

/// Re-centers and draws every node, deepest level first.
///
/// Every node must already carry an indent from the primary pass.
///
/// # Errors
///
/// Fails if an indent or label width is missing, or a label cannot be
/// measured.
pub fn place<M: TextMeasurer>(
    tree: &Tree,
    labels: &LabelWidths,
    style: LeafConnectorStyle,
    geometry: &mut Geometry,
    canvas: &mut Canvas<'_, M>,
) -> Result<(), SylvaError> {
    for level in (0..tree.level_count()).rev() {
        for node in tree.nodes_at_level(level) {
            let label_width = labels.get(node.id())?;
            let (left, right) = span(tree, node, labels, geometry)?;

            canvas.draw_element(left, level, right - left, node.content(), node.kind())?;
            let indent = left + (right - left) / 2.0 - label_width / 2.0;
            geometry.set_indent(node.id(), indent);
            trace!(node:% = node.id(), level, indent; "Centered node");

            let single_child = node.children().len() == 1;
            for &child_id in node.children() {
                let child = tree
                    .node(child_id)
                    .ok_or_else(|| SylvaError::Layout(format!("unknown node {child_id}")))?;
                let child_indent = geometry.require_indent(child_id)?;
                let child_label = labels.get(child_id)?;
                // Exact comparison: only a child whose centered indent equals
                // the parent's counts as aligned.
                let aligned = single_child || child_indent == indent;

                match choose_connector(style, child, aligned) {
                    Connector::None => {}
                    Connector::Line => canvas.line_to_parent(
                        child_indent,
                        level + 1,
                        child_label,
                        indent,
                        label_width,
                    ),
                    Connector::Triangle => {
                        canvas.triangle_to_parent(child_indent, level + 1, child_label, child_label)
                    }
                }
            }
        }
    }

    Ok(())
}

/// Returns the horizontal extent `node` is centered in.
fn span(
    tree: &Tree,
    node: &Node,
    labels: &LabelWidths,
    geometry: &Geometry,
) -> Result<(f32, f32), SylvaError> {
    match node.children() {
        [] => {
            let own_left = geometry.require_indent(node.id())?;
            let own_width = labels.get(node.id())?;
            match tree.parent(node.id()) {
                Some(parent) if labels.get(parent.id())? > own_width => {
                    let parent_left = geometry.require_indent(parent.id())?;
                    Ok((parent_left, parent_left + labels.get(parent.id())?))
                }
                _ => Ok((own_left, own_left + own_width)),
            }
        }
        [only] => {
            let left = geometry.require_indent(*only)?;
            Ok((left, left + labels.get(*only)?))
        }
        children => {
            let mut left = f32::INFINITY;
            let mut right = f32::NEG_INFINITY;
            for &child in children {
                let center = geometry.require_indent(child)? + labels.get(child)? / 2.0;
                left = left.min(center);
                right = right.max(center);
            }
            Ok((left, right))
        }
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use sylva_core::{color::Palette, draw::FixedAdvanceMeasurer, tree::NodeKind};

    use super::*;
    use crate::{
        config::{Metrics, RenderOptions},
        layout::{primary, width::WidthReconciler},
    };

    const MEASURER: FixedAdvanceMeasurer = FixedAdvanceMeasurer::new(1.0);

    fn run(tree: &Tree, style: LeafConnectorStyle) -> (Geometry, usize, usize) {
        let metrics = Metrics::default();
        let options = RenderOptions::default()
            .with_font_size(10.0)
            .with_leaf_connector_style(style);
        let labels = LabelWidths::measure(tree, &MEASURER, "serif", 10.0).unwrap();
        let mut geometry = WidthReconciler::new(tree, &labels, 10.0).reconcile().unwrap();
        let mut canvas = Canvas::new(&metrics, &options, Palette::default(), &MEASURER).unwrap();

        primary::place(tree, &labels, style, false, &mut geometry, &mut canvas).unwrap();
        assert!(canvas.primitives().is_empty());
        place(tree, &labels, style, &mut geometry, &mut canvas).unwrap();

        let primitives = canvas.into_primitives();
        let (lines, polygons) = (primitives.line_count(), primitives.polygon_count());
        (geometry, lines, polygons)
    }

    #[test]
    fn test_parent_centered_between_outer_children() {
        let mut tree = Tree::new();
        let s = tree.add_root(NodeKind::Internal, "S").unwrap();
        let np = tree.add_child(s, NodeKind::Leaf, "NP").unwrap();
        let vp = tree.add_child(s, NodeKind::Leaf, "VPX").unwrap();

        let (geometry, lines, _) = run(&tree, LeafConnectorStyle::Auto);
        // Leaves keep their primary indents: 0 and 30.
        assert_approx_eq!(f32, geometry.indent(np).unwrap(), 0.0);
        assert_approx_eq!(f32, geometry.indent(vp).unwrap(), 30.0);

        // Centers 10 and 45; S is 10 wide.
        let left = 10.0;
        let right = 45.0;
        let expected = left + (right - left) / 2.0 - 5.0;
        assert_approx_eq!(f32, geometry.indent(s).unwrap(), expected);
        assert_eq!(lines, 2);
    }

    #[test]
    fn test_single_child_parent_centered_over_child_label() {
        let mut tree = Tree::new();
        let np = tree.add_root(NodeKind::Internal, "NP").unwrap();
        let n = tree.add_child(np, NodeKind::Internal, "N").unwrap();
        let dog = tree.add_child(n, NodeKind::Leaf, "dogs").unwrap();

        let (geometry, lines, polygons) = run(&tree, LeafConnectorStyle::Auto);
        assert_approx_eq!(f32, geometry.indent(dog).unwrap(), 0.0);
        // N is centered over "dogs": 0 + 20 - 5.
        assert_approx_eq!(f32, geometry.indent(n).unwrap(), 15.0);
        // NP is centered over "N": 15 + 5 - 10.
        assert_approx_eq!(f32, geometry.indent(np).unwrap(), 10.0);
        assert_eq!((lines, polygons), (2, 0));
    }

    #[test]
    fn test_single_phrase_child_gets_triangle() {
        let mut tree = Tree::new();
        let np = tree.add_root(NodeKind::Internal, "NP").unwrap();
        tree.add_child(np, NodeKind::Leaf, "the dog").unwrap();

        let (_, lines, polygons) = run(&tree, LeafConnectorStyle::Auto);
        assert_eq!((lines, polygons), (0, 1));

        let (_, lines, polygons) = run(&tree, LeafConnectorStyle::Line);
        assert_eq!((lines, polygons), (1, 0));
    }

    #[test]
    fn test_leaf_takes_wider_parent_span() {
        let mut tree = Tree::new();
        let root = tree.add_root(NodeKind::Internal, "Sentence").unwrap();
        let a = tree.add_child(root, NodeKind::Leaf, "a").unwrap();
        let b = tree.add_child(root, NodeKind::Leaf, "b").unwrap();

        let (geometry, _, _) = run(&tree, LeafConnectorStyle::Auto);
        // Both leaves are centered in the root's primary span [0, 80).
        assert_approx_eq!(f32, geometry.indent(a).unwrap(), 35.0);
        assert_approx_eq!(f32, geometry.indent(b).unwrap(), 35.0);
        // Centers coincide, so the root is centered on them.
        assert_approx_eq!(f32, geometry.indent(root).unwrap(), 0.0);
    }

    #[test]
    fn test_none_style_keeps_internal_lines() {
        let mut tree = Tree::new();
        let s = tree.add_root(NodeKind::Internal, "S").unwrap();
        let np = tree.add_child(s, NodeKind::Internal, "NP").unwrap();
        tree.add_child(np, NodeKind::Leaf, "dog").unwrap();
        tree.add_child(s, NodeKind::Leaf, "runs").unwrap();

        let (_, lines, polygons) = run(&tree, LeafConnectorStyle::None);
        assert_eq!((lines, polygons), (1, 0));
    }
}
