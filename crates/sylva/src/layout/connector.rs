//! Connector selection between a node and its parent.

use sylva_core::{label::Label, tree::Node};

use crate::config::LeafConnectorStyle;

/// Geometry used to connect a node to its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connector {
    None,
    Line,
    Triangle,
}

/// Chooses the connector for `node` under the configured leaf style.
///
/// `aligned_with_parent` is `true` when the node starts at its parent's
/// indent, i.e. it is the parent's left-most child at that position.
/// Triangles are only drawn in that case; every other node gets a line.
pub fn choose_connector(
    style: LeafConnectorStyle,
    node: &Node,
    aligned_with_parent: bool,
) -> Connector {
    if !node.is_leaf() {
        return Connector::Line;
    }

    let multi_word = Label::token_count(node.content()) > 1;
    match style {
        LeafConnectorStyle::None => Connector::None,
        LeafConnectorStyle::Triangle if aligned_with_parent && multi_word => Connector::Triangle,
        LeafConnectorStyle::Auto if aligned_with_parent && (multi_word || node.triangle_hint()) => {
            Connector::Triangle
        }
        _ => Connector::Line,
    }
}

#[cfg(test)]
mod tests {
    use sylva_core::tree::{NodeId, NodeKind};

    use super::*;

    fn node(kind: NodeKind, content: &str) -> Node {
        let id = NodeId::new(2).unwrap();
        Node::new(id, NodeId::new(1).ok(), 1, kind, content)
    }

    #[test]
    fn test_internal_nodes_always_get_lines() {
        let phrase = node(NodeKind::Internal, "big NP");
        for style in [
            LeafConnectorStyle::None,
            LeafConnectorStyle::Line,
            LeafConnectorStyle::Triangle,
            LeafConnectorStyle::Auto,
        ] {
            assert_eq!(choose_connector(style, &phrase, true), Connector::Line);
        }
    }

    #[test]
    fn test_none_style_hides_leaf_connectors() {
        let leaf = node(NodeKind::Leaf, "dog");
        assert_eq!(choose_connector(LeafConnectorStyle::None, &leaf, true), Connector::None);
        assert_eq!(choose_connector(LeafConnectorStyle::None, &leaf, false), Connector::None);
    }

    #[test]
    fn test_line_style() {
        let leaf = node(NodeKind::Leaf, "the big dog");
        assert_eq!(choose_connector(LeafConnectorStyle::Line, &leaf, true), Connector::Line);
    }

    #[test]
    fn test_triangle_style_needs_several_words() {
        let phrase = node(NodeKind::Leaf, "the big dog");
        let word = node(NodeKind::Leaf, "dog");
        let style = LeafConnectorStyle::Triangle;
        assert_eq!(choose_connector(style, &phrase, true), Connector::Triangle);
        assert_eq!(choose_connector(style, &word, true), Connector::Line);
        assert_eq!(choose_connector(style, &phrase, false), Connector::Line);
    }

    #[test]
    fn test_auto_style_honors_hint() {
        let hinted = node(NodeKind::Leaf, "dog").with_triangle_hint(true);
        let word = node(NodeKind::Leaf, "dog");
        let phrase = node(NodeKind::Leaf, "the dog");
        let style = LeafConnectorStyle::Auto;
        assert_eq!(choose_connector(style, &hinted, true), Connector::Triangle);
        assert_eq!(choose_connector(style, &phrase, true), Connector::Triangle);
        assert_eq!(choose_connector(style, &word, true), Connector::Line);
        assert_eq!(choose_connector(style, &hinted, false), Connector::Line);
    }
}
