//! Labeled syntax tree consumed by the layout engine.
//!
//! A [`Tree`] owns its [`Node`]s and indexes them per level in tree order,
//! which is the left-to-right drawing order within each level. Nodes are
//! immutable once added; computed geometry lives outside the tree.
//!
//! # Example
//!
//! ```
//! # use sylva_core::tree::{NodeKind, Tree};
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut tree = Tree::new();
//! let s = tree.add_root(NodeKind::Internal, "S")?;
//! tree.add_child(s, NodeKind::Leaf, "NP")?;
//! tree.add_child(s, NodeKind::Leaf, "VP")?;
//!
//! assert_eq!(tree.level_count(), 2);
//! assert_eq!(tree.nodes_at_level(1).count(), 2);
//! # Ok(())
//! # }
//! ```

use std::{collections::HashMap, fmt};

use thiserror::Error;

/// Structural problems found while building or importing a tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("node id 0 is reserved for \"no parent\"")]
    InvalidId,

    #[error("unknown node {0}")]
    UnknownNode(NodeId),

    #[error("node {0} is defined more than once")]
    DuplicateNode(NodeId),

    #[error("node {node} is at level {found}, expected {expected} (one below its parent)")]
    LevelMismatch {
        node: NodeId,
        expected: usize,
        found: usize,
    },

    #[error("root node {node} is at level {level}, roots must be at level 0")]
    RootNotAtTopLevel { node: NodeId, level: usize },

    #[error("child list of node {parent} disagrees with the parent of node {child}")]
    ChildListMismatch { parent: NodeId, child: NodeId },

    #[error("leaf node {0} cannot have children")]
    LeafWithChildren(NodeId),

    #[error("node ids are exhausted")]
    IdsExhausted,
}

/// Identifier of a node, unique within its tree and never zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    /// Creates an id from its raw value.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::InvalidId`] for `0`, which upstream builders use
    /// to mean "no parent".
    pub fn new(raw: u32) -> Result<Self, TreeError> {
        if raw == 0 {
            return Err(TreeError::InvalidId);
        }
        Ok(Self(raw))
    }

    /// Returns the raw value of this id.
    pub fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Structural role of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// A phrase or category label with zero or more children.
    Internal,
    /// A terminal (word-level) label.
    Leaf,
}

/// A single labeled element of a syntax tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    id: NodeId,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    level: usize,
    kind: NodeKind,
    content: String,
    triangle_hint: bool,
}

impl Node {
    /// Creates a node without children, as produced by an external tree builder.
    ///
    /// Use [`Node::with_children`] to attach the ordered child list before
    /// handing the nodes to [`Tree::from_nodes`].
    pub fn new(
        id: NodeId,
        parent: Option<NodeId>,
        level: usize,
        kind: NodeKind,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id,
            parent,
            children: Vec::new(),
            level,
            kind,
            content: content.into(),
            triangle_hint: false,
        }
    }

    /// Sets the ordered child list (left to right).
    pub fn with_children(mut self, children: Vec<NodeId>) -> Self {
        self.children = children;
        self
    }

    /// Forces a triangle connector for this leaf under the `auto` leaf style.
    pub fn with_triangle_hint(mut self, triangle_hint: bool) -> Self {
        self.triangle_hint = triangle_hint;
        self
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Returns the parent id, or `None` for a root.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Returns the child ids in drawing order.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Returns the depth of this node; roots are at level 0.
    pub fn level(&self) -> usize {
        self.level
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Returns the raw label, including subscript and style markers.
    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn triangle_hint(&self) -> bool {
        self.triangle_hint
    }

    pub fn is_leaf(&self) -> bool {
        self.kind == NodeKind::Leaf
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

/// An acyclic, single-parent forest of labeled nodes.
///
/// Several roots at level 0 are allowed; they are laid out side by side.
/// Tree order is depth-first: roots left to right, each node followed by its
/// subtrees in child order. Within a level, nodes are yielded in that order.
#[derive(Debug, Clone, Default)]
pub struct Tree {
    nodes: Vec<Node>,
    index: HashMap<NodeId, usize>,
    // Node positions per level, in tree order.
    levels: Vec<Vec<usize>>,
    // Rank of each node within its level, by position.
    ranks: Vec<usize>,
    next_id: u64,
}

impl Tree {
    /// Creates an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a tree from nodes produced by an external builder.
    ///
    /// Every structural invariant is checked up front so that layout never
    /// walks a malformed tree. Since a parent must sit exactly one level above
    /// its child, a valid tree cannot contain cycles. The slice order only
    /// decides the order of the roots; everything below them follows the
    /// child lists.
    ///
    /// # Errors
    ///
    /// Returns the first [`TreeError`] found.
    pub fn from_nodes(nodes: Vec<Node>) -> Result<Self, TreeError> {
        let mut index = HashMap::with_capacity(nodes.len());
        for (position, node) in nodes.iter().enumerate() {
            if index.insert(node.id, position).is_some() {
                return Err(TreeError::DuplicateNode(node.id));
            }
        }

        for node in &nodes {
            if node.is_leaf() && !node.children.is_empty() {
                return Err(TreeError::LeafWithChildren(node.id));
            }

            match node.parent {
                None if node.level != 0 => {
                    return Err(TreeError::RootNotAtTopLevel {
                        node: node.id,
                        level: node.level,
                    });
                }
                None => {}
                Some(parent_id) => {
                    let parent = index
                        .get(&parent_id)
                        .map(|&position| &nodes[position])
                        .ok_or(TreeError::UnknownNode(parent_id))?;
                    if node.level != parent.level + 1 {
                        return Err(TreeError::LevelMismatch {
                            node: node.id,
                            expected: parent.level + 1,
                            found: node.level,
                        });
                    }
                    if !parent.children.contains(&node.id) {
                        return Err(TreeError::ChildListMismatch {
                            parent: parent_id,
                            child: node.id,
                        });
                    }
                }
            }

            for (position, &child_id) in node.children.iter().enumerate() {
                let child = index
                    .get(&child_id)
                    .map(|&position| &nodes[position])
                    .ok_or(TreeError::UnknownNode(child_id))?;
                let repeated = node.children[..position].contains(&child_id);
                if child.parent != Some(node.id) || repeated {
                    return Err(TreeError::ChildListMismatch {
                        parent: node.id,
                        child: child_id,
                    });
                }
            }
        }

        let next_id = nodes
            .iter()
            .map(|node| u64::from(node.id.0) + 1)
            .max()
            .unwrap_or(0);

        let mut tree = Self {
            nodes,
            index,
            levels: Vec::new(),
            ranks: Vec::new(),
            next_id,
        };
        tree.reindex();
        Ok(tree)
    }

    /// Adds a root node at level 0, right of the existing roots, and returns
    /// its id.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::IdsExhausted`] once an id of `u32::MAX` is taken.
    pub fn add_root(
        &mut self,
        kind: NodeKind,
        content: impl Into<String>,
    ) -> Result<NodeId, TreeError> {
        let id = self.next_id()?;
        self.push(Node::new(id, None, 0, kind, content));
        Ok(id)
    }

    /// Appends a node as the right-most child of `parent` and returns its id.
    ///
    /// # Errors
    ///
    /// Fails if `parent` is unknown or is a leaf, or if no id is left.
    pub fn add_child(
        &mut self,
        parent: NodeId,
        kind: NodeKind,
        content: impl Into<String>,
    ) -> Result<NodeId, TreeError> {
        let position = *self
            .index
            .get(&parent)
            .ok_or(TreeError::UnknownNode(parent))?;
        if self.nodes[position].is_leaf() {
            return Err(TreeError::LeafWithChildren(parent));
        }

        let id = self.next_id()?;
        let level = self.nodes[position].level + 1;
        // Appending keeps tree order unless a subtree further right already
        // has nodes on this level.
        let in_order = self
            .levels
            .get(level)
            .and_then(|positions| positions.last())
            .and_then(|&last| self.nodes[last].parent)
            .and_then(|last_parent| self.index.get(&last_parent))
            .is_none_or(|&last_parent| self.ranks[last_parent] <= self.ranks[position]);

        self.nodes[position].children.push(id);
        self.push(Node::new(id, Some(parent), level, kind, content));
        if !in_order {
            self.reindex();
        }
        Ok(id)
    }

    /// Sets the upstream triangle hint of a node.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::UnknownNode`] if `id` is not in the tree.
    pub fn set_triangle_hint(&mut self, id: NodeId, triangle_hint: bool) -> Result<(), TreeError> {
        let position = *self.index.get(&id).ok_or(TreeError::UnknownNode(id))?;
        self.nodes[position].triangle_hint = triangle_hint;
        Ok(())
    }

    /// Returns the node with the given id.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.index.get(&id).map(|&position| &self.nodes[position])
    }

    /// Returns the parent node of `id`, or `None` for roots and unknown ids.
    pub fn parent(&self, id: NodeId) -> Option<&Node> {
        self.node(id)?.parent.and_then(|parent| self.node(parent))
    }

    /// Returns the child ids of `id` in drawing order.
    pub fn children(&self, id: NodeId) -> Option<&[NodeId]> {
        self.node(id).map(Node::children)
    }

    /// Iterates over all nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    /// Iterates over the nodes of one level in tree order.
    pub fn nodes_at_level(&self, level: usize) -> impl Iterator<Item = &Node> {
        self.levels
            .get(level)
            .into_iter()
            .flatten()
            .map(|&position| &self.nodes[position])
    }

    /// Iterates over the root nodes, left to right.
    pub fn roots(&self) -> impl Iterator<Item = &Node> {
        self.nodes_at_level(0)
    }

    /// Returns the number of levels (deepest level + 1), or 0 when empty.
    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn next_id(&self) -> Result<NodeId, TreeError> {
        u32::try_from(self.next_id.max(1))
            .map(NodeId)
            .map_err(|_| TreeError::IdsExhausted)
    }

    fn push(&mut self, node: Node) {
        self.next_id = self.next_id.max(u64::from(node.id.0) + 1);
        if self.levels.len() <= node.level {
            self.levels.resize_with(node.level + 1, Vec::new);
        }
        let position = self.nodes.len();
        self.ranks.push(self.levels[node.level].len());
        self.levels[node.level].push(position);
        self.index.insert(node.id, position);
        self.nodes.push(node);
    }

    /// Rebuilds the level index with a depth-first walk of the child lists.
    fn reindex(&mut self) {
        let mut levels: Vec<Vec<usize>> = Vec::new();
        let mut ranks = vec![0; self.nodes.len()];
        let mut stack: Vec<usize> = self
            .nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| node.is_root())
            .map(|(position, _)| position)
            .rev()
            .collect();

        while let Some(position) = stack.pop() {
            let node = &self.nodes[position];
            if levels.len() <= node.level {
                levels.resize_with(node.level + 1, Vec::new);
            }
            ranks[position] = levels[node.level].len();
            levels[node.level].push(position);
            stack.extend(
                node.children
                    .iter()
                    .rev()
                    .filter_map(|child| self.index.get(child).copied()),
            );
        }

        self.levels = levels;
        self.ranks = ranks;
    }
}
