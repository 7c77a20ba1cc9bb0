//! Color handling for Sylva diagrams
//!
//! This module provides the [`Color`] type which wraps the `DynamicColor` type
//! from the color crate, and the [`Palette`] that maps node roles to colors.

use std::str::FromStr;

use color::DynamicColor;

use crate::tree::NodeKind;

/// Wrapper around the `DynamicColor` type from the color crate
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Color {
    color: DynamicColor,
}

impl Color {
    /// Create a new `Color` from a string
    /// This will parse CSS color strings such as "#ff0000", "rgb(255, 0, 0)", "red", etc.
    ///
    /// # Examples
    ///
    /// ```
    /// use sylva_core::color::Color;
    ///
    /// let red = Color::new("#ff0000").unwrap();
    /// let blue = Color::new("blue").unwrap();
    /// ```
    pub fn new(color_str: &str) -> Result<Self, String> {
        match DynamicColor::from_str(color_str) {
            Ok(color) => Ok(Self { color }),
            Err(err) => Err(format!("invalid color `{color_str}`: {err}")),
        }
    }

    fn named(name: &'static str) -> Self {
        Self::new(name).expect("palette colors are valid CSS color names")
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::new("black").expect("'black' is a valid CSS color")
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.color)
    }
}

impl From<&Color> for svg::node::Value {
    fn from(color: &Color) -> Self {
        Self::from(color.to_string())
    }
}

/// Colors assigned to the roles of a syntax diagram.
///
/// Internal nodes, leaves and traces each get their own text color; connectors
/// (lines and triangles) share the `line` color.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    node: Color,
    leaf: Color,
    trace: Color,
    line: Color,
}

impl Palette {
    /// Creates a palette from explicit role colors.
    pub fn new(node: Color, leaf: Color, trace: Color, line: Color) -> Self {
        Self {
            node,
            leaf,
            trace,
            line,
        }
    }

    /// Black text for every structural role.
    ///
    /// Traces keep their own color so they stay distinguishable from
    /// ordinary labels.
    pub fn monochrome() -> Self {
        Self {
            node: Color::named("black"),
            leaf: Color::named("black"),
            trace: Color::named("red"),
            line: Color::named("black"),
        }
    }

    /// Blue internal nodes, green leaves and red traces.
    pub fn role_colored() -> Self {
        Self {
            node: Color::named("blue"),
            leaf: Color::named("green"),
            trace: Color::named("red"),
            line: Color::named("black"),
        }
    }

    /// Returns the text color of a label.
    ///
    /// The trace classification takes precedence over the structural kind.
    pub fn color_for(&self, kind: NodeKind, is_trace: bool) -> Color {
        if is_trace {
            return self.trace;
        }
        match kind {
            NodeKind::Leaf => self.leaf,
            NodeKind::Internal => self.node,
        }
    }

    /// Returns the connector color.
    pub fn line(&self) -> Color {
        self.line
    }

    pub fn node(&self) -> Color {
        self.node
    }

    pub fn leaf(&self) -> Color {
        self.leaf
    }

    pub fn trace(&self) -> Color {
        self.trace
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::role_colored()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_new() {
        let red = Color::new("#ff0000");
        assert!(red.is_ok());

        let invalid = Color::new("not-a-color");
        assert!(invalid.is_err());
    }

    #[test]
    fn test_color_default() {
        let color = Color::default();
        assert_eq!(color.to_string(), "black");
    }

    #[test]
    fn test_color_display() {
        let color = Color::new("blue").unwrap();
        assert_eq!(color.to_string(), "blue");
    }

    #[test]
    fn test_color_eq() {
        assert_eq!(Color::new("red").unwrap(), Color::new("red").unwrap());
        assert_ne!(Color::new("red").unwrap(), Color::new("blue").unwrap());
    }

    #[test]
    fn test_palette_role_colored() {
        let palette = Palette::role_colored();
        assert_eq!(palette.color_for(NodeKind::Internal, false).to_string(), "blue");
        assert_eq!(palette.color_for(NodeKind::Leaf, false).to_string(), "green");
        assert_eq!(palette.line().to_string(), "black");
    }

    #[test]
    fn test_palette_trace_overrides_kind() {
        for palette in [Palette::monochrome(), Palette::role_colored()] {
            assert_eq!(palette.color_for(NodeKind::Leaf, true).to_string(), "red");
            assert_eq!(palette.color_for(NodeKind::Internal, true).to_string(), "red");
        }
    }

    #[test]
    fn test_palette_monochrome() {
        let palette = Palette::monochrome();
        assert_eq!(palette.color_for(NodeKind::Internal, false).to_string(), "black");
        assert_eq!(palette.color_for(NodeKind::Leaf, false).to_string(), "black");
    }
}
