//! Drawable primitives of a syntax diagram.
//!
//! Layout produces plain values ([`TextPrimitive`], [`LinePrimitive`],
//! [`PolygonPrimitive`]) collected in draw order by a [`DrawList`]. They are
//! turned into SVG elements only when the document is assembled, so the list
//! can be inspected independently of markup.
//!
//! Coordinates are stored unrounded and rounded up to whole pixels when the
//! SVG element is built.
//!
//! # Example
//!
//! ```
//! # use sylva_core::color::Color;
//! # use sylva_core::draw::{DrawList, LinePrimitive};
//! # use sylva_core::geometry::Point;
//! let mut list = DrawList::new();
//! list.push(LinePrimitive::new(Point::new(0.0, 40.0), Point::new(20.0, 10.0), Color::default()));
//! assert_eq!(list.line_count(), 1);
//! ```

use svg::node::{Text as SvgText, element as svg_element};

use crate::{
    color::Color,
    geometry::Point,
    label::{Decoration, Emphasis},
};

/// Type alias for boxed SVG nodes.
pub type SvgNode = Box<dyn svg::Node>;

/// A single line of text anchored at its left baseline point.
#[derive(Debug, Clone, PartialEq)]
pub struct TextPrimitive {
    position: Point,
    content: String,
    font_size: f32,
    font_family: String,
    color: Color,
    decoration: Option<Decoration>,
    emphasis: Option<Emphasis>,
}

impl TextPrimitive {
    pub fn new(
        position: Point,
        content: impl Into<String>,
        font_size: f32,
        font_family: impl Into<String>,
        color: Color,
    ) -> Self {
        Self {
            position,
            content: content.into(),
            font_size,
            font_family: font_family.into(),
            color,
            decoration: None,
            emphasis: None,
        }
    }

    pub fn with_decoration(mut self, decoration: Option<Decoration>) -> Self {
        self.decoration = decoration;
        self
    }

    pub fn with_emphasis(mut self, emphasis: Option<Emphasis>) -> Self {
        self.emphasis = emphasis;
        self
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn decoration(&self) -> Option<Decoration> {
        self.decoration
    }

    pub fn emphasis(&self) -> Option<Emphasis> {
        self.emphasis
    }

    fn style(&self) -> String {
        let mut style = format!("fill: {}; font-size: {}px;", self.color, self.font_size);
        if self.emphasis.is_some_and(Emphasis::is_italic) {
            style.push_str(" font-style: italic;");
        }
        if self.emphasis.is_some_and(Emphasis::is_bold) {
            style.push_str(" font-weight: bold;");
        }
        style
    }

    fn to_svg(&self) -> svg_element::Text {
        let position = self.position.ceil();
        let mut text = svg_element::Text::new("")
            .set("style", self.style())
            .set("x", position.x())
            .set("y", position.y())
            .set("font-family", self.font_family.as_str());

        if let Some(decoration) = self.decoration {
            text = text.set("text-decoration", decoration.svg_value());
        }

        text.add(SvgText::new(self.content.as_str()))
    }
}

/// A straight connector segment.
#[derive(Debug, Clone, PartialEq)]
pub struct LinePrimitive {
    from: Point,
    to: Point,
    color: Color,
}

impl LinePrimitive {
    pub fn new(from: Point, to: Point, color: Color) -> Self {
        Self { from, to, color }
    }

    pub fn from(&self) -> Point {
        self.from
    }

    pub fn to(&self) -> Point {
        self.to
    }

    fn to_svg(&self) -> svg_element::Line {
        let from = self.from.ceil();
        let to = self.to.ceil();
        svg_element::Line::new()
            .set("style", format!("stroke: {}; stroke-width: 1;", self.color))
            .set("x1", from.x())
            .set("y1", from.y())
            .set("x2", to.x())
            .set("y2", to.y())
    }
}

/// An unfilled triangle connector over a multi-word leaf.
#[derive(Debug, Clone, PartialEq)]
pub struct PolygonPrimitive {
    points: [Point; 3],
    color: Color,
}

impl PolygonPrimitive {
    pub fn new(points: [Point; 3], color: Color) -> Self {
        Self { points, color }
    }

    pub fn points(&self) -> &[Point; 3] {
        &self.points
    }

    fn to_svg(&self) -> svg_element::Polygon {
        let points = self
            .points
            .iter()
            .map(|point| {
                let point = point.ceil();
                format!("{} {}", point.x(), point.y())
            })
            .collect::<Vec<_>>()
            .join(" ");

        svg_element::Polygon::new()
            .set(
                "style",
                format!("fill: none; stroke: {}; stroke-width: 1;", self.color),
            )
            .set("points", points)
    }
}

/// Any drawable primitive.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Text(TextPrimitive),
    Line(LinePrimitive),
    Polygon(PolygonPrimitive),
}

impl Primitive {
    /// Builds the SVG element for this primitive.
    pub fn to_svg_node(&self) -> SvgNode {
        match self {
            Self::Text(text) => Box::new(text.to_svg()),
            Self::Line(line) => Box::new(line.to_svg()),
            Self::Polygon(polygon) => Box::new(polygon.to_svg()),
        }
    }
}

impl From<TextPrimitive> for Primitive {
    fn from(text: TextPrimitive) -> Self {
        Self::Text(text)
    }
}

impl From<LinePrimitive> for Primitive {
    fn from(line: LinePrimitive) -> Self {
        Self::Line(line)
    }
}

impl From<PolygonPrimitive> for Primitive {
    fn from(polygon: PolygonPrimitive) -> Self {
        Self::Polygon(polygon)
    }
}

/// Primitives in the order they were drawn.
///
/// Later primitives are painted over earlier ones.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrawList {
    items: Vec<Primitive>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a primitive.
    pub fn push(&mut self, primitive: impl Into<Primitive>) {
        self.items.push(primitive.into());
    }

    pub fn iter(&self) -> impl Iterator<Item = &Primitive> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterates over the text primitives only.
    pub fn texts(&self) -> impl Iterator<Item = &TextPrimitive> {
        self.items.iter().filter_map(|item| match item {
            Primitive::Text(text) => Some(text),
            _ => None,
        })
    }

    /// Iterates over the line primitives only.
    pub fn lines(&self) -> impl Iterator<Item = &LinePrimitive> {
        self.items.iter().filter_map(|item| match item {
            Primitive::Line(line) => Some(line),
            _ => None,
        })
    }

    /// Iterates over the polygon primitives only.
    pub fn polygons(&self) -> impl Iterator<Item = &PolygonPrimitive> {
        self.items.iter().filter_map(|item| match item {
            Primitive::Polygon(polygon) => Some(polygon),
            _ => None,
        })
    }

    pub fn text_count(&self) -> usize {
        self.texts().count()
    }

    pub fn line_count(&self) -> usize {
        self.lines().count()
    }

    pub fn polygon_count(&self) -> usize {
        self.polygons().count()
    }

    /// Builds the SVG elements of every primitive, in draw order.
    pub fn to_svg_nodes(&self) -> Vec<SvgNode> {
        self.items.iter().map(Primitive::to_svg_node).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn black() -> Color {
        Color::default()
    }

    #[test]
    fn test_draw_list_counts_by_kind() {
        let mut list = DrawList::new();
        assert!(list.is_empty());

        list.push(TextPrimitive::new(Point::new(0.0, 0.0), "S", 16.0, "serif", black()));
        list.push(LinePrimitive::new(Point::new(0.0, 0.0), Point::new(1.0, 1.0), black()));
        list.push(PolygonPrimitive::new([Point::default(); 3], black()));
        list.push(TextPrimitive::new(Point::new(0.0, 0.0), "NP", 16.0, "serif", black()));

        assert_eq!(list.len(), 4);
        assert_eq!(list.text_count(), 2);
        assert_eq!(list.line_count(), 1);
        assert_eq!(list.polygon_count(), 1);
        assert_eq!(list.to_svg_nodes().len(), 4);
    }

    #[test]
    fn test_draw_list_keeps_order() {
        let mut list = DrawList::new();
        list.push(TextPrimitive::new(Point::default(), "a", 16.0, "serif", black()));
        list.push(TextPrimitive::new(Point::default(), "b", 16.0, "serif", black()));
        let contents: Vec<_> = list.texts().map(TextPrimitive::content).collect();
        assert_eq!(contents, vec!["a", "b"]);
    }

    #[test]
    fn test_text_markup_has_style_and_decoration() {
        let text = TextPrimitive::new(Point::new(10.2, 20.0), "dog", 16.0, "serif", black())
            .with_decoration(Some(Decoration::Underline))
            .with_emphasis(Some(Emphasis::BoldItalic));
        let markup = text.to_svg().to_string();

        assert!(markup.starts_with("<text"));
        assert!(markup.contains("x=\"11\""));
        assert!(markup.contains("y=\"20\""));
        assert!(markup.contains("font-style: italic;"));
        assert!(markup.contains("font-weight: bold;"));
        assert!(markup.contains("text-decoration=\"underline\""));
        assert!(markup.contains("font-family=\"serif\""));
        assert!(markup.contains("dog"));
        assert!(markup.ends_with("</text>"));
    }

    #[test]
    fn test_plain_text_has_no_emphasis() {
        let markup = TextPrimitive::new(Point::default(), "dog", 12.0, "serif", black())
            .to_svg()
            .to_string();
        assert!(!markup.contains("font-style"));
        assert!(!markup.contains("font-weight"));
        assert!(!markup.contains("text-decoration"));
        assert!(markup.contains("font-size: 12px;"));
    }

    #[test]
    fn test_line_markup_is_rounded_up() {
        let line = LinePrimitive::new(Point::new(1.1, 2.9), Point::new(3.0, 4.5), black());
        let markup = line.to_svg().to_string();
        assert!(markup.contains("x1=\"2\""));
        assert!(markup.contains("y1=\"3\""));
        assert!(markup.contains("x2=\"3\""));
        assert!(markup.contains("y2=\"5\""));
        assert!(markup.contains("stroke: black;"));
    }

    #[test]
    fn test_polygon_points() {
        let polygon = PolygonPrimitive::new(
            [
                Point::new(10.0, 50.0),
                Point::new(0.5, 50.0),
                Point::new(5.0, 20.0),
            ],
            black(),
        );
        let markup = polygon.to_svg().to_string();
        assert!(markup.contains("points=\"10 50 1 50 5 20\""));
        assert!(markup.contains("fill: none;"));
    }
}
