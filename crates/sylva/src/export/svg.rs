//! SVG document assembly.

use std::fmt;

use log::debug;
use svg::Document;

use crate::layout::Layout;

const XML_DECLARATION: &str = r#"<?xml version="1.0" standalone="no"?>"#;
const DOCTYPE: &str = concat!(
    r#"<!DOCTYPE svg PUBLIC "-//W3C//DTD SVG 1.1//EN""#,
    "\n",
    r#" "http://www.w3.org/Graphics/SVG/1.1/DTD/svg11.dtd">"#,
);

/// A standalone SVG 1.1 document holding the primitives of a layout.
///
/// Formatting the document with [`Display`](fmt::Display) yields the XML
/// declaration, the doctype and the `<svg>` element.
pub struct SvgDocument {
    document: Document,
}

impl SvgDocument {
    /// Builds the document for `layout`, primitives in draw order.
    pub fn from_layout(layout: &Layout) -> Self {
        let width = layout.width().ceil();
        let height = layout.height().ceil();

        let document = layout.primitives().to_svg_nodes().into_iter().fold(
            Document::new()
                .set("width", width)
                .set("height", height)
                .set("version", "1.1")
                .set("xmlns", "http://www.w3.org/2000/svg"),
            |document, node| document.add(node),
        );
        debug!(width, height, elements = layout.primitives().len(); "SVG document assembled");

        Self { document }
    }

    /// Returns the underlying `svg` document.
    pub fn document(&self) -> &Document {
        &self.document
    }
}

impl fmt::Display for SvgDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{XML_DECLARATION}")?;
        writeln!(f, "{DOCTYPE}")?;
        write!(f, "{}", self.document)
    }
}
