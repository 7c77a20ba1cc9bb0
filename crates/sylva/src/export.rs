//! Document assembly.
//!
//! A [`Layout`](crate::layout::Layout) is turned into its final textual form
//! here. SVG is the only output format.

mod svg;

pub use svg::SvgDocument;
