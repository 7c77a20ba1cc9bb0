//! Drawing support: text measurement and drawable primitives.
//!
//! - [`TextMeasurer`] and its implementations measure label widths for layout.
//! - [`Primitive`] values are emitted by layout in draw order into a [`DrawList`].

mod primitive;
mod text;

pub use primitive::{
    DrawList, LinePrimitive, PolygonPrimitive, Primitive, SvgNode, TextPrimitive,
};
pub use text::{FixedAdvanceMeasurer, FontSystemMeasurer, MeasureError, TextMeasurer};
