//! Drawing of labels and connectors at layout coordinates.
//!
//! Layout positions are expressed as an indent (pixels from the left margin)
//! and a row (tree level). [`Canvas`] maps them to pixels and records the
//! resulting primitives in draw order.

use sylva_core::{
    color::Palette,
    draw::{DrawList, LinePrimitive, PolygonPrimitive, TextMeasurer, TextPrimitive},
    geometry::Point,
    label::Label,
    tree::NodeKind,
};

use crate::{
    SylvaError,
    config::{LeafConnectorStyle, Metrics, RenderOptions},
};

/// Subscript font size relative to the main font size.
pub const SUBSCRIPT_SCALE: f32 = 0.7;

/// Pixel mapping plus the list of primitives drawn so far.
pub struct Canvas<'a, M> {
    metrics: &'a Metrics,
    options: &'a RenderOptions,
    palette: Palette,
    measurer: &'a M,
    subscript_size: f32,
    subscript_gap: f32,
    primitives: DrawList,
}

impl<'a, M: TextMeasurer> Canvas<'a, M> {
    /// Creates an empty canvas.
    ///
    /// # Errors
    ///
    /// Fails if the subscript gap cannot be measured.
    pub fn new(
        metrics: &'a Metrics,
        options: &'a RenderOptions,
        palette: Palette,
        measurer: &'a M,
    ) -> Result<Self, SylvaError> {
        let subscript_size = options.font_size() * SUBSCRIPT_SCALE;
        let subscript_gap = measurer.measure("l", options.font_family(), subscript_size)?;

        Ok(Self {
            metrics,
            options,
            palette,
            measurer,
            subscript_size,
            subscript_gap,
            primitives: DrawList::new(),
        })
    }

    /// Height of one row.
    pub fn row_height(&self) -> f32 {
        self.metrics.row_height(self.options.font_size())
    }

    /// Returns the y coordinate of the top of `row`.
    pub fn row_to_px(&self, row: usize) -> f32 {
        let row = row as f32;
        self.metrics.top_bottom_margin()
            + self.row_height() * row
            + (self.metrics.vertical_spacing() + self.options.font_size()) * row
    }

    /// Draws the label `content` centered in the box `[x, x + width)` of `row`.
    ///
    /// The subscript, if any, follows the main text in a smaller size and
    /// slightly lower. Leaves whose connector is suppressed are drawn closer
    /// to the row above.
    ///
    /// # Errors
    ///
    /// Propagates text measurement failures.
    pub fn draw_element(
        &mut self,
        x: f32,
        row: usize,
        width: f32,
        content: &str,
        kind: NodeKind,
    ) -> Result<(), SylvaError> {
        let font_size = self.options.font_size();
        let font_family = self.options.font_family();

        let detached = kind == NodeKind::Leaf
            && self.options.leaf_connector_style() == LeafConnectorStyle::None
            && row > 0;
        let top = if detached {
            self.row_to_px(row - 1) + font_size * 1.5
        } else {
            self.row_to_px(row)
        };
        let left = x + self.metrics.side_margin();

        let label = Label::parse(content);
        let main_width = self.measurer.measure(label.main(), font_family, font_size)?;
        let subscript_width = match label.subscript() {
            Some(subscript) => {
                self.measurer
                    .measure(subscript, font_family, self.subscript_size)?
            }
            None => 0.0,
        };

        let text_x = left + width / 2.0 - (main_width + subscript_width) / 2.0;
        let baseline = top + self.row_height() - self.metrics.element_padding_v();
        let color = self.palette.color_for(kind, label.is_trace());
        let svg_family = self.options.svg_font_family();

        self.primitives.push(
            TextPrimitive::new(
                Point::new(text_x, baseline),
                label.main(),
                font_size,
                svg_family,
                color,
            )
            .with_decoration(label.decoration())
            .with_emphasis(label.emphasis()),
        );

        if let Some(subscript) = label.subscript() {
            let position = Point::new(
                text_x + main_width + self.subscript_gap,
                baseline + self.subscript_size / 2.0,
            );
            self.primitives.push(TextPrimitive::new(
                position,
                subscript,
                self.subscript_size,
                svg_family,
                color,
            ));
        }

        Ok(())
    }

    /// Draws a line from the top center of a child box to the bottom center
    /// of its parent box in the row above. Nothing is drawn for row 0.
    pub fn line_to_parent(
        &mut self,
        from_x: f32,
        from_row: usize,
        from_width: f32,
        to_x: f32,
        to_width: f32,
    ) {
        if from_row == 0 {
            return;
        }

        let side = self.metrics.side_margin();
        let from = Point::new(from_x + from_width / 2.0 + side, self.row_to_px(from_row));
        let to = Point::new(
            to_x + to_width / 2.0 + side,
            self.row_to_px(from_row - 1) + self.row_height(),
        );
        self.primitives
            .push(LinePrimitive::new(from, to, self.palette.line()));
    }

    /// Draws a triangle whose base spans `label_width` centered under the
    /// child box and whose apex touches the parent row.
    ///
    /// Nothing is drawn for row 0. Without symmetrization the parent sits at
    /// the child's indent, and the apex is shifted by three side margins.
    pub fn triangle_to_parent(
        &mut self,
        from_x: f32,
        from_row: usize,
        from_width: f32,
        label_width: f32,
    ) {
        if from_row == 0 {
            return;
        }

        let side = self.metrics.side_margin();
        let center = from_x + from_width / 2.0 + side;
        let base_y = self.row_to_px(from_row);
        let apex_y = self.row_to_px(from_row - 1) + self.row_height();
        let apex_offset = if self.options.symmetrize() {
            side
        } else {
            side * 3.0
        };

        self.primitives.push(PolygonPrimitive::new(
            [
                Point::new(center + label_width / 2.0, base_y),
                Point::new(center - label_width / 2.0, base_y),
                Point::new(from_x + label_width / 2.0 + apex_offset, apex_y),
            ],
            self.palette.line(),
        ));
    }

    /// Returns the primitives drawn so far.
    pub fn primitives(&self) -> &DrawList {
        &self.primitives
    }

    /// Consumes the canvas and returns its primitives.
    pub fn into_primitives(self) -> DrawList {
        self.primitives
    }
}
