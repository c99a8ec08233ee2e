//! Text shape.

use super::{ShapeCore, ShapeOptions, ShapeTrait, ShapeType, move_shape};
use crate::collab::MovementDelta;
use crate::geom::{BoundingRect, Point};
use crate::grid::GridConfig;
use crate::wire::{ServerText, WireResult};

/// Font size used when the font string carries none.
pub const DEFAULT_FONT_SIZE: f64 = 20.0;

const CHAR_WIDTH_FACTOR: f64 = 0.55;
const LINE_HEIGHT_FACTOR: f64 = 1.2;

/// A block of text centred on `ref_point`.
#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    pub(crate) core: ShapeCore,
    pub text: String,
    /// CSS font shorthand, e.g. `"bold 20px serif"`.
    pub font: String,
}

/// Size from the first `<n>px` token of a CSS font string.
pub fn font_size(font: &str) -> f64 {
    font.split_whitespace()
        .filter_map(|token| token.strip_suffix("px"))
        .find_map(|n| n.parse::<f64>().ok())
        .filter(|size| size.is_finite() && *size > 0.0)
        .unwrap_or(DEFAULT_FONT_SIZE)
}

impl Text {
    pub fn new(center: Point, text: impl Into<String>, font: impl Into<String>) -> Self {
        Self::with_options(center, text, font, ShapeOptions::default())
    }

    pub fn with_options(
        center: Point,
        text: impl Into<String>,
        font: impl Into<String>,
        options: ShapeOptions,
    ) -> Self {
        Self {
            core: ShapeCore::new(center, options),
            text: text.into(),
            font: font.into(),
        }
    }

    pub fn from_record(data: &ServerText) -> WireResult<Self> {
        let mut text = Self::with_options(
            Point::ZERO,
            String::new(),
            String::new(),
            ShapeOptions {
                uuid: Some(data.base.uuid),
                ..ShapeOptions::default()
            },
        );
        text.update_from_dict(data)?;
        Ok(text)
    }

    /// Replace the text content and invalidate the cached layout.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.core.invalidate(true);
    }

    pub fn font_size(&self) -> f64 {
        font_size(&self.font)
    }

    /// Approximate `(width, height)` from character count and font size.
    pub fn approximate_size(&self) -> (f64, f64) {
        let size = self.font_size();
        let longest = self.text.lines().map(|l| l.chars().count()).max().unwrap_or(0);
        let mut lines = self.text.lines().count().max(1);
        if self.text.ends_with('\n') {
            lines += 1;
        }
        (
            longest as f64 * size * CHAR_WIDTH_FACTOR,
            lines as f64 * size * LINE_HEIGHT_FACTOR,
        )
    }

    pub fn as_dict(&self) -> ServerText {
        ServerText {
            base: self.core.base_dict(),
            text: self.text.clone(),
            font: self.font.clone(),
        }
    }

    pub fn update_from_dict(&mut self, data: &ServerText) -> WireResult<()> {
        self.core.apply_base_dict(&data.base)?;
        self.text = data.text.clone();
        self.font = data.font.clone();
        Ok(())
    }
}

impl ShapeTrait for Text {
    fn core(&self) -> &ShapeCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ShapeCore {
        &mut self.core
    }

    fn shape_type(&self) -> ShapeType {
        ShapeType::Text
    }

    fn bounding_box(&self) -> BoundingRect {
        let (w, h) = self.approximate_size();
        let c = self.core.ref_point;
        BoundingRect::new(Point::new(c.x - w / 2.0, c.y - h / 2.0), w, h)
    }

    fn contains(&self, point: Point) -> bool {
        self.bounding_box().contains(point)
    }

    fn center(&self) -> Point {
        self.core.ref_point
    }

    fn set_center(&mut self, center: Point) {
        self.core.ref_point = center;
    }

    fn snap_to_grid(&mut self, grid: &GridConfig, mover: &dyn MovementDelta) {
        let current = self.core.ref_point;
        move_shape(self, grid.snap_point(current) - current, mover);
    }

    /// Text is sized by its font, so only the render state changes.
    fn resize_to_grid(&mut self, _grid: &GridConfig) {
        self.core.invalidate_geometry();
    }

    fn resize(&mut self, handle: usize, _point: Point, _grid: &GridConfig) -> usize {
        handle
    }
}
