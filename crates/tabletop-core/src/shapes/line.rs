//! Line segment shape.

use super::{ShapeCore, ShapeOptions, ShapeTrait, ShapeType, move_shape};
use crate::collab::MovementDelta;
use crate::geom::{BoundingRect, Point, Vector, point_to_segment_dist};
use crate::grid::GridConfig;
use crate::wire::{ServerLine, WireResult};

/// A straight segment from `ref_point` to `end`.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub(crate) core: ShapeCore,
    pub end: Point,
    pub line_width: f64,
}

impl Line {
    pub fn new(start: Point, end: Point, line_width: f64) -> Self {
        Self::with_options(start, end, line_width, ShapeOptions::default())
    }

    pub fn with_options(start: Point, end: Point, line_width: f64, options: ShapeOptions) -> Self {
        Self {
            core: ShapeCore::new(start, options),
            end,
            line_width,
        }
    }

    pub fn from_record(data: &ServerLine) -> WireResult<Self> {
        let mut line = Self::with_options(
            Point::ZERO,
            Point::ZERO,
            1.0,
            ShapeOptions {
                uuid: Some(data.base.uuid),
                ..ShapeOptions::default()
            },
        );
        line.update_from_dict(data)?;
        Ok(line)
    }

    pub fn start(&self) -> Point {
        self.core.ref_point
    }

    pub fn length(&self) -> f64 {
        (self.end - self.core.ref_point).hypot()
    }

    pub fn as_dict(&self) -> ServerLine {
        ServerLine {
            base: self.core.base_dict(),
            x2: self.end.x,
            y2: self.end.y,
            line_width: self.line_width,
        }
    }

    pub fn update_from_dict(&mut self, data: &ServerLine) -> WireResult<()> {
        self.core.apply_base_dict(&data.base)?;
        self.end = Point::new(data.x2, data.y2);
        self.line_width = data.line_width;
        Ok(())
    }
}

impl ShapeTrait for Line {
    fn core(&self) -> &ShapeCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ShapeCore {
        &mut self.core
    }

    fn shape_type(&self) -> ShapeType {
        ShapeType::Line
    }

    fn bounding_box(&self) -> BoundingRect {
        BoundingRect::from_points(&[self.core.ref_point, self.end])
    }

    fn points(&self) -> Vec<Point> {
        vec![self.core.ref_point, self.end]
    }

    fn contains(&self, point: Point) -> bool {
        point_to_segment_dist(point, self.core.ref_point, self.end) <= self.line_width / 2.0
    }

    fn center(&self) -> Point {
        self.core.ref_point.midpoint(self.end)
    }

    fn set_center(&mut self, center: Point) {
        let delta: Vector = center - self.center();
        self.core.ref_point += delta;
        self.end += delta;
    }

    fn translate(&mut self, delta: Vector) {
        self.core.ref_point += delta;
        self.end += delta;
    }

    fn snap_to_grid(&mut self, grid: &GridConfig, mover: &dyn MovementDelta) {
        let start = self.core.ref_point;
        move_shape(self, grid.snap_point(start) - start, mover);
        self.end = grid.snap_point(self.end);
    }

    fn resize_to_grid(&mut self, grid: &GridConfig) {
        self.end = grid.snap_point(self.end);
        self.core.invalidate_geometry();
    }

    /// Handle 0 is the start point, handle 1 the end point.
    fn resize(&mut self, handle: usize, point: Point, _grid: &GridConfig) -> usize {
        match handle {
            0 => self.core.ref_point = point,
            1 => self.end = point,
            _ => return handle,
        }
        self.core.invalidate_geometry();
        handle
    }
}
