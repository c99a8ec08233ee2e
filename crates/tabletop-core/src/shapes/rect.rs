//! Rectangle shape.

use super::{ShapeCore, ShapeOptions, ShapeTrait, ShapeType, move_shape};
use crate::collab::MovementDelta;
use crate::geom::{BoundingRect, Point, Vector};
use crate::grid::GridConfig;
use crate::wire::{ServerRect, WireResult};

/// An axis-aligned rectangle anchored at its top-left corner.
#[derive(Debug, Clone, PartialEq)]
pub struct Rect {
    pub(crate) core: ShapeCore,
    /// Width.
    pub w: f64,
    /// Height.
    pub h: f64,
}

/// Resize handles in [`BoundingRect::points`] order.
pub const TOP_LEFT: usize = 0;
pub const TOP_RIGHT: usize = 1;
pub const BOTTOM_RIGHT: usize = 2;
pub const BOTTOM_LEFT: usize = 3;

impl Rect {
    pub fn new(top_left: Point, w: f64, h: f64) -> Self {
        Self::with_options(top_left, w, h, ShapeOptions::default())
    }

    pub fn with_options(top_left: Point, w: f64, h: f64, options: ShapeOptions) -> Self {
        Self {
            core: ShapeCore::new(top_left, options),
            w,
            h,
        }
    }

    /// Create a rectangle from two opposite corners.
    pub fn from_corners(p1: Point, p2: Point) -> Self {
        let bbox = BoundingRect::from_points(&[p1, p2]);
        Self::new(bbox.top_left, bbox.w, bbox.h)
    }

    pub fn from_record(data: &ServerRect) -> WireResult<Self> {
        let mut rect = Self {
            core: ShapeCore::with_id(data.base.uuid, Point::ZERO),
            w: 0.0,
            h: 0.0,
        };
        rect.update_from_dict(data)?;
        Ok(rect)
    }

    pub fn as_dict(&self) -> ServerRect {
        ServerRect {
            base: self.core.base_dict(),
            width: self.w,
            height: self.h,
        }
    }

    pub fn update_from_dict(&mut self, data: &ServerRect) -> WireResult<()> {
        self.core.apply_base_dict(&data.base)?;
        self.w = data.width;
        self.h = data.height;
        Ok(())
    }
}

/// Snap a centre coordinate so that an extent of whole cells lands on grid
/// lines: an even cell count centres on a grid line, an odd one on a cell centre.
fn snap_center_axis(center: f64, extent: f64, gs: f64) -> f64 {
    if (extent / gs) % 2.0 == 0.0 {
        (center / gs).round() * gs
    } else {
        ((center + gs / 2.0) / gs).round() * gs - gs / 2.0
    }
}

/// Which corner `point` is relative to the fixed `opposite` corner.
fn corner_of(point: Point, opposite: Point) -> usize {
    let left = point.x < opposite.x;
    let top = point.y < opposite.y;
    match (top, left) {
        (true, true) => TOP_LEFT,
        (true, false) => TOP_RIGHT,
        (false, false) => BOTTOM_RIGHT,
        (false, true) => BOTTOM_LEFT,
    }
}

impl ShapeTrait for Rect {
    fn core(&self) -> &ShapeCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ShapeCore {
        &mut self.core
    }

    fn shape_type(&self) -> ShapeType {
        ShapeType::Rect
    }

    fn bounding_box(&self) -> BoundingRect {
        BoundingRect::new(self.core.ref_point, self.w, self.h)
    }

    fn contains(&self, point: Point) -> bool {
        self.bounding_box().contains(point)
    }

    fn center(&self) -> Point {
        self.core.ref_point + Vector::new(self.w / 2.0, self.h / 2.0)
    }

    fn set_center(&mut self, center: Point) {
        self.core.ref_point = center - Vector::new(self.w / 2.0, self.h / 2.0);
    }

    fn translate(&mut self, delta: Vector) {
        self.core.ref_point += delta;
    }

    fn snap_to_grid(&mut self, grid: &GridConfig, mover: &dyn MovementDelta) {
        let gs = grid.size();
        let center = self.center();
        let target = Point::new(
            snap_center_axis(center.x, self.w, gs),
            snap_center_axis(center.y, self.h, gs),
        );
        move_shape(self, target - center, mover);
    }

    fn resize_to_grid(&mut self, grid: &GridConfig) {
        self.w = grid.clamp_line(self.w).max(grid.size());
        self.h = grid.clamp_line(self.h).max(grid.size());
        self.core.invalidate_geometry();
    }

    /// Drag a corner; the opposite corner stays put. Dragging past the
    /// opposite corner flips the rectangle and hands back the new corner.
    fn resize(&mut self, handle: usize, point: Point, _grid: &GridConfig) -> usize {
        if handle > BOTTOM_LEFT {
            return handle;
        }
        let opposite = self.bounding_box().points()[(handle + 2) % 4];
        let bbox = BoundingRect::from_points(&[opposite, point]);
        self.core.ref_point = bbox.top_left;
        self.w = bbox.w;
        self.h = bbox.h;
        self.core.invalidate_geometry();
        corner_of(point, opposite)
    }
}
