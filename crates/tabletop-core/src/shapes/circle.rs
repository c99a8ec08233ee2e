//! Circle shape.

use super::{ShapeCore, ShapeOptions, ShapeTrait, ShapeType, move_shape};
use crate::collab::MovementDelta;
use crate::geom::{BoundingRect, Point, Vector};
use crate::grid::GridConfig;
use crate::wire::{ServerCircle, WireResult};

/// A circle anchored at its centre.
#[derive(Debug, Clone, PartialEq)]
pub struct Circle {
    pub(crate) core: ShapeCore,
    /// Radius.
    pub r: f64,
}

impl Circle {
    /// Create a circle. A zero, negative or non-finite radius becomes 1.
    pub fn new(center: Point, r: f64) -> Self {
        Self::with_options(center, r, ShapeOptions::default())
    }

    pub fn with_options(center: Point, r: f64, options: ShapeOptions) -> Self {
        let r = if r.is_finite() && r > 0.0 { r } else { 1.0 };
        Self {
            core: ShapeCore::new(center, options),
            r,
        }
    }

    /// Rebuild a circle received from the network.
    pub fn from_record(data: &ServerCircle) -> WireResult<Self> {
        let mut circle = Self {
            core: ShapeCore::with_id(data.base.uuid, Point::ZERO),
            r: 1.0,
        };
        circle.update_from_dict(data)?;
        Ok(circle)
    }

    pub fn as_dict(&self) -> ServerCircle {
        ServerCircle {
            base: self.core.base_dict(),
            radius: self.r,
        }
    }

    /// Overwrite every field from `data`. The record must carry this circle's uuid.
    pub fn update_from_dict(&mut self, data: &ServerCircle) -> WireResult<()> {
        self.core.apply_base_dict(&data.base)?;
        self.r = data.radius;
        Ok(())
    }

    fn snap_axis(&self, value: f64, gs: f64) -> f64 {
        if ((2.0 * self.r) / gs) % 2.0 == 0.0 {
            (value / gs).round() * gs
        } else {
            ((value - gs / 2.0) / gs).round() * gs + self.r
        }
    }
}

impl ShapeTrait for Circle {
    fn core(&self) -> &ShapeCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ShapeCore {
        &mut self.core
    }

    fn shape_type(&self) -> ShapeType {
        ShapeType::Circle
    }

    /// Square of side `2r` centred on the circle.
    fn bounding_box(&self) -> BoundingRect {
        let p = self.core.ref_point;
        BoundingRect::new(
            Point::new(p.x - self.r, p.y - self.r),
            self.r * 2.0,
            self.r * 2.0,
        )
    }

    /// Open disk: points on the circumference are outside.
    fn contains(&self, point: Point) -> bool {
        (point - self.core.ref_point).hypot2() < self.r * self.r
    }

    fn center(&self) -> Point {
        self.core.ref_point
    }

    fn set_center(&mut self, center: Point) {
        self.core.ref_point = center;
    }

    /// Align so the circle's edge lands on grid lines: an even number of
    /// cells across snaps the centre to a grid line, otherwise to a cell centre.
    fn snap_to_grid(&mut self, grid: &GridConfig, mover: &dyn MovementDelta) {
        let gs = grid.size();
        let current = self.core.ref_point;
        let target = Point::new(self.snap_axis(current.x, gs), self.snap_axis(current.y, gs));
        move_shape(self, target - current, mover);
    }

    fn resize_to_grid(&mut self, grid: &GridConfig) {
        self.r = grid.clamp_line(self.r).max(grid.half());
        self.core.invalidate_geometry();
    }

    /// `point` is a corner of the bounding square, so the radius is the
    /// distance to it divided by √2. Circles have a single handle.
    fn resize(&mut self, handle: usize, point: Point, grid: &GridConfig) -> usize {
        let diff: Vector = point - self.core.ref_point;
        self.r = (diff.hypot2() / 2.0).sqrt().max(grid.half());
        self.core.invalidate_geometry();
        handle
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::{ShapeAccess, ShapeOwner};
    use crate::attachments::{Aura, Tracker};
    use crate::collab::FreeMovement;
    use crate::geom::Rect;
    use proptest::prelude::*;

    #[test]
    fn test_zero_radius_defaults_to_one() {
        assert!((Circle::new(Point::ZERO, 0.0).r - 1.0).abs() < f64::EPSILON);
        assert!((Circle::new(Point::ZERO, -4.0).r - 1.0).abs() < f64::EPSILON);
        assert!((Circle::new(Point::ZERO, f64::NAN).r - 1.0).abs() < f64::EPSILON);
        assert!((Circle::new(Point::ZERO, 2.5).r - 2.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_contains_excludes_boundary() {
        let circle = Circle::new(Point::new(0.0, 0.0), 5.0);
        assert!(circle.contains(Point::new(4.0, 0.0)));
        assert!(!circle.contains(Point::new(5.0, 0.0)));
        assert!(!circle.contains(Point::new(5.0001, 0.0)));
        assert!(circle.contains(Point::new(3.0, 3.9)));
    }

    #[test]
    fn test_bounding_box() {
        let circle = Circle::new(Point::new(10.0, 10.0), 3.0);
        let bbox = circle.bounding_box();
        assert_eq!(bbox.top_left, Point::new(7.0, 7.0));
        assert!((bbox.w - 6.0).abs() < f64::EPSILON);
        assert!((bbox.h - 6.0).abs() < f64::EPSILON);
        assert_eq!(circle.points(), bbox.points().to_vec());
    }

    #[test]
    fn test_center_accessors() {
        let mut circle = Circle::new(Point::new(1.0, 2.0), 3.0);
        assert_eq!(circle.center(), Point::new(1.0, 2.0));
        circle.set_center(Point::new(-4.0, 8.0));
        assert_eq!(circle.center(), Point::new(-4.0, 8.0));
        assert_eq!(circle.core.ref_point, Point::new(-4.0, 8.0));
    }

    #[test]
    fn test_visible_in_canvas() {
        let circle = Circle::new(Point::new(-5.0, -5.0), 10.0);
        assert!(circle.visible_in_canvas(Rect::new(0.0, 0.0, 100.0, 100.0)));
        assert!(!circle.visible_in_canvas(Rect::new(50.0, 50.0, 100.0, 100.0)));
    }

    #[test]
    fn test_snap_to_grid_cell_centre() {
        let grid = GridConfig::new(50.0);
        let mut circle = Circle::new(Point::new(63.0, 112.0), 25.0);
        circle.snap_to_grid(&grid, &FreeMovement);
        assert_eq!(circle.center(), Point::new(75.0, 125.0));
        assert!(circle.core.render_state().dirty);
        assert!(!circle.core.render_state().lighting_dirty);
    }

    #[test]
    fn test_snap_to_grid_is_idempotent() {
        let grid = GridConfig::new(50.0);
        let mut circle = Circle::new(Point::new(63.0, 112.0), 25.0);
        circle.snap_to_grid(&grid, &FreeMovement);
        let first = circle.center();
        circle.snap_to_grid(&grid, &FreeMovement);
        assert_eq!(circle.center(), first);
    }

    #[test]
    fn test_snap_to_grid_even_cells() {
        let grid = GridConfig::new(50.0);
        // Diameter of two cells: the centre goes to a grid line.
        let mut circle = Circle::new(Point::new(63.0, 140.0), 50.0);
        circle.snap_to_grid(&grid, &FreeMovement);
        assert_eq!(circle.center(), Point::new(50.0, 150.0));
        let bbox = circle.bounding_box();
        assert!((bbox.top_left.x % 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_snap_respects_mover() {
        struct Blocked;
        impl MovementDelta for Blocked {
            fn calculate_delta(&self, _delta: Vector, _shape: &dyn ShapeTrait) -> Vector {
                Vector::ZERO
            }
        }
        let mut circle = Circle::new(Point::new(63.0, 112.0), 25.0);
        circle.snap_to_grid(&GridConfig::default(), &Blocked);
        assert_eq!(circle.center(), Point::new(63.0, 112.0));
    }

    #[test]
    fn test_resize_to_grid_floor() {
        let grid = GridConfig::new(50.0);
        let mut circle = Circle::new(Point::ZERO, 1.0);
        circle.resize_to_grid(&grid);
        assert!((circle.r - 25.0).abs() < f64::EPSILON);

        circle.r = 80.0;
        circle.resize_to_grid(&grid);
        assert!((circle.r - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_resize_uses_bounding_square_corner() {
        let grid = GridConfig::new(10.0);
        let mut circle = Circle::new(Point::ZERO, 5.0);
        let handle = circle.resize(3, Point::new(30.0, 30.0), &grid);
        assert_eq!(handle, 3);
        assert!((circle.r - 30.0).abs() < 1e-9);

        // Never below half a grid cell.
        circle.resize(0, Point::new(1.0, 1.0), &grid);
        assert!((circle.r - 5.0).abs() < f64::EPSILON);
    }

    fn decorated_circle() -> Circle {
        let mut circle = Circle::with_options(
            Point::new(12.5, -40.0),
            17.0,
            ShapeOptions {
                fill_colour: Some("#ff0000".to_string()),
                stroke_colour: Some("#00ff00".to_string()),
                uuid: None,
            },
        );
        let id = circle.core.id();
        circle.core.angle = 0.5;
        circle.core.floor = "ground".to_string();
        circle.core.layer = "tokens".to_string();
        circle.core.vision_obstruction = true;
        circle.core.name = "Goblin".to_string();
        circle.core.badge = 3;
        circle.core.show_badge = true;
        circle.core.default_access = ShapeAccess::new(false, false, true);
        circle.core.options = Some("[]".to_string());
        circle.core.asset = Some(42);
        circle.core.add_tracker(Tracker::new(id, "hp", 7.0, 12.0));
        circle.core.add_aura(Aura::new(id, "torch", 20.0, 20.0));
        circle.core.set_owner(ShapeOwner::new("alice", id, ShapeAccess::FULL));
        circle
    }

    #[test]
    fn test_dict_roundtrip() {
        let original = decorated_circle();
        let mut restored = Circle::with_options(
            Point::ZERO,
            1.0,
            ShapeOptions {
                uuid: Some(original.core.id()),
                ..ShapeOptions::default()
            },
        );
        restored.update_from_dict(&original.as_dict()).unwrap();
        assert_eq!(restored, original);
        assert_eq!(restored.as_dict(), original.as_dict());
    }

    #[test]
    fn test_from_record() {
        let original = decorated_circle();
        let rebuilt = Circle::from_record(&original.as_dict()).unwrap();
        assert_eq!(rebuilt, original);
    }

    #[test]
    fn test_update_from_dict_rejects_other_identity() {
        let original = decorated_circle();
        let mut other = Circle::new(Point::new(1.0, 1.0), 2.0);
        assert!(other.update_from_dict(&original.as_dict()).is_err());
        assert!((other.r - 2.0).abs() < f64::EPSILON);
        assert_eq!(other.center(), Point::new(1.0, 1.0));
    }

    proptest! {
        #[test]
        fn dict_roundtrip_preserves_geometry(
            x in -1.0e6f64..1.0e6,
            y in -1.0e6f64..1.0e6,
            r in 0.001f64..1.0e4,
        ) {
            let original = Circle::new(Point::new(x, y), r);
            let rebuilt = Circle::from_record(&original.as_dict()).unwrap();
            prop_assert_eq!(rebuilt, original);
        }
    }
}
