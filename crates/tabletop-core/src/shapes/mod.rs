//! Shape definitions for the board.

mod asset;
mod base;
mod circle;
mod line;
mod polygon;
mod rect;
mod text;
mod token;

pub use asset::Asset;
pub use base::{ShapeCore, ShapeOptions};
pub use circle::Circle;
pub use line::Line;
pub use polygon::Polygon;
pub use rect::Rect;
pub use text::Text;
pub use token::CircularToken;

use crate::collab::MovementDelta;
use crate::geom::{BoundingRect, Point, Vector, Viewport};
use crate::grid::GridConfig;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Unique identifier for shapes.
pub type ShapeId = Uuid;

/// Shape family, serialized as the wire `type_` tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeType {
    #[serde(rename = "circle")]
    Circle,
    #[serde(rename = "circulartoken")]
    CircularToken,
    #[serde(rename = "rect")]
    Rect,
    #[serde(rename = "assetrect")]
    Asset,
    #[serde(rename = "line")]
    Line,
    #[serde(rename = "polygon")]
    Polygon,
    #[serde(rename = "text")]
    Text,
}

impl ShapeType {
    pub const ALL: [ShapeType; 7] = [
        ShapeType::Circle,
        ShapeType::CircularToken,
        ShapeType::Rect,
        ShapeType::Asset,
        ShapeType::Line,
        ShapeType::Polygon,
        ShapeType::Text,
    ];

    /// The wire tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeType::Circle => "circle",
            ShapeType::CircularToken => "circulartoken",
            ShapeType::Rect => "rect",
            ShapeType::Asset => "assetrect",
            ShapeType::Line => "line",
            ShapeType::Polygon => "polygon",
            ShapeType::Text => "text",
        }
    }
}

impl fmt::Display for ShapeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShapeType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ShapeType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| s.to_string())
    }
}

/// Geometry contract every shape variant fulfils.
pub trait ShapeTrait {
    /// Shared base fields.
    fn core(&self) -> &ShapeCore;

    fn core_mut(&mut self) -> &mut ShapeCore;

    fn shape_type(&self) -> ShapeType;

    fn id(&self) -> ShapeId {
        self.core().id()
    }

    /// Axis-aligned bounding box in world coordinates.
    fn bounding_box(&self) -> BoundingRect;

    /// Outline points. Defaults to the bounding box corners.
    fn points(&self) -> Vec<Point> {
        self.bounding_box().points().to_vec()
    }

    /// Hit test in world coordinates.
    fn contains(&self, point: Point) -> bool;

    fn center(&self) -> Point;

    /// Move the shape so that its centre is at `center`.
    fn set_center(&mut self, center: Point);

    /// Move the shape by `delta`.
    fn translate(&mut self, delta: Vector) {
        let center = self.center();
        self.set_center(center + delta);
    }

    /// Whether the shape intersects the viewport.
    fn visible_in_canvas(&self, viewport: Viewport) -> bool {
        self.bounding_box().visible_in_canvas(viewport)
    }

    /// Align the shape's position to the grid. The movement is routed through `mover`.
    fn snap_to_grid(&mut self, grid: &GridConfig, mover: &dyn MovementDelta);

    /// Align the shape's size to the grid.
    fn resize_to_grid(&mut self, grid: &GridConfig);

    /// Drag resize handle `handle` to `point`. Returns the handle now under the pointer.
    fn resize(&mut self, handle: usize, point: Point, grid: &GridConfig) -> usize;

    /// Mark derived render state stale. `skip_lighting_update` skips the vision recompute.
    fn invalidate(&mut self, skip_lighting_update: bool) {
        self.core_mut().invalidate(skip_lighting_update);
    }
}

/// Apply a desired movement through the movement helper and invalidate.
/// Returns the delta that was actually applied.
pub fn move_shape<S: ShapeTrait>(shape: &mut S, desired: Vector, mover: &dyn MovementDelta) -> Vector {
    let delta = mover.calculate_delta(desired, &*shape);
    if delta != Vector::ZERO {
        shape.translate(delta);
    }
    shape.core_mut().invalidate_geometry();
    delta
}

/// Closed set of shape variants.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Circle(Circle),
    CircularToken(CircularToken),
    Rect(Rect),
    Asset(Asset),
    Line(Line),
    Polygon(Polygon),
    Text(Text),
}

impl Shape {
    fn as_dyn(&self) -> &dyn ShapeTrait {
        match self {
            Shape::Circle(s) => s,
            Shape::CircularToken(s) => s,
            Shape::Rect(s) => s,
            Shape::Asset(s) => s,
            Shape::Line(s) => s,
            Shape::Polygon(s) => s,
            Shape::Text(s) => s,
        }
    }

    fn as_dyn_mut(&mut self) -> &mut dyn ShapeTrait {
        match self {
            Shape::Circle(s) => s,
            Shape::CircularToken(s) => s,
            Shape::Rect(s) => s,
            Shape::Asset(s) => s,
            Shape::Line(s) => s,
            Shape::Polygon(s) => s,
            Shape::Text(s) => s,
        }
    }

    pub fn as_circle(&self) -> Option<&Circle> {
        match self {
            Shape::Circle(c) => Some(c),
            Shape::CircularToken(t) => Some(&t.circle),
            _ => None,
        }
    }

    pub fn as_circle_mut(&mut self) -> Option<&mut Circle> {
        match self {
            Shape::Circle(c) => Some(c),
            Shape::CircularToken(t) => Some(&mut t.circle),
            _ => None,
        }
    }
}

impl ShapeTrait for Shape {
    fn core(&self) -> &ShapeCore {
        self.as_dyn().core()
    }

    fn core_mut(&mut self) -> &mut ShapeCore {
        self.as_dyn_mut().core_mut()
    }

    fn shape_type(&self) -> ShapeType {
        self.as_dyn().shape_type()
    }

    fn bounding_box(&self) -> BoundingRect {
        self.as_dyn().bounding_box()
    }

    fn points(&self) -> Vec<Point> {
        self.as_dyn().points()
    }

    fn contains(&self, point: Point) -> bool {
        self.as_dyn().contains(point)
    }

    fn center(&self) -> Point {
        self.as_dyn().center()
    }

    fn set_center(&mut self, center: Point) {
        self.as_dyn_mut().set_center(center)
    }

    fn translate(&mut self, delta: Vector) {
        self.as_dyn_mut().translate(delta)
    }

    fn visible_in_canvas(&self, viewport: Viewport) -> bool {
        self.as_dyn().visible_in_canvas(viewport)
    }

    fn snap_to_grid(&mut self, grid: &GridConfig, mover: &dyn MovementDelta) {
        self.as_dyn_mut().snap_to_grid(grid, mover)
    }

    fn resize_to_grid(&mut self, grid: &GridConfig) {
        self.as_dyn_mut().resize_to_grid(grid)
    }

    fn resize(&mut self, handle: usize, point: Point, grid: &GridConfig) -> usize {
        self.as_dyn_mut().resize(handle, point, grid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collab::FreeMovement;

    #[test]
    fn test_type_tags_roundtrip() {
        for t in ShapeType::ALL {
            assert_eq!(t.as_str().parse::<ShapeType>(), Ok(t));
            let json = serde_json::to_string(&t).unwrap();
            assert_eq!(json, format!("\"{}\"", t.as_str()));
        }
        assert!("hexagon".parse::<ShapeType>().is_err());
    }

    #[test]
    fn test_enum_dispatch() {
        let mut shape = Shape::Rect(Rect::new(Point::new(0.0, 0.0), 10.0, 20.0));
        assert_eq!(shape.shape_type(), ShapeType::Rect);
        assert!(shape.contains(Point::new(5.0, 5.0)));
        shape.translate(Vector::new(100.0, 0.0));
        assert!(!shape.contains(Point::new(5.0, 5.0)));
        assert_eq!(shape.center(), Point::new(105.0, 10.0));
    }

    #[test]
    fn test_move_shape_uses_mover() {
        struct Halved;
        impl MovementDelta for Halved {
            fn calculate_delta(&self, delta: Vector, _shape: &dyn ShapeTrait) -> Vector {
                delta * 0.5
            }
        }

        let mut circle = Circle::new(Point::new(0.0, 0.0), 5.0);
        let applied = move_shape(&mut circle, Vector::new(10.0, 0.0), &Halved);
        assert_eq!(applied, Vector::new(5.0, 0.0));
        assert_eq!(circle.center(), Point::new(5.0, 0.0));

        let applied = move_shape(&mut circle, Vector::new(0.0, 4.0), &FreeMovement);
        assert_eq!(applied, Vector::new(0.0, 4.0));
        assert!(circle.core().render_state().dirty);
    }

    #[test]
    fn test_as_circle() {
        let token = Shape::CircularToken(CircularToken::new(Point::ZERO, 10.0, "A", "20px serif"));
        assert!((token.as_circle().unwrap().r - 10.0).abs() < f64::EPSILON);
        let rect = Shape::Rect(Rect::new(Point::ZERO, 1.0, 1.0));
        assert!(rect.as_circle().is_none());
    }
}
