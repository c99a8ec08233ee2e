//! Circular token: a circle with a short text drawn inside.

use super::{Circle, ShapeCore, ShapeOptions, ShapeTrait, ShapeType};
use crate::collab::MovementDelta;
use crate::geom::{BoundingRect, Point};
use crate::grid::GridConfig;
use crate::wire::{ServerCircularToken, WireResult};

#[derive(Debug, Clone, PartialEq)]
pub struct CircularToken {
    pub circle: Circle,
    pub text: String,
    pub font: String,
}

impl CircularToken {
    pub fn new(center: Point, r: f64, text: impl Into<String>, font: impl Into<String>) -> Self {
        Self::with_options(center, r, text, font, ShapeOptions::default())
    }

    pub fn with_options(
        center: Point,
        r: f64,
        text: impl Into<String>,
        font: impl Into<String>,
        options: ShapeOptions,
    ) -> Self {
        Self {
            circle: Circle::with_options(center, r, options),
            text: text.into(),
            font: font.into(),
        }
    }

    pub fn from_record(data: &ServerCircularToken) -> WireResult<Self> {
        Ok(Self {
            circle: Circle::from_record(&data.circle)?,
            text: data.text.clone(),
            font: data.font.clone(),
        })
    }

    pub fn as_dict(&self) -> ServerCircularToken {
        ServerCircularToken {
            circle: self.circle.as_dict(),
            text: self.text.clone(),
            font: self.font.clone(),
        }
    }

    pub fn update_from_dict(&mut self, data: &ServerCircularToken) -> WireResult<()> {
        self.circle.update_from_dict(&data.circle)?;
        self.text = data.text.clone();
        self.font = data.font.clone();
        Ok(())
    }
}

impl ShapeTrait for CircularToken {
    fn core(&self) -> &ShapeCore {
        self.circle.core()
    }

    fn core_mut(&mut self) -> &mut ShapeCore {
        self.circle.core_mut()
    }

    fn shape_type(&self) -> ShapeType {
        ShapeType::CircularToken
    }

    fn bounding_box(&self) -> BoundingRect {
        self.circle.bounding_box()
    }

    fn contains(&self, point: Point) -> bool {
        self.circle.contains(point)
    }

    fn center(&self) -> Point {
        self.circle.center()
    }

    fn set_center(&mut self, center: Point) {
        self.circle.set_center(center)
    }

    fn snap_to_grid(&mut self, grid: &GridConfig, mover: &dyn MovementDelta) {
        self.circle.snap_to_grid(grid, mover)
    }

    fn resize_to_grid(&mut self, grid: &GridConfig) {
        self.circle.resize_to_grid(grid)
    }

    fn resize(&mut self, handle: usize, point: Point, grid: &GridConfig) -> usize {
        self.circle.resize(handle, point, grid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collab::FreeMovement;
    use crate::wire::ServerShapeRecord;

    #[test]
    fn test_geometry_delegates_to_circle() {
        let mut token = CircularToken::new(Point::new(63.0, 112.0), 25.0, "G", "20px serif");
        assert!(token.contains(Point::new(63.0, 112.0)));
        token.snap_to_grid(&GridConfig::new(50.0), &FreeMovement);
        assert_eq!(token.center(), Point::new(75.0, 125.0));
        assert_eq!(token.id(), token.circle.core.id());
    }

    #[test]
    fn test_wire_layout() {
        let token = CircularToken::new(Point::ZERO, 10.0, "G", "12px serif");
        let value = ServerShapeRecord::CircularToken(token.as_dict()).to_value().unwrap();
        assert_eq!(value["type_"], "circulartoken");
        assert_eq!(value["radius"], 10.0);
        assert_eq!(value["text"], "G");
        assert_eq!(value["font"], "12px serif");
    }
}
