//! Image shape backed by an uploaded asset.

use super::{Rect, ShapeCore, ShapeOptions, ShapeTrait, ShapeType};
use crate::collab::MovementDelta;
use crate::geom::{BoundingRect, Point};
use crate::grid::GridConfig;
use crate::wire::{ServerAsset, WireResult};

/// A rectangle that draws the image at `src`. Geometry is the rectangle's.
#[derive(Debug, Clone, PartialEq)]
pub struct Asset {
    pub rect: Rect,
    /// Image URL.
    pub src: String,
}

impl Asset {
    pub fn new(top_left: Point, w: f64, h: f64, src: impl Into<String>) -> Self {
        Self::with_options(top_left, w, h, src, ShapeOptions::default())
    }

    pub fn with_options(
        top_left: Point,
        w: f64,
        h: f64,
        src: impl Into<String>,
        options: ShapeOptions,
    ) -> Self {
        Self {
            rect: Rect::with_options(top_left, w, h, options),
            src: src.into(),
        }
    }

    pub fn from_record(data: &ServerAsset) -> WireResult<Self> {
        Ok(Self {
            rect: Rect::from_record(&data.rect)?,
            src: data.src.clone(),
        })
    }

    pub fn as_dict(&self) -> ServerAsset {
        ServerAsset {
            rect: self.rect.as_dict(),
            src: self.src.clone(),
        }
    }

    pub fn update_from_dict(&mut self, data: &ServerAsset) -> WireResult<()> {
        self.rect.update_from_dict(&data.rect)?;
        self.src = data.src.clone();
        Ok(())
    }
}

impl ShapeTrait for Asset {
    fn core(&self) -> &ShapeCore {
        self.rect.core()
    }

    fn core_mut(&mut self) -> &mut ShapeCore {
        self.rect.core_mut()
    }

    fn shape_type(&self) -> ShapeType {
        ShapeType::Asset
    }

    fn bounding_box(&self) -> BoundingRect {
        self.rect.bounding_box()
    }

    fn contains(&self, point: Point) -> bool {
        self.rect.contains(point)
    }

    fn center(&self) -> Point {
        self.rect.center()
    }

    fn set_center(&mut self, center: Point) {
        self.rect.set_center(center)
    }

    fn snap_to_grid(&mut self, grid: &GridConfig, mover: &dyn MovementDelta) {
        self.rect.snap_to_grid(grid, mover)
    }

    fn resize_to_grid(&mut self, grid: &GridConfig) {
        self.rect.resize_to_grid(grid)
    }

    fn resize(&mut self, handle: usize, point: Point, grid: &GridConfig) -> usize {
        self.rect.resize(handle, point, grid)
    }
}
