//! Polygon and polyline shape.

use super::{ShapeCore, ShapeOptions, ShapeTrait, ShapeType, move_shape};
use crate::collab::MovementDelta;
use crate::geom::{BoundingRect, Point, Vector, point_to_polyline_dist, polygon_contains};
use crate::grid::GridConfig;
use crate::wire::{ServerPolygon, WireResult};

/// A vertex chain. `ref_point` is the first vertex and `vertices` holds the
/// rest. Closed unless `open_polygon` is set.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    pub(crate) core: ShapeCore,
    pub vertices: Vec<Point>,
    pub open_polygon: bool,
    pub line_width: f64,
}

impl Polygon {
    pub fn new(points: Vec<Point>, open_polygon: bool, line_width: f64) -> Self {
        Self::with_options(points, open_polygon, line_width, ShapeOptions::default())
    }

    pub fn with_options(
        points: Vec<Point>,
        open_polygon: bool,
        line_width: f64,
        options: ShapeOptions,
    ) -> Self {
        let mut points = points.into_iter();
        let first = points.next().unwrap_or(Point::ZERO);
        Self {
            core: ShapeCore::new(first, options),
            vertices: points.collect(),
            open_polygon,
            line_width,
        }
    }

    pub fn from_record(data: &ServerPolygon) -> WireResult<Self> {
        let mut polygon = Self::with_options(
            Vec::new(),
            false,
            1.0,
            ShapeOptions {
                uuid: Some(data.base.uuid),
                ..ShapeOptions::default()
            },
        );
        polygon.update_from_dict(data)?;
        Ok(polygon)
    }

    /// Append a vertex at the end of the chain.
    pub fn push_point(&mut self, point: Point) {
        self.vertices.push(point);
        self.core.invalidate_geometry();
    }

    /// Every vertex, starting with `ref_point`.
    pub fn all_points(&self) -> Vec<Point> {
        std::iter::once(self.core.ref_point)
            .chain(self.vertices.iter().copied())
            .collect()
    }

    pub fn as_dict(&self) -> ServerPolygon {
        ServerPolygon {
            base: self.core.base_dict(),
            vertices: self.vertices.iter().map(|p| [p.x, p.y]).collect(),
            open_polygon: self.open_polygon,
            line_width: self.line_width,
        }
    }

    pub fn update_from_dict(&mut self, data: &ServerPolygon) -> WireResult<()> {
        self.core.apply_base_dict(&data.base)?;
        self.vertices = data.vertices.iter().map(|[x, y]| Point::new(*x, *y)).collect();
        self.open_polygon = data.open_polygon;
        self.line_width = data.line_width;
        Ok(())
    }
}

impl ShapeTrait for Polygon {
    fn core(&self) -> &ShapeCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ShapeCore {
        &mut self.core
    }

    fn shape_type(&self) -> ShapeType {
        ShapeType::Polygon
    }

    fn bounding_box(&self) -> BoundingRect {
        BoundingRect::from_points(&self.all_points())
    }

    fn points(&self) -> Vec<Point> {
        self.all_points()
    }

    fn contains(&self, point: Point) -> bool {
        let points = self.all_points();
        if self.open_polygon {
            point_to_polyline_dist(point, &points) <= self.line_width / 2.0
        } else {
            polygon_contains(&points, point)
        }
    }

    /// Vertex centroid.
    fn center(&self) -> Point {
        let count = (self.vertices.len() + 1) as f64;
        let sum = self
            .vertices
            .iter()
            .fold(self.core.ref_point.to_vec2(), |acc, p| acc + p.to_vec2());
        (sum / count).to_point()
    }

    fn set_center(&mut self, center: Point) {
        let delta: Vector = center - self.center();
        self.core.ref_point += delta;
        for vertex in &mut self.vertices {
            *vertex += delta;
        }
    }

    fn translate(&mut self, delta: Vector) {
        self.core.ref_point += delta;
        for vertex in &mut self.vertices {
            *vertex += delta;
        }
    }

    fn snap_to_grid(&mut self, grid: &GridConfig, mover: &dyn MovementDelta) {
        let first = self.core.ref_point;
        move_shape(self, grid.snap_point(first) - first, mover);
    }

    fn resize_to_grid(&mut self, grid: &GridConfig) {
        self.core.ref_point = grid.snap_point(self.core.ref_point);
        for vertex in &mut self.vertices {
            *vertex = grid.snap_point(*vertex);
        }
        self.core.invalidate_geometry();
    }

    /// Handle `i` is vertex `i`, counting `ref_point` as 0.
    fn resize(&mut self, handle: usize, point: Point, _grid: &GridConfig) -> usize {
        if handle == 0 {
            self.core.ref_point = point;
        } else if let Some(vertex) = self.vertices.get_mut(handle - 1) {
            *vertex = point;
        } else {
            return handle;
        }
        self.core.invalidate_geometry();
        handle
    }
}
