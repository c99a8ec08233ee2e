//! Geometry primitives shared by every shape variant.
//!
//! Points and vectors are kurbo's `Point` and `Vec2`; `Point - Point` yields a
//! `Vec2`, `Point + Vec2` yields a `Point` and `Vec2::hypot` is the length.

pub use kurbo::{Point, Rect, Vec2 as Vector};

use serde::{Deserialize, Serialize};

/// Visible world-space region of the canvas.
pub type Viewport = Rect;

/// Axis-aligned rectangle anchored at its top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingRect {
    /// Top-left corner.
    pub top_left: Point,
    /// Width.
    pub w: f64,
    /// Height.
    pub h: f64,
}

impl BoundingRect {
    pub fn new(top_left: Point, w: f64, h: f64) -> Self {
        Self { top_left, w, h }
    }

    /// Smallest rectangle enclosing all points. An empty slice gives a zero rect at the origin.
    pub fn from_points(points: &[Point]) -> Self {
        if points.is_empty() {
            return Self::new(Point::ZERO, 0.0, 0.0);
        }
        let (min_x, max_x) = points.iter().fold((f64::MAX, f64::MIN), |(mn, mx), p| {
            (mn.min(p.x), mx.max(p.x))
        });
        let (min_y, max_y) = points.iter().fold((f64::MAX, f64::MIN), |(mn, mx), p| {
            (mn.min(p.y), mx.max(p.y))
        });
        Self::new(Point::new(min_x, min_y), max_x - min_x, max_y - min_y)
    }

    /// Corner points: top-left, top-right, bottom-right, bottom-left.
    pub fn points(&self) -> [Point; 4] {
        let Point { x, y } = self.top_left;
        [
            Point::new(x, y),
            Point::new(x + self.w, y),
            Point::new(x + self.w, y + self.h),
            Point::new(x, y + self.h),
        ]
    }

    pub fn center(&self) -> Point {
        self.top_left + Vector::new(self.w / 2.0, self.h / 2.0)
    }

    /// Inclusive containment test.
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.top_left.x
            && point.x <= self.top_left.x + self.w
            && point.y >= self.top_left.y
            && point.y <= self.top_left.y + self.h
    }

    pub fn to_rect(&self) -> Rect {
        Rect::new(
            self.top_left.x,
            self.top_left.y,
            self.top_left.x + self.w,
            self.top_left.y + self.h,
        )
    }

    /// Whether any part of the rectangle lies inside the viewport.
    /// Touching an edge counts as visible.
    pub fn visible_in_canvas(&self, viewport: Viewport) -> bool {
        let viewport = viewport.abs();
        self.top_left.x <= viewport.x1
            && self.top_left.x + self.w >= viewport.x0
            && self.top_left.y <= viewport.y1
            && self.top_left.y + self.h >= viewport.y0
    }
}

impl From<Rect> for BoundingRect {
    fn from(rect: Rect) -> Self {
        let rect = rect.abs();
        Self::new(Point::new(rect.x0, rect.y0), rect.width(), rect.height())
    }
}

/// Distance from a point to the segment a→b.
pub fn point_to_segment_dist(point: Point, a: Point, b: Point) -> f64 {
    let seg = b - a;
    let pv = point - a;
    let len_sq = seg.hypot2();
    if len_sq < f64::EPSILON {
        return pv.hypot();
    }
    let t = (pv.dot(seg) / len_sq).clamp(0.0, 1.0);
    let proj = a + seg * t;
    (point - proj).hypot()
}

/// Minimum distance from a point to a polyline.
pub fn point_to_polyline_dist(point: Point, points: &[Point]) -> f64 {
    match points {
        [] => f64::INFINITY,
        [single] => (point - *single).hypot(),
        _ => points
            .windows(2)
            .map(|w| point_to_segment_dist(point, w[0], w[1]))
            .fold(f64::INFINITY, f64::min),
    }
}

/// Even-odd point-in-polygon test over a closed vertex ring.
pub fn polygon_contains(vertices: &[Point], point: Point) -> bool {
    if vertices.len() < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = vertices.len() - 1;
    for i in 0..vertices.len() {
        let (vi, vj) = (vertices[i], vertices[j]);
        if (vi.y > point.y) != (vj.y > point.y)
            && point.x < (vj.x - vi.x) * (point.y - vi.y) / (vj.y - vi.y) + vi.x
        {
            inside = !inside;
        }
        j = i;
    }
    inside
}
