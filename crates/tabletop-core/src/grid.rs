//! Grid configuration and grid-line snapping.

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Default grid cell size in world units.
pub const DEFAULT_GRID_SIZE: f64 = 50.0;

/// Grid settings threaded into every grid-dependent shape operation.
///
/// Deserialized configs go through [`GridConfig::new`], so the cell size is
/// always positive and finite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawGridConfig")]
pub struct GridConfig {
    size: f64,
}

#[derive(Deserialize)]
struct RawGridConfig {
    #[serde(default = "default_size")]
    size: f64,
}

fn default_size() -> f64 {
    DEFAULT_GRID_SIZE
}

impl From<RawGridConfig> for GridConfig {
    fn from(raw: RawGridConfig) -> Self {
        GridConfig::new(raw.size)
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_GRID_SIZE,
        }
    }
}

impl GridConfig {
    /// Create a grid config. Non-positive or non-finite sizes fall back to the default.
    pub fn new(size: f64) -> Self {
        if size.is_finite() && size > 0.0 {
            Self { size }
        } else {
            log::warn!("Ignoring invalid grid size {}, using {}", size, DEFAULT_GRID_SIZE);
            Self::default()
        }
    }

    /// Size of one grid cell.
    pub fn size(&self) -> f64 {
        self.size
    }

    /// Half a grid cell, the smallest radius a grid-aligned circle may have.
    pub fn half(&self) -> f64 {
        self.size / 2.0
    }

    /// Nearest grid line to `value`.
    pub fn clamp_line(&self, value: f64) -> f64 {
        clamp_grid_line(value, self.size)
    }

    /// Snap both coordinates of a point to the nearest grid lines.
    pub fn snap_point(&self, point: Point) -> Point {
        snap_point(point, self.size)
    }
}

/// Round a coordinate to the nearest multiple of `grid_size`.
pub fn clamp_grid_line(value: f64, grid_size: f64) -> f64 {
    (value / grid_size).round() * grid_size
}

/// Snap a point to the nearest grid intersection.
pub fn snap_point(point: Point, grid_size: f64) -> Point {
    Point::new(
        clamp_grid_line(point.x, grid_size),
        clamp_grid_line(point.y, grid_size),
    )
}
