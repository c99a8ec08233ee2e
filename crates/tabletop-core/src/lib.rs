//! Tabletop Core Library
//!
//! Shape model for a multi-user tabletop board: the shape entity and its
//! variants, per-user access, grid alignment, and the flat wire records
//! shapes are exchanged as.

pub mod access;
pub mod attachments;
pub mod collab;
pub mod geom;
pub mod grid;
pub mod layer;
pub mod render;
pub mod shapes;
pub mod style;
pub mod wire;

pub use access::{AccessKind, PartialShapeAccess, ShapeAccess, ShapeOwner};
pub use attachments::{Aura, Label, Tracker};
pub use collab::{FogColour, FreeMovement, MovementDelta};
pub use geom::{BoundingRect, Point, Vector, Viewport};
pub use grid::{DEFAULT_GRID_SIZE, GridConfig};
pub use layer::{Layer, LayerError, LayerResult};
pub use render::{RenderCache, RenderState};
pub use shapes::{
    Asset, Circle, CircularToken, Line, Polygon, Rect, Shape, ShapeCore, ShapeId, ShapeOptions,
    ShapeTrait, ShapeType, Text,
};
pub use style::ShapeStyle;
pub use wire::{ServerShapeRecord, WireError, WireResult};
