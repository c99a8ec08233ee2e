//! A layer of the board: the shapes it owns and their stacking order.

use crate::access::AccessKind;
use crate::collab::MovementDelta;
use crate::geom::{Point, Vector, Viewport};
use crate::render::RenderCache;
use crate::shapes::{Shape, ShapeId, ShapeTrait, move_shape};
use crate::wire::{ServerShapeRecord, WireError};
use std::collections::HashMap;
use thiserror::Error;

/// Errors raised by layer operations.
#[derive(Debug, Error)]
pub enum LayerError {
    #[error("Shape not found: {0}")]
    NotFound(ShapeId),
    #[error("User {user} lacks {access} access on shape {shape}")]
    AccessDenied {
        user: String,
        shape: ShapeId,
        access: AccessKind,
    },
    #[error(transparent)]
    Wire(#[from] WireError),
}

/// Result type for layer operations.
pub type LayerResult<T> = Result<T, LayerError>;

/// Shapes on one layer of one floor, keyed by id.
#[derive(Debug, Clone, Default)]
pub struct Layer {
    pub name: String,
    pub floor: String,
    shapes: HashMap<ShapeId, Shape>,
    /// Back to front.
    z_order: Vec<ShapeId>,
}

impl Layer {
    pub fn new(name: impl Into<String>, floor: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            floor: floor.into(),
            shapes: HashMap::new(),
            z_order: Vec::new(),
        }
    }

    /// Add a shape on top. A shape with the same id is replaced in place.
    pub fn add_shape(&mut self, mut shape: Shape) {
        let id = shape.id();
        place(&mut shape, &self.name, &self.floor);
        if self.shapes.insert(id, shape).is_none() {
            self.z_order.push(id);
        }
    }

    /// Remove a shape and hand it back.
    ///
    /// The shape's [`RenderCache`] entry is left alone; use
    /// [`Layer::remove_shape_evicting`] when a cache is at hand.
    pub fn remove_shape(&mut self, id: ShapeId) -> Option<Shape> {
        self.z_order.retain(|&shape_id| shape_id != id);
        self.shapes.remove(&id)
    }

    /// Remove a shape and drop its cached render entry and pending
    /// lighting request.
    pub fn remove_shape_evicting(&mut self, id: ShapeId, cache: &mut RenderCache) -> Option<Shape> {
        cache.evict(&id);
        self.remove_shape(id)
    }

    pub fn get(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.get(&id)
    }

    pub fn get_mut(&mut self, id: ShapeId) -> Option<&mut Shape> {
        self.shapes.get_mut(&id)
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Shapes back to front.
    pub fn iter(&self) -> impl Iterator<Item = &Shape> {
        self.z_order.iter().filter_map(|id| self.shapes.get(id))
    }

    pub fn bring_to_front(&mut self, id: ShapeId) {
        if self.shapes.contains_key(&id) {
            self.z_order.retain(|&shape_id| shape_id != id);
            self.z_order.push(id);
        }
    }

    pub fn send_to_back(&mut self, id: ShapeId) {
        if self.shapes.contains_key(&id) {
            self.z_order.retain(|&shape_id| shape_id != id);
            self.z_order.insert(0, id);
        }
    }

    /// Create or update the shape a received record describes.
    /// Returns the id of the affected shape.
    ///
    /// The stored shape always carries this layer's name and floor, whatever
    /// the record says. Created shapes start dirty so the first render
    /// refresh picks them up.
    pub fn apply_record(&mut self, record: &ServerShapeRecord) -> LayerResult<ShapeId> {
        let id = record.uuid();
        match self.shapes.get_mut(&id) {
            Some(shape) => {
                log::debug!("Updating {} shape {} on layer {}", record.shape_type(), id, self.name);
                shape.update_from_record(record)?;
                place(shape, &self.name, &self.floor);
                shape.invalidate(false);
            }
            None => {
                log::debug!("Adding {} shape {} to layer {}", record.shape_type(), id, self.name);
                let mut shape = Shape::from_record(record)?;
                place(&mut shape, &self.name, &self.floor);
                shape.core_mut().invalidate_geometry();
                self.shapes.insert(id, shape);
                self.z_order.push(id);
            }
        }
        Ok(id)
    }

    /// Like [`Layer::apply_record`], but an update to an existing shape
    /// requires edit access for `user`.
    pub fn apply_record_as(&mut self, user: &str, record: &ServerShapeRecord) -> LayerResult<ShapeId> {
        if let Some(shape) = self.shapes.get(&record.uuid()) {
            require(shape, user, AccessKind::Edit)?;
        }
        self.apply_record(record)
    }

    /// Move a shape on behalf of `user`. Returns the delta actually applied.
    pub fn move_shape_as(
        &mut self,
        user: &str,
        id: ShapeId,
        delta: Vector,
        mover: &dyn MovementDelta,
    ) -> LayerResult<Vector> {
        let shape = self.shapes.get_mut(&id).ok_or(LayerError::NotFound(id))?;
        require(shape, user, AccessKind::Movement)?;
        let applied = move_shape(shape, delta, mover);
        if shape.core().movement_obstruction {
            shape.invalidate(false);
        }
        Ok(applied)
    }

    /// Topmost shape under `point`.
    pub fn shape_at(&self, point: Point) -> Option<&Shape> {
        self.z_order
            .iter()
            .rev()
            .filter_map(|id| self.shapes.get(id))
            .find(|shape| shape.contains(point))
    }

    /// Shapes intersecting the viewport, back to front.
    pub fn visible_in_canvas(&self, viewport: Viewport) -> Vec<&Shape> {
        self.iter().filter(|s| s.visible_in_canvas(viewport)).collect()
    }

    /// Shapes `user` may see, back to front.
    pub fn visible_to<'a>(&'a self, user: &'a str) -> impl Iterator<Item = &'a Shape> + 'a {
        self.iter()
            .filter(move |s| s.core().has_access(user, AccessKind::Vision))
    }

    /// Wire records for every shape, back to front.
    pub fn records(&self) -> Vec<ServerShapeRecord> {
        self.iter().map(Shape::as_dict).collect()
    }
}

fn place(shape: &mut Shape, layer: &str, floor: &str) {
    let core = shape.core_mut();
    if core.layer != layer || core.floor != floor {
        log::debug!(
            "Placing shape {} on {}/{} (was {}/{})",
            core.id(),
            floor,
            layer,
            core.floor,
            core.layer
        );
        core.layer = layer.to_string();
        core.floor = floor.to_string();
    }
}

fn require(shape: &Shape, user: &str, access: AccessKind) -> LayerResult<()> {
    if shape.core().has_access(user, access) {
        Ok(())
    } else {
        log::warn!("{} denied {} access on shape {}", user, access, shape.id());
        Err(LayerError::AccessDenied {
            user: user.to_string(),
            shape: shape.id(),
            access,
        })
    }
}
