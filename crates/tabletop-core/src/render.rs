//! Render dirty-state and the per-shape cache of derived visuals.
//!
//! Geometry calls never touch the cache. Mutations mark the shape with
//! [`ShapeCore::invalidate`](crate::shapes::ShapeCore::invalidate); the next
//! [`RenderCache::refresh`] recomputes what the renderer needs and queues a
//! lighting pass when the change was vision-relevant.

use crate::geom::{BoundingRect, Point, Viewport};
use crate::shapes::{Shape, ShapeId, ShapeTrait};
use std::collections::HashMap;

/// Dirty flags carried by every shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderState {
    /// Derived visuals are stale.
    pub dirty: bool,
    /// Lighting/vision must be recomputed as well.
    pub lighting_dirty: bool,
}

impl RenderState {
    pub fn is_clean(&self) -> bool {
        !self.dirty && !self.lighting_dirty
    }
}

/// Visuals derived from a shape's geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderEntry {
    pub bounding_box: BoundingRect,
    pub points: Vec<Point>,
    /// Whether the shape intersected the viewport at refresh time.
    pub visible: bool,
}

/// Cache of [`RenderEntry`] keyed by shape identity.
#[derive(Debug, Default)]
pub struct RenderCache {
    entries: HashMap<ShapeId, RenderEntry>,
    lighting_requests: Vec<ShapeId>,
}

impl RenderCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bring the entry for `shape` up to date. Returns true when it was recomputed.
    ///
    /// Clean shapes with a cached entry only get their visibility re-tested
    /// against the viewport.
    pub fn refresh(&mut self, shape: &mut Shape, viewport: Viewport) -> bool {
        let id = shape.id();
        let state = shape.core().render_state();

        if state.is_clean() {
            if let Some(entry) = self.entries.get_mut(&id) {
                entry.visible = entry.bounding_box.visible_in_canvas(viewport);
                return false;
            }
        }

        log::trace!("Refreshing render entry for {}", id);
        let bounding_box = shape.bounding_box();
        let entry = RenderEntry {
            bounding_box,
            points: shape.points(),
            visible: shape.visible_in_canvas(viewport),
        };
        self.entries.insert(id, entry);

        if state.lighting_dirty && !self.lighting_requests.contains(&id) {
            self.lighting_requests.push(id);
        }
        shape.core_mut().clear_render_state();
        true
    }

    pub fn get(&self, id: &ShapeId) -> Option<&RenderEntry> {
        self.entries.get(id)
    }

    /// Drop the entry of a removed shape.
    pub fn evict(&mut self, id: &ShapeId) -> Option<RenderEntry> {
        self.lighting_requests.retain(|r| r != id);
        self.entries.remove(id)
    }

    /// Shapes whose lighting must be recomputed, in request order.
    pub fn take_lighting_requests(&mut self) -> Vec<ShapeId> {
        std::mem::take(&mut self.lighting_requests)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::Circle;
    use kurbo::Rect;

    fn viewport() -> Viewport {
        Rect::new(0.0, 0.0, 500.0, 500.0)
    }

    #[test]
    fn test_refresh_builds_entry() {
        let mut cache = RenderCache::new();
        let mut shape = Shape::Circle(Circle::new(Point::new(10.0, 10.0), 3.0));
        assert!(cache.refresh(&mut shape, viewport()));

        let entry = cache.get(&shape.id()).unwrap();
        assert_eq!(entry.bounding_box.top_left, Point::new(7.0, 7.0));
        assert_eq!(entry.points.len(), 4);
        assert!(entry.visible);
    }

    #[test]
    fn test_clean_shape_is_not_recomputed() {
        let mut cache = RenderCache::new();
        let mut shape = Shape::Circle(Circle::new(Point::new(10.0, 10.0), 3.0));
        cache.refresh(&mut shape, viewport());
        assert!(!cache.refresh(&mut shape, viewport()));

        shape.invalidate(true);
        assert!(cache.refresh(&mut shape, viewport()));
        assert!(shape.core().render_state().is_clean());
        assert!(cache.take_lighting_requests().is_empty());
    }

    #[test]
    fn test_lighting_request_queued_once() {
        let mut cache = RenderCache::new();
        let mut shape = Shape::Circle(Circle::new(Point::new(10.0, 10.0), 3.0));
        shape.invalidate(false);
        cache.refresh(&mut shape, viewport());
        shape.invalidate(false);
        cache.refresh(&mut shape, viewport());

        assert_eq!(cache.take_lighting_requests(), vec![shape.id()]);
        assert!(cache.take_lighting_requests().is_empty());
    }

    #[test]
    fn test_visibility_retested_for_clean_entries() {
        let mut cache = RenderCache::new();
        let mut shape = Shape::Circle(Circle::new(Point::new(10.0, 10.0), 3.0));
        cache.refresh(&mut shape, viewport());
        cache.refresh(&mut shape, Rect::new(100.0, 100.0, 200.0, 200.0));
        assert!(!cache.get(&shape.id()).unwrap().visible);
    }

    #[test]
    fn test_evict() {
        let mut cache = RenderCache::new();
        let mut shape = Shape::Circle(Circle::new(Point::new(10.0, 10.0), 3.0));
        shape.invalidate(false);
        cache.refresh(&mut shape, viewport());
        assert!(cache.evict(&shape.id()).is_some());
        assert!(cache.is_empty());
        assert!(cache.take_lighting_requests().is_empty());
    }
}
