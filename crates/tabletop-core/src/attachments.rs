//! Sub-entities attached to a shape: trackers, auras and labels.

use crate::shapes::ShapeId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A named value/maximum pair shown on a shape, e.g. hit points.
#[derive(Debug, Clone, PartialEq)]
pub struct Tracker {
    pub uuid: Uuid,
    /// Owning shape.
    pub shape: ShapeId,
    /// Whether players other than owners can see it.
    pub visible: bool,
    pub name: String,
    pub value: f64,
    pub max_value: f64,
}

impl Tracker {
    pub fn new(shape: ShapeId, name: impl Into<String>, value: f64, max_value: f64) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            shape,
            visible: false,
            name: name.into(),
            value,
            max_value,
        }
    }

    /// Fill ratio clamped to `0..=1`; zero when there is no maximum.
    pub fn ratio(&self) -> f64 {
        if self.max_value <= 0.0 {
            0.0
        } else {
            (self.value / self.max_value).clamp(0.0, 1.0)
        }
    }
}

/// A radius-based light or vision effect centred on a shape.
#[derive(Debug, Clone, PartialEq)]
pub struct Aura {
    pub uuid: Uuid,
    /// Owning shape.
    pub shape: ShapeId,
    /// Whether the aura reveals fog of war.
    pub vision_source: bool,
    pub visible: bool,
    pub name: String,
    /// Bright radius.
    pub value: f64,
    /// Additional dim radius beyond `value`.
    pub dim: f64,
    pub colour: String,
}

impl Aura {
    pub fn new(shape: ShapeId, name: impl Into<String>, value: f64, dim: f64) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            shape,
            vision_source: false,
            visible: false,
            name: name.into(),
            value,
            dim,
            colour: "rgba(0, 0, 0, 0)".to_string(),
        }
    }

    /// Full reach of the aura including the dim band.
    pub fn radius(&self) -> f64 {
        self.value + self.dim
    }
}

/// Free-form tag. Labels share one representation in memory and on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    pub uuid: String,
    pub user: String,
    pub category: String,
    pub name: String,
    pub visible: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracker_ratio() {
        let shape = Uuid::new_v4();
        let mut tracker = Tracker::new(shape, "hp", 15.0, 20.0);
        assert!((tracker.ratio() - 0.75).abs() < f64::EPSILON);
        tracker.value = 30.0;
        assert!((tracker.ratio() - 1.0).abs() < f64::EPSILON);
        tracker.max_value = 0.0;
        assert!(tracker.ratio().abs() < f64::EPSILON);
    }

    #[test]
    fn test_aura_radius() {
        let aura = Aura::new(Uuid::new_v4(), "torch", 20.0, 20.0);
        assert!((aura.radius() - 40.0).abs() < f64::EPSILON);
        assert!(!aura.vision_source);
    }
}
