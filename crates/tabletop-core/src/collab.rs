//! Narrow interfaces to collaborators that live outside the shape core.

use crate::geom::Vector;
use crate::shapes::ShapeTrait;
use peniko::Color;

/// Turns a desired movement into the movement that is actually allowed,
/// e.g. by stopping at movement-obstructing shapes.
pub trait MovementDelta {
    fn calculate_delta(&self, delta: Vector, shape: &dyn ShapeTrait) -> Vector;
}

/// Movement with no obstruction checks: the desired delta is applied as is.
#[derive(Debug, Clone, Copy, Default)]
pub struct FreeMovement;

impl MovementDelta for FreeMovement {
    fn calculate_delta(&self, delta: Vector, _shape: &dyn ShapeTrait) -> Vector {
        delta
    }
}

/// Supplies the colour used for `"fog"` fills.
pub trait FogColour {
    fn fog_colour(&self) -> Color;
}

impl FogColour for Color {
    fn fog_colour(&self) -> Color {
        *self
    }
}
