//! Per-user permissions on shapes.
//!
//! Every shape carries default permissions that apply to users without an
//! explicit [`ShapeOwner`] entry. An owner entry replaces the defaults for its
//! user entirely.

use crate::shapes::ShapeId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Permission triple for one user on one shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ShapeAccess {
    pub edit: bool,
    pub movement: bool,
    pub vision: bool,
}

impl ShapeAccess {
    pub const NONE: Self = Self::new(false, false, false);
    pub const FULL: Self = Self::new(true, true, true);

    pub const fn new(edit: bool, movement: bool, vision: bool) -> Self {
        Self {
            edit,
            movement,
            vision,
        }
    }

    /// Whether this triple grants the given kind of access.
    pub fn allows(&self, kind: AccessKind) -> bool {
        match kind {
            AccessKind::Edit => self.edit,
            AccessKind::Movement => self.movement,
            AccessKind::Vision => self.vision,
        }
    }
}

/// Access triple whose fields may be absent, e.g. from a partial client update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PartialShapeAccess {
    pub edit: Option<bool>,
    pub movement: Option<bool>,
    pub vision: Option<bool>,
}

impl PartialShapeAccess {
    /// Resolve absent fields to `false`.
    pub fn resolve(self) -> ShapeAccess {
        ShapeAccess {
            edit: self.edit.unwrap_or(false),
            movement: self.movement.unwrap_or(false),
            vision: self.vision.unwrap_or(false),
        }
    }
}

impl From<PartialShapeAccess> for ShapeAccess {
    fn from(partial: PartialShapeAccess) -> Self {
        partial.resolve()
    }
}

/// A single permission kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccessKind {
    Edit,
    Movement,
    Vision,
}

impl AccessKind {
    pub const ALL: [AccessKind; 3] = [AccessKind::Edit, AccessKind::Movement, AccessKind::Vision];
}

impl fmt::Display for AccessKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AccessKind::Edit => "edit",
            AccessKind::Movement => "movement",
            AccessKind::Vision => "vision",
        };
        f.write_str(name)
    }
}

/// Explicit access override for one user on one shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShapeOwner {
    /// User name.
    pub user: String,
    /// Shape this entry belongs to.
    pub shape: ShapeId,
    pub access: ShapeAccess,
}

impl ShapeOwner {
    pub fn new(user: impl Into<String>, shape: ShapeId, access: ShapeAccess) -> Self {
        Self {
            user: user.into(),
            shape,
            access,
        }
    }
}
