//! Wire representation of shapes and their sub-entities.
//!
//! Records are flat JSON objects. A shape record is dispatched on its
//! `type_` field:
//! ```text
//! { "type_": "circle", "uuid": "...", "x": 10, "y": 10, ..., "radius": 3 }
//! ```
//! A record without `type_`, or with a tag no variant answers to, is
//! rejected; it is never coerced into a default shape.

mod access;
mod convert;
mod records;

pub use access::{access_to_client, access_to_server, owner_to_client, owner_to_server};
pub use convert::{aura_to_client, aura_to_server, tracker_to_client, tracker_to_server};
pub use records::{
    ServerAsset, ServerAura, ServerCircle, ServerCircularToken, ServerLine, ServerPolygon,
    ServerRect, ServerShape, ServerShapeAccess, ServerShapeOwner, ServerShapeRecord, ServerText,
    ServerTracker,
};

use crate::shapes::{ShapeId, ShapeType};
use serde_json::Value;
use thiserror::Error;

/// Name of the discriminator field.
pub const TYPE_KEY: &str = "type_";

/// Errors raised while mapping between shapes and wire records.
#[derive(Debug, Error)]
pub enum WireError {
    #[error("Shape record has no type_ discriminator")]
    MissingType,
    #[error("Unknown shape type: {0}")]
    UnknownType(String),
    #[error("Malformed shape record: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("Record for shape {received} applied to shape {expected}")]
    IdentityMismatch { expected: ShapeId, received: ShapeId },
    #[error("Record of type {received} applied to a {expected} shape")]
    VariantMismatch {
        expected: ShapeType,
        received: ShapeType,
    },
    #[error("{kind} in record for shape {owner} belongs to shape {shape}")]
    ForeignAttachment {
        kind: &'static str,
        shape: ShapeId,
        owner: ShapeId,
    },
}

/// Result type for wire mapping.
pub type WireResult<T> = Result<T, WireError>;

impl ServerShapeRecord {
    /// Parse a record from JSON text.
    pub fn from_json(json: &str) -> WireResult<Self> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(value)
    }

    /// Parse a record from a JSON value, checking the discriminator first.
    pub fn from_value(value: Value) -> WireResult<Self> {
        let tag = match value.get(TYPE_KEY) {
            None | Some(Value::Null) => return Err(WireError::MissingType),
            Some(Value::String(tag)) => tag.clone(),
            Some(other) => return Err(WireError::UnknownType(other.to_string())),
        };
        if tag.parse::<ShapeType>().is_err() {
            return Err(WireError::UnknownType(tag));
        }
        Ok(serde_json::from_value(value)?)
    }

    pub fn to_value(&self) -> WireResult<Value> {
        Ok(serde_json::to_value(self)?)
    }

    pub fn to_json(&self) -> WireResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}
