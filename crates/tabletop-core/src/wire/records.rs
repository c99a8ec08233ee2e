//! Flattened wire records exchanged with the server.
//!
//! Every shape record carries the common [`ServerShape`] fields plus the
//! fields of its variant. The `type_` discriminator is the tag of
//! [`ServerShapeRecord`] and is not stored on the structs themselves.

use crate::attachments::Label;
use crate::shapes::{ShapeId, ShapeType};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Fields shared by every shape record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerShape {
    pub uuid: ShapeId,
    pub x: f64,
    pub y: f64,
    pub angle: f64,
    pub floor: String,
    pub layer: String,
    pub movement_obstruction: bool,
    pub vision_obstruction: bool,
    pub draw_operator: String,
    pub trackers: Vec<ServerTracker>,
    pub auras: Vec<ServerAura>,
    pub labels: Vec<Label>,
    pub owners: Vec<ServerShapeOwner>,
    pub fill_colour: String,
    pub stroke_colour: String,
    pub stroke_width: f64,
    pub name: String,
    pub name_visible: bool,
    pub annotation: String,
    pub is_token: bool,
    pub is_invisible: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<String>,
    pub badge: u32,
    pub show_badge: bool,
    pub is_locked: bool,
    pub default_edit_access: bool,
    pub default_movement_access: bool,
    pub default_vision_access: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerCircle {
    #[serde(flatten)]
    pub base: ServerShape,
    pub radius: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerCircularToken {
    #[serde(flatten)]
    pub circle: ServerCircle,
    pub text: String,
    pub font: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerRect {
    #[serde(flatten)]
    pub base: ServerShape,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerAsset {
    #[serde(flatten)]
    pub rect: ServerRect,
    pub src: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerLine {
    #[serde(flatten)]
    pub base: ServerShape,
    pub x2: f64,
    pub y2: f64,
    pub line_width: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerPolygon {
    #[serde(flatten)]
    pub base: ServerShape,
    /// Vertices after the first one (which is `x`/`y`), as `[x, y]` pairs.
    pub vertices: Vec<[f64; 2]>,
    pub open_polygon: bool,
    pub line_width: f64,
}

/// Text record. Its `angle` is the common base angle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerText {
    #[serde(flatten)]
    pub base: ServerShape,
    pub text: String,
    pub font: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerTracker {
    pub shape: ShapeId,
    pub uuid: Uuid,
    pub visible: bool,
    pub name: String,
    pub value: f64,
    pub maxvalue: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerAura {
    pub shape: ShapeId,
    pub uuid: Uuid,
    pub vision_source: bool,
    pub visible: bool,
    pub name: String,
    pub value: f64,
    pub dim: f64,
    pub colour: String,
}

/// Access triple as sent over the wire. All fields are always present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerShapeAccess {
    pub edit_access: bool,
    pub movement_access: bool,
    pub vision_access: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerShapeOwner {
    pub shape: ShapeId,
    pub user: String,
    #[serde(flatten)]
    pub access: ServerShapeAccess,
}

/// A complete shape record, discriminated by `type_`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type_")]
pub enum ServerShapeRecord {
    #[serde(rename = "circle")]
    Circle(ServerCircle),
    #[serde(rename = "circulartoken")]
    CircularToken(ServerCircularToken),
    #[serde(rename = "rect")]
    Rect(ServerRect),
    #[serde(rename = "assetrect")]
    Asset(ServerAsset),
    #[serde(rename = "line")]
    Line(ServerLine),
    #[serde(rename = "polygon")]
    Polygon(ServerPolygon),
    #[serde(rename = "text")]
    Text(ServerText),
}

impl ServerShapeRecord {
    pub fn shape_type(&self) -> ShapeType {
        match self {
            ServerShapeRecord::Circle(_) => ShapeType::Circle,
            ServerShapeRecord::CircularToken(_) => ShapeType::CircularToken,
            ServerShapeRecord::Rect(_) => ShapeType::Rect,
            ServerShapeRecord::Asset(_) => ShapeType::Asset,
            ServerShapeRecord::Line(_) => ShapeType::Line,
            ServerShapeRecord::Polygon(_) => ShapeType::Polygon,
            ServerShapeRecord::Text(_) => ShapeType::Text,
        }
    }

    /// The common fields of the record.
    pub fn base(&self) -> &ServerShape {
        match self {
            ServerShapeRecord::Circle(r) => &r.base,
            ServerShapeRecord::CircularToken(r) => &r.circle.base,
            ServerShapeRecord::Rect(r) => &r.base,
            ServerShapeRecord::Asset(r) => &r.rect.base,
            ServerShapeRecord::Line(r) => &r.base,
            ServerShapeRecord::Polygon(r) => &r.base,
            ServerShapeRecord::Text(r) => &r.base,
        }
    }

    pub fn uuid(&self) -> ShapeId {
        self.base().uuid
    }
}
