//! Conversion between in-memory shapes and wire records.

use super::access::{access_to_client, access_to_server, owner_to_client, owner_to_server};
use super::records::{
    ServerAura, ServerShape, ServerShapeAccess, ServerShapeRecord, ServerTracker,
};
use super::{WireError, WireResult};
use crate::access::ShapeOwner;
use crate::attachments::{Aura, Tracker};
use crate::shapes::{
    Asset, Circle, CircularToken, Line, Polygon, Rect, Shape, ShapeCore, ShapeId, ShapeTrait,
    Text,
};
use kurbo::Point;

pub fn tracker_to_server(tracker: &Tracker) -> ServerTracker {
    ServerTracker {
        shape: tracker.shape,
        uuid: tracker.uuid,
        visible: tracker.visible,
        name: tracker.name.clone(),
        value: tracker.value,
        maxvalue: tracker.max_value,
    }
}

pub fn tracker_to_client(tracker: &ServerTracker) -> Tracker {
    Tracker {
        uuid: tracker.uuid,
        shape: tracker.shape,
        visible: tracker.visible,
        name: tracker.name.clone(),
        value: tracker.value,
        max_value: tracker.maxvalue,
    }
}

pub fn aura_to_server(aura: &Aura) -> ServerAura {
    ServerAura {
        shape: aura.shape,
        uuid: aura.uuid,
        vision_source: aura.vision_source,
        visible: aura.visible,
        name: aura.name.clone(),
        value: aura.value,
        dim: aura.dim,
        colour: aura.colour.clone(),
    }
}

pub fn aura_to_client(aura: &ServerAura) -> Aura {
    Aura {
        uuid: aura.uuid,
        shape: aura.shape,
        vision_source: aura.vision_source,
        visible: aura.visible,
        name: aura.name.clone(),
        value: aura.value,
        dim: aura.dim,
        colour: aura.colour.clone(),
    }
}

fn check_attachment(kind: &'static str, shape: ShapeId, owner: ShapeId) -> WireResult<()> {
    if shape != owner {
        return Err(WireError::ForeignAttachment { kind, shape, owner });
    }
    Ok(())
}

impl ShapeCore {
    /// Common wire fields of this shape.
    pub fn base_dict(&self) -> ServerShape {
        let defaults = access_to_server(&self.default_access);
        ServerShape {
            uuid: self.id(),
            x: self.ref_point.x,
            y: self.ref_point.y,
            angle: self.angle,
            floor: self.floor.clone(),
            layer: self.layer.clone(),
            movement_obstruction: self.movement_obstruction,
            vision_obstruction: self.vision_obstruction,
            draw_operator: self.style.draw_operator.clone(),
            trackers: self.trackers.iter().map(tracker_to_server).collect(),
            auras: self.auras.iter().map(aura_to_server).collect(),
            labels: self.labels.clone(),
            owners: self.owners.iter().map(owner_to_server).collect(),
            fill_colour: self.style.fill_colour.clone(),
            stroke_colour: self.style.stroke_colour.clone(),
            stroke_width: self.style.stroke_width,
            name: self.name.clone(),
            name_visible: self.name_visible,
            annotation: self.annotation.clone(),
            is_token: self.is_token,
            is_invisible: self.is_invisible,
            options: self.options.clone(),
            badge: self.badge,
            show_badge: self.show_badge,
            is_locked: self.is_locked,
            default_edit_access: defaults.edit_access,
            default_movement_access: defaults.movement_access,
            default_vision_access: defaults.vision_access,
            asset: self.asset,
        }
    }

    /// Overwrite every common field from `data`.
    ///
    /// The record must describe this shape, and every attachment in it must
    /// point back at this shape. Nothing is modified when validation fails.
    pub fn apply_base_dict(&mut self, data: &ServerShape) -> WireResult<()> {
        let id = self.id();
        if data.uuid != id {
            return Err(WireError::IdentityMismatch {
                expected: id,
                received: data.uuid,
            });
        }
        for tracker in &data.trackers {
            check_attachment("tracker", tracker.shape, id)?;
        }
        for aura in &data.auras {
            check_attachment("aura", aura.shape, id)?;
        }
        for owner in &data.owners {
            check_attachment("owner", owner.shape, id)?;
        }

        self.ref_point = Point::new(data.x, data.y);
        self.angle = data.angle;
        self.floor = data.floor.clone();
        self.layer = data.layer.clone();
        self.movement_obstruction = data.movement_obstruction;
        self.vision_obstruction = data.vision_obstruction;
        self.is_invisible = data.is_invisible;
        self.is_locked = data.is_locked;
        self.style.draw_operator = data.draw_operator.clone();
        self.style.fill_colour = data.fill_colour.clone();
        self.style.stroke_colour = data.stroke_colour.clone();
        self.style.stroke_width = data.stroke_width;
        self.name = data.name.clone();
        self.name_visible = data.name_visible;
        self.annotation = data.annotation.clone();
        self.is_token = data.is_token;
        self.badge = data.badge;
        self.show_badge = data.show_badge;
        self.options = data.options.clone();
        self.asset = data.asset;
        self.labels = data.labels.clone();
        self.default_access = access_to_client(&ServerShapeAccess {
            edit_access: data.default_edit_access,
            movement_access: data.default_movement_access,
            vision_access: data.default_vision_access,
        });
        self.trackers = data.trackers.iter().map(tracker_to_client).collect();
        self.auras = data.auras.iter().map(aura_to_client).collect();

        let mut owners: Vec<ShapeOwner> = Vec::with_capacity(data.owners.len());
        for owner in data.owners.iter().map(owner_to_client) {
            match owners.iter_mut().find(|o| o.user == owner.user) {
                Some(existing) => {
                    log::warn!(
                        "Shape {} lists owner {} more than once, keeping the last entry",
                        id,
                        owner.user
                    );
                    *existing = owner;
                }
                None => owners.push(owner),
            }
        }
        self.owners = owners;
        Ok(())
    }
}

impl Shape {
    /// Full wire record, tagged with the variant's type.
    pub fn as_dict(&self) -> ServerShapeRecord {
        match self {
            Shape::Circle(s) => ServerShapeRecord::Circle(s.as_dict()),
            Shape::CircularToken(s) => ServerShapeRecord::CircularToken(s.as_dict()),
            Shape::Rect(s) => ServerShapeRecord::Rect(s.as_dict()),
            Shape::Asset(s) => ServerShapeRecord::Asset(s.as_dict()),
            Shape::Line(s) => ServerShapeRecord::Line(s.as_dict()),
            Shape::Polygon(s) => ServerShapeRecord::Polygon(s.as_dict()),
            Shape::Text(s) => ServerShapeRecord::Text(s.as_dict()),
        }
    }

    /// Build the shape a received record describes.
    pub fn from_record(record: &ServerShapeRecord) -> WireResult<Shape> {
        log::debug!("Building {} shape {}", record.shape_type(), record.uuid());
        Ok(match record {
            ServerShapeRecord::Circle(r) => Shape::Circle(Circle::from_record(r)?),
            ServerShapeRecord::CircularToken(r) => {
                Shape::CircularToken(CircularToken::from_record(r)?)
            }
            ServerShapeRecord::Rect(r) => Shape::Rect(Rect::from_record(r)?),
            ServerShapeRecord::Asset(r) => Shape::Asset(Asset::from_record(r)?),
            ServerShapeRecord::Line(r) => Shape::Line(Line::from_record(r)?),
            ServerShapeRecord::Polygon(r) => Shape::Polygon(Polygon::from_record(r)?),
            ServerShapeRecord::Text(r) => Shape::Text(Text::from_record(r)?),
        })
    }

    /// Apply a received record to this shape. The record must be of the same
    /// variant and carry the same uuid.
    pub fn update_from_record(&mut self, record: &ServerShapeRecord) -> WireResult<()> {
        match (&mut *self, record) {
            (Shape::Circle(s), ServerShapeRecord::Circle(r)) => s.update_from_dict(r),
            (Shape::CircularToken(s), ServerShapeRecord::CircularToken(r)) => s.update_from_dict(r),
            (Shape::Rect(s), ServerShapeRecord::Rect(r)) => s.update_from_dict(r),
            (Shape::Asset(s), ServerShapeRecord::Asset(r)) => s.update_from_dict(r),
            (Shape::Line(s), ServerShapeRecord::Line(r)) => s.update_from_dict(r),
            (Shape::Polygon(s), ServerShapeRecord::Polygon(r)) => s.update_from_dict(r),
            (Shape::Text(s), ServerShapeRecord::Text(r)) => s.update_from_dict(r),
            (shape, record) => Err(WireError::VariantMismatch {
                expected: shape.shape_type(),
                received: record.shape_type(),
            }),
        }
    }
}
