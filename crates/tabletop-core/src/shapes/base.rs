//! Fields and behaviour shared by every shape variant.

use super::ShapeId;
use crate::access::{AccessKind, ShapeAccess, ShapeOwner};
use crate::attachments::{Aura, Label, Tracker};
use crate::render::RenderState;
use crate::style::ShapeStyle;
use kurbo::Point;
use uuid::Uuid;

/// Construction options accepted by every variant constructor.
#[derive(Debug, Clone, Default)]
pub struct ShapeOptions {
    pub fill_colour: Option<String>,
    pub stroke_colour: Option<String>,
    /// Reuse an existing identity instead of generating one.
    pub uuid: Option<ShapeId>,
}

/// Base entity: identity, placement, flags, style, labels, default access and
/// attached collections.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeCore {
    id: ShapeId,
    /// Anchor point. Its meaning depends on the variant.
    pub ref_point: Point,
    /// Rotation in radians.
    pub angle: f64,
    pub floor: String,
    pub layer: String,
    pub movement_obstruction: bool,
    pub vision_obstruction: bool,
    pub is_invisible: bool,
    pub is_locked: bool,
    pub style: ShapeStyle,
    pub name: String,
    pub name_visible: bool,
    pub annotation: String,
    pub is_token: bool,
    pub badge: u32,
    pub show_badge: bool,
    /// Access for users without an owner entry.
    pub default_access: ShapeAccess,
    pub labels: Vec<Label>,
    /// Raw client options blob, passed through untouched.
    pub options: Option<String>,
    /// Asset id this shape was created from.
    pub asset: Option<i64>,
    pub(crate) trackers: Vec<Tracker>,
    pub(crate) auras: Vec<Aura>,
    pub(crate) owners: Vec<ShapeOwner>,
    render: RenderState,
}

impl ShapeCore {
    pub fn new(ref_point: Point, options: ShapeOptions) -> Self {
        let mut style = ShapeStyle::default();
        if let Some(fill) = options.fill_colour {
            style.fill_colour = fill;
        }
        if let Some(stroke) = options.stroke_colour {
            style.stroke_colour = stroke;
        }
        Self {
            id: options.uuid.unwrap_or_else(Uuid::new_v4),
            ref_point,
            angle: 0.0,
            floor: String::new(),
            layer: String::new(),
            movement_obstruction: false,
            vision_obstruction: false,
            is_invisible: false,
            is_locked: false,
            style,
            name: "Unknown shape".to_string(),
            name_visible: true,
            annotation: String::new(),
            is_token: false,
            badge: 1,
            show_badge: false,
            default_access: ShapeAccess::NONE,
            labels: Vec::new(),
            options: None,
            asset: None,
            trackers: Vec::new(),
            auras: Vec::new(),
            owners: Vec::new(),
            render: RenderState::default(),
        }
    }

    /// Core with a known identity (for records received from the network).
    pub fn with_id(id: ShapeId, ref_point: Point) -> Self {
        Self::new(
            ref_point,
            ShapeOptions {
                uuid: Some(id),
                ..ShapeOptions::default()
            },
        )
    }

    pub fn id(&self) -> ShapeId {
        self.id
    }

    // --- Access ---

    pub fn default_access(&self) -> ShapeAccess {
        self.default_access
    }

    /// Effective access of `user`: their owner entry if any, else the defaults.
    pub fn access_for(&self, user: &str) -> ShapeAccess {
        self.owner(user)
            .map(|o| o.access)
            .unwrap_or(self.default_access)
    }

    pub fn has_access(&self, user: &str, kind: AccessKind) -> bool {
        self.access_for(user).allows(kind)
    }

    pub fn owners(&self) -> &[ShapeOwner] {
        &self.owners
    }

    pub fn owner(&self, user: &str) -> Option<&ShapeOwner> {
        self.owners.iter().find(|o| o.user == user)
    }

    /// Add or replace the owner entry for `owner.user`.
    pub fn set_owner(&mut self, mut owner: ShapeOwner) {
        owner.shape = self.id;
        match self.owners.iter_mut().find(|o| o.user == owner.user) {
            Some(existing) => *existing = owner,
            None => self.owners.push(owner),
        }
    }

    pub fn remove_owner(&mut self, user: &str) -> Option<ShapeOwner> {
        let index = self.owners.iter().position(|o| o.user == user)?;
        Some(self.owners.remove(index))
    }

    // --- Attachments ---

    pub fn trackers(&self) -> &[Tracker] {
        &self.trackers
    }

    pub fn add_tracker(&mut self, mut tracker: Tracker) {
        tracker.shape = self.id;
        self.trackers.push(tracker);
    }

    pub fn tracker_mut(&mut self, uuid: Uuid) -> Option<&mut Tracker> {
        self.trackers.iter_mut().find(|t| t.uuid == uuid)
    }

    pub fn remove_tracker(&mut self, uuid: Uuid) -> Option<Tracker> {
        let index = self.trackers.iter().position(|t| t.uuid == uuid)?;
        Some(self.trackers.remove(index))
    }

    /// Attach a label. A label with the same uuid is replaced.
    pub fn add_label(&mut self, label: Label) {
        match self.labels.iter_mut().find(|l| l.uuid == label.uuid) {
            Some(existing) => *existing = label,
            None => self.labels.push(label),
        }
    }

    pub fn auras(&self) -> &[Aura] {
        &self.auras
    }

    pub fn add_aura(&mut self, mut aura: Aura) {
        aura.shape = self.id;
        self.auras.push(aura);
    }

    pub fn aura_mut(&mut self, uuid: Uuid) -> Option<&mut Aura> {
        self.auras.iter_mut().find(|a| a.uuid == uuid)
    }

    pub fn remove_aura(&mut self, uuid: Uuid) -> Option<Aura> {
        let index = self.auras.iter().position(|a| a.uuid == uuid)?;
        Some(self.auras.remove(index))
    }

    // --- Render state ---

    /// Mark the shape's render state stale. Unless `skip_lighting_update` is
    /// set, lighting and vision are recomputed as well.
    pub fn invalidate(&mut self, skip_lighting_update: bool) {
        self.render.dirty = true;
        if !skip_lighting_update {
            self.render.lighting_dirty = true;
        }
    }

    /// Invalidate after a geometry change, recomputing lighting only when the
    /// shape can influence it.
    pub fn invalidate_geometry(&mut self) {
        let skip = !self.affects_lighting();
        self.invalidate(skip);
    }

    /// Whether moving or resizing this shape changes lighting or vision.
    pub fn affects_lighting(&self) -> bool {
        self.vision_obstruction || self.auras.iter().any(|a| a.vision_source || a.visible)
    }

    pub fn render_state(&self) -> RenderState {
        self.render
    }

    pub(crate) fn clear_render_state(&mut self) {
        self.render = RenderState::default();
    }
}
