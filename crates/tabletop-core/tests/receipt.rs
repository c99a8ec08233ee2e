//! Records received from the server are dispatched on `type_`, applied to a
//! layer, rendered and sent back unchanged.

use serde_json::json;
use tabletop_core::{
    AccessKind, FreeMovement, GridConfig, Layer, LayerError, Point, RenderCache, ServerShapeRecord,
    Shape, ShapeTrait, ShapeType, Vector, WireError,
};
use uuid::Uuid;

fn circle_json(uuid: Uuid, x: f64, y: f64, radius: f64) -> serde_json::Value {
    json!({
        "type_": "circle",
        "uuid": uuid,
        "x": x,
        "y": y,
        "angle": 0.0,
        "floor": "ground",
        "layer": "tokens",
        "movement_obstruction": false,
        "vision_obstruction": false,
        "draw_operator": "source-over",
        "trackers": [{
            "shape": uuid,
            "uuid": Uuid::new_v4(),
            "visible": true,
            "name": "hp",
            "value": 8.0,
            "maxvalue": 10.0
        }],
        "auras": [],
        "labels": [],
        "owners": [{
            "shape": uuid,
            "user": "gm",
            "edit_access": true,
            "movement_access": true,
            "vision_access": true
        }],
        "fill_colour": "#ff0000",
        "stroke_colour": "rgba(0, 0, 0, 0)",
        "stroke_width": 5.0,
        "name": "Goblin",
        "name_visible": true,
        "annotation": "",
        "is_token": true,
        "is_invisible": false,
        "badge": 1,
        "show_badge": false,
        "is_locked": false,
        "default_edit_access": false,
        "default_movement_access": false,
        "default_vision_access": true,
        "radius": radius
    })
}

#[test]
fn received_circle_is_built_rendered_and_echoed() {
    let uuid = Uuid::new_v4();
    let value = circle_json(uuid, 75.0, 125.0, 25.0);
    let record = ServerShapeRecord::from_value(value.clone()).unwrap();
    assert_eq!(record.shape_type(), ShapeType::Circle);

    let mut layer = Layer::new("tokens", "ground");
    let id = layer.apply_record(&record).unwrap();
    assert_eq!(id, uuid);

    let shape = layer.get(id).unwrap();
    let circle = shape.as_circle().unwrap();
    assert!((circle.r - 25.0).abs() < f64::EPSILON);
    assert_eq!(shape.center(), Point::new(75.0, 125.0));
    assert_eq!(shape.core().trackers().len(), 1);
    assert!(shape.core().has_access("gm", AccessKind::Edit));
    assert!(shape.core().has_access("player", AccessKind::Vision));
    assert!(!shape.core().has_access("player", AccessKind::Movement));

    // Sending the shape back reproduces the received record.
    let echoed = layer.records().remove(0).to_value().unwrap();
    assert_eq!(echoed, value);
}

#[test]
fn update_moves_existing_shape_and_dirties_render_state() {
    let uuid = Uuid::new_v4();
    let mut layer = Layer::new("tokens", "ground");
    layer
        .apply_record(&ServerShapeRecord::from_value(circle_json(uuid, 0.0, 0.0, 10.0)).unwrap())
        .unwrap();

    let mut cache = RenderCache::new();
    let viewport = kurbo::Rect::new(0.0, 0.0, 200.0, 200.0);
    assert!(cache.refresh(layer.get_mut(uuid).unwrap(), viewport));
    assert!(!cache.refresh(layer.get_mut(uuid).unwrap(), viewport));

    layer
        .apply_record(&ServerShapeRecord::from_value(circle_json(uuid, 500.0, 500.0, 10.0)).unwrap())
        .unwrap();
    assert_eq!(layer.len(), 1);
    assert!(cache.refresh(layer.get_mut(uuid).unwrap(), viewport));
    assert!(!cache.get(&uuid).unwrap().visible);
}

#[test]
fn malformed_records_are_rejected() {
    let uuid = Uuid::new_v4();

    let mut missing = circle_json(uuid, 0.0, 0.0, 10.0);
    missing.as_object_mut().unwrap().remove("type_");
    assert!(matches!(
        ServerShapeRecord::from_value(missing),
        Err(WireError::MissingType)
    ));

    let mut unknown = circle_json(uuid, 0.0, 0.0, 10.0);
    unknown["type_"] = json!("toggle");
    assert!(matches!(
        ServerShapeRecord::from_value(unknown),
        Err(WireError::UnknownType(_))
    ));

    let mut foreign = circle_json(uuid, 0.0, 0.0, 10.0);
    foreign["trackers"][0]["shape"] = json!(Uuid::new_v4());
    let record = ServerShapeRecord::from_value(foreign).unwrap();
    let mut layer = Layer::new("tokens", "ground");
    assert!(matches!(
        layer.apply_record(&record),
        Err(LayerError::Wire(WireError::ForeignAttachment { kind: "tracker", .. }))
    ));
    assert!(layer.is_empty());
}

#[test]
fn player_moves_are_checked_and_snapped() {
    let uuid = Uuid::new_v4();
    let mut value = circle_json(uuid, 63.0, 112.0, 25.0);
    value["default_movement_access"] = json!(true);
    let mut layer = Layer::new("tokens", "ground");
    layer
        .apply_record(&ServerShapeRecord::from_value(value).unwrap())
        .unwrap();

    layer
        .move_shape_as("player", uuid, Vector::new(10.0, 0.0), &FreeMovement)
        .unwrap();
    let shape: &mut Shape = layer.get_mut(uuid).unwrap();
    assert_eq!(shape.center(), Point::new(73.0, 112.0));

    shape.snap_to_grid(&GridConfig::default(), &FreeMovement);
    assert_eq!(shape.center(), Point::new(75.0, 125.0));
}
