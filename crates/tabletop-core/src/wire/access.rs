//! Access and owner conversion between memory and wire.

use super::records::{ServerShapeAccess, ServerShapeOwner};
use crate::access::{ShapeAccess, ShapeOwner};

/// Rename access fields for the wire. Partial access values are resolved to
/// [`ShapeAccess`] before they get here, so every field is explicit.
pub fn access_to_server(access: &ShapeAccess) -> ServerShapeAccess {
    ServerShapeAccess {
        edit_access: access.edit,
        movement_access: access.movement,
        vision_access: access.vision,
    }
}

pub fn owner_to_server(owner: &ShapeOwner) -> ServerShapeOwner {
    ServerShapeOwner {
        user: owner.user.clone(),
        shape: owner.shape,
        access: access_to_server(&owner.access),
    }
}

pub fn access_to_client(access: &ServerShapeAccess) -> ShapeAccess {
    ShapeAccess {
        edit: access.edit_access,
        movement: access.movement_access,
        vision: access.vision_access,
    }
}

pub fn owner_to_client(owner: &ServerShapeOwner) -> ShapeOwner {
    ShapeOwner {
        user: owner.user.clone(),
        shape: owner.shape,
        access: access_to_client(&owner.access),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::PartialShapeAccess;
    use proptest::prelude::*;
    use uuid::Uuid;

    #[test]
    fn test_owner_roundtrip() {
        let owner = ShapeOwner::new("u1", Uuid::new_v4(), ShapeAccess::new(true, false, true));
        assert_eq!(owner_to_client(&owner_to_server(&owner)), owner);
    }

    #[test]
    fn test_partial_access_becomes_explicit() {
        let partial = PartialShapeAccess {
            edit: Some(true),
            ..PartialShapeAccess::default()
        };
        let wire = access_to_server(&partial.resolve());
        assert_eq!(
            wire,
            ServerShapeAccess {
                edit_access: true,
                movement_access: false,
                vision_access: false,
            }
        );
    }

    #[test]
    fn test_owner_wire_layout_is_flat() {
        let shape = Uuid::new_v4();
        let owner = ShapeOwner::new("u1", shape, ShapeAccess::new(true, false, true));
        let value = serde_json::to_value(owner_to_server(&owner)).unwrap();
        assert_eq!(value["user"], "u1");
        assert_eq!(value["shape"], shape.to_string());
        assert_eq!(value["edit_access"], true);
        assert_eq!(value["movement_access"], false);
        assert_eq!(value["vision_access"], true);
        assert!(value.get("access").is_none());
    }

    proptest! {
        #[test]
        fn access_conversion_is_a_bijection(e: bool, m: bool, v: bool) {
            let access = ShapeAccess::new(e, m, v);
            prop_assert_eq!(access_to_client(&access_to_server(&access)), access);
        }

        #[test]
        fn owner_conversion_roundtrips(user in "[a-z]{1,12}", e: bool, m: bool, v: bool) {
            let owner = ShapeOwner::new(user, Uuid::new_v4(), ShapeAccess::new(e, m, v));
            prop_assert_eq!(owner_to_client(&owner_to_server(&owner)), owner);
        }

        #[test]
        fn partial_access_resolves_absent_to_false(
            e in proptest::option::of(any::<bool>()),
            m in proptest::option::of(any::<bool>()),
            v in proptest::option::of(any::<bool>()),
        ) {
            let partial = PartialShapeAccess { edit: e, movement: m, vision: v };
            let resolved = access_to_client(&access_to_server(&partial.resolve()));
            prop_assert_eq!(resolved.edit, e.unwrap_or(false));
            prop_assert_eq!(resolved.movement, m.unwrap_or(false));
            prop_assert_eq!(resolved.vision, v.unwrap_or(false));
        }
    }
}
