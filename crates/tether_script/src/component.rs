//! Component capability views
//!
//! A view is an [`Entity`] plus a compile-time [`ComponentKind`] token. It
//! stores nothing; each getter is one boundary read and each setter one
//! boundary write, so avoid calling them in tight loops.
//!
//! [`ComponentKind`]: tether_core::ecs::ComponentKind

use glam::{Quat, Vec3};
use tether_core::ecs::{Component, ComponentKind};

use crate::{BridgeResult, Entity};

/// A typed view over one component kind of an entity.
pub trait ComponentView: Component + Sized {
    /// Bind a view to `entity` without checking the capability.
    /// [`Entity::get_component`] is the checked way in.
    fn bind(entity: Entity) -> Self;

    fn entity(&self) -> &Entity;
}

/// Define a component view struct with an `entity` field.
#[macro_export]
macro_rules! component_view {
    ($ty:ident, $kind:expr, $name:expr) => {
        $crate::tether_core::define_component!($ty, $kind, $name);

        impl $crate::ComponentView for $ty {
            fn bind(entity: $crate::Entity) -> Self {
                Self { entity }
            }

            fn entity(&self) -> &$crate::Entity {
                &self.entity
            }
        }
    };
}

/// Translation, rotation and scale of an entity.
#[derive(Clone, Debug)]
pub struct TransformComponent {
    entity: Entity,
}

component_view!(TransformComponent, ComponentKind::TRANSFORM, "TransformComponent");

impl TransformComponent {
    pub fn translation(&self) -> BridgeResult<Vec3> {
        self.entity.bridge().transform_translation(self.entity.id())
    }

    pub fn set_translation(&self, translation: Vec3) -> BridgeResult<()> {
        self.entity
            .bridge()
            .set_transform_translation(self.entity.id(), translation)
    }

    pub fn rotation(&self) -> BridgeResult<Quat> {
        self.entity.bridge().transform_rotation(self.entity.id())
    }

    pub fn set_rotation(&self, rotation: Quat) -> BridgeResult<()> {
        self.entity
            .bridge()
            .set_transform_rotation(self.entity.id(), rotation)
    }

    pub fn scale(&self) -> BridgeResult<Vec3> {
        self.entity.bridge().transform_scale(self.entity.id())
    }

    pub fn set_scale(&self, scale: Vec3) -> BridgeResult<()> {
        self.entity.bridge().set_transform_scale(self.entity.id(), scale)
    }
}

/// Marks an entity that has a behavior script attached. No fields.
#[derive(Clone, Debug)]
pub struct ScriptComponent {
    entity: Entity,
}

component_view!(ScriptComponent, ComponentKind::SCRIPT, "ScriptComponent");
