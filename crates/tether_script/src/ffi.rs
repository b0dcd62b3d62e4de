//! Boundary call layer between scripts and the native engine
//!
//! Every call is synchronous and passes values by copy. The engine side
//! implements [`NativeCalls`]; scripts only ever see it through [`Bridge`].

use std::fmt;
use std::rc::Rc;

use glam::{Quat, Vec3};
use tether_core::ecs::{ComponentKind, EntityId};
use tether_services::KeyCode;

use crate::{BridgeResult, Entity, ScriptInstance};

/// The call catalogue the native engine implements.
///
/// Implementations must treat a dead or unknown `entity` as a normal
/// condition: queries answer `false`/sentinel/`None`, getters answer the
/// identity transform's value and setters do nothing. `Err` is reserved for
/// faults in the engine itself.
pub trait NativeCalls {
    /// `Entity_HasComponent`
    fn entity_has_component(&self, entity: EntityId, kind: ComponentKind) -> BridgeResult<bool>;

    /// `Entity_FindEntityByName`. Returns [`EntityId::INVALID`] when nothing
    /// matches; with several matches the engine picks one.
    fn entity_find_by_name(&self, name: &str) -> BridgeResult<EntityId>;

    /// `GetScriptInstance`
    fn script_instance(&self, entity: EntityId) -> BridgeResult<Option<ScriptInstance>>;

    fn transform_get_translation(&self, entity: EntityId) -> BridgeResult<Vec3>;
    fn transform_set_translation(&self, entity: EntityId, translation: Vec3) -> BridgeResult<()>;

    fn transform_get_rotation(&self, entity: EntityId) -> BridgeResult<Quat>;
    fn transform_set_rotation(&self, entity: EntityId, rotation: Quat) -> BridgeResult<()>;

    fn transform_get_scale(&self, entity: EntityId) -> BridgeResult<Vec3>;
    fn transform_set_scale(&self, entity: EntityId, scale: Vec3) -> BridgeResult<()>;

    /// `Input_IsKeyDown`
    fn input_is_key_down(&self, key: KeyCode) -> BridgeResult<bool>;
}

/// Script-side handle to the engine's call table.
///
/// Cheap to clone; every [`Entity`] carries one. None of the methods cache
/// anything, each one is a fresh round trip.
#[derive(Clone)]
pub struct Bridge {
    calls: Rc<dyn NativeCalls>,
}

impl Bridge {
    pub fn new(calls: Rc<dyn NativeCalls>) -> Self {
        Self { calls }
    }

    /// Wrap a raw handle. This does not check that the entity exists.
    pub fn entity(&self, id: EntityId) -> Entity {
        Entity::new(id, self.clone())
    }

    pub fn has_component(&self, entity: EntityId, kind: ComponentKind) -> BridgeResult<bool> {
        tracing::trace!(%entity, %kind, "Entity_HasComponent");
        self.calls.entity_has_component(entity, kind)
    }

    /// Look up an entity by name. The sentinel never leaves this function.
    pub fn find_entity_by_name(&self, name: &str) -> BridgeResult<Option<Entity>> {
        tracing::trace!(name, "Entity_FindEntityByName");
        let id = self.calls.entity_find_by_name(name)?;
        Ok(id.into_option().map(|id| self.entity(id)))
    }

    pub fn script_instance(&self, entity: EntityId) -> BridgeResult<Option<ScriptInstance>> {
        tracing::trace!(%entity, "GetScriptInstance");
        self.calls.script_instance(entity)
    }

    /// Round trip to the input backend.
    pub fn is_key_down(&self, key: KeyCode) -> BridgeResult<bool> {
        tracing::trace!(?key, "Input_IsKeyDown");
        self.calls.input_is_key_down(key)
    }

    pub(crate) fn transform_translation(&self, entity: EntityId) -> BridgeResult<Vec3> {
        tracing::trace!(%entity, "TransformComponent_GetTranslation");
        self.calls.transform_get_translation(entity)
    }

    pub(crate) fn set_transform_translation(&self, entity: EntityId, value: Vec3) -> BridgeResult<()> {
        tracing::trace!(%entity, ?value, "TransformComponent_SetTranslation");
        self.calls.transform_set_translation(entity, value)
    }

    pub(crate) fn transform_rotation(&self, entity: EntityId) -> BridgeResult<Quat> {
        tracing::trace!(%entity, "TransformComponent_GetRotation");
        self.calls.transform_get_rotation(entity)
    }

    pub(crate) fn set_transform_rotation(&self, entity: EntityId, value: Quat) -> BridgeResult<()> {
        tracing::trace!(%entity, ?value, "TransformComponent_SetRotation");
        self.calls.transform_set_rotation(entity, value)
    }

    pub(crate) fn transform_scale(&self, entity: EntityId) -> BridgeResult<Vec3> {
        tracing::trace!(%entity, "TransformComponent_GetScale");
        self.calls.transform_get_scale(entity)
    }

    pub(crate) fn set_transform_scale(&self, entity: EntityId, value: Vec3) -> BridgeResult<()> {
        tracing::trace!(%entity, ?value, "TransformComponent_SetScale");
        self.calls.transform_set_scale(entity, value)
    }
}

impl fmt::Debug for Bridge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bridge").finish_non_exhaustive()
    }
}
