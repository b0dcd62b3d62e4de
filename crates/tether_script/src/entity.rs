//! Script-side entity handle

use std::fmt;
use std::hash::{Hash, Hasher};

use glam::{Quat, Vec3};
use tether_core::ecs::{Component, EntityId};

use crate::{Bridge, BridgeResult, ComponentView, ScriptClass, ScriptRef, TransformComponent};

/// Handle to a native entity, as seen from a script.
///
/// Holds the raw [`EntityId`] and the bridge used to reach the engine; it
/// owns no entity state. The entity may be destroyed behind this handle at
/// any time, after which queries answer `false`/`None` and writes are
/// dropped.
///
/// Equality and hashing only look at the id.
#[derive(Clone)]
pub struct Entity {
    id: EntityId,
    bridge: Bridge,
}

impl Entity {
    pub(crate) fn new(id: EntityId, bridge: Bridge) -> Self {
        Self { id, bridge }
    }

    #[inline]
    pub fn id(&self) -> EntityId {
        self.id
    }

    #[inline]
    pub fn bridge(&self) -> &Bridge {
        &self.bridge
    }

    /// Ask the engine whether this entity currently carries `C`.
    pub fn has_component<C: Component>(&self) -> BridgeResult<bool> {
        self.bridge.has_component(self.id, C::KIND)
    }

    /// Fetch a view of component `C`, or `None` if the entity is gone or
    /// lacks it.
    ///
    /// The check happens once, here. The returned view is not kept in sync
    /// with later removals; using it afterwards is a no-op, not an error.
    pub fn get_component<C: ComponentView>(&self) -> BridgeResult<Option<C>> {
        if !self.has_component::<C>()? {
            return Ok(None);
        }
        Ok(Some(C::bind(self.clone())))
    }

    /// Shorthand for the transform's translation. One boundary round trip.
    pub fn translation(&self) -> BridgeResult<Vec3> {
        self.transform().translation()
    }

    pub fn set_translation(&self, translation: Vec3) -> BridgeResult<()> {
        self.transform().set_translation(translation)
    }

    pub fn rotation(&self) -> BridgeResult<Quat> {
        self.transform().rotation()
    }

    pub fn set_rotation(&self, rotation: Quat) -> BridgeResult<()> {
        self.transform().set_rotation(rotation)
    }

    pub fn scale(&self) -> BridgeResult<Vec3> {
        self.transform().scale()
    }

    pub fn set_scale(&self, scale: Vec3) -> BridgeResult<()> {
        self.transform().set_scale(scale)
    }

    pub fn find_entity_by_name(&self, name: &str) -> BridgeResult<Option<Entity>> {
        self.bridge.find_entity_by_name(name)
    }

    /// Resolve the script bound to this entity as a `T`.
    ///
    /// `None` if the entity has no script or its script is some other class.
    /// Resolve again each update rather than keeping the result around; a
    /// held [`ScriptRef`] keeps the object alive after its entity is gone.
    pub fn as_script<T: ScriptClass>(&self) -> BridgeResult<Option<ScriptRef<T>>> {
        let Some(instance) = self.bridge.script_instance(self.id)? else {
            return Ok(None);
        };
        Ok(instance.downcast::<T>())
    }

    // Unchecked: if the transform is missing the engine answers with
    // defaults and ignores writes.
    fn transform(&self) -> TransformComponent {
        TransformComponent::bind(self.clone())
    }
}

impl PartialEq for Entity {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Entity {}

impl Hash for Entity {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Entity").field(&self.id.raw()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Counter, FakeEngine, Other};
    use crate::{ScriptComponent, ScriptInstance};
    use std::collections::HashSet;

    #[test]
    fn equality_is_by_handle() {
        let (_engine, bridge) = FakeEngine::new();
        let (_other, other_bridge) = FakeEngine::new();
        let a = bridge.entity(EntityId::from_raw(3));
        let b = other_bridge.entity(EntityId::from_raw(3));

        assert_eq!(a, b);
        let set: HashSet<_> = [a, b].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn dead_handle_has_no_components() {
        let (engine, bridge) = FakeEngine::new();
        let id = engine.spawn_with_transform("Player");
        engine.despawn(id);

        let entity = bridge.entity(id);
        assert!(!entity.has_component::<TransformComponent>().unwrap());
        assert!(!entity.has_component::<ScriptComponent>().unwrap());
        assert!(entity.get_component::<TransformComponent>().unwrap().is_none());
    }

    #[test]
    fn sentinel_handle_has_no_components() {
        let (_engine, bridge) = FakeEngine::new();
        let entity = bridge.entity(EntityId::INVALID);
        assert!(entity.get_component::<TransformComponent>().unwrap().is_none());
    }

    #[test]
    fn get_component_requires_capability() {
        let (engine, bridge) = FakeEngine::new();
        let bare = bridge.entity(engine.spawn("Bare"));
        let placed = bridge.entity(engine.spawn_with_transform("Placed"));

        assert!(bare.get_component::<TransformComponent>().unwrap().is_none());
        assert!(placed.get_component::<TransformComponent>().unwrap().is_some());
    }

    #[test]
    fn convenience_accessors_round_trip() {
        let (engine, bridge) = FakeEngine::new();
        let entity = bridge.entity(engine.spawn_with_transform("Player"));

        let rotation = Quat::from_rotation_y(0.3);
        entity.set_translation(Vec3::new(1.5, -2.25, 3.0)).unwrap();
        entity.set_rotation(rotation).unwrap();
        entity.set_scale(Vec3::splat(2.0)).unwrap();

        assert_eq!(entity.translation().unwrap(), Vec3::new(1.5, -2.25, 3.0));
        assert_eq!(entity.rotation().unwrap(), rotation);
        assert_eq!(entity.scale().unwrap(), Vec3::splat(2.0));
    }

    #[test]
    fn as_script_matches_class() {
        let (engine, bridge) = FakeEngine::new();
        let id = engine.spawn("Counter");
        engine.bind(id, ScriptInstance::new(Counter { ticks: 4 }));
        let entity = bridge.entity(id);

        let counter = entity.as_script::<Counter>().unwrap().unwrap();
        assert_eq!(counter.with(|c| c.ticks), Some(4));
        assert!(entity.as_script::<Other>().unwrap().is_none());
    }

    #[test]
    fn as_script_without_instance_is_none() {
        let (engine, bridge) = FakeEngine::new();
        let entity = bridge.entity(engine.spawn("Plain"));
        assert!(entity.as_script::<Counter>().unwrap().is_none());
    }
}
