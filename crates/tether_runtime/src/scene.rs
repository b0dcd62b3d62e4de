// scene.rs - In-memory scene answering the boundary call catalogue
//
// The scene owns every entity, its components and the script instance
// registry. Scripts never touch this directly; they go through the Bridge,
// which lands in the `NativeCalls` impl at the bottom of this file.

use std::cell::{Ref, RefCell, RefMut};
use std::collections::{BTreeMap, HashMap, HashSet};

use glam::{Quat, Vec3};
use tether_core::ecs::{ComponentKind, ComponentMeta, EntityId, BUILTIN_COMPONENTS};
use tether_script::{BridgeError, BridgeResult, NativeCalls, ScriptFieldMap, ScriptInstance};
use tether_services::{InputState, KeyCode};

/// Stored transform data.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Transform {
    pub const IDENTITY: Self = Self {
        translation: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    pub const fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Self::IDENTITY
        }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Script attachment: which class to instantiate and the field values to
/// seed it with.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScriptComponentData {
    pub class_name: String,
    pub fields: ScriptFieldMap,
}

impl ScriptComponentData {
    pub fn new(class_name: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            fields: ScriptFieldMap::new(),
        }
    }
}

#[derive(Debug, Default)]
struct EntityRecord {
    name: String,
    transform: Option<Transform>,
    script: Option<ScriptComponentData>,
    /// Field-less components registered by the host.
    markers: HashSet<ComponentKind>,
}

#[derive(Default)]
struct SceneState {
    running: bool,
    next_id: u32,
    entities: BTreeMap<EntityId, EntityRecord>,
    kinds: HashMap<ComponentKind, &'static str>,
    instances: HashMap<EntityId, ScriptInstance>,
}

/// Entity storage plus input state.
///
/// All mutation goes through `&self` so the scene can sit behind the
/// `Rc<dyn NativeCalls>` the bridge holds while the engine keeps editing it.
#[derive(Default)]
pub struct Scene {
    state: RefCell<SceneState>,
    input: RefCell<InputState>,
}

impl Scene {
    /// Create an empty scene that understands the builtin component kinds.
    pub fn new() -> Self {
        let scene = Self::default();
        for meta in BUILTIN_COMPONENTS {
            scene.register_component(*meta);
        }
        scene
    }

    pub fn register_component(&self, meta: ComponentMeta) {
        let mut state = self.state.borrow_mut();
        if let Some(prev) = state.kinds.insert(meta.kind, meta.name) {
            if prev != meta.name {
                tracing::warn!(kind = meta.kind.raw(), prev, name = meta.name, "component kind renamed");
            }
        }
    }

    /// Make the scene answer boundary calls.
    pub fn start(&self) {
        self.state.borrow_mut().running = true;
    }

    /// Stop answering boundary calls and drop every bound script instance.
    pub fn stop(&self) {
        let mut state = self.state.borrow_mut();
        state.running = false;
        state.instances.clear();
    }

    pub fn is_running(&self) -> bool {
        self.state.borrow().running
    }

    /// Create a named entity. Returns [`EntityId::INVALID`] once the handle
    /// space is exhausted; the sentinel is never handed out as a live id.
    pub fn create_entity(&self, name: &str) -> EntityId {
        let mut state = self.state.borrow_mut();
        let id = EntityId::from_raw(state.next_id);
        if id.is_invalid() {
            tracing::error!(name, "entity handles exhausted");
            return EntityId::INVALID;
        }
        state.next_id += 1;
        state.entities.insert(
            id,
            EntityRecord {
                name: name.to_string(),
                ..Default::default()
            },
        );
        tracing::debug!(%id, name, "entity created");
        id
    }

    /// Destroy an entity along with its components and script binding.
    /// Handles to it stay around and simply go stale.
    pub fn destroy_entity(&self, id: EntityId) -> bool {
        let mut state = self.state.borrow_mut();
        state.instances.remove(&id);
        let removed = state.entities.remove(&id).is_some();
        if removed {
            tracing::debug!(%id, "entity destroyed");
        }
        removed
    }

    pub fn is_entity_valid(&self, id: EntityId) -> bool {
        self.state.borrow().entities.contains_key(&id)
    }

    pub fn entity_name(&self, id: EntityId) -> Option<String> {
        self.state.borrow().entities.get(&id).map(|e| e.name.clone())
    }

    pub fn entity_count(&self) -> usize {
        self.state.borrow().entities.len()
    }

    pub fn add_transform(&self, id: EntityId, transform: Transform) -> bool {
        self.with_record(id, |record| record.transform = Some(transform))
    }

    pub fn transform(&self, id: EntityId) -> Option<Transform> {
        self.state.borrow().entities.get(&id)?.transform
    }

    pub fn add_script(&self, id: EntityId, script: ScriptComponentData) -> bool {
        self.with_record(id, |record| record.script = Some(script))
    }

    /// Whether `id` is alive and carries a script component.
    pub fn has_script(&self, id: EntityId) -> bool {
        self.state
            .borrow()
            .entities
            .get(&id)
            .is_some_and(|record| record.script.is_some())
    }

    pub fn script_component(&self, id: EntityId) -> Option<ScriptComponentData> {
        self.state.borrow().entities.get(&id)?.script.clone()
    }

    /// Attach a registered component kind that carries no data.
    pub fn add_marker(&self, id: EntityId, kind: ComponentKind) -> bool {
        self.with_record(id, |record| {
            record.markers.insert(kind);
        })
    }

    /// Remove a component. Removing the script component also unbinds the
    /// entity's script instance.
    pub fn remove_component(&self, id: EntityId, kind: ComponentKind) -> bool {
        let mut state = self.state.borrow_mut();
        let Some(record) = state.entities.get_mut(&id) else {
            return false;
        };
        let removed = match kind {
            ComponentKind::TRANSFORM => record.transform.take().is_some(),
            ComponentKind::SCRIPT => record.script.take().is_some(),
            _ => record.markers.remove(&kind),
        };
        if kind == ComponentKind::SCRIPT {
            state.instances.remove(&id);
        }
        removed
    }

    /// Entities carrying a script component, in handle order.
    pub fn scripted_entities(&self) -> Vec<EntityId> {
        self.state
            .borrow()
            .entities
            .iter()
            .filter(|(_, record)| record.script.is_some())
            .map(|(id, _)| *id)
            .collect()
    }

    /// Register the live script object for `id` so `GetScriptInstance` can
    /// find it.
    pub fn bind_instance(&self, id: EntityId, instance: ScriptInstance) -> bool {
        let mut state = self.state.borrow_mut();
        if !state.entities.contains_key(&id) {
            return false;
        }
        state.instances.insert(id, instance);
        true
    }

    pub fn unbind_instance(&self, id: EntityId) -> Option<ScriptInstance> {
        self.state.borrow_mut().instances.remove(&id)
    }

    pub fn press_key(&self, key: KeyCode) {
        self.input.borrow_mut().press(key);
    }

    pub fn release_key(&self, key: KeyCode) {
        self.input.borrow_mut().release(key);
    }

    pub fn release_all_keys(&self) {
        self.input.borrow_mut().release_all();
    }

    fn with_record(&self, id: EntityId, f: impl FnOnce(&mut EntityRecord)) -> bool {
        match self.state.borrow_mut().entities.get_mut(&id) {
            Some(record) => {
                f(record);
                true
            }
            None => false,
        }
    }

    fn running_state(&self, call: &'static str) -> BridgeResult<Ref<'_, SceneState>> {
        let state = self.state.try_borrow().map_err(|_| locked(call))?;
        if !state.running {
            return Err(BridgeError::NoSceneContext);
        }
        Ok(state)
    }

    fn running_state_mut(&self, call: &'static str) -> BridgeResult<RefMut<'_, SceneState>> {
        let state = self.state.try_borrow_mut().map_err(|_| locked(call))?;
        if !state.running {
            return Err(BridgeError::NoSceneContext);
        }
        Ok(state)
    }

    fn read_transform<T>(
        &self,
        call: &'static str,
        entity: EntityId,
        f: impl FnOnce(&Transform) -> T,
    ) -> BridgeResult<T> {
        let state = self.running_state(call)?;
        let transform = state
            .entities
            .get(&entity)
            .and_then(|record| record.transform.as_ref())
            .unwrap_or(&Transform::IDENTITY);
        Ok(f(transform))
    }

    fn write_transform(
        &self,
        call: &'static str,
        entity: EntityId,
        f: impl FnOnce(&mut Transform),
    ) -> BridgeResult<()> {
        let mut state = self.running_state_mut(call)?;
        match state
            .entities
            .get_mut(&entity)
            .and_then(|record| record.transform.as_mut())
        {
            Some(transform) => f(transform),
            None => tracing::trace!(%entity, call, "write to missing transform dropped"),
        }
        Ok(())
    }
}

fn locked(call: &'static str) -> BridgeError {
    BridgeError::Native {
        call,
        reason: "scene state is locked".to_string(),
    }
}

impl NativeCalls for Scene {
    fn entity_has_component(&self, entity: EntityId, kind: ComponentKind) -> BridgeResult<bool> {
        let state = self.running_state("Entity_HasComponent")?;
        let Some(record) = state.entities.get(&entity) else {
            return Ok(false);
        };
        if !state.kinds.contains_key(&kind) {
            return Err(BridgeError::UnregisteredComponent { kind });
        }
        Ok(match kind {
            ComponentKind::TRANSFORM => record.transform.is_some(),
            ComponentKind::SCRIPT => record.script.is_some(),
            _ => record.markers.contains(&kind),
        })
    }

    fn entity_find_by_name(&self, name: &str) -> BridgeResult<EntityId> {
        let state = self.running_state("Entity_FindEntityByName")?;
        Ok(state
            .entities
            .iter()
            .find(|(_, record)| record.name == name)
            .map(|(id, _)| *id)
            .unwrap_or(EntityId::INVALID))
    }

    fn script_instance(&self, entity: EntityId) -> BridgeResult<Option<ScriptInstance>> {
        let state = self.running_state("GetScriptInstance")?;
        Ok(state.instances.get(&entity).cloned())
    }

    fn transform_get_translation(&self, entity: EntityId) -> BridgeResult<Vec3> {
        self.read_transform("TransformComponent_GetTranslation", entity, |t| t.translation)
    }

    fn transform_set_translation(&self, entity: EntityId, translation: Vec3) -> BridgeResult<()> {
        self.write_transform("TransformComponent_SetTranslation", entity, |t| {
            t.translation = translation
        })
    }

    fn transform_get_rotation(&self, entity: EntityId) -> BridgeResult<Quat> {
        self.read_transform("TransformComponent_GetRotation", entity, |t| t.rotation)
    }

    fn transform_set_rotation(&self, entity: EntityId, rotation: Quat) -> BridgeResult<()> {
        self.write_transform("TransformComponent_SetRotation", entity, |t| t.rotation = rotation)
    }

    fn transform_get_scale(&self, entity: EntityId) -> BridgeResult<Vec3> {
        self.read_transform("TransformComponent_GetScale", entity, |t| t.scale)
    }

    fn transform_set_scale(&self, entity: EntityId, scale: Vec3) -> BridgeResult<()> {
        self.write_transform("TransformComponent_SetScale", entity, |t| t.scale = scale)
    }

    fn input_is_key_down(&self, key: KeyCode) -> BridgeResult<bool> {
        self.running_state("Input_IsKeyDown")?;
        let input = self
            .input
            .try_borrow()
            .map_err(|_| locked("Input_IsKeyDown"))?;
        Ok(input.is_key_down(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;
    use tether_script::{Bridge, ScriptComponent, TransformComponent};

    fn running_scene() -> (Rc<Scene>, Bridge) {
        let scene = Rc::new(Scene::new());
        scene.start();
        let bridge = Bridge::new(scene.clone());
        (scene, bridge)
    }

    #[test]
    fn handle_space_never_yields_the_sentinel() {
        let scene = Scene::new();
        let first = scene.create_entity("First");
        scene.state.borrow_mut().next_id = u32::MAX - 1;

        let last = scene.create_entity("Last");
        assert_eq!(last.raw(), u32::MAX - 1);

        let refused = scene.create_entity("Overflow");
        assert!(refused.is_invalid());
        assert!(!scene.is_entity_valid(refused));
        assert!(scene.create_entity("Again").is_invalid());

        assert_eq!(scene.entity_count(), 2);
        assert_eq!(scene.entity_name(first).as_deref(), Some("First"));
    }

    #[test]
    fn calls_fail_when_not_running() {
        let scene = Rc::new(Scene::new());
        let bridge = Bridge::new(scene.clone());
        let id = scene.create_entity("Player");

        let err = bridge.has_component(id, ComponentKind::TRANSFORM).unwrap_err();
        assert!(matches!(err, BridgeError::NoSceneContext));
    }

    #[test]
    fn unregistered_kind_is_a_fault() {
        let (scene, bridge) = running_scene();
        let id = scene.create_entity("Player");

        let err = bridge.has_component(id, ComponentKind::from_raw(77)).unwrap_err();
        assert!(matches!(err, BridgeError::UnregisteredComponent { .. }));

        scene.register_component(ComponentMeta {
            kind: ComponentKind::from_raw(77),
            name: "Health",
        });
        assert!(!bridge.has_component(id, ComponentKind::from_raw(77)).unwrap());
        scene.add_marker(id, ComponentKind::from_raw(77));
        assert!(bridge.has_component(id, ComponentKind::from_raw(77)).unwrap());
    }

    #[test]
    fn dead_entity_answers_false_for_any_kind() {
        let (scene, bridge) = running_scene();
        let id = scene.create_entity("Ghost");
        scene.add_transform(id, Transform::IDENTITY);
        scene.destroy_entity(id);

        for kind in [ComponentKind::TRANSFORM, ComponentKind::SCRIPT, ComponentKind::from_raw(500)] {
            assert!(!bridge.has_component(id, kind).unwrap());
        }
        assert!(!bridge.has_component(EntityId::INVALID, ComponentKind::TRANSFORM).unwrap());
    }

    #[test]
    fn find_returns_first_match() {
        let (scene, bridge) = running_scene();
        let first = scene.create_entity("Crate");
        scene.create_entity("Crate");

        let found = bridge.find_entity_by_name("Crate").unwrap().unwrap();
        assert_eq!(found.id(), first);
        assert!(bridge.find_entity_by_name("NonExistent").unwrap().is_none());
    }

    #[test]
    fn transform_round_trip_and_missing_defaults() {
        let (scene, bridge) = running_scene();
        let placed = scene.create_entity("Placed");
        scene.add_transform(placed, Transform::IDENTITY);
        let bare = bridge.entity(scene.create_entity("Bare"));

        let entity = bridge.entity(placed);
        entity.set_scale(Vec3::new(0.5, 0.25, 3.0)).unwrap();
        assert_eq!(entity.scale().unwrap(), Vec3::new(0.5, 0.25, 3.0));

        bare.set_translation(Vec3::ONE).unwrap();
        assert_eq!(bare.translation().unwrap(), Vec3::ZERO);
        assert_eq!(bare.rotation().unwrap(), Quat::IDENTITY);
        assert_eq!(bare.scale().unwrap(), Vec3::ONE);
    }

    #[test]
    fn removed_component_makes_view_inert() {
        let (scene, bridge) = running_scene();
        let id = scene.create_entity("Player");
        scene.add_transform(id, Transform::from_translation(Vec3::X));
        let transform = bridge
            .entity(id)
            .get_component::<TransformComponent>()
            .unwrap()
            .unwrap();

        assert!(scene.remove_component(id, ComponentKind::TRANSFORM));
        transform.set_translation(Vec3::Y).unwrap();
        assert_eq!(scene.transform(id), None);
        assert!(bridge.entity(id).get_component::<TransformComponent>().unwrap().is_none());
    }

    #[test]
    fn script_component_is_queryable() {
        let (scene, bridge) = running_scene();
        let id = scene.create_entity("Player");
        assert!(!bridge.entity(id).has_component::<ScriptComponent>().unwrap());

        scene.add_script(id, ScriptComponentData::new("Player"));
        assert!(bridge.entity(id).has_component::<ScriptComponent>().unwrap());
        assert_eq!(scene.scripted_entities(), vec![id]);
    }

    #[test]
    fn input_reflects_held_keys() {
        let (scene, bridge) = running_scene();
        scene.press_key(KeyCode::Q);
        assert!(bridge.is_key_down(KeyCode::Q).unwrap());
        assert!(!bridge.is_key_down(KeyCode::Unknown).unwrap());

        scene.release_all_keys();
        assert!(!bridge.is_key_down(KeyCode::Q).unwrap());
    }
}
