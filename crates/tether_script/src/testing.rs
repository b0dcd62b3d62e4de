//! Minimal in-memory engine for unit tests.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use glam::{Quat, Vec3};
use tether_core::ecs::{ComponentKind, EntityId};
use tether_core::time::Timestep;
use tether_services::KeyCode;

use crate::{
    Bridge, BridgeError, BridgeResult, Entity, FieldValue, NativeCalls, Script, ScriptClass,
    ScriptField, ScriptFieldType, ScriptInstance,
};

#[derive(Default)]
struct FakeEntity {
    name: String,
    transform: Option<(Vec3, Quat, Vec3)>,
    script: Option<ScriptInstance>,
}

#[derive(Default)]
pub(crate) struct FakeEngine {
    entities: RefCell<HashMap<EntityId, FakeEntity>>,
    next_id: Cell<u32>,
    calls: RefCell<Vec<&'static str>>,
    fail_next: Cell<bool>,
}

impl FakeEngine {
    pub fn new() -> (Rc<Self>, Bridge) {
        let engine = Rc::new(Self::default());
        let bridge = Bridge::new(engine.clone());
        (engine, bridge)
    }

    pub fn spawn(&self, name: &str) -> EntityId {
        let id = EntityId::from_raw(self.next_id.get());
        self.next_id.set(self.next_id.get() + 1);
        self.entities.borrow_mut().insert(
            id,
            FakeEntity {
                name: name.to_string(),
                ..Default::default()
            },
        );
        id
    }

    pub fn spawn_with_transform(&self, name: &str) -> EntityId {
        let id = self.spawn(name);
        if let Some(entity) = self.entities.borrow_mut().get_mut(&id) {
            entity.transform = Some((Vec3::ZERO, Quat::IDENTITY, Vec3::ONE));
        }
        id
    }

    pub fn despawn(&self, id: EntityId) {
        self.entities.borrow_mut().remove(&id);
    }

    pub fn bind(&self, id: EntityId, instance: ScriptInstance) {
        if let Some(entity) = self.entities.borrow_mut().get_mut(&id) {
            entity.script = Some(instance);
        }
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.borrow().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    pub fn fail_next_call(&self) {
        self.fail_next.set(true);
    }

    fn record(&self, call: &'static str) -> BridgeResult<()> {
        self.calls.borrow_mut().push(call);
        if self.fail_next.replace(false) {
            return Err(BridgeError::Native {
                call,
                reason: "injected failure".to_string(),
            });
        }
        Ok(())
    }

    fn read<T>(&self, entity: EntityId, default: T, f: impl FnOnce(&(Vec3, Quat, Vec3)) -> T) -> T {
        self.entities
            .borrow()
            .get(&entity)
            .and_then(|e| e.transform.as_ref())
            .map_or(default, f)
    }

    fn write(&self, entity: EntityId, f: impl FnOnce(&mut (Vec3, Quat, Vec3))) {
        if let Some(transform) = self
            .entities
            .borrow_mut()
            .get_mut(&entity)
            .and_then(|e| e.transform.as_mut())
        {
            f(transform);
        }
    }
}

impl NativeCalls for FakeEngine {
    fn entity_has_component(&self, entity: EntityId, kind: ComponentKind) -> BridgeResult<bool> {
        self.record("Entity_HasComponent")?;
        let entities = self.entities.borrow();
        let Some(e) = entities.get(&entity) else {
            return Ok(false);
        };
        Ok(match kind {
            ComponentKind::TRANSFORM => e.transform.is_some(),
            ComponentKind::SCRIPT => e.script.is_some(),
            _ => return Err(BridgeError::UnregisteredComponent { kind }),
        })
    }

    fn entity_find_by_name(&self, name: &str) -> BridgeResult<EntityId> {
        self.record("Entity_FindEntityByName")?;
        let entities = self.entities.borrow();
        Ok(entities
            .iter()
            .filter(|(_, e)| e.name == name)
            .map(|(id, _)| *id)
            .min()
            .unwrap_or(EntityId::INVALID))
    }

    fn script_instance(&self, entity: EntityId) -> BridgeResult<Option<ScriptInstance>> {
        self.record("GetScriptInstance")?;
        Ok(self
            .entities
            .borrow()
            .get(&entity)
            .and_then(|e| e.script.clone()))
    }

    fn transform_get_translation(&self, entity: EntityId) -> BridgeResult<Vec3> {
        self.record("TransformComponent_GetTranslation")?;
        Ok(self.read(entity, Vec3::ZERO, |t| t.0))
    }

    fn transform_set_translation(&self, entity: EntityId, translation: Vec3) -> BridgeResult<()> {
        self.record("TransformComponent_SetTranslation")?;
        self.write(entity, |t| t.0 = translation);
        Ok(())
    }

    fn transform_get_rotation(&self, entity: EntityId) -> BridgeResult<Quat> {
        self.record("TransformComponent_GetRotation")?;
        Ok(self.read(entity, Quat::IDENTITY, |t| t.1))
    }

    fn transform_set_rotation(&self, entity: EntityId, rotation: Quat) -> BridgeResult<()> {
        self.record("TransformComponent_SetRotation")?;
        self.write(entity, |t| t.1 = rotation);
        Ok(())
    }

    fn transform_get_scale(&self, entity: EntityId) -> BridgeResult<Vec3> {
        self.record("TransformComponent_GetScale")?;
        Ok(self.read(entity, Vec3::ONE, |t| t.2))
    }

    fn transform_set_scale(&self, entity: EntityId, scale: Vec3) -> BridgeResult<()> {
        self.record("TransformComponent_SetScale")?;
        self.write(entity, |t| t.2 = scale);
        Ok(())
    }

    fn input_is_key_down(&self, _key: KeyCode) -> BridgeResult<bool> {
        self.record("Input_IsKeyDown")?;
        Ok(false)
    }
}

#[derive(Default)]
pub(crate) struct Counter {
    pub ticks: i32,
}

impl Script for Counter {
    fn on_update(&mut self, _entity: &Entity, _ts: Timestep) -> BridgeResult<()> {
        self.ticks += 1;
        Ok(())
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "ticks" => Some(FieldValue::Int(self.ticks)),
            _ => None,
        }
    }

    fn set_field(&mut self, name: &str, value: FieldValue) -> bool {
        match (name, value) {
            ("ticks", FieldValue::Int(v)) => {
                self.ticks = v;
                true
            }
            _ => false,
        }
    }
}

impl ScriptClass for Counter {
    const NAME: &'static str = "Counter";
    const FIELDS: &'static [ScriptField] = &[ScriptField::new("ticks", ScriptFieldType::Int)];
}

#[derive(Default)]
pub(crate) struct Other;

impl Script for Other {}

impl ScriptClass for Other {
    const NAME: &'static str = "Other";
}
