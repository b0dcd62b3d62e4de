//! Script engine
//!
//! Owns the script class registry and every live script instance, and
//! drives the lifecycle from whatever loop the caller runs:
//!
//! ```ignore
//! engine.on_runtime_start()?;
//! loop {
//!     engine.on_update(time.advance_tick())?;
//! }
//! engine.on_runtime_stop();
//! ```

use std::collections::BTreeMap;
use std::rc::Rc;

use tether_core::ecs::EntityId;
use tether_core::time::Timestep;
use tether_script::{
    Bridge, BridgeError, Entity, FieldValue, ScriptClass, ScriptField, ScriptInstance, ScriptState,
};
use tether_services::settings::ScriptingSettings;
use thiserror::Error;

use crate::Scene;

#[derive(Debug, Error)]
pub enum ScriptEngineError {
    #[error("script class '{name}' is not registered")]
    UnknownClass { name: String },

    #[error("entity {entity} has no script component")]
    NoScriptComponent { entity: EntityId },

    #[error("entity {entity} already has a live script instance")]
    AlreadyCreated { entity: EntityId },

    #[error(transparent)]
    Bridge(#[from] BridgeError),
}

struct ScriptClassEntry {
    fields: &'static [ScriptField],
    create: fn() -> ScriptInstance,
}

struct ScriptSlot {
    entity: Entity,
    instance: ScriptInstance,
    state: ScriptState,
}

pub struct ScriptEngine {
    scene: Rc<Scene>,
    bridge: Bridge,
    settings: ScriptingSettings,
    classes: BTreeMap<&'static str, ScriptClassEntry>,
    // Keyed by handle so updates run in a stable order.
    scripts: BTreeMap<EntityId, ScriptSlot>,
}

impl ScriptEngine {
    pub fn new(scene: Rc<Scene>, settings: ScriptingSettings) -> Self {
        let bridge = Bridge::new(scene.clone());
        Self {
            scene,
            bridge,
            settings,
            classes: BTreeMap::new(),
            scripts: BTreeMap::new(),
        }
    }

    pub fn bridge(&self) -> &Bridge {
        &self.bridge
    }

    pub fn scene(&self) -> &Rc<Scene> {
        &self.scene
    }

    /// Make `T` instantiable by name.
    pub fn register_class<T: ScriptClass>(&mut self) {
        let entry = ScriptClassEntry {
            fields: T::FIELDS,
            create: || ScriptInstance::new(T::default()),
        };
        if self.classes.insert(T::NAME, entry).is_some() {
            tracing::warn!(class = T::NAME, "script class registered twice");
        } else {
            tracing::debug!(class = T::NAME, fields = T::FIELDS.len(), "registered script class");
        }
    }

    pub fn class_exists(&self, name: &str) -> bool {
        self.classes.contains_key(name)
    }

    pub fn class_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.classes.keys().copied()
    }

    pub fn class_fields(&self, name: &str) -> Option<&'static [ScriptField]> {
        self.classes.get(name).map(|entry| entry.fields)
    }

    /// Create a fresh, unbound instance of a registered class.
    pub fn instantiate(&self, name: &str) -> Option<ScriptInstance> {
        self.classes.get(name).map(|entry| (entry.create)())
    }

    /// Start the scene and create a script for every entity that has a
    /// script component, in handle order.
    pub fn on_runtime_start(&mut self) -> Result<(), ScriptEngineError> {
        self.scene.start();
        let entities = self.scene.scripted_entities();
        tracing::info!(scripts = entities.len(), "script runtime starting");

        for id in entities {
            match self.on_create_entity(id) {
                Ok(()) => {}
                Err(ScriptEngineError::UnknownClass { name }) if self.settings.skip_missing_classes => {
                    tracing::warn!(entity = %id, class = %name, "skipping entity with unknown script class");
                }
                Err(err) => return Err(err),
            }
        }
        Ok(())
    }

    /// Drop every instance and stop the scene.
    pub fn on_runtime_stop(&mut self) {
        for (id, mut slot) in std::mem::take(&mut self.scripts) {
            slot.state.destroy();
            self.scene.unbind_instance(id);
        }
        self.scene.stop();
        tracing::info!("script runtime stopped");
    }

    /// Instantiate the script attached to `id`, seed its fields and run its
    /// creation callback.
    pub fn on_create_entity(&mut self, id: EntityId) -> Result<(), ScriptEngineError> {
        if self.scripts.contains_key(&id) {
            return Err(ScriptEngineError::AlreadyCreated { entity: id });
        }
        let component = self
            .scene
            .script_component(id)
            .ok_or(ScriptEngineError::NoScriptComponent { entity: id })?;
        let instance = self
            .instantiate(&component.class_name)
            .ok_or_else(|| ScriptEngineError::UnknownClass {
                name: component.class_name.clone(),
            })?;

        for (name, value) in &component.fields {
            if !instance.set_field_value(name, *value) {
                tracing::warn!(
                    entity = %id,
                    class = instance.class_name(),
                    field = %name,
                    ty = %value.field_type(),
                    "field not copied: unknown name or wrong type"
                );
            }
        }

        self.scene.bind_instance(id, instance.clone());

        let mut slot = ScriptSlot {
            entity: self.bridge.entity(id),
            instance,
            state: ScriptState::default(),
        };
        if slot.state.activate() {
            tracing::debug!(entity = %id, class = slot.instance.class_name(), "on_create");
            if let Err(err) = slot.instance.invoke_on_create(&slot.entity) {
                self.scene.unbind_instance(id);
                return Err(err.into());
            }
        }
        self.scripts.insert(id, slot);
        Ok(())
    }

    /// Run one update step for every active script.
    ///
    /// Scripts whose entity has been destroyed, or has lost its script
    /// component, move to [`ScriptState::Destroyed`] and are released
    /// without a callback.
    pub fn on_update(&mut self, ts: Timestep) -> Result<(), ScriptEngineError> {
        let mut destroyed = Vec::new();

        for (id, slot) in self.scripts.iter_mut() {
            if !self.scene.has_script(*id) {
                slot.state.destroy();
                destroyed.push(*id);
                continue;
            }
            if slot.state.is_active() {
                slot.instance.invoke_on_update(&slot.entity, ts)?;
            }
        }

        for id in destroyed {
            self.scripts.remove(&id);
            self.scene.unbind_instance(id);
            tracing::debug!(entity = %id, "script released");
        }
        Ok(())
    }

    /// Lifecycle state of the script on `id`, if one is tracked.
    pub fn script_state(&self, id: EntityId) -> Option<ScriptState> {
        self.scripts.get(&id).map(|slot| slot.state)
    }

    pub fn instance(&self, id: EntityId) -> Option<&ScriptInstance> {
        self.scripts.get(&id).map(|slot| &slot.instance)
    }

    pub fn active_count(&self) -> usize {
        self.scripts.values().filter(|slot| slot.state.is_active()).count()
    }

    pub fn field_value(&self, id: EntityId, name: &str) -> Option<FieldValue> {
        self.instance(id)?.field_value(name)
    }

    pub fn set_field_value(&self, id: EntityId, name: &str, value: FieldValue) -> bool {
        self.instance(id)
            .is_some_and(|instance| instance.set_field_value(name, value))
    }
}
