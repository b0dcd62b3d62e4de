//! Script instances as handed across the boundary
//!
//! The engine keeps one [`ScriptInstance`] per scripted entity and returns a
//! clone of it from `GetScriptInstance`. The instance carries its class tag,
//! so downcasting is a tag comparison followed by a checked `Any` downcast.

use std::any::Any;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use tether_core::time::Timestep;

use crate::{BridgeError, BridgeResult, Entity, FieldValue, ScriptClass, ScriptField, Script};

/// Opaque, cheaply clonable reference to a live script object.
#[derive(Clone)]
pub struct ScriptInstance {
    class: &'static str,
    fields: &'static [ScriptField],
    object: Rc<dyn Any>,
    behavior: Rc<RefCell<dyn Script>>,
}

impl ScriptInstance {
    pub fn new<T: ScriptClass>(script: T) -> Self {
        let cell = Rc::new(RefCell::new(script));
        Self {
            class: T::NAME,
            fields: T::FIELDS,
            object: cell.clone(),
            behavior: cell,
        }
    }

    pub fn class_name(&self) -> &'static str {
        self.class
    }

    /// Public fields declared by the class.
    pub fn fields(&self) -> &'static [ScriptField] {
        self.fields
    }

    /// Typed view of the object, or `None` if it is a different class.
    pub fn downcast<T: ScriptClass>(&self) -> Option<ScriptRef<T>> {
        if self.class != T::NAME {
            return None;
        }
        self.object
            .clone()
            .downcast::<RefCell<T>>()
            .ok()
            .map(ScriptRef)
    }

    /// Whether both references point at the same object.
    pub fn same_object(&self, other: &ScriptInstance) -> bool {
        std::ptr::addr_eq(Rc::as_ptr(&self.object), Rc::as_ptr(&other.object))
    }

    pub fn invoke_on_create(&self, entity: &Entity) -> BridgeResult<()> {
        let mut script = self
            .behavior
            .try_borrow_mut()
            .map_err(|_| BridgeError::ScriptBusy { entity: entity.id() })?;
        script.on_create(entity)
    }

    pub fn invoke_on_update(&self, entity: &Entity, ts: Timestep) -> BridgeResult<()> {
        let mut script = self
            .behavior
            .try_borrow_mut()
            .map_err(|_| BridgeError::ScriptBusy { entity: entity.id() })?;
        script.on_update(entity, ts)
    }

    /// Read a public field. `None` for unknown fields or while the script is
    /// running a callback.
    pub fn field_value(&self, name: &str) -> Option<FieldValue> {
        self.behavior.try_borrow().ok()?.field(name)
    }

    /// Write a public field. Returns `false` if the field is unknown, the
    /// value has the wrong type, or the script is busy.
    pub fn set_field_value(&self, name: &str, value: FieldValue) -> bool {
        let declared = self.fields.iter().find(|field| field.name == name);
        match declared {
            Some(field) if field.ty == value.field_type() => {}
            _ => return false,
        }

        match self.behavior.try_borrow_mut() {
            Ok(mut script) => script.set_field(name, value),
            Err(_) => false,
        }
    }
}

impl fmt::Debug for ScriptInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScriptInstance")
            .field("class", &self.class)
            .finish_non_exhaustive()
    }
}

/// Strongly typed reference to another entity's script.
///
/// Access goes through closures so a borrow never outlives the call. If the
/// object is already borrowed (for example a script resolving itself from
/// inside its own update) the closure is skipped and `None` comes back.
pub struct ScriptRef<T>(Rc<RefCell<T>>);

impl<T> ScriptRef<T> {
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> Option<R> {
        let script = self.0.try_borrow().ok()?;
        Some(f(&script))
    }

    pub fn with_mut<R>(&self, f: impl FnOnce(&mut T) -> R) -> Option<R> {
        let mut script = self.0.try_borrow_mut().ok()?;
        Some(f(&mut script))
    }
}

impl<T> Clone for ScriptRef<T> {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl<T> fmt::Debug for ScriptRef<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ScriptRef").finish_non_exhaustive()
    }
}
