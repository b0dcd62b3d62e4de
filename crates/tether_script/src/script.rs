//! Script lifecycle contract
//!
//! The engine owns the frame loop. For each scripted entity it creates one
//! instance, calls [`Script::on_create`] once, then [`Script::on_update`]
//! once per step until the entity is destroyed. There is no destroy
//! callback: after destruction the script is simply never called again.

use tether_core::time::Timestep;

use crate::{BridgeResult, Entity, FieldValue, ScriptField};

/// Behavior attached to one entity.
///
/// `entity` is the handle the instance is bound to. Handles resolved in
/// `on_create` may go stale later; every accessor on them already degrades
/// to `None` or a no-op, so scripts only need to check the options they get
/// back.
pub trait Script: 'static {
    fn on_create(&mut self, _entity: &Entity) -> BridgeResult<()> {
        Ok(())
    }

    fn on_update(&mut self, _entity: &Entity, _ts: Timestep) -> BridgeResult<()> {
        Ok(())
    }

    /// Read a public field by name.
    fn field(&self, _name: &str) -> Option<FieldValue> {
        None
    }

    /// Write a public field by name. The value's type has already been
    /// checked against [`ScriptClass::FIELDS`].
    fn set_field(&mut self, _name: &str, _value: FieldValue) -> bool {
        false
    }
}

/// A concrete script type the engine can instantiate by name.
pub trait ScriptClass: Script + Default {
    /// Class tag; also what `as_script` matches on.
    const NAME: &'static str;

    const FIELDS: &'static [ScriptField] = &[];
}

/// Lifecycle of one script instance.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum ScriptState {
    #[default]
    Uninitialized,
    Active,
    /// Terminal.
    Destroyed,
}

impl ScriptState {
    /// Uninitialized -> Active. Returns `true` only on that transition, so
    /// the creation callback runs exactly once.
    pub fn activate(&mut self) -> bool {
        if *self == Self::Uninitialized {
            *self = Self::Active;
            true
        } else {
            false
        }
    }

    /// Move to Destroyed. Returns `false` if already there.
    pub fn destroy(&mut self) -> bool {
        if *self == Self::Destroyed {
            false
        } else {
            *self = Self::Destroyed;
            true
        }
    }

    pub fn is_active(self) -> bool {
        self == Self::Active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn activates_once() {
        let mut state = ScriptState::default();
        assert!(state.activate());
        assert!(!state.activate());
        assert!(state.is_active());
    }

    #[test]
    fn destroyed_is_terminal() {
        let mut state = ScriptState::Active;
        assert!(state.destroy());
        assert!(!state.destroy());
        assert!(!state.activate());
        assert_eq!(state, ScriptState::Destroyed);
    }

    #[test]
    fn uninitialized_can_be_destroyed() {
        let mut state = ScriptState::Uninitialized;
        assert!(state.destroy());
        assert!(!state.is_active());
    }
}
