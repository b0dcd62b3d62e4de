//! Tether Scripting Bridge
//!
//! Script-side object model whose every read and write of simulation state
//! is forwarded to the native engine.
//!
//! ## Architecture
//!
//! - **Boundary:** [`NativeCalls`] is the fixed catalogue of synchronous,
//!   by-value calls the engine implements. [`Bridge`] is the only code that
//!   invokes it.
//! - **Handles:** [`Entity`] wraps an [`EntityId`] plus the bridge. It owns
//!   nothing and never caches liveness.
//! - **Capabilities:** component views such as [`TransformComponent`] proxy
//!   every field through the bridge, one round trip per access.
//! - **Scripts:** [`Script`] is the lifecycle contract the engine drives;
//!   [`ScriptInstance`] is the opaque object the engine hands back on
//!   reverse lookup, downcast with [`Entity::as_script`].
//!
//! Dead entities, missing components and wrong script types all degrade to
//! `false`, `None` or a no-op. Only a fault on the engine side surfaces as a
//! [`BridgeError`].

mod component;
mod entity;
mod error;
mod ffi;
mod field;
mod instance;
mod script;

#[cfg(test)]
mod testing;

pub use component::{ComponentView, ScriptComponent, TransformComponent};
pub use entity::Entity;
pub use error::{BridgeError, BridgeResult};
pub use ffi::{Bridge, NativeCalls};
pub use field::{FieldValue, ScriptField, ScriptFieldMap, ScriptFieldType};
pub use instance::{ScriptInstance, ScriptRef};
pub use script::{Script, ScriptClass, ScriptState};

pub use tether_core;
pub use tether_core::ecs::{Component, ComponentKind, EntityId};
pub use tether_core::time::Timestep;
pub use tether_services::KeyCode;
