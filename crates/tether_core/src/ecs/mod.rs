//! Handle and capability vocabulary.
//!
//! Nothing in here owns simulation data. An [`EntityId`] only names a
//! native entity and a [`ComponentKind`] only names a capability the
//! entity may carry; the engine on the other side of the boundary is
//! the source of truth for both.

mod component;
mod entity;

pub use component::{Component, ComponentKind, ComponentMeta, BUILTIN_COMPONENTS};
pub use entity::EntityId;
