use tether_core::ecs::{ComponentKind, EntityId};
use thiserror::Error;

/// Faults on the engine side of the boundary.
///
/// Stale handles, missing components and failed downcasts are not errors;
/// they come back as `false`, `None` or a no-op. Anything in here means the
/// engine broke its contract and the current step should not continue.
#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("no scene is running")]
    NoSceneContext,

    #[error("component kind {kind} is not registered with the engine")]
    UnregisteredComponent { kind: ComponentKind },

    #[error("script instance on entity {entity} is already in use")]
    ScriptBusy { entity: EntityId },

    #[error("native call `{call}` failed: {reason}")]
    Native { call: &'static str, reason: String },
}

pub type BridgeResult<T> = Result<T, BridgeError>;
