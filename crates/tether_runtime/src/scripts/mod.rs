//! Sample gameplay scripts built on the bridge.

mod camera;
mod player;

pub use camera::Camera;
pub use player::Player;

use crate::ScriptEngine;

/// Register every sample script class.
pub fn register_all(engine: &mut ScriptEngine) {
    engine.register_class::<Player>();
    engine.register_class::<Camera>();
}
