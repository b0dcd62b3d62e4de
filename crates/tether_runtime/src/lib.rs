//! Tether Runtime
//!
//! Engine side of the scripting boundary: an in-memory [`Scene`] that
//! answers every boundary call, the [`ScriptEngine`] that drives script
//! lifecycles from a caller-owned frame loop, and the sample gameplay
//! scripts.

pub mod engine;
pub mod scene;
pub mod scripts;

pub use engine::{ScriptEngine, ScriptEngineError};
pub use scene::{Scene, ScriptComponentData, Transform};
