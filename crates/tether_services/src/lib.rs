//! Tether Services Layer
//!
//! Platform-facing state the scripting bridge queries: input devices and
//! engine settings.

pub mod input;
pub mod settings;

pub use input::{InputState, KeyCode};
pub use settings::{Settings, SettingsError};
