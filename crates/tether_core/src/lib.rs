//! Tether Core
//!
//! Shared vocabulary for both sides of the scripting boundary:
//! - Entity handles and component kind tokens
//! - Fixed-rate simulation time
//! - Math types (glam re-export); every value crossing the boundary is
//!   one of these plain `Copy` types

pub mod ecs;
pub mod time;

pub use glam;

/// Engine version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
