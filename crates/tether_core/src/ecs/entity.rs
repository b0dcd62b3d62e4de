//! Entity handle
//!
//! Entities are 4-byte handles that reference data owned by the native
//! engine. A handle carries no liveness guarantee: the entity behind it may
//! be destroyed at any time and the handle simply goes stale.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque entity handle.
///
/// `u32::MAX` is reserved as the "no entity" sentinel returned by lookups
/// that found nothing. It should never reach script code; the bridge turns
/// it into `None`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(u32);

impl EntityId {
    /// The sentinel handle meaning "no entity".
    pub const INVALID: Self = Self(u32::MAX);

    #[inline]
    pub const fn from_raw(id: u32) -> Self {
        Self(id)
    }

    /// Return the raw value passed across the boundary.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn is_invalid(self) -> bool {
        self.0 == u32::MAX
    }

    /// Turn a handle returned by the engine into an option, mapping the
    /// sentinel to `None`.
    #[inline]
    pub fn into_option(self) -> Option<Self> {
        if self.is_invalid() {
            None
        } else {
            Some(self)
        }
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::INVALID
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_invalid() {
            f.write_str("<invalid>")
        } else {
            write!(f, "{}", self.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinel_is_max_value() {
        assert_eq!(EntityId::INVALID.raw(), u32::MAX);
        assert!(EntityId::INVALID.is_invalid());
        assert!(EntityId::default().is_invalid());
    }

    #[test]
    fn sentinel_maps_to_none() {
        assert_eq!(EntityId::INVALID.into_option(), None);
        assert_eq!(EntityId::from_raw(0).into_option(), Some(EntityId::from_raw(0)));
    }

    #[test]
    fn display_hides_sentinel_value() {
        assert_eq!(EntityId::from_raw(7).to_string(), "7");
        assert_eq!(EntityId::INVALID.to_string(), "<invalid>");
    }
}
