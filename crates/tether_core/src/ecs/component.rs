// component.rs - Component kind tokens
//
// Components are identified by u32 tokens, not Rust TypeIds. The token is
// all the engine ever sees; the script side maps each component view type
// to its token at compile time through `Component::KIND`.

use std::fmt;

/// Capability token naming one component kind.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentKind(u32);

impl ComponentKind {
    pub const TRANSFORM: Self = Self(1);
    pub const SCRIPT: Self = Self(2);

    #[inline]
    pub const fn from_raw(id: u32) -> Self {
        Self(id)
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match BUILTIN_COMPONENTS.iter().find(|meta| meta.kind == *self) {
            Some(meta) => f.write_str(meta.name),
            None => write!(f, "#{}", self.0),
        }
    }
}

/// Name and token of a component kind, used by hosts to register what
/// they support.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ComponentMeta {
    pub kind: ComponentKind,
    pub name: &'static str,
}

/// Component kinds every host is expected to understand.
pub const BUILTIN_COMPONENTS: &[ComponentMeta] = &[
    ComponentMeta {
        kind: ComponentKind::TRANSFORM,
        name: "TransformComponent",
    },
    ComponentMeta {
        kind: ComponentKind::SCRIPT,
        name: "ScriptComponent",
    },
];

/// Trait for types that stand for a component kind.
pub trait Component {
    /// Token passed across the boundary.
    const KIND: ComponentKind;

    /// Human-readable name for debugging.
    const NAME: &'static str;

    fn meta() -> ComponentMeta {
        ComponentMeta {
            kind: Self::KIND,
            name: Self::NAME,
        }
    }
}

/// Helper macro to implement the Component trait.
///
/// # Example
/// ```ignore
/// struct Health { entity: Entity }
///
/// define_component!(Health, ComponentKind::from_raw(100), "Health");
/// ```
#[macro_export]
macro_rules! define_component {
    ($ty:ty, $kind:expr, $name:expr) => {
        impl $crate::ecs::Component for $ty {
            const KIND: $crate::ecs::ComponentKind = $kind;
            const NAME: &'static str = $name;
        }
    };
}
