//! Public script fields
//!
//! Classes declare tunable fields so the engine can seed them from scene
//! data before `on_create` and inspect them at runtime.

use std::collections::BTreeMap;
use std::fmt;

use glam::{Quat, Vec2, Vec3, Vec4};
use serde::{Deserialize, Serialize};
use tether_core::ecs::EntityId;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScriptFieldType {
    Float,
    Double,
    Bool,
    Char,
    Byte,
    Short,
    Int,
    Long,
    UByte,
    UShort,
    UInt,
    ULong,
    Vector2,
    Vector3,
    Vector4,
    Quaternion,
    Entity,
}

impl fmt::Display for ScriptFieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// A typed field value.
///
/// Serialized as `{ "type": ..., "value": ... }`.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum FieldValue {
    Float(f32),
    Double(f64),
    Bool(bool),
    Char(char),
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    UByte(u8),
    UShort(u16),
    UInt(u32),
    ULong(u64),
    Vector2(Vec2),
    Vector3(Vec3),
    Vector4(Vec4),
    Quaternion(Quat),
    Entity(EntityId),
}

impl FieldValue {
    pub fn field_type(&self) -> ScriptFieldType {
        match self {
            Self::Float(_) => ScriptFieldType::Float,
            Self::Double(_) => ScriptFieldType::Double,
            Self::Bool(_) => ScriptFieldType::Bool,
            Self::Char(_) => ScriptFieldType::Char,
            Self::Byte(_) => ScriptFieldType::Byte,
            Self::Short(_) => ScriptFieldType::Short,
            Self::Int(_) => ScriptFieldType::Int,
            Self::Long(_) => ScriptFieldType::Long,
            Self::UByte(_) => ScriptFieldType::UByte,
            Self::UShort(_) => ScriptFieldType::UShort,
            Self::UInt(_) => ScriptFieldType::UInt,
            Self::ULong(_) => ScriptFieldType::ULong,
            Self::Vector2(_) => ScriptFieldType::Vector2,
            Self::Vector3(_) => ScriptFieldType::Vector3,
            Self::Vector4(_) => ScriptFieldType::Vector4,
            Self::Quaternion(_) => ScriptFieldType::Quaternion,
            Self::Entity(_) => ScriptFieldType::Entity,
        }
    }

    pub fn as_float(&self) -> Option<f32> {
        match *self {
            Self::Float(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_vec3(&self) -> Option<Vec3> {
        match *self {
            Self::Vector3(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_entity(&self) -> Option<EntityId> {
        match *self {
            Self::Entity(id) => Some(id),
            _ => None,
        }
    }
}

/// Declaration of one public field.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ScriptField {
    pub name: &'static str,
    pub ty: ScriptFieldType,
}

impl ScriptField {
    pub const fn new(name: &'static str, ty: ScriptFieldType) -> Self {
        Self { name, ty }
    }
}

/// Serialized field values attached to an entity's script component.
pub type ScriptFieldMap = BTreeMap<String, FieldValue>;
