//! Typed values written into animatable targets.
//!
//! Numeric kinds interpolate; `Bool` and `Text` are step-only and exist so
//! hosts can expose non-numeric properties without an untyped escape hatch.

use serde::{Deserialize, Serialize};

/// 2D vector (x, y).
pub type Vec2 = [f32; 2];
/// 3D vector (x, y, z). Also used for euler angles in degrees.
pub type Vec3 = [f32; 3];
/// Quaternion (x, y, z, w).
pub type Quat = [f32; 4];
/// RGBA color, channels in [0, 1] by convention.
pub type Rgba = [f32; 4];

pub const VEC3_ZERO: Vec3 = [0.0, 0.0, 0.0];
pub const VEC3_ONE: Vec3 = [1.0, 1.0, 1.0];
pub const QUAT_IDENTITY: Quat = [0.0, 0.0, 0.0, 1.0];
pub const WHITE: Rgba = [1.0, 1.0, 1.0, 1.0];

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueKind {
    Float,
    Vec2,
    Vec3,
    Quat,
    Color,
    Bool,
    Text,
}

impl ValueKind {
    /// Whether values of this kind blend continuously (as opposed to stepping).
    #[inline]
    pub fn is_continuous(self) -> bool {
        !matches!(self, ValueKind::Bool | ValueKind::Text)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "data")]
pub enum Value {
    /// Scalar float
    Float(f32),

    /// 2D vector
    Vec2(Vec2),

    /// 3D vector
    Vec3(Vec3),

    /// Quaternion (x, y, z, w)
    Quat(Quat),

    /// RGBA color
    Color(Rgba),

    /// Boolean (step)
    Bool(bool),

    /// Text / string; step-only for interpolation
    Text(String),
}

impl Value {
    /// Return the coarse kind of this value.
    #[inline]
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Float(_) => ValueKind::Float,
            Value::Vec2(_) => ValueKind::Vec2,
            Value::Vec3(_) => ValueKind::Vec3,
            Value::Quat(_) => ValueKind::Quat,
            Value::Color(_) => ValueKind::Color,
            Value::Bool(_) => ValueKind::Bool,
            Value::Text(_) => ValueKind::Text,
        }
    }

    pub fn as_float(&self) -> Option<f32> {
        match self {
            Value::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_vec2(&self) -> Option<Vec2> {
        match self {
            Value::Vec2(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_vec3(&self) -> Option<Vec3> {
        match self {
            Value::Vec3(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_quat(&self) -> Option<Quat> {
        match self {
            Value::Quat(q) => Some(*q),
            _ => None,
        }
    }

    pub fn as_color(&self) -> Option<Rgba> {
        match self {
            Value::Color(c) => Some(*c),
            _ => None,
        }
    }

    /// Read a positional value as 3 components; 2D positions get `z = 0`.
    pub fn as_position(&self) -> Option<Vec3> {
        match self {
            Value::Vec3(v) => Some(*v),
            Value::Vec2([x, y]) => Some([*x, *y, 0.0]),
            _ => None,
        }
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(v)
    }
}

impl From<Vec2> for Value {
    fn from(v: Vec2) -> Self {
        Value::Vec2(v)
    }
}

impl From<Vec3> for Value {
    fn from(v: Vec3) -> Self {
        Value::Vec3(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}
