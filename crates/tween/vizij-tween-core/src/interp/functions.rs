//! Interpolation helpers:
//! - component-wise lerp for scalars, vectors and colors (unclamped)
//! - quaternion SLERP with shortest-arc sign correction
//! - step semantics for non-continuous kinds

use crate::value::{Quat, Value, Vec2, Vec3};

/// Linear interpolation of scalars. `t` outside [0, 1] extrapolates.
#[inline]
pub fn lerp_f32(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[inline]
pub fn lerp_vec2(a: Vec2, b: Vec2, t: f32) -> Vec2 {
    [lerp_f32(a[0], b[0], t), lerp_f32(a[1], b[1], t)]
}

#[inline]
pub fn lerp_vec3(a: Vec3, b: Vec3, t: f32) -> Vec3 {
    [
        lerp_f32(a[0], b[0], t),
        lerp_f32(a[1], b[1], t),
        lerp_f32(a[2], b[2], t),
    ]
}

#[inline]
pub fn lerp_vec4(a: [f32; 4], b: [f32; 4], t: f32) -> [f32; 4] {
    [
        lerp_f32(a[0], b[0], t),
        lerp_f32(a[1], b[1], t),
        lerp_f32(a[2], b[2], t),
        lerp_f32(a[3], b[3], t),
    ]
}

#[inline]
pub(crate) fn dot4(a: [f32; 4], b: [f32; 4]) -> f32 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2] + a[3] * b[3]
}

#[inline]
pub(crate) fn normalize4(mut q: [f32; 4]) -> [f32; 4] {
    let len2 = dot4(q, q);
    if len2 > 0.0 {
        let inv_len = len2.sqrt().recip();
        q[0] *= inv_len;
        q[1] *= inv_len;
        q[2] *= inv_len;
        q[3] *= inv_len;
    }
    q
}

/// Quaternion NLERP with shortest-arc correction. Returns a normalized quaternion.
#[inline]
pub fn nlerp_quat(a: Quat, mut b: Quat, t: f32) -> Quat {
    if dot4(a, b) < 0.0 {
        b = [-b[0], -b[1], -b[2], -b[3]];
    }
    normalize4(lerp_vec4(a, b, t))
}

/// Spherical interpolation along the shortest arc.
///
/// Nearly parallel inputs fall back to NLERP to avoid dividing by a vanishing
/// `sin(θ)`. The result is always normalized.
pub fn slerp_quat(a: Quat, mut b: Quat, t: f32) -> Quat {
    let a = normalize4(a);
    b = normalize4(b);
    let mut d = dot4(a, b);
    if d < 0.0 {
        b = [-b[0], -b[1], -b[2], -b[3]];
        d = -d;
    }
    if d > 0.9995 {
        return nlerp_quat(a, b, t);
    }
    let theta0 = d.min(1.0).acos();
    let theta = theta0 * t;
    let sin0 = theta0.sin();
    let s0 = (theta0 - theta).sin() / sin0;
    let s1 = theta.sin() / sin0;
    normalize4([
        a[0] * s0 + b[0] * s1,
        a[1] * s0 + b[1] * s1,
        a[2] * s0 + b[2] * s1,
        a[3] * s0 + b[3] * s1,
    ])
}

/// Step interpolation: `a` before the midpoint, `b` from it onward.
#[inline]
pub fn step_value(a: &Value, b: &Value, t: f32) -> Value {
    if t < 0.5 {
        a.clone()
    } else {
        b.clone()
    }
}

/// Blend two values of the same kind by eased progress `t`.
///
/// Vectors and colors lerp per component, quaternions SLERP, euler angles are
/// plain `Vec3` lerp without wrap-around. Non-continuous kinds and mismatched
/// pairs step.
pub fn interpolate(a: &Value, b: &Value, t: f32) -> Value {
    let kind = a.kind();
    if kind != b.kind() || !kind.is_continuous() {
        return step_value(a, b, t);
    }
    match (a, b) {
        (Value::Float(va), Value::Float(vb)) => Value::Float(lerp_f32(*va, *vb, t)),
        (Value::Vec2(va), Value::Vec2(vb)) => Value::Vec2(lerp_vec2(*va, *vb, t)),
        (Value::Vec3(va), Value::Vec3(vb)) => Value::Vec3(lerp_vec3(*va, *vb, t)),
        (Value::Quat(qa), Value::Quat(qb)) => Value::Quat(slerp_quat(*qa, *qb, t)),
        (Value::Color(ca), Value::Color(cb)) => Value::Color(lerp_vec4(*ca, *cb, t)),
        _ => step_value(a, b, t),
    }
}
