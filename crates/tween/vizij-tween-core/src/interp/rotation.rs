//! Euler angle (degrees) <-> quaternion conversion.
//!
//! Angles follow the Y-X-Z application order used by the reference scene
//! graph: a rotation of `(x, y, z)` rotates about Z first, then X, then Y.

use crate::value::{Quat, Vec3};

/// Build a unit quaternion from euler angles in degrees.
pub fn euler_to_quat(euler: Vec3) -> Quat {
    let (sx, cx) = (euler[0].to_radians() * 0.5).sin_cos();
    let (sy, cy) = (euler[1].to_radians() * 0.5).sin_cos();
    let (sz, cz) = (euler[2].to_radians() * 0.5).sin_cos();

    [
        cy * sx * cz + sy * cx * sz,
        sy * cx * cz - cy * sx * sz,
        cy * cx * sz - sy * sx * cz,
        cy * cx * cz + sy * sx * sz,
    ]
}

/// Recover euler angles in degrees, each wrapped into `[0, 360)`.
///
/// At the ±90° X singularity Z is pinned to zero and the whole yaw goes to Y.
pub fn quat_to_euler(q: Quat) -> Vec3 {
    let q = super::functions::normalize4(q);
    let [x, y, z, w] = q;

    let m02 = 2.0 * (x * z + w * y);
    let m12 = 2.0 * (y * z - w * x);
    let m22 = 1.0 - 2.0 * (x * x + y * y);
    let m10 = 2.0 * (x * y + w * z);
    let m11 = 1.0 - 2.0 * (x * x + z * z);
    let m00 = 1.0 - 2.0 * (y * y + z * z);
    let m20 = 2.0 * (x * z - w * y);

    let sin_x = (-m12).clamp(-1.0, 1.0);
    let ex = sin_x.asin();
    let (ey, ez) = if sin_x.abs() < 0.9999 {
        (m02.atan2(m22), m10.atan2(m11))
    } else {
        ((-m20).atan2(m00), 0.0)
    };

    [wrap_degrees(ex), wrap_degrees(ey), wrap_degrees(ez)]
}

#[inline]
fn wrap_degrees(rad: f32) -> f32 {
    let deg = rad.to_degrees().rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negatives.
    if deg >= 360.0 {
        0.0
    } else {
        deg
    }
}
