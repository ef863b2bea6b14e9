//! Interpolation and rotation helpers.
//!
//! Continuous kinds blend component-wise, quaternions SLERP on the shortest
//! arc, and everything else steps at the midpoint.

pub mod functions;
pub mod rotation;

pub use functions::{interpolate, lerp_f32, lerp_vec2, lerp_vec3, lerp_vec4, slerp_quat};
pub use rotation::{euler_to_quat, quat_to_euler};
