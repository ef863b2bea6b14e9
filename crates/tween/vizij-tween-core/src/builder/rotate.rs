use super::{read_current, AnimationBuilder, ShapeBuilder};
use crate::handle::AnimationHandle;
use crate::interp::{euler_to_quat, quat_to_euler};
use crate::property::AnimatableProperty;
use crate::value::{Quat, Value, Vec3, QUAT_IDENTITY, VEC3_ZERO};

/// Rotation tween in either euler degrees or quaternions.
///
/// Each setter records both representations; the most recent setter picks
/// which one is animated (`EulerAngles` lerps per axis, `Rotation` slerps).
/// Defaults to euler mode, from the live rotation to zero.
pub struct RotateBuilder {
    base: AnimationBuilder,
    from: Option<(Vec3, Quat)>,
    to: (Vec3, Quat),
    use_euler: bool,
}

impl RotateBuilder {
    pub(crate) fn new(base: AnimationBuilder) -> Self {
        Self {
            base,
            from: None,
            to: (VEC3_ZERO, QUAT_IDENTITY),
            use_euler: true,
        }
    }

    pub fn from_euler(mut self, degrees: Vec3) -> Self {
        self.from = Some((degrees, euler_to_quat(degrees)));
        self.use_euler = true;
        self
    }

    pub fn to_euler(mut self, degrees: Vec3) -> Self {
        self.to = (degrees, euler_to_quat(degrees));
        self.use_euler = true;
        self
    }

    pub fn from_quat(mut self, rotation: Quat) -> Self {
        self.from = Some((quat_to_euler(rotation), rotation));
        self.use_euler = false;
        self
    }

    pub fn to_quat(mut self, rotation: Quat) -> Self {
        self.to = (quat_to_euler(rotation), rotation);
        self.use_euler = false;
        self
    }

    pub fn from_current(mut self) -> Self {
        self.from = None;
        self
    }
}

impl ShapeBuilder for RotateBuilder {
    fn base_mut(&mut self) -> &mut AnimationBuilder {
        &mut self.base
    }

    fn build(self) -> AnimationHandle {
        let property = if self.use_euler {
            AnimatableProperty::EulerAngles
        } else {
            AnimatableProperty::Rotation
        };
        let target = self.base.target_ref().clone();
        let handle = self.base.build();

        let from = match self.from {
            Some((euler, _)) if self.use_euler => Value::Vec3(euler),
            Some((_, quat)) => Value::Quat(quat),
            None => match read_current(&target, property) {
                Some(current) => current,
                None => return handle,
            },
        };
        let to = if self.use_euler {
            Value::Vec3(self.to.0)
        } else {
            Value::Quat(self.to.1)
        };
        handle.set_property(property, from, to);
        handle
    }
}
