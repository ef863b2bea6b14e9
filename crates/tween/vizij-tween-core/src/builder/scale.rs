use super::{read_current, AnimationBuilder, ShapeBuilder};
use crate::handle::AnimationHandle;
use crate::property::AnimatableProperty;
use crate::value::{Value, Vec3, VEC3_ONE};

/// Scale tween. Defaults from the live scale to `(1, 1, 1)`.
pub struct ScaleBuilder {
    base: AnimationBuilder,
    from: Option<Vec3>,
    to: Vec3,
}

impl ScaleBuilder {
    pub(crate) fn new(base: AnimationBuilder) -> Self {
        Self {
            base,
            from: None,
            to: VEC3_ONE,
        }
    }

    pub fn from(mut self, scale: Vec3) -> Self {
        self.from = Some(scale);
        self
    }

    pub fn to(mut self, scale: Vec3) -> Self {
        self.to = scale;
        self
    }

    pub fn from_uniform(self, scale: f32) -> Self {
        self.from([scale; 3])
    }

    pub fn to_uniform(self, scale: f32) -> Self {
        self.to([scale; 3])
    }

    pub fn from_current(mut self) -> Self {
        self.from = None;
        self
    }
}

impl ShapeBuilder for ScaleBuilder {
    fn base_mut(&mut self) -> &mut AnimationBuilder {
        &mut self.base
    }

    fn build(self) -> AnimationHandle {
        let property = AnimatableProperty::Scale;
        let target = self.base.target_ref().clone();
        let handle = self.base.build();

        let from = match self.from {
            Some(from) => Value::Vec3(from),
            None => match read_current(&target, property) {
                Some(current) => current,
                None => return handle,
            },
        };
        handle.set_property(property, from, Value::Vec3(self.to));
        handle
    }
}
