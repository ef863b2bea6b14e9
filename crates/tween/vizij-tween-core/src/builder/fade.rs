use super::{AnimationBuilder, ShapeBuilder};
use crate::handle::AnimationHandle;
use crate::property::AnimatableProperty;
use crate::value::Value;

/// Alpha tween. Both endpoints are clamped to [0, 1]; defaults fade in.
pub struct FadeBuilder {
    base: AnimationBuilder,
    from: f32,
    to: f32,
}

impl FadeBuilder {
    pub(crate) fn new(base: AnimationBuilder) -> Self {
        Self {
            base,
            from: 0.0,
            to: 1.0,
        }
    }

    pub fn from(mut self, alpha: f32) -> Self {
        self.from = alpha.clamp(0.0, 1.0);
        self
    }

    pub fn to(mut self, alpha: f32) -> Self {
        self.to = alpha.clamp(0.0, 1.0);
        self
    }
}

impl ShapeBuilder for FadeBuilder {
    fn base_mut(&mut self) -> &mut AnimationBuilder {
        &mut self.base
    }

    fn build(self) -> AnimationHandle {
        let handle = self.base.build();
        handle.set_property(
            AnimatableProperty::Alpha,
            Value::Float(self.from),
            Value::Float(self.to),
        );
        handle
    }
}
