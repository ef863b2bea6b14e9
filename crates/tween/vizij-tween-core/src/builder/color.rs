use super::{read_current, AnimationBuilder, ShapeBuilder};
use crate::handle::AnimationHandle;
use crate::property::AnimatableProperty;
use crate::value::{Rgba, Value, WHITE};

/// RGBA tween on `Color` (or `TextColor`). Defaults from the live color to white.
pub struct ColorBuilder {
    base: AnimationBuilder,
    from: Option<Rgba>,
    to: Rgba,
    text: bool,
}

impl ColorBuilder {
    pub(crate) fn new(base: AnimationBuilder) -> Self {
        Self {
            base,
            from: None,
            to: WHITE,
            text: false,
        }
    }

    pub fn from(mut self, color: Rgba) -> Self {
        self.from = Some(color);
        self
    }

    pub fn to(mut self, color: Rgba) -> Self {
        self.to = color;
        self
    }

    pub fn from_current(mut self) -> Self {
        self.from = None;
        self
    }

    /// Drive `TextColor` instead of `Color`.
    pub fn text_color(mut self) -> Self {
        self.text = true;
        self
    }
}

impl ShapeBuilder for ColorBuilder {
    fn base_mut(&mut self) -> &mut AnimationBuilder {
        &mut self.base
    }

    fn build(self) -> AnimationHandle {
        let property = if self.text {
            AnimatableProperty::TextColor
        } else {
            AnimatableProperty::Color
        };
        let target = self.base.target_ref().clone();
        let handle = self.base.build();

        let from = match self.from {
            Some(from) => Value::Color(from),
            None => match read_current(&target, property) {
                Some(current) => current,
                None => return handle,
            },
        };
        handle.set_property(property, from, Value::Color(self.to));
        handle
    }
}
