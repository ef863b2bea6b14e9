//! Plain-data reference targets.
//!
//! These mirror the common scene-graph objects a host would adapt (a 3D
//! transform, a UI rect, a sprite, a text label) and are what the default
//! adapter registry knows how to animate. Hosts with their own object model
//! implement [`Animatable`] on their types or register an adapter instead.

use crate::animatable::Animatable;
use crate::error::AnimatorError;
use crate::interp::{euler_to_quat, quat_to_euler};
use crate::property::AnimatableProperty;
use crate::value::{Quat, Rgba, Value, Vec2, Vec3, QUAT_IDENTITY, VEC3_ONE, VEC3_ZERO, WHITE};

/// Reject values whose kind differs from the property's conventional kind.
fn expect_kind(property: AnimatableProperty, value: &Value) -> Result<(), AnimatorError> {
    let expected = property.value_kind();
    if value.kind() == expected {
        Ok(())
    } else {
        Err(AnimatorError::mismatch(property, expected, value.kind()))
    }
}

/// A transform with an optional parent offset.
///
/// `Position` is world space (`parent_origin + local_position`); writing it
/// moves the local position so the world position lands where requested.
/// `EulerAngles` is a degree view of the stored quaternion.
#[derive(Clone, Debug, PartialEq)]
pub struct TransformNode {
    pub parent_origin: Vec3,
    pub local_position: Vec3,
    pub scale: Vec3,
    pub rotation: Quat,
}

impl Default for TransformNode {
    fn default() -> Self {
        Self {
            parent_origin: VEC3_ZERO,
            local_position: VEC3_ZERO,
            scale: VEC3_ONE,
            rotation: QUAT_IDENTITY,
        }
    }
}

impl TransformNode {
    pub fn at(position: Vec3) -> Self {
        Self {
            local_position: position,
            ..Self::default()
        }
    }

    pub fn world_position(&self) -> Vec3 {
        [
            self.parent_origin[0] + self.local_position[0],
            self.parent_origin[1] + self.local_position[1],
            self.parent_origin[2] + self.local_position[2],
        ]
    }

    pub fn euler_angles(&self) -> Vec3 {
        quat_to_euler(self.rotation)
    }
}

impl Animatable for TransformNode {
    fn supports_property(&self, property: AnimatableProperty) -> bool {
        matches!(
            property,
            AnimatableProperty::Position
                | AnimatableProperty::LocalPosition
                | AnimatableProperty::Scale
                | AnimatableProperty::Rotation
                | AnimatableProperty::EulerAngles
        )
    }

    fn get_value(&self, property: AnimatableProperty) -> Result<Value, AnimatorError> {
        match property {
            AnimatableProperty::Position => Ok(Value::Vec3(self.world_position())),
            AnimatableProperty::LocalPosition => Ok(Value::Vec3(self.local_position)),
            AnimatableProperty::Scale => Ok(Value::Vec3(self.scale)),
            AnimatableProperty::Rotation => Ok(Value::Quat(self.rotation)),
            AnimatableProperty::EulerAngles => Ok(Value::Vec3(self.euler_angles())),
            _ => Err(AnimatorError::UnsupportedProperty { property }),
        }
    }

    fn set_value(&mut self, property: AnimatableProperty, value: Value) -> Result<(), AnimatorError> {
        if !self.supports_property(property) {
            return Err(AnimatorError::UnsupportedProperty { property });
        }
        expect_kind(property, &value)?;
        match (property, value) {
            (AnimatableProperty::Position, Value::Vec3(world)) => {
                self.local_position = [
                    world[0] - self.parent_origin[0],
                    world[1] - self.parent_origin[1],
                    world[2] - self.parent_origin[2],
                ];
            }
            (AnimatableProperty::LocalPosition, Value::Vec3(v)) => self.local_position = v,
            (AnimatableProperty::Scale, Value::Vec3(v)) => self.scale = v,
            (AnimatableProperty::Rotation, Value::Quat(q)) => self.rotation = q,
            (AnimatableProperty::EulerAngles, Value::Vec3(e)) => self.rotation = euler_to_quat(e),
            _ => {}
        }
        Ok(())
    }
}

/// A UI rectangle: a transform plus an anchored 2D position.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RectNode {
    pub transform: TransformNode,
    pub anchored_position: Vec2,
}

impl Animatable for RectNode {
    fn supports_property(&self, property: AnimatableProperty) -> bool {
        property == AnimatableProperty::AnchoredPosition
            || self.transform.supports_property(property)
    }

    fn get_value(&self, property: AnimatableProperty) -> Result<Value, AnimatorError> {
        match property {
            AnimatableProperty::AnchoredPosition => Ok(Value::Vec2(self.anchored_position)),
            _ => self.transform.get_value(property),
        }
    }

    fn set_value(&mut self, property: AnimatableProperty, value: Value) -> Result<(), AnimatorError> {
        match property {
            AnimatableProperty::AnchoredPosition => {
                expect_kind(property, &value)?;
                if let Value::Vec2(v) = value {
                    self.anchored_position = v;
                }
                Ok(())
            }
            _ => self.transform.set_value(property, value),
        }
    }
}

/// A tinted sprite. `Alpha` is the alpha channel of `color`.
#[derive(Clone, Debug, PartialEq)]
pub struct SpriteNode {
    pub color: Rgba,
}

impl Default for SpriteNode {
    fn default() -> Self {
        Self { color: WHITE }
    }
}

impl SpriteNode {
    pub fn alpha(&self) -> f32 {
        self.color[3]
    }
}

impl Animatable for SpriteNode {
    fn supports_property(&self, property: AnimatableProperty) -> bool {
        matches!(property, AnimatableProperty::Alpha | AnimatableProperty::Color)
    }

    fn get_value(&self, property: AnimatableProperty) -> Result<Value, AnimatorError> {
        match property {
            AnimatableProperty::Alpha => Ok(Value::Float(self.color[3])),
            AnimatableProperty::Color => Ok(Value::Color(self.color)),
            _ => Err(AnimatorError::UnsupportedProperty { property }),
        }
    }

    fn set_value(&mut self, property: AnimatableProperty, value: Value) -> Result<(), AnimatorError> {
        if !self.supports_property(property) {
            return Err(AnimatorError::UnsupportedProperty { property });
        }
        expect_kind(property, &value)?;
        match value {
            Value::Float(a) => self.color[3] = a,
            Value::Color(c) => self.color = c,
            _ => {}
        }
        Ok(())
    }
}

/// A text label. `Color` and `TextColor` address the same color; `Alpha` is
/// its alpha channel.
#[derive(Clone, Debug, PartialEq)]
pub struct TextNode {
    pub text: String,
    pub color: Rgba,
}

impl Default for TextNode {
    fn default() -> Self {
        Self {
            text: String::new(),
            color: WHITE,
        }
    }
}

impl TextNode {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn alpha(&self) -> f32 {
        self.color[3]
    }
}

impl Animatable for TextNode {
    fn supports_property(&self, property: AnimatableProperty) -> bool {
        matches!(
            property,
            AnimatableProperty::Alpha | AnimatableProperty::Color | AnimatableProperty::TextColor
        )
    }

    fn get_value(&self, property: AnimatableProperty) -> Result<Value, AnimatorError> {
        match property {
            AnimatableProperty::Alpha => Ok(Value::Float(self.color[3])),
            AnimatableProperty::Color | AnimatableProperty::TextColor => Ok(Value::Color(self.color)),
            _ => Err(AnimatorError::UnsupportedProperty { property }),
        }
    }

    fn set_value(&mut self, property: AnimatableProperty, value: Value) -> Result<(), AnimatorError> {
        if !self.supports_property(property) {
            return Err(AnimatorError::UnsupportedProperty { property });
        }
        expect_kind(property, &value)?;
        match value {
            Value::Float(a) => self.color[3] = a,
            Value::Color(c) => self.color = c,
            _ => {}
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn world_position_respects_parent() {
        let mut node = TransformNode {
            parent_origin: [10.0, 0.0, 0.0],
            ..TransformNode::default()
        };
        node.set_value(AnimatableProperty::Position, Value::Vec3([12.0, 1.0, 0.0]))
            .unwrap();
        assert_eq!(node.local_position, [2.0, 1.0, 0.0]);
        assert_eq!(
            node.get_value(AnimatableProperty::Position).unwrap(),
            Value::Vec3([12.0, 1.0, 0.0])
        );
    }

    #[test]
    fn euler_writes_go_through_rotation() {
        let mut node = TransformNode::default();
        node.set_value(AnimatableProperty::EulerAngles, Value::Vec3([0.0, 90.0, 0.0]))
            .unwrap();
        let half = std::f32::consts::FRAC_1_SQRT_2;
        assert!((node.rotation[1] - half).abs() < 1e-5);
        assert!((node.rotation[3] - half).abs() < 1e-5);
    }

    #[test]
    fn wrong_kind_and_unsupported_are_errors() {
        let mut sprite = SpriteNode::default();
        assert!(matches!(
            sprite.set_value(AnimatableProperty::Alpha, Value::Vec2([0.0, 1.0])),
            Err(AnimatorError::ValueTypeMismatch { .. })
        ));
        assert!(matches!(
            sprite.get_value(AnimatableProperty::Scale),
            Err(AnimatorError::UnsupportedProperty { .. })
        ));
        assert!(sprite.value_kind(AnimatableProperty::Position).is_err());
    }

    #[test]
    fn text_color_aliases_color() {
        let mut text = TextNode::new("hello");
        text.set_value(AnimatableProperty::TextColor, Value::Color([1.0, 0.0, 0.0, 0.5]))
            .unwrap();
        assert_eq!(
            text.get_value(AnimatableProperty::Color).unwrap(),
            Value::Color([1.0, 0.0, 0.0, 0.5])
        );
        assert_eq!(text.alpha(), 0.5);
    }

    #[test]
    fn rect_reports_vec2_for_anchored_position() {
        let rect = RectNode::default();
        assert_eq!(
            rect.value_kind(AnimatableProperty::AnchoredPosition).unwrap(),
            crate::value::ValueKind::Vec2
        );
        assert!(rect.supports_property(AnimatableProperty::Scale));
        assert!(!rect.supports_property(AnimatableProperty::Alpha));
    }
}
