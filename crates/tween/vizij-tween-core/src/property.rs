//! Semantic property kinds an animation can drive.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::value::ValueKind;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnimatableProperty {
    Position,
    LocalPosition,
    AnchoredPosition,
    Scale,
    Rotation,
    EulerAngles,
    Alpha,
    Color,
    TextColor,
}

impl AnimatableProperty {
    pub const ALL: [AnimatableProperty; 9] = [
        Self::Position,
        Self::LocalPosition,
        Self::AnchoredPosition,
        Self::Scale,
        Self::Rotation,
        Self::EulerAngles,
        Self::Alpha,
        Self::Color,
        Self::TextColor,
    ];

    /// The value kind every target is expected to report for this property.
    #[inline]
    pub fn value_kind(self) -> ValueKind {
        match self {
            Self::Position | Self::LocalPosition | Self::Scale | Self::EulerAngles => {
                ValueKind::Vec3
            }
            Self::AnchoredPosition => ValueKind::Vec2,
            Self::Rotation => ValueKind::Quat,
            Self::Alpha => ValueKind::Float,
            Self::Color | Self::TextColor => ValueKind::Color,
        }
    }

    #[inline]
    pub fn name(self) -> &'static str {
        match self {
            Self::Position => "Position",
            Self::LocalPosition => "LocalPosition",
            Self::AnchoredPosition => "AnchoredPosition",
            Self::Scale => "Scale",
            Self::Rotation => "Rotation",
            Self::EulerAngles => "EulerAngles",
            Self::Alpha => "Alpha",
            Self::Color => "Color",
            Self::TextColor => "TextColor",
        }
    }
}

impl fmt::Display for AnimatableProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
