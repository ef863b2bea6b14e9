//! Serializable animation presets and named collections of them.
//!
//! A preset records one shape's timing, easing and endpoints; materializing
//! it replays the equivalent builder chain against a target. Presets always
//! carry explicit `from` values, so they never read the live target.
//!
//! JSON uses camelCase keys and every field may be omitted:
//!
//! ```json
//! { "name": "pop", "type": "Scale", "duration": 0.25, "fromScale": [0, 0, 0] }
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::animatable::Target;
use crate::builder::{AnimationBuilder, MoveSpace, ShapeBuilder, ShapedBuilder};
use crate::easing::Ease;
use crate::error::AnimatorError;
use crate::handle::AnimationHandle;
use crate::value::{Rgba, Vec3, VEC3_ONE, VEC3_ZERO, WHITE};

/// Shape discriminator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PresetKind {
    Fade,
    Move,
    Scale,
    Rotate,
    Color,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnimationPreset {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: PresetKind,
    pub duration: f32,
    pub delay: f32,
    pub easing_type: Ease,

    pub from_alpha: f32,
    pub to_alpha: f32,

    pub from_position: Vec3,
    pub to_position: Vec3,
    pub use_local_position: bool,
    pub use_anchored_position: bool,

    pub from_scale: Vec3,
    pub to_scale: Vec3,

    pub from_euler_angles: Vec3,
    pub to_euler_angles: Vec3,

    pub from_color: Rgba,
    pub to_color: Rgba,
    pub is_text_color: bool,
}

impl Default for AnimationPreset {
    fn default() -> Self {
        Self {
            name: String::new(),
            kind: PresetKind::Fade,
            duration: 0.5,
            delay: 0.0,
            easing_type: Ease::EaseOutQuad,
            from_alpha: 0.0,
            to_alpha: 1.0,
            from_position: VEC3_ZERO,
            to_position: VEC3_ZERO,
            use_local_position: true,
            use_anchored_position: false,
            from_scale: VEC3_ONE,
            to_scale: VEC3_ONE,
            from_euler_angles: VEC3_ZERO,
            to_euler_angles: VEC3_ZERO,
            from_color: WHITE,
            to_color: WHITE,
            is_text_color: false,
        }
    }
}

impl AnimationPreset {
    pub fn new(name: impl Into<String>, kind: PresetKind) -> Self {
        Self {
            name: name.into(),
            kind,
            ..Self::default()
        }
    }

    /// Local position wins over anchored; neither means world space.
    pub fn move_space(&self) -> MoveSpace {
        if self.use_local_position {
            MoveSpace::Local
        } else if self.use_anchored_position {
            MoveSpace::Anchored
        } else {
            MoveSpace::World
        }
    }

    /// The builder chain this preset describes, ready for further tweaks.
    pub fn to_builder(&self, target: Target) -> ShapedBuilder {
        let base = AnimationBuilder::new(target)
            .duration(self.duration)
            .delay(self.delay)
            .easing(self.easing_type);

        match self.kind {
            PresetKind::Fade => {
                ShapedBuilder::Fade(base.fade().from(self.from_alpha).to(self.to_alpha))
            }
            PresetKind::Move => ShapedBuilder::Move(
                base.movement()
                    .from(self.from_position)
                    .to(self.to_position)
                    .space(self.move_space()),
            ),
            PresetKind::Scale => {
                ShapedBuilder::Scale(base.scale().from(self.from_scale).to(self.to_scale))
            }
            PresetKind::Rotate => ShapedBuilder::Rotate(
                base.rotation()
                    .from_euler(self.from_euler_angles)
                    .to_euler(self.to_euler_angles),
            ),
            PresetKind::Color => {
                let color = base.color().from(self.from_color).to(self.to_color);
                ShapedBuilder::Color(if self.is_text_color {
                    color.text_color()
                } else {
                    color
                })
            }
        }
    }

    pub fn build(&self, target: Target) -> AnimationHandle {
        self.to_builder(target).build()
    }

    pub fn start(&self, target: Target) -> Result<AnimationHandle, AnimatorError> {
        self.to_builder(target).start()
    }
}

/// A named list of presets. Lookup is linear and the first match wins.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PresetCollection {
    pub name: String,
    pub animations: Vec<AnimationPreset>,
}

impl PresetCollection {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            animations: Vec::new(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, AnimatorError> {
        let collection: PresetCollection = serde_json::from_str(json)?;
        debug!(
            collection = %collection.name,
            presets = collection.animations.len(),
            "preset collection loaded"
        );
        Ok(collection)
    }

    pub fn to_json(&self) -> Result<String, AnimatorError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn push(&mut self, preset: AnimationPreset) {
        self.animations.push(preset);
    }

    pub fn find(&self, name: &str) -> Option<&AnimationPreset> {
        self.animations.iter().find(|p| p.name == name)
    }

    /// Look up `name`, reporting a miss as [`AnimatorError::PresetNotFound`].
    pub fn get(&self, name: &str) -> Result<&AnimationPreset, AnimatorError> {
        self.find(name).ok_or_else(|| AnimatorError::PresetNotFound {
            name: name.to_string(),
        })
    }

    /// Build the first preset, if any.
    pub fn create_first(&self, target: Target) -> Option<AnimationHandle> {
        let Some(preset) = self.animations.first() else {
            let err = AnimatorError::EmptyCollection {
                name: self.name.clone(),
            };
            warn!(error = %err, "preset lookup failed");
            return None;
        };
        Some(preset.build(target))
    }

    /// Build the preset called `name`. A miss is logged and yields `None`.
    pub fn create(&self, target: Target, name: &str) -> Option<AnimationHandle> {
        match self.get(name) {
            Ok(preset) => Some(preset.build(target)),
            Err(err) => {
                warn!(collection = %self.name, error = %err, "preset lookup failed");
                None
            }
        }
    }

    /// Build, start and register the preset called `name`.
    pub fn start(&self, target: Target, name: &str) -> Result<AnimationHandle, AnimatorError> {
        let preset = self.get(name).inspect_err(|err| {
            warn!(collection = %self.name, error = %err, "preset lookup failed");
        })?;
        preset.start(target)
    }
}
