//! Vizij Tween Core (engine-agnostic)
//!
//! Property tweening: a target exposes typed properties through
//! [`Animatable`], an [`Animation`] interpolates bound properties from a start
//! to an end value along an [`Ease`] curve, and a per-thread [`Runtime`]
//! advances every active animation once per host tick and recycles finished
//! ones through a pool.
//!
//! Animations are usually assembled with [`AnimationBuilder`] and one of its
//! shape builders, or materialized from an [`AnimationPreset`].
//!
//! Everything here is single-threaded: targets, handles and the runtime are
//! `Rc`/`RefCell` based and not `Send`.

pub mod adapters;
pub mod animatable;
pub mod animation;
pub mod builder;
pub mod config;
pub mod easing;
pub mod error;
pub mod handle;
pub mod interp;
mod pool;
pub mod preset;
pub mod property;
pub mod runtime;
pub mod targets;
pub mod value;

pub use adapters::AdapterRegistry;
pub use animatable::{share, Animatable, Target};
pub use animation::{Animation, Callback, PlaybackState, PropertyBinding, MIN_DURATION};
pub use builder::{
    AnimationBuilder, ColorBuilder, FadeBuilder, MoveBuilder, MoveSpace, RotateBuilder,
    ScaleBuilder, ShapeBuilder, ShapedBuilder,
};
pub use config::Config;
pub use easing::{Ease, EasingFn};
pub use error::AnimatorError;
pub use handle::AnimationHandle;
pub use preset::{AnimationPreset, PresetCollection, PresetKind};
pub use property::AnimatableProperty;
pub use runtime::Runtime;
pub use targets::{RectNode, SpriteNode, TextNode, TransformNode};
pub use value::{Quat, Rgba, Value, ValueKind, Vec2, Vec3};

/// Glob-import for builder-heavy call sites.
pub mod prelude {
    pub use crate::{
        share, AnimatableProperty, Animation, AnimationBuilder, AnimationHandle, Ease, Runtime,
        ShapeBuilder, Target, Value,
    };
}
