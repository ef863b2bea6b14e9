//! Fluent construction of animations.
//!
//! [`AnimationBuilder`] collects target, timing, easing and callbacks. Shape
//! builders ([`FadeBuilder`], [`MoveBuilder`], [`ScaleBuilder`],
//! [`RotateBuilder`], [`ColorBuilder`]) wrap it and add one shape's bindings
//! when built.
//!
//! ```ignore
//! let handle = AnimationBuilder::new(target)
//!     .duration(0.5)
//!     .easing(Ease::EaseOutQuad)
//!     .fade()
//!     .from(0.0)
//!     .to(1.0)
//!     .start()?;
//! ```

mod color;
mod fade;
mod movement;
mod rotate;
mod scale;

use std::any::Any;
use std::rc::Rc;

use tracing::warn;

pub use color::ColorBuilder;
pub use fade::FadeBuilder;
pub use movement::{MoveBuilder, MoveSpace};
pub use rotate::RotateBuilder;
pub use scale::ScaleBuilder;

use crate::adapters::AdapterRegistry;
use crate::animatable::Target;
use crate::animation::{Animation, Callback, MIN_DURATION};
use crate::easing::{Ease, EasingFn};
use crate::error::AnimatorError;
use crate::handle::AnimationHandle;
use crate::property::AnimatableProperty;
use crate::runtime::Runtime;
use crate::value::Value;

/// Base builder: target, timing, easing and at most one callback per event.
pub struct AnimationBuilder {
    target: Target,
    duration: Option<f32>,
    delay: f32,
    easing: Option<EasingFn>,
    on_start: Option<Callback>,
    on_update: Option<Callback>,
    on_complete: Option<Callback>,
    runtime: Option<Rc<Runtime>>,
}

impl AnimationBuilder {
    pub fn new(target: Target) -> Self {
        Self {
            target,
            duration: None,
            delay: 0.0,
            easing: None,
            on_start: None,
            on_update: None,
            on_complete: None,
            runtime: None,
        }
    }

    /// Adapt `host` through the per-thread default [`AdapterRegistry`].
    pub fn for_host<H: Any>(host: &H) -> Result<Self, AnimatorError> {
        let registry = AdapterRegistry::thread_default();
        let registry = registry.borrow();
        Self::for_host_in(&registry, host)
    }

    /// Adapt `host` through `registry`.
    pub fn for_host_in<H: Any>(registry: &AdapterRegistry, host: &H) -> Result<Self, AnimatorError> {
        registry.adapter_for(host).map(Self::new)
    }

    pub fn target(mut self, target: Target) -> Self {
        self.target = target;
        self
    }

    /// Seconds; values below [`MIN_DURATION`] are raised to it.
    pub fn duration(mut self, seconds: f32) -> Self {
        self.set_duration(seconds);
        self
    }

    /// Seconds; negative values become zero.
    pub fn delay(mut self, seconds: f32) -> Self {
        self.set_delay(seconds);
        self
    }

    pub fn easing(mut self, ease: Ease) -> Self {
        self.easing = Some(ease.function());
        self
    }

    pub fn easing_fn(mut self, easing: EasingFn) -> Self {
        self.easing = Some(easing);
        self
    }

    pub fn on_start<F>(mut self, f: F) -> Self
    where
        F: FnMut(&mut Animation) + 'static,
    {
        self.on_start = Some(Box::new(f));
        self
    }

    pub fn on_update<F>(mut self, f: F) -> Self
    where
        F: FnMut(&mut Animation) + 'static,
    {
        self.on_update = Some(Box::new(f));
        self
    }

    pub fn on_complete<F>(mut self, f: F) -> Self
    where
        F: FnMut(&mut Animation) + 'static,
    {
        self.on_complete = Some(Box::new(f));
        self
    }

    /// Build into `runtime` instead of the per-thread instance.
    pub fn with_runtime(mut self, runtime: &Rc<Runtime>) -> Self {
        self.runtime = Some(runtime.clone());
        self
    }

    pub fn fade(self) -> FadeBuilder {
        FadeBuilder::new(self)
    }

    pub fn movement(self) -> MoveBuilder {
        MoveBuilder::new(self)
    }

    pub fn scale(self) -> ScaleBuilder {
        ScaleBuilder::new(self)
    }

    pub fn rotation(self) -> RotateBuilder {
        RotateBuilder::new(self)
    }

    pub fn color(self) -> ColorBuilder {
        ColorBuilder::new(self)
    }

    pub(crate) fn set_duration(&mut self, seconds: f32) {
        self.duration = Some(if seconds.is_finite() {
            seconds.max(MIN_DURATION)
        } else {
            MIN_DURATION
        });
    }

    pub(crate) fn set_delay(&mut self, seconds: f32) {
        self.delay = if seconds.is_finite() { seconds.max(0.0) } else { 0.0 };
    }

    pub(crate) fn target_ref(&self) -> &Target {
        &self.target
    }

    /// The runtime this builder will use, pinned on first call.
    pub(crate) fn resolve_runtime(&mut self) -> Rc<Runtime> {
        self.runtime.get_or_insert_with(Runtime::instance).clone()
    }

    /// Pull an initialized animation from the runtime and attach callbacks.
    /// No properties are bound.
    pub fn build(mut self) -> AnimationHandle {
        let runtime = self.resolve_runtime();
        let cfg = runtime.config();
        let duration = self.duration.unwrap_or(cfg.default_duration);
        let easing = self
            .easing
            .unwrap_or_else(|| cfg.default_easing.function());
        let handle = runtime.create_animation(self.target, duration, self.delay, easing);

        let (on_start, on_update, on_complete) = (self.on_start, self.on_update, self.on_complete);
        handle.with_mut(|anim| {
            if let Some(cb) = on_start {
                anim.on_start(cb);
            }
            if let Some(cb) = on_update {
                anim.on_update(cb);
            }
            if let Some(cb) = on_complete {
                anim.on_complete(cb);
            }
        });
        handle
    }

    /// Build, start and register an animation with no bindings (a timer).
    pub fn start(mut self) -> Result<AnimationHandle, AnimatorError> {
        let runtime = self.resolve_runtime();
        let handle = self.build();
        start_and_register(&runtime, handle)
    }
}

fn start_and_register(
    runtime: &Runtime,
    handle: AnimationHandle,
) -> Result<AnimationHandle, AnimatorError> {
    handle.start()?;
    runtime.register(&handle);
    Ok(handle)
}

/// Behaviour shared by the shape builders: timing and callbacks forward to
/// the wrapped [`AnimationBuilder`].
pub trait ShapeBuilder: Sized {
    fn base_mut(&mut self) -> &mut AnimationBuilder;

    /// Build the animation and bind this shape's properties.
    fn build(self) -> AnimationHandle;

    fn duration(mut self, seconds: f32) -> Self {
        self.base_mut().set_duration(seconds);
        self
    }

    fn delay(mut self, seconds: f32) -> Self {
        self.base_mut().set_delay(seconds);
        self
    }

    fn easing(mut self, ease: Ease) -> Self {
        self.base_mut().easing = Some(ease.function());
        self
    }

    fn easing_fn(mut self, easing: EasingFn) -> Self {
        self.base_mut().easing = Some(easing);
        self
    }

    fn on_start<F>(mut self, f: F) -> Self
    where
        F: FnMut(&mut Animation) + 'static,
    {
        self.base_mut().on_start = Some(Box::new(f));
        self
    }

    fn on_update<F>(mut self, f: F) -> Self
    where
        F: FnMut(&mut Animation) + 'static,
    {
        self.base_mut().on_update = Some(Box::new(f));
        self
    }

    fn on_complete<F>(mut self, f: F) -> Self
    where
        F: FnMut(&mut Animation) + 'static,
    {
        self.base_mut().on_complete = Some(Box::new(f));
        self
    }

    fn with_runtime(mut self, runtime: &Rc<Runtime>) -> Self {
        self.base_mut().runtime = Some(runtime.clone());
        self
    }

    /// Build, snap to the `from` values and register with the runtime.
    ///
    /// A failed start is returned as an error and nothing is registered.
    fn start(mut self) -> Result<AnimationHandle, AnimatorError> {
        let runtime = self.base_mut().resolve_runtime();
        let handle = self.build();
        start_and_register(&runtime, handle)
    }
}

/// A shape builder with its concrete type erased.
pub enum ShapedBuilder {
    Fade(FadeBuilder),
    Move(MoveBuilder),
    Scale(ScaleBuilder),
    Rotate(RotateBuilder),
    Color(ColorBuilder),
}

impl ShapeBuilder for ShapedBuilder {
    fn base_mut(&mut self) -> &mut AnimationBuilder {
        match self {
            ShapedBuilder::Fade(b) => b.base_mut(),
            ShapedBuilder::Move(b) => b.base_mut(),
            ShapedBuilder::Scale(b) => b.base_mut(),
            ShapedBuilder::Rotate(b) => b.base_mut(),
            ShapedBuilder::Color(b) => b.base_mut(),
        }
    }

    fn build(self) -> AnimationHandle {
        match self {
            ShapedBuilder::Fade(b) => b.build(),
            ShapedBuilder::Move(b) => b.build(),
            ShapedBuilder::Scale(b) => b.build(),
            ShapedBuilder::Rotate(b) => b.build(),
            ShapedBuilder::Color(b) => b.build(),
        }
    }
}

/// Read the live value of `property` for "from current" bindings.
pub(crate) fn read_current(target: &Target, property: AnimatableProperty) -> Option<Value> {
    let read = match target.try_borrow() {
        Ok(target) => target.get_value(property),
        Err(_) => Err(AnimatorError::TargetBusy),
    };
    match read {
        Ok(value) => Some(value),
        Err(err) => {
            warn!(%property, error = %err, "could not read current value; binding dropped");
            None
        }
    }
}

/// Whether the target stores `property` as a 2D vector.
pub(crate) fn reports_vec2(target: &Target, property: AnimatableProperty) -> bool {
    target
        .try_borrow()
        .ok()
        .and_then(|t| t.value_kind(property).ok())
        .is_some_and(|kind| kind == crate::value::ValueKind::Vec2)
}
