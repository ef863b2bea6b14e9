//! The per-instance tween state machine.
//!
//! An [`Animation`] owns its bindings, timers and observers, and holds a shared
//! reference to the target it writes into. Instances are recycled through the
//! runtime pool; [`Animation::initialize`] is the reuse boundary and leaves no
//! trace of the previous use.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use tracing::{debug, trace, warn};

use crate::animatable::{check_kind, Target};
use crate::easing::{self, EasingFn};
use crate::error::AnimatorError;
use crate::interp::interpolate;
use crate::property::AnimatableProperty;
use crate::value::{Value, ValueKind};

/// Smallest duration an animation will accept (seconds).
pub const MIN_DURATION: f32 = 0.001;

/// Lifecycle observer. Receives the animation being dispatched so it can
/// pause, stop or inspect it in place.
pub type Callback = Box<dyn FnMut(&mut Animation)>;

/// Playback state. Playing and complete are mutually exclusive by construction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PlaybackState {
    /// Freshly initialized or reset; nothing bound to the clock yet.
    #[default]
    Inert,
    Playing,
    Paused,
    Complete,
}

/// One property driven by an animation.
#[derive(Clone, Debug, PartialEq)]
pub struct PropertyBinding {
    pub property: AnimatableProperty,
    pub from: Value,
    pub to: Value,
    /// Kind reported by the target when the binding was recorded.
    pub kind: ValueKind,
}

impl PropertyBinding {
    /// Value at eased progress `t`.
    #[inline]
    pub fn sample(&self, t: f32) -> Value {
        interpolate(&self.from, &self.to, t)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Phase {
    Start,
    Update,
    Complete,
}

/// A handle request that arrived while the animation was dispatching its
/// own observers. Applied after the running observer returns.
pub(crate) enum Command {
    Start,
    Pause,
    Resume,
    Stop,
    Observe(Phase, Callback),
}

/// Per-instance state readable without borrowing the animation.
#[derive(Default)]
pub(crate) struct Shared {
    generation: Cell<u32>,
    state: Cell<PlaybackState>,
    commands: RefCell<Vec<Command>>,
}

impl Shared {
    #[inline]
    pub(crate) fn generation(&self) -> u32 {
        self.generation.get()
    }

    #[inline]
    pub(crate) fn state(&self) -> PlaybackState {
        self.state.get()
    }

    /// Playing → Paused. Pure state change, safe mid-dispatch.
    pub(crate) fn pause(&self) {
        if self.state.get() == PlaybackState::Playing {
            self.state.set(PlaybackState::Paused);
        }
    }

    /// Paused → Playing. Pure state change, safe mid-dispatch.
    pub(crate) fn resume(&self) {
        if self.state.get() == PlaybackState::Paused {
            self.state.set(PlaybackState::Playing);
        }
    }

    pub(crate) fn defer(&self, command: Command) {
        self.commands.borrow_mut().push(command);
    }

    fn take_commands(&self) -> Vec<Command> {
        std::mem::take(&mut *self.commands.borrow_mut())
    }
}

#[derive(Default)]
struct Observers {
    start: Vec<Callback>,
    update: Vec<Callback>,
    complete: Vec<Callback>,
    /// Bumped on every clear so an in-flight dispatch can tell it was reset.
    epoch: u64,
}

impl Observers {
    fn list_mut(&mut self, phase: Phase) -> &mut Vec<Callback> {
        match phase {
            Phase::Start => &mut self.start,
            Phase::Update => &mut self.update,
            Phase::Complete => &mut self.complete,
        }
    }

    fn clear(&mut self) {
        self.start.clear();
        self.update.clear();
        self.complete.clear();
        self.epoch = self.epoch.wrapping_add(1);
    }

    fn len(&self) -> usize {
        self.start.len() + self.update.len() + self.complete.len()
    }
}

pub struct Animation {
    shared: Rc<Shared>,
    target: Option<Target>,
    duration: f32,
    delay: f32,
    easing: EasingFn,
    elapsed: f32,
    delay_elapsed: f32,
    started: bool,
    bindings: Vec<PropertyBinding>,
    observers: Observers,
    dispatch_depth: u32,
    /// Reset from inside one of its own observers.
    abandoned: bool,
}

impl Default for Animation {
    fn default() -> Self {
        Self {
            shared: Rc::new(Shared::default()),
            target: None,
            duration: 1.0,
            delay: 0.0,
            easing: easing::linear,
            elapsed: 0.0,
            delay_elapsed: 0.0,
            started: false,
            bindings: Vec::new(),
            observers: Observers::default(),
            dispatch_depth: 0,
            abandoned: false,
        }
    }
}

impl fmt::Debug for Animation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Animation")
            .field("generation", &self.generation())
            .field("has_target", &self.target.is_some())
            .field("duration", &self.duration)
            .field("delay", &self.delay)
            .field("elapsed", &self.elapsed)
            .field("delay_elapsed", &self.delay_elapsed)
            .field("state", &self.state())
            .field("bindings", &self.bindings)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl Animation {
    /// An inert, untargeted instance.
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepare the instance for a new use: bind target and timing, then drop
    /// every binding, observer and timer left over from before.
    ///
    /// Non-finite or too-small durations become [`MIN_DURATION`]; negative
    /// delays become zero.
    pub fn initialize(&mut self, target: Target, duration: f32, delay: f32, easing: EasingFn) {
        self.bump_generation();
        self.reset();
        self.abandoned = false;
        self.target = Some(target);
        self.duration = clamp_duration(duration);
        self.delay = clamp_delay(delay);
        self.easing = easing;
        trace!(
            generation = self.generation(),
            duration = self.duration,
            delay = self.delay,
            "animation initialized"
        );
    }

    /// Clear bindings, timers and observers and return to [`PlaybackState::Inert`].
    /// Target and timing parameters are kept.
    ///
    /// Called from one of its own observers, the animation is also marked for
    /// recycling by the runtime unless it is started again.
    pub fn reset(&mut self) {
        self.bindings.clear();
        self.observers.clear();
        self.elapsed = 0.0;
        self.delay_elapsed = 0.0;
        self.started = false;
        self.set_state(PlaybackState::Inert);
        if self.dispatch_depth > 0 {
            self.abandoned = true;
        }
    }

    /// Reset, detach the target and invalidate outstanding handles.
    pub(crate) fn release(&mut self) {
        self.reset();
        self.shared.take_commands();
        self.abandoned = false;
        self.target = None;
        self.bump_generation();
    }

    fn bump_generation(&self) {
        let next = self.shared.generation.get().wrapping_add(1);
        self.shared.generation.set(next);
    }

    #[inline]
    fn set_state(&self, state: PlaybackState) {
        self.shared.state.set(state);
    }

    pub(crate) fn shared(&self) -> &Rc<Shared> {
        &self.shared
    }

    /// Reset by its own observer and not restarted since.
    pub(crate) fn is_abandoned(&self) -> bool {
        self.abandoned && self.state() == PlaybackState::Inert
    }

    /// Record (or overwrite) the binding for `property`.
    ///
    /// Returns `false` and logs a warning when there is no target, the target
    /// does not support the property, or either endpoint's kind differs from
    /// what the target reports.
    pub fn set_property(&mut self, property: AnimatableProperty, from: Value, to: Value) -> bool {
        let Some(target) = self.target.as_ref() else {
            warn!(%property, "animation has no target; binding dropped");
            return false;
        };
        let checked = match target.try_borrow() {
            Ok(target) => check_kind(&*target, property, &from)
                .and_then(|()| check_kind(&*target, property, &to))
                .map(|()| from.kind()),
            Err(_) => Err(AnimatorError::TargetBusy),
        };
        let kind = match checked {
            Ok(kind) => kind,
            Err(err) => {
                warn!(%property, error = %err, "binding dropped");
                return false;
            }
        };

        let binding = PropertyBinding {
            property,
            from,
            to,
            kind,
        };
        match self.bindings.iter_mut().find(|b| b.property == property) {
            Some(existing) => *existing = binding,
            None => self.bindings.push(binding),
        }
        true
    }

    /// Snap the target to every `from` value and start the clock.
    ///
    /// No-op while already playing. Either all `from` values are written or
    /// none are: on failure the properties already written are restored and
    /// the animation stays stopped.
    pub fn start(&mut self) -> Result<(), AnimatorError> {
        if self.state() == PlaybackState::Playing {
            return Ok(());
        }
        self.apply_from_values()?;
        self.elapsed = 0.0;
        self.delay_elapsed = 0.0;
        self.started = false;
        self.abandoned = false;
        self.set_state(PlaybackState::Playing);
        debug!(
            generation = self.generation(),
            bindings = self.bindings.len(),
            "animation started"
        );
        Ok(())
    }

    fn apply_from_values(&self) -> Result<(), AnimatorError> {
        if self.bindings.is_empty() {
            return Ok(());
        }
        let target = self.target.as_ref().ok_or(AnimatorError::MissingTarget)?;
        let mut target = target
            .try_borrow_mut()
            .map_err(|_| AnimatorError::TargetBusy)?;

        let mut previous = Vec::with_capacity(self.bindings.len());
        for binding in &self.bindings {
            let before = target.get_value(binding.property);
            if let Err(err) = target.set_value(binding.property, binding.from.clone()) {
                for (property, value) in previous.into_iter().rev() {
                    if let Ok(value) = value {
                        if let Err(restore_err) = target.set_value(property, value) {
                            warn!(%property, error = %restore_err, "failed to restore value");
                        }
                    }
                }
                warn!(property = %binding.property, error = %err, "start aborted");
                return Err(err);
            }
            previous.push((binding.property, before));
        }
        Ok(())
    }

    /// Advance by `dt` seconds.
    ///
    /// While a delay is pending only the delay timer moves; the tick that
    /// exhausts it writes nothing. The first tick after that fires the start
    /// observers. The completing tick writes every `to` value exactly.
    pub fn update(&mut self, dt: f32) {
        self.apply_commands();
        if self.state() != PlaybackState::Playing {
            return;
        }
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };

        if self.delay_elapsed < self.delay {
            self.delay_elapsed += dt;
            return;
        }

        if !self.started {
            self.started = true;
            self.emit(Phase::Start);
            if self.state() != PlaybackState::Playing {
                return;
            }
        }

        self.elapsed += dt;
        let finished = self.elapsed >= self.duration;
        if finished {
            self.write_values(None);
        } else {
            let normalized = (self.elapsed / self.duration).clamp(0.0, 1.0);
            self.write_values(Some((self.easing)(normalized)));
        }

        self.emit(Phase::Update);
        if self.state() != PlaybackState::Playing {
            return;
        }

        if finished {
            self.set_state(PlaybackState::Complete);
            debug!(generation = self.generation(), "animation complete");
            self.emit(Phase::Complete);
        }
    }

    /// Write interpolated values at eased progress, or the `to` values when
    /// `eased` is `None`.
    fn write_values(&self, eased: Option<f32>) {
        if self.bindings.is_empty() {
            return;
        }
        let Some(target) = self.target.as_ref() else {
            return;
        };
        let Ok(mut target) = target.try_borrow_mut() else {
            warn!(generation = self.generation(), "target busy; frame skipped");
            return;
        };
        for binding in &self.bindings {
            let value = match eased {
                Some(t) => binding.sample(t),
                None => binding.to.clone(),
            };
            if let Err(err) = target.set_value(binding.property, value) {
                warn!(property = %binding.property, error = %err, "write failed");
            }
        }
    }

    pub fn pause(&mut self) {
        self.shared.pause();
    }

    /// Continue a paused animation. Anything else is left alone.
    pub fn resume(&mut self) {
        self.shared.resume();
    }

    /// Jump to the end: write every `to` value, mark complete and fire the
    /// complete observers. No-op unless playing or paused, so natural
    /// completion and `stop` never both fire.
    pub fn stop(&mut self) {
        if !matches!(self.state(), PlaybackState::Playing | PlaybackState::Paused) {
            return;
        }
        self.write_values(None);
        self.set_state(PlaybackState::Complete);
        debug!(generation = self.generation(), "animation stopped");
        self.emit(Phase::Complete);
    }

    /// Read the target's current value for `property`.
    pub fn get_value(&self, property: AnimatableProperty) -> Result<Value, AnimatorError> {
        let target = self.target.as_ref().ok_or(AnimatorError::MissingTarget)?;
        let target = target.try_borrow().map_err(|_| AnimatorError::TargetBusy)?;
        target.get_value(property)
    }

    pub fn on_start<F>(&mut self, f: F)
    where
        F: FnMut(&mut Animation) + 'static,
    {
        self.observers.start.push(Box::new(f));
    }

    pub fn on_update<F>(&mut self, f: F)
    where
        F: FnMut(&mut Animation) + 'static,
    {
        self.observers.update.push(Box::new(f));
    }

    pub fn on_complete<F>(&mut self, f: F)
    where
        F: FnMut(&mut Animation) + 'static,
    {
        self.observers.complete.push(Box::new(f));
    }

    fn observe(&mut self, phase: Phase, callback: Callback) {
        self.observers.list_mut(phase).push(callback);
    }

    /// Apply a handle command to this instance.
    pub(crate) fn apply(&mut self, command: Command) -> Result<(), AnimatorError> {
        match command {
            Command::Start => return self.start(),
            Command::Pause => self.pause(),
            Command::Resume => self.resume(),
            Command::Stop => self.stop(),
            Command::Observe(phase, callback) => self.observe(phase, callback),
        }
        Ok(())
    }

    /// Run handle commands deferred while this animation was borrowed, in
    /// arrival order.
    fn apply_commands(&mut self) {
        loop {
            let pending = self.shared.take_commands();
            if pending.is_empty() {
                return;
            }
            for command in pending {
                if let Err(err) = self.apply(command) {
                    warn!(generation = self.generation(), error = %err, "deferred command failed");
                }
            }
        }
    }

    /// Invoke the observers of `phase` in registration order.
    ///
    /// Handle commands issued by a handler take effect before the next one
    /// runs. Handlers registered while dispatching are appended after the
    /// current list and first run on the next dispatch. A reset from inside a
    /// handler ends the dispatch and discards the remaining handlers.
    fn emit(&mut self, phase: Phase) {
        let epoch = self.observers.epoch;
        let mut handlers = std::mem::take(self.observers.list_mut(phase));
        if handlers.is_empty() {
            return;
        }
        self.dispatch_depth += 1;
        let mut interrupted = false;
        for handler in handlers.iter_mut() {
            handler(self);
            self.apply_commands();
            if self.observers.epoch != epoch {
                interrupted = true;
                break;
            }
        }
        self.dispatch_depth -= 1;
        if interrupted {
            return;
        }
        let added = std::mem::take(self.observers.list_mut(phase));
        handlers.extend(added);
        *self.observers.list_mut(phase) = handlers;
    }

    #[inline]
    pub fn state(&self) -> PlaybackState {
        self.shared.state()
    }

    #[inline]
    pub fn is_playing(&self) -> bool {
        self.state() == PlaybackState::Playing
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.state() == PlaybackState::Paused
    }

    #[inline]
    pub fn is_complete(&self) -> bool {
        self.state() == PlaybackState::Complete
    }

    /// Incremented at every reuse boundary; handles compare against it.
    #[inline]
    pub fn generation(&self) -> u32 {
        self.shared.generation()
    }

    pub fn target(&self) -> Option<&Target> {
        self.target.as_ref()
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    pub fn delay(&self) -> f32 {
        self.delay
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn delay_elapsed(&self) -> f32 {
        self.delay_elapsed
    }

    /// Normalized (un-eased) progress in [0, 1].
    pub fn progress(&self) -> f32 {
        (self.elapsed / self.duration).clamp(0.0, 1.0)
    }

    pub fn bindings(&self) -> &[PropertyBinding] {
        &self.bindings
    }

    pub fn binding(&self, property: AnimatableProperty) -> Option<&PropertyBinding> {
        self.bindings.iter().find(|b| b.property == property)
    }

    /// Total registered observers across all three lists.
    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }
}

#[inline]
fn clamp_duration(duration: f32) -> f32 {
    if duration.is_finite() {
        duration.max(MIN_DURATION)
    } else {
        MIN_DURATION
    }
}

#[inline]
fn clamp_delay(delay: f32) -> f32 {
    if delay.is_finite() {
        delay.max(0.0)
    } else {
        0.0
    }
}
