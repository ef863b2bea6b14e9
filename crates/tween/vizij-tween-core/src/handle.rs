//! Generation-checked handles to pooled animations.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use tracing::{trace, warn};

use crate::animation::{Animation, Command, Phase, PlaybackState, Shared};
use crate::error::AnimatorError;
use crate::property::AnimatableProperty;
use crate::value::Value;

/// Shared reference to an [`Animation`] owned by a runtime.
///
/// Once the runtime recycles the instance the handle goes stale: it reports
/// complete and not playing, ignores playback commands, and `start` fails with
/// [`AnimatorError::StaleHandle`].
///
/// While the animation is dispatching its own observers, `pause` and `resume`
/// apply at once; `start`, `stop` and observer registration are deferred
/// until the running observer returns. State queries always answer.
#[derive(Clone)]
pub struct AnimationHandle {
    cell: Rc<RefCell<Animation>>,
    shared: Rc<Shared>,
    generation: u32,
}

impl AnimationHandle {
    /// Handle for the current use of `cell`.
    pub(crate) fn new(cell: Rc<RefCell<Animation>>) -> Self {
        let (shared, generation) = {
            let anim = cell.borrow();
            (anim.shared().clone(), anim.generation())
        };
        Self {
            cell,
            shared,
            generation,
        }
    }

    pub(crate) fn cell(&self) -> &Rc<RefCell<Animation>> {
        &self.cell
    }

    /// Generation this handle was issued for.
    #[inline]
    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// `true` when both handles point at the same pooled instance, whatever
    /// their generations.
    #[inline]
    pub fn ptr_eq(&self, other: &AnimationHandle) -> bool {
        Rc::ptr_eq(&self.cell, &other.cell)
    }

    /// Whether the instance has been recycled since this handle was issued.
    #[inline]
    pub fn is_stale(&self) -> bool {
        self.shared.generation() != self.generation
    }

    /// Run `f` against the live animation. `None` when stale or busy.
    pub fn with<R>(&self, f: impl FnOnce(&Animation) -> R) -> Option<R> {
        if self.is_stale() {
            return None;
        }
        match self.cell.try_borrow() {
            Ok(anim) => Some(f(&anim)),
            Err(_) => {
                warn!("animation is busy; use the observer argument instead of its handle");
                None
            }
        }
    }

    /// Run `f` against the live animation mutably. `None` when stale or busy.
    pub fn with_mut<R>(&self, f: impl FnOnce(&mut Animation) -> R) -> Option<R> {
        if self.is_stale() {
            trace!(generation = self.generation, "stale handle; command ignored");
            return None;
        }
        match self.cell.try_borrow_mut() {
            Ok(mut anim) => Some(f(&mut anim)),
            Err(_) => {
                warn!("animation is busy; use the observer argument instead of its handle");
                None
            }
        }
    }

    /// Apply `command` now, or defer it when the animation is mid-dispatch.
    fn command(&self, command: Command) -> Result<(), AnimatorError> {
        if self.is_stale() {
            trace!(generation = self.generation, "stale handle; command ignored");
            return Err(AnimatorError::StaleHandle);
        }
        match self.cell.try_borrow_mut() {
            Ok(mut anim) => anim.apply(command),
            Err(_) => {
                match command {
                    Command::Pause => self.shared.pause(),
                    Command::Resume => self.shared.resume(),
                    command => {
                        trace!(generation = self.generation, "animation dispatching; command deferred");
                        self.shared.defer(command);
                    }
                }
                Ok(())
            }
        }
    }

    /// Record a binding. Refused (returns `false`) when stale or mid-dispatch.
    pub fn set_property(&self, property: AnimatableProperty, from: Value, to: Value) -> bool {
        self.with_mut(|anim| anim.set_property(property, from, to))
            .unwrap_or(false)
    }

    pub fn get_value(&self, property: AnimatableProperty) -> Result<Value, AnimatorError> {
        if self.is_stale() {
            return Err(AnimatorError::StaleHandle);
        }
        self.with(|anim| anim.get_value(property))
            .unwrap_or(Err(AnimatorError::TargetBusy))
    }

    /// Start the animation.
    ///
    /// This does not register with a runtime; see [`crate::Runtime::register`].
    /// Mid-dispatch the start is deferred and a failure is only logged.
    pub fn start(&self) -> Result<(), AnimatorError> {
        self.command(Command::Start)
    }

    pub fn pause(&self) {
        let _ = self.command(Command::Pause);
    }

    pub fn resume(&self) {
        let _ = self.command(Command::Resume);
    }

    pub fn stop(&self) {
        let _ = self.command(Command::Stop);
    }

    pub fn on_start<F>(&self, f: F)
    where
        F: FnMut(&mut Animation) + 'static,
    {
        let _ = self.command(Command::Observe(Phase::Start, Box::new(f)));
    }

    pub fn on_update<F>(&self, f: F)
    where
        F: FnMut(&mut Animation) + 'static,
    {
        let _ = self.command(Command::Observe(Phase::Update, Box::new(f)));
    }

    pub fn on_complete<F>(&self, f: F)
    where
        F: FnMut(&mut Animation) + 'static,
    {
        let _ = self.command(Command::Observe(Phase::Complete, Box::new(f)));
    }

    /// Current state; stale handles read as [`PlaybackState::Complete`].
    pub fn state(&self) -> PlaybackState {
        if self.is_stale() {
            PlaybackState::Complete
        } else {
            self.shared.state()
        }
    }

    pub fn is_playing(&self) -> bool {
        self.state() == PlaybackState::Playing
    }

    pub fn is_paused(&self) -> bool {
        self.state() == PlaybackState::Paused
    }

    pub fn is_complete(&self) -> bool {
        self.state() == PlaybackState::Complete
    }

    /// Normalized progress; stale handles read as finished.
    pub fn progress(&self) -> f32 {
        self.with(Animation::progress).unwrap_or(1.0)
    }

    pub fn binding_count(&self) -> usize {
        self.with(|anim| anim.bindings().len()).unwrap_or(0)
    }

    pub fn observer_count(&self) -> usize {
        self.with(Animation::observer_count).unwrap_or(0)
    }
}

impl fmt::Debug for AnimationHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnimationHandle")
            .field("generation", &self.generation)
            .field("stale", &self.is_stale())
            .field("state", &self.state())
            .finish()
    }
}
