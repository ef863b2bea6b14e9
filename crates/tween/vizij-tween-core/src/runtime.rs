//! Per-thread scheduler that advances every active animation once per tick.
//!
//! Registration never touches the active list directly: new animations wait
//! in a pending queue that is drained at the start of the next tick, so an
//! animation started from inside an observer first updates on a later tick.
//! Completed animations are collected during the tick and recycled after it;
//! registered animations that are not started yet, or paused, stay active.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use tracing::{debug, trace, warn};

use crate::animatable::Target;
use crate::config::Config;
use crate::easing::EasingFn;
use crate::error::AnimatorError;
use crate::handle::AnimationHandle;
use crate::pool::AnimationPool;

thread_local! {
    static INSTANCE: RefCell<Option<Rc<Runtime>>> = const { RefCell::new(None) };
}

#[derive(Debug)]
pub struct Runtime {
    config: Config,
    active: RefCell<Vec<AnimationHandle>>,
    pending_additions: RefCell<Vec<AnimationHandle>>,
    pending_removals: RefCell<Vec<AnimationHandle>>,
    pool: RefCell<AnimationPool>,
    /// Snapshot of `active` iterated during a tick; kept to reuse its capacity.
    scratch: RefCell<Vec<AnimationHandle>>,
    ticking: Cell<bool>,
}

struct TickGuard<'a>(&'a Cell<bool>);

impl Drop for TickGuard<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl Runtime {
    /// A standalone runtime. Most callers use [`Runtime::instance`].
    pub fn new(config: Config) -> Self {
        let cap = config.initial_active_capacity;
        Self {
            pool: RefCell::new(AnimationPool::new(&config)),
            active: RefCell::new(Vec::with_capacity(cap)),
            pending_additions: RefCell::new(Vec::with_capacity(cap)),
            pending_removals: RefCell::new(Vec::new()),
            scratch: RefCell::new(Vec::with_capacity(cap)),
            ticking: Cell::new(false),
            config,
        }
    }

    /// The runtime for the current thread, created with [`Config::default`]
    /// on first use. It lives until the thread exits.
    pub fn instance() -> Rc<Runtime> {
        INSTANCE.with(|slot| {
            slot.borrow_mut()
                .get_or_insert_with(|| {
                    debug!("creating per-thread tween runtime");
                    Rc::new(Runtime::default())
                })
                .clone()
        })
    }

    /// Install a configured runtime for the current thread. Fails if one was
    /// already created, explicitly or by [`Runtime::instance`].
    pub fn init_instance(config: Config) -> Result<Rc<Runtime>, AnimatorError> {
        INSTANCE.with(|slot| {
            let mut slot = slot.borrow_mut();
            if slot.is_some() {
                return Err(AnimatorError::RuntimeAlreadyInitialized);
            }
            let runtime = Rc::new(Runtime::new(config));
            *slot = Some(runtime.clone());
            Ok(runtime)
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Take an instance from the pool (or allocate one) and initialize it.
    /// The result has no bindings, no observers and is not yet registered.
    pub fn create_animation(
        &self,
        target: Target,
        duration: f32,
        delay: f32,
        easing: EasingFn,
    ) -> AnimationHandle {
        let cell = self.pool.borrow_mut().acquire();
        cell.borrow_mut()
            .initialize(target, duration, delay, easing);
        AnimationHandle::new(cell)
    }

    /// Queue `handle` for the active set. It is picked up at the start of the
    /// next tick; stale handles and duplicates are ignored.
    pub fn register(&self, handle: &AnimationHandle) {
        if handle.is_stale() {
            warn!("refusing to register a recycled animation");
            return;
        }
        let queued = self
            .pending_additions
            .borrow()
            .iter()
            .chain(self.active.borrow().iter())
            .any(|h| h.ptr_eq(handle));
        if queued {
            trace!("animation already registered");
            return;
        }
        self.pending_additions.borrow_mut().push(handle.clone());
    }

    /// Advance every active animation by `dt` seconds.
    ///
    /// Non-finite or negative `dt` is treated as zero. Calling `tick` from an
    /// observer while a tick is running is ignored.
    pub fn tick(&self, dt: f32) {
        if self.ticking.replace(true) {
            warn!("nested Runtime::tick ignored");
            return;
        }
        let _guard = TickGuard(&self.ticking);

        self.drain_additions();

        let dt = if dt.is_finite() && dt >= 0.0 {
            dt
        } else {
            warn!(dt, "invalid delta time; treating as 0");
            0.0
        };

        let mut snapshot = std::mem::take(&mut *self.scratch.borrow_mut());
        snapshot.extend(self.active.borrow().iter().cloned());

        for handle in &snapshot {
            let done = match handle.cell().try_borrow_mut() {
                Ok(mut anim) => {
                    anim.update(dt);
                    anim.is_complete() || anim.is_abandoned()
                }
                Err(_) => {
                    warn!("animation busy during tick; skipped");
                    false
                }
            };
            if done {
                self.pending_removals.borrow_mut().push(handle.clone());
            }
        }

        snapshot.clear();
        *self.scratch.borrow_mut() = snapshot;

        self.flush_removals();
    }

    fn drain_additions(&self) {
        let added = std::mem::take(&mut *self.pending_additions.borrow_mut());
        if added.is_empty() {
            return;
        }
        let mut active = self.active.borrow_mut();
        for handle in added {
            if handle.is_stale() || active.iter().any(|h| h.ptr_eq(&handle)) {
                continue;
            }
            active.push(handle);
        }
        trace!(active = active.len(), "drained pending animations");
    }

    fn flush_removals(&self) {
        let removals = std::mem::take(&mut *self.pending_removals.borrow_mut());
        if removals.is_empty() {
            return;
        }
        self.active
            .borrow_mut()
            .retain(|h| !removals.iter().any(|r| r.ptr_eq(h)));

        for handle in removals {
            // Release outside the pool borrow: dropping observers and targets
            // may run arbitrary host code.
            let released = match handle.cell().try_borrow_mut() {
                Ok(mut anim) => {
                    anim.release();
                    true
                }
                Err(_) => false,
            };
            if released {
                self.pool.borrow_mut().put(handle.cell().clone());
            }
        }
        trace!(
            active = self.active.borrow().len(),
            pooled = self.pool.borrow().len(),
            "recycled completed animations"
        );
    }

    pub fn active_count(&self) -> usize {
        self.active.borrow().len()
    }

    pub fn pending_count(&self) -> usize {
        self.pending_additions.borrow().len()
    }

    pub fn pooled_count(&self) -> usize {
        self.pool.borrow().len()
    }

    /// No active or pending animations.
    pub fn is_idle(&self) -> bool {
        self.active_count() == 0 && self.pending_count() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animatable::share;
    use crate::easing;
    use crate::property::AnimatableProperty;
    use crate::targets::SpriteNode;
    use crate::value::Value;

    fn small_runtime() -> Runtime {
        Runtime::new(Config {
            pool_prewarm: 2,
            pool_max: 2,
            ..Config::default()
        })
    }

    #[test]
    fn registration_takes_effect_next_tick() {
        let rt = small_runtime();
        let (sprite, target) = share(SpriteNode::default());
        let h = rt.create_animation(target, 1.0, 0.0, easing::linear);
        h.set_property(AnimatableProperty::Alpha, Value::Float(0.0), Value::Float(1.0));
        h.start().unwrap();
        rt.register(&h);
        rt.register(&h);
        assert_eq!(rt.pending_count(), 1);
        assert_eq!(rt.active_count(), 0);

        rt.tick(0.5);
        assert_eq!(rt.active_count(), 1);
        assert_eq!(sprite.borrow().alpha(), 0.5);
    }

    #[test]
    fn completed_animations_return_to_pool() {
        let rt = small_runtime();
        assert_eq!(rt.pooled_count(), 2);
        let (_, target) = share(SpriteNode::default());
        let h = rt.create_animation(target, 0.5, 0.0, easing::linear);
        assert_eq!(rt.pooled_count(), 1);
        h.start().unwrap();
        rt.register(&h);
        rt.tick(0.5);
        assert!(rt.is_idle());
        assert_eq!(rt.pooled_count(), 2);
        assert!(h.is_stale());
    }

    #[test]
    fn registered_before_start_waits_for_start() {
        let rt = small_runtime();
        let (sprite, target) = share(SpriteNode::default());
        let h = rt.create_animation(target, 1.0, 0.0, easing::linear);
        h.set_property(AnimatableProperty::Alpha, Value::Float(0.0), Value::Float(1.0));
        rt.register(&h);
        rt.tick(0.1);
        assert_eq!(rt.active_count(), 1);
        assert!(!h.is_stale());
        assert_eq!(h.state(), crate::animation::PlaybackState::Inert);

        h.start().unwrap();
        rt.tick(0.5);
        assert!(h.is_playing());
        assert_eq!(sprite.borrow().alpha(), 0.5);
    }

    #[test]
    fn reset_from_own_observer_is_recycled() {
        let rt = small_runtime();
        let (_, target) = share(SpriteNode::default());
        let h = rt.create_animation(target, 1.0, 0.0, easing::linear);
        h.on_update(|anim| anim.reset());
        h.start().unwrap();
        rt.register(&h);
        rt.tick(0.1);
        assert!(rt.is_idle());
        assert!(h.is_stale());
        assert_eq!(rt.pooled_count(), 2);
    }

    #[test]
    fn invalid_dt_is_zero() {
        let rt = small_runtime();
        let (sprite, target) = share(SpriteNode::default());
        let h = rt.create_animation(target, 1.0, 0.0, easing::linear);
        h.set_property(AnimatableProperty::Alpha, Value::Float(0.0), Value::Float(1.0));
        h.start().unwrap();
        rt.register(&h);
        rt.tick(f32::NAN);
        rt.tick(-1.0);
        assert_eq!(sprite.borrow().alpha(), 0.0);
        assert!(h.is_playing());
    }

    #[test]
    fn second_init_instance_fails() {
        std::thread::spawn(|| {
            let first = Runtime::init_instance(Config::default()).unwrap();
            assert!(Rc::ptr_eq(&first, &Runtime::instance()));
            assert_eq!(
                Runtime::init_instance(Config::default()).unwrap_err(),
                AnimatorError::RuntimeAlreadyInitialized
            );
        })
        .join()
        .unwrap();
    }
}
