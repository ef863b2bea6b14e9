use std::cell::{Cell, RefCell};
use std::rc::Rc;

use vizij_tween_core::{
    share, Animatable, AnimatableProperty, Animation, AnimationBuilder, AnimatorError, Config,
    Ease, PlaybackState, Runtime, ShapeBuilder, SpriteNode, Target, TransformNode, Value,
};

fn init_tracing() {
    let default_filter = "vizij_tween_core=debug";
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| default_filter.to_string());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}

fn approx(a: f32, b: f32, eps: f32) {
    assert!((a - b).abs() <= eps, "left={a} right={b} eps={eps}");
}

fn runtime() -> Rc<Runtime> {
    Rc::new(Runtime::new(Config::default()))
}

fn counter() -> (Rc<Cell<u32>>, impl FnMut(&mut Animation) + 'static) {
    let count = Rc::new(Cell::new(0));
    let c = count.clone();
    (count, move |_: &mut Animation| c.set(c.get() + 1))
}

#[test]
fn ticks_summing_to_duration_land_exactly_on_to() {
    init_tracing();
    let rt = runtime();
    let (node, target) = share(TransformNode::default());
    let (completions, on_complete) = counter();

    let handle = AnimationBuilder::new(target)
        .with_runtime(&rt)
        .scale()
        .from([0.0, 0.0, 0.0])
        .to([2.0, 3.0, 4.0])
        .duration(1.0)
        .easing(Ease::EaseInOutCubic)
        .on_complete(on_complete)
        .start()
        .unwrap();

    for _ in 0..4 {
        rt.tick(0.25);
    }

    assert_eq!(node.borrow().scale, [2.0, 3.0, 4.0]);
    assert_eq!(completions.get(), 1);
    // The instance went back to the pool with the tick that completed it.
    assert!(handle.is_complete());
    assert!(handle.is_stale());
    assert!(rt.is_idle());
}

#[test]
fn fade_midpoint_matches_the_easing_curve() {
    init_tracing();
    let rt = runtime();
    let (sprite, target) = share(SpriteNode::default());

    AnimationBuilder::new(target)
        .with_runtime(&rt)
        .fade()
        .from(0.0)
        .to(1.0)
        .duration(1.0)
        .easing(Ease::EaseInQuad)
        .start()
        .unwrap();

    // Start snaps to `from` before any tick.
    assert_eq!(sprite.borrow().alpha(), 0.0);

    rt.tick(0.5);
    assert_eq!(sprite.borrow().alpha(), Ease::EaseInQuad.apply(0.5));
    assert_eq!(sprite.borrow().alpha(), 0.25);

    rt.tick(0.5);
    assert_eq!(sprite.borrow().alpha(), 1.0);
}

#[test]
fn delay_holds_values_and_start_observer() {
    init_tracing();
    let rt = runtime();
    let (sprite, target) = share(SpriteNode::default());
    let (starts, on_start) = counter();

    let handle = AnimationBuilder::new(target)
        .with_runtime(&rt)
        .fade()
        .from(0.2)
        .to(1.0)
        .duration(1.0)
        .delay(0.5)
        .on_start(on_start)
        .start()
        .unwrap();

    rt.tick(0.25);
    rt.tick(0.25);
    assert_eq!(sprite.borrow().alpha(), 0.2);
    assert_eq!(starts.get(), 0);
    assert_eq!(handle.with(|a| a.elapsed()), Some(0.0));

    rt.tick(0.5);
    assert_eq!(starts.get(), 1);
    approx(sprite.borrow().alpha(), 0.6, 1e-6);

    rt.tick(0.25);
    assert_eq!(starts.get(), 1);
}

#[test]
fn stop_forces_to_values_once() {
    init_tracing();
    let rt = runtime();
    for p in [0.0_f32, 0.3, 0.75] {
        let (node, target) = share(TransformNode::default());
        let (completions, on_complete) = counter();
        let handle = AnimationBuilder::new(target)
            .with_runtime(&rt)
            .movement()
            .local()
            .from([0.0, 0.0, 0.0])
            .to([10.0, 0.0, 0.0])
            .duration(1.0)
            .on_complete(on_complete)
            .start()
            .unwrap();

        if p > 0.0 {
            rt.tick(p);
        }
        handle.stop();
        assert_eq!(node.borrow().local_position, [10.0, 0.0, 0.0]);
        assert_eq!(completions.get(), 1);

        handle.stop();
        rt.tick(0.5);
        assert_eq!(completions.get(), 1);
        assert_eq!(node.borrow().local_position, [10.0, 0.0, 0.0]);
    }
}

#[test]
fn stop_while_paused_completes() {
    let rt = runtime();
    let (sprite, target) = share(SpriteNode::default());
    let handle = AnimationBuilder::new(target)
        .with_runtime(&rt)
        .fade()
        .duration(1.0)
        .start()
        .unwrap();
    rt.tick(0.25);
    handle.pause();
    assert!(handle.is_paused());
    rt.tick(0.25);
    assert_eq!(rt.active_count(), 1);
    handle.stop();
    assert_eq!(handle.state(), PlaybackState::Complete);
    assert_eq!(sprite.borrow().alpha(), 1.0);
}

#[test]
fn reset_then_initialize_leaves_nothing_behind() {
    let (_, target) = share(SpriteNode::default());
    let mut anim = Animation::new();
    anim.initialize(target.clone(), 1.0, 0.0, Ease::Linear.function());
    anim.set_property(AnimatableProperty::Alpha, Value::Float(0.0), Value::Float(1.0));
    anim.on_start(|_| {});
    anim.on_update(|_| {});
    anim.on_complete(|_| {});
    anim.start().unwrap();
    anim.update(0.4);

    anim.reset();
    anim.initialize(target, 2.0, 0.1, Ease::EaseInSine.function());
    assert!(anim.bindings().is_empty());
    assert_eq!(anim.observer_count(), 0);
    assert_eq!(anim.elapsed(), 0.0);
    assert_eq!(anim.delay_elapsed(), 0.0);
    assert_eq!(anim.state(), PlaybackState::Inert);
}

#[test]
fn move_from_current() {
    init_tracing();
    let rt = runtime();
    let (node, target) = share(TransformNode::at([1.0, 2.0, 3.0]));

    AnimationBuilder::new(target)
        .with_runtime(&rt)
        .movement()
        .to([4.0, 5.0, 6.0])
        .duration(1.0)
        .start()
        .unwrap();

    rt.tick(0.5);
    let p = node.borrow().world_position();
    approx(p[0], 2.5, 1e-6);
    approx(p[1], 3.5, 1e-6);
    approx(p[2], 4.5, 1e-6);

    rt.tick(0.5);
    assert_eq!(node.borrow().world_position(), [4.0, 5.0, 6.0]);
}

/// Alpha and color on one sprite, where color writes can be refused.
#[derive(Default)]
struct LockableSprite {
    inner: SpriteNode,
    color_locked: bool,
}

impl Animatable for LockableSprite {
    fn supports_property(&self, property: AnimatableProperty) -> bool {
        self.inner.supports_property(property)
    }

    fn get_value(&self, property: AnimatableProperty) -> Result<Value, AnimatorError> {
        self.inner.get_value(property)
    }

    fn set_value(&mut self, property: AnimatableProperty, value: Value) -> Result<(), AnimatorError> {
        if property == AnimatableProperty::Color && self.color_locked {
            return Err(AnimatorError::TargetBusy);
        }
        self.inner.set_value(property, value)
    }
}

#[test]
fn failed_start_restores_written_values() {
    init_tracing();
    let node = Rc::new(RefCell::new(LockableSprite::default()));
    let target: Target = node.clone();
    let mut anim = Animation::new();
    anim.initialize(target, 1.0, 0.0, Ease::Linear.function());
    assert!(anim.set_property(
        AnimatableProperty::Alpha,
        Value::Float(0.0),
        Value::Float(1.0)
    ));
    assert!(anim.set_property(
        AnimatableProperty::Color,
        Value::Color([0.0, 0.0, 0.0, 0.0]),
        Value::Color([1.0; 4])
    ));

    node.borrow_mut().inner.color[3] = 0.7;
    node.borrow_mut().color_locked = true;
    assert_eq!(anim.start(), Err(AnimatorError::TargetBusy));
    assert_eq!(anim.state(), PlaybackState::Inert);
    assert_eq!(node.borrow().inner.alpha(), 0.7);

    node.borrow_mut().color_locked = false;
    anim.start().unwrap();
    assert!(anim.is_playing());
    assert_eq!(node.borrow().inner.color, [0.0, 0.0, 0.0, 0.0]);
}

#[test]
fn failed_builder_start_is_not_registered() {
    let rt = runtime();
    let node = Rc::new(RefCell::new(LockableSprite {
        color_locked: true,
        ..LockableSprite::default()
    }));
    let target: Target = node.clone();
    let result = AnimationBuilder::new(target)
        .with_runtime(&rt)
        .color()
        .from([0.0; 4])
        .to([1.0; 4])
        .start();
    assert!(matches!(result, Err(AnimatorError::TargetBusy)));
    assert!(rt.is_idle());
}

#[test]
fn busy_target_drops_binding_but_still_starts() {
    let rt = runtime();
    let (sprite, target) = share(SpriteNode::default());
    let guard = sprite.borrow_mut();
    let handle = AnimationBuilder::new(target)
        .with_runtime(&rt)
        .fade()
        .from(0.0)
        .start()
        .unwrap();
    drop(guard);
    assert_eq!(handle.binding_count(), 0);
    assert_eq!(rt.pending_count(), 1);
}

#[test]
fn replay_after_completion() {
    let (sprite, target) = share(SpriteNode::default());
    let mut anim = Animation::new();
    anim.initialize(target, 0.5, 0.0, Ease::Linear.function());
    anim.set_property(AnimatableProperty::Alpha, Value::Float(1.0), Value::Float(0.0));
    anim.start().unwrap();
    anim.update(0.5);
    assert!(anim.is_complete());
    assert_eq!(sprite.borrow().alpha(), 0.0);

    anim.start().unwrap();
    assert!(anim.is_playing());
    assert!(!anim.is_complete());
    assert_eq!(sprite.borrow().alpha(), 1.0);
}
