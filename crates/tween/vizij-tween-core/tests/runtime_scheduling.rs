use std::cell::{Cell, RefCell};
use std::rc::Rc;

use vizij_tween_core::{
    share, AnimatableProperty, AnimationBuilder, AnimationHandle, AnimatorError, Config,
    PlaybackState, Runtime, ShapeBuilder, SpriteNode, Target, Value,
};

fn init_tracing() {
    let default_filter = "vizij_tween_core=debug";
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| default_filter.to_string());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}

fn fade_in(rt: &Rc<Runtime>, target: Target, duration: f32) -> AnimationHandle {
    AnimationBuilder::new(target)
        .with_runtime(rt)
        .fade()
        .from(0.0)
        .to(1.0)
        .duration(duration)
        .start()
        .unwrap()
}

#[test]
fn animation_started_from_observer_waits_for_next_tick() {
    init_tracing();
    let rt = Rc::new(Runtime::new(Config::default()));
    let (first, first_target) = share(SpriteNode::default());
    let (second, second_target) = share(SpriteNode::default());

    let chained: Rc<RefCell<Option<AnimationHandle>>> = Rc::new(RefCell::new(None));
    let slot = chained.clone();
    let rt_for_observer = rt.clone();
    let second_target = RefCell::new(Some(second_target));

    AnimationBuilder::new(first_target)
        .with_runtime(&rt)
        .fade()
        .duration(0.5)
        .on_complete(move |_| {
            if let Some(target) = second_target.borrow_mut().take() {
                let handle = AnimationBuilder::new(target)
                    .with_runtime(&rt_for_observer)
                    .fade()
                    .from(0.0)
                    .to(1.0)
                    .duration(1.0)
                    .start()
                    .unwrap();
                *slot.borrow_mut() = Some(handle);
            }
        })
        .start()
        .unwrap();

    rt.tick(0.5);
    assert_eq!(first.borrow().alpha(), 1.0);
    // Snapped to `from` by start(), but not updated during the tick that created it.
    assert_eq!(second.borrow().alpha(), 0.0);
    assert_eq!(rt.pending_count(), 1);
    assert_eq!(rt.active_count(), 0);

    rt.tick(0.5);
    assert_eq!(second.borrow().alpha(), 0.5);
    assert!(chained.borrow().as_ref().unwrap().is_playing());
}

#[test]
fn observer_can_stop_its_own_animation() {
    let rt = Rc::new(Runtime::new(Config::default()));
    let (sprite, target) = share(SpriteNode::default());
    let completions = Rc::new(Cell::new(0));
    let c = completions.clone();
    let handle = fade_in(&rt, target, 1.0);
    handle.on_update(|anim| {
        if anim.elapsed() >= 0.5 {
            anim.stop();
        }
    });
    handle.on_complete(move |_| c.set(c.get() + 1));

    rt.tick(0.25);
    assert_eq!(sprite.borrow().alpha(), 0.25);
    rt.tick(0.25);
    assert_eq!(sprite.borrow().alpha(), 1.0);
    assert_eq!(completions.get(), 1);
    assert!(rt.is_idle());
}

#[test]
fn handle_stop_during_own_dispatch_takes_effect() {
    init_tracing();
    let rt = Rc::new(Runtime::new(Config::default()));
    let (sprite, target) = share(SpriteNode::default());
    let handle = fade_in(&rt, target, 1.0);
    let completions = Rc::new(Cell::new(0));
    let c = completions.clone();
    let inner = handle.clone();
    handle.on_update(move |_| inner.stop());
    handle.on_complete(move |_| c.set(c.get() + 1));

    rt.tick(0.25);
    assert_eq!(sprite.borrow().alpha(), 1.0);
    assert_eq!(completions.get(), 1);
    assert!(handle.is_complete());
    assert!(rt.is_idle());
}

#[test]
fn handle_pause_during_own_dispatch_holds_the_animation() {
    let rt = Rc::new(Runtime::new(Config::default()));
    let (sprite, target) = share(SpriteNode::default());
    let handle = fade_in(&rt, target, 1.0);
    let inner = handle.clone();
    let seen = Rc::new(Cell::new(None));
    let s = seen.clone();
    handle.on_update(move |_| {
        inner.pause();
        s.set(Some(inner.state()));
    });

    rt.tick(0.25);
    assert_eq!(seen.get(), Some(PlaybackState::Paused));
    rt.tick(0.25);
    assert_eq!(sprite.borrow().alpha(), 0.25);
    assert!(handle.is_paused());
    assert_eq!(rt.active_count(), 1);
}

#[test]
fn handle_reports_completion_inside_on_complete() {
    let rt = Rc::new(Runtime::new(Config::default()));
    let (_, target) = share(SpriteNode::default());
    let handle = fade_in(&rt, target, 0.5);
    let inner = handle.clone();
    let seen = Rc::new(Cell::new(None));
    let s = seen.clone();
    handle.on_complete(move |anim| s.set(Some((inner.is_complete(), anim.is_complete()))));

    rt.tick(0.5);
    assert_eq!(seen.get(), Some((true, true)));
}

#[test]
fn registered_before_start_plays_once_started() {
    let rt = Rc::new(Runtime::new(Config::default()));
    let (sprite, target) = share(SpriteNode::default());
    let handle = AnimationBuilder::new(target)
        .with_runtime(&rt)
        .fade()
        .from(0.0)
        .to(1.0)
        .duration(1.0)
        .build();
    rt.register(&handle);
    rt.tick(0.1);
    assert!(!handle.is_stale());

    handle.start().unwrap();
    rt.tick(0.5);
    assert!(handle.is_playing());
    assert_eq!(sprite.borrow().alpha(), 0.5);
    assert_eq!(rt.active_count(), 1);
}

#[test]
fn start_through_stale_handle_fails() {
    let rt = Rc::new(Runtime::new(Config::default()));
    let (_, target) = share(SpriteNode::default());
    let handle = fade_in(&rt, target, 0.1);
    rt.tick(0.1);
    assert!(handle.is_stale());
    assert_eq!(handle.start(), Err(AnimatorError::StaleHandle));
}

#[test]
fn nested_tick_is_ignored() {
    init_tracing();
    let rt = Rc::new(Runtime::new(Config::default()));
    let (sprite, target) = share(SpriteNode::default());
    let handle = fade_in(&rt, target, 1.0);
    let rt_inner = rt.clone();
    handle.on_update(move |_| rt_inner.tick(10.0));
    rt.tick(0.25);
    assert_eq!(sprite.borrow().alpha(), 0.25);
    assert!(handle.is_playing());
}

#[test]
fn recycled_instances_are_clean_and_old_handles_stale() {
    let rt = Rc::new(Runtime::new(Config {
        pool_prewarm: 1,
        pool_max: 1,
        ..Config::default()
    }));
    let (a_sprite, a) = share(SpriteNode::default());
    let old = fade_in(&rt, a, 0.25);
    old.on_update(|_| {});
    rt.tick(0.25);
    assert!(old.is_stale());
    assert_eq!(rt.pooled_count(), 1);

    let (_, b) = share(SpriteNode::default());
    let new = rt.create_animation(b, 1.0, 0.0, vizij_tween_core::easing::linear);
    assert!(new.ptr_eq(&old));
    assert_eq!(new.binding_count(), 0);
    assert_eq!(new.observer_count(), 0);
    assert!(!new.is_stale());

    // Commands through the old handle do not reach the new use.
    old.stop();
    old.set_property(AnimatableProperty::Alpha, Value::Float(0.0), Value::Float(1.0));
    assert_eq!(new.binding_count(), 0);
    assert!(!new.is_complete());
    assert!(old.is_complete());
    assert_eq!(a_sprite.borrow().alpha(), 1.0);

    // Stale handles are not registered.
    rt.register(&old);
    assert_eq!(rt.pending_count(), 0);
}

#[test]
fn many_animations_complete_in_registration_order() {
    let rt = Rc::new(Runtime::new(Config::default()));
    let order = Rc::new(RefCell::new(Vec::new()));
    let mut sprites = Vec::new();
    for i in 0..8 {
        let (sprite, target) = share(SpriteNode::default());
        sprites.push(sprite);
        let log = order.clone();
        let handle = fade_in(&rt, target, 0.5);
        handle.on_complete(move |_| log.borrow_mut().push(i));
    }
    assert_eq!(rt.pending_count(), 8);
    rt.tick(0.25);
    assert_eq!(rt.active_count(), 8);
    rt.tick(0.25);
    assert_eq!(*order.borrow(), (0..8).collect::<Vec<_>>());
    assert!(sprites.iter().all(|s| s.borrow().alpha() == 1.0));
    assert!(rt.is_idle());
}

#[test]
fn per_thread_instance_drives_builders_by_default() {
    let (sprite, target) = share(SpriteNode::default());
    let handle = AnimationBuilder::new(target)
        .fade()
        .duration(1.0)
        .start()
        .unwrap();
    let rt = Runtime::instance();
    assert_eq!(rt.pending_count(), 1);
    rt.tick(0.5);
    assert_eq!(sprite.borrow().alpha(), 0.5);
    assert!(handle.is_playing());
}

#[test]
fn config_fixture_configures_the_runtime() {
    let json = vizij_test_fixtures::configs::json("small-pool").unwrap();
    let cfg = Config::from_json(&json).unwrap();
    assert_eq!(cfg.pool_max, 2);
    let rt = Rc::new(Runtime::new(cfg));
    assert_eq!(rt.pooled_count(), 2);

    let (sprite, target) = share(SpriteNode::default());
    AnimationBuilder::new(target)
        .with_runtime(&rt)
        .fade()
        .start()
        .unwrap();
    // Defaults from the fixture: 0.5 s, EaseOutQuad.
    rt.tick(0.25);
    assert_eq!(sprite.borrow().alpha(), 0.75);
}
