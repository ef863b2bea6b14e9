//! Host-object → [`Target`] adapter registry.
//!
//! Exact factories are keyed by the host's concrete `TypeId`. Fallback
//! factories inspect any host and may decline; they are tried in registration
//! order when no exact factory matches.

use std::any::{type_name, Any, TypeId};
use std::cell::RefCell;
use std::rc::Rc;

use hashbrown::HashMap;
use tracing::{debug, error};

use crate::animatable::Target;
use crate::error::AnimatorError;
use crate::targets::{RectNode, SpriteNode, TextNode, TransformNode};

type ExactFactory = Box<dyn Fn(&dyn Any) -> Option<Target>>;
type FallbackFactory = Box<dyn Fn(&dyn Any) -> Option<Target>>;

struct Fallback {
    name: String,
    factory: FallbackFactory,
}

#[derive(Default)]
pub struct AdapterRegistry {
    exact: HashMap<TypeId, ExactFactory>,
    fallbacks: Vec<Fallback>,
}

impl std::fmt::Debug for AdapterRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdapterRegistry")
            .field("exact", &self.exact.len())
            .field(
                "fallbacks",
                &self.fallbacks.iter().map(|fb| fb.name.as_str()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

thread_local! {
    static DEFAULT_REGISTRY: Rc<RefCell<AdapterRegistry>> =
        Rc::new(RefCell::new(AdapterRegistry::with_defaults()));
}

impl AdapterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry that adapts shared reference nodes
    /// (`Rc<RefCell<TransformNode>>`, `RectNode`, `SpriteNode`, `TextNode`).
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register_shared::<TransformNode>();
        registry.register_shared::<RectNode>();
        registry.register_shared::<SpriteNode>();
        registry.register_shared::<TextNode>();
        registry
    }

    /// The per-thread registry used by [`crate::AnimationBuilder::for_host`].
    pub fn thread_default() -> Rc<RefCell<AdapterRegistry>> {
        DEFAULT_REGISTRY.with(Rc::clone)
    }

    /// Register an exact factory for host type `H`. Replaces any previous one.
    pub fn register<H, F>(&mut self, factory: F)
    where
        H: Any,
        F: Fn(&H) -> Target + 'static,
    {
        let erased: ExactFactory =
            Box::new(move |host: &dyn Any| host.downcast_ref::<H>().map(&factory));
        if self.exact.insert(TypeId::of::<H>(), erased).is_some() {
            debug!(host = type_name::<H>(), "adapter replaced");
        }
    }

    /// Hosts that already are shared animatable nodes adapt to themselves.
    pub fn register_shared<T>(&mut self)
    where
        T: crate::animatable::Animatable + 'static,
    {
        self.register::<Rc<RefCell<T>>, _>(|node| {
            let target: Target = node.clone();
            target
        });
    }

    /// Register a capability-based factory tried when no exact match exists.
    pub fn register_fallback<F>(&mut self, name: impl Into<String>, factory: F)
    where
        F: Fn(&dyn Any) -> Option<Target> + 'static,
    {
        self.fallbacks.push(Fallback {
            name: name.into(),
            factory: Box::new(factory),
        });
    }

    /// Build a target for `host`.
    pub fn adapter_for<H: Any>(&self, host: &H) -> Result<Target, AnimatorError> {
        let any: &dyn Any = host;
        if let Some(target) = self
            .exact
            .get(&TypeId::of::<H>())
            .and_then(|factory| factory(any))
        {
            return Ok(target);
        }
        for fallback in &self.fallbacks {
            if let Some(target) = (fallback.factory)(any) {
                debug!(host = type_name::<H>(), adapter = %fallback.name, "fallback adapter used");
                return Ok(target);
            }
        }
        error!(host = type_name::<H>(), "no animation adapter registered");
        Err(AnimatorError::MissingAdapter {
            type_name: type_name::<H>().to_string(),
        })
    }
}
