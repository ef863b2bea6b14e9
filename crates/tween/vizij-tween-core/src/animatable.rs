//! The capability every animated object exposes to the engine.

use std::cell::RefCell;
use std::rc::Rc;

use crate::error::AnimatorError;
use crate::property::AnimatableProperty;
use crate::value::{Value, ValueKind};

/// A host object (or adapter around one) whose properties can be tweened.
///
/// Implementations report which properties they support and read/write them
/// as typed [`Value`]s. A target that cannot honour a request returns an
/// error; the engine reports it and skips the binding rather than failing.
pub trait Animatable {
    fn supports_property(&self, property: AnimatableProperty) -> bool;

    fn get_value(&self, property: AnimatableProperty) -> Result<Value, AnimatorError>;

    fn set_value(&mut self, property: AnimatableProperty, value: Value) -> Result<(), AnimatorError>;

    /// Kind of value this target stores for `property`.
    ///
    /// The default reports the conventional kind of every supported property.
    fn value_kind(&self, property: AnimatableProperty) -> Result<ValueKind, AnimatorError> {
        if self.supports_property(property) {
            Ok(property.value_kind())
        } else {
            Err(AnimatorError::UnsupportedProperty { property })
        }
    }
}

/// Shared, mutable handle to a target.
///
/// Animations hold one of these while bound; the host keeps its own clone so
/// it can observe the animated values between ticks.
pub type Target = Rc<RefCell<dyn Animatable>>;

/// Wrap a concrete target into a shareable [`Target`] while keeping a typed
/// handle for the caller.
pub fn share<T: Animatable + 'static>(target: T) -> (Rc<RefCell<T>>, Target) {
    let typed = Rc::new(RefCell::new(target));
    let erased: Target = typed.clone();
    (typed, erased)
}

/// Validate `value` against the kind `target` reports for `property`.
pub(crate) fn check_kind(
    target: &dyn Animatable,
    property: AnimatableProperty,
    value: &Value,
) -> Result<(), AnimatorError> {
    let expected = target.value_kind(property)?;
    let actual = value.kind();
    if expected == actual {
        Ok(())
    } else {
        Err(AnimatorError::mismatch(property, expected, actual))
    }
}
