//! Error types for the tween core

use crate::property::AnimatableProperty;
use crate::value::ValueKind;

/// Errors surfaced by targets, builders, presets and the runtime.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum AnimatorError {
    /// Target does not implement the requested property
    #[error("Target does not support property {property}")]
    UnsupportedProperty { property: AnimatableProperty },

    /// Value kind does not match what the target reports
    #[error("Value type mismatch for {property}: expected {expected:?}, got {actual:?}")]
    ValueTypeMismatch {
        property: AnimatableProperty,
        expected: ValueKind,
        actual: ValueKind,
    },

    /// No adapter could be built for a host object
    #[error("No animation adapter registered for {type_name}")]
    MissingAdapter { type_name: String },

    /// Animation has bindings but no target to write them to
    #[error("Animation has no target")]
    MissingTarget,

    /// Target is already borrowed elsewhere
    #[error("Target is busy (already borrowed)")]
    TargetBusy,

    /// Named preset not present in a collection
    #[error("Animation preset not found: {name}")]
    PresetNotFound { name: String },

    /// Collection holds no presets
    #[error("Preset collection '{name}' is empty")]
    EmptyCollection { name: String },

    /// Serialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Handle outlived its animation, which has since been recycled
    #[error("Animation handle is stale (instance was recycled)")]
    StaleHandle,

    /// Per-thread runtime was configured after first use
    #[error("Runtime instance already initialized on this thread")]
    RuntimeAlreadyInitialized,
}

impl AnimatorError {
    /// Shorthand for a kind mismatch against the property's expected kind.
    pub fn mismatch(property: AnimatableProperty, expected: ValueKind, actual: ValueKind) -> Self {
        Self::ValueTypeMismatch {
            property,
            expected,
            actual,
        }
    }

    /// Check if this error is recovered locally (diagnostic + safe default).
    #[inline]
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedProperty { .. }
                | Self::ValueTypeMismatch { .. }
                | Self::TargetBusy
                | Self::PresetNotFound { .. }
                | Self::EmptyCollection { .. }
        )
    }

    /// Get error category for logging
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::UnsupportedProperty { .. } | Self::ValueTypeMismatch { .. } => "property",
            Self::MissingAdapter { .. } | Self::MissingTarget | Self::TargetBusy => "target",
            Self::PresetNotFound { .. } | Self::EmptyCollection { .. } => "preset",
            Self::SerializationError { .. } => "serialization",
            Self::StaleHandle | Self::RuntimeAlreadyInitialized => "runtime",
        }
    }
}

impl From<serde_json::Error> for AnimatorError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError {
            reason: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_recoverability() {
        let unsupported = AnimatorError::UnsupportedProperty {
            property: AnimatableProperty::Position,
        };
        assert!(unsupported.is_recoverable());

        let missing = AnimatorError::MissingAdapter {
            type_name: "Widget".to_string(),
        };
        assert!(!missing.is_recoverable());
        assert!(!AnimatorError::StaleHandle.is_recoverable());
        assert_eq!(AnimatorError::StaleHandle.category(), "runtime");
    }

    #[test]
    fn test_error_categories() {
        let err = AnimatorError::mismatch(
            AnimatableProperty::Alpha,
            ValueKind::Float,
            ValueKind::Vec3,
        );
        assert_eq!(err.category(), "property");
        assert_eq!(
            err.to_string(),
            "Value type mismatch for Alpha: expected Float, got Vec3"
        );

        let preset = AnimatorError::PresetNotFound {
            name: "pop".to_string(),
        };
        assert_eq!(preset.category(), "preset");
    }

    #[test]
    fn test_from_serde_error() {
        let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let converted: AnimatorError = err.into();
        assert_eq!(converted.category(), "serialization");
    }
}
