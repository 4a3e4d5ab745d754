//! Validation outcomes and the delegate protocols that receive them.

use std::sync::Arc;

use indexmap::IndexMap;

use crate::error::ValidationError;
use crate::field::FieldHandle;

/// Failing fields keyed by registration key, in table order.
pub type FieldErrors = IndexMap<String, ValidationError>;

/// Receives the outcome of validating a single field.
pub trait FieldDelegate {
    /// Every rule of the field passed.
    fn on_field_success(&mut self, key: &str, field: &dyn FieldHandle);

    /// A rule of the field failed.
    fn on_field_failure(&mut self, key: &str, error: &ValidationError);
}

/// Receives the outcome of validating every registered field.
pub trait FormDelegate {
    /// No field failed.
    fn on_all_success(&mut self);

    /// At least one field failed; `errors` holds every failing field.
    fn on_all_failure(&mut self, errors: &FieldErrors);
}

/// Result of validating one field.
#[derive(Clone)]
pub enum FieldOutcome {
    /// All rules passed.
    Passed {
        /// Registration key.
        key: String,
        /// The validated field.
        field: Arc<dyn FieldHandle>,
    },
    /// The first failing rule's error.
    Failed(ValidationError),
}

impl FieldOutcome {
    /// Registration key of the validated field.
    pub fn key(&self) -> &str {
        match self {
            Self::Passed { key, .. } => key,
            Self::Failed(error) => &error.key,
        }
    }

    /// Check if the field passed.
    pub fn is_passed(&self) -> bool {
        matches!(self, Self::Passed { .. })
    }

    /// Get the error, if the field failed.
    pub fn error(&self) -> Option<&ValidationError> {
        match self {
            Self::Passed { .. } => None,
            Self::Failed(error) => Some(error),
        }
    }

    /// Report this outcome to `delegate` with exactly one callback.
    pub fn dispatch<D: FieldDelegate + ?Sized>(&self, delegate: &mut D) {
        match self {
            Self::Passed { key, field } => delegate.on_field_success(key, field.as_ref()),
            Self::Failed(error) => delegate.on_field_failure(&error.key, error),
        }
    }
}

impl std::fmt::Debug for FieldOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Passed { key, field } => f
                .debug_struct("Passed")
                .field("key", key)
                .field("field", &field.field_id())
                .finish(),
            Self::Failed(error) => f.debug_tuple("Failed").field(error).finish(),
        }
    }
}

/// Result of validating every registered field.
#[derive(Debug, Clone, Default)]
pub enum ValidationResult {
    /// All fields passed validation.
    #[default]
    Valid,
    /// One or more fields failed validation.
    Invalid(FieldErrors),
}

impl ValidationResult {
    /// Build a result from collected errors.
    pub fn from_errors(errors: FieldErrors) -> Self {
        if errors.is_empty() {
            Self::Valid
        } else {
            Self::Invalid(errors)
        }
    }

    /// Check if all fields passed validation.
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// Check if any field failed validation.
    pub fn is_invalid(&self) -> bool {
        !self.is_valid()
    }

    /// Get all validation errors.
    pub fn errors(&self) -> Option<&FieldErrors> {
        match self {
            Self::Valid => None,
            Self::Invalid(errors) => Some(errors),
        }
    }

    /// Get the error for `key`, if that field failed.
    pub fn error_for(&self, key: &str) -> Option<&ValidationError> {
        self.errors().and_then(|errors| errors.get(key))
    }

    /// Get the first validation error (if any), in table order.
    pub fn first_error(&self) -> Option<&ValidationError> {
        self.errors()
            .and_then(|errors| errors.first())
            .map(|(_, error)| error)
    }

    /// Number of failing fields.
    pub fn len(&self) -> usize {
        self.errors().map_or(0, |errors| errors.len())
    }

    /// Check if no field failed.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Report this result to `delegate` with exactly one callback.
    pub fn dispatch<D: FormDelegate + ?Sized>(&self, delegate: &mut D) {
        match self {
            Self::Valid => delegate.on_all_success(),
            Self::Invalid(errors) => delegate.on_all_failure(errors),
        }
    }
}
