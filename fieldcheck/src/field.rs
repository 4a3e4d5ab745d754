//! Field handles: the engine's view of an external input field.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

/// An input field owned by the caller.
///
/// The engine only reads the current text and, when enabled, signals the
/// outcome back through the error hooks. Implementations must answer
/// [`text`](FieldHandle::text) synchronously and without I/O.
pub trait FieldHandle: Send + Sync {
    /// Current text value.
    fn text(&self) -> String;

    /// Stable identifier, used for diagnostics and focusing.
    fn field_id(&self) -> String;

    /// Show a validation error on the field.
    fn set_error(&self, _msg: &str) {}

    /// Remove any validation error shown on the field.
    fn clear_error(&self) {}
}

static NEXT_FIELD: AtomicUsize = AtomicUsize::new(0);

#[derive(Debug)]
struct FieldState {
    serial: usize,
    value: String,
    error: Option<String>,
}

/// In-memory text field with shared state.
///
/// Clones share the same value and error, so a caller can keep one clone
/// and hand another to the validator.
///
/// # Example
///
/// ```ignore
/// let email = TextField::new();
/// validator.register("email", &email, [RuleTag::Required, RuleTag::Email])?;
///
/// email.set_value("a@b.com");
/// let outcome = validator.check_field("email")?;
/// assert!(outcome.is_passed());
/// ```
#[derive(Debug, Clone)]
pub struct TextField {
    state: Arc<RwLock<FieldState>>,
}

impl TextField {
    pub fn new() -> Self {
        Self::with_value(String::new())
    }

    pub fn with_value(value: impl Into<String>) -> Self {
        let state = FieldState {
            serial: NEXT_FIELD.fetch_add(1, Ordering::Relaxed),
            value: value.into(),
            error: None,
        };
        Self {
            state: Arc::new(RwLock::new(state)),
        }
    }

    /// Current text value.
    pub fn value(&self) -> String {
        self.read(|state| state.value.clone())
    }

    /// Replace the text. A shown error belongs to the old text and is dropped.
    pub fn set_value(&self, value: impl Into<String>) {
        self.write(|state| {
            state.value = value.into();
            state.error = None;
        });
    }

    pub fn has_error(&self) -> bool {
        self.read(|state| state.error.is_some())
    }

    /// Message set by the last failed validation, if still shown.
    pub fn error(&self) -> Option<String> {
        self.read(|state| state.error.clone())
    }

    fn read<T>(&self, f: impl FnOnce(&FieldState) -> T) -> T {
        let guard = self.state.read().unwrap_or_else(PoisonError::into_inner);
        f(&guard)
    }

    fn write(&self, f: impl FnOnce(&mut FieldState)) {
        let mut guard = self.state.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard);
    }
}

impl Default for TextField {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldHandle for TextField {
    fn text(&self) -> String {
        self.value()
    }

    fn field_id(&self) -> String {
        self.read(|state| format!("text-field-{}", state.serial))
    }

    fn set_error(&self, msg: &str) {
        self.write(|state| state.error = Some(msg.to_string()));
    }

    fn clear_error(&self) {
        self.write(|state| state.error = None);
    }
}
