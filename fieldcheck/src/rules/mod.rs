//! Validation rules.
//!
//! A rule is a pure predicate over the field's text. It must be defined for
//! every string (including the empty string) and report a specific
//! [`ErrorKind`] when it rejects its input.

mod builtin;

pub use builtin::{
    Email, ExactLength, FullName, MaxLength, MinLength, Password, Pattern, PhoneNumber, Required,
    ZipCode,
};

use crate::error::ErrorKind;

/// A single validation rule.
///
/// New rules only need to implement this trait; neither the validator nor
/// the field table has to change.
pub trait ValidationRule: Send + Sync {
    /// Check `text`, returning the failure kind if it is rejected.
    fn evaluate(&self, text: &str) -> Result<(), ErrorKind>;
}

/// Type alias for the predicate closure wrapped by [`FnRule`].
type Predicate = Box<dyn Fn(&str) -> bool + Send + Sync>;

/// Rule backed by a closure.
///
/// # Example
///
/// ```ignore
/// let even = FnRule::new(
///     |v| v.parse::<i64>().is_ok_and(|n| n % 2 == 0),
///     ErrorKind::custom("Must be an even number"),
/// );
/// ```
pub struct FnRule {
    predicate: Predicate,
    kind: ErrorKind,
}

impl FnRule {
    /// Create a rule that fails with `kind` whenever `predicate` returns false.
    pub fn new<F>(predicate: F, kind: ErrorKind) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        Self {
            predicate: Box::new(predicate),
            kind,
        }
    }
}

impl ValidationRule for FnRule {
    fn evaluate(&self, text: &str) -> Result<(), ErrorKind> {
        if (self.predicate)(text) {
            Ok(())
        } else {
            Err(self.kind.clone())
        }
    }
}
