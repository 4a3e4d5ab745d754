//! Thread-safe access to a validator.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::error::ValidatorError;
use crate::factory::RuleTag;
use crate::field::FieldHandle;
use crate::result::{FieldDelegate, FieldOutcome, FormDelegate, ValidationResult};
use crate::validator::Validator;

/// A [`Validator`] behind one exclusive lock.
///
/// The lock covers the whole registration table, so `check_all` always
/// sees a consistent snapshot. Clones share the same validator.
#[derive(Debug, Clone, Default)]
pub struct SharedValidator {
    inner: Arc<Mutex<Validator>>,
}

impl SharedValidator {
    /// Wrap `validator` for shared use.
    pub fn new(validator: Validator) -> Self {
        Self {
            inner: Arc::new(Mutex::new(validator)),
        }
    }

    /// Lock the validator for a sequence of operations.
    ///
    /// A panic while the lock was held does not leave the table half
    /// updated, so a poisoned lock is recovered.
    pub fn lock(&self) -> MutexGuard<'_, Validator> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// See [`Validator::register`].
    pub fn register<W, I>(
        &self,
        key: impl Into<String>,
        field: &W,
        tags: I,
    ) -> Result<(), ValidatorError>
    where
        W: FieldHandle + Clone + 'static,
        I: IntoIterator<Item = RuleTag>,
    {
        self.lock().register(key, field, tags)
    }

    /// See [`Validator::unregister`].
    pub fn unregister(&self, key: &str) -> bool {
        self.lock().unregister(key)
    }

    /// See [`Validator::check_field`].
    pub fn check_field(&self, key: &str) -> Result<FieldOutcome, ValidatorError> {
        self.lock().check_field(key)
    }

    /// See [`Validator::validate_field`].
    ///
    /// The delegate runs after the lock is released, so it may call back
    /// into this validator.
    pub fn validate_field<D>(&self, key: &str, delegate: &mut D) -> Result<(), ValidatorError>
    where
        D: FieldDelegate + ?Sized,
    {
        let outcome = self.check_field(key)?;
        outcome.dispatch(delegate);
        Ok(())
    }

    /// See [`Validator::check_all`].
    pub fn check_all(&self) -> ValidationResult {
        self.lock().check_all()
    }

    /// See [`Validator::validate_all`].
    ///
    /// The delegate runs after the lock is released.
    pub fn validate_all<D>(&self, delegate: &mut D)
    where
        D: FormDelegate + ?Sized,
    {
        let result = self.check_all();
        result.dispatch(delegate);
    }
}
