//! The validation engine.

use std::sync::Arc;

use log::{debug, warn};

use crate::config::ValidatorConfig;
use crate::error::{ValidationError, ValidatorError};
use crate::factory::{RuleFactory, RuleTag};
use crate::field::FieldHandle;
use crate::result::{FieldDelegate, FieldErrors, FieldOutcome, FormDelegate, ValidationResult};
use crate::rules::ValidationRule;
use crate::table::{FieldTable, Registration, RuleChain};

/// Binds fields to rule chains and validates them on demand.
///
/// The validator keeps no state between calls beyond its registration
/// table: every validation reads the fields' current text and evaluates
/// the chains as they are registered at that moment.
///
/// # Example
///
/// ```ignore
/// let email = TextField::new();
///
/// let mut validator = Validator::new();
/// validator.register("email", &email, [RuleTag::Required, RuleTag::Email])?;
///
/// email.set_value("not-an-email");
/// validator.validate_field("email", &mut my_delegate)?;
///
/// let result = validator.check_all();
/// if result.is_valid() {
///     // Submit form
/// }
/// ```
pub struct Validator {
    table: FieldTable,
    factory: RuleFactory,
    mark_fields: bool,
}

impl Validator {
    /// Create a validator with the default configuration.
    pub fn new() -> Self {
        Self::with_config(ValidatorConfig::default())
    }

    /// Create a validator with the given configuration.
    pub fn with_config(config: ValidatorConfig) -> Self {
        Self {
            table: FieldTable::new(),
            factory: RuleFactory::with_config(config.rules),
            mark_fields: config.mark_fields,
        }
    }

    /// Create a validator using a prepared rule factory.
    pub fn with_factory(factory: RuleFactory) -> Self {
        Self {
            table: FieldTable::new(),
            factory,
            mark_fields: ValidatorConfig::default().mark_fields,
        }
    }

    /// The rule factory used by [`register`](Self::register).
    pub fn factory(&self) -> &RuleFactory {
        &self.factory
    }

    /// Mutable access to the rule factory, to add custom rules.
    pub fn factory_mut(&mut self) -> &mut RuleFactory {
        &mut self.factory
    }

    /// The registration table.
    pub fn table(&self) -> &FieldTable {
        &self.table
    }

    /// Enable or disable signalling outcomes back to fields.
    pub fn set_mark_fields(&mut self, mark: bool) {
        self.mark_fields = mark;
    }

    // -------------------------------------------------------------------------
    // Registration
    // -------------------------------------------------------------------------

    /// Register `field` under `key` with rules built from `tags`.
    ///
    /// Every tag is resolved before the table is touched, so a bad tag leaves
    /// any existing registration for `key` unchanged. Registering an existing
    /// key replaces its field and whole rule chain.
    pub fn register<W, I>(
        &mut self,
        key: impl Into<String>,
        field: &W,
        tags: I,
    ) -> Result<(), ValidatorError>
    where
        W: FieldHandle + Clone + 'static,
        I: IntoIterator<Item = RuleTag>,
    {
        let key = key.into();
        let rules = tags
            .into_iter()
            .map(|tag| self.factory.create(&tag))
            .collect::<Result<Vec<_>, _>>()
            .inspect_err(|e| warn!("Rejected registration of '{}': {}", key, e))?;
        self.register_rules(key, field, rules)
    }

    /// Register `field` under `key` with already-built rules.
    pub fn register_rules<W>(
        &mut self,
        key: impl Into<String>,
        field: &W,
        rules: Vec<Box<dyn ValidationRule>>,
    ) -> Result<(), ValidatorError>
    where
        W: FieldHandle + Clone + 'static,
    {
        let key = key.into();
        let chain = RuleChain::new(&key, rules)?;
        let rule_count = chain.len();
        let field: Arc<dyn FieldHandle> = Arc::new(field.clone());

        if self
            .table
            .register(Registration::new(key.clone(), field, chain))
            .is_some()
        {
            debug!("Replaced registration '{}' ({} rules)", key, rule_count);
        } else {
            debug!("Registered '{}' ({} rules)", key, rule_count);
        }
        Ok(())
    }

    /// Remove the registration for `key`.
    ///
    /// Returns false if the key was not registered.
    pub fn unregister(&mut self, key: &str) -> bool {
        let removed = self.table.unregister(key).is_some();
        if removed {
            debug!("Unregistered '{}'", key);
        }
        removed
    }

    // -------------------------------------------------------------------------
    // Validation
    // -------------------------------------------------------------------------

    /// Validate one field and return its outcome.
    pub fn check_field(&self, key: &str) -> Result<FieldOutcome, ValidatorError> {
        let Some(registration) = self.table.lookup(key) else {
            warn!("Validation requested for unregistered field '{}'", key);
            return Err(ValidatorError::FieldNotFound(key.to_string()));
        };
        Ok(self.evaluate(registration))
    }

    /// Validate one field and report the outcome to `delegate`.
    ///
    /// Exactly one delegate callback fires on success. An unknown key
    /// returns [`ValidatorError::FieldNotFound`] and fires none.
    pub fn validate_field<D>(&self, key: &str, delegate: &mut D) -> Result<(), ValidatorError>
    where
        D: FieldDelegate + ?Sized,
    {
        self.check_field(key)?.dispatch(delegate);
        Ok(())
    }

    /// Validate every registered field.
    ///
    /// Every field is evaluated whatever the others' outcomes; the result
    /// holds exactly the failing fields, in table order.
    pub fn check_all(&self) -> ValidationResult {
        let errors: FieldErrors = self
            .table
            .iter()
            .filter_map(|registration| match self.evaluate(registration) {
                FieldOutcome::Passed { .. } => None,
                FieldOutcome::Failed(error) => Some((error.key.clone(), error)),
            })
            .collect();

        debug!(
            "Validated {} fields, {} failed",
            self.table.len(),
            errors.len()
        );
        ValidationResult::from_errors(errors)
    }

    /// Validate every registered field and report the result to `delegate`.
    pub fn validate_all<D>(&self, delegate: &mut D)
    where
        D: FormDelegate + ?Sized,
    {
        self.check_all().dispatch(delegate);
    }

    fn evaluate(&self, registration: &Registration) -> FieldOutcome {
        let key = registration.key();
        let field = registration.field();
        let text = field.text();

        match registration.rules().evaluate(&text) {
            Ok(()) => {
                debug!("Field '{}' passed", key);
                if self.mark_fields {
                    field.clear_error();
                }
                FieldOutcome::Passed {
                    key: key.to_string(),
                    field: Arc::clone(field),
                }
            }
            Err(kind) => {
                debug!("Field '{}' failed: {:?}", key, kind);
                let error = ValidationError::new(key, Arc::clone(field), kind);
                if self.mark_fields {
                    field.set_error(&error.description);
                }
                FieldOutcome::Failed(error)
            }
        }
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Validator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Validator")
            .field("table", &self.table)
            .field("mark_fields", &self.mark_fields)
            .finish_non_exhaustive()
    }
}
