//! Field registration table: the single store of fields and their rules.

use std::sync::Arc;

use indexmap::IndexMap;
use log::trace;

use crate::error::{ErrorKind, ValidatorError};
use crate::field::FieldHandle;
use crate::rules::ValidationRule;

/// Ordered, non-empty list of rules for one field.
///
/// Rules run in insertion order and evaluation stops at the first failure,
/// so earlier rules take priority (e.g. `Required` before `Email`).
pub struct RuleChain {
    rules: Vec<Box<dyn ValidationRule>>,
}

impl RuleChain {
    /// Build a chain for the field registered under `key`.
    ///
    /// Fails if `rules` is empty.
    pub fn new(key: &str, rules: Vec<Box<dyn ValidationRule>>) -> Result<Self, ValidatorError> {
        if rules.is_empty() {
            return Err(ValidatorError::EmptyRuleChain(key.to_string()));
        }
        Ok(Self { rules })
    }

    /// Run the rules against `text`, stopping at the first failure.
    pub fn evaluate(&self, text: &str) -> Result<(), ErrorKind> {
        for (index, rule) in self.rules.iter().enumerate() {
            if let Err(kind) = rule.evaluate(text) {
                trace!("Rule #{} failed: {:?}", index, kind);
                return Err(kind);
            }
            trace!("Rule #{} passed", index);
        }
        Ok(())
    }

    /// Number of rules in the chain.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Always false; chains are never empty.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl std::fmt::Debug for RuleChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleChain")
            .field("len", &self.rules.len())
            .finish()
    }
}

/// One registered field: its key, handle and rule chain.
pub struct Registration {
    key: String,
    field: Arc<dyn FieldHandle>,
    rules: RuleChain,
}

impl Registration {
    pub fn new(key: impl Into<String>, field: Arc<dyn FieldHandle>, rules: RuleChain) -> Self {
        Self {
            key: key.into(),
            field,
            rules,
        }
    }

    /// Registration key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The registered field.
    pub fn field(&self) -> &Arc<dyn FieldHandle> {
        &self.field
    }

    /// The field's rules.
    pub fn rules(&self) -> &RuleChain {
        &self.rules
    }
}

impl std::fmt::Debug for Registration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registration")
            .field("key", &self.key)
            .field("field", &self.field.field_id())
            .field("rules", &self.rules)
            .finish()
    }
}

/// Table of registrations keyed by registration key.
///
/// Iteration follows first-registration order. Re-registering a key replaces
/// the whole registration in place; nothing of the old chain survives.
#[derive(Debug, Default)]
pub struct FieldTable {
    entries: IndexMap<String, Registration>,
}

impl FieldTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    /// Insert or replace the registration for its key.
    ///
    /// Returns the registration it replaced, if any.
    pub fn register(&mut self, registration: Registration) -> Option<Registration> {
        self.entries
            .insert(registration.key.clone(), registration)
    }

    /// Get the registration for `key`.
    pub fn lookup(&self, key: &str) -> Option<&Registration> {
        self.entries.get(key)
    }

    /// Remove the registration for `key`.
    ///
    /// Remaining entries keep their relative order.
    pub fn unregister(&mut self, key: &str) -> Option<Registration> {
        self.entries.shift_remove(key)
    }

    /// Iterate over every registration.
    pub fn iter(&self) -> impl Iterator<Item = &Registration> {
        self.entries.values()
    }

    /// Iterate over registered keys.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Check whether `key` is registered.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of registered fields.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no fields are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remove every registration.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
