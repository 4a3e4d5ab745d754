//! Declarative field validation.
//!
//! Fields are registered under a key together with an ordered chain of
//! rules. A chain is evaluated left to right and stops at the first failing
//! rule; the outcome is returned as a value or pushed to a delegate.
//!
//! # Example
//!
//! ```ignore
//! use fieldcheck::prelude::*;
//!
//! let name = TextField::new();
//! let email = TextField::new();
//!
//! let mut validator = Validator::new();
//! validator.register("name", &name, [RuleTag::Required, RuleTag::FullName])?;
//! validator.register("email", &email, [RuleTag::Required, RuleTag::Email])?;
//!
//! match validator.check_all() {
//!     ValidationResult::Valid => { /* submit */ }
//!     ValidationResult::Invalid(errors) => {
//!         for (key, error) in &errors {
//!             eprintln!("{key}: {}", error.description);
//!         }
//!     }
//! }
//! ```

pub mod config;
pub mod error;
pub mod factory;
pub mod field;
pub mod result;
pub mod rules;
pub mod shared;
pub mod table;
pub mod validator;

pub use validator::Validator;

pub mod prelude {
    pub use crate::config::{RuleConfig, ValidatorConfig};
    pub use crate::error::{ErrorKind, ValidationError, ValidatorError};
    pub use crate::factory::{RuleFactory, RuleTag};
    pub use crate::field::{FieldHandle, TextField};
    pub use crate::result::{FieldDelegate, FieldErrors, FieldOutcome, FormDelegate, ValidationResult};
    pub use crate::rules::{FnRule, ValidationRule};
    pub use crate::shared::SharedValidator;
    pub use crate::validator::Validator;
}
