//! Error types for rule failures and engine misuse.

use std::borrow::Cow;
use std::sync::Arc;

use thiserror::Error;

use crate::field::FieldHandle;

/// Why a rule rejected its input.
///
/// Every kind maps to a fixed human-readable description. Length kinds
/// carry the bound they were checked against so the description can name it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The field was empty or whitespace only.
    Required,
    /// The field is not a single valid email address.
    Email,
    /// The field does not satisfy the password policy.
    Password,
    /// The field is shorter than the bound.
    MinLength(usize),
    /// The field is longer than the bound.
    MaxLength(usize),
    /// The field is not exactly the given length.
    ExactLength(usize),
    /// The field is not a zip code.
    ZipCode,
    /// The field is not a phone number.
    PhoneNumber,
    /// The field does not hold a first and last name.
    FullName,
    /// The field does not match a configured pattern.
    Pattern,
    /// Failure reported by a user-defined rule, with its own message.
    Custom(Cow<'static, str>),
}

impl ErrorKind {
    /// Create a custom error kind carrying its description.
    pub fn custom(message: impl Into<Cow<'static, str>>) -> Self {
        Self::Custom(message.into())
    }

    /// Human-readable description of this kind.
    pub fn description(&self) -> Cow<'static, str> {
        match self {
            Self::Required => Cow::Borrowed("This field is required"),
            Self::Email => Cow::Borrowed("Must be a valid email address"),
            Self::Password => Cow::Borrowed("Password does not meet the requirements"),
            Self::MinLength(min) => Cow::Owned(format!("Must be at least {min} characters long")),
            Self::MaxLength(max) => Cow::Owned(format!("Must be at most {max} characters long")),
            Self::ExactLength(len) => Cow::Owned(format!("Must be exactly {len} characters long")),
            Self::ZipCode => Cow::Borrowed("Enter a valid zip code"),
            Self::PhoneNumber => Cow::Borrowed("Enter a valid phone number"),
            Self::FullName => Cow::Borrowed("Enter a first and last name"),
            Self::Pattern => Cow::Borrowed("Invalid format"),
            Self::Custom(message) => message.clone(),
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.description())
    }
}

/// A rule failure for one registered field.
///
/// Only ever built for a field whose chain failed; carries the first
/// failing rule's kind.
#[derive(Clone)]
pub struct ValidationError {
    /// Registration key of the failing field.
    pub key: String,
    /// The field that failed.
    pub field: Arc<dyn FieldHandle>,
    /// Kind reported by the first failing rule.
    pub kind: ErrorKind,
    /// Human-readable description derived from `kind`.
    pub description: String,
}

impl ValidationError {
    /// Build an error for `key`, deriving the description from `kind`.
    pub fn new(key: impl Into<String>, field: Arc<dyn FieldHandle>, kind: ErrorKind) -> Self {
        let description = kind.description().into_owned();
        Self {
            key: key.into(),
            field,
            kind,
            description,
        }
    }
}

impl std::fmt::Debug for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidationError")
            .field("key", &self.key)
            .field("field", &self.field.field_id())
            .field("kind", &self.kind)
            .field("description", &self.description)
            .finish()
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.key, self.description)
    }
}

/// Misuse of the engine: bad configuration or an unknown field.
///
/// Rule failures are not represented here; they travel as [`ValidationError`]
/// values through the delegate protocol.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidatorError {
    /// The rule factory has no constructor for this tag.
    #[error("Unknown rule type '{0}'")]
    UnknownRule(String),

    /// A field was registered without any rules.
    #[error("Field '{0}' must have at least one validation rule")]
    EmptyRuleChain(String),

    /// A pattern rule was given a regex that does not compile.
    #[error("Invalid pattern '{pattern}': {message}")]
    InvalidPattern {
        /// The offending pattern.
        pattern: String,
        /// Compiler message from the regex engine.
        message: String,
    },

    /// A textual rule tag could not be parsed.
    #[error("Malformed rule tag '{0}'")]
    MalformedTag(String),

    /// No field is registered under this key.
    #[error("Field '{0}' is not registered")]
    FieldNotFound(String),
}

impl ValidatorError {
    /// Whether this error comes from configuration (registration time)
    /// rather than from looking up a field.
    pub fn is_config_error(&self) -> bool {
        !matches!(self, Self::FieldNotFound(_))
    }
}
