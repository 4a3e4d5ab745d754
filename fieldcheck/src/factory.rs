//! Rule factory: maps rule tags to rule constructors.
//!
//! Built-in rules are registered when the factory is created; callers add
//! their own rules by name with [`RuleFactory::register`]. An unknown tag is
//! reported as [`ValidatorError::UnknownRule`], never replaced by a default.

use std::collections::HashMap;
use std::str::FromStr;

use log::{debug, warn};

use crate::config::RuleConfig;
use crate::error::ValidatorError;
use crate::rules::{
    Email, ExactLength, FullName, MaxLength, MinLength, Password, Pattern, PhoneNumber, Required,
    ValidationRule, ZipCode,
};

/// Identifies which rule to build, with any construction parameter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RuleTag {
    Required,
    Email,
    MinLength(usize),
    MaxLength(usize),
    ExactLength(usize),
    ZipCode,
    PhoneNumber,
    FullName,
    Password,
    /// Regex the whole value must match.
    Pattern(String),
    /// A rule registered on the factory under this name.
    Custom(String),
}

impl RuleTag {
    /// Create a tag for a custom rule.
    pub fn custom(name: impl Into<String>) -> Self {
        Self::Custom(name.into())
    }

    /// Name the factory looks this tag up by.
    pub fn name(&self) -> &str {
        match self {
            Self::Required => "required",
            Self::Email => "email",
            Self::MinLength(_) => "min_length",
            Self::MaxLength(_) => "max_length",
            Self::ExactLength(_) => "exact_length",
            Self::ZipCode => "zip_code",
            Self::PhoneNumber => "phone_number",
            Self::FullName => "full_name",
            Self::Password => "password",
            Self::Pattern(_) => "pattern",
            Self::Custom(name) => name.as_str(),
        }
    }
}

impl std::fmt::Display for RuleTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MinLength(n) | Self::MaxLength(n) | Self::ExactLength(n) => {
                write!(f, "{}:{}", self.name(), n)
            }
            Self::Pattern(pattern) => write!(f, "pattern:{}", pattern),
            _ => f.write_str(self.name()),
        }
    }
}

/// Parses `name` or `name:argument`.
///
/// Length tags need a numeric argument and `pattern` needs a non-empty one.
/// Arguments are trimmed, so a pattern cannot start or end with whitespace;
/// build [`RuleTag::Pattern`] directly for that. Any other bare name becomes
/// [`RuleTag::Custom`].
impl FromStr for RuleTag {
    type Err = ValidatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (name, arg) = match s.split_once(':') {
            Some((name, arg)) => (name.trim(), Some(arg.trim())),
            None => (s, None),
        };

        let malformed = || ValidatorError::MalformedTag(s.to_string());
        let bound = |arg: Option<&str>| -> Result<usize, ValidatorError> {
            arg.and_then(|a| a.parse().ok()).ok_or_else(malformed)
        };

        let tag = match (name, arg) {
            ("", _) => return Err(malformed()),
            ("min_length", arg) => Self::MinLength(bound(arg)?),
            ("max_length", arg) => Self::MaxLength(bound(arg)?),
            ("exact_length", arg) => Self::ExactLength(bound(arg)?),
            ("pattern", Some(pattern)) if !pattern.is_empty() => Self::Pattern(pattern.to_string()),
            ("pattern", _) => return Err(malformed()),
            (_, Some(_)) => return Err(malformed()),
            ("required", None) => Self::Required,
            ("email", None) => Self::Email,
            ("zip_code", None) => Self::ZipCode,
            ("phone_number", None) => Self::PhoneNumber,
            ("full_name", None) => Self::FullName,
            ("password", None) => Self::Password,
            (custom, None) => Self::Custom(custom.to_string()),
        };
        Ok(tag)
    }
}

/// Constructor stored in the factory.
///
/// Receives the requested tag (to read its parameter) and the rule thresholds.
pub type RuleConstructor = Box<
    dyn Fn(&RuleTag, &RuleConfig) -> Result<Box<dyn ValidationRule>, ValidatorError> + Send + Sync,
>;

/// Registry of rule constructors keyed by tag name.
pub struct RuleFactory {
    constructors: HashMap<String, RuleConstructor>,
    config: RuleConfig,
}

impl RuleFactory {
    /// Create a factory with the built-in rules and default thresholds.
    pub fn new() -> Self {
        Self::with_config(RuleConfig::default())
    }

    /// Create a factory with the built-in rules and the given thresholds.
    pub fn with_config(config: RuleConfig) -> Self {
        let mut factory = Self {
            constructors: HashMap::new(),
            config,
        };
        factory.register_builtin_rules();
        factory
    }

    fn register_builtin_rules(&mut self) {
        self.insert("required", |_, _| Ok(Box::new(Required)));
        self.insert("email", |_, _| Ok(Box::new(Email)));
        self.insert("min_length", |tag, _| match tag {
            RuleTag::MinLength(n) => Ok(Box::new(MinLength(*n))),
            other => Err(ValidatorError::MalformedTag(other.to_string())),
        });
        self.insert("max_length", |tag, _| match tag {
            RuleTag::MaxLength(n) => Ok(Box::new(MaxLength(*n))),
            other => Err(ValidatorError::MalformedTag(other.to_string())),
        });
        self.insert("exact_length", |tag, _| match tag {
            RuleTag::ExactLength(n) => Ok(Box::new(ExactLength(*n))),
            other => Err(ValidatorError::MalformedTag(other.to_string())),
        });
        self.insert("zip_code", |_, config| {
            Ok(Box::new(ZipCode::new(config.zip_digits)))
        });
        self.insert("phone_number", |_, config| {
            Ok(Box::new(PhoneNumber::new(config.phone_digits)))
        });
        self.insert("full_name", |_, config| {
            Ok(Box::new(FullName::new(config.full_name_min_parts)))
        });
        self.insert("password", |_, config| {
            Ok(Box::new(Password::new(
                config.password_min_length,
                config.password_requires_uppercase,
            )))
        });
        self.insert("pattern", |tag, _| match tag {
            RuleTag::Pattern(pattern) => Ok(Box::new(Pattern::new(pattern)?)),
            other => Err(ValidatorError::MalformedTag(other.to_string())),
        });

        debug!("Registered {} built-in rules", self.constructors.len());
    }

    fn insert<F>(&mut self, name: &str, constructor: F)
    where
        F: Fn(&RuleTag, &RuleConfig) -> Result<Box<dyn ValidationRule>, ValidatorError>
            + Send
            + Sync
            + 'static,
    {
        self.constructors
            .insert(name.to_string(), Box::new(constructor));
    }

    /// Register a constructor under `name`.
    ///
    /// Tags named `name` (usually [`RuleTag::Custom`]) will be built with it.
    /// Registering an existing name replaces the previous constructor.
    pub fn register<F>(&mut self, name: impl Into<String>, constructor: F)
    where
        F: Fn(&RuleTag, &RuleConfig) -> Result<Box<dyn ValidationRule>, ValidatorError>
            + Send
            + Sync
            + 'static,
    {
        let name = name.into();
        if self.constructors.contains_key(&name) {
            warn!("Replacing rule constructor '{}'", name);
        } else {
            debug!("Registering rule constructor '{}'", name);
        }
        self.insert(&name, constructor);
    }

    /// Check whether a constructor exists for `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.constructors.contains_key(name)
    }

    /// Names of all registered constructors (unordered).
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.constructors.keys().map(String::as_str)
    }

    /// Thresholds passed to constructors.
    pub fn config(&self) -> &RuleConfig {
        &self.config
    }

    /// Build a fresh rule for `tag`.
    pub fn create(&self, tag: &RuleTag) -> Result<Box<dyn ValidationRule>, ValidatorError> {
        let Some(constructor) = self.constructors.get(tag.name()) else {
            warn!("No rule registered for tag '{}'", tag);
            return Err(ValidatorError::UnknownRule(tag.name().to_string()));
        };
        constructor(tag, &self.config)
    }
}

impl Default for RuleFactory {
    fn default() -> Self {
        Self::new()
    }
}
