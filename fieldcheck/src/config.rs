//! Validator configuration types.

use serde::Deserialize;

/// Thresholds used by the built-in rules.
///
/// Deserializes from any serde format; missing keys take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RuleConfig {
    /// Number of digits a phone number must contain after stripping
    /// everything that is not a digit.
    pub phone_digits: usize,

    /// Number of digits in a zip code.
    pub zip_digits: usize,

    /// Minimum password length (in characters).
    pub password_min_length: usize,

    /// Whether a password must contain at least one uppercase letter.
    pub password_requires_uppercase: bool,

    /// Minimum number of whitespace-separated parts in a full name.
    pub full_name_min_parts: usize,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            phone_digits: 10,
            zip_digits: 5,
            password_min_length: 8,
            password_requires_uppercase: true,
            full_name_min_parts: 2,
        }
    }
}

impl RuleConfig {
    /// Set the required phone digit count.
    pub fn phone_digits(mut self, digits: usize) -> Self {
        self.phone_digits = digits;
        self
    }

    /// Set the required zip code digit count.
    pub fn zip_digits(mut self, digits: usize) -> Self {
        self.zip_digits = digits;
        self
    }

    /// Set the minimum password length.
    pub fn password_min_length(mut self, len: usize) -> Self {
        self.password_min_length = len;
        self
    }

    /// Set whether passwords need an uppercase letter.
    pub fn password_requires_uppercase(mut self, required: bool) -> Self {
        self.password_requires_uppercase = required;
        self
    }

    /// Set the minimum number of name parts.
    pub fn full_name_min_parts(mut self, parts: usize) -> Self {
        self.full_name_min_parts = parts;
        self
    }
}

/// Engine-wide configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    /// Thresholds handed to the rule factory.
    pub rules: RuleConfig,

    /// If true, the engine calls `set_error` / `clear_error` on the field
    /// after each evaluation.
    pub mark_fields: bool,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            rules: RuleConfig::default(),
            mark_fields: true,
        }
    }
}

impl ValidatorConfig {
    /// Use the given rule thresholds.
    pub fn rules(mut self, rules: RuleConfig) -> Self {
        self.rules = rules;
        self
    }

    /// Enable or disable signalling outcomes back to fields.
    pub fn mark_fields(mut self, mark: bool) -> Self {
        self.mark_fields = mark;
        self
    }
}
