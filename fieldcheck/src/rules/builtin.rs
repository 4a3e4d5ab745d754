//! Built-in rules for string fields.

use email_address::{EmailAddress, Options};
use regex::Regex;
use unicode_segmentation::UnicodeSegmentation;

use super::ValidationRule;
use crate::error::{ErrorKind, ValidatorError};

/// Length in user-perceived characters (extended grapheme clusters).
fn char_count(text: &str) -> usize {
    text.graphemes(true).count()
}

/// Require the field to be non-empty after trimming.
#[derive(Debug, Clone, Copy, Default)]
pub struct Required;

impl ValidationRule for Required {
    fn evaluate(&self, text: &str) -> Result<(), ErrorKind> {
        if text.trim().is_empty() {
            Err(ErrorKind::Required)
        } else {
            Ok(())
        }
    }
}

/// Require a single valid email address.
///
/// Only a bare `local@domain` is accepted: display names (`Ada <ada@x.com>`),
/// domain literals (`a@[127.0.0.1]`) and domains without a TLD are rejected.
/// Empty input is rejected; put [`Required`] first in the chain to report
/// the missing value instead.
#[derive(Debug, Clone, Copy, Default)]
pub struct Email;

impl ValidationRule for Email {
    fn evaluate(&self, text: &str) -> Result<(), ErrorKind> {
        let options = Options::default()
            .without_display_text()
            .without_domain_literal()
            .with_required_tld();
        if EmailAddress::parse_with_options(text, options).is_ok() {
            Ok(())
        } else {
            Err(ErrorKind::Email)
        }
    }
}

/// Require minimum length (in user-perceived characters).
#[derive(Debug, Clone, Copy)]
pub struct MinLength(pub usize);

impl ValidationRule for MinLength {
    fn evaluate(&self, text: &str) -> Result<(), ErrorKind> {
        if char_count(text) >= self.0 {
            Ok(())
        } else {
            Err(ErrorKind::MinLength(self.0))
        }
    }
}

/// Require maximum length (in user-perceived characters).
#[derive(Debug, Clone, Copy)]
pub struct MaxLength(pub usize);

impl ValidationRule for MaxLength {
    fn evaluate(&self, text: &str) -> Result<(), ErrorKind> {
        if char_count(text) <= self.0 {
            Ok(())
        } else {
            Err(ErrorKind::MaxLength(self.0))
        }
    }
}

/// Require an exact length (in user-perceived characters).
#[derive(Debug, Clone, Copy)]
pub struct ExactLength(pub usize);

impl ValidationRule for ExactLength {
    fn evaluate(&self, text: &str) -> Result<(), ErrorKind> {
        if char_count(text) == self.0 {
            Ok(())
        } else {
            Err(ErrorKind::ExactLength(self.0))
        }
    }
}

/// Require exactly `digits` ASCII digits and nothing else.
#[derive(Debug, Clone, Copy)]
pub struct ZipCode {
    digits: usize,
}

impl ZipCode {
    pub fn new(digits: usize) -> Self {
        Self { digits }
    }
}

impl Default for ZipCode {
    fn default() -> Self {
        Self::new(5)
    }
}

impl ValidationRule for ZipCode {
    fn evaluate(&self, text: &str) -> Result<(), ErrorKind> {
        if text.len() == self.digits && text.bytes().all(|b| b.is_ascii_digit()) {
            Ok(())
        } else {
            Err(ErrorKind::ZipCode)
        }
    }
}

/// Require exactly `digits` digits once every non-digit is stripped.
///
/// Separators are free-form, so `(555) 123-4567` and `555.123.4567` both
/// pass with the default of ten digits.
#[derive(Debug, Clone, Copy)]
pub struct PhoneNumber {
    digits: usize,
}

impl PhoneNumber {
    pub fn new(digits: usize) -> Self {
        Self { digits }
    }
}

impl Default for PhoneNumber {
    fn default() -> Self {
        Self::new(10)
    }
}

impl ValidationRule for PhoneNumber {
    fn evaluate(&self, text: &str) -> Result<(), ErrorKind> {
        let count = text.chars().filter(|c| c.is_ascii_digit()).count();
        if count == self.digits {
            Ok(())
        } else {
            Err(ErrorKind::PhoneNumber)
        }
    }
}

/// Require at least `min_parts` whitespace-separated names.
#[derive(Debug, Clone, Copy)]
pub struct FullName {
    min_parts: usize,
}

impl FullName {
    pub fn new(min_parts: usize) -> Self {
        Self { min_parts }
    }
}

impl Default for FullName {
    fn default() -> Self {
        Self::new(2)
    }
}

impl ValidationRule for FullName {
    fn evaluate(&self, text: &str) -> Result<(), ErrorKind> {
        if text.split_whitespace().count() >= self.min_parts {
            Ok(())
        } else {
            Err(ErrorKind::FullName)
        }
    }
}

/// Password policy: a minimum length and, optionally, an uppercase letter.
#[derive(Debug, Clone, Copy)]
pub struct Password {
    min_length: usize,
    require_uppercase: bool,
}

impl Password {
    pub fn new(min_length: usize, require_uppercase: bool) -> Self {
        Self {
            min_length,
            require_uppercase,
        }
    }
}

impl Default for Password {
    fn default() -> Self {
        Self::new(8, true)
    }
}

impl ValidationRule for Password {
    fn evaluate(&self, text: &str) -> Result<(), ErrorKind> {
        let long_enough = char_count(text) >= self.min_length;
        let has_upper = !self.require_uppercase || text.chars().any(char::is_uppercase);
        if long_enough && has_upper {
            Ok(())
        } else {
            Err(ErrorKind::Password)
        }
    }
}

/// Require the whole value to match a regex pattern.
#[derive(Debug, Clone)]
pub struct Pattern {
    re: Regex,
}

impl Pattern {
    /// Compile `pattern`, anchored at both ends.
    pub fn new(pattern: &str) -> Result<Self, ValidatorError> {
        let re = Regex::new(&format!("^(?:{pattern})$")).map_err(|e| {
            ValidatorError::InvalidPattern {
                pattern: pattern.to_string(),
                message: e.to_string(),
            }
        })?;
        Ok(Self { re })
    }
}

impl ValidationRule for Pattern {
    fn evaluate(&self, text: &str) -> Result<(), ErrorKind> {
        if self.re.is_match(text) {
            Ok(())
        } else {
            Err(ErrorKind::Pattern)
        }
    }
}
