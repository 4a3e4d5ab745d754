//! Signup Example
//!
//! Validates a small signup form twice: once with bad input, once after the
//! user fixes it. Logs go to `signup.log`.

use std::fs::File;

use fieldcheck::prelude::*;
use log::LevelFilter;
use simplelog::{Config, WriteLogger};

// ============================================================================
// Delegate
// ============================================================================

struct Printer;

impl FieldDelegate for Printer {
    fn on_field_success(&mut self, key: &str, _field: &dyn FieldHandle) {
        println!("  {key}: ok");
    }

    fn on_field_failure(&mut self, key: &str, error: &ValidationError) {
        println!("  {key}: {}", error.description);
    }
}

impl FormDelegate for Printer {
    fn on_all_success(&mut self) {
        println!("  form is valid");
    }

    fn on_all_failure(&mut self, errors: &FieldErrors) {
        println!("  {} field(s) need attention:", errors.len());
        for (key, error) in errors {
            println!("    {key}: {}", error.description);
        }
    }
}

// ============================================================================
// Main
// ============================================================================

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let log_file = File::create("signup.log")?;
    WriteLogger::init(LevelFilter::Trace, Config::default(), log_file)?;

    let name = TextField::with_value("Ada");
    let email = TextField::with_value("ada@");
    let phone = TextField::with_value("(555) 123-4567");
    let password = TextField::with_value("secret");

    let mut validator = Validator::new();
    validator.register("name", &name, [RuleTag::Required, RuleTag::FullName])?;
    validator.register("email", &email, [RuleTag::Required, RuleTag::Email])?;
    validator.register("phone", &phone, [RuleTag::PhoneNumber])?;
    validator.register("password", &password, [RuleTag::Required, RuleTag::Password])?;

    // Unknown tags are rejected up front.
    if let Err(e) = validator.register("nickname", &name, [RuleTag::custom("emoji_only")]) {
        println!("registration failed: {e}");
    }

    println!("Single field:");
    validator.validate_field("email", &mut Printer)?;

    println!("First submit:");
    validator.validate_all(&mut Printer);

    name.set_value("Ada Lovelace");
    email.set_value("ada@example.com");
    password.set_value("Analytical1");

    println!("Second submit:");
    validator.validate_all(&mut Printer);

    Ok(())
}
