//! Tests for the validation engine.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use fieldcheck::prelude::*;

/// Records every delegate callback it receives.
#[derive(Default)]
struct Recorder {
    successes: Vec<String>,
    failures: Vec<(String, ErrorKind)>,
    all_success: usize,
    all_failure: Vec<Vec<String>>,
}

impl Recorder {
    fn field_events(&self) -> usize {
        self.successes.len() + self.failures.len()
    }
}

impl FieldDelegate for Recorder {
    fn on_field_success(&mut self, key: &str, _field: &dyn FieldHandle) {
        self.successes.push(key.to_string());
    }

    fn on_field_failure(&mut self, key: &str, error: &ValidationError) {
        self.failures.push((key.to_string(), error.kind.clone()));
    }
}

impl FormDelegate for Recorder {
    fn on_all_success(&mut self) {
        self.all_success += 1;
    }

    fn on_all_failure(&mut self, errors: &FieldErrors) {
        self.all_failure
            .push(errors.keys().cloned().collect());
    }
}

/// Rule that always fails.
struct AlwaysFail;

impl ValidationRule for AlwaysFail {
    fn evaluate(&self, _text: &str) -> Result<(), ErrorKind> {
        Err(ErrorKind::custom("always fails"))
    }
}

/// Rule that passes and counts how often it was called.
struct InvocationRecorder(Arc<AtomicUsize>);

impl ValidationRule for InvocationRecorder {
    fn evaluate(&self, _text: &str) -> Result<(), ErrorKind> {
        self.0.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

fn boxed<R: ValidationRule + 'static>(rule: R) -> Box<dyn ValidationRule> {
    Box::new(rule)
}

#[test]
fn test_email_field_scenario() {
    let email = TextField::new();
    let mut validator = Validator::new();
    validator
        .register("Email", &email, [RuleTag::Required, RuleTag::Email])
        .unwrap();

    let mut recorder = Recorder::default();

    validator.validate_field("Email", &mut recorder).unwrap();
    assert_eq!(
        recorder.failures,
        vec![("Email".to_string(), ErrorKind::Required)]
    );

    email.set_value("not-an-email");
    validator.validate_field("Email", &mut recorder).unwrap();
    assert_eq!(
        recorder.failures.last(),
        Some(&("Email".to_string(), ErrorKind::Email))
    );

    email.set_value("a@b.com");
    validator.validate_field("Email", &mut recorder).unwrap();
    assert_eq!(recorder.successes, vec!["Email".to_string()]);
    assert_eq!(recorder.field_events(), 3);
}

#[test]
fn test_exactly_one_event_per_call() {
    let field = TextField::with_value("hello");
    let mut validator = Validator::new();
    validator
        .register("greeting", &field, [RuleTag::Required, RuleTag::MinLength(3)])
        .unwrap();

    for value in ["", "hi", "hello"] {
        field.set_value(value);
        let mut recorder = Recorder::default();
        validator.validate_field("greeting", &mut recorder).unwrap();
        assert_eq!(recorder.field_events(), 1, "value {:?}", value);
    }
}

#[test]
fn test_short_circuit_skips_later_rules() {
    let calls = Arc::new(AtomicUsize::new(0));
    let field = TextField::with_value("anything");
    let mut validator = Validator::new();
    validator
        .register_rules(
            "field",
            &field,
            vec![boxed(AlwaysFail), boxed(InvocationRecorder(Arc::clone(&calls)))],
        )
        .unwrap();

    let outcome = validator.check_field("field").unwrap();
    assert_eq!(
        outcome.error().map(|e| &e.kind),
        Some(&ErrorKind::custom("always fails"))
    );
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn test_passing_rules_all_run() {
    let calls = Arc::new(AtomicUsize::new(0));
    let field = TextField::with_value("x");
    let mut validator = Validator::new();
    validator
        .register_rules(
            "field",
            &field,
            vec![
                boxed(InvocationRecorder(Arc::clone(&calls))),
                boxed(InvocationRecorder(Arc::clone(&calls))),
            ],
        )
        .unwrap();

    assert!(validator.check_field("field").unwrap().is_passed());
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn test_rule_order_is_honored() {
    let first = TextField::new();
    let second = TextField::new();
    let mut validator = Validator::new();
    validator
        .register("required_first", &first, [RuleTag::Required, RuleTag::Email])
        .unwrap();
    validator
        .register("email_first", &second, [RuleTag::Email, RuleTag::Required])
        .unwrap();

    let kind = |key: &str| validator.check_field(key).unwrap().error().map(|e| e.kind.clone());
    assert_eq!(kind("required_first"), Some(ErrorKind::Required));
    assert_eq!(kind("email_first"), Some(ErrorKind::Email));
}

#[test]
fn test_unknown_key_reports_not_found() {
    let validator = Validator::new();
    let mut recorder = Recorder::default();

    let result = validator.validate_field("nonexistent", &mut recorder);
    assert_eq!(
        result,
        Err(ValidatorError::FieldNotFound("nonexistent".to_string()))
    );
    assert_eq!(recorder.field_events(), 0);
}

#[test]
fn test_reregistration_replaces_chain() {
    let field = TextField::with_value("ab");
    let mut validator = Validator::new();
    validator
        .register("code", &field, [RuleTag::MinLength(3)])
        .unwrap();
    assert!(!validator.check_field("code").unwrap().is_passed());

    validator
        .register("code", &field, [RuleTag::MaxLength(2)])
        .unwrap();
    assert!(validator.check_field("code").unwrap().is_passed());
    assert_eq!(validator.table().len(), 1);
    assert_eq!(validator.table().lookup("code").map(|r| r.rules().len()), Some(1));
}

#[test]
fn test_reregistration_replaces_field() {
    let old = TextField::with_value("");
    let new = TextField::with_value("filled");
    let mut validator = Validator::new();
    validator.register("name", &old, [RuleTag::Required]).unwrap();
    validator.register("name", &new, [RuleTag::Required]).unwrap();

    assert!(validator.check_field("name").unwrap().is_passed());
}

#[test]
fn test_unknown_tag_rejected_at_registration() {
    let field = TextField::new();
    let mut validator = Validator::new();
    validator.register("name", &field, [RuleTag::Required]).unwrap();

    let result = validator.register("name", &field, [RuleTag::custom("nope")]);
    assert_eq!(result, Err(ValidatorError::UnknownRule("nope".to_string())));

    // The previous registration is untouched.
    let outcome = validator.check_field("name").unwrap();
    assert_eq!(outcome.error().map(|e| &e.kind), Some(&ErrorKind::Required));
}

#[test]
fn test_empty_chain_rejected() {
    let field = TextField::new();
    let mut validator = Validator::new();
    let result = validator.register("name", &field, Vec::<RuleTag>::new());
    assert_eq!(result, Err(ValidatorError::EmptyRuleChain("name".to_string())));
    assert!(validator.table().is_empty());
}

#[test]
fn test_unregister() {
    let field = TextField::new();
    let mut validator = Validator::new();
    validator.register("name", &field, [RuleTag::Required]).unwrap();

    assert!(validator.unregister("name"));
    assert!(!validator.unregister("name"));
    assert!(matches!(
        validator.check_field("name"),
        Err(ValidatorError::FieldNotFound(_))
    ));
}

#[test]
fn test_validate_all_scenario() {
    let name = TextField::with_value("Ada");
    let email = TextField::with_value("ada@example");
    let zip = TextField::with_value("12345");

    let mut validator = Validator::new();
    validator
        .register("name", &name, [RuleTag::Required, RuleTag::FullName])
        .unwrap();
    validator
        .register("email", &email, [RuleTag::Required, RuleTag::Email])
        .unwrap();
    validator
        .register("zip", &zip, [RuleTag::Required, RuleTag::ZipCode])
        .unwrap();

    email.set_value("");

    let mut recorder = Recorder::default();
    validator.validate_all(&mut recorder);
    assert_eq!(recorder.all_success, 0);
    assert_eq!(
        recorder.all_failure,
        vec![vec!["name".to_string(), "email".to_string()]]
    );

    let result = validator.check_all();
    assert_eq!(result.len(), 2);
    assert_eq!(result.error_for("name").map(|e| &e.kind), Some(&ErrorKind::FullName));
    assert_eq!(result.error_for("email").map(|e| &e.kind), Some(&ErrorKind::Required));
    assert!(result.error_for("zip").is_none());
    assert_eq!(result.first_error().map(|e| e.key.as_str()), Some("name"));

    name.set_value("Ada Lovelace");
    email.set_value("ada@example.com");

    let mut recorder = Recorder::default();
    validator.validate_all(&mut recorder);
    assert_eq!(recorder.all_success, 1);
    assert!(recorder.all_failure.is_empty());
    assert!(validator.check_all().is_valid());
}

#[test]
fn test_validate_all_single_failure_still_reports_mapping() {
    let a = TextField::with_value("ok");
    let b = TextField::new();
    let mut validator = Validator::new();
    validator.register("a", &a, [RuleTag::Required]).unwrap();
    validator.register("b", &b, [RuleTag::Required]).unwrap();

    let mut recorder = Recorder::default();
    validator.validate_all(&mut recorder);
    assert_eq!(recorder.all_failure, vec![vec!["b".to_string()]]);
}

#[test]
fn test_validate_all_evaluates_every_field() {
    let calls = Arc::new(AtomicUsize::new(0));
    let mut validator = Validator::new();
    let fields: Vec<TextField> = (0..5).map(|_| TextField::new()).collect();
    for (i, field) in fields.iter().enumerate() {
        validator
            .register_rules(
                format!("f{i}"),
                field,
                vec![
                    boxed(InvocationRecorder(Arc::clone(&calls))),
                    boxed(AlwaysFail),
                ],
            )
            .unwrap();
    }

    let result = validator.check_all();
    assert_eq!(result.len(), 5);
    assert_eq!(calls.load(Ordering::SeqCst), 5);
}

#[test]
fn test_validate_all_with_no_fields_succeeds() {
    let validator = Validator::new();
    let mut recorder = Recorder::default();
    validator.validate_all(&mut recorder);
    assert_eq!(recorder.all_success, 1);
}

#[test]
fn test_fields_are_marked() {
    let field = TextField::new();
    let mut validator = Validator::new();
    validator.register("name", &field, [RuleTag::Required]).unwrap();

    validator.check_field("name").unwrap();
    assert_eq!(field.error().as_deref(), Some("This field is required"));

    field.set_value("Ada");
    validator.check_field("name").unwrap();
    assert!(!field.has_error());
}

#[test]
fn test_marking_can_be_disabled() {
    let field = TextField::new();
    let mut validator = Validator::with_config(ValidatorConfig::default().mark_fields(false));
    validator.register("name", &field, [RuleTag::Required]).unwrap();

    assert!(!validator.check_field("name").unwrap().is_passed());
    assert!(!field.has_error());
}

#[test]
fn test_config_thresholds_reach_rules() {
    let phone = TextField::with_value("555-1234");
    let config = ValidatorConfig::default().rules(RuleConfig::default().phone_digits(7));
    let mut validator = Validator::with_config(config);
    validator.register("phone", &phone, [RuleTag::PhoneNumber]).unwrap();

    assert!(validator.check_field("phone").unwrap().is_passed());
}

#[test]
fn test_custom_rule_through_factory() {
    let field = TextField::with_value("7");
    let mut validator = Validator::new();
    validator.factory_mut().register("even", |_, _| {
        Ok(Box::new(FnRule::new(
            |v| v.parse::<i64>().is_ok_and(|n| n % 2 == 0),
            ErrorKind::custom("Must be an even number"),
        )))
    });
    validator
        .register("count", &field, [RuleTag::Required, "even".parse().unwrap()])
        .unwrap();

    let outcome = validator.check_field("count").unwrap();
    let error = outcome.error().unwrap();
    assert_eq!(error.description, "Must be an even number");

    field.set_value("8");
    assert!(validator.check_field("count").unwrap().is_passed());
}

#[test]
fn test_tags_parsed_from_text() {
    let field = TextField::with_value("abc");
    let mut validator = Validator::new();
    let tags = ["required", "min_length:2", "pattern:[a-z]+"]
        .iter()
        .map(|s| s.parse::<RuleTag>())
        .collect::<Result<Vec<_>, _>>()
        .unwrap();
    validator.register("code", &field, tags).unwrap();

    assert!(validator.check_field("code").unwrap().is_passed());
    field.set_value("abc1");
    assert_eq!(
        validator.check_field("code").unwrap().error().map(|e| &e.kind),
        Some(&ErrorKind::Pattern)
    );
}

#[test]
fn test_error_carries_field_and_description() {
    let field = TextField::with_value("x");
    let mut validator = Validator::new();
    validator.register("name", &field, [RuleTag::MinLength(2)]).unwrap();

    let outcome = validator.check_field("name").unwrap();
    let error = outcome.error().unwrap();
    assert_eq!(error.key, "name");
    assert_eq!(error.field.field_id(), field.field_id());
    assert_eq!(error.description, "Must be at least 2 characters long");
}
