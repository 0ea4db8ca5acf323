//! Fluent validator.

use regex::Regex;

use crate::error::FieldValidationError;
use crate::error::ValidationErrors;

/// Collects field errors.
///
/// Only the first failing rule of each field is reported.
#[derive(Debug, Default)]
pub struct Validator {
    errors: Vec<FieldValidationError>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start checking a text field.
    pub fn field<'v>(self, name: impl Into<String>, value: &'v str) -> TextRules<'v> {
        TextRules {
            validator: self,
            name: name.into(),
            value,
            failed: false,
        }
    }

    /// Start checking an optional numeric field.
    pub fn number(self, name: impl Into<String>, value: Option<f64>) -> NumberRules {
        NumberRules {
            validator: self,
            name: name.into(),
            value,
            failed: false,
        }
    }

    /// Record an error that no built-in rule covers.
    pub fn error(mut self, name: impl Into<String>, code: &str, msg: impl Into<String>) -> Self {
        self.errors
            .push(FieldValidationError::with_code(name, msg, code));
        self
    }

    /// `Ok` if nothing failed.
    pub fn finish(self) -> Result<(), ValidationErrors> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors::new(self.errors))
        }
    }
}

/// Rules for one text field.
pub struct TextRules<'v> {
    validator: Validator,
    name: String,
    value: &'v str,
    failed: bool,
}

impl<'v> TextRules<'v> {
    /// Add a custom rule.
    pub fn rule<F>(mut self, code: &str, check: F, msg: impl Into<String>) -> Self
    where
        F: FnOnce(&str) -> bool,
    {
        if !self.failed && !check(self.value) {
            self.failed = true;
            self.validator
                .errors
                .push(FieldValidationError::with_code(self.name.clone(), msg, code));
        }
        self
    }

    /// Require the field to be non-blank.
    pub fn required(self, msg: impl Into<String>) -> Self {
        self.rule("required", |v| !v.trim().is_empty(), msg)
    }

    /// Require at least `min` characters.
    pub fn min_length(self, min: usize, msg: impl Into<String>) -> Self {
        self.rule("min_length", move |v| v.chars().count() >= min, msg)
    }

    /// Require at most `max` characters.
    pub fn max_length(self, max: usize, msg: impl Into<String>) -> Self {
        self.rule("max_length", move |v| v.chars().count() <= max, msg)
    }

    /// Require a valid email address. Empty passes; use `required`.
    pub fn email(self, msg: impl Into<String>) -> Self {
        self.rule(
            "email",
            |v| v.is_empty() || email_address::EmailAddress::is_valid(v),
            msg,
        )
    }

    /// Require an absolute http(s) URL. Empty passes; use `required`.
    pub fn url(self, msg: impl Into<String>) -> Self {
        self.rule(
            "url",
            |v| {
                v.is_empty()
                    || url::Url::parse(v).is_ok_and(|u| matches!(u.scheme(), "http" | "https"))
            },
            msg,
        )
    }

    /// Require the value to match `pattern`. Empty passes.
    pub fn pattern(self, pattern: &Regex, msg: impl Into<String>) -> Self {
        self.rule("pattern", |v| v.is_empty() || pattern.is_match(v), msg)
    }

    /// Continue with the next text field.
    pub fn field<'w>(self, name: impl Into<String>, value: &'w str) -> TextRules<'w> {
        self.validator.field(name, value)
    }

    /// Continue with a numeric field.
    pub fn number(self, name: impl Into<String>, value: Option<f64>) -> NumberRules {
        self.validator.number(name, value)
    }

    pub fn finish(self) -> Result<(), ValidationErrors> {
        self.validator.finish()
    }

    /// Return the validator to add free-form errors.
    pub fn done(self) -> Validator {
        self.validator
    }
}

/// Rules for one optional numeric field. Absent values pass.
pub struct NumberRules {
    validator: Validator,
    name: String,
    value: Option<f64>,
    failed: bool,
}

impl NumberRules {
    fn rule<F>(mut self, code: &str, check: F, msg: impl Into<String>) -> Self
    where
        F: FnOnce(f64) -> bool,
    {
        if let Some(value) = self.value {
            if !self.failed && !check(value) {
                self.failed = true;
                self.validator
                    .errors
                    .push(FieldValidationError::with_code(self.name.clone(), msg, code));
            }
        }
        self
    }

    /// Require a value greater than zero.
    pub fn positive(self, msg: impl Into<String>) -> Self {
        self.rule("positive", |v| v > 0.0, msg)
    }

    /// Require `min <= value <= max`.
    pub fn range(self, min: f64, max: f64, msg: impl Into<String>) -> Self {
        self.rule("range", move |v| (min..=max).contains(&v), msg)
    }

    pub fn field<'w>(self, name: impl Into<String>, value: &'w str) -> TextRules<'w> {
        self.validator.field(name, value)
    }

    pub fn number(self, name: impl Into<String>, value: Option<f64>) -> NumberRules {
        self.validator.number(name, value)
    }

    pub fn finish(self) -> Result<(), ValidationErrors> {
        self.validator.finish()
    }

    pub fn done(self) -> Validator {
        self.validator
    }
}
