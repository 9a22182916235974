//! Field validators for resource definitions

use thiserror::Error;

/// One invalid field
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// All invalid fields of a resource definition
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {resource}: {}", .errors.iter().map(ToString::to_string).collect::<Vec<_>>().join("; "))]
pub struct SchemaError {
    pub resource: &'static str,
    pub errors: Vec<FieldError>,
}

/// Collects field errors for one resource
#[derive(Debug)]
pub struct Validator {
    resource: &'static str,
    errors: Vec<FieldError>,
}

impl Validator {
    pub fn new(resource: &'static str) -> Self {
        Self {
            resource,
            errors: Vec::new(),
        }
    }

    fn push(&mut self, field: &str, message: String) {
        self.errors.push(FieldError {
            field: field.to_string(),
            message,
        });
    }

    /// Value must not be empty or whitespace
    pub fn not_blank(&mut self, field: &str, value: &str) -> &mut Self {
        if value.trim().is_empty() {
            self.push(field, "must not be an empty string or whitespace".into());
        }
        self
    }

    /// Value must be one of `valid`, optionally ignoring case
    pub fn one_of(&mut self, field: &str, value: &str, valid: &[&str], ignore_case: bool) -> &mut Self {
        let found = valid
            .iter()
            .any(|v| *v == value || (ignore_case && v.eq_ignore_ascii_case(value)));
        if !found {
            self.push(field, format!("expected one of {valid:?}, got '{value}'"));
        }
        self
    }

    /// List must hold at least `min` items
    pub fn min_items(&mut self, field: &str, len: usize, min: usize) -> &mut Self {
        if len < min {
            self.push(field, format!("requires at least {min} item(s), got {len}"));
        }
        self
    }

    /// List must hold at most `max` items
    pub fn max_items(&mut self, field: &str, len: usize, max: usize) -> &mut Self {
        if len > max {
            self.push(field, format!("allows at most {max} item(s), got {len}"));
        }
        self
    }

    pub fn finish(&mut self) -> Result<(), SchemaError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(SchemaError {
                resource: self.resource,
                errors: std::mem::take(&mut self.errors),
            })
        }
    }
}
