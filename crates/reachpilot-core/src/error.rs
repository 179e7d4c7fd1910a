use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// Fields of a candidate connection that can fail validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Email,
    Name,
    LinkedinUrl,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Email => "email",
            Field::Name => "name",
            Field::LinkedinUrl => "linkedin_url",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single field-level validation failure. Malformed input is a modeled
/// outcome, never a panic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("value is required")]
    Required,
    #[error("not a valid email address")]
    Format,
    #[error("value is too long (maximum {max} characters)")]
    TooLong { max: usize },
    #[error("only letters, spaces, hyphens, apostrophes, and periods are allowed")]
    InvalidChars,
    #[error("must start with https://www.linkedin.com/")]
    BadPrefix,
    #[error("not a well-formed URL")]
    ParseError,
    #[error("host must be www.linkedin.com")]
    BadHost,
}

impl FieldError {
    /// Stable machine-readable kind string.
    pub fn kind(&self) -> &'static str {
        match self {
            FieldError::Required => "required",
            FieldError::Format => "format",
            FieldError::TooLong { .. } => "too_long",
            FieldError::InvalidChars => "invalid_chars",
            FieldError::BadPrefix => "bad_prefix",
            FieldError::ParseError => "parse_error",
            FieldError::BadHost => "bad_host",
        }
    }
}

/// Per-field validation failures, at most one per field.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationErrors(BTreeMap<Field, FieldError>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: Field, error: FieldError) {
        self.0.insert(field, error);
    }

    pub fn get(&self, field: Field) -> Option<&FieldError> {
        self.0.get(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::collections::btree_map::Iter<'_, Field, FieldError> {
        self.0.iter()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, error) in &self.0 {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {error}")?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

#[cfg(test)]
mod tests {
    use super::{Field, FieldError, ValidationErrors};

    #[test]
    fn display_joins_fields_in_order() {
        let mut errors = ValidationErrors::new();
        errors.insert(Field::LinkedinUrl, FieldError::BadPrefix);
        errors.insert(Field::Email, FieldError::Required);
        assert_eq!(
            errors.to_string(),
            "email: value is required; linkedin_url: must start with https://www.linkedin.com/"
        );
    }

    #[test]
    fn kind_strings_are_stable() {
        assert_eq!(FieldError::Format.kind(), "format");
        assert_eq!(FieldError::TooLong { max: 320 }.kind(), "too_long");
        assert_eq!(FieldError::BadHost.kind(), "bad_host");
    }
}
