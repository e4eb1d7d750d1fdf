//! Field-keyed validation errors.
//!
//! [`FieldErrors`] is the error set returned to API callers when a write is
//! rejected: each key names a request field (nested entries use
//! `parent[index].field`), each value lists human-readable messages.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use validator::{ValidationError, ValidationErrors, ValidationErrorsKind};

/// Ordered map of field name to the messages rejecting it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an error set holding a single message.
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    /// Merge `other` into `self`, prefixing every field of `other` with
    /// `prefix` (e.g. `tickets[2]`).
    pub fn merge_prefixed(&mut self, prefix: &str, other: FieldErrors) {
        for (field, messages) in other.0 {
            self.0
                .entry(format!("{prefix}.{field}"))
                .or_default()
                .extend(messages);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// `Ok(())` when empty, otherwise `Err(self)`.
    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.0 {
            for message in messages {
                if !first {
                    f.write_str("; ")?;
                }
                write!(f, "{field}: {message}")?;
                first = false;
            }
        }
        Ok(())
    }
}

impl std::error::Error for FieldErrors {}

impl From<ValidationErrors> for FieldErrors {
    fn from(errors: ValidationErrors) -> Self {
        let mut out = FieldErrors::new();
        collect(&mut out, None, &errors);
        out
    }
}

fn collect(out: &mut FieldErrors, prefix: Option<&str>, errors: &ValidationErrors) {
    for (field, kind) in errors.errors() {
        let name = match prefix {
            Some(prefix) => format!("{prefix}.{field}"),
            None => field.to_string(),
        };
        match kind {
            ValidationErrorsKind::Field(list) => {
                for error in list {
                    out.add(name.clone(), describe(error));
                }
            }
            ValidationErrorsKind::Struct(inner) => collect(out, Some(&name), inner),
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    collect(out, Some(&format!("{name}[{index}]")), inner);
                }
            }
        }
    }
}

/// Human-readable message for a validator error, preferring the message set
/// on the field attribute.
fn describe(error: &ValidationError) -> String {
    if let Some(message) = &error.message {
        return message.to_string();
    }
    let param = |key: &str| error.params.get(key).map(|v| v.to_string());
    match error.code.as_ref() {
        "range" => match (param("min"), param("max")) {
            (Some(min), Some(max)) => format!("Ensure this value is between {min} and {max}."),
            (Some(min), None) => format!("Ensure this value is greater than or equal to {min}."),
            (None, Some(max)) => format!("Ensure this value is less than or equal to {max}."),
            (None, None) => "Value is out of range.".to_string(),
        },
        "length" => match (param("min"), param("max")) {
            (Some(min), _) if min == "1" => "This field may not be blank.".to_string(),
            (_, Some(max)) => format!("Ensure this field has no more than {max} characters."),
            (Some(min), None) => format!("Ensure this field has at least {min} characters."),
            (None, None) => "Invalid length.".to_string(),
        },
        "email" => "Enter a valid email address.".to_string(),
        code => format!("Invalid value ({code})."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Sample {
        #[validate(range(min = 1))]
        distance: i32,
        #[validate(length(min = 1, max = 8))]
        name: String,
    }

    #[test]
    fn single_error_is_keyed_by_field() {
        let errors = FieldErrors::single("seat", "Seat 4 is out of range");
        assert_eq!(errors.get("seat"), Some(&["Seat 4 is out of range".to_string()][..]));
        assert!(errors.get("cargo").is_none());
    }

    #[test]
    fn merge_prefixed_namespaces_nested_fields() {
        let mut errors = FieldErrors::new();
        errors.merge_prefixed("tickets[1]", FieldErrors::single("seat", "taken"));
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["tickets[1].seat"]);
    }

    #[test]
    fn display_joins_all_messages() {
        let mut errors = FieldErrors::new();
        errors.add("cargo", "bad cargo");
        errors.add("seat", "bad seat");
        assert_eq!(errors.to_string(), "cargo: bad cargo; seat: bad seat");
    }

    #[test]
    fn empty_errors_convert_to_ok() {
        assert!(FieldErrors::new().into_result().is_ok());
        assert!(FieldErrors::single("x", "y").into_result().is_err());
    }

    #[test]
    fn converts_validator_errors() {
        let sample = Sample {
            distance: 0,
            name: String::new(),
        };
        let errors: FieldErrors = sample.validate().unwrap_err().into();
        assert_eq!(
            errors.get("distance"),
            Some(&["Ensure this value is greater than or equal to 1.".to_string()][..])
        );
        assert_eq!(
            errors.get("name"),
            Some(&["This field may not be blank.".to_string()][..])
        );
    }
}
