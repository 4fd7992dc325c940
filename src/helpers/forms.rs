use serde::Deserialize;
use std::borrow::Cow;
use std::collections::BTreeMap;
use validator::{ValidationError, ValidationErrors};

pub const REQUIRED_MESSAGE: &str = "This field is required.";
pub const INVALID_CHOICE_MESSAGE: &str = "Not a valid choice.";

/// Inline messages per form field, ready for a template.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Just the CSRF token, for actions that have no other input.
#[derive(Debug, Default, Deserialize)]
pub struct CsrfParams {
    #[serde(default)]
    pub csrf_token: String,
}

pub fn field_errors(errors: &ValidationErrors) -> FieldErrors {
    errors
        .field_errors()
        .into_iter()
        .map(|(field, errors)| {
            let messages = errors
                .iter()
                .map(|error| match &error.message {
                    Some(message) => message.to_string(),
                    None => error.code.to_string(),
                })
                .collect();
            (field.to_string(), messages)
        })
        .collect()
}

/// Validator for required text inputs: whitespace alone does not count.
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("required");
        error.message = Some(Cow::Borrowed(REQUIRED_MESSAGE));
        return Err(error);
    }
    Ok(())
}

/// Parse a `<select>` value holding a record id. Empty means nothing chosen.
pub fn parse_optional_id(value: &str) -> Result<Option<i32>, ValidationError> {
    match value.trim() {
        "" => Ok(None),
        raw => raw.parse::<i32>().map(Some).map_err(|_| {
            let mut error = ValidationError::new("invalid_choice");
            error.message = Some(Cow::Borrowed(INVALID_CHOICE_MESSAGE));
            error
        }),
    }
}

/// Validator for optional id selections.
pub fn optional_id(value: &str) -> Result<(), ValidationError> {
    parse_optional_id(value).map(|_| ())
}
