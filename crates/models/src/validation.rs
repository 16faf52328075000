//! Field rules for student records.
//!
//! Every rule is a pure function returning `Result<_, FieldError>`; callers
//! decide how to aggregate them. The same rules guard inserts and updates.

use serde_json::Value;

use crate::errors::FieldError;

pub const ALPHABETIC_ONLY: &str = "must contain alphabetic characters only";
pub const OUT_OF_RANGE: &str = "out of range";
pub const INVALID_FORMAT: &str = "invalid format";
pub const REQUIRED: &str = "is required";
pub const NOT_A_STRING: &str = "must be a string";
pub const NOT_AN_INTEGER: &str = "must be an integer";
pub const TOO_LONG: &str = "must be at most 128 characters";

pub const MIN_AGE: i64 = 0;
pub const MAX_AGE: i64 = 100;
/// Matches the `varchar(128)` name and surname columns; counted in characters.
pub const MAX_NAME_CHARS: usize = 128;
/// Longest address the syntax rules admit: 64-byte local part, `@`, 253-byte domain.
pub const MAX_EMAIL_LEN: usize = MAX_LOCAL_LEN + 1 + MAX_DOMAIN_LEN;

const MAX_LOCAL_LEN: usize = 64;
const MAX_DOMAIN_LEN: usize = 253;
const MAX_LABEL_LEN: usize = 63;
const LOCAL_SPECIALS: &str = "!#$%&'*+/=?^_`{|}~-";

/// Non-empty and made only of alphabetic characters (any script, any case),
/// at most [`MAX_NAME_CHARS`] of them.
pub fn validate_alphabetic(field: &'static str, value: &str) -> Result<(), FieldError> {
    if value.is_empty() || !value.chars().all(char::is_alphabetic) {
        return Err(FieldError::new(field, ALPHABETIC_ONLY));
    }
    if value.chars().count() > MAX_NAME_CHARS {
        return Err(FieldError::new(field, TOO_LONG));
    }
    Ok(())
}

pub fn validate_name(value: &str) -> Result<(), FieldError> {
    validate_alphabetic("name", value)
}

pub fn validate_surname(value: &str) -> Result<(), FieldError> {
    validate_alphabetic("surname", value)
}

/// Inclusive `[0, 100]`; returns the value narrowed to the column type.
pub fn validate_age(value: i64) -> Result<i32, FieldError> {
    if !(MIN_AGE..=MAX_AGE).contains(&value) {
        return Err(FieldError::new("age", OUT_OF_RANGE));
    }
    i32::try_from(value).map_err(|_| FieldError::new("age", OUT_OF_RANGE))
}

pub fn validate_email(value: &str) -> Result<(), FieldError> {
    if is_valid_email(value) {
        Ok(())
    } else {
        Err(FieldError::new("email", INVALID_FORMAT))
    }
}

/// `local@domain` with a dot-atom local part and a dotted hostname whose
/// top-level label is alphabetic.
pub fn is_valid_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if domain.contains('@') {
        return false;
    }
    is_valid_local_part(local) && is_valid_domain(domain)
}

fn is_valid_local_part(local: &str) -> bool {
    if local.is_empty() || local.len() > MAX_LOCAL_LEN {
        return false;
    }
    local.split('.').all(|atom| {
        !atom.is_empty()
            && atom
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || LOCAL_SPECIALS.contains(c))
    })
}

fn is_valid_domain(domain: &str) -> bool {
    if domain.is_empty() || domain.len() > MAX_DOMAIN_LEN {
        return false;
    }
    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 {
        return false;
    }
    let labels_ok = labels.iter().all(|label| {
        !label.is_empty()
            && label.len() <= MAX_LABEL_LEN
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
    });
    let tld = labels[labels.len() - 1];
    labels_ok && tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic())
}

/// Read a text field from a JSON field map. `Ok(None)` when absent or null.
pub fn text_field<'a>(
    fields: &'a serde_json::Map<String, Value>,
    field: &'static str,
) -> Result<Option<&'a str>, FieldError> {
    match fields.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.as_str())),
        Some(_) => Err(FieldError::new(field, NOT_A_STRING)),
    }
}

/// Read an integer field from a JSON field map. `Ok(None)` when absent or null.
pub fn integer_field(
    fields: &serde_json::Map<String, Value>,
    field: &'static str,
) -> Result<Option<i64>, FieldError> {
    match fields.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => match n.as_i64() {
            Some(v) => Ok(Some(v)),
            // whole numbers past i64 are still integers, just unusable ones
            None if n.is_u64() || is_integral_beyond_i64(n.as_f64()) => Err(FieldError::new(field, OUT_OF_RANGE)),
            None => Err(FieldError::new(field, NOT_AN_INTEGER)),
        },
        Some(_) => Err(FieldError::new(field, NOT_AN_INTEGER)),
    }
}

fn is_integral_beyond_i64(value: Option<f64>) -> bool {
    matches!(value, Some(f) if f.is_finite() && f.fract() == 0.0 && (f >= i64::MAX as f64 || f < i64::MIN as f64))
}
