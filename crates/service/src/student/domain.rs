use std::fmt;

use models::errors::FieldError;
use models::validation::{self, integer_field, text_field, REQUIRED};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::errors::ServiceError;

/// Candidate record or change set as received on the wire.
pub type FieldMap = Map<String, Value>;

/// Keys an update body may carry.
pub const ALLOWED_UPDATES: [&str; 4] = ["name", "surname", "email", "age"];

/// Stored student (business view). `id` is assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: Uuid,
    pub name: String,
    pub surname: String,
    pub age: i32,
    pub email: String,
}

impl From<models::student::Model> for Student {
    fn from(m: models::student::Model) -> Self {
        Self { id: m.id, name: m.name, surname: m.surname, age: m.age, email: m.email }
    }
}

/// Fully validated record ready to be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStudent {
    pub name: String,
    pub surname: String,
    pub age: i32,
    pub email: String,
}

impl NewStudent {
    /// Check all four fields; every failure is reported, none is persisted.
    /// Keys outside the record are ignored.
    pub fn from_fields(fields: &FieldMap) -> Result<Self, Vec<FieldError>> {
        let mut errors = Vec::new();
        let name = required_text(fields, "name", validation::validate_name, &mut errors);
        let surname = required_text(fields, "surname", validation::validate_surname, &mut errors);
        let age = required_age(fields, &mut errors);
        let email = required_text(fields, "email", validation::validate_email, &mut errors);

        match (name, surname, age, email) {
            (Some(name), Some(surname), Some(age), Some(email)) if errors.is_empty() => {
                Ok(Self { name, surname, age, email })
            }
            _ => Err(errors),
        }
    }
}

/// Validated partial update. Absent fields stay untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentChanges {
    pub name: Option<String>,
    pub surname: Option<String>,
    pub age: Option<i32>,
    pub email: Option<String>,
}

impl StudentChanges {
    /// Reject the whole body if any key is outside [`ALLOWED_UPDATES`], then
    /// re-validate each supplied value with the insert rules.
    pub fn from_fields(fields: &FieldMap) -> Result<Self, ServiceError> {
        if !fields.keys().all(|k| ALLOWED_UPDATES.contains(&k.as_str())) {
            return Err(ServiceError::bad_request("update is not allowed"));
        }

        let mut errors = Vec::new();
        let changes = Self {
            name: optional_text(fields, "name", validation::validate_name, &mut errors),
            surname: optional_text(fields, "surname", validation::validate_surname, &mut errors),
            age: if fields.contains_key("age") { required_age(fields, &mut errors) } else { None },
            email: optional_text(fields, "email", validation::validate_email, &mut errors),
        };
        if errors.is_empty() { Ok(changes) } else { Err(ServiceError::Validation(errors)) }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.surname.is_none() && self.age.is_none() && self.email.is_none()
    }

    pub fn as_patch(&self) -> models::student::Patch<'_> {
        models::student::Patch {
            name: self.name.as_deref(),
            surname: self.surname.as_deref(),
            age: self.age,
            email: self.email.as_deref(),
        }
    }

    pub fn apply_to(&self, student: &mut Student) {
        if let Some(name) = &self.name {
            student.name = name.clone();
        }
        if let Some(surname) = &self.surname {
            student.surname = surname.clone();
        }
        if let Some(age) = self.age {
            student.age = age;
        }
        if let Some(email) = &self.email {
            student.email = email.clone();
        }
    }
}

/// Shape used to select records in the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StudentFilter {
    All,
    Name(String),
    Email(String),
}

impl StudentFilter {
    pub fn matches(&self, student: &Student) -> bool {
        match self {
            StudentFilter::All => true,
            StudentFilter::Name(name) => &student.name == name,
            StudentFilter::Email(email) => &student.email == email,
        }
    }

    pub fn to_condition(&self) -> sea_orm::Condition {
        match self {
            StudentFilter::All => sea_orm::Condition::all(),
            StudentFilter::Name(name) => models::student::by_name(name),
            StudentFilter::Email(email) => models::student::by_email(email),
        }
    }
}

/// Result of a successful delete, rendered as `"<name> <surname> deleted"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteConfirmation {
    pub name: String,
    pub surname: String,
}

impl From<Student> for DeleteConfirmation {
    fn from(s: Student) -> Self { Self { name: s.name, surname: s.surname } }
}

impl fmt::Display for DeleteConfirmation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} deleted", self.name, self.surname)
    }
}

fn required_text(
    fields: &FieldMap,
    field: &'static str,
    rule: fn(&str) -> Result<(), FieldError>,
    errors: &mut Vec<FieldError>,
) -> Option<String> {
    match text_field(fields, field) {
        Ok(Some(value)) => match rule(value) {
            Ok(()) => Some(value.to_string()),
            Err(e) => {
                errors.push(e);
                None
            }
        },
        Ok(None) => {
            errors.push(FieldError::new(field, REQUIRED));
            None
        }
        Err(e) => {
            errors.push(e);
            None
        }
    }
}

/// Like [`required_text`] but only for keys present in the map; an explicit
/// `null` counts as clearing a required field and fails.
fn optional_text(
    fields: &FieldMap,
    field: &'static str,
    rule: fn(&str) -> Result<(), FieldError>,
    errors: &mut Vec<FieldError>,
) -> Option<String> {
    if fields.contains_key(field) {
        required_text(fields, field, rule, errors)
    } else {
        None
    }
}

fn required_age(fields: &FieldMap, errors: &mut Vec<FieldError>) -> Option<i32> {
    let checked = integer_field(fields, "age").and_then(|age| match age {
        Some(age) => validation::validate_age(age),
        None => Err(FieldError::new("age", REQUIRED)),
    });
    match checked {
        Ok(age) => Some(age),
        Err(e) => {
            errors.push(e);
            None
        }
    }
}
