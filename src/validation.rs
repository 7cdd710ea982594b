//! Field rules for request bodies.
//!
//! Users: `name` at most 30 characters, `email` required and well formed,
//! `password` between 3 and 30 characters and at most 72 bytes. Identifiers in update/delete bodies
//! must be present (non-nil).

use std::collections::BTreeMap;
use uuid::Uuid;

use crate::database::models::{DeleteInput, House, HouseUpdateInput, UserInput, UserUpdateInput};
use crate::error::ApiError;

pub const NAME_MAX: usize = 30;
pub const PASSWORD_MIN: usize = 3;
pub const PASSWORD_MAX: usize = 30;
pub const PASSWORD_MAX_BYTES: usize = crate::auth::password::BCRYPT_MAX_BYTES;
pub const DESCRIPTION_MAX: usize = 1000;
pub const ADDRESS_MAX: usize = 255;

pub trait Validate {
    fn validate(&self) -> Result<(), ApiError>;
}

/// Collects the first failure per field.
#[derive(Debug, Default)]
pub struct Validator {
    errors: BTreeMap<String, String>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    fn fail(&mut self, field: &str, message: String) {
        self.errors.entry(field.to_string()).or_insert(message);
    }

    pub fn required(mut self, field: &str, value: &str) -> Self {
        if value.trim().is_empty() {
            self.fail(field, format!("the field {} is required", field));
        }
        self
    }

    pub fn required_id(mut self, field: &str, value: &Uuid) -> Self {
        if value.is_nil() {
            self.fail(field, format!("the field {} is required", field));
        }
        self
    }

    pub fn max_len(mut self, field: &str, value: &str, max: usize) -> Self {
        if value.chars().count() > max {
            self.fail(field, format!("the field {} must be at most {} characters", field, max));
        }
        self
    }

    pub fn len_between(mut self, field: &str, value: &str, min: usize, max: usize) -> Self {
        let len = value.chars().count();
        if len < min || len > max {
            self.fail(
                field,
                format!("the field {} must be between {} and {} characters", field, min, max),
            );
        }
        self
    }

    pub fn max_bytes(mut self, field: &str, value: &str, max: usize) -> Self {
        if value.len() > max {
            self.fail(field, format!("the field {} must be at most {} bytes", field, max));
        }
        self
    }

    pub fn email(mut self, field: &str, value: &str) -> Self {
        if !value.is_empty() && !is_valid_email(value) {
            self.fail(field, format!("the field {} must be a valid email address", field));
        }
        self
    }

    pub fn finish(self) -> Result<(), ApiError> {
        if self.errors.is_empty() {
            return Ok(());
        }
        Err(ApiError::validation_error("validation failed", self.errors))
    }
}

/// `local@domain.tld` with no whitespace and exactly one `@`.
pub fn is_valid_email(value: &str) -> bool {
    if value.len() > 254 || value.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }

    let labels: Vec<&str> = domain.split('.').collect();
    labels.len() >= 2
        && labels
            .iter()
            .all(|label| !label.is_empty() && !label.starts_with('-') && !label.ends_with('-'))
}

fn user_fields(v: Validator, name: &str, email: &str, password: &str) -> Validator {
    v.max_len("name", name, NAME_MAX)
        .required("email", email)
        .email("email", email)
        .required("password", password)
        .len_between("password", password, PASSWORD_MIN, PASSWORD_MAX)
        .max_bytes("password", password, PASSWORD_MAX_BYTES)
}

impl Validate for UserInput {
    fn validate(&self) -> Result<(), ApiError> {
        user_fields(Validator::new(), &self.name, &self.email, &self.password).finish()
    }
}

impl Validate for UserUpdateInput {
    fn validate(&self) -> Result<(), ApiError> {
        let v = Validator::new().required_id("id", &self.id);
        user_fields(v, &self.name, &self.email, &self.password).finish()
    }
}

impl Validate for DeleteInput {
    fn validate(&self) -> Result<(), ApiError> {
        Validator::new().required_id("id", &self.id).finish()
    }
}

impl Validate for House {
    fn validate(&self) -> Result<(), ApiError> {
        Validator::new()
            .required_id("id", &self.id)
            .required_id("owner_id", &self.owner_id)
            .max_len("description", &self.description, DESCRIPTION_MAX)
            .max_len("address", &self.address, ADDRESS_MAX)
            .finish()
    }
}

impl Validate for HouseUpdateInput {
    fn validate(&self) -> Result<(), ApiError> {
        Validator::new()
            .required_id("id", &self.id)
            .max_len("description", &self.description, DESCRIPTION_MAX)
            .max_len("address", &self.address, ADDRESS_MAX)
            .finish()
    }
}
