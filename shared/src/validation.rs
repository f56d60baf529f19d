//! Input validation for signup and signin
//!
//! The same rules run on both sides of the wire: the client checks forms
//! before sending them, and the backend re-checks request bodies before
//! they reach the auth flow. Each validator returns the validated value
//! or every problem found, keyed by field.

use crate::types::{SigninForm, SigninRequest, SignupForm, SignupRequest};
use std::fmt;
use validator::ValidateEmail;

/// Minimum password length
pub const PASSWORD_MIN_LENGTH: usize = 8;

/// bcrypt only reads this many bytes of its input
pub const PASSWORD_MAX_BYTES: usize = 72;

/// Special characters accepted by the backend on signup
pub const SPECIAL_CHARACTERS: &str = "!@#$%^&*(),.?\":{}|<>";

/// A single field-level validation failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}

/// All validation failures for one input, in field order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<ValidationError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: &str, message: &str) {
        self.errors.push(ValidationError::new(field, message));
    }

    /// Record the outcome of a single-field check
    fn check(&mut self, field: &str, result: Result<(), &'static str>) {
        if let Err(message) = result {
            self.push(field, message);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// First message reported for `field`, if any
    pub fn for_field(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    /// Return `value` when nothing was recorded
    pub fn into_result<T>(self, value: T) -> Result<T, Self> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<&str> = self.errors.iter().map(|e| e.message.as_str()).collect();
        f.write_str(&messages.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

/// Validate email syntax
pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if email.is_empty() {
        return Err("Email is required");
    }
    if !email.validate_email() {
        return Err("Invalid email address");
    }
    Ok(())
}

/// Validate password strength.
///
/// At least eight characters and at most 72 bytes, with one letter, one
/// digit and one character that is neither.
pub fn validate_password(password: &str) -> Result<(), &'static str> {
    if password.chars().count() < PASSWORD_MIN_LENGTH {
        return Err("Password must be at least 8 characters long");
    }
    if password.len() > PASSWORD_MAX_BYTES {
        return Err("Password must be at most 72 bytes long");
    }
    if !password.chars().any(|c| c.is_ascii_alphabetic()) {
        return Err("Password must contain at least one letter");
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err("Password must contain at least one number");
    }
    if !password.chars().any(|c| !c.is_ascii_alphanumeric()) {
        return Err("Password must contain at least one special character");
    }
    Ok(())
}

/// Password rule for signup request bodies: [`validate_password`] plus at
/// least one character from [`SPECIAL_CHARACTERS`]
pub fn validate_signup_password(password: &str) -> Result<(), &'static str> {
    validate_password(password)?;
    if !password.chars().any(|c| SPECIAL_CHARACTERS.contains(c)) {
        return Err("Password must contain one of !@#$%^&*(),.?\":{}|<>");
    }
    Ok(())
}

/// Validate display name
pub fn validate_name(name: &str) -> Result<(), &'static str> {
    if name.trim().is_empty() {
        return Err("Name is required");
    }
    Ok(())
}

/// Validate a signup request body
pub fn validate_signup_request(req: SignupRequest) -> Result<SignupRequest, ValidationErrors> {
    let mut errors = ValidationErrors::new();
    errors.check("name", validate_name(&req.name));
    errors.check("email", validate_email(&req.email));
    errors.check("password", validate_signup_password(&req.password));
    errors.into_result(req)
}

/// Validate a signin request body.
///
/// Only the email is checked: password strength is a signup rule, and a
/// wrong password must reach the auth flow to be reported as incorrect.
pub fn validate_signin_request(req: SigninRequest) -> Result<SigninRequest, ValidationErrors> {
    let mut errors = ValidationErrors::new();
    errors.check("email", validate_email(&req.email));
    errors.into_result(req)
}

/// Validate the signup form and build the request to send
pub fn validate_signup_form(form: &SignupForm) -> Result<SignupRequest, ValidationErrors> {
    let mut errors = ValidationErrors::new();
    errors.check("name", validate_name(&form.name));
    errors.check("email", validate_email(&form.email));
    errors.check("password", validate_password(&form.password));
    if form.confirm_password.is_empty() {
        errors.push("confirm_password", "Please confirm your password");
    } else if form.confirm_password != form.password {
        errors.push("confirm_password", "Passwords don't match");
    }
    errors.into_result(form.to_request())
}

/// Validate the signin form and build the request to send
pub fn validate_signin_form(form: &SigninForm) -> Result<SigninRequest, ValidationErrors> {
    let mut errors = ValidationErrors::new();
    errors.check("email", validate_email(&form.email));
    errors.check("password", validate_password(&form.password));
    errors.into_result(form.to_request())
}
