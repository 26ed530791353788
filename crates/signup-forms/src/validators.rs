//! Field validators for the sign-up form
//!
//! Each field has one validator. Rules are evaluated in order and the first
//! failing rule wins, so a field carries at most one message at a time.
//!
//! | Field | Rules |
//! |-------|-------|
//! | `username` | required, at least 4 characters |
//! | `email` | required, `local@domain.tld` |
//! | `password` | required, 1 uppercase + 1 lowercase + 1 digit |
//! | `passwordRepeat` | equal to `password` |
//!
//! ## Example
//!
//! ```
//! use signup_forms::{FieldName, ValidationError, validate_field};
//! use std::collections::HashMap;
//!
//! let siblings: HashMap<FieldName, String> = HashMap::new();
//! assert_eq!(
//!     validate_field(FieldName::Username, "123", &siblings),
//!     Err(ValidationError::UsernameTooShort { min: 4 })
//! );
//! assert!(validate_field(FieldName::Username, "user1", &siblings).is_ok());
//! ```

use crate::field::FieldName;
use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

// local@domain.tld: no whitespace, exactly one `@`, at least one dot after it.
static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("EMAIL_REGEX: invalid regex pattern")
});

/// Minimum number of characters in a username
pub const USERNAME_MIN_LENGTH: usize = 4;

/// Validation failure for a single field
///
/// The `Display` text is the exact message shown next to the field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
	#[error("Username is required")]
	UsernameRequired,
	#[error("Username must be at least {min} characters long")]
	UsernameTooShort { min: usize },
	#[error("E-mail is required")]
	EmailRequired,
	#[error("Invalid e-mail address")]
	EmailInvalid,
	/// Remote conflict reported by the e-mail availability check
	#[error("E-mail in use")]
	EmailInUse,
	#[error("Password is required")]
	PasswordRequired,
	#[error("Password must have atleast 1 uppercase, 1 lowercase letter and 1 number")]
	PasswordTooWeak,
	#[error("Password mismatch")]
	PasswordMismatch,
	/// Message returned by the sign-up endpoint for this field
	#[error("{0}")]
	Server(String),
}

pub type ValidationResult<T> = Result<T, ValidationError>;

/// Read access to the current value of every field
///
/// Validators receive this so that cross-field rules (`passwordRepeat`)
/// can look at their siblings.
pub trait FieldValues {
	fn value_of(&self, field: FieldName) -> &str;
}

impl FieldValues for HashMap<FieldName, String> {
	fn value_of(&self, field: FieldName) -> &str {
		self.get(&field).map(String::as_str).unwrap_or("")
	}
}

/// Synchronous validator for one field
pub trait FieldValidator: Send + Sync {
	/// Validate a field value
	///
	/// # Arguments
	///
	/// - `value`: The field value to validate
	/// - `siblings`: Current values of the other fields
	///
	/// # Returns
	///
	/// `Ok(())` if validation passes, the first failing rule otherwise
	fn validate(&self, value: &str, siblings: &dyn FieldValues) -> ValidationResult<()>;
}

/// `username`: required, then minimum length
#[derive(Debug, Clone)]
pub struct UsernameValidator {
	min_length: usize,
}

impl UsernameValidator {
	pub const fn new(min_length: usize) -> Self {
		Self { min_length }
	}
}

impl Default for UsernameValidator {
	fn default() -> Self {
		Self::new(USERNAME_MIN_LENGTH)
	}
}

impl FieldValidator for UsernameValidator {
	fn validate(&self, value: &str, _siblings: &dyn FieldValues) -> ValidationResult<()> {
		if value.trim().is_empty() {
			return Err(ValidationError::UsernameRequired);
		}
		if value.chars().count() < self.min_length {
			return Err(ValidationError::UsernameTooShort {
				min: self.min_length,
			});
		}
		Ok(())
	}
}

/// `email`: required, then address format
#[derive(Debug, Clone, Default)]
pub struct EmailValidator;

impl FieldValidator for EmailValidator {
	fn validate(&self, value: &str, _siblings: &dyn FieldValues) -> ValidationResult<()> {
		if value.trim().is_empty() {
			return Err(ValidationError::EmailRequired);
		}
		if !EMAIL_REGEX.is_match(value) {
			return Err(ValidationError::EmailInvalid);
		}
		Ok(())
	}
}

/// `password`: required, then character class mix
#[derive(Debug, Clone, Default)]
pub struct PasswordValidator;

impl FieldValidator for PasswordValidator {
	fn validate(&self, value: &str, _siblings: &dyn FieldValues) -> ValidationResult<()> {
		if value.trim().is_empty() {
			return Err(ValidationError::PasswordRequired);
		}
		let has_upper = value.chars().any(|c| c.is_ascii_uppercase());
		let has_lower = value.chars().any(|c| c.is_ascii_lowercase());
		let has_digit = value.chars().any(|c| c.is_ascii_digit());
		if has_upper && has_lower && has_digit {
			Ok(())
		} else {
			Err(ValidationError::PasswordTooWeak)
		}
	}
}

/// `passwordRepeat`: exact match with the current password
///
/// There is no separate "required" rule: an empty repeat only passes while
/// the password is empty too.
#[derive(Debug, Clone, Default)]
pub struct PasswordRepeatValidator;

impl FieldValidator for PasswordRepeatValidator {
	fn validate(&self, value: &str, siblings: &dyn FieldValues) -> ValidationResult<()> {
		if value == siblings.value_of(FieldName::Password) {
			Ok(())
		} else {
			Err(ValidationError::PasswordMismatch)
		}
	}
}

static USERNAME_VALIDATOR: UsernameValidator = UsernameValidator::new(USERNAME_MIN_LENGTH);
static EMAIL_VALIDATOR: EmailValidator = EmailValidator;
static PASSWORD_VALIDATOR: PasswordValidator = PasswordValidator;
static PASSWORD_REPEAT_VALIDATOR: PasswordRepeatValidator = PasswordRepeatValidator;

/// Validator responsible for `field`
pub fn validator_for(field: FieldName) -> &'static dyn FieldValidator {
	match field {
		FieldName::Username => &USERNAME_VALIDATOR,
		FieldName::Email => &EMAIL_VALIDATOR,
		FieldName::Password => &PASSWORD_VALIDATOR,
		FieldName::PasswordRepeat => &PASSWORD_REPEAT_VALIDATOR,
	}
}

/// Validate `value` as the content of `field`
///
/// # Examples
///
/// ```
/// use signup_forms::{FieldName, ValidationError, validate_field};
/// use std::collections::HashMap;
///
/// let mut siblings = HashMap::new();
/// siblings.insert(FieldName::Password, "P4ssword".to_string());
///
/// assert!(validate_field(FieldName::PasswordRepeat, "P4ssword", &siblings).is_ok());
/// assert_eq!(
///     validate_field(FieldName::PasswordRepeat, "pass", &siblings),
///     Err(ValidationError::PasswordMismatch)
/// );
/// ```
pub fn validate_field(
	field: FieldName,
	value: &str,
	siblings: &dyn FieldValues,
) -> ValidationResult<()> {
	validator_for(field).validate(value, siblings)
}
