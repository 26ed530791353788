//! Sign-up field identities and per-field state

use crate::validators::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Name of a sign-up form field
///
/// The serialized form is the camelCase name used both as the input `id`
/// and as the key in the server's `validationErrors` map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldName {
	Username,
	Email,
	Password,
	PasswordRepeat,
}

impl FieldName {
	/// All fields in display order
	pub const ALL: [FieldName; 4] = [
		FieldName::Username,
		FieldName::Email,
		FieldName::Password,
		FieldName::PasswordRepeat,
	];

	/// Wire name of the field (also the input `id`)
	///
	/// # Examples
	///
	/// ```
	/// use signup_forms::FieldName;
	///
	/// assert_eq!(FieldName::PasswordRepeat.as_str(), "passwordRepeat");
	/// ```
	pub fn as_str(&self) -> &'static str {
		match self {
			FieldName::Username => "username",
			FieldName::Email => "email",
			FieldName::Password => "password",
			FieldName::PasswordRepeat => "passwordRepeat",
		}
	}

	/// Label text associated with the field's input
	pub fn label(&self) -> &'static str {
		match self {
			FieldName::Username => "Username",
			FieldName::Email => "E-mail",
			FieldName::Password => "Password",
			FieldName::PasswordRepeat => "Password Repeat",
		}
	}

	/// Input type used when rendering the field
	pub fn input_type(&self) -> InputType {
		match self {
			FieldName::Username => InputType::Text,
			FieldName::Email => InputType::Email,
			FieldName::Password | FieldName::PasswordRepeat => InputType::Password,
		}
	}
}

impl fmt::Display for FieldName {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Returned when a string does not name a sign-up field
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown sign-up field: {0}")]
pub struct UnknownFieldError(pub String);

impl FromStr for FieldName {
	type Err = UnknownFieldError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		FieldName::ALL
			.into_iter()
			.find(|field| field.as_str() == s)
			.ok_or_else(|| UnknownFieldError(s.to_string()))
	}
}

/// HTML input type of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputType {
	Text,
	Email,
	Password,
}

impl InputType {
	pub fn as_str(&self) -> &'static str {
		match self {
			InputType::Text => "text",
			InputType::Email => "email",
			InputType::Password => "password",
		}
	}
}

/// Current state of one field
///
/// `error` always holds the latest verdict for `value`, whether or not the
/// field has been touched. Display code should go through
/// [`FieldState::display_error`], which hides it until the first blur.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldState {
	pub(crate) value: String,
	pub(crate) touched: bool,
	pub(crate) error: Option<ValidationError>,
	pub(crate) pending: bool,
}

impl FieldState {
	pub fn value(&self) -> &str {
		&self.value
	}

	pub fn is_touched(&self) -> bool {
		self.touched
	}

	/// Latest verdict for the current value, regardless of `touched`
	pub fn error(&self) -> Option<&ValidationError> {
		self.error.as_ref()
	}

	/// Error to show to the user, `None` until the field is touched
	pub fn display_error(&self) -> Option<&ValidationError> {
		if self.touched { self.error.as_ref() } else { None }
	}

	/// Whether an async check for the current value is outstanding
	pub fn is_pending(&self) -> bool {
		self.pending
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case(FieldName::Username, "username", "Username", "text")]
	#[case(FieldName::Email, "email", "E-mail", "email")]
	#[case(FieldName::Password, "password", "Password", "password")]
	#[case(FieldName::PasswordRepeat, "passwordRepeat", "Password Repeat", "password")]
	fn test_field_metadata(
		#[case] field: FieldName,
		#[case] id: &str,
		#[case] label: &str,
		#[case] input_type: &str,
	) {
		assert_eq!(field.as_str(), id);
		assert_eq!(field.label(), label);
		assert_eq!(field.input_type().as_str(), input_type);
		assert_eq!(id.parse::<FieldName>().unwrap(), field);
	}

	#[rstest]
	fn test_unknown_field_name() {
		let err = "password_repeat".parse::<FieldName>().unwrap_err();
		assert_eq!(err, UnknownFieldError("password_repeat".to_string()));
		assert_eq!(err.to_string(), "Unknown sign-up field: password_repeat");
	}

	#[rstest]
	fn test_field_name_serde_uses_camel_case() {
		let json = serde_json::to_string(&FieldName::PasswordRepeat).unwrap();
		assert_eq!(json, "\"passwordRepeat\"");
	}

	#[rstest]
	fn test_display_error_hidden_until_touched() {
		let mut state = FieldState {
			error: Some(ValidationError::UsernameRequired),
			..Default::default()
		};
		assert!(state.display_error().is_none());
		assert_eq!(state.error(), Some(&ValidationError::UsernameRequired));

		state.touched = true;
		assert_eq!(
			state.display_error(),
			Some(&ValidationError::UsernameRequired)
		);
	}
}
