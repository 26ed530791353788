//! JSON bodies exchanged with the sign-up API

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Body of the sign-up request
///
/// `passwordRepeat` is a client-side confirmation only and is never sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignUpRequest {
	pub username: String,
	pub email: String,
	pub password: String,
}

/// Body of a non-2xx sign-up response
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpFailureBody {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub validation_errors: Option<HashMap<String, String>>,
}

impl SignUpFailureBody {
	/// Parse a failure body, treating anything unreadable as "no field errors"
	///
	/// # Examples
	///
	/// ```
	/// use signup_forms::SignUpFailureBody;
	///
	/// let body = SignUpFailureBody::parse_lenient(br#"{"validationErrors":{"email":"E-mail in use"}}"#);
	/// assert_eq!(body.validation_errors.unwrap()["email"], "E-mail in use");
	///
	/// let body = SignUpFailureBody::parse_lenient(b"<html>Bad Gateway</html>");
	/// assert!(body.validation_errors.is_none());
	/// ```
	pub fn parse_lenient(bytes: &[u8]) -> Self {
		serde_json::from_slice(bytes).unwrap_or_default()
	}

	pub fn into_validation_errors(self) -> HashMap<String, String> {
		self.validation_errors.unwrap_or_default()
	}
}

/// Body of the e-mail availability request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailCheckRequest {
	pub email: String,
}

/// Body of a 2xx e-mail availability response
///
/// An empty object means the address is free.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailCheckResponse {
	#[serde(default)]
	pub in_use: bool,
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;

	#[rstest]
	fn test_sign_up_request_has_no_password_repeat() {
		let request = SignUpRequest {
			username: "user1".to_string(),
			email: "user1@gmail.com".to_string(),
			password: "P4ssword".to_string(),
		};

		assert_eq!(
			serde_json::to_value(&request).unwrap(),
			json!({
				"username": "user1",
				"password": "P4ssword",
				"email": "user1@gmail.com",
			})
		);
	}

	#[rstest]
	#[case(json!({}), None)]
	#[case(json!({"message": "Validation Failure"}), None)]
	#[case(
		json!({"validationErrors": {"username": "Username cannot be null"}}),
		Some(("username", "Username cannot be null"))
	)]
	fn test_failure_body(
		#[case] body: serde_json::Value,
		#[case] expected: Option<(&str, &str)>,
	) {
		let parsed: SignUpFailureBody = serde_json::from_value(body).unwrap();
		match expected {
			None => assert!(parsed.validation_errors.is_none()),
			Some((field, message)) => {
				assert_eq!(parsed.into_validation_errors()[field], message);
			}
		}
	}

	#[rstest]
	#[case(json!({}), false)]
	#[case(json!({"inUse": false}), false)]
	#[case(json!({"inUse": true}), true)]
	fn test_email_check_response(#[case] body: serde_json::Value, #[case] in_use: bool) {
		let parsed: EmailCheckResponse = serde_json::from_value(body).unwrap();
		assert_eq!(parsed.in_use, in_use);
	}
}
