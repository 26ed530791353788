//! Presentation snapshot of the sign-up page
//!
//! A [`PageView`] is everything a renderer needs to draw the page at one
//! instant. It is derived from the form and submission state and never fed
//! back into them.

use serde::Serialize;
use signup_forms::{FieldName, SignUpForm, SubmissionController};

/// Page heading
pub const HEADING: &str = "Sign Up";

/// Label of the submit button
pub const SUBMIT_LABEL: &str = "Sign Up";

/// One labelled input
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldView {
	/// Input `id`, referenced by the label's `for`
	pub id: &'static str,
	pub label: &'static str,
	pub input_type: &'static str,
	pub value: String,
	/// Message shown under the input, once the field is touched
	pub error: Option<String>,
}

/// Snapshot of the page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageView {
	pub heading: &'static str,
	/// Inputs in display order; empty once the form is hidden
	pub fields: Vec<FieldView>,
	pub form_visible: bool,
	pub button_label: &'static str,
	pub button_disabled: bool,
	/// Whether the busy indicator (`role="status"`) is shown
	pub busy: bool,
	/// Success notice shown in place of the form
	pub confirmation: Option<&'static str>,
}

impl PageView {
	pub fn from_state(form: &SignUpForm, submission: &SubmissionController) -> Self {
		let confirmation = submission.confirmation();
		let form_visible = confirmation.is_none();
		let fields = if form_visible {
			FieldName::ALL
				.into_iter()
				.map(|name| FieldView {
					id: name.as_str(),
					label: name.label(),
					input_type: name.input_type().as_str(),
					value: form.value(name).to_string(),
					error: form.error_for(name).map(ToString::to_string),
				})
				.collect()
		} else {
			Vec::new()
		};

		Self {
			heading: HEADING,
			fields,
			form_visible,
			button_label: SUBMIT_LABEL,
			button_disabled: !submission.can_submit(form),
			busy: submission.is_busy(),
			confirmation,
		}
	}

	/// Input for `name`, if the form is visible
	pub fn field(&self, name: FieldName) -> Option<&FieldView> {
		self.fields.iter().find(|field| field.id == name.as_str())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use signup_forms::SubmissionOutcome;

	#[rstest]
	fn test_initial_view() {
		let view = PageView::from_state(&SignUpForm::new(), &SubmissionController::new());

		assert_eq!(view.heading, "Sign Up");
		assert_eq!(view.button_label, "Sign Up");
		assert!(view.button_disabled);
		assert!(!view.busy);
		assert!(view.form_visible);
		assert!(view.confirmation.is_none());
		assert_eq!(view.fields.len(), 4);
		assert!(view.fields.iter().all(|field| field.error.is_none()));
	}

	#[rstest]
	#[case(FieldName::Username, "Username", "text")]
	#[case(FieldName::Email, "E-mail", "email")]
	#[case(FieldName::Password, "Password", "password")]
	#[case(FieldName::PasswordRepeat, "Password Repeat", "password")]
	fn test_field_metadata(
		#[case] name: FieldName,
		#[case] label: &str,
		#[case] input_type: &str,
	) {
		let view = PageView::from_state(&SignUpForm::new(), &SubmissionController::new());
		let field = view.field(name).unwrap();

		assert_eq!(field.id, name.as_str());
		assert_eq!(field.label, label);
		assert_eq!(field.input_type, input_type);
	}

	#[rstest]
	fn test_success_hides_form() {
		let mut form = SignUpForm::new();
		let mut submission = SubmissionController::new();
		form.on_value_change(FieldName::Username, "user1");
		form.on_value_change(FieldName::Email, "user1@gmail.com");
		form.on_value_change(FieldName::Password, "P4ssword");
		form.on_value_change(FieldName::PasswordRepeat, "P4ssword");

		submission.on_submit(&mut form).unwrap();
		let busy = PageView::from_state(&form, &submission);
		assert!(busy.busy);
		assert!(busy.button_disabled);

		submission.on_response(&mut form, SubmissionOutcome::Succeeded);
		let view = PageView::from_state(&form, &submission);
		assert!(!view.form_visible);
		assert!(view.fields.is_empty());
		assert!(view.field(FieldName::Username).is_none());
		assert_eq!(
			view.confirmation,
			Some("Please check your e-mail to activate your account")
		);
	}

	#[rstest]
	fn test_serializes_for_renderers() {
		let view = PageView::from_state(&SignUpForm::new(), &SubmissionController::new());
		let json = serde_json::to_value(&view).unwrap();

		assert_eq!(json["heading"], "Sign Up");
		assert_eq!(json["button_disabled"], true);
		assert_eq!(json["fields"][3]["id"], "passwordRepeat");
		assert!(json["confirmation"].is_null());
	}
}
