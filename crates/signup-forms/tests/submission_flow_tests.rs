//! End-to-end flows through the synchronous core
//!
//! Network responses are simulated by feeding outcomes and verdicts back in
//! the order a real client could observe them.

use rstest::{fixture, rstest};
use signup_forms::{
	EmailVerdict, FieldName, SignUpForm, SubmissionController, SubmissionOutcome,
	SubmissionState, ValidationError,
};
use std::collections::HashMap;

struct Page {
	form: SignUpForm,
	submission: SubmissionController,
}

impl Page {
	fn fill(&mut self, username: &str, email: &str, password: &str, repeat: &str) {
		self.form.on_value_change(FieldName::Username, username);
		self.form.on_value_change(FieldName::Email, email);
		self.form.on_value_change(FieldName::Password, password);
		self.form.on_value_change(FieldName::PasswordRepeat, repeat);
	}

	fn can_submit(&self) -> bool {
		self.submission.can_submit(&self.form)
	}
}

#[fixture]
fn page() -> Page {
	Page {
		form: SignUpForm::new(),
		submission: SubmissionController::new(),
	}
}

#[rstest]
fn test_probe_then_submit(mut page: Page) {
	page.fill("user1", "user1@gmail.com", "P4ssword", "P4ssword");
	let check = page.form.on_blur(FieldName::Email).unwrap();
	assert!(!page.can_submit());

	assert!(page.form.settle_email_check(&check, EmailVerdict::Available));
	assert!(page.can_submit());

	let request = page.submission.on_submit(&mut page.form).unwrap();
	assert_eq!(request.email, "user1@gmail.com");
	page.submission
		.on_response(&mut page.form, SubmissionOutcome::Succeeded);
	assert_eq!(page.submission.state(), SubmissionState::Succeeded);
	assert!(!page.form.on_value_change(FieldName::Email, "other@gmail.com"));
}

#[rstest]
fn test_out_of_order_probe_answers(mut page: Page) {
	page.fill("user1", "first@gmail.com", "P4ssword", "P4ssword");
	let first = page.form.on_blur(FieldName::Email).unwrap();
	page.form.on_value_change(FieldName::Email, "second@gmail.com");
	let second = page.form.on_blur(FieldName::Email).unwrap();
	assert!(second.sequence() > first.sequence());

	// Newer answer first, older answer last
	assert!(page.form.settle_email_check(&second, EmailVerdict::Available));
	assert!(!page.form.settle_email_check(&first, EmailVerdict::InUse));

	assert!(page.form.error_for(FieldName::Email).is_none());
	assert!(page.can_submit());
}

#[rstest]
fn test_returning_to_probed_value_while_outstanding(mut page: Page) {
	page.fill("user1", "first@gmail.com", "P4ssword", "P4ssword");
	let check = page.form.on_blur(FieldName::Email).unwrap();

	page.form.on_value_change(FieldName::Email, "typo@gmail.com");
	assert!(!page.form.is_pending(FieldName::Email));
	page.form.on_value_change(FieldName::Email, "first@gmail.com");
	assert!(page.form.is_pending(FieldName::Email));
	assert!(!page.can_submit());

	assert!(page.form.settle_email_check(&check, EmailVerdict::InUse));
	assert_eq!(
		page.form.error_for(FieldName::Email),
		Some(&ValidationError::EmailInUse)
	);
	assert!(!page.can_submit());
}

#[rstest]
fn test_returning_to_first_value_with_two_checks_in_flight(mut page: Page) {
	page.fill("user1", "first@gmail.com", "P4ssword", "P4ssword");
	let first = page.form.on_blur(FieldName::Email).unwrap();
	page.form.on_value_change(FieldName::Email, "second@gmail.com");
	let second = page.form.on_blur(FieldName::Email).unwrap();

	page.form.on_value_change(FieldName::Email, "first@gmail.com");
	assert!(page.form.is_pending(FieldName::Email));
	assert!(!page.form.is_submittable());
	assert!(page.submission.on_submit(&mut page.form).is_none());
	assert_eq!(page.submission.state(), SubmissionState::Idle);
	// No duplicate check for the value already in flight
	assert!(page.form.on_blur(FieldName::Email).is_none());

	// The answer for the abandoned value changes nothing
	assert!(!page.form.settle_email_check(&second, EmailVerdict::Available));
	assert!(page.form.is_pending(FieldName::Email));
	assert!(!page.can_submit());

	assert!(page.form.settle_email_check(&first, EmailVerdict::InUse));
	assert!(!page.form.is_pending(FieldName::Email));
	assert_eq!(
		page.form.error_for(FieldName::Email),
		Some(&ValidationError::EmailInUse)
	);
	assert!(page.submission.on_submit(&mut page.form).is_none());
	assert_eq!(page.submission.attempts(), 0);
}

#[rstest]
fn test_rejection_then_corrected_resubmit(mut page: Page) {
	page.fill("user1", "user1@gmail.com", "P4ssword", "P4ssword");
	page.submission.on_submit(&mut page.form).unwrap();

	let validation_errors = HashMap::from([
		("email".to_string(), "E-mail in use".to_string()),
		("nickname".to_string(), "Unexpected".to_string()),
	]);
	page.submission.on_response(
		&mut page.form,
		SubmissionOutcome::Rejected { validation_errors },
	);
	assert_eq!(
		page.form.error_for(FieldName::Email),
		Some(&ValidationError::Server("E-mail in use".to_string()))
	);

	page.form.on_value_change(FieldName::Email, "user2@gmail.com");
	let request = page.submission.on_submit(&mut page.form).unwrap();
	assert_eq!(request.email, "user2@gmail.com");
	assert_eq!(page.submission.attempts(), 2);
}
