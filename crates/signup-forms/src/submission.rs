//! Submission state machine
//!
//! ```mermaid
//! stateDiagram-v2
//!     [*] --> Idle
//!     Idle --> Submitting: submit (form submittable)
//!     Submitting --> Succeeded: 2xx
//!     Submitting --> Failed: non-2xx / transport error
//!     Failed --> Idle: errors merged
//!     Succeeded --> [*]
//! ```
//!
//! Only one `Submitting` episode exists at a time. A submit received while
//! `Submitting` is a no-op, and a response received outside `Submitting`
//! is a stray duplicate and ignored.

use crate::form::SignUpForm;
use crate::payload::SignUpRequest;
use std::collections::HashMap;
use tracing::{debug, info, warn};

/// Text shown in place of the form after a successful sign-up
pub const ACTIVATION_NOTICE: &str = "Please check your e-mail to activate your account";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionState {
	#[default]
	Idle,
	Submitting,
	Succeeded,
	Failed,
}

/// How the sign-up endpoint answered
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
	/// Any 2xx response
	Succeeded,
	/// Non-2xx response, with whatever field errors its body carried
	Rejected {
		validation_errors: HashMap<String, String>,
	},
	/// No response at all
	TransportFailed,
}

/// Gate for the single in-flight sign-up request of a form instance
#[derive(Debug, Clone, Default)]
pub struct SubmissionController {
	state: SubmissionState,
	attempts: u32,
}

impl SubmissionController {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn state(&self) -> SubmissionState {
		self.state
	}

	/// Whether the busy indicator is active
	pub fn is_busy(&self) -> bool {
		self.state == SubmissionState::Submitting
	}

	/// Number of requests issued by this controller
	pub fn attempts(&self) -> u32 {
		self.attempts
	}

	/// Whether a submit action would start a request right now
	pub fn can_submit(&self, form: &SignUpForm) -> bool {
		self.state == SubmissionState::Idle && form.is_submittable()
	}

	/// Handle a submit action
	///
	/// Returns the request to send when the transition `Idle → Submitting`
	/// fires. Returns `None` while a request is already in flight, after
	/// success, or when the form is not submittable; in the last case every
	/// field is touched so the blocking errors become visible.
	///
	/// # Examples
	///
	/// ```
	/// use signup_forms::{FieldName, SignUpForm, SubmissionController, SubmissionState};
	///
	/// let mut form = SignUpForm::new();
	/// let mut controller = SubmissionController::new();
	/// form.on_value_change(FieldName::Username, "user1");
	/// form.on_value_change(FieldName::Email, "user1@gmail.com");
	/// form.on_value_change(FieldName::Password, "P4ssword");
	/// form.on_value_change(FieldName::PasswordRepeat, "P4ssword");
	///
	/// assert!(controller.on_submit(&mut form).is_some());
	/// assert_eq!(controller.state(), SubmissionState::Submitting);
	/// // A second click while the request is in flight does nothing
	/// assert!(controller.on_submit(&mut form).is_none());
	/// assert_eq!(controller.attempts(), 1);
	/// ```
	pub fn on_submit(&mut self, form: &mut SignUpForm) -> Option<SignUpRequest> {
		match self.state {
			SubmissionState::Submitting => {
				debug!("submit ignored, request already in flight");
				None
			}
			SubmissionState::Succeeded => {
				debug!("submit ignored, form already submitted");
				None
			}
			SubmissionState::Idle | SubmissionState::Failed => {
				if !form.is_submittable() {
					form.touch_all();
					debug!("submit ignored, form not submittable");
					return None;
				}
				self.state = SubmissionState::Submitting;
				self.attempts += 1;
				let request = form.payload();
				info!(
					username = %request.username,
					attempt = self.attempts,
					"submitting sign-up request"
				);
				Some(request)
			}
		}
	}

	/// Handle the sign-up endpoint's answer
	///
	/// Returns `false` for a stray response received outside `Submitting`.
	pub fn on_response(&mut self, form: &mut SignUpForm, outcome: SubmissionOutcome) -> bool {
		if self.state != SubmissionState::Submitting {
			warn!(state = ?self.state, "ignoring sign-up response without request in flight");
			return false;
		}

		match outcome {
			SubmissionOutcome::Succeeded => {
				self.state = SubmissionState::Succeeded;
				form.retire();
				info!("sign-up request succeeded");
			}
			SubmissionOutcome::Rejected { validation_errors } => {
				self.state = SubmissionState::Failed;
				let applied = form.merge_server_errors(&validation_errors);
				info!(fields = applied, "sign-up request rejected");
				self.state = SubmissionState::Idle;
			}
			SubmissionOutcome::TransportFailed => {
				self.state = SubmissionState::Failed;
				warn!("sign-up request failed in transport");
				self.state = SubmissionState::Idle;
			}
		}
		true
	}

	/// Confirmation text once the sign-up succeeded
	pub fn confirmation(&self) -> Option<&'static str> {
		match self.state {
			SubmissionState::Succeeded => Some(ACTIVATION_NOTICE),
			_ => None,
		}
	}
}
