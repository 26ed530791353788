//! Async sign-up page driver
//!
//! [`SignUpPage`] owns one form instance and one submission controller and
//! turns UI events into transitions on them. Network calls run between two
//! short critical sections; the state lock is never held across an `.await`,
//! so events keep flowing while a request is in flight.

use crate::api::{ApiError, SignUpApi};
use crate::view::PageView;
use parking_lot::Mutex;
use signup_forms::{
	EmailCheckRequest, EmailVerdict, FieldName, SignUpForm, SubmissionController,
	SubmissionOutcome, SubmissionState,
};
use std::sync::Arc;
use tracing::{debug, warn};

#[derive(Debug, Default)]
struct PageState {
	form: SignUpForm,
	submission: SubmissionController,
}

/// Sign-up page bound to an API client
///
/// Clones share the same page state, which lets several event sources
/// (input handlers, a submit button) drive one page concurrently.
pub struct SignUpPage<A> {
	api: Arc<A>,
	state: Arc<Mutex<PageState>>,
}

impl<A> Clone for SignUpPage<A> {
	fn clone(&self) -> Self {
		Self {
			api: Arc::clone(&self.api),
			state: Arc::clone(&self.state),
		}
	}
}

impl<A: SignUpApi> SignUpPage<A> {
	/// Fresh page with an empty form
	pub fn new(api: A) -> Self {
		Self::with_shared_api(Arc::new(api))
	}

	pub fn with_shared_api(api: Arc<A>) -> Self {
		Self {
			api,
			state: Arc::new(Mutex::new(PageState::default())),
		}
	}

	pub fn api(&self) -> &A {
		&self.api
	}

	/// Handle an input event on `name`
	///
	/// Returns `false` when the edit was ignored.
	pub fn input(&self, name: FieldName, value: impl Into<String>) -> bool {
		self.state.lock().form.on_value_change(name, value)
	}

	/// Handle focus leaving `name`
	///
	/// Blurring a well-formed e-mail asks the API whether it is taken and
	/// resolves once the answer has been applied (or found stale).
	pub async fn blur(&self, name: FieldName) {
		let check = self.state.lock().form.on_blur(name);
		let Some(check) = check else {
			return;
		};

		let request = EmailCheckRequest {
			email: check.key().to_string(),
		};
		let verdict = match self.api.check_email(&request).await {
			Ok(response) if response.in_use => EmailVerdict::InUse,
			Ok(_) => EmailVerdict::Available,
			Err(e) => {
				warn!(email = %request.email, error = %e, "e-mail check failed");
				EmailVerdict::Unknown
			}
		};

		let applied = self.state.lock().form.settle_email_check(&check, verdict);
		if !applied {
			warn!(
				email = %request.email,
				sequence = check.sequence(),
				"discarding stale e-mail check response"
			);
		}
	}

	/// Handle a click on the submit button
	///
	/// Returns `true` if a request was sent. Clicks while a request is in
	/// flight, after success, or on a form that is not submittable send
	/// nothing.
	pub async fn submit(&self) -> bool {
		let request = {
			let mut state = self.state.lock();
			let PageState { form, submission } = &mut *state;
			submission.on_submit(form)
		};
		let Some(request) = request else {
			return false;
		};

		let outcome = match self.api.sign_up(&request).await {
			Ok(()) => SubmissionOutcome::Succeeded,
			Err(ApiError::Rejected {
				status,
				validation_errors,
			}) => {
				debug!(status, "sign-up rejected by server");
				SubmissionOutcome::Rejected { validation_errors }
			}
			Err(e) => {
				warn!(error = %e, "sign-up request failed");
				SubmissionOutcome::TransportFailed
			}
		};

		let mut state = self.state.lock();
		let PageState { form, submission } = &mut *state;
		submission.on_response(form, outcome);
		true
	}

	/// Current presentation snapshot
	pub fn view(&self) -> PageView {
		let state = self.state.lock();
		PageView::from_state(&state.form, &state.submission)
	}

	/// Whether a submit click would send a request now
	pub fn is_submittable(&self) -> bool {
		let state = self.state.lock();
		state.submission.can_submit(&state.form)
	}

	/// Displayed error message of `name`
	pub fn error_for(&self, name: FieldName) -> Option<String> {
		self.state.lock().form.error_for(name).map(ToString::to_string)
	}

	/// Whether an e-mail check for the current value is outstanding
	pub fn is_pending(&self, name: FieldName) -> bool {
		self.state.lock().form.is_pending(name)
	}

	pub fn submission_state(&self) -> SubmissionState {
		self.state.lock().submission.state()
	}

	/// Number of sign-up requests sent by this page
	pub fn attempts(&self) -> u32 {
		self.state.lock().submission.attempts()
	}
}

impl<A> std::fmt::Debug for SignUpPage<A> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("SignUpPage")
			.field("state", &*self.state.lock())
			.finish_non_exhaustive()
	}
}
