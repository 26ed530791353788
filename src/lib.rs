//! # Signup
//!
//! Sign-up form validation and submission for Rust frontends and clients.
//!
//! A sign-up form with four fields (`username`, `email`, `password`,
//! `passwordRepeat`), client-side validation, an asynchronous e-mail
//! availability probe, and a submission state machine that guarantees at most
//! one request in flight.
//!
//! ## Feature Flags
//!
//! - `forms` - Validators, form state and the submission state machine (no I/O)
//! - `pages` (default) - Async page driver, JSON API client, settings and view snapshot
//!
//! ## Crates
//!
//! | Module | Crate | Contents |
//! |--------|-------|----------|
//! | [`forms`] | `signup-forms` | Validators, `SignUpForm`, `UniquenessChecker`, `SubmissionController` |
//! | `pages` | `signup-pages` | `SignUpApi`, `HttpSignUpApi`, `MemorySignUpApi`, `ApiSettings`, `SignUpPage`, `PageView` |
//!
//! ## Quick Example
//!
//! ```
//! use signup::prelude::*;
//!
//! let mut form = SignUpForm::new();
//! let mut submission = SubmissionController::new();
//!
//! form.on_value_change(FieldName::Username, "user1");
//! form.on_value_change(FieldName::Email, "user1@gmail.com");
//! form.on_value_change(FieldName::Password, "P4ssword");
//! form.on_value_change(FieldName::PasswordRepeat, "P4ss");
//! assert!(submission.on_submit(&mut form).is_none());
//! assert_eq!(form.error_for(FieldName::PasswordRepeat), Some(&ValidationError::PasswordMismatch));
//! ```

#[cfg(feature = "forms")]
pub use signup_forms as forms;

#[cfg(feature = "pages")]
pub use signup_pages as pages;

#[cfg(feature = "forms")]
pub use signup_forms::{
	ACTIVATION_NOTICE, FieldName, SignUpForm, SignUpRequest, SubmissionController,
	SubmissionOutcome, SubmissionState, ValidationError,
};

#[cfg(feature = "pages")]
pub use signup_pages::{
	ApiError, ApiResult, ApiSettings, HttpSignUpApi, MemorySignUpApi, PageView, SignUpApi,
	SignUpPage,
};

/// Commonly used types
pub mod prelude {
	#[cfg(feature = "forms")]
	pub use crate::{
		ACTIVATION_NOTICE, FieldName, SignUpForm, SignUpRequest, SubmissionController,
		SubmissionOutcome, SubmissionState, ValidationError,
	};

	#[cfg(feature = "pages")]
	pub use crate::{
		ApiError, ApiResult, ApiSettings, HttpSignUpApi, MemorySignUpApi, PageView, SignUpApi,
		SignUpPage,
	};
}
