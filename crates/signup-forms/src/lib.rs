//! Sign-up form processing and validation
//!
//! This crate holds the synchronous core of the sign-up page:
//! - Field validators for `username`, `email`, `password` and `passwordRepeat`
//! - Form state with touched tracking and derived submittability
//! - Keyed uniqueness check bookkeeping for the e-mail field
//! - The submission state machine (`Idle → Submitting → Succeeded | Idle`)
//! - Wire payloads exchanged with the sign-up and e-mail check endpoints
//!
//! Nothing in here performs I/O. The async driver lives in `signup-pages`,
//! which feeds network responses back into these types.
//!
//! ## Example
//!
//! ```
//! use signup_forms::{FieldName, SignUpForm, SubmissionController};
//!
//! let mut form = SignUpForm::new();
//! let mut controller = SubmissionController::new();
//!
//! form.on_value_change(FieldName::Username, "user1");
//! form.on_value_change(FieldName::Email, "user1@gmail.com");
//! form.on_value_change(FieldName::Password, "P4ssword");
//! form.on_value_change(FieldName::PasswordRepeat, "P4ssword");
//! assert!(controller.can_submit(&form));
//!
//! let request = controller.on_submit(&mut form).unwrap();
//! assert_eq!(request.username, "user1");
//! assert!(controller.is_busy());
//! ```

pub mod field;
pub mod form;
pub mod payload;
pub mod submission;
pub mod uniqueness;
pub mod validators;

pub use field::{FieldName, FieldState, InputType, UnknownFieldError};
pub use form::SignUpForm;
pub use payload::{EmailCheckRequest, EmailCheckResponse, SignUpFailureBody, SignUpRequest};
pub use submission::{ACTIVATION_NOTICE, SubmissionController, SubmissionOutcome, SubmissionState};
pub use uniqueness::{CheckSettlement, EmailCheck, EmailVerdict, UniquenessChecker};
pub use validators::{
	EmailValidator, FieldValidator, FieldValues, PasswordRepeatValidator, PasswordValidator,
	UsernameValidator, ValidationError, ValidationResult, validate_field, validator_for,
};
