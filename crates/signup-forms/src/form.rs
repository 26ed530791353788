use crate::field::{FieldName, FieldState};
use crate::payload::SignUpRequest;
use crate::uniqueness::{CheckSettlement, EmailCheck, EmailVerdict, UniquenessChecker};
use crate::validators::{FieldValues, ValidationError, validate_field};
use std::collections::HashMap;
use tracing::{debug, warn};

/// Sign-up form state
///
/// Owns one [`FieldState`] per [`FieldName`] and the bookkeeping of the
/// e-mail availability probe. Every mutation goes through an explicit
/// handler (`on_value_change`, `on_blur`, ...), so a UI layer only has to
/// translate its events into these calls.
///
/// Invariants:
/// - a field's `error` is recomputed from scratch whenever its value changes;
/// - `passwordRepeat` is re-validated whenever `password` changes;
/// - once retired (after a successful submission) the form ignores edits.
#[derive(Debug, Clone)]
pub struct SignUpForm {
	fields: HashMap<FieldName, FieldState>,
	email_check: UniquenessChecker,
	retired: bool,
}

impl SignUpForm {
	/// Create an empty, untouched form
	///
	/// Every field already carries the verdict for the empty string, so the
	/// form starts out not submittable even though nothing is displayed.
	///
	/// # Examples
	///
	/// ```
	/// use signup_forms::{FieldName, SignUpForm};
	///
	/// let form = SignUpForm::new();
	/// assert!(!form.is_submittable());
	/// assert!(form.error_for(FieldName::Username).is_none());
	/// ```
	pub fn new() -> Self {
		let mut form = Self {
			fields: FieldName::ALL
				.into_iter()
				.map(|name| (name, FieldState::default()))
				.collect(),
			email_check: UniquenessChecker::new(),
			retired: false,
		};
		for name in FieldName::ALL {
			form.revalidate(name);
		}
		form
	}

	pub fn field(&self, name: FieldName) -> &FieldState {
		// All names are inserted in `new`
		&self.fields[&name]
	}

	fn field_mut(&mut self, name: FieldName) -> &mut FieldState {
		self.fields.entry(name).or_default()
	}

	pub fn value(&self, name: FieldName) -> &str {
		self.field(name).value()
	}

	/// Handle an edit of `name`
	///
	/// Clears the previous verdict and re-runs the field's validator. Editing
	/// `password` also re-runs the `passwordRepeat` validator.
	///
	/// Returns `false` when the edit was ignored (unchanged value or retired form).
	pub fn on_value_change(&mut self, name: FieldName, value: impl Into<String>) -> bool {
		if self.retired {
			debug!(field = %name, "ignoring edit on retired form");
			return false;
		}
		let value = value.into();
		if self.field(name).value == value {
			return false;
		}

		let pending = name == FieldName::Email && self.email_check.is_pending(&value);
		let field = self.field_mut(name);
		field.value = value;
		field.error = None;
		field.pending = pending;

		self.revalidate(name);
		if name == FieldName::Password {
			self.revalidate(FieldName::PasswordRepeat);
		}
		debug!(field = %name, error = ?self.field(name).error, "field value changed");
		true
	}

	/// Handle focus leaving `name`
	///
	/// Marks the field touched so its error becomes visible. Blurring a
	/// well-formed e-mail starts an availability probe, returned for the
	/// caller to send; the field stays pending until the probe settles.
	pub fn on_blur(&mut self, name: FieldName) -> Option<EmailCheck> {
		if self.retired {
			return None;
		}
		self.field_mut(name).touched = true;
		if name != FieldName::Email || self.field(name).error.is_some() {
			return None;
		}

		let value = self.value(FieldName::Email).to_string();
		let check = self.email_check.begin(&value)?;
		self.field_mut(FieldName::Email).pending = true;
		debug!(email = %value, sequence = check.sequence(), "availability check started");
		Some(check)
	}

	/// Mark every field touched so all current errors are displayed
	pub fn touch_all(&mut self) {
		for field in self.fields.values_mut() {
			field.touched = true;
		}
	}

	/// Apply the answer of an availability probe
	///
	/// Returns `false` when the response was stale and nothing changed.
	pub fn settle_email_check(&mut self, check: &EmailCheck, verdict: EmailVerdict) -> bool {
		if self.retired {
			return false;
		}
		let current = self.value(FieldName::Email).to_string();
		let settlement = self.email_check.settle(check, &current);
		let pending = self.email_check.is_pending(&current);
		let field = self.field_mut(FieldName::Email);
		field.pending = pending;
		if settlement == CheckSettlement::Stale {
			return false;
		}

		match verdict {
			EmailVerdict::InUse => {
				if field.error.is_none() {
					field.error = Some(ValidationError::EmailInUse);
				}
			}
			EmailVerdict::Available | EmailVerdict::Unknown => {
				if field.error == Some(ValidationError::EmailInUse) {
					field.error = None;
				}
			}
		}
		debug!(email = %current, ?verdict, "availability check settled");
		true
	}

	/// Merge field errors returned by the sign-up endpoint
	///
	/// Each message overwrites the local error of its field and makes it
	/// visible. Unknown field names are skipped.
	///
	/// Returns the number of fields updated.
	pub fn merge_server_errors(&mut self, errors: &HashMap<String, String>) -> usize {
		let mut applied = 0;
		for (name, message) in errors {
			let Ok(field_name) = name.parse::<FieldName>() else {
				warn!(field = %name, "server returned an error for an unknown field");
				continue;
			};
			let field = self.field_mut(field_name);
			field.error = Some(ValidationError::Server(message.clone()));
			field.touched = true;
			applied += 1;
		}
		applied
	}

	/// Whether every field passes its synchronous validator
	///
	/// Uses the real verdicts, touched or not.
	pub fn is_valid(&self) -> bool {
		FieldName::ALL
			.into_iter()
			.all(|name| validate_field(name, self.value(name), self).is_ok())
	}

	/// Whether the form content allows a submission
	///
	/// True iff the form is valid, not retired, and the e-mail field has
	/// neither a pending nor a failed availability check. The submission
	/// controller adds its own in-flight gate on top of this.
	pub fn is_submittable(&self) -> bool {
		let email = self.field(FieldName::Email);
		!self.retired
			&& !email.pending
			&& email.error != Some(ValidationError::EmailInUse)
			&& self.is_valid()
	}

	/// Error to display for `name`, hidden until the field is touched
	pub fn error_for(&self, name: FieldName) -> Option<&ValidationError> {
		self.field(name).display_error()
	}

	/// Whether an availability probe for the current e-mail is outstanding
	pub fn is_pending(&self, name: FieldName) -> bool {
		self.field(name).pending
	}

	/// Request body built from the current values
	pub fn payload(&self) -> SignUpRequest {
		SignUpRequest {
			username: self.value(FieldName::Username).to_string(),
			email: self.value(FieldName::Email).to_string(),
			password: self.value(FieldName::Password).to_string(),
		}
	}

	pub fn is_retired(&self) -> bool {
		self.retired
	}

	/// Retire the form after a successful submission
	pub(crate) fn retire(&mut self) {
		self.retired = true;
	}

	fn revalidate(&mut self, name: FieldName) {
		let verdict = validate_field(name, self.value(name), self).err();
		self.field_mut(name).error = verdict;
	}
}

impl Default for SignUpForm {
	fn default() -> Self {
		Self::new()
	}
}

impl FieldValues for SignUpForm {
	fn value_of(&self, field: FieldName) -> &str {
		self.value(field)
	}
}
