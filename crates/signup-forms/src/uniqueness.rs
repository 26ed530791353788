//! E-mail uniqueness check bookkeeping
//!
//! The availability probe itself is asynchronous and lives outside this crate.
//! This module only tracks which probes are outstanding and decides whether a
//! response may still be applied. A response is keyed by the e-mail value
//! that triggered it: if the field no longer holds that value the response is
//! stale and dropped, no matter in which order responses arrive.

use std::collections::HashSet;
use tracing::debug;

/// One issued availability probe
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailCheck {
	key: String,
	sequence: u64,
}

impl EmailCheck {
	/// E-mail value the probe was issued for
	pub fn key(&self) -> &str {
		&self.key
	}

	/// Monotonic number of the probe within one form instance
	pub fn sequence(&self) -> u64 {
		self.sequence
	}
}

/// Answer of the availability endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmailVerdict {
	/// No account uses the address
	Available,
	/// An account already uses the address
	InUse,
	/// The probe failed in transport; nothing is known
	Unknown,
}

/// Result of matching a response against the current field value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckSettlement {
	/// The response belongs to the value currently in the field
	Current,
	/// The field moved on; the response must be ignored
	Stale,
}

/// Tracks the outstanding availability probes of the e-mail field
///
/// Several probes may be in flight at once, one per distinct value.
#[derive(Debug, Clone, Default)]
pub struct UniquenessChecker {
	outstanding: HashSet<String>,
	issued: u64,
}

impl UniquenessChecker {
	pub fn new() -> Self {
		Self::default()
	}

	/// Start a probe for `value`
	///
	/// Returns `None` when a probe for the same value is already outstanding.
	///
	/// # Examples
	///
	/// ```
	/// use signup_forms::UniquenessChecker;
	///
	/// let mut checker = UniquenessChecker::new();
	/// let check = checker.begin("user1@gmail.com").unwrap();
	/// assert_eq!(check.key(), "user1@gmail.com");
	/// assert!(checker.is_pending("user1@gmail.com"));
	/// assert!(checker.begin("user1@gmail.com").is_none());
	/// ```
	pub fn begin(&mut self, value: &str) -> Option<EmailCheck> {
		if self.outstanding.contains(value) {
			debug!(email = %value, "availability check already outstanding");
			return None;
		}
		self.issued += 1;
		self.outstanding.insert(value.to_string());
		Some(EmailCheck {
			key: value.to_string(),
			sequence: self.issued,
		})
	}

	/// Whether a probe for `current` is outstanding
	pub fn is_pending(&self, current: &str) -> bool {
		self.outstanding.contains(current)
	}

	/// Settle a response for `check` against the field's `current` value
	///
	/// # Examples
	///
	/// ```
	/// use signup_forms::{CheckSettlement, UniquenessChecker};
	///
	/// let mut checker = UniquenessChecker::new();
	/// let first = checker.begin("a@b.com").unwrap();
	/// let second = checker.begin("c@d.com").unwrap();
	///
	/// // The field now holds the second value
	/// assert_eq!(checker.settle(&first, "c@d.com"), CheckSettlement::Stale);
	/// assert!(checker.is_pending("c@d.com"));
	/// assert_eq!(checker.settle(&second, "c@d.com"), CheckSettlement::Current);
	/// assert!(!checker.is_pending("c@d.com"));
	/// ```
	pub fn settle(&mut self, check: &EmailCheck, current: &str) -> CheckSettlement {
		self.outstanding.remove(&check.key);
		if check.key == current {
			CheckSettlement::Current
		} else {
			debug!(
				email = %check.key,
				sequence = check.sequence,
				"discarding stale availability response"
			);
			CheckSettlement::Stale
		}
	}

}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_begin_numbers_checks() {
		let mut checker = UniquenessChecker::new();
		let first = checker.begin("a@b.com").unwrap();
		let second = checker.begin("c@d.com").unwrap();

		assert_eq!(first.sequence(), 1);
		assert_eq!(second.sequence(), 2);
	}

	#[rstest]
	fn test_earlier_check_stays_outstanding() {
		let mut checker = UniquenessChecker::new();
		let first = checker.begin("a@b.com").unwrap();
		let second = checker.begin("c@d.com").unwrap();

		// Back to the first address while both are in flight
		assert!(checker.is_pending("a@b.com"));
		assert!(checker.begin("a@b.com").is_none());

		assert_eq!(checker.settle(&second, "a@b.com"), CheckSettlement::Stale);
		assert!(checker.is_pending("a@b.com"));
		assert_eq!(checker.settle(&first, "a@b.com"), CheckSettlement::Current);
		assert!(!checker.is_pending("a@b.com"));
	}

	#[rstest]
	fn test_response_for_changed_value_is_stale() {
		let mut checker = UniquenessChecker::new();
		let check = checker.begin("a@b.com").unwrap();

		assert_eq!(checker.settle(&check, "a@b.co"), CheckSettlement::Stale);
		assert!(!checker.is_pending("a@b.com"));
	}

	#[rstest]
	fn test_value_identity_not_arrival_order() {
		let mut checker = UniquenessChecker::new();
		let first = checker.begin("a@b.com").unwrap();
		let _second = checker.begin("c@d.com").unwrap();

		// The user went back to the first address before its response arrived
		assert_eq!(checker.settle(&first, "a@b.com"), CheckSettlement::Current);
		// The second probe is still outstanding for its own value
		assert!(checker.is_pending("c@d.com"));
	}

	#[rstest]
	fn test_begin_after_settle_issues_new_check() {
		let mut checker = UniquenessChecker::new();
		let check = checker.begin("a@b.com").unwrap();
		checker.settle(&check, "a@b.com");

		let again = checker.begin("a@b.com").unwrap();
		assert_eq!(again.sequence(), 2);
	}
}
