//! Shared helpers for the sign-up page integration tests
#![allow(dead_code)]

use rstest::fixture;
use signup_forms::FieldName;
use signup_pages::{MemorySignUpApi, SignUpApi, SignUpPage};
use std::sync::Once;

static INIT: Once = Once::new();

/// Initialize logging for tests (call once)
///
/// Honors `RUST_LOG`; output is captured by the test harness.
pub fn init_test_logging() {
	INIT.call_once(|| {
		let _ = tracing_subscriber::fmt()
			.with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
			.with_test_writer()
			.try_init();
	});
}

pub const VALID_USERNAME: &str = "user1";
pub const VALID_EMAIL: &str = "user1@gmail.com";
pub const VALID_PASSWORD: &str = "P4ssword";

/// A scripted API and a fresh page wired to it
#[fixture]
pub fn memory_page() -> (MemorySignUpApi, SignUpPage<MemorySignUpApi>) {
	init_test_logging();
	let api = MemorySignUpApi::new();
	let page = SignUpPage::new(api.clone());
	(api, page)
}

/// Enter valid values in every field without blurring
pub fn fill_valid<A: SignUpApi>(page: &SignUpPage<A>) {
	page.input(FieldName::Username, VALID_USERNAME);
	page.input(FieldName::Email, VALID_EMAIL);
	page.input(FieldName::Password, VALID_PASSWORD);
	page.input(FieldName::PasswordRepeat, VALID_PASSWORD);
}

/// Yield until `condition` holds, giving spawned requests a chance to run
pub async fn wait_until(mut condition: impl FnMut() -> bool) {
	for _ in 0..100 {
		if condition() {
			return;
		}
		tokio::task::yield_now().await;
	}
	panic!("condition not reached");
}
