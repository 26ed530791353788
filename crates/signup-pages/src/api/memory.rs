//! In-memory sign-up API for testing
//!
//! Records every request and answers from a configurable script instead of
//! talking to a server. Clones share the same state, so a test keeps one
//! handle for assertions and gives another to the page.
//!
//! # Examples
//!
//! ```
//! use signup_forms::EmailCheckRequest;
//! use signup_pages::{MemorySignUpApi, SignUpApi};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let api = MemorySignUpApi::new();
//!     api.register_email("user1@gmail.com");
//!
//!     let request = EmailCheckRequest { email: "user1@gmail.com".to_string() };
//!     assert!(api.check_email(&request).await.unwrap().in_use);
//!     assert_eq!(api.email_check_requests().len(), 1);
//! }
//! ```

use super::{ApiError, ApiResult, SignUpApi};
use async_trait::async_trait;
use parking_lot::RwLock;
use signup_forms::{EmailCheckRequest, EmailCheckResponse, SignUpRequest};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::debug;

/// Scripted answer of the sign-up endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum MemoryResponse {
	/// 2xx
	#[default]
	Accept,
	/// Non-2xx with field errors
	Reject {
		status: u16,
		validation_errors: HashMap<String, String>,
	},
	/// No response at all
	Fail,
}

impl MemoryResponse {
	/// A 400 answer carrying a single field error
	pub fn reject_field(field: impl Into<String>, message: impl Into<String>) -> Self {
		let mut validation_errors = HashMap::new();
		validation_errors.insert(field.into(), message.into());
		MemoryResponse::Reject {
			status: 400,
			validation_errors,
		}
	}
}

#[derive(Debug, Default)]
struct MemoryState {
	sign_up_requests: Vec<SignUpRequest>,
	email_check_requests: Vec<EmailCheckRequest>,
	response: MemoryResponse,
	registered: HashSet<String>,
	fail_email_checks: bool,
}

/// In-memory [`SignUpApi`]
#[derive(Clone)]
pub struct MemorySignUpApi {
	state: Arc<RwLock<MemoryState>>,
	/// `true` while requests are held back
	paused: Arc<watch::Sender<bool>>,
}

impl MemorySignUpApi {
	pub fn new() -> Self {
		let (paused, _) = watch::channel(false);
		Self {
			state: Arc::new(RwLock::new(MemoryState::default())),
			paused: Arc::new(paused),
		}
	}

	/// Set the answer of every following sign-up request
	pub fn respond_with(&self, response: MemoryResponse) {
		self.state.write().response = response;
	}

	/// Mark `email` as belonging to an existing account
	pub fn register_email(&self, email: impl Into<String>) {
		self.state.write().registered.insert(email.into());
	}

	/// Make e-mail checks fail in transport
	pub fn fail_email_checks(&self, fail: bool) {
		self.state.write().fail_email_checks = fail;
	}

	/// Hold every following request after it is recorded, until [`resume`](Self::resume)
	pub fn pause(&self) {
		self.paused.send_replace(true);
	}

	/// Release held requests
	pub fn resume(&self) {
		self.paused.send_replace(false);
	}

	/// Sign-up requests received so far
	pub fn sign_up_requests(&self) -> Vec<SignUpRequest> {
		self.state.read().sign_up_requests.clone()
	}

	/// E-mail check requests received so far
	pub fn email_check_requests(&self) -> Vec<EmailCheckRequest> {
		self.state.read().email_check_requests.clone()
	}

	/// Forget recorded requests, keeping the script
	pub fn clear(&self) {
		let mut state = self.state.write();
		state.sign_up_requests.clear();
		state.email_check_requests.clear();
	}

	async fn wait_until_resumed(&self) -> ApiResult<()> {
		let mut paused = self.paused.subscribe();
		paused
			.wait_for(|paused| !*paused)
			.await
			.map(|_| ())
			.map_err(|_| ApiError::Unavailable("memory API dropped".to_string()))
	}
}

impl Default for MemorySignUpApi {
	fn default() -> Self {
		Self::new()
	}
}

impl std::fmt::Debug for MemorySignUpApi {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("MemorySignUpApi")
			.field("state", &*self.state.read())
			.field("paused", &*self.paused.borrow())
			.finish()
	}
}

#[async_trait]
impl SignUpApi for MemorySignUpApi {
	async fn sign_up(&self, request: &SignUpRequest) -> ApiResult<()> {
		self.state.write().sign_up_requests.push(request.clone());
		self.wait_until_resumed().await?;

		let response = self.state.read().response.clone();
		debug!(username = %request.username, ?response, "memory sign-up");
		match response {
			MemoryResponse::Accept => Ok(()),
			MemoryResponse::Reject {
				status,
				validation_errors,
			} => Err(ApiError::Rejected {
				status,
				validation_errors,
			}),
			MemoryResponse::Fail => Err(ApiError::Unavailable(
				"scripted transport failure".to_string(),
			)),
		}
	}

	async fn check_email(&self, request: &EmailCheckRequest) -> ApiResult<EmailCheckResponse> {
		self.state.write().email_check_requests.push(request.clone());
		self.wait_until_resumed().await?;

		let state = self.state.read();
		if state.fail_email_checks {
			return Err(ApiError::Unavailable(
				"scripted transport failure".to_string(),
			));
		}
		Ok(EmailCheckResponse {
			in_use: state.registered.contains(&request.email),
		})
	}
}
