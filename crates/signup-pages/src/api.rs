//! Sign-up API clients
//!
//! [`SignUpApi`] is the seam between the page and the network.
//! [`HttpSignUpApi`] talks JSON over HTTP; [`MemorySignUpApi`] records
//! requests and answers from a script, for tests and local development.

mod http;
mod memory;

pub use http::HttpSignUpApi;
pub use memory::{MemoryResponse, MemorySignUpApi};

use crate::settings::SettingsError;
use async_trait::async_trait;
use signup_forms::{EmailCheckRequest, EmailCheckResponse, SignUpRequest};
use std::collections::HashMap;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
	#[error("HTTP transport error: {0}")]
	Transport(#[from] reqwest::Error),

	/// Non-2xx answer from the sign-up endpoint
	#[error("Request rejected with status {status}")]
	Rejected {
		status: u16,
		validation_errors: HashMap<String, String>,
	},

	/// Non-2xx answer from an endpoint that carries no field errors
	#[error("Unexpected response status {0}")]
	Status(u16),

	#[error("Invalid response body: {0}")]
	Decode(#[from] serde_json::Error),

	#[error("Invalid API settings: {0}")]
	Settings(#[from] SettingsError),

	#[error("API unavailable: {0}")]
	Unavailable(String),
}

impl ApiError {
	/// Field errors carried by a rejection, if any
	pub fn validation_errors(&self) -> Option<&HashMap<String, String>> {
		match self {
			ApiError::Rejected {
				validation_errors, ..
			} => Some(validation_errors),
			_ => None,
		}
	}

	/// Returns true if no HTTP response was received
	pub fn is_transport(&self) -> bool {
		matches!(self, ApiError::Transport(_) | ApiError::Unavailable(_))
	}

	/// Returns true if the request timed out
	pub fn is_timeout(&self) -> bool {
		match self {
			ApiError::Transport(e) => e.is_timeout(),
			_ => false,
		}
	}
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Sign-up endpoints
#[async_trait]
pub trait SignUpApi: Send + Sync {
	/// Create an account
	///
	/// `Ok(())` for any 2xx answer, [`ApiError::Rejected`] for any other status.
	async fn sign_up(&self, request: &SignUpRequest) -> ApiResult<()>;

	/// Ask whether an e-mail address is already registered
	///
	/// A non-2xx answer is [`ApiError::Status`].
	async fn check_email(&self, request: &EmailCheckRequest) -> ApiResult<EmailCheckResponse>;
}

#[async_trait]
impl<T: SignUpApi + ?Sized> SignUpApi for std::sync::Arc<T> {
	async fn sign_up(&self, request: &SignUpRequest) -> ApiResult<()> {
		(**self).sign_up(request).await
	}

	async fn check_email(&self, request: &EmailCheckRequest) -> ApiResult<EmailCheckResponse> {
		(**self).check_email(request).await
	}
}
