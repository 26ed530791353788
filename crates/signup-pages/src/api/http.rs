//! JSON over HTTP client

use super::{ApiError, ApiResult, SignUpApi};
use crate::settings::ApiSettings;
use async_trait::async_trait;
use reqwest::Client;
use signup_forms::{EmailCheckRequest, EmailCheckResponse, SignUpFailureBody, SignUpRequest};
use tracing::{debug, warn};
use url::Url;

/// reqwest-backed [`SignUpApi`]
///
/// # Examples
///
/// ```
/// use signup_pages::{ApiSettings, HttpSignUpApi};
///
/// let api = HttpSignUpApi::new(&ApiSettings::with_base_url("http://127.0.0.1:8080")).unwrap();
/// assert_eq!(api.sign_up_url().as_str(), "http://127.0.0.1:8080/api/1.0/users");
/// ```
#[derive(Debug, Clone)]
pub struct HttpSignUpApi {
	client: Client,
	sign_up_url: Url,
	email_check_url: Url,
}

impl HttpSignUpApi {
	/// Build a client from settings, applying the configured timeout
	pub fn new(settings: &ApiSettings) -> ApiResult<Self> {
		let mut builder = Client::builder();
		if let Some(timeout) = settings.timeout() {
			builder = builder.timeout(timeout);
		}
		Self::with_client(settings, builder.build()?)
	}

	/// Build from settings with a preconfigured client
	pub fn with_client(settings: &ApiSettings, client: Client) -> ApiResult<Self> {
		Ok(Self {
			client,
			sign_up_url: settings.sign_up_url()?,
			email_check_url: settings.email_check_url()?,
		})
	}

	pub fn sign_up_url(&self) -> &Url {
		&self.sign_up_url
	}

	pub fn email_check_url(&self) -> &Url {
		&self.email_check_url
	}
}

#[async_trait]
impl SignUpApi for HttpSignUpApi {
	async fn sign_up(&self, request: &SignUpRequest) -> ApiResult<()> {
		let response = self
			.client
			.post(self.sign_up_url.clone())
			.json(request)
			.send()
			.await?;

		let status = response.status();
		if status.is_success() {
			debug!(%status, "sign-up accepted");
			return Ok(());
		}

		// A body that cannot be read still counts as a rejection
		let body = response.bytes().await.unwrap_or_default();
		let validation_errors = SignUpFailureBody::parse_lenient(&body).into_validation_errors();
		warn!(%status, fields = validation_errors.len(), "sign-up rejected");
		Err(ApiError::Rejected {
			status: status.as_u16(),
			validation_errors,
		})
	}

	async fn check_email(&self, request: &EmailCheckRequest) -> ApiResult<EmailCheckResponse> {
		let response = self
			.client
			.post(self.email_check_url.clone())
			.json(request)
			.send()
			.await?;

		let status = response.status();
		if !status.is_success() {
			warn!(%status, "e-mail check rejected");
			return Err(ApiError::Status(status.as_u16()));
		}

		let body = response.bytes().await?;
		if body.iter().all(u8::is_ascii_whitespace) {
			return Ok(EmailCheckResponse::default());
		}
		Ok(serde_json::from_slice(&body)?)
	}
}
