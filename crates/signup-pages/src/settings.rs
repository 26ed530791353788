//! API settings
//!
//! Settings come from three layers, later layers overriding earlier ones:
//!
//! 1. [`ApiSettings::default`]
//! 2. A TOML document ([`ApiSettings::from_toml_str`])
//! 3. `SIGNUP_API_*` environment variables ([`ApiSettings::with_env`])
//!
//! ```toml
//! base_url = "https://example.com"
//! sign_up_path = "/api/1.0/users"
//! email_check_path = "/api/1.0/user/email"
//! timeout_secs = 10
//! ```

use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

/// Prefix of every environment variable read by [`ApiSettings::with_env`]
pub const ENV_PREFIX: &str = "SIGNUP_API_";

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
	#[error("Invalid settings document: {0}")]
	Toml(#[from] toml::de::Error),

	#[error("Invalid value for environment variable {key}: {value:?}")]
	InvalidEnv { key: String, value: String },

	#[error("Invalid URL: {0}")]
	Url(#[from] url::ParseError),
}

pub type SettingsResult<T> = Result<T, SettingsError>;

/// Location of the sign-up endpoints and transport options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiSettings {
	/// Scheme, host and port of the API (e.g. `http://localhost:8080`)
	pub base_url: String,
	pub sign_up_path: String,
	pub email_check_path: String,
	/// Request timeout; `None` waits indefinitely
	pub timeout_secs: Option<u64>,
}

impl Default for ApiSettings {
	fn default() -> Self {
		Self {
			base_url: "http://localhost:8080".to_string(),
			sign_up_path: "/api/1.0/users".to_string(),
			email_check_path: "/api/1.0/user/email".to_string(),
			timeout_secs: None,
		}
	}
}

impl ApiSettings {
	/// Settings pointing at `base_url` with default paths
	pub fn with_base_url(base_url: impl Into<String>) -> Self {
		Self {
			base_url: base_url.into(),
			..Self::default()
		}
	}

	/// Parse settings from TOML; missing keys keep their defaults
	///
	/// # Examples
	///
	/// ```
	/// use signup_pages::ApiSettings;
	///
	/// let settings = ApiSettings::from_toml_str(r#"base_url = "https://example.com""#).unwrap();
	/// assert_eq!(settings.base_url, "https://example.com");
	/// assert_eq!(settings.sign_up_path, "/api/1.0/users");
	/// ```
	pub fn from_toml_str(document: &str) -> SettingsResult<Self> {
		Ok(toml::from_str(document)?)
	}

	/// Defaults overridden by the process environment
	pub fn from_env() -> SettingsResult<Self> {
		Self::default().with_env(|key| std::env::var(key).ok())
	}

	/// Override fields from `SIGNUP_API_*` variables found through `lookup`
	///
	/// | Variable | Field |
	/// |----------|-------|
	/// | `SIGNUP_API_BASE_URL` | `base_url` |
	/// | `SIGNUP_API_SIGN_UP_PATH` | `sign_up_path` |
	/// | `SIGNUP_API_EMAIL_CHECK_PATH` | `email_check_path` |
	/// | `SIGNUP_API_TIMEOUT_SECS` | `timeout_secs` |
	pub fn with_env<F>(mut self, lookup: F) -> SettingsResult<Self>
	where
		F: Fn(&str) -> Option<String>,
	{
		let var = |name: &str| lookup(&format!("{}{}", ENV_PREFIX, name));

		if let Some(base_url) = var("BASE_URL") {
			self.base_url = base_url;
		}
		if let Some(path) = var("SIGN_UP_PATH") {
			self.sign_up_path = path;
		}
		if let Some(path) = var("EMAIL_CHECK_PATH") {
			self.email_check_path = path;
		}
		if let Some(raw) = var("TIMEOUT_SECS") {
			let secs = raw
				.trim()
				.parse::<u64>()
				.map_err(|_| SettingsError::InvalidEnv {
					key: format!("{}TIMEOUT_SECS", ENV_PREFIX),
					value: raw.clone(),
				})?;
			self.timeout_secs = Some(secs);
		}
		Ok(self)
	}

	pub fn timeout(&self) -> Option<Duration> {
		self.timeout_secs.map(Duration::from_secs)
	}

	/// Absolute URL of the sign-up endpoint
	pub fn sign_up_url(&self) -> SettingsResult<Url> {
		self.endpoint(&self.sign_up_path)
	}

	/// Absolute URL of the e-mail availability endpoint
	pub fn email_check_url(&self) -> SettingsResult<Url> {
		self.endpoint(&self.email_check_path)
	}

	fn endpoint(&self, path: &str) -> SettingsResult<Url> {
		let base = Url::parse(&self.base_url)?;
		Ok(base.join(path)?)
	}
}
