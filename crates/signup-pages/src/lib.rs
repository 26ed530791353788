//! Sign-up page driver
//!
//! This crate drives the synchronous core from `signup-forms` against the
//! sign-up JSON API.
//!
//! ## Architecture
//!
//! ```text
//!  UI events                 SignUpPage                      SignUpApi
//! ┌──────────┐   input()   ┌──────────────────┐  sign_up()  ┌──────────────┐
//! │ input    │────────────▶│ SignUpForm       │────────────▶│ HttpSignUpApi│──▶ POST /api/1.0/users
//! │ blur     │   blur()    │ Submission-      │ check_email │ MemorySignUp-│──▶ POST /api/1.0/user/email
//! │ click    │   submit()  │ Controller       │◀────────────│ Api (tests)  │
//! └──────────┘             └────────┬─────────┘             └──────────────┘
//!                                   │ view()
//!                                   ▼
//!                               PageView ──▶ renderer
//! ```
//!
//! ## Example
//!
//! ```
//! use signup_forms::FieldName;
//! use signup_pages::{MemorySignUpApi, SignUpPage};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let api = MemorySignUpApi::new();
//! let page = SignUpPage::new(api.clone());
//!
//! page.input(FieldName::Username, "user1");
//! page.input(FieldName::Email, "user1@gmail.com");
//! page.input(FieldName::Password, "P4ssword");
//! page.input(FieldName::PasswordRepeat, "P4ssword");
//! assert!(!page.view().button_disabled);
//!
//! page.submit().await;
//! assert_eq!(
//!     page.view().confirmation,
//!     Some("Please check your e-mail to activate your account")
//! );
//! assert_eq!(api.sign_up_requests().len(), 1);
//! # }
//! ```

pub mod api;
pub mod page;
pub mod settings;
pub mod view;

pub use api::{ApiError, ApiResult, HttpSignUpApi, MemoryResponse, MemorySignUpApi, SignUpApi};
pub use page::SignUpPage;
pub use settings::{ApiSettings, SettingsError, SettingsResult};
pub use view::{FieldView, PageView};
