//! Session-bound CSRF token issuance and verification
//!
//! A token is minted once per session when a form is first rendered,
//! stored in the session, injected into the form as a hidden field, and
//! compared in constant time against the submitted value. The token is
//! only rotated by an explicit session clear.

use crate::field::FieldDescriptor;
use crate::form::Form;
use crate::session::Session;
use serde_json::json;
use subtle::ConstantTimeEq;
use tracing::warn;
use uuid::Uuid;

/// Default session key and hidden-field name for the token.
pub const DEFAULT_TOKEN_KEY: &str = "csrf_token";

/// Issues and verifies the per-session anti-forgery token.
///
/// # Examples
///
/// ```
/// use licence_forms::{CsrfBinder, Session};
///
/// let binder = CsrfBinder::new();
/// let mut session = Session::new();
///
/// let token = binder.ensure_token(&mut session);
/// assert!(binder.verify(&session, &token));
/// assert!(!binder.verify(&session, "wrong"));
/// ```
#[derive(Debug, Clone)]
pub struct CsrfBinder {
	session_key: String,
	field_name: String,
}

impl CsrfBinder {
	/// Create a binder using [`DEFAULT_TOKEN_KEY`] for both the session
	/// key and the hidden-field name.
	pub fn new() -> Self {
		Self {
			session_key: DEFAULT_TOKEN_KEY.to_string(),
			field_name: DEFAULT_TOKEN_KEY.to_string(),
		}
	}

	/// Store the token under a custom session key.
	///
	/// # Examples
	///
	/// ```
	/// use licence_forms::{CsrfBinder, Session};
	///
	/// let binder = CsrfBinder::new().with_session_key("admin_csrf");
	/// let mut session = Session::new();
	///
	/// binder.ensure_token(&mut session);
	/// assert!(session.get("admin_csrf").is_some());
	/// ```
	pub fn with_session_key(mut self, key: impl Into<String>) -> Self {
		self.session_key = key.into();
		self
	}

	/// Inject the token under a custom hidden-field name.
	pub fn with_field_name(mut self, name: impl Into<String>) -> Self {
		self.field_name = name.into();
		self
	}

	/// Name of the hidden field the token is bound to.
	pub fn field_name(&self) -> &str {
		&self.field_name
	}

	/// Return the session's token, minting and storing a new one if none
	/// exists. Mutates the session only on the first call per session.
	///
	/// # Examples
	///
	/// ```
	/// use licence_forms::{CsrfBinder, Session};
	///
	/// let binder = CsrfBinder::new();
	/// let mut session = Session::new();
	///
	/// let first = binder.ensure_token(&mut session);
	/// let second = binder.ensure_token(&mut session);
	/// assert_eq!(first, second);
	/// ```
	pub fn ensure_token(&self, session: &mut Session) -> String {
		if let Some(existing) = session.get(&self.session_key).and_then(|v| v.as_str()) {
			return existing.to_string();
		}

		let token = Uuid::new_v4().to_string();
		session.set(&self.session_key, json!(token));
		token
	}

	/// Append or overwrite the hidden token field on the form.
	///
	/// The field is optional as far as the schema is concerned; the
	/// token check itself happens in [`CsrfBinder::verify`].
	///
	/// # Examples
	///
	/// ```
	/// use licence_forms::{CsrfBinder, Form, Session};
	/// use serde_json::json;
	///
	/// let binder = CsrfBinder::new();
	/// let mut session = Session::new();
	/// let mut form = Form::new("/licences/search");
	///
	/// let token = binder.ensure_token(&mut session);
	/// binder.bind_to_form(&mut form, &token);
	///
	/// assert_eq!(form.get_field("csrf_token").unwrap().value, json!(token));
	/// ```
	pub fn bind_to_form(&self, form: &mut Form, token: &str) {
		form.set_field(
			FieldDescriptor::hidden(&self.field_name)
				.optional()
				.with_value(json!(token)),
		);
	}

	/// Constant-time comparison of the submitted value against the
	/// session-stored token. False when no token has been stored yet or
	/// the submitted value is empty or different.
	pub fn verify(&self, session: &Session, submitted: &str) -> bool {
		let Some(expected) = session.get(&self.session_key).and_then(|v| v.as_str()) else {
			warn!(key = %self.session_key, "CSRF check with no session token");
			return false;
		};

		let matches: bool = expected.as_bytes().ct_eq(submitted.as_bytes()).into();
		if !matches {
			warn!(key = %self.session_key, "CSRF token mismatch");
		}
		matches
	}
}

impl Default for CsrfBinder {
	fn default() -> Self {
		Self::new()
	}
}
