//! Request-cycle glue: bind on render, validate on submit
//!
//! Within one request the sequence is strictly sequential: build the
//! form, bind the CSRF token, then on POST validate the payload, map
//! errors back onto fields, and hand the outcome to the caller. A failed
//! submission re-renders with the submitted values preserved and inline
//! messages, never a 500-class response.

use crate::csrf::CsrfBinder;
use crate::form::Form;
use crate::schema::{RULE_CSRF, SchemaError, SchemaOptions, ValidationError, ValidationSchema};
use crate::session::Session;
use serde_json::{Map, Value};
use tracing::debug;

/// Outcome of a form submission.
#[derive(Debug)]
pub enum Submission {
	/// Every check passed; `cleaned` holds the coerced field values.
	Accepted { cleaned: Map<String, Value> },
	/// One or more checks failed; the form carries the submitted values
	/// and the errors, ready for re-render.
	Rejected { form: Form },
}

impl Submission {
	pub fn is_accepted(&self) -> bool {
		matches!(self, Submission::Accepted { .. })
	}
}

/// Prepare a form for rendering: ensure the session has a CSRF token and
/// bind it to the form's hidden token field. Returns the token.
///
/// # Examples
///
/// ```
/// use licence_forms::{CsrfBinder, FieldDescriptor, Form, Session, submission};
///
/// let csrf = CsrfBinder::new();
/// let mut session = Session::new();
/// let mut form = Form::new("/licences/search");
/// form.push_field(FieldDescriptor::text("q")).unwrap();
///
/// let token = submission::render(&mut form, &csrf, &mut session);
/// assert_eq!(form.get_field("csrf_token").unwrap().value, serde_json::json!(token));
/// ```
pub fn render(form: &mut Form, csrf: &CsrfBinder, session: &mut Session) -> String {
	let token = csrf.ensure_token(session);
	csrf.bind_to_form(form, &token);
	token
}

/// Process a POST payload against the form.
///
/// The submitted values are copied onto the matching field descriptors
/// first, so a rejected form re-renders with the user's input intact. A
/// CSRF mismatch is reported as a validation error on the token field
/// alongside any field errors, not as a distinct fatal error.
///
/// Returns `Err` only for configuration mistakes surfaced by schema
/// composition; user input problems always come back as
/// [`Submission::Rejected`].
///
/// # Examples
///
/// ```
/// use licence_forms::{CsrfBinder, FieldDescriptor, Form, Session, submission};
/// use serde_json::{json, Map};
///
/// let csrf = CsrfBinder::new();
/// let mut session = Session::new();
/// let mut form = Form::new("/licences/search");
/// form.push_field(FieldDescriptor::text("q")).unwrap();
///
/// let token = submission::render(&mut form, &csrf, &mut session);
///
/// let mut payload = Map::new();
/// payload.insert("q".to_string(), json!("AN/03/28"));
/// payload.insert("csrf_token".to_string(), json!(token));
///
/// let outcome = submission::submit(form, &csrf, &session, &payload, None).unwrap();
/// assert!(outcome.is_accepted());
/// ```
pub fn submit(
	mut form: Form,
	csrf: &CsrfBinder,
	session: &Session,
	payload: &Map<String, Value>,
	overrides: Option<SchemaOptions>,
) -> Result<Submission, SchemaError> {
	for field in form.fields_mut() {
		if let Some(value) = payload.get(field.name()) {
			field.value = value.clone();
		}
	}

	let mut errors = Vec::new();

	let submitted_token = payload
		.get(csrf.field_name())
		.and_then(|v| v.as_str())
		.unwrap_or("");
	if !csrf.verify(session, submitted_token) {
		errors.push(ValidationError::new(
			csrf.field_name(),
			RULE_CSRF,
			"This form has expired. Please try again.",
		));
	}

	let schema = ValidationSchema::build(&form, overrides)?;

	match schema.validate(payload) {
		Ok(mut cleaned) if errors.is_empty() => {
			// The token is transport, not step data
			cleaned.remove(csrf.field_name());
			Ok(Submission::Accepted { cleaned })
		}
		Ok(_) => {
			debug!(action = form.action(), "form submission rejected");
			form.apply_errors(errors);
			Ok(Submission::Rejected { form })
		}
		Err(mut validation_errors) => {
			errors.append(&mut validation_errors);
			debug!(
				action = form.action(),
				errors = errors.len(),
				"form submission rejected"
			);
			form.apply_errors(errors);
			Ok(Submission::Rejected { form })
		}
	}
}
