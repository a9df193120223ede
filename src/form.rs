//! Form assembly and error decoration
//!
//! A [`Form`] is an ordered collection of field descriptors plus a
//! submission target and method. Field order is render order, and field
//! names are unique within a form. After a failed validation pass,
//! [`Form::apply_errors`] re-associates each error with its originating
//! field so the form can be re-rendered with inline messages.

use crate::field::FieldDescriptor;
use crate::schema::ValidationError;
use serde::{Deserialize, Serialize};

/// HTTP method a form submits with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
	Get,
	Post,
}

#[derive(Debug, thiserror::Error)]
pub enum FormError {
	#[error("Form already has a field named '{0}'")]
	DuplicateField(String),
}

pub type FormResult<T> = Result<T, FormError>;

/// Ordered collection of field descriptors plus a submission target.
///
/// # Examples
///
/// ```
/// use licence_forms::{FieldDescriptor, Form, Method};
///
/// let mut form = Form::new("/licences/search");
/// form.push_field(FieldDescriptor::text("holder_name")).unwrap();
/// form.push_field(FieldDescriptor::button("submit")).unwrap();
///
/// assert_eq!(form.action(), "/licences/search");
/// assert_eq!(form.method(), Method::Post);
/// assert_eq!(form.field_count(), 2);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Form {
	action: String,
	method: Method,
	fields: Vec<FieldDescriptor>,
	/// Form-level errors that could not be matched to a field
	pub errors: Vec<ValidationError>,
}

impl Form {
	/// Create an empty POST form targeting the given action path.
	///
	/// # Examples
	///
	/// ```
	/// use licence_forms::{Form, Method};
	///
	/// let form = Form::new("/returns/upload");
	/// assert_eq!(form.method(), Method::Post);
	/// assert!(form.fields().is_empty());
	/// ```
	pub fn new(action: impl Into<String>) -> Self {
		Self::with_method(action, Method::Post)
	}

	/// Create an empty form with an explicit method.
	///
	/// # Examples
	///
	/// ```
	/// use licence_forms::{Form, Method};
	///
	/// let form = Form::with_method("/licences", Method::Get);
	/// assert_eq!(form.method(), Method::Get);
	/// ```
	pub fn with_method(action: impl Into<String>, method: Method) -> Self {
		Self {
			action: action.into(),
			method,
			fields: vec![],
			errors: vec![],
		}
	}

	/// The submission target path. Immutable once set.
	pub fn action(&self) -> &str {
		&self.action
	}

	/// The submission method. Immutable once set.
	pub fn method(&self) -> Method {
		self.method
	}

	/// Append a field, preserving insertion order.
	///
	/// Field names are unique within a form; appending a second field
	/// with an existing name is a configuration error.
	///
	/// # Examples
	///
	/// ```
	/// use licence_forms::{FieldDescriptor, Form};
	///
	/// let mut form = Form::new("/search");
	/// form.push_field(FieldDescriptor::text("q")).unwrap();
	/// assert!(form.push_field(FieldDescriptor::text("q")).is_err());
	/// ```
	pub fn push_field(&mut self, field: FieldDescriptor) -> FormResult<()> {
		if self.fields.iter().any(|f| f.name() == field.name()) {
			return Err(FormError::DuplicateField(field.name().to_string()));
		}
		self.fields.push(field);
		Ok(())
	}

	/// Replace the field with the same name in place, or append.
	///
	/// # Examples
	///
	/// ```
	/// use licence_forms::{FieldDescriptor, Form};
	/// use serde_json::json;
	///
	/// let mut form = Form::new("/search");
	/// form.set_field(FieldDescriptor::hidden("csrf_token").with_value(json!("a")));
	/// form.set_field(FieldDescriptor::hidden("csrf_token").with_value(json!("b")));
	///
	/// assert_eq!(form.field_count(), 1);
	/// assert_eq!(form.get_field("csrf_token").unwrap().value, json!("b"));
	/// ```
	pub fn set_field(&mut self, field: FieldDescriptor) {
		match self.fields.iter().position(|f| f.name() == field.name()) {
			Some(index) => self.fields[index] = field,
			None => self.fields.push(field),
		}
	}

	/// Remove a field by name, returning it if present.
	pub fn remove_field(&mut self, name: &str) -> Option<FieldDescriptor> {
		let index = self.fields.iter().position(|f| f.name() == name)?;
		Some(self.fields.remove(index))
	}

	/// Look up a field by name.
	pub fn get_field(&self, name: &str) -> Option<&FieldDescriptor> {
		self.fields.iter().find(|f| f.name() == name)
	}

	/// Look up a field by name, mutably.
	pub fn get_field_mut(&mut self, name: &str) -> Option<&mut FieldDescriptor> {
		self.fields.iter_mut().find(|f| f.name() == name)
	}

	/// Fields in render order.
	pub fn fields(&self) -> &[FieldDescriptor] {
		&self.fields
	}

	/// Fields in render order, mutably.
	pub fn fields_mut(&mut self) -> &mut [FieldDescriptor] {
		&mut self.fields
	}

	/// Field names in render order.
	pub fn field_names(&self) -> Vec<&str> {
		self.fields.iter().map(|f| f.name()).collect()
	}

	pub fn field_count(&self) -> usize {
		self.fields.len()
	}

	/// Whether any field-level or form-level errors are attached.
	pub fn has_errors(&self) -> bool {
		!self.errors.is_empty() || self.fields.iter().any(|f| f.has_errors())
	}

	/// Re-associate validation errors with their originating fields.
	///
	/// Each error whose `field` matches a descriptor is attached to that
	/// descriptor; when the descriptor's `error_messages` has an override
	/// for the error's rule key, the override replaces the engine's
	/// default message. Errors naming a field not present on the form are
	/// kept as form-level errors rather than dropped.
	///
	/// Previous errors are cleared first, so applying the same error set
	/// twice yields the same state as applying it once.
	///
	/// # Examples
	///
	/// ```
	/// use licence_forms::{FieldDescriptor, Form, ValidationError};
	///
	/// let mut form = Form::new("/search");
	/// form.push_field(
	/// 	FieldDescriptor::hidden("licenceNumbers")
	/// 		.with_error_message("required", "Enter at least one licence number"),
	/// ).unwrap();
	///
	/// form.apply_errors(vec![ValidationError::new(
	/// 	"licenceNumbers",
	/// 	"required",
	/// 	"This field is required.",
	/// )]);
	///
	/// let field = form.get_field("licenceNumbers").unwrap();
	/// assert_eq!(field.errors[0].message, "Enter at least one licence number");
	/// ```
	pub fn apply_errors(&mut self, errors: Vec<ValidationError>) {
		self.errors.clear();
		for field in &mut self.fields {
			field.errors.clear();
		}

		for mut error in errors {
			match self.fields.iter_mut().find(|f| f.name() == error.field) {
				Some(field) => {
					if let Some(message) = field.options.error_messages.get(&error.rule) {
						error.message = message.clone();
					}
					field.errors.push(error);
				}
				None => self.errors.push(error),
			}
		}
	}
}
