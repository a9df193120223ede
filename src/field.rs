//! Field descriptors and widget-specific factories
//!
//! A [`FieldDescriptor`] is the serializable description of one form
//! input: its widget kind, current value, validation options, and any
//! errors attached after a failed validation pass. Widget kinds share a
//! uniform factory and differ only in their default option set.

use crate::schema::ValidationError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Rendering/interaction kind of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Widget {
	Text,
	Hidden,
	Radio,
	Checkboxes,
	Button,
	Paragraph,
	File,
	Date,
}

impl Widget {
	/// Whether fields of this kind accept user input and participate in
	/// validation. Buttons and paragraphs are render-only.
	pub fn is_input(&self) -> bool {
		!matches!(self, Widget::Button | Widget::Paragraph)
	}
}

/// One selectable option of a radio or checkboxes field.
///
/// # Examples
///
/// ```
/// use licence_forms::FieldChoice;
/// use serde_json::json;
///
/// let choice = FieldChoice::new(json!("annual"), "Annual abstraction");
/// assert_eq!(choice.label, "Annual abstraction");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldChoice {
	pub value: serde_json::Value,
	pub label: String,
}

impl FieldChoice {
	pub fn new(value: serde_json::Value, label: impl Into<String>) -> Self {
		Self {
			value,
			label: label.into(),
		}
	}
}

/// Validation and presentation options of a field.
///
/// Every recognized option is a named member of this struct; there is no
/// open-ended option bag, so unrepresentable options cannot be smuggled
/// in at construction time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldOptions {
	/// Visible label, `None` for unlabeled widgets such as hidden inputs
	pub label: Option<String>,
	/// Secondary help text rendered under the label
	pub hint: Option<String>,
	/// Whether a value must be supplied on submission
	pub required: bool,
	/// Selectable options for radio/checkboxes widgets
	pub choices: Vec<FieldChoice>,
	/// Regex the (string) value must match, compiled at schema composition
	pub pattern: Option<String>,
	/// Minimum value length in characters
	pub min_length: Option<usize>,
	/// Maximum value length in characters
	pub max_length: Option<usize>,
	/// Per-rule overrides of the engine's default error messages,
	/// keyed by rule key (`required`, `pattern`, ...)
	pub error_messages: HashMap<String, String>,
	/// Coercion hint (`boolean`, `number`, `date`, `array`), validated at
	/// schema composition time
	pub mapper: Option<String>,
}

impl FieldOptions {
	/// Default option set for the given widget kind.
	///
	/// Input widgets default to required; buttons and paragraphs do not
	/// take input. Checkboxes coerce submissions to arrays and date
	/// widgets to ISO dates by default.
	///
	/// # Examples
	///
	/// ```
	/// use licence_forms::{FieldOptions, Widget};
	///
	/// let options = FieldOptions::defaults_for(Widget::Checkboxes);
	/// assert!(options.required);
	/// assert_eq!(options.mapper.as_deref(), Some("array"));
	///
	/// let options = FieldOptions::defaults_for(Widget::Button);
	/// assert!(!options.required);
	/// ```
	pub fn defaults_for(widget: Widget) -> Self {
		let mapper = match widget {
			Widget::Checkboxes => Some("array".to_string()),
			Widget::Date => Some("date".to_string()),
			_ => None,
		};
		Self {
			label: None,
			hint: None,
			required: widget.is_input(),
			choices: vec![],
			pattern: None,
			min_length: None,
			max_length: None,
			error_messages: HashMap::new(),
			mapper,
		}
	}
}

/// Serializable description of one form input.
///
/// Constructed through the per-widget factories ([`FieldDescriptor::text`],
/// [`FieldDescriptor::hidden`], ...); `name` is immutable after creation
/// and `errors` is empty until a failed validation pass attaches to it.
///
/// # Examples
///
/// ```
/// use licence_forms::FieldDescriptor;
///
/// let field = FieldDescriptor::text("holder_name").with_label("Licence holder");
/// assert_eq!(field.name(), "holder_name");
/// assert!(field.errors.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
	name: String,
	pub value: serde_json::Value,
	pub widget: Widget,
	pub options: FieldOptions,
	pub errors: Vec<ValidationError>,
}

impl FieldDescriptor {
	fn new(name: impl Into<String>, widget: Widget) -> Self {
		Self {
			name: name.into(),
			value: serde_json::Value::Null,
			widget,
			options: FieldOptions::defaults_for(widget),
			errors: vec![],
		}
	}

	/// Create a single-line text input field.
	///
	/// # Examples
	///
	/// ```
	/// use licence_forms::{FieldDescriptor, Widget};
	///
	/// let field = FieldDescriptor::text("holder_name");
	/// assert_eq!(field.widget, Widget::Text);
	/// assert!(field.options.required);
	/// ```
	pub fn text(name: impl Into<String>) -> Self {
		Self::new(name, Widget::Text)
	}

	/// Create a hidden input field.
	///
	/// # Examples
	///
	/// ```
	/// use licence_forms::{FieldDescriptor, Widget};
	///
	/// let field = FieldDescriptor::hidden("return_id");
	/// assert_eq!(field.widget, Widget::Hidden);
	/// ```
	pub fn hidden(name: impl Into<String>) -> Self {
		Self::new(name, Widget::Hidden)
	}

	/// Create a radio-button group field.
	pub fn radio(name: impl Into<String>) -> Self {
		Self::new(name, Widget::Radio)
	}

	/// Create a checkboxes field. Submitted values are coerced to an
	/// array by the default `array` mapper.
	///
	/// # Examples
	///
	/// ```
	/// use licence_forms::FieldDescriptor;
	///
	/// let field = FieldDescriptor::checkboxes("purposes");
	/// assert_eq!(field.options.mapper.as_deref(), Some("array"));
	/// ```
	pub fn checkboxes(name: impl Into<String>) -> Self {
		Self::new(name, Widget::Checkboxes)
	}

	/// Create a submit-button field. Buttons take no input and
	/// contribute no validation rules.
	pub fn button(name: impl Into<String>) -> Self {
		Self::new(name, Widget::Button)
	}

	/// Create a render-only paragraph field.
	pub fn paragraph(name: impl Into<String>) -> Self {
		Self::new(name, Widget::Paragraph)
	}

	/// Create a file-upload field.
	pub fn file(name: impl Into<String>) -> Self {
		Self::new(name, Widget::File)
	}

	/// Create a date input field. Submitted values are normalized to ISO
	/// `YYYY-MM-DD` by the default `date` mapper.
	pub fn date(name: impl Into<String>) -> Self {
		Self::new(name, Widget::Date)
	}

	/// The field name, unique within a form. Immutable after creation.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Set the visible label.
	///
	/// # Examples
	///
	/// ```
	/// use licence_forms::FieldDescriptor;
	///
	/// let field = FieldDescriptor::text("email").with_label("Email address");
	/// assert_eq!(field.options.label.as_deref(), Some("Email address"));
	/// ```
	pub fn with_label(mut self, label: impl Into<String>) -> Self {
		self.options.label = Some(label.into());
		self
	}

	/// Set the secondary help text.
	pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
		self.options.hint = Some(hint.into());
		self
	}

	/// Mark the field as required.
	pub fn required(mut self) -> Self {
		self.options.required = true;
		self
	}

	/// Mark the field as optional.
	///
	/// # Examples
	///
	/// ```
	/// use licence_forms::FieldDescriptor;
	///
	/// let field = FieldDescriptor::text("reference").optional();
	/// assert!(!field.options.required);
	/// ```
	pub fn optional(mut self) -> Self {
		self.options.required = false;
		self
	}

	/// Set the selectable choices.
	///
	/// # Examples
	///
	/// ```
	/// use licence_forms::{FieldChoice, FieldDescriptor};
	/// use serde_json::json;
	///
	/// let field = FieldDescriptor::radio("status").with_choices(vec![
	/// 	FieldChoice::new(json!("active"), "Active"),
	/// 	FieldChoice::new(json!("expired"), "Expired"),
	/// ]);
	/// assert_eq!(field.options.choices.len(), 2);
	/// ```
	pub fn with_choices(mut self, choices: Vec<FieldChoice>) -> Self {
		self.options.choices = choices;
		self
	}

	/// Set the regex pattern the value must match. The pattern is
	/// compiled when the form's schema is composed; an invalid pattern
	/// fails fast at that point.
	pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
		self.options.pattern = Some(pattern.into());
		self
	}

	/// Set the minimum value length in characters.
	pub fn with_min_length(mut self, min_length: usize) -> Self {
		self.options.min_length = Some(min_length);
		self
	}

	/// Set the maximum value length in characters.
	pub fn with_max_length(mut self, max_length: usize) -> Self {
		self.options.max_length = Some(max_length);
		self
	}

	/// Override the error message attached for the given rule key.
	///
	/// # Examples
	///
	/// ```
	/// use licence_forms::FieldDescriptor;
	///
	/// let field = FieldDescriptor::hidden("licenceNumbers")
	/// 	.with_error_message("required", "Enter at least one licence number");
	/// assert_eq!(
	/// 	field.options.error_messages.get("required").map(String::as_str),
	/// 	Some("Enter at least one licence number"),
	/// );
	/// ```
	pub fn with_error_message(
		mut self,
		rule: impl Into<String>,
		message: impl Into<String>,
	) -> Self {
		self.options.error_messages.insert(rule.into(), message.into());
		self
	}

	/// Set the coercion mapper (`boolean`, `number`, `date`, `array`).
	/// Unknown names are rejected at schema composition time.
	pub fn with_mapper(mut self, mapper: impl Into<String>) -> Self {
		self.options.mapper = Some(mapper.into());
		self
	}

	/// Set the current/pre-filled value.
	///
	/// # Examples
	///
	/// ```
	/// use licence_forms::FieldDescriptor;
	/// use serde_json::json;
	///
	/// let field = FieldDescriptor::text("holder_name").with_value(json!("A Water Co"));
	/// assert_eq!(field.value, json!("A Water Co"));
	/// ```
	pub fn with_value(mut self, value: serde_json::Value) -> Self {
		self.value = value;
		self
	}

	/// Whether any errors are attached to this field.
	pub fn has_errors(&self) -> bool {
		!self.errors.is_empty()
	}
}
