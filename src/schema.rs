//! Validation schema composition and payload validation
//!
//! [`ValidationSchema::build`] translates a form's field options into one
//! rule set per field, merged with global defaults (collect every error,
//! tolerate unknown payload keys) that a caller can override per call.
//! Configuration mistakes, an unknown mapper name or a regex that does
//! not compile, fail at composition time rather than being silently
//! dropped at validation time.

use crate::field::FieldOptions;
use crate::form::Form;
use chrono::{Datelike, NaiveDate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

/// Rule keys, stable across the engine and usable in
/// [`FieldOptions::error_messages`] overrides.
pub const RULE_REQUIRED: &str = "required";
pub const RULE_PATTERN: &str = "pattern";
pub const RULE_MIN_LENGTH: &str = "min_length";
pub const RULE_MAX_LENGTH: &str = "max_length";
pub const RULE_ONE_OF: &str = "one_of";
pub const RULE_TYPE: &str = "type";
pub const RULE_UNKNOWN: &str = "unknown";
pub const RULE_CSRF: &str = "csrf";

/// One validation failure: the field path it belongs to, the rule that
/// failed, and a human-readable message.
///
/// # Examples
///
/// ```
/// use licence_forms::ValidationError;
///
/// let error = ValidationError::new("holder_name", "required", "This field is required.");
/// assert_eq!(error.field, "holder_name");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationError {
	pub field: String,
	pub rule: String,
	pub message: String,
}

impl ValidationError {
	pub fn new(
		field: impl Into<String>,
		rule: impl Into<String>,
		message: impl Into<String>,
	) -> Self {
		Self {
			field: field.into(),
			rule: rule.into(),
			message: message.into(),
		}
	}
}

/// Configuration errors surfaced at schema composition time.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
	#[error("Field '{field}' references unsupported mapper '{mapper}'")]
	UnsupportedRule { field: String, mapper: String },
	#[error("Field '{field}' has an invalid pattern: {source}")]
	InvalidPattern {
		field: String,
		#[source]
		source: regex::Error,
	},
}

/// Global validation defaults, overridable per [`ValidationSchema::build`]
/// call. The caller's overrides win on conflict.
///
/// # Examples
///
/// ```
/// use licence_forms::SchemaOptions;
///
/// let defaults = SchemaOptions::default();
/// assert!(!defaults.abort_early);
/// assert!(defaults.allow_unknown);
///
/// let strict = SchemaOptions::new().with_allow_unknown(false);
/// assert!(!strict.allow_unknown);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchemaOptions {
	/// Stop at the first error instead of collecting every error
	pub abort_early: bool,
	/// Ignore payload keys with no matching field instead of erroring
	pub allow_unknown: bool,
}

impl Default for SchemaOptions {
	fn default() -> Self {
		Self {
			abort_early: false,
			allow_unknown: true,
		}
	}
}

impl SchemaOptions {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_abort_early(mut self, abort_early: bool) -> Self {
		self.abort_early = abort_early;
		self
	}

	pub fn with_allow_unknown(mut self, allow_unknown: bool) -> Self {
		self.allow_unknown = allow_unknown;
		self
	}
}

/// Coercion applied to a submitted value before the field's rules run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mapper {
	Identity,
	Boolean,
	Number,
	Date,
	Array,
}

/// Date formats accepted by the `date` mapper, normalized to ISO 8601.
const DATE_INPUT_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y", "%d %B %Y", "%d %b %Y"];

impl Mapper {
	fn parse(name: &str) -> Option<Self> {
		match name {
			"boolean" => Some(Self::Boolean),
			"number" => Some(Self::Number),
			"date" => Some(Self::Date),
			"array" => Some(Self::Array),
			_ => None,
		}
	}

	/// Coerce the value, or return the type-error message for it.
	fn apply(&self, value: &Value) -> Result<Value, String> {
		match self {
			Self::Identity => Ok(value.clone()),
			Self::Boolean => match value {
				Value::Bool(_) => Ok(value.clone()),
				Value::String(s) if s == "true" => Ok(Value::Bool(true)),
				Value::String(s) if s == "false" => Ok(Value::Bool(false)),
				_ => Err("Select yes or no.".to_string()),
			},
			Self::Number => match value {
				Value::Number(_) => Ok(value.clone()),
				Value::String(s) => {
					if let Ok(int) = s.parse::<i64>() {
						Ok(Value::Number(int.into()))
					} else if let Ok(float) = s.parse::<f64>()
						&& let Some(number) = serde_json::Number::from_f64(float)
					{
						Ok(Value::Number(number))
					} else {
						Err("Enter a number.".to_string())
					}
				}
				_ => Err("Enter a number.".to_string()),
			},
			Self::Date => match value {
				Value::String(s) => parse_date(s)
					.map(|date| Value::String(date.format("%Y-%m-%d").to_string()))
					.ok_or_else(|| "Enter a valid date.".to_string()),
				_ => Err("Enter a valid date.".to_string()),
			},
			Self::Array => match value {
				Value::Array(_) => Ok(value.clone()),
				Value::String(s) => {
					let items: Vec<Value> = s
						.split(|c| c == ',' || c == '\n' || c == '\r')
						.map(str::trim)
						.filter(|item| !item.is_empty())
						.map(|item| Value::String(item.to_string()))
						.collect();
					Ok(Value::Array(items))
				}
				other => Ok(Value::Array(vec![other.clone()])),
			},
		}
	}
}

/// Parse a submitted date string against the accepted input formats.
///
/// Years outside the 4-digit range are rejected to prevent ambiguous
/// 2-digit year interpretations.
fn parse_date(s: &str) -> Option<NaiveDate> {
	for format in DATE_INPUT_FORMATS {
		if let Ok(date) = NaiveDate::parse_from_str(s, format) {
			if !(1000..=9999).contains(&date.year()) {
				continue;
			}
			return Some(date);
		}
	}
	None
}

/// Validation rule set of one field, derived from its options.
#[derive(Debug)]
struct FieldRules {
	name: String,
	required: bool,
	mapper: Mapper,
	pattern: Option<Regex>,
	min_length: Option<usize>,
	max_length: Option<usize>,
	one_of: Vec<Value>,
}

impl FieldRules {
	fn from_options(name: &str, options: &FieldOptions) -> Result<Self, SchemaError> {
		let mapper = match options.mapper.as_deref() {
			None => Mapper::Identity,
			Some(hint) => Mapper::parse(hint).ok_or_else(|| SchemaError::UnsupportedRule {
				field: name.to_string(),
				mapper: hint.to_string(),
			})?,
		};

		let pattern = match &options.pattern {
			None => None,
			Some(source) => Some(Regex::new(source).map_err(|source| {
				SchemaError::InvalidPattern {
					field: name.to_string(),
					source,
				}
			})?),
		};

		Ok(Self {
			name: name.to_string(),
			required: options.required,
			mapper,
			pattern,
			min_length: options.min_length,
			max_length: options.max_length,
			one_of: options.choices.iter().map(|c| c.value.clone()).collect(),
		})
	}
}

/// Composite validation schema: one rule set per input field, in field
/// declaration order, plus the effective global options.
#[derive(Debug)]
pub struct ValidationSchema {
	rules: Vec<FieldRules>,
	options: SchemaOptions,
}

impl ValidationSchema {
	/// Compose the schema for a form.
	///
	/// Buttons and paragraphs contribute no rules. An unknown mapper
	/// name or an invalid regex pattern is a configuration error and
	/// fails here, not during validation.
	///
	/// # Examples
	///
	/// ```
	/// use licence_forms::{FieldDescriptor, Form, ValidationSchema};
	///
	/// let mut form = Form::new("/licences/search");
	/// form.push_field(FieldDescriptor::text("holder_name")).unwrap();
	/// form.push_field(FieldDescriptor::button("submit")).unwrap();
	///
	/// let schema = ValidationSchema::build(&form, None).unwrap();
	/// assert_eq!(schema.len(), 1);
	/// ```
	pub fn build(form: &Form, overrides: Option<SchemaOptions>) -> Result<Self, SchemaError> {
		let options = overrides.unwrap_or_default();

		let mut rules = Vec::new();
		for field in form.fields() {
			if !field.widget.is_input() {
				continue;
			}
			rules.push(FieldRules::from_options(field.name(), &field.options)?);
		}

		debug!(
			action = form.action(),
			fields = rules.len(),
			"composed validation schema"
		);

		Ok(Self { rules, options })
	}

	/// The effective global options.
	pub fn options(&self) -> SchemaOptions {
		self.options
	}

	/// Number of fields with rules.
	pub fn len(&self) -> usize {
		self.rules.len()
	}

	pub fn is_empty(&self) -> bool {
		self.rules.is_empty()
	}

	/// Validate a submitted payload against the schema.
	///
	/// Returns the cleaned (coerced, trimmed) values of the known fields
	/// on success, or every validation error in field declaration order
	/// on failure (just the first when `abort_early` is set). Optional
	/// fields with no submitted value are omitted from the cleaned map.
	///
	/// # Examples
	///
	/// ```
	/// use licence_forms::{FieldDescriptor, Form, ValidationSchema};
	/// use serde_json::{json, Map};
	///
	/// let mut form = Form::new("/licences/search");
	/// form.push_field(FieldDescriptor::text("holder_name")).unwrap();
	/// let schema = ValidationSchema::build(&form, None).unwrap();
	///
	/// let mut payload = Map::new();
	/// payload.insert("holder_name".to_string(), json!("  A Water Co  "));
	///
	/// let cleaned = schema.validate(&payload).unwrap();
	/// assert_eq!(cleaned["holder_name"], json!("A Water Co"));
	///
	/// let errors = schema.validate(&Map::new()).unwrap_err();
	/// assert_eq!(errors[0].rule, "required");
	/// ```
	pub fn validate(
		&self,
		payload: &Map<String, Value>,
	) -> Result<Map<String, Value>, Vec<ValidationError>> {
		let mut errors = Vec::new();
		let mut cleaned = Map::new();

		for rule in &self.rules {
			let submitted = match payload.get(&rule.name) {
				None | Some(Value::Null) => None,
				Some(Value::String(s)) if s.trim().is_empty() => None,
				Some(value) => Some(value),
			};

			let Some(submitted) = submitted else {
				if rule.required {
					errors.push(ValidationError::new(
						&rule.name,
						RULE_REQUIRED,
						"This field is required.",
					));
				}
				continue;
			};

			let submitted = match submitted {
				Value::String(s) => Value::String(s.trim().to_string()),
				other => other.clone(),
			};

			let coerced = match rule.mapper.apply(&submitted) {
				Ok(value) => value,
				Err(message) => {
					errors.push(ValidationError::new(&rule.name, RULE_TYPE, message));
					continue;
				}
			};

			// An array that coerced to nothing (e.g. a separator-only
			// licence-number list) is missing input, not a valid value.
			if let Value::Array(items) = &coerced
				&& items.is_empty()
			{
				if rule.required {
					errors.push(ValidationError::new(
						&rule.name,
						RULE_REQUIRED,
						"This field is required.",
					));
				}
				continue;
			}

			let before = errors.len();

			if let Value::String(s) = &coerced {
				let chars = s.chars().count();

				if let Some(pattern) = &rule.pattern
					&& !pattern.is_match(s)
				{
					errors.push(ValidationError::new(
						&rule.name,
						RULE_PATTERN,
						"Enter a valid value.",
					));
				}

				if let Some(min) = rule.min_length
					&& chars < min
				{
					errors.push(ValidationError::new(
						&rule.name,
						RULE_MIN_LENGTH,
						format!("Ensure this value has at least {min} characters (it has {chars})."),
					));
				}

				if let Some(max) = rule.max_length
					&& chars > max
				{
					errors.push(ValidationError::new(
						&rule.name,
						RULE_MAX_LENGTH,
						format!("Ensure this value has at most {max} characters (it has {chars})."),
					));
				}
			}

			if !rule.one_of.is_empty() {
				let candidates: Vec<&Value> = match &coerced {
					Value::Array(items) => items.iter().collect(),
					single => vec![single],
				};
				for candidate in candidates {
					if !rule.one_of.contains(candidate) {
						errors.push(ValidationError::new(
							&rule.name,
							RULE_ONE_OF,
							format!(
								"Select a valid choice. {} is not one of the available choices.",
								display_value(candidate)
							),
						));
					}
				}
			}

			if errors.len() == before {
				cleaned.insert(rule.name.clone(), coerced);
			}
		}

		if !self.options.allow_unknown {
			for key in payload.keys() {
				if !self.rules.iter().any(|rule| &rule.name == key) {
					errors.push(ValidationError::new(key, RULE_UNKNOWN, "Unexpected field."));
				}
			}
		}

		if errors.is_empty() {
			Ok(cleaned)
		} else {
			if self.options.abort_early {
				errors.truncate(1);
			}
			Err(errors)
		}
	}
}

fn display_value(value: &Value) -> String {
	match value {
		Value::String(s) => s.clone(),
		other => other.to_string(),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::field::{FieldChoice, FieldDescriptor};
	use rstest::rstest;
	use serde_json::json;

	fn payload(entries: &[(&str, Value)]) -> Map<String, Value> {
		entries
			.iter()
			.map(|(key, value)| (key.to_string(), value.clone()))
			.collect()
	}

	// =========================================================================
	// Composition
	// =========================================================================

	#[rstest]
	fn test_empty_form_accepts_empty_payload() {
		// Arrange
		let form = Form::new("/noop");
		let schema = ValidationSchema::build(&form, None).unwrap();

		// Act
		let cleaned = schema.validate(&Map::new()).unwrap();

		// Assert
		assert!(schema.is_empty());
		assert!(cleaned.is_empty());
	}

	#[rstest]
	fn test_buttons_and_paragraphs_contribute_no_rules() {
		let mut form = Form::new("/search");
		form.push_field(FieldDescriptor::paragraph("intro")).unwrap();
		form.push_field(FieldDescriptor::text("q")).unwrap();
		form.push_field(FieldDescriptor::button("submit")).unwrap();

		let schema = ValidationSchema::build(&form, None).unwrap();
		assert_eq!(schema.len(), 1);
	}

	#[rstest]
	fn test_unknown_mapper_fails_at_composition() {
		// Arrange
		let mut form = Form::new("/search");
		form.push_field(FieldDescriptor::text("q").with_mapper("licenceNumbers"))
			.unwrap();

		// Act
		let result = ValidationSchema::build(&form, None);

		// Assert
		assert!(matches!(
			result,
			Err(SchemaError::UnsupportedRule { field, mapper })
				if field == "q" && mapper == "licenceNumbers"
		));
	}

	#[rstest]
	fn test_invalid_pattern_fails_at_composition() {
		let mut form = Form::new("/search");
		form.push_field(FieldDescriptor::text("q").with_pattern("[unclosed"))
			.unwrap();

		let result = ValidationSchema::build(&form, None);
		assert!(matches!(result, Err(SchemaError::InvalidPattern { field, .. }) if field == "q"));
	}

	#[rstest]
	fn test_caller_overrides_win_over_defaults() {
		let form = Form::new("/noop");
		let schema = ValidationSchema::build(
			&form,
			Some(SchemaOptions::new().with_allow_unknown(false)),
		)
		.unwrap();

		assert!(!schema.options().allow_unknown);
	}

	// =========================================================================
	// Required / optional
	// =========================================================================

	#[rstest]
	#[case::missing(payload(&[]))]
	#[case::null(payload(&[("q", Value::Null)]))]
	#[case::blank(payload(&[("q", json!("   "))]))]
	fn test_required_field_missing(#[case] submitted: Map<String, Value>) {
		// Arrange
		let mut form = Form::new("/search");
		form.push_field(FieldDescriptor::text("q")).unwrap();
		let schema = ValidationSchema::build(&form, None).unwrap();

		// Act
		let errors = schema.validate(&submitted).unwrap_err();

		// Assert
		assert_eq!(errors.len(), 1);
		assert_eq!(errors[0].field, "q");
		assert_eq!(errors[0].rule, RULE_REQUIRED);
	}

	#[rstest]
	fn test_optional_field_missing_is_omitted_from_cleaned() {
		let mut form = Form::new("/search");
		form.push_field(FieldDescriptor::text("q").optional()).unwrap();
		let schema = ValidationSchema::build(&form, None).unwrap();

		let cleaned = schema.validate(&Map::new()).unwrap();
		assert!(!cleaned.contains_key("q"));
	}

	#[rstest]
	fn test_string_values_are_trimmed() {
		let mut form = Form::new("/search");
		form.push_field(FieldDescriptor::text("q")).unwrap();
		let schema = ValidationSchema::build(&form, None).unwrap();

		let cleaned = schema.validate(&payload(&[("q", json!("  AN/03/28  "))])).unwrap();
		assert_eq!(cleaned["q"], json!("AN/03/28"));
	}

	// =========================================================================
	// Pattern and length rules
	// =========================================================================

	#[rstest]
	fn test_pattern_rule() {
		let mut form = Form::new("/search");
		form.push_field(FieldDescriptor::text("code").with_pattern("^[A-Z]{2}/[0-9]+$"))
			.unwrap();
		let schema = ValidationSchema::build(&form, None).unwrap();

		assert!(schema.validate(&payload(&[("code", json!("AN/123"))])).is_ok());

		let errors = schema
			.validate(&payload(&[("code", json!("an-123"))]))
			.unwrap_err();
		assert_eq!(errors[0].rule, RULE_PATTERN);
	}

	#[rstest]
	fn test_length_rules_count_characters_not_bytes() {
		let mut form = Form::new("/search");
		form.push_field(FieldDescriptor::text("name").with_max_length(5))
			.unwrap();
		let schema = ValidationSchema::build(&form, None).unwrap();

		// 5 multibyte characters pass a max_length of 5
		assert!(schema.validate(&payload(&[("name", json!("こんにちは"))])).is_ok());

		let errors = schema
			.validate(&payload(&[("name", json!("こんにちはX"))]))
			.unwrap_err();
		assert_eq!(errors[0].rule, RULE_MAX_LENGTH);
	}

	#[rstest]
	fn test_min_length_rule() {
		let mut form = Form::new("/search");
		form.push_field(FieldDescriptor::text("name").with_min_length(3))
			.unwrap();
		let schema = ValidationSchema::build(&form, None).unwrap();

		let errors = schema.validate(&payload(&[("name", json!("ab"))])).unwrap_err();
		assert_eq!(errors[0].rule, RULE_MIN_LENGTH);
		assert!(errors[0].message.contains("at least 3"));
	}

	// =========================================================================
	// Choice membership
	// =========================================================================

	#[rstest]
	fn test_radio_choice_membership() {
		let mut form = Form::new("/search");
		form.push_field(FieldDescriptor::radio("status").with_choices(vec![
			FieldChoice::new(json!("active"), "Active"),
			FieldChoice::new(json!("expired"), "Expired"),
		]))
		.unwrap();
		let schema = ValidationSchema::build(&form, None).unwrap();

		assert!(schema.validate(&payload(&[("status", json!("active"))])).is_ok());

		let errors = schema
			.validate(&payload(&[("status", json!("revoked"))]))
			.unwrap_err();
		assert_eq!(errors[0].rule, RULE_ONE_OF);
		assert!(errors[0].message.contains("revoked"));
	}

	#[rstest]
	fn test_checkboxes_validate_each_selected_value() {
		let mut form = Form::new("/search");
		form.push_field(FieldDescriptor::checkboxes("purposes").with_choices(vec![
			FieldChoice::new(json!("spray"), "Spray irrigation"),
			FieldChoice::new(json!("transfer"), "Transfer"),
		]))
		.unwrap();
		let schema = ValidationSchema::build(&form, None).unwrap();

		let cleaned = schema
			.validate(&payload(&[("purposes", json!(["spray", "transfer"]))]))
			.unwrap();
		assert_eq!(cleaned["purposes"], json!(["spray", "transfer"]));

		let errors = schema
			.validate(&payload(&[("purposes", json!(["spray", "bottling"]))]))
			.unwrap_err();
		assert_eq!(errors.len(), 1);
		assert_eq!(errors[0].rule, RULE_ONE_OF);
	}

	#[rstest]
	fn test_checkboxes_single_value_coerces_to_array() {
		// A single ticked box posts a scalar, not an array
		let mut form = Form::new("/search");
		form.push_field(
			FieldDescriptor::checkboxes("purposes")
				.with_choices(vec![FieldChoice::new(json!("spray"), "Spray irrigation")]),
		)
		.unwrap();
		let schema = ValidationSchema::build(&form, None).unwrap();

		let cleaned = schema
			.validate(&payload(&[("purposes", json!("spray"))]))
			.unwrap();
		assert_eq!(cleaned["purposes"], json!(["spray"]));
	}

	// =========================================================================
	// Mappers
	// =========================================================================

	#[rstest]
	#[case(json!("true"), json!(true))]
	#[case(json!("false"), json!(false))]
	#[case(json!(true), json!(true))]
	fn test_boolean_mapper_coerces(#[case] submitted: Value, #[case] expected: Value) {
		let mut form = Form::new("/search");
		form.push_field(FieldDescriptor::radio("renewal").with_mapper("boolean"))
			.unwrap();
		let schema = ValidationSchema::build(&form, None).unwrap();

		let cleaned = schema.validate(&payload(&[("renewal", submitted)])).unwrap();
		assert_eq!(cleaned["renewal"], expected);
	}

	#[rstest]
	fn test_boolean_mapper_rejects_other_strings() {
		let mut form = Form::new("/search");
		form.push_field(FieldDescriptor::radio("renewal").with_mapper("boolean"))
			.unwrap();
		let schema = ValidationSchema::build(&form, None).unwrap();

		let errors = schema
			.validate(&payload(&[("renewal", json!("yes"))]))
			.unwrap_err();
		assert_eq!(errors[0].rule, RULE_TYPE);
	}

	#[rstest]
	#[case(json!("42"), json!(42))]
	#[case(json!("3.5"), json!(3.5))]
	#[case(json!(7), json!(7))]
	fn test_number_mapper_coerces(#[case] submitted: Value, #[case] expected: Value) {
		let mut form = Form::new("/search");
		form.push_field(FieldDescriptor::text("quantity").with_mapper("number"))
			.unwrap();
		let schema = ValidationSchema::build(&form, None).unwrap();

		let cleaned = schema.validate(&payload(&[("quantity", submitted)])).unwrap();
		assert_eq!(cleaned["quantity"], expected);
	}

	#[rstest]
	fn test_number_mapper_rejects_non_numeric() {
		let mut form = Form::new("/search");
		form.push_field(FieldDescriptor::text("quantity").with_mapper("number"))
			.unwrap();
		let schema = ValidationSchema::build(&form, None).unwrap();

		let errors = schema
			.validate(&payload(&[("quantity", json!("lots"))]))
			.unwrap_err();
		assert_eq!(errors[0].rule, RULE_TYPE);
		assert_eq!(errors[0].message, "Enter a number.");
	}

	#[rstest]
	#[case("2024-02-13")]
	#[case("13/02/2024")]
	#[case("13 February 2024")]
	#[case("13 Feb 2024")]
	fn test_date_mapper_normalizes_to_iso(#[case] submitted: &str) {
		let mut form = Form::new("/search");
		form.push_field(FieldDescriptor::date("start_date")).unwrap();
		let schema = ValidationSchema::build(&form, None).unwrap();

		let cleaned = schema
			.validate(&payload(&[("start_date", json!(submitted))]))
			.unwrap();
		assert_eq!(cleaned["start_date"], json!("2024-02-13"));
	}

	#[rstest]
	#[case("13/13/2024")]
	#[case("not a date")]
	#[case("13/02/24")]
	fn test_date_mapper_rejects_invalid(#[case] submitted: &str) {
		let mut form = Form::new("/search");
		form.push_field(FieldDescriptor::date("start_date")).unwrap();
		let schema = ValidationSchema::build(&form, None).unwrap();

		let errors = schema
			.validate(&payload(&[("start_date", json!(submitted))]))
			.unwrap_err();
		assert_eq!(errors[0].rule, RULE_TYPE);
	}

	#[rstest]
	fn test_array_mapper_splits_separated_entries() {
		let mut form = Form::new("/search");
		form.push_field(FieldDescriptor::text("licenceNumbers").with_mapper("array"))
			.unwrap();
		let schema = ValidationSchema::build(&form, None).unwrap();

		let cleaned = schema
			.validate(&payload(&[(
				"licenceNumbers",
				json!("AN/03/28, MD/051\nTH/039/0041"),
			)]))
			.unwrap();
		assert_eq!(
			cleaned["licenceNumbers"],
			json!(["AN/03/28", "MD/051", "TH/039/0041"]),
		);
	}

	#[rstest]
	fn test_array_mapper_separator_only_input_is_missing() {
		let mut form = Form::new("/search");
		form.push_field(FieldDescriptor::text("licenceNumbers").with_mapper("array"))
			.unwrap();
		let schema = ValidationSchema::build(&form, None).unwrap();

		let errors = schema
			.validate(&payload(&[("licenceNumbers", json!(" , ,"))]))
			.unwrap_err();
		assert_eq!(errors[0].rule, RULE_REQUIRED);
	}

	// =========================================================================
	// Global options
	// =========================================================================

	#[rstest]
	fn test_collects_every_error_by_default() {
		let mut form = Form::new("/search");
		form.push_field(FieldDescriptor::text("holder_name")).unwrap();
		form.push_field(FieldDescriptor::text("licence_number")).unwrap();
		let schema = ValidationSchema::build(&form, None).unwrap();

		let errors = schema.validate(&Map::new()).unwrap_err();
		assert_eq!(errors.len(), 2);
	}

	#[rstest]
	fn test_abort_early_reports_first_error_only() {
		let mut form = Form::new("/search");
		form.push_field(FieldDescriptor::text("holder_name")).unwrap();
		form.push_field(FieldDescriptor::text("licence_number")).unwrap();
		let schema = ValidationSchema::build(
			&form,
			Some(SchemaOptions::new().with_abort_early(true)),
		)
		.unwrap();

		let errors = schema.validate(&Map::new()).unwrap_err();
		assert_eq!(errors.len(), 1);
		assert_eq!(errors[0].field, "holder_name");
	}

	#[rstest]
	fn test_unknown_keys_ignored_by_default() {
		let form = Form::new("/noop");
		let schema = ValidationSchema::build(&form, None).unwrap();

		let result = schema.validate(&payload(&[("surprise", json!("value"))]));
		assert!(result.is_ok());
	}

	#[rstest]
	fn test_unknown_keys_rejected_when_disallowed() {
		let form = Form::new("/noop");
		let schema = ValidationSchema::build(
			&form,
			Some(SchemaOptions::new().with_allow_unknown(false)),
		)
		.unwrap();

		let errors = schema
			.validate(&payload(&[("surprise", json!("value"))]))
			.unwrap_err();
		assert_eq!(errors[0].field, "surprise");
		assert_eq!(errors[0].rule, RULE_UNKNOWN);
	}

	#[rstest]
	fn test_errors_follow_field_declaration_order() {
		let mut form = Form::new("/search");
		form.push_field(FieldDescriptor::text("first")).unwrap();
		form.push_field(FieldDescriptor::text("second")).unwrap();
		form.push_field(FieldDescriptor::text("third")).unwrap();
		let schema = ValidationSchema::build(&form, None).unwrap();

		let errors = schema.validate(&Map::new()).unwrap_err();
		let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
		assert_eq!(fields, vec!["first", "second", "third"]);
	}
}
