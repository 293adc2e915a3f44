use serde_json::Value;

/// Outcome of validating raw text as a comparable JSON document.
///
/// Rejections carry a message ready for inline display; the parsed document
/// is present exactly when validation succeeded.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationResult {
    /// The text parsed into an object or array.
    Valid(Value),
    /// The text was rejected with the given message.
    Invalid(String),
}

impl ValidationResult {
    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid(_))
    }

    /// The parsed document, when valid.
    #[must_use]
    pub fn data(&self) -> Option<&Value> {
        match self {
            ValidationResult::Valid(value) => Some(value),
            ValidationResult::Invalid(_) => None,
        }
    }

    /// The rejection message, when invalid.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            ValidationResult::Valid(_) => None,
            ValidationResult::Invalid(message) => Some(message),
        }
    }

    /// Consumes the result, returning the parsed document when valid.
    #[must_use]
    pub fn into_data(self) -> Option<Value> {
        match self {
            ValidationResult::Valid(value) => Some(value),
            ValidationResult::Invalid(_) => None,
        }
    }
}

/// Validates `text` as a JSON document suitable for comparison.
///
/// `field_name` appears in rejection messages only. Empty or whitespace-only
/// input, malformed syntax, and primitive top-level values are rejected with
/// distinct messages; anything else yields the parsed document.
///
/// # Examples
///
/// ```
/// use jsoncompare::validate;
///
/// assert!(validate(r#"{"a": 1}"#, "first JSON").is_valid());
/// assert_eq!(
///     validate("", "first JSON").error(),
///     Some("first JSON cannot be empty"),
/// );
/// ```
#[must_use]
pub fn validate(text: &str, field_name: &str) -> ValidationResult {
    if text.trim().is_empty() {
        return ValidationResult::Invalid(format!("{field_name} cannot be empty"));
    }
    match serde_json::from_str::<Value>(text) {
        Ok(value @ (Value::Object(_) | Value::Array(_))) => ValidationResult::Valid(value),
        Ok(_) => ValidationResult::Invalid(format!("{field_name} must be a valid JSON object")),
        Err(_) => ValidationResult::Invalid(format!("{field_name} is invalid.")),
    }
}

/// Returns `true` if `text` parses into a comparable JSON document.
#[must_use]
pub fn is_valid_json(text: &str) -> bool {
    validate(text, "JSON").is_valid()
}
