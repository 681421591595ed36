//! Parameter validation against an action's input schema.

use std::fmt;

use indexmap::IndexMap;
use relay_core::InputKey;
use serde::Serialize;
use serde_json::Value;

use crate::input::{InputField, json_type_name};

/// Normalized parameters produced by [`validate`].
///
/// Entries follow the order of the input schema and only contain declared
/// inputs.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Params {
    values: IndexMap<InputKey, Value>,
}

impl Params {
    /// Create an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, key: InputKey, value: Value) {
        self.values.insert(key, value);
    }

    /// Raw value of an input.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// String value of an input.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    /// Numeric value of an input.
    pub fn get_f64(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(Value::as_f64)
    }

    /// Integer value of an input.
    pub fn get_i64(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(Value::as_i64)
    }

    /// Boolean value of an input.
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(Value::as_bool)
    }

    /// Whether an input has a value.
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Number of inputs with a value.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no input has a value.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate `(key, value)` pairs in schema order.
    pub fn iter(&self) -> impl Iterator<Item = (&InputKey, &Value)> {
        self.values.iter()
    }

    /// The parameters as a JSON object.
    pub fn to_json(&self) -> Value {
        Value::Object(
            self.values
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
        )
    }
}

/// One problem found while validating parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// The offending input; `None` when the parameter document itself is wrong.
    pub field: Option<InputKey>,
    /// Machine-readable code: `required`, `type_mismatch` or `expected_object`.
    pub code: &'static str,
    /// Human-readable message.
    pub message: String,
}

impl FieldError {
    fn missing(field: &InputField) -> Self {
        Self {
            field: Some(field.key.clone()),
            code: "required",
            message: format!("required input '{}' is missing", field.key),
        }
    }

    fn type_mismatch(field: &InputField, value: &Value) -> Self {
        Self {
            field: Some(field.key.clone()),
            code: "type_mismatch",
            message: format!(
                "input '{}' expects {}, got {}",
                field.key,
                field.kind,
                json_type_name(value)
            ),
        }
    }

    fn not_an_object(value: &Value) -> Self {
        Self {
            field: None,
            code: "expected_object",
            message: format!("parameters must be an object, got {}", json_type_name(value)),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.field {
            Some(field) => write!(f, "[{field}] {}: {}", self.code, self.message),
            None => write!(f, "{}: {}", self.code, self.message),
        }
    }
}

/// Every problem found in one parameter document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    /// Creates a new empty error collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an error to the collection.
    pub fn add(&mut self, error: FieldError) {
        self.errors.push(error);
    }

    /// Returns the number of errors.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Returns true if empty.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns all errors.
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// Whether any error concerns the given input.
    pub fn mentions(&self, key: &str) -> bool {
        self.errors
            .iter()
            .any(|e| e.field.as_ref().is_some_and(|f| f == key))
    }

    /// Converts to a Result.
    pub fn into_result<T>(self, ok_value: T) -> Result<T, ValidationErrors> {
        if self.is_empty() {
            Ok(ok_value)
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} invalid parameter(s)", self.errors.len())?;
        for (i, error) in self.errors.iter().enumerate() {
            let sep = if i == 0 { ": " } else { "; " };
            write!(f, "{sep}{error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

impl IntoIterator for ValidationErrors {
    type Item = FieldError;
    type IntoIter = std::vec::IntoIter<FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

/// Check `raw` against `inputs` and build the normalized parameters.
///
/// All fields are checked; the error lists every offending input, not just
/// the first. A `null` value counts as missing. Undeclared parameters are
/// dropped.
pub fn validate(inputs: &[InputField], raw: &Value) -> Result<Params, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let Some(object) = raw.as_object() else {
        errors.add(FieldError::not_an_object(raw));
        return Err(errors);
    };

    let mut params = Params::new();
    for field in inputs {
        match object.get(field.key.as_str()).filter(|v| !v.is_null()) {
            Some(value) if field.kind.accepts(value) => {
                params.insert(field.key.clone(), value.clone());
            }
            Some(value) => errors.add(FieldError::type_mismatch(field, value)),
            None => match &field.default {
                Some(default) => params.insert(field.key.clone(), default.clone()),
                None if field.required => errors.add(FieldError::missing(field)),
                None => {}
            },
        }
    }

    for key in object.keys() {
        if !inputs.iter().any(|f| f.key == *key) {
            tracing::debug!(param = %key, "dropping undeclared parameter");
        }
    }

    errors.into_result(params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::InputKind;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn field(key: &str, kind: InputKind) -> InputField {
        InputField::new(key.parse().unwrap(), key, kind)
    }

    #[test]
    fn accepts_matching_string() {
        let inputs = [field("inputKey", InputKind::String)];
        let params = validate(&inputs, &json!({"inputKey": "hello"})).unwrap();
        assert_eq!(params.to_json(), json!({"inputKey": "hello"}));
        assert_eq!(params.get_str("inputKey"), Some("hello"));
    }

    #[test]
    fn missing_required_input() {
        let inputs = [field("inputKey", InputKind::String)];
        let err = validate(&inputs, &json!({})).unwrap_err();
        assert_eq!(err.len(), 1);
        assert!(err.mentions("inputKey"));
        assert_eq!(err.errors()[0].code, "required");
        assert!(err.to_string().contains("inputKey"));
    }

    #[test]
    fn null_counts_as_missing() {
        let inputs = [field("inputKey", InputKind::String)];
        let err = validate(&inputs, &json!({"inputKey": null})).unwrap_err();
        assert_eq!(err.errors()[0].code, "required");
    }

    #[test]
    fn reports_every_offending_field() {
        let inputs = [
            field("name", InputKind::String),
            field("count", InputKind::Integer),
            field("enabled", InputKind::Boolean),
            field("ratio", InputKind::Number),
        ];
        let err = validate(&inputs, &json!({"count": "three", "ratio": 0.5})).unwrap_err();

        let codes: Vec<(&str, &str)> = err
            .errors()
            .iter()
            .map(|e| (e.field.as_ref().unwrap().as_str(), e.code))
            .collect();
        assert_eq!(
            codes,
            vec![
                ("name", "required"),
                ("count", "type_mismatch"),
                ("enabled", "required"),
            ]
        );
    }

    #[test]
    fn type_mismatch_message() {
        let inputs = [field("count", InputKind::Integer)];
        let err = validate(&inputs, &json!({"count": "3"})).unwrap_err();
        assert_eq!(
            err.errors()[0].message,
            "input 'count' expects integer, got string"
        );
    }

    #[test]
    fn optional_input_may_be_absent() {
        let inputs = [
            field("name", InputKind::String),
            field("note", InputKind::String).optional(),
        ];
        let params = validate(&inputs, &json!({"name": "x"})).unwrap();
        assert_eq!(params.len(), 1);
        assert!(!params.contains("note"));
    }

    #[test]
    fn default_fills_absent_input() {
        let inputs = [field("retries", InputKind::Integer).with_default(3)];
        let params = validate(&inputs, &json!({})).unwrap();
        assert_eq!(params.get_i64("retries"), Some(3));
    }

    #[test]
    fn supplied_value_overrides_default() {
        let inputs = [field("retries", InputKind::Integer).with_default(3)];
        let params = validate(&inputs, &json!({"retries": 5})).unwrap();
        assert_eq!(params.get_i64("retries"), Some(5));
    }

    #[test]
    fn drops_undeclared_parameters() {
        let inputs = [field("inputKey", InputKind::String)];
        let params = validate(&inputs, &json!({"inputKey": "x", "extra": 1})).unwrap();
        assert_eq!(params.to_json(), json!({"inputKey": "x"}));
    }

    #[test]
    fn keeps_schema_order() {
        let inputs = [field("b", InputKind::Boolean), field("a", InputKind::Number)];
        let params = validate(&inputs, &json!({"a": 1, "b": true})).unwrap();
        let keys: Vec<&str> = params.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["b", "a"]);
    }

    #[test]
    fn rejects_non_object_document() {
        let inputs = [field("inputKey", InputKind::String)];
        let err = validate(&inputs, &json!(["inputKey"])).unwrap_err();
        assert_eq!(err.len(), 1);
        assert_eq!(err.errors()[0].field, None);
        assert_eq!(err.errors()[0].code, "expected_object");
    }

    #[test]
    fn empty_schema_accepts_empty_object() {
        let params = validate(&[], &json!({})).unwrap();
        assert!(params.is_empty());
    }
}
