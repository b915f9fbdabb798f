//! Catalog record validation.
//!
//! The platform returns tool definitions as loosely typed JSON. Each record
//! is checked for a name, description and parameter schema, and its schema
//! is compiled into an [`InputValidator`]. Records that fail are skipped
//! with a warning; the rest of the catalog still loads.

use serde_json::Value;
use tracing::{debug, warn};

use super::schema::{InputValidator, SchemaError};

/// A validated tool definition from the catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolDescriptor {
    pub name: String,
    pub description: String,
    /// JSON Schema for the tool's input.
    pub parameters: Value,
}

/// Why a catalog record could not be adapted.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DescriptorError {
    #[error("record is not an object")]
    NotAnObject,

    #[error("missing required field '{0}'")]
    MissingField(&'static str),

    #[error("field 'parameters' is not an object")]
    ParametersNotObject,

    #[error(transparent)]
    Schema(#[from] SchemaError),
}

/// A descriptor paired with the validator compiled from its schema.
#[derive(Debug, Clone)]
pub struct AdaptedDescriptor {
    pub descriptor: ToolDescriptor,
    pub validator: InputValidator,
}

impl AdaptedDescriptor {
    /// Validate a raw record and compile its schema.
    pub fn from_record(record: &Value) -> Result<Self, DescriptorError> {
        let descriptor = parse_descriptor(record)?;
        let validator = InputValidator::compile(&descriptor.parameters)?;
        Ok(Self {
            descriptor,
            validator,
        })
    }

    pub fn name(&self) -> &str {
        &self.descriptor.name
    }
}

/// Parse one catalog record.
///
/// Accepts both the function-calling envelope
/// (`{"type": "function", "function": {...}}`) and the bare definition.
pub fn parse_descriptor(record: &Value) -> Result<ToolDescriptor, DescriptorError> {
    let obj = record.as_object().ok_or(DescriptorError::NotAnObject)?;
    let def = match obj.get("function") {
        Some(inner) => inner.as_object().ok_or(DescriptorError::NotAnObject)?,
        None => obj,
    };

    let name = def
        .get("name")
        .and_then(Value::as_str)
        .filter(|n| !n.trim().is_empty())
        .ok_or(DescriptorError::MissingField("name"))?;

    let description = def
        .get("description")
        .and_then(Value::as_str)
        .ok_or(DescriptorError::MissingField("description"))?;

    let parameters = match def.get("parameters") {
        None | Some(Value::Null) => return Err(DescriptorError::MissingField("parameters")),
        Some(p @ Value::Object(_)) => p.clone(),
        Some(_) => return Err(DescriptorError::ParametersNotObject),
    };

    Ok(ToolDescriptor {
        name: name.to_string(),
        description: description.to_string(),
        parameters,
    })
}

/// Best-effort name for log messages about a rejected record.
fn record_label(record: &Value, index: usize) -> String {
    record
        .get("function")
        .unwrap_or(record)
        .get("name")
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| format!("#{index}"))
}

/// Adapt a whole catalog, skipping records that cannot be used.
///
/// Order is preserved.
pub fn adapt_catalog(records: &[Value]) -> Vec<AdaptedDescriptor> {
    let mut adapted = Vec::with_capacity(records.len());
    for (index, record) in records.iter().enumerate() {
        match AdaptedDescriptor::from_record(record) {
            Ok(desc) => {
                debug!(tool = %desc.name(), "adapted catalog record");
                adapted.push(desc);
            }
            Err(e) => {
                warn!(
                    tool = %record_label(record, index),
                    error = %e,
                    "skipping catalog record"
                );
            }
        }
    }
    adapted
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn create_issue() -> Value {
        json!({
            "type": "function",
            "function": {
                "name": "Github_CreateIssue",
                "description": "Create an issue in a GitHub repository",
                "parameters": {
                    "type": "object",
                    "properties": {
                        "owner": {"type": "string"},
                        "repo": {"type": "string"},
                        "title": {"type": "string"}
                    },
                    "required": ["owner", "repo", "title"]
                }
            }
        })
    }

    #[test]
    fn parses_function_envelope() {
        let desc = parse_descriptor(&create_issue()).unwrap();
        assert_eq!(desc.name, "Github_CreateIssue");
        assert_eq!(desc.description, "Create an issue in a GitHub repository");
        assert_eq!(desc.parameters["required"][2], "title");
    }

    #[test]
    fn parses_flat_record() {
        let desc = parse_descriptor(&json!({
            "name": "Github_ListStars",
            "description": "List starred repos",
            "parameters": {"type": "object", "properties": {}}
        }))
        .unwrap();
        assert_eq!(desc.name, "Github_ListStars");
    }

    #[test]
    fn rejects_missing_parameters() {
        let err = parse_descriptor(&json!({"name": "ping", "description": "Ping"})).unwrap_err();
        assert_eq!(err, DescriptorError::MissingField("parameters"));
    }

    #[test]
    fn empty_description_is_allowed() {
        let desc =
            parse_descriptor(&json!({"name": "ping", "description": "", "parameters": {}})).unwrap();
        assert_eq!(desc.description, "");
    }

    #[test]
    fn rejects_missing_name() {
        let err = parse_descriptor(&json!({"description": "x"})).unwrap_err();
        assert_eq!(err, DescriptorError::MissingField("name"));
        let err = parse_descriptor(&json!({"name": "  ", "description": "x"})).unwrap_err();
        assert_eq!(err, DescriptorError::MissingField("name"));
    }

    #[test]
    fn rejects_missing_description() {
        let err = parse_descriptor(&json!({"name": "a", "parameters": {}})).unwrap_err();
        assert_eq!(err, DescriptorError::MissingField("description"));
    }

    #[test]
    fn rejects_non_object_parameters() {
        let err =
            parse_descriptor(&json!({"name": "a", "description": "", "parameters": "none"})).unwrap_err();
        assert_eq!(err, DescriptorError::ParametersNotObject);
    }

    #[test]
    fn rejects_non_object_record() {
        assert_eq!(parse_descriptor(&json!([1, 2])).unwrap_err(), DescriptorError::NotAnObject);
        assert_eq!(
            parse_descriptor(&json!({"type": "function", "function": "x"})).unwrap_err(),
            DescriptorError::NotAnObject
        );
    }

    #[test]
    fn from_record_rejects_unsupported_schema() {
        let record = json!({
            "name": "a",
            "description": "",
            "parameters": {"type": "object", "properties": {"x": {"oneOf": []}}}
        });
        assert!(matches!(
            AdaptedDescriptor::from_record(&record),
            Err(DescriptorError::Schema(SchemaError::Unsupported { .. }))
        ));
    }

    #[test]
    fn adapt_catalog_skips_bad_records_and_keeps_order() {
        let records = vec![
            create_issue(),
            json!({"description": "nameless"}),
            json!({"name": "Github_Bad", "description": "", "parameters": {"$ref": "#/x"}}),
            json!({"name": "Github_NoParams", "description": "no schema"}),
            json!({"name": "Github_ListStars", "description": "List stars", "parameters": {}}),
        ];
        let adapted = adapt_catalog(&records);
        let names: Vec<&str> = adapted.iter().map(AdaptedDescriptor::name).collect();
        assert_eq!(names, vec!["Github_CreateIssue", "Github_ListStars"]);
    }

    #[test]
    fn adapt_catalog_empty() {
        assert!(adapt_catalog(&[]).is_empty());
    }

    #[test]
    fn record_label_prefers_name() {
        assert_eq!(record_label(&create_issue(), 3), "Github_CreateIssue");
        assert_eq!(record_label(&json!({}), 3), "#3");
    }
}
