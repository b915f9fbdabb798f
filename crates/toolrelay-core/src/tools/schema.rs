//! Parameter schema compilation and input validation.
//!
//! A catalog record's parameter schema is compiled into an
//! [`InputValidator`]. Only the keywords in [`SUPPORTED_KEYWORDS`] and
//! [`ANNOTATION_KEYWORDS`] are understood; anything else rejects the whole
//! tool with [`SchemaError::Unsupported`] so that no constraint is silently
//! dropped.

use std::collections::BTreeMap;

use regex::Regex;
use serde_json::Value;

/// Keywords that constrain input.
pub const SUPPORTED_KEYWORDS: &[&str] = &[
    "type",
    "properties",
    "required",
    "items",
    "enum",
    "const",
    "additionalProperties",
    "minimum",
    "maximum",
    "minLength",
    "maxLength",
    "minItems",
    "maxItems",
    "pattern",
];

/// Keywords that carry no constraint and are kept only for the model.
pub const ANNOTATION_KEYWORDS: &[&str] =
    &["description", "title", "default", "examples", "format", "$schema"];

/// Errors raised while compiling a parameter schema.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SchemaError {
    /// A schema (or sub-schema) is not a JSON object.
    #[error("schema at '{path}' is not an object")]
    NotAnObject { path: String },

    /// The schema uses a keyword with no validator equivalent.
    #[error("unsupported schema keyword '{keyword}' at '{path}'")]
    Unsupported { path: String, keyword: String },

    /// A supported keyword has a malformed value.
    #[error("invalid '{keyword}' at '{path}': {reason}")]
    InvalidKeyword {
        path: String,
        keyword: String,
        reason: String,
    },
}

/// An input that does not satisfy the schema.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{path}: {message}")]
pub struct ValidationError {
    /// Location in the input, `$` for the root.
    pub path: String,
    pub message: String,
}

/// JSON Schema primitive types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaType {
    String,
    Number,
    Integer,
    Boolean,
    Object,
    Array,
    Null,
}

impl SchemaType {
    fn parse(name: &str) -> Option<Self> {
        Some(match name {
            "string" => Self::String,
            "number" => Self::Number,
            "integer" => Self::Integer,
            "boolean" => Self::Boolean,
            "object" => Self::Object,
            "array" => Self::Array,
            "null" => Self::Null,
            _ => return None,
        })
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Integer => "integer",
            Self::Boolean => "boolean",
            Self::Object => "object",
            Self::Array => "array",
            Self::Null => "null",
        }
    }

    fn matches(self, value: &Value) -> bool {
        match self {
            Self::String => value.is_string(),
            Self::Number => value.is_number(),
            // 1.0 is an integer in JSON Schema.
            Self::Integer => value.as_f64().is_some_and(|f| f.fract() == 0.0),
            Self::Boolean => value.is_boolean(),
            Self::Object => value.is_object(),
            Self::Array => value.is_array(),
            Self::Null => value.is_null(),
        }
    }
}

/// A compiled schema node.
#[derive(Debug, Clone, Default)]
struct Node {
    /// Allowed types; empty means any.
    types: Vec<SchemaType>,
    properties: BTreeMap<String, Node>,
    required: Vec<String>,
    items: Option<Box<Node>>,
    enum_values: Option<Vec<Value>>,
    const_value: Option<Value>,
    additional_properties: Option<bool>,
    minimum: Option<f64>,
    maximum: Option<f64>,
    min_length: Option<u64>,
    max_length: Option<u64>,
    min_items: Option<u64>,
    max_items: Option<u64>,
    pattern: Option<Regex>,
}

/// Validator compiled from a tool's parameter schema.
#[derive(Debug, Clone)]
pub struct InputValidator {
    root: Node,
    source: Value,
}

impl InputValidator {
    /// Compile a parameter schema.
    pub fn compile(schema: &Value) -> Result<Self, SchemaError> {
        let root = compile_node(schema, "$")?;
        Ok(Self {
            root,
            source: schema.clone(),
        })
    }

    /// The schema this validator enforces, for function-calling declarations.
    pub fn schema(&self) -> &Value {
        &self.source
    }

    /// Names of the top-level required fields.
    pub fn required_fields(&self) -> &[String] {
        &self.root.required
    }

    /// Validate an input, reporting the first violation.
    pub fn validate(&self, input: &Value) -> Result<(), ValidationError> {
        validate_node(&self.root, input, "$")
    }
}

fn invalid(path: &str, keyword: &str, reason: impl Into<String>) -> SchemaError {
    SchemaError::InvalidKeyword {
        path: path.to_string(),
        keyword: keyword.to_string(),
        reason: reason.into(),
    }
}

fn as_count(value: &Value, path: &str, keyword: &str) -> Result<u64, SchemaError> {
    value
        .as_u64()
        .ok_or_else(|| invalid(path, keyword, "expected a non-negative integer"))
}

fn as_bound(value: &Value, path: &str, keyword: &str) -> Result<f64, SchemaError> {
    value
        .as_f64()
        .ok_or_else(|| invalid(path, keyword, "expected a number"))
}

fn compile_node(schema: &Value, path: &str) -> Result<Node, SchemaError> {
    let obj = schema.as_object().ok_or_else(|| SchemaError::NotAnObject {
        path: path.to_string(),
    })?;

    let mut node = Node::default();

    for (keyword, value) in obj {
        let keyword = keyword.as_str();
        match keyword {
            "type" => node.types = compile_types(value, path)?,
            "properties" => {
                let props = value
                    .as_object()
                    .ok_or_else(|| invalid(path, keyword, "expected an object"))?;
                for (name, sub) in props {
                    let sub_path = format!("{path}.properties.{name}");
                    node.properties.insert(name.clone(), compile_node(sub, &sub_path)?);
                }
            }
            "required" => {
                let list = value
                    .as_array()
                    .ok_or_else(|| invalid(path, keyword, "expected an array of strings"))?;
                node.required = list
                    .iter()
                    .map(|v| {
                        v.as_str()
                            .map(str::to_string)
                            .ok_or_else(|| invalid(path, keyword, "expected an array of strings"))
                    })
                    .collect::<Result<_, _>>()?;
            }
            "items" => {
                let sub_path = format!("{path}.items");
                node.items = Some(Box::new(compile_node(value, &sub_path)?));
            }
            "enum" => {
                let values = value
                    .as_array()
                    .ok_or_else(|| invalid(path, keyword, "expected an array"))?;
                node.enum_values = Some(values.clone());
            }
            "const" => node.const_value = Some(value.clone()),
            "additionalProperties" => {
                // Schema-valued additionalProperties would need its own validator.
                let allowed = value.as_bool().ok_or_else(|| SchemaError::Unsupported {
                    path: path.to_string(),
                    keyword: "additionalProperties (schema)".into(),
                })?;
                node.additional_properties = Some(allowed);
            }
            "minimum" => node.minimum = Some(as_bound(value, path, keyword)?),
            "maximum" => node.maximum = Some(as_bound(value, path, keyword)?),
            "minLength" => node.min_length = Some(as_count(value, path, keyword)?),
            "maxLength" => node.max_length = Some(as_count(value, path, keyword)?),
            "minItems" => node.min_items = Some(as_count(value, path, keyword)?),
            "maxItems" => node.max_items = Some(as_count(value, path, keyword)?),
            "pattern" => {
                let raw = value
                    .as_str()
                    .ok_or_else(|| invalid(path, keyword, "expected a string"))?;
                let re = Regex::new(raw).map_err(|e| invalid(path, keyword, e.to_string()))?;
                node.pattern = Some(re);
            }
            k if ANNOTATION_KEYWORDS.contains(&k) => {}
            other => {
                return Err(SchemaError::Unsupported {
                    path: path.to_string(),
                    keyword: other.to_string(),
                });
            }
        }
    }

    Ok(node)
}

fn compile_types(value: &Value, path: &str) -> Result<Vec<SchemaType>, SchemaError> {
    let names: Vec<&str> = match value {
        Value::String(s) => vec![s.as_str()],
        Value::Array(list) => list
            .iter()
            .map(|v| v.as_str().ok_or_else(|| invalid(path, "type", "expected type names")))
            .collect::<Result<_, _>>()?,
        _ => return Err(invalid(path, "type", "expected a string or array of strings")),
    };
    names
        .into_iter()
        .map(|name| {
            SchemaType::parse(name).ok_or_else(|| invalid(path, "type", format!("unknown type '{name}'")))
        })
        .collect()
}

fn fail(path: &str, message: impl Into<String>) -> Result<(), ValidationError> {
    Err(ValidationError {
        path: path.to_string(),
        message: message.into(),
    })
}

/// JSON Schema equality: numbers compare by value, so `1` equals `1.0`.
fn json_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x == y || x.as_f64() == y.as_f64(),
        (Value::Array(xs), Value::Array(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| json_equal(x, y))
        }
        (Value::Object(xm), Value::Object(ym)) => {
            xm.len() == ym.len()
                && xm
                    .iter()
                    .all(|(k, x)| ym.get(k).is_some_and(|y| json_equal(x, y)))
        }
        _ => a == b,
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_i64() || n.is_u64() => "integer",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn validate_node(node: &Node, value: &Value, path: &str) -> Result<(), ValidationError> {
    if !node.types.is_empty() && !node.types.iter().any(|t| t.matches(value)) {
        let expected: Vec<&str> = node.types.iter().map(|t| t.as_str()).collect();
        return fail(
            path,
            format!("expected {}, got {}", expected.join(" or "), type_name(value)),
        );
    }

    if let Some(allowed) = &node.enum_values
        && !allowed.iter().any(|a| json_equal(a, value))
    {
        return fail(path, format!("value {value} is not one of the allowed values"));
    }

    if let Some(expected) = &node.const_value
        && !json_equal(expected, value)
    {
        return fail(path, format!("expected constant {expected}"));
    }

    match value {
        Value::Object(map) => {
            for field in &node.required {
                if !map.contains_key(field) {
                    return fail(path, format!("missing required field '{field}'"));
                }
            }
            for (key, item) in map {
                let child = format!("{path}.{key}");
                match node.properties.get(key) {
                    Some(sub) => validate_node(sub, item, &child)?,
                    None if node.additional_properties == Some(false) => {
                        return fail(path, format!("unexpected field '{key}'"));
                    }
                    None => {}
                }
            }
        }
        Value::Array(list) => {
            let len = list.len() as u64;
            if let Some(min) = node.min_items
                && len < min
            {
                return fail(path, format!("expected at least {min} items"));
            }
            if let Some(max) = node.max_items
                && len > max
            {
                return fail(path, format!("expected at most {max} items"));
            }
            if let Some(items) = &node.items {
                for (i, item) in list.iter().enumerate() {
                    validate_node(items, item, &format!("{path}[{i}]"))?;
                }
            }
        }
        Value::String(s) => {
            let len = s.chars().count() as u64;
            if let Some(min) = node.min_length
                && len < min
            {
                return fail(path, format!("expected at least {min} characters"));
            }
            if let Some(max) = node.max_length
                && len > max
            {
                return fail(path, format!("expected at most {max} characters"));
            }
            if let Some(re) = &node.pattern
                && !re.is_match(s)
            {
                return fail(path, format!("does not match pattern '{}'", re.as_str()));
            }
        }
        Value::Number(n) => {
            let x = n.as_f64().unwrap_or(f64::NAN);
            if let Some(min) = node.minimum
                && x < min
            {
                return fail(path, format!("must be >= {min}"));
            }
            if let Some(max) = node.maximum
                && x > max
            {
                return fail(path, format!("must be <= {max}"));
            }
        }
        Value::Null | Value::Bool(_) => {}
    }

    Ok(())
}
