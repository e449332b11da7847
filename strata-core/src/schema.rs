//! Schema - Define type schemas for resources
//!
//! Providers define schemas for each resource type,
//! enabling property validation before a template is rendered.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use crate::value::Value;

/// Attribute type
#[derive(Debug, Clone)]
pub enum AttributeType {
    /// String
    String,
    /// Integer
    Int,
    /// Boolean
    Bool,
    /// Enum (list of allowed values)
    Enum(Vec<String>),
    /// Custom type (with validation function)
    Custom {
        name: String,
        base: Box<AttributeType>,
        validate: fn(&Value) -> Result<(), String>,
    },
    /// List
    List(Box<AttributeType>),
    /// Map
    Map(Box<AttributeType>),
    /// Nested property type with its own fields (e.g., BlockDeviceMapping)
    Struct {
        name: String,
        fields: Vec<AttributeSchema>,
    },
}

impl AttributeType {
    /// Check if a value conforms to this type
    pub fn validate(&self, value: &Value) -> Result<(), TypeError> {
        // Intrinsics resolve at deploy time, so their result type is unknown here
        if value.is_intrinsic() {
            return Ok(());
        }

        match (self, value) {
            // CloudFormation stringifies integer literals, and accepts numbers
            // and booleans written as strings
            (AttributeType::String, Value::String(_) | Value::Int(_)) => Ok(()),
            (AttributeType::Int, v) if v.as_int().is_some() => Ok(()),
            (AttributeType::Bool, v) if v.as_bool().is_some() => Ok(()),

            (AttributeType::Enum(variants), Value::String(s)) => {
                if variants.iter().any(|v| v == s) {
                    Ok(())
                } else {
                    Err(TypeError::InvalidEnumVariant {
                        value: s.clone(),
                        expected: variants.clone(),
                    })
                }
            }

            (AttributeType::Custom { validate, base, .. }, v) => {
                base.validate(v)?;
                validate(v).map_err(|msg| TypeError::ValidationFailed { message: msg })
            }

            (AttributeType::List(inner), Value::List(items)) => {
                for (i, item) in items.iter().enumerate() {
                    inner.validate(item).map_err(|e| TypeError::ListItemError {
                        index: i,
                        inner: Box::new(e),
                    })?;
                }
                Ok(())
            }

            (AttributeType::Map(inner), Value::Map(map)) => {
                for (k, v) in map {
                    inner.validate(v).map_err(|e| TypeError::MapValueError {
                        key: k.clone(),
                        inner: Box::new(e),
                    })?;
                }
                Ok(())
            }

            (AttributeType::Struct { fields, .. }, Value::Map(map)) => {
                match validate_fields(fields.iter(), map).into_iter().next() {
                    Some(e) => Err(e),
                    None => Ok(()),
                }
            }

            _ => Err(TypeError::TypeMismatch {
                expected: self.type_name(),
                got: value.type_name(),
            }),
        }
    }

    fn type_name(&self) -> String {
        match self {
            AttributeType::String => "String".to_string(),
            AttributeType::Int => "Int".to_string(),
            AttributeType::Bool => "Bool".to_string(),
            AttributeType::Enum(variants) => format!("Enum({})", variants.join(" | ")),
            AttributeType::Custom { name, .. } => name.clone(),
            AttributeType::List(inner) => format!("List<{}>", inner.type_name()),
            AttributeType::Map(inner) => format!("Map<{}>", inner.type_name()),
            AttributeType::Struct { name, .. } => name.clone(),
        }
    }
}

impl fmt::Display for AttributeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.type_name())
    }
}

/// Type error
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TypeError {
    #[error("Type mismatch: expected {expected}, got {got}")]
    TypeMismatch { expected: String, got: String },

    #[error("Invalid enum variant '{value}', expected one of: {}", expected.join(", "))]
    InvalidEnumVariant {
        value: String,
        expected: Vec<String>,
    },

    #[error("Validation failed: {message}")]
    ValidationFailed { message: String },

    #[error("Required attribute '{name}' is missing")]
    MissingRequired { name: String },

    #[error("Unknown attribute '{name}'")]
    UnknownAttribute { name: String },

    #[error("List item at index {index}: {inner}")]
    ListItemError { index: usize, inner: Box<TypeError> },

    #[error("Map value for key '{key}': {inner}")]
    MapValueError { key: String, inner: Box<TypeError> },

    #[error("Attribute '{name}': {inner}")]
    AttributeError { name: String, inner: Box<TypeError> },
}

impl Value {
    fn type_name(&self) -> String {
        match self {
            Value::String(_) => "String".to_string(),
            Value::Int(_) => "Int".to_string(),
            Value::Bool(_) => "Bool".to_string(),
            Value::List(_) => "List".to_string(),
            Value::Map(_) => "Map".to_string(),
            Value::Ref(name) => format!("Ref({})", name),
            Value::GetAtt {
                logical_id,
                attribute,
            } => format!("GetAtt({}.{})", logical_id, attribute),
            Value::Join { .. } => "Join".to_string(),
            Value::Sub(_) => "Sub".to_string(),
            Value::Base64(_) => "Base64".to_string(),
        }
    }
}

/// Attribute schema
#[derive(Debug, Clone)]
pub struct AttributeSchema {
    /// Property name as written in the template (e.g., "VpcId")
    pub name: String,
    pub attr_type: AttributeType,
    pub required: bool,
    pub description: Option<String>,
}

impl AttributeSchema {
    pub fn new(name: impl Into<String>, attr_type: AttributeType) -> Self {
        Self {
            name: name.into(),
            attr_type,
            required: false,
            description: None,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }
}

/// Check a property map against a set of field schemas, collecting every error
fn validate_fields<'a>(
    fields: impl Iterator<Item = &'a AttributeSchema> + Clone,
    attributes: &BTreeMap<String, Value>,
) -> Vec<TypeError> {
    let mut errors = Vec::new();

    for schema in fields.clone() {
        if schema.required && !attributes.contains_key(&schema.name) {
            errors.push(TypeError::MissingRequired {
                name: schema.name.clone(),
            });
        }
    }

    for (name, value) in attributes {
        match fields.clone().find(|s| &s.name == name) {
            Some(schema) => {
                if let Err(e) = schema.attr_type.validate(value) {
                    errors.push(TypeError::AttributeError {
                        name: name.clone(),
                        inner: Box::new(e),
                    });
                }
            }
            None => errors.push(TypeError::UnknownAttribute { name: name.clone() }),
        }
    }

    errors
}

/// Resource schema
#[derive(Debug, Clone)]
pub struct ResourceSchema {
    /// CloudFormation type name (e.g., "AWS::EC2::VPC")
    pub resource_type: String,
    pub attributes: BTreeMap<String, AttributeSchema>,
    pub description: Option<String>,
}

impl ResourceSchema {
    pub fn new(resource_type: impl Into<String>) -> Self {
        Self {
            resource_type: resource_type.into(),
            attributes: BTreeMap::new(),
            description: None,
        }
    }

    pub fn attribute(mut self, schema: AttributeSchema) -> Self {
        self.attributes.insert(schema.name.clone(), schema);
        self
    }

    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }

    /// Validate resource properties
    pub fn validate(&self, attributes: &BTreeMap<String, Value>) -> Result<(), Vec<TypeError>> {
        let errors = validate_fields(self.attributes.values(), attributes);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Schemas indexed by CloudFormation type name
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    schemas: HashMap<String, ResourceSchema>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, schema: ResourceSchema) {
        self.schemas.insert(schema.resource_type.clone(), schema);
    }

    pub fn get(&self, resource_type: &str) -> Option<&ResourceSchema> {
        self.schemas.get(resource_type)
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    /// Registered type names, sorted
    pub fn resource_types(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.schemas.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl FromIterator<ResourceSchema> for SchemaRegistry {
    fn from_iter<I: IntoIterator<Item = ResourceSchema>>(iter: I) -> Self {
        let mut registry = Self::new();
        for schema in iter {
            registry.register(schema);
        }
        registry
    }
}

/// Helper functions for common types
pub mod types {
    use super::*;

    /// Positive integer type
    pub fn positive_int() -> AttributeType {
        AttributeType::Custom {
            name: "PositiveInt".to_string(),
            base: Box::new(AttributeType::Int),
            validate: |value| match value.as_int() {
                Some(n) if n > 0 => Ok(()),
                Some(_) => Err("Value must be positive".to_string()),
                None => Err("Expected integer".to_string()),
            },
        }
    }

    /// Port number type (0-65535, or -1 meaning all ports)
    pub fn port_number() -> AttributeType {
        AttributeType::Custom {
            name: "PortNumber".to_string(),
            base: Box::new(AttributeType::Int),
            validate: |value| match value.as_int() {
                Some(-1..=65535) => Ok(()),
                Some(n) => Err(format!("Port number {} must be -1 or 0-65535", n)),
                None => Err("Expected integer".to_string()),
            },
        }
    }

    /// CIDR block type (e.g., "10.0.0.0/16")
    pub fn cidr() -> AttributeType {
        AttributeType::Custom {
            name: "Cidr".to_string(),
            base: Box::new(AttributeType::String),
            validate: |value| match value.as_str() {
                Some(s) => validate_cidr(s),
                None => Err("Expected string".to_string()),
            },
        }
    }
}

/// Validate CIDR block format (e.g., "10.0.0.0/16")
pub fn validate_cidr(cidr: &str) -> Result<(), String> {
    let parts: Vec<&str> = cidr.split('/').collect();
    if parts.len() != 2 {
        return Err(format!(
            "Invalid CIDR format '{}': expected IP/prefix",
            cidr
        ));
    }

    let ip = parts[0];
    let prefix = parts[1];

    // Validate IP address
    let octets: Vec<&str> = ip.split('.').collect();
    if octets.len() != 4 {
        return Err(format!("Invalid IP address '{}': expected 4 octets", ip));
    }

    for octet in &octets {
        match octet.parse::<u8>() {
            Ok(_) => {}
            Err(_) => {
                return Err(format!(
                    "Invalid octet '{}' in IP address: must be 0-255",
                    octet
                ));
            }
        }
    }

    // Validate prefix length
    match prefix.parse::<u8>() {
        Ok(p) if p <= 32 => Ok(()),
        Ok(p) => Err(format!("Invalid prefix length '{}': must be 0-32", p)),
        Err(_) => Err(format!(
            "Invalid prefix length '{}': must be a number",
            prefix
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attrs(entries: &[(&str, Value)]) -> BTreeMap<String, Value> {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn validate_string_type() {
        let t = AttributeType::String;
        assert!(t.validate(&Value::String("hello".to_string())).is_ok());
        assert!(t.validate(&Value::Bool(true)).is_err());
        assert!(t.validate(&Value::List(vec![])).is_err());
    }

    #[test]
    fn validate_string_accepts_integer_literals() {
        assert!(AttributeType::String.validate(&Value::Int(0)).is_ok());
        assert!(AttributeType::String.validate(&Value::Int(-1)).is_ok());

        let interface = AttributeType::Struct {
            name: "NetworkInterface".to_string(),
            fields: vec![AttributeSchema::new("DeviceIndex", AttributeType::String).required()],
        };
        let value = Value::Map(attrs(&[("DeviceIndex", Value::Int(0))]));
        assert!(interface.validate(&value).is_ok());
    }

    #[test]
    fn validate_int_accepts_numeric_strings() {
        let t = AttributeType::Int;
        assert!(t.validate(&Value::Int(128)).is_ok());
        assert!(t.validate(&Value::String("128".to_string())).is_ok());
        assert!(t.validate(&Value::String("big".to_string())).is_err());
        assert!(t.validate(&Value::Bool(true)).is_err());
    }

    #[test]
    fn validate_bool_accepts_string_spellings() {
        let t = AttributeType::Bool;
        assert!(t.validate(&Value::Bool(false)).is_ok());
        assert!(t.validate(&Value::String("true".to_string())).is_ok());
        assert!(t.validate(&Value::String("yes".to_string())).is_err());
    }

    #[test]
    fn intrinsics_satisfy_any_type() {
        let r = Value::reference("InstanceType");
        assert!(AttributeType::Int.validate(&r).is_ok());
        assert!(types::cidr().validate(&r).is_ok());
        assert!(
            AttributeType::Enum(vec!["a".to_string()])
                .validate(&Value::get_att("X", "Y"))
                .is_ok()
        );
    }

    #[test]
    fn validate_enum_type() {
        let t = AttributeType::Enum(vec!["a".to_string(), "b".to_string()]);
        assert!(t.validate(&Value::String("a".to_string())).is_ok());
        assert!(t.validate(&Value::String("c".to_string())).is_err());
    }

    #[test]
    fn validate_positive_int() {
        let t = types::positive_int();
        assert!(t.validate(&Value::Int(1)).is_ok());
        assert!(t.validate(&Value::Int(100)).is_ok());
        assert!(t.validate(&Value::Int(0)).is_err());
        assert!(t.validate(&Value::Int(-1)).is_err());
    }

    #[test]
    fn validate_port_number() {
        let t = types::port_number();
        assert!(t.validate(&Value::Int(0)).is_ok());
        assert!(t.validate(&Value::Int(65535)).is_ok());
        assert!(t.validate(&Value::Int(-1)).is_ok());
        assert!(t.validate(&Value::String("8888".to_string())).is_ok());
        assert!(t.validate(&Value::Int(65536)).is_err());
        assert_eq!(
            t.validate(&Value::Int(-2)),
            Err(TypeError::ValidationFailed {
                message: "Port number -2 must be -1 or 0-65535".to_string()
            })
        );
    }

    #[test]
    fn validate_resource_schema() {
        let schema = ResourceSchema::new("AWS::Test::Thing")
            .attribute(AttributeSchema::new("Name", AttributeType::String).required())
            .attribute(AttributeSchema::new("Count", types::positive_int()))
            .attribute(AttributeSchema::new("Enabled", AttributeType::Bool));

        let attributes = attrs(&[
            ("Name", Value::String("my-resource".to_string())),
            ("Count", Value::Int(5)),
            ("Enabled", Value::Bool(true)),
        ]);

        assert!(schema.validate(&attributes).is_ok());
    }

    #[test]
    fn missing_required_and_unknown_attributes() {
        let schema = ResourceSchema::new("AWS::Test::Thing")
            .attribute(AttributeSchema::new("Name", AttributeType::String).required());

        let errors = schema
            .validate(&attrs(&[("Nmae", Value::String("typo".to_string()))]))
            .unwrap_err();
        assert_eq!(
            errors,
            vec![
                TypeError::MissingRequired {
                    name: "Name".to_string()
                },
                TypeError::UnknownAttribute {
                    name: "Nmae".to_string()
                },
            ]
        );
    }

    #[test]
    fn validate_struct_fields() {
        let port_range = AttributeType::Struct {
            name: "PortRange".to_string(),
            fields: vec![
                AttributeSchema::new("From", types::port_number()).required(),
                AttributeSchema::new("To", types::port_number()).required(),
            ],
        };

        let ok = Value::Map(attrs(&[("From", Value::Int(80)), ("To", Value::Int(80))]));
        assert!(port_range.validate(&ok).is_ok());

        let missing = Value::Map(attrs(&[("From", Value::Int(80))]));
        assert_eq!(
            port_range.validate(&missing),
            Err(TypeError::MissingRequired {
                name: "To".to_string()
            })
        );

        let bad = Value::Map(attrs(&[("From", Value::Int(80)), ("To", Value::Int(70000))]));
        assert!(matches!(
            port_range.validate(&bad),
            Err(TypeError::AttributeError { ref name, .. }) if name == "To"
        ));

        assert!(matches!(
            port_range.validate(&Value::Int(3)),
            Err(TypeError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn list_errors_carry_index() {
        let t = AttributeType::List(Box::new(types::cidr()));
        let value = Value::List(vec![
            Value::String("10.0.0.0/16".to_string()),
            Value::String("10.0.0.0/33".to_string()),
        ]);
        assert!(matches!(
            t.validate(&value),
            Err(TypeError::ListItemError { index: 1, .. })
        ));
    }

    #[test]
    fn registry_lookup() {
        let registry: SchemaRegistry = [
            ResourceSchema::new("AWS::EC2::VPC"),
            ResourceSchema::new("AWS::EC2::Subnet"),
        ]
        .into_iter()
        .collect();

        assert_eq!(registry.len(), 2);
        assert!(registry.get("AWS::EC2::VPC").is_some());
        assert!(registry.get("AWS::EC2::Route").is_none());
        assert_eq!(
            registry.resource_types(),
            vec!["AWS::EC2::Subnet", "AWS::EC2::VPC"]
        );
    }

    #[test]
    fn validate_cidr_type() {
        let t = types::cidr();

        // Valid CIDRs
        assert!(
            t.validate(&Value::String("10.0.0.0/16".to_string()))
                .is_ok()
        );
        assert!(
            t.validate(&Value::String("192.168.1.0/24".to_string()))
                .is_ok()
        );
        assert!(t.validate(&Value::String("0.0.0.0/0".to_string())).is_ok());
        assert!(
            t.validate(&Value::String("255.255.255.255/32".to_string()))
                .is_ok()
        );

        // Invalid CIDRs
        assert!(t.validate(&Value::String("10.0.0.0".to_string())).is_err()); // no prefix
        assert!(
            t.validate(&Value::String("10.0.0.0/33".to_string()))
                .is_err()
        ); // prefix too large
        assert!(
            t.validate(&Value::String("10.0.0.256/16".to_string()))
                .is_err()
        ); // octet > 255
        assert!(t.validate(&Value::String("10.0.0/16".to_string())).is_err()); // only 3 octets
        assert!(t.validate(&Value::String("invalid".to_string())).is_err()); // not a CIDR
        assert!(t.validate(&Value::Int(42)).is_err()); // wrong type
    }
}
