//! Parameter - Values supplied when a stack is deployed

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::template::TemplateError;

/// Parameter type as written in the `Type` field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ParameterType {
    String,
    Number,
    /// `List<Number>`
    NumberList,
    CommaDelimitedList,
    /// AWS-specific types such as `AWS::EC2::KeyPair::KeyName` or `List<AWS::EC2::Subnet::Id>`
    Aws(String),
}

impl ParameterType {
    pub fn as_str(&self) -> &str {
        match self {
            ParameterType::String => "String",
            ParameterType::Number => "Number",
            ParameterType::NumberList => "List<Number>",
            ParameterType::CommaDelimitedList => "CommaDelimitedList",
            ParameterType::Aws(name) => name,
        }
    }
}

impl FromStr for ParameterType {
    type Err = TemplateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "String" => Ok(ParameterType::String),
            "Number" => Ok(ParameterType::Number),
            "List<Number>" => Ok(ParameterType::NumberList),
            "CommaDelimitedList" => Ok(ParameterType::CommaDelimitedList),
            _ if s.starts_with("AWS::") && !s.ends_with("::") => {
                Ok(ParameterType::Aws(s.to_string()))
            }
            _ if s.starts_with("List<AWS::") && s.ends_with('>') => {
                Ok(ParameterType::Aws(s.to_string()))
            }
            _ => Err(TemplateError::InvalidParameterType(s.to_string())),
        }
    }
}

impl TryFrom<String> for ParameterType {
    type Error = TemplateError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<ParameterType> for String {
    fn from(t: ParameterType) -> Self {
        t.as_str().to_string()
    }
}

impl fmt::Display for ParameterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A template parameter
///
/// The name is the key in the `Parameters` section and is not serialized
/// as a field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Parameter {
    #[serde(skip)]
    pub name: String,

    #[serde(rename = "Type")]
    pub param_type: ParameterType,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::opt_string"
    )]
    pub default: Option<String>,

    #[serde(
        default,
        skip_serializing_if = "Vec::is_empty",
        deserialize_with = "lenient::strings"
    )]
    pub allowed_values: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_pattern: Option<String>,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "lenient::int_as_string",
        deserialize_with = "lenient::opt_int"
    )]
    pub min_length: Option<i64>,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "lenient::int_as_string",
        deserialize_with = "lenient::opt_int"
    )]
    pub max_length: Option<i64>,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "lenient::int_as_string",
        deserialize_with = "lenient::opt_int"
    )]
    pub min_value: Option<i64>,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "lenient::int_as_string",
        deserialize_with = "lenient::opt_int"
    )]
    pub max_value: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constraint_description: Option<String>,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::opt_bool"
    )]
    pub no_echo: Option<bool>,
}

impl Parameter {
    pub fn new(name: impl Into<String>, param_type: ParameterType) -> Self {
        Self {
            name: name.into(),
            param_type,
            description: None,
            default: None,
            allowed_values: Vec::new(),
            allowed_pattern: None,
            min_length: None,
            max_length: None,
            min_value: None,
            max_value: None,
            constraint_description: None,
            no_echo: None,
        }
    }

    /// Shorthand for a `String` parameter
    pub fn string(name: impl Into<String>) -> Self {
        Self::new(name, ParameterType::String)
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub fn with_allowed_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_values = values.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_allowed_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.allowed_pattern = Some(pattern.into());
        self
    }

    pub fn with_length(mut self, min: i64, max: i64) -> Self {
        self.min_length = Some(min);
        self.max_length = Some(max);
        self
    }

    pub fn with_value_range(mut self, min: i64, max: i64) -> Self {
        self.min_value = Some(min);
        self.max_value = Some(max);
        self
    }

    pub fn with_constraint_description(mut self, description: impl Into<String>) -> Self {
        self.constraint_description = Some(description.into());
        self
    }

    pub fn with_no_echo(mut self, no_echo: bool) -> Self {
        self.no_echo = Some(no_echo);
        self
    }
}

/// Deserializers accepting the scalar spellings CloudFormation itself accepts
/// (`"MinLength": "9"` as well as `"MinLength": 9`)
mod lenient {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};
    use serde_json::Value as Json;

    /// Length and value bounds are written as strings, e.g. `"MinLength": "9"`
    pub fn int_as_string<S: Serializer>(value: &Option<i64>, s: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(n) => s.serialize_str(&n.to_string()),
            None => s.serialize_none(),
        }
    }

    fn scalar_to_string(value: Json) -> Result<String, String> {
        match value {
            Json::String(s) => Ok(s),
            Json::Number(n) => Ok(n.to_string()),
            Json::Bool(b) => Ok(b.to_string()),
            other => Err(format!("expected a scalar, got {}", other)),
        }
    }

    pub fn opt_string<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        Option::<Json>::deserialize(d)?
            .map(scalar_to_string)
            .transpose()
            .map_err(D::Error::custom)
    }

    pub fn strings<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<String>, D::Error> {
        Vec::<Json>::deserialize(d)?
            .into_iter()
            .map(scalar_to_string)
            .collect::<Result<_, _>>()
            .map_err(D::Error::custom)
    }

    pub fn opt_int<'de, D: Deserializer<'de>>(d: D) -> Result<Option<i64>, D::Error> {
        match Option::<Json>::deserialize(d)? {
            None => Ok(None),
            Some(Json::Number(n)) => n
                .as_i64()
                .map(Some)
                .ok_or_else(|| D::Error::custom(format!("expected an integer, got {}", n))),
            Some(Json::String(s)) => s
                .trim()
                .parse()
                .map(Some)
                .map_err(|_| D::Error::custom(format!("expected an integer, got '{}'", s))),
            Some(other) => Err(D::Error::custom(format!(
                "expected an integer, got {}",
                other
            ))),
        }
    }

    pub fn opt_bool<'de, D: Deserializer<'de>>(d: D) -> Result<Option<bool>, D::Error> {
        match Option::<Json>::deserialize(d)? {
            None => Ok(None),
            Some(Json::Bool(b)) => Ok(Some(b)),
            Some(Json::String(s)) if s == "true" => Ok(Some(true)),
            Some(Json::String(s)) if s == "false" => Ok(Some(false)),
            Some(other) => Err(D::Error::custom(format!(
                "expected a boolean, got {}",
                other
            ))),
        }
    }
}
