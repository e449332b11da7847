//! Value - Property values and intrinsic functions
//!
//! A template property is either a literal (string, integer, boolean, list, map)
//! or an intrinsic function that CloudFormation resolves at deploy time.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde::Deserialize;

pub const ACCOUNT_ID: &str = "AWS::AccountId";
pub const NOTIFICATION_ARNS: &str = "AWS::NotificationARNs";
pub const NO_VALUE: &str = "AWS::NoValue";
pub const PARTITION: &str = "AWS::Partition";
pub const REGION: &str = "AWS::Region";
pub const STACK_ID: &str = "AWS::StackId";
pub const STACK_NAME: &str = "AWS::StackName";
pub const URL_SUFFIX: &str = "AWS::URLSuffix";

/// Names that `Ref` can always resolve, regardless of template contents
pub const PSEUDO_PARAMETERS: &[&str] = &[
    ACCOUNT_ID,
    NOTIFICATION_ARNS,
    NO_VALUE,
    PARTITION,
    REGION,
    STACK_ID,
    STACK_NAME,
    URL_SUFFIX,
];

pub fn is_pseudo_parameter(name: &str) -> bool {
    PSEUDO_PARAMETERS.contains(&name)
}

/// Attribute value of a resource, parameter default or output
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "serde_json::Value")]
pub enum Value {
    String(String),
    Int(i64),
    Bool(bool),
    List(Vec<Value>),
    Map(BTreeMap<String, Value>),
    /// `{"Ref": name}` - a parameter, resource or pseudo parameter
    Ref(String),
    /// `{"Fn::GetAtt": [logical_id, attribute]}`
    GetAtt {
        logical_id: String,
        attribute: String,
    },
    /// `{"Fn::Join": [delimiter, [values...]]}`
    Join {
        delimiter: String,
        values: Vec<Value>,
    },
    /// `{"Fn::Sub": "text with ${Placeholders}"}`
    Sub(String),
    /// `{"Fn::Base64": value}`
    Base64(Box<Value>),
}

/// A name referenced from inside a value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reference<'a> {
    Ref(&'a str),
    GetAtt {
        logical_id: &'a str,
        attribute: &'a str,
    },
}

impl Reference<'_> {
    /// The logical name the reference points at
    pub fn target(&self) -> &str {
        match *self {
            Reference::Ref(name) => name,
            Reference::GetAtt { logical_id, .. } => logical_id,
        }
    }
}

static SUB_PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^!}][^}]*)\}").expect("placeholder pattern is valid"));

impl Value {
    pub fn reference(name: impl Into<String>) -> Self {
        Value::Ref(name.into())
    }

    pub fn get_att(logical_id: impl Into<String>, attribute: impl Into<String>) -> Self {
        Value::GetAtt {
            logical_id: logical_id.into(),
            attribute: attribute.into(),
        }
    }

    pub fn join(delimiter: impl Into<String>, values: Vec<Value>) -> Self {
        Value::Join {
            delimiter: delimiter.into(),
            values,
        }
    }

    pub fn sub(text: impl Into<String>) -> Self {
        Value::Sub(text.into())
    }

    pub fn base64(value: impl Into<Value>) -> Self {
        Value::Base64(Box::new(value.into()))
    }

    /// Returns true if CloudFormation resolves this value at deploy time
    pub fn is_intrinsic(&self) -> bool {
        matches!(
            self,
            Value::Ref(_)
                | Value::GetAtt { .. }
                | Value::Join { .. }
                | Value::Sub(_)
                | Value::Base64(_)
        )
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Integer view of a literal; numeric strings count, as CloudFormation coerces them
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Boolean view of a literal; "true" and "false" count
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            Value::String(s) => match s.as_str() {
                "true" => Some(true),
                "false" => Some(false),
                _ => None,
            },
            _ => None,
        }
    }

    /// Collect every logical name this value refers to, including `Fn::Sub` placeholders
    pub fn references(&self) -> Vec<Reference<'_>> {
        let mut refs = Vec::new();
        self.collect_references(&mut refs);
        refs
    }

    fn collect_references<'a>(&'a self, refs: &mut Vec<Reference<'a>>) {
        match self {
            Value::String(_) | Value::Int(_) | Value::Bool(_) => {}
            Value::List(items) => items.iter().for_each(|v| v.collect_references(refs)),
            Value::Map(map) => map.values().for_each(|v| v.collect_references(refs)),
            Value::Ref(name) => refs.push(Reference::Ref(name)),
            Value::GetAtt {
                logical_id,
                attribute,
            } => refs.push(Reference::GetAtt {
                logical_id,
                attribute,
            }),
            Value::Join { values, .. } => values.iter().for_each(|v| v.collect_references(refs)),
            Value::Sub(text) => {
                for caps in SUB_PLACEHOLDER.captures_iter(text) {
                    let Some(placeholder) = caps.get(1) else {
                        continue;
                    };
                    let placeholder = placeholder.as_str();
                    // Pseudo parameters contain "::" but never a dot
                    match placeholder.split_once('.') {
                        Some((logical_id, attribute)) => refs.push(Reference::GetAtt {
                            logical_id,
                            attribute,
                        }),
                        None => refs.push(Reference::Ref(placeholder)),
                    }
                }
            }
            Value::Base64(inner) => inner.collect_references(refs),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

impl From<BTreeMap<String, Value>> for Value {
    fn from(map: BTreeMap<String, Value>) -> Self {
        Value::Map(map)
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::String(s) => serializer.serialize_str(s),
            Value::Int(n) => serializer.serialize_i64(*n),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::List(items) => serializer.collect_seq(items),
            Value::Map(map) => serializer.collect_map(map),
            Value::Ref(name) => single_entry(serializer, "Ref", name),
            Value::GetAtt {
                logical_id,
                attribute,
            } => single_entry(serializer, "Fn::GetAtt", &[logical_id, attribute]),
            Value::Join { delimiter, values } => {
                single_entry(serializer, "Fn::Join", &(delimiter, values))
            }
            Value::Sub(text) => single_entry(serializer, "Fn::Sub", text),
            Value::Base64(inner) => single_entry(serializer, "Fn::Base64", inner),
        }
    }
}

fn single_entry<S: Serializer, T: Serialize + ?Sized>(
    serializer: S,
    key: &str,
    value: &T,
) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(1))?;
    map.serialize_entry(key, value)?;
    map.end()
}

/// Error converting JSON into a [`Value`]
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValueError {
    #[error("null is not a valid template value")]
    Null,

    #[error("Number {0} is not an integer")]
    NonInteger(String),

    #[error("Unsupported intrinsic function '{0}'")]
    UnsupportedIntrinsic(String),

    #[error("Malformed {function}: {message}")]
    Malformed {
        function: &'static str,
        message: String,
    },
}

impl TryFrom<serde_json::Value> for Value {
    type Error = ValueError;

    fn try_from(json: serde_json::Value) -> Result<Self, Self::Error> {
        match json {
            serde_json::Value::Null => Err(ValueError::Null),
            serde_json::Value::Bool(b) => Ok(Value::Bool(b)),
            serde_json::Value::Number(n) => n
                .as_i64()
                .map(Value::Int)
                .ok_or_else(|| ValueError::NonInteger(n.to_string())),
            serde_json::Value::String(s) => Ok(Value::String(s)),
            serde_json::Value::Array(items) => items
                .into_iter()
                .map(Value::try_from)
                .collect::<Result<Vec<_>, _>>()
                .map(Value::List),
            serde_json::Value::Object(map) => {
                let intrinsic =
                    map.len() == 1 && map.keys().all(|k| k == "Ref" || k.starts_with("Fn::"));
                if intrinsic {
                    let (function, argument) = map.into_iter().next().ok_or(ValueError::Null)?;
                    return parse_intrinsic(&function, argument);
                }
                map.into_iter()
                    .map(|(k, v)| Ok((k, Value::try_from(v)?)))
                    .collect::<Result<BTreeMap<_, _>, ValueError>>()
                    .map(Value::Map)
            }
        }
    }
}

fn parse_intrinsic(function: &str, argument: serde_json::Value) -> Result<Value, ValueError> {
    use serde_json::Value as Json;

    match (function, argument) {
        ("Ref", Json::String(name)) => Ok(Value::Ref(name)),
        ("Ref", _) => Err(malformed("Ref", "expected a logical name")),

        ("Fn::GetAtt", Json::Array(parts)) => match <[Json; 2]>::try_from(parts) {
            Ok([Json::String(logical_id), Json::String(attribute)]) => {
                Ok(Value::GetAtt {
                    logical_id,
                    attribute,
                })
            }
            _ => Err(malformed(
                "Fn::GetAtt",
                "expected [logical_id, attribute]",
            )),
        },
        ("Fn::GetAtt", Json::String(dotted)) => match dotted.split_once('.') {
            Some((logical_id, attribute)) => Ok(Value::get_att(logical_id, attribute)),
            None => Err(malformed("Fn::GetAtt", "expected logical_id.attribute")),
        },
        ("Fn::GetAtt", _) => Err(malformed(
            "Fn::GetAtt",
            "expected [logical_id, attribute]",
        )),

        ("Fn::Join", Json::Array(parts)) => match <[Json; 2]>::try_from(parts) {
            Ok([Json::String(delimiter), Json::Array(values)]) => Ok(Value::Join {
                delimiter,
                values: values
                    .into_iter()
                    .map(Value::try_from)
                    .collect::<Result<_, _>>()?,
            }),
            _ => Err(malformed("Fn::Join", "expected [delimiter, [values]]")),
        },
        ("Fn::Join", _) => Err(malformed("Fn::Join", "expected [delimiter, [values]]")),

        ("Fn::Sub", Json::String(text)) => Ok(Value::Sub(text)),
        ("Fn::Sub", _) => Err(malformed(
            "Fn::Sub",
            "only the single string form is supported",
        )),

        ("Fn::Base64", inner) => Ok(Value::Base64(Box::new(Value::try_from(inner)?))),

        (other, _) => Err(ValueError::UnsupportedIntrinsic(other.to_string())),
    }
}

fn malformed(function: &'static str, message: &str) -> ValueError {
    ValueError::Malformed {
        function,
        message: message.to_string(),
    }
}

/// Resource tags, emitted as a `[{"Key": .., "Value": ..}]` list sorted by key
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tags(BTreeMap<String, Value>);

impl Tags {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tag(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl From<Tags> for Value {
    fn from(tags: Tags) -> Self {
        Value::List(
            tags.0
                .into_iter()
                .map(|(key, value)| {
                    Value::Map(BTreeMap::from([
                        ("Key".to_string(), Value::String(key)),
                        ("Value".to_string(), value),
                    ]))
                })
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn intrinsics_serialize_to_cloudformation_syntax() {
        let value = Value::List(vec![
            Value::reference("VPC"),
            Value::get_att("Ec2Instance", "PublicIp"),
            Value::join(".", vec![Value::reference("HostName"), "example".into()]),
            Value::sub("${AWS::Region}-bucket"),
            Value::base64("#!/bin/sh"),
        ]);

        assert_eq!(
            serde_json::to_value(&value).unwrap(),
            json!([
                {"Ref": "VPC"},
                {"Fn::GetAtt": ["Ec2Instance", "PublicIp"]},
                {"Fn::Join": [".", [{"Ref": "HostName"}, "example"]]},
                {"Fn::Sub": "${AWS::Region}-bucket"},
                {"Fn::Base64": "#!/bin/sh"},
            ])
        );
    }

    #[test]
    fn parse_json_with_intrinsics() {
        let value = Value::try_from(json!({
            "HostedZoneName": {"Fn::Join": ["", [{"Ref": "HostedZone"}, "."]]},
            "TTL": "900",
            "ResourceRecords": [{"Fn::GetAtt": ["Ec2Instance", "PublicIp"]}],
        }))
        .unwrap();

        let Value::Map(map) = value else {
            panic!("expected map");
        };
        assert_eq!(
            map["HostedZoneName"],
            Value::join("", vec![Value::reference("HostedZone"), ".".into()])
        );
        assert_eq!(map["TTL"], Value::String("900".to_string()));
        assert_eq!(
            map["ResourceRecords"],
            Value::List(vec![Value::get_att("Ec2Instance", "PublicIp")])
        );
    }

    #[test]
    fn parse_dotted_get_att() {
        let value = Value::try_from(json!({"Fn::GetAtt": "Ec2Instance.PrivateDnsName"})).unwrap();
        assert_eq!(value, Value::get_att("Ec2Instance", "PrivateDnsName"));
    }

    #[test]
    fn parse_rejects_floats_nulls_and_unknown_functions() {
        assert_eq!(
            Value::try_from(json!(1.5)),
            Err(ValueError::NonInteger("1.5".to_string()))
        );
        assert_eq!(Value::try_from(json!(null)), Err(ValueError::Null));
        assert_eq!(
            Value::try_from(json!({"Fn::FindInMap": ["A", "B", "C"]})),
            Err(ValueError::UnsupportedIntrinsic("Fn::FindInMap".to_string()))
        );
        assert!(Value::try_from(json!({"Ref": 3})).is_err());
        assert!(Value::try_from(json!({"Fn::GetAtt": ["OnlyOne"]})).is_err());
    }

    #[test]
    fn single_key_plain_object_is_a_map() {
        let value = Value::try_from(json!({"Key": "Network"})).unwrap();
        assert_eq!(
            value,
            Value::Map(BTreeMap::from([(
                "Key".to_string(),
                Value::String("Network".to_string())
            )]))
        );
    }

    #[test]
    fn references_include_nested_and_sub_placeholders() {
        let value = Value::Map(BTreeMap::from([
            ("A".to_string(), Value::reference("Subnet")),
            (
                "B".to_string(),
                Value::List(vec![Value::base64(Value::get_att("Ec2Instance", "PrivateIp"))]),
            ),
            (
                "C".to_string(),
                Value::sub("${Bucket.Arn}/${AWS::Region}/${!Literal}"),
            ),
        ]));

        assert_eq!(
            value.references(),
            vec![
                Reference::Ref("Subnet"),
                Reference::GetAtt {
                    logical_id: "Ec2Instance",
                    attribute: "PrivateIp"
                },
                Reference::GetAtt {
                    logical_id: "Bucket",
                    attribute: "Arn"
                },
                Reference::Ref("AWS::Region"),
            ]
        );
    }

    #[test]
    fn literal_coercions() {
        assert_eq!(Value::from("22").as_int(), Some(22));
        assert_eq!(Value::Int(-1).as_int(), Some(-1));
        assert_eq!(Value::from("tcp").as_int(), None);
        assert_eq!(Value::from("true").as_bool(), Some(true));
        assert_eq!(Value::Bool(false).as_bool(), Some(false));
        assert_eq!(Value::Int(1).as_bool(), None);
    }

    #[test]
    fn tags_are_sorted_key_value_pairs() {
        let tags = Tags::new()
            .tag("Rev", "0.0.3")
            .tag("Application", Value::reference(STACK_ID))
            .tag("Network", "Public");

        assert_eq!(
            serde_json::to_value(Value::from(tags)).unwrap(),
            json!([
                {"Key": "Application", "Value": {"Ref": "AWS::StackId"}},
                {"Key": "Network", "Value": "Public"},
                {"Key": "Rev", "Value": "0.0.3"},
            ])
        );
    }

    #[test]
    fn pseudo_parameters() {
        assert!(is_pseudo_parameter("AWS::StackId"));
        assert!(is_pseudo_parameter("AWS::NoValue"));
        assert!(!is_pseudo_parameter("AWS::Bogus"));
    }
}
