//! Resource - Resource declarations and their property bags

use std::collections::BTreeMap;

use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};

use crate::value::Value;

/// A resource declared in the `Resources` section
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawResource")]
pub struct Resource {
    /// Logical ID (key in the `Resources` section)
    pub logical_id: String,
    /// CloudFormation type name (e.g., "AWS::EC2::VPC")
    pub resource_type: String,
    pub properties: BTreeMap<String, Value>,
    /// Logical IDs of resources that must be created first
    pub depends_on: Vec<String>,
}

impl Resource {
    pub fn new(logical_id: impl Into<String>, resource_type: impl Into<String>) -> Self {
        Self {
            logical_id: logical_id.into(),
            resource_type: resource_type.into(),
            properties: BTreeMap::new(),
            depends_on: Vec::new(),
        }
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    pub fn with_depends_on(mut self, logical_id: impl Into<String>) -> Self {
        self.depends_on.push(logical_id.into());
        self
    }

    pub fn property(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }
}

impl Serialize for Resource {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        // A lone dependency is written as a bare string
        match self.depends_on.as_slice() {
            [] => {}
            [single] => map.serialize_entry("DependsOn", single)?,
            many => map.serialize_entry("DependsOn", many)?,
        }
        if !self.properties.is_empty() {
            map.serialize_entry("Properties", &self.properties)?;
        }
        map.serialize_entry("Type", &self.resource_type)?;
        map.end()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum DependsOn {
    One(String),
    Many(Vec<String>),
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RawResource {
    #[serde(rename = "Type")]
    resource_type: String,
    #[serde(default)]
    properties: BTreeMap<String, Value>,
    #[serde(default)]
    depends_on: Option<DependsOn>,
}

impl From<RawResource> for Resource {
    fn from(raw: RawResource) -> Self {
        let depends_on = match raw.depends_on {
            None => Vec::new(),
            Some(DependsOn::One(id)) => vec![id],
            Some(DependsOn::Many(ids)) => ids,
        };
        Self {
            logical_id: String::new(),
            resource_type: raw.resource_type,
            properties: raw.properties,
            depends_on,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serialize_with_single_dependency() {
        let route = Resource::new("Route", "AWS::EC2::Route")
            .with_depends_on("InternetGatewayAttachment")
            .with_property("DestinationCidrBlock", "0.0.0.0/0")
            .with_property("GatewayId", Value::reference("InternetGateway"));

        assert_eq!(
            serde_json::to_value(&route).unwrap(),
            json!({
                "DependsOn": "InternetGatewayAttachment",
                "Properties": {
                    "DestinationCidrBlock": "0.0.0.0/0",
                    "GatewayId": {"Ref": "InternetGateway"},
                },
                "Type": "AWS::EC2::Route",
            })
        );
    }

    #[test]
    fn serialize_without_properties_or_dependencies() {
        let igw = Resource::new("InternetGateway", "AWS::EC2::InternetGateway");
        assert_eq!(
            serde_json::to_value(&igw).unwrap(),
            json!({"Type": "AWS::EC2::InternetGateway"})
        );
    }

    #[test]
    fn serialize_multiple_dependencies_as_list() {
        let instance = Resource::new("Ec2Instance", "AWS::EC2::Instance")
            .with_depends_on("A")
            .with_depends_on("B");
        assert_eq!(
            serde_json::to_value(&instance).unwrap()["DependsOn"],
            json!(["A", "B"])
        );
    }

    #[test]
    fn deserialize_both_depends_on_forms() {
        let one: Resource = serde_json::from_value(json!({
            "Type": "AWS::EC2::Route",
            "DependsOn": "InternetGatewayAttachment",
        }))
        .unwrap();
        assert_eq!(one.depends_on, vec!["InternetGatewayAttachment"]);
        assert!(one.properties.is_empty());

        let many: Resource = serde_json::from_value(json!({
            "Type": "AWS::EC2::Route",
            "DependsOn": ["A", "B"],
            "Properties": {"RouteTableId": {"Ref": "RouteTable"}},
        }))
        .unwrap();
        assert_eq!(many.depends_on, vec!["A", "B"]);
        assert_eq!(
            many.property("RouteTableId"),
            Some(&Value::reference("RouteTable"))
        );
    }
}
