//! Template - The document assembled from parameters, resources and outputs

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::parameter::Parameter;
use crate::resource::Resource;
use crate::value::Value;

/// The only template format version CloudFormation defines
pub const FORMAT_VERSION: &str = "2010-09-09";

/// Longest logical ID CloudFormation accepts
pub const MAX_LOGICAL_ID_LEN: usize = 255;

/// Error raised while assembling a template
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TemplateError {
    #[error("Duplicate logical ID '{name}' in {section}")]
    DuplicateLogicalId { section: &'static str, name: String },

    #[error("Invalid logical ID '{0}': must be 1-255 ASCII letters or digits")]
    InvalidLogicalId(String),

    #[error("Invalid parameter type '{0}'")]
    InvalidParameterType(String),
}

/// Check that a logical ID is non-empty, alphanumeric and short enough
pub fn check_logical_id(name: &str) -> Result<(), TemplateError> {
    if !name.is_empty()
        && name.len() <= MAX_LOGICAL_ID_LEN
        && name.chars().all(|c| c.is_ascii_alphanumeric())
    {
        Ok(())
    } else {
        Err(TemplateError::InvalidLogicalId(name.to_string()))
    }
}

/// Name of something added to a template, used to build references to it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Handle {
    name: String,
}

impl Handle {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// `{"Ref": name}`
    pub fn reference(&self) -> Value {
        Value::reference(&self.name)
    }

    /// `{"Fn::GetAtt": [name, attribute]}`
    pub fn get_att(&self, attribute: &str) -> Value {
        Value::get_att(&self.name, attribute)
    }
}

/// Cross-stack export of an output value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Export {
    pub name: Value,
}

/// A value reported by the stack after deployment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Output {
    #[serde(skip)]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub value: Value,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export: Option<Export>,
}

impl Output {
    pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            description: None,
            value: value.into(),
            export: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_export(mut self, name: impl Into<Value>) -> Self {
        self.export = Some(Export { name: name.into() });
        self
    }
}

/// A CloudFormation template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    #[serde(
        rename = "AWSTemplateFormatVersion",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub version: Option<String>,

    #[serde(rename = "Description", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(rename = "Parameters", default, skip_serializing_if = "BTreeMap::is_empty")]
    parameters: BTreeMap<String, Parameter>,

    #[serde(rename = "Resources")]
    resources: BTreeMap<String, Resource>,

    #[serde(rename = "Outputs", default, skip_serializing_if = "BTreeMap::is_empty")]
    outputs: BTreeMap<String, Output>,
}

impl Default for Template {
    fn default() -> Self {
        Self::new()
    }
}

impl Template {
    pub fn new() -> Self {
        Self {
            version: Some(FORMAT_VERSION.to_string()),
            description: None,
            parameters: BTreeMap::new(),
            resources: BTreeMap::new(),
            outputs: BTreeMap::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Add a parameter. Parameters and resources share one namespace, since
    /// a `Ref` must resolve unambiguously.
    pub fn add_parameter(&mut self, parameter: Parameter) -> Result<Handle, TemplateError> {
        self.check_new_name("Parameters", &parameter.name)?;
        let name = parameter.name.clone();
        self.parameters.insert(name.clone(), parameter);
        Ok(Handle { name })
    }

    pub fn add_resource(&mut self, resource: Resource) -> Result<Handle, TemplateError> {
        self.check_new_name("Resources", &resource.logical_id)?;
        let name = resource.logical_id.clone();
        log::debug!("Declared {} ({})", name, resource.resource_type);
        self.resources.insert(name.clone(), resource);
        Ok(Handle { name })
    }

    /// Add an output. Outputs cannot be referenced from inside the
    /// template, so no handle is returned.
    pub fn add_output(&mut self, output: Output) -> Result<(), TemplateError> {
        check_logical_id(&output.name)?;
        if self.outputs.contains_key(&output.name) {
            return Err(TemplateError::DuplicateLogicalId {
                section: "Outputs",
                name: output.name,
            });
        }
        self.outputs.insert(output.name.clone(), output);
        Ok(())
    }

    pub fn add_outputs(
        &mut self,
        outputs: impl IntoIterator<Item = Output>,
    ) -> Result<(), TemplateError> {
        for output in outputs {
            self.add_output(output)?;
        }
        Ok(())
    }

    fn check_new_name(&self, section: &'static str, name: &str) -> Result<(), TemplateError> {
        check_logical_id(name)?;
        if self.parameters.contains_key(name) || self.resources.contains_key(name) {
            return Err(TemplateError::DuplicateLogicalId {
                section,
                name: name.to_string(),
            });
        }
        Ok(())
    }

    pub fn parameters(&self) -> &BTreeMap<String, Parameter> {
        &self.parameters
    }

    pub fn resources(&self) -> &BTreeMap<String, Resource> {
        &self.resources
    }

    pub fn outputs(&self) -> &BTreeMap<String, Output> {
        &self.outputs
    }

    pub fn parameter(&self, name: &str) -> Option<&Parameter> {
        self.parameters.get(name)
    }

    pub fn resource(&self, logical_id: &str) -> Option<&Resource> {
        self.resources.get(logical_id)
    }

    pub fn output(&self, name: &str) -> Option<&Output> {
        self.outputs.get(name)
    }

    /// Copy section keys into the entries' name fields after deserializing
    pub(crate) fn restore_names(&mut self) {
        for (name, parameter) in &mut self.parameters {
            parameter.name.clone_from(name);
        }
        for (name, resource) in &mut self.resources {
            resource.logical_id.clone_from(name);
        }
        for (name, output) in &mut self.outputs {
            output.name.clone_from(name);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parameter::ParameterType;
    use serde_json::json;

    #[test]
    fn new_template_has_format_version() {
        let template = Template::new();
        assert_eq!(
            serde_json::to_value(&template).unwrap(),
            json!({"AWSTemplateFormatVersion": "2010-09-09", "Resources": {}})
        );
    }

    #[test]
    fn handles_build_references() {
        let mut template = Template::new();
        let key = template
            .add_parameter(Parameter::new(
                "KeyName",
                ParameterType::Aws("AWS::EC2::KeyPair::KeyName".to_string()),
            ))
            .unwrap();
        let instance = template
            .add_resource(
                Resource::new("Ec2Instance", "AWS::EC2::Instance")
                    .with_property("KeyName", key.reference()),
            )
            .unwrap();

        assert_eq!(key.reference(), Value::reference("KeyName"));
        assert_eq!(
            instance.get_att("PublicIp"),
            Value::get_att("Ec2Instance", "PublicIp")
        );
        assert_eq!(
            template.resource("Ec2Instance").unwrap().property("KeyName"),
            Some(&Value::reference("KeyName"))
        );
    }

    #[test]
    fn duplicate_names_are_rejected_across_parameters_and_resources() {
        let mut template = Template::new();
        template.add_parameter(Parameter::string("Subnet")).unwrap();

        let err = template
            .add_resource(Resource::new("Subnet", "AWS::EC2::Subnet"))
            .unwrap_err();
        assert_eq!(
            err,
            TemplateError::DuplicateLogicalId {
                section: "Resources",
                name: "Subnet".to_string()
            }
        );
    }

    #[test]
    fn outputs_have_their_own_namespace() {
        let mut template = Template::new();
        template
            .add_resource(Resource::new("Ec2Instance", "AWS::EC2::Instance"))
            .unwrap();
        assert!(matches!(
            template.add_output(Output::new("Ec2Instance", Value::reference("Ec2Instance"))),
            Ok(())
        ));
        assert_eq!(template.outputs().len(), 1);

        let err = template
            .add_outputs([Output::new("Ec2Instance", "again")])
            .unwrap_err();
        assert!(matches!(
            err,
            TemplateError::DuplicateLogicalId {
                section: "Outputs",
                ..
            }
        ));
    }

    #[test]
    fn invalid_logical_ids() {
        assert!(check_logical_id("Ec2Instance").is_ok());
        assert!(check_logical_id("").is_err());
        assert!(check_logical_id("my-instance").is_err());
        assert!(check_logical_id(&"a".repeat(256)).is_err());

        let mut template = Template::new();
        assert_eq!(
            template.add_resource(Resource::new("bad_id", "AWS::EC2::VPC")),
            Err(TemplateError::InvalidLogicalId("bad_id".to_string()))
        );
    }

    #[test]
    fn output_serialization() {
        let output = Output::new("AZ", Value::get_att("Ec2Instance", "AvailabilityZone"))
            .with_description("Availability Zone of the newly created EC2 instance");
        assert_eq!(
            serde_json::to_value(&output).unwrap(),
            json!({
                "Description": "Availability Zone of the newly created EC2 instance",
                "Value": {"Fn::GetAtt": ["Ec2Instance", "AvailabilityZone"]},
            })
        );

        let exported = Output::new("VpcId", Value::reference("VPC"))
            .with_export(Value::sub("${AWS::StackName}-VpcId"));
        assert_eq!(
            serde_json::to_value(&exported).unwrap()["Export"],
            json!({"Name": {"Fn::Sub": "${AWS::StackName}-VpcId"}})
        );
    }
}
