//! Parameters, resources and outputs shared by both stacks

use std::collections::BTreeMap;

use strata_core::parameter::{Parameter, ParameterType};
use strata_core::template::{Handle, Output, Template, TemplateError};
use strata_core::value::{self, Tags, Value};

use crate::instance_types::DEFAULT_INSTANCE_TYPE;

pub const SSH_LOCATION_PATTERN: &str = r"(\d{1,3})\.(\d{1,3})\.(\d{1,3})\.(\d{1,3})/(\d{1,2})";

pub const DEFAULT_IMAGE_ID: &str = "ami-a9d276c9";

pub const ANYWHERE: &str = "0.0.0.0/0";

/// Handles to the deploy-time parameters every instance needs
pub struct InstanceParameters {
    pub key_name: Handle,
    pub ssh_location: Handle,
    pub instance_type: Handle,
    pub image_id: Handle,
}

/// Declare `KeyName`, `SSHLocation`, `InstanceType` and `ImageId`
pub fn add_instance_parameters(
    template: &mut Template,
    instance_types: &[&str],
) -> Result<InstanceParameters, TemplateError> {
    let key_name = template.add_parameter(
        Parameter::new(
            "KeyName",
            ParameterType::Aws("AWS::EC2::KeyPair::KeyName".to_string()),
        )
        .with_description("Name of an existing EC2 KeyPair to enable SSH access to the instance")
        .with_constraint_description("must be the name of an existing EC2 KeyPair."),
    )?;

    let ssh_location = template.add_parameter(
        Parameter::string("SSHLocation")
            .with_description(" The IP address range that can be used to SSH to the EC2 instances")
            .with_length(9, 18)
            .with_default(ANYWHERE)
            .with_allowed_pattern(SSH_LOCATION_PATTERN)
            .with_constraint_description("must be a valid IP CIDR range of the form x.x.x.x/x."),
    )?;

    let instance_type = template.add_parameter(
        Parameter::string("InstanceType")
            .with_description("EC2 instance type")
            .with_default(DEFAULT_INSTANCE_TYPE)
            .with_allowed_values(instance_types.iter().copied())
            .with_constraint_description("must be a valid EC2 instance type."),
    )?;

    let image_id = template.add_parameter(
        Parameter::string("ImageId")
            .with_description("ImageId to use for the EC2 instance.")
            .with_default(DEFAULT_IMAGE_ID),
    )?;

    Ok(InstanceParameters {
        key_name,
        ssh_location,
        instance_type,
        image_id,
    })
}

/// `Application` tag pointing at the owning stack
pub fn application_tags() -> Tags {
    Tags::new().tag("Application", Value::reference(value::STACK_ID))
}

/// Tags for resources on the public network
pub fn public_network_tags() -> Tags {
    application_tags().tag("Network", "Public")
}

fn map<const N: usize>(entries: [(&str, Value); N]) -> Value {
    Value::Map(
        entries
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect::<BTreeMap<_, _>>(),
    )
}

/// A single 128 GiB gp2 root volume on `/dev/sda1`
pub fn root_block_device() -> Value {
    Value::List(vec![map([
        ("DeviceName", Value::from("/dev/sda1")),
        (
            "Ebs",
            map([
                ("VolumeSize", Value::from("128")),
                ("VolumeType", Value::from("gp2")),
            ]),
        ),
    ])])
}

/// Security group rule; ports are written as strings like the CLI would
pub fn tcp_rule(from_port: u16, to_port: u16, cidr: impl Into<Value>) -> Value {
    map([
        ("IpProtocol", Value::from("tcp")),
        ("FromPort", Value::from(from_port.to_string())),
        ("ToPort", Value::from(to_port.to_string())),
        ("CidrIp", cidr.into()),
    ])
}

/// SSH from `SSHLocation`, plus the 8888-8898 service range from anywhere
pub fn instance_ingress(ssh_location: &Handle) -> Value {
    Value::List(vec![
        tcp_rule(22, 22, ssh_location.reference()),
        tcp_rule(8888, 8898, ANYWHERE),
    ])
}

/// Network ACL port range
pub fn port_range(from: i64, to: i64) -> Value {
    map([("From", Value::Int(from)), ("To", Value::Int(to))])
}

/// Outputs describing the launched instance
pub fn instance_outputs(instance: &Handle) -> Vec<Output> {
    vec![
        Output::new("InstanceId", instance.reference())
            .with_description("InstanceId of the newly created EC2 instance"),
        Output::new("AZ", instance.get_att("AvailabilityZone"))
            .with_description("Availability Zone of the newly created EC2 instance"),
        Output::new("PublicIP", instance.get_att("PublicIp"))
            .with_description("Public IP address of the newly created EC2 instance"),
        Output::new("PrivateIP", instance.get_att("PrivateIp"))
            .with_description("Private IP address of the newly created EC2 instance"),
        Output::new("PublicDNS", instance.get_att("PublicDnsName"))
            .with_description("Public DNSName of the newly created EC2 instance"),
        Output::new("PrivateDNS", instance.get_att("PrivateDnsName"))
            .with_description("Private DNSName of the newly created EC2 instance"),
    ]
}
