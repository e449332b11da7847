//! vpc schema definition
//!
//! CloudFormation type: AWS::EC2::VPC

use super::{AwsSchemaConfig, enum_type};
use strata_core::schema::{AttributeSchema, AttributeType, ResourceSchema, types};

const VALID_INSTANCE_TENANCY: &[&str] = &["default", "dedicated", "host"];

/// Returns the schema config for AWS::EC2::VPC
pub fn ec2_vpc_config() -> AwsSchemaConfig {
    AwsSchemaConfig {
        aws_type_name: "AWS::EC2::VPC",
        has_tags: true,
        schema: ResourceSchema::new("AWS::EC2::VPC")
        .with_description("Specifies a virtual private cloud (VPC).")
        .attribute(
            AttributeSchema::new("CidrBlock", types::cidr())
                .with_description("The IPv4 network range for the VPC, in CIDR notation. For example, ``10.0.0.0/16``."),
        )
        .attribute(
            AttributeSchema::new("EnableDnsHostnames", AttributeType::Bool)
                .with_description("Indicates whether the instances launched in the VPC get DNS hostnames."),
        )
        .attribute(
            AttributeSchema::new("EnableDnsSupport", AttributeType::Bool)
                .with_description("Indicates whether the DNS resolution is supported for the VPC."),
        )
        .attribute(
            AttributeSchema::new("InstanceTenancy", enum_type(VALID_INSTANCE_TENANCY))
                .with_description("The allowed tenancy of instances launched into the VPC."),
        )
        .attribute(
            AttributeSchema::new("Ipv4IpamPoolId", AttributeType::String)
                .with_description("The ID of an IPv4 IPAM pool you want to use for allocating this VPC's CIDR."),
        )
        .attribute(
            AttributeSchema::new("Ipv4NetmaskLength", AttributeType::Int)
                .with_description("The netmask length of the IPv4 CIDR you want to allocate to this VPC from an IPAM pool."),
        ),
    }
}
