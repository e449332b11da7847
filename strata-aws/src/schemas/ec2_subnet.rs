//! subnet schema definition
//!
//! CloudFormation type: AWS::EC2::Subnet

use super::AwsSchemaConfig;
use strata_core::schema::{AttributeSchema, AttributeType, ResourceSchema, types};

/// Returns the schema config for AWS::EC2::Subnet
pub fn ec2_subnet_config() -> AwsSchemaConfig {
    AwsSchemaConfig {
        aws_type_name: "AWS::EC2::Subnet",
        has_tags: true,
        schema: ResourceSchema::new("AWS::EC2::Subnet")
        .with_description("Specifies a subnet for the specified VPC.")
        .attribute(
            AttributeSchema::new("AssignIpv6AddressOnCreation", AttributeType::Bool)
                .with_description("Indicates whether a network interface created in this subnet receives an IPv6 address."),
        )
        .attribute(
            AttributeSchema::new("AvailabilityZone", AttributeType::String)
                .with_description("The Availability Zone of the subnet."),
        )
        .attribute(
            AttributeSchema::new("AvailabilityZoneId", AttributeType::String)
                .with_description("The AZ ID of the subnet."),
        )
        .attribute(
            AttributeSchema::new("CidrBlock", types::cidr())
                .with_description("The IPv4 CIDR block assigned to the subnet."),
        )
        .attribute(
            AttributeSchema::new("Ipv6CidrBlock", AttributeType::String)
                .with_description("The IPv6 CIDR block."),
        )
        .attribute(
            AttributeSchema::new("MapPublicIpOnLaunch", AttributeType::Bool)
                .with_description("Indicates whether instances launched in this subnet receive a public IPv4 address."),
        )
        .attribute(
            AttributeSchema::new("VpcId", AttributeType::String)
                .required()
                .with_description("The ID of the VPC the subnet is in."),
        ),
    }
}
