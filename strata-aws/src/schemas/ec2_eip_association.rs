//! eip_association schema definition
//!
//! CloudFormation type: AWS::EC2::EIPAssociation

use super::AwsSchemaConfig;
use strata_core::schema::{AttributeSchema, AttributeType, ResourceSchema};

/// Returns the schema config for AWS::EC2::EIPAssociation
pub fn ec2_eip_association_config() -> AwsSchemaConfig {
    AwsSchemaConfig {
        aws_type_name: "AWS::EC2::EIPAssociation",
        has_tags: false,
        schema: ResourceSchema::new("AWS::EC2::EIPAssociation")
        .with_description("Associates an Elastic IP address with an instance or a network interface.")
        .attribute(
            AttributeSchema::new("AllocationId", AttributeType::String)
                .with_description("The allocation ID. This is required for EC2-VPC."),
        )
        .attribute(
            AttributeSchema::new("EIP", AttributeType::String)
                .with_description("The Elastic IP address to associate with the instance."),
        )
        .attribute(
            AttributeSchema::new("InstanceId", AttributeType::String)
                .with_description("The ID of the instance."),
        )
        .attribute(
            AttributeSchema::new("NetworkInterfaceId", AttributeType::String)
                .with_description("The ID of the network interface."),
        )
        .attribute(
            AttributeSchema::new("PrivateIpAddress", AttributeType::String)
                .with_description("The primary or secondary private IP address to associate with the Elastic IP address."),
        ),
    }
}
