//! network_acl schema definition
//!
//! CloudFormation type: AWS::EC2::NetworkAcl

use super::AwsSchemaConfig;
use strata_core::schema::{AttributeSchema, AttributeType, ResourceSchema};

/// Returns the schema config for AWS::EC2::NetworkAcl
pub fn ec2_network_acl_config() -> AwsSchemaConfig {
    AwsSchemaConfig {
        aws_type_name: "AWS::EC2::NetworkAcl",
        has_tags: true,
        schema: ResourceSchema::new("AWS::EC2::NetworkAcl")
        .with_description("Specifies a network ACL for your VPC.")
        .attribute(
            AttributeSchema::new("VpcId", AttributeType::String)
                .required()
                .with_description("The ID of the VPC for the network ACL."),
        ),
    }
}
