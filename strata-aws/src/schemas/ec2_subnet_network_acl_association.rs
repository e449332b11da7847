//! subnet_network_acl_association schema definition
//!
//! CloudFormation type: AWS::EC2::SubnetNetworkAclAssociation

use super::AwsSchemaConfig;
use strata_core::schema::{AttributeSchema, AttributeType, ResourceSchema};

/// Returns the schema config for AWS::EC2::SubnetNetworkAclAssociation
pub fn ec2_subnet_network_acl_association_config() -> AwsSchemaConfig {
    AwsSchemaConfig {
        aws_type_name: "AWS::EC2::SubnetNetworkAclAssociation",
        has_tags: false,
        schema: ResourceSchema::new("AWS::EC2::SubnetNetworkAclAssociation")
        .with_description("Associates a subnet with a network ACL.")
        .attribute(
            AttributeSchema::new("NetworkAclId", AttributeType::String)
                .required()
                .with_description("The ID of the network ACL."),
        )
        .attribute(
            AttributeSchema::new("SubnetId", AttributeType::String)
                .required()
                .with_description("The ID of the subnet."),
        ),
    }
}
