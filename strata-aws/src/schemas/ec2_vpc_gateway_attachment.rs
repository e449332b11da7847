//! vpc_gateway_attachment schema definition
//!
//! CloudFormation type: AWS::EC2::VPCGatewayAttachment

use super::AwsSchemaConfig;
use strata_core::schema::{AttributeSchema, AttributeType, ResourceSchema};

/// Returns the schema config for AWS::EC2::VPCGatewayAttachment
pub fn ec2_vpc_gateway_attachment_config() -> AwsSchemaConfig {
    AwsSchemaConfig {
        aws_type_name: "AWS::EC2::VPCGatewayAttachment",
        has_tags: false,
        schema: ResourceSchema::new("AWS::EC2::VPCGatewayAttachment")
        .with_description("Attaches an internet gateway, or a virtual private gateway to a VPC, enabling connectivity between the internet and the VPC.")
        .attribute(
            AttributeSchema::new("InternetGatewayId", AttributeType::String)
                .with_description("The ID of the internet gateway. You must specify either InternetGatewayId or VpnGatewayId, but not both."),
        )
        .attribute(
            AttributeSchema::new("VpcId", AttributeType::String)
                .required()
                .with_description("The ID of the VPC."),
        )
        .attribute(
            AttributeSchema::new("VpnGatewayId", AttributeType::String)
                .with_description("The ID of the virtual private gateway."),
        ),
    }
}
