//! eip schema definition
//!
//! CloudFormation type: AWS::EC2::EIP

use super::{AwsSchemaConfig, enum_type};
use strata_core::schema::{AttributeSchema, AttributeType, ResourceSchema};

const VALID_DOMAIN: &[&str] = &["vpc", "standard"];

/// Returns the schema config for AWS::EC2::EIP
pub fn ec2_eip_config() -> AwsSchemaConfig {
    AwsSchemaConfig {
        aws_type_name: "AWS::EC2::EIP",
        has_tags: true,
        schema: ResourceSchema::new("AWS::EC2::EIP")
        .with_description("Specifies an Elastic IP (EIP) address and can, optionally, associate it with an Amazon EC2 instance.")
        .attribute(
            AttributeSchema::new("Domain", enum_type(VALID_DOMAIN))
                .with_description("The network (``vpc``)."),
        )
        .attribute(
            AttributeSchema::new("InstanceId", AttributeType::String)
                .with_description("The ID of the instance."),
        )
        .attribute(
            AttributeSchema::new("NetworkBorderGroup", AttributeType::String)
                .with_description("A unique set of Availability Zones, Local Zones, or Wavelength Zones from which AWS advertises IP addresses."),
        )
        .attribute(
            AttributeSchema::new("PublicIpv4Pool", AttributeType::String)
                .with_description("The ID of an address pool that you own."),
        )
        .attribute(
            AttributeSchema::new("TransferAddress", AttributeType::String)
                .with_description("The Elastic IP address you are accepting for transfer."),
        ),
    }
}
