//! internet_gateway schema definition
//!
//! CloudFormation type: AWS::EC2::InternetGateway

use super::AwsSchemaConfig;
use strata_core::schema::ResourceSchema;

/// Returns the schema config for AWS::EC2::InternetGateway
pub fn ec2_internet_gateway_config() -> AwsSchemaConfig {
    AwsSchemaConfig {
        aws_type_name: "AWS::EC2::InternetGateway",
        has_tags: true,
        schema: ResourceSchema::new("AWS::EC2::InternetGateway")
            .with_description("Allocates an internet gateway for use with a VPC."),
    }
}
