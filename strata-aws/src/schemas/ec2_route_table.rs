//! route_table schema definition
//!
//! CloudFormation type: AWS::EC2::RouteTable

use super::AwsSchemaConfig;
use strata_core::schema::{AttributeSchema, AttributeType, ResourceSchema};

/// Returns the schema config for AWS::EC2::RouteTable
pub fn ec2_route_table_config() -> AwsSchemaConfig {
    AwsSchemaConfig {
        aws_type_name: "AWS::EC2::RouteTable",
        has_tags: true,
        schema: ResourceSchema::new("AWS::EC2::RouteTable")
        .with_description("Specifies a route table for the specified VPC.")
        .attribute(
            AttributeSchema::new("VpcId", AttributeType::String)
                .required()
                .with_description("The ID of the VPC."),
        ),
    }
}
