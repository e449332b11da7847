//! subnet_route_table_association schema definition
//!
//! CloudFormation type: AWS::EC2::SubnetRouteTableAssociation

use super::AwsSchemaConfig;
use strata_core::schema::{AttributeSchema, AttributeType, ResourceSchema};

/// Returns the schema config for AWS::EC2::SubnetRouteTableAssociation
pub fn ec2_subnet_route_table_association_config() -> AwsSchemaConfig {
    AwsSchemaConfig {
        aws_type_name: "AWS::EC2::SubnetRouteTableAssociation",
        has_tags: false,
        schema: ResourceSchema::new("AWS::EC2::SubnetRouteTableAssociation")
        .with_description("Associates a subnet with a route table.")
        .attribute(
            AttributeSchema::new("RouteTableId", AttributeType::String)
                .required()
                .with_description("The ID of the route table."),
        )
        .attribute(
            AttributeSchema::new("SubnetId", AttributeType::String)
                .required()
                .with_description("The ID of the subnet."),
        ),
    }
}
