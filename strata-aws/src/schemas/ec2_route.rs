//! route schema definition
//!
//! CloudFormation type: AWS::EC2::Route

use super::AwsSchemaConfig;
use strata_core::schema::{AttributeSchema, AttributeType, ResourceSchema, types};

/// Route targets; each is a plain ID string
const TARGET_IDS: &[(&str, &str)] = &[
    ("CarrierGatewayId", "The ID of the carrier gateway."),
    ("CoreNetworkArn", "The Amazon Resource Name (ARN) of the core network."),
    ("EgressOnlyInternetGatewayId", "[IPv6 traffic only] The ID of an egress-only internet gateway."),
    ("GatewayId", "The ID of an internet gateway or virtual private gateway attached to your VPC."),
    ("InstanceId", "The ID of a NAT instance in your VPC."),
    ("LocalGatewayId", "The ID of the local gateway."),
    ("NatGatewayId", "[IPv4 traffic only] The ID of a NAT gateway."),
    ("NetworkInterfaceId", "The ID of a network interface."),
    ("TransitGatewayId", "The ID of a transit gateway."),
    ("VpcEndpointId", "The ID of a VPC endpoint. Supported for Gateway Load Balancer endpoints only."),
    ("VpcPeeringConnectionId", "The ID of a VPC peering connection."),
];

/// Returns the schema config for AWS::EC2::Route
pub fn ec2_route_config() -> AwsSchemaConfig {
    let schema = ResourceSchema::new("AWS::EC2::Route")
        .with_description("Specifies a route in a route table.")
        .attribute(
            AttributeSchema::new("DestinationCidrBlock", types::cidr())
                .with_description("The IPv4 CIDR address block used for the destination match."),
        )
        .attribute(
            AttributeSchema::new("DestinationIpv6CidrBlock", AttributeType::String)
                .with_description("The IPv6 CIDR block used for the destination match."),
        )
        .attribute(
            AttributeSchema::new("DestinationPrefixListId", AttributeType::String)
                .with_description("The ID of a prefix list used for the destination match."),
        )
        .attribute(
            AttributeSchema::new("RouteTableId", AttributeType::String)
                .required()
                .with_description("The ID of the route table for the route."),
        );

    AwsSchemaConfig {
        aws_type_name: "AWS::EC2::Route",
        has_tags: false,
        schema: TARGET_IDS.iter().fold(schema, |schema, (name, description)| {
            schema.attribute(
                AttributeSchema::new(*name, AttributeType::String).with_description(*description),
            )
        }),
    }
}
