//! AWS resource schemas
//!
//! Property names and constraints follow the CloudFormation resource
//! reference for each type.

use strata_core::value::Value;
use strata_core::schema::{AttributeSchema, AttributeType, ResourceSchema, SchemaRegistry};

/// AWS schema configuration
///
/// Combines the ResourceSchema with AWS-specific metadata.
pub struct AwsSchemaConfig {
    /// AWS CloudFormation type name (e.g., "AWS::EC2::VPC")
    pub aws_type_name: &'static str,
    /// Whether this resource type accepts a `Tags` property
    pub has_tags: bool,
    /// The resource schema with attribute definitions
    pub schema: ResourceSchema,
}

impl AwsSchemaConfig {
    /// Final schema, with the shared `Tags` property added for taggable types
    pub fn into_schema(self) -> ResourceSchema {
        if self.has_tags {
            self.schema.attribute(
                AttributeSchema::new("Tags", tags_type())
                    .with_description("Key-value pairs attached to the resource."),
            )
        } else {
            self.schema
        }
    }
}

/// Tags type for AWS resources: a list of `{Key, Value}` pairs
pub fn tags_type() -> AttributeType {
    AttributeType::List(Box::new(AttributeType::Struct {
        name: "Tag".to_string(),
        fields: vec![
            AttributeSchema::new("Key", AttributeType::String).required(),
            AttributeSchema::new("Value", AttributeType::String).required(),
        ],
    }))
}

/// List of plain strings (IDs, names, records)
pub fn string_list() -> AttributeType {
    AttributeType::List(Box::new(AttributeType::String))
}

/// Build an enum type from a static list of values
pub fn enum_type(values: &[&str]) -> AttributeType {
    AttributeType::Enum(values.iter().map(|v| v.to_string()).collect())
}

/// Validate an integer literal against an inclusive range
pub fn validate_int_range(value: &Value, min: i64, max: i64, what: &str) -> Result<(), String> {
    match value.as_int() {
        Some(n) if (min..=max).contains(&n) => Ok(()),
        Some(n) => Err(format!("{} {} must be between {} and {}", what, n, min, max)),
        None => Err("Expected integer".to_string()),
    }
}

pub mod ec2_eip;
pub mod ec2_eip_association;
pub mod ec2_instance;
pub mod ec2_internet_gateway;
pub mod ec2_network_acl;
pub mod ec2_network_acl_entry;
pub mod ec2_route;
pub mod ec2_route_table;
pub mod ec2_security_group;
pub mod ec2_subnet;
pub mod ec2_subnet_network_acl_association;
pub mod ec2_subnet_route_table_association;
pub mod ec2_vpc;
pub mod ec2_vpc_gateway_attachment;
pub mod route53_record_set;

/// Returns all schema configs
pub fn configs() -> Vec<AwsSchemaConfig> {
    vec![
        ec2_vpc::ec2_vpc_config(),
        ec2_subnet::ec2_subnet_config(),
        ec2_internet_gateway::ec2_internet_gateway_config(),
        ec2_vpc_gateway_attachment::ec2_vpc_gateway_attachment_config(),
        ec2_route_table::ec2_route_table_config(),
        ec2_route::ec2_route_config(),
        ec2_subnet_route_table_association::ec2_subnet_route_table_association_config(),
        ec2_network_acl::ec2_network_acl_config(),
        ec2_network_acl_entry::ec2_network_acl_entry_config(),
        ec2_subnet_network_acl_association::ec2_subnet_network_acl_association_config(),
        ec2_security_group::ec2_security_group_config(),
        ec2_instance::ec2_instance_config(),
        ec2_eip::ec2_eip_config(),
        ec2_eip_association::ec2_eip_association_config(),
        route53_record_set::route53_record_set_config(),
    ]
}

/// Returns all schemas
pub fn all_schemas() -> Vec<ResourceSchema> {
    configs().into_iter().map(AwsSchemaConfig::into_schema).collect()
}

/// Registry of every AWS schema, keyed by CloudFormation type name
pub fn registry() -> SchemaRegistry {
    all_schemas().into_iter().collect()
}
