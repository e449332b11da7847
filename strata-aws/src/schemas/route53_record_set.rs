//! record_set schema definition
//!
//! CloudFormation type: AWS::Route53::RecordSet

use super::{AwsSchemaConfig, enum_type, string_list, validate_int_range};
use strata_core::schema::{AttributeSchema, AttributeType, ResourceSchema};

const VALID_RECORD_TYPE: &[&str] = &[
    "A", "AAAA", "CAA", "CNAME", "DS", "HTTPS", "MX", "NAPTR", "NS", "PTR", "SOA", "SPF", "SRV",
    "SSHFP", "SVCB", "TLSA", "TXT",
];

const VALID_FAILOVER: &[&str] = &["PRIMARY", "SECONDARY"];

/// Record TTL in seconds; CloudFormation takes it as a string
pub fn ttl_seconds() -> AttributeType {
    AttributeType::Custom {
        name: "Ttl".to_string(),
        base: Box::new(AttributeType::Int),
        validate: |value| validate_int_range(value, 0, 2_147_483_647, "TTL"),
    }
}

fn alias_target_type() -> AttributeType {
    AttributeType::Struct {
        name: "AliasTarget".to_string(),
        fields: vec![
            AttributeSchema::new("DNSName", AttributeType::String)
                .required()
                .with_description("The DNS name of the AWS resource the alias points to."),
            AttributeSchema::new("EvaluateTargetHealth", AttributeType::Bool)
                .with_description("Whether the alias inherits the health of the referenced AWS resource."),
            AttributeSchema::new("HostedZoneId", AttributeType::String)
                .required()
                .with_description("The hosted zone ID of the alias target."),
        ],
    }
}

// HostedZoneId and HostedZoneName are mutually exclusive and one is needed;
// the schema cannot express that, so neither is marked required.
/// Returns the schema config for AWS::Route53::RecordSet
pub fn route53_record_set_config() -> AwsSchemaConfig {
    AwsSchemaConfig {
        aws_type_name: "AWS::Route53::RecordSet",
        has_tags: false,
        schema: ResourceSchema::new("AWS::Route53::RecordSet")
        .with_description("Information about the record that you want to create.")
        .attribute(
            AttributeSchema::new("AliasTarget", alias_target_type())
                .with_description("Alias resource record sets only: information about the AWS resource traffic is routed to."),
        )
        .attribute(
            AttributeSchema::new("Comment", AttributeType::String)
                .with_description("Optional: Any comments you want to include about a change batch request."),
        )
        .attribute(
            AttributeSchema::new("Failover", enum_type(VALID_FAILOVER))
                .with_description("Failover resource record sets only."),
        )
        .attribute(
            AttributeSchema::new("HealthCheckId", AttributeType::String)
                .with_description("The ID of the health check to associate with the record."),
        )
        .attribute(
            AttributeSchema::new("HostedZoneId", AttributeType::String)
                .with_description("The ID of the hosted zone that you want to create records in."),
        )
        .attribute(
            AttributeSchema::new("HostedZoneName", AttributeType::String)
                .with_description("The name of the domain for the hosted zone, ending with a trailing dot."),
        )
        .attribute(
            AttributeSchema::new("Name", AttributeType::String)
                .required()
                .with_description("The name of the record that you want to create, update, or delete."),
        )
        .attribute(
            AttributeSchema::new("Region", AttributeType::String)
                .with_description("Latency-based resource record sets only: the Region of the resource."),
        )
        .attribute(
            AttributeSchema::new("ResourceRecords", string_list())
                .with_description("One or more values that correspond with the value that you specified for the ``Type`` property."),
        )
        .attribute(
            AttributeSchema::new("SetIdentifier", AttributeType::String)
                .with_description("An identifier that differentiates among multiple records that have the same name and type."),
        )
        .attribute(
            AttributeSchema::new("TTL", ttl_seconds())
                .with_description("The resource record cache time to live (TTL), in seconds."),
        )
        .attribute(
            AttributeSchema::new("Type", enum_type(VALID_RECORD_TYPE))
                .required()
                .with_description("The DNS record type."),
        )
        .attribute(
            AttributeSchema::new("Weight", AttributeType::Int)
                .with_description("Weighted resource record sets only."),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use strata_core::value::Value;

    #[test]
    fn accepts_string_ttl_and_intrinsics() {
        let schema = route53_record_set_config().into_schema();
        let props = BTreeMap::from([
            (
                "HostedZoneName".to_string(),
                Value::join("", vec![Value::reference("HostedZone"), Value::from(".")]),
            ),
            ("Name".to_string(), Value::from("host.example.com")),
            ("Type".to_string(), Value::from("A")),
            ("TTL".to_string(), Value::from("900")),
            (
                "ResourceRecords".to_string(),
                Value::List(vec![Value::get_att("Ec2Instance", "PublicIp")]),
            ),
        ]);
        assert!(schema.validate(&props).is_ok());
    }

    #[test]
    fn rejects_unknown_record_type() {
        let schema = route53_record_set_config().into_schema();
        let props = BTreeMap::from([
            ("Name".to_string(), Value::from("host.example.com")),
            ("Type".to_string(), Value::from("AA")),
            ("TTL".to_string(), Value::from("soon")),
        ]);
        assert_eq!(schema.validate(&props).unwrap_err().len(), 2);
    }
}
