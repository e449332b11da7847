//! network_acl_entry schema definition
//!
//! CloudFormation type: AWS::EC2::NetworkAclEntry

use super::{AwsSchemaConfig, enum_type, validate_int_range};
use strata_core::schema::{AttributeSchema, AttributeType, ResourceSchema, types};

const VALID_RULE_ACTION: &[&str] = &["allow", "deny"];

/// ACL rule number; 32767 and above are reserved
pub fn rule_number() -> AttributeType {
    AttributeType::Custom {
        name: "RuleNumber".to_string(),
        base: Box::new(AttributeType::Int),
        validate: |value| validate_int_range(value, 1, 32766, "Rule number"),
    }
}

/// IP protocol number, `-1` for all protocols
pub fn protocol_number() -> AttributeType {
    AttributeType::Custom {
        name: "ProtocolNumber".to_string(),
        base: Box::new(AttributeType::Int),
        validate: |value| validate_int_range(value, -1, 255, "Protocol number"),
    }
}

/// Returns the schema config for AWS::EC2::NetworkAclEntry
pub fn ec2_network_acl_entry_config() -> AwsSchemaConfig {
    AwsSchemaConfig {
        aws_type_name: "AWS::EC2::NetworkAclEntry",
        has_tags: false,
        schema: ResourceSchema::new("AWS::EC2::NetworkAclEntry")
        .with_description("Specifies an entry, known as a rule, in a network ACL with a rule number you specify.")
        .attribute(
            AttributeSchema::new("CidrBlock", types::cidr())
                .with_description("The IPv4 CIDR range to allow or deny, in CIDR notation."),
        )
        .attribute(
            AttributeSchema::new("Egress", AttributeType::Bool)
                .with_description("Whether this rule applies to egress traffic from the subnet (``true``) or ingress traffic to the subnet (``false``)."),
        )
        .attribute(
            AttributeSchema::new("Icmp", AttributeType::Struct {
                name: "Icmp".to_string(),
                fields: vec![
                    AttributeSchema::new("Code", AttributeType::Int)
                        .with_description("The Internet Control Message Protocol (ICMP) code."),
                    AttributeSchema::new("Type", AttributeType::Int)
                        .with_description("The Internet Control Message Protocol (ICMP) type."),
                ],
            })
                .with_description("The Internet Control Message Protocol (ICMP) code and type. Requires ``Protocol`` 1."),
        )
        .attribute(
            AttributeSchema::new("Ipv6CidrBlock", AttributeType::String)
                .with_description("The IPv6 network range to allow or deny, in CIDR notation."),
        )
        .attribute(
            AttributeSchema::new("NetworkAclId", AttributeType::String)
                .required()
                .with_description("The ID of the ACL for the entry."),
        )
        .attribute(
            AttributeSchema::new("PortRange", AttributeType::Struct {
                name: "PortRange".to_string(),
                fields: vec![
                    AttributeSchema::new("From", types::port_number())
                        .with_description("The first port in the range."),
                    AttributeSchema::new("To", types::port_number())
                        .with_description("The last port in the range."),
                ],
            })
                .with_description("The range of port numbers for the UDP/TCP protocol."),
        )
        .attribute(
            AttributeSchema::new("Protocol", protocol_number())
                .required()
                .with_description("The IP protocol that the rule applies to. You must specify -1 or a protocol number."),
        )
        .attribute(
            AttributeSchema::new("RuleAction", enum_type(VALID_RULE_ACTION))
                .required()
                .with_description("Whether to allow or deny traffic that matches the rule."),
        )
        .attribute(
            AttributeSchema::new("RuleNumber", rule_number())
                .required()
                .with_description("Rule number to assign to the entry, such as 100. ACL entries are processed in ascending order by rule number."),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use strata_core::value::Value;

    fn entry(rule: i64, protocol: i64, action: &str) -> BTreeMap<String, Value> {
        BTreeMap::from([
            ("NetworkAclId".to_string(), Value::reference("NetworkAcl")),
            ("RuleNumber".to_string(), Value::Int(rule)),
            ("Protocol".to_string(), Value::Int(protocol)),
            ("RuleAction".to_string(), Value::from(action)),
            ("Egress".to_string(), Value::Bool(false)),
            ("CidrBlock".to_string(), Value::from("0.0.0.0/0")),
            (
                "PortRange".to_string(),
                Value::Map(BTreeMap::from([
                    ("From".to_string(), Value::Int(80)),
                    ("To".to_string(), Value::Int(80)),
                ])),
            ),
        ])
    }

    #[test]
    fn accepts_http_entry() {
        let schema = ec2_network_acl_entry_config().into_schema();
        assert!(schema.validate(&entry(100, -1, "allow")).is_ok());
    }

    #[test]
    fn rejects_reserved_rule_number() {
        let schema = ec2_network_acl_entry_config().into_schema();
        let errors = schema.validate(&entry(32767, -1, "allow")).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].to_string().contains("32767"));
    }

    #[test]
    fn rejects_protocol_and_action() {
        let schema = ec2_network_acl_entry_config().into_schema();
        let errors = schema.validate(&entry(100, 300, "block")).unwrap_err();
        assert_eq!(errors.len(), 2);
    }
}
