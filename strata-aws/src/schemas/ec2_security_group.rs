//! security_group schema definition
//!
//! CloudFormation type: AWS::EC2::SecurityGroup

use super::{AwsSchemaConfig, validate_int_range};
use strata_core::schema::{AttributeSchema, AttributeType, ResourceSchema, types};
use strata_core::value::Value;

const PROTOCOL_NAMES: &[&str] = &["tcp", "udp", "icmp", "icmpv6", "-1"];

/// IP protocol: a name, `-1` for all, or a protocol number
pub fn ip_protocol() -> AttributeType {
    AttributeType::Custom {
        name: "IpProtocol".to_string(),
        base: Box::new(AttributeType::String),
        validate: validate_ip_protocol,
    }
}

fn validate_ip_protocol(value: &Value) -> Result<(), String> {
    if let Some(name) = value.as_str()
        && PROTOCOL_NAMES.contains(&name)
    {
        return Ok(());
    }
    match value.as_int() {
        Some(-1) => Ok(()),
        Some(_) => validate_int_range(value, 0, 255, "Protocol number"),
        None => Err(format!(
            "Invalid IP protocol '{}', expected one of {} or a protocol number",
            value.as_str().unwrap_or_default(),
            PROTOCOL_NAMES.join(", ")
        )),
    }
}

fn rule_fields(peer_cidr: &str, peer_group: &str) -> Vec<AttributeSchema> {
    vec![
        AttributeSchema::new(peer_cidr, types::cidr())
            .with_description("The IPv4 address range, in CIDR format."),
        AttributeSchema::new(format!("{}v6", peer_cidr), AttributeType::String)
            .with_description("The IPv6 address range, in CIDR format."),
        AttributeSchema::new("Description", AttributeType::String)
            .with_description("A description for the security group rule."),
        AttributeSchema::new("FromPort", types::port_number())
            .with_description("The start of the port range, or the ICMP type number."),
        AttributeSchema::new("IpProtocol", ip_protocol())
            .required()
            .with_description("The IP protocol name (``tcp``, ``udp``, ``icmp``, ``icmpv6``) or number."),
        AttributeSchema::new(peer_group, AttributeType::String)
            .with_description("The ID of the peer security group."),
        AttributeSchema::new("ToPort", types::port_number())
            .with_description("The end of the port range, or the ICMP code."),
    ]
}

fn ingress_type() -> AttributeType {
    let mut fields = rule_fields("CidrIp", "SourceSecurityGroupId");
    fields.push(
        AttributeSchema::new("SourcePrefixListId", AttributeType::String)
            .with_description("The ID of a prefix list."),
    );
    AttributeType::Struct {
        name: "Ingress".to_string(),
        fields,
    }
}

fn egress_type() -> AttributeType {
    let mut fields = rule_fields("CidrIp", "DestinationSecurityGroupId");
    fields.push(
        AttributeSchema::new("DestinationPrefixListId", AttributeType::String)
            .with_description("The prefix list IDs for an AWS service."),
    );
    AttributeType::Struct {
        name: "Egress".to_string(),
        fields,
    }
}

/// Returns the schema config for AWS::EC2::SecurityGroup
pub fn ec2_security_group_config() -> AwsSchemaConfig {
    AwsSchemaConfig {
        aws_type_name: "AWS::EC2::SecurityGroup",
        has_tags: true,
        schema: ResourceSchema::new("AWS::EC2::SecurityGroup")
        .with_description("Specifies a security group.")
        .attribute(
            AttributeSchema::new("GroupDescription", AttributeType::String)
                .required()
                .with_description("A description for the security group."),
        )
        .attribute(
            AttributeSchema::new("GroupName", AttributeType::String)
                .with_description("The name of the security group."),
        )
        .attribute(
            AttributeSchema::new("SecurityGroupEgress", AttributeType::List(Box::new(egress_type())))
                .with_description("The outbound rules associated with the security group."),
        )
        .attribute(
            AttributeSchema::new("SecurityGroupIngress", AttributeType::List(Box::new(ingress_type())))
                .with_description("The inbound rules associated with the security group."),
        )
        .attribute(
            AttributeSchema::new("VpcId", AttributeType::String)
                .with_description("The ID of the VPC for the security group."),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn rule(protocol: &str, from: i64, to: i64, cidr: Value) -> Value {
        Value::Map(BTreeMap::from([
            ("IpProtocol".to_string(), Value::from(protocol)),
            ("FromPort".to_string(), Value::Int(from)),
            ("ToPort".to_string(), Value::Int(to)),
            ("CidrIp".to_string(), cidr),
        ]))
    }

    #[test]
    fn protocol_names_and_numbers() {
        for ok in ["tcp", "udp", "icmp", "icmpv6", "-1", "6", "255"] {
            assert!(validate_ip_protocol(&Value::from(ok)).is_ok(), "{}", ok);
        }
        assert!(validate_ip_protocol(&Value::Int(-1)).is_ok());
        assert!(validate_ip_protocol(&Value::Int(17)).is_ok());
        assert!(validate_ip_protocol(&Value::Int(-2)).is_err());
        assert!(validate_ip_protocol(&Value::from("256")).is_err());
        assert!(validate_ip_protocol(&Value::from("sctp")).is_err());
    }

    #[test]
    fn ssh_and_service_rules() {
        let schema = ec2_security_group_config().into_schema();
        let props = BTreeMap::from([
            ("GroupDescription".to_string(), Value::from("Enable Inbound Access")),
            (
                "SecurityGroupIngress".to_string(),
                Value::List(vec![
                    rule("tcp", 22, 22, Value::reference("SSHLocation")),
                    rule("tcp", 8888, 8898, Value::from("0.0.0.0/0")),
                ]),
            ),
        ]);
        assert!(schema.validate(&props).is_ok());
    }

    #[test]
    fn rejects_bad_rule() {
        let schema = ec2_security_group_config().into_schema();
        let props = BTreeMap::from([
            ("GroupDescription".to_string(), Value::from("sg")),
            (
                "SecurityGroupEgress".to_string(),
                Value::List(vec![rule("tcp", 0, 70000, Value::from("0.0.0.0/33"))]),
            ),
        ]);
        let errors = schema.validate(&props).unwrap_err();
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn group_description_is_required() {
        let schema = ec2_security_group_config().into_schema();
        assert!(schema.validate(&BTreeMap::new()).is_err());
    }
}
