//! EC2 instance in a dedicated VPC with its own public subnet, routing and
//! network ACL

use strata_core::resource::Resource;
use strata_core::template::{Handle, Template, TemplateError};

use super::common::{
    ANYWHERE, add_instance_parameters, application_tags, instance_ingress, instance_outputs,
    port_range, public_network_tags, root_block_device, tcp_rule,
};
use crate::instance_types::LEGACY_INSTANCE_TYPES;

const VPC_CIDR: &str = "10.0.0.0/16";
const SUBNET_CIDR: &str = "10.0.0.0/24";

/// Instance types offered by this stack; p2.xlarge is left out
fn instance_types() -> Vec<&'static str> {
    LEGACY_INSTANCE_TYPES
        .iter()
        .copied()
        .filter(|t| *t != "p2.xlarge")
        .collect()
}

/// (logical id, rule number, egress, from port, to port)
const ACL_ENTRIES: &[(&str, i64, bool, i64, i64)] = &[
    ("InboundHTTPNetworkAclEntry", 100, false, 80, 80),
    ("InboundHTTPSNetworkAclEntry", 110, false, 443, 443),
    ("InboundSSHNetworkAclEntry", 120, false, 22, 22),
    ("InboundEphemeralNetworkAclEntry", 130, false, 8888, 8898),
    ("OutboundHTTPNetworkAclEntry", 100, true, 0, 65535),
];

fn add_acl_entries(t: &mut Template, acl: &Handle) -> Result<(), TemplateError> {
    for &(id, rule_number, egress, from, to) in ACL_ENTRIES {
        t.add_resource(
            Resource::new(id, "AWS::EC2::NetworkAclEntry")
                .with_property("NetworkAclId", acl.reference())
                .with_property("RuleNumber", rule_number)
                .with_property("Protocol", -1_i64)
                .with_property("RuleAction", "allow")
                .with_property("Egress", egress)
                .with_property("CidrBlock", ANYWHERE)
                .with_property("PortRange", port_range(from, to)),
        )?;
    }
    Ok(())
}

pub fn build() -> Result<Template, TemplateError> {
    let mut t = Template::new();
    let params = add_instance_parameters(&mut t, &instance_types())?;

    let vpc = t.add_resource(
        Resource::new("VPC", "AWS::EC2::VPC")
            .with_property("CidrBlock", VPC_CIDR)
            .with_property("EnableDnsSupport", true)
            .with_property("EnableDnsHostnames", true)
            .with_property("Tags", public_network_tags()),
    )?;

    let gateway = t.add_resource(
        Resource::new("InternetGateway", "AWS::EC2::InternetGateway")
            .with_property("Tags", application_tags()),
    )?;

    let attachment = t.add_resource(
        Resource::new("InternetGatewayAttachment", "AWS::EC2::VPCGatewayAttachment")
            .with_property("VpcId", vpc.reference())
            .with_property("InternetGatewayId", gateway.reference()),
    )?;

    let subnet = t.add_resource(
        Resource::new("Subnet", "AWS::EC2::Subnet")
            .with_property("CidrBlock", SUBNET_CIDR)
            .with_property("VpcId", vpc.reference())
            .with_property("Tags", public_network_tags()),
    )?;

    let route_table = t.add_resource(
        Resource::new("RouteTable", "AWS::EC2::RouteTable")
            .with_property("VpcId", vpc.reference())
            .with_property("Tags", public_network_tags()),
    )?;

    t.add_resource(
        Resource::new("SubnetRouteTableAssociation", "AWS::EC2::SubnetRouteTableAssociation")
            .with_property("SubnetId", subnet.reference())
            .with_property("RouteTableId", route_table.reference()),
    )?;

    // The route needs the gateway attached before it can target it
    t.add_resource(
        Resource::new("Route", "AWS::EC2::Route")
            .with_depends_on(attachment.name())
            .with_property("GatewayId", gateway.reference())
            .with_property("DestinationCidrBlock", ANYWHERE)
            .with_property("RouteTableId", route_table.reference()),
    )?;

    let acl = t.add_resource(
        Resource::new("NetworkAcl", "AWS::EC2::NetworkAcl")
            .with_property("VpcId", vpc.reference())
            .with_property("Tags", public_network_tags()),
    )?;
    add_acl_entries(&mut t, &acl)?;

    t.add_resource(
        Resource::new("SubnetNetworkAclAssociation", "AWS::EC2::SubnetNetworkAclAssociation")
            .with_property("SubnetId", subnet.reference())
            .with_property("NetworkAclId", acl.reference()),
    )?;

    let security_group = t.add_resource(
        Resource::new("InstanceSecurityGroup", "AWS::EC2::SecurityGroup")
            .with_property("GroupDescription", "Enable SSH access via port 22")
            .with_property("SecurityGroupIngress", instance_ingress(&params.ssh_location))
            .with_property("SecurityGroupEgress", vec![tcp_rule(0, 65535, ANYWHERE)])
            .with_property("VpcId", vpc.reference()),
    )?;

    let instance = t.add_resource(
        Resource::new("Ec2Instance", "AWS::EC2::Instance")
            .with_depends_on(attachment.name())
            .with_property("BlockDeviceMappings", root_block_device())
            .with_property("ImageId", params.image_id.reference())
            .with_property("InstanceType", params.instance_type.reference())
            .with_property("KeyName", params.key_name.reference())
            .with_property("SecurityGroupIds", vec![security_group.reference()])
            .with_property("SubnetId", subnet.reference()),
    )?;

    t.add_outputs(instance_outputs(&instance))?;

    Ok(t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn acl_entries_cover_inbound_and_outbound() {
        let t = build().unwrap();
        let inbound: Vec<_> = ACL_ENTRIES.iter().filter(|e| !e.2).collect();
        assert_eq!(inbound.len(), 4);
        let outbound = t.resource("OutboundHTTPNetworkAclEntry").unwrap();
        assert_eq!(outbound.property("Egress").and_then(|v| v.as_bool()), Some(true));
        assert_eq!(outbound.property("RuleNumber").and_then(|v| v.as_int()), Some(100));
    }

    #[test]
    fn instance_types_skip_p2() {
        let types = instance_types();
        assert_eq!(types.len(), LEGACY_INSTANCE_TYPES.len() - 1);
        assert!(!types.contains(&"p2.xlarge"));
    }
}
