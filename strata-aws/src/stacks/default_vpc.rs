//! EC2 instance in the account's default VPC, with an Elastic IP and a
//! Route 53 host record

use strata_core::parameter::Parameter;
use strata_core::resource::Resource;
use strata_core::template::{Output, Template, TemplateError};
use strata_core::value::Value;

use super::common::{
    add_instance_parameters, application_tags, instance_ingress, instance_outputs,
    root_block_device,
};
use crate::instance_types::LEGACY_INSTANCE_TYPES;

pub fn build() -> Result<Template, TemplateError> {
    let mut t = Template::new();
    let params = add_instance_parameters(&mut t, LEGACY_INSTANCE_TYPES)?;

    let hosted_zone = t.add_parameter(
        Parameter::string("HostedZone")
            .with_description("The DNS name of an existing Amazon Route 53 hosted zone"),
    )?;
    let host_name = t.add_parameter(
        Parameter::string("HostName").with_description("CNAME to prepend to the HostedZone"),
    )?;

    let security_group = t.add_resource(
        Resource::new("InstanceSecurityGroup", "AWS::EC2::SecurityGroup")
            .with_property("GroupDescription", "Enable Inbound Access")
            .with_property("SecurityGroupIngress", instance_ingress(&params.ssh_location)),
    )?;

    let instance = t.add_resource(
        Resource::new("Ec2Instance", "AWS::EC2::Instance")
            .with_property("InstanceType", params.instance_type.reference())
            .with_property("SecurityGroupIds", vec![security_group.reference()])
            .with_property("ImageId", params.image_id.reference())
            .with_property("KeyName", params.key_name.reference())
            .with_property("BlockDeviceMappings", root_block_device())
            .with_property(
                "Tags",
                application_tags().tag("Network", "Public").tag("Rev", "0.0.3"),
            ),
    )?;

    t.add_resource(
        Resource::new("ec2EIP", "AWS::EC2::EIP")
            .with_property("InstanceId", instance.reference())
            .with_property("Domain", "vpc"),
    )?;

    let record_set = t.add_resource(
        Resource::new("hostRecordSet", "AWS::Route53::RecordSet")
            .with_property(
                "HostedZoneName",
                Value::join("", vec![hosted_zone.reference(), Value::from(".")]),
            )
            .with_property("Comment", "DNS name for my instance.")
            .with_property(
                "Name",
                Value::join(".", vec![host_name.reference(), hosted_zone.reference()]),
            )
            .with_property("Type", "A")
            .with_property("TTL", "900")
            .with_property("ResourceRecords", vec![instance.get_att("PublicIp")]),
    )?;

    t.add_outputs(instance_outputs(&instance))?;
    t.add_output(Output::new("DomainName", record_set.reference()))?;

    Ok(t)
}
