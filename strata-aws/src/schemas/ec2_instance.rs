//! instance schema definition
//!
//! CloudFormation type: AWS::EC2::Instance

use super::{AwsSchemaConfig, enum_type, string_list};
use crate::instance_types::is_valid_instance_type;
use strata_core::schema::{AttributeSchema, AttributeType, ResourceSchema, types};

const VALID_VOLUME_TYPE: &[&str] = &["gp2", "gp3", "io1", "io2", "sc1", "st1", "standard"];

const VALID_TENANCY: &[&str] = &["default", "dedicated", "host"];

const VALID_SHUTDOWN_BEHAVIOR: &[&str] = &["stop", "terminate"];

/// Instance type name in `family.size` form
pub fn instance_type() -> AttributeType {
    AttributeType::Custom {
        name: "InstanceType".to_string(),
        base: Box::new(AttributeType::String),
        validate: |value| match value.as_str() {
            Some(s) if is_valid_instance_type(s) => Ok(()),
            Some(s) => Err(format!("'{}' is not a valid EC2 instance type", s)),
            None => Err("Expected string".to_string()),
        },
    }
}

fn ebs_type() -> AttributeType {
    AttributeType::Struct {
        name: "Ebs".to_string(),
        fields: vec![
            AttributeSchema::new("DeleteOnTermination", AttributeType::Bool)
                .with_description("Indicates whether the EBS volume is deleted on instance termination."),
            AttributeSchema::new("Encrypted", AttributeType::Bool)
                .with_description("Indicates whether the volume should be encrypted."),
            AttributeSchema::new("Iops", types::positive_int())
                .with_description("The number of I/O operations per second (IOPS)."),
            AttributeSchema::new("KmsKeyId", AttributeType::String)
                .with_description("The identifier of the KMS key to use for Amazon EBS encryption."),
            AttributeSchema::new("SnapshotId", AttributeType::String)
                .with_description("The ID of the snapshot."),
            AttributeSchema::new("VolumeSize", types::positive_int())
                .with_description("The size of the volume, in GiBs."),
            AttributeSchema::new("VolumeType", enum_type(VALID_VOLUME_TYPE))
                .with_description("The volume type."),
        ],
    }
}

fn block_device_mapping_type() -> AttributeType {
    AttributeType::Struct {
        name: "BlockDeviceMapping".to_string(),
        fields: vec![
            AttributeSchema::new("DeviceName", AttributeType::String)
                .required()
                .with_description("The device name (for example, ``/dev/sdh`` or ``xvdh``)."),
            AttributeSchema::new("Ebs", ebs_type())
                .with_description("Parameters used to automatically set up EBS volumes when the instance is launched."),
            AttributeSchema::new("NoDevice", AttributeType::Map(Box::new(AttributeType::String)))
                .with_description("To omit the device from the block device mapping, specify an empty string."),
            AttributeSchema::new("VirtualName", AttributeType::String)
                .with_description("The virtual device name (``ephemeral``N)."),
        ],
    }
}

fn network_interface_type() -> AttributeType {
    AttributeType::Struct {
        name: "NetworkInterface".to_string(),
        fields: vec![
            AttributeSchema::new("AssociatePublicIpAddress", AttributeType::Bool)
                .with_description("Indicates whether to assign a public IPv4 address to an instance."),
            AttributeSchema::new("DeleteOnTermination", AttributeType::Bool)
                .with_description("If set to ``true``, the interface is deleted when the instance is terminated."),
            AttributeSchema::new("Description", AttributeType::String)
                .with_description("The description of the network interface."),
            AttributeSchema::new("DeviceIndex", AttributeType::String)
                .required()
                .with_description("The position of the network interface in the attachment order."),
            AttributeSchema::new("GroupSet", string_list())
                .with_description("The IDs of the security groups for the network interface."),
            AttributeSchema::new("NetworkInterfaceId", AttributeType::String)
                .with_description("The ID of the network interface, when attaching an existing network interface."),
            AttributeSchema::new("PrivateIpAddress", AttributeType::String)
                .with_description("The private IPv4 address of the network interface."),
            AttributeSchema::new("SubnetId", AttributeType::String)
                .with_description("The ID of the subnet associated with the network interface."),
        ],
    }
}

/// Returns the schema config for AWS::EC2::Instance
pub fn ec2_instance_config() -> AwsSchemaConfig {
    AwsSchemaConfig {
        aws_type_name: "AWS::EC2::Instance",
        has_tags: true,
        schema: ResourceSchema::new("AWS::EC2::Instance")
        .with_description("Specifies an EC2 instance.")
        .attribute(
            AttributeSchema::new("AvailabilityZone", AttributeType::String)
                .with_description("The Availability Zone of the instance."),
        )
        .attribute(
            AttributeSchema::new("BlockDeviceMappings", AttributeType::List(Box::new(block_device_mapping_type())))
                .with_description("The block device mapping entries that defines the block devices to attach to the instance at launch."),
        )
        .attribute(
            AttributeSchema::new("DisableApiTermination", AttributeType::Bool)
                .with_description("If you set this parameter to ``true``, you can't terminate the instance using the Amazon EC2 console, CLI, or API."),
        )
        .attribute(
            AttributeSchema::new("EbsOptimized", AttributeType::Bool)
                .with_description("Indicates whether the instance is optimized for Amazon EBS I/O."),
        )
        .attribute(
            AttributeSchema::new("IamInstanceProfile", AttributeType::String)
                .with_description("The name of an IAM instance profile."),
        )
        .attribute(
            AttributeSchema::new("ImageId", AttributeType::String)
                .with_description("The ID of the AMI."),
        )
        .attribute(
            AttributeSchema::new("InstanceInitiatedShutdownBehavior", enum_type(VALID_SHUTDOWN_BEHAVIOR))
                .with_description("Indicates whether an instance stops or terminates when you initiate shutdown from the instance."),
        )
        .attribute(
            AttributeSchema::new("InstanceType", instance_type())
                .with_description("The instance type."),
        )
        .attribute(
            AttributeSchema::new("KeyName", AttributeType::String)
                .with_description("The name of the key pair."),
        )
        .attribute(
            AttributeSchema::new("Monitoring", AttributeType::Bool)
                .with_description("Specifies whether detailed monitoring is enabled for the instance."),
        )
        .attribute(
            AttributeSchema::new("NetworkInterfaces", AttributeType::List(Box::new(network_interface_type())))
                .with_description("The network interfaces to associate with the instance."),
        )
        .attribute(
            AttributeSchema::new("PrivateIpAddress", AttributeType::String)
                .with_description("The primary IPv4 address."),
        )
        .attribute(
            AttributeSchema::new("SecurityGroupIds", string_list())
                .with_description("The IDs of the security groups."),
        )
        .attribute(
            AttributeSchema::new("SecurityGroups", string_list())
                .with_description("The names of the security groups. For a nondefault VPC, you must use security group IDs instead."),
        )
        .attribute(
            AttributeSchema::new("SourceDestCheck", AttributeType::Bool)
                .with_description("Enable or disable source/destination checks."),
        )
        .attribute(
            AttributeSchema::new("SubnetId", AttributeType::String)
                .with_description("The ID of the subnet to launch the instance into."),
        )
        .attribute(
            AttributeSchema::new("Tenancy", enum_type(VALID_TENANCY))
                .with_description("The tenancy of the instance."),
        )
        .attribute(
            AttributeSchema::new("UserData", AttributeType::String)
                .with_description("The parameters or scripts to store as user data."),
        ),
    }
}
