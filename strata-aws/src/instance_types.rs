//! EC2 instance type names

use std::sync::LazyLock;

use regex::Regex;

/// Instance types offered by the `InstanceType` parameter of both stacks
pub const LEGACY_INSTANCE_TYPES: &[&str] = &[
    "t1.micro",
    "t2.micro",
    "t2.small",
    "t2.medium",
    "m1.small",
    "m1.medium",
    "m1.large",
    "m1.xlarge",
    "m2.xlarge",
    "m2.2xlarge",
    "m2.4xlarge",
    "m3.medium",
    "m3.large",
    "m3.xlarge",
    "m3.2xlarge",
    "c1.medium",
    "c1.xlarge",
    "c3.large",
    "c3.xlarge",
    "c3.2xlarge",
    "c3.4xlarge",
    "c3.8xlarge",
    "g2.2xlarge",
    "p2.xlarge",
    "r3.large",
    "r3.xlarge",
    "r3.2xlarge",
    "r3.4xlarge",
    "r3.8xlarge",
    "i2.xlarge",
    "i2.2xlarge",
    "i2.4xlarge",
    "i2.8xlarge",
    "hi1.4xlarge",
    "hs1.8xlarge",
    "cr1.8xlarge",
    "cc2.8xlarge",
    "cg1.4xlarge",
];

pub const DEFAULT_INSTANCE_TYPE: &str = "t2.micro";

// family (with generation and options, e.g. "m7gd", "u-6tb1") '.' size
static INSTANCE_TYPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z][a-z0-9-]*[0-9][a-z0-9-]*\.[a-z0-9]+$").expect("instance type pattern is valid")
});

/// Check that a name has the `family.size` shape of an EC2 instance type
pub fn is_valid_instance_type(name: &str) -> bool {
    INSTANCE_TYPE.is_match(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legacy_types_are_well_formed() {
        assert_eq!(LEGACY_INSTANCE_TYPES.len(), 38);
        for name in LEGACY_INSTANCE_TYPES {
            assert!(is_valid_instance_type(name), "{} should be valid", name);
        }
        assert!(LEGACY_INSTANCE_TYPES.contains(&DEFAULT_INSTANCE_TYPE));
    }

    #[test]
    fn current_generation_names() {
        assert!(is_valid_instance_type("m7gd.16xlarge"));
        assert!(is_valid_instance_type("u-6tb1.metal"));
        assert!(is_valid_instance_type("c6in.large"));
    }

    #[test]
    fn malformed_names() {
        assert!(!is_valid_instance_type("t2"));
        assert!(!is_valid_instance_type("micro.t2"));
        assert!(!is_valid_instance_type("T2.micro"));
        assert!(!is_valid_instance_type("t2.micro "));
        assert!(!is_valid_instance_type(""));
    }
}
