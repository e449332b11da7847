//! Stacks - The template generators offered by the CLI

use std::fmt;
use std::str::FromStr;

use strata_core::template::{Template, TemplateError};

pub mod common;
pub mod custom_vpc;
pub mod default_vpc;

/// A named template generator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stack {
    /// Instance in the default VPC, with an Elastic IP and a DNS record
    DefaultVpc,
    /// Instance in a new VPC with its own subnet, routes and network ACL
    Vpc,
}

#[derive(Debug, thiserror::Error)]
#[error("Unknown stack '{0}', expected one of: default-vpc, vpc")]
pub struct UnknownStack(pub String);

impl Stack {
    pub fn all() -> &'static [Stack] {
        &[Stack::DefaultVpc, Stack::Vpc]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Stack::DefaultVpc => "default-vpc",
            Stack::Vpc => "vpc",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Stack::DefaultVpc => {
                "EC2 instance in the default VPC with an Elastic IP and a Route 53 host record"
            }
            Stack::Vpc => {
                "EC2 instance in a new VPC with a public subnet, internet gateway and network ACL"
            }
        }
    }

    /// Assemble the template for this stack
    pub fn build(&self) -> Result<Template, TemplateError> {
        log::debug!("Building stack {}", self.name());
        match self {
            Stack::DefaultVpc => default_vpc::build(),
            Stack::Vpc => custom_vpc::build(),
        }
    }
}

impl fmt::Display for Stack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Stack {
    type Err = UnknownStack;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Stack::all()
            .iter()
            .copied()
            .find(|stack| stack.name() == s)
            .ok_or_else(|| UnknownStack(s.to_string()))
    }
}
