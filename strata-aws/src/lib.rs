//! AWS resource schemas and the EC2 stacks built on strata-core

pub mod instance_types;
pub mod schemas;
pub mod stacks;

pub use stacks::Stack;
