//! Strata Core
//!
//! Core library for declaring CloudFormation templates as values and
//! checking them before they are handed to CloudFormation

pub mod loader;
pub mod parameter;
pub mod render;
pub mod resource;
pub mod schema;
pub mod template;
pub mod validate;
pub mod value;
