//! Validate - Structural checks on a whole template
//!
//! These are the checks CloudFormation would otherwise only report at
//! deploy time: dangling references, missing or mistyped properties and
//! parameter defaults that violate their own constraints.

use regex::Regex;

use crate::parameter::{Parameter, ParameterType};
use crate::schema::{SchemaRegistry, TypeError};
use crate::template::{Template, check_logical_id};
use crate::value::{Reference, Value, is_pseudo_parameter};

pub const MAX_RESOURCES: usize = 500;
pub const MAX_PARAMETERS: usize = 200;
pub const MAX_OUTPUTS: usize = 200;

/// A single problem found in a template
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("Template declares no resources")]
    NoResources,

    #[error("{section} has {count} entries, the limit is {limit}")]
    LimitExceeded {
        section: &'static str,
        count: usize,
        limit: usize,
    },

    #[error("{section}: invalid logical ID '{name}'")]
    InvalidLogicalId { section: &'static str, name: String },

    #[error("{location}: Ref to unknown name '{target}'")]
    UnresolvedRef { location: String, target: String },

    #[error("{location}: Fn::GetAtt target '{target}' is not a resource")]
    UnresolvedGetAtt { location: String, target: String },

    #[error("Resources.{resource}: DependsOn names unknown resource '{target}'")]
    UnknownDependency { resource: String, target: String },

    #[error("Resources.{resource}: resource depends on itself")]
    SelfDependency { resource: String },

    #[error("Resources.{resource} ({resource_type}): {error}")]
    Property {
        resource: String,
        resource_type: String,
        error: TypeError,
    },

    #[error("Parameters.{parameter}: {message}")]
    Parameter { parameter: String, message: String },
}

/// Run every structural check, collecting all problems
pub fn validate_template(
    template: &Template,
    schemas: &SchemaRegistry,
) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    check_limits(template, &mut errors);
    check_names(template, &mut errors);
    for parameter in template.parameters().values() {
        check_parameter(parameter, &mut errors);
    }
    check_resources(template, schemas, &mut errors);
    for (name, output) in template.outputs() {
        check_references(template, &format!("Outputs.{}", name), &output.value, &mut errors);
        if let Some(export) = &output.export {
            check_references(
                template,
                &format!("Outputs.{}.Export", name),
                &export.name,
                &mut errors,
            );
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_limits(template: &Template, errors: &mut Vec<ValidationError>) {
    if template.resources().is_empty() {
        errors.push(ValidationError::NoResources);
    }
    let sections = [
        ("Resources", template.resources().len(), MAX_RESOURCES),
        ("Parameters", template.parameters().len(), MAX_PARAMETERS),
        ("Outputs", template.outputs().len(), MAX_OUTPUTS),
    ];
    for (section, count, limit) in sections {
        if count > limit {
            errors.push(ValidationError::LimitExceeded {
                section,
                count,
                limit,
            });
        }
    }
}

/// Loaded templates bypass the checks done by `Template::add_*`
fn check_names(template: &Template, errors: &mut Vec<ValidationError>) {
    let sections: [(&'static str, Vec<&String>); 3] = [
        ("Parameters", template.parameters().keys().collect()),
        ("Resources", template.resources().keys().collect()),
        ("Outputs", template.outputs().keys().collect()),
    ];
    for (section, names) in sections {
        for name in names {
            if check_logical_id(name).is_err() {
                errors.push(ValidationError::InvalidLogicalId {
                    section,
                    name: name.clone(),
                });
            }
        }
    }
    for name in template.parameters().keys() {
        if template.resources().contains_key(name) {
            errors.push(ValidationError::Parameter {
                parameter: name.clone(),
                message: "name is also used by a resource".to_string(),
            });
        }
    }
}

fn check_parameter(parameter: &Parameter, errors: &mut Vec<ValidationError>) {
    let mut fail = |message: String| {
        errors.push(ValidationError::Parameter {
            parameter: parameter.name.clone(),
            message,
        })
    };

    if let (Some(min), Some(max)) = (parameter.min_length, parameter.max_length)
        && min > max
    {
        fail(format!("MinLength {} exceeds MaxLength {}", min, max));
    }
    if let (Some(min), Some(max)) = (parameter.min_value, parameter.max_value)
        && min > max
    {
        fail(format!("MinValue {} exceeds MaxValue {}", min, max));
    }

    // CloudFormation matches the pattern against the whole value
    let pattern = match &parameter.allowed_pattern {
        Some(p) => match Regex::new(&format!("^(?:{})$", p)) {
            Ok(re) => Some(re),
            Err(e) => {
                fail(format!("AllowedPattern does not compile: {}", e));
                None
            }
        },
        None => None,
    };

    let Some(default) = parameter.default.as_deref() else {
        return;
    };

    if !parameter.allowed_values.is_empty()
        && !parameter.allowed_values.iter().any(|v| v == default)
    {
        fail(format!("Default '{}' is not in AllowedValues", default));
    }
    if let Some(re) = &pattern
        && !re.is_match(default)
    {
        fail(format!("Default '{}' does not match AllowedPattern", default));
    }

    let len = default.chars().count() as i64;
    if let Some(min) = parameter.min_length
        && len < min
    {
        fail(format!("Default '{}' is shorter than MinLength {}", default, min));
    }
    if let Some(max) = parameter.max_length
        && len > max
    {
        fail(format!("Default '{}' is longer than MaxLength {}", default, max));
    }

    match parameter.param_type {
        ParameterType::Number => match default.trim().parse::<f64>() {
            Ok(n) => {
                if parameter.min_value.is_some_and(|min| n < min as f64) {
                    fail(format!("Default {} is below MinValue", default));
                }
                if parameter.max_value.is_some_and(|max| n > max as f64) {
                    fail(format!("Default {} is above MaxValue", default));
                }
            }
            Err(_) => fail(format!("Default '{}' is not a number", default)),
        },
        ParameterType::NumberList => {
            if default
                .split(',')
                .any(|item| item.trim().parse::<f64>().is_err())
            {
                fail(format!("Default '{}' is not a list of numbers", default));
            }
        }
        _ => {}
    }
}

fn check_resources(
    template: &Template,
    schemas: &SchemaRegistry,
    errors: &mut Vec<ValidationError>,
) {
    for (logical_id, resource) in template.resources() {
        for target in &resource.depends_on {
            if target == logical_id {
                errors.push(ValidationError::SelfDependency {
                    resource: logical_id.clone(),
                });
            } else if template.resource(target).is_none() {
                errors.push(ValidationError::UnknownDependency {
                    resource: logical_id.clone(),
                    target: target.clone(),
                });
            }
        }

        for (key, value) in &resource.properties {
            check_references(
                template,
                &format!("Resources.{}.{}", logical_id, key),
                value,
                errors,
            );
        }

        match schemas.get(&resource.resource_type) {
            Some(schema) => {
                if let Err(type_errors) = schema.validate(&resource.properties) {
                    errors.extend(type_errors.into_iter().map(|error| {
                        ValidationError::Property {
                            resource: logical_id.clone(),
                            resource_type: resource.resource_type.clone(),
                            error,
                        }
                    }));
                }
            }
            None => log::warn!(
                "No schema for {} ({}), skipping property checks",
                logical_id,
                resource.resource_type
            ),
        }
    }
}

fn check_references(
    template: &Template,
    location: &str,
    value: &Value,
    errors: &mut Vec<ValidationError>,
) {
    for reference in value.references() {
        match reference {
            Reference::Ref(target) => {
                let resolves = is_pseudo_parameter(target)
                    || template.parameter(target).is_some()
                    || template.resource(target).is_some();
                if !resolves {
                    errors.push(ValidationError::UnresolvedRef {
                        location: location.to_string(),
                        target: target.to_string(),
                    });
                }
            }
            Reference::GetAtt { logical_id, .. } => {
                if template.resource(logical_id).is_none() {
                    errors.push(ValidationError::UnresolvedGetAtt {
                        location: location.to_string(),
                        target: logical_id.to_string(),
                    });
                }
            }
        }
    }
}
