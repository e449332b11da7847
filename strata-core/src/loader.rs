//! Loader - Read a JSON template back into the model

use crate::template::Template;

/// Top-level sections understood by the model
pub const SUPPORTED_SECTIONS: &[&str] = &[
    "AWSTemplateFormatVersion",
    "Description",
    "Parameters",
    "Resources",
    "Outputs",
];

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Invalid template JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Template must be a JSON object")]
    NotAnObject,

    #[error("Unsupported template section '{0}'")]
    UnsupportedSection(String),
}

/// Parse a JSON template
pub fn load_template(source: &str) -> Result<Template, LoadError> {
    let document: serde_json::Value = serde_json::from_str(source)?;

    let serde_json::Value::Object(sections) = &document else {
        return Err(LoadError::NotAnObject);
    };
    if let Some(section) = sections
        .keys()
        .find(|k| !SUPPORTED_SECTIONS.contains(&k.as_str()))
    {
        return Err(LoadError::UnsupportedSection(section.clone()));
    }

    let mut template: Template = serde_json::from_value(document)?;
    template.restore_names();
    log::debug!(
        "Loaded template with {} parameter(s), {} resource(s), {} output(s)",
        template.parameters().len(),
        template.resources().len(),
        template.outputs().len()
    );
    Ok(template)
}
