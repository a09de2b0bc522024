//! Template loading and management

use resource_codegen_common::naming::{camel_case, capitalize};
use resource_codegen_common::{GeneratorError, Result};
use std::collections::HashMap;
use tera::{Tera, Value};

pub const RESOURCE_DOCS: &str = "resource_docs.md";
pub const FEATURE_FLAGS: &str = "feature_flags.md";

/// Load all templates
pub fn load_templates() -> Result<Tera> {
    let mut tera = Tera::default();

    tera.register_filter("heading", heading_filter);
    tera.register_filter("accessor", accessor_filter);

    tera.add_raw_template(
        RESOURCE_DOCS,
        include_str!("../templates/resource_docs.md.tera"),
    )
    .map_err(|e| {
        GeneratorError::Template(format!("Failed to load {} template: {}", RESOURCE_DOCS, e))
    })?;

    tera.add_raw_template(
        FEATURE_FLAGS,
        include_str!("../templates/feature_flags.md.tera"),
    )
    .map_err(|e| {
        GeneratorError::Template(format!("Failed to load {} template: {}", FEATURE_FLAGS, e))
    })?;

    Ok(tera)
}

fn string_arg<'a>(value: &'a Value, filter: &str) -> tera::Result<&'a str> {
    value
        .as_str()
        .ok_or_else(|| tera::Error::msg(format!("{} filter expects a string", filter)))
}

/// `users/push-subscriptions` -> `Users push-subscriptions`
fn heading_filter(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let path = string_arg(value, "heading")?;
    Ok(Value::String(capitalize(&path.replace('/', " "))))
}

/// `users/push-subscriptions` -> `users.pushSubscriptions`
fn accessor_filter(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let path = string_arg(value, "accessor")?;
    let accessor = path
        .split('/')
        .map(camel_case)
        .collect::<Vec<_>>()
        .join(".");
    Ok(Value::String(accessor))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_templates_load() {
        let tera = load_templates().unwrap();
        let names: Vec<&str> = tera.get_template_names().collect();
        assert!(names.contains(&RESOURCE_DOCS));
        assert!(names.contains(&FEATURE_FLAGS));
    }

    #[test]
    fn test_filters() {
        let args = HashMap::new();
        assert_eq!(
            heading_filter(&json!("users/push-subscriptions"), &args).unwrap(),
            json!("Users push-subscriptions")
        );
        assert_eq!(
            accessor_filter(&json!("users/push-subscriptions"), &args).unwrap(),
            json!("users.pushSubscriptions")
        );
        assert!(accessor_filter(&json!(1), &args).is_err());
    }
}
