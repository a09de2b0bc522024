//! Markdown documentation for resources and beta feature flags
//!
//! Each public method gets a section with its summary, an optional preview
//! warning, its description and an example call whose arguments are stubbed
//! from the payload schema when no explicit example exists.

use crate::printer::js_literal;
use crate::templates::{load_templates, FEATURE_FLAGS, RESOURCE_DOCS};
use resource_codegen_common::naming::snake_case;
use resource_codegen_common::{GeneratorError, Method, Resource, Result};
use serde::Serialize;
use serde_json::{Map, Value};
use tera::{Context, Tera};

/// Placeholder for the feature flag region when nothing is in beta
pub const NO_BETA_FEATURES: &str = "_There are no features in beta at this time._";

/// Names used in rendered examples
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocsOptions {
    /// Variable the example client is bound to
    pub client_identifier: String,

    /// Header that, when declared, adds a per-request user option to examples
    pub user_email_header: String,

    /// Email shown in the per-request user option
    pub example_email: String,
}

impl Default for DocsOptions {
    fn default() -> Self {
        Self {
            client_identifier: "magicbell".to_string(),
            user_email_header: "x-magicbell-user-email".to_string(),
            example_email: "person@example.com".to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
struct MethodDoc {
    name: String,
    operation_id: String,
    summary: String,
    description: Option<String>,
    beta: bool,
    args: String,
}

/// Renders resource sections and the feature flag table
pub struct DocsEmitter {
    options: DocsOptions,
    tera: Tera,
}

impl DocsEmitter {
    pub fn new(options: DocsOptions) -> Result<Self> {
        let tera = load_templates()?;
        Ok(Self { options, tera })
    }

    /// Markdown section for a resource, or `None` when it has no public methods
    pub fn resource_docs(&self, resource: &Resource) -> Result<Option<String>> {
        let methods: Vec<MethodDoc> = resource
            .methods
            .iter()
            .filter(|m| !m.private)
            .map(|m| self.method_doc(m))
            .collect();

        if methods.is_empty() {
            return Ok(None);
        }

        let mut context = Context::new();
        context.insert("path", &resource.path);
        context.insert("client", &self.options.client_identifier);
        context.insert("methods", &methods);

        let rendered = self.render(RESOURCE_DOCS, &context)?;
        Ok(Some(tidy_markdown(&rendered)))
    }

    /// Table of beta methods, or a placeholder line when there are none
    pub fn feature_flag_table(&self, methods: &[Method]) -> Result<String> {
        let beta: Vec<MethodDoc> = methods
            .iter()
            .filter(|m| m.beta)
            .map(|m| self.method_doc(m))
            .collect();

        if beta.is_empty() {
            return Ok(NO_BETA_FEATURES.to_string());
        }

        let mut context = Context::new();
        context.insert("methods", &beta);
        Ok(self.render(FEATURE_FLAGS, &context)?.trim_end().to_string())
    }

    fn render(&self, template: &str, context: &Context) -> Result<String> {
        self.tera.render(template, context).map_err(|e| {
            GeneratorError::Template(format!("Failed to render {}: {:?}", template, e))
        })
    }

    fn method_doc(&self, method: &Method) -> MethodDoc {
        MethodDoc {
            name: method.name.clone(),
            operation_id: method.operation_id.clone(),
            summary: method
                .summary
                .clone()
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| method.name.clone()),
            description: method
                .description
                .as_deref()
                .map(str::trim)
                .filter(|d| !d.is_empty())
                .map(str::to_string),
            beta: method.beta,
            args: self.example_args(method),
        }
    }

    /// Arguments of the example call: path ids, body or query, then options
    fn example_args(&self, method: &Method) -> String {
        let mut args: Vec<Value> = method
            .params
            .iter()
            .map(|p| Value::String(format!("{{{}}}", snake_case(&p.title))))
            .collect();

        if let Some(body) = example_body(method) {
            args.push(body);
        } else if let Some(query) = example_query(method) {
            args.push(query);
        }

        if method.has_header(&self.options.user_email_header) {
            let mut user = Map::new();
            user.insert(
                "userEmail".to_string(),
                Value::String(self.options.example_email.clone()),
            );
            args.push(Value::Object(user));
        }

        args.iter()
            .map(|a| js_literal(a, 0))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Request body example, unwrapped from its entity envelope
fn example_body(method: &Method) -> Option<Value> {
    let body = match (&method.request_example, &method.data) {
        (Some(example), _) => example.clone(),
        (None, Some(data)) if !method.query_data => data
            .example
            .clone()
            .unwrap_or_else(|| stub_value(&data.schema)),
        _ => return None,
    };

    match body {
        Value::Object(mut map) if map.contains_key(&method.entity) => {
            map.remove(&method.entity)
        }
        other => Some(other),
    }
}

/// Query example with snake_cased keys; omitted when empty
fn example_query(method: &Method) -> Option<Value> {
    let data = method.data.as_ref().filter(|_| method.query_data)?;

    match stub_value(&data.schema) {
        Value::Object(map) if !map.is_empty() => Some(Value::Object(
            map.into_iter().map(|(k, v)| (snake_case(&k), v)).collect(),
        )),
        _ => None,
    }
}

/// Placeholder value that satisfies a schema
///
/// Uses the schema's example, then its default, then its first enum value,
/// then a neutral value for its type.
pub fn stub_value(schema: &Value) -> Value {
    let Some(map) = schema.as_object() else {
        return Value::Null;
    };

    if let Some(v) = map.get("example").or_else(|| map.get("default")) {
        return v.clone();
    }
    if let Some(first) = map.get("enum").and_then(Value::as_array).and_then(|e| e.first()) {
        return first.clone();
    }

    if let Some(parts) = map.get("allOf").and_then(Value::as_array) {
        let mut merged = Map::new();
        for part in parts {
            if let Value::Object(obj) = stub_value(part) {
                merged.extend(obj);
            }
        }
        return Value::Object(merged);
    }
    if let Some(first) = ["oneOf", "anyOf"]
        .iter()
        .find_map(|k| map.get(*k).and_then(Value::as_array).and_then(|a| a.first()))
    {
        return stub_value(first);
    }

    let ty = match map.get("type") {
        Some(Value::String(t)) => Some(t.as_str()),
        // `["string", "null"]` picks the first non-null type
        Some(Value::Array(types)) => types
            .iter()
            .filter_map(Value::as_str)
            .find(|t| *t != "null"),
        _ => None,
    };

    match ty {
        Some("string") => Value::String(String::new()),
        Some("integer") | Some("number") => Value::from(0),
        Some("boolean") => Value::Bool(false),
        Some("array") => match map.get("items") {
            Some(items) => Value::Array(vec![stub_value(items)]),
            None => Value::Array(vec![]),
        },
        Some("object") => stub_object(map),
        _ if map.contains_key("properties") => stub_object(map),
        _ => Value::Null,
    }
}

fn stub_object(map: &Map<String, Value>) -> Value {
    let properties = map
        .get("properties")
        .and_then(Value::as_object)
        .map(|props| {
            props
                .iter()
                .map(|(k, v)| (k.clone(), stub_value(v)))
                .collect()
        })
        .unwrap_or_default();
    Value::Object(properties)
}

/// Collapse runs of blank lines and end with a single newline
pub fn tidy_markdown(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut blank_run = 0;

    for line in text.trim().lines() {
        let line = line.trim_end();
        if line.is_empty() {
            blank_run += 1;
            if blank_run > 1 {
                continue;
            }
        } else {
            blank_run = 0;
        }
        out.push_str(line);
        out.push('\n');
    }

    out
}
