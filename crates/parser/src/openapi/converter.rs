//! Converts an OpenAPI spec into resources and methods

use super::types::{json_media_type, OpenApiSpec, Operation, Parameter, SCHEMA_REF_PREFIX};
use indexmap::IndexMap;
use resource_codegen_common::naming::{camel_case, hyphen_case, pascal_case, snake_case, words};
use resource_codegen_common::{
    HttpMethod, Method, Parameter as MethodParameter, ParameterLocation, PathParam, Resource,
    Result, SchemaRef,
};
use serde_json::{json, Map, Value};

/// Convert an OpenAPI spec to the flat list of resources, in document order
pub fn convert_openapi_to_resources(spec: &OpenApiSpec) -> Result<Vec<Resource>> {
    let mut resources: IndexMap<String, Vec<Method>> = IndexMap::new();

    for (path, path_item) in &spec.paths {
        let operations = [
            (HttpMethod::Get, &path_item.get),
            (HttpMethod::Post, &path_item.post),
            (HttpMethod::Put, &path_item.put),
            (HttpMethod::Patch, &path_item.patch),
            (HttpMethod::Delete, &path_item.delete),
        ];

        for (verb, operation) in operations {
            let Some(operation) = operation else {
                continue;
            };

            let Some(resource_path) = resource_path(operation) else {
                tracing::warn!(
                    "Skipping {} {}: no x-resource extension or tag",
                    verb,
                    path
                );
                continue;
            };

            let shared: Vec<&Parameter> = path_item
                .parameters
                .iter()
                .filter_map(|p| spec.resolve_parameter(p))
                .collect();

            let method = build_method(spec, &resource_path, verb, path, operation, &shared);
            tracing::debug!(
                "Mapped {} {} to {}.{}",
                verb,
                path,
                resource_path,
                method.name
            );
            resources.entry(resource_path).or_default().push(method);
        }
    }

    Ok(resources
        .into_iter()
        .map(|(path, methods)| Resource::new(path, methods))
        .collect())
}

/// Resource path from `x-resource`, falling back to the first tag
fn resource_path(operation: &Operation) -> Option<String> {
    operation
        .extension_str("x-resource")
        .or_else(|| operation.tags.first().map(String::as_str))
        .map(hyphen_case)
        .filter(|p| !p.is_empty())
}

/// Build one method from an operation
fn build_method(
    spec: &OpenApiSpec,
    resource_path: &str,
    verb: HttpMethod,
    path: &str,
    operation: &Operation,
    shared: &[&Parameter],
) -> Method {
    let operation_id = operation
        .operation_id
        .clone()
        .unwrap_or_else(|| words(&format!("{} {}", verb.as_str().to_lowercase(), path)).join("-"));

    let name = operation
        .extension_str("x-method")
        .map(str::to_string)
        .unwrap_or_else(|| method_name_from_operation_id(&operation_id));

    let parameters = merge_parameters(spec, operation, shared);

    let params = parameters
        .iter()
        .filter(|p| p.location == "path")
        .map(|p| PathParam {
            title: p
                .schema
                .as_ref()
                .and_then(|s| s.get("title"))
                .and_then(Value::as_str)
                .unwrap_or(p.name.as_str())
                .to_string(),
            description: p.description.clone(),
        })
        .collect();

    let group = operation.extension_str("x-group").map(hyphen_case);
    let type_prefix = format!(
        "{}{}{}",
        pascal_case(resource_path),
        group.as_deref().map(pascal_case).unwrap_or_default(),
        pascal_case(&name)
    );
    let query_data = operation.request_body.is_none();
    let (data, request_example) = extract_payload(spec, operation, &parameters, &type_prefix);
    let query_data = query_data && data.is_some();
    let returns = extract_response(spec, operation, &type_prefix);

    let entity = operation
        .extension_str("x-entity")
        .map(str::to_string)
        .unwrap_or_else(|| default_entity(resource_path));

    Method {
        operation_id,
        name,
        http_method: verb,
        path: path.to_string(),
        params,
        parameters: parameters
            .iter()
            .filter_map(|p| {
                Some(MethodParameter {
                    name: p.name.clone(),
                    location: parameter_location(&p.location)?,
                    required: p.required,
                })
            })
            .collect(),
        data,
        query_data,
        request_example,
        returns,
        group,
        entity,
        beta: operation.extension_flag("x-beta"),
        private: operation.extension_flag("x-private"),
        summary: operation.summary.clone(),
        description: operation.description.clone(),
    }
}

/// Path-item parameters overridden by operation parameters with the same name and location
fn merge_parameters<'a>(
    spec: &'a OpenApiSpec,
    operation: &'a Operation,
    shared: &[&'a Parameter],
) -> Vec<&'a Parameter> {
    let own: Vec<&Parameter> = operation
        .parameters
        .iter()
        .filter_map(|p| spec.resolve_parameter(p))
        .collect();

    let mut merged: Vec<&Parameter> = shared
        .iter()
        .copied()
        .filter(|s| {
            !own.iter()
                .any(|o| o.name == s.name && o.location == s.location)
        })
        .collect();
    merged.extend(own);
    merged
}

fn parameter_location(location: &str) -> Option<ParameterLocation> {
    match location {
        "path" => Some(ParameterLocation::Path),
        "query" => Some(ParameterLocation::Query),
        "header" => Some(ParameterLocation::Header),
        "cookie" => Some(ParameterLocation::Cookie),
        _ => None,
    }
}

/// `notifications-list` -> `list`, `fetchUserPreferences` -> `fetchUserPreferences`
fn method_name_from_operation_id(operation_id: &str) -> String {
    let last = operation_id
        .rsplit(|c: char| matches!(c, '-' | '_' | '.'))
        .next()
        .unwrap_or(operation_id);
    camel_case(last)
}

/// `users/push-subscriptions` -> `push_subscription`
fn default_entity(resource_path: &str) -> String {
    let last = resource_path.rsplit('/').next().unwrap_or(resource_path);
    let mut entity = snake_case(last);
    if entity.len() > 1 && entity.ends_with('s') {
        entity.pop();
    }
    entity
}

/// Payload schema from the JSON request body, or synthesized from query parameters
fn extract_payload(
    spec: &OpenApiSpec,
    operation: &Operation,
    parameters: &[&Parameter],
    type_prefix: &str,
) -> (Option<SchemaRef>, Option<Value>) {
    if let Some(body) = operation
        .request_body
        .as_ref()
        .and_then(|b| spec.resolve_request_body(b))
    {
        let media = json_media_type(&body.content);
        let example = media.and_then(|m| m.example.clone());
        let data = media
            .and_then(|m| m.schema.as_ref())
            .and_then(|s| build_schema_ref(spec, s, &format!("{type_prefix}PayloadSchema")))
            .map(|mut s| {
                if s.description.is_none() {
                    s.description = body.description.clone();
                }
                s
            });
        return (data, example);
    }

    let query: Vec<&&Parameter> = parameters.iter().filter(|p| p.location == "query").collect();
    if query.is_empty() {
        return (None, None);
    }

    let mut properties = Map::new();
    let mut required = Vec::new();
    for param in &query {
        let mut schema = param
            .schema
            .as_ref()
            .map(|s| inline_refs(spec, s, &mut Vec::new()))
            .unwrap_or_else(|| json!({}));
        if let (Some(description), Value::Object(map)) = (&param.description, &mut schema) {
            map.entry("description")
                .or_insert_with(|| Value::String(description.clone()));
        }
        properties.insert(param.name.clone(), schema);
        if param.required {
            required.push(param.name.clone());
        }
    }

    let schema = json!({
        "type": "object",
        "properties": properties,
        "required": required,
    });

    (
        Some(SchemaRef {
            title: format!("{type_prefix}QuerySchema"),
            required,
            description: None,
            example: None,
            schema,
        }),
        None,
    )
}

/// First 2xx response with a JSON schema
fn extract_response(spec: &OpenApiSpec, operation: &Operation, type_prefix: &str) -> Option<SchemaRef> {
    operation
        .responses
        .iter()
        .filter(|(status, _)| status.starts_with('2'))
        .filter_map(|(_, response)| spec.resolve_response(response))
        .find_map(|response| {
            let schema = json_media_type(&response.content)?.schema.as_ref()?;
            let mut schema_ref =
                build_schema_ref(spec, schema, &format!("{type_prefix}ResponseSchema"))?;
            if schema_ref.description.is_none() {
                schema_ref.description = response.description.clone();
            }
            Some(schema_ref)
        })
}

/// Build a schema reference, resolving a top-level `$ref`
///
/// An unresolvable reference degrades to `None` instead of failing the run.
fn build_schema_ref(spec: &OpenApiSpec, schema: &Value, fallback_title: &str) -> Option<SchemaRef> {
    let (resolved, ref_path) = match schema.get("$ref").and_then(Value::as_str) {
        Some(ref_path) => match spec.resolve_schema_ref(ref_path) {
            Some(resolved) => (resolved, Some(ref_path)),
            None => {
                tracing::warn!("Schema {} is not declared, treating as void", ref_path);
                return None;
            }
        },
        None => (schema, None),
    };

    let ref_name = ref_path.and_then(|p| p.strip_prefix(SCHEMA_REF_PREFIX));
    let inlined = inline_refs(spec, resolved, &mut ref_path.into_iter().collect());
    let title = inlined
        .get("title")
        .and_then(Value::as_str)
        .or(ref_name)
        .unwrap_or(fallback_title)
        .to_string();

    Some(SchemaRef {
        title,
        required: inlined
            .get("required")
            .and_then(Value::as_array)
            .map(|r| r.iter().filter_map(Value::as_str).map(str::to_string).collect())
            .unwrap_or_default(),
        description: inlined
            .get("description")
            .and_then(Value::as_str)
            .map(str::to_string),
        example: inlined.get("example").cloned(),
        schema: inlined,
    })
}

/// Replace every nested `$ref` with the schema it points to
///
/// `path` holds the references being resolved around `value`; a reference
/// that is already on it is recursive and becomes `{}`.
fn inline_refs<'a>(spec: &'a OpenApiSpec, value: &'a Value, path: &mut Vec<&'a str>) -> Value {
    match value {
        Value::Object(map) => {
            if let Some(ref_path) = map.get("$ref").and_then(Value::as_str) {
                if path.contains(&ref_path) {
                    tracing::debug!("Recursive schema {} left open", ref_path);
                    return json!({});
                }
                return match spec.resolve_schema_ref(ref_path) {
                    Some(target) => {
                        path.push(ref_path);
                        let inlined = inline_refs(spec, target, path);
                        path.pop();
                        inlined
                    }
                    None => {
                        tracing::warn!("Nested schema {} is not declared", ref_path);
                        json!({})
                    }
                };
            }
            Value::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), inline_refs(spec, v, path)))
                    .collect(),
            )
        }
        Value::Array(items) => Value::Array(items.iter().map(|v| inline_refs(spec, v, path)).collect()),
        other => other.clone(),
    }
}
