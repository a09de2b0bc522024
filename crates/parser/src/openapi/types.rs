//! OpenAPI 3.x type definitions
//!
//! Only the parts needed to derive resources and methods are modelled. Schemas
//! stay as raw JSON values because they are re-emitted verbatim as schema
//! constants.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Prefix of local schema references
pub const SCHEMA_REF_PREFIX: &str = "#/components/schemas/";

/// OpenAPI document root
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenApiSpec {
    /// OpenAPI version (e.g., "3.0.0")
    pub openapi: String,

    /// API metadata
    pub info: Info,

    /// API paths in document order
    #[serde(default)]
    pub paths: IndexMap<String, PathItem>,

    /// Reusable components
    #[serde(default)]
    pub components: Option<Components>,
}

/// API information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Info {
    pub title: String,
    pub version: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Operations available on a single path
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathItem {
    #[serde(default)]
    pub get: Option<Operation>,

    #[serde(default)]
    pub post: Option<Operation>,

    #[serde(default)]
    pub put: Option<Operation>,

    #[serde(default)]
    pub patch: Option<Operation>,

    #[serde(default)]
    pub delete: Option<Operation>,

    /// Parameters shared by every operation on this path
    #[serde(default)]
    pub parameters: Vec<RefOr<Parameter>>,
}

/// HTTP operation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Operation {
    #[serde(rename = "operationId")]
    #[serde(default)]
    pub operation_id: Option<String>,

    #[serde(default)]
    pub summary: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub parameters: Vec<RefOr<Parameter>>,

    #[serde(rename = "requestBody")]
    #[serde(default)]
    pub request_body: Option<RefOr<RequestBody>>,

    /// Responses keyed by status code, in document order
    #[serde(default)]
    pub responses: IndexMap<String, RefOr<Response>>,

    /// Tags (first tag names the resource when `x-resource` is missing)
    #[serde(default)]
    pub tags: Vec<String>,

    /// Vendor extensions (`x-resource`, `x-method`, `x-group`, ...)
    #[serde(flatten)]
    pub extensions: IndexMap<String, Value>,
}

impl Operation {
    /// String-valued vendor extension
    pub fn extension_str(&self, key: &str) -> Option<&str> {
        self.extensions.get(key).and_then(Value::as_str)
    }

    /// Boolean vendor extension, `false` when absent
    pub fn extension_flag(&self, key: &str) -> bool {
        self.extensions
            .get(key)
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }
}

/// Either an inline object or a `$ref` to a component
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RefOr<T> {
    /// Reference to a component
    Reference {
        #[serde(rename = "$ref")]
        ref_path: String,
    },

    /// Inline definition
    Item(T),
}

/// Parameter definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,

    /// Location: query, header, path, cookie
    #[serde(rename = "in")]
    pub location: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub required: bool,

    #[serde(default)]
    pub schema: Option<Value>,
}

/// Request body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestBody {
    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub content: IndexMap<String, MediaType>,

    #[serde(default)]
    pub required: bool,
}

/// Response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Response {
    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub content: IndexMap<String, MediaType>,
}

/// Media type
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaType {
    #[serde(default)]
    pub schema: Option<Value>,

    #[serde(default)]
    pub example: Option<Value>,
}

/// Pick the JSON media type out of a content map
pub fn json_media_type(content: &IndexMap<String, MediaType>) -> Option<&MediaType> {
    content
        .get("application/json")
        .or_else(|| content.iter().find(|(k, _)| k.contains("json")).map(|(_, v)| v))
}

/// Reusable components
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Components {
    #[serde(default)]
    pub schemas: IndexMap<String, Value>,

    #[serde(default)]
    pub parameters: IndexMap<String, Parameter>,

    #[serde(rename = "requestBodies")]
    #[serde(default)]
    pub request_bodies: IndexMap<String, RequestBody>,

    #[serde(default)]
    pub responses: IndexMap<String, Response>,
}

impl OpenApiSpec {
    /// Get a schema by reference path
    /// e.g., "#/components/schemas/Notification" -> Notification schema
    pub fn resolve_schema_ref(&self, ref_path: &str) -> Option<&Value> {
        let name = ref_path.strip_prefix(SCHEMA_REF_PREFIX)?;
        self.components.as_ref().and_then(|c| c.schemas.get(name))
    }

    /// Resolve a parameter, following `#/components/parameters/*` references
    pub fn resolve_parameter<'a>(&'a self, param: &'a RefOr<Parameter>) -> Option<&'a Parameter> {
        match param {
            RefOr::Item(p) => Some(p),
            RefOr::Reference { ref_path } => {
                let name = ref_path.strip_prefix("#/components/parameters/")?;
                self.components.as_ref()?.parameters.get(name)
            }
        }
    }

    /// Resolve a request body, following `#/components/requestBodies/*` references
    pub fn resolve_request_body<'a>(
        &'a self,
        body: &'a RefOr<RequestBody>,
    ) -> Option<&'a RequestBody> {
        match body {
            RefOr::Item(b) => Some(b),
            RefOr::Reference { ref_path } => {
                let name = ref_path.strip_prefix("#/components/requestBodies/")?;
                self.components.as_ref()?.request_bodies.get(name)
            }
        }
    }

    /// Resolve a response, following `#/components/responses/*` references
    pub fn resolve_response<'a>(&'a self, response: &'a RefOr<Response>) -> Option<&'a Response> {
        match response {
            RefOr::Item(r) => Some(r),
            RefOr::Reference { ref_path } => {
                let name = ref_path.strip_prefix("#/components/responses/")?;
                self.components.as_ref()?.responses.get(name)
            }
        }
    }
}
