//! API model shared between the parser and the generator
//!
//! A [`Resource`] is a path plus its methods. Methods carry everything the
//! generator needs: verb, path template, path parameters, optional payload and
//! response schemas, and the group/beta/private annotations.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Suffix stripped from schema titles to obtain type alias names
pub const SCHEMA_SUFFIX: &str = "Schema";

/// HTTP verb of a method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    /// Upper-case verb as sent on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Path parameter of a method, in declared order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathParam {
    /// Parameter title (e.g., "notification_id")
    pub title: String,

    /// Optional human description
    #[serde(default)]
    pub description: Option<String>,
}

/// Where a declared parameter lives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterLocation {
    Path,
    Query,
    Header,
    Cookie,
}

/// Any declared parameter, kept for documentation purposes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    pub location: ParameterLocation,
    #[serde(default)]
    pub required: bool,
}

/// Named schema used as payload or response type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaRef {
    /// Globally unique title (e.g., "NotificationSchema")
    pub title: String,

    /// Required top-level properties
    #[serde(default)]
    pub required: Vec<String>,

    /// Schema description
    #[serde(default)]
    pub description: Option<String>,

    /// Explicit example value, if the description carries one
    #[serde(default)]
    pub example: Option<Value>,

    /// Fully resolved JSON schema
    pub schema: Value,
}

impl SchemaRef {
    /// Whether this schema describes an object
    pub fn is_object(&self) -> bool {
        match &self.schema {
            Value::Object(map) => {
                map.get("type").and_then(Value::as_str) == Some("object")
                    || map.contains_key("properties")
            }
            _ => false,
        }
    }

    /// Type alias name derived from the title (`NotificationSchema` -> `Notification`)
    pub fn alias_name(&self) -> String {
        self.title
            .strip_suffix(SCHEMA_SUFFIX)
            .filter(|s| !s.is_empty())
            .unwrap_or(&self.title)
            .to_string()
    }
}

/// One API operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Method {
    /// Unique operation identifier, doubles as feature flag name for beta methods
    pub operation_id: String,

    /// Display name on the resource class (e.g., "list", "create")
    pub name: String,

    /// HTTP verb
    pub http_method: HttpMethod,

    /// Path template (e.g., "/notifications/{notification_id}")
    pub path: String,

    /// Path parameters in declared order
    #[serde(default)]
    pub params: Vec<PathParam>,

    /// All declared parameters
    #[serde(default)]
    pub parameters: Vec<Parameter>,

    /// Payload schema
    #[serde(default)]
    pub data: Option<SchemaRef>,

    /// The payload was synthesized from query parameters rather than a request body
    #[serde(default)]
    pub query_data: bool,

    /// Request body example, when the description has one
    #[serde(default)]
    pub request_example: Option<Value>,

    /// Response schema
    #[serde(default)]
    pub returns: Option<SchemaRef>,

    /// Group tag; grouped methods move into a sub-resource
    #[serde(default)]
    pub group: Option<String>,

    /// Entity name (e.g., "notification")
    pub entity: String,

    /// Gated behind a feature flag
    #[serde(default)]
    pub beta: bool,

    /// Excluded from the public class and docs
    #[serde(default)]
    pub private: bool,

    #[serde(default)]
    pub summary: Option<String>,

    #[serde(default)]
    pub description: Option<String>,
}

impl Method {
    /// Whether the method returns a paginated result
    pub fn is_paged(&self) -> bool {
        self.name == "list"
    }

    /// Response schema, only when it is an object
    pub fn object_returns(&self) -> Option<&SchemaRef> {
        self.returns.as_ref().filter(|s| s.is_object())
    }

    /// Whether a header with the given name is declared (case-insensitive)
    pub fn has_header(&self, header: &str) -> bool {
        self.parameters.iter().any(|p| {
            p.location == ParameterLocation::Header && p.name.eq_ignore_ascii_case(header)
        })
    }
}

/// A grouping of methods under a shared base path
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    /// Name used for class derivation; equals `path` for top-level resources
    /// and `{parent}_{tag}` for sub-resources
    pub name: String,

    /// Path segments (e.g., "notifications" or "users/push-subscriptions")
    pub path: String,

    /// Methods in declared order
    #[serde(default)]
    pub methods: Vec<Method>,
}

impl Resource {
    /// Create a top-level resource
    pub fn new(path: impl Into<String>, methods: Vec<Method>) -> Self {
        let path = path.into();
        Self {
            name: path.clone(),
            path,
            methods,
        }
    }

    /// First path segment
    pub fn base_path(&self) -> &str {
        self.path.split('/').next().unwrap_or(&self.path)
    }

    /// Whether the resource exposes a paginated `list` method
    pub fn has_list_method(&self) -> bool {
        self.methods.iter().any(Method::is_paged)
    }
}

/// Kind of generated artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FileCategory {
    Resources,
    SubResources,
    Schemas,
}

impl FileCategory {
    /// Output directory the category is written to, relative to the source root
    pub fn dir_name(&self) -> &'static str {
        match self {
            FileCategory::Resources | FileCategory::SubResources => "resources",
            FileCategory::Schemas => "schemas",
        }
    }
}

/// One artifact produced by a generation run
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedFile {
    pub category: FileCategory,

    /// File name relative to the category directory (may contain `/`)
    pub name: String,

    pub source: String,

    /// Markdown documentation for the resource, if any
    pub docs: Option<String>,
}
