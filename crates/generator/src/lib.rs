//! TypeScript resource client generation
//!
//! This crate turns parsed [`Resource`]s into client artifacts:
//! - one resource class module per resource and sub-resource
//! - one schema constant module per resource
//! - markdown method docs and the beta feature flag table for the README
//! - the wiring of top-level resources into the root client class
//!
//! Synthesis builds a typed syntax tree ([`ast`]) that is rendered by an
//! independent printer ([`printer`]); no step edits generated text.
//!
//! [`Resource`]: resource_codegen_common::Resource

pub mod ast;
pub mod client;
pub mod declarations;
pub mod docs;
pub mod method;
pub mod output;
pub mod pipeline;
pub mod printer;
pub mod readme;
pub mod resource;
mod templates;
pub mod tree;

pub use client::{client_resources, update_client_source, ClientResource, Origin};
pub use docs::{DocsEmitter, DocsOptions};
pub use output::{replace_file, OutputLayout, PreparedOutput};
pub use pipeline::{GeneratorConfig, Orchestrator, RunSummary};
pub use readme::replace_region;
pub use resource::{resource_module, schema_module};
pub use tree::{build_tree, ResourceNode};

#[cfg(test)]
pub(crate) mod test_support {
    use resource_codegen_common::{HttpMethod, Method, SchemaRef};
    use serde_json::{json, Map, Value};

    /// Minimal GET method named `name`
    pub fn method(name: &str) -> Method {
        Method {
            operation_id: name.to_string(),
            name: name.to_string(),
            http_method: HttpMethod::Get,
            path: "/test".to_string(),
            params: vec![],
            parameters: vec![],
            data: None,
            query_data: false,
            request_example: None,
            returns: None,
            group: None,
            entity: "test".to_string(),
            beta: false,
            private: false,
            summary: None,
            description: None,
        }
    }

    /// Object schema with one string property per required field
    pub fn schema(title: &str, required: &[&str]) -> SchemaRef {
        let properties: Map<String, Value> = required
            .iter()
            .map(|name| (name.to_string(), json!({"type": "string"})))
            .collect();

        SchemaRef {
            title: title.to_string(),
            required: required.iter().map(|s| s.to_string()).collect(),
            description: None,
            example: None,
            schema: json!({
                "type": "object",
                "properties": properties,
                "required": required,
            }),
        }
    }
}
