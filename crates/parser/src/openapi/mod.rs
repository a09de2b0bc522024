//! OpenAPI 3.x specification parser
//!
//! Parses OpenAPI documents (JSON or YAML) into the flat list of
//! [`Resource`](resource_codegen_common::Resource)s the generator consumes.
//!
//! ## Vendor extensions
//!
//! Operations are mapped onto resources and methods through extensions:
//! - `x-resource`: resource path (falls back to the first tag)
//! - `x-method`: method name (falls back to the last `operationId` segment)
//! - `x-group`: moves the method into a sub-resource
//! - `x-entity`: entity name used in docs and on the class
//! - `x-beta` / `x-private`: feature-flag gating and visibility
//!
//! ## Usage
//! ```rust,ignore
//! use resource_codegen_parser::openapi::OpenApiParser;
//!
//! let parser = OpenApiParser::from_file("openapi.json")?;
//! let resources = parser.parse()?;
//! ```

mod converter;
mod parser;
mod types;

pub use parser::OpenApiParser;
pub use types::*;
