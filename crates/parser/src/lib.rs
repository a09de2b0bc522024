//! API description loading for the resource code generator
//!
//! This crate turns an OpenAPI document, fetched over HTTP or read from
//! disk, into the flat list of resources consumed by the generator.

pub mod openapi;
pub mod source;

pub use openapi::OpenApiParser;
pub use source::{SpecLocation, SpecSource, DEFAULT_SPEC_URL};
