//! Common types and utilities for the resource code generator
//!
//! This crate contains the API model shared by the parser, the generator and
//! the CLI, together with the error type and the naming helpers used to turn
//! resource paths into file, class and property names.

pub mod model;
pub mod naming;

pub use model::{
    FileCategory, GeneratedFile, HttpMethod, Method, Parameter, ParameterLocation, PathParam,
    Resource, SchemaRef,
};

use thiserror::Error;

/// Errors that can occur while generating client resources
#[derive(Error, Debug)]
pub enum GeneratorError {
    #[error("Fetch error: {0}")]
    Fetch(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Structure error: {0}")]
    Structure(String),

    #[error("Region error: {0}")]
    Region(String),

    #[error("Output error: {0}")]
    Output(String),

    #[error("Template error: {0}")]
    Template(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for generator operations
pub type Result<T> = std::result::Result<T, GeneratorError>;

/// Anything that can produce the flat list of API resources
///
/// The parser implements this for remote and local OpenAPI documents; the
/// pipeline only depends on this trait so that retrieval can be swapped out.
pub trait ResourceSource {
    /// Load every resource described by the API description
    fn load_resources(&self) -> Result<Vec<Resource>>;
}
