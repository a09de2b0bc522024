//! Retrieval of the API description

use crate::OpenApiParser;
use resource_codegen_common::{GeneratorError, Resource, ResourceSource, Result};
use std::fmt;
use std::path::PathBuf;

/// Location used when no `--spec` override is given
pub const DEFAULT_SPEC_URL: &str =
    "https://raw.githubusercontent.com/magicbell-io/public/main/openapi/spec/openapi.json";

/// Where the API description lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecLocation {
    /// Remote document fetched over HTTP(S)
    Url(String),

    /// Local file
    File(PathBuf),
}

impl SpecLocation {
    /// Interpret a command-line value as a URL or a file path
    pub fn parse(value: &str) -> Self {
        if value.starts_with("http://") || value.starts_with("https://") {
            SpecLocation::Url(value.to_string())
        } else {
            SpecLocation::File(PathBuf::from(value))
        }
    }
}

impl Default for SpecLocation {
    fn default() -> Self {
        SpecLocation::Url(DEFAULT_SPEC_URL.to_string())
    }
}

impl fmt::Display for SpecLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpecLocation::Url(url) => write!(f, "{}", url),
            SpecLocation::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Loads resources from an OpenAPI document at a [`SpecLocation`]
#[derive(Debug, Clone)]
pub struct SpecSource {
    location: SpecLocation,
}

impl SpecSource {
    pub fn new(location: SpecLocation) -> Self {
        Self { location }
    }

    pub fn location(&self) -> &SpecLocation {
        &self.location
    }

    /// Read the raw document text
    pub fn fetch(&self) -> Result<String> {
        match &self.location {
            SpecLocation::Url(url) => fetch_url(url),
            SpecLocation::File(path) => std::fs::read_to_string(path).map_err(|e| {
                GeneratorError::Fetch(format!("Failed to read {}: {}", path.display(), e))
            }),
        }
    }
}

impl ResourceSource for SpecSource {
    fn load_resources(&self) -> Result<Vec<Resource>> {
        let content = self.fetch()?;
        tracing::debug!("Loaded {} bytes from {}", content.len(), self.location);
        OpenApiParser::from_str(&content)?.parse()
    }
}

fn fetch_url(url: &str) -> Result<String> {
    let client = reqwest::blocking::Client::builder()
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| GeneratorError::Fetch(format!("Failed to build HTTP client: {}", e)))?;

    client
        .get(url)
        .send()
        .and_then(|response| response.error_for_status())
        .and_then(|response| response.text())
        .map_err(|e| GeneratorError::Fetch(format!("Failed to fetch {}: {}", url, e)))
}
