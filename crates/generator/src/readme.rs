//! Replacement of marked regions in the project README

use crate::output::replace_file;
use resource_codegen_common::{GeneratorError, Result};
use std::fs;
use std::path::Path;

/// Region holding the per-resource method docs
pub const RESOURCE_METHODS: &str = "RESOURCE_METHODS";

/// Region holding the beta feature flag table
pub const FEATURE_FLAGS: &str = "FEATURE_FLAGS";

const END_MARKER: &str = "<!-- AUTO-GENERATED-CONTENT:END -->";

fn start_marker(name: &str) -> String {
    format!("<!-- AUTO-GENERATED-CONTENT:START ({}) -->", name)
}

/// Replace everything between a region's start and end markers
///
/// The markers stay in place; the content is surrounded by single newlines so
/// that running the replacement twice yields the same text.
pub fn replace_region(text: &str, name: &str, content: &str) -> Result<String> {
    let start = start_marker(name);

    let open = text.find(&start).ok_or_else(|| {
        GeneratorError::Region(format!("Start marker for region {} not found", name))
    })?;
    let body_start = open + start.len();

    let close = text[body_start..]
        .find(END_MARKER)
        .map(|i| body_start + i)
        .ok_or_else(|| {
            GeneratorError::Region(format!("End marker for region {} not found", name))
        })?;

    let mut out = String::with_capacity(text.len() + content.len());
    out.push_str(&text[..body_start]);
    out.push('\n');
    out.push_str(content.trim());
    out.push('\n');
    out.push_str(&text[close..]);
    Ok(out)
}

/// Apply region replacements to a README file, writing only on change
///
/// Returns whether the file was modified.
pub fn update_readme(path: &Path, regions: &[(&str, String)]) -> Result<bool> {
    let original = fs::read_to_string(path).map_err(|e| {
        GeneratorError::Region(format!("Failed to read {}: {}", path.display(), e))
    })?;

    let updated = regions
        .iter()
        .try_fold(original.clone(), |text, (name, content)| {
            replace_region(&text, name, content)
        })?;

    if updated == original {
        return Ok(false);
    }

    replace_file(path, &updated)?;
    Ok(true)
}
