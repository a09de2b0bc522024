//! Two-phase output: recreate the category directories, then write files
//!
//! [`OutputLayout::recreate`] is the only way to obtain a [`PreparedOutput`],
//! and a prepared output refuses to write outside the directories it wiped.
//! Hand-maintained files are edited through [`replace_file`] instead.

use resource_codegen_common::{GeneratedFile, GeneratorError, Result};
use std::collections::BTreeSet;
use std::fs;
use std::io::Write;
use std::path::{Component, Path, PathBuf};
use tempfile::NamedTempFile;

/// Output directories that a run owns, relative to the source root
#[derive(Debug, Clone, Default)]
pub struct OutputLayout {
    root: PathBuf,
    dirs: BTreeSet<String>,
}

impl OutputLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            dirs: BTreeSet::new(),
        }
    }

    /// Layout covering the category directories of `files`
    pub fn for_files(root: impl Into<PathBuf>, files: &[GeneratedFile]) -> Self {
        let mut layout = Self::new(root);
        for file in files {
            layout.add_dir(file.category.dir_name());
        }
        layout
    }

    pub fn add_dir(&mut self, dir: impl Into<String>) {
        self.dirs.insert(dir.into());
    }

    pub fn dirs(&self) -> impl Iterator<Item = &str> {
        self.dirs.iter().map(String::as_str)
    }

    /// Delete and recreate every owned directory
    pub fn recreate(self) -> Result<PreparedOutput> {
        for dir in &self.dirs {
            check_relative(dir)?;
            let path = self.root.join(dir);

            if path.exists() {
                fs::remove_dir_all(&path).map_err(|e| {
                    GeneratorError::Output(format!(
                        "Failed to remove {}: {}",
                        path.display(),
                        e
                    ))
                })?;
            }

            fs::create_dir_all(&path).map_err(|e| {
                GeneratorError::Output(format!("Failed to create {}: {}", path.display(), e))
            })?;
            tracing::debug!("Recreated {}", path.display());
        }

        Ok(PreparedOutput {
            root: self.root,
            dirs: self.dirs,
        })
    }
}

/// Write handle over freshly recreated directories
#[derive(Debug)]
pub struct PreparedOutput {
    root: PathBuf,
    dirs: BTreeSet<String>,
}

impl PreparedOutput {
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Write `contents` to `dir/name`, creating nested directories as needed
    pub fn write(&self, dir: &str, name: &str, contents: &str) -> Result<PathBuf> {
        if !self.dirs.contains(dir) {
            return Err(GeneratorError::Output(format!(
                "Directory {} was not prepared for output",
                dir
            )));
        }
        check_relative(name)?;

        let path = self.root.join(dir).join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                GeneratorError::Output(format!("Failed to create {}: {}", parent.display(), e))
            })?;
        }

        fs::write(&path, contents).map_err(|e| {
            GeneratorError::Output(format!("Failed to write {}: {}", path.display(), e))
        })?;

        Ok(path)
    }

    pub fn write_file(&self, file: &GeneratedFile) -> Result<PathBuf> {
        self.write(file.category.dir_name(), &file.name, &file.source)
    }
}

/// Replace the contents of an existing file atomically
///
/// The new contents go to a temporary file next to `path` that is then
/// renamed over it, so a failed write leaves the original intact.
pub fn replace_file(path: &Path, contents: &str) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp = NamedTempFile::new_in(dir).map_err(|e| {
        GeneratorError::Output(format!("Failed to create temporary file in {}: {}", dir.display(), e))
    })?;
    temp.write_all(contents.as_bytes()).map_err(|e| {
        GeneratorError::Output(format!("Failed to write {}: {}", temp.path().display(), e))
    })?;
    temp.persist(path).map_err(|e| {
        GeneratorError::Output(format!("Failed to replace {}: {}", path.display(), e.error))
    })?;

    tracing::debug!("Replaced {}", path.display());
    Ok(())
}

/// Reject absolute paths and parent directory components
fn check_relative(path: &str) -> Result<()> {
    let escapes = Path::new(path)
        .components()
        .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));

    if path.is_empty() || escapes {
        return Err(GeneratorError::Output(format!(
            "Refusing to write outside the output directory: {:?}",
            path
        )));
    }
    Ok(())
}
