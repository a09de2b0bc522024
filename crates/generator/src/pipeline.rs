//! End-to-end generation run
//!
//! Loading the API description is the only step allowed to fail before the
//! file system is touched. After that the run recreates the output
//! directories, writes every module, refreshes the README regions and finally
//! merges the resource list into the root client.

use crate::client::{client_resources, update_client_file};
use crate::docs::{DocsEmitter, DocsOptions};
use crate::output::OutputLayout;
use crate::printer::print_program;
use crate::readme::{update_readme, FEATURE_FLAGS, RESOURCE_METHODS};
use crate::resource::{file_name, resource_module, schema_module};
use crate::tree::build_tree;
use resource_codegen_common::naming::snake_case;
use resource_codegen_common::{
    FileCategory, GeneratedFile, Method, Resource, ResourceSource, Result,
};
use std::path::{Path, PathBuf};

/// Name of the marker file placed in every output directory
pub const MARKER_FILE: &str = "README.md";

/// Contents of the marker file
pub const MARKER_TEXT: &str =
    "Files in this directory are auto generated. Do not make any manual changes within this directory.\n";

/// Locations and names a run works with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    pub project_root: PathBuf,

    /// Source root holding the category directories
    pub out_dir: PathBuf,

    pub readme_path: PathBuf,

    /// Hand-maintained root client
    pub client_path: PathBuf,

    /// Import path prefix of generated resources as seen from the client
    pub resources_import_prefix: String,

    pub docs: DocsOptions,
}

impl GeneratorConfig {
    /// Conventional layout of a client package rooted at `root`
    pub fn for_project(root: impl Into<PathBuf>) -> Self {
        let project_root = root.into();
        let out_dir = project_root.join("src");
        Self {
            readme_path: project_root.join("README.md"),
            client_path: out_dir.join("client.ts"),
            resources_import_prefix: "./resources/".to_string(),
            docs: DocsOptions::default(),
            out_dir,
            project_root,
        }
    }
}

/// What a run produced
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Top-level resources loaded from the description
    pub resources: usize,

    /// Paths written, in write order
    pub files: Vec<PathBuf>,

    pub beta_methods: usize,

    pub readme_updated: bool,

    pub client_updated: bool,
}

/// Drives a generation run from a resource source
pub struct Orchestrator<S> {
    source: S,
    config: GeneratorConfig,
    docs: DocsEmitter,
}

impl<S: ResourceSource> Orchestrator<S> {
    pub fn new(source: S, config: GeneratorConfig) -> Result<Self> {
        let docs = DocsEmitter::new(config.docs.clone())?;
        Ok(Self {
            source,
            config,
            docs,
        })
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Produce every generated file in memory, marker files last
    pub fn generate_files(&self, resources: &[Resource]) -> Result<Vec<GeneratedFile>> {
        let mut files = Vec::new();

        for resource in resources {
            let node = build_tree(resource);
            let parent_entity = node
                .parent_entity()
                .map(str::to_string)
                .unwrap_or_else(|| snake_case(&resource.path));

            files.extend(self.resource_files(
                &node.parent,
                &node.children,
                &parent_entity,
                FileCategory::Resources,
            )?);

            for child in &node.children {
                let entity = child
                    .methods
                    .first()
                    .map_or(parent_entity.as_str(), |m| m.entity.as_str());
                files.extend(self.resource_files(
                    child,
                    &[],
                    entity,
                    FileCategory::SubResources,
                )?);
            }
        }

        let mut marked: Vec<FileCategory> = Vec::new();
        for category in files.iter().map(|f| f.category) {
            if !marked.iter().any(|c| c.dir_name() == category.dir_name()) {
                marked.push(category);
            }
        }
        files.extend(marked.into_iter().map(|category| GeneratedFile {
            category,
            name: MARKER_FILE.to_string(),
            source: MARKER_TEXT.to_string(),
            docs: None,
        }));

        Ok(files)
    }

    /// Resource module (with docs) and schema module of one resource
    fn resource_files(
        &self,
        resource: &Resource,
        children: &[Resource],
        entity: &str,
        category: FileCategory,
    ) -> Result<[GeneratedFile; 2]> {
        let name = file_name(resource);

        Ok([
            GeneratedFile {
                category,
                name: name.clone(),
                source: print_program(&resource_module(resource, children, entity)),
                docs: self.docs.resource_docs(resource)?,
            },
            GeneratedFile {
                category: FileCategory::Schemas,
                name,
                source: print_program(&schema_module(resource)),
                docs: None,
            },
        ])
    }

    /// Execute a full run
    pub fn run(&self) -> Result<RunSummary> {
        let resources = self.source.load_resources()?;
        tracing::info!("Loaded {} resources", resources.len());

        let beta: Vec<Method> = resources
            .iter()
            .flat_map(|r| r.methods.iter())
            .filter(|m| m.beta)
            .cloned()
            .collect();

        let files = self.generate_files(&resources)?;

        let output = OutputLayout::for_files(&self.config.out_dir, &files).recreate()?;
        let mut written = Vec::with_capacity(files.len());
        for file in &files {
            let path = output.write_file(file)?;
            tracing::info!("Generated {}", self.relative(&path).display());
            written.push(path);
        }

        let docs = files
            .iter()
            .filter_map(|f| f.docs.as_deref())
            .collect::<Vec<_>>()
            .join("\n");
        let flags = self.docs.feature_flag_table(&beta)?;
        let readme_updated = update_readme(
            &self.config.readme_path,
            &[(RESOURCE_METHODS, docs), (FEATURE_FLAGS, flags)],
        )?;
        tracing::info!("Updated {}", self.relative(&self.config.readme_path).display());

        let client_updated = update_client_file(
            &self.config.client_path,
            &client_resources(&files),
            &self.config.resources_import_prefix,
        )?;
        tracing::info!("Updated {}", self.relative(&self.config.client_path).display());

        Ok(RunSummary {
            resources: resources.len(),
            files: written,
            beta_methods: beta.len(),
            readme_updated,
            client_updated,
        })
    }

    fn relative<'a>(&self, path: &'a Path) -> &'a Path {
        path.strip_prefix(&self.config.project_root).unwrap_or(path)
    }
}
