//! Wiring of generated resources into the hand-maintained root client
//!
//! The client file is parsed as TypeScript and rewritten: only the imports
//! from the generated resources directory and the properties instantiating
//! those classes are replaced. See [`update_client_source`] for the exact
//! rules.

mod merge;
mod syntax;

pub use merge::{update_client_source, Origin};

use crate::output::replace_file;
use resource_codegen_common::naming::{camel_case, pascal_case};
use resource_codegen_common::{FileCategory, GeneratedFile, GeneratorError, Result};
use std::fs;
use std::path::Path;

/// A top-level resource as seen from the root client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientResource {
    /// Module path relative to the resources directory, without extension
    pub file: String,
    pub class: String,
    pub property: String,
}

/// Top-level resources among the generated files, sorted by property name
pub fn client_resources(files: &[GeneratedFile]) -> Vec<ClientResource> {
    let mut resources: Vec<ClientResource> = files
        .iter()
        .filter(|f| f.category == FileCategory::Resources)
        .filter_map(|f| f.name.strip_suffix(".ts"))
        .map(|file| {
            let name = file.replace('/', "-");
            ClientResource {
                file: file.to_string(),
                class: pascal_case(&name),
                property: camel_case(&name),
            }
        })
        .collect();

    resources.sort_by(|a, b| a.property.cmp(&b.property));
    resources
}

/// Rewrite the client file at `path`, writing only on change
///
/// Returns whether the file was modified.
pub fn update_client_file(path: &Path, resources: &[ClientResource], prefix: &str) -> Result<bool> {
    let source = fs::read_to_string(path).map_err(|e| {
        GeneratorError::Structure(format!("Failed to read {}: {}", path.display(), e))
    })?;

    let updated = update_client_source(&source, resources, prefix)?;
    if updated == source {
        return Ok(false);
    }

    replace_file(path, &updated)?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const PREFIX: &str = "./resources/";

    const CLIENT: &str = r#"// Root client
import { Imports } from './resources/imports';
import { BaseClient } from './client/client';
import { Stale } from './resources/stale';
import { type ClientOptions } from './client/options';

export class Client extends BaseClient {
  imports = new Imports(this);
  /** kept */
  version = '1.0';
  stale = new Stale(this);

  constructor(options: ClientOptions) {
    super(options);
  }

  custom = new Custom(this);

  get apiKey() {
    return this.options.apiKey;
  }
}

export default Client;
"#;

    fn file(category: FileCategory, name: &str) -> GeneratedFile {
        GeneratedFile {
            category,
            name: name.to_string(),
            source: String::new(),
            docs: None,
        }
    }

    fn resources() -> Vec<ClientResource> {
        client_resources(&[
            file(FileCategory::Resources, "users.ts"),
            file(FileCategory::SubResources, "users/push-subscriptions.ts"),
            file(FileCategory::Schemas, "users.ts"),
            file(FileCategory::Resources, "broadcasts.ts"),
            file(FileCategory::Resources, "README.md"),
        ])
    }

    #[test]
    fn test_client_resources_sorted_top_level_only() {
        let resources = resources();
        assert_eq!(
            resources,
            vec![
                ClientResource {
                    file: "broadcasts".to_string(),
                    class: "Broadcasts".to_string(),
                    property: "broadcasts".to_string(),
                },
                ClientResource {
                    file: "users".to_string(),
                    class: "Users".to_string(),
                    property: "users".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_nested_top_level_path() {
        let resources = client_resources(&[file(FileCategory::Resources, "users/emails.ts")]);
        assert_eq!(resources[0].file, "users/emails");
        assert_eq!(resources[0].class, "UsersEmails");
        assert_eq!(resources[0].property, "usersEmails");
    }

    #[test]
    fn test_update_replaces_generated_and_keeps_manual() {
        let out = update_client_source(CLIENT, &resources(), PREFIX).unwrap();

        let expected = r#"// Root client
import { Broadcasts } from './resources/broadcasts';
import { Users } from './resources/users';
import { BaseClient } from './client/client';
import { type ClientOptions } from './client/options';

export class Client extends BaseClient {
  /** kept */
  version = '1.0';

  constructor(options: ClientOptions) {
    super(options);
  }

  broadcasts = new Broadcasts(this);
  users = new Users(this);

  custom = new Custom(this);

  get apiKey() {
    return this.options.apiKey;
  }
}

export default Client;
"#;
        assert_eq!(out, expected);
    }

    #[test]
    fn test_update_is_a_fixed_point() {
        let once = update_client_source(CLIENT, &resources(), PREFIX).unwrap();
        let twice = update_client_source(&once, &resources(), PREFIX).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_missing_class_is_fatal() {
        let result = update_client_source("export const client = {};\n", &resources(), PREFIX);
        assert!(matches!(result, Err(GeneratorError::Structure(_))));
    }

    #[test]
    fn test_update_client_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("client.ts");
        fs::write(&path, CLIENT).unwrap();

        assert!(update_client_file(&path, &resources(), PREFIX).unwrap());
        assert!(!update_client_file(&path, &resources(), PREFIX).unwrap());
        assert!(fs::read_to_string(&path)
            .unwrap()
            .contains("  users = new Users(this);\n"));
    }
}
