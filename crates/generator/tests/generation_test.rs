//! Integration test for a full generation run

use resource_codegen_generator::{GeneratorConfig, Orchestrator};
use resource_codegen_parser::{SpecLocation, SpecSource};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const SPEC: &str = r##"{
    "openapi": "3.0.0",
    "info": {"title": "Messaging", "version": "1.0.0"},
    "paths": {
        "/broadcasts": {
            "get": {
                "operationId": "broadcasts-list",
                "summary": "Fetch broadcasts",
                "tags": ["broadcasts"],
                "responses": {
                    "200": {
                        "description": "Broadcast page",
                        "content": {"application/json": {"schema": {"$ref": "#/components/schemas/BroadcastListSchema"}}}
                    }
                }
            },
            "post": {
                "operationId": "broadcasts-create",
                "summary": "Create a broadcast",
                "tags": ["broadcasts"],
                "x-beta": true,
                "requestBody": {
                    "content": {"application/json": {"schema": {"$ref": "#/components/schemas/BroadcastSchema"}}}
                },
                "responses": {
                    "201": {
                        "description": "Created broadcast",
                        "content": {"application/json": {"schema": {"$ref": "#/components/schemas/BroadcastSchema"}}}
                    }
                }
            }
        },
        "/users/{user_id}": {
            "delete": {
                "operationId": "users-delete",
                "summary": "Delete a user",
                "tags": ["users"],
                "parameters": [
                    {"name": "user_id", "in": "path", "required": true, "schema": {"type": "string"}}
                ],
                "responses": {"204": {"description": "Deleted"}}
            }
        },
        "/users/{user_id}/push_subscriptions": {
            "get": {
                "operationId": "users-push-subscriptions-list",
                "summary": "Fetch a user's push subscriptions",
                "tags": ["users"],
                "x-group": "push_subscriptions",
                "parameters": [
                    {"name": "user_id", "in": "path", "required": true, "schema": {"type": "string"}},
                    {"name": "page", "in": "query", "schema": {"type": "integer"}}
                ],
                "responses": {
                    "200": {
                        "description": "Subscriptions",
                        "content": {"application/json": {"schema": {"$ref": "#/components/schemas/PushSubscriptionListSchema"}}}
                    }
                }
            }
        }
    },
    "components": {
        "schemas": {
            "BroadcastSchema": {
                "type": "object",
                "properties": {
                    "title": {"type": "string"},
                    "content": {"type": "string"}
                }
            },
            "BroadcastListSchema": {
                "type": "object",
                "properties": {
                    "data": {"type": "array", "items": {"$ref": "#/components/schemas/BroadcastSchema"}}
                }
            },
            "PushSubscriptionListSchema": {
                "type": "object",
                "properties": {"data": {"type": "array", "items": {"type": "object"}}}
            }
        }
    }
}"##;

const README: &str = "# Messaging SDK\n\n## Resource methods\n\n<!-- AUTO-GENERATED-CONTENT:START (RESOURCE_METHODS) -->\n<!-- AUTO-GENERATED-CONTENT:END -->\n\n## Feature flags\n\n<!-- AUTO-GENERATED-CONTENT:START (FEATURE_FLAGS) -->\n<!-- AUTO-GENERATED-CONTENT:END -->\n";

const CLIENT: &str = "import { BaseClient } from './client/client';\nimport { type ClientOptions } from './client/options';\n\nexport class Client extends BaseClient {\n  constructor(options: ClientOptions) {\n    super(options);\n  }\n}\n";

fn setup_project() -> TempDir {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    fs::create_dir_all(root.join("src/schemas")).unwrap();
    fs::write(root.join("src/schemas/removed.ts"), "stale").unwrap();
    fs::write(root.join("README.md"), README).unwrap();
    fs::write(root.join("src/client.ts"), CLIENT).unwrap();
    fs::write(root.join("openapi.json"), SPEC).unwrap();
    temp
}

fn orchestrator(root: &Path) -> Orchestrator<SpecSource> {
    let source = SpecSource::new(SpecLocation::File(root.join("openapi.json")));
    Orchestrator::new(source, GeneratorConfig::for_project(root)).unwrap()
}

fn read(root: &Path, relative: &str) -> String {
    fs::read_to_string(root.join(relative))
        .unwrap_or_else(|e| panic!("Failed to read {}: {}", relative, e))
}

#[test]
fn test_generate_messaging_client() {
    let temp = setup_project();
    let root = temp.path();

    let summary = orchestrator(root).run().expect("Generation failed");
    assert_eq!(summary.resources, 2);
    assert_eq!(summary.beta_methods, 1);

    // Stale output is gone, markers are in place
    assert!(!root.join("src/schemas/removed.ts").exists());
    assert!(root.join("src/resources/README.md").exists());
    assert!(root.join("src/schemas/README.md").exists());

    let broadcasts = read(root, "src/resources/broadcasts.ts");
    assert!(broadcasts.starts_with("// This file is generated. Do not update manually!\n\n"));
    assert!(broadcasts.contains("import { type IterablePromise } from '../method';\n"));
    assert!(broadcasts.contains("type BroadcastList = FromSchema<typeof schemas.BroadcastListSchema>;\ntype Broadcast = FromSchema<typeof schemas.BroadcastSchema>;\n"));
    assert!(broadcasts.contains("export class Broadcasts extends Resource {\n  path = 'broadcasts';\n  entity = 'broadcast';\n"));
    assert!(broadcasts.contains("  list(options?: RequestOptions): IterablePromise<BroadcastList> {\n"));
    assert!(broadcasts.contains("  create(options?: RequestOptions): Promise<Broadcast>;\n"));
    assert!(broadcasts.contains("  create(data: Broadcast, options?: RequestOptions): Promise<Broadcast>;\n"));
    assert!(broadcasts.contains("  create(dataOrOptions?: Broadcast | RequestOptions, options?: RequestOptions): Promise<Broadcast> {\n    this.assertFeatureFlag('broadcasts-create');\n"));

    let users = read(root, "src/resources/users.ts");
    assert!(users.contains("import { UsersPushSubscriptions } from './users/push-subscriptions';\n"));
    assert!(users.contains("  pushSubscriptions = new UsersPushSubscriptions(this.client);\n"));
    assert!(users.contains("  delete(userId: string, options?: RequestOptions): Promise<void> {\n"));

    let push = read(root, "src/resources/users/push-subscriptions.ts");
    assert!(push.contains("import { Resource } from '../../resource';\n"));
    assert!(push.contains("export class UsersPushSubscriptions extends Resource {\n  path = 'users';\n"));
    assert!(push.contains("type UsersPushSubscriptionsListQuery = FromSchema<typeof schemas.UsersPushSubscriptionsListQuerySchema>;\n"));

    let schemas = read(root, "src/schemas/broadcasts.ts");
    assert!(schemas.contains("export const BroadcastListSchema = {\n"));
    assert!(schemas.contains("export const BroadcastSchema = {\n"));
    assert_eq!(schemas.matches("export const BroadcastSchema").count(), 1);

    let readme = read(root, "README.md");
    assert!(readme.contains("### Broadcasts\n\n#### Fetch broadcasts\n\n```js\nawait magicbell.broadcasts.list();\n```\n"));
    assert!(readme.contains("await magicbell.users.pushSubscriptions.list('{user_id}', {\n  page: 0,\n});"));
    assert!(readme.contains("| `broadcasts-create` | Create a broadcast ([docs](#broadcasts-create)) |"));

    let client = read(root, "src/client.ts");
    assert_eq!(
        client,
        "import { Broadcasts } from './resources/broadcasts';\nimport { Users } from './resources/users';\nimport { BaseClient } from './client/client';\nimport { type ClientOptions } from './client/options';\n\nexport class Client extends BaseClient {\n  constructor(options: ClientOptions) {\n    super(options);\n  }\n\n  broadcasts = new Broadcasts(this);\n  users = new Users(this);\n}\n"
    );
}

#[test]
fn test_second_run_is_stable() {
    let temp = setup_project();
    let root = temp.path();

    orchestrator(root).run().expect("First run failed");
    let readme = read(root, "README.md");
    let client = read(root, "src/client.ts");
    let module = read(root, "src/resources/broadcasts.ts");

    let summary = orchestrator(root).run().expect("Second run failed");
    assert!(!summary.readme_updated);
    assert!(!summary.client_updated);
    assert_eq!(read(root, "README.md"), readme);
    assert_eq!(read(root, "src/client.ts"), client);
    assert_eq!(read(root, "src/resources/broadcasts.ts"), module);
}

#[test]
fn test_missing_client_class_fails_after_writing() {
    let temp = setup_project();
    let root = temp.path();
    fs::write(root.join("src/client.ts"), "export const client = {};\n").unwrap();

    let result = orchestrator(root).run();
    assert!(result.is_err());
    assert_eq!(read(root, "src/client.ts"), "export const client = {};\n");
}

#[test]
fn test_missing_spec_leaves_project_untouched() {
    let temp = setup_project();
    let root = temp.path();
    fs::remove_file(root.join("openapi.json")).unwrap();

    assert!(orchestrator(root).run().is_err());
    assert_eq!(read(root, "src/schemas/removed.ts"), "stale");
    assert_eq!(read(root, "README.md"), README);
}
