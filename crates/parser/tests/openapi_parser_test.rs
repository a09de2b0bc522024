//! Integration test for OpenAPI parser

use resource_codegen_common::{HttpMethod, Resource};
use resource_codegen_parser::OpenApiParser;

const NOTIFICATIONS_SPEC: &str = r##"{
    "openapi": "3.0.0",
    "info": {
        "title": "Notifications API",
        "version": "2.0.0"
    },
    "paths": {
        "/notifications": {
            "get": {
                "operationId": "notifications-list",
                "summary": "List notifications",
                "tags": ["notifications"],
                "x-beta": true,
                "parameters": [
                    {
                        "name": "per_page",
                        "in": "query",
                        "description": "Page size",
                        "schema": {"type": "integer"}
                    },
                    {
                        "name": "x-magicbell-user-email",
                        "in": "header",
                        "schema": {"type": "string"}
                    }
                ],
                "responses": {
                    "200": {
                        "description": "A page of notifications",
                        "content": {
                            "application/json": {
                                "schema": {"$ref": "#/components/schemas/NotificationList"}
                            }
                        }
                    }
                }
            },
            "post": {
                "operationId": "notifications-create",
                "tags": ["notifications"],
                "requestBody": {
                    "content": {
                        "application/json": {
                            "schema": {"$ref": "#/components/schemas/CreateNotification"},
                            "example": {"notification": {"title": "Hello"}}
                        }
                    }
                },
                "responses": {
                    "201": {
                        "description": "Created",
                        "content": {
                            "application/json": {
                                "schema": {"$ref": "#/components/schemas/Notification"}
                            }
                        }
                    }
                }
            }
        },
        "/notifications/{notification_id}": {
            "parameters": [
                {
                    "name": "notification_id",
                    "in": "path",
                    "required": true,
                    "description": "ID of the notification",
                    "schema": {"type": "string"}
                }
            ],
            "get": {
                "operationId": "notifications-get",
                "x-resource": "notifications",
                "responses": {
                    "200": {
                        "description": "The notification",
                        "content": {
                            "application/json": {
                                "schema": {"$ref": "#/components/schemas/Notification"}
                            }
                        }
                    }
                }
            },
            "delete": {
                "operationId": "notifications-delete",
                "tags": ["notifications"],
                "x-private": true,
                "responses": {
                    "204": {"description": "Deleted"}
                }
            }
        },
        "/users/{user_id}/push_subscriptions": {
            "get": {
                "operationId": "fetchUserPushSubscriptions",
                "x-resource": "users",
                "x-group": "push_subscriptions",
                "x-method": "list",
                "x-entity": "push_subscription",
                "parameters": [
                    {"name": "user_id", "in": "path", "required": true, "schema": {"type": "string"}}
                ],
                "responses": {
                    "200": {
                        "description": "Subscriptions",
                        "content": {
                            "application/json": {
                                "schema": {"$ref": "#/components/schemas/Missing"}
                            }
                        }
                    }
                }
            }
        },
        "/internal/health": {
            "get": {
                "operationId": "health",
                "responses": {"200": {"description": "ok"}}
            }
        }
    },
    "components": {
        "schemas": {
            "Notification": {
                "type": "object",
                "properties": {
                    "id": {"type": "string"},
                    "title": {"type": "string"}
                }
            },
            "NotificationList": {
                "type": "object",
                "properties": {
                    "data": {
                        "type": "array",
                        "items": {"$ref": "#/components/schemas/Notification"}
                    }
                }
            },
            "CreateNotification": {
                "title": "CreateNotificationSchema",
                "type": "object",
                "required": ["title"],
                "properties": {
                    "title": {"type": "string"}
                }
            }
        }
    }
}"##;

fn parse() -> Vec<Resource> {
    OpenApiParser::from_str(NOTIFICATIONS_SPEC)
        .expect("Failed to parse spec")
        .parse()
        .expect("Failed to convert spec")
}

#[test]
fn test_resources_in_document_order() {
    let resources = parse();

    let paths: Vec<&str> = resources.iter().map(|r| r.path.as_str()).collect();
    assert_eq!(paths, vec!["notifications", "users"]);

    let names: Vec<&str> = resources[0].methods.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["list", "create", "get", "delete"]);
}

#[test]
fn test_query_payload_and_inlined_response() {
    let resources = parse();
    let list = &resources[0].methods[0];

    assert_eq!(list.http_method, HttpMethod::Get);
    assert!(list.beta);
    assert!(list.is_paged());
    assert!(list.query_data);
    assert!(list.has_header("X-MagicBell-User-Email"));
    assert_eq!(list.entity, "notification");

    let data = list.data.as_ref().expect("query payload");
    assert_eq!(data.title, "NotificationsListQuerySchema");
    assert_eq!(data.schema["properties"]["per_page"]["type"], "integer");
    assert_eq!(data.schema["properties"]["per_page"]["description"], "Page size");

    let returns = list.returns.as_ref().expect("response schema");
    assert_eq!(returns.title, "NotificationList");
    assert_eq!(returns.alias_name(), "NotificationList");
    assert_eq!(
        returns.schema["properties"]["data"]["items"]["properties"]["id"]["type"],
        "string"
    );
    assert_eq!(returns.description.as_deref(), Some("A page of notifications"));
}

#[test]
fn test_request_body_payload() {
    let resources = parse();
    let create = &resources[0].methods[1];

    assert_eq!(create.http_method, HttpMethod::Post);
    assert!(!create.query_data);

    let data = create.data.as_ref().expect("body payload");
    assert_eq!(data.title, "CreateNotificationSchema");
    assert_eq!(data.alias_name(), "CreateNotification");
    assert_eq!(data.required, vec!["title".to_string()]);
    assert_eq!(
        create.request_example,
        Some(serde_json::json!({"notification": {"title": "Hello"}}))
    );
    assert_eq!(create.returns.as_ref().map(|r| r.title.as_str()), Some("Notification"));
}

#[test]
fn test_path_level_parameters_and_flags() {
    let resources = parse();
    let get = &resources[0].methods[2];
    let delete = &resources[0].methods[3];

    assert_eq!(get.path, "/notifications/{notification_id}");
    assert_eq!(get.params.len(), 1);
    assert_eq!(get.params[0].title, "notification_id");
    assert_eq!(get.params[0].description.as_deref(), Some("ID of the notification"));
    assert!(get.data.is_none());

    assert!(delete.private);
    assert!(delete.returns.is_none());
}

#[test]
fn test_grouped_method_and_missing_schema() {
    let resources = parse();
    let users = &resources[1];
    let method = &users.methods[0];

    assert_eq!(method.name, "list");
    assert_eq!(method.group.as_deref(), Some("push-subscriptions"));
    assert_eq!(method.entity, "push_subscription");
    assert_eq!(method.params[0].title, "user_id");
    // An undeclared response schema degrades to no response
    assert!(method.returns.is_none());
}

#[test]
fn test_yaml_description() {
    let yaml = r#"
openapi: 3.0.0
info:
  title: Broadcasts
  version: "1"
paths:
  /broadcasts:
    get:
      operationId: broadcasts-list
      tags: [broadcasts]
      responses:
        '200':
          description: ok
"#;

    let resources = OpenApiParser::from_str(yaml).unwrap().parse().unwrap();
    assert_eq!(resources.len(), 1);
    assert_eq!(resources[0].path, "broadcasts");
    assert_eq!(resources[0].methods[0].name, "list");
    assert_eq!(resources[0].methods[0].entity, "broadcast");
}
