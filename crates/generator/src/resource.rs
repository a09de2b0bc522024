//! Assembly of the generated resource and schema modules

use crate::ast::{ClassDecl, ClassMember, Expr, ImportDecl, Item, Program};
use crate::declarations::{schema_constants, type_aliases, SCHEMAS_NAMESPACE};
use crate::method::{synthesize_method, ITERABLE_PROMISE, REQUEST_OPTIONS};
use resource_codegen_common::naming::{camel_case, hyphen_case, pascal_case};
use resource_codegen_common::Resource;

/// Comment placed at the top of every generated module
pub const GENERATED_HEADER: &str = "This file is generated. Do not update manually!";

/// Class name of a resource (`users_push-subscriptions` -> `UsersPushSubscriptions`)
pub fn class_name(resource: &Resource) -> String {
    pascal_case(&resource.name)
}

/// File name of a resource's modules, relative to the category directory
pub fn file_name(resource: &Resource) -> String {
    format!("{}.ts", hyphen_case(&resource.path))
}

/// Relative prefix from a resource module back to the source root
fn dots(resource: &Resource) -> String {
    let depth = resource.path.matches('/').count() + 1;
    "../".repeat(depth).trim_end_matches('/').to_string()
}

/// Last segment of a hyphen-cased path
fn last_segment(path: &str) -> String {
    let hyphenated = hyphen_case(path);
    hyphenated
        .rsplit('/')
        .next()
        .unwrap_or(&hyphenated)
        .to_string()
}

/// Property name a sub-resource is exposed under on its parent
fn child_property(parent: &Resource, child: &Resource) -> String {
    let prefix = format!("{}_", parent.name);
    camel_case(child.name.strip_prefix(&prefix).unwrap_or(&child.name))
}

/// Build the resource module: imports, type aliases and the exported class
///
/// `entity` is the value of the class `entity` property; callers pass the
/// first method's entity tag.
pub fn resource_module(resource: &Resource, children: &[Resource], entity: &str) -> Program {
    let dots = dots(resource);
    let mut items = vec![
        Item::Import(ImportDecl::type_only("FromSchema", "json-schema-to-ts")),
        Item::Import(ImportDecl::named("Resource", format!("{}/resource", dots))),
        Item::Import(ImportDecl::namespace(
            SCHEMAS_NAMESPACE,
            format!("{}/schemas/{}", dots, hyphen_case(&resource.path)),
        )),
        Item::Import(ImportDecl::type_only(
            REQUEST_OPTIONS,
            format!("{}/types", dots),
        )),
    ];

    if resource.has_list_method() {
        items.push(Item::Import(ImportDecl::type_only(
            ITERABLE_PROMISE,
            format!("{}/method", dots),
        )));
    }

    let parent_dir = last_segment(&resource.path);
    for child in children {
        items.push(Item::Import(ImportDecl::named(
            class_name(child),
            format!("./{}/{}", parent_dir, last_segment(&child.path)),
        )));
    }

    items.extend(type_aliases(resource));

    let mut members = vec![
        ClassMember::Property {
            name: "path".to_string(),
            value: Expr::Str(resource.base_path().to_string()),
        },
        ClassMember::Property {
            name: "entity".to_string(),
            value: Expr::Str(entity.to_string()),
        },
    ];

    members.extend(children.iter().map(|child| ClassMember::Property {
        name: child_property(resource, child),
        value: Expr::New {
            callee: class_name(child),
            args: vec![Expr::ident("this.client")],
        },
    }));

    members.extend(
        resource
            .methods
            .iter()
            .filter(|m| !m.private)
            .flat_map(synthesize_method),
    );

    items.push(Item::Class(ClassDecl {
        name: class_name(resource),
        extends: Some("Resource".to_string()),
        members,
    }));

    Program {
        header: Some(GENERATED_HEADER.to_string()),
        items,
    }
}

/// Build the schema module: one exported constant per referenced schema
pub fn schema_module(resource: &Resource) -> Program {
    Program {
        header: Some(GENERATED_HEADER.to_string()),
        items: schema_constants(resource),
    }
}
