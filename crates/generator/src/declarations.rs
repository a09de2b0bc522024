//! Type aliases and schema constants derived from method schemas

use crate::ast::{ConstDecl, Item, TypeAlias, TypeExpr};
use indexmap::{IndexMap, IndexSet};
use resource_codegen_common::{Method, Resource, SchemaRef};

/// Namespace the resource module imports its schema module under
pub const SCHEMAS_NAMESPACE: &str = "schemas";

/// `FromSchema<typeof schemas.X>` for a schema constant
pub fn schema_type(schema: &SchemaRef) -> TypeExpr {
    TypeExpr::generic(
        "FromSchema",
        TypeExpr::TypeOf(format!("{}.{}", SCHEMAS_NAMESPACE, schema.title)),
    )
}

/// Schemas a method references, response first
fn method_schemas(method: &Method) -> impl Iterator<Item = &SchemaRef> {
    method.returns.iter().chain(method.data.iter())
}

/// One `FromSchema` alias per object-typed payload/response schema
///
/// Aliases are keyed by name: a schema referenced by several methods yields a
/// single alias, and when two different titles strip to the same alias name
/// the first one is kept.
pub fn type_aliases(resource: &Resource) -> Vec<Item> {
    let mut aliases: IndexMap<String, &SchemaRef> = IndexMap::new();

    for schema in resource
        .methods
        .iter()
        .flat_map(method_schemas)
        .filter(|s| s.is_object())
    {
        let name = schema.alias_name();
        match aliases.get(&name) {
            Some(existing) if existing.title != schema.title => {
                tracing::warn!(
                    "Type alias {} from {} collides with {} in resource {}; keeping {}",
                    name,
                    schema.title,
                    existing.title,
                    resource.path,
                    existing.title
                );
            }
            Some(_) => {}
            None => {
                aliases.insert(name, schema);
            }
        }
    }

    aliases
        .into_iter()
        .map(|(name, schema)| {
            Item::TypeAlias(TypeAlias {
                name,
                ty: schema_type(schema),
                exported: false,
            })
        })
        .collect()
}

/// One immutable schema constant per unique schema title
pub fn schema_constants(resource: &Resource) -> Vec<Item> {
    let mut seen = IndexSet::new();

    resource
        .methods
        .iter()
        .flat_map(method_schemas)
        .filter(|s| seen.insert(s.title.clone()))
        .map(|s| {
            Item::Const(ConstDecl {
                name: s.title.clone(),
                value: s.schema.clone(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::printer::print_type;
    use crate::test_support::{method, schema};
    use serde_json::json;

    fn alias_names(items: &[Item]) -> Vec<(String, String)> {
        items
            .iter()
            .map(|i| match i {
                Item::TypeAlias(a) => (a.name.clone(), print_type(&a.ty)),
                other => panic!("unexpected item {:?}", other),
            })
            .collect()
    }

    #[test]
    fn test_aliases_for_payload_and_response() {
        let mut create = method("create");
        create.data = Some(schema("CreateNotificationSchema", &["title"]));
        create.returns = Some(schema("NotificationSchema", &[]));
        let mut get = method("get");
        get.returns = Some(schema("NotificationSchema", &[]));

        let aliases = alias_names(&type_aliases(&Resource::new("notifications", vec![create, get])));
        assert_eq!(
            aliases,
            vec![
                (
                    "Notification".to_string(),
                    "FromSchema<typeof schemas.NotificationSchema>".to_string()
                ),
                (
                    "CreateNotification".to_string(),
                    "FromSchema<typeof schemas.CreateNotificationSchema>".to_string()
                ),
            ]
        );
    }

    #[test]
    fn test_non_object_schema_has_constant_but_no_alias() {
        let mut m = method("list");
        let mut returns = schema("TagsSchema", &[]);
        returns.schema = json!({"type": "array", "items": {"type": "string"}});
        m.returns = Some(returns);
        let resource = Resource::new("tags", vec![m]);

        assert!(type_aliases(&resource).is_empty());
        let constants = schema_constants(&resource);
        assert_eq!(constants.len(), 1);
        assert!(matches!(&constants[0], Item::Const(c) if c.name == "TagsSchema"));
    }

    #[test]
    fn test_colliding_alias_keeps_first() {
        let mut a = method("get");
        a.returns = Some(schema("Foo", &[]));
        let mut b = method("update");
        b.returns = Some(schema("FooSchema", &[]));

        let aliases = alias_names(&type_aliases(&Resource::new("foo", vec![a, b])));
        assert_eq!(aliases.len(), 1);
        assert_eq!(aliases[0].1, "FromSchema<typeof schemas.Foo>");
    }

    #[test]
    fn test_constants_are_unique_by_title() {
        let mut a = method("get");
        a.returns = Some(schema("NotificationSchema", &[]));
        let mut b = method("create");
        b.data = Some(schema("NotificationSchema", &[]));

        let constants = schema_constants(&Resource::new("notifications", vec![a, b]));
        assert_eq!(constants.len(), 1);
    }
}
