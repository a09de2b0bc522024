//! Partitioning of a resource into a parent and its grouped sub-resources

use indexmap::IndexSet;
use resource_codegen_common::Resource;

/// A resource with ungrouped methods plus one child per group tag
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceNode {
    pub parent: Resource,
    pub children: Vec<Resource>,
}

impl ResourceNode {
    /// Parent followed by its children
    pub fn resources(&self) -> impl Iterator<Item = &Resource> {
        std::iter::once(&self.parent).chain(self.children.iter())
    }

    /// Entity of the parent class; falls back to the first child when every
    /// method was moved into a group
    pub fn parent_entity(&self) -> Option<&str> {
        self.resources()
            .flat_map(|r| r.methods.first())
            .map(|m| m.entity.as_str())
            .next()
    }
}

/// Distinct group tags in first-seen order
pub fn group_tags(resource: &Resource) -> IndexSet<&str> {
    resource
        .methods
        .iter()
        .filter_map(|m| m.group.as_deref())
        .fold(IndexSet::new(), |mut tags, tag| {
            tags.insert(tag);
            tags
        })
}

/// Split a resource into its ungrouped parent and one child per group tag
pub fn build_tree(resource: &Resource) -> ResourceNode {
    let tags = group_tags(resource);

    let parent = Resource {
        name: resource.name.clone(),
        path: resource.path.clone(),
        methods: resource
            .methods
            .iter()
            .filter(|m| m.group.is_none())
            .cloned()
            .collect(),
    };

    let children = tags
        .iter()
        .map(|tag| Resource {
            name: format!("{}_{}", resource.name, tag),
            path: format!("{}/{}", resource.path, tag),
            methods: resource
                .methods
                .iter()
                .filter(|m| m.group.as_deref() == Some(*tag))
                .cloned()
                .collect(),
        })
        .collect();

    ResourceNode { parent, children }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::method;

    fn grouped(name: &str, group: Option<&str>) -> resource_codegen_common::Method {
        let mut m = method(name);
        m.operation_id = format!("{}-{}", group.unwrap_or("root"), name);
        m.group = group.map(str::to_string);
        m
    }

    #[test]
    fn test_partitions_methods_by_group() {
        let resource = Resource::new(
            "users",
            vec![
                grouped("list", None),
                grouped("get", Some("A")),
                grouped("create", Some("B")),
                grouped("delete", Some("A")),
                grouped("update", None),
            ],
        );

        let node = build_tree(&resource);

        assert_eq!(node.parent.path, "users");
        assert_eq!(node.parent.methods.len(), 2);
        assert!(node.parent.methods.iter().all(|m| m.group.is_none()));

        let names: Vec<&str> = node.children.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["users_A", "users_B"]);
        assert_eq!(node.children[0].path, "users/A");
        assert_eq!(node.children[0].methods.len(), 2);
        assert_eq!(node.children[1].methods.len(), 1);

        let mut ids: Vec<String> = node
            .resources()
            .flat_map(|r| r.methods.iter().map(|m| m.operation_id.clone()))
            .collect();
        ids.sort();
        let mut expected: Vec<String> = resource
            .methods
            .iter()
            .map(|m| m.operation_id.clone())
            .collect();
        expected.sort();
        assert_eq!(ids, expected);
    }

    #[test]
    fn test_no_groups_yields_no_children() {
        let resource = Resource::new("notifications", vec![grouped("list", None)]);
        let node = build_tree(&resource);
        assert!(node.children.is_empty());
        assert_eq!(node.parent, resource);
    }

    #[test]
    fn test_parent_entity_falls_back_to_children() {
        let mut only_grouped = grouped("get", Some("preferences"));
        only_grouped.entity = "preference".to_string();
        let node = build_tree(&Resource::new("users", vec![only_grouped]));
        assert!(node.parent.methods.is_empty());
        assert_eq!(node.parent_entity(), Some("preference"));
    }
}
