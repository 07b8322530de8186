//! Tests for converting entities into HAL resources
//!
//! These tests verify that:
//! - Entities become resources typed by their configured relation
//! - Static and assigned-to links are attached
//! - Cursors become collections carrying pagination metadata
//! - Converted collections render end to end

use hal::prelude::*;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize)]
struct Entity {
    id: Uuid,
    assigned_to: Vec<String>,
}

impl_hal_entity!(Entity, "Entity", assigned_to);

impl Entity {
    fn new(id: &str) -> Self {
        Self {
            id: Uuid::parse_str(id).unwrap(),
            assigned_to: Vec::new(),
        }
    }

    fn assigned(mut self, references: &[&str]) -> Self {
        self.assigned_to = references.iter().map(|r| r.to_string()).collect();
        self
    }
}

fn transformer(config: Value) -> EntityTransformer {
    EntityTransformer::from_value(config).unwrap()
}

fn fizz_config() -> Value {
    json!({
        "entityConfig": {
            "Entity": {"hal": {"rel": "fizz", "links": []}},
        },
    })
}

fn expected_resource(entity: &Entity) -> HalResource {
    HalResource::from_value("fizz", entity.to_object(), false)
}

fn page() -> Vec<Entity> {
    vec![
        Entity::new("4d1612c6-9efc-4b46-ad56-41d13768d5d9"),
        Entity::new("c91ab5a1-e486-4c63-9d22-39aee9f714f8"),
    ]
}

// =============================================================================
// Single entities
// =============================================================================

mod entity_tests {
    use super::*;

    #[test]
    fn test_entity_without_links() {
        let entity = Entity::new("ce992db3-4f33-46c2-b608-f0c4c8d0495a");

        let resource = transformer(fizz_config()).entity_to_resource(&entity).unwrap();

        assert_eq!(resource, expected_resource(&entity));
        assert_eq!(resource.resource_type(), "fizz");
        assert!(!resource.is_collection());
    }

    #[test]
    fn test_entity_with_static_links() {
        let entity = Entity::new("ce992db3-4f33-46c2-b608-f0c4c8d0495a");
        let config = json!({
            "entityConfig": {
                "Entity": {
                    "hal": {"rel": "fizz", "links": [["nter:foo", {"href": "/bar"}]]},
                },
            },
        });

        let resource = transformer(config).entity_to_resource(&entity).unwrap();

        let mut expected = expected_resource(&entity);
        expected
            .add_link(HalLink::new("nter:foo", LinkSpec::href("/bar")).unwrap())
            .unwrap();
        assert_eq!(resource, expected);
    }

    #[test]
    fn test_entity_with_string_link() {
        let entity = Entity::new("ce992db3-4f33-46c2-b608-f0c4c8d0495a");
        let config = json!({
            "entityConfig": {
                "Entity": {"hal": {"rel": "fizz", "links": [["profile", "https://bit.ly/18gECvy"]]}},
            },
        });

        let resource = transformer(config).entity_to_resource(&entity).unwrap();
        let profile = resource.get_link_rel("profile").unwrap();

        assert_eq!(profile.href(), "https://bit.ly/18gECvy");
        assert!(!profile.is_relative());
    }

    #[test]
    fn test_entity_not_in_config() {
        let entity = Entity::new("ce992db3-4f33-46c2-b608-f0c4c8d0495a");

        let err = transformer(json!({"entityConfig": {}}))
            .entity_to_resource(&entity)
            .unwrap_err();

        assert!(matches!(err, HalError::InvalidHalConfigForEntity { ref entity, .. } if entity == "Entity"));
        assert!(err.to_string().starts_with("Invalid HAL configured for entity"));
    }

    #[test]
    fn test_assigned_entities_become_links() {
        let entity = Entity::new("ce992db3-4f33-46c2-b608-f0c4c8d0495a").assigned(&[
            "FOO:a6ea74cc-3ce3-4c50-8116-f8f93a70470b",
            "BAR:b4996f59-2d67-4aeb-b7d9-bc2b15eb98ba",
        ]);
        let config = json!({
            "pathMap": {
                "/foos": {"entity": "Footity"},
                "/bars": {"entity": "Bartity"},
            },
            "entityConfig": {
                "Entity": {"type": "NAE", "hal": {"rel": "fizz"}},
                "Footity": {"type": "FOO", "hal": {"rel": "baz"}},
                "Bartity": {"type": "BAR", "hal": {"rel": "buzz"}},
            },
        });

        let resource = transformer(config).entity_to_resource(&entity).unwrap();

        let mut expected = expected_resource(&entity);
        expected
            .add_link(
                HalLink::new("baz", LinkSpec::href("/foos/a6ea74cc-3ce3-4c50-8116-f8f93a70470b"))
                    .unwrap(),
            )
            .unwrap();
        expected
            .add_link(
                HalLink::new("buzz", LinkSpec::href("/bars/b4996f59-2d67-4aeb-b7d9-bc2b15eb98ba"))
                    .unwrap(),
            )
            .unwrap();
        assert_eq!(resource, expected);
    }

    #[test]
    fn test_assigned_link_does_not_replace_static_link() {
        let entity = Entity::new("ce992db3-4f33-46c2-b608-f0c4c8d0495a")
            .assigned(&["FOO:a6ea74cc-3ce3-4c50-8116-f8f93a70470b"]);
        let config = json!({
            "pathMap": {"/foos": {"entity": "Footity"}},
            "entityConfig": {
                "Entity": {"hal": {"rel": "fizz", "links": [["baz", "/static"]]}},
                "Footity": {"type": "FOO", "hal": {"rel": "baz"}},
            },
        });

        let resource = transformer(config).entity_to_resource(&entity).unwrap();
        assert_eq!(resource.get_link_rel("baz").unwrap().href(), "/static");
    }

    #[test]
    fn test_duplicate_static_link_fails() {
        let entity = Entity::new("ce992db3-4f33-46c2-b608-f0c4c8d0495a");
        let config = json!({
            "entityConfig": {
                "Entity": {"hal": {"rel": "fizz", "links": [["baz", "/one"], ["baz", "/two"]]}},
            },
        });

        let err = transformer(config).entity_to_resource(&entity).unwrap_err();
        assert!(matches!(err, HalError::LinkAlreadySet { ref rel } if rel == "baz"));
    }
}

// =============================================================================
// Collections
// =============================================================================

mod collection_tests {
    use super::*;

    fn expected_collection(data: Value) -> HalResource {
        let mut collection = HalResource::from_value("fizz", data, true);
        for entity in page() {
            collection.add_embed(expected_resource(&entity)).unwrap();
        }
        collection
    }

    #[test]
    fn test_collection_without_offset() {
        let cursor = PagedEntities::from_page(page(), 42, Value::Null);

        let collection = transformer(fizz_config())
            .entities_to_collection("Entity", cursor, "/fizz")
            .unwrap();

        assert_eq!(
            collection,
            expected_collection(json!({"total_count": 42, "offset": null, "limit": 2}))
        );
        assert!(!collection.has_link_rel("next"));
    }

    #[test]
    fn test_collection_with_offset() {
        let cursor = PagedEntities::from_page(page(), 42, "buzz");

        let collection = transformer(fizz_config())
            .entities_to_collection("Entity", cursor, "/fizz")
            .unwrap();

        let mut query = LinkQuery::new();
        query.insert("limit".to_string(), json!(2));
        query.insert("offset".to_string(), json!("buzz"));

        let mut expected =
            expected_collection(json!({"total_count": 42, "offset": "buzz", "limit": 2}));
        expected
            .add_link(HalLink::new("next", "/fizz").unwrap().with_query(query))
            .unwrap();

        assert_eq!(collection, expected);
    }

    #[test]
    fn test_empty_cursor() {
        let cursor = PagedEntities::<Entity>::from_page(Vec::new(), 0, Value::Null);

        let collection = transformer(fizz_config())
            .entities_to_collection("Entity", cursor, "/fizz")
            .unwrap();

        assert!(collection.is_collection());
        assert!(!collection.has_embedded());
        assert_eq!(collection.data()["limit"], json!(0));
        assert_eq!(collection.data()["total_count"], json!(0));
    }

    #[test]
    fn test_collection_for_unknown_entity_fails() {
        let cursor = PagedEntities::from_page(page(), 2, Value::Null);

        let err = transformer(fizz_config())
            .entities_to_collection("Missing", cursor, "/fizz")
            .unwrap_err();
        assert!(matches!(err, HalError::InvalidHalConfigForEntity { .. }));
    }

    #[test]
    fn test_converted_collection_renders() {
        let renderer = HalRenderer::from_value(json!({
            "api_base": "https://api.example.com",
            "entity_definitions": [{
                "entity_type": "fizz",
                "collection_type": "fizzes",
                "entity_path": "/fizzes/:id",
                "collection_path": "/fizzes",
                "collection_map": {"total_count": "total_count", "offset": "offset", "limit": "limit"},
                "entity_map": {"id": "id"},
            }],
        }))
        .unwrap();

        let cursor = PagedEntities::from_page(page(), 42, "buzz");
        let mut collection = transformer(fizz_config())
            .entities_to_collection("Entity", cursor, "/fizzes")
            .unwrap();

        let body = renderer.render(&mut collection).unwrap().body;

        assert_eq!(
            body["_links"]["next"]["href"],
            "https://api.example.com/fizzes?limit=2&offset=buzz"
        );
        assert_eq!(body["_links"]["self"]["href"], "https://api.example.com/fizzes");
        assert_eq!(
            body["_embedded"]["fizzes"][0]["_links"]["self"]["href"],
            "https://api.example.com/fizzes/4d1612c6-9efc-4b46-ad56-41d13768d5d9"
        );
        assert_eq!(body["total_count"], json!(42));
        assert_eq!(body["limit"], json!(2));
    }
}
