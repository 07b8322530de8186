//! Conversion of entities into HAL resources
//!
//! [`EntityTransformer`] looks up each entity's HAL relation in the
//! [`TransformConfig`], attaches the statically configured links and turns
//! "assigned-to" references into links to the referenced entities.

use crate::config::{HalRelationConfig, TransformConfig};
use crate::core::entity::{HalEntity, entity_payload};
use crate::core::error::{HalError, HalResult};
use crate::core::field::is_truthy;
use crate::core::link::{HalLink, LinkQuery, LinkSpec};
use crate::core::resource::HalResource;
use crate::transform::cursor::{CursorStep, EntityCursor};
use serde_json::{Map, Value, json};

/// Converts entities and entity cursors into HAL resources
#[derive(Debug, Clone)]
pub struct EntityTransformer {
    config: TransformConfig,
}

impl EntityTransformer {
    pub fn new(config: TransformConfig) -> Self {
        Self { config }
    }

    /// Create a transformer from a JSON configuration value
    pub fn from_value(config: Value) -> HalResult<Self> {
        Ok(Self::new(TransformConfig::from_value(config)?))
    }

    pub fn config(&self) -> &TransformConfig {
        &self.config
    }

    /// The HAL settings of an entity type
    fn hal_for(&self, entity_name: &str) -> HalResult<&HalRelationConfig> {
        self.config
            .hal_for(entity_name)
            .ok_or_else(|| HalError::InvalidHalConfigForEntity {
                entity: entity_name.to_string(),
                message: "no hal relation configured".to_string(),
            })
    }

    /// Convert one entity into a resource
    ///
    /// The resource type is the configured relation and the data is the
    /// entity's serialized form. Static links are added first, then one link
    /// per assigned-to reference. When two references resolve to the same
    /// relation only the first one is kept.
    pub fn entity_to_resource<E: HalEntity + ?Sized>(&self, entity: &E) -> HalResult<HalResource> {
        let entity_name = entity.type_name();
        if entity_name.is_empty() {
            return Err(HalError::NotAnEntity {
                message: "entity has no type name".to_string(),
            });
        }

        let data = entity_payload(entity).ok_or_else(|| HalError::NotAnEntity {
            message: format!("{} does not serialize to an object", entity_name),
        })?;

        let hal = self.hal_for(entity_name)?;
        let mut resource = HalResource::new(hal.rel.clone(), data);

        for (rel, value) in &hal.links {
            resource.add_link(HalLink::new(rel.clone(), value.clone())?)?;
        }

        for reference in entity.assigned_to() {
            let Some(link) = self.assigned_link(&reference)? else {
                continue;
            };

            match resource.add_link(link) {
                Ok(()) => {}
                Err(HalError::LinkAlreadySet { rel }) => {
                    tracing::debug!(
                        rel = %rel,
                        reference = %reference,
                        "Skipping assigned-to link: relation already set"
                    );
                }
                Err(e) => return Err(e),
            }
        }

        Ok(resource)
    }

    /// Resolve a `"<TYPE>:<id>"` reference into a link to the entity.
    ///
    /// Returns `None` for references without an id.
    fn assigned_link(&self, reference: &str) -> HalResult<Option<HalLink>> {
        let mut parts = reference.split(':');
        let (Some(short_code), Some(id)) = (parts.next(), parts.next()) else {
            tracing::warn!(reference = %reference, "Ignoring malformed assigned-to reference");
            return Ok(None);
        };

        let (entity_name, _) = self
            .config
            .entity_for_short_code(short_code)
            .ok_or_else(|| HalError::InvalidHalConfigForEntity {
                entity: short_code.to_string(),
                message: "no entity configured for assigned-to type".to_string(),
            })?;

        let rel = self.hal_for(entity_name)?.rel.clone();

        let path = self.config.path_for_entity(entity_name).ok_or_else(|| {
            HalError::InvalidHalConfigForEntity {
                entity: entity_name.to_string(),
                message: "no path configured".to_string(),
            }
        })?;

        let link = HalLink::new(rel, LinkSpec::href(format!("{}/{}", path, id)))?;
        Ok(Some(link))
    }

    /// Walk a cursor to exhaustion and build a collection resource.
    ///
    /// Every entity is embedded. The collection data carries `total_count`,
    /// `offset` and `limit` from the cursor's summary; a `next` link to
    /// `self_href` is added when the summary has an offset.
    pub fn entities_to_collection<C: EntityCursor>(
        &self,
        entity_name: &str,
        mut cursor: C,
        self_href: &str,
    ) -> HalResult<HalResource> {
        let hal = self.hal_for(entity_name)?;

        let mut seed = Map::new();
        seed.insert("total_count".to_string(), json!(0));
        seed.insert("offset".to_string(), Value::Null);
        seed.insert("limit".to_string(), json!(1));
        let mut collection = HalResource::collection(hal.rel.clone(), seed);

        let summary = loop {
            match cursor.advance() {
                CursorStep::Entity(entity) => {
                    collection.add_embed(self.entity_to_resource(&entity)?)?;
                }
                CursorStep::Done(summary) => break summary,
            }
        };

        collection.set_field("total_count", summary.total_count);

        if is_truthy(&summary.offset) {
            collection.set_field("offset", summary.offset.clone());

            let mut query = LinkQuery::new();
            query.insert("limit".to_string(), json!(summary.page_count));
            query.insert("offset".to_string(), summary.offset.clone());

            collection.add_link(HalLink::new("next", self_href)?.with_query(query))?;
        }

        collection.set_field("limit", summary.page_count);

        tracing::debug!(
            entity = %entity_name,
            total_count = summary.total_count,
            page_count = summary.page_count,
            "Built collection resource"
        );

        Ok(collection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Widget {
        id: &'static str,
        assigned_to: Vec<String>,
    }

    impl HalEntity for Widget {
        fn type_name(&self) -> &str {
            "Widget"
        }

        fn to_object(&self) -> Value {
            json!({ "id": self.id })
        }

        fn assigned_to(&self) -> Vec<String> {
            self.assigned_to.clone()
        }
    }

    fn transformer() -> EntityTransformer {
        EntityTransformer::from_value(json!({
            "pathMap": {"/gadgets": {"entity": "Gadget"}},
            "entityConfig": {
                "Widget": {"type": "WID", "hal": {"rel": "widget"}},
                "Gadget": {"type": "GAD", "hal": {"rel": "gadget"}},
                "Orphan": {"type": "ORP", "hal": {"rel": "orphan"}},
            },
        }))
        .unwrap()
    }

    fn widget(assigned_to: &[&str]) -> Widget {
        Widget {
            id: "w-1",
            assigned_to: assigned_to.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_duplicate_assigned_relation_keeps_first() {
        let resource = transformer()
            .entity_to_resource(&widget(&["GAD:1", "GAD:2"]))
            .unwrap();

        assert_eq!(resource.links().len(), 1);
        assert_eq!(resource.get_link_rel("gadget").unwrap().href(), "/gadgets/1");
    }

    #[test]
    fn test_malformed_reference_skipped() {
        let resource = transformer()
            .entity_to_resource(&widget(&["GAD"]))
            .unwrap();
        assert!(!resource.has_links());
    }

    #[test]
    fn test_unknown_short_code_fails() {
        let err = transformer()
            .entity_to_resource(&widget(&["ZZZ:1"]))
            .unwrap_err();
        assert!(matches!(err, HalError::InvalidHalConfigForEntity { ref entity, .. } if entity == "ZZZ"));
    }

    #[test]
    fn test_missing_path_fails() {
        let err = transformer()
            .entity_to_resource(&widget(&["ORP:1"]))
            .unwrap_err();
        assert!(matches!(err, HalError::InvalidHalConfigForEntity { ref entity, .. } if entity == "Orphan"));
    }
}
