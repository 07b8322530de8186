//! The HAL renderer
//!
//! [`HalRenderer`] is configured once from [`HalOptions`] and turns a
//! [`HalResource`] tree into a [`HalDocument`]:
//!
//! 1. a `self` link is injected from the entity definition when missing
//! 2. the payload is projected onto the public field names of the definition
//! 3. every link is rendered with its final href
//! 4. embedded resources are rendered and grouped by `collection_type`

use crate::config::{EntityDefinition, HalOptions};
use crate::core::error::{HalError, HalResult};
use crate::core::link::HalLink;
use crate::core::resource::HalResource;
use crate::render::cache::DefinitionCache;
use crate::render::document::{HAL_MEDIA_TYPE, HalDocument, build_link_header};
use crate::render::href;
use serde_json::{Map, Value};
use std::sync::Arc;

/// Renders HAL resources according to a set of entity definitions
#[derive(Debug)]
pub struct HalRenderer {
    options: HalOptions,
    definitions: DefinitionCache,
}

impl HalRenderer {
    /// Create a renderer, validating the options
    pub fn new(options: HalOptions) -> HalResult<Self> {
        Ok(Self {
            options: options.check()?,
            definitions: DefinitionCache::new(),
        })
    }

    /// Create a renderer from a JSON options value
    pub fn from_value(options: Value) -> HalResult<Self> {
        Self::new(HalOptions::from_value(options)?)
    }

    pub fn options(&self) -> &HalOptions {
        &self.options
    }

    /// The content type of every rendered document
    pub fn media_type(&self) -> &'static str {
        HAL_MEDIA_TYPE
    }

    /// Get the definition configured for an entity type
    ///
    /// Fails with [`HalError::UnsupportedEntityType`] when no definition
    /// matches.
    pub fn definition_for(&self, entity_type: &str) -> HalResult<Arc<EntityDefinition>> {
        self.definitions.get_or_resolve(entity_type, || {
            self.options
                .find_definition(entity_type)
                .cloned()
                .ok_or_else(|| HalError::UnsupportedEntityType {
                    entity_type: entity_type.to_string(),
                })
        })
    }

    /// Add the `self` link from the definition when the resource has none
    pub fn add_self_link(&self, resource: &mut HalResource) -> HalResult<()> {
        let definition = self.definition_for(resource.resource_type())?;
        if resource.has_link_rel("self") {
            return Ok(());
        }

        let path = definition.path(resource.is_collection());
        tracing::debug!(
            resource_type = %resource.resource_type(),
            path = %path,
            "Adding self link"
        );
        resource.add_link(HalLink::new("self", path)?)
    }

    /// Project the resource data onto the public fields of its definition.
    ///
    /// Every public field starts as null, the data is overlaid after
    /// renaming internal keys, and only public fields are kept.
    pub fn extract_resource_data(&self, resource: &HalResource) -> HalResult<Map<String, Value>> {
        let definition = self.definition_for(resource.resource_type())?;
        let field_map = definition.field_map(resource.is_collection());

        let mut extracted: Map<String, Value> = field_map
            .values()
            .map(|public| (public.clone(), Value::Null))
            .collect();

        for (key, value) in resource.data() {
            let public = field_map.get(key).unwrap_or(key);
            extracted.insert(public.clone(), value.clone());
        }

        extracted.retain(|key, _| field_map.values().any(|public| public == key));
        Ok(extracted)
    }

    /// Fields available to path placeholders: the raw data with the
    /// extracted public fields overlaid
    fn link_fields(&self, resource: &HalResource) -> HalResult<Map<String, Value>> {
        let mut fields = resource.data().clone();
        fields.extend(self.extract_resource_data(resource)?);
        Ok(fields)
    }

    /// Build the final href of a link on a resource
    pub fn build_link_href(&self, link: &HalLink, resource: &HalResource) -> HalResult<String> {
        if !link.is_relative() || link.is_templated() {
            return href::build_link_href(&self.options.api_base, link, &Map::new());
        }

        let fields = self.link_fields(resource)?;
        href::build_link_href(&self.options.api_base, link, &fields)
    }

    /// The rendered query string of a link (without the leading `?`)
    pub fn build_link_query(&self, link: &HalLink) -> String {
        href::build_link_query(link)
    }

    /// Render the `_links` object of a resource
    pub fn render_links(&self, resource: &HalResource) -> HalResult<Map<String, Value>> {
        let mut links = Map::new();

        for (rel, link) in resource.links() {
            let mut rendered = Map::new();
            rendered.insert(
                "href".to_string(),
                Value::String(self.build_link_href(link, resource)?),
            );

            let optional = [
                ("name", link.name()),
                ("hreflang", link.href_lang()),
                ("title", link.title()),
                ("icon", link.icon()),
                ("method", link.method()),
            ];
            for (key, value) in optional {
                if let Some(value) = value {
                    rendered.insert(key.to_string(), Value::String(value.to_string()));
                }
            }

            if link.is_templated() {
                rendered.insert("templated".to_string(), Value::Bool(true));
            }

            links.insert(rel.clone(), Value::Object(rendered));
        }

        Ok(links)
    }

    /// Render a resource: self link, projected data and `_links`
    pub fn render_resource(&self, resource: &mut HalResource) -> HalResult<Map<String, Value>> {
        self.add_self_link(resource)?;

        let mut response = self.extract_resource_data(resource)?;
        response.insert(
            "_links".to_string(),
            Value::Object(self.render_links(resource)?),
        );

        Ok(response)
    }

    /// Render every embedded resource, grouped by `collection_type`
    pub fn render_embed(&self, resource: &mut HalResource) -> HalResult<Map<String, Value>> {
        let mut embedded = Map::new();

        for child in resource.embeds_mut().values_mut().flatten() {
            let rendered = self.render_resource(child)?;
            let definition = self.definition_for(child.resource_type())?;

            let bucket = embedded
                .entry(definition.collection_type.clone())
                .or_insert_with(|| Value::Array(Vec::new()));
            if let Value::Array(items) = bucket {
                items.push(Value::Object(rendered));
            }
        }

        Ok(embedded)
    }

    /// Render a resource into a HAL document
    ///
    /// `_embedded` is present whenever the resource is a collection or has
    /// embeds. The resource is mutated in place (self links are injected on
    /// it and its embeds). Any failure aborts the whole render.
    pub fn render(&self, resource: &mut HalResource) -> HalResult<HalDocument> {
        tracing::debug!(
            resource_type = %resource.resource_type(),
            collection = resource.is_collection(),
            "Rendering HAL resource"
        );

        let mut body = self.render_resource(resource)?;

        let link_header = if self.options.build_link_header {
            body.get("_links")
                .and_then(Value::as_object)
                .and_then(build_link_header)
        } else {
            None
        };

        if resource.is_collection() || resource.has_embedded() {
            body.insert(
                "_embedded".to_string(),
                Value::Object(self.render_embed(resource)?),
            );
        }

        Ok(HalDocument {
            media_type: HAL_MEDIA_TYPE,
            body: Value::Object(body),
            link_header,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn renderer() -> HalRenderer {
        HalRenderer::from_value(json!({
            "api_base": "https://api.example.com",
            "entity_definitions": [{
                "entity_type": "fizz",
                "collection_type": "fizzes",
                "entity_path": "/fizzes/:fizz_id",
                "collection_path": "/fizzes",
                "collection_map": {"total_count": "total_count"},
                "entity_map": {"FID": "fizz_id", "fizzName": "name"},
            }],
        }))
        .unwrap()
    }

    fn fizz(data: Value) -> HalResource {
        HalResource::from_value("fizz", data, false)
    }

    #[test]
    fn test_extract_resource_data() {
        let renderer = renderer();
        let resource = fizz(json!({"FID": "42", "secret": "hidden"}));

        let extracted = renderer.extract_resource_data(&resource).unwrap();
        assert_eq!(
            Value::Object(extracted),
            json!({"fizz_id": "42", "name": null})
        );
    }

    #[test]
    fn test_add_self_link_keeps_existing() {
        let renderer = renderer();
        let mut resource = fizz(json!({"FID": "42"}));
        resource
            .add_link(HalLink::new("self", "/custom").unwrap())
            .unwrap();

        renderer.add_self_link(&mut resource).unwrap();
        assert_eq!(resource.get_link_rel("self").unwrap().href(), "/custom");
    }

    #[test]
    fn test_add_self_link_for_collection() {
        let renderer = renderer();
        let mut resource = HalResource::collection("fizz", Map::new());

        renderer.add_self_link(&mut resource).unwrap();
        assert_eq!(resource.get_link_rel("self").unwrap().href(), "/fizzes");
    }

    #[test]
    fn test_definition_lookup_is_cached() {
        let renderer = renderer();
        let first = renderer.definition_for("fizz").unwrap();
        let second = renderer.definition_for("fizz").unwrap();
        assert!(Arc::ptr_eq(&first, &second));

        let err = renderer.definition_for("manchuck").unwrap_err();
        assert!(matches!(err, HalError::UnsupportedEntityType { .. }));
    }

    #[test]
    fn test_build_link_query() {
        let renderer = renderer();
        let link = HalLink::new("next", "/fizzes?page=2&per_page=5").unwrap();
        assert_eq!(renderer.build_link_query(&link), "page=2&per_page=5");
    }

    #[test]
    fn test_rendered_link_starts_with_href() {
        let renderer = renderer();
        let mut resource = fizz(json!({"FID": "42"}));
        resource
            .add_link(
                HalLink::new("search", "/fizzes{?q}")
                    .unwrap()
                    .with_title("Search")
                    .with_templated(true),
            )
            .unwrap();

        let links = renderer.render_links(&resource).unwrap();
        let keys: Vec<&str> = links["search"]
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(keys, vec!["href", "title", "templated"]);
    }

    #[test]
    fn test_media_type() {
        assert_eq!(renderer().media_type(), "application/hal+json");
    }
}
