//! HAL resources
//!
//! A [`HalResource`] is the unit the renderer walks: a typed data payload, a
//! collection flag, embedded child resources grouped by type and links keyed
//! by relation.

use crate::core::error::{HalError, HalResult};
use crate::core::link::HalLink;
use indexmap::IndexMap;
use serde_json::{Map, Value};

/// Maximum number of resources of one type that can be embedded
pub const HAL_MAX_EMBED_LIMIT: usize = 100;

/// Keys that never belong to the data payload
const RESERVED_KEYS: [&str; 2] = ["_links", "_embed"];

/// A HAL resource (a single entity or a collection)
#[derive(Debug, Clone, PartialEq)]
pub struct HalResource {
    resource_type: String,
    data: Map<String, Value>,
    collection: bool,
    embeds: IndexMap<String, Vec<HalResource>>,
    links: IndexMap<String, HalLink>,
}

impl HalResource {
    /// Create a single (non-collection) resource
    pub fn new(resource_type: impl Into<String>, data: Map<String, Value>) -> Self {
        Self::build(resource_type.into(), data, false)
    }

    /// Create a collection resource
    pub fn collection(resource_type: impl Into<String>, data: Map<String, Value>) -> Self {
        Self::build(resource_type.into(), data, true)
    }

    /// Create a resource from any JSON value
    ///
    /// Non-object values produce an empty payload.
    pub fn from_value(resource_type: impl Into<String>, data: Value, collection: bool) -> Self {
        let data = match data {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        Self::build(resource_type.into(), data, collection)
    }

    fn build(resource_type: String, mut data: Map<String, Value>, collection: bool) -> Self {
        for key in RESERVED_KEYS {
            data.remove(key);
        }

        Self {
            resource_type,
            data,
            collection,
            embeds: IndexMap::new(),
            links: IndexMap::new(),
        }
    }

    /// The entity/relation discriminator
    pub fn resource_type(&self) -> &str {
        &self.resource_type
    }

    pub fn data(&self) -> &Map<String, Value> {
        &self.data
    }

    /// Set one field of the payload, replacing any previous value
    pub fn set_field(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.data.insert(key.into(), value.into());
    }

    pub fn is_collection(&self) -> bool {
        self.collection
    }

    /// Embedded resources grouped by type, in bucket creation order
    pub fn embeds(&self) -> &IndexMap<String, Vec<HalResource>> {
        &self.embeds
    }

    pub(crate) fn embeds_mut(&mut self) -> &mut IndexMap<String, Vec<HalResource>> {
        &mut self.embeds
    }

    /// Links keyed by relation, in insertion order
    pub fn links(&self) -> &IndexMap<String, HalLink> {
        &self.links
    }

    /// Embed a child resource
    ///
    /// Fails when the child has no type, is a collection, or when its type
    /// bucket already holds [`HAL_MAX_EMBED_LIMIT`] resources.
    pub fn add_embed(&mut self, resource: HalResource) -> HalResult<()> {
        if resource.resource_type.is_empty() {
            return Err(HalError::NotEmbeddable);
        }

        if resource.collection {
            return Err(HalError::CollectionNotEmbeddable {
                resource_type: resource.resource_type,
            });
        }

        let bucket = self
            .embeds
            .entry(resource.resource_type.clone())
            .or_default();

        if bucket.len() >= HAL_MAX_EMBED_LIMIT {
            return Err(HalError::EmbedLimitExceeded {
                resource_type: resource.resource_type,
                limit: HAL_MAX_EMBED_LIMIT,
            });
        }

        bucket.push(resource);
        Ok(())
    }

    /// Add a link, failing if the relation is already set
    pub fn add_link(&mut self, link: HalLink) -> HalResult<()> {
        self.insert_link(link, false)
    }

    /// Add a link, replacing an existing relation when `overwrite` is true
    pub fn insert_link(&mut self, link: HalLink, overwrite: bool) -> HalResult<()> {
        if !overwrite && self.has_link_rel(link.rel()) {
            return Err(HalError::LinkAlreadySet {
                rel: link.rel().to_string(),
            });
        }

        self.links.insert(link.rel().to_string(), link);
        Ok(())
    }

    pub fn has_link_rel(&self, rel: &str) -> bool {
        self.links.contains_key(rel)
    }

    /// Get a link by relation
    pub fn get_link_rel(&self, rel: &str) -> HalResult<&HalLink> {
        self.links.get(rel).ok_or_else(|| HalError::LinkNotFound {
            rel: rel.to_string(),
        })
    }

    pub fn has_links(&self) -> bool {
        !self.links.is_empty()
    }

    pub fn has_embedded(&self) -> bool {
        !self.embeds.is_empty()
    }

    pub fn has_embedded_type(&self, resource_type: &str) -> bool {
        self.embeds.contains_key(resource_type)
    }
}
