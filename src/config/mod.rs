//! Configuration loading and management
//!
//! Two configurations drive the crate:
//!
//! - [`HalOptions`]: the renderer options (API base and one
//!   [`EntityDefinition`] per resource type)
//! - [`TransformConfig`]: the entity transform's `entityConfig` and `pathMap`
//!
//! Both can be loaded from JSON values or YAML; the renderer options are
//! validated on load and any shape error becomes
//! [`HalError::InvalidHalConfig`](crate::core::error::HalError::InvalidHalConfig).

use crate::core::error::HalResult;
use crate::core::link::LinkValue;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

/// Renderer definition for one entity type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct EntityDefinition {
    /// Entity as it appears alone (matches `HalResource::resource_type`)
    #[validate(length(min = 1))]
    pub entity_type: String,

    /// Entity as it appears in a collection (the `_embedded` key)
    #[validate(length(min = 1))]
    pub collection_type: String,

    /// Entity version
    #[serde(default)]
    pub version: Option<String>,

    /// Path to get the entity, with `:field` placeholders
    #[validate(length(min = 1))]
    pub entity_path: String,

    /// Path to get the entity as a collection
    #[validate(length(min = 1))]
    pub collection_path: String,

    /// Allowed URL parameters for the collection
    #[serde(default)]
    pub collection_query: Vec<String>,

    /// Internal key → public key for collection properties
    #[serde(default)]
    pub collection_map: IndexMap<String, String>,

    /// Internal key → public key for entity properties
    #[serde(default)]
    pub entity_map: IndexMap<String, String>,
}

impl EntityDefinition {
    /// The projection map for a resource of this type
    pub fn field_map(&self, collection: bool) -> &IndexMap<String, String> {
        if collection {
            &self.collection_map
        } else {
            &self.entity_map
        }
    }

    /// The self path for a resource of this type
    pub fn path(&self, collection: bool) -> &str {
        if collection {
            &self.collection_path
        } else {
            &self.entity_path
        }
    }
}

/// Options for the HAL renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct HalOptions {
    /// Base URL prefixed to every relative link
    #[validate(url)]
    pub api_base: String,

    /// Also produce an RFC 8288 `Link` header for the root resource
    #[serde(default)]
    pub build_link_header: bool,

    /// One definition per renderable type
    #[validate(length(min = 1), nested)]
    pub entity_definitions: Vec<EntityDefinition>,
}

impl HalOptions {
    /// Load options from a JSON value
    pub fn from_value(value: Value) -> HalResult<Self> {
        let options: Self = serde_json::from_value(value)?;
        options.check()
    }

    /// Load options from a YAML string
    pub fn from_yaml_str(yaml: &str) -> HalResult<Self> {
        let options: Self = serde_yaml::from_str(yaml)?;
        options.check()
    }

    /// Load options from a YAML file
    pub fn from_yaml_file(path: &str) -> HalResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Validate the options, returning them unchanged when valid
    pub fn check(self) -> HalResult<Self> {
        self.validate()?;
        Ok(self)
    }

    /// Find the definition for an entity type
    pub fn find_definition(&self, entity_type: &str) -> Option<&EntityDefinition> {
        self.entity_definitions
            .iter()
            .find(|def| def.entity_type == entity_type)
    }
}

/// HAL settings of one entity in the transform configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HalRelationConfig {
    /// Relation name, used as the resource type
    pub rel: String,

    /// Static links as `[rel, hrefOrObject]` pairs
    #[serde(default)]
    pub links: Vec<(String, LinkValue)>,
}

/// Transform configuration of one entity type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityHalConfig {
    /// Short code used in assigned-to references (e.g., "FOO")
    #[serde(rename = "type", default)]
    pub short_code: Option<String>,

    #[serde(default)]
    pub hal: Option<HalRelationConfig>,
}

/// Target of a path in the path map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathTarget {
    /// Name of the entity served under the path
    pub entity: String,
}

/// Complete configuration for the entity transform
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransformConfig {
    /// Entity type name → HAL settings
    #[serde(rename = "entityConfig", default)]
    pub entity_config: IndexMap<String, EntityHalConfig>,

    /// Path → entity served under it
    #[serde(rename = "pathMap", default)]
    pub path_map: IndexMap<String, PathTarget>,
}

impl TransformConfig {
    /// Load configuration from a JSON value
    pub fn from_value(value: Value) -> HalResult<Self> {
        Ok(serde_json::from_value(value)?)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> HalResult<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// The HAL settings configured for an entity type
    pub fn hal_for(&self, entity_name: &str) -> Option<&HalRelationConfig> {
        self.entity_config
            .get(entity_name)
            .and_then(|config| config.hal.as_ref())
    }

    /// The first entity (in configuration order) carrying a short code
    pub fn entity_for_short_code(&self, short_code: &str) -> Option<(&str, &EntityHalConfig)> {
        self.entity_config
            .iter()
            .find(|(_, config)| config.short_code.as_deref() == Some(short_code))
            .map(|(name, config)| (name.as_str(), config))
    }

    /// The first path (in configuration order) serving an entity
    pub fn path_for_entity(&self, entity_name: &str) -> Option<&str> {
        self.path_map
            .iter()
            .find(|(_, target)| target.entity == entity_name)
            .map(|(path, _)| path.as_str())
    }
}
