//! Definition lookup cache owned by a renderer

use crate::config::EntityDefinition;
use crate::core::error::HalResult;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

/// Append-only cache of resolved entity definitions
///
/// Entries are never evicted: the cache lives exactly as long as the
/// renderer that owns it, so changed definitions need a new renderer.
/// Uses RwLock so concurrent renders can share it.
#[derive(Debug, Default)]
pub struct DefinitionCache {
    entries: RwLock<HashMap<String, Arc<EntityDefinition>>>,
}

impl DefinitionCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached definition for `entity_type`, resolving and caching
    /// it on first use. Failed resolutions are not cached.
    pub fn get_or_resolve<F>(&self, entity_type: &str, resolve: F) -> HalResult<Arc<EntityDefinition>>
    where
        F: FnOnce() -> HalResult<EntityDefinition>,
    {
        {
            let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(definition) = entries.get(entity_type) {
                return Ok(Arc::clone(definition));
            }
        }

        let definition = Arc::new(resolve()?);
        tracing::debug!(entity_type = %entity_type, "Caching entity definition");

        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        let cached = entries
            .entry(entity_type.to_string())
            .or_insert(definition);

        Ok(Arc::clone(cached))
    }

    /// Number of cached definitions
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
