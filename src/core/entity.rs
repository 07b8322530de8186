//! Entity capability consumed by the entity transform

use serde_json::{Map, Value};

/// Capability every domain object must offer to become a HAL resource.
///
/// The transform never depends on a concrete entity type: it asks for the
/// type name (the key into `entityConfig`), the serialized payload and the
/// "assigned-to" back-references.
///
/// Most types get this through [`crate::impl_hal_entity!`].
pub trait HalEntity {
    /// Name of the entity type as it appears in the transform configuration
    /// (e.g., "Customer")
    fn type_name(&self) -> &str;

    /// Serialized form of the entity
    ///
    /// Must be a JSON object for the entity to be converted.
    fn to_object(&self) -> Value;

    /// References to entities this one is assigned to, formatted as
    /// `"<TYPE>:<id>"`
    fn assigned_to(&self) -> Vec<String> {
        Vec::new()
    }
}

/// Serialized payload of an entity, when it is a JSON object
pub(crate) fn entity_payload<E: HalEntity + ?Sized>(entity: &E) -> Option<Map<String, Value>> {
    match entity.to_object() {
        Value::Object(map) => Some(map),
        _ => None,
    }
}
