//! Typed error handling for HAL rendering
//!
//! Every failure the data model, the renderer or the entity transform can
//! produce is a variant of [`HalError`]. Callers can match on the variant
//! they care about and hand anything else to the problem mapper
//! ([`crate::core::problem::hal_problem`]) to build a client-facing document.
//!
//! # Error Categories
//!
//! - Configuration: [`HalError::InvalidHalConfig`], [`HalError::InvalidHalConfigForEntity`]
//! - Rendering: [`HalError::UnsupportedEntityType`], [`HalError::MissingRequiredProperty`],
//!   [`HalError::InvalidLinkHref`]
//! - Transform: [`HalError::NotAnEntity`]
//! - Data model: [`HalError::NotEmbeddable`], [`HalError::CollectionNotEmbeddable`],
//!   [`HalError::EmbedLimitExceeded`], [`HalError::LinkAlreadySet`],
//!   [`HalError::LinkNotFound`], [`HalError::MissingHrefOrRel`]
//!
//! # Example
//!
//! ```rust,ignore
//! use hal::prelude::*;
//!
//! match renderer.render(&mut resource) {
//!     Ok(document) => document.into_response(),
//!     Err(e @ HalError::UnsupportedEntityType { .. }) => {
//!         tracing::warn!("no definition: {}", e);
//!         hal_problem(&e).into_response()
//!     }
//!     Err(e) => hal_problem(&e).into_response(),
//! }
//! ```

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// The main error type for HAL rendering
#[derive(Debug, Error)]
pub enum HalError {
    /// Renderer or transform configuration has the wrong shape
    #[error("Invalid hal configuration: {message}")]
    InvalidHalConfig { message: String },

    /// A resource type reached the renderer without a matching definition
    #[error("Invalid resource type: {entity_type}")]
    UnsupportedEntityType { entity_type: String },

    /// A value does not satisfy the entity capability contract
    #[error("Only entities can be converted to resources: {message}")]
    NotAnEntity { message: String },

    /// No HAL relation (or no path) is configured for an entity
    #[error("Invalid HAL configured for entity {entity}: {message}")]
    InvalidHalConfigForEntity { entity: String, message: String },

    /// A path placeholder could not be filled from the resource data
    #[error("Resource is missing required property '{property}' for path '{path}'")]
    MissingRequiredProperty { property: String, path: String },

    /// A link href could not be parsed once prefixed with the API base
    #[error("Invalid href '{href}': {message}")]
    InvalidLinkHref { href: String, message: String },

    /// A resource without a type cannot be placed in an embed bucket
    #[error("Only resources can be embedded: resource has no type")]
    NotEmbeddable,

    /// Collections are never embedded
    #[error("Collections cannot be embedded: {resource_type}")]
    CollectionNotEmbeddable { resource_type: String },

    /// An embed bucket is full
    #[error("Embedded resources cannot exceed {limit} (type {resource_type})")]
    EmbedLimitExceeded { resource_type: String, limit: usize },

    /// A link relation is already present on the resource
    #[error("Cannot add [{rel}] link: already set")]
    LinkAlreadySet { rel: String },

    /// A link relation was requested but not present
    #[error("Resource does not contain the [{rel}] link")]
    LinkNotFound { rel: String },

    /// A link was constructed without a relation or without an href
    #[error("Missing {field} for HalLink")]
    MissingHrefOrRel { field: &'static str },
}

impl HalError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            HalError::UnsupportedEntityType { .. } => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            HalError::InvalidHalConfig { .. } => "INVALID_HAL_CONFIG",
            HalError::UnsupportedEntityType { .. } => "UNSUPPORTED_ENTITY_TYPE",
            HalError::NotAnEntity { .. } => "NOT_AN_ENTITY",
            HalError::InvalidHalConfigForEntity { .. } => "INVALID_HAL_CONFIG_FOR_ENTITY",
            HalError::MissingRequiredProperty { .. } => "MISSING_REQUIRED_PROPERTY",
            HalError::InvalidLinkHref { .. } => "INVALID_LINK_HREF",
            HalError::NotEmbeddable => "NOT_EMBEDDABLE",
            HalError::CollectionNotEmbeddable { .. } => "COLLECTION_NOT_EMBEDDABLE",
            HalError::EmbedLimitExceeded { .. } => "EMBED_LIMIT_EXCEEDED",
            HalError::LinkAlreadySet { .. } => "LINK_ALREADY_SET",
            HalError::LinkNotFound { .. } => "LINK_NOT_FOUND",
            HalError::MissingHrefOrRel { .. } => "MISSING_HREF_OR_REL",
        }
    }

    pub(crate) fn invalid_config(message: impl Into<String>) -> Self {
        HalError::InvalidHalConfig {
            message: message.into(),
        }
    }
}

impl IntoResponse for HalError {
    fn into_response(self) -> Response {
        crate::core::problem::hal_problem(&self).into_response()
    }
}

// =============================================================================
// Conversions from external errors
// =============================================================================

impl From<serde_json::Error> for HalError {
    fn from(err: serde_json::Error) -> Self {
        HalError::invalid_config(err.to_string())
    }
}

impl From<serde_yaml::Error> for HalError {
    fn from(err: serde_yaml::Error) -> Self {
        HalError::invalid_config(err.to_string())
    }
}

impl From<validator::ValidationErrors> for HalError {
    fn from(err: validator::ValidationErrors) -> Self {
        HalError::invalid_config(err.to_string())
    }
}

impl From<std::io::Error> for HalError {
    fn from(err: std::io::Error) -> Self {
        HalError::invalid_config(err.to_string())
    }
}

// =============================================================================
// Result type alias
// =============================================================================

/// A specialized Result type for HAL operations
pub type HalResult<T> = Result<T, HalError>;
