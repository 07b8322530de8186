//! # HAL Render
//!
//! Renders domain data as HAL (Hypertext Application Language) documents.
//!
//! ## Features
//!
//! - **Resource Model**: HAL resources with typed links and per-type embeds
//! - **Entity Definitions**: Per-type paths and public field maps, loaded from JSON or YAML
//! - **Link Rendering**: Path placeholders filled from resource data, queries merged and encoded
//! - **Entity Transform**: Domain entities and entity cursors converted into resources
//! - **Problem Documents**: Any error mapped to an `application/problem+json` document
//! - **Axum Integration**: Rendered documents and problems are `IntoResponse`
//!
//! ## Quick Start
//!
//! ```rust
//! use hal::prelude::*;
//!
//! let renderer = HalRenderer::from_value(json!({
//!     "api_base": "https://api.example.com",
//!     "entity_definitions": [{
//!         "entity_type": "customer",
//!         "collection_type": "customers",
//!         "entity_path": "/customers/:customer_id",
//!         "collection_path": "/customers",
//!         "entity_map": {"customer_id": "customer_id", "name": "name"},
//!     }],
//! }))?;
//!
//! let mut resource = HalResource::from_value(
//!     "customer",
//!     json!({"customer_id": "c-1", "name": "Ada", "password": "hunter2"}),
//!     false,
//! );
//!
//! let document = renderer.render(&mut resource)?;
//! assert_eq!(document.body["name"], "Ada");
//! assert!(document.body.get("password").is_none());
//! assert_eq!(
//!     document.body["_links"]["self"]["href"],
//!     "https://api.example.com/customers/c-1"
//! );
//! # Ok::<(), HalError>(())
//! ```

pub mod config;
pub mod core;
pub mod entities;
pub mod render;
pub mod transform;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core Types ===
    pub use crate::core::{
        entity::HalEntity,
        error::{HalError, HalResult},
        field::{field_to_string, is_truthy, parse_flag},
        link::{HalLink, LinkQuery, LinkSpec, LinkValue},
        problem::{
            HttpError, PROBLEM_MEDIA_TYPE, PROBLEM_TYPE_BASE, ProblemDocument, ProblemSource,
            hal_problem, hal_problem_with_base,
        },
        resource::{HAL_MAX_EMBED_LIMIT, HalResource},
    };

    // === Macros ===
    pub use crate::impl_hal_entity;

    // === Config ===
    pub use crate::config::{EntityDefinition, HalOptions, TransformConfig};

    // === Rendering ===
    pub use crate::render::{HAL_MEDIA_TYPE, HalDocument, HalRenderer, build_link_header};

    // === Transform ===
    pub use crate::transform::{
        CursorStep, EntityCursor, EntityTransformer, PageSummary, PagedEntities,
    };

    // === External dependencies ===
    pub use indexmap::IndexMap;
    pub use serde::{Deserialize, Serialize};
    pub use serde_json::{Map, Value, json};

    // === Axum ===
    pub use axum::{
        http::StatusCode,
        response::{IntoResponse, Response},
    };
}
