//! Rendering of HAL resources into wire documents

pub mod cache;
pub mod document;
pub mod href;
pub mod renderer;

pub use cache::DefinitionCache;
pub use document::{HAL_MEDIA_TYPE, HalDocument, build_link_header};
pub use renderer::HalRenderer;
