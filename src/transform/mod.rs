//! Entity to HAL resource conversion

pub mod cursor;
pub mod entity;

pub use cursor::{CursorStep, EntityCursor, PageSummary, PagedEntities};
pub use entity::EntityTransformer;
