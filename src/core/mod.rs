//! Core module containing the fundamental HAL types

pub mod entity;
pub mod error;
pub mod field;
pub mod link;
pub mod problem;
pub mod resource;

pub use entity::HalEntity;
pub use error::{HalError, HalResult};
pub use field::{field_to_string, is_truthy, parse_flag};
pub use link::{HalLink, LinkQuery, LinkSpec, LinkValue};
pub use problem::{HttpError, ProblemDocument, ProblemSource, hal_problem, hal_problem_with_base};
pub use resource::{HAL_MAX_EMBED_LIMIT, HalResource};
