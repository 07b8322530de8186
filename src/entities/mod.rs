//! Helpers for defining HAL entities

pub mod macros;
