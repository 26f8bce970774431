//! Core data model: physical quantities, parsed BOM comments, supplier
//! records, and the status/verdict enums shared across the crate.

pub mod comment;
pub mod quantity;
pub mod record;
pub mod types;
