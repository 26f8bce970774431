//! Package-signal extraction: static tables plus the recognizer registry.

pub mod extract;
pub mod tables;
