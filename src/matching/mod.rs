//! The two verdict engines: the per-field comparator and the
//! package-identity judge. They run independently over the same inputs so a
//! caller can cross-check one against the other.

pub mod compare;
pub mod judge;
