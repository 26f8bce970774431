use serde::{Deserialize, Serialize};

use crate::core::types::QuantityKind;

/// A physical quantity in base SI units (farads, ohms, henries, volts,
/// watts, percent).
///
/// The value is canonical: "100nF", "0.1uF", and "1e-7 F" all construct the
/// same `PhysicalQuantity`. Values are non-negative by construction since
/// they only ever come from unsigned numeric literals in part descriptions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhysicalQuantity {
    pub kind: QuantityKind,
    pub value: f64,
}

impl PhysicalQuantity {
    #[must_use]
    pub fn new(kind: QuantityKind, value: f64) -> Self {
        Self { kind, value }
    }

    /// Relative-tolerance equality: `|a - b| <= max(rel * max(|a|, |b|), abs_tol)`.
    ///
    /// Symmetric in its arguments and reflexive for any finite value.
    #[must_use]
    pub fn nearly_equal_to(&self, other: &Self, rel: f64, abs_tol: f64) -> bool {
        nearly_equal(self.value, other.value, rel, abs_tol)
    }
}

/// Tolerance comparison on raw canonical values.
#[must_use]
pub fn nearly_equal(a: f64, b: f64, rel: f64, abs_tol: f64) -> bool {
    (a - b).abs() <= f64::max(rel * f64::max(a.abs(), b.abs()), abs_tol)
}
