use serde::{Deserialize, Serialize};

use crate::core::quantity::PhysicalQuantity;

/// A parsed BOM comment/value cell.
///
/// Built once per BOM row by [`crate::parsing::comment::parse_comment`] and
/// immutable afterwards. Every feature is optional: a comment like
/// "100nF X7R 0402 16V" fills most fields, while "TPS54331" fills none and
/// is compared by raw-text containment instead.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParsedComment {
    /// The original comment text, verbatim
    pub raw: String,

    /// Package size code (e.g. "0402")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package: Option<String>,

    /// Ceramic dielectric class, NP0 already normalized to C0G
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dielectric: Option<String>,

    /// Farads
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacitance: Option<PhysicalQuantity>,

    /// Ohms
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resistance: Option<PhysicalQuantity>,

    /// Henries
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inductance: Option<PhysicalQuantity>,

    /// Volts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voltage: Option<PhysicalQuantity>,

    /// Watts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub power: Option<PhysicalQuantity>,

    /// Percent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tolerance: Option<PhysicalQuantity>,
}

impl ParsedComment {
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self {
            raw: raw.into(),
            ..Self::default()
        }
    }

    /// Whether the comment carries any of the three primary value features.
    /// Parts without one are compared textually instead of numerically.
    #[must_use]
    pub fn has_value_feature(&self) -> bool {
        self.capacitance.is_some() || self.resistance.is_some() || self.inductance.is_some()
    }
}
