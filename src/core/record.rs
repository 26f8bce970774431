use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::core::quantity::PhysicalQuantity;

/// A supplier catalog record for one part.
///
/// Built once per fetched part — either from supplier API JSON via
/// [`crate::parsing::supplier::from_api_json`] or directly through the
/// builder methods — and immutable afterwards. The derived quantity fields
/// come attributes-first with a description-text fallback, so a record with
/// a "Capacitance: 100nF" attribute and a record that only says "100nF" in
/// its description end up identical here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SupplierRecord {
    /// Free-text description ("describe" in the supplier API)
    pub describe: String,

    /// Package size code when one could be recognized (e.g. "0402")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package: Option<String>,

    /// Manufacturer brand name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,

    /// Manufacturer part number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    /// Raw attribute name → value text, names lowercased
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,

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

    /// Rated volts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voltage: Option<PhysicalQuantity>,
}

impl SupplierRecord {
    #[must_use]
    pub fn new(describe: impl Into<String>) -> Self {
        Self {
            describe: describe.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_package(mut self, package: impl Into<String>) -> Self {
        self.package = Some(package.into());
        self
    }

    #[must_use]
    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Some(brand.into());
        self
    }

    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    #[must_use]
    pub fn with_dielectric(mut self, dielectric: impl Into<String>) -> Self {
        self.dielectric = Some(dielectric.into());
        self
    }

    #[must_use]
    pub fn with_capacitance(mut self, farads: f64) -> Self {
        self.capacitance = Some(PhysicalQuantity::new(
            crate::core::types::QuantityKind::Capacitance,
            farads,
        ));
        self
    }

    #[must_use]
    pub fn with_resistance(mut self, ohms: f64) -> Self {
        self.resistance = Some(PhysicalQuantity::new(
            crate::core::types::QuantityKind::Resistance,
            ohms,
        ));
        self
    }

    #[must_use]
    pub fn with_inductance(mut self, henries: f64) -> Self {
        self.inductance = Some(PhysicalQuantity::new(
            crate::core::types::QuantityKind::Inductance,
            henries,
        ));
        self
    }

    #[must_use]
    pub fn with_voltage(mut self, volts: f64) -> Self {
        self.voltage = Some(PhysicalQuantity::new(
            crate::core::types::QuantityKind::Voltage,
            volts,
        ));
        self
    }

    /// The concatenated text the signal extractor scans for this record:
    /// package, description, brand, model, then `name:value` attribute
    /// lines, pipe-separated. Attributes often hide package hints the
    /// description omits.
    #[must_use]
    pub fn signal_text(&self) -> String {
        let mut parts: Vec<String> = Vec::new();
        if let Some(pkg) = &self.package {
            parts.push(pkg.clone());
        }
        if !self.describe.is_empty() {
            parts.push(self.describe.clone());
        }
        if let Some(brand) = &self.brand {
            parts.push(brand.clone());
        }
        if let Some(model) = &self.model {
            parts.push(model.clone());
        }
        for (name, value) in &self.attributes {
            parts.push(format!("{name}:{value}"));
        }
        parts.join(" | ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signal_text_order() {
        let record = SupplierRecord::new("56 pin QFN chip")
            .with_package("QFN-56")
            .with_brand("Acme")
            .with_model("AC5600")
            .with_attribute("pitch", "0.4mm");

        let text = record.signal_text();
        assert_eq!(text, "QFN-56 | 56 pin QFN chip | Acme | AC5600 | pitch:0.4mm");
    }

    #[test]
    fn test_signal_text_skips_missing_fields() {
        let record = SupplierRecord::new("plain part");
        assert_eq!(record.signal_text(), "plain part");
    }
}
