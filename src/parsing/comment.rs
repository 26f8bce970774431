//! BOM comment parsing: free text like "100nF X7R 0402 16V" or
//! "4.7kΩ ±1% 1/16W" into a [`ParsedComment`].
//!
//! Each feature has its own scanner; they run independently and a feature
//! that is not present is simply `None`. Units are normalized to base SI
//! through [`crate::units`] at parse time, so downstream comparison never
//! sees a prefix again.

use std::sync::LazyLock;

use regex::Regex;
use tracing::trace;

use crate::core::comment::ParsedComment;
use crate::core::quantity::PhysicalQuantity;
use crate::core::types::QuantityKind;
use crate::parsing::normalize_package;
use crate::units::normalize;

static CAP_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d+(?:\.\d+)?)\s*(µf|μf|uf|nf|pf|mf|f)\b").unwrap()
});

/// Resistance units: ohm text with an optional m/k/meg prefix, or the Ω
/// forms. The trailing group replaces a lookahead — the unit must not be
/// followed by more identifier characters.
static RES_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d+(?:\.\d+)?)\s*((?:m|k|meg)?\s*ohm|[km]Ω|Ω)(?:[^0-9a-z_]|$)").unwrap()
});

static IND_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d+(?:\.\d+)?)\s*(µh|μh|uh|nh|h)\b").unwrap()
});

static VOLT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\d+(?:\.\d+)?)\s*V\b").unwrap());

static POW_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\d+(?:\.\d+)?)\s*(mW|W)\b").unwrap());

static TOL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"±\s*(\d+(?:\.\d+)?)\s*%").unwrap());

static DIELECTRIC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(C0G|NP0|X7R|X5R|Y5V|X6S|X7S|X8R)\b").unwrap());

/// Parse a BOM comment into its recognizable features.
///
/// Total: any text (including empty) yields a `ParsedComment`; features
/// that cannot be recognized are absent rather than errors.
#[must_use]
pub fn parse_comment(text: &str) -> ParsedComment {
    let mut parsed = ParsedComment::new(text);
    if text.trim().is_empty() {
        return parsed;
    }

    parsed.package = normalize_package(text);
    parsed.voltage = scan_voltage(text);
    parsed.tolerance = scan_tolerance(text);
    parsed.power = scan_power(text);
    parsed.dielectric = scan_dielectric(text);
    parsed.capacitance = scan_capacitance(text);
    parsed.resistance = scan_resistance(text);
    parsed.inductance = scan_inductance(text);

    trace!(
        raw = text,
        package = ?parsed.package,
        has_value = parsed.has_value_feature(),
        "parsed BOM comment"
    );
    parsed
}

pub(crate) fn scan_capacitance(text: &str) -> Option<PhysicalQuantity> {
    let caps = CAP_RE.captures(text)?;
    let value: f64 = caps[1].parse().ok()?;
    Some(PhysicalQuantity::new(
        QuantityKind::Capacitance,
        normalize(value, &caps[2], QuantityKind::Capacitance),
    ))
}

pub(crate) fn scan_resistance(text: &str) -> Option<PhysicalQuantity> {
    let caps = RES_RE.captures(text)?;
    let value: f64 = caps[1].parse().ok()?;
    Some(PhysicalQuantity::new(
        QuantityKind::Resistance,
        normalize(value, &caps[2], QuantityKind::Resistance),
    ))
}

pub(crate) fn scan_inductance(text: &str) -> Option<PhysicalQuantity> {
    let caps = IND_RE.captures(text)?;
    let value: f64 = caps[1].parse().ok()?;
    Some(PhysicalQuantity::new(
        QuantityKind::Inductance,
        normalize(value, &caps[2], QuantityKind::Inductance),
    ))
}

pub(crate) fn scan_voltage(text: &str) -> Option<PhysicalQuantity> {
    let caps = VOLT_RE.captures(text)?;
    let value: f64 = caps[1].parse().ok()?;
    Some(PhysicalQuantity::new(QuantityKind::Voltage, value))
}

pub(crate) fn scan_power(text: &str) -> Option<PhysicalQuantity> {
    let caps = POW_RE.captures(text)?;
    let value: f64 = caps[1].parse().ok()?;
    Some(PhysicalQuantity::new(
        QuantityKind::Power,
        normalize(value, &caps[2], QuantityKind::Power),
    ))
}

pub(crate) fn scan_tolerance(text: &str) -> Option<PhysicalQuantity> {
    let caps = TOL_RE.captures(text)?;
    let value: f64 = caps[1].parse().ok()?;
    Some(PhysicalQuantity::new(QuantityKind::Tolerance, value))
}

pub(crate) fn scan_dielectric(text: &str) -> Option<String> {
    let caps = DIELECTRIC_RE.captures(text)?;
    Some(normalize_dielectric(&caps[1]))
}

/// NP0 and C0G are the same dielectric under two marketing names.
pub(crate) fn normalize_dielectric(code: &str) -> String {
    code.to_uppercase().replace("NP0", "C0G")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_capacitor_comment() {
        let p = parse_comment("100nF X7R 0402 16V");
        assert_eq!(p.package.as_deref(), Some("0402"));
        assert_eq!(p.dielectric.as_deref(), Some("X7R"));
        let cap = p.capacitance.unwrap();
        assert!((cap.value - 1e-7).abs() < 1e-15);
        assert!((p.voltage.unwrap().value - 16.0).abs() < 1e-9);
        assert!(p.resistance.is_none());
        assert!(p.inductance.is_none());
    }

    #[test]
    fn test_resistor_comment() {
        let p = parse_comment("4.7kΩ ±1% 1/16W 0603");
        assert!((p.resistance.unwrap().value - 4700.0).abs() < 1e-6);
        assert!((p.tolerance.unwrap().value - 1.0).abs() < 1e-9);
        assert!((p.power.unwrap().value - 16.0).abs() < 1e-9);
        assert_eq!(p.package.as_deref(), Some("0603"));
    }

    #[test]
    fn test_resistance_unit_spellings() {
        assert!((parse_comment("330 ohm").resistance.unwrap().value - 330.0).abs() < 1e-9);
        assert!((parse_comment("2.2 meg ohm").resistance.unwrap().value - 2.2e6).abs() < 1.0);
        assert!((parse_comment("50mΩ").resistance.unwrap().value - 0.05).abs() < 1e-12);
        // No ohm unit at all means no resistance
        assert!(parse_comment("4.7k").resistance.is_none());
    }

    #[test]
    fn test_inductor_comment() {
        let p = parse_comment("10uH 20% SMD");
        assert!((p.inductance.unwrap().value - 1e-5).abs() < 1e-15);
        // Tolerance requires the ± sign
        assert!(p.tolerance.is_none());
    }

    #[test]
    fn test_np0_normalized_to_c0g() {
        let p = parse_comment("22pF NP0 0402 50V");
        assert_eq!(p.dielectric.as_deref(), Some("C0G"));
        let cap = p.capacitance.unwrap();
        assert!((cap.value - 22e-12).abs() < 1e-20);
    }

    #[test]
    fn test_power_milliwatts() {
        let p = parse_comment("100 ohm 250mW");
        assert!((p.power.unwrap().value - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_generic_part_has_no_features() {
        let p = parse_comment("TPS54331DR");
        assert!(!p.has_value_feature());
        assert!(p.package.is_none());
        assert!(p.dielectric.is_none());
        assert_eq!(p.raw, "TPS54331DR");
    }

    #[test]
    fn test_empty_comment() {
        let p = parse_comment("   ");
        assert!(!p.has_value_feature());
        assert_eq!(p.raw, "   ");
    }
}
