//! Field-by-field comparison of a parsed BOM comment against a supplier
//! record.
//!
//! Every applicable check runs — a capacitor row gets its package,
//! capacitance, dielectric, and voltage all checked independently, and the
//! verdict reflects the full set of matches and issues rather than the
//! first disagreement. Checks only fire when *both* sides carry the field;
//! a missing field on either side is simply no evidence.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use tracing::debug;

use crate::core::comment::ParsedComment;
use crate::core::record::SupplierRecord;
use crate::core::types::CheckStatus;
use crate::units::{
    compact, format_capacitance, format_resistance, inductance_token, resistance_token,
};

/// Relative tolerance for comparing canonical component values. 5% covers
/// E24-series rounding between "4.7uF" and a supplier's "4.70uF" while
/// still separating adjacent series values.
pub const VALUE_REL_TOLERANCE: f64 = 0.05;

/// Absolute-tolerance floor for value comparison. Zero: component values
/// never sit close enough to zero to need one.
pub const VALUE_ABS_TOLERANCE: f64 = 0.0;

/// Slack added to the supplier voltage rating before the asymmetric check,
/// absorbing float noise in equal ratings.
const VOLTAGE_EPSILON: f64 = 1e-6;

/// Tokens considered for the last-resort overlap check
static TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[a-z0-9.+\-]+").unwrap());

/// Outcome of [`compare`] for a single BOM row.
#[derive(Debug, Clone, Serialize)]
pub struct FieldReport {
    /// OK iff no issues; WARN when issues coexist with matches; FAIL otherwise
    pub status: CheckStatus,

    /// Field names that corroborated the row (e.g. "capacitance",
    /// "resistance~token" for text-only corroboration)
    pub matches: Vec<String>,

    /// Human-readable descriptions of each disagreement
    pub issues: Vec<String>,

    /// Note attached when only the token-overlap fallback matched
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback: Option<String>,
}

/// Compare a parsed BOM comment against a supplier record, field by field.
///
/// Pure: identical inputs always yield an identical report.
#[must_use]
pub fn compare(parsed: &ParsedComment, supplier: &SupplierRecord) -> FieldReport {
    let mut matches: Vec<String> = Vec::new();
    let mut issues: Vec<String> = Vec::new();

    if let (Some(bom), Some(sup)) = (&parsed.package, &supplier.package) {
        if bom == sup {
            matches.push("package".to_string());
        } else {
            issues.push(format!("package: BOM={bom} vs supplier={sup}"));
        }
    }

    if let (Some(bom), Some(sup)) = (&parsed.capacitance, &supplier.capacitance) {
        if bom.nearly_equal_to(sup, VALUE_REL_TOLERANCE, VALUE_ABS_TOLERANCE) {
            matches.push("capacitance".to_string());
        } else {
            issues.push(format!(
                "capacitance: BOM={} vs supplier={}",
                format_capacitance(bom.value),
                format_capacitance(sup.value)
            ));
        }
    }

    if let (Some(bom), Some(sup)) = (&parsed.dielectric, &supplier.dielectric) {
        if bom == sup {
            matches.push("dielectric".to_string());
        } else {
            issues.push(format!("dielectric: BOM={bom} vs supplier={sup}"));
        }
    }

    // Asymmetric: a part rated above the BOM's stated voltage is fine, a
    // part rated below it is not.
    if let (Some(bom), Some(sup)) = (&parsed.voltage, &supplier.voltage) {
        if bom.value <= sup.value + VOLTAGE_EPSILON {
            matches.push("voltage".to_string());
        } else {
            issues.push(format!(
                "voltage: BOM={}V > supplier={}V",
                compact(bom.value),
                compact(sup.value)
            ));
        }
    }

    if let Some(bom) = &parsed.resistance {
        if let Some(sup) = &supplier.resistance {
            if bom.nearly_equal_to(sup, VALUE_REL_TOLERANCE, VALUE_ABS_TOLERANCE) {
                matches.push("resistance".to_string());
            } else {
                issues.push(format!(
                    "resistance: BOM={} vs supplier={}",
                    format_resistance(bom.value),
                    format_resistance(sup.value)
                ));
            }
        } else {
            // Text-only corroboration: look for the magnitude token in the
            // description. Not a numeric check.
            let found = resistance_token(bom.value)
                .is_some_and(|token| supplier.describe.to_lowercase().contains(&token));
            if found {
                matches.push("resistance~token".to_string());
            } else {
                issues.push("resistance: could not confirm from supplier description".to_string());
            }
        }
    }

    if let Some(bom) = &parsed.inductance {
        if let Some(sup) = &supplier.inductance {
            if bom.nearly_equal_to(sup, VALUE_REL_TOLERANCE, VALUE_ABS_TOLERANCE) {
                matches.push("inductance".to_string());
            } else {
                issues.push(format!(
                    "inductance: BOM={}H vs supplier={}H",
                    compact(bom.value),
                    compact(sup.value)
                ));
            }
        } else {
            let describe = supplier.describe.to_lowercase().replace(['µ', 'μ'], "u");
            let found =
                inductance_token(bom.value).is_some_and(|token| describe.contains(&token));
            if found {
                matches.push("inductance~token".to_string());
            } else {
                issues.push("inductance: could not confirm from supplier description".to_string());
            }
        }
    }

    // Parts with none of the three value features are compared textually:
    // raw comment containment in model, brand, then description.
    if !parsed.has_value_feature() {
        let raw = parsed.raw.trim().to_lowercase();
        if !raw.is_empty() {
            let in_model = supplier
                .model
                .as_ref()
                .is_some_and(|m| m.to_lowercase().contains(&raw));
            let in_brand = supplier
                .brand
                .as_ref()
                .is_some_and(|b| b.to_lowercase().contains(&raw));
            if in_model || in_brand {
                matches.push("model/brand".to_string());
            } else if supplier.describe.to_lowercase().contains(&raw) {
                matches.push("describe~substring".to_string());
            } else {
                issues.push("no clear feature match for generic part".to_string());
            }
        }
    }

    // Last resort when nothing matched and nothing failed: token overlap
    // between the BOM text and the description.
    let mut fallback = None;
    if matches.is_empty() && issues.is_empty() {
        let bom_tokens = token_set(&parsed.raw);
        let desc_tokens = token_set(&supplier.describe);
        let overlap: Vec<&String> = bom_tokens.intersection(&desc_tokens).collect();
        let threshold = usize::max(2, bom_tokens.len() / 3);
        if overlap.len() >= threshold {
            matches.push("token~overlap".to_string());
            let shown: Vec<&str> = overlap.iter().take(6).map(|s| s.as_str()).collect();
            fallback = Some(format!("tokens matched: {}", shown.join(", ")));
        } else {
            issues.push("no clear feature match and low token overlap".to_string());
        }
    }

    let status = if issues.is_empty() {
        CheckStatus::Ok
    } else if matches.is_empty() {
        CheckStatus::Fail
    } else {
        CheckStatus::Warn
    };

    debug!(
        %status,
        matches = matches.len(),
        issues = issues.len(),
        "field comparison complete"
    );

    FieldReport {
        status,
        matches,
        issues,
        fallback,
    }
}

fn token_set(text: &str) -> BTreeSet<String> {
    TOKEN_RE
        .find_iter(&text.to_lowercase())
        .map(|m| m.as_str().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::comment::parse_comment;

    #[test]
    fn test_capacitor_full_match() {
        let parsed = parse_comment("100nF X7R 0402 16V");
        let supplier = SupplierRecord::new("50V 100nF X7R 0402 MLCC")
            .with_package("0402")
            .with_capacitance(1.0e-7)
            .with_dielectric("X7R")
            .with_voltage(25.0);

        let report = compare(&parsed, &supplier);
        assert_eq!(report.status, CheckStatus::Ok);
        for field in ["package", "capacitance", "dielectric", "voltage"] {
            assert!(
                report.matches.iter().any(|m| m == field),
                "expected {field} in {:?}",
                report.matches
            );
        }
        assert!(report.issues.is_empty());
    }

    #[test]
    fn test_capacitance_within_five_percent() {
        let parsed = parse_comment("100nF");
        let supplier = SupplierRecord::new("cap").with_capacitance(1.0e-7);
        let report = compare(&parsed, &supplier);
        assert_eq!(report.status, CheckStatus::Ok);
        assert_eq!(report.matches, vec!["capacitance"]);
    }

    #[test]
    fn test_capacitance_outside_five_percent() {
        // 4.7uF vs 5.2uF is ~10.6% apart
        let parsed = parse_comment("4.7uF");
        let supplier = SupplierRecord::new("cap").with_capacitance(5.2e-6);
        let report = compare(&parsed, &supplier);
        assert_eq!(report.status, CheckStatus::Fail);
        assert!(report.issues[0].starts_with("capacitance:"));
    }

    #[test]
    fn test_voltage_is_asymmetric() {
        // Higher-rated supplier part passes
        let parsed = parse_comment("100nF 16V");
        let supplier = SupplierRecord::new("cap")
            .with_capacitance(1.0e-7)
            .with_voltage(25.0);
        assert_eq!(compare(&parsed, &supplier).status, CheckStatus::Ok);

        // Lower-rated supplier part is an issue
        let parsed = parse_comment("100nF 50V");
        let report = compare(&parsed, &supplier);
        assert_eq!(report.status, CheckStatus::Warn);
        assert!(report.issues[0].contains("50V > supplier=25V"));
    }

    #[test]
    fn test_voltage_equal_rating_passes() {
        let parsed = parse_comment("100nF 25V");
        let supplier = SupplierRecord::new("cap")
            .with_capacitance(1.0e-7)
            .with_voltage(25.0);
        assert_eq!(compare(&parsed, &supplier).status, CheckStatus::Ok);
    }

    #[test]
    fn test_dielectric_alias() {
        // NP0 on the BOM normalizes to C0G at parse time
        let parsed = parse_comment("22pF NP0");
        let supplier = SupplierRecord::new("cap")
            .with_capacitance(22e-12)
            .with_dielectric("C0G");
        let report = compare(&parsed, &supplier);
        assert_eq!(report.status, CheckStatus::Ok);
        assert!(report.matches.iter().any(|m| m == "dielectric"));
    }

    #[test]
    fn test_package_mismatch() {
        let parsed = parse_comment("100nF 0402");
        let supplier = SupplierRecord::new("cap")
            .with_package("0603")
            .with_capacitance(1.0e-7);
        let report = compare(&parsed, &supplier);
        assert_eq!(report.status, CheckStatus::Warn);
        assert!(report.issues[0].contains("BOM=0402 vs supplier=0603"));
    }

    #[test]
    fn test_resistance_structured_comparison() {
        let parsed = parse_comment("4.7kΩ 0603");
        let supplier = SupplierRecord::new("resistor")
            .with_package("0603")
            .with_resistance(4700.0);
        let report = compare(&parsed, &supplier);
        assert_eq!(report.status, CheckStatus::Ok);
        assert!(report.matches.iter().any(|m| m == "resistance"));
    }

    #[test]
    fn test_resistance_token_fallback() {
        let parsed = parse_comment("4.7kΩ");
        let supplier = SupplierRecord::new("4.7kΩ ±1% 1/10W Thick Film Resistor");
        let report = compare(&parsed, &supplier);
        assert_eq!(report.status, CheckStatus::Ok);
        assert_eq!(report.matches, vec!["resistance~token"]);

        let unrelated = SupplierRecord::new("10kΩ ±1% resistor");
        let report = compare(&parsed, &unrelated);
        assert_eq!(report.status, CheckStatus::Fail);
        assert!(report.issues[0].starts_with("resistance:"));
    }

    #[test]
    fn test_inductance_token_fallback() {
        let parsed = parse_comment("10uH");
        let supplier = SupplierRecord::new("10µH ±20% Power Inductor");
        let report = compare(&parsed, &supplier);
        assert_eq!(report.status, CheckStatus::Ok);
        assert_eq!(report.matches, vec!["inductance~token"]);
    }

    #[test]
    fn test_generic_part_model_containment() {
        let parsed = parse_comment("TPS54331");
        let supplier = SupplierRecord::new("Buck converter 3A 28V")
            .with_brand("Texas Instruments")
            .with_model("TPS54331DR");
        let report = compare(&parsed, &supplier);
        assert_eq!(report.status, CheckStatus::Ok);
        assert_eq!(report.matches, vec!["model/brand"]);
    }

    #[test]
    fn test_generic_part_describe_containment() {
        let parsed = parse_comment("Buck converter");
        let supplier = SupplierRecord::new("Buck Converter 3A 28V SOT-23")
            .with_model("XYZ123");
        let report = compare(&parsed, &supplier);
        assert_eq!(report.status, CheckStatus::Ok);
        assert_eq!(report.matches, vec!["describe~substring"]);
    }

    #[test]
    fn test_generic_part_no_match() {
        let parsed = parse_comment("LM317");
        let supplier = SupplierRecord::new("Schottky diode 40V 3A")
            .with_model("SS34")
            .with_brand("MDD");
        let report = compare(&parsed, &supplier);
        assert_eq!(report.status, CheckStatus::Fail);
        assert_eq!(report.issues, vec!["no clear feature match for generic part"]);
    }

    #[test]
    fn test_token_overlap_fallback() {
        // Capacitance present on the BOM side only, no other feature on
        // either side: nothing matches, nothing fails, fallback fires.
        let parsed = parse_comment("100nF bypass ceramic");
        let supplier = SupplierRecord::new("ceramic capacitor 100nf bypass general purpose");
        let report = compare(&parsed, &supplier);
        assert_eq!(report.status, CheckStatus::Ok);
        assert_eq!(report.matches, vec!["token~overlap"]);
        assert!(report.fallback.as_ref().unwrap().starts_with("tokens matched:"));
    }

    #[test]
    fn test_token_overlap_too_low() {
        let parsed = parse_comment("100nF bypass ceramic");
        let supplier = SupplierRecord::new("tantalum electrolytic 47uf");
        let report = compare(&parsed, &supplier);
        assert_eq!(report.status, CheckStatus::Fail);
        assert_eq!(
            report.issues,
            vec!["no clear feature match and low token overlap"]
        );
        assert!(report.fallback.is_none());
    }

    #[test]
    fn test_empty_comment_fails_conservatively() {
        let parsed = parse_comment("");
        let supplier = SupplierRecord::new("anything at all");
        let report = compare(&parsed, &supplier);
        assert_eq!(report.status, CheckStatus::Fail);
    }

    #[test]
    fn test_warn_when_matches_and_issues_coexist() {
        let parsed = parse_comment("100nF X7R 0603 16V");
        let supplier = SupplierRecord::new("cap")
            .with_package("0603")
            .with_capacitance(2.2e-7)
            .with_dielectric("X7R")
            .with_voltage(25.0);
        let report = compare(&parsed, &supplier);
        assert_eq!(report.status, CheckStatus::Warn);
        assert!(!report.matches.is_empty());
        assert!(!report.issues.is_empty());
    }
}
