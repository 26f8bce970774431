//! Immutable static data for the signal extractor: size-code sets, the
//! imperial↔metric bijection, the package-family alias table, and the
//! recognizer regexes.
//!
//! All regexes are written for uppercased input; [`super::extract`]
//! uppercases once before running the recognizers.

use std::sync::LazyLock;

use regex::Regex;

use crate::core::types::PackageFamily;

/// Imperial chip-size code paired with its metric equivalent.
///
/// This table is a fixed bijection: 0402 (imperial) is 1.0x0.5 mm, which is
/// metric code 1005, and so on. Note that "0603" appears on both sides with
/// different meanings (imperial 0603 = metric 1608; metric 0603 = imperial
/// 0201).
pub static SIZE_BIJECTION: &[(&str, &str)] = &[
    ("0201", "0603"),
    ("0402", "1005"),
    ("0603", "1608"),
    ("0805", "2012"),
    ("1206", "3216"),
    ("1210", "3225"),
    ("1812", "4532"),
];

/// Map an imperial size code to its metric equivalent.
#[must_use]
pub fn imperial_to_metric(code: &str) -> Option<&'static str> {
    SIZE_BIJECTION
        .iter()
        .find(|(imp, _)| *imp == code)
        .map(|(_, met)| *met)
}

/// Map a metric size code to its imperial equivalent.
#[must_use]
pub fn metric_to_imperial(code: &str) -> Option<&'static str> {
    SIZE_BIJECTION
        .iter()
        .find(|(_, met)| *met == code)
        .map(|(imp, _)| *imp)
}

/// Package-family alias table. Order matters: the first entry whose alias
/// list contains the token wins, so the ambiguous DFN/SON spellings resolve
/// to the WSON family.
pub(crate) static FAMILY_ALIASES: &[(PackageFamily, &[&str])] = &[
    (PackageFamily::Wson, &["WSON", "VSON", "DFN", "SON"]),
    (PackageFamily::Qfn, &["QFN", "VQFN", "MLF"]),
    (PackageFamily::Lga, &["LGA"]),
    (PackageFamily::Bga, &["BGA", "DSBGA", "WLCSP", "CSP"]),
    (PackageFamily::Udfn, &["UDFN", "DFN"]),
    (PackageFamily::X2son, &["X2SON", "XSON", "SON"]),
    (
        PackageFamily::Sot,
        &["SOT", "SOT23", "SOT-23", "SOT-563", "SOT563"],
    ),
    (
        PackageFamily::Sop,
        &["SOP", "SOIC", "TSSOP", "MSOP", "SSOP"],
    ),
    (
        PackageFamily::Sod,
        &["SOD", "SOD123", "SOD-123", "SOD323", "SOD-323"],
    ),
];

/// Normalize one surface token to a canonical family, if it is one.
#[must_use]
pub fn family_for_token(token: &str) -> Option<PackageFamily> {
    let t = token.trim().replace('–', "-");
    for (family, aliases) in FAMILY_ALIASES {
        if aliases.contains(&t.as_str()) {
            return Some(*family);
        }
    }
    // Catch-alls for spellings the alias table does not enumerate
    if t.starts_with("QFN") {
        return Some(PackageFamily::Qfn);
    }
    if t.contains("BGA") {
        return Some(PackageFamily::Bga);
    }
    None
}

/// Standalone imperial size codes
pub(crate) static RE_IMPERIAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(0201|0402|0603|0805|1206|1210|1812)\b").unwrap());

/// Standalone metric size codes
pub(crate) static RE_METRIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(0603|1005|1608|2012|3216|3225|4532)\b").unwrap());

/// KiCad-style "1005Metric" suffix form
pub(crate) static RE_METRIC_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(\d{4})METRIC\b").unwrap());

/// Imperial code embedded in a longer token. Allows an optional single
/// reference-prefix letter (C/R/L/D/F) and requires a non-digit right
/// boundary so "0603" is not found inside "06030".
pub(crate) static RE_IMPERIAL_EMBED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|[^A-Z0-9])[CRLDF]?(0201|0402|0603|0805|1206|1210|1812)(?:[^0-9]|$)").unwrap()
});

/// Metric code embedded in a longer token, same boundary rules
pub(crate) static RE_METRIC_EMBED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|[^A-Z0-9])[CRLDF]?(0603|1005|1608|2012|3216|3225|4532)(?:[^0-9]|$)").unwrap()
});

/// Tokens considered as family-name candidates
pub(crate) static RE_FAMILY_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Z0-9]+(?:-[A-Z0-9]+)*").unwrap());

/// Pin counts: "8P", "16PIN", "56 PINS"
pub(crate) static RE_PINS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(\d+)\s*(?:PINS?|P)\b").unwrap());

/// Combined QFN form "QFN-56(7x7)": pin count plus body outline
pub(crate) static RE_QFN_OUTLINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\bQFN[- ]?(\d+)\s*\(\s*([0-9.]+)\s*[X×]\s*([0-9.]+)\s*\)").unwrap()
});

/// KiCad custom footprint body dims "L7.0-W7.0"
pub(crate) static RE_LW: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\bL\s*([0-9]+(?:\.[0-9]+)?)\s*[-_ ]?W\s*([0-9]+(?:\.[0-9]+)?)\b").unwrap()
});

/// Generic "7x7" / "2.0×1.6" dimension pairs
pub(crate) static RE_DIM_X: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b([0-9]+(?:\.[0-9]+)?)\s*[X×]\s*([0-9]+(?:\.[0-9]+)?)\b").unwrap()
});

/// Pin pitch "P0.5" in millimeters
pub(crate) static RE_PITCH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bP\s*([0-9]+(?:\.[0-9]+)?)\b").unwrap());

/// Crystal package shorthand "SMD2016" (2.0 x 1.6 mm body)
pub(crate) static RE_SMD2016: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bSMD\s*2016\b").unwrap());

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_table_is_bijection() {
        for (imp, met) in SIZE_BIJECTION {
            assert_eq!(imperial_to_metric(imp), Some(*met));
            assert_eq!(metric_to_imperial(met), Some(*imp));
        }
        // No duplicates on either side
        let imps: std::collections::HashSet<_> = SIZE_BIJECTION.iter().map(|(i, _)| i).collect();
        let mets: std::collections::HashSet<_> = SIZE_BIJECTION.iter().map(|(_, m)| m).collect();
        assert_eq!(imps.len(), SIZE_BIJECTION.len());
        assert_eq!(mets.len(), SIZE_BIJECTION.len());
    }

    #[test]
    fn test_family_aliases() {
        assert_eq!(family_for_token("QFN"), Some(PackageFamily::Qfn));
        assert_eq!(family_for_token("VQFN"), Some(PackageFamily::Qfn));
        assert_eq!(family_for_token("MLF"), Some(PackageFamily::Qfn));
        // Ambiguous spellings resolve to the first table entry
        assert_eq!(family_for_token("DFN"), Some(PackageFamily::Wson));
        assert_eq!(family_for_token("SON"), Some(PackageFamily::Wson));
        assert_eq!(family_for_token("SOT-23"), Some(PackageFamily::Sot));
        assert_eq!(family_for_token("TSSOP"), Some(PackageFamily::Sop));
        assert_eq!(family_for_token("SOD-123"), Some(PackageFamily::Sod));
        assert_eq!(family_for_token("RESISTOR"), None);
    }

    #[test]
    fn test_family_catch_alls() {
        // QFN prefix not in the alias table
        assert_eq!(family_for_token("QFN56"), Some(PackageFamily::Qfn));
        // Anything containing BGA
        assert_eq!(family_for_token("FBGA-96"), Some(PackageFamily::Bga));
    }

    #[test]
    fn test_embedded_size_boundaries() {
        // Reference prefix accepted
        let caps = RE_IMPERIAL_EMBED.captures("FP_C0603_X").unwrap();
        assert_eq!(&caps[1], "0603");
        // No match when the code continues with another digit
        assert!(RE_IMPERIAL_EMBED.captures("FP_06030_X").is_none());
    }
}
