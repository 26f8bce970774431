//! Parsers that turn raw row text and supplier API JSON into core types.
//!
//! Two entry points:
//!
//! - [`comment::parse_comment`]: BOM comment/value text → [`crate::ParsedComment`]
//! - [`supplier::from_api_json`]: supplier response JSON → [`crate::SupplierRecord`]
//!
//! Parsing never fails on malformed *content* — every feature that cannot
//! be recognized is simply absent. The only error case is structural: a
//! supplier response without a `data` object.

use std::sync::LazyLock;

use regex::Regex;

pub mod comment;
pub mod supplier;

/// Size codes accepted as a bare package designator. Slightly wider than
/// the signal extractor's imperial set: 2010 and 2512 appear as resistor
/// packages but have no metric twin in the bijection.
static RE_PACKAGE_CODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(0201|0402|0603|0805|1206|1210|1812|2010|2512)\b").unwrap()
});

/// Pull a package size code out of arbitrary text, if present.
pub(crate) fn normalize_package(text: &str) -> Option<String> {
    RE_PACKAGE_CODE
        .captures(text)
        .map(|caps| caps[1].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_package() {
        assert_eq!(normalize_package("100nF X7R 0402 16V").as_deref(), Some("0402"));
        assert_eq!(normalize_package("0805").as_deref(), Some("0805"));
        assert_eq!(normalize_package("SOT-23").is_some(), false);
        // Embedded in a longer number is not a package code
        assert_eq!(normalize_package("06030"), None);
    }
}
