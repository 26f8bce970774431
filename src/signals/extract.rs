//! Structured package signals scraped from free text.
//!
//! Part descriptions, footprint names, and supplier attribute strings all
//! encode package identity in wildly inconsistent ways ("0402",
//! "C0402_1005Metric", "QFN-56(7x7)", "SMD2016", "P0.5"). The extractor
//! runs an ordered registry of independent recognizers over the uppercased
//! text and unions everything they find into one [`Signals`] bundle —
//! recognizers never short-circuit each other, so partial evidence from
//! several notations accumulates.

use std::collections::BTreeSet;

use regex::Regex;
use serde::Serialize;
use tracing::trace;

use crate::core::record::SupplierRecord;
use crate::core::types::PackageFamily;
use crate::signals::tables::{
    family_for_token, imperial_to_metric, metric_to_imperial, RE_DIM_X, RE_FAMILY_TOKEN,
    RE_IMPERIAL, RE_IMPERIAL_EMBED, RE_LW, RE_METRIC, RE_METRIC_EMBED, RE_METRIC_SUFFIX, RE_PINS,
    RE_PITCH, RE_QFN_OUTLINE, RE_SMD2016,
};

/// Plausible package body envelope for generic `{n}x{n}` pairs, in mm.
/// Anything outside is assumed to be a non-package dimension (reel size,
/// voltage-ish artifacts) and dropped.
const DIM_MIN_MM: f64 = 0.3;
const DIM_MAX_MM: f64 = 50.0;

/// Package-identity signals found in one piece of text.
///
/// Derived transiently from either the BOM side or the supplier side; never
/// persisted. Dims and pitches are kept as deduplicated vectors since f64
/// has no total order; all other fields are true sets.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Signals {
    /// Imperial chip-size codes, e.g. {"0402"}
    pub sizes_imperial: BTreeSet<String>,

    /// Metric chip-size codes, e.g. {"1005"}
    pub sizes_metric: BTreeSet<String>,

    /// Canonical package families, e.g. {QFN, BGA}
    pub family_tokens: BTreeSet<PackageFamily>,

    /// Pin counts, e.g. {56}
    pub pin_counts: BTreeSet<u32>,

    /// Body (length, width) pairs in mm, e.g. [(7.0, 7.0)]
    pub dims_mm: Vec<(f64, f64)>,

    /// Pin pitches in mm, e.g. [0.4]
    pub pitches_mm: Vec<f64>,
}

impl Signals {
    /// Canonical size-code set: imperial codes found, plus metric codes
    /// mapped back through the fixed bijection.
    #[must_use]
    pub fn canonical_sizes(&self) -> BTreeSet<String> {
        let mut out = self.sizes_imperial.clone();
        for code in &self.sizes_metric {
            if let Some(imp) = metric_to_imperial(code) {
                out.insert(imp.to_string());
            }
        }
        out
    }

    /// Mirror of [`Self::canonical_sizes`]: metric codes plus mapped
    /// imperial codes.
    #[must_use]
    pub fn canonical_metric_sizes(&self) -> BTreeSet<String> {
        let mut out = self.sizes_metric.clone();
        for code in &self.sizes_imperial {
            if let Some(met) = imperial_to_metric(code) {
                out.insert(met.to_string());
            }
        }
        out
    }

    fn add_dim(&mut self, length: f64, width: f64) {
        if !self
            .dims_mm
            .iter()
            .any(|&(l, w)| l == length && w == width)
        {
            self.dims_mm.push((length, width));
        }
    }

    fn add_pitch(&mut self, pitch: f64) {
        if !self.pitches_mm.contains(&pitch) {
            self.pitches_mm.push(pitch);
        }
    }
}

/// One recognizer: scans uppercased text, contributes to the bundle.
type Recognizer = fn(&str, &mut Signals);

/// The ordered recognizer registry. Each entry is independent and only
/// unions into the bundle, so the order is not semantically load-bearing,
/// but it is kept stable for reproducible trace output.
const RECOGNIZERS: &[(&str, Recognizer)] = &[
    ("size_codes", scan_size_codes),
    ("families", scan_families),
    ("pin_counts", scan_pin_counts),
    ("qfn_outline", scan_qfn_outline),
    ("lw_dims", scan_lw_dims),
    ("generic_dims", scan_generic_dims),
    ("pitch", scan_pitch),
    ("crystal_shorthand", scan_crystal_shorthand),
];

/// Extract all package signals from one piece of free text.
#[must_use]
pub fn extract(text: &str) -> Signals {
    let upper = text.to_uppercase();
    let mut signals = Signals::default();
    for (name, recognizer) in RECOGNIZERS {
        recognizer(&upper, &mut signals);
        trace!(recognizer = name, "signal scan pass complete");
    }
    signals
}

/// Extract supplier-side signals: package, description, brand, model, and
/// attribute key/value pairs are concatenated and scanned as one text. If
/// the supplier package field is itself an exact size code it is force-added
/// to the corresponding size set, since a bare "0603" in that field would
/// otherwise be ambiguous between systems.
#[must_use]
pub fn extract_supplier(record: &SupplierRecord) -> Signals {
    let mut signals = extract(&record.signal_text());

    if let Some(pkg) = &record.package {
        let code = pkg.trim().to_uppercase();
        if imperial_to_metric(&code).is_some() {
            signals.sizes_imperial.insert(code.clone());
        }
        if metric_to_imperial(&code).is_some() {
            signals.sizes_metric.insert(code);
        }
    }

    signals
}

/// Standalone size codes take priority; the embedded form (with an optional
/// C/R/L/D/F reference prefix) is consulted only when no standalone code of
/// that system was found. The "1005Metric" suffix form always contributes.
fn scan_size_codes(text: &str, signals: &mut Signals) {
    for caps in RE_IMPERIAL.captures_iter(text) {
        signals.sizes_imperial.insert(caps[1].to_string());
    }
    if signals.sizes_imperial.is_empty() {
        scan_embedded_codes(&RE_IMPERIAL_EMBED, text, &mut signals.sizes_imperial);
    }

    for caps in RE_METRIC.captures_iter(text) {
        signals.sizes_metric.insert(caps[1].to_string());
    }
    if signals.sizes_metric.is_empty() {
        scan_embedded_codes(&RE_METRIC_EMBED, text, &mut signals.sizes_metric);
    }

    for caps in RE_METRIC_SUFFIX.captures_iter(text) {
        signals.sizes_metric.insert(caps[1].to_string());
    }
}

/// The embedded-code regexes consume their right boundary character, which
/// can also be the *left* boundary of the next code ("C0402_C0603").
/// Resume each search at the end of the captured code, not the end of the
/// whole match, so the separator serves both sides.
fn scan_embedded_codes(re: &Regex, text: &str, out: &mut BTreeSet<String>) {
    let mut at = 0;
    while let Some(code) = re.captures_at(text, at).and_then(|caps| caps.get(1)) {
        out.insert(code.as_str().to_string());
        at = code.end();
    }
}

fn scan_families(text: &str, signals: &mut Signals) {
    for token in RE_FAMILY_TOKEN.find_iter(text) {
        if let Some(family) = family_for_token(token.as_str()) {
            signals.family_tokens.insert(family);
        }
    }
}

fn scan_pin_counts(text: &str, signals: &mut Signals) {
    for caps in RE_PINS.captures_iter(text) {
        if let Ok(n) = caps[1].parse::<u32>() {
            signals.pin_counts.insert(n);
        }
    }
}

/// "QFN-56(7x7)" carries three signals at once: the family, the pin count,
/// and the body outline.
fn scan_qfn_outline(text: &str, signals: &mut Signals) {
    for caps in RE_QFN_OUTLINE.captures_iter(text) {
        let pins = caps[1].parse::<u32>();
        let length = caps[2].parse::<f64>();
        let width = caps[3].parse::<f64>();
        if let (Ok(pins), Ok(length), Ok(width)) = (pins, length, width) {
            signals.pin_counts.insert(pins);
            signals.add_dim(length, width);
            signals.family_tokens.insert(PackageFamily::Qfn);
        }
    }
}

fn scan_lw_dims(text: &str, signals: &mut Signals) {
    for caps in RE_LW.captures_iter(text) {
        if let (Ok(length), Ok(width)) = (caps[1].parse::<f64>(), caps[2].parse::<f64>()) {
            signals.add_dim(length, width);
        }
    }
}

/// Generic "7x7" pairs are noisy; accept them only within the plausible
/// package envelope.
fn scan_generic_dims(text: &str, signals: &mut Signals) {
    for caps in RE_DIM_X.captures_iter(text) {
        if let (Ok(length), Ok(width)) = (caps[1].parse::<f64>(), caps[2].parse::<f64>()) {
            if (DIM_MIN_MM..=DIM_MAX_MM).contains(&length)
                && (DIM_MIN_MM..=DIM_MAX_MM).contains(&width)
            {
                signals.add_dim(length, width);
            }
        }
    }
}

fn scan_pitch(text: &str, signals: &mut Signals) {
    for caps in RE_PITCH.captures_iter(text) {
        if let Ok(pitch) = caps[1].parse::<f64>() {
            signals.add_pitch(pitch);
        }
    }
}

/// "SMD2016" is a crystal package shorthand for a 2.0 x 1.6 mm body.
fn scan_crystal_shorthand(text: &str, signals: &mut Signals) {
    if RE_SMD2016.is_match(text) {
        signals.add_dim(2.0, 1.6);
    }
}
