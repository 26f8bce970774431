//! Package-identity judge: an independent signal-voting verdict engine.
//!
//! Runs alongside the field comparator and corroborates (or overrides) its
//! package check when the two sides spell the package differently. Two
//! tiers, evaluated strictly in order:
//!
//! 1. **Passive-size path** — chip-size codes (0402, 1005Metric, …) are
//!    near-unambiguous, so when the BOM side yields one, size evidence
//!    alone decides the verdict and tier 2 never runs.
//! 2. **IC/connector path** — families, pin counts, body dims, and pitch
//!    are each weak alone; they vote, and contradictions veto.
//!
//! The tier order is a deliberate tie-break and must not be reordered: a
//! footprint like "C0402" must be judged by its size code even when the
//! surrounding text also mentions a family token.

use std::collections::BTreeSet;

use tracing::debug;

use crate::core::record::SupplierRecord;
use crate::core::types::PackageVerdict;
use crate::signals::extract::{extract, extract_supplier, Signals};
use crate::units::compact;

/// Two body dimensions are "the same" within this many mm per side.
pub const DIM_TOLERANCE_MM: f64 = 0.15;

/// Two pin pitches are "the same" within this many mm.
pub const PITCH_TOLERANCE_MM: f64 = 0.02;

/// Judge whether the BOM-side text and a supplier record describe the same
/// physical package.
///
/// Pure and conservative: missing evidence yields
/// [`PackageVerdict::Unknown`], never a forced match.
#[must_use]
pub fn judge(bom_text: &str, supplier: &SupplierRecord) -> (PackageVerdict, String) {
    let bom = extract(bom_text);
    let sup = extract_supplier(supplier);
    judge_signals(&bom, &sup)
}

/// Judge from pre-extracted signal bundles.
#[must_use]
pub fn judge_signals(bom: &Signals, sup: &Signals) -> (PackageVerdict, String) {
    // Tier 1: passive-size path
    let bom_sizes = bom.canonical_sizes();
    if !bom_sizes.is_empty() {
        let sup_sizes = sup.canonical_sizes();
        if !sup_sizes.is_empty() {
            if intersects(&bom_sizes, &sup_sizes) {
                return (
                    PackageVerdict::Match,
                    format!(
                        "Passive size match: BOM {} vs supplier {}",
                        fmt_strings(&bom_sizes),
                        fmt_strings(&sup_sizes)
                    ),
                );
            }
            return (
                PackageVerdict::Mismatch,
                format!(
                    "Passive size mismatch: BOM {} vs supplier {}",
                    fmt_strings(&bom_sizes),
                    fmt_strings(&sup_sizes)
                ),
            );
        }

        // Supplier yielded no size at all; try the metric mirror before
        // giving up.
        let bom_metric = bom.canonical_metric_sizes();
        let sup_metric = sup.canonical_metric_sizes();
        if !bom_metric.is_empty() && !sup_metric.is_empty() && intersects(&bom_metric, &sup_metric)
        {
            return (
                PackageVerdict::Match,
                format!(
                    "Passive metric-size match: BOM {} vs supplier {}",
                    fmt_strings(&bom_metric),
                    fmt_strings(&sup_metric)
                ),
            );
        }
        return (
            PackageVerdict::Unknown,
            format!(
                "BOM indicates passive size {} but supplier has no size signal",
                fmt_strings(&bom_sizes)
            ),
        );
    }

    // Tier 2: IC/connector path. Four independent confirmations vote.
    let fam_hit = bom
        .family_tokens
        .intersection(&sup.family_tokens)
        .next()
        .is_some();
    let pin_hit = bom
        .pin_counts
        .intersection(&sup.pin_counts)
        .next()
        .is_some();
    let dim_hit = bom
        .dims_mm
        .iter()
        .any(|&d1| sup.dims_mm.iter().any(|&d2| dims_close(d1, d2)));
    let pitch_hit = bom.pitches_mm.iter().any(|&p1| {
        sup.pitches_mm
            .iter()
            .any(|&p2| (p1 - p2).abs() <= PITCH_TOLERANCE_MM)
    });

    let confirms = usize::from(fam_hit)
        + usize::from(pin_hit)
        + usize::from(dim_hit)
        + usize::from(pitch_hit);

    let mut contradicts = 0usize;
    if !bom.pin_counts.is_empty() && !sup.pin_counts.is_empty() && !pin_hit {
        contradicts += 1;
    }
    // A dims disagreement only counts as a contradiction when each side is
    // unambiguous about its one body outline.
    if bom.dims_mm.len() == 1 && sup.dims_mm.len() == 1 && !dim_hit {
        contradicts += 1;
    }

    debug!(fam_hit, pin_hit, dim_hit, pitch_hit, contradicts, "package vote");

    if contradicts >= 1 && confirms == 0 {
        return (
            PackageVerdict::Mismatch,
            format!(
                "No match signals and at least one contradiction. BOM {} vs supplier {}",
                side_detail(bom),
                side_detail(sup)
            ),
        );
    }

    if confirms >= 2 {
        return (
            PackageVerdict::Match,
            format!(
                "Confirmed by {confirms} signals (family/pins/dims/pitch). BOM {} vs supplier {}",
                side_detail(bom),
                side_detail(sup)
            ),
        );
    }

    // Family plus pin count together are decisive even though each is a
    // single generic confirmation.
    if fam_hit && pin_hit {
        let fams: BTreeSet<String> = bom
            .family_tokens
            .intersection(&sup.family_tokens)
            .map(ToString::to_string)
            .collect();
        let pins: BTreeSet<String> = bom
            .pin_counts
            .intersection(&sup.pin_counts)
            .map(ToString::to_string)
            .collect();
        return (
            PackageVerdict::Match,
            format!(
                "Family+pin match: fam={} pins={}",
                fmt_strings(&fams),
                fmt_strings(&pins)
            ),
        );
    }

    let summary = evidence_summary(bom, sup);
    if confirms == 1 {
        return (PackageVerdict::Unknown, format!("WEAK match: {summary}"));
    }
    (PackageVerdict::Unknown, format!("MISSING info: {summary}"))
}

/// Dimension closeness with an allowed length/width swap.
fn dims_close(d1: (f64, f64), d2: (f64, f64)) -> bool {
    let (a1, b1) = d1;
    let (a2, b2) = d2;
    ((a1 - a2).abs() <= DIM_TOLERANCE_MM && (b1 - b2).abs() <= DIM_TOLERANCE_MM)
        || ((a1 - b2).abs() <= DIM_TOLERANCE_MM && (b1 - a2).abs() <= DIM_TOLERANCE_MM)
}

fn intersects(a: &BTreeSet<String>, b: &BTreeSet<String>) -> bool {
    a.intersection(b).next().is_some()
}

fn fmt_strings(set: &BTreeSet<String>) -> String {
    let items: Vec<&str> = set.iter().map(String::as_str).collect();
    format!("[{}]", items.join(", "))
}

fn side_detail(sig: &Signals) -> String {
    format!(
        "fam={} pins={} dims={} pitch={}",
        fmt_families(sig),
        fmt_pins(sig),
        fmt_dims(sig),
        fmt_pitches(sig)
    )
}

/// Summary for the weak/missing explanations: a segment per signal kind,
/// only when at least one side has that kind.
fn evidence_summary(bom: &Signals, sup: &Signals) -> String {
    let mut segments: Vec<String> = Vec::new();
    if !(bom.family_tokens.is_empty() && sup.family_tokens.is_empty()) {
        segments.push(format!("Fam:{}/{}", fmt_families(bom), fmt_families(sup)));
    }
    if !(bom.pin_counts.is_empty() && sup.pin_counts.is_empty()) {
        segments.push(format!("Pins:{}/{}", fmt_pins(bom), fmt_pins(sup)));
    }
    if !(bom.dims_mm.is_empty() && sup.dims_mm.is_empty()) {
        segments.push(format!("Dims:{}/{}", fmt_dims(bom), fmt_dims(sup)));
    }
    if !(bom.pitches_mm.is_empty() && sup.pitches_mm.is_empty()) {
        segments.push(format!("Pitch:{}/{}", fmt_pitches(bom), fmt_pitches(sup)));
    }
    segments.join(" ")
}

fn fmt_families(sig: &Signals) -> String {
    let items: Vec<String> = sig.family_tokens.iter().map(ToString::to_string).collect();
    format!("[{}]", items.join(", "))
}

fn fmt_pins(sig: &Signals) -> String {
    let items: Vec<String> = sig.pin_counts.iter().map(ToString::to_string).collect();
    format!("[{}]", items.join(", "))
}

fn fmt_dims(sig: &Signals) -> String {
    let items: Vec<String> = sig
        .dims_mm
        .iter()
        .map(|&(l, w)| format!("{}x{}", compact(l), compact(w)))
        .collect();
    format!("[{}]", items.join(", "))
}

fn fmt_pitches(sig: &Signals) -> String {
    let items: Vec<String> = sig.pitches_mm.iter().map(|&p| compact(p)).collect();
    format!("[{}]", items.join(", "))
}
