//! Unit normalization: converts `(value, unit token, kind)` triples into
//! canonical base-SI values, plus the formatting helpers used when verdicts
//! render quantities back into human-readable text.
//!
//! Normalization is table-driven per [`QuantityKind`]. Unrecognized unit
//! tokens deliberately fall back to scale 1.0: a conservative choice that
//! keeps the raw magnitude instead of silently corrupting it, and lets the
//! comparator treat the value as weak evidence rather than dropping the row.
//!
//! The one genuinely tricky case is the resistance prefix `m`, which
//! collides between milli and mega in vendor text:
//!
//! - a literal `m`/`M` directly attached to ohm-unit text (`mΩ`, `mohm`)
//!   means **milli**
//! - the token `meg`, or a bare uppercase `M` with no ohm text, means
//!   **mega**

use crate::core::types::QuantityKind;

/// Convert `value` expressed in `unit_token` to the base SI unit for `kind`.
///
/// The token may carry surrounding whitespace and either `µ` or `u` for
/// micro. Matching is case-insensitive except where case disambiguates
/// milli from mega (see module docs).
#[must_use]
pub fn normalize(value: f64, unit_token: &str, kind: QuantityKind) -> f64 {
    value * scale_for(unit_token, kind)
}

fn scale_for(unit_token: &str, kind: QuantityKind) -> f64 {
    let token = unit_token.trim().replace(['µ', 'μ'], "u");
    match kind {
        QuantityKind::Capacitance => capacitance_scale(&token),
        QuantityKind::Resistance => resistance_scale(&token),
        QuantityKind::Inductance => inductance_scale(&token),
        QuantityKind::Power => power_scale(&token),
        // Volts and percent are already base units
        QuantityKind::Voltage | QuantityKind::Tolerance => 1.0,
    }
}

fn capacitance_scale(token: &str) -> f64 {
    match token.to_ascii_lowercase().as_str() {
        "f" => 1.0,
        "mf" => 1e-3,
        "uf" => 1e-6,
        "nf" => 1e-9,
        "pf" => 1e-12,
        _ => 1.0,
    }
}

fn resistance_scale(token: &str) -> f64 {
    // Strip the ohm-unit text (case-insensitively), keeping the prefix in
    // its original case: once the ohm text is gone, case is the only thing
    // distinguishing milli (`m`) from mega (`M`).
    let prefix = if token.to_ascii_lowercase().ends_with("ohm") {
        token[..token.len() - 3].trim_end()
    } else if let Some(p) = token.strip_suffix('Ω') {
        p.trim_end()
    } else {
        token
    };

    match prefix {
        "" => 1.0,
        "k" | "K" => 1e3,
        "meg" | "MEG" | "Meg" => 1e6,
        "m" => 1e-3,
        "M" => 1e6,
        _ => 1.0,
    }
}

fn inductance_scale(token: &str) -> f64 {
    match token.to_ascii_lowercase().as_str() {
        "h" => 1.0,
        "uh" => 1e-6,
        "nh" => 1e-9,
        _ => 1.0,
    }
}

fn power_scale(token: &str) -> f64 {
    match token.to_ascii_lowercase().as_str() {
        "w" => 1.0,
        "mw" => 1e-3,
        _ => 1.0,
    }
}

/// Render a number compactly: up to three decimals, trailing zeros trimmed.
///
/// `4.7 -> "4.7"`, `10.0 -> "10"`.
#[must_use]
pub fn compact(value: f64) -> String {
    let s = format!("{value:.3}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    s.to_string()
}

/// Human-readable capacitance, picked from uF/nF/pF by magnitude.
#[must_use]
pub fn format_capacitance(farads: f64) -> String {
    if farads >= 1e-6 {
        format!("{:.0}uF", farads * 1e6)
    } else if farads >= 1e-9 {
        format!("{:.0}nF", farads * 1e9)
    } else {
        format!("{:.0}pF", farads * 1e12)
    }
}

/// Human-readable resistance, picked from MΩ/kΩ/Ω/mΩ by magnitude.
#[must_use]
pub fn format_resistance(ohms: f64) -> String {
    if ohms >= 1e6 {
        format!("{}MΩ", compact(ohms / 1e6))
    } else if ohms >= 1e3 {
        format!("{}kΩ", compact(ohms / 1e3))
    } else if ohms >= 1.0 {
        format!("{}Ω", compact(ohms))
    } else {
        format!("{}mΩ", compact(ohms * 1e3))
    }
}

/// The lowercase magnitude token a resistance tends to appear as in supplier
/// descriptions ("4.7k", "100", "10m"). Returns `None` below 1 mΩ.
///
/// Megohm values render with a bare `m` suffix because the search target is
/// a lowercased description, where "1M" has already become "1m".
#[must_use]
pub fn resistance_token(ohms: f64) -> Option<String> {
    if ohms >= 1e6 {
        Some(format!("{}m", compact(ohms / 1e6)))
    } else if ohms >= 1e3 {
        Some(format!("{}k", compact(ohms / 1e3)))
    } else if ohms >= 1.0 {
        Some(compact(ohms))
    } else if ohms >= 1e-3 {
        Some(format!("{}m", compact(ohms * 1e3)))
    } else {
        None
    }
}

/// The lowercase magnitude token an inductance tends to appear as in
/// supplier descriptions ("10uh", "470nh"). Returns `None` below 1 nH.
#[must_use]
pub fn inductance_token(henries: f64) -> Option<String> {
    if henries >= 1e-6 {
        Some(format!("{}uh", compact(henries * 1e6)))
    } else if henries >= 1e-9 {
        Some(format!("{}nh", compact(henries * 1e9)))
    } else {
        None
    }
}
