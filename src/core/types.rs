use serde::{Deserialize, Serialize};

/// The kind of physical quantity a value represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuantityKind {
    /// Farads
    Capacitance,
    /// Ohms
    Resistance,
    /// Henries
    Inductance,
    /// Volts
    Voltage,
    /// Watts
    Power,
    /// Percent
    Tolerance,
}

impl std::fmt::Display for QuantityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Capacitance => write!(f, "capacitance"),
            Self::Resistance => write!(f, "resistance"),
            Self::Inductance => write!(f, "inductance"),
            Self::Voltage => write!(f, "voltage"),
            Self::Power => write!(f, "power"),
            Self::Tolerance => write!(f, "tolerance"),
        }
    }
}

/// Canonical package family for IC/connector-style parts.
///
/// Surface spellings are collapsed onto these via the alias table in
/// [`crate::signals::tables`]. A family token is a *signal*, not a precise
/// package name: SON/DFN/WSON are genuinely ambiguous in vendor text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PackageFamily {
    Wson,
    Qfn,
    Lga,
    Bga,
    Udfn,
    X2son,
    Sot,
    Sop,
    Sod,
}

impl std::fmt::Display for PackageFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Wson => write!(f, "WSON"),
            Self::Qfn => write!(f, "QFN"),
            Self::Lga => write!(f, "LGA"),
            Self::Bga => write!(f, "BGA"),
            Self::Udfn => write!(f, "UDFN"),
            Self::X2son => write!(f, "X2SON"),
            Self::Sot => write!(f, "SOT"),
            Self::Sop => write!(f, "SOP"),
            Self::Sod => write!(f, "SOD"),
        }
    }
}

/// Outcome of the field-by-field comparison of a BOM row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CheckStatus {
    /// No issues found
    Ok,
    /// Issues found, but at least one field matched
    Warn,
    /// Issues found and nothing matched
    Fail,
}

impl std::fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ok => write!(f, "OK"),
            Self::Warn => write!(f, "WARN"),
            Self::Fail => write!(f, "FAIL"),
        }
    }
}

/// Verdict of the package-identity judge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PackageVerdict {
    /// Packages agree
    Match,
    /// Packages disagree
    Mismatch,
    /// Not enough evidence either way
    Unknown,
}

impl std::fmt::Display for PackageVerdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Match => write!(f, "MATCH"),
            Self::Mismatch => write!(f, "MISMATCH"),
            Self::Unknown => write!(f, "UNKNOWN"),
        }
    }
}
