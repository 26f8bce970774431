//! Supplier API JSON → [`SupplierRecord`].
//!
//! The endpoint this JSON comes from is undocumented and drifts, so the
//! intake is deliberately tolerant: every field that is missing, empty, or
//! unparseable becomes `None`. The only hard error is a response with no
//! `data` object at all — there is nothing to build a record from.

use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::core::record::SupplierRecord;
use crate::parsing::comment::{
    normalize_dielectric, scan_capacitance, scan_inductance, scan_resistance, scan_voltage,
};
use crate::parsing::normalize_package;

#[derive(Error, Debug)]
pub enum RecordError {
    #[error("missing 'data' object in supplier response")]
    MissingData,
}

/// Build a [`SupplierRecord`] from a raw supplier API response.
///
/// Quantity fields are derived attributes-first with a description-text
/// fallback, mirroring how the supplier structures its data: attributes are
/// authoritative when present, the description is a last resort. When an
/// attribute exists but its value cannot be parsed, the field stays empty —
/// falling back to the description would second-guess structured data with
/// looser text.
///
/// # Errors
///
/// Returns [`RecordError::MissingData`] when the response has no `data`
/// object.
pub fn from_api_json(blob: &Value) -> Result<SupplierRecord, RecordError> {
    let data = blob
        .get("data")
        .filter(|d| d.is_object())
        .ok_or(RecordError::MissingData)?;

    let mut record = SupplierRecord::new(str_field(data, "describe").unwrap_or_default());

    if let Some(attrs) = data.get("attributes").and_then(Value::as_array) {
        for attr in attrs {
            let name = attr
                .get("attribute_name_en")
                .and_then(Value::as_str)
                .unwrap_or("")
                .trim()
                .to_lowercase();
            let value = attr
                .get("attribute_value_name")
                .and_then(Value::as_str)
                .unwrap_or("")
                .trim()
                .to_string();
            if !name.is_empty() {
                record.attributes.insert(name, value);
            }
        }
    }

    record.package = str_field(data, "componentSpecificationEn")
        .and_then(|s| normalize_package(&s))
        .or_else(|| normalize_package(&record.describe));
    record.brand = nonempty(str_field(data, "componentBrandEn"));
    record.model = nonempty(str_field(data, "componentModelEn"));

    record.voltage = match attribute(&record, "voltage rating") {
        Some(text) => scan_voltage(&text),
        None => scan_voltage(&record.describe),
    };
    record.capacitance = match attribute(&record, "capacitance") {
        Some(text) => scan_capacitance(&text),
        None => scan_capacitance(&record.describe),
    };
    // Resistance and inductance only come from structured attributes; the
    // comparator corroborates them against description text itself.
    record.resistance = attribute(&record, "resistance")
        .as_deref()
        .and_then(scan_resistance);
    record.inductance = attribute(&record, "inductance")
        .as_deref()
        .and_then(scan_inductance);
    record.dielectric = match attribute(&record, "temperature coefficient") {
        Some(text) => Some(normalize_dielectric(&text)),
        None => crate::parsing::comment::scan_dielectric(&record.describe),
    };

    debug!(
        package = ?record.package,
        brand = ?record.brand,
        model = ?record.model,
        attributes = record.attributes.len(),
        "built supplier record"
    );
    Ok(record)
}

fn str_field(data: &Value, key: &str) -> Option<String> {
    data.get(key)
        .and_then(Value::as_str)
        .map(|s| s.trim().to_string())
}

fn nonempty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

/// Non-empty attribute value, by lowercased name.
fn attribute(record: &SupplierRecord, name: &str) -> Option<String> {
    record
        .attributes
        .get(name)
        .filter(|v| !v.is_empty())
        .cloned()
}
