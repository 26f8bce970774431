//! Heuristic identity matching between BOM rows and supplier catalog
//! records for electronic parts.
//!
//! A BOM row carries a terse free-text value ("100nF X7R 0402 16V",
//! "4.7kΩ", "QFN-56(7x7)"); the supplier side is a structured catalog
//! record with a description, attributes, and a package field. The two
//! sides rarely spell anything the same way, so everything is normalized
//! to canonical SI quantities and compared with tolerance:
//!
//! - [`parse_comment`] turns BOM text into a [`ParsedComment`] of
//!   recognized electrical features.
//! - [`from_api_json`](parsing::supplier::from_api_json) turns a supplier
//!   API response into a [`SupplierRecord`].
//! - [`compare`] checks each feature pair and reports per-field matches
//!   and issues with an overall [`CheckStatus`].
//! - [`judge`] independently decides whether the two sides describe the
//!   same physical package, from size codes, family names, pin counts,
//!   body dims, and pitch.
//!
//! # Example
//!
//! ```
//! use bom_match::{compare, judge, parse_comment, CheckStatus, PackageVerdict, SupplierRecord};
//!
//! let bom = parse_comment("100nF X7R 0402 16V");
//! let supplier = SupplierRecord::new("50V 100nF X7R 0402 MLCC")
//!     .with_package("0402")
//!     .with_capacitance(1e-7)
//!     .with_dielectric("X7R")
//!     .with_voltage(50.0);
//!
//! let report = compare(&bom, &supplier);
//! assert_eq!(report.status, CheckStatus::Ok);
//!
//! let (verdict, _why) = judge("C0402", &supplier);
//! assert_eq!(verdict, PackageVerdict::Match);
//! ```

pub mod core;
pub mod matching;
pub mod parsing;
pub mod signals;
pub mod units;

pub use crate::core::comment::ParsedComment;
pub use crate::core::quantity::{nearly_equal, PhysicalQuantity};
pub use crate::core::record::SupplierRecord;
pub use crate::core::types::{CheckStatus, PackageFamily, PackageVerdict, QuantityKind};
pub use crate::matching::compare::{compare, FieldReport};
pub use crate::matching::judge::{judge, judge_signals};
pub use crate::parsing::comment::parse_comment;
pub use crate::parsing::supplier::{from_api_json, RecordError};
pub use crate::signals::extract::{extract, extract_supplier, Signals};
