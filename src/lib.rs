//! IGC Parser Library
//!
//! A Rust library for parsing IGC flight recorder logs, the text format
//! written by gliding and paragliding loggers. Each line is a record
//! identified by its first character; fields sit at fixed 1-based columns,
//! and `I`/`J` declarations add named extension fields to the `B` fix and
//! `K` auxiliary records that follow them.
//!
//! # Features
//!
//! - **`csv`** (default): Enable CSV export functionality
//! - **`cli`** (default): Build the `igc_converter` command-line binary
//! - **`json`**: Enable JSON export of the whole flight model
//! - **`serde`**: Enable serialization/deserialization of types
//!
//! # Quick Start
//!
//! Parse a file and access the fixes:
//! ```rust,no_run
//! use igc_parser::parse_igc_file;
//! use std::path::Path;
//!
//! let flight = parse_igc_file(Path::new("flight.igc"), false).unwrap();
//! println!("Pilot: {}", flight.header.pilot_name);
//! println!("Parsed {} fixes", flight.fix_count());
//! ```
//!
//! Parse lines from memory and read extension values:
//! ```rust
//! use igc_parser::parse_lines;
//!
//! let flight = parse_lines(
//!     "memory",
//!     ["I023638FXA3940SIU", "B1511094538002N07249279WA-00940004000109"],
//! )
//! .unwrap();
//! let values = flight.fixes[0].extension_values.as_ref().unwrap();
//! assert_eq!(values.get("FXA"), Some("001"));
//! ```
//!
//! Export to ACMI next to the input file:
//! ```rust,no_run
//! use igc_parser::{export_flight, parse_igc_file, ExportFormat, ExportOptions};
//! use std::path::Path;
//!
//! let input = Path::new("flight.igc");
//! let flight = parse_igc_file(input, false).unwrap();
//! let options = ExportOptions {
//!     format: ExportFormat::Acmi,
//!     output_dir: None,
//!     force_export: false,
//! };
//! let path = export_flight(&flight, input, &options).unwrap();
//! println!("Exported to: {}", path.display());
//! ```
//!
//! # Public API
//!
//! ## Parsing Functions
//! - [`parse_igc_file`] - Parse a file, stopping at the first malformed line
//! - [`parse_igc_file_with_mode`] - Parse a file in strict or lenient mode
//! - [`parse_igc_str`] - Parse IGC text held in memory
//! - [`parse_lines`] / [`parse_lines_lenient`] - Parse any sequence of lines
//! - [`ParseSession`] - Low-level line-by-line API
//!
//! ## Data Types
//! - [`FlightModel`] - Complete parsed flight
//! - [`Header`], [`FlightRecorderInfo`], [`DifferentialGps`] - Metadata records
//! - [`FixRecord`], [`AuxRecord`] - B and K records
//! - [`ExtensionLayout`], [`FieldValues`] - I/J layouts and resolved values
//! - [`ParseError`], [`ExportError`] - Error types
//!
//! ## Export and Conversion
//! - [`FlightExporter`] - Trait implemented by every output format
//! - [`ExportFormat`], [`ExportOptions`], [`export_flight`], [`compute_export_path`]
//! - [`convert_file`], [`convert_batch`] - Parse-and-export pipelines
//! - [`should_skip_export`] - Skip flights without usable fixes

// Module declarations
pub mod conversion;
pub mod converter;
pub mod error;
pub mod export;
pub mod filters;
pub mod parser;
pub mod types;

// Re-export everything from modules for convenience
#[allow(ambiguous_glob_reexports)]
pub use conversion::*;
#[allow(ambiguous_glob_reexports)]
pub use converter::*;
#[allow(ambiguous_glob_reexports)]
pub use error::*;
#[allow(ambiguous_glob_reexports)]
pub use export::*;
#[allow(ambiguous_glob_reexports)]
pub use filters::*;
#[allow(ambiguous_glob_reexports)]
pub use parser::*;
#[allow(ambiguous_glob_reexports)]
pub use types::*;

// Re-export Result type for convenience
pub use anyhow::Result;
