//! Export functionality for parsed IGC flights
//!
//! Every output format implements [`FlightExporter`]. The parser has no
//! knowledge of any of them; they only read a finished [`FlightModel`].

pub mod acmi_export;
#[cfg(feature = "csv")]
pub mod csv_export;
#[cfg(feature = "json")]
pub mod json_export;

pub use acmi_export::AcmiExporter;
#[cfg(feature = "csv")]
pub use csv_export::CsvExporter;
#[cfg(feature = "json")]
pub use json_export::JsonExporter;

use crate::error::ExportError;
use crate::types::FlightModel;
use std::fmt;
use std::path::{Path, PathBuf};

/// A destination format for a parsed flight
pub trait FlightExporter {
    fn export(&self, flight: &FlightModel, destination: &Path) -> Result<(), ExportError>;
}

/// Output formats known to the converter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    #[default]
    Csv,
    Acmi,
    Json,
}

impl ExportFormat {
    /// Look a format up by name or file extension (`csv`, `.acmi`, `JSON`, ...)
    pub fn from_name(name: &str) -> Result<Self, ExportError> {
        match name.trim_start_matches('.').to_ascii_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "acmi" => Ok(ExportFormat::Acmi),
            "json" => Ok(ExportFormat::Json),
            _ => Err(ExportError::UnsupportedFormat(name.to_string())),
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Acmi => "acmi",
            ExportFormat::Json => "json",
        }
    }

    /// Exporter for this format, if it was compiled in
    pub fn exporter(self) -> Result<Box<dyn FlightExporter + Send + Sync>, ExportError> {
        match self {
            #[cfg(feature = "csv")]
            ExportFormat::Csv => Ok(Box::new(CsvExporter)),
            ExportFormat::Acmi => Ok(Box::new(AcmiExporter)),
            #[cfg(feature = "json")]
            ExportFormat::Json => Ok(Box::new(JsonExporter)),
            #[allow(unreachable_patterns)]
            other => Err(ExportError::UnsupportedFormat(format!(
                "{} (not enabled in this build)",
                other
            ))),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Export options for controlling output format and location
#[derive(Debug, Clone, Default)]
pub struct ExportOptions {
    pub format: ExportFormat,
    pub output_dir: Option<String>,
    pub force_export: bool,
}

/// Output path for `input_path`: same stem, format extension, in the output
/// directory or next to the input
pub fn compute_export_path(input_path: &Path, options: &ExportOptions) -> PathBuf {
    let base_name = input_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("flight");

    let output_dir = match options.output_dir {
        Some(ref dir) => PathBuf::from(dir),
        None => input_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(".")),
    };

    output_dir.join(format!("{}.{}", base_name, options.format.extension()))
}

/// Export a flight next to (or relative to) its input file, creating the
/// output directory when needed
pub fn export_flight(
    flight: &FlightModel,
    input_path: &Path,
    options: &ExportOptions,
) -> Result<PathBuf, ExportError> {
    let destination = compute_export_path(input_path, options);
    if let Some(parent) = destination.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }

    options.format.exporter()?.export(flight, &destination)?;
    Ok(destination)
}
