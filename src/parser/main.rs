use crate::error::ParseError;
use crate::parser::session::{ParseMode, ParseSession};
use crate::types::*;
use anyhow::{Context, Result};
use std::path::Path;

/// Parse an IGC file, stopping at the first malformed line
pub fn parse_igc_file(file_path: &Path, debug: bool) -> Result<FlightModel> {
    let (flight, _) = parse_igc_file_with_mode(file_path, ParseMode::Strict, debug)?;
    Ok(flight)
}

/// Parse an IGC file with an explicit error policy
///
/// Returns the flight and, in lenient mode, the diagnostics of skipped lines.
pub fn parse_igc_file_with_mode(
    file_path: &Path,
    mode: ParseMode,
    debug: bool,
) -> Result<(FlightModel, Vec<ParseError>)> {
    let file_data = std::fs::read(file_path)
        .with_context(|| format!("Failed to read IGC file: {:?}", file_path))?;

    if debug {
        println!("=== PARSING IGC FILE ===");
        println!("File: {}", file_path.display());
        println!("File size: {} bytes", file_data.len());
    }

    // Free-text headers occasionally carry Latin-1 names; don't fail the whole file on them
    let text = String::from_utf8_lossy(&file_data);
    let source_name = file_path.display().to_string();

    let mut session = ParseSession::new(source_name).with_mode(mode);
    for line in text.lines() {
        session.feed_line(line)?;
    }
    let (flight, diagnostics) = session.finish();

    if debug {
        println!(
            "Parsed {} fixes, {} K records, {} comments ({} skipped lines)",
            flight.fix_count(),
            flight.aux_records.len(),
            flight.comments.len(),
            diagnostics.len()
        );
    }

    Ok((flight, diagnostics))
}

/// Parse IGC text held in memory
pub fn parse_igc_str(source_name: &str, text: &str) -> std::result::Result<FlightModel, ParseError> {
    parse_lines(source_name, text.lines())
}

/// Parse a sequence of lines from a named source, stopping at the first error
pub fn parse_lines<I, S>(source_name: &str, lines: I) -> std::result::Result<FlightModel, ParseError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut session = ParseSession::new(source_name);
    for line in lines {
        session.feed_line(line.as_ref())?;
    }
    let (flight, _) = session.finish();
    Ok(flight)
}

/// Parse a sequence of lines, skipping malformed ones
pub fn parse_lines_lenient<I, S>(source_name: &str, lines: I) -> (FlightModel, Vec<ParseError>)
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut session = ParseSession::new(source_name).with_mode(ParseMode::Lenient);
    for line in lines {
        let result = session.feed_line(line.as_ref());
        debug_assert!(result.is_ok(), "lenient sessions record errors");
    }
    session.finish()
}
