use crate::error::{ParseError, ParseErrorKind};
use crate::parser::header::parse_header_line;
use crate::parser::records::{
    parse_aux_line, parse_comment_line, parse_dgps_line, parse_fix_line, parse_recorder_line,
};
use crate::types::{ExtensionLayout, FlightModel};

/// What a session does when a line fails to parse
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ParseMode {
    /// Stop at the first malformed line
    #[default]
    Strict,
    /// Skip malformed lines and keep their diagnostics
    Lenient,
}

/// Line-by-line parser state for one IGC source
///
/// The only state carried between lines is the active I and J layouts, so
/// one session must see the lines of a file in order.
#[derive(Debug)]
pub struct ParseSession {
    source_name: String,
    mode: ParseMode,
    line_number: usize,
    flight: FlightModel,
    fix_layout: Option<ExtensionLayout>,
    aux_layout: Option<ExtensionLayout>,
    diagnostics: Vec<ParseError>,
}

impl ParseSession {
    pub fn new(source_name: impl Into<String>) -> Self {
        Self {
            source_name: source_name.into(),
            mode: ParseMode::Strict,
            line_number: 0,
            flight: FlightModel::new(),
            fix_layout: None,
            aux_layout: None,
            diagnostics: Vec::new(),
        }
    }

    pub fn with_mode(mut self, mode: ParseMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    /// Number of lines fed so far
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    pub fn diagnostics(&self) -> &[ParseError] {
        &self.diagnostics
    }

    /// Parse the next line of the source
    ///
    /// In strict mode the first error is returned and the caller is expected
    /// to stop. In lenient mode the error is recorded and `Ok` is returned.
    pub fn feed_line(&mut self, line: &str) -> Result<(), ParseError> {
        self.line_number += 1;
        let line = line.trim_end_matches(['\r', '\n']);

        match self.dispatch(line) {
            Ok(()) => Ok(()),
            Err(kind) => {
                let err = ParseError::new(kind, self.line_number, self.source_name.as_str());
                match self.mode {
                    ParseMode::Strict => Err(err),
                    ParseMode::Lenient => {
                        self.diagnostics.push(err);
                        Ok(())
                    }
                }
            }
        }
    }

    fn dispatch(&mut self, line: &str) -> Result<(), ParseErrorKind> {
        let Some(record_type) = line.chars().next() else {
            return Ok(());
        };

        match record_type {
            'A' => self.flight.flight_recorder_info = parse_recorder_line(line)?,
            'H' => parse_header_line(line, &mut self.flight.header)?,
            'I' => self.fix_layout = Some(ExtensionLayout::declare(line)?),
            'J' => self.aux_layout = Some(ExtensionLayout::declare(line)?),
            'B' => {
                let fix = parse_fix_line(line, self.fix_layout.as_ref())?;
                self.flight.fixes.push(fix);
            }
            'K' => {
                let record = parse_aux_line(line, self.aux_layout.as_ref())?;
                self.flight.aux_records.push(record);
            }
            'L' => self.flight.comments.push(parse_comment_line(line)),
            'D' => self.flight.differential_gps = Some(parse_dgps_line(line)?),
            // C (task), E (event), F (satellites), G (security) and unknown records
            _ => {}
        }

        Ok(())
    }

    /// Hand over the finished flight together with any lenient-mode diagnostics
    pub fn finish(mut self) -> (FlightModel, Vec<ParseError>) {
        self.flight.fix_extension_layout = self.fix_layout;
        self.flight.aux_extension_layout = self.aux_layout;
        (self.flight, self.diagnostics)
    }
}
