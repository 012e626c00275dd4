use std::fmt;

/// The reason a single IGC line could not be parsed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// Line is shorter than a required fixed column range
    FieldOutOfRange {
        field: String,
        start: usize,
        end: usize,
        line_len: usize,
    },
    /// `I`/`J` line does not follow the count + triples grammar
    MalformedExtensionDeclaration(String),
    /// `K` record seen before any `J` declaration
    MissingAuxiliaryDeclaration,
    /// Timezone header suffix is not a number
    InvalidTimezone(String),
    /// Date header digits are missing or do not form a calendar date
    InvalidFlightDate(String),
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseErrorKind::FieldOutOfRange {
                field,
                start,
                end,
                line_len,
            } => write!(
                f,
                "field '{}' (columns {}-{}) is out of range for a line of {} characters",
                field, start, end, line_len
            ),
            ParseErrorKind::MalformedExtensionDeclaration(line) => {
                write!(f, "malformed extension declaration '{}'", line)
            }
            ParseErrorKind::MissingAuxiliaryDeclaration => {
                write!(f, "K record found before any J record declaration")
            }
            ParseErrorKind::InvalidTimezone(value) => write!(f, "invalid timezone '{}'", value),
            ParseErrorKind::InvalidFlightDate(value) => {
                write!(f, "invalid flight date '{}'", value)
            }
        }
    }
}

/// A line-scoped parse failure carrying the source and 1-based line number
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    kind: ParseErrorKind,
    line_number: usize,
    source_name: String,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, line_number: usize, source_name: impl Into<String>) -> Self {
        Self {
            kind,
            line_number,
            source_name: source_name.into(),
        }
    }

    pub fn kind(&self) -> &ParseErrorKind {
        &self.kind
    }

    pub fn message(&self) -> String {
        self.kind.to_string()
    }

    pub fn line_number(&self) -> usize {
        self.line_number
    }

    pub fn source_name(&self) -> &str {
        &self.source_name
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Parse error: {} in '{}' at line {}.",
            self.kind, self.source_name, self.line_number
        )
    }
}

impl std::error::Error for ParseError {}

/// Errors raised by the export backends
#[derive(Debug)]
pub enum ExportError {
    /// I/O errors
    Io(std::io::Error),
    /// CSV writer errors
    Csv(String),
    /// JSON serialization errors
    Json(String),
    /// The flight has no HFDTE date, so no absolute timestamps can be derived
    MissingFlightDate,
    /// The flight has no B records
    NoFixes,
    /// A fix carries a coordinate or time that cannot be converted
    InvalidCoordinate { utc_time: String, value: String },
    /// No exporter is registered for the requested format
    UnsupportedFormat(String),
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportError::Io(err) => write!(f, "I/O error: {}", err),
            ExportError::Csv(msg) => write!(f, "CSV error: {}", msg),
            ExportError::Json(msg) => write!(f, "JSON error: {}", msg),
            ExportError::MissingFlightDate => write!(f, "flight date header is missing"),
            ExportError::NoFixes => write!(f, "flight contains no fix records"),
            ExportError::InvalidCoordinate { utc_time, value } => {
                write!(f, "invalid value '{}' in fix at {}", value, utc_time)
            }
            ExportError::UnsupportedFormat(format) => {
                write!(f, "unsupported export format '{}'", format)
            }
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ExportError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ExportError {
    fn from(err: std::io::Error) -> Self {
        ExportError::Io(err)
    }
}

#[cfg(feature = "csv")]
impl From<csv::Error> for ExportError {
    fn from(err: csv::Error) -> Self {
        ExportError::Csv(err.to_string())
    }
}

#[cfg(feature = "json")]
impl From<serde_json::Error> for ExportError {
    fn from(err: serde_json::Error) -> Self {
        ExportError::Json(err.to_string())
    }
}
