//! Fixed-column field extraction helpers
//!
//! IGC columns are numbered from 1 and ranges include their last column, so
//! columns `start..=end` map to the byte slice `start - 1..end`.

use crate::error::ParseErrorKind;

/// Slice columns `start..=end` (1-based) out of `line`
pub fn field<'a>(
    line: &'a str,
    name: &str,
    start: usize,
    end: usize,
) -> Result<&'a str, ParseErrorKind> {
    let out_of_range = || ParseErrorKind::FieldOutOfRange {
        field: name.to_string(),
        start,
        end,
        line_len: line.len(),
    };

    if start == 0 || end < start {
        return Err(out_of_range());
    }
    line.get(start - 1..end).ok_or_else(out_of_range)
}

/// Everything from column `start` (1-based) to the end of the line
pub fn field_from<'a>(line: &'a str, name: &str, start: usize) -> Result<&'a str, ParseErrorKind> {
    if start == 0 {
        return Err(ParseErrorKind::FieldOutOfRange {
            field: name.to_string(),
            start,
            end: line.len(),
            line_len: line.len(),
        });
    }
    line.get(start - 1..)
        .ok_or_else(|| ParseErrorKind::FieldOutOfRange {
            field: name.to_string(),
            start,
            end: start,
            line_len: line.len(),
        })
}

/// Numeric field, `None` when the columns are missing or not all digits
pub fn field_u32(line: &str, start: usize, end: usize) -> Option<u32> {
    let text = field(line, "", start, end).ok()?;
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

/// Value of a `H` line after its first colon, trimmed
pub fn header_value(line: &str) -> Option<&str> {
    line.split_once(':').map(|(_, value)| value.trim())
}
