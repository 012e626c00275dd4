//! I and J record declarations
//!
//! Both records share one grammar: the record letter, a two digit field
//! count, then one `SSEENNN` triple per field (start column, end column,
//! three letter code). The resulting layout is applied to every following
//! B record (I) or K record (J).

use crate::error::ParseErrorKind;
use crate::parser::helpers::field;
use crate::types::{ExtensionField, ExtensionLayout, FieldValues};
use regex::Regex;
use std::sync::OnceLock;

fn declaration_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(\d{2})((?:\d{4}[A-Z]{3})*)$").expect("declaration regex is valid")
    })
}

fn triple_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\d{2})(\d{2})([A-Z]{3})").expect("triple regex is valid"))
}

impl ExtensionLayout {
    /// Parse a full I or J line into a layout
    pub fn declare(raw_line: &str) -> Result<ExtensionLayout, ParseErrorKind> {
        let malformed = || ParseErrorKind::MalformedExtensionDeclaration(raw_line.to_string());

        let body = raw_line.get(1..).ok_or_else(malformed)?.trim_end();
        let captures = declaration_regex().captures(body).ok_or_else(malformed)?;
        let declared_count: usize = captures[1].parse().map_err(|_| malformed())?;

        let mut fields = Vec::with_capacity(declared_count);
        for triple in triple_regex().captures_iter(&captures[2]) {
            let start: usize = triple[1].parse().map_err(|_| malformed())?;
            let end: usize = triple[2].parse().map_err(|_| malformed())?;
            if start == 0 || end < start {
                return Err(malformed());
            }
            fields.push(ExtensionField {
                name: triple[3].to_string(),
                start,
                end,
            });
        }

        if fields.len() != declared_count {
            return Err(malformed());
        }

        Ok(ExtensionLayout {
            declared_count,
            fields,
        })
    }

    /// Extract every declared field from a B or K line
    pub fn resolve(&self, line: &str) -> Result<FieldValues, ParseErrorKind> {
        let mut values = FieldValues::new();
        for ext in &self.fields {
            let value = field(line, &ext.name, ext.start, ext.end)?;
            values.insert(ext.name.as_str(), value);
        }
        Ok(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declare_two_fields() {
        let layout = ExtensionLayout::declare("I023638FXA3940SIU").unwrap();
        assert_eq!(layout.declared_count, 2);
        assert_eq!(layout.len(), 2);
        assert_eq!(layout.get("FXA"), Some((36, 38)));
        assert_eq!(layout.get("SIU"), Some((39, 40)));
    }

    #[test]
    fn test_declare_eight_fields() {
        let layout =
            ExtensionLayout::declare("I083638FXA3941ENL4246TAS4751GSP5254TRT5559VAT6063OAT6467ACZ")
                .unwrap();
        assert_eq!(layout.declared_count, 8);
        assert_eq!(
            layout.field_names().collect::<Vec<_>>(),
            ["FXA", "ENL", "TAS", "GSP", "TRT", "VAT", "OAT", "ACZ"]
        );
        assert_eq!(layout.get("ACZ"), Some((64, 67)));
    }

    #[test]
    fn test_declare_tolerates_trailing_whitespace() {
        let layout = ExtensionLayout::declare("J010810HDT  ").unwrap();
        assert_eq!(layout.get("HDT"), Some((8, 10)));
    }

    #[test]
    fn test_declare_rejects_count_mismatch() {
        let err = ExtensionLayout::declare("I033638FXA3940SIU").unwrap_err();
        assert_eq!(
            err,
            ParseErrorKind::MalformedExtensionDeclaration("I033638FXA3940SIU".to_string())
        );
    }

    #[test]
    fn test_declare_rejects_bad_grammar() {
        assert!(ExtensionLayout::declare("I").is_err());
        assert!(ExtensionLayout::declare("IXX3638FXA").is_err());
        assert!(ExtensionLayout::declare("I013638fxa").is_err());
        assert!(ExtensionLayout::declare("I013638FXA39").is_err());
        assert!(ExtensionLayout::declare("I013836FXA").is_err());
        assert!(ExtensionLayout::declare("I010038FXA").is_err());
    }

    #[test]
    fn test_resolve_values() {
        let layout = ExtensionLayout::declare("I023638FXA3940SIU").unwrap();
        let values = layout
            .resolve("B1511094538002N07249279WA-00940004000109")
            .unwrap();
        assert_eq!(values.get("FXA"), Some("001"));
        assert_eq!(values.get("SIU"), Some("09"));
        assert_eq!(values.names().collect::<Vec<_>>(), ["FXA", "SIU"]);
    }

    #[test]
    fn test_resolve_names_short_field() {
        let layout = ExtensionLayout::declare("I023638FXA3942SIU").unwrap();
        let err = layout
            .resolve("B1511094538002N07249279WA-00940004000109")
            .unwrap_err();
        match err {
            ParseErrorKind::FieldOutOfRange { field, .. } => assert_eq!(field, "SIU"),
            other => panic!("unexpected error {other:?}"),
        }
    }
}
