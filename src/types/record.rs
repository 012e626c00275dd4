#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One field of an I or J record declaration
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ExtensionField {
    pub name: String,
    /// First column, 1-based
    pub start: usize,
    /// Last column, 1-based and inclusive
    pub end: usize,
}

/// Column layout declared by an I record (for B records) or a J record (for K records)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ExtensionLayout {
    pub declared_count: usize,
    pub fields: Vec<ExtensionField>,
}

impl ExtensionLayout {
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Column range of a field, if declared
    pub fn get(&self, name: &str) -> Option<(usize, usize)> {
        self.fields
            .iter()
            .find(|field| field.name == name)
            .map(|field| (field.start, field.end))
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|field| field.name.as_str())
    }
}

/// Extension values of a single record, in declaration order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FieldValues(Vec<(String, String)>);

impl FieldValues {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.0.iter_mut().find(|(existing, _)| *existing == name) {
            Some(entry) => entry.1 = value,
            None => self.0.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// IGC B record
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FixRecord {
    /// HHMMSS
    pub utc_time: String,
    /// DDMMmmm + N/S
    pub latitude: String,
    /// DDDMMmmm + E/W
    pub longitude: String,
    /// `A` for a 3D fix, `V` for 2D or no GPS data
    pub fix_validity: String,
    pub pressure_altitude: String,
    pub gps_altitude: String,
    /// Present only when an I record was active for this fix
    pub extension_values: Option<FieldValues>,
}

impl FixRecord {
    pub fn is_valid(&self) -> bool {
        self.fix_validity == "A"
    }
}

/// IGC K record
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AuxRecord {
    /// HHMMSS
    pub utc_timestamp: String,
    pub flight_data_values: FieldValues,
}
