use crate::conversion::{reference_datetime, utc_time_to_seconds};
use crate::types::{
    AuxRecord, DifferentialGps, ExtensionLayout, FixRecord, FlightRecorderInfo, Header,
};
use chrono::NaiveDateTime;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Complete parsed IGC flight
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FlightModel {
    pub header: Header,
    pub flight_recorder_info: FlightRecorderInfo,
    /// Last I record declaration, if any
    pub fix_extension_layout: Option<ExtensionLayout>,
    /// Last J record declaration, if any
    pub aux_extension_layout: Option<ExtensionLayout>,
    pub fixes: Vec<FixRecord>,
    pub aux_records: Vec<AuxRecord>,
    pub comments: Vec<String>,
    pub differential_gps: Option<DifferentialGps>,
}

impl FlightModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fix_count(&self) -> usize {
        self.fixes.len()
    }

    /// Number of fixes flagged as 3D (`A`)
    pub fn valid_fix_count(&self) -> usize {
        self.fixes.iter().filter(|fix| fix.is_valid()).count()
    }

    pub fn first_fix(&self) -> Option<&FixRecord> {
        self.fixes.first()
    }

    pub fn last_fix(&self) -> Option<&FixRecord> {
        self.fixes.last()
    }

    /// Check if any fix carries I record extension values
    pub fn has_extension_data(&self) -> bool {
        self.fixes.iter().any(|fix| fix.extension_values.is_some())
    }

    pub fn has_aux_data(&self) -> bool {
        !self.aux_records.is_empty()
    }

    /// Seconds between the first and last fix, wrapping past midnight UTC
    pub fn duration_seconds(&self) -> Option<u32> {
        let start = utc_time_to_seconds(&self.first_fix()?.utc_time)?;
        let end = utc_time_to_seconds(&self.last_fix()?.utc_time)?;
        Some(if end >= start {
            end - start
        } else {
            end + 86_400 - start
        })
    }

    /// Flight date combined with the time of the first fix
    pub fn reference_timestamp(&self) -> Option<NaiveDateTime> {
        let date = self.header.flight_date?;
        reference_datetime(date, &self.first_fix()?.utc_time)
    }
}
