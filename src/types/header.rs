use chrono::NaiveDate;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// UTC calendar date of the flight from the HFDTE header
///
/// IGC stores the year with two digits. It is always read as 20YY, so logs
/// recorded before 2000 come out a century late.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FlightDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl FlightDate {
    /// Build a date from the DD, MM and YY digits of the header
    pub fn from_two_digit_year(day: u32, month: u32, year: u32) -> Option<Self> {
        let year = 2000 + year as i32;
        NaiveDate::from_ymd_opt(year, month, day)?;
        Some(Self { year, month, day })
    }

    pub fn to_naive_date(self) -> NaiveDate {
        // Validated on construction; the fallback only guards hand-built values.
        NaiveDate::from_ymd_opt(self.year, self.month, self.day).unwrap_or_default()
    }
}

/// IGC H record information
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Header {
    pub flight_date: Option<FlightDate>,
    pub fix_accuracy: u32,
    pub pilot_name: String,
    pub is_pilot_in_charge: bool,
    pub second_pilot_name: String,
    pub glider_type: String,
    pub glider_id: String,
    pub gps_datum: String,
    pub gps_datum_code: u32,
    pub firmware_version: String,
    pub hardware_version: String,
    pub flight_recorder_type: String,
    pub gps_receiver: String,
    pub pressure_sensor: String,
    pub competition_class: String,
    pub tail_number: String,
    /// Offset from UTC in hours
    pub timezone_offset: f64,
    /// Every H line in file order, including vendor lines that are not decoded
    pub all_headers: Vec<String>,
}

/// IGC A record: flight recorder identity
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FlightRecorderInfo {
    pub manufacturer_code: String,
    pub serial_number: String,
    pub daily_flight_number: String,
}

/// IGC D record
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DifferentialGps {
    pub qualifier: char,
    /// Only set when `qualifier` is [`DifferentialGps::DGPS_QUALIFIER`]
    pub station_id: String,
}

impl DifferentialGps {
    pub const DGPS_QUALIFIER: char = '2';

    pub fn is_dgps(&self) -> bool {
        self.qualifier == Self::DGPS_QUALIFIER
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flight_date_assumes_21st_century() {
        let date = FlightDate::from_two_digit_year(15, 6, 11).unwrap();
        assert_eq!(date.year, 2011);
        assert_eq!(
            date.to_naive_date(),
            NaiveDate::from_ymd_opt(2011, 6, 15).unwrap()
        );
    }

    #[test]
    fn test_flight_date_rejects_impossible_dates() {
        assert!(FlightDate::from_two_digit_year(31, 2, 20).is_none());
        assert!(FlightDate::from_two_digit_year(1, 13, 20).is_none());
        assert!(FlightDate::from_two_digit_year(0, 1, 20).is_none());
        assert!(FlightDate::from_two_digit_year(29, 2, 24).is_some());
    }

    #[test]
    fn test_header_defaults_are_empty() {
        let header = Header::default();
        assert!(header.flight_date.is_none());
        assert!(header.pilot_name.is_empty());
        assert!(!header.is_pilot_in_charge);
        assert_eq!(header.timezone_offset, 0.0);
        assert!(header.all_headers.is_empty());
    }
}
