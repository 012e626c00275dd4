//! Handlers for the single-line IGC records other than H, I and J

use crate::error::ParseErrorKind;
use crate::parser::helpers::{field, field_from};
use crate::types::{AuxRecord, DifferentialGps, ExtensionLayout, FixRecord, FlightRecorderInfo};

/// A record: manufacturer (cols 2-4), serial (cols 5-7), then the daily
/// flight number after a colon, or the whole remainder if there is none
pub fn parse_recorder_line(line: &str) -> Result<FlightRecorderInfo, ParseErrorKind> {
    let manufacturer_code = field(line, "manufacturer code", 2, 4)?;
    let serial_number = field(line, "serial number", 5, 7)?;
    let remainder = field_from(line, "daily flight number", 8)?;
    let daily_flight_number = match remainder.split_once(':') {
        Some((_, number)) => number,
        None => remainder,
    };

    Ok(FlightRecorderInfo {
        manufacturer_code: manufacturer_code.to_string(),
        serial_number: serial_number.to_string(),
        daily_flight_number: daily_flight_number.trim().to_string(),
    })
}

/// B record; extension values are attached only when an I layout is active
pub fn parse_fix_line(
    line: &str,
    layout: Option<&ExtensionLayout>,
) -> Result<FixRecord, ParseErrorKind> {
    let utc_time = field(line, "utc time", 2, 7)?;
    let latitude = field(line, "latitude", 8, 15)?;
    let longitude = field(line, "longitude", 16, 24)?;
    let fix_validity = field(line, "fix validity", 25, 25)?;
    let pressure_altitude = field(line, "pressure altitude", 26, 30)?;
    let gps_altitude = field(line, "gps altitude", 31, 35)?;

    let extension_values = match layout {
        Some(layout) => Some(layout.resolve(line)?),
        None => None,
    };

    Ok(FixRecord {
        utc_time: utc_time.to_string(),
        latitude: latitude.to_string(),
        longitude: longitude.to_string(),
        fix_validity: fix_validity.to_string(),
        pressure_altitude: pressure_altitude.to_string(),
        gps_altitude: gps_altitude.to_string(),
        extension_values,
    })
}

/// K record, resolved against the active J layout
pub fn parse_aux_line(
    line: &str,
    layout: Option<&ExtensionLayout>,
) -> Result<AuxRecord, ParseErrorKind> {
    let layout = layout.ok_or(ParseErrorKind::MissingAuxiliaryDeclaration)?;
    let utc_timestamp = field(line, "utc time", 2, 7)?;

    Ok(AuxRecord {
        utc_timestamp: utc_timestamp.to_string(),
        flight_data_values: layout.resolve(line)?,
    })
}

/// L record text without the leading `L`
pub fn parse_comment_line(line: &str) -> String {
    line.get(1..).unwrap_or("").to_string()
}

/// D record: GPS qualifier, then a 4 character station id for DGPS only
pub fn parse_dgps_line(line: &str) -> Result<DifferentialGps, ParseErrorKind> {
    let qualifier = field(line, "gps qualifier", 2, 2)?
        .chars()
        .next()
        .unwrap_or_default();

    let station_id = if qualifier == DifferentialGps::DGPS_QUALIFIER {
        field(line, "dgps station id", 3, 6)?.to_string()
    } else {
        String::new()
    };

    Ok(DifferentialGps {
        qualifier,
        station_id,
    })
}
