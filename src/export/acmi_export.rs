//! Tacview ACMI 2.1 text export
//!
//! The file starts with the format lines and the global reference time
//! (flight date plus the first fix time). The glider is object `1`; every
//! fix adds a `#<seconds>` time frame when the time changes and a
//! `1,T=lon|lat|alt` transform line.

use crate::conversion::{elapsed_seconds, latitude_to_degrees, longitude_to_degrees, parse_altitude};
use crate::error::ExportError;
use crate::export::FlightExporter;
use crate::types::{FixRecord, FlightModel};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

const GLIDER_OBJECT_ID: &str = "1";

#[derive(Debug, Clone, Copy, Default)]
pub struct AcmiExporter;

impl FlightExporter for AcmiExporter {
    fn export(&self, flight: &FlightModel, destination: &Path) -> Result<(), ExportError> {
        let file = File::create(destination)?;
        let mut writer = BufWriter::new(file);
        write_acmi(flight, &mut writer)?;
        writer.flush()?;
        Ok(())
    }
}

/// Write a flight as ACMI text to any writer
pub fn write_acmi<W: Write>(flight: &FlightModel, out: &mut W) -> Result<(), ExportError> {
    let first_fix = flight.first_fix().ok_or(ExportError::NoFixes)?;
    if flight.header.flight_date.is_none() {
        return Err(ExportError::MissingFlightDate);
    }
    let reference = flight
        .reference_timestamp()
        .ok_or_else(|| invalid(first_fix, &first_fix.utc_time))?;

    writeln!(out, "FileType=text/acmi/tacview")?;
    writeln!(out, "FileVersion=2.1")?;
    writeln!(out, "0,ReferenceTime={}", reference.format("%Y-%m-%dT%H:%M:%SZ"))?;

    let header = &flight.header;
    let recorder = &flight.flight_recorder_info;
    let global_properties = [
        ("Title", header.glider_id.as_str()),
        ("Author", header.pilot_name.as_str()),
        ("DataRecorder", header.flight_recorder_type.as_str()),
        ("DataSource", recorder.manufacturer_code.as_str()),
    ];
    for (name, value) in global_properties {
        if !value.is_empty() {
            writeln!(out, "0,{}={}", name, escape_value(value))?;
        }
    }

    let mut last_elapsed = None;
    for (index, fix) in flight.fixes.iter().enumerate() {
        let elapsed = elapsed_seconds(&first_fix.utc_time, &fix.utc_time)
            .ok_or_else(|| invalid(fix, &fix.utc_time))?;
        if last_elapsed != Some(elapsed) {
            writeln!(out, "#{}", elapsed)?;
            last_elapsed = Some(elapsed);
        }

        let longitude =
            longitude_to_degrees(&fix.longitude).ok_or_else(|| invalid(fix, &fix.longitude))?;
        let latitude =
            latitude_to_degrees(&fix.latitude).ok_or_else(|| invalid(fix, &fix.latitude))?;
        let altitude =
            parse_altitude(&fix.gps_altitude).ok_or_else(|| invalid(fix, &fix.gps_altitude))?;

        write!(
            out,
            "{},T={:.7}|{:.7}|{}",
            GLIDER_OBJECT_ID, longitude, latitude, altitude
        )?;
        if index == 0 {
            write_object_properties(flight, out)?;
        }
        writeln!(out)?;
    }

    Ok(())
}

/// Static glider properties, appended to the first transform line
fn write_object_properties<W: Write>(flight: &FlightModel, out: &mut W) -> Result<(), ExportError> {
    let header = &flight.header;
    write!(out, ",Type=Air+FixedWing")?;
    let properties = [
        ("Name", header.glider_type.as_str()),
        ("Pilot", header.pilot_name.as_str()),
        ("Registration", header.glider_id.as_str()),
        ("CallSign", header.tail_number.as_str()),
    ];
    for (name, value) in properties {
        if !value.is_empty() {
            write!(out, ",{}={}", name, escape_value(value))?;
        }
    }
    Ok(())
}

/// Commas separate properties, so literal ones are escaped
fn escape_value(value: &str) -> String {
    value.replace(',', "\\,")
}

fn invalid(fix: &FixRecord, value: &str) -> ExportError {
    ExportError::InvalidCoordinate {
        utc_time: fix.utc_time.clone(),
        value: value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_lines;

    fn render(lines: &[&str]) -> Result<String, ExportError> {
        let flight = parse_lines("acmi.igc", lines.iter().copied()).unwrap();
        let mut out = Vec::new();
        write_acmi(&flight, &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_writes_header_and_frames() {
        let text = render(&[
            "AFLA9WL",
            "HFDTE150611",
            "HFPLTPILOTINCHARGE: Jane Doe",
            "HFGTYGLIDERTYPE: LS8, 18m",
            "HFGIDGLIDERID: D-1234",
            "B1511094538002N07249279WA-00940004000109",
            "B1511094538002N07249279WA-00940004100109",
            "B1511144539000N07250000EA-00940012300109",
        ])
        .unwrap();

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            [
                "FileType=text/acmi/tacview",
                "FileVersion=2.1",
                "0,ReferenceTime=2011-06-15T15:11:09Z",
                "0,Title=D-1234",
                "0,Author=Jane Doe",
                "0,DataSource=FLA",
                "#0",
                "1,T=-72.8213167|45.6333667|40,Type=Air+FixedWing,Name=LS8\\, 18m,Pilot=Jane Doe,Registration=D-1234",
                "1,T=-72.8213167|45.6333667|41",
                "#5",
                "1,T=72.8333333|45.6500000|123",
            ]
        );
    }

    #[test]
    fn test_elapsed_time_wraps_past_midnight() {
        let text = render(&[
            "HFDTE150611",
            "B2359594538002N07249279WA-00940004000109",
            "B0000044538002N07249279WA-00940004000109",
        ])
        .unwrap();
        assert!(text.contains("0,ReferenceTime=2011-06-15T23:59:59Z"));
        assert!(text.contains("\n#5\n"));
    }

    #[test]
    fn test_requires_date_and_fixes() {
        assert!(matches!(
            render(&["B1511094538002N07249279WA-00940004000109"]),
            Err(ExportError::MissingFlightDate)
        ));
        assert!(matches!(
            render(&["HFDTE150611"]),
            Err(ExportError::NoFixes)
        ));
    }

    #[test]
    fn test_rejects_bad_coordinate() {
        let err = render(&[
            "HFDTE150611",
            "B1511094538002X07249279WA-00940004000109",
        ])
        .unwrap_err();
        match err {
            ExportError::InvalidCoordinate { utc_time, value } => {
                assert_eq!(utc_time, "151109");
                assert_eq!(value, "4538002X");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
