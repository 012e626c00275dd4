use crate::error::ParseErrorKind;
use crate::parser::helpers::{field_u32, header_value};
use crate::types::{FlightDate, Header};
use regex::Regex;
use std::sync::OnceLock;

fn date_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\d{2})(\d{2})(\d{2})").expect("date regex is valid"))
}

/// Parse one H line into `header`
///
/// H lines are `H`, a data source letter (`F` recorder, `O` observer,
/// `P` pilot) and a three letter subject code. Codes that are not decoded
/// here are kept only in `all_headers`.
pub fn parse_header_line(line: &str, header: &mut Header) -> Result<(), ParseErrorKind> {
    header.all_headers.push(line.to_string());

    let source = line.get(1..2).unwrap_or("");
    if !matches!(source, "F" | "O" | "P") {
        return Ok(());
    }
    let Some(code) = line.get(2..5) else {
        return Ok(());
    };
    let rest = line.get(5..).unwrap_or("");

    match code {
        "PLT" => {
            header.is_pilot_in_charge = line.contains("PILOTINCHARGE");
            header.pilot_name = header_value(line).unwrap_or("").to_string();
        }
        "CM2" => set_text(&mut header.second_pilot_name, line),
        "DTE" => header.flight_date = Some(parse_flight_date(rest)?),
        "GTY" => set_text(&mut header.glider_type, line),
        "GID" => set_text(&mut header.glider_id, line),
        "DTM" => {
            set_text(&mut header.gps_datum, line);
            if let Some(code) = field_u32(line, 6, 8) {
                header.gps_datum_code = code;
            }
        }
        "RFW" => set_text(&mut header.firmware_version, line),
        "RHW" => set_text(&mut header.hardware_version, line),
        "FTY" => set_text(&mut header.flight_recorder_type, line),
        "GPS" => header.gps_receiver = strip_label(rest, "RECEIVER:").to_string(),
        "PRS" => header.pressure_sensor = strip_label(rest, "PRESSALTSENSOR:").to_string(),
        "CID" => set_text(&mut header.tail_number, line),
        "CCL" => set_text(&mut header.competition_class, line),
        "FXA" => {
            if let Ok(accuracy) = value_or_rest(line, rest).parse() {
                header.fix_accuracy = accuracy;
            }
        }
        "TZN" | "TZO" => header.timezone_offset = parse_timezone(rest)?,
        _ => {}
    }

    Ok(())
}

/// Lines without a colon leave the existing value untouched
fn set_text(target: &mut String, line: &str) {
    if let Some(value) = header_value(line) {
        *target = value.to_string();
    }
}

fn value_or_rest<'a>(line: &'a str, rest: &'a str) -> &'a str {
    header_value(line).unwrap_or_else(|| rest.trim())
}

/// Free text after an optional label; colons inside the text are kept
fn strip_label<'a>(rest: &'a str, label: &str) -> &'a str {
    rest.strip_prefix(label)
        .or_else(|| rest.strip_prefix(':'))
        .unwrap_or(rest)
        .trim()
}

/// First DDMMYY group after the subject code, e.g. `150611` or `DATE:150611,01`
fn parse_flight_date(rest: &str) -> Result<FlightDate, ParseErrorKind> {
    let invalid = || ParseErrorKind::InvalidFlightDate(rest.trim().to_string());

    let captures = date_regex().captures(rest).ok_or_else(invalid)?;
    let day: u32 = captures[1].parse().map_err(|_| invalid())?;
    let month: u32 = captures[2].parse().map_err(|_| invalid())?;
    let year: u32 = captures[3].parse().map_err(|_| invalid())?;

    FlightDate::from_two_digit_year(day, month, year).ok_or_else(invalid)
}

/// Accepts `TIMEZONE:+2.00` as well as the whitespace separated `HFTZN 2`
fn parse_timezone(rest: &str) -> Result<f64, ParseErrorKind> {
    let candidate = match rest.split_once(':') {
        Some((_, value)) => value.trim(),
        None => rest.split_whitespace().last().unwrap_or(""),
    };
    candidate
        .parse::<f64>()
        .ok()
        .filter(|offset| offset.is_finite())
        .ok_or_else(|| ParseErrorKind::InvalidTimezone(rest.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_all(lines: &[&str]) -> Header {
        let mut header = Header::default();
        for line in lines {
            parse_header_line(line, &mut header).unwrap();
        }
        header
    }

    #[test]
    fn test_pilot_in_charge() {
        let header = parse_all(&["HFPLTPILOTINCHARGE:John Doe"]);
        assert!(header.is_pilot_in_charge);
        assert_eq!(header.pilot_name, "John Doe");

        let header = parse_all(&["HFPLTPILOT:Jane Roe"]);
        assert!(!header.is_pilot_in_charge);
        assert_eq!(header.pilot_name, "Jane Roe");
    }

    #[test]
    fn test_text_fields() {
        let header = parse_all(&[
            "HFCM2CREW2:Max Mustermann",
            "HFGTYGLIDERTYPE:ASW 27",
            "HFGIDGLIDERID:D-1234",
            "HFRFWFIRMWAREVERSION:6.4",
            "HFRHWHARDWAREVERSION:1.2",
            "HFFTYFRTYPE:LXNAV,LX8000F",
            "HFCIDCOMPETITIONID:XY",
            "HFCCLCOMPETITIONCLASS:Standard",
            "HFGPSRECEIVER:uBLOX NEO-6",
            "HFPRSPRESSALTSENSOR:Intersema MS5534B,8191",
        ]);
        assert_eq!(header.second_pilot_name, "Max Mustermann");
        assert_eq!(header.glider_type, "ASW 27");
        assert_eq!(header.glider_id, "D-1234");
        assert_eq!(header.firmware_version, "6.4");
        assert_eq!(header.hardware_version, "1.2");
        assert_eq!(header.flight_recorder_type, "LXNAV,LX8000F");
        assert_eq!(header.tail_number, "XY");
        assert_eq!(header.competition_class, "Standard");
        assert_eq!(header.gps_receiver, "uBLOX NEO-6");
        assert_eq!(header.pressure_sensor, "Intersema MS5534B,8191");
        assert_eq!(header.all_headers.len(), 10);
    }

    #[test]
    fn test_gps_receiver_without_label() {
        let header = parse_all(&["HFGPSMarconi Superstar,12ch"]);
        assert_eq!(header.gps_receiver, "Marconi Superstar,12ch");
    }

    #[test]
    fn test_sensor_text_keeps_inner_colons() {
        let header = parse_all(&[
            "HFGPSu-blox:LEA-4P,16,8191",
            "HFPRSIntersema:MS5534B",
        ]);
        assert_eq!(header.gps_receiver, "u-blox:LEA-4P,16,8191");
        assert_eq!(header.pressure_sensor, "Intersema:MS5534B");

        let header = parse_all(&["HFGPS:uBLOX NEO-6", "HFPRSPRESSALTSENSOR:Bosch:BMP280"]);
        assert_eq!(header.gps_receiver, "uBLOX NEO-6");
        assert_eq!(header.pressure_sensor, "Bosch:BMP280");
    }

    #[test]
    fn test_gps_datum() {
        let header = parse_all(&["HFDTM100GPSDATUM:WGS-1984"]);
        assert_eq!(header.gps_datum, "WGS-1984");
        assert_eq!(header.gps_datum_code, 100);

        let header = parse_all(&["HFDTMGPSDATUM:WGS84"]);
        assert_eq!(header.gps_datum, "WGS84");
        assert_eq!(header.gps_datum_code, 0);
    }

    #[test]
    fn test_flight_date_formats() {
        let header = parse_all(&["HFDTE150611"]);
        assert_eq!(header.flight_date, FlightDate::from_two_digit_year(15, 6, 11));

        let header = parse_all(&["HFDTEDATE:020324,01"]);
        let date = header.flight_date.unwrap();
        assert_eq!((date.year, date.month, date.day), (2024, 3, 2));
    }

    #[test]
    fn test_invalid_flight_date() {
        let mut header = Header::default();
        let err = parse_header_line("HFDTE310220", &mut header).unwrap_err();
        assert_eq!(err, ParseErrorKind::InvalidFlightDate("310220".to_string()));

        let err = parse_header_line("HFDTEDATE:", &mut header).unwrap_err();
        assert!(matches!(err, ParseErrorKind::InvalidFlightDate(_)));
    }

    #[test]
    fn test_timezone_variants() {
        assert_eq!(parse_all(&["HFTZNTIMEZONE:+2.00"]).timezone_offset, 2.0);
        assert_eq!(parse_all(&["HFTZNTIMEZONE:-3.5"]).timezone_offset, -3.5);
        assert_eq!(parse_all(&["HFTZN 1"]).timezone_offset, 1.0);
        assert_eq!(parse_all(&["HFTZOTimezoneOffset: 10"]).timezone_offset, 10.0);
    }

    #[test]
    fn test_invalid_timezone() {
        let mut header = Header::default();
        let err = parse_header_line("HFTZNTIMEZONE:UTC", &mut header).unwrap_err();
        assert_eq!(err, ParseErrorKind::InvalidTimezone("TIMEZONE:UTC".to_string()));
        assert!(parse_header_line("HFTZN", &mut header).is_err());

        for line in ["HFTZN NaN", "HFTZNTIMEZONE:inf", "HFTZO -infinity"] {
            let err = parse_header_line(line, &mut header).unwrap_err();
            assert!(matches!(err, ParseErrorKind::InvalidTimezone(_)), "{line}");
        }
        assert_eq!(header.timezone_offset, 0.0);
    }

    #[test]
    fn test_fix_accuracy() {
        assert_eq!(parse_all(&["HFFXA035"]).fix_accuracy, 35);
        assert_eq!(parse_all(&["HFFXAACCURACY:50"]).fix_accuracy, 50);
        assert_eq!(parse_all(&["HFFXA"]).fix_accuracy, 0);
    }

    #[test]
    fn test_unknown_subjects_are_kept_raw() {
        let header = parse_all(&["HFXYZVENDOR:whatever", "HOPLTPILOT:Observer Entry", "HX"]);
        assert_eq!(header.pilot_name, "Observer Entry");
        assert_eq!(header.all_headers.len(), 3);
    }
}
