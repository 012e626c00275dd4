//! Data conversion utilities for IGC records
//!
//! The parser keeps every B/K record field as the raw text found in the file.
//! Exporters that need numbers (decimal degrees, seconds since midnight,
//! absolute timestamps) use the helpers below.

use crate::types::FlightDate;
use chrono::{NaiveDateTime, NaiveTime};

const SECONDS_PER_DAY: u32 = 86_400;

/// Convert an HHMMSS time of day to seconds since midnight
pub fn utc_time_to_seconds(utc_time: &str) -> Option<u32> {
    if utc_time.len() != 6 || !utc_time.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let hours: u32 = utc_time[0..2].parse().ok()?;
    let minutes: u32 = utc_time[2..4].parse().ok()?;
    let seconds: u32 = utc_time[4..6].parse().ok()?;
    if hours > 23 || minutes > 59 || seconds > 59 {
        return None;
    }
    Some(hours * 3600 + minutes * 60 + seconds)
}

/// Seconds from `reference_utc` to `utc_time`, wrapping past midnight
pub fn elapsed_seconds(reference_utc: &str, utc_time: &str) -> Option<u32> {
    let reference = utc_time_to_seconds(reference_utc)?;
    let current = utc_time_to_seconds(utc_time)?;
    Some(if current >= reference {
        current - reference
    } else {
        current + SECONDS_PER_DAY - reference
    })
}

/// Combine the flight date with an HHMMSS time of day
pub fn reference_datetime(date: FlightDate, utc_time: &str) -> Option<NaiveDateTime> {
    let seconds = utc_time_to_seconds(utc_time)?;
    let time = NaiveTime::from_num_seconds_from_midnight_opt(seconds, 0)?;
    Some(date.to_naive_date().and_time(time))
}

/// Convert a DDMMmmm[NS] latitude to signed decimal degrees
pub fn latitude_to_degrees(latitude: &str) -> Option<f64> {
    degrees_minutes_to_decimal(latitude, 2, 'N', 'S')
}

/// Convert a DDDMMmmm[EW] longitude to signed decimal degrees
pub fn longitude_to_degrees(longitude: &str) -> Option<f64> {
    degrees_minutes_to_decimal(longitude, 3, 'E', 'W')
}

fn degrees_minutes_to_decimal(
    value: &str,
    degree_digits: usize,
    positive: char,
    negative: char,
) -> Option<f64> {
    // degrees + MM + mmm + hemisphere
    if value.len() != degree_digits + 6 || !value.is_ascii() {
        return None;
    }
    let (digits, hemisphere) = value.split_at(value.len() - 1);
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let degrees: f64 = digits[..degree_digits].parse().ok()?;
    // Minutes are stored as thousandths
    let minutes: f64 = digits[degree_digits..].parse::<f64>().ok()? / 1000.0;
    if minutes >= 60.0 {
        return None;
    }

    let decimal = degrees + minutes / 60.0;
    match hemisphere.chars().next()? {
        c if c == positive => Some(decimal),
        c if c == negative => Some(-decimal),
        _ => None,
    }
}

/// Parse a 5-character altitude field such as `00040` or `-0094`
pub fn parse_altitude(altitude: &str) -> Option<i32> {
    altitude.trim().parse().ok()
}
