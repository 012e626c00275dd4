//! Export filtering heuristics for identifying flights worth exporting
//!
//! Recorders often leave behind files from a power-on test on the ground:
//! no satellite lock, or a handful of fixes at a single spot. These filters
//! let the converter skip them.
//!
//! # Usage
//!
//! Filtering is controlled through `ExportOptions::force_export`. The CLI
//! filters by default; `--force-export` turns it off.

use crate::conversion::{latitude_to_degrees, longitude_to_degrees, parse_altitude};
use crate::types::FlightModel;

/// Determines if a flight should be skipped for export
///
/// Skips flights without fixes, flights whose fixes are all 2D (`V`), and
/// flights whose valid fixes never leave the starting spot.
///
/// # Arguments
/// * `flight` - The parsed flight to evaluate
/// * `force_export` - If true, never skips (overrides all heuristics)
///
/// # Returns
/// Tuple of (should_skip, reason_description)
pub fn should_skip_export(flight: &FlightModel, force_export: bool) -> (bool, String) {
    if force_export {
        return (false, String::new());
    }

    if flight.fixes.is_empty() {
        return (true, "no fix records".to_string());
    }

    if flight.valid_fix_count() == 0 {
        return (
            true,
            format!("no 3D fixes among {} fix records", flight.fix_count()),
        );
    }

    let (is_stationary, horizontal_span_m, vertical_span_m) = has_minimal_movement(flight);
    if is_stationary {
        return (
            true,
            format!(
                "minimal movement ({:.0}m horizontal, {}m vertical) - likely ground test",
                horizontal_span_m, vertical_span_m
            ),
        );
    }

    (false, String::new())
}

/// Measures how far the valid fixes spread out
///
/// Returns true if the flight appears to be a static ground test
///
/// # Returns
/// Tuple of (is_minimal_movement, horizontal_span_m, vertical_span_m)
pub fn has_minimal_movement(flight: &FlightModel) -> (bool, f64, i32) {
    const MIN_SAMPLES_FOR_ANALYSIS: usize = 10;
    const MAX_STATIONARY_SPAN_M: f64 = 200.0;
    const MAX_STATIONARY_CLIMB_M: i32 = 50;
    const METRES_PER_DEGREE: f64 = 111_320.0;

    let mut latitudes = Vec::new();
    let mut longitudes = Vec::new();
    let mut altitudes = Vec::new();

    for fix in flight.fixes.iter().filter(|fix| fix.is_valid()) {
        if let (Some(lat), Some(lon)) = (
            latitude_to_degrees(&fix.latitude),
            longitude_to_degrees(&fix.longitude),
        ) {
            latitudes.push(lat);
            longitudes.push(lon);
            if let Some(altitude) = parse_altitude(&fix.gps_altitude) {
                altitudes.push(altitude);
            }
        }
    }

    // Not enough data to judge, keep the flight
    if latitudes.len() < MIN_SAMPLES_FOR_ANALYSIS {
        return (false, 0.0, 0);
    }

    let span = |values: &[f64]| {
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        max - min
    };
    let mean_latitude = latitudes.iter().sum::<f64>() / latitudes.len() as f64;

    let north_south_m = span(&latitudes) * METRES_PER_DEGREE;
    let east_west_m = span(&longitudes) * METRES_PER_DEGREE * mean_latitude.to_radians().cos();
    let horizontal_span_m = north_south_m.hypot(east_west_m);

    let vertical_span_m = match (altitudes.iter().min(), altitudes.iter().max()) {
        (Some(min), Some(max)) => max - min,
        _ => 0,
    };

    let is_stationary =
        horizontal_span_m < MAX_STATIONARY_SPAN_M && vertical_span_m < MAX_STATIONARY_CLIMB_M;
    (is_stationary, horizontal_span_m, vertical_span_m)
}
