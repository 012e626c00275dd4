use crate::error::ExportError;
use crate::export::FlightExporter;
use crate::types::{FieldValues, FlightModel};
use std::path::Path;

/// Titles of the B record fields, always the first six columns
pub const FIX_TITLES: [&str; 6] = [
    "UTC Time",
    "Longitude",
    "Latitude",
    "GPS Alt",
    "Fix Validity",
    "Pressure Altitude",
];

/// Tabular export: one row per fix, extension and K record values as extra columns
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvExporter;

impl FlightExporter for CsvExporter {
    fn export(&self, flight: &FlightModel, destination: &Path) -> Result<(), ExportError> {
        let table = build_table(flight);
        let mut writer = csv::Writer::from_path(destination)?;
        writer.write_record(&table.titles)?;
        for row in &table.rows {
            writer.write_record(row)?;
        }
        writer.flush()?;
        Ok(())
    }
}

/// Column titles and cell values ready to be written
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlightTable {
    pub titles: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Lay the flight out as a table
///
/// Columns are the six fix fields, then I record fields in first-seen order,
/// then K record fields in first-seen order. K values land on the fix row
/// with the same UTC time; K times without a fix get a row of their own
/// after the fix rows.
pub fn build_table(flight: &FlightModel) -> FlightTable {
    let mut titles: Vec<String> = FIX_TITLES.iter().map(|t| t.to_string()).collect();
    for fix in &flight.fixes {
        if let Some(ref values) = fix.extension_values {
            add_titles(&mut titles, values);
        }
    }
    for record in &flight.aux_records {
        add_titles(&mut titles, &record.flight_data_values);
    }

    // K values per UTC time, in first-seen time order; later records overwrite earlier ones
    let mut aux_by_time: Vec<(&str, FieldValues)> = Vec::new();
    for record in &flight.aux_records {
        let time = record.utc_timestamp.as_str();
        let index = match aux_by_time.iter().position(|(t, _)| *t == time) {
            Some(index) => index,
            None => {
                aux_by_time.push((time, FieldValues::new()));
                aux_by_time.len() - 1
            }
        };
        for (name, value) in record.flight_data_values.iter() {
            aux_by_time[index].1.insert(name, value);
        }
    }
    let mut aux_matched = vec![false; aux_by_time.len()];

    let mut rows = Vec::with_capacity(flight.fixes.len());
    for fix in &flight.fixes {
        let mut row = vec![String::new(); titles.len()];
        row[0] = fix.utc_time.clone();
        row[1] = fix.longitude.clone();
        row[2] = fix.latitude.clone();
        row[3] = fix.gps_altitude.clone();
        row[4] = fix.fix_validity.clone();
        row[5] = fix.pressure_altitude.clone();

        if let Some(ref values) = fix.extension_values {
            fill_cells(&mut row, &titles, values);
        }
        if let Some(index) = aux_by_time.iter().position(|(t, _)| *t == fix.utc_time) {
            fill_cells(&mut row, &titles, &aux_by_time[index].1);
            aux_matched[index] = true;
        }
        rows.push(row);
    }

    for ((time, values), matched) in aux_by_time.iter().zip(aux_matched) {
        if matched {
            continue;
        }
        let mut row = vec![String::new(); titles.len()];
        row[0] = time.to_string();
        fill_cells(&mut row, &titles, values);
        rows.push(row);
    }

    FlightTable { titles, rows }
}

fn add_titles(titles: &mut Vec<String>, values: &FieldValues) {
    for name in values.names() {
        if !titles.iter().any(|t| t == name) {
            titles.push(name.to_string());
        }
    }
}

fn fill_cells(row: &mut [String], titles: &[String], values: &FieldValues) {
    for (name, value) in values.iter() {
        if let Some(index) = titles.iter().position(|t| t == name) {
            row[index] = value.to_string();
        }
    }
}
