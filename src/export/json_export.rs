use crate::error::ExportError;
use crate::export::FlightExporter;
use crate::types::FlightModel;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Pretty-printed JSON dump of the whole flight model
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonExporter;

impl FlightExporter for JsonExporter {
    fn export(&self, flight: &FlightModel, destination: &Path) -> Result<(), ExportError> {
        let file = File::create(destination)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, flight)?;
        writeln!(writer)?;
        writer.flush()?;
        Ok(())
    }
}
