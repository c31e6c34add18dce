use crate::domain::model::OutputRow;
use crate::utils::error::{Result, ScrapeError};

/// Serialises the header and rows. Columns a row lacks are written as `0`;
/// row values outside the header are not written.
pub fn write_rows(header: &[String], rows: &[OutputRow], delimiter: u8) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(Vec::new());

    writer.write_record(header)?;
    for row in rows {
        writer.write_record(
            header
                .iter()
                .map(|column| row.field(column).unwrap_or_else(|| "0".to_string())),
        )?;
    }

    writer
        .into_inner()
        .map_err(|e| ScrapeError::Io(e.into_error()))
}
