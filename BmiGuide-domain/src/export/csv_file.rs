use csv::{QuoteStyle, Terminator, WriterBuilder};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[cfg(feature = "with-api")]
use utoipa::ToSchema;

use crate::entities::measurement::PatientMeasurement;
use crate::services::classification::format_one_decimal;

/// Name of the downloaded file
pub const CSV_FILENAME: &str = "patient_bmi.csv";

/// Media type of the downloaded file
pub const CSV_MIME_TYPE: &str = "text/csv;charset=utf-8";

const CSV_HEADER: [&str; 5] = ["Patient Name", "Weight (kg)", "Height (cm)", "BMI", "Category"];

/// Errors raised while rendering the CSV export
#[derive(Debug, Error)]
pub enum CsvExportError {
    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    #[error("CSV output is not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
}

/// A generated file ready to be handed to the platform downloader
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct CsvFile {
    pub filename: String,
    pub mime_type: String,
    pub contents: String,
}

/// Render the two-row export (header + one record).
///
/// Every field is quoted and embedded quotes are doubled. Rows are
/// separated by `\n` with no trailing newline.
pub fn build_csv(
    measurement: &PatientMeasurement,
    bmi_text: &str,
    category_label: &str,
) -> Result<CsvFile, CsvExportError> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    let weight = format_one_decimal(measurement.weight_kg);
    let height = format_one_decimal(measurement.height_cm);

    writer.write_record(CSV_HEADER)?;
    writer.write_record([
        measurement.name.as_str(),
        weight.as_str(),
        height.as_str(),
        bmi_text,
        category_label,
    ])?;

    let bytes = writer
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))?;
    let mut contents = String::from_utf8(bytes)?;
    if contents.ends_with('\n') {
        contents.pop();
    }

    Ok(CsvFile {
        filename: CSV_FILENAME.to_string(),
        mime_type: CSV_MIME_TYPE.to_string(),
        contents,
    })
}
