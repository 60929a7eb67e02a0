//! CSV export of the prediction report.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::predictor::PredictionReport;

pub const REPORT_FILE_NAME: &str = "prediction_report.csv";
pub const REPORT_CONTENT_TYPE: &str = "text/csv";

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("report contains no data row")]
    Empty,

    #[error("report is not valid UTF-8")]
    Encoding(#[from] std::string::FromUtf8Error),

    #[error("failed to flush csv writer: {0}")]
    Flush(String),
}

/// Column layout of the exported file.
#[derive(Debug, Serialize, Deserialize)]
struct ReportRow {
    #[serde(rename = "Month")]
    month: u32,
    #[serde(rename = "Humidity (%)")]
    humidity: f64,
    #[serde(rename = "Wind Speed (km/h)")]
    wind_speed: f64,
    #[serde(rename = "Predicted Energy Consumption (kWh)")]
    predicted_consumption: f64,
}

impl From<&PredictionReport> for ReportRow {
    fn from(r: &PredictionReport) -> Self {
        Self {
            month: r.month,
            humidity: r.humidity,
            wind_speed: r.wind_speed,
            predicted_consumption: r.predicted_consumption,
        }
    }
}

impl From<ReportRow> for PredictionReport {
    fn from(r: ReportRow) -> Self {
        Self {
            month: r.month,
            humidity: r.humidity,
            wind_speed: r.wind_speed,
            predicted_consumption: r.predicted_consumption,
        }
    }
}

/// Header line plus one data row, no index column.
pub fn to_csv(report: &PredictionReport) -> Result<String, ReportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.serialize(ReportRow::from(report))?;
    let bytes = writer
        .into_inner()
        .map_err(|e| ReportError::Flush(e.error().to_string()))?;
    Ok(String::from_utf8(bytes)?)
}

pub fn from_csv(data: &str) -> Result<PredictionReport, ReportError> {
    let mut reader = csv::Reader::from_reader(data.as_bytes());
    let row: ReportRow = reader
        .deserialize()
        .next()
        .ok_or(ReportError::Empty)??;
    Ok(row.into())
}
