//! Pass-through serializations of pipeline outputs for download.

use super::domain::{EnrichedRecord, Gender};
use super::report::SummaryStatistics;
use serde::Serialize;
use std::io::Write;

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to write CSV export: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to write export: {0}")]
    Io(#[from] std::io::Error),
    #[error("export is not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
}

#[derive(Serialize)]
struct EnrichedRow<'a> {
    employee_id: &'a str,
    gender: Gender,
    age: u8,
    department: &'a str,
    reason: &'a str,
    departure_year: i32,
    tenure_years: f64,
    monthly_salary: f64,
    age_band: &'static str,
    tenure_band: &'static str,
    salary_band: &'static str,
}

impl<'a> From<&'a EnrichedRecord> for EnrichedRow<'a> {
    fn from(enriched: &'a EnrichedRecord) -> Self {
        let record = &enriched.record;
        Self {
            employee_id: &record.employee_id,
            gender: record.gender,
            age: record.age,
            department: &record.department,
            reason: &record.reason,
            departure_year: record.departure_year,
            tenure_years: record.tenure_years,
            monthly_salary: record.monthly_salary,
            age_band: enriched.age_band.label(),
            tenure_band: enriched.tenure_band.label(),
            salary_band: enriched.salary_band.label(),
        }
    }
}

const RECORD_COLUMNS: [&str; 11] = [
    "employee_id",
    "gender",
    "age",
    "department",
    "reason",
    "departure_year",
    "tenure_years",
    "monthly_salary",
    "age_band",
    "tenure_band",
    "salary_band",
];

/// Writes the header even when `records` is empty, so every export re-imports.
pub fn write_records_csv<W: Write>(
    records: &[EnrichedRecord],
    writer: W,
) -> Result<(), ExportError> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    csv_writer.write_record(RECORD_COLUMNS)?;
    for record in records {
        csv_writer.serialize(EnrichedRow::from(record))?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn records_csv(records: &[EnrichedRecord]) -> Result<String, ExportError> {
    let mut buffer = Vec::new();
    write_records_csv(records, &mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}

pub fn statistics_csv(summary: &SummaryStatistics) -> Result<String, ExportError> {
    let mut csv_writer = csv::Writer::from_writer(Vec::new());
    csv_writer.serialize(summary)?;
    let buffer = csv_writer
        .into_inner()
        .map_err(|err| ExportError::Io(err.into_error()))?;
    Ok(String::from_utf8(buffer)?)
}

/// One numbered line per recommendation, without a trailing newline.
pub fn recommendations_text(recommendations: &[String]) -> String {
    recommendations
        .iter()
        .enumerate()
        .map(|(index, action)| format!("{}. {}", index + 1, action))
        .collect::<Vec<_>>()
        .join("\n")
}
