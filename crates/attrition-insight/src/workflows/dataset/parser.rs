use super::normalizer::{normalize_header, parse_gender};
use super::DatasetError;
use crate::workflows::attrition::domain::DepartureRecord;
use serde::{Deserialize, Deserializer};
use std::io::Read;
use std::str::FromStr;

pub(crate) const REQUIRED_COLUMNS: [&str; 8] = [
    "employee_id",
    "gender",
    "age",
    "department",
    "reason",
    "departure_year",
    "tenure_years",
    "monthly_salary",
];

pub(crate) fn parse_records<R: Read>(reader: R) -> Result<Vec<DepartureRecord>, DatasetError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let headers: csv::StringRecord = csv_reader.headers()?.iter().map(normalize_header).collect();
    if let Some(missing) = REQUIRED_COLUMNS
        .iter()
        .find(|column| !headers.iter().any(|header| header == **column))
    {
        return Err(DatasetError::MissingField {
            field: *missing,
            row: None,
        });
    }
    csv_reader.set_headers(headers);

    let mut records = Vec::new();
    for (index, row) in csv_reader.deserialize::<DepartureRow>().enumerate() {
        records.push(row?.into_record(index + 1)?);
    }

    Ok(records)
}

#[derive(Debug, Deserialize)]
struct DepartureRow {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    employee_id: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    gender: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    age: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    department: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    reason: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    departure_year: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    tenure_years: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    monthly_salary: Option<String>,
}

impl DepartureRow {
    fn into_record(self, row: usize) -> Result<DepartureRecord, DatasetError> {
        let gender_raw = required(self.gender, "gender", row)?;
        let gender = parse_gender(&gender_raw).ok_or(DatasetError::InvalidValue {
            field: "gender",
            row,
            value: gender_raw,
        })?;

        Ok(DepartureRecord {
            employee_id: required(self.employee_id, "employee_id", row)?,
            gender,
            age: parse_number(self.age, "age", row)?,
            department: required(self.department, "department", row)?,
            reason: required(self.reason, "reason", row)?,
            departure_year: parse_number(self.departure_year, "departure_year", row)?,
            tenure_years: parse_measure(self.tenure_years, "tenure_years", row)?,
            monthly_salary: parse_measure(self.monthly_salary, "monthly_salary", row)?,
        })
    }
}

// Text cells are kept exactly as written; only blank cells count as missing.
fn required(value: Option<String>, field: &'static str, row: usize) -> Result<String, DatasetError> {
    value
        .filter(|raw| !raw.trim().is_empty())
        .ok_or(DatasetError::MissingField {
            field,
            row: Some(row),
        })
}

fn parse_number<T: FromStr>(
    value: Option<String>,
    field: &'static str,
    row: usize,
) -> Result<T, DatasetError> {
    let raw = required(value, field, row)?;
    raw.trim().parse::<T>().map_err(|_| DatasetError::InvalidValue {
        field,
        row,
        value: raw,
    })
}

// Tenure and salary must be finite and non-negative.
fn parse_measure(value: Option<String>, field: &'static str, row: usize) -> Result<f64, DatasetError> {
    let raw = required(value, field, row)?;
    match raw.trim().parse::<f64>() {
        Ok(parsed) if parsed.is_finite() && parsed >= 0.0 => Ok(parsed),
        _ => Err(DatasetError::InvalidValue {
            field,
            row,
            value: raw,
        }),
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
