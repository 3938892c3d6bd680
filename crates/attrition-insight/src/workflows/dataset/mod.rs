mod normalizer;
mod parser;
mod sample;

pub use normalizer::parse_gender;
pub use sample::{SampleDataSource, DEFAULT_SAMPLE_SEED, DEFAULT_SAMPLE_SIZE};

use crate::workflows::attrition::domain::DepartureRecord;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Supplies the departure records a report is built from.
pub trait DepartureSource {
    fn describe(&self) -> String;
    fn load(&self) -> Result<Vec<DepartureRecord>, DatasetError>;
}

#[derive(Debug)]
pub enum DatasetError {
    Io(std::io::Error),
    Csv(csv::Error),
    /// A required column is absent (`row: None`) or a cell is empty (1-based data row).
    MissingField {
        field: &'static str,
        row: Option<usize>,
    },
    InvalidValue {
        field: &'static str,
        row: usize,
        value: String,
    },
    Sampling(String),
}

impl std::fmt::Display for DatasetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DatasetError::Io(err) => write!(f, "failed to read departure dataset: {}", err),
            DatasetError::Csv(err) => write!(f, "invalid departure CSV data: {}", err),
            DatasetError::MissingField { field, row: None } => {
                write!(f, "missing field '{}': column not present", field)
            }
            DatasetError::MissingField {
                field,
                row: Some(row),
            } => write!(f, "missing field '{}' in row {}", field, row),
            DatasetError::InvalidValue { field, row, value } => write!(
                f,
                "invalid value '{}' for field '{}' in row {}",
                value, field, row
            ),
            DatasetError::Sampling(detail) => {
                write!(f, "failed to generate sample dataset: {}", detail)
            }
        }
    }
}

impl std::error::Error for DatasetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DatasetError::Io(err) => Some(err),
            DatasetError::Csv(err) => Some(err),
            DatasetError::MissingField { .. }
            | DatasetError::InvalidValue { .. }
            | DatasetError::Sampling(_) => None,
        }
    }
}

impl From<std::io::Error> for DatasetError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for DatasetError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Parses departure records from CSV. Extra columns are ignored.
pub fn parse_records<R: Read>(reader: R) -> Result<Vec<DepartureRecord>, DatasetError> {
    parser::parse_records(reader)
}

/// Departure records read from a CSV file on disk.
#[derive(Debug, Clone)]
pub struct CsvDepartureSource {
    path: PathBuf,
}

impl CsvDepartureSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl DepartureSource for CsvDepartureSource {
    fn describe(&self) -> String {
        format!("CSV file {}", self.path.display())
    }

    fn load(&self) -> Result<Vec<DepartureRecord>, DatasetError> {
        let file = std::fs::File::open(&self.path)?;
        let records = parse_records(file)?;
        tracing::debug!(path = %self.path.display(), records = records.len(), "loaded departure CSV");
        Ok(records)
    }
}
