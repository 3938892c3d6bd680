use serde::{Deserialize, Serialize};
use std::fmt;

pub const REASON_ANOTHER_JOB: &str = "another job opportunity";
pub const REASON_INADEQUATE_SALARY: &str = "inadequate salary";
pub const REASON_POOR_ENVIRONMENT: &str = "poor work environment";

/// Departure reasons used by the synthetic data source, in catalog order.
pub const REASON_CATALOG: [&str; 14] = [
    REASON_ANOTHER_JOB,
    REASON_INADEQUATE_SALARY,
    REASON_POOR_ENVIRONMENT,
    "lack of promotion",
    "long working hours",
    "family commitments",
    "personal reasons",
    "job dissatisfaction",
    "conflict with management",
    "relocation",
    "health reasons",
    "further education",
    "career change",
    "job instability",
];

/// Departments used by the synthetic data source, in catalog order.
pub const DEPARTMENT_CATALOG: [&str; 10] = [
    "Human Resources",
    "Finance & Accounting",
    "Marketing",
    "Sales",
    "Information Technology",
    "Operations",
    "Customer Service",
    "Production",
    "Research & Development",
    "Quality",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub const fn ordered() -> [Self; 2] {
        [Self::Male, Self::Female]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One employee departure event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepartureRecord {
    pub employee_id: String,
    pub gender: Gender,
    pub age: u8,
    pub department: String,
    pub reason: String,
    pub departure_year: i32,
    pub tenure_years: f64,
    pub monthly_salary: f64,
}

/// Age buckets over `[0, 25, 35, 45, 55, ∞)`, lower edge inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AgeBand {
    #[serde(rename = "<25")]
    Under25,
    #[serde(rename = "25-35")]
    From25To35,
    #[serde(rename = "35-45")]
    From35To45,
    #[serde(rename = "45-55")]
    From45To55,
    #[serde(rename = ">55")]
    Over55,
}

impl AgeBand {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::Under25,
            Self::From25To35,
            Self::From35To45,
            Self::From45To55,
            Self::Over55,
        ]
    }

    pub fn from_age(age: u8) -> Self {
        match age {
            0..=24 => Self::Under25,
            25..=34 => Self::From25To35,
            35..=44 => Self::From35To45,
            45..=54 => Self::From45To55,
            _ => Self::Over55,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Under25 => "<25",
            Self::From25To35 => "25-35",
            Self::From35To45 => "35-45",
            Self::From45To55 => "45-55",
            Self::Over55 => ">55",
        }
    }
}

/// Tenure buckets in years over `[0, 1, 3, 5, 10, ∞)`, lower edge inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TenureBand {
    #[serde(rename = "<1")]
    UnderOneYear,
    #[serde(rename = "1-3")]
    OneToThree,
    #[serde(rename = "3-5")]
    ThreeToFive,
    #[serde(rename = "5-10")]
    FiveToTen,
    #[serde(rename = ">10")]
    OverTen,
}

impl TenureBand {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::UnderOneYear,
            Self::OneToThree,
            Self::ThreeToFive,
            Self::FiveToTen,
            Self::OverTen,
        ]
    }

    pub fn from_years(years: f64) -> Self {
        band_index(years, &[1.0, 3.0, 5.0, 10.0])
            .map(|index| Self::ordered()[index])
            .unwrap_or(Self::OverTen)
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::UnderOneYear => "<1",
            Self::OneToThree => "1-3",
            Self::ThreeToFive => "3-5",
            Self::FiveToTen => "5-10",
            Self::OverTen => ">10",
        }
    }
}

/// Monthly salary buckets over `[0, 5000, 8000, 12000, 20000, ∞)`, lower edge inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SalaryBand {
    #[serde(rename = "<5000")]
    Under5000,
    #[serde(rename = "5000-8000")]
    From5000To8000,
    #[serde(rename = "8000-12000")]
    From8000To12000,
    #[serde(rename = "12000-20000")]
    From12000To20000,
    #[serde(rename = ">20000")]
    Over20000,
}

impl SalaryBand {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::Under5000,
            Self::From5000To8000,
            Self::From8000To12000,
            Self::From12000To20000,
            Self::Over20000,
        ]
    }

    pub fn from_salary(salary: f64) -> Self {
        band_index(salary, &[5000.0, 8000.0, 12000.0, 20000.0])
            .map(|index| Self::ordered()[index])
            .unwrap_or(Self::Over20000)
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Under5000 => "<5000",
            Self::From5000To8000 => "5000-8000",
            Self::From8000To12000 => "8000-12000",
            Self::From12000To20000 => "12000-20000",
            Self::Over20000 => ">20000",
        }
    }
}

// Index of the first upper edge strictly above `value`. `None` means the value
// sits at or beyond the last edge (or is NaN) and belongs to the terminal band.
fn band_index(value: f64, upper_edges: &[f64]) -> Option<usize> {
    upper_edges.iter().position(|edge| value < *edge)
}

/// A departure record with its derived bands attached.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichedRecord {
    pub record: DepartureRecord,
    pub age_band: AgeBand,
    pub tenure_band: TenureBand,
    pub salary_band: SalaryBand,
}

impl EnrichedRecord {
    pub fn new(record: DepartureRecord) -> Self {
        Self {
            age_band: AgeBand::from_age(record.age),
            tenure_band: TenureBand::from_years(record.tenure_years),
            salary_band: SalaryBand::from_salary(record.monthly_salary),
            record,
        }
    }
}
