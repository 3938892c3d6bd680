use super::{DatasetError, DepartureSource};
use crate::workflows::attrition::domain::{
    DepartureRecord, Gender, DEPARTMENT_CATALOG, REASON_CATALOG,
};
use rand::distributions::WeightedIndex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Exp, Normal};

pub const DEFAULT_SAMPLE_SEED: u64 = 42;
pub const DEFAULT_SAMPLE_SIZE: usize = 2000;

const MALE_SHARE: f64 = 0.6;
const FIRST_YEAR: i32 = 2015;
const REASON_WEIGHTS: [f64; 14] = [
    0.15, 0.12, 0.10, 0.08, 0.08, 0.07, 0.06, 0.06, 0.05, 0.05, 0.04, 0.04, 0.05, 0.05,
];
const YEAR_WEIGHTS: [f64; 10] = [0.08, 0.09, 0.10, 0.11, 0.12, 0.13, 0.12, 0.11, 0.09, 0.05];

/// Seeded synthetic departures for demos and tests. The same seed and size
/// always produce the same records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleDataSource {
    pub seed: u64,
    pub size: usize,
}

impl Default for SampleDataSource {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SAMPLE_SEED,
            size: DEFAULT_SAMPLE_SIZE,
        }
    }
}

impl SampleDataSource {
    pub fn new(seed: u64, size: usize) -> Self {
        Self { seed, size }
    }

    pub fn generate(&self) -> Result<Vec<DepartureRecord>, DatasetError> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let age = Normal::<f64>::new(35.0, 8.0).map_err(sampling_error)?;
        let tenure = Exp::<f64>::new(1.0 / 3.0).map_err(sampling_error)?;
        let salary = Normal::<f64>::new(8000.0, 2500.0).map_err(sampling_error)?;
        let reasons = WeightedIndex::new(REASON_WEIGHTS).map_err(sampling_error)?;
        let years = WeightedIndex::new(YEAR_WEIGHTS).map_err(sampling_error)?;

        let records = (1..=self.size)
            .map(|id| {
                let gender = if rng.gen_bool(MALE_SHARE) {
                    Gender::Male
                } else {
                    Gender::Female
                };
                let age_years = (age.sample(&mut rng) as i64).clamp(22, 65) as u8;
                let department = DEPARTMENT_CATALOG[rng.gen_range(0..DEPARTMENT_CATALOG.len())];
                let reason = REASON_CATALOG[reasons.sample(&mut rng)];
                let departure_year = FIRST_YEAR + years.sample(&mut rng) as i32;
                let tenure_years = round_to(tenure.sample(&mut rng).clamp(0.5, 20.0), 1);
                let monthly_salary = salary.sample(&mut rng).clamp(3000.0, 25000.0).round();

                DepartureRecord {
                    employee_id: id.to_string(),
                    gender,
                    age: age_years,
                    department: department.to_string(),
                    reason: reason.to_string(),
                    departure_year,
                    tenure_years,
                    monthly_salary,
                }
            })
            .collect();

        Ok(records)
    }
}

impl DepartureSource for SampleDataSource {
    fn describe(&self) -> String {
        format!(
            "synthetic sample ({} records, seed {})",
            self.size, self.seed
        )
    }

    fn load(&self) -> Result<Vec<DepartureRecord>, DatasetError> {
        self.generate()
    }
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

fn sampling_error<E: std::fmt::Display>(err: E) -> DatasetError {
    DatasetError::Sampling(err.to_string())
}
