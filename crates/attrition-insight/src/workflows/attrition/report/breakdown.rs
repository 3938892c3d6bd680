use super::super::domain::{AgeBand, EnrichedRecord, Gender, SalaryBand, TenureBand};
use super::summary::percentage;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

const TOP_REASONS_FOR_SALARY: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrequencyEntry {
    pub label: String,
    pub count: usize,
    pub share_pct: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GenderCounts {
    pub male: usize,
    pub female: usize,
}

impl GenderCounts {
    fn add(&mut self, gender: Gender) {
        match gender {
            Gender::Male => self.male += 1,
            Gender::Female => self.female += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.male + self.female
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReasonGenderRow {
    pub reason: String,
    #[serde(flatten)]
    pub counts: GenderCounts,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearGenderRow {
    pub year: i32,
    #[serde(flatten)]
    pub counts: GenderCounts,
    pub total: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DepartmentGenderRow {
    pub department: String,
    #[serde(flatten)]
    pub counts: GenderCounts,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TenureGenderRow {
    pub band: TenureBand,
    pub band_label: &'static str,
    #[serde(flatten)]
    pub counts: GenderCounts,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BandCount<B> {
    pub band: B,
    pub band_label: &'static str,
    pub count: usize,
    pub share_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalaryReasonRow {
    pub band: SalaryBand,
    pub band_label: &'static str,
    pub reason: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DepartmentProfile {
    pub department: String,
    pub departures: usize,
    pub mean_tenure_years: f64,
    pub mean_monthly_salary: f64,
}

/// Grouped tables for charting the current record set.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Breakdown {
    pub reasons: Vec<FrequencyEntry>,
    pub departments: Vec<FrequencyEntry>,
    pub gender_by_reason: Vec<ReasonGenderRow>,
    pub yearly_by_gender: Vec<YearGenderRow>,
    pub department_by_gender: Vec<DepartmentGenderRow>,
    pub tenure_by_gender: Vec<TenureGenderRow>,
    pub age_bands: Vec<BandCount<AgeBand>>,
    pub salary_bands: Vec<BandCount<SalaryBand>>,
    pub salary_by_top_reasons: Vec<SalaryReasonRow>,
    pub department_profiles: Vec<DepartmentProfile>,
}

impl Breakdown {
    pub fn from_records(records: &[EnrichedRecord]) -> Self {
        let total = records.len();
        let reasons = frequency_table(records.iter().map(|r| r.record.reason.as_str()));
        let departments = frequency_table(records.iter().map(|r| r.record.department.as_str()));

        let mut by_reason: HashMap<&str, GenderCounts> = HashMap::new();
        let mut by_department: HashMap<&str, GenderCounts> = HashMap::new();
        let mut by_year: BTreeMap<i32, GenderCounts> = BTreeMap::new();
        let mut by_tenure: HashMap<TenureBand, GenderCounts> = HashMap::new();
        let mut age_counts: HashMap<AgeBand, usize> = HashMap::new();
        let mut salary_counts: HashMap<SalaryBand, usize> = HashMap::new();
        let mut salary_reason: HashMap<(SalaryBand, &str), usize> = HashMap::new();
        let mut department_sums: HashMap<&str, (f64, f64)> = HashMap::new();

        for enriched in records {
            let record = &enriched.record;
            by_reason
                .entry(record.reason.as_str())
                .or_default()
                .add(record.gender);
            by_department
                .entry(record.department.as_str())
                .or_default()
                .add(record.gender);
            by_year
                .entry(record.departure_year)
                .or_default()
                .add(record.gender);
            by_tenure
                .entry(enriched.tenure_band)
                .or_default()
                .add(record.gender);
            *age_counts.entry(enriched.age_band).or_default() += 1;
            *salary_counts.entry(enriched.salary_band).or_default() += 1;
            *salary_reason
                .entry((enriched.salary_band, record.reason.as_str()))
                .or_default() += 1;
            let sums = department_sums
                .entry(record.department.as_str())
                .or_default();
            sums.0 += record.tenure_years;
            sums.1 += record.monthly_salary;
        }

        let gender_by_reason = reasons
            .iter()
            .map(|entry| ReasonGenderRow {
                reason: entry.label.clone(),
                counts: by_reason
                    .get(entry.label.as_str())
                    .copied()
                    .unwrap_or_default(),
            })
            .collect();

        let yearly_by_gender = by_year
            .into_iter()
            .map(|(year, counts)| YearGenderRow {
                year,
                counts,
                total: counts.total(),
            })
            .collect();

        let department_by_gender = departments
            .iter()
            .map(|entry| DepartmentGenderRow {
                department: entry.label.clone(),
                counts: by_department
                    .get(entry.label.as_str())
                    .copied()
                    .unwrap_or_default(),
            })
            .collect();

        let tenure_by_gender = TenureBand::ordered()
            .into_iter()
            .filter_map(|band| {
                by_tenure.get(&band).map(|counts| TenureGenderRow {
                    band,
                    band_label: band.label(),
                    counts: *counts,
                })
            })
            .collect();

        let age_bands = AgeBand::ordered()
            .into_iter()
            .map(|band| {
                let count = age_counts.get(&band).copied().unwrap_or(0);
                BandCount {
                    band,
                    band_label: band.label(),
                    count,
                    share_pct: percentage(count, total),
                }
            })
            .collect();

        let salary_bands = SalaryBand::ordered()
            .into_iter()
            .map(|band| {
                let count = salary_counts.get(&band).copied().unwrap_or(0);
                BandCount {
                    band,
                    band_label: band.label(),
                    count,
                    share_pct: percentage(count, total),
                }
            })
            .collect();

        let top_reasons: Vec<&str> = reasons
            .iter()
            .take(TOP_REASONS_FOR_SALARY)
            .map(|entry| entry.label.as_str())
            .collect();
        let mut salary_by_top_reasons = Vec::new();
        for band in SalaryBand::ordered() {
            for reason in &top_reasons {
                if let Some(count) = salary_reason.get(&(band, *reason)) {
                    salary_by_top_reasons.push(SalaryReasonRow {
                        band,
                        band_label: band.label(),
                        reason: reason.to_string(),
                        count: *count,
                    });
                }
            }
        }

        let department_profiles = departments
            .iter()
            .map(|entry| {
                let (tenure_sum, salary_sum) = department_sums
                    .get(entry.label.as_str())
                    .copied()
                    .unwrap_or_default();
                let departures = entry.count as f64;
                DepartmentProfile {
                    department: entry.label.clone(),
                    departures: entry.count,
                    mean_tenure_years: tenure_sum / departures,
                    mean_monthly_salary: salary_sum / departures,
                }
            })
            .collect();

        Self {
            reasons,
            departments,
            gender_by_reason,
            yearly_by_gender,
            department_by_gender,
            tenure_by_gender,
            age_bands,
            salary_bands,
            salary_by_top_reasons,
            department_profiles,
        }
    }
}

/// Most frequent reasons within a single department.
pub fn department_reasons(
    records: &[EnrichedRecord],
    department: &str,
    limit: usize,
) -> Vec<FrequencyEntry> {
    let mut table = frequency_table(
        records
            .iter()
            .filter(|r| r.record.department == department)
            .map(|r| r.record.reason.as_str()),
    );
    table.truncate(limit);
    table
}

/// Counts values, ordered by count descending. Equal counts keep the order in
/// which the values first appeared.
pub(crate) fn frequency_table<'a, I>(values: I) -> Vec<FrequencyEntry>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<(&str, usize)> = Vec::new();
    let mut total = 0;

    for value in values {
        total += 1;
        match positions.get(value) {
            Some(index) => counts[*index].1 += 1,
            None => {
                positions.insert(value, counts.len());
                counts.push((value, 1));
            }
        }
    }

    // stable sort keeps first-seen order within equal counts
    counts.sort_by(|a, b| b.1.cmp(&a.1));

    counts
        .into_iter()
        .map(|(label, count)| FrequencyEntry {
            label: label.to_string(),
            count,
            share_pct: percentage(count, total),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::attrition::categorize;
    use crate::workflows::attrition::domain::DepartureRecord;

    fn record(
        gender: Gender,
        department: &str,
        reason: &str,
        year: i32,
        tenure_years: f64,
    ) -> DepartureRecord {
        DepartureRecord {
            employee_id: format!("{department}-{year}"),
            gender,
            age: 40,
            department: department.to_string(),
            reason: reason.to_string(),
            departure_year: year,
            tenure_years,
            monthly_salary: 9000.0,
        }
    }

    #[test]
    fn frequency_table_keeps_first_seen_order_for_ties() {
        let table = frequency_table(["Sales", "Quality", "Quality", "Sales", "Marketing"]);
        let labels: Vec<_> = table.iter().map(|entry| entry.label.as_str()).collect();
        assert_eq!(labels, vec!["Sales", "Quality", "Marketing"]);
        assert_eq!(table[0].count, 2);
        assert_eq!(table[2].share_pct, 20.0);
    }

    #[test]
    fn breakdown_groups_by_year_and_gender() {
        let records = categorize(&[
            record(Gender::Male, "Sales", "relocation", 2021, 0.5),
            record(Gender::Female, "Sales", "relocation", 2021, 4.0),
            record(Gender::Female, "Quality", "career change", 2019, 12.0),
        ]);
        let breakdown = Breakdown::from_records(&records);

        let years: Vec<_> = breakdown
            .yearly_by_gender
            .iter()
            .map(|row| (row.year, row.counts.male, row.counts.female, row.total))
            .collect();
        assert_eq!(years, vec![(2019, 0, 1, 1), (2021, 1, 1, 2)]);

        assert_eq!(breakdown.reasons[0].label, "relocation");
        assert_eq!(breakdown.department_by_gender[0].department, "Sales");
        assert_eq!(breakdown.tenure_by_gender.len(), 3);
        assert_eq!(breakdown.age_bands.len(), 5);
        assert_eq!(
            breakdown
                .age_bands
                .iter()
                .find(|row| row.band == AgeBand::From35To45)
                .map(|row| row.count),
            Some(3)
        );
        assert_eq!(breakdown.salary_by_top_reasons.len(), 2);
    }

    #[test]
    fn department_profiles_average_within_department() {
        let mut low = record(Gender::Male, "Sales", "relocation", 2020, 1.0);
        low.monthly_salary = 4000.0;
        let mut high = record(Gender::Male, "Sales", "relocation", 2020, 3.0);
        high.monthly_salary = 8000.0;
        let breakdown = Breakdown::from_records(&categorize(&[low, high]));

        let profile = &breakdown.department_profiles[0];
        assert_eq!(profile.departures, 2);
        assert_eq!(profile.mean_tenure_years, 2.0);
        assert_eq!(profile.mean_monthly_salary, 6000.0);
    }

    #[test]
    fn department_reasons_filters_and_truncates() {
        let records = categorize(&[
            record(Gender::Male, "Sales", "relocation", 2020, 1.0),
            record(Gender::Male, "Sales", "career change", 2020, 1.0),
            record(Gender::Male, "Sales", "career change", 2020, 1.0),
            record(Gender::Male, "Quality", "health reasons", 2020, 1.0),
        ]);

        let reasons = department_reasons(&records, "Sales", 1);
        assert_eq!(reasons.len(), 1);
        assert_eq!(reasons[0].label, "career change");
        assert!((reasons[0].share_pct - 200.0 / 3.0).abs() < 1e-9);

        assert!(department_reasons(&records, "Finance", 5).is_empty());
    }

    #[test]
    fn empty_dataset_produces_zeroed_band_tables() {
        let breakdown = Breakdown::from_records(&[]);
        assert!(breakdown.reasons.is_empty());
        assert!(breakdown.age_bands.iter().all(|row| row.count == 0));
        assert!(breakdown.salary_bands.iter().all(|row| row.share_pct == 0.0));
    }
}
