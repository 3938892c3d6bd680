use super::super::domain::{EnrichedRecord, Gender};
use super::super::policy::AttritionPolicy;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Snapshot of descriptive statistics over the current record set.
///
/// Every field is zero for an empty dataset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryStatistics {
    pub total: usize,
    pub male_count: usize,
    pub female_count: usize,
    pub male_pct: f64,
    pub female_pct: f64,
    pub mean_age: f64,
    pub mean_tenure_years: f64,
    pub mean_monthly_salary: f64,
    pub first_year: i32,
    pub last_year: i32,
    pub distinct_reasons: usize,
    pub distinct_departments: usize,
    pub estimated_retention_pct: f64,
}

impl SummaryStatistics {
    pub fn years_range(&self) -> String {
        if self.total == 0 {
            String::new()
        } else {
            format!("{} - {}", self.first_year, self.last_year)
        }
    }
}

pub fn summarize(records: &[EnrichedRecord], policy: &AttritionPolicy) -> SummaryStatistics {
    let total = records.len();
    if total == 0 {
        return SummaryStatistics::default();
    }

    let mut male_count = 0;
    let mut female_count = 0;
    let mut age_sum = 0.0;
    let mut tenure_sum = 0.0;
    let mut salary_sum = 0.0;
    let mut first_year = i32::MAX;
    let mut last_year = i32::MIN;
    let mut reasons: HashSet<&str> = HashSet::new();
    let mut departments: HashSet<&str> = HashSet::new();

    for enriched in records {
        let record = &enriched.record;
        match record.gender {
            Gender::Male => male_count += 1,
            Gender::Female => female_count += 1,
        }
        age_sum += f64::from(record.age);
        tenure_sum += record.tenure_years;
        salary_sum += record.monthly_salary;
        first_year = first_year.min(record.departure_year);
        last_year = last_year.max(record.departure_year);
        reasons.insert(record.reason.as_str());
        departments.insert(record.department.as_str());
    }

    let count = total as f64;
    let workforce = total.saturating_add(policy.assumed_active_headcount);

    SummaryStatistics {
        total,
        male_count,
        female_count,
        male_pct: percentage(male_count, total),
        female_pct: percentage(female_count, total),
        mean_age: age_sum / count,
        mean_tenure_years: tenure_sum / count,
        mean_monthly_salary: salary_sum / count,
        first_year,
        last_year,
        distinct_reasons: reasons.len(),
        distinct_departments: departments.len(),
        estimated_retention_pct: 100.0 - percentage(total, workforce),
    }
}

/// `count / total * 100`, or 0 when `total` is 0.
pub(crate) fn percentage(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64 * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::attrition::categorize;
    use crate::workflows::attrition::domain::DepartureRecord;

    fn record(gender: Gender, reason: &str, department: &str, year: i32) -> DepartureRecord {
        DepartureRecord {
            employee_id: format!("{reason}-{year}"),
            gender,
            age: 30,
            department: department.to_string(),
            reason: reason.to_string(),
            departure_year: year,
            tenure_years: 2.0,
            monthly_salary: 6000.0,
        }
    }

    #[test]
    fn empty_dataset_yields_zeroed_statistics() {
        let summary = summarize(&[], &AttritionPolicy::default());
        assert_eq!(summary, SummaryStatistics::default());
        assert_eq!(summary.male_pct, 0.0);
        assert_eq!(summary.female_pct, 0.0);
        assert_eq!(summary.estimated_retention_pct, 0.0);
        assert_eq!(summary.years_range(), "");
    }

    #[test]
    fn gender_shares_sum_to_one_hundred() {
        let records = categorize(&[
            record(Gender::Male, "relocation", "Sales", 2020),
            record(Gender::Male, "relocation", "Sales", 2021),
            record(Gender::Female, "relocation", "Sales", 2022),
        ]);
        let summary = summarize(&records, &AttritionPolicy::default());

        assert_eq!(summary.male_count, 2);
        assert_eq!(summary.female_count, 1);
        assert!((summary.male_pct + summary.female_pct - 100.0).abs() < 1e-9);
        assert!((0.0..=100.0).contains(&summary.male_pct));
        assert!((0.0..=100.0).contains(&summary.female_pct));
    }

    #[test]
    fn distinct_counts_are_case_sensitive() {
        let records = categorize(&[
            record(Gender::Female, "Relocation", "Sales", 2020),
            record(Gender::Female, "relocation", "sales", 2020),
            record(Gender::Female, "relocation", "Sales", 2020),
        ]);
        let summary = summarize(&records, &AttritionPolicy::default());
        assert_eq!(summary.distinct_reasons, 2);
        assert_eq!(summary.distinct_departments, 2);
    }

    #[test]
    fn huge_headcount_saturates_instead_of_overflowing() {
        let policy = AttritionPolicy::from_json(r#"{ "assumed_active_headcount": 18446744073709551615 }"#)
            .expect("policy parses");
        let records = categorize(&[
            record(Gender::Male, "relocation", "Sales", 2020),
            record(Gender::Female, "relocation", "Sales", 2021),
        ]);

        let summary = summarize(&records, &policy);
        assert!(summary.estimated_retention_pct > 99.9);
        assert!(summary.estimated_retention_pct <= 100.0);
    }

    #[test]
    fn means_ranges_and_retention_are_computed() {
        let mut first = record(Gender::Male, "relocation", "Sales", 2018);
        first.age = 24;
        first.tenure_years = 1.0;
        first.monthly_salary = 4000.0;
        let mut second = record(Gender::Female, "career change", "Quality", 2024);
        second.age = 36;
        second.tenure_years = 5.0;
        second.monthly_salary = 10000.0;

        let policy = AttritionPolicy {
            assumed_active_headcount: 198,
            ..AttritionPolicy::default()
        };
        let summary = summarize(&categorize(&[first, second]), &policy);

        assert_eq!(summary.mean_age, 30.0);
        assert_eq!(summary.mean_tenure_years, 3.0);
        assert_eq!(summary.mean_monthly_salary, 7000.0);
        assert_eq!(summary.years_range(), "2018 - 2024");
        assert!((summary.estimated_retention_pct - 99.0).abs() < 1e-9);
    }
}
